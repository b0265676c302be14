//! Item stacks, the in-flight collection buffer, and the thrown item descriptor.

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::enums::{BlockInteraction, CreatureKind, EntityInteraction};

/// A quantity of one item kind.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ItemStack {
    /// Host item identifier, e.g. `"minecraft:wool"`.
    pub item: String,
    pub count: u32,
}

impl ItemStack {
    pub fn new(item: impl Into<String>, count: u32) -> Self {
        Self {
            item: item.into(),
            count,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}

/// Drops gathered while a yoyo is out. Stacks of the same item merge.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectedStack {
    stacks: Vec<ItemStack>,
}

impl CollectedStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a drop, merging into an existing stack of the same item. A full
    /// stack spills the remainder into a new one.
    pub fn push(&mut self, mut drop: ItemStack) {
        if drop.is_empty() {
            return;
        }
        if let Some(existing) = self
            .stacks
            .iter_mut()
            .find(|s| s.item == drop.item && s.count < u32::MAX)
        {
            let moved = drop.count.min(u32::MAX - existing.count);
            existing.count += moved;
            drop.count -= moved;
        }
        if !drop.is_empty() {
            self.stacks.push(drop);
        }
    }

    pub fn stacks(&self) -> &[ItemStack] {
        &self.stacks
    }

    /// Total number of items across all stacks.
    pub fn total(&self) -> u64 {
        self.stacks.iter().map(|s| s.count as u64).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.stacks.is_empty()
    }

    /// Remove and return everything collected.
    pub fn drain(&mut self) -> Vec<ItemStack> {
        std::mem::take(&mut self.stacks)
    }
}

/// Base handling stats of a yoyo.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct YoyoStats {
    /// Damage added on top of the actor's base attack damage.
    pub attack_damage: f32,
    /// Heavier yoyos respond more slowly to the tether spring.
    pub weight: f64,
    /// Tether length (blocks).
    pub length: f64,
    /// Active ticks before forced retraction; -1 = unlimited.
    pub duration: i32,
    /// Ticks between entity interactions.
    pub attack_interval: u32,
}

impl Default for YoyoStats {
    fn default() -> Self {
        Self {
            attack_damage: 3.0,
            weight: 1.0,
            length: 8.0,
            duration: 200,
            attack_interval: DEFAULT_ATTACK_INTERVAL,
        }
    }
}

/// Enchantment levels relevant to yoyo behavior.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Enchantments {
    pub sharpness: u32,
    pub smite: u32,
    pub bane_of_arthropods: u32,
    pub knockback: u32,
    pub fire_aspect: u32,
    pub fortune: u32,
    pub collecting: u32,
}

impl Enchantments {
    /// Bonus damage against a creature family.
    pub fn damage_bonus(&self, creature: CreatureKind) -> f32 {
        let mut bonus = 0.0;
        if self.sharpness > 0 {
            bonus += SHARPNESS_BONUS_BASE
                + (self.sharpness - 1) as f32 * SHARPNESS_BONUS_PER_LEVEL;
        }
        match creature {
            CreatureKind::Undead => bonus += self.smite as f32 * CREATURE_BONUS_PER_LEVEL,
            CreatureKind::Arthropod => {
                bonus += self.bane_of_arthropods as f32 * CREATURE_BONUS_PER_LEVEL
            }
            _ => {}
        }
        bonus
    }
}

/// Tool modifiers installed on a yoyo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum YoyoModifier {
    /// Extends the duration budget; enough levels make it unlimited.
    Lubricated { level: u32 },
    /// Interacts with plants and crops.
    Gardening,
    /// Shears entities instead of attacking them.
    Shearing,
}

/// The yoyo item being thrown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YoyoItem {
    pub stats: YoyoStats,
    #[serde(default)]
    pub enchantments: Enchantments,
    #[serde(default)]
    pub modifiers: Vec<YoyoModifier>,
    /// Accumulated wear.
    #[serde(default)]
    pub damage: u32,
    pub max_damage: u32,
    /// Never wears out (creative variant).
    #[serde(default)]
    pub unbreakable: bool,
}

impl Default for YoyoItem {
    fn default() -> Self {
        Self {
            stats: YoyoStats::default(),
            enchantments: Enchantments::default(),
            modifiers: Vec::new(),
            damage: 0,
            max_damage: 250,
            unbreakable: false,
        }
    }
}

impl YoyoItem {
    /// Creative yoyo: unbreakable and always collecting.
    pub fn creative() -> Self {
        Self {
            unbreakable: true,
            ..Self::default()
        }
    }

    /// Whether the item can still be thrown.
    pub fn is_usable(&self) -> bool {
        self.unbreakable || self.damage <= self.max_damage
    }

    pub fn collecting_level(&self) -> u32 {
        if self.unbreakable {
            CREATIVE_COLLECTING_LEVEL
        } else {
            self.enchantments.collecting
        }
    }

    pub fn entity_interaction(&self) -> EntityInteraction {
        if self.modifiers.contains(&YoyoModifier::Shearing) {
            EntityInteraction::Shear
        } else {
            EntityInteraction::Attack
        }
    }

    pub fn block_interaction(&self) -> BlockInteraction {
        if self.modifiers.contains(&YoyoModifier::Gardening) {
            BlockInteraction::Tend
        } else {
            BlockInteraction::Ignore
        }
    }
}
