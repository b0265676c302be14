//! In-memory host for tests and the sandbox tool.
//!
//! Entities are spheres, blocks are unit cells, and every side effect the
//! simulation asks for is recorded so it can be inspected afterwards.

use std::collections::{BTreeMap, BTreeSet};

use glam::DVec3;

use yoyo_core::enums::CreatureKind;
use yoyo_core::items::ItemStack;
use yoyo_core::types::{BlockCoord, EntityId, OwnerId, Position, Velocity};

use crate::host::*;

/// Spacing of the points sampled along a path for block hits.
const BLOCK_SAMPLE_STEP: f64 = 0.1;

/// A mob or animal.
#[derive(Debug, Clone)]
pub struct SandboxEntity {
    /// Center of the bounding sphere.
    pub position: Position,
    pub radius: f64,
    pub shearable: bool,
    pub shear_ready: bool,
    pub attackable: bool,
    pub living: bool,
    pub creature: CreatureKind,
    /// Produced when sheared.
    pub shear_drops: Vec<ItemStack>,
}

impl SandboxEntity {
    pub fn sheep(position: Position, wool: u32) -> Self {
        Self {
            position,
            radius: 0.5,
            shearable: true,
            shear_ready: true,
            attackable: true,
            living: true,
            creature: CreatureKind::Undefined,
            shear_drops: vec![ItemStack::new("wool", wool)],
        }
    }

    pub fn zombie(position: Position) -> Self {
        Self {
            position,
            radius: 0.5,
            shearable: false,
            shear_ready: false,
            attackable: true,
            living: true,
            creature: CreatureKind::Undead,
            shear_drops: Vec::new(),
        }
    }

    /// A non-living target such as a boat or item frame.
    pub fn prop(position: Position) -> Self {
        Self {
            living: false,
            creature: CreatureKind::Undefined,
            ..Self::zombie(position)
        }
    }
}

/// A block cell.
#[derive(Debug, Clone, Default)]
pub struct SandboxBlock {
    pub caps: BlockCapabilities,
    /// Produced when harvested or broken.
    pub drops: Vec<ItemStack>,
    /// Produced when sheared.
    pub shear_drops: Vec<ItemStack>,
}

impl SandboxBlock {
    pub fn crop(stage: u8, max_stage: u8, drops: Vec<ItemStack>) -> Self {
        Self {
            caps: BlockCapabilities {
                plant: true,
                crop: Some(CropGrowth { stage, max_stage }),
                ..Default::default()
            },
            drops,
            shear_drops: Vec::new(),
        }
    }

    pub fn tall_grass(shear_drops: Vec<ItemStack>) -> Self {
        Self {
            caps: BlockCapabilities {
                shearable: true,
                plant: true,
                ..Default::default()
            },
            drops: Vec::new(),
            shear_drops,
        }
    }

    pub fn bush(drops: Vec<ItemStack>) -> Self {
        Self {
            caps: BlockCapabilities {
                plant: true,
                ..Default::default()
            },
            drops,
            shear_drops: Vec::new(),
        }
    }

    pub fn stone() -> Self {
        Self {
            caps: BlockCapabilities {
                hardness: 1.5,
                ..Default::default()
            },
            drops: vec![ItemStack::new("cobblestone", 1)],
            shear_drops: Vec::new(),
        }
    }
}

/// An item pickup spawned into the world.
#[derive(Debug, Clone, PartialEq)]
pub struct Pickup {
    pub position: Position,
    pub stack: ItemStack,
    pub velocity: Velocity,
}

/// The world: entities, blocks and spawned pickups.
#[derive(Debug, Clone, Default)]
pub struct SandboxWorld {
    pub entities: BTreeMap<EntityId, SandboxEntity>,
    pub blocks: BTreeMap<BlockCoord, SandboxBlock>,
    /// Blocks removed by an actor, kept so their drops can still be harvested.
    pub broken: BTreeMap<BlockCoord, SandboxBlock>,
    /// Entities that still show up on path queries but are gone by the time
    /// their capabilities are asked for.
    pub vanishing: BTreeSet<EntityId>,
    /// Actors refused by `remove_block`.
    pub protected: BTreeSet<OwnerId>,
    pub pickups: Vec<Pickup>,
}

impl SandboxWorld {
    pub fn add_entity(&mut self, id: EntityId, entity: SandboxEntity) {
        self.entities.insert(id, entity);
    }

    pub fn set_block(&mut self, coord: BlockCoord, block: SandboxBlock) {
        self.blocks.insert(coord, block);
    }

    /// Total item count lying around as pickups.
    pub fn pickup_total(&self) -> u64 {
        self.pickups.iter().map(|p| p.stack.count as u64).sum()
    }
}

/// Distance from `point` to the segment, and how far along the segment the
/// closest point lies.
fn segment_distance(start: DVec3, end: DVec3, point: DVec3) -> (f64, f64) {
    let d = end - start;
    let len_sq = d.length_squared();
    if len_sq == 0.0 {
        return (point.distance(start), 0.0);
    }
    let t = ((point - start).dot(d) / len_sq).clamp(0.0, 1.0);
    let closest = start + d * t;
    (point.distance(closest), t * len_sq.sqrt())
}

impl WorldQuery for SandboxWorld {
    fn entities_along_path(&self, start: Position, end: Position, radius: f64) -> Vec<EntityHit> {
        self.entities
            .iter()
            .filter_map(|(id, e)| {
                let (gap, along) = segment_distance(start.to_vec(), end.to_vec(), e.position.to_vec());
                (gap <= radius + e.radius).then_some(EntityHit {
                    entity: *id,
                    distance: along,
                })
            })
            .collect()
    }

    fn blocks_along_path(&self, start: Position, end: Position) -> Vec<BlockCoord> {
        let (a, b) = (start.to_vec(), end.to_vec());
        let steps = (a.distance(b) / BLOCK_SAMPLE_STEP).ceil().max(1.0) as usize;

        let mut hits: Vec<BlockCoord> = Vec::new();
        for i in 0..=steps {
            let coord = Position::from(a.lerp(b, i as f64 / steps as f64)).block();
            if self.blocks.contains_key(&coord) && !hits.contains(&coord) {
                hits.push(coord);
            }
        }
        hits
    }

    fn entity_capabilities(&self, entity: EntityId) -> Option<EntityCapabilities> {
        if self.vanishing.contains(&entity) {
            return None;
        }
        self.entities.get(&entity).map(|e| EntityCapabilities {
            position: e.position,
            shearable: e.shearable,
            shear_ready: e.shear_ready,
            attackable: e.attackable,
            living: e.living,
            creature: e.creature,
        })
    }

    fn block_at(&self, coord: BlockCoord) -> Option<BlockCapabilities> {
        self.blocks.get(&coord).map(|b| b.caps)
    }

    fn on_sheared(&mut self, target: Target, _fortune: u32) -> Vec<ItemStack> {
        match target {
            Target::Entity(id) => match self.entities.get_mut(&id) {
                Some(e) if e.shear_ready => {
                    e.shear_ready = false;
                    e.shear_drops.clone()
                }
                _ => Vec::new(),
            },
            Target::Block(coord) => self
                .blocks
                .get(&coord)
                .map(|b| b.shear_drops.clone())
                .unwrap_or_default(),
        }
    }

    fn remove_block(&mut self, coord: BlockCoord, by: OwnerId) -> bool {
        if self.protected.contains(&by) {
            return false;
        }
        match self.blocks.remove(&coord) {
            Some(block) => {
                self.broken.insert(coord, block);
                true
            }
            None => false,
        }
    }

    fn harvest_drops(&mut self, coord: BlockCoord, _fortune: u32) -> Vec<ItemStack> {
        if let Some(block) = self.blocks.get(&coord) {
            return block.drops.clone();
        }
        self.broken
            .remove(&coord)
            .map(|b| b.drops)
            .unwrap_or_default()
    }

    fn reset_growth_stage(&mut self, coord: BlockCoord) {
        if let Some(crop) = self.blocks.get_mut(&coord).and_then(|b| b.caps.crop.as_mut()) {
            crop.stage = 0;
        }
    }

    fn spawn_pickup(&mut self, position: Position, stack: ItemStack, velocity: Velocity) {
        self.pickups.push(Pickup {
            position,
            stack,
            velocity,
        });
    }
}

/// A player holding a yoyo.
#[derive(Debug, Clone)]
pub struct SandboxOwner {
    pub entity: EntityId,
    /// Hand position.
    pub position: Position,
    pub look: DVec3,
    pub sprinting: bool,
    pub airborne: bool,
    pub climbing: bool,
    pub swimming: bool,
    pub impaired: bool,
    pub riding: bool,
    pub creative: bool,
    pub inventory: Vec<ItemStack>,
    /// Maximum number of items the inventory holds in total.
    pub inventory_capacity: u64,
    /// Durability lost by the held yoyo.
    pub item_wear: u32,
    pub exhaustion: f32,
}

impl SandboxOwner {
    pub fn new(entity: EntityId, position: Position, look: DVec3) -> Self {
        Self {
            entity,
            position,
            look,
            sprinting: false,
            airborne: false,
            climbing: false,
            swimming: false,
            impaired: false,
            riding: false,
            creative: false,
            inventory: Vec::new(),
            inventory_capacity: u64::MAX,
            item_wear: 0,
            exhaustion: 0.0,
        }
    }

    pub fn inventory_total(&self) -> u64 {
        self.inventory.iter().map(|s| s.count as u64).sum()
    }

    pub fn count_of(&self, item: &str) -> u64 {
        self.inventory
            .iter()
            .filter(|s| s.item == item)
            .map(|s| s.count as u64)
            .sum()
    }
}

impl OwnerActor for SandboxOwner {
    fn entity_id(&self) -> EntityId {
        self.entity
    }

    fn position(&self) -> Position {
        self.position
    }

    fn look_vector(&self) -> DVec3 {
        self.look
    }

    fn is_sprinting(&self) -> bool {
        self.sprinting
    }

    fn is_airborne(&self) -> bool {
        self.airborne
    }

    fn is_climbing(&self) -> bool {
        self.climbing
    }

    fn is_swimming(&self) -> bool {
        self.swimming
    }

    fn is_impaired(&self) -> bool {
        self.impaired
    }

    fn is_riding(&self) -> bool {
        self.riding
    }

    fn is_creative(&self) -> bool {
        self.creative
    }

    fn inventory_insert(&mut self, stack: ItemStack) -> Option<ItemStack> {
        let room = self.inventory_capacity.saturating_sub(self.inventory_total());
        let fits = (stack.count as u64).min(room) as u32;
        if fits > 0 {
            match self.inventory.iter_mut().find(|s| s.item == stack.item) {
                Some(existing) => existing.count += fits,
                None => self.inventory.push(ItemStack::new(stack.item.clone(), fits)),
            }
        }
        let left = stack.count - fits;
        (left > 0).then(|| ItemStack::new(stack.item, left))
    }

    fn damage_held_item(&mut self, amount: u32) {
        self.item_wear += amount;
    }

    fn add_exhaustion(&mut self, amount: f32) {
        self.exhaustion += amount;
    }
}

/// A recorded call to `resolve_attack`.
#[derive(Debug, Clone, PartialEq)]
pub struct AttackRecord {
    pub target: EntityId,
    pub damage: f32,
    pub source: DamageSource,
}

/// Health bookkeeping and a log of every combat call.
#[derive(Debug, Clone, Default)]
pub struct SandboxCombat {
    pub health: BTreeMap<EntityId, f32>,
    /// Remaining burn time per target, in seconds.
    pub burning: BTreeMap<EntityId, u32>,
    /// Targets that shrug off every hit.
    pub invulnerable: BTreeSet<EntityId>,
    /// Attackers the host vetoes outright.
    pub pacifists: BTreeSet<OwnerId>,
    pub attacks: Vec<AttackRecord>,
    pub knockbacks: Vec<(EntityId, f32)>,
    pub on_hit_effects: u32,
}

impl DamageResolver for SandboxCombat {
    fn allow_attack(&mut self, attacker: OwnerId, _target: EntityId) -> bool {
        !self.pacifists.contains(&attacker)
    }

    fn resolve_attack(&mut self, target: EntityId, damage: f32, source: DamageSource) -> bool {
        self.attacks.push(AttackRecord {
            target,
            damage,
            source,
        });
        if self.invulnerable.contains(&target) {
            return false;
        }
        if let Some(health) = self.health.get_mut(&target) {
            *health = (*health - damage).max(0.0);
        }
        true
    }

    fn health(&self, target: EntityId) -> Option<f32> {
        self.health.get(&target).copied()
    }

    fn is_burning(&self, target: EntityId) -> bool {
        self.burning.get(&target).is_some_and(|secs| *secs > 0)
    }

    fn set_fire(&mut self, target: EntityId, seconds: u32) {
        self.burning.insert(target, seconds);
    }

    fn extinguish(&mut self, target: EntityId) {
        self.burning.remove(&target);
    }

    fn knock_back(&mut self, target: EntityId, strength: f32, _direction: DVec3) {
        self.knockbacks.push((target, strength));
    }

    fn apply_on_hit_effects(&mut self, _attacker: OwnerId, _target: EntityId) {
        self.on_hit_effects += 1;
    }
}

/// A complete in-memory host.
#[derive(Debug, Clone, Default)]
pub struct SandboxHost {
    pub world: SandboxWorld,
    pub owners: BTreeMap<OwnerId, SandboxOwner>,
    pub combat: SandboxCombat,
}

impl SandboxHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a player standing at `hand` and looking along `look`.
    pub fn add_owner(&mut self, id: OwnerId, hand: Position, look: DVec3) -> &mut SandboxOwner {
        self.owners
            .entry(id)
            .or_insert_with(|| SandboxOwner::new(EntityId(u64::MAX - id.0), hand, look))
    }

    pub fn owner(&self, id: OwnerId) -> Option<&SandboxOwner> {
        self.owners.get(&id)
    }

    pub fn owner_mut(&mut self, id: OwnerId) -> Option<&mut SandboxOwner> {
        self.owners.get_mut(&id)
    }

    /// Add an entity; living ones get a health pool.
    pub fn add_entity(&mut self, id: EntityId, entity: SandboxEntity, health: f32) {
        if entity.living {
            self.combat.health.insert(id, health);
        }
        self.world.add_entity(id, entity);
    }
}

impl Host for SandboxHost {
    fn context(&mut self, owner: OwnerId) -> Option<HostContext<'_>> {
        let actor = self.owners.get_mut(&owner)?;
        Some(HostContext {
            world: &mut self.world,
            owner: actor,
            combat: &mut self.combat,
        })
    }

    fn world(&mut self) -> &mut dyn WorldQuery {
        &mut self.world
    }
}
