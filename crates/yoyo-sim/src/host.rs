//! Collaborator interfaces implemented by the host engine.
//!
//! The simulation never owns world objects. Everything it touches is reached
//! through these traits, and capabilities are exposed as descriptors queried
//! once per interaction rather than discovered by type tests.

use glam::DVec3;

use yoyo_core::enums::CreatureKind;
use yoyo_core::items::ItemStack;
use yoyo_core::types::{BlockCoord, EntityId, OwnerId, Position, Velocity};

/// What a world entity supports.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EntityCapabilities {
    pub position: Position,
    /// Exposes the shearing capability (sheep, mooshrooms).
    pub shearable: bool,
    /// Has something to shear right now (a sheep with wool).
    pub shear_ready: bool,
    /// Can be struck with an item at all.
    pub attackable: bool,
    /// Has health; crits, fire and on-hit effects only apply to living targets.
    pub living: bool,
    pub creature: CreatureKind,
}

/// Growth information of a crop block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CropGrowth {
    pub stage: u8,
    pub max_stage: u8,
}

impl CropGrowth {
    pub fn is_mature(&self) -> bool {
        self.stage >= self.max_stage
    }
}

/// What a block supports.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BlockCapabilities {
    /// Can be sheared (leaves, vines, tall grass).
    pub shearable: bool,
    /// A simple destructible plant (bushes, flowers, saplings).
    pub plant: bool,
    /// Present on growable crops.
    pub crop: Option<CropGrowth>,
    pub hardness: f32,
}

/// Something the yoyo ran into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    Entity(EntityId),
    Block(BlockCoord),
}

/// An entity crossed by a swept path.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EntityHit {
    pub entity: EntityId,
    /// Distance along the path from its start.
    pub distance: f64,
}

/// Damage attribution passed to the host's hit resolution.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DamageSource {
    pub kind: &'static str,
    pub attacker: OwnerId,
    pub critical: bool,
}

impl DamageSource {
    pub fn yoyo(attacker: OwnerId, critical: bool) -> Self {
        Self {
            kind: "yoyo",
            attacker,
            critical,
        }
    }
}

/// World queries and mutations.
pub trait WorldQuery {
    /// Entities whose bounds come within `radius` of the segment, in any order.
    fn entities_along_path(&self, start: Position, end: Position, radius: f64) -> Vec<EntityHit>;

    /// Non-empty blocks crossed by the segment, ordered from `start` to `end`.
    fn blocks_along_path(&self, start: Position, end: Position) -> Vec<BlockCoord>;

    /// First thing hit along the segment: the closest entity (other than
    /// `ignore`) if any, otherwise the first block.
    fn find_collision_along_path(
        &self,
        start: Position,
        end: Position,
        ignore: EntityId,
        include_entities: bool,
        include_blocks: bool,
    ) -> Option<Target> {
        if include_entities {
            let closest = self
                .entities_along_path(start, end, yoyo_core::constants::YOYO_RADIUS)
                .into_iter()
                .filter(|hit| hit.entity != ignore)
                .min_by(|a, b| a.distance.total_cmp(&b.distance));
            if let Some(hit) = closest {
                return Some(Target::Entity(hit.entity));
            }
        }
        if include_blocks {
            if let Some(block) = self.blocks_along_path(start, end).into_iter().next() {
                return Some(Target::Block(block));
            }
        }
        None
    }

    /// Capabilities of a live entity, `None` once it has been removed.
    fn entity_capabilities(&self, entity: EntityId) -> Option<EntityCapabilities>;

    /// Capabilities of a block, `None` for empty space.
    fn block_at(&self, coord: BlockCoord) -> Option<BlockCapabilities>;

    /// Shear a shearable entity or block and return what it drops.
    fn on_sheared(&mut self, target: Target, fortune: u32) -> Vec<ItemStack>;

    /// Remove a block on behalf of an actor. Returns false if the host refused.
    fn remove_block(&mut self, coord: BlockCoord, by: OwnerId) -> bool;

    /// Drops produced by harvesting a block.
    fn harvest_drops(&mut self, coord: BlockCoord, fortune: u32) -> Vec<ItemStack>;

    fn reset_growth_stage(&mut self, coord: BlockCoord);

    /// Spawn an item pickup in the world.
    fn spawn_pickup(&mut self, position: Position, stack: ItemStack, velocity: Velocity);
}

/// The actor holding the tether.
pub trait OwnerActor {
    /// The owner's own entity, never a valid yoyo target.
    fn entity_id(&self) -> EntityId;
    /// Hand position the tether is anchored to.
    fn position(&self) -> Position;
    fn look_vector(&self) -> DVec3;
    fn is_sprinting(&self) -> bool;
    /// Falling and off the ground.
    fn is_airborne(&self) -> bool;
    fn is_climbing(&self) -> bool;
    fn is_swimming(&self) -> bool;
    /// Blinded or otherwise impaired.
    fn is_impaired(&self) -> bool;
    fn is_riding(&self) -> bool;
    fn is_creative(&self) -> bool;
    /// Insert into the inventory, returning whatever did not fit.
    fn inventory_insert(&mut self, stack: ItemStack) -> Option<ItemStack>;
    /// Wear the held yoyo.
    fn damage_held_item(&mut self, amount: u32);
    fn add_exhaustion(&mut self, amount: f32);
}

/// Host combat resolution.
pub trait DamageResolver {
    /// Host veto point before any attack logic runs.
    fn allow_attack(&mut self, attacker: OwnerId, target: EntityId) -> bool;
    /// Apply one atomic hit. Returns whether damage was applied.
    fn resolve_attack(&mut self, target: EntityId, damage: f32, source: DamageSource) -> bool;
    fn health(&self, target: EntityId) -> Option<f32>;
    fn is_burning(&self, target: EntityId) -> bool;
    fn set_fire(&mut self, target: EntityId, seconds: u32);
    fn extinguish(&mut self, target: EntityId);
    fn knock_back(&mut self, target: EntityId, strength: f32, direction: DVec3);
    /// Thorns, arthropod slowness, life steal and similar post-hit triggers.
    fn apply_on_hit_effects(&mut self, attacker: OwnerId, target: EntityId);
}

/// Everything one yoyo needs during its tick.
pub struct HostContext<'a> {
    pub world: &'a mut dyn WorldQuery,
    pub owner: &'a mut dyn OwnerActor,
    pub combat: &'a mut dyn DamageResolver,
}

/// The host engine as seen by a session.
pub trait Host {
    /// Borrow the collaborators for one owner, `None` if the owner is gone.
    fn context(&mut self, owner: OwnerId) -> Option<HostContext<'_>>;

    /// The world alone, for spills when no owner is available.
    fn world(&mut self) -> &mut dyn WorldQuery;
}
