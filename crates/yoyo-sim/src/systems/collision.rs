//! Collision detection over the segment a yoyo swept this tick.

use hecs::{Entity, World};

use yoyo_core::components::{AttackCooldown, Loadout};
use yoyo_core::types::EntityId;

use crate::host::{Target, WorldQuery};
use crate::systems::tether::Sweep;

/// Find the first target along the sweep.
///
/// Entities are only considered once the attack cooldown has elapsed, and
/// blocks only when the loadout interacts with blocks at all. The owner's own
/// entity is never a target.
pub fn detect(
    world: &mut World,
    entity: Entity,
    sweep: &Sweep,
    host_world: &dyn WorldQuery,
    owner_entity: EntityId,
) -> Option<Target> {
    let (loadout, cooldown) = world
        .query_one_mut::<(&Loadout, &AttackCooldown)>(entity)
        .ok()?;

    let include_entities = cooldown.remaining == 0;
    let include_blocks = loadout.block_interaction.interacts();
    if !include_entities && !include_blocks {
        return None;
    }

    host_world.find_collision_along_path(
        sweep.start,
        sweep.end,
        owner_entity,
        include_entities,
        include_blocks,
    )
}
