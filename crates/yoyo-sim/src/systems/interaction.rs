//! Interaction dispatch: routes a collision to attack, shear or gardening.
//!
//! At most one interaction runs per yoyo per tick. Target capabilities are
//! queried at dispatch time; a target that vanished in the meantime is
//! reported as `InteractionError::StaleTarget` and nothing happens.

use hecs::{Entity, World};
use rand_chacha::ChaCha8Rng;

use yoyo_core::components::{AttackCooldown, Collector, Loadout, YoyoOwner};
use yoyo_core::constants::{HARD_BLOCK_DURABILITY_COST, SOFT_BLOCK_DURABILITY_COST};
use yoyo_core::enums::EntityInteraction;
use yoyo_core::events::YoyoEvent;

use crate::error::InteractionError;
use crate::host::{HostContext, OwnerActor, Target};
use crate::systems::{attack, garden};

/// Wear the thrown item. Creative owners and unbreakable items are spared.
pub fn wear(owner: &mut dyn OwnerActor, loadout: &mut Loadout, amount: u32) {
    if amount == 0 || owner.is_creative() || loadout.item.unbreakable {
        return;
    }
    owner.damage_held_item(amount);
    loadout.item.damage = loadout.item.damage.saturating_add(amount);
}

/// Durability cost of breaking a block with the given hardness.
pub fn block_break_cost(hardness: f32) -> u32 {
    if hardness != 0.0 {
        HARD_BLOCK_DURABILITY_COST
    } else {
        SOFT_BLOCK_DURABILITY_COST
    }
}

/// Run the interaction for one collision.
pub fn dispatch(
    world: &mut World,
    entity: Entity,
    target: Target,
    ctx: &mut HostContext<'_>,
    rng: &mut ChaCha8Rng,
    events: &mut Vec<YoyoEvent>,
) -> Result<(), InteractionError> {
    let Ok((owner, loadout, collector, cooldown)) = world
        .query_one_mut::<(&YoyoOwner, &mut Loadout, &mut Collector, &mut AttackCooldown)>(entity)
    else {
        return Ok(());
    };
    let owner_id = owner.owner;

    match target {
        Target::Entity(id) => {
            let caps = ctx
                .world
                .entity_capabilities(id)
                .ok_or(InteractionError::StaleTarget)?;

            match loadout.entity_interaction {
                EntityInteraction::Shear if caps.shearable => {
                    // A shorn sheep is left alone rather than attacked.
                    if caps.shear_ready {
                        garden::shear_entity(
                            id, &caps, loadout, collector, owner_id, ctx, rng, events,
                        );
                    }
                }
                _ => {
                    attack::attack_entity(id, &caps, loadout, owner_id, ctx, events);
                }
            }
            cooldown.remaining = loadout.item.stats.attack_interval;
        }
        Target::Block(coord) => {
            let caps = ctx
                .world
                .block_at(coord)
                .ok_or(InteractionError::StaleTarget)?;
            garden::tend_block(coord, &caps, loadout, collector, owner_id, ctx, rng, events);
        }
    }

    Ok(())
}

/// Per-tick bookkeeping: tick the attack cooldown down.
pub fn cool_down(world: &mut World, entity: Entity) {
    if let Ok(cooldown) = world.query_one_mut::<&mut AttackCooldown>(entity) {
        cooldown.remaining = cooldown.remaining.saturating_sub(1);
    }
}

/// Forget block marks left over from the previous tick.
pub fn clear_marks(world: &mut World, entity: Entity) {
    if let Ok(collector) = world.query_one_mut::<&mut Collector>(entity) {
        collector.marked_blocks.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_break_cost() {
        assert_eq!(block_break_cost(0.0), SOFT_BLOCK_DURABILITY_COST);
        assert_eq!(block_break_cost(0.6), HARD_BLOCK_DURABILITY_COST);
    }
}
