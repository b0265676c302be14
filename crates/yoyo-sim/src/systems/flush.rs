//! Handing collected drops back when a yoyo's flight ends.

use hecs::{Entity, World};

use yoyo_core::components::Collector;
use yoyo_core::items::ItemStack;
use yoyo_core::types::{Position, Velocity};

use crate::host::{OwnerActor, WorldQuery};

/// Item counts moved by a flush.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FlushOutcome {
    /// Merged into the owner's inventory.
    pub delivered: u64,
    /// Dropped into the world.
    pub overflow: u64,
}

/// Empty a yoyo's collector.
pub fn take_collected(world: &mut World, entity: Entity) -> Vec<ItemStack> {
    world
        .query_one_mut::<&mut Collector>(entity)
        .map(|collector| collector.stack.drain())
        .unwrap_or_default()
}

/// Insert each stack into the owner's inventory; whatever does not fit is
/// dropped at the owner's feet.
pub fn deliver_to_owner(
    stacks: Vec<ItemStack>,
    owner: &mut dyn OwnerActor,
    world: &mut dyn WorldQuery,
) -> FlushOutcome {
    let mut outcome = FlushOutcome::default();
    for stack in stacks {
        let count = stack.count as u64;
        match owner.inventory_insert(stack) {
            None => outcome.delivered += count,
            Some(leftover) => {
                let left = (leftover.count as u64).min(count);
                outcome.delivered += count - left;
                outcome.overflow += left;
                if !leftover.is_empty() {
                    world.spawn_pickup(owner.position(), leftover, Velocity::default());
                }
            }
        }
    }
    outcome
}

/// Drop everything into the world at a position. Used when there is no owner
/// left to receive it.
pub fn spill(stacks: Vec<ItemStack>, at: Position, world: &mut dyn WorldQuery) -> FlushOutcome {
    let mut outcome = FlushOutcome::default();
    for stack in stacks.into_iter().filter(|s| !s.is_empty()) {
        outcome.overflow += stack.count as u64;
        world.spawn_pickup(at, stack, Velocity::default());
    }
    outcome
}
