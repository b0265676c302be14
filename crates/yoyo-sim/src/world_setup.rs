//! Entity spawn factory for thrown yoyos.

use glam::DVec3;
use hecs::{Entity, World};

use yoyo_core::components::*;
use yoyo_core::enums::YoyoState;
use yoyo_core::items::{CollectedStack, YoyoItem};
use yoyo_core::types::{OwnerId, Position, Velocity};

use crate::config::TetherTuning;
use crate::systems::duration::effective_duration;

/// Spawn a freshly thrown yoyo at the owner's hand, moving along the look
/// direction. Interaction strategies and the duration budget are fixed here.
pub fn spawn_yoyo(
    world: &mut World,
    owner: OwnerId,
    item: YoyoItem,
    hand: Position,
    look: DVec3,
    tuning: &TetherTuning,
    now: u64,
) -> Entity {
    // Never faster than the slack between the swing target and the tether end.
    let speed = tuning
        .throw_speed
        .min(item.stats.length * (1.0 - tuning.thrown_reach));
    let velocity = Velocity::from(look.normalize_or_zero() * speed);
    let tether = Tether {
        length: item.stats.length,
        weight: item.stats.weight,
    };
    let budget = DurationBudget {
        remaining: effective_duration(&item),
    };
    let collector = Collector {
        level: item.collecting_level(),
        stack: CollectedStack::new(),
        marked_blocks: Default::default(),
    };
    let loadout = Loadout {
        entity_interaction: item.entity_interaction(),
        block_interaction: item.block_interaction(),
        item,
    };

    world.spawn((
        YoyoOwner { owner },
        hand,
        velocity,
        tether,
        budget,
        YoyoStatus {
            state: YoyoState::Thrown,
            state_start_tick: now,
            retract_cause: None,
        },
        collector,
        Spin::default(),
        AttackCooldown::default(),
        loadout,
    ))
}
