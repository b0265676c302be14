//! Snapshot system: builds a `SessionSnapshot` from the ECS world.
//!
//! This system is read-only; it never modifies the world.

use hecs::{Entity, World};

use yoyo_core::components::*;
use yoyo_core::events::YoyoEvent;
use yoyo_core::state::{SessionSnapshot, YoyoView};
use yoyo_core::types::{Position, SimTime, Velocity};

/// Build a complete snapshot, yoyos ordered by owner.
pub fn build_snapshot(world: &World, time: &SimTime, events: Vec<YoyoEvent>) -> SessionSnapshot {
    let mut yoyos: Vec<YoyoView> = world
        .iter()
        .filter_map(|entity_ref| build_view(world, entity_ref.entity()))
        .collect();
    yoyos.sort_by_key(|view| view.owner);

    SessionSnapshot {
        time: *time,
        yoyos,
        events,
    }
}

/// View of a single yoyo.
pub fn build_view(world: &World, entity: Entity) -> Option<YoyoView> {
    let mut query = world
        .query_one::<(
            &YoyoOwner,
            &YoyoStatus,
            &Position,
            &Velocity,
            &Tether,
            &DurationBudget,
            &Collector,
            &Spin,
        )>(entity)
        .ok()?;
    let (owner, status, pos, vel, tether, budget, collector, spin) = query.get()?;

    Some(YoyoView {
        owner: owner.owner,
        state: status.state,
        retract_cause: status.retract_cause,
        position: *pos,
        velocity: *vel,
        tether_length: tether.length,
        duration_remaining: budget.remaining,
        collecting: collector.level > 0,
        collected: collector.stack.stacks().to_vec(),
        spin: spin.angle,
    })
}
