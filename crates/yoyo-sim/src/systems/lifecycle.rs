//! Lifecycle system: runs the tether FSM and applies its transitions.

use hecs::{Entity, World};

use yoyo_core::components::{DurationBudget, Tether, YoyoOwner, YoyoStatus};
use yoyo_core::enums::{RetractCause, YoyoState};
use yoyo_core::events::YoyoEvent;
use yoyo_core::types::{Position, SimTime};

use crate::config::TetherTuning;
use crate::fsm::{self, TetherContext, TetherUpdate};

/// Evaluate one yoyo after integration. Returns the state it ends the step in.
pub fn advance(
    world: &mut World,
    entity: Entity,
    hand: Position,
    time: SimTime,
    tuning: &TetherTuning,
    events: &mut Vec<YoyoEvent>,
) -> Option<YoyoState> {
    let (owner, pos, tether, budget, status) = world
        .query_one_mut::<(
            &YoyoOwner,
            &Position,
            &Tether,
            &mut DurationBudget,
            &mut YoyoStatus,
        )>(entity)
        .ok()?;

    let ctx = TetherContext {
        state: status.state,
        duration_remaining: budget.remaining,
        distance_to_hand: pos.distance_to(&hand),
        tether_length: tether.length,
        elapsed_in_state: time.since(status.state_start_tick),
        return_epsilon: tuning.return_epsilon,
        return_timeout_ticks: tuning.return_timeout_ticks,
    };
    let update = fsm::evaluate(&ctx);

    if update.timed_out {
        tracing::warn!(
            owner = owner.owner.0,
            distance = ctx.distance_to_hand,
            "yoyo retraction timed out"
        );
    }
    apply(owner, budget, status, update, time.tick, events);
    Some(status.state)
}

/// Start retracting a thrown yoyo. Returns false if it was not thrown.
pub fn retract(
    world: &mut World,
    entity: Entity,
    cause: RetractCause,
    now: u64,
    events: &mut Vec<YoyoEvent>,
) -> bool {
    let Ok((owner, budget, status)) =
        world.query_one_mut::<(&YoyoOwner, &mut DurationBudget, &mut YoyoStatus)>(entity)
    else {
        return false;
    };
    let update = fsm::begin_retract(status.state, budget.remaining, cause);
    apply(owner, budget, status, update, now, events);
    update.phase_changed
}

fn apply(
    owner: &YoyoOwner,
    budget: &mut DurationBudget,
    status: &mut YoyoStatus,
    update: TetherUpdate,
    now: u64,
    events: &mut Vec<YoyoEvent>,
) {
    budget.remaining = update.new_duration;
    if !update.phase_changed {
        return;
    }

    status.state = update.new_state;
    status.state_start_tick = now;
    if let Some(cause) = update.cause {
        status.retract_cause = Some(cause);
        tracing::debug!(owner = owner.owner.0, ?cause, "yoyo retracting");
        events.push(YoyoEvent::Retracting {
            owner: owner.owner,
            cause,
        });
    }
}
