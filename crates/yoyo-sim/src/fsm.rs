//! Yoyo lifecycle finite state machine.
//!
//! Pure functions that compute state transitions and budget updates for one
//! yoyo from its situation after physics integration.
//! No ECS dependency — operates on plain data.

use yoyo_core::enums::{RetractCause, YoyoState};

/// Input to the FSM for a single yoyo.
pub struct TetherContext {
    pub state: YoyoState,
    pub duration_remaining: i32,
    pub distance_to_hand: f64,
    pub tether_length: f64,
    pub elapsed_in_state: u64,
    pub return_epsilon: f64,
    pub return_timeout_ticks: u64,
}

/// Output from the FSM.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TetherUpdate {
    pub new_state: YoyoState,
    pub new_duration: i32,
    /// Set when this update starts a retraction.
    pub cause: Option<RetractCause>,
    pub phase_changed: bool,
    /// A retraction was completed by the timeout, not by reaching the hand.
    pub timed_out: bool,
}

/// Evaluate the FSM for one yoyo.
pub fn evaluate(ctx: &TetherContext) -> TetherUpdate {
    match ctx.state {
        YoyoState::Thrown => evaluate_thrown(ctx),
        YoyoState::Returning => evaluate_returning(ctx),
        YoyoState::Idle => no_change(ctx),
    }
}

/// Transition for an explicit retraction request (release, owner loss, shutdown).
/// Only a thrown yoyo changes state.
pub fn begin_retract(state: YoyoState, duration: i32, cause: RetractCause) -> TetherUpdate {
    if state != YoyoState::Thrown {
        return TetherUpdate {
            new_state: state,
            new_duration: duration,
            cause: None,
            phase_changed: false,
            timed_out: false,
        };
    }
    TetherUpdate {
        new_state: YoyoState::Returning,
        new_duration: duration,
        cause: Some(cause),
        phase_changed: true,
        timed_out: false,
    }
}

fn no_change(ctx: &TetherContext) -> TetherUpdate {
    TetherUpdate {
        new_state: ctx.state,
        new_duration: ctx.duration_remaining,
        cause: None,
        phase_changed: false,
        timed_out: false,
    }
}

fn evaluate_thrown(ctx: &TetherContext) -> TetherUpdate {
    let mut remaining = ctx.duration_remaining;

    if remaining >= 0 {
        // An exhausted budget wins outright; no distance check this tick.
        if remaining > 0 {
            remaining -= 1;
        }
        if remaining == 0 {
            return TetherUpdate {
                new_state: YoyoState::Returning,
                new_duration: 0,
                cause: Some(RetractCause::DurationExpired),
                phase_changed: true,
                timed_out: false,
            };
        }
    }

    if ctx.distance_to_hand > ctx.tether_length {
        return TetherUpdate {
            new_state: YoyoState::Returning,
            new_duration: remaining,
            cause: Some(RetractCause::TetherExceeded),
            phase_changed: true,
            timed_out: false,
        };
    }

    TetherUpdate {
        new_state: YoyoState::Thrown,
        new_duration: remaining,
        cause: None,
        phase_changed: false,
        timed_out: false,
    }
}

fn evaluate_returning(ctx: &TetherContext) -> TetherUpdate {
    let caught = ctx.distance_to_hand <= ctx.return_epsilon;
    let timed_out = !caught && ctx.elapsed_in_state >= ctx.return_timeout_ticks;

    if caught || timed_out {
        return TetherUpdate {
            new_state: YoyoState::Idle,
            new_duration: ctx.duration_remaining,
            cause: None,
            phase_changed: true,
            timed_out,
        };
    }

    no_change(ctx)
}

#[cfg(test)]
mod tests {
    use super::*;
    use yoyo_core::constants::UNLIMITED_DURATION;

    fn make_context(state: YoyoState, remaining: i32, distance: f64) -> TetherContext {
        TetherContext {
            state,
            duration_remaining: remaining,
            distance_to_hand: distance,
            tether_length: 10.0,
            elapsed_in_state: 0,
            return_epsilon: 0.5,
            return_timeout_ticks: 200,
        }
    }

    #[test]
    fn test_thrown_decrements_budget() {
        let update = evaluate(&make_context(YoyoState::Thrown, 5, 3.0));
        assert!(!update.phase_changed);
        assert_eq!(update.new_state, YoyoState::Thrown);
        assert_eq!(update.new_duration, 4);
    }

    #[test]
    fn test_last_tick_of_budget_retracts() {
        let update = evaluate(&make_context(YoyoState::Thrown, 1, 3.0));
        assert_eq!(update.new_state, YoyoState::Returning);
        assert_eq!(update.new_duration, 0);
        assert_eq!(update.cause, Some(RetractCause::DurationExpired));
    }

    #[test]
    fn test_zero_budget_skips_distance_check() {
        // Far past the tether, but the budget decides the cause.
        let update = evaluate(&make_context(YoyoState::Thrown, 0, 50.0));
        assert_eq!(update.new_state, YoyoState::Returning);
        assert_eq!(update.cause, Some(RetractCause::DurationExpired));
    }

    #[test]
    fn test_unlimited_budget_is_untouched() {
        let update = evaluate(&make_context(YoyoState::Thrown, UNLIMITED_DURATION, 3.0));
        assert_eq!(update.new_state, YoyoState::Thrown);
        assert_eq!(update.new_duration, UNLIMITED_DURATION);
    }

    #[test]
    fn test_tether_exceeded_retracts() {
        let update = evaluate(&make_context(YoyoState::Thrown, UNLIMITED_DURATION, 10.01));
        assert_eq!(update.new_state, YoyoState::Returning);
        assert_eq!(update.cause, Some(RetractCause::TetherExceeded));
    }

    #[test]
    fn test_at_tether_length_stays_thrown() {
        let update = evaluate(&make_context(YoyoState::Thrown, 20, 10.0));
        assert_eq!(update.new_state, YoyoState::Thrown);
    }

    #[test]
    fn test_returning_caught_within_epsilon() {
        let update = evaluate(&make_context(YoyoState::Returning, 0, 0.4));
        assert_eq!(update.new_state, YoyoState::Idle);
        assert!(!update.timed_out);
    }

    #[test]
    fn test_returning_keeps_going_when_far() {
        let update = evaluate(&make_context(YoyoState::Returning, 0, 4.0));
        assert_eq!(update.new_state, YoyoState::Returning);
        assert!(!update.phase_changed);
    }

    #[test]
    fn test_returning_times_out() {
        let mut ctx = make_context(YoyoState::Returning, 0, 40.0);
        ctx.elapsed_in_state = 200;
        let update = evaluate(&ctx);
        assert_eq!(update.new_state, YoyoState::Idle);
        assert!(update.timed_out);
    }

    #[test]
    fn test_begin_retract_only_from_thrown() {
        let update = begin_retract(YoyoState::Thrown, 12, RetractCause::Released);
        assert_eq!(update.new_state, YoyoState::Returning);
        assert_eq!(update.new_duration, 12);
        assert_eq!(update.cause, Some(RetractCause::Released));

        let update = begin_retract(YoyoState::Returning, 12, RetractCause::Released);
        assert!(!update.phase_changed);
        assert_eq!(update.cause, None);
    }

    #[test]
    fn test_idle_never_changes() {
        let update = evaluate(&make_context(YoyoState::Idle, 3, 100.0));
        assert!(!update.phase_changed);
        assert_eq!(update.new_duration, 3);
    }
}
