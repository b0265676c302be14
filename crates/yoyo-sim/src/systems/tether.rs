//! Tether physics.
//!
//! Each yoyo is pulled by a damped spring toward a target point: out along the
//! owner's look direction while thrown, back to the hand while returning.
//! Semi-implicit Euler with dt = 1 tick:
//!   v' = v * (1 - damping) + (target - p) * k
//!   p' = p + v'
//!
//! A thrown yoyo's own step is cut short at the end of the tether, so only the
//! hand moving away can leave it past `length`.

use glam::DVec3;
use hecs::{Entity, World};

use yoyo_core::components::{Spin, Tether, YoyoStatus};
use yoyo_core::constants::{MAX_STIFFNESS, MIN_WEIGHT, SPIN_PER_BLOCK, TETHER_SLACK};
use yoyo_core::enums::YoyoState;
use yoyo_core::types::{Position, Velocity};

use crate::config::TetherTuning;

/// Segment travelled by a yoyo during one integration step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sweep {
    pub start: Position,
    pub end: Position,
}

impl Sweep {
    pub fn length(&self) -> f64 {
        self.start.distance_to(&self.end)
    }
}

/// Point the spring pulls toward.
pub fn spring_target(
    state: YoyoState,
    hand: Position,
    look: DVec3,
    length: f64,
    tuning: &TetherTuning,
) -> DVec3 {
    match state {
        YoyoState::Thrown => {
            hand.to_vec() + look.normalize_or_zero() * length * tuning.thrown_reach
        }
        YoyoState::Returning | YoyoState::Idle => hand.to_vec(),
    }
}

/// Spring constant for a yoyo of the given weight. Heavier is softer.
pub fn stiffness(state: YoyoState, weight: f64, tuning: &TetherTuning) -> f64 {
    let base = match state {
        YoyoState::Returning => tuning.return_stiffness,
        _ => tuning.thrown_stiffness,
    };
    (base / weight.max(MIN_WEIGHT)).min(MAX_STIFFNESS)
}

/// Integrate one yoyo. Returns the swept segment, or `None` if the entity is
/// gone or idle.
pub fn integrate(
    world: &mut World,
    entity: Entity,
    hand: Position,
    look: DVec3,
    tuning: &TetherTuning,
) -> Option<Sweep> {
    let (pos, vel, tether, status) = world
        .query_one_mut::<(&mut Position, &mut Velocity, &Tether, &YoyoStatus)>(entity)
        .ok()?;
    if status.state == YoyoState::Idle {
        return None;
    }

    let target = spring_target(status.state, hand, look, tether.length, tuning);
    let k = stiffness(status.state, tether.weight, tuning);

    let p = pos.to_vec();
    let mut v = vel.to_vec() * (1.0 - tuning.damping) + (target - p) * k;
    v = v.clamp_length_max(tuning.max_speed);
    if status.state == YoyoState::Thrown {
        v = keep_inside_tether(p, v, hand.to_vec(), tether.length);
    }

    let start = *pos;
    *vel = Velocity::from(v);
    *pos = Position::from(p + v);

    Some(Sweep { start, end: *pos })
}

/// Shorten a step that would carry a yoyo from inside its tether to beyond it.
/// A yoyo already outside (the hand moved away) is left alone.
fn keep_inside_tether(p: DVec3, v: DVec3, hand: DVec3, length: f64) -> DVec3 {
    let reach = (length - TETHER_SLACK).max(0.0);
    let next = p + v;
    if p.distance(hand) > length || next.distance(hand) <= reach {
        return v;
    }
    hand + (next - hand).clamp_length_max(reach) - p
}

/// Advance the cosmetic spin by the distance travelled.
pub fn advance_spin(world: &mut World, entity: Entity, distance: f64) {
    if let Ok(spin) = world.query_one_mut::<&mut Spin>(entity) {
        spin.angle = (spin.angle + distance * SPIN_PER_BLOCK).rem_euclid(std::f64::consts::TAU);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use yoyo_core::components::DurationBudget;

    fn spawn(world: &mut World, state: YoyoState, pos: Position, length: f64) -> Entity {
        spawn_weighted(world, state, pos, length, 1.0)
    }

    fn spawn_weighted(
        world: &mut World,
        state: YoyoState,
        pos: Position,
        length: f64,
        weight: f64,
    ) -> Entity {
        world.spawn((
            pos,
            Velocity::default(),
            Tether { length, weight },
            YoyoStatus {
                state,
                state_start_tick: 0,
                retract_cause: None,
            },
            DurationBudget { remaining: -1 },
            Spin::default(),
        ))
    }

    #[test]
    fn test_thrown_yoyo_stays_inside_tether() {
        let tuning = TetherTuning::default();
        let mut world = World::new();
        let hand = Position::new(0.0, 1.5, 0.0);
        let e = spawn(&mut world, YoyoState::Thrown, hand, 10.0);

        for _ in 0..200 {
            integrate(&mut world, e, hand, DVec3::Z, &tuning);
            let pos = *world.get::<&Position>(e).unwrap();
            assert!(pos.distance_to(&hand) <= 10.0, "escaped tether at {pos:?}");
        }
        // Settles near the reach point.
        let pos = *world.get::<&Position>(e).unwrap();
        assert!((pos.z - 8.0).abs() < 0.1);
    }

    #[test]
    fn test_light_yoyo_on_short_tether_never_overshoots() {
        let tuning = TetherTuning::default();
        let hand = Position::new(0.0, 1.5, 0.0);
        for weight in [0.1, 0.25, 0.5, 1.0] {
            for length in [0.5, 1.0, 2.0, 3.0] {
                let mut world = World::new();
                let e = spawn_weighted(&mut world, YoyoState::Thrown, hand, length, weight);
                world.get::<&mut Velocity>(e).unwrap().z = tuning.throw_speed;

                for _ in 0..100 {
                    integrate(&mut world, e, hand, DVec3::Z, &tuning);
                    let pos = *world.get::<&Position>(e).unwrap();
                    assert!(
                        pos.distance_to(&hand) <= length,
                        "weight {weight} length {length} escaped at {pos:?}"
                    );
                }
            }
        }
    }

    #[test]
    fn test_yoyo_left_behind_by_hand_is_not_pulled_in() {
        let tuning = TetherTuning::default();
        let mut world = World::new();
        let e = spawn(&mut world, YoyoState::Thrown, Position::new(0.0, 0.0, 5.0), 3.0);
        integrate(&mut world, e, Position::default(), DVec3::Z, &tuning);
        let pos = *world.get::<&Position>(e).unwrap();
        assert!(pos.distance_to(&Position::default()) > 3.0);
    }

    #[test]
    fn test_returning_yoyo_converges_to_hand() {
        let tuning = TetherTuning::default();
        let mut world = World::new();
        let hand = Position::new(0.0, 1.5, 0.0);
        let e = spawn(&mut world, YoyoState::Returning, Position::new(0.0, 1.5, 8.0), 10.0);

        for _ in 0..40 {
            integrate(&mut world, e, hand, DVec3::Z, &tuning);
        }
        let pos = *world.get::<&Position>(e).unwrap();
        assert!(pos.distance_to(&hand) < tuning.return_epsilon);
    }

    #[test]
    fn test_speed_is_clamped() {
        let tuning = TetherTuning::default();
        let mut world = World::new();
        let hand = Position::default();
        let e = spawn(&mut world, YoyoState::Returning, Position::new(100.0, 0.0, 0.0), 200.0);

        let sweep = integrate(&mut world, e, hand, DVec3::Z, &tuning).unwrap();
        assert!(sweep.length() <= tuning.max_speed + 1e-9);
        let vel = *world.get::<&Velocity>(e).unwrap();
        assert!(vel.speed() <= tuning.max_speed + 1e-9);
    }

    #[test]
    fn test_idle_yoyo_does_not_move() {
        let tuning = TetherTuning::default();
        let mut world = World::new();
        let e = spawn(&mut world, YoyoState::Idle, Position::new(3.0, 0.0, 0.0), 10.0);
        assert!(integrate(&mut world, e, Position::default(), DVec3::Z, &tuning).is_none());
    }

    #[test]
    fn test_heavier_yoyo_is_softer() {
        let tuning = TetherTuning::default();
        let light = stiffness(YoyoState::Thrown, 0.5, &tuning);
        let heavy = stiffness(YoyoState::Thrown, 2.0, &tuning);
        assert!(light > heavy);
        // Tiny weights are floored, never dividing toward infinity.
        assert!(stiffness(YoyoState::Returning, 0.0, &tuning) <= MAX_STIFFNESS);
    }

    #[test]
    fn test_spin_wraps() {
        let mut world = World::new();
        let e = spawn(&mut world, YoyoState::Thrown, Position::default(), 10.0);
        advance_spin(&mut world, e, 10.0);
        let angle = world.get::<&Spin>(e).unwrap().angle;
        assert!((0.0..std::f64::consts::TAU).contains(&angle));
    }
}
