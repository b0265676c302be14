//! Duration budget computation.
//!
//! The budget is fixed at throw time from the item's base duration and its
//! lubrication modifiers. At runtime it only ever decreases, or becomes
//! unlimited via `make_frictionless`.

use yoyo_core::constants::UNLIMITED_DURATION;
use yoyo_core::items::{YoyoItem, YoyoModifier};

/// Extend a duration by one lubrication modifier of the given level.
///
/// The duration is turned into a friction value (100 / duration), each level
/// shaves off part of it, and the result is turned back into a duration. Once
/// friction hits zero the duration becomes unlimited.
pub fn lubricate(duration: i32, level: u32) -> i32 {
    if duration == UNLIMITED_DURATION {
        return UNLIMITED_DURATION;
    }
    let duration = if duration == 0 { 1 } else { duration };

    // Integer division first: durations above 100 have no friction left.
    let mut friction = (100 / duration) as f32;
    for i in (1..=level).rev() {
        friction -= 0.2 / i as f32 * level as f32;
    }

    if friction <= 0.0 {
        UNLIMITED_DURATION
    } else {
        (100.0 / friction) as i32
    }
}

/// Budget a freshly thrown item starts with.
pub fn effective_duration(item: &YoyoItem) -> i32 {
    item.modifiers
        .iter()
        .fold(item.stats.duration, |duration, modifier| match modifier {
            YoyoModifier::Lubricated { level } => lubricate(duration, *level),
            _ => duration,
        })
}
