//! Cleanup system: despawns yoyos whose flight has ended.

use hecs::{Entity, World};

use yoyo_core::components::YoyoStatus;
use yoyo_core::enums::YoyoState;

/// Despawn every idle yoyo. Uses a pre-allocated buffer to avoid per-tick
/// allocation.
pub fn run(world: &mut World, despawn_buffer: &mut Vec<Entity>) {
    despawn_buffer.clear();

    for (entity, status) in world.query_mut::<&YoyoStatus>() {
        if status.state == YoyoState::Idle {
            despawn_buffer.push(entity);
        }
    }

    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
}
