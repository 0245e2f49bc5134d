//! Cleanup system: removes ships marked during collision resolution.

use hecs::{Entity, World};
use tracing::warn;

/// Despawn every entity in the buffer, leaving it empty.
pub fn run(world: &mut World, despawn_buffer: &mut Vec<Entity>) {
    for entity in despawn_buffer.drain(..) {
        if world.despawn(entity).is_err() {
            warn!(?entity, "despawn of missing entity");
        }
    }
}
