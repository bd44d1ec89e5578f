//! Cleanup system: removes debris whose lifetime ran out and prunes the
//! live-debris registry of entries that no longer exist.

use hecs::{Entity, World};
use tracing::debug;

use armada_core::components::Debris;

use crate::lifecycle::LifecycleManager;

/// Age every debris piece by `dt` and despawn the expired ones.
/// Uses a pre-allocated buffer to avoid per-tick allocation.
pub fn run(
    world: &mut World,
    lifecycle: &mut LifecycleManager,
    dt: f64,
    despawn_buffer: &mut Vec<Entity>,
) {
    despawn_buffer.clear();

    for (entity, debris) in world.query_mut::<&mut Debris>() {
        debris.remaining_secs -= dt;
        if debris.remaining_secs <= 0.0 {
            despawn_buffer.push(entity);
        }
    }

    // Registry entries whose entity was despawned elsewhere.
    despawn_buffer.extend(
        lifecycle
            .live_debris()
            .iter()
            .copied()
            .filter(|&entity| !world.contains(entity)),
    );

    for entity in despawn_buffer.drain(..) {
        lifecycle.forget_debris(entity);
        if world.despawn(entity).is_ok() {
            debug!(entity = ?entity, "debris removed");
        }
    }
}
