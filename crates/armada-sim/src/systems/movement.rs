//! Move-order execution.
//!
//! Ships steer straight toward their destination on the sea plane at their
//! cruise speed and drop the order on arrival.

use hecs::World;

use armada_core::components::Moveable;
use armada_core::constants::ARRIVAL_EPSILON;
use armada_core::types::Position;

/// Advance every entity with a move order by `dt` seconds.
pub fn run(world: &mut World, dt: f64) {
    for (_entity, (pos, moveable)) in world.query_mut::<(&mut Position, &mut Moveable)>() {
        let Some(dest) = moveable.destination else {
            continue;
        };

        let dx = dest.x - pos.x;
        let dz = dest.z - pos.z;
        let remaining = (dx * dx + dz * dz).sqrt();
        let step = moveable.speed * dt;

        if remaining <= step.max(ARRIVAL_EPSILON) {
            pos.x = dest.x;
            pos.z = dest.z;
            moveable.destination = None;
            continue;
        }

        pos.x += dx / remaining * step;
        pos.z += dz / remaining * step;
    }
}
