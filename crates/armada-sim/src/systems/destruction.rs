//! Destruction system: sinks ships whose hull reached zero.
//!
//! For each sunk ship: release it from the selection, make it unselectable,
//! break it into debris parented to the ship, hand the explosion to the
//! lifecycle manager (which re-parents the debris), then despawn the hull.

use hecs::{Entity, World};
use tracing::debug;

use armada_core::components::{Collider, Debris, Explosive, Parent, RigidBody, Selectable};
use armada_core::constants::DEBRIS_MASS;
use armada_core::events::SimEvent;
use armada_core::types::Position;

use crate::capabilities;
use crate::ids::entity_id;
use crate::lifecycle::{ExplosionDescriptor, LifecycleManager};
use crate::selection::SelectionController;
use crate::services::PhysicsService;

/// Returns true when the selected ship was among the destroyed.
pub fn run(
    world: &mut World,
    lifecycle: &mut LifecycleManager,
    selection: &mut SelectionController,
    physics: &mut dyn PhysicsService,
    events: &mut Vec<SimEvent>,
) -> bool {
    let sunk: Vec<Entity> = lifecycle
        .live_ships()
        .iter()
        .copied()
        .filter(|&ship| capabilities::damageable(world, ship).is_some_and(|d| d.hull <= 0.0))
        .collect();

    let mut selection_lost = false;
    for ship in sunk {
        if selection.is_same_entity(ship) {
            selection.uninit_selection(world, events);
            selection_lost = true;
        }
        if let Ok(selectable) = world.query_one_mut::<&mut Selectable>(ship) {
            selectable.enabled = false;
        }

        let position = world
            .get::<&Position>(ship)
            .map(|p| *p)
            .unwrap_or_default();
        let explosive = world.get::<&Explosive>(ship).map(|x| *x).ok();
        let lifetime = lifecycle.debris_lifetime_secs();
        let explosion = explosive.map(|x| ExplosionDescriptor {
            position,
            radius: x.radius,
            force: x.force,
            debris: spawn_debris(world, ship, position, x.debris_count, lifetime),
        });

        if lifecycle.on_destroyed(world, physics, ship, explosion.as_ref()) {
            events.push(SimEvent::ShipDestroyed {
                entity: entity_id(ship),
                position,
                debris: explosion
                    .map(|x| x.debris.into_iter().map(entity_id).collect())
                    .unwrap_or_default(),
            });
        }
        if let Err(err) = world.despawn(ship) {
            debug!(entity = ?ship, %err, "sunk ship already gone");
        }
    }
    selection_lost
}

/// Break a ship into `count` pieces spread around its hull.
fn spawn_debris(
    world: &mut World,
    ship: Entity,
    position: Position,
    count: u32,
    lifetime_secs: f64,
) -> Vec<Entity> {
    let spread = world
        .get::<&Collider>(ship)
        .map(|c| c.radius * 0.5)
        .unwrap_or(1.0);
    let owner = Parent(entity_id(ship));

    (0..count)
        .map(|i| {
            let angle = std::f64::consts::TAU * f64::from(i) / f64::from(count);
            let piece = Position::new(
                position.x + spread * angle.cos(),
                position.y,
                position.z + spread * angle.sin(),
            );
            world.spawn((
                Debris {
                    remaining_secs: lifetime_secs,
                },
                piece,
                owner,
                RigidBody {
                    mass: DEBRIS_MASS,
                    velocity: [0.0; 3],
                },
            ))
        })
        .collect()
}
