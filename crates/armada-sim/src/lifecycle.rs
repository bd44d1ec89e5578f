//! Entity lifecycle: ship spawning, destruction side effects, and the live
//! ship/debris registries.
//!
//! A ship is registered once at spawn. Destruction handling runs only for
//! registered ships and unregisters them first, so it happens exactly once
//! per ship no matter how often it is requested.

use hecs::{Entity, World};
use rand::distributions::{Distribution, Uniform};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info};

use armada_core::components::*;
use armada_core::config::{ShipTemplate, SimConfig};
use armada_core::error::{require_symmetric_span, ConfigError};
use armada_core::events::SimEvent;
use armada_core::types::Position;

use crate::ids::entity_id;
use crate::services::PhysicsService;

/// What a destroyed ship leaves behind.
#[derive(Debug, Clone, PartialEq)]
pub struct ExplosionDescriptor {
    pub position: Position,
    pub radius: f64,
    pub force: f64,
    /// Debris created by the destruction, still parented to the ship.
    pub debris: Vec<Entity>,
}

pub struct LifecycleManager {
    live_ships: Vec<Entity>,
    live_debris: Vec<Entity>,
    debris_container: Entity,
    ship_plane_y: f64,
    /// Upward-bias distribution over `[-modifier, +modifier]`.
    upward_bias: Uniform<f64>,
    template: ShipTemplate,
    rng: ChaCha8Rng,
}

impl LifecycleManager {
    /// Create the manager and the shared debris container entity. Fails
    /// when the upward explosion modifier cannot span a sampling range.
    pub fn new(world: &mut World, config: &SimConfig, rng: ChaCha8Rng) -> Result<Self, ConfigError> {
        let modifier = config.upward_explosion_modifier;
        require_symmetric_span("upward_explosion_modifier", modifier)?;
        let upward_bias = Uniform::new_inclusive(-modifier, modifier);

        let debris_container = world.spawn((DebrisContainer,));
        Ok(Self {
            live_ships: Vec::new(),
            live_debris: Vec::new(),
            debris_container,
            ship_plane_y: config.ship_plane_y,
            upward_bias,
            template: config.ship.clone(),
            rng,
        })
    }

    pub fn live_ships(&self) -> &[Entity] {
        &self.live_ships
    }

    pub fn live_debris(&self) -> &[Entity] {
        &self.live_debris
    }

    pub fn debris_container(&self) -> Entity {
        self.debris_container
    }

    pub fn is_live_ship(&self, entity: Entity) -> bool {
        self.live_ships.contains(&entity)
    }

    /// Lifetime given to debris broken off a destroyed ship.
    pub fn debris_lifetime_secs(&self) -> f64 {
        self.template.debris_lifetime_secs
    }

    /// Drop `entity` from the live-debris registry. Returns whether it was there.
    pub fn forget_debris(&mut self, entity: Entity) -> bool {
        let before = self.live_debris.len();
        self.live_debris.retain(|&e| e != entity);
        self.live_debris.len() != before
    }

    /// Spawn a battleship. X/Z come from `position`, Y from the ship plane.
    pub fn spawn(
        &mut self,
        world: &mut World,
        position: Position,
        team: u8,
        controlled_by_ai: bool,
        events: &mut Vec<SimEvent>,
    ) -> Entity {
        let t = &self.template;
        let entity = world.spawn((
            Ship,
            position.on_plane(self.ship_plane_y),
            Selectable {
                enabled: !controlled_by_ai,
                selected: false,
            },
            Moveable {
                speed: t.speed,
                destination: None,
            },
            Damageable {
                team,
                hull: t.hull,
                max_hull: t.hull,
            },
            Attackable::default(),
            ShipBehaviors {
                squadrons: t.squadrons.clone(),
                ..Default::default()
            },
            Armament {
                batteries: t.batteries.clone(),
            },
            AiController {
                enabled: controlled_by_ai,
            },
            Explosive {
                radius: t.explosion_radius,
                force: t.explosion_force,
                debris_count: t.debris_count,
            },
            Collider {
                radius: t.collider_radius,
            },
            RigidBody {
                mass: t.mass,
                velocity: [0.0; 3],
            },
        ));

        self.live_ships.push(entity);
        events.push(SimEvent::ShipSpawned {
            entity: entity_id(entity),
            team,
        });
        info!(entity = ?entity, team, controlled_by_ai, "ship spawned");
        entity
    }

    /// Handle a ship's destruction. Returns false (doing nothing) when the
    /// ship is not, or no longer, registered.
    pub fn on_destroyed(
        &mut self,
        world: &mut World,
        physics: &mut dyn PhysicsService,
        entity: Entity,
        explosion: Option<&ExplosionDescriptor>,
    ) -> bool {
        let Some(slot) = self.live_ships.iter().position(|&e| e == entity) else {
            debug!(entity = ?entity, "destruction of unregistered ship ignored");
            return false;
        };
        self.live_ships.remove(slot);

        let Some(explosion) = explosion else {
            return true;
        };

        let bodies = physics.bodies_within_radius(world, explosion.position, explosion.radius);
        for body in bodies {
            let bias = self.upward_bias.sample(&mut self.rng);
            physics.apply_impulse(
                world,
                body,
                explosion.force,
                explosion.position,
                explosion.radius,
                bias,
            );
        }

        let container = entity_id(self.debris_container);
        for &debris in &explosion.debris {
            if world.insert_one(debris, Parent(container)).is_ok() {
                self.live_debris.push(debris);
            }
        }

        info!(
            entity = ?entity,
            debris = explosion.debris.len(),
            radius = explosion.radius,
            "ship destroyed"
        );
        true
    }
}
