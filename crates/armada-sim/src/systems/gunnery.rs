//! Gunnery system: ships with an attack order fire on their target.
//!
//! Each battery allowed by the ship's fire mode deals its damage per second
//! while the target is inside its range. Orders on dead or missing targets
//! are dropped.

use hecs::{Entity, World};

use armada_core::components::{Armament, Attackable, Damageable, ShipBehaviors};
use armada_core::types::{EntityId, Position};

use crate::ids::entity_from_id;

pub fn run(world: &mut World, dt: f64) {
    let orders: Vec<(Entity, Position, EntityId)> = world
        .query::<(&Position, &Attackable)>()
        .iter()
        .filter_map(|(attacker, (pos, attackable))| Some((attacker, *pos, attackable.target?)))
        .collect();

    let mut hits: Vec<(Entity, f64)> = Vec::new();
    let mut dropped: Vec<Entity> = Vec::new();

    for (attacker, attacker_pos, target_id) in orders {
        let live_target = entity_from_id(target_id)
            .and_then(|target| target_state(world, target).map(|state| (target, state)));
        let Some((target, (target_pos, hull))) = live_target else {
            dropped.push(attacker);
            continue;
        };
        if hull <= 0.0 {
            dropped.push(attacker);
            continue;
        }

        let range = attacker_pos.planar_distance_to(&target_pos);
        let damage = battery_damage(world, attacker, range) * dt;
        if damage > 0.0 {
            hits.push((target, damage));
        }
    }

    for (target, damage) in hits {
        if let Ok(damageable) = world.query_one_mut::<&mut Damageable>(target) {
            damageable.hull = (damageable.hull - damage).max(0.0);
        }
    }

    for attacker in dropped {
        if let Ok(attackable) = world.query_one_mut::<&mut Attackable>(attacker) {
            attackable.target = None;
        }
    }
}

/// Position and hull of a target, if it still exists and can be damaged.
fn target_state(world: &World, target: Entity) -> Option<(Position, f64)> {
    let pos = *world.get::<&Position>(target).ok()?;
    let hull = world.get::<&Damageable>(target).ok()?.hull;
    Some((pos, hull))
}

/// Damage per second the attacker's permitted batteries deal at `range`.
fn battery_damage(world: &World, attacker: Entity, range: f64) -> f64 {
    let Ok(behaviors) = world.get::<&ShipBehaviors>(attacker) else {
        return 0.0;
    };
    let Ok(armament) = world.get::<&Armament>(attacker) else {
        return 0.0;
    };
    let dps: f64 = armament
        .batteries
        .iter()
        .filter(|b| behaviors.fire_mode.allows(b.kind) && range <= b.range)
        .map(|b| b.damage_per_sec)
        .sum();
    dps
}
