//! Capability behavior on top of the plain-data capability components.
//!
//! An entity has a capability iff it carries the matching component. Every
//! function here is a no-op when the component is missing or the entity is
//! gone, so callers never need to check first.

use hecs::{Entity, World};
use tracing::debug;

use armada_core::components::{Attackable, Damageable, Moveable, Selectable, Ship, ShipBehaviors};
use armada_core::enums::FireMode;
use armada_core::events::SimEvent;
use armada_core::types::Position;

use crate::ids::entity_id;
use crate::services::SquadronRef;

/// Which capabilities an entity had when it was selected.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CapabilitySet {
    pub moveable: bool,
    pub damageable: bool,
    pub attackable: bool,
    /// Carries a ship behavior set (fire modes, hangar).
    pub ship: bool,
}

impl CapabilitySet {
    pub fn resolve(world: &World, entity: Entity) -> Self {
        let Ok(entity_ref) = world.entity(entity) else {
            return Self::default();
        };
        Self {
            moveable: entity_ref.has::<Moveable>(),
            damageable: entity_ref.has::<Damageable>(),
            attackable: entity_ref.has::<Attackable>(),
            ship: entity_ref.has::<Ship>() && entity_ref.has::<ShipBehaviors>(),
        }
    }
}

// --- Selectable ---

/// The entity's own selectability check; `None` when it is not Selectable.
pub fn can_select(world: &World, entity: Entity) -> Option<bool> {
    world.get::<&Selectable>(entity).ok().map(|s| s.enabled)
}

pub fn select(world: &mut World, entity: Entity, events: &mut Vec<SimEvent>) {
    if let Ok(selectable) = world.query_one_mut::<&mut Selectable>(entity) {
        selectable.selected = true;
        events.push(SimEvent::Selected {
            entity: entity_id(entity),
        });
    }
}

pub fn unselect(world: &mut World, entity: Entity, events: &mut Vec<SimEvent>) {
    if let Ok(selectable) = world.query_one_mut::<&mut Selectable>(entity) {
        selectable.selected = false;
        events.push(SimEvent::Unselected {
            entity: entity_id(entity),
        });
    }
}

// --- Damageable ---

pub fn damageable(world: &World, entity: Entity) -> Option<Damageable> {
    world.get::<&Damageable>(entity).ok().map(|d| *d)
}

pub fn is_friend(damageable: &Damageable, player_team: u8) -> bool {
    damageable.team == player_team
}

pub fn can_be_damaged(damageable: &Damageable) -> bool {
    damageable.hull > 0.0
}

// --- Moveable ---

pub fn move_to(world: &mut World, entity: Entity, destination: Position, events: &mut Vec<SimEvent>) {
    if let Ok(moveable) = world.query_one_mut::<&mut Moveable>(entity) {
        moveable.destination = Some(destination);
        events.push(SimEvent::MoveOrdered {
            entity: entity_id(entity),
            destination,
        });
    }
}

pub fn force_stop(world: &mut World, entity: Entity) {
    if let Ok(moveable) = world.query_one_mut::<&mut Moveable>(entity) {
        moveable.destination = None;
    }
}

pub fn is_reached_destination(world: &World, entity: Entity) -> bool {
    world
        .get::<&Moveable>(entity)
        .map(|m| m.destination.is_none())
        .unwrap_or(true)
}

// --- Attackable ---

pub fn attack_target(
    world: &mut World,
    attacker: Entity,
    target: Entity,
    events: &mut Vec<SimEvent>,
) {
    if let Ok(attackable) = world.query_one_mut::<&mut Attackable>(attacker) {
        attackable.target = Some(entity_id(target));
        events.push(SimEvent::AttackOrdered {
            attacker: entity_id(attacker),
            target: entity_id(target),
        });
    }
}

// --- Ship behaviors ---

/// Cancel the move order and the attack order.
pub fn stop_all_actions(world: &mut World, entity: Entity, events: &mut Vec<SimEvent>) {
    if !world.contains(entity) {
        return;
    }
    force_stop(world, entity);
    if let Ok(attackable) = world.query_one_mut::<&mut Attackable>(entity) {
        attackable.target = None;
    }
    events.push(SimEvent::OrdersCancelled {
        entity: entity_id(entity),
    });
}

pub fn fire_mode(world: &World, entity: Entity) -> Option<FireMode> {
    world.get::<&ShipBehaviors>(entity).ok().map(|b| b.fire_mode)
}

pub fn switch_fire_mode(
    world: &mut World,
    entity: Entity,
    mode: FireMode,
    events: &mut Vec<SimEvent>,
) {
    if let Ok(behaviors) = world.query_one_mut::<&mut ShipBehaviors>(entity) {
        behaviors.fire_mode = mode;
        events.push(SimEvent::FireModeChanged {
            entity: entity_id(entity),
            mode,
        });
    }
}

/// Squadron ids still aboard, in launch-panel order.
pub fn squadron_ids(world: &World, entity: Entity) -> Vec<u32> {
    world
        .get::<&ShipBehaviors>(entity)
        .map(|b| b.squadrons.clone())
        .unwrap_or_default()
}

/// Launch a squadron if it is still in the hangar. Returns whether it left.
pub fn launch_squadron(
    world: &mut World,
    entity: Entity,
    squadron: SquadronRef,
    events: &mut Vec<SimEvent>,
) -> bool {
    let Ok(behaviors) = world.query_one_mut::<&mut ShipBehaviors>(entity) else {
        return false;
    };
    let Some(slot) = behaviors.squadrons.iter().position(|&id| id == squadron.0) else {
        debug!(entity = ?entity, squadron = squadron.0, "squadron not aboard");
        return false;
    };
    behaviors.squadrons.remove(slot);
    behaviors.launched.push(squadron.0);
    events.push(SimEvent::SquadronLaunched {
        entity: entity_id(entity),
        squadron: squadron.0,
    });
    true
}
