//! Snapshot system: queries the ECS world and builds an InteractionSnapshot.
//!
//! This system is read-only. It never modifies the world.

use hecs::World;

use armada_core::components::*;
use armada_core::events::SimEvent;
use armada_core::state::*;
use armada_core::types::{Position, SimTime};

use crate::capabilities;
use crate::ids::entity_id;
use crate::lifecycle::LifecycleManager;
use crate::selection::SelectionController;

pub fn build_snapshot(
    world: &World,
    time: &SimTime,
    selection: &SelectionController,
    lifecycle: &LifecycleManager,
    events: Vec<SimEvent>,
) -> InteractionSnapshot {
    InteractionSnapshot {
        time: *time,
        selection: build_selection(world, selection),
        ships: build_ships(world),
        debris_count: lifecycle.live_debris().len(),
        events,
    }
}

fn build_selection(world: &World, selection: &SelectionController) -> Option<SelectionView> {
    let active = selection.active()?;
    Some(SelectionView {
        entity: entity_id(active.entity),
        can_move: active.capabilities.moveable,
        can_attack: active.capabilities.attackable,
        is_damageable: active.capabilities.damageable,
        squadrons: capabilities::squadron_ids(world, active.entity),
    })
}

/// Ships sorted by entity id so snapshots are stable across ticks.
fn build_ships(world: &World) -> Vec<ShipView> {
    let mut ships: Vec<ShipView> = world
        .query::<(
            &Ship,
            &Position,
            &Damageable,
            &ShipBehaviors,
            &Selectable,
            &Moveable,
            &Attackable,
            &AiController,
        )>()
        .iter()
        .map(
            |(entity, (_, pos, damageable, behaviors, selectable, moveable, attackable, ai))| {
                ShipView {
                    entity: entity_id(entity),
                    team: damageable.team,
                    position: *pos,
                    hull: damageable.hull,
                    max_hull: damageable.max_hull,
                    fire_mode: behaviors.fire_mode,
                    selected: selectable.selected,
                    ai_controlled: ai.enabled,
                    destination: moveable.destination,
                    target: attackable.target,
                }
            },
        )
        .collect();
    ships.sort_by_key(|s| s.entity);
    ships
}
