//! Selection controller: the single "currently selected entity" slot.
//!
//! Invariants:
//! - At most one entity is selected at any time.
//! - `Empty -> Active` notifies the entity with exactly one `select`;
//!   `Active -> Empty` with exactly one `unselect`.
//! - Only Selectable entities whose own check passes, and that are not
//!   hostile Damageables, can become Active.
//!
//! Every transition completes inside one call, so no caller ever observes
//! cached capabilities without the matching `select` notification.

use hecs::{Entity, World};
use tracing::debug;

use armada_core::events::SimEvent;
use armada_core::types::Position;

use crate::capabilities::{self, CapabilitySet};

/// The Active state: the selected entity and what it could do when selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActiveSelection {
    pub entity: Entity,
    pub capabilities: CapabilitySet,
}

#[derive(Debug, Clone)]
pub struct SelectionController {
    active: Option<ActiveSelection>,
    player_team: u8,
}

impl SelectionController {
    pub fn new(player_team: u8) -> Self {
        Self {
            active: None,
            player_team,
        }
    }

    pub fn active(&self) -> Option<&ActiveSelection> {
        self.active.as_ref()
    }

    pub fn entity(&self) -> Option<Entity> {
        self.active.map(|a| a.entity)
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    /// Try to make `candidate` the selection. Any current selection is
    /// released first. Returns whether `candidate` ended up selected.
    pub fn init_selection(
        &mut self,
        world: &mut World,
        candidate: Entity,
        events: &mut Vec<SimEvent>,
    ) -> bool {
        self.uninit_selection(world, events);

        match capabilities::can_select(world, candidate) {
            Some(true) => {}
            Some(false) => {
                debug!(entity = ?candidate, "selection refused by entity");
                return false;
            }
            None => {
                debug!(entity = ?candidate, "entity is not selectable");
                return false;
            }
        }

        if let Some(damageable) = capabilities::damageable(world, candidate) {
            if !capabilities::is_friend(&damageable, self.player_team) {
                debug!(entity = ?candidate, team = damageable.team, "refusing to select hostile");
                return false;
            }
        }

        let capabilities = CapabilitySet::resolve(world, candidate);
        capabilities::select(world, candidate, events);
        self.active = Some(ActiveSelection {
            entity: candidate,
            capabilities,
        });
        debug!(entity = ?candidate, ?capabilities, "selected");
        true
    }

    /// Release the current selection. No-op when Empty.
    pub fn uninit_selection(&mut self, world: &mut World, events: &mut Vec<SimEvent>) {
        if let Some(active) = self.active.take() {
            capabilities::unselect(world, active.entity, events);
            debug!(entity = ?active.entity, "unselected");
        }
    }

    /// Identity comparison with the selected entity. False when Empty.
    pub fn is_same_entity(&self, candidate: Entity) -> bool {
        self.entity() == Some(candidate)
    }

    /// Order the selection to `position`. Silently ignored when Empty or
    /// when the selection cannot move.
    pub fn try_move_to(&self, world: &mut World, position: Position, events: &mut Vec<SimEvent>) {
        let Some(active) = self.active else {
            return;
        };
        if active.capabilities.moveable {
            capabilities::move_to(world, active.entity, position, events);
        }
    }

    /// Interact with a tapped entity. Returns true when the tap was consumed
    /// (an attack on a hostile, damageable target) and must not reselect.
    pub fn try_interact(
        &self,
        world: &mut World,
        target: Entity,
        events: &mut Vec<SimEvent>,
    ) -> bool {
        let Some(active) = self.active else {
            return false;
        };
        let Some(damageable) = capabilities::damageable(world, target) else {
            return false;
        };
        if capabilities::is_friend(&damageable, self.player_team)
            || !capabilities::can_be_damaged(&damageable)
        {
            return false;
        }

        if active.capabilities.attackable {
            capabilities::attack_target(world, active.entity, target, events);
        } else {
            debug!(entity = ?active.entity, "selection cannot attack");
        }
        true
    }
}
