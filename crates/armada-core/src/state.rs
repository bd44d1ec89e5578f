//! Interaction snapshot: the visible state handed to the frontend each tick.

use serde::{Deserialize, Serialize};

use crate::enums::FireMode;
use crate::events::SimEvent;
use crate::types::{EntityId, Position, SimTime};

/// State broadcast after each tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InteractionSnapshot {
    pub time: SimTime,
    pub selection: Option<SelectionView>,
    pub ships: Vec<ShipView>,
    /// Pieces in the shared debris container.
    pub debris_count: usize,
    pub events: Vec<SimEvent>,
}

/// The active selection and what it can do.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectionView {
    pub entity: EntityId,
    pub can_move: bool,
    pub can_attack: bool,
    pub is_damageable: bool,
    /// Squadron ids available for launch.
    pub squadrons: Vec<u32>,
}

/// A live ship.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShipView {
    pub entity: EntityId,
    pub team: u8,
    pub position: Position,
    pub hull: f64,
    pub max_hull: f64,
    pub fire_mode: FireMode,
    pub selected: bool,
    pub ai_controlled: bool,
    pub destination: Option<Position>,
    pub target: Option<EntityId>,
}
