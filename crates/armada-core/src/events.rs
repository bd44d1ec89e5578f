//! Events emitted by the engine for UI refresh and feedback.

use serde::{Deserialize, Serialize};

use crate::enums::FireMode;
use crate::types::{EntityId, Position};

/// Notifications drained into every snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SimEvent {
    /// The reselect path ran; `entity` is the resulting selection.
    SelectionChanged { entity: Option<EntityId> },
    /// An entity was told it is selected.
    Selected { entity: EntityId },
    /// An entity was told it is no longer selected.
    Unselected { entity: EntityId },
    /// A move order was issued.
    MoveOrdered { entity: EntityId, destination: Position },
    /// An attack order was issued.
    AttackOrdered { attacker: EntityId, target: EntityId },
    /// All in-flight orders of an entity were cancelled.
    OrdersCancelled { entity: EntityId },
    /// A ship switched weapons policy.
    FireModeChanged { entity: EntityId, mode: FireMode },
    /// A squadron left a ship's hangar.
    SquadronLaunched { entity: EntityId, squadron: u32 },
    /// The camera was asked to chase an entity.
    CameraFocused { entity: EntityId },
    /// A ship joined the live registry.
    ShipSpawned { entity: EntityId, team: u8 },
    /// A ship was destroyed.
    ShipDestroyed {
        entity: EntityId,
        position: Position,
        debris: Vec<EntityId>,
    },
}
