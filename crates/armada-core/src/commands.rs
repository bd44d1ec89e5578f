//! Commands sent from the input layer and UI to the interaction engine.
//!
//! Commands are queued and processed at the next tick boundary.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::types::Ray;

/// Named UI/game events understood by the command dispatcher.
///
/// The wire names are case-sensitive and match the strings UI buttons emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameEvent {
    // --- General ---
    /// Drop the current selection and close its controls.
    CancelSelection,
    /// Cancel in-flight orders of the selected entity.
    StopAllActions,

    // --- Ship: change fire mode ---
    #[serde(rename = "Ship_CFM_Panel")]
    OpenFireModePanel,
    #[serde(rename = "Ship_CFM_StopAllGuns")]
    FireModeNoGuns,
    #[serde(rename = "Ship_CFM_OnlyOnboardGuns")]
    FireModeOnlyOnboard,
    #[serde(rename = "Ship_CFM_OnlyMainGuns")]
    FireModeOnlyMain,
    #[serde(rename = "Ship_CFM_AllGuns")]
    FireModeAllGuns,

    // --- Ship: launch squadron ---
    #[serde(rename = "Ship_LS_Panel")]
    OpenLaunchPanel,
    #[serde(rename = "Ship_LS_Close")]
    CloseLaunchPanel,
    #[serde(rename = "Ship_LS_Launch")]
    LaunchSquadron,
}

impl GameEvent {
    pub const ALL: [GameEvent; 10] = [
        GameEvent::CancelSelection,
        GameEvent::StopAllActions,
        GameEvent::OpenFireModePanel,
        GameEvent::FireModeNoGuns,
        GameEvent::FireModeOnlyOnboard,
        GameEvent::FireModeOnlyMain,
        GameEvent::FireModeAllGuns,
        GameEvent::OpenLaunchPanel,
        GameEvent::CloseLaunchPanel,
        GameEvent::LaunchSquadron,
    ];

    /// The event name as emitted by the UI.
    pub fn name(self) -> &'static str {
        match self {
            GameEvent::CancelSelection => "CancelSelection",
            GameEvent::StopAllActions => "StopAllActions",
            GameEvent::OpenFireModePanel => "Ship_CFM_Panel",
            GameEvent::FireModeNoGuns => "Ship_CFM_StopAllGuns",
            GameEvent::FireModeOnlyOnboard => "Ship_CFM_OnlyOnboardGuns",
            GameEvent::FireModeOnlyMain => "Ship_CFM_OnlyMainGuns",
            GameEvent::FireModeAllGuns => "Ship_CFM_AllGuns",
            GameEvent::OpenLaunchPanel => "Ship_LS_Panel",
            GameEvent::CloseLaunchPanel => "Ship_LS_Close",
            GameEvent::LaunchSquadron => "Ship_LS_Launch",
        }
    }

    /// Ship events need a selected ship; general events do not.
    pub fn is_ship_event(self) -> bool {
        !matches!(self, GameEvent::CancelSelection | GameEvent::StopAllActions)
    }
}

impl fmt::Display for GameEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Returned when a string is not one of the known event names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownEvent(pub String);

impl fmt::Display for UnknownEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown game event name `{}`", self.0)
    }
}

impl std::error::Error for UnknownEvent {}

impl FromStr for GameEvent {
    type Err = UnknownEvent;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        GameEvent::ALL
            .into_iter()
            .find(|event| event.name() == s)
            .ok_or_else(|| UnknownEvent(s.to_string()))
    }
}

/// Everything a driver can queue into the engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlayerCommand {
    /// A finger/pointer tap. The engine stamps it with the simulation clock.
    Tap {
        ray: Ray,
        /// The tap landed on a UI widget and must not reach the world.
        over_ui: bool,
    },
    /// A UI event already resolved to its enum form.
    Event { event: GameEvent },
    /// A UI event by its string name. Unknown names are dropped.
    NamedEvent { name: String },
    /// Spawn a battleship on the ship plane at `(x, z)`.
    SpawnShip {
        x: f64,
        z: f64,
        team: u8,
        controlled_by_ai: bool,
    },
}
