//! Enumeration types used throughout the interaction layer.

use serde::{Deserialize, Serialize};

/// Weapons-engagement policy for a ship. Exactly one is active at a time.
///
/// The discriminant doubles as the option index of the fire-mode popup.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FireMode {
    NoGuns = 0,
    OnlyOnboard = 1,
    OnlyMain = 2,
    #[default]
    AllGuns = 3,
}

impl FireMode {
    /// Option index shown by the fire-mode popup.
    pub fn option_index(self) -> usize {
        self as usize
    }

    /// Whether a battery of the given kind may fire under this mode.
    pub fn allows(self, kind: GunKind) -> bool {
        match (self, kind) {
            (FireMode::NoGuns, _) => false,
            (FireMode::AllGuns, _) => true,
            (FireMode::OnlyOnboard, GunKind::Onboard) => true,
            (FireMode::OnlyMain, GunKind::Main) => true,
            _ => false,
        }
    }
}

/// Gun battery category on a ship.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GunKind {
    /// Secondary, short-range guns.
    Onboard,
    /// Main turrets.
    Main,
}

/// UI popups the interaction layer can open or close.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PopupId {
    /// Main control strip for a selected ship.
    ShipControl,
    /// Fire-mode chooser.
    ChangeFireMode,
    /// Squadron launch chooser.
    LaunchSquadron,
}

impl PopupId {
    /// Every popup that belongs to the selection controls.
    pub const CONTROLS: [PopupId; 3] = [
        PopupId::ShipControl,
        PopupId::ChangeFireMode,
        PopupId::LaunchSquadron,
    ];
}
