//! Startup configuration for the interaction engine.
//!
//! Every field has a default, so a config document only needs the values it
//! overrides. Validation happens once, when the engine is built.

use serde::{Deserialize, Serialize};

use crate::components::GunBattery;
use crate::constants::*;
use crate::enums::GunKind;
use crate::error::{require_non_negative, require_positive, require_symmetric_span, ConfigError};

/// Top-level engine configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// RNG seed for explosion bias draws. `None` seeds from OS entropy.
    pub seed: Option<u64>,
    /// Max seconds between two taps for the second to count as a double tap.
    pub double_tap_threshold: f64,
    /// Height of the plane ships sail on.
    pub ship_plane_y: f64,
    /// Explosion upward bias is drawn uniformly from +/- this value.
    pub upward_explosion_modifier: f64,
    /// Team id of the local player.
    pub player_team: u8,
    /// Template every spawned battleship is built from.
    pub ship: ShipTemplate,
    /// Squadron catalog served by the default squadron registry.
    pub squadrons: Vec<SquadronDef>,
}

/// Stats of a spawned battleship.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ShipTemplate {
    pub hull: f64,
    pub speed: f64,
    pub mass: f64,
    pub collider_radius: f64,
    pub batteries: Vec<GunBattery>,
    pub explosion_radius: f64,
    pub explosion_force: f64,
    pub debris_count: u32,
    /// Seconds a debris piece floats before the cleanup system removes it.
    pub debris_lifetime_secs: f64,
    /// Squadron ids in the hangar at spawn.
    pub squadrons: Vec<u32>,
}

/// A squadron known to the registry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SquadronDef {
    pub id: u32,
    pub name: String,
    pub aircraft: u32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: None,
            double_tap_threshold: DEFAULT_DOUBLE_TAP_THRESHOLD,
            ship_plane_y: DEFAULT_SHIP_PLANE_Y,
            upward_explosion_modifier: DEFAULT_UPWARD_EXPLOSION_MODIFIER,
            player_team: DEFAULT_PLAYER_TEAM,
            ship: ShipTemplate::default(),
            squadrons: vec![
                SquadronDef {
                    id: 0,
                    name: "Torpedo Bombers".to_string(),
                    aircraft: 6,
                },
                SquadronDef {
                    id: 1,
                    name: "Dive Bombers".to_string(),
                    aircraft: 6,
                },
                SquadronDef {
                    id: 2,
                    name: "Fighters".to_string(),
                    aircraft: 8,
                },
            ],
        }
    }
}

impl Default for ShipTemplate {
    fn default() -> Self {
        Self {
            hull: SHIP_HULL,
            speed: SHIP_SPEED,
            mass: SHIP_MASS,
            collider_radius: SHIP_COLLIDER_RADIUS,
            batteries: vec![
                GunBattery {
                    kind: GunKind::Onboard,
                    damage_per_sec: ONBOARD_GUN_DPS,
                    range: ONBOARD_GUN_RANGE,
                },
                GunBattery {
                    kind: GunKind::Main,
                    damage_per_sec: MAIN_GUN_DPS,
                    range: MAIN_GUN_RANGE,
                },
            ],
            explosion_radius: SHIP_EXPLOSION_RADIUS,
            explosion_force: SHIP_EXPLOSION_FORCE,
            debris_count: SHIP_DEBRIS_COUNT,
            debris_lifetime_secs: DEBRIS_LIFETIME_SECS,
            squadrons: vec![0, 1, 2],
        }
    }
}

impl SimConfig {
    /// Parse a JSON config document. Missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: SimConfig =
            serde_json::from_str(json).map_err(|e| ConfigError::InvalidJson(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the engine cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_positive("double_tap_threshold", self.double_tap_threshold)?;
        require_symmetric_span("upward_explosion_modifier", self.upward_explosion_modifier)?;
        self.ship.validate()
    }
}

impl ShipTemplate {
    fn validate(&self) -> Result<(), ConfigError> {
        require_positive("ship.hull", self.hull)?;
        require_non_negative("ship.speed", self.speed)?;
        require_positive("ship.mass", self.mass)?;
        require_non_negative("ship.collider_radius", self.collider_radius)?;
        require_non_negative("ship.explosion_radius", self.explosion_radius)?;
        require_non_negative("ship.explosion_force", self.explosion_force)?;
        require_positive("ship.debris_lifetime_secs", self.debris_lifetime_secs)?;
        for battery in &self.batteries {
            require_non_negative("ship.batteries.damage_per_sec", battery.damage_per_sec)?;
            require_non_negative("ship.batteries.range", battery.range)?;
        }
        Ok(())
    }
}
