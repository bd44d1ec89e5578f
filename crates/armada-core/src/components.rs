//! ECS components for hecs entities.
//!
//! Components are plain data structs with no game logic.
//! Capability behavior lives in the engine crate; a component's presence on
//! an entity is what grants the capability.

use serde::{Deserialize, Serialize};

use crate::enums::{FireMode, GunKind};
use crate::types::{EntityId, Position};

// --- Capabilities ---

/// The entity can become the single active selection.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Selectable {
    /// Answer of the entity's own selectability check.
    pub enabled: bool,
    /// Whether the entity currently shows itself as selected.
    pub selected: bool,
}

/// The entity accepts move orders.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Moveable {
    /// Cruise speed (units/s).
    pub speed: f64,
    /// Current move order, if any.
    pub destination: Option<Position>,
}

/// The entity has a hull that can be damaged and belongs to a team.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Damageable {
    pub team: u8,
    pub hull: f64,
    pub max_hull: f64,
}

/// The entity can be ordered to attack another entity.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Attackable {
    pub target: Option<EntityId>,
}

// --- Ship behavior ---

/// Mutable behavior set of a ship: weapons policy and hangar.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ShipBehaviors {
    pub fire_mode: FireMode,
    /// Squadron ids still aboard, in launch-panel order.
    pub squadrons: Vec<u32>,
    /// Squadron ids already launched.
    pub launched: Vec<u32>,
}

/// One gun battery on a ship.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct GunBattery {
    pub kind: GunKind,
    pub damage_per_sec: f64,
    pub range: f64,
}

/// All gun batteries of a ship.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Armament {
    pub batteries: Vec<GunBattery>,
}

/// AI control toggle. Present on every ship; enabled for AI-driven ones.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct AiController {
    pub enabled: bool,
}

/// Explosion parameters used when the entity is destroyed.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Explosive {
    pub radius: f64,
    pub force: f64,
    pub debris_count: u32,
}

// --- Physics ---

/// Sphere used for tap raycasts.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Collider {
    pub radius: f64,
}

/// A body that explosion impulses can push.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct RigidBody {
    pub mass: f64,
    /// Accumulated velocity (x, y, z).
    pub velocity: [f64; 3],
}

// --- Markers and hierarchy ---

/// Marks an entity as a battleship.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Ship;

/// A piece of wreckage left by a destroyed ship.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Debris {
    /// Seconds until the cleanup system removes the piece.
    pub remaining_secs: f64,
}

/// Marks the shared container that owns all debris.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DebrisContainer;

/// Hierarchy link to the owning entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parent(pub EntityId);

