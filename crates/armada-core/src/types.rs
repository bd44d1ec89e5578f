//! Fundamental geometric and simulation types.

use glam::DVec3;
use serde::{Deserialize, Serialize};

/// 3D position in world space (Unity-style axes: x = East, y = Up, z = North).
/// Ships sail on the horizontal x/z plane at a fixed y.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// A world-space ray cast from the camera through a touch point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ray {
    pub origin: DVec3,
    /// Not required to be normalized.
    pub direction: DVec3,
}

/// Stable handle of a simulation entity, as seen outside the ECS.
///
/// Holds the ECS entity bits, so identity is by reference, never by value of
/// the entity's components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(pub u64);

/// Simulation time tracking.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SimTime {
    /// Current tick number (increments by 1 each tick).
    pub tick: u64,
    /// Elapsed simulation time in seconds.
    pub elapsed_secs: f64,
}

impl Position {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Distance to another position (3D).
    pub fn distance_to(&self, other: &Position) -> f64 {
        self.to_dvec3().distance(other.to_dvec3())
    }

    /// Distance on the sea plane, ignoring height.
    pub fn planar_distance_to(&self, other: &Position) -> f64 {
        let dx = other.x - self.x;
        let dz = other.z - self.z;
        (dx * dx + dz * dz).sqrt()
    }

    /// Same x/z, with y pinned to the given plane height.
    pub fn on_plane(&self, plane_y: f64) -> Position {
        Position::new(self.x, plane_y, self.z)
    }

    pub fn to_dvec3(self) -> DVec3 {
        DVec3::new(self.x, self.y, self.z)
    }
}

impl From<DVec3> for Position {
    fn from(v: DVec3) -> Self {
        Position::new(v.x, v.y, v.z)
    }
}

impl From<Position> for DVec3 {
    fn from(p: Position) -> Self {
        p.to_dvec3()
    }
}

impl Ray {
    pub fn new(origin: DVec3, direction: DVec3) -> Self {
        Self { origin, direction }
    }

    /// A ray pointing straight down onto the sea plane at `(x, z)`,
    /// as produced by a top-down camera.
    pub fn straight_down(x: f64, z: f64) -> Self {
        Self {
            origin: DVec3::new(x, 1000.0, z),
            direction: DVec3::NEG_Y,
        }
    }

    /// Point at parameter `t` along the normalized direction.
    pub fn point_at(&self, t: f64) -> DVec3 {
        self.origin + self.direction.normalize_or_zero() * t
    }
}

impl SimTime {
    /// Seconds per tick at the default tick rate.
    pub fn dt(&self) -> f64 {
        crate::constants::DT
    }

    /// Advance by one tick.
    pub fn advance(&mut self) {
        self.tick += 1;
        self.elapsed_secs += self.dt();
    }
}
