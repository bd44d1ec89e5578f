//! Simulation constants and tuning parameters.

/// Simulation tick rate (Hz).
pub const TICK_RATE: u32 = 30;

/// Seconds per tick.
pub const DT: f64 = 1.0 / TICK_RATE as f64;

// --- Input ---

/// Default window for classifying a second tap as a double tap (seconds).
pub const DEFAULT_DOUBLE_TAP_THRESHOLD: f64 = 0.3;

// --- World ---

/// Height of the plane ships sail on.
pub const DEFAULT_SHIP_PLANE_Y: f64 = 0.0;

/// Team id owned by the local player. Every other team is hostile.
pub const DEFAULT_PLAYER_TEAM: u8 = 1;

/// Team id given to ships spawned as opponents by the demo driver.
pub const DEFAULT_ENEMY_TEAM: u8 = 2;

// --- Ships ---

/// Battleship hull points.
pub const SHIP_HULL: f64 = 1000.0;

/// Battleship cruise speed (units/s).
pub const SHIP_SPEED: f64 = 6.0;

/// Radius of the sphere used for tap raycasts against a ship.
pub const SHIP_COLLIDER_RADIUS: f64 = 3.0;

/// Ship rigid body mass (for explosion impulses).
pub const SHIP_MASS: f64 = 5000.0;

/// Distance at which a move order counts as arrived.
pub const ARRIVAL_EPSILON: f64 = 0.05;

// --- Guns ---

/// Onboard (secondary) battery damage per second.
pub const ONBOARD_GUN_DPS: f64 = 40.0;

/// Onboard battery range.
pub const ONBOARD_GUN_RANGE: f64 = 25.0;

/// Main battery damage per second.
pub const MAIN_GUN_DPS: f64 = 120.0;

/// Main battery range.
pub const MAIN_GUN_RANGE: f64 = 60.0;

// --- Destruction ---

/// Explosion radius when a battleship goes down.
pub const SHIP_EXPLOSION_RADIUS: f64 = 20.0;

/// Explosion force when a battleship goes down.
pub const SHIP_EXPLOSION_FORCE: f64 = 800.0;

/// Range of the random upward bias applied per body (+/- this value).
pub const DEFAULT_UPWARD_EXPLOSION_MODIFIER: f64 = 1.0;

/// Debris pieces left behind by a destroyed battleship.
pub const SHIP_DEBRIS_COUNT: u32 = 4;

/// Mass of a single debris piece.
pub const DEBRIS_MASS: f64 = 50.0;

/// Seconds debris stays in the world before cleanup.
pub const DEBRIS_LIFETIME_SECS: f64 = 10.0;
