//! ECS systems that operate on the simulation world each tick.
//!
//! Systems are plain functions over `&mut World` (or `&World` for read-only).
//! They do not own state; all state lives in components and the engine.

pub mod cleanup;
pub mod destruction;
pub mod gunnery;
pub mod movement;
pub mod snapshot;
