//! Interaction engine for ARMADA.
//!
//! Owns the hecs ECS world, turns taps and UI events into selection changes
//! and orders, runs the per-tick ship systems, and produces
//! `InteractionSnapshot`s for the frontend.

pub mod capabilities;
pub mod dispatch;
pub mod engine;
pub mod gesture;
pub mod headless;
pub mod ids;
pub mod lifecycle;
pub mod selection;
pub mod services;
pub mod systems;
pub mod timer;

pub use armada_core as core;
pub use engine::SimulationEngine;

#[cfg(test)]
mod tests;
