//! Core types and definitions for the ARMADA interaction layer.
//!
//! This crate defines the vocabulary shared by the engine and its drivers:
//! components, commands, events, configuration, snapshots, and constants.
//! It has no dependency on the ECS or any runtime framework.

pub mod commands;
pub mod components;
pub mod config;
pub mod constants;
pub mod enums;
pub mod error;
pub mod events;
pub mod state;
pub mod types;
