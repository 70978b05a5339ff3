//! Core types and definitions for the FRUITCATCH simulation.
//!
//! This crate defines the vocabulary shared across the workspace:
//! components, commands, configuration, snapshots, events, and constants.
//! It has no dependency on the ECS runtime or any presentation layer.

pub mod commands;
pub mod components;
pub mod config;
pub mod constants;
pub mod enums;
pub mod error;
pub mod events;
pub mod state;
pub mod types;
