//! Sidearm library.
//!
//! This module exposes the game's ECS components, resources and systems for
//! use in integration tests and headless runs.

pub mod components;
pub mod game;
pub mod resources;
pub mod systems;
