//! Engine systems.
//!
//! This module groups the ECS systems and the per-object step functions that
//! advance the simulation, read input and render.
//!
//! Submodules overview
//! - [`animation`] – advance sprite animations and hit flashes, settle finished strips
//! - [`bullet`] – bullet spawning, flight and retirement
//! - [`camera`] – keep the camera on the player
//! - [`collision`] – overlap tests, per-type responses and ground sensing
//! - [`enemy`] – enemy state machine and damage
//! - [`input`] – read hardware input and update [`crate::resources::input::InputState`]
//! - [`physics`] – gravity, braking, acceleration and integration of one object
//! - [`player`] – player state machine, weapon and sprite selection
//! - [`render`] – draw list and the Raylib render pass
//! - [`time`] – update simulation time and delta
//! - [`update`] – the ordered per-object update pass

pub mod animation;
pub mod bullet;
pub mod camera;
pub mod collision;
pub mod enemy;
pub mod input;
pub mod physics;
pub mod player;
pub mod render;
pub mod time;
pub mod update;
