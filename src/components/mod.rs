//! ECS components for simulated objects.
//!
//! Submodules overview:
//! - [`animation`] – sprite-sheet strip driven by a wrapping timer
//! - [`boxcollider`] – axis-aligned hitbox in an object's local frame
//! - [`gameobject`] – the universal entity record and its per-kind payloads
//! - [`layer`] – draw/update layer, also selects the collision set
//! - [`timer`] – wrapping countdown used for animations and cooldowns

pub mod animation;
pub mod boxcollider;
pub mod gameobject;
pub mod layer;
pub mod timer;
