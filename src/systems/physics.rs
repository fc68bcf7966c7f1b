//! Per-object integration steps.
//!
//! These are plain functions over a single [`GameObject`] so the update pass
//! can call them in the order each kind needs:
//!
//! 1. [`apply_gravity`] while airborne
//! 2. kind-specific state logic (may call [`decelerate`])
//! 3. [`accelerate`] along the drive direction and clamp horizontal speed
//! 4. [`integrate_position`]
//!
//! Collision resolution runs afterwards, see [`crate::systems::collision`].

use crate::components::gameobject::GameObject;

/// Braking strength relative to the object's own acceleration.
pub const BRAKE_FACTOR: f32 = 1.5;

/// Add `gravity * dt` to the vertical velocity of an airborne dynamic object.
///
/// Grounded objects rest on their ground sensor and receive no increment.
pub fn apply_gravity(obj: &mut GameObject, gravity: f32, dt: f32) {
    if obj.dynamic && !obj.grounded {
        obj.velocity.y += gravity * dt;
    }
}

/// Push horizontal velocity toward zero without crossing it.
pub fn decelerate(obj: &mut GameObject, dt: f32) {
    if obj.velocity.x == 0.0 {
        return;
    }
    let amount = -obj.velocity.x.signum() * BRAKE_FACTOR * obj.acceleration.x * dt;
    if amount.abs() > obj.velocity.x.abs() {
        obj.velocity.x = 0.0;
    } else {
        obj.velocity.x += amount;
    }
}

/// Accelerate along `drive` (-1, 0 or 1) and clamp horizontal speed.
///
/// When the clamp triggers, velocity snaps to `drive * max_speed_x`, which is
/// zero for an undriven object.
pub fn accelerate(obj: &mut GameObject, drive: f32, dt: f32) {
    obj.velocity += obj.acceleration.scale_by(drive * dt);
    if obj.velocity.x.abs() > obj.max_speed_x {
        obj.velocity.x = drive * obj.max_speed_x;
    }
}

pub fn integrate_position(obj: &mut GameObject, dt: f32) {
    obj.position += obj.velocity.scale_by(dt);
}
