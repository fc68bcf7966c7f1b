//! Bullet lifecycle: spawning from the player's muzzle, flight, impact and
//! retirement.
//!
//! A bullet is `Moving` until it hits something (`Colliding`, playing its hit
//! animation) or leaves the camera view by more than the despawn margin.
//! `Inactive` bullets are despawned by the update pass.

use raylib::prelude::{Rectangle, Vector2};

use crate::components::gameobject::{BulletData, BulletState, GameObject, ObjectKind};
use crate::game::{self, anim, tex};
use crate::resources::gameconfig::GameConfig;
use crate::resources::simrng::SimRng;
use crate::systems::physics;
use crate::systems::update::StepContext;

/// Horizontal muzzle offset from the owner's position when facing left.
pub const MUZZLE_LEFT: f32 = 4.0;
/// Horizontal muzzle offset from the owner's position when facing right.
pub const MUZZLE_RIGHT: f32 = 28.0;

/// Build a bullet leaving `owner`'s muzzle.
///
/// Horizontal speed is `direction * (owner_vx + muzzle_speed)`; the vertical
/// component is a random spread.
pub fn spawn_bullet(owner: &GameObject, config: &GameConfig, rng: &mut SimRng) -> GameObject {
    let direction = owner.direction;
    let t = (direction + 1.0) * 0.5;
    let x_offset = MUZZLE_LEFT + (MUZZLE_RIGHT - MUZZLE_LEFT) * t;
    let position = Vector2 {
        x: owner.position.x + x_offset,
        y: owner.position.y + owner.sprite_size.y * 0.5 + 1.0,
    };
    let velocity = Vector2 {
        x: direction * (owner.velocity.x + config.muzzle_speed),
        y: rng.centered(config.bullet_spread),
    };
    log::debug!(
        "bullet spawned at ({:.1}, {:.1}) velocity ({:.1}, {:.1})",
        position.x,
        position.y,
        velocity.x,
        velocity.y
    );
    game::bullet_object(position, direction, velocity, config)
}

/// Stop a moving bullet and switch it to its hit animation.
pub fn begin_impact(obj: &mut GameObject) {
    if let ObjectKind::Bullet(data) = &mut obj.kind {
        data.state = BulletState::Colliding;
    }
    obj.velocity = Vector2::zero();
    obj.texture = Some(tex::BULLET_HIT);
    obj.play_from_start(anim::BULLET_HIT);
}

pub fn is_inactive(obj: &GameObject) -> bool {
    matches!(
        obj.kind,
        ObjectKind::Bullet(BulletData {
            state: BulletState::Inactive
        })
    )
}

fn grown(rect: Rectangle, margin: f32) -> Rectangle {
    Rectangle::new(
        rect.x - margin,
        rect.y - margin,
        rect.width + margin * 2.0,
        rect.height + margin * 2.0,
    )
}

fn contains(rect: &Rectangle, point: Vector2) -> bool {
    point.x >= rect.x
        && point.x <= rect.x + rect.width
        && point.y >= rect.y
        && point.y <= rect.y + rect.height
}

pub fn step_bullet(obj: &mut GameObject, ctx: &StepContext) {
    let ObjectKind::Bullet(mut data) = obj.kind else {
        return;
    };
    if data.state == BulletState::Moving {
        let bounds = grown(ctx.view, ctx.config.despawn_margin);
        if !contains(&bounds, obj.position) {
            log::debug!(
                "bullet left the view at ({:.1}, {:.1})",
                obj.position.x,
                obj.position.y
            );
            data.state = BulletState::Inactive;
        }
    }
    obj.kind = ObjectKind::Bullet(data);

    physics::accelerate(obj, 0.0, ctx.dt);
    physics::integrate_position(obj, ctx.dt);
}
