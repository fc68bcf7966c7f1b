//! Enemy behaviour: chase the player inside the aggro range, recoil when hit,
//! die when health runs out.

use crate::components::gameobject::{EnemyState, GameObject, ObjectKind};
use crate::game::{anim, tex};
use crate::systems::physics;
use crate::systems::update::StepContext;

pub fn step_enemy(obj: &mut GameObject, ctx: &StepContext) {
    let ObjectKind::Enemy(mut data) = obj.kind else {
        return;
    };
    let dt = ctx.dt;
    physics::apply_gravity(obj, ctx.config.gravity, dt);

    let mut drive = 0.0;
    match data.state {
        EnemyState::Idle | EnemyState::Walking => {
            let target = ctx.player_position.filter(|player| {
                let dx = player.x - obj.position.x;
                let dy = player.y - obj.position.y;
                (dx * dx + dy * dy).sqrt() < ctx.config.enemy_aggro_range
            });
            match target {
                Some(player) => {
                    drive = if player.x - obj.position.x < 0.0 {
                        -1.0
                    } else {
                        1.0
                    };
                    data.state = EnemyState::Walking;
                }
                None => {
                    obj.velocity.x = 0.0;
                    data.state = EnemyState::Idle;
                }
            }
        }
        EnemyState::Damaged => {
            if data.damaged_timer.step(dt) > 0 {
                data.state = EnemyState::Idle;
                obj.texture = Some(tex::ENEMY);
                obj.set_animation(Some(anim::ENEMY_WALK));
            }
        }
        EnemyState::Dead => {
            obj.velocity.x = 0.0;
        }
    }
    obj.kind = ObjectKind::Enemy(data);

    if drive != 0.0 {
        obj.direction = drive;
    }
    physics::accelerate(obj, drive, dt);
    physics::integrate_position(obj, dt);
}

/// Apply a bullet hit. `bullet_direction` is the facing of the bullet; the
/// enemy turns to face where it came from.
pub fn take_hit(obj: &mut GameObject, bullet_direction: f32, damage: i32) {
    let ObjectKind::Enemy(mut data) = obj.kind else {
        return;
    };
    if data.state == EnemyState::Dead {
        return;
    }

    obj.direction = -bullet_direction;
    obj.velocity.x = 0.0;
    obj.start_flash();
    data.state = EnemyState::Damaged;
    data.damaged_timer.reset();
    data.health -= damage;

    if data.health <= 0 {
        data.state = EnemyState::Dead;
        obj.texture = Some(tex::ENEMY_DIE);
        obj.play_from_start(anim::ENEMY_DIE);
        log::info!(
            "enemy died at ({:.1}, {:.1})",
            obj.position.x,
            obj.position.y
        );
    } else {
        obj.texture = Some(tex::ENEMY_HIT);
        obj.set_animation(Some(anim::ENEMY_HIT));
        log::debug!("enemy hit, health {}", data.health);
    }
    obj.kind = ObjectKind::Enemy(data);
}

/// Freeze a dead enemy on the last frame of its finished death animation.
pub fn settle_death(obj: &mut GameObject) {
    if !matches!(obj.enemy(), Some(data) if data.state == EnemyState::Dead) {
        return;
    }
    let Some(last) = obj
        .active_animation()
        .filter(|a| a.is_done())
        .map(|a| a.frame_count().saturating_sub(1))
    else {
        return;
    };
    obj.set_animation(None);
    obj.sprite_frame = last;
}
