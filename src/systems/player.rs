//! Player controller: input-driven state machine, weapon and sprite selection.
//!
//! States:
//! - `Idle`: brakes toward a standstill; a horizontal key starts `Walking`.
//! - `Walking`: accelerates along the input; releasing both keys goes `Idle`.
//! - `Jumping`: entered on a jump press while grounded; left on landing.
//!
//! Firing works in every state while the weapon cooldown has timed out.

use crate::components::gameobject::{GameObject, ObjectKind, PlayerData, PlayerState};
use crate::game::{anim, tex};
use crate::resources::simrng::SimRng;
use crate::systems::bullet;
use crate::systems::physics;
use crate::systems::update::StepContext;

/// Advance the player one step. Returns a bullet to spawn, if one was fired.
pub fn step_player(
    obj: &mut GameObject,
    ctx: &StepContext,
    rng: &mut SimRng,
) -> Option<GameObject> {
    let ObjectKind::Player(mut data) = obj.kind else {
        return None;
    };
    let dt = ctx.dt;
    let input = ctx.input;

    data.weapon_timer.step(dt);
    physics::apply_gravity(obj, ctx.config.gravity, dt);

    let drive = input.input_direction();
    if drive != 0.0 {
        obj.direction = drive;
    }

    if input.jump.just_pressed && obj.grounded && data.state != PlayerState::Jumping {
        obj.velocity.y += ctx.config.jump_impulse;
        data.state = PlayerState::Jumping;
        log::debug!("player jumped from y {:.1}", obj.position.y);
    }

    match data.state {
        PlayerState::Idle => {
            if drive != 0.0 {
                data.state = PlayerState::Walking;
            } else {
                physics::decelerate(obj, dt);
            }
        }
        PlayerState::Walking | PlayerState::Running => {
            if drive == 0.0 {
                data.state = PlayerState::Idle;
            }
        }
        PlayerState::Jumping => {}
    }

    let mut fired = None;
    if input.fire.active && data.weapon_timer.is_timeout() {
        data.weapon_timer.reset();
        fired = Some(bullet::spawn_bullet(obj, ctx.config, rng));
    }

    obj.kind = ObjectKind::Player(data);
    select_visuals(obj, &data);

    physics::accelerate(obj, drive, dt);
    physics::integrate_position(obj, dt);
    fired
}

/// Leave the jump once the ground sensor reports a landing.
pub fn on_landed(obj: &mut GameObject) {
    if let ObjectKind::Player(data) = &mut obj.kind {
        if data.state == PlayerState::Jumping {
            data.state = PlayerState::Walking;
        }
    }
}

/// Whether the player is braking against its own facing.
fn is_sliding(obj: &GameObject) -> bool {
    obj.grounded && obj.direction * obj.velocity.x < 0.0
}

fn select_visuals(obj: &mut GameObject, data: &PlayerData) {
    let shooting = !data.weapon_timer.is_timeout();
    let (texture, animation) = match data.state {
        PlayerState::Idle if shooting => (tex::PLAYER_SHOOT, anim::PLAYER_SHOOT),
        PlayerState::Idle => (tex::PLAYER_IDLE, anim::PLAYER_IDLE),
        PlayerState::Walking | PlayerState::Running => match (is_sliding(obj), shooting) {
            (true, true) => (tex::PLAYER_SLIDE_SHOOT, anim::PLAYER_SLIDE_SHOOT),
            (true, false) => (tex::PLAYER_SLIDE, anim::PLAYER_SLIDE),
            (false, true) => (tex::PLAYER_RUN_SHOOT, anim::PLAYER_RUN),
            (false, false) => (tex::PLAYER_RUN, anim::PLAYER_RUN),
        },
        PlayerState::Jumping => (tex::PLAYER_JUMP, anim::PLAYER_JUMP),
    };
    obj.texture = Some(texture);
    if obj.current_animation != Some(animation) {
        obj.set_animation(Some(animation));
    }
}
