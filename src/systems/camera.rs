//! Camera follow system.
//!
//! Keeps the player horizontally centred. The vertical framing is fixed to
//! the logical screen, since levels are a single screen tall.

use bevy_ecs::prelude::*;

use crate::components::gameobject::GameObject;
use crate::resources::camera2d::Camera2DRes;
use crate::resources::screensize::ScreenSize;

pub fn camera_follow(
    query: Query<&GameObject>,
    mut camera: ResMut<Camera2DRes>,
    screen: Res<ScreenSize>,
) {
    let Some(player) = query.iter().find(|obj| obj.player().is_some()) else {
        return;
    };
    camera.0.target.x = player.position.x + player.sprite_size.x * 0.5;
    camera.0.target.y = screen.h as f32 * 0.5;
}
