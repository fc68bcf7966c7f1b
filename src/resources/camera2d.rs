//! Shared 2D camera resource.
//!
//! Wraps raylib's [`raylib::prelude::Camera2D`] so that the update pass and
//! the renderer agree on a single world/screen transform. The camera target
//! is the centre of the view in world space; the offset places that point at
//! the centre of the window and the zoom scales logical pixels to window
//! pixels.

use bevy_ecs::prelude::Resource;
use raylib::prelude::{Camera2D, Rectangle, Vector2};

use super::screensize::ScreenSize;

/// ECS resource that holds the active 2D camera parameters.
#[derive(Resource, Clone, Copy, Debug)]
pub struct Camera2DRes(pub Camera2D);

impl Camera2DRes {
    /// Camera centred on `target`, mapping the logical `screen` onto a
    /// window of `window_width` x `window_height` pixels.
    pub fn new(target: Vector2, screen: ScreenSize, window_width: u32, window_height: u32) -> Self {
        let zoom = if screen.w > 0 {
            window_width as f32 / screen.w as f32
        } else {
            1.0
        };
        Camera2DRes(Camera2D {
            target,
            offset: Vector2 {
                x: window_width as f32 * 0.5,
                y: window_height as f32 * 0.5,
            },
            rotation: 0.0,
            zoom,
        })
    }

    /// World-space rectangle visible through the camera.
    pub fn view_rect(&self, screen: ScreenSize) -> Rectangle {
        let w = screen.w as f32;
        let h = screen.h as f32;
        Rectangle::new(self.0.target.x - w * 0.5, self.0.target.y - h * 0.5, w, h)
    }
}
