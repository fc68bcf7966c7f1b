//! Screen size resource.
//!
//! Stores the logical render resolution in pixels. The camera's view in world
//! space has exactly this size, whatever the window size is.

use bevy_ecs::prelude::Resource;

/// Logical screen size in pixels.
#[derive(Resource, Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScreenSize {
    /// Width in pixels.
    pub w: i32,
    /// Height in pixels.
    pub h: i32,
}
