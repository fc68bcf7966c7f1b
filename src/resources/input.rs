//! Per-frame keyboard input resource.
//!
//! Captures the keys the game cares about and exposes them to systems via the
//! [`InputState`] resource. The state is sampled once per frame before the
//! update pass and stays constant during it. Defaults use A/D to move, K to
//! jump and J to fire.
use bevy_ecs::prelude::*;
use raylib::prelude::KeyboardKey;

#[derive(Debug, Clone, Copy)]
/// Boolean key state with an associated keyboard binding.
pub struct BoolState {
    /// Whether the key is currently held.
    pub active: bool,
    /// Whether the key went down this frame.
    pub just_pressed: bool,
    /// Whether the key went up this frame.
    pub just_released: bool,

    /// The key bound to this action.
    pub key_binding: KeyboardKey,
}

impl BoolState {
    pub fn bound_to(key_binding: KeyboardKey) -> Self {
        Self {
            key_binding,
            ..Self::default()
        }
    }

    /// Feed the held state for a new frame and derive the press/release edges.
    pub fn update(&mut self, down: bool) {
        self.just_pressed = down && !self.active;
        self.just_released = !down && self.active;
        self.active = down;
    }
}

impl Default for BoolState {
    fn default() -> Self {
        Self {
            active: false,
            just_pressed: false,
            just_released: false,
            key_binding: KeyboardKey::KEY_NULL,
        }
    }
}

/// Resource capturing the per-frame keyboard state relevant to gameplay.
#[derive(Resource, Debug, Clone)]
pub struct InputState {
    pub move_left: BoolState,
    pub move_right: BoolState,
    pub jump: BoolState,
    pub fire: BoolState,
    pub mode_debug: BoolState,
}

impl Default for InputState {
    fn default() -> Self {
        Self {
            move_left: BoolState::bound_to(KeyboardKey::KEY_A),
            move_right: BoolState::bound_to(KeyboardKey::KEY_D),
            jump: BoolState::bound_to(KeyboardKey::KEY_K),
            fire: BoolState::bound_to(KeyboardKey::KEY_J),
            mode_debug: BoolState::bound_to(KeyboardKey::KEY_F11),
        }
    }
}

impl InputState {
    /// Horizontal intent: -1 left, 1 right, 0 when neither or both are held.
    pub fn input_direction(&self) -> f32 {
        let mut direction = 0.0;
        if self.move_left.active {
            direction -= 1.0;
        }
        if self.move_right.active {
            direction += 1.0;
        }
        direction
    }
}
