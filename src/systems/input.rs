//! Input systems.
//!
//! - [`update_input_state`] reads the keyboard from Raylib each frame and
//!   writes the results into [`crate::resources::input::InputState`].
//! - [`toggle_debug_mode`] flips the [`DebugMode`] marker when the debug key
//!   is pressed.
//!
//! Headless runs skip these and feed [`InputState`] from a recorded trace.
use bevy_ecs::prelude::*;

use crate::resources::debugmode::DebugMode;
use crate::resources::input::{BoolState, InputState};

fn poll(state: &mut BoolState, rl: &raylib::RaylibHandle) {
    let down = rl.is_key_down(state.key_binding);
    state.update(down);
}

/// Poll Raylib for keyboard input and update the `InputState` resource.
pub fn update_input_state(mut input: ResMut<InputState>, rl: NonSend<raylib::RaylibHandle>) {
    poll(&mut input.move_left, &rl);
    poll(&mut input.move_right, &rl);
    poll(&mut input.jump, &rl);
    poll(&mut input.fire, &rl);
    poll(&mut input.mode_debug, &rl);
}

pub fn toggle_debug_mode(
    input: Res<InputState>,
    debug: Option<Res<DebugMode>>,
    mut commands: Commands,
) {
    if !input.mode_debug.just_pressed {
        return;
    }
    if debug.is_some() {
        log::info!("Debug mode off");
        commands.remove_resource::<DebugMode>();
    } else {
        log::info!("Debug mode on");
        commands.insert_resource(DebugMode {});
    }
}
