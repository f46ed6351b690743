// src/input.rs
//! Physical bindings -> semantic actions.

use bevy::input::{keyboard::KeyCode, ButtonInput};
use bevy::prelude::*;

use crate::actions::{ActionState, PlayerAction};

pub fn input_mapping_system(
    keys: Res<ButtonInput<KeyCode>>,
    mut action_state: ResMut<ActionState>,
) {
    action_state.set(
        PlayerAction::ThrustUp,
        keys.pressed(KeyCode::KeyW) || keys.pressed(KeyCode::ArrowUp),
    );
    action_state.set(
        PlayerAction::ThrustDown,
        keys.pressed(KeyCode::KeyS) || keys.pressed(KeyCode::ArrowDown),
    );
    action_state.set(
        PlayerAction::ThrustLeft,
        keys.pressed(KeyCode::KeyA) || keys.pressed(KeyCode::ArrowLeft),
    );
    action_state.set(
        PlayerAction::ThrustRight,
        keys.pressed(KeyCode::KeyD) || keys.pressed(KeyCode::ArrowRight),
    );
}
