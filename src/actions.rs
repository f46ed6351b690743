// src/actions.rs
//! Semantic input actions, decoupled from the physical bindings.

use bevy::prelude::*;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlayerAction {
    ThrustUp,
    ThrustDown,
    ThrustLeft,
    ThrustRight,
}

#[derive(Default, Resource)]
pub struct ActionState {
    pressed: HashMap<PlayerAction, bool>,
}

impl ActionState {
    pub fn set(&mut self, action: PlayerAction, is_pressed: bool) {
        self.pressed.insert(action, is_pressed);
    }

    pub fn pressed(&self, action: PlayerAction) -> bool {
        *self.pressed.get(&action).unwrap_or(&false)
    }

    /// Thrust direction the held actions add up to, unit length or zero.
    pub fn thrust_axis(&self) -> Vec2 {
        let mut dir = Vec2::ZERO;
        if self.pressed(PlayerAction::ThrustUp) {
            dir += Vec2::Y;
        }
        if self.pressed(PlayerAction::ThrustDown) {
            dir -= Vec2::Y;
        }
        if self.pressed(PlayerAction::ThrustRight) {
            dir += Vec2::X;
        }
        if self.pressed(PlayerAction::ThrustLeft) {
            dir -= Vec2::X;
        }
        dir.normalize_or_zero()
    }
}
