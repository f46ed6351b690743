// src/ship/plugin.rs
//! Ship plugin wiring (glue).
//! - Fuel events shared with pickups/hazards/race clock
//! - Spawn/despawn on run boundaries
//! - Steering + passive burn while running

use bevy::prelude::*;

use crate::ship::systems::{despawn_ship, drain_fuel, spawn_ship, steer_ship};
use crate::state::GameState;

/// Fired once per dry-out, by whichever drain took the tank to zero.
#[derive(Event, Clone, Copy)]
pub struct FuelEmptied;

/// Fired when something knocks fuel out of the tank (not the passive burn).
#[derive(Event, Clone, Copy)]
pub struct FuelHit {
    pub amount: f32,
}

pub struct ShipPlugin;

impl Plugin for ShipPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<FuelEmptied>()
            .add_event::<FuelHit>()
            .add_systems(OnEnter(GameState::Running), spawn_ship)
            .add_systems(OnExit(GameState::Running), despawn_ship)
            .add_systems(
                Update,
                (
                    steer_ship.run_if(in_state(GameState::Running)),
                    drain_fuel.after(steer_ship).run_if(in_state(GameState::Running)),
                ),
            );
    }
}
