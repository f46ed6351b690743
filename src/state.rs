// src/state.rs
//! Top-level run state: menu -> running -> game over, and the system that
//! ends a run when the fuel or the clock gives out.

use bevy::prelude::*;

use crate::race::TimeExpired;
use crate::ship::FuelEmptied;

#[derive(States, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GameState {
    #[default]
    Menu,
    Running,
    GameOver,
}

/// Why the last run ended; drives the game-over overlay text.
#[derive(Resource, Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameOverReason {
    OutOfFuel,
    TimeUp,
}

/// End the run when the tank runs dry or the clock expires. A timeout also
/// drains the tank, so when both edges land on the same frame the timeout
/// is the cause worth reporting.
pub fn end_run_on_events(
    mut commands: Commands,
    mut emptied: EventReader<FuelEmptied>,
    mut expired: EventReader<TimeExpired>,
    mut next: ResMut<NextState<GameState>>,
) {
    let out_of_fuel = !emptied.is_empty();
    let timed_out = !expired.is_empty();
    emptied.clear();
    expired.clear();
    if !out_of_fuel && !timed_out {
        return;
    }

    let reason = if timed_out {
        GameOverReason::TimeUp
    } else {
        GameOverReason::OutOfFuel
    };
    info!("run over: {reason:?}");
    commands.insert_resource(reason);
    next.set(GameState::GameOver);
}
