use bevy::prelude::*;

mod setup;
mod input;
mod actions;
mod state;
mod ui;
mod collision;
mod hud;
mod race;
mod pickup;
mod hazard;
mod ship;
mod spawner;

// re-export the bits we actually need in main
use actions::ActionState;
use input::input_mapping_system;
use state::{end_run_on_events, GameState};
use ui::{
    despawn_game_over_overlay, despawn_menu_overlay, spawn_game_over_overlay,
    spawn_menu_overlay, start_button_system,
};
use hud::{despawn_hud, spawn_hud, update_clock_readout, update_fuel_readout};
use race::{halt_race, start_race, tick_race_clock, RaceClock, TimeExpired};
use pickup::{collect_fuel_cans, FuelCollected};
use hazard::{strike_ship, MineStruck};
use setup::Arena;
use ship::ShipPlugin;
use spawner::plugin::SpawnerSettings;
use spawner::SpawnerPlugin;

fn main() {
    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "REDLINE".to_string(),
                ..default()
            }),
            ..default()
        }))
        // your domain plugins
        .add_plugins(ShipPlugin)    // steering + the fuel tank
        .add_plugins(SpawnerPlugin) // cans & mines out of the registry
        // zone outlines are a dev aid; release builds keep them off
        .insert_resource(SpawnerSettings {
            draw_zones: cfg!(debug_assertions),
            ..default()
        })
        // init resources & game-state
        .init_resource::<ActionState>()
        .init_resource::<Arena>()
        .init_resource::<RaceClock>()
        .init_state::<GameState>()
        .add_event::<FuelCollected>()
        .add_event::<MineStruck>()
        .add_event::<TimeExpired>()
        // camera + arena floor
        .add_systems(Startup, setup::setup)
        // menu / game-over overlays
        .add_systems(OnEnter(GameState::Menu), spawn_menu_overlay)
        .add_systems(OnExit(GameState::Menu), despawn_menu_overlay)
        .add_systems(OnEnter(GameState::GameOver), spawn_game_over_overlay)
        .add_systems(OnExit(GameState::GameOver), despawn_game_over_overlay)
        // each run gets a fresh HUD and a fresh clock
        .add_systems(OnEnter(GameState::Running), (spawn_hud, start_race))
        .add_systems(OnExit(GameState::Running), (despawn_hud, halt_race))
        // buttons keep working in every state
        .add_systems(Update, start_button_system)
        // gameplay frame: contacts, then the clock, then the verdict
        .add_systems(
            Update,
            (
                input_mapping_system,
                collect_fuel_cans,
                strike_ship.after(collect_fuel_cans),
                tick_race_clock.after(strike_ship),
                end_run_on_events.after(tick_race_clock),
            )
                .run_if(in_state(GameState::Running)),
        )
        // HUD readouts track the tank and the clock
        .add_systems(
            Update,
            (update_fuel_readout, update_clock_readout).run_if(in_state(GameState::Running)),
        )
        .run();
}
