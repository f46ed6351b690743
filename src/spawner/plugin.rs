// src/spawner/plugin.rs
//! Spawner plugin wiring (glue).
//! - Registry asset/loader
//! - WorldSeed + settings
//! - Arm/tick/cleanup scheduling around the Running state

use bevy::prelude::*;

use crate::spawner::core::WorldSeed;
use crate::spawner::registry::{SpawnerRegistry, SpawnerRegistryAssetPlugin};
use crate::spawner::systems::{
    arm_spawners, cleanup_run_entities, draw_zone_gizmos, registry_ready, tick_spawners,
};
use crate::state::GameState;

/// Configure where the registry manifest lives and the world seed.
#[derive(Resource, Clone)]
pub struct SpawnerSettings {
    pub registry_path: String,
    pub world_seed: u64,
    /// Outline spawn zones with gizmos.
    pub draw_zones: bool,
}

impl Default for SpawnerSettings {
    fn default() -> Self {
        Self {
            registry_path: "arena.spawner.ron".to_string(),
            world_seed: 1337,
            draw_zones: false,
        }
    }
}

/// Handle to the loaded SpawnerRegistry asset.
#[derive(Resource, Default)]
pub struct SpawnerRegistryHandle(pub Handle<SpawnerRegistry>);

pub struct SpawnerPlugin;

impl Plugin for SpawnerPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(SpawnerRegistryAssetPlugin)
            .init_resource::<SpawnerSettings>()
            .init_resource::<SpawnerRegistryHandle>()
            .add_systems(Startup, (init_world_seed_from_settings, load_registry))
            .add_systems(Update, monitor_registry_ready)
            .add_systems(
                Update,
                (
                    arm_spawners
                        .run_if(in_state(GameState::Running))
                        .run_if(registry_ready),
                    tick_spawners
                        .after(arm_spawners)
                        .run_if(in_state(GameState::Running)),
                    draw_zone_gizmos.run_if(in_state(GameState::Running)),
                ),
            )
            .add_systems(OnExit(GameState::Running), cleanup_run_entities);
    }
}

/// Startup: insert WorldSeed based on SpawnerSettings.
fn init_world_seed_from_settings(mut commands: Commands, settings: Res<SpawnerSettings>) {
    commands.insert_resource(WorldSeed(settings.world_seed));
}

/// Startup: request loading the registry manifest, store handle.
fn load_registry(
    mut handle_res: ResMut<SpawnerRegistryHandle>,
    settings: Res<SpawnerSettings>,
    assets: Res<AssetServer>,
) {
    if handle_res.0.is_strong() {
        return;
    }
    let h: Handle<SpawnerRegistry> = assets.load(settings.registry_path.as_str());
    handle_res.0 = h;
    info!(
        "spawner: loading registry from '{}', world_seed={}",
        settings.registry_path, settings.world_seed
    );
}

/// Update: log once when the registry becomes available.
fn monitor_registry_ready(
    handle_res: Res<SpawnerRegistryHandle>,
    registries: Res<Assets<SpawnerRegistry>>,
    mut logged: Local<bool>,
) {
    if *logged {
        return;
    }
    if let Some(registry) = registries.get(&handle_res.0) {
        *logged = true;
        info!("spawner: registry loaded with {} defs", registry.spawners.len());
    }
}
