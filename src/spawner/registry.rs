// src/spawner/registry.rs
//! Data-driven spawner definitions + loader.

use bevy::asset::{io::Reader, AssetLoader, LoadContext};
use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::collision::CollisionLayer;
use crate::spawner::area::SpawnZone;

// ---------- Public plugin to register asset+loader ----------

pub struct SpawnerRegistryAssetPlugin;

impl Plugin for SpawnerRegistryAssetPlugin {
    fn build(&self, app: &mut App) {
        app.init_asset::<SpawnerRegistry>()
            .register_asset_loader(SpawnerRegistryLoader);
    }
}

// ---------- Spawn template (data form) ----------

/// What a spawner actually produces when a placement is accepted.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum TemplateDef {
    FuelCan {
        #[serde(default = "default_fuel_amount")]
        amount: f32,
        #[serde(default = "default_true")]
        despawn_on_pickup: bool,
    },
    Mine {
        #[serde(default = "default_fuel_loss")]
        fuel_loss: f32,
        #[serde(default = "default_hit_cooldown")]
        hit_cooldown: f32,
        #[serde(default = "default_true")]
        destroy_on_hit: bool,
    },
}

impl TemplateDef {
    /// Collision layer instances of this template occupy.
    pub fn collision_layer(&self) -> CollisionLayer {
        match self {
            TemplateDef::FuelCan { .. } => CollisionLayer::Pickup,
            TemplateDef::Mine { .. } => CollisionLayer::Hazard,
        }
    }
}

fn default_fuel_amount() -> f32 {
    25.0
}
fn default_fuel_loss() -> f32 {
    15.0
}
fn default_hit_cooldown() -> f32 {
    0.2
}
fn default_true() -> bool {
    true
}

// ---------- Visual (data form) ----------

/// Flat-color quad; enough to tell templates apart without art assets.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SpriteDef {
    pub color: [f32; 3],
    #[serde(default = "default_sprite_size")]
    pub size: f32,
}

fn default_sprite_size() -> f32 {
    1.0
}

impl SpriteDef {
    pub fn color(&self) -> Color {
        Color::srgb(self.color[0], self.color[1], self.color[2])
    }
}

// ---------- Zone placement in the arena (data form) ----------

/// Where the spawner's zone entity sits, plus the zone's local shape.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ZoneDef {
    #[serde(default)]
    pub center: [f32; 2],
    #[serde(default)]
    pub rotation_deg: f32,
    #[serde(default = "default_scale")]
    pub scale: [f32; 2],
    pub half_extents: [f32; 2],
    #[serde(default)]
    pub offset: [f32; 2],
}

fn default_scale() -> [f32; 2] {
    [1.0, 1.0]
}

impl ZoneDef {
    pub fn zone(&self) -> SpawnZone {
        SpawnZone::new(
            Vec2::from_array(self.half_extents),
            Vec2::from_array(self.offset),
        )
    }

    pub fn transform(&self) -> Transform {
        Transform {
            translation: Vec2::from_array(self.center).extend(0.0),
            rotation: Quat::from_rotation_z(self.rotation_deg.to_radians()),
            scale: Vec2::from_array(self.scale).extend(1.0),
        }
    }
}

// ---------- Spawner definition (data form) ----------

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SpawnerDef {
    /// Unique human-readable name (used for lookup and logs).
    pub name: String,

    /// What to spawn.
    pub template: TemplateDef,

    /// How instances look.
    pub sprite: SpriteDef,

    /// Where placements may land.
    pub zone: ZoneDef,

    /// Hard ceiling on concurrently live instances.
    #[serde(default = "default_max_alive")]
    pub max_alive: u32,

    /// Instances placed up front when the spawner arms.
    #[serde(default = "default_initial_spawn")]
    pub initial_spawn: u32,

    /// Seconds between successful spawns.
    #[serde(default = "default_spawn_interval")]
    pub spawn_interval: f32,

    /// Short retry delay after a failed placement search.
    #[serde(default = "default_retry_backoff")]
    pub retry_backoff: f32,

    /// Give each instance a random Z rotation.
    #[serde(default)]
    pub random_rotation: bool,

    /// Keep placements at least this far from the player.
    #[serde(default = "default_min_player_distance")]
    pub min_player_distance: f32,

    /// Probe radius for the clearance check; 0 disables it.
    #[serde(default = "default_overlap_radius")]
    pub overlap_radius: f32,

    /// Layers the clearance probe collides with; empty disables it.
    #[serde(default)]
    pub overlap_mask: Vec<CollisionLayer>,

    /// Placement attempts per spawn before giving up.
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
}

fn default_max_alive() -> u32 {
    10
}
fn default_initial_spawn() -> u32 {
    5
}
fn default_spawn_interval() -> f32 {
    2.0
}
fn default_retry_backoff() -> f32 {
    0.25
}
fn default_min_player_distance() -> f32 {
    3.0
}
fn default_overlap_radius() -> f32 {
    0.5
}
fn default_max_attempts() -> u32 {
    20
}

// ---------- Runtime registry asset ----------

#[derive(Asset, TypePath, Clone)]
pub struct SpawnerRegistry {
    /// Ordered list; index in this vector identifies the def.
    pub spawners: Vec<SpawnerDef>,
    /// Name → index, unique by construction.
    pub name_to_index: HashMap<String, u32>,
}

/// Validate a parsed def list and build the lookup table.
///
/// Split out of the loader so the checks are testable without asset-server
/// machinery.
pub fn build_registry(defs: Vec<SpawnerDef>) -> Result<SpawnerRegistry, SpawnerRegistryLoadError> {
    let mut name_to_index = HashMap::with_capacity(defs.len());
    for (i, def) in defs.iter().enumerate() {
        if def.spawn_interval <= 0.0 {
            return Err(SpawnerRegistryLoadError::InvalidInterval {
                name: def.name.clone(),
                value: def.spawn_interval,
            });
        }
        if def.retry_backoff <= 0.0 {
            return Err(SpawnerRegistryLoadError::InvalidBackoff {
                name: def.name.clone(),
                value: def.retry_backoff,
            });
        }
        if let Some(prev) = name_to_index.insert(def.name.clone(), i as u32) {
            return Err(SpawnerRegistryLoadError::DuplicateName {
                name: def.name.clone(),
                first: prev,
                second: i as u32,
            });
        }
    }

    Ok(SpawnerRegistry { spawners: defs, name_to_index })
}

// ---------- Asset loader for `.spawner.ron` ----------

#[derive(Default)]
pub struct SpawnerRegistryLoader;

impl AssetLoader for SpawnerRegistryLoader {
    type Asset = SpawnerRegistry;
    type Settings = ();
    type Error = SpawnerRegistryLoadError;

    fn extensions(&self) -> &[&str] {
        &["spawner.ron"]
    }

    // NOTE: match the trait exactly: no explicit lifetimes, no LoadContext<'a>
    async fn load(
        &self,
        reader: &mut dyn Reader,
        _settings: &Self::Settings,
        _load_context: &mut LoadContext<'_>,
    ) -> Result<Self::Asset, Self::Error> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes).await?;
        let defs: Vec<SpawnerDef> =
            ron::de::from_bytes(&bytes).map_err(|e| SpawnerRegistryLoadError::Ron(e.to_string()))?;

        build_registry(defs)
    }
}

// ---------- Loader errors ----------

#[derive(thiserror::Error, Debug)]
pub enum SpawnerRegistryLoadError {
    #[error("I/O while reading registry: {0}")]
    Io(#[from] std::io::Error),
    #[error("RON parse error: {0}")]
    Ron(String),
    #[error("Duplicate spawner name '{name}' (first idx {first}, second idx {second})")]
    DuplicateName { name: String, first: u32, second: u32 },
    #[error("Spawner '{name}' has non-positive spawn_interval {value}")]
    InvalidInterval { name: String, value: f32 },
    #[error("Spawner '{name}' has non-positive retry_backoff {value}")]
    InvalidBackoff { name: String, value: f32 },
}
