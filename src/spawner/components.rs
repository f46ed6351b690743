// src/spawner/components.rs
//! Runtime ECS components for armed spawners and their instances.

use bevy::prelude::*;
use rand_chacha::ChaCha8Rng;

use crate::collision::CollisionMask;
use crate::spawner::core::PlacementRequest;
use crate::spawner::registry::{SpawnerDef, SpriteDef, TemplateDef};

/// An armed spawner. Copied out of the registry def when the zone entity is
/// created, so a registry reload never mutates a live spawner mid-run.
#[derive(Component, Clone, Debug)]
pub struct Spawner {
    pub name: String,
    pub template: TemplateDef,
    pub sprite: SpriteDef,
    pub max_alive: u32,
    pub initial_spawn: u32,
    pub spawn_interval: f32,
    pub retry_backoff: f32,
    pub random_rotation: bool,
    pub min_player_distance: f32,
    pub overlap_radius: f32,
    pub overlap_mask: CollisionMask,
    pub max_attempts: u32,
}

impl Spawner {
    pub fn from_def(def: &SpawnerDef) -> Self {
        Self {
            name: def.name.clone(),
            template: def.template.clone(),
            sprite: def.sprite.clone(),
            max_alive: def.max_alive,
            initial_spawn: def.initial_spawn,
            spawn_interval: def.spawn_interval,
            retry_backoff: def.retry_backoff,
            random_rotation: def.random_rotation,
            min_player_distance: def.min_player_distance,
            overlap_radius: def.overlap_radius,
            overlap_mask: CollisionMask::from_layers(&def.overlap_mask),
            max_attempts: def.max_attempts,
        }
    }

    /// How many instances to place up front. Never exceeds the cap.
    pub fn initial_batch(&self) -> u32 {
        self.initial_spawn.min(self.max_alive)
    }

    /// World radius an instance occupies, used when pushing fresh placements
    /// into the collider snapshot.
    pub fn instance_radius(&self) -> f32 {
        self.sprite.size * 0.5
    }

    pub fn request(&self, player: Option<Vec2>) -> PlacementRequest {
        PlacementRequest {
            player,
            min_player_distance: self.min_player_distance,
            overlap_radius: self.overlap_radius,
            overlap_mask: self.overlap_mask,
            max_attempts: self.max_attempts,
            random_rotation: self.random_rotation,
        }
    }
}

/// Countdown to the next spawn attempt.
///
/// The clock only runs while the spawner is below its cap; at the cap it
/// freezes, so a slot opening up still waits out whatever remained.
#[derive(Component, Clone, Copy, Debug)]
pub struct SpawnCadence {
    pub remaining: f32,
    pub seeded: bool,
}

impl SpawnCadence {
    /// Fresh cadence for a newly armed spawner; the first tick runs the
    /// seeding batch before any countdown starts.
    pub fn armed() -> Self {
        Self { remaining: 0.0, seeded: false }
    }

    /// Advance the countdown. Returns true when a spawn attempt is due.
    pub fn tick(&mut self, dt: f32) -> bool {
        self.remaining -= dt;
        self.remaining <= 0.0
    }

    /// A placement succeeded; wait a full interval.
    pub fn reset_full(&mut self, interval: f32) {
        self.remaining = interval;
    }

    /// The placement search came up empty; retry soon, but never sooner
    /// than a success would allow.
    pub fn reset_backoff(&mut self, interval: f32, backoff: f32) {
        self.remaining = backoff.min(interval);
    }
}

/// Per-spawner deterministic RNG stream. Seeded from the world seed and the
/// spawner's registry index, so runs replay exactly.
#[derive(Component)]
pub struct PlacementRng(pub ChaCha8Rng);

/// Marker on every entity a spawner created. Liveness checks count an
/// instance alive while it still has this marker and is not disabled.
#[derive(Component, Default, Clone, Copy, Debug)]
pub struct Spawned;
