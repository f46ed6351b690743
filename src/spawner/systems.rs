// src/spawner/systems.rs
//! Spawner scheduling: arming from the registry, the per-frame census /
//! countdown / placement pass, and the zone debug overlay.

use bevy::ecs::entity_disabling::Disabled;
use bevy::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::collision::{CircleCollider, ColliderSnapshot, CollisionMask};
use crate::ship::Ship;
use crate::spawner::area::SpawnZone;
use crate::spawner::components::{PlacementRng, SpawnCadence, Spawned, Spawner};
use crate::spawner::core::WorldSeed;
use crate::spawner::instantiate::instantiate;
use crate::spawner::placement::try_place;
use crate::spawner::plugin::{SpawnerRegistryHandle, SpawnerSettings};
use crate::spawner::registry::SpawnerRegistry;
use crate::spawner::tracker::Population;

const ZONE_COLOR: Color = Color::srgba(0.0, 1.0, 0.6, 0.35);

/// Run condition: the registry asset has finished loading.
pub fn registry_ready(
    handle: Res<SpawnerRegistryHandle>,
    registries: Res<Assets<SpawnerRegistry>>,
) -> bool {
    registries.get(&handle.0).is_some()
}

/// Create one zone entity per registry def at the start of a run. Re-arming
/// an already armed world is a no-op, so this can sit in `Update` and wait
/// for the registry without double-spawning.
pub fn arm_spawners(
    mut commands: Commands,
    handle: Res<SpawnerRegistryHandle>,
    registries: Res<Assets<SpawnerRegistry>>,
    seed: Res<WorldSeed>,
    existing: Query<(), With<Spawner>>,
    mut runs: Local<u32>,
) {
    if !existing.is_empty() {
        return;
    }
    let Some(registry) = registries.get(&handle.0) else { return };

    *runs += 1;
    for (index, def) in registry.spawners.iter().enumerate() {
        commands.spawn((
            Name::new(format!("spawner:{}", def.name)),
            Spawner::from_def(def),
            def.zone.zone(),
            def.zone.transform(),
            SpawnCadence::armed(),
            PlacementRng(rng_for(*seed, index as u64, *runs as u64)),
            Population::default(),
        ));
    }
    info!(
        "spawner: armed {} spawners (run {}, seed {})",
        registry.spawners.len(),
        *runs,
        seed.0
    );
}

/// Per-spawner stream: world seed, registry slot, and run number, so every
/// run reshuffles but replays exactly under the same seed.
fn rng_for(seed: WorldSeed, index: u64, run: u64) -> ChaCha8Rng {
    let mix = seed.0 ^ (index << 32) ^ (run << 16) ^ 0x9E37_79B9_7F4A_7C15u64;
    ChaCha8Rng::seed_from_u64(mix)
}

/// The heart of the spawner: census, countdown, placement.
///
/// All placement probes in one pass share a single collider snapshot, and
/// every accepted slot is pushed into it immediately. Spawn commands are
/// deferred by the ECS, so without the snapshot two same-frame placements
/// could not see each other.
pub fn tick_spawners(
    mut commands: Commands,
    time: Res<Time>,
    players: Query<&Transform, With<Ship>>,
    colliders: Query<(&Transform, &CircleCollider)>,
    live: Query<(), With<Spawned>>,
    mut spawners: Query<(
        &SpawnZone,
        &Transform,
        &Spawner,
        &mut SpawnCadence,
        &mut PlacementRng,
        &mut Population,
    )>,
) {
    let dt = time.delta_secs();
    let player = players.single().ok().map(|tf| tf.translation.truncate());
    let mut snapshot = ColliderSnapshot::collect(colliders.iter());

    for (zone, zone_tf, spawner, mut cadence, mut rng, mut population) in &mut spawners {
        // 1) Census: forget instances that despawned or were disabled.
        let alive = population.sweep_and_count(|e| live.contains(e));

        // 2) First tick after arming runs the seeding batch.
        if !cadence.seeded {
            cadence.seeded = true;
            let target = spawner.initial_batch();
            let mut placed = 0;
            for _ in 0..target {
                if spawn_one(
                    &mut commands,
                    &mut snapshot,
                    zone,
                    zone_tf,
                    spawner,
                    player,
                    &mut rng.0,
                    &mut population,
                ) {
                    placed += 1;
                }
            }
            info!("spawner '{}': seeded {placed}/{target}", spawner.name);
            cadence.reset_full(spawner.spawn_interval);
            continue;
        }

        // 3) At the cap the countdown freezes; a freed slot resumes it.
        if alive >= spawner.max_alive as usize {
            continue;
        }

        // 4) Countdown. One placement search per due tick, no catch-up.
        if !cadence.tick(dt) {
            continue;
        }
        if spawn_one(
            &mut commands,
            &mut snapshot,
            zone,
            zone_tf,
            spawner,
            player,
            &mut rng.0,
            &mut population,
        ) {
            cadence.reset_full(spawner.spawn_interval);
        } else {
            debug!("spawner '{}': no slot found, backing off", spawner.name);
            cadence.reset_backoff(spawner.spawn_interval, spawner.retry_backoff);
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn spawn_one(
    commands: &mut Commands,
    snapshot: &mut ColliderSnapshot,
    zone: &SpawnZone,
    zone_tf: &Transform,
    spawner: &Spawner,
    player: Option<Vec2>,
    rng: &mut ChaCha8Rng,
    population: &mut Population,
) -> bool {
    let request = spawner.request(player);
    let Some(placement) = try_place(zone, zone_tf, &request, &*snapshot, rng) else {
        return false;
    };

    let entity = instantiate(
        commands,
        &spawner.name,
        &spawner.template,
        &spawner.sprite,
        placement,
    );
    population.register(entity);
    // Make this slot visible to every later probe in the same pass.
    snapshot.push(
        placement.position,
        spawner.instance_radius(),
        CollisionMask::from_layers(&[spawner.template.collision_layer()]),
    );
    true
}

/// Outline every zone, through the same transform path placements use, so
/// what you see is exactly where samples can land.
pub fn draw_zone_gizmos(
    settings: Res<SpawnerSettings>,
    mut gizmos: Gizmos,
    zones: Query<(&SpawnZone, &Transform), With<Spawner>>,
) {
    if !settings.draw_zones {
        return;
    }
    for (zone, zone_tf) in &zones {
        let [a, b, c, d] = zone.world_corners(zone_tf);
        gizmos.linestrip_2d([a, b, c, d, a], ZONE_COLOR);
    }
}

/// Tear down a run: zone entities and every instance they produced,
/// including disabled husks the default query filters would hide.
pub fn cleanup_run_entities(
    mut commands: Commands,
    zones: Query<Entity, With<Spawner>>,
    instances: Query<(Entity, Has<Disabled>), With<Spawned>>,
) {
    for entity in &zones {
        commands.entity(entity).despawn();
    }
    let mut removed = 0;
    for (entity, _) in &instances {
        commands.entity(entity).despawn();
        removed += 1;
    }
    if removed > 0 {
        info!("spawner: cleared {removed} spawned entities");
    }
}
