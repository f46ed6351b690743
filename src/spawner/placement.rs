// src/spawner/placement.rs
//! Bounded rejection-sampling search for a free spawn slot.

use bevy::prelude::*;
use rand::Rng;

use super::area::SpawnZone;
use super::core::{OverlapQuery, Placement, PlacementRequest};

/// Search `zone` for a slot satisfying the request. Draws at most
/// `max_attempts` candidates, so a fully congested zone costs a fixed,
/// known amount per call. `None` is an ordinary outcome under congestion;
/// callers back off and retry, they do not treat it as an error.
pub fn try_place(
    zone: &SpawnZone,
    zone_tf: &Transform,
    req: &PlacementRequest,
    overlaps: &dyn OverlapQuery,
    rng: &mut impl Rng,
) -> Option<Placement> {
    let budget = req.max_attempts.max(1);

    for _ in 0..budget {
        let world = zone.sample_world(zone_tf, rng);

        // 1) Keep clear of the player.
        if let Some(player) = req.player {
            if world.distance(player) < req.min_player_distance {
                continue;
            }
        }

        // 2) Keep clear of anything already occupying the slot.
        if req.overlap_radius > 0.0
            && !req.overlap_mask.is_empty()
            && overlaps.hit(world, req.overlap_radius, req.overlap_mask)
        {
            continue;
        }

        let rotation = if req.random_rotation {
            Quat::from_rotation_z(rng.random_range(0.0..std::f32::consts::TAU))
        } else {
            Quat::IDENTITY
        };
        return Some(Placement { position: world, rotation });
    }

    debug!("placement: no free slot within {budget} attempts");
    None
}
