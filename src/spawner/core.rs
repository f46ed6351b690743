// src/spawner/core.rs
//! Core types/traits for constrained spawn placement.
//! Keep this file dependency-light; it should compile before the registry
//! and system impls.

use bevy::prelude::*;

use crate::collision::{ColliderSnapshot, CollisionMask};

/// Global session seed; changing this reshuffles every spawner's sampling.
#[derive(Resource, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct WorldSeed(pub u64);

/// Everything a placement search needs to know, detached from any entity.
#[derive(Clone, Copy, Debug)]
pub struct PlacementRequest {
    /// Player position, if one exists. `None` drops the distance rule.
    pub player: Option<Vec2>,
    /// Accepted slots keep at least this far from the player.
    pub min_player_distance: f32,
    /// Clearance circle tested against `overlap_mask`. Zero disables the check.
    pub overlap_radius: f32,
    /// Layers that block a slot.
    pub overlap_mask: CollisionMask,
    /// Sampling budget per search; at least 1 is always spent.
    pub max_attempts: u32,
    /// Spin accepted instances to a uniform random Z angle.
    pub random_rotation: bool,
}

/// An accepted spawn slot.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Placement {
    pub position: Vec2,
    pub rotation: Quat,
}

/// "Does a circle of `radius` at `point` intersect anything in `mask`?"
/// Supplied by the collision layer; treated as authoritative and free of
/// side effects.
pub trait OverlapQuery {
    fn hit(&self, point: Vec2, radius: f32, mask: CollisionMask) -> bool;
}

impl OverlapQuery for ColliderSnapshot {
    fn hit(&self, point: Vec2, radius: f32, mask: CollisionMask) -> bool {
        self.any_hit(point, radius, mask)
    }
}
