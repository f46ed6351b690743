// src/spawner/area.rs
//! Rotatable/scalable rectangular spawn region.
//!
//! A zone is authored in local space (`half_extents` around `offset`) and
//! paired with its entity's `Transform`. Sampling always happens in local
//! unrotated space and is mapped through the transform exactly once, so the
//! debug outline and the sampled footprint agree bit-for-bit.

use bevy::prelude::*;
use rand::Rng;

/// Rectangular spawn region in the owning entity's local space.
#[derive(Component, Clone, Copy, Debug, PartialEq)]
pub struct SpawnZone {
    /// Half width / half height of the local rectangle. Never negative.
    pub half_extents: Vec2,
    /// Local-space center of the rectangle.
    pub offset: Vec2,
}

impl SpawnZone {
    pub fn new(half_extents: Vec2, offset: Vec2) -> Self {
        Self {
            half_extents: half_extents.max(Vec2::ZERO),
            offset,
        }
    }

    /// Uniform draw from the local rectangle, offset applied. Independent
    /// across calls; nothing is cached. Degenerate extents collapse to the
    /// line/point they describe.
    pub fn sample_local(&self, rng: &mut impl Rng) -> Vec2 {
        Vec2::new(
            sample_axis(rng, self.half_extents.x),
            sample_axis(rng, self.half_extents.y),
        ) + self.offset
    }

    /// Map a local point through the zone transform: scale, then rotation,
    /// then translation. Scale therefore stretches the rectangle itself,
    /// not just the point.
    pub fn to_world(transform: &Transform, local: Vec2) -> Vec2 {
        transform.transform_point(local.extend(0.0)).truncate()
    }

    /// Draw a local point and map it to world space in one go.
    pub fn sample_world(&self, transform: &Transform, rng: &mut impl Rng) -> Vec2 {
        Self::to_world(transform, self.sample_local(rng))
    }

    /// The four local corners pushed through the same mapping sampling
    /// uses; the gizmo outline is built from these.
    pub fn world_corners(&self, transform: &Transform) -> [Vec2; 4] {
        let h = self.half_extents;
        [
            Self::to_world(transform, self.offset + Vec2::new(-h.x, -h.y)),
            Self::to_world(transform, self.offset + Vec2::new(h.x, -h.y)),
            Self::to_world(transform, self.offset + Vec2::new(h.x, h.y)),
            Self::to_world(transform, self.offset + Vec2::new(-h.x, h.y)),
        ]
    }

    pub fn contains_local(&self, local: Vec2) -> bool {
        let d = local - self.offset;
        d.x.abs() <= self.half_extents.x && d.y.abs() <= self.half_extents.y
    }

    /// Inverse-map a world point and test it against the local rectangle.
    pub fn contains_world(&self, transform: &Transform, world: Vec2) -> bool {
        let local = transform
            .compute_affine()
            .inverse()
            .transform_point3(world.extend(0.0))
            .truncate();
        self.contains_local(local)
    }
}

#[inline]
fn sample_axis(rng: &mut impl Rng, half: f32) -> f32 {
    if half > 0.0 {
        rng.random_range(-half..half)
    } else {
        0.0
    }
}
