// src/collision.rs
//! Circle-based collision primitives: layers, colliders, and the flat
//! overlap scan the spawner and contact systems query against. This is not
//! a physics engine; every check is a synchronous point/circle test.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Named collision layers. RON configs refer to these; runtime code works
/// with the packed [`CollisionMask`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CollisionLayer {
    Player,
    Pickup,
    Hazard,
}

impl CollisionLayer {
    pub const fn bit(self) -> u32 {
        match self {
            CollisionLayer::Player => 1 << 0,
            CollisionLayer::Pickup => 1 << 1,
            CollisionLayer::Hazard => 1 << 2,
        }
    }
}

/// Bitmask of collision layers (fast filter).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct CollisionMask(pub u32);

impl CollisionMask {
    pub const NONE: Self = Self(0);

    pub fn from_layers(layers: &[CollisionLayer]) -> Self {
        Self(layers.iter().fold(0, |acc, l| acc | l.bit()))
    }

    pub fn contains(self, layer: CollisionLayer) -> bool {
        (self.0 & layer.bit()) != 0
    }

    pub fn intersects(self, other: Self) -> bool {
        (self.0 & other.0) != 0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
}

/// World-space circle attached to an entity. Radii are authored in world
/// units; entity scale is not applied.
#[derive(Component, Clone, Copy, Debug)]
pub struct CircleCollider {
    pub radius: f32,
    pub layers: CollisionMask,
}

#[inline]
pub fn circles_overlap(a: Vec2, ra: f32, b: Vec2, rb: f32) -> bool {
    let reach = ra + rb;
    a.distance_squared(b) <= reach * reach
}

/// Flat copy of the live colliders, taken once per scan so a whole pass
/// works against one consistent picture. Placements made mid-pass can be
/// pushed in so later queries see them before the ECS does.
#[derive(Clone, Debug, Default)]
pub struct ColliderSnapshot {
    items: Vec<(Vec2, f32, CollisionMask)>,
}

impl ColliderSnapshot {
    pub fn collect<'a>(
        iter: impl Iterator<Item = (&'a Transform, &'a CircleCollider)>,
    ) -> Self {
        Self {
            items: iter
                .map(|(tf, col)| (tf.translation.truncate(), col.radius, col.layers))
                .collect(),
        }
    }

    pub fn push(&mut self, center: Vec2, radius: f32, layers: CollisionMask) {
        self.items.push((center, radius, layers));
    }

    /// Does a circle at `point` touch any collider on a layer in `mask`?
    pub fn any_hit(&self, point: Vec2, radius: f32, mask: CollisionMask) -> bool {
        self.items
            .iter()
            .any(|&(c, r, layers)| layers.intersects(mask) && circles_overlap(point, radius, c, r))
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_from_layers() {
        let mask = CollisionMask::from_layers(&[CollisionLayer::Player, CollisionLayer::Hazard]);
        assert!(mask.contains(CollisionLayer::Player));
        assert!(mask.contains(CollisionLayer::Hazard));
        assert!(!mask.contains(CollisionLayer::Pickup));
        assert!(!mask.is_empty());
        assert!(CollisionMask::NONE.is_empty());
    }

    #[test]
    fn test_mask_intersects() {
        let a = CollisionMask::from_layers(&[CollisionLayer::Pickup]);
        let b = CollisionMask::from_layers(&[CollisionLayer::Pickup, CollisionLayer::Player]);
        let c = CollisionMask::from_layers(&[CollisionLayer::Hazard]);
        assert!(a.intersects(b));
        assert!(!a.intersects(c));
        assert!(!a.intersects(CollisionMask::NONE));
    }

    #[test]
    fn test_circles_overlap_boundary() {
        let a = Vec2::ZERO;
        let b = Vec2::new(3.0, 0.0);
        // Touching exactly counts as overlap.
        assert!(circles_overlap(a, 1.5, b, 1.5));
        assert!(circles_overlap(a, 2.0, b, 1.5));
        assert!(!circles_overlap(a, 1.0, b, 1.5));
    }

    #[test]
    fn test_snapshot_respects_mask() {
        let mut snap = ColliderSnapshot::default();
        snap.push(
            Vec2::ZERO,
            1.0,
            CollisionMask::from_layers(&[CollisionLayer::Pickup]),
        );

        let near = Vec2::new(0.5, 0.0);
        assert!(snap.any_hit(near, 0.5, CollisionMask::from_layers(&[CollisionLayer::Pickup])));
        // Same spot, different layer: no hit.
        assert!(!snap.any_hit(near, 0.5, CollisionMask::from_layers(&[CollisionLayer::Hazard])));
        // Empty mask never hits.
        assert!(!snap.any_hit(near, 0.5, CollisionMask::NONE));
        // Out of reach.
        assert!(!snap.any_hit(Vec2::new(10.0, 0.0), 0.5, CollisionMask::from_layers(&[CollisionLayer::Pickup])));
    }
}
