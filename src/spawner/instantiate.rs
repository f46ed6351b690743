// src/spawner/instantiate.rs
//! Turns an accepted placement into a live entity for a template.

use bevy::prelude::*;

use crate::collision::{CircleCollider, CollisionMask};
use crate::hazard::Mine;
use crate::pickup::FuelCan;
use crate::spawner::components::Spawned;
use crate::spawner::core::Placement;
use crate::spawner::registry::{SpriteDef, TemplateDef};

/// Z layer for spawned pickups/hazards; the ship renders above them.
pub const INSTANCE_Z: f32 = 1.0;

/// Spawn one instance of `template` at the accepted slot. The caller owns
/// registering the returned entity with its spawner's population.
pub fn instantiate(
    commands: &mut Commands,
    spawner_name: &str,
    template: &TemplateDef,
    sprite: &SpriteDef,
    placement: Placement,
) -> Entity {
    let collider = CircleCollider {
        radius: sprite.size * 0.5,
        layers: CollisionMask::from_layers(&[template.collision_layer()]),
    };
    let mut entity = commands.spawn((
        Name::new(format!("spawn:{spawner_name}")),
        Sprite::from_color(sprite.color(), Vec2::splat(sprite.size)),
        Transform {
            translation: placement.position.extend(INSTANCE_Z),
            rotation: placement.rotation,
            ..default()
        },
        Spawned,
        collider,
    ));

    match *template {
        TemplateDef::FuelCan { amount, despawn_on_pickup } => {
            entity.insert(FuelCan { amount, despawn_on_pickup });
        }
        TemplateDef::Mine { fuel_loss, hit_cooldown, destroy_on_hit } => {
            entity.insert(Mine {
                fuel_loss,
                hit_cooldown,
                destroy_on_hit,
                last_hit: None,
            });
        }
    }

    entity.id()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collision::CollisionLayer;

    fn spawn_in(world: &mut World, template: TemplateDef) -> Entity {
        let sprite = SpriteDef { color: [0.2, 0.9, 0.2], size: 0.8 };
        let placement = Placement {
            position: Vec2::new(3.0, -1.5),
            rotation: Quat::from_rotation_z(0.5),
        };
        let id = {
            let mut commands = world.commands();
            instantiate(&mut commands, "cans", &template, &sprite, placement)
        };
        world.flush();
        id
    }

    #[test]
    fn test_fuel_can_instance_carries_pickup_kit() {
        let mut world = World::new();
        let id = spawn_in(
            &mut world,
            TemplateDef::FuelCan { amount: 25.0, despawn_on_pickup: true },
        );

        assert!(world.get::<Spawned>(id).is_some());
        let can = world.get::<FuelCan>(id).unwrap();
        assert_eq!(can.amount, 25.0);

        let collider = world.get::<CircleCollider>(id).unwrap();
        assert_eq!(collider.radius, 0.4);
        assert!(collider.layers.contains(CollisionLayer::Pickup));
        assert!(!collider.layers.contains(CollisionLayer::Hazard));

        let tf = world.get::<Transform>(id).unwrap();
        assert_eq!(tf.translation.truncate(), Vec2::new(3.0, -1.5));
    }

    #[test]
    fn test_mine_instance_carries_hazard_kit() {
        let mut world = World::new();
        let id = spawn_in(
            &mut world,
            TemplateDef::Mine { fuel_loss: 15.0, hit_cooldown: 0.2, destroy_on_hit: true },
        );

        let mine = world.get::<Mine>(id).unwrap();
        assert_eq!(mine.fuel_loss, 15.0);
        assert!(mine.last_hit.is_none());

        let collider = world.get::<CircleCollider>(id).unwrap();
        assert!(collider.layers.contains(CollisionLayer::Hazard));
    }
}
