// src/pickup.rs
//! Fuel cans: floating refuel charges the ship collects by touch.

use bevy::ecs::entity_disabling::Disabled;
use bevy::prelude::*;

use crate::collision::{circles_overlap, CircleCollider};
use crate::ship::{FuelTank, Ship};

/// A collectible fuel charge. Spawner-created; consumed on contact when the
/// tank has room for any of it.
#[derive(Component, Clone, Copy, Debug)]
pub struct FuelCan {
    pub amount: f32,
    /// Despawn when collected; otherwise the entity is disabled in place,
    /// which counts as dead to its spawner all the same.
    pub despawn_on_pickup: bool,
}

/// Fired when the ship actually takes fuel from a can.
#[derive(Event, Clone, Copy)]
pub struct FuelCollected {
    pub can: Entity,
    pub added: f32,
}

/// Touch check between the ship and every live can. A can with more fuel
/// than the tank can hold still pours everything in one go; a can touching
/// a full tank stays put for later.
pub fn collect_fuel_cans(
    mut commands: Commands,
    mut ship: Query<(&Transform, &CircleCollider, &mut FuelTank), With<Ship>>,
    cans: Query<(Entity, &Transform, &CircleCollider, &FuelCan)>,
    mut collected: EventWriter<FuelCollected>,
) {
    let Ok((ship_tf, ship_col, mut tank)) = ship.single_mut() else {
        return;
    };
    let ship_pos = ship_tf.translation.truncate();

    for (entity, can_tf, can_col, can) in &cans {
        let can_pos = can_tf.translation.truncate();
        if !circles_overlap(ship_pos, ship_col.radius, can_pos, can_col.radius) {
            continue;
        }

        let added = tank.refuel(can.amount);
        if added <= 0.0 {
            continue;
        }

        debug!("pickup: +{added:.1} fuel from {entity:?}");
        collected.write(FuelCollected { can: entity, added });
        if can.despawn_on_pickup {
            commands.entity(entity).despawn();
        } else {
            commands.entity(entity).insert(Disabled);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collision::{CollisionLayer, CollisionMask};

    fn pickup_app() -> App {
        let mut app = App::new();
        app.add_event::<FuelCollected>()
            .add_systems(Update, collect_fuel_cans);
        app
    }

    fn spawn_ship_at(app: &mut App, pos: Vec2, tank: FuelTank) -> Entity {
        app.world_mut()
            .spawn((
                Ship::default(),
                tank,
                Transform::from_translation(pos.extend(0.0)),
                CircleCollider {
                    radius: 0.6,
                    layers: CollisionMask::from_layers(&[CollisionLayer::Player]),
                },
            ))
            .id()
    }

    fn spawn_can_at(app: &mut App, pos: Vec2, can: FuelCan) -> Entity {
        app.world_mut()
            .spawn((
                can,
                Transform::from_translation(pos.extend(0.0)),
                CircleCollider {
                    radius: 0.4,
                    layers: CollisionMask::from_layers(&[CollisionLayer::Pickup]),
                },
            ))
            .id()
    }

    #[test]
    fn test_touching_can_refuels_and_despawns() {
        let mut app = pickup_app();
        let mut tank = FuelTank::new(100.0, 1.5);
        tank.consume(40.0);
        let ship = spawn_ship_at(&mut app, Vec2::ZERO, tank);
        let can = spawn_can_at(
            &mut app,
            Vec2::new(0.5, 0.0),
            FuelCan { amount: 25.0, despawn_on_pickup: true },
        );

        app.update();

        assert_eq!(app.world().get::<FuelTank>(ship).unwrap().fuel, 85.0);
        assert!(app.world().get_entity(can).is_err());
        assert_eq!(app.world().resource::<Events<FuelCollected>>().len(), 1);
    }

    #[test]
    fn test_full_tank_leaves_the_can_in_place() {
        let mut app = pickup_app();
        let ship = spawn_ship_at(&mut app, Vec2::ZERO, FuelTank::new(100.0, 1.5));
        let can = spawn_can_at(
            &mut app,
            Vec2::new(0.5, 0.0),
            FuelCan { amount: 25.0, despawn_on_pickup: true },
        );

        app.update();

        assert_eq!(app.world().get::<FuelTank>(ship).unwrap().fuel, 100.0);
        assert!(app.world().get_entity(can).is_ok());
        assert!(app.world().resource::<Events<FuelCollected>>().is_empty());
    }

    #[test]
    fn test_keepable_can_is_disabled_not_despawned() {
        let mut app = pickup_app();
        let mut tank = FuelTank::new(100.0, 1.5);
        tank.consume(40.0);
        let ship = spawn_ship_at(&mut app, Vec2::ZERO, tank);
        let can = spawn_can_at(
            &mut app,
            Vec2::new(0.5, 0.0),
            FuelCan { amount: 10.0, despawn_on_pickup: false },
        );

        app.update();

        assert!(app.world().get_entity(can).is_ok());
        assert!(app.world().get::<Disabled>(can).is_some());

        // Disabled cans are invisible to the contact query; no double pour.
        app.update();
        assert_eq!(app.world().get::<FuelTank>(ship).unwrap().fuel, 70.0);
    }

    #[test]
    fn test_refuel_rearms_an_empty_tank_on_pickup() {
        let mut app = pickup_app();
        let mut tank = FuelTank::new(100.0, 1.5);
        tank.consume(100.0);
        let ship = spawn_ship_at(&mut app, Vec2::ZERO, tank);
        spawn_can_at(
            &mut app,
            Vec2::new(0.5, 0.0),
            FuelCan { amount: 25.0, despawn_on_pickup: true },
        );

        app.update();

        let tank = app.world().get::<FuelTank>(ship).unwrap();
        assert_eq!(tank.fuel, 25.0);
        assert!(!tank.is_empty());
    }
}
