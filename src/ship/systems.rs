// src/ship/systems.rs
//! Ship lifecycle, drift steering, and the passive fuel burn.

use bevy::prelude::*;
use std::f32::consts::{FRAC_PI_2, PI, TAU};

use crate::actions::ActionState;
use crate::collision::{CircleCollider, CollisionLayer, CollisionMask};
use crate::setup::Arena;
use crate::ship::components::{FuelTank, Ship, Velocity};
use crate::ship::plugin::FuelEmptied;

/// Ship renders above spawned instances.
const SHIP_Z: f32 = 2.0;
const SHIP_COLOR: Color = Color::srgb(0.85, 0.9, 1.0);

pub fn spawn_ship(mut commands: Commands) {
    commands.spawn((
        Name::new("ship"),
        Sprite::from_color(SHIP_COLOR, Vec2::new(0.9, 1.2)),
        Transform::from_translation(Vec3::new(0.0, 0.0, SHIP_Z)),
        Ship::default(),
        Velocity::default(),
        FuelTank::default(),
        CircleCollider {
            radius: 0.6,
            layers: CollisionMask::from_layers(&[CollisionLayer::Player]),
        },
    ));
    info!("ship: spawned at origin");
}

pub fn despawn_ship(mut commands: Commands, ships: Query<Entity, With<Ship>>) {
    for entity in &ships {
        commands.entity(entity).despawn();
    }
}

/// Drift steering: thrust accelerates, release coasts against friction, the
/// nose swings toward the velocity heading, and the arena edge is a wall.
pub fn steer_ship(
    time: Res<Time>,
    actions: Res<ActionState>,
    arena: Res<Arena>,
    mut ships: Query<(&Ship, &FuelTank, &mut Velocity, &mut Transform)>,
) {
    let dt = time.delta_secs();
    for (ship, tank, mut velocity, mut transform) in &mut ships {
        // A dry tank always cuts thrust; the flag only decides whether the
        // ship stops dead or coasts out on friction.
        let dry = tank.is_empty();
        let thrust = if dry { Vec2::ZERO } else { actions.thrust_axis() };

        if dry && ship.stop_on_empty {
            velocity.0 = Vec2::ZERO;
        } else if thrust != Vec2::ZERO {
            velocity.0 += thrust * ship.acceleration * dt;
            velocity.0 = velocity.0.clamp_length_max(ship.max_speed);
        } else {
            let ease = (ship.friction * dt).min(1.0);
            velocity.0 = velocity.0.lerp(Vec2::ZERO, ease);
        }

        let pos = (transform.translation.truncate() + velocity.0 * dt)
            .clamp(-arena.half_extents, arena.half_extents);
        transform.translation = pos.extend(transform.translation.z);

        // Swing the nose (sprite points +Y) toward where we are drifting.
        if velocity.length_squared() > 1e-4 {
            let target = velocity.y.atan2(velocity.x) - FRAC_PI_2;
            let current = transform.rotation.to_euler(EulerRot::ZYX).0;
            let step = ship.rotation_speed * dt;
            let turn = wrap_angle(target - current).clamp(-step, step);
            transform.rotation = Quat::from_rotation_z(current + turn);
        }
    }
}

/// Passive burn while the run is on. The empty edge is reported once; the
/// tank's latch keeps later frames quiet.
pub fn drain_fuel(
    time: Res<Time>,
    mut ships: Query<&mut FuelTank, With<Ship>>,
    mut emptied: EventWriter<FuelEmptied>,
) {
    for mut tank in &mut ships {
        let burn = tank.drain_per_second * time.delta_secs();
        if tank.consume(burn).emptied {
            info!("fuel: tank ran dry");
            emptied.write(FuelEmptied);
        }
    }
}

/// Map an angle difference onto `(-PI, PI]` so turns take the short way.
fn wrap_angle(angle: f32) -> f32 {
    let mut a = angle % TAU;
    if a > PI {
        a -= TAU;
    } else if a < -PI {
        a += TAU;
    }
    a
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::PlayerAction;
    use std::time::Duration;

    fn steering_app() -> App {
        let mut app = App::new();
        app.insert_resource(Time::<()>::default())
            .insert_resource(ActionState::default())
            .insert_resource(Arena::default())
            .add_systems(Update, steer_ship);
        app
    }

    fn hold(app: &mut App, action: PlayerAction) {
        app.world_mut().resource_mut::<ActionState>().set(action, true);
    }

    fn advance(app: &mut App, seconds: f32) {
        app.world_mut()
            .resource_mut::<Time>()
            .advance_by(Duration::from_secs_f32(seconds));
        app.update();
    }

    #[test]
    fn test_wrap_angle_takes_the_short_way() {
        assert!((wrap_angle(3.0 * PI) - PI).abs() < 1e-5);
        // The negative side lands on -PI, the same heading from the other way.
        assert!((wrap_angle(-3.0 * PI) + PI).abs() < 1e-5);
        assert!((wrap_angle(0.25) - 0.25).abs() < 1e-6);
        // 350 degrees of error is really -10.
        let a = wrap_angle(350f32.to_radians());
        assert!((a + 10f32.to_radians()).abs() < 1e-5);
    }

    #[test]
    fn test_thrust_caps_at_max_speed() {
        let mut app = steering_app();
        let ship = app
            .world_mut()
            .spawn((
                Ship::default(),
                FuelTank::default(),
                Velocity::default(),
                Transform::default(),
            ))
            .id();
        hold(&mut app, PlayerAction::ThrustUp);

        for _ in 0..100 {
            advance(&mut app, 0.1);
        }

        let velocity = app.world().get::<Velocity>(ship).unwrap();
        let max = Ship::default().max_speed;
        assert!(velocity.length() <= max + 1e-3);
        assert!(velocity.length() > max * 0.95);
    }

    #[test]
    fn test_coasting_bleeds_speed_off() {
        let mut app = steering_app();
        let ship = app
            .world_mut()
            .spawn((
                Ship::default(),
                FuelTank::default(),
                Velocity(Vec2::new(6.0, 0.0)),
                Transform::default(),
            ))
            .id();

        for _ in 0..50 {
            advance(&mut app, 0.1);
        }

        let velocity = app.world().get::<Velocity>(ship).unwrap();
        assert!(velocity.length() < 0.05, "still moving at {}", velocity.length());
    }

    #[test]
    fn test_dry_tank_stops_dead_when_flagged() {
        let mut app = steering_app();
        let mut tank = FuelTank::new(10.0, 1.5);
        tank.consume(10.0);
        let ship = app
            .world_mut()
            .spawn((
                Ship::default(),
                tank,
                Velocity(Vec2::new(6.0, 0.0)),
                Transform::default(),
            ))
            .id();
        hold(&mut app, PlayerAction::ThrustRight);

        advance(&mut app, 0.1);

        // Default config halts on the spot, held thrust or not.
        assert_eq!(app.world().get::<Velocity>(ship).unwrap().0, Vec2::ZERO);
        assert_eq!(app.world().get::<Transform>(ship).unwrap().translation.x, 0.0);
    }

    #[test]
    fn test_dry_tank_coasts_out_when_not_stopping() {
        let mut app = steering_app();
        let mut tank = FuelTank::new(10.0, 1.5);
        tank.consume(10.0);
        let ship = app
            .world_mut()
            .spawn((
                Ship {
                    stop_on_empty: false,
                    ..Ship::default()
                },
                tank,
                Velocity(Vec2::new(6.0, 0.0)),
                Transform::default(),
            ))
            .id();
        hold(&mut app, PlayerAction::ThrustRight);

        for _ in 0..10 {
            advance(&mut app, 0.1);
        }

        // Thrust stays cut either way; here friction winds the drift down
        // instead of a hard stop, so the ship still travels some distance.
        let velocity = app.world().get::<Velocity>(ship).unwrap();
        assert!(velocity.length() < 0.05, "still moving at {}", velocity.length());
        let x = app.world().get::<Transform>(ship).unwrap().translation.x;
        assert!(x > 0.5, "never drifted, x = {x}");
    }

    #[test]
    fn test_arena_edge_is_a_wall() {
        let mut app = steering_app();
        let ship = app
            .world_mut()
            .spawn((
                Ship::default(),
                FuelTank::default(),
                Velocity(Vec2::new(100.0, 0.0)),
                Transform::default(),
            ))
            .id();
        hold(&mut app, PlayerAction::ThrustRight);

        for _ in 0..40 {
            advance(&mut app, 0.1);
        }

        let x = app.world().get::<Transform>(ship).unwrap().translation.x;
        assert_eq!(x, Arena::default().half_extents.x);
    }

    #[test]
    fn test_drain_reports_the_empty_edge_once() {
        let mut app = App::new();
        app.add_event::<FuelEmptied>()
            .insert_resource(Time::<()>::default())
            .add_systems(Update, drain_fuel);
        let ship = app
            .world_mut()
            .spawn((Ship::default(), FuelTank::new(3.0, 1.5)))
            .id();

        app.world_mut()
            .resource_mut::<Time>()
            .advance_by(Duration::from_secs(1));
        app.update();
        let tank = app.world().get::<FuelTank>(ship).unwrap();
        assert!((tank.fuel - 1.5).abs() < 1e-4);
        assert!(app.world().resource::<Events<FuelEmptied>>().is_empty());

        app.world_mut()
            .resource_mut::<Time>()
            .advance_by(Duration::from_secs(2));
        app.update();
        let tank = app.world().get::<FuelTank>(ship).unwrap();
        assert!(tank.is_empty());
        assert_eq!(app.world().resource::<Events<FuelEmptied>>().len(), 1);
    }
}
