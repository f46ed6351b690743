// src/setup.rs
//! Arena bounds and the fixed 2D camera.

use bevy::prelude::*;
use bevy::render::camera::ScalingMode;

#[derive(Component)]
pub struct MainCamera;

/// Rectangular playfield the ship is boxed into. Zones in the registry are
/// authored against these bounds.
#[derive(Resource, Clone, Copy, Debug)]
pub struct Arena {
    pub half_extents: Vec2,
}

impl Default for Arena {
    fn default() -> Self {
        Self { half_extents: Vec2::new(24.0, 13.5) }
    }
}

pub fn setup(mut commands: Commands, arena: Res<Arena>) {
    // Fixed camera showing the whole arena plus a small margin, whatever
    // the window shape.
    let view = arena.half_extents * 2.0 + Vec2::splat(2.0);
    commands.spawn((
        Camera2d,
        Projection::from(OrthographicProjection {
            scaling_mode: ScalingMode::AutoMin {
                min_width: view.x,
                min_height: view.y,
            },
            ..OrthographicProjection::default_2d()
        }),
        MainCamera,
    ));

    // Arena floor, drawn under everything.
    commands.spawn((
        Name::new("arena floor"),
        Sprite::from_color(Color::srgb(0.05, 0.06, 0.1), arena.half_extents * 2.0),
        Transform::from_translation(Vec3::new(0.0, 0.0, -1.0)),
    ));
}
