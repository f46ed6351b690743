// src/hud.rs
//! In-run HUD: fuel bar + readout on the left, race clock on the right.

use bevy::color::Mix;
use bevy::prelude::*;

use crate::race::RaceClock;
use crate::ship::{FuelTank, Ship};

const FULL_COLOR: Srgba = Srgba::new(0.2, 0.9, 0.2, 1.0);
const MID_COLOR: Srgba = Srgba::new(1.0, 0.85, 0.2, 1.0);
const LOW_COLOR: Srgba = Srgba::new(1.0, 0.25, 0.2, 1.0);
/// Below this fill fraction the bar goes red and blinks (reserve).
const LOW_FUEL_THRESHOLD: f32 = 0.2;
const MID_FUEL_THRESHOLD: f32 = 0.6;

#[derive(Component)]
pub struct HudRoot;

#[derive(Component)]
pub struct FuelBarFill;

#[derive(Component)]
pub struct FuelLabel;

#[derive(Component)]
pub struct ClockLabel;

pub fn spawn_hud(mut commands: Commands) {
    commands
        .spawn((
            Name::new("hud"),
            Node {
                position_type: PositionType::Absolute,
                width: Val::Percent(100.0),
                padding: UiRect::all(Val::Px(12.0)),
                justify_content: JustifyContent::SpaceBetween,
                align_items: AlignItems::FlexStart,
                ..default()
            },
            HudRoot,
        ))
        .with_children(|parent| {
            parent
                .spawn(Node {
                    flex_direction: FlexDirection::Column,
                    row_gap: Val::Px(6.0),
                    ..default()
                })
                .with_children(|fuel| {
                    fuel.spawn((
                        Text::new("FUEL"),
                        TextFont { font_size: 22.0, ..default() },
                        TextColor(Color::WHITE),
                        FuelLabel,
                    ));
                    fuel.spawn((
                        Node {
                            width: Val::Px(260.0),
                            height: Val::Px(16.0),
                            padding: UiRect::all(Val::Px(2.0)),
                            ..default()
                        },
                        BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.6)),
                    ))
                    .with_children(|bar| {
                        bar.spawn((
                            Node {
                                width: Val::Percent(100.0),
                                height: Val::Percent(100.0),
                                ..default()
                            },
                            BackgroundColor(FULL_COLOR.into()),
                            FuelBarFill,
                        ));
                    });
                });

            parent.spawn((
                Text::new("01:00"),
                TextFont { font_size: 28.0, ..default() },
                TextColor(Color::WHITE),
                ClockLabel,
            ));
        });
}

pub fn despawn_hud(mut commands: Commands, query: Query<Entity, With<HudRoot>>) {
    for entity in &query {
        commands.entity(entity).despawn();
    }
}

pub fn update_fuel_readout(
    time: Res<Time>,
    ships: Query<&FuelTank, With<Ship>>,
    mut fill: Query<(&mut Node, &mut BackgroundColor), With<FuelBarFill>>,
    mut labels: Query<&mut Text, With<FuelLabel>>,
) {
    let Ok(tank) = ships.single() else {
        return;
    };
    let fraction = tank.fraction();

    if let Ok((mut node, mut color)) = fill.single_mut() {
        node.width = Val::Percent(fraction * 100.0);
        let mut target = tier_color(fraction);
        if fraction < LOW_FUEL_THRESHOLD {
            // Reserve blink, ~4 Hz.
            let t = ping_pong(time.elapsed_secs() * 4.0);
            let dim = Srgba::new(target.red * 0.4, target.green * 0.4, target.blue * 0.4, 1.0);
            target = dim.mix(&target, t);
        }
        color.0 = target.into();
    }

    if let Ok(mut text) = labels.single_mut() {
        text.0 = fuel_label(tank);
    }
}

pub fn update_clock_readout(
    clock: Res<RaceClock>,
    mut labels: Query<(&mut Text, &mut TextColor), With<ClockLabel>>,
) {
    let Ok((mut text, mut color)) = labels.single_mut() else {
        return;
    };
    text.0 = clock.label();
    color.0 = if clock.is_low() {
        Color::srgb(1.0, 0.0, 0.0)
    } else {
        Color::WHITE
    };
}

fn tier_color(fraction: f32) -> Srgba {
    if fraction < LOW_FUEL_THRESHOLD {
        LOW_COLOR
    } else if fraction < MID_FUEL_THRESHOLD {
        MID_COLOR
    } else {
        FULL_COLOR
    }
}

fn fuel_label(tank: &FuelTank) -> String {
    let mut label = format!(
        "FUEL {}/{}",
        tank.fuel.ceil() as i64,
        tank.max_fuel.ceil() as i64
    );
    if tank.is_empty() {
        label.push_str(" (DRY)");
    }
    label
}

/// Triangle wave over `0.0..=1.0` with period 2.
fn ping_pong(t: f32) -> f32 {
    let t = t.rem_euclid(2.0);
    if t > 1.0 {
        2.0 - t
    } else {
        t
    }
}
