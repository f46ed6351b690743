// src/ui.rs
//! Menu and game-over overlays, and the button that (re)starts a run.

use bevy::prelude::*;
use bevy::ui::BackgroundColor;

use crate::state::{GameOverReason, GameState};

const NORMAL_BUTTON: Color = Color::srgb(0.15, 0.15, 0.15);
const HOVERED_BUTTON: Color = Color::srgb(0.25, 0.25, 0.25);
const PRESSED_BUTTON: Color = Color::srgb(0.35, 0.65, 0.35);

#[derive(Component)]
pub struct MenuOverlay;

#[derive(Component)]
pub struct GameOverOverlay;

/// Both overlays' buttons do the same thing: start a fresh run.
#[derive(Component)]
pub struct StartButton;

pub fn spawn_menu_overlay(mut commands: Commands) {
    commands
        .spawn((
            overlay_node(),
            BackgroundColor(Color::linear_rgba(0.0, 0.0, 0.0, 0.7)),
            MenuOverlay,
        ))
        .with_children(|parent| {
            parent.spawn((
                Text::new("REDLINE"),
                TextFont { font_size: 72.0, ..default() },
                TextLayout::new_with_justify(JustifyText::Center),
                TextColor(Color::WHITE),
            ));
            parent.spawn((
                Text::new("Collect fuel cans. Dodge mines. Outlast the clock."),
                TextFont { font_size: 22.0, ..default() },
                TextLayout::new_with_justify(JustifyText::Center),
                TextColor(Color::srgb(0.8, 0.8, 0.8)),
            ));
            spawn_start_button(parent, "START");
        });
}

pub fn despawn_menu_overlay(mut commands: Commands, query: Query<Entity, With<MenuOverlay>>) {
    for entity in &query {
        commands.entity(entity).despawn();
    }
}

pub fn spawn_game_over_overlay(mut commands: Commands, reason: Option<Res<GameOverReason>>) {
    let headline = match reason.as_deref().copied() {
        Some(GameOverReason::OutOfFuel) => "OUT OF FUEL",
        Some(GameOverReason::TimeUp) => "TIME UP",
        None => "RUN OVER",
    };

    commands
        .spawn((
            overlay_node(),
            BackgroundColor(Color::linear_rgba(0.0, 0.0, 0.0, 0.7)),
            GameOverOverlay,
        ))
        .with_children(|parent| {
            parent.spawn((
                Text::new(headline),
                TextFont { font_size: 64.0, ..default() },
                TextLayout::new_with_justify(JustifyText::Center),
                TextColor(Color::srgb(1.0, 0.4, 0.3)),
            ));
            spawn_start_button(parent, "RETRY");
        });
}

pub fn despawn_game_over_overlay(
    mut commands: Commands,
    query: Query<Entity, With<GameOverOverlay>>,
) {
    for entity in &query {
        commands.entity(entity).despawn();
    }
}

pub fn start_button_system(
    mut interactions: Query<
        (&Interaction, &mut BackgroundColor),
        (Changed<Interaction>, With<StartButton>),
    >,
    mut next_state: ResMut<NextState<GameState>>,
) {
    for (interaction, mut color) in &mut interactions {
        match *interaction {
            Interaction::Pressed => {
                color.0 = PRESSED_BUTTON;
                next_state.set(GameState::Running);
            }
            Interaction::Hovered => color.0 = HOVERED_BUTTON,
            Interaction::None => color.0 = NORMAL_BUTTON,
        }
    }
}

// Fullscreen centered column shared by both overlays.
fn overlay_node() -> Node {
    Node {
        position_type: PositionType::Absolute,
        width: Val::Percent(100.0),
        height: Val::Percent(100.0),
        flex_direction: FlexDirection::Column,
        justify_content: JustifyContent::Center,
        align_items: AlignItems::Center,
        row_gap: Val::Px(18.0),
        ..default()
    }
}

fn spawn_start_button(parent: &mut ChildSpawnerCommands, label: &str) {
    parent
        .spawn((
            Button,
            Node {
                width: Val::Px(200.0),
                height: Val::Px(56.0),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                ..default()
            },
            BackgroundColor(NORMAL_BUTTON),
            StartButton,
        ))
        .with_children(|button| {
            button.spawn((
                Text::new(label),
                TextFont { font_size: 28.0, ..default() },
                TextColor(Color::WHITE),
            ));
        });
}
