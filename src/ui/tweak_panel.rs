//! Ball tweak panel UI components and systems

use bevy::prelude::*;

use crate::constants::*;
use crate::tuning::{BallTweaks, TuningPath, save_ball_tuning_to_file};

/// Tweak panel container component
#[derive(Component)]
pub struct TweakPanel;

/// Tweak row component with index
#[derive(Component)]
pub struct TweakRow(pub usize);

/// Spawn the (hidden) panel with one row per tunable value
pub fn spawn_tweak_panel(mut commands: Commands, tweaks: Res<BallTweaks>) {
    commands
        .spawn((
            Node {
                position_type: PositionType::Absolute,
                top: Val::Px(12.0),
                right: Val::Px(12.0),
                padding: UiRect::all(Val::Px(10.0)),
                flex_direction: FlexDirection::Column,
                row_gap: Val::Px(4.0),
                ..default()
            },
            BackgroundColor(PANEL_BACKGROUND),
            Visibility::Hidden,
            TweakPanel,
        ))
        .with_children(|parent| {
            parent.spawn((
                Text::new("Ball (F1 to close)"),
                TextFont {
                    font_size: 14.0,
                    ..default()
                },
                TextColor(TEXT_PRIMARY),
            ));
            parent.spawn((
                Text::new("Up/Down: select | Left/Right: +/-10%"),
                TextFont {
                    font_size: 12.0,
                    ..default()
                },
                TextColor(TEXT_SECONDARY),
            ));
            parent.spawn((
                Text::new("R: reset selected | Shift+R: reset all | S: save"),
                TextFont {
                    font_size: 12.0,
                    ..default()
                },
                TextColor(TEXT_SECONDARY),
            ));
            parent.spawn((
                Text::new(format!("Radius: {:.2}", tweaks.radius)),
                TextFont {
                    font_size: 13.0,
                    ..default()
                },
                TextColor(TEXT_SECONDARY),
            ));

            for (i, label) in BallTweaks::LABELS.iter().enumerate() {
                parent.spawn((
                    Text::new(format!("{}: ---", label)),
                    TextFont {
                        font_size: 13.0,
                        ..default()
                    },
                    TextColor(TEXT_PRIMARY),
                    TweakRow(i),
                ));
            }
        });
}

/// Toggle tweak panel visibility and handle input
pub fn toggle_tweak_panel(
    keyboard: Res<ButtonInput<KeyCode>>,
    path: Res<TuningPath>,
    mut tweaks: ResMut<BallTweaks>,
    mut panel_query: Query<&mut Visibility, With<TweakPanel>>,
) {
    // F1 toggles panel visibility
    if keyboard.just_pressed(KeyCode::F1) {
        tweaks.panel_visible = !tweaks.panel_visible;
        if let Ok(mut visibility) = panel_query.single_mut() {
            *visibility = if tweaks.panel_visible {
                Visibility::Inherited
            } else {
                Visibility::Hidden
            };
        }
    }

    // Only process input when panel is visible
    if !tweaks.panel_visible {
        return;
    }

    let num_params = BallTweaks::LABELS.len();

    if keyboard.just_pressed(KeyCode::ArrowUp) {
        tweaks.selected_index = (tweaks.selected_index + num_params - 1) % num_params;
    }
    if keyboard.just_pressed(KeyCode::ArrowDown) {
        tweaks.selected_index = (tweaks.selected_index + 1) % num_params;
    }

    let idx = tweaks.selected_index;
    let step = tweaks.get_step(idx);
    if keyboard.just_pressed(KeyCode::ArrowLeft) {
        let current = tweaks.get_value(idx);
        tweaks.set_value(idx, (current - step).max(0.0));
    }
    if keyboard.just_pressed(KeyCode::ArrowRight) {
        let current = tweaks.get_value(idx);
        tweaks.set_value(idx, current + step);
    }

    if keyboard.just_pressed(KeyCode::KeyR) {
        if keyboard.pressed(KeyCode::ShiftLeft) || keyboard.pressed(KeyCode::ShiftRight) {
            tweaks.reset_all();
        } else {
            tweaks.reset_value(idx);
        }
    }

    if keyboard.just_pressed(KeyCode::KeyS) {
        match save_ball_tuning_to_file(&path.0, &tweaks.to_tuning()) {
            Ok(()) => info!("Saved ball tuning to {}", path.0.display()),
            Err(err) => warn!("{}", err),
        }
    }
}

/// Update tweak panel display
pub fn update_tweak_panel(
    tweaks: Res<BallTweaks>,
    mut row_query: Query<(&mut Text, &mut TextColor, &TweakRow)>,
) {
    if !tweaks.panel_visible || !tweaks.is_changed() {
        return;
    }

    for (mut text, mut color, row) in &mut row_query {
        let value = tweaks.get_value(row.0);
        let label = BallTweaks::LABELS[row.0];

        text.0 = format!("{}: {:.2}", label, value);

        // Color priority: selected (yellow) > modified (red) > default (white)
        color.0 = if row.0 == tweaks.selected_index {
            TEXT_SELECTED
        } else if tweaks.is_modified(row.0) {
            TEXT_MODIFIED
        } else {
            TEXT_PRIMARY
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn panel_app() -> App {
        let mut app = App::new();
        app.init_resource::<ButtonInput<KeyCode>>()
            .init_resource::<BallTweaks>()
            .insert_resource(TuningPath(
                std::env::temp_dir().join("rollball_panel_test.json"),
            ))
            .add_systems(Update, toggle_tweak_panel);
        app
    }

    fn tap(app: &mut App, key: KeyCode) {
        {
            let mut input = app.world_mut().resource_mut::<ButtonInput<KeyCode>>();
            input.press(key);
        }
        app.update();
        let mut input = app.world_mut().resource_mut::<ButtonInput<KeyCode>>();
        input.release(key);
        input.clear();
    }

    #[test]
    fn test_keys_ignored_while_hidden() {
        let mut app = panel_app();
        tap(&mut app, KeyCode::ArrowRight);
        assert!(!app.world().resource::<BallTweaks>().is_modified(0));
    }

    #[test]
    fn test_select_and_adjust() {
        let mut app = panel_app();
        tap(&mut app, KeyCode::F1);
        assert!(app.world().resource::<BallTweaks>().panel_visible);

        // Down to impulse strength (index 4), then one step right
        for _ in 0..4 {
            tap(&mut app, KeyCode::ArrowDown);
        }
        tap(&mut app, KeyCode::ArrowRight);

        let tweaks = app.world().resource::<BallTweaks>();
        assert_eq!(tweaks.selected_index, 4);
        assert!((tweaks.impulse_strength - 55.0).abs() < 1e-4);
    }

    #[test]
    fn test_selection_wraps() {
        let mut app = panel_app();
        tap(&mut app, KeyCode::F1);
        tap(&mut app, KeyCode::ArrowUp);
        assert_eq!(
            app.world().resource::<BallTweaks>().selected_index,
            BallTweaks::LABELS.len() - 1
        );
    }

    #[test]
    fn test_values_do_not_go_negative() {
        let mut app = panel_app();
        tap(&mut app, KeyCode::F1);
        for _ in 0..20 {
            tap(&mut app, KeyCode::ArrowLeft);
        }
        assert_eq!(app.world().resource::<BallTweaks>().restitution, 0.0);

        tap(&mut app, KeyCode::KeyR);
        assert_eq!(
            app.world().resource::<BallTweaks>().restitution,
            BALL_RESTITUTION
        );
    }
}
