//! Rollball - roll a ball around with WASD, jump with Space
//!
//! Main entry point: app setup and system registration.

use bevy::{diagnostic::FrameTimeDiagnosticsPlugin, prelude::*};
use rollball::{
    ConfigWatcher, DebugSettings, FrameSet, TuningPath, add_frame_systems, config_watcher,
    constants::*, tuning, ui, world,
};
use std::path::PathBuf;

fn main() {
    // Parse command-line arguments
    let args: Vec<String> = std::env::args().collect();

    // --tuning <path> overrides the tuning file location
    let tuning_path = args
        .iter()
        .position(|a| a == "--tuning")
        .and_then(|i| args.get(i + 1))
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(BALL_TUNING_FILE));

    // --debug starts with the collider overlay on
    let debug_visible = args.iter().any(|a| a == "--debug");

    let watcher = ConfigWatcher::new(&tuning_path);

    let mut app = App::new();
    app.add_plugins((
        DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "rollball".into(),
                ..default()
            }),
            ..default()
        }),
        FrameTimeDiagnosticsPlugin::default(),
    ))
    .insert_resource(ClearColor(BACKGROUND_COLOR))
    .insert_resource(AmbientLight {
        brightness: AMBIENT_BRIGHTNESS,
        ..default()
    })
    .insert_resource(TuningPath(tuning_path.clone()))
    .insert_resource(DebugSettings {
        visible: debug_visible,
    })
    .insert_resource(watcher);

    add_frame_systems(&mut app);

    app.add_systems(
        Startup,
        (
            tuning::load_ball_tuning_system,
            world::setup_scene,
            ui::spawn_tweak_panel,
            ui::spawn_debug_text,
        )
            .chain(),
    )
    // Panel and config edits land before this frame's input capture
    .add_systems(
        Update,
        (
            ui::toggle_tweak_panel,
            config_watcher::check_config_changes,
        )
            .chain()
            .before(FrameSet::Input),
    )
    .add_systems(
        Update,
        (
            ui::update_tweak_panel,
            ui::toggle_debug,
            ui::update_debug_text,
            ui::draw_collider_gizmos,
            world::orbit_camera,
        )
            .after(FrameSet::Sync),
    );

    info!(
        "Rollball starting (tuning file {}, debug overlay {})",
        tuning_path.display(),
        if debug_visible { "on" } else { "off" }
    );

    app.run();
}
