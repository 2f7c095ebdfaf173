//! Headless App Builder
//!
//! Provides a reusable builder for creating headless Bevy apps for simulation.
//! Used by the simulation runner and by system-level tests.

use bevy::app::ScheduleRunnerPlugin;
use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use std::time::Duration;

use crate::frame::add_frame_systems;
use crate::tuning::{BallTuning, BallTweaks};
use crate::world::spawn_bodies;

/// Builder for creating headless Bevy apps
pub struct HeadlessAppBuilder {
    fps: f32,
    tuning: Option<BallTuning>,
}

impl Default for HeadlessAppBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl HeadlessAppBuilder {
    /// Create a new builder with default settings
    pub fn new() -> Self {
        Self {
            fps: 60.0,
            tuning: None,
        }
    }

    /// Set the simulated frame rate (default: 60)
    pub fn with_fps(mut self, fps: f32) -> Self {
        self.fps = fps;
        self
    }

    /// Start from these tuning values instead of the built-in defaults
    pub fn with_tuning(mut self, tuning: BallTuning) -> Self {
        self.tuning = Some(tuning);
        self
    }

    /// Build the app with minimal plugins and the full per-frame pipeline
    ///
    /// The returned app has:
    /// - MinimalPlugins with a fixed `1 / fps` time step per `update()`
    /// - A hand-driven `ButtonInput<KeyCode>` (no InputPlugin)
    /// - Ground, crate, and ball bodies spawned on the first update
    pub fn build(self) -> App {
        let frame = Duration::from_secs_f32(1.0 / self.fps.max(1.0));

        let mut app = App::new();
        app.add_plugins(MinimalPlugins.set(ScheduleRunnerPlugin::run_loop(frame)));

        // Every update advances time by exactly one frame
        app.insert_resource(TimeUpdateStrategy::ManualDuration(frame));
        app.init_resource::<ButtonInput<KeyCode>>();

        add_frame_systems(&mut app);
        if let Some(tuning) = self.tuning {
            tuning.apply_to(&mut app.world_mut().resource_mut::<BallTweaks>());
        }

        app.add_systems(Startup, spawn_bodies);
        app
    }
}
