//! Config file auto-reload system
//!
//! Polls the ball tuning file every couple of seconds and reloads it when
//! its modification time changes.

use bevy::prelude::*;
use std::fs;
use std::path::Path;
use std::time::SystemTime;

use crate::constants::CONFIG_CHECK_INTERVAL;
use crate::tuning::{BallTweaks, TuningPath, load_ball_tuning_from_file};

/// Tracks the modification time of the tuning file for hot-reload
#[derive(Resource)]
pub struct ConfigWatcher {
    /// Time since last check
    pub timer: f32,
    /// Last known modification time
    pub tuning_mtime: Option<SystemTime>,
}

impl ConfigWatcher {
    pub fn new(path: &Path) -> Self {
        Self {
            timer: 0.0,
            tuning_mtime: get_mtime(path),
        }
    }

    /// Reload the file if it changed since the last poll. Returns true when
    /// new values were applied.
    ///
    /// A file that disappears or fails to parse leaves the current values alone.
    pub fn poll(&mut self, path: &Path, tweaks: &mut BallTweaks) -> bool {
        let new_mtime = get_mtime(path);
        if new_mtime == self.tuning_mtime {
            return false;
        }
        self.tuning_mtime = new_mtime;

        if new_mtime.is_none() {
            info!("{} removed, keeping current ball tuning", path.display());
            return false;
        }

        match load_ball_tuning_from_file(path) {
            Ok(tuning) => {
                tuning.apply_to(tweaks);
                info!("Auto-reloaded ball tuning from {}", path.display());
                true
            }
            Err(err) => {
                warn!("{}", err);
                false
            }
        }
    }
}

impl Default for ConfigWatcher {
    fn default() -> Self {
        Self::new(&TuningPath::default().0)
    }
}

/// Get file modification time, or None if file doesn't exist
fn get_mtime(path: &Path) -> Option<SystemTime> {
    fs::metadata(path).ok().and_then(|m| m.modified().ok())
}

/// Check the tuning file for changes every `CONFIG_CHECK_INTERVAL` seconds.
pub fn check_config_changes(
    time: Res<Time>,
    path: Res<TuningPath>,
    mut watcher: ResMut<ConfigWatcher>,
    mut tweaks: ResMut<BallTweaks>,
) {
    watcher.timer += time.delta_secs();

    if watcher.timer < CONFIG_CHECK_INTERVAL {
        return;
    }
    watcher.timer = 0.0;

    // Only touch the resource on a real reload so change detection stays quiet
    let mut reloaded = tweaks.clone();
    if watcher.poll(&path.0, &mut reloaded) {
        *tweaks = reloaded;
    }
}
