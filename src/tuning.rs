//! Ball tuning values (decoupled from UI)
//!
//! `BallTweaks` is the live set read every frame. `BallTuning` is its
//! serialized form, loaded from `config/ball_tuning.json` when present.

use bevy::log::{info, warn};
use bevy::prelude::{Res, ResMut, Resource};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::constants::*;

#[derive(Debug, Error)]
pub enum TuningError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("failed to encode tuning: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

fn default_restitution() -> f32 {
    BALL_RESTITUTION
}
fn default_friction() -> f32 {
    BALL_FRICTION
}
fn default_linear_damping() -> f32 {
    BALL_LINEAR_DAMPING
}
fn default_angular_damping() -> f32 {
    BALL_ANGULAR_DAMPING
}
fn default_impulse_strength() -> f32 {
    IMPULSE_STRENGTH
}
fn default_torque_strength() -> f32 {
    TORQUE_STRENGTH
}
fn default_jump_strength() -> f32 {
    JUMP_STRENGTH
}
fn default_ground_threshold() -> f32 {
    JUMP_GROUND_THRESHOLD
}
fn default_ray_epsilon() -> f32 {
    JUMP_RAY_EPSILON
}

/// Serializable tuning values stored in config. Missing fields use defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BallTuning {
    #[serde(default = "default_restitution")]
    pub restitution: f32,
    #[serde(default = "default_friction")]
    pub friction: f32,
    #[serde(default = "default_linear_damping")]
    pub linear_damping: f32,
    #[serde(default = "default_angular_damping")]
    pub angular_damping: f32,
    #[serde(default = "default_impulse_strength")]
    pub impulse_strength: f32,
    #[serde(default = "default_torque_strength")]
    pub torque_strength: f32,
    #[serde(default = "default_jump_strength")]
    pub jump_strength: f32,
    #[serde(default = "default_ground_threshold")]
    pub ground_threshold: f32,
    #[serde(default = "default_ray_epsilon")]
    pub ray_epsilon: f32,
}

impl Default for BallTuning {
    fn default() -> Self {
        Self {
            restitution: default_restitution(),
            friction: default_friction(),
            linear_damping: default_linear_damping(),
            angular_damping: default_angular_damping(),
            impulse_strength: default_impulse_strength(),
            torque_strength: default_torque_strength(),
            jump_strength: default_jump_strength(),
            ground_threshold: default_ground_threshold(),
            ray_epsilon: default_ray_epsilon(),
        }
    }
}

impl BallTuning {
    pub fn apply_to(&self, tweaks: &mut BallTweaks) {
        tweaks.restitution = self.restitution;
        tweaks.friction = self.friction;
        tweaks.linear_damping = self.linear_damping;
        tweaks.angular_damping = self.angular_damping;
        tweaks.impulse_strength = self.impulse_strength;
        tweaks.torque_strength = self.torque_strength;
        tweaks.jump_strength = self.jump_strength;
        tweaks.ground_threshold = self.ground_threshold;
        tweaks.ray_epsilon = self.ray_epsilon;
    }
}

/// Runtime-adjustable ball values, read live every frame
#[derive(Resource, Debug, Clone)]
pub struct BallTweaks {
    /// Display-only; the collider is built once from this value.
    pub radius: f32,
    pub restitution: f32,
    pub friction: f32,
    pub linear_damping: f32,
    pub angular_damping: f32,
    pub impulse_strength: f32,
    pub torque_strength: f32,
    pub jump_strength: f32,
    pub ground_threshold: f32,
    pub ray_epsilon: f32,
    pub selected_index: usize, // Which value is currently selected for adjustment
    pub panel_visible: bool,
}

impl Default for BallTweaks {
    fn default() -> Self {
        let mut tweaks = Self {
            radius: BALL_RADIUS,
            restitution: 0.0,
            friction: 0.0,
            linear_damping: 0.0,
            angular_damping: 0.0,
            impulse_strength: 0.0,
            torque_strength: 0.0,
            jump_strength: 0.0,
            ground_threshold: 0.0,
            ray_epsilon: 0.0,
            selected_index: 0,
            panel_visible: false,
        };
        BallTuning::default().apply_to(&mut tweaks);
        tweaks
    }
}

impl BallTweaks {
    pub const LABELS: [&'static str; 9] = [
        "Restitution",
        "Friction",
        "Linear Damping",
        "Angular Damping",
        "Impulse Strength",
        "Torque Strength",
        "Jump Strength",
        "Ground Threshold",
        "Ray Epsilon",
    ];

    pub fn get_value(&self, index: usize) -> f32 {
        match index {
            0 => self.restitution,
            1 => self.friction,
            2 => self.linear_damping,
            3 => self.angular_damping,
            4 => self.impulse_strength,
            5 => self.torque_strength,
            6 => self.jump_strength,
            7 => self.ground_threshold,
            8 => self.ray_epsilon,
            _ => 0.0,
        }
    }

    pub fn get_default_value(index: usize) -> f32 {
        match index {
            0 => BALL_RESTITUTION,
            1 => BALL_FRICTION,
            2 => BALL_LINEAR_DAMPING,
            3 => BALL_ANGULAR_DAMPING,
            4 => IMPULSE_STRENGTH,
            5 => TORQUE_STRENGTH,
            6 => JUMP_STRENGTH,
            7 => JUMP_GROUND_THRESHOLD,
            8 => JUMP_RAY_EPSILON,
            _ => 0.0,
        }
    }

    pub fn set_value(&mut self, index: usize, value: f32) {
        match index {
            0 => self.restitution = value,
            1 => self.friction = value,
            2 => self.linear_damping = value,
            3 => self.angular_damping = value,
            4 => self.impulse_strength = value,
            5 => self.torque_strength = value,
            6 => self.jump_strength = value,
            7 => self.ground_threshold = value,
            8 => self.ray_epsilon = value,
            _ => {}
        }
    }

    pub fn is_modified(&self, index: usize) -> bool {
        let current = self.get_value(index);
        let default = Self::get_default_value(index);
        (current - default).abs() > 0.0001
    }

    pub fn reset_value(&mut self, index: usize) {
        self.set_value(index, Self::get_default_value(index));
    }

    pub fn reset_all(&mut self) {
        for i in 0..Self::LABELS.len() {
            self.reset_value(i);
        }
    }

    pub fn get_step(&self, index: usize) -> f32 {
        // Step size is ~10% of default value
        let default = Self::get_default_value(index);
        (default * 0.1).max(0.01)
    }

    /// Snapshot of the tunable values, for writing back to config.
    pub fn to_tuning(&self) -> BallTuning {
        BallTuning {
            restitution: self.restitution,
            friction: self.friction,
            linear_damping: self.linear_damping,
            angular_damping: self.angular_damping,
            impulse_strength: self.impulse_strength,
            torque_strength: self.torque_strength,
            jump_strength: self.jump_strength,
            ground_threshold: self.ground_threshold,
            ray_epsilon: self.ray_epsilon,
        }
    }
}

/// Resource naming the tuning file in use (overridable with `--tuning <path>`)
#[derive(Resource, Debug, Clone)]
pub struct TuningPath(pub PathBuf);

impl Default for TuningPath {
    fn default() -> Self {
        Self(PathBuf::from(BALL_TUNING_FILE))
    }
}

pub fn load_ball_tuning_from_file(path: &Path) -> Result<BallTuning, TuningError> {
    let contents = std::fs::read_to_string(path).map_err(|source| TuningError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&contents).map_err(|source| TuningError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Save tuning as pretty JSON, creating the parent directory if needed
pub fn save_ball_tuning_to_file(path: &Path, tuning: &BallTuning) -> Result<(), TuningError> {
    let json = serde_json::to_string_pretty(tuning)?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|source| TuningError::Write {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    std::fs::write(path, json).map_err(|source| TuningError::Write {
        path: path.to_path_buf(),
        source,
    })
}

/// Apply the tuning file to `tweaks`. On error the defaults are applied instead.
pub fn apply_file_tuning(path: &Path, tweaks: &mut BallTweaks) -> Result<(), TuningError> {
    match load_ball_tuning_from_file(path) {
        Ok(tuning) => {
            tuning.apply_to(tweaks);
            Ok(())
        }
        Err(err) => {
            BallTuning::default().apply_to(tweaks);
            Err(err)
        }
    }
}

pub fn load_ball_tuning_system(path: Res<TuningPath>, mut tweaks: ResMut<BallTweaks>) {
    let path = &path.0;
    if !path.exists() {
        info!("No {} found, using default ball tuning", path.display());
        return;
    }
    match apply_file_tuning(path, &mut tweaks) {
        Ok(()) => info!("Loaded ball tuning from {}", path.display()),
        Err(err) => warn!("{}", err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_constants() {
        let tweaks = BallTweaks::default();
        assert_eq!(tweaks.radius, 1.0);
        assert_eq!(tweaks.restitution, 0.2);
        assert_eq!(tweaks.friction, 1.0);
        assert_eq!(tweaks.linear_damping, 0.5);
        assert_eq!(tweaks.angular_damping, 0.5);
        assert_eq!(tweaks.impulse_strength, 50.0);
        assert_eq!(tweaks.torque_strength, 50.0);
        assert_eq!(tweaks.jump_strength, 30.0);
        assert_eq!(tweaks.ground_threshold, 0.15);
        assert_eq!(tweaks.ray_epsilon, 0.05);
        for i in 0..BallTweaks::LABELS.len() {
            assert!(!tweaks.is_modified(i), "{} should start at default", BallTweaks::LABELS[i]);
        }
    }

    #[test]
    fn test_set_and_reset() {
        let mut tweaks = BallTweaks::default();
        tweaks.set_value(6, 45.0);
        assert_eq!(tweaks.jump_strength, 45.0);
        assert!(tweaks.is_modified(6));

        tweaks.reset_value(6);
        assert_eq!(tweaks.jump_strength, JUMP_STRENGTH);

        tweaks.set_value(0, 0.9);
        tweaks.set_value(4, 10.0);
        tweaks.reset_all();
        assert_eq!(tweaks.restitution, BALL_RESTITUTION);
        assert_eq!(tweaks.impulse_strength, IMPULSE_STRENGTH);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let tuning: BallTuning = serde_json::from_str(r#"{ "jump_strength": 12.5 }"#).unwrap();
        assert_eq!(tuning.jump_strength, 12.5);
        assert_eq!(tuning.impulse_strength, IMPULSE_STRENGTH);
        assert_eq!(tuning.ground_threshold, JUMP_GROUND_THRESHOLD);
    }

    #[test]
    fn test_to_tuning_round_trips_through_apply() {
        let mut tweaks = BallTweaks::default();
        tweaks.set_value(5, 75.0);
        let tuning = tweaks.to_tuning();

        let mut fresh = BallTweaks::default();
        tuning.apply_to(&mut fresh);
        assert_eq!(fresh.torque_strength, 75.0);
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let mut tweaks = BallTweaks::default();
        tweaks.jump_strength = 99.0;
        let result = apply_file_tuning(Path::new("config/does_not_exist.json"), &mut tweaks);
        assert!(matches!(result, Err(TuningError::Read { .. })));
        assert_eq!(tweaks.jump_strength, JUMP_STRENGTH);
    }

    #[test]
    fn test_save_then_load() {
        let path = std::env::temp_dir()
            .join("rollball_tuning_test")
            .join("ball_tuning.json");
        let mut tuning = BallTuning::default();
        tuning.impulse_strength = 80.0;
        save_ball_tuning_to_file(&path, &tuning).unwrap();

        let loaded = load_ball_tuning_from_file(&path).unwrap();
        assert_eq!(loaded, tuning);
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_bad_json_reports_parse_error() {
        let path = std::env::temp_dir().join("rollball_bad_tuning.json");
        std::fs::write(&path, "{ not json").unwrap();
        let result = load_ball_tuning_from_file(&path);
        assert!(matches!(result, Err(TuningError::Parse { .. })));
        let _ = std::fs::remove_file(&path);
    }
}
