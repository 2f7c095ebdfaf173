//! Metrics collection for headless ball runs

use bevy::prelude::*;
use serde::Serialize;

/// Summary of one scripted run
#[derive(Debug, Clone, Default, Serialize)]
pub struct SimReport {
    /// Updates executed
    pub frames: u32,
    /// Simulated seconds
    pub elapsed: f32,
    pub final_position: [f32; 3],
    pub final_velocity: [f32; 3],
    /// Highest ball center reached
    pub max_height: f32,
    /// Path length on the ground plane (XZ)
    pub distance_travelled: f32,
    pub jump_attempts: u32,
    pub jumps_applied: u32,
}

/// Per-frame ball samples folded into a `SimReport`
#[derive(Debug, Default)]
pub struct BallTrack {
    last: Option<Vec3>,
    pub max_height: f32,
    pub distance_travelled: f32,
}

impl BallTrack {
    pub fn record(&mut self, position: Vec3) {
        match self.last {
            Some(last) => {
                self.distance_travelled += position.xz().distance(last.xz());
                self.max_height = self.max_height.max(position.y);
            }
            None => self.max_height = position.y,
        }
        self.last = Some(position);
    }
}
