//! Orbit camera: left drag rotates around the target, wheel zooms

use bevy::input::mouse::{AccumulatedMouseMotion, AccumulatedMouseScroll, MouseScrollUnit};
use bevy::prelude::*;
use std::f32::consts::FRAC_PI_2;

use crate::constants::*;

const PITCH_LIMIT: f32 = FRAC_PI_2 - 0.05;
const PIXELS_PER_LINE: f32 = 16.0;

/// Spherical camera placement around `target`
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct OrbitCamera {
    pub target: Vec3,
    pub distance: f32,
    /// Rotation about +Y, 0 looks down -Z
    pub yaw: f32,
    /// Elevation above the XZ plane
    pub pitch: f32,
}

impl OrbitCamera {
    pub fn from_eye(eye: Vec3, target: Vec3) -> Self {
        let offset = eye - target;
        let distance = offset.length().max(ORBIT_MIN_DISTANCE);
        Self {
            target,
            distance,
            yaw: offset.x.atan2(offset.z),
            pitch: (offset.y / distance).clamp(-1.0, 1.0).asin(),
        }
    }

    pub fn eye(&self) -> Vec3 {
        let horizontal = self.distance * self.pitch.cos();
        self.target
            + Vec3::new(
                horizontal * self.yaw.sin(),
                self.distance * self.pitch.sin(),
                horizontal * self.yaw.cos(),
            )
    }

    pub fn transform(&self) -> Transform {
        Transform::from_translation(self.eye()).looking_at(self.target, Vec3::Y)
    }

    /// Rotate by a mouse drag in pixels. Dragging right swings the camera left.
    pub fn rotate(&mut self, drag: Vec2) {
        self.yaw -= drag.x * ORBIT_SENSITIVITY;
        self.pitch = (self.pitch + drag.y * ORBIT_SENSITIVITY).clamp(-PITCH_LIMIT, PITCH_LIMIT);
    }

    /// Move toward (positive) or away from (negative) the target
    pub fn zoom(&mut self, lines: f32) {
        self.distance =
            (self.distance - lines * ZOOM_SENSITIVITY).clamp(ORBIT_MIN_DISTANCE, ORBIT_MAX_DISTANCE);
    }
}

pub fn orbit_camera(
    mouse: Res<ButtonInput<MouseButton>>,
    motion: Res<AccumulatedMouseMotion>,
    scroll: Res<AccumulatedMouseScroll>,
    mut cameras: Query<(&mut OrbitCamera, &mut Transform)>,
) {
    let drag = if mouse.pressed(MouseButton::Left) {
        motion.delta
    } else {
        Vec2::ZERO
    };
    let lines = match scroll.unit {
        MouseScrollUnit::Line => scroll.delta.y,
        MouseScrollUnit::Pixel => scroll.delta.y / PIXELS_PER_LINE,
    };
    if drag == Vec2::ZERO && lines == 0.0 {
        return;
    }

    for (mut orbit, mut transform) in &mut cameras {
        orbit.rotate(drag);
        orbit.zoom(lines);
        *transform = orbit.transform();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_eye_round_trips() {
        let orbit = OrbitCamera::from_eye(CAMERA_START, Vec3::ZERO);
        assert!((orbit.eye() - CAMERA_START).length() < 1e-4);
        assert!((orbit.distance - CAMERA_START.length()).abs() < 1e-4);
    }

    #[test]
    fn test_pitch_is_clamped() {
        let mut orbit = OrbitCamera::from_eye(CAMERA_START, Vec3::ZERO);
        orbit.rotate(Vec2::new(0.0, 100_000.0));
        assert!(orbit.pitch <= PITCH_LIMIT);
        orbit.rotate(Vec2::new(0.0, -200_000.0));
        assert!(orbit.pitch >= -PITCH_LIMIT);
    }

    #[test]
    fn test_zoom_keeps_distance_in_range() {
        let mut orbit = OrbitCamera::from_eye(CAMERA_START, Vec3::ZERO);
        orbit.zoom(1_000.0);
        assert_eq!(orbit.distance, ORBIT_MIN_DISTANCE);
        orbit.zoom(-1_000.0);
        assert_eq!(orbit.distance, ORBIT_MAX_DISTANCE);
    }

    #[test]
    fn test_transform_looks_at_target() {
        let orbit = OrbitCamera::from_eye(Vec3::new(0.0, 0.0, 10.0), Vec3::ZERO);
        let transform = orbit.transform();
        assert!((transform.forward().as_vec3() - Vec3::NEG_Z).length() < 1e-4);
    }
}
