//! Per-frame ball control: key state to impulses, and the jump ground probe
//!
//! Everything here is plain math or goes through `BodyApi`, so it runs the
//! same against rapier or a test double.

use bevy::prelude::*;
use rapier3d::prelude::RigidBodyHandle;

use crate::constants::JUMP_RAY_MAX_DISTANCE;
use crate::input::MovementKeys;
use crate::physics::BodyApi;
use crate::tuning::BallTweaks;

/// Linear and angular impulse for one frame
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ControlImpulse {
    pub impulse: Vec3,
    pub torque: Vec3,
}

impl ControlImpulse {
    pub const ZERO: Self = Self {
        impulse: Vec3::ZERO,
        torque: Vec3::ZERO,
    };
}

/// Sum the per-key contributions, scaled by strength * delta.
///
/// Torque axes are chosen so the ball rolls in the direction it is pushed.
/// Opposing keys cancel.
pub fn control_impulses(
    delta: f32,
    keys: &MovementKeys,
    impulse_strength: f32,
    torque_strength: f32,
) -> ControlImpulse {
    let mut impulse = Vec3::ZERO;
    let mut torque = Vec3::ZERO;

    let impulse_step = impulse_strength * delta;
    let torque_step = torque_strength * delta;

    if keys.forward {
        impulse.z -= impulse_step;
        torque.x -= torque_step;
    }
    if keys.backward {
        impulse.z += impulse_step;
        torque.x += torque_step;
    }
    if keys.leftward {
        impulse.x -= impulse_step;
        torque.z += torque_step;
    }
    if keys.rightward {
        impulse.x += impulse_step;
        torque.z -= torque_step;
    }

    ControlImpulse { impulse, torque }
}

/// Ray origin just below the ball surface
pub fn jump_ray_origin(position: Vec3, radius: f32, epsilon: f32) -> Vec3 {
    Vec3::new(position.x, position.y - (radius + epsilon), position.z)
}

pub fn jump_allowed(hit_toi: Option<f32>, threshold: f32) -> bool {
    matches!(hit_toi, Some(toi) if toi < threshold)
}

pub fn jump_impulse(strength: f32) -> Vec3 {
    Vec3::new(0.0, strength, 0.0)
}

/// Push this frame's control onto the body. Zero vectors are not sent.
pub fn apply_control(api: &mut impl BodyApi, body: RigidBodyHandle, control: ControlImpulse) {
    if control.impulse != Vec3::ZERO {
        api.apply_impulse(body, control.impulse);
    }
    if control.torque != Vec3::ZERO {
        api.apply_torque_impulse(body, control.torque);
    }
}

/// Outcome of one jump request
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JumpProbe {
    pub origin: Vec3,
    pub toi: Option<f32>,
    pub jumped: bool,
}

/// Probe for ground under the ball and jump if close enough.
///
/// Returns `None` when the body handle is stale. A failed ground check is not
/// an error: the request is dropped and `jumped` is false.
pub fn try_jump(
    api: &mut impl BodyApi,
    body: RigidBodyHandle,
    tweaks: &BallTweaks,
) -> Option<JumpProbe> {
    let position = api.translation(body)?;
    let origin = jump_ray_origin(position, tweaks.radius, tweaks.ray_epsilon);
    let toi = api.cast_ray(origin, Vec3::NEG_Y, JUMP_RAY_MAX_DISTANCE, true, Some(body));

    let jumped = jump_allowed(toi, tweaks.ground_threshold);
    if jumped {
        api.apply_impulse(body, jump_impulse(tweaks.jump_strength));
    }

    Some(JumpProbe {
        origin,
        toi,
        jumped,
    })
}
