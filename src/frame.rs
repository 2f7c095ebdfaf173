//! Per-frame system ordering shared by the windowed app and headless runs
//!
//! Input capture -> ball control and jump -> physics step -> transform sync.
//! Control must run before the step so this frame's impulses are integrated.

use bevy::prelude::*;

use crate::ball::{JumpStats, apply_ball_control, apply_body_tweaks, handle_jump};
use crate::input::{JumpEdge, JumpPressed, MovementKeys, capture_input};
use crate::physics::{PhysicsWorld, step_physics, sync_transforms};
use crate::tuning::BallTweaks;

#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FrameSet {
    Input,
    Control,
    Physics,
    Sync,
}

/// Register the resources, messages, and ordered systems that drive the ball.
///
/// Callers still provide `ButtonInput<KeyCode>` (from `InputPlugin` or by hand)
/// and spawn the scene bodies.
pub fn add_frame_systems(app: &mut App) -> &mut App {
    app.add_message::<JumpPressed>()
        .init_resource::<BallTweaks>()
        .init_resource::<MovementKeys>()
        .init_resource::<JumpEdge>()
        .init_resource::<JumpStats>()
        .init_resource::<PhysicsWorld>()
        .configure_sets(
            Update,
            (
                FrameSet::Input,
                FrameSet::Control,
                FrameSet::Physics,
                FrameSet::Sync,
            )
                .chain(),
        )
        .add_systems(Update, capture_input.in_set(FrameSet::Input))
        .add_systems(
            Update,
            (apply_body_tweaks, apply_ball_control, handle_jump)
                .chain()
                .in_set(FrameSet::Control),
        )
        .add_systems(Update, step_physics.in_set(FrameSet::Physics))
        .add_systems(Update, sync_transforms.in_set(FrameSet::Sync))
}
