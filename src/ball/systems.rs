//! Ball controller systems

use bevy::prelude::*;

use crate::ball::components::*;
use crate::ball::control::*;
use crate::input::{JumpPressed, MovementKeys};
use crate::physics::{BallBodyParams, PhysicsBody, PhysicsWorld};
use crate::tuning::BallTweaks;

/// Create the ball body and its entity. Rendering components are added by the caller.
pub fn spawn_ball(
    commands: &mut Commands,
    physics: &mut PhysicsWorld,
    tweaks: &BallTweaks,
    position: Vec3,
) -> Entity {
    let handle = physics.spawn_ball(position, &BallBodyParams::from(tweaks));
    info!(
        "Spawned ball at {} (radius {}, restitution {}, friction {})",
        position, tweaks.radius, tweaks.restitution, tweaks.friction
    );
    commands
        .spawn((Ball, PhysicsBody(handle), Transform::from_translation(position)))
        .id()
}

/// Runs every frame before the physics step. Uses the variable frame delta.
pub fn apply_ball_control(
    time: Res<Time>,
    keys: Res<MovementKeys>,
    tweaks: Res<BallTweaks>,
    mut physics: ResMut<PhysicsWorld>,
    ball: Query<&PhysicsBody, With<Ball>>,
) {
    if !keys.any() {
        return;
    }
    // Body not created yet
    let Ok(body) = ball.single() else {
        return;
    };

    let control = control_impulses(
        time.delta_secs(),
        &keys,
        tweaks.impulse_strength,
        tweaks.torque_strength,
    );
    if control == ControlImpulse::ZERO {
        return;
    }
    apply_control(&mut *physics, body.0, control);
}

/// Consume jump presses. Presses without ground under the ball are dropped.
pub fn handle_jump(
    mut jumps: MessageReader<JumpPressed>,
    tweaks: Res<BallTweaks>,
    mut physics: ResMut<PhysicsWorld>,
    mut stats: ResMut<JumpStats>,
    ball: Query<&PhysicsBody, With<Ball>>,
) {
    let Ok(body) = ball.single() else {
        jumps.clear();
        return;
    };

    for _ in jumps.read() {
        // Stale handle: the body is gone, so this press never reached it
        let Some(probe) = try_jump(&mut *physics, body.0, &tweaks) else {
            continue;
        };
        stats.attempts += 1;
        if probe.jumped {
            stats.applied += 1;
            debug!("Jump applied (toi {:?})", probe.toi);
        } else {
            debug!("Jump dropped, no ground within threshold (toi {:?})", probe.toi);
        }
        stats.last = Some(probe);
    }
}

/// Push edited material/damping values onto the live ball body
pub fn apply_body_tweaks(
    tweaks: Res<BallTweaks>,
    mut physics: ResMut<PhysicsWorld>,
    ball: Query<&PhysicsBody, With<Ball>>,
) {
    if !tweaks.is_changed() {
        return;
    }
    let Ok(body) = ball.single() else {
        return;
    };
    physics.set_ball_material(body.0, &BallBodyParams::from(&*tweaks));
}
