//! Copy rapier body poses into Bevy transforms

use bevy::prelude::*;
use rapier3d::prelude::RigidBodyHandle;

use crate::physics::PhysicsWorld;

/// Links an entity to its rapier rigid body
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhysicsBody(pub RigidBodyHandle);

/// Runs after `step_physics` so rendering sees this frame's result.
pub fn sync_transforms(
    physics: Res<PhysicsWorld>,
    mut query: Query<(&PhysicsBody, &mut Transform)>,
) {
    for (body, mut transform) in &mut query {
        if let Some((translation, rotation)) = physics.pose(body.0) {
            transform.translation = translation;
            transform.rotation = rotation;
        }
    }
}
