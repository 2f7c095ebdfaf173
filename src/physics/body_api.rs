//! The narrow slice of the physics engine the ball controller talks to

use bevy::prelude::*;
use rapier3d::prelude::RigidBodyHandle;

/// Engine calls issued by the ball controller.
///
/// `PhysicsWorld` implements this against rapier3d. Keeping the controller
/// behind this seam lets its per-frame logic run without a simulation.
pub trait BodyApi {
    /// World-space position of the body, or `None` if the handle is stale.
    fn translation(&self, body: RigidBodyHandle) -> Option<Vec3>;

    fn apply_impulse(&mut self, body: RigidBodyHandle, impulse: Vec3);

    fn apply_torque_impulse(&mut self, body: RigidBodyHandle, torque: Vec3);

    /// Time of impact of the nearest hit along `direction`, if any within `max_distance`.
    ///
    /// With `solid` set, a ray starting inside a collider hits at time 0.
    fn cast_ray(
        &self,
        origin: Vec3,
        direction: Vec3,
        max_distance: f32,
        solid: bool,
        exclude: Option<RigidBodyHandle>,
    ) -> Option<f32>;
}
