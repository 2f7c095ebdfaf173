//! Rapier world owned as a Bevy resource
//!
//! We own the `PhysicsPipeline` and call `step()` ourselves once per rendered
//! frame, after the ball controller has queued its impulses.

use bevy::prelude::*;
use nalgebra::{Point3, UnitQuaternion, Vector3};
use rapier3d::prelude::*;

use crate::constants::{GRAVITY, MAX_PHYSICS_DT};
use crate::physics::BodyApi;
use crate::tuning::BallTweaks;

pub fn to_vector(v: Vec3) -> Vector3<f32> {
    Vector3::new(v.x, v.y, v.z)
}

pub fn to_point(v: Vec3) -> Point3<f32> {
    Point3::new(v.x, v.y, v.z)
}

pub fn to_vec3(v: &Vector3<f32>) -> Vec3 {
    Vec3::new(v.x, v.y, v.z)
}

pub fn to_quat(rotation: &UnitQuaternion<f32>) -> Quat {
    let c = rotation.coords;
    Quat::from_xyzw(c.x, c.y, c.z, c.w)
}

/// Material and damping values for the ball body
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BallBodyParams {
    pub radius: f32,
    pub restitution: f32,
    pub friction: f32,
    pub linear_damping: f32,
    pub angular_damping: f32,
}

impl From<&BallTweaks> for BallBodyParams {
    fn from(tweaks: &BallTweaks) -> Self {
        Self {
            radius: tweaks.radius,
            restitution: tweaks.restitution,
            friction: tweaks.friction,
            linear_damping: tweaks.linear_damping,
            angular_damping: tweaks.angular_damping,
        }
    }
}

/// Whether a body is simulated or pinned in place
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyKind {
    Dynamic,
    Fixed,
}

/// Collider outline for the debug overlay
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DebugShape {
    Sphere { center: Vec3, radius: f32 },
    Cuboid { center: Vec3, rotation: Quat, size: Vec3 },
}

/// All rapier state needed to step a dynamic scene and answer ray queries.
#[derive(Resource)]
pub struct PhysicsWorld {
    pub gravity: Vector3<f32>,
    pub integration_parameters: IntegrationParameters,
    pub pipeline: PhysicsPipeline,
    pub islands: IslandManager,
    pub broad_phase: BroadPhaseBvh,
    pub narrow_phase: NarrowPhase,
    pub bodies: RigidBodySet,
    pub colliders: ColliderSet,
    pub impulse_joints: ImpulseJointSet,
    pub multibody_joints: MultibodyJointSet,
    pub ccd_solver: CCDSolver,
}

impl Default for PhysicsWorld {
    fn default() -> Self {
        Self {
            gravity: to_vector(GRAVITY),
            integration_parameters: IntegrationParameters::default(),
            pipeline: PhysicsPipeline::new(),
            islands: IslandManager::new(),
            broad_phase: BroadPhaseBvh::new(),
            narrow_phase: NarrowPhase::new(),
            bodies: RigidBodySet::new(),
            colliders: ColliderSet::new(),
            impulse_joints: ImpulseJointSet::new(),
            multibody_joints: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
        }
    }
}

impl PhysicsWorld {
    /// Insert a dynamic ball body with one ball collider.
    pub fn spawn_ball(&mut self, position: Vec3, params: &BallBodyParams) -> RigidBodyHandle {
        let body = RigidBodyBuilder::dynamic()
            .translation(to_vector(position))
            .linear_damping(params.linear_damping)
            .angular_damping(params.angular_damping)
            .build();
        let handle = self.bodies.insert(body);

        let collider = ColliderBuilder::ball(params.radius)
            .restitution(params.restitution)
            .friction(params.friction)
            .build();
        self.colliders
            .insert_with_parent(collider, handle, &mut self.bodies);
        handle
    }

    /// Insert an axis-aligned box body. `size` is the full extent, not half.
    pub fn spawn_cuboid(&mut self, center: Vec3, size: Vec3, kind: BodyKind) -> RigidBodyHandle {
        let builder = match kind {
            BodyKind::Dynamic => RigidBodyBuilder::dynamic(),
            BodyKind::Fixed => RigidBodyBuilder::fixed(),
        };
        let handle = self.bodies.insert(builder.translation(to_vector(center)).build());

        let half = size / 2.0;
        let collider = ColliderBuilder::cuboid(half.x, half.y, half.z).build();
        self.colliders
            .insert_with_parent(collider, handle, &mut self.bodies);
        handle
    }

    /// Push material and damping values onto an existing ball body.
    /// The radius is fixed at creation and is not touched here.
    pub fn set_ball_material(&mut self, handle: RigidBodyHandle, params: &BallBodyParams) {
        let Some(body) = self.bodies.get_mut(handle) else {
            return;
        };
        body.set_linear_damping(params.linear_damping);
        body.set_angular_damping(params.angular_damping);

        let collider_handles: Vec<ColliderHandle> = body.colliders().to_vec();
        for collider_handle in collider_handles {
            if let Some(collider) = self.colliders.get_mut(collider_handle) {
                collider.set_restitution(params.restitution);
                collider.set_friction(params.friction);
            }
        }
    }

    /// Advance the simulation by `dt` seconds (variable, clamped to `MAX_PHYSICS_DT`).
    pub fn step(&mut self, dt: f32) {
        if dt <= 0.0 {
            return;
        }
        self.integration_parameters.dt = dt.min(MAX_PHYSICS_DT);

        self.pipeline.step(
            &self.gravity,
            &self.integration_parameters,
            &mut self.islands,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.bodies,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            &mut self.ccd_solver,
            &(),
            &(),
        );
    }

    pub fn pose(&self, handle: RigidBodyHandle) -> Option<(Vec3, Quat)> {
        self.bodies
            .get(handle)
            .map(|body| (to_vec3(body.translation()), to_quat(body.rotation())))
    }

    pub fn linvel(&self, handle: RigidBodyHandle) -> Option<Vec3> {
        self.bodies.get(handle).map(|body| to_vec3(body.linvel()))
    }

    pub fn angvel(&self, handle: RigidBodyHandle) -> Option<Vec3> {
        self.bodies.get(handle).map(|body| to_vec3(body.angvel()))
    }

    /// Outlines of every ball and cuboid collider, in world space.
    pub fn debug_shapes(&self) -> Vec<DebugShape> {
        let mut shapes = Vec::with_capacity(self.colliders.len());
        for (_, collider) in self.colliders.iter() {
            let iso = collider.position();
            let center = to_vec3(&iso.translation.vector);
            if let Some(ball) = collider.shape().as_ball() {
                shapes.push(DebugShape::Sphere {
                    center,
                    radius: ball.radius,
                });
            } else if let Some(cuboid) = collider.shape().as_cuboid() {
                shapes.push(DebugShape::Cuboid {
                    center,
                    rotation: to_quat(&iso.rotation),
                    size: to_vec3(&cuboid.half_extents) * 2.0,
                });
            }
        }
        shapes
    }
}

impl BodyApi for PhysicsWorld {
    fn translation(&self, body: RigidBodyHandle) -> Option<Vec3> {
        self.bodies.get(body).map(|b| to_vec3(b.translation()))
    }

    fn apply_impulse(&mut self, body: RigidBodyHandle, impulse: Vec3) {
        if let Some(b) = self.bodies.get_mut(body) {
            b.apply_impulse(to_vector(impulse), true);
        }
    }

    fn apply_torque_impulse(&mut self, body: RigidBodyHandle, torque: Vec3) {
        if let Some(b) = self.bodies.get_mut(body) {
            b.apply_torque_impulse(to_vector(torque), true);
        }
    }

    fn cast_ray(
        &self,
        origin: Vec3,
        direction: Vec3,
        max_distance: f32,
        solid: bool,
        exclude: Option<RigidBodyHandle>,
    ) -> Option<f32> {
        let mut filter = QueryFilter::default();
        if let Some(body) = exclude {
            filter = filter.exclude_rigid_body(body);
        }
        let query = self.broad_phase.as_query_pipeline(
            self.narrow_phase.query_dispatcher(),
            &self.bodies,
            &self.colliders,
            filter,
        );

        let ray = Ray::new(to_point(origin), to_vector(direction));
        query
            .cast_ray(&ray, max_distance.max(0.0), solid)
            .map(|(_handle, toi)| toi)
    }
}

/// Runs after the ball controller each frame.
pub fn step_physics(time: Res<Time>, mut physics: ResMut<PhysicsWorld>) {
    physics.step(time.delta_secs());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::*;

    const FRAME: f32 = 1.0 / 60.0;

    fn ground_world() -> PhysicsWorld {
        let mut world = PhysicsWorld::default();
        world.spawn_cuboid(GROUND_CENTER, GROUND_SIZE, BodyKind::Fixed);
        world
    }

    fn default_params() -> BallBodyParams {
        BallBodyParams::from(&BallTweaks::default())
    }

    fn run(world: &mut PhysicsWorld, seconds: f32) {
        let frames = (seconds / FRAME).round() as usize;
        for _ in 0..frames {
            world.step(FRAME);
        }
    }

    #[test]
    fn test_ball_settles_on_ground() {
        let mut world = ground_world();
        let ball = world.spawn_ball(Vec3::new(0.0, 3.0, 10.0), &default_params());

        run(&mut world, 3.0);

        let (position, _) = world.pose(ball).unwrap();
        assert!(
            (position.y - BALL_RADIUS).abs() < 0.05,
            "ball should rest on the ground, got y = {}",
            position.y
        );
    }

    #[test]
    fn test_ray_hits_ground_from_above() {
        let mut world = ground_world();
        world.step(FRAME);

        let toi = world.cast_ray(Vec3::new(0.0, 5.0, 10.0), Vec3::NEG_Y, 10.0, true, None);
        let toi = toi.expect("ray should hit the ground slab");
        assert!((toi - 5.0).abs() < 0.01, "expected ~5.0, got {}", toi);
    }

    #[test]
    fn test_ray_misses_beyond_max_distance() {
        let mut world = ground_world();
        world.step(FRAME);

        let toi = world.cast_ray(Vec3::new(0.0, 20.0, 10.0), Vec3::NEG_Y, 10.0, true, None);
        assert!(toi.is_none());
    }

    #[test]
    fn test_ray_excludes_given_body() {
        let mut world = PhysicsWorld::default();
        let ball = world.spawn_ball(Vec3::new(0.0, 1.0, 0.0), &default_params());
        world.gravity = Vector3::zeros();
        world.step(FRAME);

        let origin = Vec3::new(0.0, 5.0, 0.0);
        assert!(world.cast_ray(origin, Vec3::NEG_Y, 10.0, true, None).is_some());
        assert!(world.cast_ray(origin, Vec3::NEG_Y, 10.0, true, Some(ball)).is_none());
    }

    #[test]
    fn test_impulse_changes_velocity() {
        let mut world = PhysicsWorld::default();
        world.gravity = Vector3::zeros();
        let ball = world.spawn_ball(Vec3::ZERO, &default_params());

        world.apply_impulse(ball, Vec3::new(5.0, 0.0, 0.0));
        world.step(FRAME);

        let velocity = world.linvel(ball).unwrap();
        assert!(velocity.x > 0.0);
        assert!(velocity.y.abs() < 1e-4);
    }

    #[test]
    fn test_torque_impulse_spins_ball() {
        let mut world = PhysicsWorld::default();
        world.gravity = Vector3::zeros();
        let ball = world.spawn_ball(Vec3::ZERO, &default_params());

        world.apply_torque_impulse(ball, Vec3::new(-5.0, 0.0, 0.0));
        world.step(FRAME);

        let spin = world.angvel(ball).unwrap();
        assert!(spin.x < 0.0);
    }

    #[test]
    fn test_set_ball_material_updates_body_and_collider() {
        let mut world = PhysicsWorld::default();
        let ball = world.spawn_ball(Vec3::ZERO, &default_params());

        let params = BallBodyParams {
            restitution: 0.9,
            friction: 0.3,
            linear_damping: 2.0,
            angular_damping: 3.0,
            ..default_params()
        };
        world.set_ball_material(ball, &params);

        let body = &world.bodies[ball];
        assert_eq!(body.linear_damping(), 2.0);
        assert_eq!(body.angular_damping(), 3.0);
        let collider = &world.colliders[body.colliders()[0]];
        assert_eq!(collider.restitution(), 0.9);
        assert_eq!(collider.friction(), 0.3);
    }

    #[test]
    fn test_zero_dt_does_not_step() {
        let mut world = PhysicsWorld::default();
        let ball = world.spawn_ball(Vec3::new(0.0, 5.0, 0.0), &default_params());
        world.step(0.0);
        assert_eq!(world.pose(ball).unwrap().0, Vec3::new(0.0, 5.0, 0.0));
    }

    #[test]
    fn test_debug_shapes_lists_every_collider() {
        let mut world = ground_world();
        world.spawn_ball(BALL_SPAWN, &default_params());
        world.spawn_cuboid(CRATE_SPAWN, CRATE_SIZE, BodyKind::Dynamic);

        let shapes = world.debug_shapes();
        assert_eq!(shapes.len(), 3);
        assert!(shapes.iter().any(|s| matches!(
            s,
            DebugShape::Sphere { radius, .. } if (*radius - BALL_RADIUS).abs() < 1e-6
        )));
        assert!(shapes.iter().any(|s| matches!(
            s,
            DebugShape::Cuboid { size, .. } if (*size - CRATE_SIZE).length() < 1e-5
        )));
    }
}
