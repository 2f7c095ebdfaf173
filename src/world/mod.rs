//! World components and spawning for the ground, crate, ball, camera, and lights

mod camera;

pub use camera::*;

use bevy::core_pipeline::tonemapping::Tonemapping;
use bevy::prelude::*;

use crate::ball::spawn_ball;
use crate::constants::*;
use crate::physics::{BodyKind, PhysicsBody, PhysicsWorld};
use crate::tuning::BallTweaks;

/// Static ground slab
#[derive(Component)]
pub struct Ground;

/// The loose box next to the ball's spawn point
#[derive(Component)]
pub struct Crate;

// ============================================================================
// Body spawning (shared between main game and headless runs)
// ============================================================================

/// Spawn the fixed ground slab. Its top face sits at y = 0.
pub fn spawn_ground(commands: &mut Commands, physics: &mut PhysicsWorld) -> Entity {
    let handle = physics.spawn_cuboid(GROUND_CENTER, GROUND_SIZE, BodyKind::Fixed);
    commands
        .spawn((
            Ground,
            PhysicsBody(handle),
            Transform::from_translation(GROUND_CENTER),
        ))
        .id()
}

/// Spawn the dynamic crate
pub fn spawn_crate(commands: &mut Commands, physics: &mut PhysicsWorld) -> Entity {
    let handle = physics.spawn_cuboid(CRATE_SPAWN, CRATE_SIZE, BodyKind::Dynamic);
    commands
        .spawn((
            Crate,
            PhysicsBody(handle),
            Transform::from_translation(CRATE_SPAWN),
        ))
        .id()
}

/// Startup system for headless runs: bodies only, no meshes, camera, or lights
pub fn spawn_bodies(
    mut commands: Commands,
    mut physics: ResMut<PhysicsWorld>,
    tweaks: Res<BallTweaks>,
) {
    spawn_ground(&mut commands, &mut physics);
    spawn_crate(&mut commands, &mut physics);
    spawn_ball(&mut commands, &mut physics, &tweaks, BALL_SPAWN);
}

// ============================================================================
// Rendered scene
// ============================================================================

/// Flat-shaded ico sphere for the ball
fn ball_mesh(radius: f32) -> Mesh {
    let mut mesh = Sphere::new(radius)
        .mesh()
        .ico(BALL_ICO_SUBDIVISIONS)
        .unwrap_or_else(|err| {
            warn!("Ico sphere failed ({}), falling back to UV sphere", err);
            Sphere::new(radius).mesh().uv(32, 18)
        });
    mesh.duplicate_vertices();
    mesh.compute_flat_normals();
    mesh
}

/// Startup system for the windowed app
pub fn setup_scene(
    mut commands: Commands,
    mut physics: ResMut<PhysicsWorld>,
    tweaks: Res<BallTweaks>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    // Camera - perspective, orbiting the origin
    let orbit = OrbitCamera::from_eye(CAMERA_START, Vec3::ZERO);
    commands.spawn((
        Camera3d::default(),
        Projection::Perspective(PerspectiveProjection {
            fov: CAMERA_FOV_DEGREES.to_radians(),
            near: CAMERA_NEAR,
            far: CAMERA_FAR,
            ..default()
        }),
        Tonemapping::AcesFitted,
        orbit.transform(),
        orbit,
    ));

    // Spot light - soft edge, casts shadows
    commands.spawn((
        SpotLight {
            intensity: SPOT_LIGHT_INTENSITY,
            range: 100.0,
            outer_angle: SPOT_LIGHT_ANGLE,
            inner_angle: 0.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_translation(SPOT_LIGHT_POSITION).looking_at(Vec3::ZERO, Vec3::Y),
    ));

    let ground = spawn_ground(&mut commands, &mut physics);
    commands.entity(ground).insert((
        Mesh3d(meshes.add(Cuboid::from_size(GROUND_SIZE))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: GROUND_COLOR,
            alpha_mode: AlphaMode::Blend,
            ..default()
        })),
    ));

    let crate_entity = spawn_crate(&mut commands, &mut physics);
    commands.entity(crate_entity).insert((
        Mesh3d(meshes.add(Cuboid::from_size(CRATE_SIZE))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: CRATE_COLOR,
            ..default()
        })),
    ));

    let ball = spawn_ball(&mut commands, &mut physics, &tweaks, BALL_SPAWN);
    commands.entity(ball).insert((
        Mesh3d(meshes.add(ball_mesh(tweaks.radius))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: BALL_COLOR,
            ..default()
        })),
    ));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ball_mesh_is_flat_shaded() {
        let mesh = ball_mesh(1.0);
        assert!(mesh.indices().is_none());

        let positions = mesh
            .attribute(Mesh::ATTRIBUTE_POSITION)
            .and_then(|values| values.as_float3())
            .expect("ball mesh has no positions");
        assert_eq!(positions.len() % 3, 0);
        for p in positions {
            let length = Vec3::from(*p).length();
            assert!((length - 1.0).abs() < 1e-4, "vertex off the sphere: {length}");
        }
    }

    #[test]
    fn test_spawn_bodies_creates_one_of_each() {
        let mut app = App::new();
        app.init_resource::<PhysicsWorld>()
            .init_resource::<BallTweaks>()
            .add_systems(Startup, spawn_bodies);
        app.update();

        let world = app.world_mut();
        assert_eq!(world.query::<&Ground>().iter(world).count(), 1);
        assert_eq!(world.query::<&Crate>().iter(world).count(), 1);
        assert_eq!(
            world
                .query::<&crate::ball::Ball>()
                .iter(world)
                .count(),
            1
        );
        assert_eq!(world.resource::<PhysicsWorld>().bodies.len(), 3);
    }
}
