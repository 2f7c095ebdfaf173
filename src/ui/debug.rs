//! Debug overlay: collider wireframes and a status line

use bevy::diagnostic::{DiagnosticsStore, FrameTimeDiagnosticsPlugin};
use bevy::prelude::*;

use crate::ball::{Ball, JumpStats, jump_allowed, jump_ray_origin};
use crate::constants::*;
use crate::physics::{BodyApi, DebugShape, PhysicsBody, PhysicsWorld};
use crate::tuning::BallTweaks;

/// Debug settings resource
#[derive(Resource, Default)]
pub struct DebugSettings {
    pub visible: bool,
}

/// Debug text component
#[derive(Component)]
pub struct DebugText;

/// Spawn the status line in the bottom-left corner
pub fn spawn_debug_text(mut commands: Commands, settings: Res<DebugSettings>) {
    commands.spawn((
        Text::new(""),
        TextFont {
            font_size: 14.0,
            ..default()
        },
        TextColor(TEXT_PRIMARY),
        Node {
            position_type: PositionType::Absolute,
            bottom: Val::Px(10.0),
            left: Val::Px(10.0),
            ..default()
        },
        if settings.visible {
            Visibility::Inherited
        } else {
            Visibility::Hidden
        },
        DebugText,
    ));
}

/// Toggle debug overlay visibility (F3)
pub fn toggle_debug(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut settings: ResMut<DebugSettings>,
    mut text_query: Query<&mut Visibility, With<DebugText>>,
) {
    if keyboard.just_pressed(KeyCode::F3) {
        settings.visible = !settings.visible;
        if let Ok(mut visibility) = text_query.single_mut() {
            *visibility = if settings.visible {
                Visibility::Inherited
            } else {
                Visibility::Hidden
            };
        }
    }
}

/// One-line summary shown by the overlay
pub fn format_debug_line(
    fps: Option<f64>,
    position: Vec3,
    velocity: Vec3,
    grounded: bool,
    stats: &JumpStats,
) -> String {
    let fps_str = fps.map_or_else(|| "--".to_string(), |fps| format!("{:.0}", fps));
    let toi_str = match stats.last.and_then(|probe| probe.toi) {
        Some(toi) => format!("{:.3}", toi),
        None => "-".to_string(),
    };
    format!(
        "FPS {} | pos ({:.2}, {:.2}, {:.2}) | vel ({:.2}, {:.2}, {:.2}) | {} | jumps {}/{} (last toi {})",
        fps_str,
        position.x,
        position.y,
        position.z,
        velocity.x,
        velocity.y,
        velocity.z,
        if grounded { "grounded" } else { "airborne" },
        stats.applied,
        stats.attempts,
        toi_str,
    )
}

/// Update debug text display
pub fn update_debug_text(
    debug_settings: Res<DebugSettings>,
    diagnostics: Res<DiagnosticsStore>,
    physics: Res<PhysicsWorld>,
    tweaks: Res<BallTweaks>,
    stats: Res<JumpStats>,
    ball: Query<&PhysicsBody, With<Ball>>,
    mut text_query: Query<&mut Text, With<DebugText>>,
) {
    if !debug_settings.visible {
        return;
    }

    let Ok(mut text) = text_query.single_mut() else {
        return;
    };
    let Ok(body) = ball.single() else {
        return;
    };
    let (Some(position), Some(velocity)) = (physics.translation(body.0), physics.linvel(body.0))
    else {
        return;
    };

    let fps = diagnostics
        .get(&FrameTimeDiagnosticsPlugin::FPS)
        .and_then(|fps| fps.smoothed());

    // Same probe the jump uses, without applying anything
    let origin = jump_ray_origin(position, tweaks.radius, tweaks.ray_epsilon);
    let toi = physics.cast_ray(
        origin,
        Vec3::NEG_Y,
        JUMP_RAY_MAX_DISTANCE,
        true,
        Some(body.0),
    );
    let grounded = jump_allowed(toi, tweaks.ground_threshold);

    **text = format_debug_line(fps, position, velocity, grounded, &stats);
}

/// Draw every collider plus the most recent jump probe
pub fn draw_collider_gizmos(
    debug_settings: Res<DebugSettings>,
    physics: Res<PhysicsWorld>,
    stats: Res<JumpStats>,
    mut gizmos: Gizmos,
) {
    if !debug_settings.visible {
        return;
    }

    for shape in physics.debug_shapes() {
        match shape {
            DebugShape::Sphere { center, radius } => {
                gizmos.sphere(Isometry3d::from_translation(center), radius, GIZMO_COLLIDER);
            }
            DebugShape::Cuboid {
                center,
                rotation,
                size,
            } => {
                let transform = Transform::from_translation(center)
                    .with_rotation(rotation)
                    .with_scale(size);
                gizmos.cuboid(transform, GIZMO_COLLIDER);
            }
        }
    }

    if let Some(probe) = stats.last {
        match probe.toi {
            Some(toi) => {
                gizmos.line(probe.origin, probe.origin + Vec3::NEG_Y * toi, GIZMO_RAY_HIT);
            }
            None => {
                gizmos.line(
                    probe.origin,
                    probe.origin + Vec3::NEG_Y * JUMP_RAY_MAX_DISTANCE,
                    GIZMO_RAY_MISS,
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ball::JumpProbe;

    #[test]
    fn test_debug_line_without_fps_or_jumps() {
        let line = format_debug_line(
            None,
            Vec3::new(0.0, 1.0, 5.0),
            Vec3::ZERO,
            true,
            &JumpStats::default(),
        );
        assert!(line.starts_with("FPS --"));
        assert!(line.contains("pos (0.00, 1.00, 5.00)"));
        assert!(line.contains("grounded"));
        assert!(line.contains("jumps 0/0 (last toi -)"));
    }

    #[test]
    fn test_debug_line_reports_last_probe() {
        let stats = JumpStats {
            attempts: 3,
            applied: 1,
            last: Some(JumpProbe {
                origin: Vec3::new(0.0, 4.0, 0.0),
                toi: Some(2.95),
                jumped: false,
            }),
        };
        let line = format_debug_line(Some(59.6), Vec3::Y * 5.0, Vec3::Y, false, &stats);
        assert!(line.starts_with("FPS 60"));
        assert!(line.contains("airborne"));
        assert!(line.contains("jumps 1/3 (last toi 2.950)"));
    }

    #[test]
    fn test_f3_toggles_visibility() {
        let mut app = App::new();
        app.init_resource::<ButtonInput<KeyCode>>()
            .init_resource::<DebugSettings>()
            .add_systems(Update, toggle_debug);
        let text = app.world_mut().spawn((DebugText, Visibility::Hidden)).id();

        app.world_mut()
            .resource_mut::<ButtonInput<KeyCode>>()
            .press(KeyCode::F3);
        app.update();

        assert!(app.world().resource::<DebugSettings>().visible);
        assert_eq!(
            app.world().get::<Visibility>(text),
            Some(&Visibility::Inherited)
        );
    }
}
