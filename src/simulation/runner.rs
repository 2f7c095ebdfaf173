//! Simulation runner - drives a headless app through an input script

use bevy::prelude::*;

use crate::ball::{Ball, JumpStats};
use crate::physics::{PhysicsBody, PhysicsWorld};
use crate::simulation::{BallTrack, HeadlessAppBuilder, InputScript, SimConfig, SimReport};
use crate::tuning::{BallTuning, load_ball_tuning_from_file};

const SCRIPT_KEYS: [KeyCode; 5] = [
    KeyCode::KeyW,
    KeyCode::KeyA,
    KeyCode::KeyS,
    KeyCode::KeyD,
    KeyCode::Space,
];

fn ball_state(app: &mut App) -> Option<(Vec3, Vec3)> {
    let mut query = app.world_mut().query_filtered::<&PhysicsBody, With<Ball>>();
    let body = *query.single(app.world()).ok()?;
    let physics = app.world().resource::<PhysicsWorld>();
    Some((physics.pose(body.0)?.0, physics.linvel(body.0)?))
}

/// Run `script` against a freshly built app and summarize the ball's motion.
pub fn run_script(builder: HeadlessAppBuilder, script: &InputScript) -> SimReport {
    let mut app = builder.build();
    // Startup spawns the bodies
    app.update();

    let mut track = BallTrack::default();
    let mut frames = 0;
    if let Some((position, _)) = ball_state(&mut app) {
        track.record(position);
    }

    for step in &script.steps {
        {
            let mut input = app.world_mut().resource_mut::<ButtonInput<KeyCode>>();
            for key in SCRIPT_KEYS {
                if step.keys.contains(&key) {
                    input.press(key);
                } else {
                    input.release(key);
                }
            }
        }

        for _ in 0..step.frames {
            app.update();
            frames += 1;
            if let Some((position, _)) = ball_state(&mut app) {
                track.record(position);
            }
        }
    }

    let (position, velocity) = ball_state(&mut app).unwrap_or_default();
    let stats = app.world().resource::<JumpStats>();
    let elapsed = app.world().resource::<Time>().elapsed_secs();

    SimReport {
        frames,
        elapsed,
        final_position: position.to_array(),
        final_velocity: velocity.to_array(),
        max_height: track.max_height,
        distance_travelled: track.distance_travelled,
        jump_attempts: stats.attempts,
        jumps_applied: stats.applied,
    }
}

/// Run a simulation from CLI config and print the report
pub fn run_simulation(config: SimConfig) {
    let mut builder = HeadlessAppBuilder::new().with_fps(config.fps);
    if let Some(path) = &config.tuning_path {
        match load_ball_tuning_from_file(path) {
            Ok(tuning) => builder = builder.with_tuning(tuning),
            Err(e) => {
                eprintln!("Warning: {}, using defaults", e);
                builder = builder.with_tuning(BallTuning::default());
            }
        }
    }

    if !config.quiet {
        eprintln!(
            "Running {} frames at {} fps: {}",
            config.script.total_frames(),
            config.fps,
            config.script
        );
    }

    let report = run_script(builder, &config.script);

    if config.json {
        match serde_json::to_string_pretty(&report) {
            Ok(json) => println!("{}", json),
            Err(e) => eprintln!("Failed to encode report: {}", e),
        }
        return;
    }

    let [x, y, z] = report.final_position;
    let [vx, vy, vz] = report.final_velocity;
    println!("Frames:        {} ({:.2}s)", report.frames, report.elapsed);
    println!("Final pos:     ({:.3}, {:.3}, {:.3})", x, y, z);
    println!("Final vel:     ({:.3}, {:.3}, {:.3})", vx, vy, vz);
    println!("Max height:    {:.3}", report.max_height);
    println!("Distance (XZ): {:.3}", report.distance_travelled);
    println!(
        "Jumps:         {} applied / {} pressed",
        report.jumps_applied, report.jump_attempts
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{BALL_RADIUS, BALL_SPAWN};

    fn run(script: &str) -> SimReport {
        let script: InputScript = script.parse().unwrap();
        run_script(HeadlessAppBuilder::new(), &script)
    }

    #[test]
    fn test_idle_script_leaves_ball_resting() {
        let report = run("idle:120");
        assert_eq!(report.frames, 120);
        assert_eq!(report.jump_attempts, 0);
        assert!((report.final_position[1] - BALL_RADIUS).abs() < 0.05);
        assert!((report.final_position[2] - BALL_SPAWN.z).abs() < 0.05);
    }

    #[test]
    fn test_rightward_script_moves_positive_x() {
        let report = run("idle:60,D:60");
        assert!(report.final_position[0] > BALL_SPAWN.x + 0.2);
        assert!(report.distance_travelled > 0.2);
    }

    #[test]
    fn test_jump_script_gains_height() {
        let report = run("idle:60,Space:1,idle:20");
        assert_eq!(report.jump_attempts, 1);
        assert_eq!(report.jumps_applied, 1);
        assert!(report.max_height > BALL_RADIUS + 0.5);
    }

    #[test]
    fn test_space_held_across_steps_is_one_press() {
        let report = run("idle:60,Space:1,Space:5,idle:5");
        assert_eq!(report.jump_attempts, 1);
    }
}
