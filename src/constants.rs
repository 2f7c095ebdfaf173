//! Tunable constants for rollball
//!
//! All scene and control defaults are defined here for easy tweaking.

use bevy::prelude::*;

// =============================================================================
// SCENE COLORS
// =============================================================================

pub const BACKGROUND_COLOR: Color = Color::srgb(0.282, 0.282, 0.282); // #484848
pub const BALL_COLOR: Color = Color::srgb(1.0, 0.0, 0.0);
pub const CRATE_COLOR: Color = Color::srgb(0.0, 0.0, 1.0);
pub const GROUND_COLOR: Color = Color::srgba(0.5, 0.5, 0.5, 0.8); // Translucent gray

// =============================================================================
// TEXT/UI COLORS
// =============================================================================

pub const TEXT_PRIMARY: Color = Color::srgb(0.95, 0.95, 0.95);
pub const TEXT_SECONDARY: Color = Color::srgb(0.7, 0.7, 0.7);
pub const TEXT_SELECTED: Color = Color::srgb(1.0, 1.0, 0.0);
pub const TEXT_MODIFIED: Color = Color::srgb(1.0, 0.4, 0.4);
pub const PANEL_BACKGROUND: Color = Color::srgba(0.1, 0.1, 0.1, 0.9);

// Debug overlay wireframes
pub const GIZMO_COLLIDER: Color = Color::srgb(0.2, 1.0, 0.4);
pub const GIZMO_RAY_HIT: Color = Color::srgb(1.0, 1.0, 0.0);
pub const GIZMO_RAY_MISS: Color = Color::srgb(1.0, 0.3, 0.3);

// =============================================================================
// BALL BODY
// =============================================================================

pub const BALL_RADIUS: f32 = 1.0;
pub const BALL_RESTITUTION: f32 = 0.2;
pub const BALL_FRICTION: f32 = 1.0;
pub const BALL_LINEAR_DAMPING: f32 = 0.5;
pub const BALL_ANGULAR_DAMPING: f32 = 0.5;
pub const BALL_SPAWN: Vec3 = Vec3::new(0.0, BALL_RADIUS, 5.0);
pub const BALL_ICO_SUBDIVISIONS: u32 = 1;

// =============================================================================
// BALL CONTROL
// =============================================================================

pub const IMPULSE_STRENGTH: f32 = 50.0; // Horizontal impulse per second of held key
pub const TORQUE_STRENGTH: f32 = 50.0; // Torque impulse per second of held key
pub const JUMP_STRENGTH: f32 = 30.0; // Single upward impulse per jump

// Jump ground probe. No physical derivation; tuned by feel.
pub const JUMP_GROUND_THRESHOLD: f32 = 0.15; // Max ray time-of-impact that counts as grounded
pub const JUMP_RAY_EPSILON: f32 = 0.05; // Ray origin offset below the ball surface
pub const JUMP_RAY_MAX_DISTANCE: f32 = 10.0;

// =============================================================================
// PHYSICS WORLD
// =============================================================================

pub const GRAVITY: Vec3 = Vec3::new(0.0, -9.81, 0.0);
pub const MAX_PHYSICS_DT: f32 = 1.0 / 20.0; // Clamp for stalled frames

// =============================================================================
// STATIC SCENE
// =============================================================================

pub const GROUND_SIZE: Vec3 = Vec3::new(100.0, 0.1, 100.0);
pub const GROUND_CENTER: Vec3 = Vec3::new(0.0, -0.05, 0.0); // Top face at y = 0
pub const CRATE_SIZE: Vec3 = Vec3::new(2.0, 2.0, 2.0);
pub const CRATE_SPAWN: Vec3 = Vec3::new(0.0, 1.0, 0.0);

// =============================================================================
// CAMERA & LIGHTS
// =============================================================================

pub const CAMERA_START: Vec3 = Vec3::new(7.0, 4.0, 21.0);
pub const CAMERA_FOV_DEGREES: f32 = 50.0;
pub const CAMERA_NEAR: f32 = 0.1;
pub const CAMERA_FAR: f32 = 1000.0;
pub const ORBIT_SENSITIVITY: f32 = 0.005; // Radians per pixel of mouse drag
pub const ZOOM_SENSITIVITY: f32 = 1.0; // Distance per scroll line
pub const ORBIT_MIN_DISTANCE: f32 = 2.0;
pub const ORBIT_MAX_DISTANCE: f32 = 200.0;

pub const SPOT_LIGHT_POSITION: Vec3 = Vec3::new(15.0, 15.0, 15.0);
pub const SPOT_LIGHT_INTENSITY: f32 = 8_000_000.0; // Lumens
pub const SPOT_LIGHT_ANGLE: f32 = std::f32::consts::FRAC_PI_3;
pub const AMBIENT_BRIGHTNESS: f32 = 200.0;

// =============================================================================
// CONFIG FILES
// =============================================================================

pub const BALL_TUNING_FILE: &str = "config/ball_tuning.json";
pub const CONFIG_CHECK_INTERVAL: f32 = 2.0; // Seconds between tuning file polls
