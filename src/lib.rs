//! Rollball - a physics ball on a ground plane, rolled with WASD and jumped with Space
//!
//! This crate provides all components, resources, and systems organized into modules.

// Core modules
pub mod config_watcher;
pub mod constants;
pub mod frame;
pub mod simulation;
pub mod tuning;

// Game logic modules
pub mod ball;
pub mod input;
pub mod physics;
pub mod ui;
pub mod world;

// Re-export commonly used types for convenience
pub use ball::{Ball, ControlImpulse, JumpProbe, JumpStats};
pub use config_watcher::ConfigWatcher;
pub use constants::*;
pub use frame::{FrameSet, add_frame_systems};
pub use input::{Action, JumpEdge, JumpPressed, MovementKeys};
pub use physics::{BodyApi, PhysicsBody, PhysicsWorld};
pub use tuning::{BallTuning, BallTweaks, TuningError, TuningPath};
pub use ui::{DebugSettings, DebugText, TweakPanel, TweakRow};
pub use world::{Crate, Ground, OrbitCamera};
