//! Headless simulation - run the ball without rendering
//!
//! Drives the same per-frame pipeline as the windowed app from a scripted
//! key sequence and reports where the ball ended up.

pub mod app_builder;
pub mod config;
pub mod metrics;
pub mod runner;
pub mod script;

pub use app_builder::HeadlessAppBuilder;
pub use config::SimConfig;
pub use metrics::{BallTrack, SimReport};
pub use runner::{run_script, run_simulation};
pub use script::{DEFAULT_SCRIPT, InputScript, ScriptError, ScriptStep};
