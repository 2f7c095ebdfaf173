//! Headless ball simulation - run a scripted key sequence without rendering
//!
//! Usage:
//!   cargo run --bin simulate -- --help
//!   cargo run --bin simulate -- --script "idle:60,W:90,W+Space:1,idle:120"
//!   cargo run --bin simulate -- --tuning config/ball_tuning.json --json

use rollball::simulation::{SimConfig, run_simulation};

fn main() {
    let config = SimConfig::from_args();
    run_simulation(config);
}
