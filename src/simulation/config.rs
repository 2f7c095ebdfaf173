//! Simulation configuration

use std::path::PathBuf;

use crate::simulation::InputScript;

/// Configuration for a simulation run
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// Keys to hold, step by step
    pub script: InputScript,
    /// Simulated frame rate
    pub fps: f32,
    /// Tuning file to start from (None = built-in defaults)
    pub tuning_path: Option<PathBuf>,
    /// Print the report as JSON instead of text
    pub json: bool,
    /// Suppress progress output
    pub quiet: bool,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            script: InputScript::default(),
            fps: 60.0,
            tuning_path: None,
            json: false,
            quiet: false,
        }
    }
}

impl SimConfig {
    /// Parse configuration from command line arguments
    pub fn from_args() -> Self {
        let args: Vec<String> = std::env::args().collect();
        Self::parse_args(args.get(1..).unwrap_or(&[]))
    }

    /// Parse flags (without the program name). Bad values are reported and skipped.
    pub fn parse_args(args: &[String]) -> Self {
        let mut config = Self::default();

        let mut i = 0;
        while i < args.len() {
            match args[i].as_str() {
                "--script" => {
                    if i + 1 < args.len() {
                        match args[i + 1].parse() {
                            Ok(script) => config.script = script,
                            Err(e) => eprintln!("Warning: {}", e),
                        }
                        i += 1;
                    }
                }
                "--fps" => {
                    if i + 1 < args.len() {
                        config.fps = args[i + 1].parse().unwrap_or(60.0);
                        i += 1;
                    }
                }
                "--tuning" => {
                    if i + 1 < args.len() {
                        config.tuning_path = Some(PathBuf::from(&args[i + 1]));
                        i += 1;
                    }
                }
                "--json" => config.json = true,
                "--quiet" | "-q" => config.quiet = true,
                "--help" | "-h" => {
                    print_help();
                    std::process::exit(0);
                }
                other => eprintln!("Warning: ignoring unknown argument {}", other),
            }
            i += 1;
        }

        config
    }
}

fn print_help() {
    println!(
        r#"Headless ball simulation

USAGE:
    cargo run --bin simulate -- [OPTIONS]

OPTIONS:
    --script <STEPS>    Input script, e.g. "idle:60,W:90,W+Space:1,idle:120"
    --fps <N>           Simulated frame rate (default: 60)
    --tuning <PATH>     Ball tuning JSON to start from
    --json              Print the report as JSON
    -q, --quiet         Suppress progress output
    -h, --help          Show this help"#
    );
}
