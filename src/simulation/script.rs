//! Scripted keyboard input for headless runs
//!
//! A script is a comma-separated list of `keys:frames` steps, where `keys` is
//! `idle` or a `+`-joined set of `W`, `A`, `S`, `D`, `Space`:
//!
//! ```text
//! idle:60,W:90,W+Space:1,W:30,idle:120
//! ```
//!
//! Keys are held for the whole step. Space held across two adjacent steps
//! counts as one press.

use bevy::prelude::KeyCode;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ScriptError {
    #[error("empty input script")]
    Empty,
    #[error("step {index} ({step:?}) is not of the form keys:frames")]
    MissingFrames { index: usize, step: String },
    #[error("step {index}: unknown key {key:?}")]
    UnknownKey { index: usize, key: String },
    #[error("step {index}: invalid frame count {frames:?}")]
    BadFrames { index: usize, frames: String },
}

/// One scripted step: keys held for `frames` updates
#[derive(Debug, Clone, PartialEq)]
pub struct ScriptStep {
    pub keys: Vec<KeyCode>,
    pub frames: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct InputScript {
    pub steps: Vec<ScriptStep>,
}

impl InputScript {
    pub fn total_frames(&self) -> u32 {
        self.steps.iter().map(|step| step.frames).sum()
    }
}

impl Default for InputScript {
    /// Settle, roll forward, jump, and coast
    fn default() -> Self {
        DEFAULT_SCRIPT.parse().unwrap_or(Self {
            steps: vec![ScriptStep {
                keys: Vec::new(),
                frames: 60,
            }],
        })
    }
}

pub const DEFAULT_SCRIPT: &str = "idle:60,W:90,W+Space:1,W:30,idle:120";

fn parse_key(name: &str) -> Option<KeyCode> {
    match name.to_ascii_lowercase().as_str() {
        "w" => Some(KeyCode::KeyW),
        "a" => Some(KeyCode::KeyA),
        "s" => Some(KeyCode::KeyS),
        "d" => Some(KeyCode::KeyD),
        "space" => Some(KeyCode::Space),
        _ => None,
    }
}

fn key_name(key: KeyCode) -> &'static str {
    match key {
        KeyCode::KeyW => "W",
        KeyCode::KeyA => "A",
        KeyCode::KeyS => "S",
        KeyCode::KeyD => "D",
        KeyCode::Space => "Space",
        _ => "?",
    }
}

impl FromStr for InputScript {
    type Err = ScriptError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut steps = Vec::new();

        for (index, raw) in s.split(',').map(str::trim).enumerate() {
            if raw.is_empty() {
                continue;
            }
            let Some((keys_part, frames_part)) = raw.split_once(':') else {
                return Err(ScriptError::MissingFrames {
                    index,
                    step: raw.to_string(),
                });
            };

            let frames: u32 = frames_part
                .trim()
                .parse()
                .map_err(|_| ScriptError::BadFrames {
                    index,
                    frames: frames_part.trim().to_string(),
                })?;

            let mut keys = Vec::new();
            let keys_part = keys_part.trim();
            if !keys_part.eq_ignore_ascii_case("idle") {
                for name in keys_part.split('+').map(str::trim) {
                    let key = parse_key(name).ok_or_else(|| ScriptError::UnknownKey {
                        index,
                        key: name.to_string(),
                    })?;
                    if !keys.contains(&key) {
                        keys.push(key);
                    }
                }
            }

            steps.push(ScriptStep { keys, frames });
        }

        if steps.is_empty() {
            return Err(ScriptError::Empty);
        }
        Ok(Self { steps })
    }
}

impl fmt::Display for InputScript {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, step) in self.steps.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            if step.keys.is_empty() {
                write!(f, "idle")?;
            } else {
                let names: Vec<&str> = step.keys.iter().map(|k| key_name(*k)).collect();
                write!(f, "{}", names.join("+"))?;
            }
            write!(f, ":{}", step.frames)?;
        }
        Ok(())
    }
}
