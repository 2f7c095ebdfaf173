//! Ball-related components and resources

use bevy::prelude::*;

use crate::ball::JumpProbe;

/// Marker for the player-controlled ball. Exactly one exists after startup.
#[derive(Component)]
pub struct Ball;

/// Running tally of jump requests, for the debug overlay and simulations
#[derive(Resource, Default, Debug, Clone)]
pub struct JumpStats {
    /// Jump presses received while a ball body existed
    pub attempts: u32,
    /// Presses that passed the ground check and applied an impulse
    pub applied: u32,
    pub last: Option<JumpProbe>,
}
