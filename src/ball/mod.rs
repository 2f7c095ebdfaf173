//! Ball module - components, per-frame control math, and controller systems

mod components;
mod control;
mod systems;

pub use components::*;
pub use control::*;
pub use systems::*;
