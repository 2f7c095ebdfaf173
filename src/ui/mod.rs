//! UI module - tweak panel and debug overlay

mod debug;
mod tweak_panel;

pub use debug::*;
pub use tweak_panel::*;
