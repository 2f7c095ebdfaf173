//! Physics module - rapier3d world resource, engine adapter, and transform sync

mod body_api;
mod sync;
mod world;

pub use body_api::*;
pub use sync::*;
pub use world::*;
