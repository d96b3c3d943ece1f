//! World Module
//!
//! World-space description of the gallery: the room's dimensions and
//! the static scene nodes placed inside it.
//!
//! ## Default World
//! A single 400 x 600 x 160 room centered on the origin, floor at y = 0.

pub mod room;
pub mod scene;

pub use room::RoomBounds;
pub use scene::{NodeTag, Scene, SceneNode};
