//! Game Module
//!
//! Gallery-specific pieces built on top of the engine: the room layout,
//! the top-level configuration and the audio and UI collaborators that
//! listen to the player controller.

pub mod audio;
pub mod config;
pub mod gallery;
pub mod ui;

pub use audio::{FootstepCue, FootstepPlayer};
pub use config::GalleryConfig;
pub use gallery::build_gallery;
pub use ui::GalleryOverlay;
