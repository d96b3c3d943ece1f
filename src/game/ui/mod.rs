//! UI Module
//!
//! Screen-state holders that react to controller notifications. Drawing is
//! left to the host; these types only decide what should be on screen.

pub mod overlay;

pub use overlay::{GalleryOverlay, READINESS_DELAY};
