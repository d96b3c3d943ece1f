//! Camera Module
//!
//! Camera state for the walkable gallery: the first-person yaw/pitch view the
//! controller writes every frame, and the orbit camera used when pointer
//! capture is unavailable. This module is window-system agnostic - it only
//! deals with camera state and math.

pub mod fps_view;
pub mod orbit;

pub use fps_view::{CameraView, DEFAULT_SENSITIVITY, PITCH_LIMIT};
pub use orbit::{MAX_POLAR, MIN_POLAR, OrbitCamera, OrbitMouseButton};
