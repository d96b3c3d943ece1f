//! Input Module
//!
//! Platform-agnostic input handling for the first-person controller.
//! Key handlers only set flags; the frame loop reads them. Pointer capture
//! goes through the [`PointerCapture`] trait so the controller never touches
//! a windowing system directly.
//!
//! # Example
//!
//! ```rust,ignore
//! use gallery_walk_engine::input::{InputState, KeyCode, FpsMouseState};
//!
//! let mut keys = InputState::new();
//! keys.handle_key(KeyCode::W, true);
//! assert!(keys.forward);
//!
//! let mut mouse = FpsMouseState::new();
//! mouse.accumulate_delta(4.0, -2.0);
//! let (dx, dy) = mouse.consume_delta();
//! ```

pub mod keyboard;
pub mod mouse_state;
pub mod pointer_capture;
#[cfg(target_arch = "wasm32")]
pub mod web_capture;

// Re-export commonly used types at module level
pub use keyboard::{InputState, KeyCode};
pub use mouse_state::{FpsMouseState, SPIKE_THRESHOLD};
pub use pointer_capture::{
    CaptureBehavior, CaptureError, CaptureNotice, CaptureRequest, PointerCapture, ScriptedCapture,
    WinitCapture,
};
#[cfg(target_arch = "wasm32")]
pub use web_capture::WebCapture;

/// Mouse buttons the controller reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}
