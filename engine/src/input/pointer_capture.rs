//! Pointer Capture Module
//!
//! Platform seam for exclusive pointer capture (pointer lock / cursor grab).
//! The controller only talks to [`PointerCapture`]; each platform provides a
//! backend:
//!
//! - [`WinitCapture`] - native window, cursor grab through winit
//! - `WebCapture` - browser pointer lock through web-sys (wasm32 only)
//! - [`ScriptedCapture`] - in-memory backend for tests and headless runs
//!
//! # Usage
//!
//! ```rust,ignore
//! use gallery_walk_engine::input::{PointerCapture, CaptureRequest};
//!
//! match backend.request_capture() {
//!     Ok(CaptureRequest::Granted) => { /* locked now */ }
//!     Ok(CaptureRequest::Pending) => { /* wait for the platform's change event */ }
//!     Err(err) => log::warn!("{err}"),
//! }
//! ```

use std::sync::Arc;

use thiserror::Error;
use winit::window::{CursorGrabMode, Window};

/// Why pointer capture could not be acquired.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CaptureError {
    /// The platform has no pointer capture facility at all
    #[error("pointer capture is not supported on this platform")]
    Unsupported,
    /// The platform refused the request
    #[error("pointer capture request rejected: {0}")]
    Rejected(String),
    /// Capture was lost or cancelled while being acquired
    #[error("pointer capture was interrupted")]
    Interrupted,
}

/// Outcome of a successful capture request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureRequest {
    /// Capture is active now
    Granted,
    /// The platform will report the result later through a change event
    Pending,
}

/// A capture change the platform reported on its own, outside a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureNotice {
    /// Capture was acquired (`true`) or lost (`false`)
    Changed(bool),
    /// A pending request failed
    Failed,
}

/// A platform's pointer capture facility.
pub trait PointerCapture {
    /// Whether this platform can capture the pointer at all.
    fn is_supported(&self) -> bool;

    /// Ask for exclusive pointer capture.
    fn request_capture(&mut self) -> Result<CaptureRequest, CaptureError>;

    /// Give capture back to the platform. Safe to call when not captured.
    fn release_capture(&mut self);

    /// Whether the pointer is currently captured.
    fn is_captured(&self) -> bool;

    /// Whether the device reports touch input.
    fn is_touch_device(&self) -> bool {
        false
    }

    /// Mount on-screen touch affordances. Returns `true` if anything was mounted.
    fn mount_touch_controls(&mut self) -> bool {
        false
    }

    /// Remove whatever [`PointerCapture::mount_touch_controls`] mounted.
    fn unmount_touch_controls(&mut self) {}

    /// Notices queued by platform listeners since the last call.
    fn take_notices(&mut self) -> Vec<CaptureNotice> {
        Vec::new()
    }

    /// Remove platform listeners. No notices arrive afterwards.
    fn detach(&mut self) {}
}

// ============================================================================
// SCRIPTED BACKEND
// ============================================================================

/// How a [`ScriptedCapture`] answers capture requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaptureBehavior {
    /// Grant immediately
    Grant,
    /// Answer `Pending`; the caller later reports the result
    Defer,
    /// Fail with [`CaptureError::Rejected`]
    Reject(String),
    /// Report no capture support
    Unsupported,
}

/// In-memory capture backend driven by a fixed behavior.
///
/// Records every request and release so tests can assert on them.
#[derive(Debug, Clone)]
pub struct ScriptedCapture {
    pub behavior: CaptureBehavior,
    pub touch_device: bool,
    captured: bool,
    touch_mounted: bool,
    requests: usize,
    releases: usize,
    notices: Vec<CaptureNotice>,
    detached: bool,
}

impl Default for ScriptedCapture {
    fn default() -> Self {
        Self::new(CaptureBehavior::Grant)
    }
}

impl ScriptedCapture {
    pub fn new(behavior: CaptureBehavior) -> Self {
        Self {
            behavior,
            touch_device: false,
            captured: false,
            touch_mounted: false,
            requests: 0,
            releases: 0,
            notices: Vec::new(),
            detached: false,
        }
    }

    /// A backend that grants every request.
    pub fn granting() -> Self {
        Self::new(CaptureBehavior::Grant)
    }

    /// A backend with no capture support.
    pub fn unsupported() -> Self {
        Self::new(CaptureBehavior::Unsupported)
    }

    /// Mark the device as touch capable.
    pub fn with_touch(mut self) -> Self {
        self.touch_device = true;
        self
    }

    /// Force the captured flag, as a platform change event would.
    pub fn set_captured(&mut self, captured: bool) {
        self.captured = captured;
    }

    /// Number of capture requests received.
    pub fn request_count(&self) -> usize {
        self.requests
    }

    /// Number of releases received.
    pub fn release_count(&self) -> usize {
        self.releases
    }

    pub fn touch_mounted(&self) -> bool {
        self.touch_mounted
    }

    /// Queue a notice as a platform listener would. Dropped once detached.
    pub fn push_notice(&mut self, notice: CaptureNotice) {
        if self.detached {
            return;
        }
        if let CaptureNotice::Changed(captured) = notice {
            self.captured = captured;
        }
        self.notices.push(notice);
    }

    pub fn is_detached(&self) -> bool {
        self.detached
    }
}

impl PointerCapture for ScriptedCapture {
    fn is_supported(&self) -> bool {
        self.behavior != CaptureBehavior::Unsupported
    }

    fn request_capture(&mut self) -> Result<CaptureRequest, CaptureError> {
        self.requests += 1;
        match &self.behavior {
            CaptureBehavior::Grant => {
                self.captured = true;
                Ok(CaptureRequest::Granted)
            }
            CaptureBehavior::Defer => Ok(CaptureRequest::Pending),
            CaptureBehavior::Reject(reason) => Err(CaptureError::Rejected(reason.clone())),
            CaptureBehavior::Unsupported => Err(CaptureError::Unsupported),
        }
    }

    fn release_capture(&mut self) {
        self.releases += 1;
        self.captured = false;
    }

    fn is_captured(&self) -> bool {
        self.captured
    }

    fn is_touch_device(&self) -> bool {
        self.touch_device
    }

    fn mount_touch_controls(&mut self) -> bool {
        if !self.touch_device {
            return false;
        }
        self.touch_mounted = true;
        true
    }

    fn unmount_touch_controls(&mut self) {
        self.touch_mounted = false;
    }

    fn take_notices(&mut self) -> Vec<CaptureNotice> {
        std::mem::take(&mut self.notices)
    }

    fn detach(&mut self) {
        self.detached = true;
        self.notices.clear();
    }
}

// ============================================================================
// WINIT BACKEND
// ============================================================================

/// Cursor grab on a native winit window.
///
/// Tries `Locked` first (macOS, Wayland) and falls back to `Confined`
/// (Windows, X11). The cursor is hidden while grabbed.
pub struct WinitCapture {
    window: Arc<Window>,
    captured: bool,
}

impl WinitCapture {
    pub fn new(window: Arc<Window>) -> Self {
        Self {
            window,
            captured: false,
        }
    }

    pub fn window(&self) -> &Arc<Window> {
        &self.window
    }
}

impl PointerCapture for WinitCapture {
    fn is_supported(&self) -> bool {
        true
    }

    fn request_capture(&mut self) -> Result<CaptureRequest, CaptureError> {
        let grabbed = self
            .window
            .set_cursor_grab(CursorGrabMode::Locked)
            .or_else(|_| self.window.set_cursor_grab(CursorGrabMode::Confined));

        match grabbed {
            Ok(()) => {
                self.window.set_cursor_visible(false);
                self.captured = true;
                Ok(CaptureRequest::Granted)
            }
            Err(err) => Err(CaptureError::Rejected(err.to_string())),
        }
    }

    fn release_capture(&mut self) {
        if let Err(err) = self.window.set_cursor_grab(CursorGrabMode::None) {
            log::debug!("cursor release failed: {err}");
        }
        self.window.set_cursor_visible(true);
        self.captured = false;
    }

    fn is_captured(&self) -> bool {
        self.captured
    }
}
