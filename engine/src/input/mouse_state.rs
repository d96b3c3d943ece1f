//! FPS-style Mouse State Tracker
//!
//! Handles captured mouse input with delta accumulation for first-person
//! look control. Raw deltas accumulate between frames and are consumed
//! atomically by the frame loop.

/// Largest per-event delta (pixels, either axis) accepted as real motion.
///
/// Some platforms report a single huge jump right after capture is
/// acquired or the window regains focus.
pub const SPIKE_THRESHOLD: f32 = 50.0;

/// FPS-style mouse state tracker with delta accumulation.
///
/// - **Delta accumulation**: Raw mouse deltas accumulate until consumed
/// - **Spike filter**: events larger than [`SPIKE_THRESHOLD`] are dropped
/// - **Cursor capture tracking**: Knows whether the cursor is currently captured
///
/// # Example
///
/// ```rust,ignore
/// use gallery_walk_engine::input::FpsMouseState;
///
/// let mut mouse = FpsMouseState::new();
/// mouse.accumulate_delta(10.0, -5.0);
/// mouse.accumulate_delta(3.0, 2.0);
///
/// let (dx, dy) = mouse.consume_delta();
/// // dx = 13.0, dy = -3.0
/// view.apply_mouse_delta(dx, dy);
/// ```
#[derive(Debug, Clone, Default)]
pub struct FpsMouseState {
    /// Accumulated horizontal delta since last consume.
    delta_x: f32,
    /// Accumulated vertical delta since last consume.
    delta_y: f32,
    /// Whether the cursor is currently captured (hidden and confined).
    cursor_captured: bool,
}

impl FpsMouseState {
    /// Create a new FPS mouse state with zero deltas and cursor not captured.
    pub fn new() -> Self {
        Self::default()
    }

    /// Accumulate one raw mouse motion event.
    ///
    /// Returns `false` when the event was rejected as a spike or was not a
    /// finite number.
    #[inline]
    pub fn accumulate_delta(&mut self, dx: f32, dy: f32) -> bool {
        if !dx.is_finite() || !dy.is_finite() {
            return false;
        }
        if dx.abs() > SPIKE_THRESHOLD || dy.abs() > SPIKE_THRESHOLD {
            log::trace!("dropping mouse spike ({dx}, {dy})");
            return false;
        }
        self.delta_x += dx;
        self.delta_y += dy;
        true
    }

    /// Consume the accumulated delta, returning it and resetting to zero.
    #[inline]
    pub fn consume_delta(&mut self) -> (f32, f32) {
        let delta = (self.delta_x, self.delta_y);
        self.delta_x = 0.0;
        self.delta_y = 0.0;
        delta
    }

    /// Set whether the cursor is captured.
    #[inline]
    pub fn set_captured(&mut self, captured: bool) {
        self.cursor_captured = captured;
        // Clear accumulated deltas when capture state changes to prevent jumps
        if !captured {
            self.delta_x = 0.0;
            self.delta_y = 0.0;
        }
    }

    /// Check if the cursor is currently captured.
    #[inline]
    pub fn is_captured(&self) -> bool {
        self.cursor_captured
    }

    /// Get the current accumulated delta without consuming it.
    #[inline]
    pub fn peek_delta(&self) -> (f32, f32) {
        (self.delta_x, self.delta_y)
    }

    /// Reset all state to defaults.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
