//! One-shot timers ticked by the frame loop.
//!
//! Used for the jump cooldown and the delay between the start action and
//! the capture request. There is no background scheduler: a timer only
//! advances when [`OneShotTimer::tick`] is called, so cancelling it
//! guarantees it never fires.

/// A cancellable countdown that fires once.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct OneShotTimer {
    remaining: Option<f32>,
}

impl OneShotTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm (or re-arm) the timer to fire after `seconds`.
    pub fn start(&mut self, seconds: f32) {
        self.remaining = Some(seconds.max(0.0));
    }

    /// Disarm without firing.
    pub fn cancel(&mut self) {
        self.remaining = None;
    }

    /// Whether the timer is armed and has not fired yet.
    #[inline]
    pub fn is_pending(&self) -> bool {
        self.remaining.is_some()
    }

    /// Seconds left, if armed.
    #[inline]
    pub fn remaining(&self) -> Option<f32> {
        self.remaining
    }

    /// Advance by `dt`. Returns `true` exactly once, on the tick it expires.
    pub fn tick(&mut self, dt: f32) -> bool {
        let Some(remaining) = self.remaining else {
            return false;
        };
        let remaining = remaining - dt.max(0.0);
        if remaining <= 0.0 {
            self.remaining = None;
            true
        } else {
            self.remaining = Some(remaining);
            false
        }
    }
}
