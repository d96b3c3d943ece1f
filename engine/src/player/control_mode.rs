//! Control-Mode State Machine
//!
//! One tagged mode instead of independent flags, so combinations like
//! "paused and in fallback" cannot be represented.
//!
//! ```text
//!            start + capture granted
//!  Unlocked ─────────────────────────► Locked
//!     ▲  ▲        capture lost           │  ▲
//!     │  └───────────────────────────────┘  │ capture granted
//!     │                                     │ (re-request on resume)
//!     │  Escape (resume)          Escape    │
//!     └──────────────── Paused ◄────────────┘
//!
//!  any ── unsupported / capture error ──► OrbitFallback (terminal)
//! ```
//!
//! Every transition returns the event it fires, if any. The machine never
//! touches the platform; the controller performs the capture requests.

use std::fmt;

use super::events::ControlEvent;

/// The active control scheme.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ControlMode {
    /// Entry overlay shown, no movement
    #[default]
    Unlocked,
    /// First-person control driven by the integrator
    Locked,
    /// Movement suspended, position snapshotted
    Paused,
    /// Orbit camera; pointer capture unavailable. Terminal.
    OrbitFallback,
}

impl ControlMode {
    /// Whether the first-person integrator runs in this mode.
    #[inline]
    pub fn is_first_person(self) -> bool {
        self == ControlMode::Locked
    }

    /// Whether no transition can leave this mode.
    #[inline]
    pub fn is_terminal(self) -> bool {
        self == ControlMode::OrbitFallback
    }
}

impl fmt::Display for ControlMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ControlMode::Unlocked => "unlocked",
            ControlMode::Locked => "locked",
            ControlMode::Paused => "paused",
            ControlMode::OrbitFallback => "orbit-fallback",
        };
        f.write_str(name)
    }
}

/// Mode plus the bits of bookkeeping the transitions depend on.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModeMachine {
    mode: ControlMode,
    /// Controls were initialized at least once (capture was requested)
    initialized: bool,
    /// A capture request is outstanding with the platform
    capture_pending: bool,
}

impl ModeMachine {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn mode(&self) -> ControlMode {
        self.mode
    }

    #[inline]
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    #[inline]
    pub fn is_capture_pending(&self) -> bool {
        self.capture_pending
    }

    /// Record that player controls were initialized.
    pub fn mark_initialized(&mut self) {
        self.initialized = true;
    }

    /// Note an outstanding capture request. Ignored in fallback.
    pub fn capture_requested(&mut self) {
        if !self.mode.is_terminal() {
            self.capture_pending = true;
        }
    }

    /// The platform granted capture.
    pub fn capture_acquired(&mut self) -> Option<ControlEvent> {
        self.capture_pending = false;
        match self.mode {
            ControlMode::Unlocked => self.transition(ControlMode::Locked, ControlEvent::Lock),
            ControlMode::Locked | ControlMode::Paused | ControlMode::OrbitFallback => None,
        }
    }

    /// The platform took capture away.
    ///
    /// Only matters while locked; in pause the controller released capture
    /// itself.
    pub fn capture_lost(&mut self) -> Option<ControlEvent> {
        self.capture_pending = false;
        match self.mode {
            ControlMode::Locked => self.transition(ControlMode::Unlocked, ControlEvent::Unlock),
            ControlMode::Unlocked | ControlMode::Paused | ControlMode::OrbitFallback => None,
        }
    }

    /// Escape pressed.
    ///
    /// Locked enters pause. Paused leaves it to `Unlocked`; the controller
    /// then re-requests capture when [`ModeMachine::is_initialized`], and
    /// the grant moves the machine on to `Locked`. Ignored elsewhere.
    pub fn toggle_pause(&mut self) -> Option<ControlEvent> {
        match self.mode {
            ControlMode::Locked => self.transition(ControlMode::Paused, ControlEvent::Pause(true)),
            ControlMode::Paused => self.transition(ControlMode::Unlocked, ControlEvent::Pause(false)),
            ControlMode::Unlocked | ControlMode::OrbitFallback => None,
        }
    }

    /// Capture is unsupported or failed. Fires `Fallback` exactly once.
    pub fn enter_fallback(&mut self) -> Option<ControlEvent> {
        self.capture_pending = false;
        if self.mode.is_terminal() {
            return None;
        }
        self.transition(ControlMode::OrbitFallback, ControlEvent::Fallback)
    }

    fn transition(&mut self, to: ControlMode, event: ControlEvent) -> Option<ControlEvent> {
        log::debug!("control mode {} -> {}", self.mode, to);
        self.mode = to;
        Some(event)
    }
}
