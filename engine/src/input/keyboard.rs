//! Keyboard Input Module
//!
//! Movement flags for the first-person controller. Decoupled from winit to
//! use generic key codes; the platform layer maps its own codes onto
//! [`KeyCode`].

/// Generic key codes for the gallery controls, independent of windowing system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    // Movement keys
    W,
    A,
    S,
    D,
    Space,
    ShiftLeft,
    ShiftRight,

    // Arrow keys
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,

    // Control keys
    Escape,

    /// Catch-all for unhandled keys
    Unknown,
}

impl KeyCode {
    /// Maps a DOM `KeyboardEvent.code` string (`"KeyW"`, `"ShiftLeft"`, ...).
    pub fn from_code(code: &str) -> Self {
        match code {
            "KeyW" => KeyCode::W,
            "KeyA" => KeyCode::A,
            "KeyS" => KeyCode::S,
            "KeyD" => KeyCode::D,
            "Space" => KeyCode::Space,
            "ShiftLeft" => KeyCode::ShiftLeft,
            "ShiftRight" => KeyCode::ShiftRight,
            "ArrowUp" => KeyCode::ArrowUp,
            "ArrowDown" => KeyCode::ArrowDown,
            "ArrowLeft" => KeyCode::ArrowLeft,
            "ArrowRight" => KeyCode::ArrowRight,
            "Escape" => KeyCode::Escape,
            _ => KeyCode::Unknown,
        }
    }

    /// Whether this key moves the player (directions, sprint or jump).
    pub fn is_movement(self) -> bool {
        !matches!(self, KeyCode::Escape | KeyCode::Unknown)
    }
}

/// Discrete movement flags plus the edge-triggered jump request.
///
/// Mutated only by key handlers. The integrator reads the flags; the
/// controller consumes the jump edge once per frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputState {
    /// W / ArrowUp
    pub forward: bool,
    /// S / ArrowDown
    pub backward: bool,
    /// A / ArrowLeft
    pub left: bool,
    /// D / ArrowRight
    pub right: bool,
    /// Either Shift
    pub sprint: bool,
    /// Set on the Space key-down edge, cleared when consumed
    jump_requested: bool,
    /// Whether Space is currently held, so auto-repeat does not re-trigger
    jump_held: bool,
}

impl InputState {
    /// Create a new input state with all keys released.
    pub fn new() -> Self {
        Self::default()
    }

    /// Update flags for a key press/release.
    ///
    /// Returns `true` if the key was a movement key and was handled,
    /// `false` otherwise.
    pub fn handle_key(&mut self, key: KeyCode, pressed: bool) -> bool {
        match key {
            KeyCode::W | KeyCode::ArrowUp => self.forward = pressed,
            KeyCode::S | KeyCode::ArrowDown => self.backward = pressed,
            KeyCode::A | KeyCode::ArrowLeft => self.left = pressed,
            KeyCode::D | KeyCode::ArrowRight => self.right = pressed,
            KeyCode::ShiftLeft | KeyCode::ShiftRight => self.sprint = pressed,
            KeyCode::Space => {
                if pressed && !self.jump_held {
                    self.jump_requested = true;
                }
                self.jump_held = pressed;
            }
            KeyCode::Escape | KeyCode::Unknown => return false,
        }
        true
    }

    /// Take the pending jump request, clearing it.
    #[inline]
    pub fn take_jump_request(&mut self) -> bool {
        std::mem::take(&mut self.jump_requested)
    }

    /// Whether a jump edge is waiting to be consumed.
    #[inline]
    pub fn jump_pending(&self) -> bool {
        self.jump_requested
    }

    /// Check if any directional key is currently pressed.
    #[inline]
    pub fn any_direction(&self) -> bool {
        self.forward || self.backward || self.left || self.right
    }

    /// Release every key and drop any pending jump.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
