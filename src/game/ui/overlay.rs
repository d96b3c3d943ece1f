//! Gallery Overlay
//!
//! The entry screen and heads-up text. The start button stays disabled
//! until a short readiness delay has elapsed; clicking it hides the
//! instructions and asks the controller to start. The overlay reappears
//! whenever the player ends up unlocked without being paused.

use crate::input::PointerCapture;
use crate::player::controller::PlayerController;
use crate::player::events::ControlListener;
use crate::player::timer::OneShotTimer;

/// Seconds after mount before the start button accepts clicks
pub const READINESS_DELAY: f32 = 0.8;

/// Sprint readout scale: the multiplier is shown relative to walking.
const SPRINT_DISPLAY_SCALE: f32 = 5.0;

const FIRST_PERSON_HELP: [&str; 3] = [
    "First Person Controls:",
    "WASD to move, Shift to sprint",
    "Space to jump, Scroll to adjust sprint speed, ESC to pause",
];

const ORBIT_HELP: [&str; 3] = [
    "Orbit Controls Mode:",
    "WASD to move, Shift to sprint",
    "Mouse drag to look around, Mouse wheel to zoom",
];

/// What the overlay currently shows.
#[derive(Debug, Clone)]
pub struct GalleryOverlay {
    readiness: OneShotTimer,
    ready: bool,
    show_instructions: bool,
    locked: bool,
    paused: bool,
    fallback: bool,
    speed_multiplier: f32,
}

impl Default for GalleryOverlay {
    fn default() -> Self {
        Self::new()
    }
}

impl GalleryOverlay {
    pub fn new() -> Self {
        let mut readiness = OneShotTimer::new();
        readiness.start(READINESS_DELAY);
        Self {
            readiness,
            ready: false,
            show_instructions: true,
            locked: false,
            paused: false,
            fallback: false,
            speed_multiplier: 1.0,
        }
    }

    /// Advance the readiness delay.
    pub fn tick(&mut self, dt: f32) {
        if self.readiness.tick(dt) {
            self.ready = true;
            log::debug!("overlay ready for start");
        }
    }

    #[inline]
    pub fn is_ready(&self) -> bool {
        self.ready
    }

    #[inline]
    pub fn shows_instructions(&self) -> bool {
        self.show_instructions
    }

    #[inline]
    pub fn is_locked(&self) -> bool {
        self.locked
    }

    #[inline]
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    #[inline]
    pub fn is_fallback(&self) -> bool {
        self.fallback
    }

    /// The start button was clicked.
    ///
    /// Ignored until ready. On success the instructions are hidden and the
    /// controller schedules capture; touch controls are mounted where the
    /// device supports them.
    pub fn click_start<P: PointerCapture>(&mut self, controller: &mut PlayerController<P>) -> bool {
        if !self.ready {
            return false;
        }
        if !controller.request_start() {
            return false;
        }
        self.show_instructions = false;
        controller.append_touch_controls();
        true
    }

    /// Mirror the controller's sprint multiplier.
    pub fn sync_speed<P: PointerCapture>(&mut self, controller: &PlayerController<P>) {
        self.speed_multiplier = controller.speed_multiplier();
    }

    /// Sprint readout shown at the top of the screen.
    pub fn speed_label(&self) -> String {
        format!(
            "Sprint Speed: {:.1}x (Scroll to adjust)",
            self.speed_multiplier * SPRINT_DISPLAY_SCALE
        )
    }

    /// Help text for the active control scheme.
    pub fn help_lines(&self) -> &'static [&'static str] {
        if self.fallback {
            &ORBIT_HELP
        } else {
            &FIRST_PERSON_HELP
        }
    }

    /// Label of the start button.
    pub fn start_label(&self) -> &'static str {
        if self.ready { "Enter Gallery" } else { "Loading..." }
    }
}

impl ControlListener for GalleryOverlay {
    fn on_lock(&mut self) {
        self.locked = true;
        self.show_instructions = false;
    }

    fn on_unlock(&mut self) {
        if !self.paused {
            self.locked = false;
            self.show_instructions = true;
        }
    }

    fn on_fallback(&mut self) {
        self.fallback = true;
        self.locked = true;
        self.show_instructions = false;
    }

    fn on_pause(&mut self, paused: bool) {
        self.paused = paused;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::ScriptedCapture;
    use crate::player::config::{ControllerConfig, SpawnPoint};
    use crate::player::events::{ControlEvent, dispatch_all};
    use crate::world::{RoomBounds, Scene};

    fn controller(capture: ScriptedCapture) -> PlayerController<ScriptedCapture> {
        PlayerController::new(
            capture,
            Scene::new(),
            RoomBounds::default(),
            SpawnPoint::default(),
            ControllerConfig::default(),
        )
    }

    #[test]
    fn test_start_waits_for_readiness() {
        let mut overlay = GalleryOverlay::new();
        let mut controller = controller(ScriptedCapture::granting());

        overlay.tick(0.5);
        assert!(!overlay.click_start(&mut controller));
        assert!(overlay.shows_instructions());
        assert_eq!(overlay.start_label(), "Loading...");

        overlay.tick(0.4);
        assert!(overlay.is_ready());
        assert!(overlay.click_start(&mut controller));
        assert!(!overlay.shows_instructions());
        assert!(controller.is_start_pending());
    }

    #[test]
    fn test_start_then_lock_end_to_end() {
        let mut overlay = GalleryOverlay::new();
        let mut controller = controller(ScriptedCapture::granting());
        overlay.tick(1.0);
        overlay.click_start(&mut controller);

        // Start delay elapses inside the frame loop
        controller.frame(0.05);
        controller.frame(0.06);
        dispatch_all(controller.drain_events(), &mut overlay);
        assert!(overlay.is_locked());
    }

    #[test]
    fn test_unlock_while_paused_keeps_overlay_hidden() {
        let mut overlay = GalleryOverlay::new();
        dispatch_all(
            [ControlEvent::Lock, ControlEvent::Pause(true), ControlEvent::Unlock],
            &mut overlay,
        );
        assert!(overlay.is_locked());
        assert!(!overlay.shows_instructions());

        dispatch_all([ControlEvent::Pause(false), ControlEvent::Unlock], &mut overlay);
        assert!(!overlay.is_locked());
        assert!(overlay.shows_instructions());
    }

    #[test]
    fn test_fallback_switches_help() {
        let mut overlay = GalleryOverlay::new();
        assert_eq!(overlay.help_lines()[0], "First Person Controls:");
        overlay.on_fallback();
        assert!(overlay.is_fallback());
        assert_eq!(overlay.help_lines()[0], "Orbit Controls Mode:");
    }

    #[test]
    fn test_speed_label() {
        let mut overlay = GalleryOverlay::new();
        assert_eq!(overlay.speed_label(), "Sprint Speed: 5.0x (Scroll to adjust)");

        let mut controller = controller(ScriptedCapture::granting());
        controller.initialize_player_controls();
        controller.handle_wheel(1.0);
        overlay.sync_speed(&controller);
        assert_eq!(overlay.speed_label(), "Sprint Speed: 5.5x (Scroll to adjust)");
    }
}
