//! Player Controller
//!
//! Owns everything the first-person walk needs: the scene and its collider
//! registry, player and input state, the camera views, the control-mode
//! machine, both one-shot timers and the outgoing event queue.
//!
//! Input handlers only set flags or trigger mode transitions. All movement
//! happens inside [`PlayerController::frame`].
//!
//! # Usage
//!
//! ```rust,ignore
//! let mut controller = PlayerController::new(capture, scene, room, spawn, config);
//!
//! // UI start button
//! controller.request_start();
//!
//! // Event loop
//! controller.handle_key(KeyCode::W, true);
//! controller.handle_mouse_motion(dx, dy);
//!
//! // Render loop
//! controller.frame(dt);
//! for event in controller.drain_events() {
//!     event.dispatch_to(&mut overlay);
//! }
//! let camera = controller.camera();
//! ```

use glam::Vec3;

use crate::camera::fps_view::CameraView;
use crate::camera::orbit::{OrbitCamera, OrbitMouseButton};
use crate::input::keyboard::{InputState, KeyCode};
use crate::input::mouse_state::FpsMouseState;
use crate::input::pointer_capture::{CaptureNotice, CaptureRequest, PointerCapture};
use crate::input::MouseButton;
use crate::physics::collision::ColliderRegistry;
use crate::world::room::RoomBounds;
use crate::world::scene::Scene;

use super::config::{ControllerConfig, SpawnPoint};
use super::control_mode::{ControlMode, ModeMachine};
use super::events::ControlEvent;
use super::locomotion::LocomotionIntegrator;
use super::state::PlayerState;
use super::timer::OneShotTimer;

/// First-person controller bound to a pointer capture backend.
pub struct PlayerController<P: PointerCapture> {
    capture: P,
    scene: Scene,
    room: RoomBounds,
    colliders: ColliderRegistry,
    integrator: LocomotionIntegrator,
    spawn: SpawnPoint,

    state: PlayerState,
    input: InputState,
    mouse: FpsMouseState,
    view: CameraView,
    orbit: OrbitCamera,
    machine: ModeMachine,

    /// Re-enables jumping after a launch
    jump_cooldown: OneShotTimer,
    /// Delay between the start action and the capture request
    start_timer: OneShotTimer,

    events: Vec<ControlEvent>,
    elapsed: f32,
    mounted: bool,
}

impl<P: PointerCapture> PlayerController<P> {
    /// Mount the controller: build colliders, place the player at the
    /// spawn point and detect capture support.
    ///
    /// When the platform cannot capture the pointer the controller starts
    /// in the orbit fallback and a `Fallback` event is queued.
    pub fn new(
        capture: P,
        scene: Scene,
        room: RoomBounds,
        spawn: SpawnPoint,
        config: ControllerConfig,
    ) -> Self {
        let colliders = ColliderRegistry::build(&scene, &room);
        let spawn = SpawnPoint {
            position: Vec3::new(
                spawn.position.x,
                spawn.position.y.max(config.eye_height),
                spawn.position.z,
            ),
            yaw: spawn.yaw,
        };

        let mut view = CameraView::with_pose(spawn.position, spawn.yaw);
        view.sensitivity = config.mouse_sensitivity;
        let orbit = OrbitCamera::looking_from(spawn.position, view.horizontal_forward(), config.orbit_distance);

        let mut controller = Self {
            capture,
            scene,
            room,
            colliders,
            integrator: LocomotionIntegrator::new(config),
            spawn,
            state: PlayerState::at(spawn.position),
            input: InputState::new(),
            mouse: FpsMouseState::new(),
            view,
            orbit,
            machine: ModeMachine::new(),
            jump_cooldown: OneShotTimer::new(),
            start_timer: OneShotTimer::new(),
            events: Vec::new(),
            elapsed: 0.0,
            mounted: true,
        };

        if !controller.capture.is_supported() {
            log::warn!("pointer capture unsupported; using orbit controls");
            controller.enter_fallback();
        }
        controller
    }

    // ========================================================================
    // ACCESSORS
    // ========================================================================

    /// The camera as written by the last frame.
    pub fn camera(&self) -> &CameraView {
        &self.view
    }

    pub fn camera_mut(&mut self) -> &mut CameraView {
        &mut self.view
    }

    pub fn orbit_camera(&self) -> &OrbitCamera {
        &self.orbit
    }

    pub fn state(&self) -> &PlayerState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut PlayerState {
        &mut self.state
    }

    pub fn input(&self) -> &InputState {
        &self.input
    }

    pub fn mode(&self) -> ControlMode {
        self.machine.mode()
    }

    pub fn is_initialized(&self) -> bool {
        self.machine.is_initialized()
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    pub fn config(&self) -> &ControllerConfig {
        self.integrator.config()
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn room(&self) -> &RoomBounds {
        &self.room
    }

    pub fn colliders(&self) -> &ColliderRegistry {
        &self.colliders
    }

    pub fn spawn(&self) -> SpawnPoint {
        self.spawn
    }

    pub fn capture(&self) -> &P {
        &self.capture
    }

    pub fn capture_mut(&mut self) -> &mut P {
        &mut self.capture
    }

    pub fn speed_multiplier(&self) -> f32 {
        self.integrator.speed_multiplier()
    }

    /// Whether the start delay is running.
    pub fn is_start_pending(&self) -> bool {
        self.start_timer.is_pending()
    }

    /// Whether the jump cooldown is running.
    pub fn is_jump_cooling_down(&self) -> bool {
        self.jump_cooldown.is_pending()
    }

    /// Total simulated time in seconds.
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Take every queued event, oldest first.
    pub fn drain_events(&mut self) -> Vec<ControlEvent> {
        std::mem::take(&mut self.events)
    }

    // ========================================================================
    // ENTRY POINTS
    // ========================================================================

    /// The UI start action. Capture is requested after the start delay.
    ///
    /// Returns `false` if there is nothing to start (already locked,
    /// paused, in fallback, or a start is already scheduled).
    pub fn request_start(&mut self) -> bool {
        if !self.mounted || self.mode() != ControlMode::Unlocked || self.start_timer.is_pending() {
            return false;
        }
        let delay = self.config().start_delay;
        self.start_timer.start(delay);
        log::debug!("start requested, capturing in {delay:.2}s");
        true
    }

    /// Reset the player to the spawn point and request pointer capture.
    ///
    /// Returns `false` outside `Unlocked`.
    pub fn initialize_player_controls(&mut self) -> bool {
        if !self.mounted || self.mode() != ControlMode::Unlocked {
            return false;
        }
        self.start_timer.cancel();
        self.jump_cooldown.cancel();
        self.machine.mark_initialized();

        self.state.reset_to(self.spawn.position);
        self.view.position = self.spawn.position;
        self.view.yaw = self.spawn.yaw;
        self.view.set_pitch(0.0);

        self.acquire_capture();
        true
    }

    /// Mount touch affordances when the device has a touch screen.
    pub fn append_touch_controls(&mut self) -> bool {
        if !self.mounted || !self.capture.is_touch_device() {
            return false;
        }
        self.capture.mount_touch_controls()
    }

    /// Replace the scene; the collider registry is rebuilt from scratch.
    pub fn set_scene(&mut self, scene: Scene, room: RoomBounds) {
        self.colliders = ColliderRegistry::build(&scene, &room);
        self.scene = scene;
        self.room = room;
    }

    /// Tear down: cancel timers, release capture, clear input and events.
    pub fn unmount(&mut self) {
        self.start_timer.cancel();
        self.jump_cooldown.cancel();
        if self.capture.is_captured() {
            self.capture.release_capture();
        }
        self.capture.unmount_touch_controls();
        self.capture.detach();
        self.input.reset();
        self.mouse.reset();
        self.events.clear();
        self.mounted = false;
        log::debug!("player controller unmounted");
    }

    // ========================================================================
    // INPUT HANDLERS
    // ========================================================================

    /// Key press or release. Escape toggles pause before anything else;
    /// movement keys are ignored while paused.
    pub fn handle_key(&mut self, key: KeyCode, pressed: bool) {
        if !self.mounted {
            return;
        }
        if key == KeyCode::Escape {
            if pressed {
                self.toggle_pause();
            }
            return;
        }
        if self.mode() == ControlMode::Paused {
            return;
        }
        self.input.handle_key(key, pressed);
    }

    /// Relative pointer motion in pixels.
    pub fn handle_mouse_motion(&mut self, dx: f32, dy: f32) {
        if !self.mounted {
            return;
        }
        match self.mode() {
            ControlMode::Locked => {
                self.mouse.accumulate_delta(dx, dy);
            }
            ControlMode::OrbitFallback => self.orbit.handle_mouse_motion(dx, dy),
            ControlMode::Unlocked | ControlMode::Paused => {}
        }
    }

    /// Mouse button press or release.
    ///
    /// In fallback the buttons drive the orbit camera. While unlocked after
    /// a lost capture, a left click asks for capture again.
    pub fn handle_mouse_button(&mut self, button: MouseButton, pressed: bool) {
        if !self.mounted {
            return;
        }
        match self.mode() {
            ControlMode::OrbitFallback => match button {
                MouseButton::Left => self.orbit.handle_mouse_drag(OrbitMouseButton::Left, pressed),
                MouseButton::Right => self.orbit.handle_mouse_drag(OrbitMouseButton::Right, pressed),
                MouseButton::Middle => {}
            },
            ControlMode::Unlocked => {
                if pressed
                    && button == MouseButton::Left
                    && self.machine.is_initialized()
                    && !self.machine.is_capture_pending()
                {
                    self.acquire_capture();
                }
            }
            ControlMode::Locked | ControlMode::Paused => {}
        }
    }

    /// Wheel notches, positive away from the user.
    ///
    /// Adjusts the sprint readout multiplier while locked and zooms in fallback.
    pub fn handle_wheel(&mut self, delta: f32) {
        if !self.mounted || !delta.is_finite() || delta == 0.0 {
            return;
        }
        match self.mode() {
            ControlMode::Locked => {
                let multiplier = self.integrator.adjust_speed_multiplier(delta.signum());
                log::debug!("speed multiplier {multiplier:.1}");
            }
            ControlMode::OrbitFallback => self.orbit.handle_scroll(delta),
            ControlMode::Unlocked | ControlMode::Paused => {}
        }
    }

    /// The platform reports capture was acquired (`true`) or lost (`false`).
    pub fn handle_capture_change(&mut self, captured: bool) {
        if !self.mounted {
            return;
        }
        self.mouse.set_captured(captured);
        let event = if captured {
            self.machine.capture_acquired()
        } else {
            self.machine.capture_lost()
        };
        if let Some(event) = event {
            if event == ControlEvent::Unlock {
                self.input.reset();
            }
            self.events.push(event);
        }
    }

    /// The platform reports the capture request failed.
    pub fn handle_capture_error(&mut self) {
        if !self.mounted {
            return;
        }
        if self.mode() != ControlMode::OrbitFallback {
            log::warn!("pointer capture error; switching to orbit controls");
        }
        self.enter_fallback();
    }

    /// Forward change and error notices the capture backend queued.
    pub fn poll_capture_notices(&mut self) {
        if !self.mounted {
            return;
        }
        for notice in self.capture.take_notices() {
            match notice {
                CaptureNotice::Changed(captured) => self.handle_capture_change(captured),
                CaptureNotice::Failed => self.handle_capture_error(),
            }
        }
    }

    // ========================================================================
    // FRAME
    // ========================================================================

    /// Advance one frame. Writes the camera exactly once.
    pub fn frame(&mut self, dt: f32) {
        if !self.mounted {
            return;
        }
        let dt = if dt.is_finite() {
            dt.clamp(0.0, self.config().max_frame_dt)
        } else {
            0.0
        };
        self.elapsed += dt;
        self.poll_capture_notices();

        // Timers
        if self.start_timer.tick(dt) {
            self.initialize_player_controls();
        }
        if self.jump_cooldown.tick(dt) {
            self.state.can_jump = true;
        }

        let (dx, dy) = self.mouse.consume_delta();
        let jump_requested = self.input.take_jump_request();

        match self.mode() {
            ControlMode::Locked => {
                self.view.apply_mouse_delta(dx, dy);
                if jump_requested && self.integrator.try_jump(&mut self.state) {
                    let cooldown = self.config().jump_cooldown;
                    self.jump_cooldown.start(cooldown);
                }
                let report = self.integrator.step(
                    &mut self.state,
                    &self.input,
                    &self.view,
                    &self.scene,
                    &self.colliders,
                    dt,
                    self.elapsed,
                );
                if report.footstep {
                    self.events.push(ControlEvent::Footstep);
                }
                self.view.position = self.state.position + Vec3::Y * report.bob_offset;
            }
            ControlMode::OrbitFallback => {
                let report = self
                    .integrator
                    .step_orbit(&mut self.state, &mut self.orbit, &self.input, dt);
                if report.footstep {
                    self.events.push(ControlEvent::Footstep);
                }
                let (yaw, pitch) = self.orbit.yaw_pitch();
                self.view.yaw = yaw;
                self.view.set_pitch(pitch);
                self.view.position = self.state.position;
            }
            ControlMode::Unlocked | ControlMode::Paused => {
                self.view.position = self.state.position;
            }
        }
    }

    // ========================================================================
    // TRANSITIONS
    // ========================================================================

    fn acquire_capture(&mut self) {
        self.machine.capture_requested();
        match self.capture.request_capture() {
            Ok(CaptureRequest::Granted) => {
                self.mouse.set_captured(true);
                if let Some(event) = self.machine.capture_acquired() {
                    self.events.push(event);
                }
            }
            Ok(CaptureRequest::Pending) => {
                log::debug!("pointer capture requested, awaiting platform");
            }
            Err(err) => {
                log::warn!("pointer capture failed: {err}; switching to orbit controls");
                self.enter_fallback();
            }
        }
    }

    fn toggle_pause(&mut self) {
        let Some(event) = self.machine.toggle_pause() else {
            return;
        };
        self.events.push(event);
        match event {
            ControlEvent::Pause(true) => {
                self.state.snapshot();
                self.input.reset();
                self.mouse.reset();
                self.capture.release_capture();
            }
            ControlEvent::Pause(false) => {
                self.state.restore_snapshot();
                self.view.position = self.state.position;
                if self.machine.is_initialized() {
                    self.acquire_capture();
                }
            }
            _ => {}
        }
    }

    fn enter_fallback(&mut self) {
        let Some(event) = self.machine.enter_fallback() else {
            return;
        };
        self.start_timer.cancel();
        if self.capture.is_captured() {
            self.capture.release_capture();
        }
        self.mouse.reset();
        self.state.velocity = Vec3::ZERO;
        self.state.vertical_velocity = 0.0;
        self.orbit.reposition(
            self.state.position,
            self.view.horizontal_forward(),
            self.integrator.config().orbit_distance,
        );
        self.events.push(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::pointer_capture::{CaptureBehavior, ScriptedCapture};

    fn controller(capture: ScriptedCapture) -> PlayerController<ScriptedCapture> {
        PlayerController::new(
            capture,
            Scene::new(),
            RoomBounds::default(),
            SpawnPoint::default(),
            ControllerConfig::default(),
        )
    }

    fn locked() -> PlayerController<ScriptedCapture> {
        let mut c = controller(ScriptedCapture::granting());
        assert!(c.initialize_player_controls());
        c.drain_events();
        c
    }

    #[test]
    fn test_mount_places_player_at_spawn() {
        let c = controller(ScriptedCapture::granting());
        assert_eq!(c.mode(), ControlMode::Unlocked);
        assert_eq!(c.state().position, Vec3::new(-150.0, 1.8, -250.0));
        assert!((c.camera().horizontal_forward().z - 1.0).abs() < 1e-5);
        // Only boundary volumes in an empty scene
        assert_eq!(c.colliders().len(), 6);
    }

    #[test]
    fn test_unsupported_capture_falls_back_at_mount() {
        let mut c = controller(ScriptedCapture::unsupported());
        assert_eq!(c.mode(), ControlMode::OrbitFallback);
        assert_eq!(c.drain_events(), vec![ControlEvent::Fallback]);
        assert!(!c.request_start());
    }

    #[test]
    fn test_start_waits_for_delay() {
        let mut c = controller(ScriptedCapture::granting());
        assert!(c.request_start());
        assert!(!c.request_start());
        c.frame(0.05);
        assert_eq!(c.mode(), ControlMode::Unlocked);
        c.frame(0.06);
        assert_eq!(c.mode(), ControlMode::Locked);
        assert_eq!(c.drain_events(), vec![ControlEvent::Lock]);
        assert_eq!(c.capture().request_count(), 1);
    }

    #[test]
    fn test_deferred_capture_locks_on_change_event() {
        let mut c = controller(ScriptedCapture::new(CaptureBehavior::Defer));
        c.initialize_player_controls();
        assert_eq!(c.mode(), ControlMode::Unlocked);
        c.handle_capture_change(true);
        assert_eq!(c.mode(), ControlMode::Locked);
        assert_eq!(c.drain_events(), vec![ControlEvent::Lock]);
    }

    #[test]
    fn test_rejected_capture_falls_back() {
        let mut c = controller(ScriptedCapture::new(CaptureBehavior::Reject("denied".into())));
        c.initialize_player_controls();
        assert_eq!(c.mode(), ControlMode::OrbitFallback);
        assert_eq!(c.drain_events(), vec![ControlEvent::Fallback]);
    }

    #[test]
    fn test_escape_pauses_and_resumes() {
        let mut c = locked();
        c.handle_key(KeyCode::W, true);
        c.frame(0.1);
        let moved_to = c.state().position;

        c.handle_key(KeyCode::Escape, true);
        assert_eq!(c.mode(), ControlMode::Paused);
        assert!(!c.input().forward);
        assert!(!c.capture().is_captured());

        // Movement keys ignored while paused
        c.handle_key(KeyCode::W, true);
        assert!(!c.input().forward);
        c.frame(0.1);
        assert_eq!(c.state().position, moved_to);

        c.handle_key(KeyCode::Escape, true);
        assert_eq!(c.mode(), ControlMode::Locked);
        assert_eq!(
            c.drain_events(),
            vec![ControlEvent::Pause(true), ControlEvent::Pause(false), ControlEvent::Lock]
        );
        assert_eq!(c.state().position, moved_to);
    }

    #[test]
    fn test_escape_ignored_when_unlocked() {
        let mut c = controller(ScriptedCapture::granting());
        c.handle_key(KeyCode::Escape, true);
        assert_eq!(c.mode(), ControlMode::Unlocked);
        assert!(c.drain_events().is_empty());
    }

    #[test]
    fn test_capture_lost_unlocks_and_click_recaptures() {
        let mut c = locked();
        c.handle_key(KeyCode::W, true);
        c.capture_mut().set_captured(false);
        c.handle_capture_change(false);
        assert_eq!(c.mode(), ControlMode::Unlocked);
        assert!(!c.input().forward);
        assert_eq!(c.drain_events(), vec![ControlEvent::Unlock]);

        c.handle_mouse_button(MouseButton::Left, true);
        assert_eq!(c.mode(), ControlMode::Locked);
    }

    #[test]
    fn test_wheel_adjusts_multiplier_when_locked() {
        let mut c = locked();
        c.handle_wheel(1.0);
        c.handle_wheel(1.0);
        assert!((c.speed_multiplier() - 1.2).abs() < 1e-5);
        c.handle_wheel(-5.0);
        assert!((c.speed_multiplier() - 1.1).abs() < 1e-5);
    }

    #[test]
    fn test_touch_controls_only_on_touch_device() {
        let mut desktop = controller(ScriptedCapture::granting());
        assert!(!desktop.append_touch_controls());
        let mut tablet = controller(ScriptedCapture::granting().with_touch());
        assert!(tablet.append_touch_controls());
        assert!(tablet.capture().touch_mounted());
    }

    #[test]
    fn test_unmount_cancels_timers_and_releases() {
        let mut c = locked();
        c.handle_key(KeyCode::Space, true);
        c.frame(0.016);
        assert!(c.is_jump_cooling_down());

        c.unmount();
        assert!(!c.is_jump_cooling_down());
        assert!(!c.is_start_pending());
        assert!(!c.capture().is_captured());
        assert!(c.capture().is_detached());
        assert!(c.drain_events().is_empty());

        // Nothing runs after unmount
        let before = c.state().position;
        c.frame(0.1);
        assert_eq!(c.state().position, before);
    }

    #[test]
    fn test_backend_notices_drive_lock_and_unlock() {
        let mut c = controller(ScriptedCapture::new(CaptureBehavior::Defer));
        assert!(c.initialize_player_controls());
        c.frame(0.016);
        assert_eq!(c.mode(), ControlMode::Unlocked);

        c.capture_mut().push_notice(CaptureNotice::Changed(true));
        c.frame(0.016);
        assert_eq!(c.mode(), ControlMode::Locked);
        assert_eq!(c.drain_events(), vec![ControlEvent::Lock]);

        c.capture_mut().push_notice(CaptureNotice::Changed(false));
        c.frame(0.016);
        assert_eq!(c.mode(), ControlMode::Unlocked);
        assert_eq!(c.drain_events(), vec![ControlEvent::Unlock]);
    }

    #[test]
    fn test_failure_notice_falls_back() {
        let mut c = controller(ScriptedCapture::new(CaptureBehavior::Defer));
        c.initialize_player_controls();
        c.capture_mut().push_notice(CaptureNotice::Failed);
        c.poll_capture_notices();
        assert_eq!(c.mode(), ControlMode::OrbitFallback);
        assert_eq!(c.drain_events(), vec![ControlEvent::Fallback]);
    }

    #[test]
    fn test_fallback_drives_orbit_camera() {
        let mut c = controller(ScriptedCapture::unsupported());
        let start = c.state().position;
        c.handle_key(KeyCode::W, true);
        c.frame(0.1);
        // Spawn faces +Z
        assert!(c.state().position.z > start.z);
        assert!(c.camera().position.y >= 1.8 - 1e-4);
    }
}
