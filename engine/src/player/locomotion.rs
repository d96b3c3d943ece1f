//! Locomotion Integrator
//!
//! Advances [`PlayerState`] by one frame: drag, ground probe, camera-relative
//! movement, gravity, head bob, axis-separated collision and footstep
//! cadence.
//!
//! # Frame Order
//!
//! 1. Drag: `v -= v * min(drag * dt, 1)`
//! 2. Ground probe (landing resets vertical velocity, settle onto the surface)
//! 3. Horizontal forward/right from the camera
//! 4. Desired direction from the flags, normalized, scaled to walk/sprint speed
//! 5. Gravity while airborne
//! 6. Head-bob offset while grounded and moving
//! 7. Vertical resolution (floor clamp, head bump, landing on boxes)
//! 8. Horizontal resolution, X then Z, each axis on its own
//! 9. Footstep cadence
//!
//! Later steps read flags set by earlier ones, so the order is fixed.
//!
//! # Usage
//!
//! ```rust,ignore
//! let integrator = LocomotionIntegrator::new(ControllerConfig::default());
//! let report = integrator.step(&mut state, &input, &view, &scene, &colliders, dt, elapsed);
//! if report.footstep {
//!     audio.play_footstep(elapsed);
//! }
//! ```

use glam::Vec3;

use crate::camera::fps_view::CameraView;
use crate::camera::orbit::OrbitCamera;
use crate::input::keyboard::InputState;
use crate::physics::collision::{Aabb, ColliderRegistry, Raycast};

use super::config::ControllerConfig;
use super::ground_sensor::GroundSensor;
use super::state::{PlayerState, player_bounds};

/// Lowest sprint speed multiplier. The multiplier only feeds the HUD
/// readout; movement always uses the configured speeds.
pub const MIN_SPEED_MULTIPLIER: f32 = 1.0;
/// Highest sprint speed multiplier.
pub const MAX_SPEED_MULTIPLIER: f32 = 4.0;
/// Wheel step for the sprint speed multiplier.
pub const SPEED_MULTIPLIER_STEP: f32 = 0.1;

/// What happened during one integrator step.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct StepReport {
    /// A footstep is due this frame
    pub footstep: bool,
    /// Vertical camera offset for head bob (camera only, never the body)
    pub bob_offset: f32,
    /// The player went from airborne to grounded this frame
    pub landed: bool,
    /// The X move was rejected by a collider
    pub blocked_x: bool,
    /// The Z move was rejected by a collider
    pub blocked_z: bool,
    /// Horizontal distance moved this frame
    pub displacement: f32,
}

/// Per-frame movement and collision for the first-person player.
#[derive(Debug, Clone)]
pub struct LocomotionIntegrator {
    config: ControllerConfig,
    sensor: GroundSensor,
    /// Sprint speed multiplier in [1, 4]
    speed_multiplier: f32,
}

impl Default for LocomotionIntegrator {
    fn default() -> Self {
        Self::new(ControllerConfig::default())
    }
}

impl LocomotionIntegrator {
    pub fn new(config: ControllerConfig) -> Self {
        Self {
            sensor: GroundSensor::new(config.ground_check_distance),
            config,
            speed_multiplier: MIN_SPEED_MULTIPLIER,
        }
    }

    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    pub fn sensor(&self) -> &GroundSensor {
        &self.sensor
    }

    #[inline]
    pub fn speed_multiplier(&self) -> f32 {
        self.speed_multiplier
    }

    /// Set the sprint multiplier, clamped to [1, 4] and snapped to 0.1 steps.
    pub fn set_speed_multiplier(&mut self, multiplier: f32) -> f32 {
        if !multiplier.is_finite() {
            return self.speed_multiplier;
        }
        let snapped = (multiplier / SPEED_MULTIPLIER_STEP).round() * SPEED_MULTIPLIER_STEP;
        self.speed_multiplier = snapped.clamp(MIN_SPEED_MULTIPLIER, MAX_SPEED_MULTIPLIER);
        self.speed_multiplier
    }

    /// Step the multiplier by `steps` wheel notches (positive = faster).
    pub fn adjust_speed_multiplier(&mut self, steps: f32) -> f32 {
        self.set_speed_multiplier(self.speed_multiplier + steps * SPEED_MULTIPLIER_STEP)
    }

    /// Target horizontal speed for the current sprint state.
    ///
    /// Never exceeds `sprint_speed`, whatever the readout multiplier is.
    #[inline]
    pub fn move_speed(&self, sprinting: bool) -> f32 {
        if sprinting {
            self.config.sprint_speed
        } else {
            self.config.walk_speed
        }
    }

    /// The player's collision box at `position`.
    #[inline]
    pub fn bounds_at(&self, position: Vec3) -> Aabb {
        player_bounds(
            position,
            self.config.eye_height,
            self.config.head_clearance,
            self.config.player_radius,
        )
    }

    /// Launch a jump if grounded and the cooldown has elapsed.
    ///
    /// Returns `true` if the player left the ground. The caller starts the
    /// cooldown timer and sets `can_jump` again when it expires.
    pub fn try_jump(&self, state: &mut PlayerState) -> bool {
        if !(state.grounded && state.can_jump) {
            return false;
        }
        state.vertical_velocity = self.config.jump_velocity;
        state.grounded = false;
        state.can_jump = false;
        true
    }

    /// Advance the first-person player by one frame.
    ///
    /// `geometry` is what the ground ray sees (all scene nodes); `colliders`
    /// is what blocks the body. `elapsed` is total running time, used for
    /// the head-bob phase.
    #[allow(clippy::too_many_arguments)]
    pub fn step(
        &self,
        state: &mut PlayerState,
        input: &InputState,
        view: &CameraView,
        geometry: &impl Raycast,
        colliders: &ColliderRegistry,
        dt: f32,
        elapsed: f32,
    ) -> StepReport {
        let cfg = &self.config;
        let dt = self.clamp_dt(dt);
        let start = state.position;
        let mut report = StepReport::default();
        state.sprinting = input.sprint;

        // 1. Drag
        let damping = (cfg.drag * dt).min(1.0);
        state.velocity -= state.velocity * damping;
        state.velocity.y = 0.0;

        // 2. Ground probe. A rising body is never grounded, so a jump
        // launched this frame survives the probe.
        let was_grounded = state.grounded;
        let probe = self.sensor.probe(state.position, geometry);
        if probe.grounded && state.vertical_velocity <= 0.0 {
            if !was_grounded {
                state.vertical_velocity = 0.0;
                report.landed = true;
            }
            state.grounded = true;
            // Settle onto the surface unless the body would end up inside
            // a neighbouring collider
            if let Some(surface) = probe.surface_height() {
                let rest = surface + cfg.eye_height;
                let settled = Vec3::new(state.position.x, rest, state.position.z);
                if state.position.y > rest && !colliders.overlaps(&self.bounds_at(settled)) {
                    state.position.y = rest;
                }
            }
        } else {
            state.grounded = false;
        }

        // 3. Camera-relative axes
        let forward = view.horizontal_forward();
        let right = forward.cross(Vec3::Y).normalize_or_zero();

        // 4. Desired movement
        let desired = desired_direction(input, forward, right);
        let moving = desired != Vec3::ZERO;
        if moving {
            state.velocity = desired * self.move_speed(input.sprint);
        }

        // 5. Gravity
        if !state.grounded {
            state.vertical_velocity -= cfg.gravity * dt;
        }

        // 6. Head bob
        if state.grounded && moving {
            let k = if input.sprint { 2.0 } else { 1.0 };
            let amplitude = cfg.bob_max_amplitude.min(state.horizontal_speed() * cfg.bob_gain);
            report.bob_offset = (elapsed * cfg.bob_frequency * k).sin() * amplitude * k;
        }

        // 7. Vertical resolution
        let tentative_y = state.position.y + state.vertical_velocity * dt;
        if tentative_y < cfg.eye_height {
            if !state.grounded {
                report.landed = true;
            }
            state.position.y = cfg.eye_height;
            state.vertical_velocity = 0.0;
            state.grounded = true;
        } else {
            let tentative = Vec3::new(state.position.x, tentative_y, state.position.z);
            if colliders.overlaps(&self.bounds_at(tentative)) {
                if state.vertical_velocity > 0.0 {
                    // Head bump
                    state.vertical_velocity = 0.0;
                } else if state.vertical_velocity < 0.0 {
                    if !state.grounded {
                        report.landed = true;
                    }
                    state.vertical_velocity = 0.0;
                    state.grounded = true;
                }
            } else {
                state.position.y = tentative_y;
            }
        }

        // 8. Horizontal resolution, one axis at a time
        let step_x = Vec3::new(state.velocity.x * dt, 0.0, 0.0);
        if step_x.x != 0.0 {
            if colliders.overlaps(&self.bounds_at(state.position + step_x)) {
                state.velocity.x = 0.0;
                report.blocked_x = true;
            } else {
                state.position += step_x;
            }
        }
        let step_z = Vec3::new(0.0, 0.0, state.velocity.z * dt);
        if step_z.z != 0.0 {
            if colliders.overlaps(&self.bounds_at(state.position + step_z)) {
                state.velocity.z = 0.0;
                report.blocked_z = true;
            } else {
                state.position += step_z;
            }
        }

        sanitize(state, start);

        // 9. Footstep cadence
        let moved = state.position - start;
        report.displacement = Vec3::new(moved.x, 0.0, moved.z).length();
        if state.grounded && report.displacement > cfg.footstep_threshold {
            report.footstep = self.advance_footsteps(state, dt, input.sprint);
        }

        report
    }

    /// Advance the orbit-fallback rig by one frame.
    ///
    /// WASD translates eye and target together along the flattened view
    /// direction; no gravity and no collision apply. The eye never drops
    /// below eye height. `state.position` mirrors the eye afterwards.
    pub fn step_orbit(
        &self,
        state: &mut PlayerState,
        orbit: &mut OrbitCamera,
        input: &InputState,
        dt: f32,
    ) -> StepReport {
        let dt = self.clamp_dt(dt);
        let mut report = StepReport::default();
        state.sprinting = input.sprint;

        let forward = orbit.horizontal_forward();
        let right = orbit.right();
        let desired = desired_direction(input, forward, right);

        if desired != Vec3::ZERO {
            let offset = desired * self.move_speed(input.sprint) * dt;
            orbit.translate(offset);
            report.displacement = offset.length();
            report.footstep = self.advance_footsteps(state, dt, input.sprint);
        }
        orbit.clamp_eye_height(self.config.eye_height);

        state.position = orbit.eye_position();
        state.velocity = Vec3::ZERO;
        state.vertical_velocity = 0.0;
        report
    }

    fn clamp_dt(&self, dt: f32) -> f32 {
        if dt.is_finite() {
            dt.clamp(0.0, self.config.max_frame_dt)
        } else {
            0.0
        }
    }

    fn advance_footsteps(&self, state: &mut PlayerState, dt: f32, sprinting: bool) -> bool {
        state.footstep_accumulator += dt;
        if state.footstep_accumulator > self.config.footstep_interval(sprinting) {
            state.footstep_accumulator = 0.0;
            true
        } else {
            false
        }
    }
}

/// Sum of the held directions, normalized so diagonals are not faster.
fn desired_direction(input: &InputState, forward: Vec3, right: Vec3) -> Vec3 {
    let mut desired = Vec3::ZERO;
    if input.forward {
        desired += forward;
    }
    if input.backward {
        desired -= forward;
    }
    if input.right {
        desired += right;
    }
    if input.left {
        desired -= right;
    }
    desired.normalize_or_zero()
}

/// Replace any non-finite motion component with a safe value.
fn sanitize(state: &mut PlayerState, fallback_position: Vec3) {
    if !state.velocity.is_finite() {
        state.velocity = Vec3::ZERO;
    }
    if !state.vertical_velocity.is_finite() {
        state.vertical_velocity = 0.0;
    }
    if !state.position.is_finite() {
        state.position = fallback_position;
    }
}
