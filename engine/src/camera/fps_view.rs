//! First-Person Camera View Module
//!
//! Orientation of the first-person camera held as yaw/pitch, plus the
//! eye position the controller writes once per frame.
//!
//! Key features:
//! - Direct mouse input → camera rotation (no button required)
//! - Configurable sensitivity (default: 0.002 rad/pixel)
//! - Pitch clamped to ±(0.89 × 90°) so the view never flips over the pole
//! - NO smoothing - instant response

use glam::Vec3;
use std::f32::consts::FRAC_PI_2;

/// Empirical pitch clamp: 0.89 of a right angle, just over 80 degrees.
pub const PITCH_LIMIT: f32 = FRAC_PI_2 * 0.89;

/// Default mouse sensitivity in radians per pixel
pub const DEFAULT_SENSITIVITY: f32 = 0.002;

/// First-person camera view.
///
/// # Coordinate System
/// - +X = right
/// - +Y = up
/// - -Z = forward at yaw = 0
///
/// Yaw increases when turning right.
#[derive(Clone, Debug, PartialEq)]
pub struct CameraView {
    /// Eye position in world space
    pub position: Vec3,
    /// Horizontal angle (radians) - unrestricted, wraps around
    pub yaw: f32,
    /// Vertical angle (radians) - clamped to ±`pitch_limit`
    pub pitch: f32,
    /// Mouse sensitivity in radians per pixel
    pub sensitivity: f32,
    pitch_limit: f32,
}

impl Default for CameraView {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            yaw: 0.0,
            pitch: 0.0,
            sensitivity: DEFAULT_SENSITIVITY,
            pitch_limit: PITCH_LIMIT,
        }
    }
}

impl CameraView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a view at `position` looking along `yaw` with a level pitch.
    pub fn with_pose(position: Vec3, yaw: f32) -> Self {
        Self {
            position,
            yaw,
            ..Default::default()
        }
    }

    /// Create a view with custom sensitivity
    pub fn with_sensitivity(sensitivity: f32) -> Self {
        Self {
            sensitivity,
            ..Default::default()
        }
    }

    /// Set the pitch angle directly (in radians, clamped to the limit)
    #[inline]
    pub fn set_pitch(&mut self, pitch: f32) {
        self.pitch = pitch.clamp(-self.pitch_limit, self.pitch_limit);
    }

    #[inline]
    pub fn pitch_limit(&self) -> f32 {
        self.pitch_limit
    }

    /// Apply a mouse movement delta (pixels) to rotate the view.
    ///
    /// Positive `dx` turns right, positive `dy` looks down.
    pub fn apply_mouse_delta(&mut self, dx: f32, dy: f32) {
        if !dx.is_finite() || !dy.is_finite() {
            return;
        }
        self.yaw += dx * self.sensitivity;
        self.pitch -= dy * self.sensitivity;
        self.pitch = self.pitch.clamp(-self.pitch_limit, self.pitch_limit);
    }

    /// The direction the camera looks, normalized.
    #[inline]
    pub fn forward(&self) -> Vec3 {
        Vec3::new(
            self.yaw.sin() * self.pitch.cos(),
            self.pitch.sin(),
            -self.yaw.cos() * self.pitch.cos(),
        )
        .normalize()
    }

    /// Forward projected onto the horizontal plane and re-normalized.
    ///
    /// Pitch never reaches ±90°, so the projection is never degenerate.
    #[inline]
    pub fn horizontal_forward(&self) -> Vec3 {
        let f = self.forward();
        Vec3::new(f.x, 0.0, f.z).normalize_or(Vec3::new(self.yaw.sin(), 0.0, -self.yaw.cos()))
    }

    /// Horizontal right vector: `horizontal_forward × up`.
    #[inline]
    pub fn right(&self) -> Vec3 {
        self.horizontal_forward().cross(Vec3::Y).normalize()
    }

    /// Camera-local up vector.
    #[inline]
    pub fn up(&self) -> Vec3 {
        let forward = self.forward();
        forward.cross(Vec3::Y).normalize().cross(forward).normalize()
    }

    /// Point the camera at a world position.
    pub fn look_at(&mut self, target: Vec3) {
        let to_target = target - self.position;
        let distance = to_target.length();

        if distance > 0.001 {
            self.yaw = to_target.x.atan2(-to_target.z);
            self.pitch = (to_target.y / distance)
                .asin()
                .clamp(-self.pitch_limit, self.pitch_limit);
        }
    }
}
