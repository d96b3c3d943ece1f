//! Orbit Camera for the capture fallback
//!
//! A spherical-coordinate orbit camera used when exclusive pointer capture
//! is unavailable. The eye orbits a `target` point; WASD movement translates
//! eye and target together across the floor.
//!
//! Controls:
//! - Left mouse drag: Orbit (rotate around target)
//! - Right mouse drag: Pan (translate target point)
//! - Scroll wheel: Zoom (change distance from target)

use glam::Vec3;

// ============================================================================
// CONSTANTS
// ============================================================================

/// Minimum polar angle from +Y (radians); keeps the eye off the pole.
pub const MIN_POLAR: f32 = 0.1;
/// Maximum polar angle from +Y (radians).
pub const MAX_POLAR: f32 = std::f32::consts::PI - 0.1;

/// Minimum zoom distance.
const MIN_DISTANCE: f32 = 1.0;
/// Maximum zoom distance.
const MAX_DISTANCE: f32 = 200.0;
/// Default eye-to-target distance.
const DEFAULT_DISTANCE: f32 = 10.0;

/// Radians of rotation per pixel of drag at rotate speed 1.0.
const ORBIT_SENSITIVITY: f32 = 0.01;
/// Pan sensitivity factor: multiplied by distance for depth-proportional panning.
const PAN_SENSITIVITY: f32 = 0.002;
/// Scroll zoom factor: how much each scroll tick affects distance at zoom speed 1.0.
const SCROLL_FACTOR: f32 = 0.1;

// ============================================================================
// MOUSE BUTTON ENUM
// ============================================================================

/// Mouse buttons relevant to the orbit camera.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrbitMouseButton {
    /// Left mouse button -- used for orbiting.
    Left,
    /// Right mouse button -- used for panning.
    Right,
}

// ============================================================================
// ORBIT CAMERA
// ============================================================================

/// A spherical-coordinate orbit camera.
///
/// # Coordinate System
/// - Azimuth: angle around +Y in radians; 0 places the eye on +Z of the target
/// - Polar: angle from +Y in radians, clamped to [0.1, π - 0.1]
/// - Distance: eye-to-target distance, clamped to [1, 200]
#[derive(Debug, Clone)]
pub struct OrbitCamera {
    pub azimuth: f32,
    pub polar: f32,
    pub distance: f32,
    /// The point the camera orbits around.
    pub target: Vec3,
    /// Multiplier on drag rotation (default 0.5)
    pub rotate_speed: f32,
    /// Multiplier on scroll zoom (default 0.5)
    pub zoom_speed: f32,
    /// Multiplier on drag panning (default 0.5)
    pub pan_speed: f32,

    // -- Mouse interaction state --
    is_orbiting: bool,
    is_panning: bool,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self {
            azimuth: 0.0,
            polar: std::f32::consts::FRAC_PI_2,
            distance: DEFAULT_DISTANCE,
            target: Vec3::ZERO,
            rotate_speed: 0.5,
            zoom_speed: 0.5,
            pan_speed: 0.5,
            is_orbiting: false,
            is_panning: false,
        }
    }
}

impl OrbitCamera {
    pub fn new() -> Self {
        Self::default()
    }

    /// Place the eye at `eye` looking along `forward`, orbiting a target
    /// `distance` units ahead.
    pub fn looking_from(eye: Vec3, forward: Vec3, distance: f32) -> Self {
        let mut camera = Self::default();
        camera.reposition(eye, forward, distance);
        camera
    }

    /// Re-seat the orbit so the eye sits at `eye` looking along `forward`.
    pub fn reposition(&mut self, eye: Vec3, forward: Vec3, distance: f32) {
        let forward = forward.normalize_or(Vec3::NEG_Z);
        let distance = distance.clamp(MIN_DISTANCE, MAX_DISTANCE);
        self.target = eye + forward * distance;
        self.distance = distance;

        // Offset points from target back toward the eye
        let offset = -forward;
        self.polar = offset.y.clamp(-1.0, 1.0).acos().clamp(MIN_POLAR, MAX_POLAR);
        self.azimuth = offset.x.atan2(offset.z);
    }

    /// Eye (camera) position from spherical coordinates.
    pub fn eye_position(&self) -> Vec3 {
        let sin_polar = self.polar.sin();
        let offset = Vec3::new(
            self.distance * sin_polar * self.azimuth.sin(),
            self.distance * self.polar.cos(),
            self.distance * sin_polar * self.azimuth.cos(),
        );
        self.target + offset
    }

    /// Normalized view direction, eye toward target.
    pub fn view_direction(&self) -> Vec3 {
        (self.target - self.eye_position()).normalize_or(Vec3::NEG_Z)
    }

    /// View direction flattened onto the floor plane.
    pub fn horizontal_forward(&self) -> Vec3 {
        let dir = self.view_direction();
        Vec3::new(dir.x, 0.0, dir.z).normalize_or(Vec3::new(-self.azimuth.sin(), 0.0, -self.azimuth.cos()))
    }

    /// Horizontal right vector: `horizontal_forward × up`.
    pub fn right(&self) -> Vec3 {
        self.horizontal_forward().cross(Vec3::Y).normalize()
    }

    /// Yaw/pitch of the current view, in the first-person camera convention.
    pub fn yaw_pitch(&self) -> (f32, f32) {
        let dir = self.view_direction();
        (dir.x.atan2(-dir.z), dir.y.clamp(-1.0, 1.0).asin())
    }

    // ========================================================================
    // INPUT HANDLING
    // ========================================================================

    /// Handle a mouse button press or release.
    pub fn handle_mouse_drag(&mut self, button: OrbitMouseButton, pressed: bool) {
        match button {
            OrbitMouseButton::Left => self.is_orbiting = pressed,
            OrbitMouseButton::Right => self.is_panning = pressed,
        }
    }

    /// Handle relative mouse motion (pixels).
    ///
    /// - While orbiting: dx rotates around the target, dy tilts
    /// - While panning: moves the target in camera-local right/up
    pub fn handle_mouse_motion(&mut self, dx: f32, dy: f32) {
        if self.is_orbiting {
            self.rotate(-dx * ORBIT_SENSITIVITY * self.rotate_speed, -dy * ORBIT_SENSITIVITY * self.rotate_speed);
        }

        if self.is_panning {
            let scale = PAN_SENSITIVITY * self.pan_speed * self.distance;
            self.pan(-dx * scale, dy * scale);
        }
    }

    /// Rotate by raw angle deltas (radians).
    pub fn rotate(&mut self, delta_azimuth: f32, delta_polar: f32) {
        self.azimuth += delta_azimuth;
        self.polar = (self.polar + delta_polar).clamp(MIN_POLAR, MAX_POLAR);
    }

    /// Handle scroll wheel input for zooming. Positive delta zooms in.
    pub fn handle_scroll(&mut self, delta: f32) {
        self.distance *= 1.0 - delta * SCROLL_FACTOR * self.zoom_speed;
        self.distance = self.distance.clamp(MIN_DISTANCE, MAX_DISTANCE);
    }

    /// Pan the target in camera-local right/up directions.
    fn pan(&mut self, dx: f32, dy: f32) {
        let forward = self.view_direction();
        let right = forward.cross(Vec3::Y).normalize_or(Vec3::X);
        let up = right.cross(forward).normalize_or(Vec3::Y);
        self.target += right * dx + up * dy;
    }

    /// Move eye and target together.
    pub fn translate(&mut self, offset: Vec3) {
        self.target += offset;
    }

    /// Keep the eye at or above `min_eye_y`, lifting the whole rig if needed.
    pub fn clamp_eye_height(&mut self, min_eye_y: f32) {
        let eye_y = self.eye_position().y;
        if eye_y < min_eye_y {
            self.target.y += min_eye_y - eye_y;
        }
    }

    /// Returns `true` while a drag is in progress.
    pub fn is_active(&self) -> bool {
        self.is_orbiting || self.is_panning
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-4;

    fn approx_vec(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < EPSILON
    }

    #[test]
    fn test_looking_from_places_eye() {
        let eye = Vec3::new(-150.0, 1.8, -250.0);
        let cam = OrbitCamera::looking_from(eye, Vec3::Z, 10.0);
        assert!(approx_vec(cam.eye_position(), eye));
        assert!(approx_vec(cam.target, Vec3::new(-150.0, 1.8, -240.0)));
        assert!(approx_vec(cam.horizontal_forward(), Vec3::Z));
    }

    #[test]
    fn test_translate_moves_eye_and_target() {
        let mut cam = OrbitCamera::looking_from(Vec3::new(0.0, 2.0, 0.0), Vec3::NEG_Z, 10.0);
        let eye = cam.eye_position();
        cam.translate(Vec3::new(3.0, 0.0, -4.0));
        assert!(approx_vec(cam.eye_position(), eye + Vec3::new(3.0, 0.0, -4.0)));
    }

    #[test]
    fn test_orbit_drag_changes_angles() {
        let mut cam = OrbitCamera::new();
        let (az, polar) = (cam.azimuth, cam.polar);

        // Motion without a button held does nothing
        cam.handle_mouse_motion(40.0, 20.0);
        assert_eq!(cam.azimuth, az);

        cam.handle_mouse_drag(OrbitMouseButton::Left, true);
        cam.handle_mouse_motion(40.0, 20.0);
        assert!(cam.azimuth != az);
        assert!(cam.polar != polar);
        assert!(cam.is_active());
    }

    #[test]
    fn test_polar_clamped() {
        let mut cam = OrbitCamera::new();
        cam.rotate(0.0, 100.0);
        assert!((cam.polar - MAX_POLAR).abs() < EPSILON);
        cam.rotate(0.0, -100.0);
        assert!((cam.polar - MIN_POLAR).abs() < EPSILON);
    }

    #[test]
    fn test_scroll_zoom_clamped() {
        let mut cam = OrbitCamera::new();
        let initial = cam.distance;
        cam.handle_scroll(1.0);
        assert!(cam.distance < initial);
        for _ in 0..500 {
            cam.handle_scroll(2.0);
        }
        assert!(cam.distance >= MIN_DISTANCE);
        for _ in 0..500 {
            cam.handle_scroll(-2.0);
        }
        assert!(cam.distance <= MAX_DISTANCE);
    }

    #[test]
    fn test_clamp_eye_height_lifts_rig() {
        let mut cam = OrbitCamera::looking_from(Vec3::new(0.0, 1.8, 0.0), Vec3::NEG_Z, 10.0);
        cam.rotate(0.0, 1.2); // tilt eye below the target
        cam.clamp_eye_height(1.8);
        assert!(cam.eye_position().y >= 1.8 - EPSILON);
    }

    #[test]
    fn test_yaw_pitch_matches_first_person_convention() {
        let cam = OrbitCamera::looking_from(Vec3::ZERO, Vec3::NEG_Z, 10.0);
        let (yaw, pitch) = cam.yaw_pitch();
        assert!(yaw.abs() < EPSILON);
        assert!(pitch.abs() < EPSILON);
    }
}
