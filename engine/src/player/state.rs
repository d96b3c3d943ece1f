//! Player physical state.

use glam::Vec3;

use crate::physics::collision::Aabb;

/// Everything the integrator advances each frame.
///
/// `position` is the eye position. The controller owns it exclusively and
/// mirrors it into the camera once per frame.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerState {
    /// Eye position in world space
    pub position: Vec3,
    /// Horizontal velocity in units/s (y is always 0)
    pub velocity: Vec3,
    /// Vertical velocity in units/s, positive up
    pub vertical_velocity: f32,
    pub grounded: bool,
    pub sprinting: bool,
    /// Cleared at launch, set again when the jump cooldown expires
    pub can_jump: bool,
    /// Snapshot taken when pausing, restored when resuming
    pub last_stable_position: Vec3,
    /// Seconds of grounded movement since the last footstep
    pub footstep_accumulator: f32,
}

impl PlayerState {
    /// A player standing at `position`.
    pub fn at(position: Vec3) -> Self {
        Self {
            position,
            velocity: Vec3::ZERO,
            vertical_velocity: 0.0,
            grounded: true,
            sprinting: false,
            can_jump: true,
            last_stable_position: position,
            footstep_accumulator: 0.0,
        }
    }

    /// Horizontal speed (XZ plane only).
    #[inline]
    pub fn horizontal_speed(&self) -> f32 {
        Vec3::new(self.velocity.x, 0.0, self.velocity.z).length()
    }

    /// Snapshot the current position.
    pub fn snapshot(&mut self) {
        self.last_stable_position = self.position;
    }

    /// Return to the snapshot and stop all motion.
    pub fn restore_snapshot(&mut self) {
        self.position = self.last_stable_position;
        self.velocity = Vec3::ZERO;
        self.vertical_velocity = 0.0;
    }

    /// Teleport to `position`, stopped and grounded.
    pub fn reset_to(&mut self, position: Vec3) {
        *self = Self::at(position);
    }

    /// Whether every component of the motion state is a finite number.
    pub fn is_finite(&self) -> bool {
        self.position.is_finite() && self.velocity.is_finite() && self.vertical_velocity.is_finite()
    }
}

impl Default for PlayerState {
    fn default() -> Self {
        Self::at(Vec3::ZERO)
    }
}

/// The player's collision box for an eye position.
///
/// Spans from the feet (`eye_height` below the eye) to `head_clearance`
/// above it, and `radius` to each side horizontally.
pub fn player_bounds(position: Vec3, eye_height: f32, head_clearance: f32, radius: f32) -> Aabb {
    Aabb {
        min: Vec3::new(position.x - radius, position.y - eye_height, position.z - radius),
        max: Vec3::new(position.x + radius, position.y + head_clearance, position.z + radius),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_player_is_grounded_and_still() {
        let state = PlayerState::at(Vec3::new(-150.0, 1.8, -250.0));
        assert!(state.grounded);
        assert!(state.can_jump);
        assert_eq!(state.horizontal_speed(), 0.0);
        assert_eq!(state.last_stable_position, state.position);
    }

    #[test]
    fn test_snapshot_restore() {
        let mut state = PlayerState::at(Vec3::new(1.0, 1.8, 2.0));
        state.snapshot();
        state.position = Vec3::new(9.0, 5.0, 9.0);
        state.velocity = Vec3::new(3.0, 0.0, 3.0);
        state.vertical_velocity = -4.0;
        state.restore_snapshot();
        assert_eq!(state.position, Vec3::new(1.0, 1.8, 2.0));
        assert_eq!(state.velocity, Vec3::ZERO);
        assert_eq!(state.vertical_velocity, 0.0);
    }

    #[test]
    fn test_player_bounds_feet_on_floor() {
        let bounds = player_bounds(Vec3::new(0.0, 1.8, 0.0), 1.8, 0.2, 5.0);
        assert!(bounds.min.y.abs() < 1e-6);
        assert!((bounds.max.y - 2.0).abs() < 1e-6);
        assert_eq!(bounds.size().x, 10.0);
        assert_eq!(bounds.size().z, 10.0);
    }
}
