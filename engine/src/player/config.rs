//! Controller Configuration
//!
//! Tuning values for the first-person controller. `Default` returns the
//! canonical gallery values; every field can be overridden from JSON
//! (missing fields keep their defaults).
//!
//! # Unit System
//!
//! Scene units, seconds. Speeds are units per second, accelerations units
//! per second squared.

use glam::Vec3;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Eye height above the floor
pub const EYE_HEIGHT: f32 = 1.8;
/// Walking speed in units/s
pub const WALK_SPEED: f32 = 15.0;
/// Sprinting speed in units/s
pub const SPRINT_SPEED: f32 = 30.0;
/// Horizontal drag coefficient (1/s)
pub const DRAG: f32 = 12.0;
/// Gravity acceleration in units/s²
pub const GRAVITY: f32 = 30.0;
/// Jump launch velocity in units/s
pub const JUMP_VELOCITY: f32 = 15.0;
/// Seconds after a launch before the next jump is allowed
pub const JUMP_COOLDOWN: f32 = 0.2;
/// Ground ray length
pub const GROUND_CHECK_DISTANCE: f32 = 2.5;
/// Horizontal half-extent of the player collision box
pub const PLAYER_RADIUS: f32 = 5.0;
/// Largest frame step the integrator accepts
pub const MAX_FRAME_DT: f32 = 0.1;

/// Where the player appears and which way they face.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnPoint {
    /// Eye position
    pub position: Vec3,
    /// Facing, radians; 0 looks down -Z, π looks down +Z
    pub yaw: f32,
}

impl Default for SpawnPoint {
    fn default() -> Self {
        Self {
            position: Vec3::new(-150.0, EYE_HEIGHT, -250.0),
            yaw: std::f32::consts::PI,
        }
    }
}

/// Errors raised while loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid config value `{field}` = {value}: {reason}")]
    Invalid {
        field: &'static str,
        value: f32,
        reason: &'static str,
    },
}

/// Tuning for the first-person controller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControllerConfig {
    /// Minimum camera height; the floor invariant
    pub eye_height: f32,
    pub walk_speed: f32,
    pub sprint_speed: f32,
    /// Exponential horizontal drag coefficient
    pub drag: f32,
    pub gravity: f32,
    pub jump_velocity: f32,
    pub jump_cooldown: f32,
    /// Ground ray length; grounded when the nearest hit is closer
    pub ground_check_distance: f32,
    /// Horizontal half-extent of the player collision box
    pub player_radius: f32,
    /// How far the player box reaches above the eye
    pub head_clearance: f32,

    /// Seconds between footsteps while walking
    pub footstep_interval_walk: f32,
    /// Seconds between footsteps while sprinting
    pub footstep_interval_sprint: f32,
    /// Minimum per-frame displacement that counts as moving
    pub footstep_threshold: f32,

    /// Head-bob amplitude cap
    pub bob_max_amplitude: f32,
    /// Head-bob amplitude per unit of horizontal speed
    pub bob_gain: f32,
    /// Head-bob base angular frequency
    pub bob_frequency: f32,

    /// Mouse sensitivity in radians per pixel
    pub mouse_sensitivity: f32,
    /// Delay between the start action and the capture request
    pub start_delay: f32,
    /// Frame steps are clamped to this
    pub max_frame_dt: f32,
    /// Eye-to-target distance of the orbit fallback camera
    pub orbit_distance: f32,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            eye_height: EYE_HEIGHT,
            walk_speed: WALK_SPEED,
            sprint_speed: SPRINT_SPEED,
            drag: DRAG,
            gravity: GRAVITY,
            jump_velocity: JUMP_VELOCITY,
            jump_cooldown: JUMP_COOLDOWN,
            ground_check_distance: GROUND_CHECK_DISTANCE,
            player_radius: PLAYER_RADIUS,
            head_clearance: 0.2,
            footstep_interval_walk: 0.4,
            footstep_interval_sprint: 0.2,
            footstep_threshold: 0.1,
            bob_max_amplitude: 0.04,
            bob_gain: 0.0003,
            bob_frequency: 8.0,
            mouse_sensitivity: 0.002,
            start_delay: 0.1,
            max_frame_dt: MAX_FRAME_DT,
            orbit_distance: 10.0,
        }
    }
}

impl ControllerConfig {
    /// Parse a config from JSON text. Missing fields keep their defaults.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Footstep interval for the current sprint state.
    #[inline]
    pub fn footstep_interval(&self, sprinting: bool) -> f32 {
        if sprinting {
            self.footstep_interval_sprint
        } else {
            self.footstep_interval_walk
        }
    }

    /// Reject values the integrator cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("eye_height", self.eye_height),
            ("walk_speed", self.walk_speed),
            ("sprint_speed", self.sprint_speed),
            ("gravity", self.gravity),
            ("ground_check_distance", self.ground_check_distance),
            ("player_radius", self.player_radius),
            ("footstep_interval_walk", self.footstep_interval_walk),
            ("footstep_interval_sprint", self.footstep_interval_sprint),
            ("mouse_sensitivity", self.mouse_sensitivity),
            ("max_frame_dt", self.max_frame_dt),
            ("orbit_distance", self.orbit_distance),
        ];
        for (field, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::Invalid {
                    field,
                    value,
                    reason: "must be positive",
                });
            }
        }

        let non_negative = [
            ("drag", self.drag),
            ("jump_velocity", self.jump_velocity),
            ("jump_cooldown", self.jump_cooldown),
            ("head_clearance", self.head_clearance),
            ("footstep_threshold", self.footstep_threshold),
            ("bob_max_amplitude", self.bob_max_amplitude),
            ("bob_gain", self.bob_gain),
            ("bob_frequency", self.bob_frequency),
            ("start_delay", self.start_delay),
        ];
        for (field, value) in non_negative {
            if !(value.is_finite() && value >= 0.0) {
                return Err(ConfigError::Invalid {
                    field,
                    value,
                    reason: "must be zero or positive",
                });
            }
        }

        if self.ground_check_distance <= self.eye_height {
            return Err(ConfigError::Invalid {
                field: "ground_check_distance",
                value: self.ground_check_distance,
                reason: "must exceed eye_height or the floor is never sensed",
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_canonical() {
        let config = ControllerConfig::default();
        assert_eq!(config.eye_height, 1.8);
        assert_eq!(config.walk_speed, 15.0);
        assert_eq!(config.sprint_speed, 30.0);
        assert_eq!(config.ground_check_distance, 2.5);
        assert_eq!(config.footstep_interval(false), 0.4);
        assert_eq!(config.footstep_interval(true), 0.2);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = ControllerConfig::from_json(r#"{ "walk_speed": 20.0 }"#).expect("valid json");
        assert_eq!(config.walk_speed, 20.0);
        assert_eq!(config.sprint_speed, 30.0);
    }

    #[test]
    fn test_rejects_non_positive_speed() {
        let err = ControllerConfig::from_json(r#"{ "walk_speed": 0.0 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "walk_speed", .. }));
    }

    #[test]
    fn test_rejects_short_ground_ray() {
        let config = ControllerConfig {
            ground_check_distance: 1.0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_malformed_json_is_parse_error() {
        let err = ControllerConfig::from_json("{ walk_speed: ").unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)));
    }
}
