//! Ground Sensor
//!
//! Casts a ray straight down from the eye against all scene geometry and
//! reports whether something is close enough underfoot to stand on.
//!
//! No hit (a hole in the floor, or an empty scene) simply means airborne.
//! The player free-falls until the floor clamp catches them; nothing here
//! can fail.

use glam::Vec3;

use crate::physics::collision::{RayHit, Raycast};

/// Result of one ground probe.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GroundProbe {
    /// Nearest hit below the origin within the sensor range
    pub hit: Option<RayHit>,
    /// Whether that hit is closer than the grounding threshold
    pub grounded: bool,
}

impl GroundProbe {
    /// World-space height of the surface below, if any.
    #[inline]
    pub fn surface_height(&self) -> Option<f32> {
        self.hit.map(|hit| hit.point.y)
    }
}

/// Downward ray probe with a fixed threshold distance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GroundSensor {
    /// Grounded when the nearest hit is strictly closer than this
    pub check_distance: f32,
}

impl Default for GroundSensor {
    fn default() -> Self {
        Self {
            check_distance: crate::player::config::GROUND_CHECK_DISTANCE,
        }
    }
}

impl GroundSensor {
    pub fn new(check_distance: f32) -> Self {
        Self { check_distance }
    }

    /// Cast down from `position` and report the nearest hit.
    pub fn probe(&self, position: Vec3, geometry: &impl Raycast) -> GroundProbe {
        let hit = geometry.raycast(position, Vec3::NEG_Y, self.check_distance);
        GroundProbe {
            grounded: hit.is_some_and(|hit| hit.distance < self.check_distance),
            hit,
        }
    }

    /// Whether there is ground within range below `position`.
    #[inline]
    pub fn is_grounded(&self, position: Vec3, geometry: &impl Raycast) -> bool {
        self.probe(position, geometry).grounded
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::collision::{Aabb, ColliderRegistry};

    fn floor() -> ColliderRegistry {
        ColliderRegistry::from_boxes(vec![Aabb::new(
            Vec3::new(-100.0, -20.0, -100.0),
            Vec3::new(100.0, 0.0, 100.0),
        )])
    }

    #[test]
    fn test_standing_on_floor_is_grounded() {
        let sensor = GroundSensor::default();
        let probe = sensor.probe(Vec3::new(0.0, 1.8, 0.0), &floor());
        assert!(probe.grounded);
        assert!((probe.surface_height().unwrap_or(f32::NAN)).abs() < 1e-5);
    }

    #[test]
    fn test_high_above_floor_is_airborne() {
        let sensor = GroundSensor::default();
        assert!(!sensor.is_grounded(Vec3::new(0.0, 10.0, 0.0), &floor()));
    }

    #[test]
    fn test_threshold_is_strict() {
        let sensor = GroundSensor::new(2.5);
        assert!(sensor.is_grounded(Vec3::new(0.0, 2.49, 0.0), &floor()));
        assert!(!sensor.is_grounded(Vec3::new(0.0, 2.5, 0.0), &floor()));
    }

    #[test]
    fn test_hole_in_floor_is_airborne() {
        let sensor = GroundSensor::default();
        let probe = sensor.probe(Vec3::new(500.0, 1.8, 0.0), &floor());
        assert!(!probe.grounded);
        assert!(probe.hit.is_none());
    }

    #[test]
    fn test_empty_geometry_is_airborne() {
        let sensor = GroundSensor::default();
        assert!(!sensor.is_grounded(Vec3::new(0.0, 1.8, 0.0), &ColliderRegistry::empty()));
    }
}
