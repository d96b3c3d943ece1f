//! Room Bounds Module
//!
//! Dimensions of the rectangular room the player walks in, and the
//! boundary volumes synthesized around it.
//!
//! ## Layout
//! The room is centered on the origin in X and Z, with the floor at y = 0.
//! - width runs along X (-width/2 .. +width/2)
//! - length runs along Z (-length/2 .. +length/2)
//! - height runs along Y (0 .. height)
//!
//! ## Boundary volumes
//! Walls and ceiling are `wall_thickness` thick and the floor slab is
//! `floor_thickness` thick, extending past the room by `floor_margin`.
//! The thickness keeps a fast step from tunneling through a boundary in a
//! single frame.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::physics::collision::Aabb;

/// Dimensions of the walkable room.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoomBounds {
    /// Extent along X
    pub width: f32,
    /// Extent along Z
    pub length: f32,
    /// Floor-to-ceiling height
    pub height: f32,
    /// Thickness of the synthesized wall and ceiling volumes
    pub wall_thickness: f32,
    /// Thickness of the synthesized floor slab
    pub floor_thickness: f32,
    /// How far the floor slab extends past the walls
    pub floor_margin: f32,
}

impl Default for RoomBounds {
    fn default() -> Self {
        Self {
            width: 400.0,
            length: 600.0,
            height: 160.0,
            wall_thickness: 10.0,
            floor_thickness: 20.0,
            floor_margin: 20.0,
        }
    }
}

impl RoomBounds {
    pub fn half_width(&self) -> f32 {
        self.width * 0.5
    }

    pub fn half_length(&self) -> f32 {
        self.length * 0.5
    }

    /// The interior volume of the room.
    pub fn interior(&self) -> Aabb {
        Aabb::new(
            Vec3::new(-self.half_width(), 0.0, -self.half_length()),
            Vec3::new(self.half_width(), self.height, self.half_length()),
        )
    }

    /// Whether a point lies inside the room interior (inclusive).
    pub fn contains(&self, point: Vec3) -> bool {
        self.interior().contains_point(point)
    }

    /// Clamp a position to the interior, shrunk by `margin` horizontally.
    pub fn clamp_to_interior(&self, position: Vec3, margin: f32) -> Vec3 {
        let hw = (self.half_width() - margin).max(0.0);
        let hl = (self.half_length() - margin).max(0.0);
        Vec3::new(
            position.x.clamp(-hw, hw),
            position.y.clamp(0.0, self.height),
            position.z.clamp(-hl, hl),
        )
    }

    /// Synthesized boundary volumes: floor slab, left/right/front/back walls and ceiling.
    pub fn boundary_volumes(&self) -> Vec<Aabb> {
        let hw = self.half_width();
        let hl = self.half_length();
        let h = self.height;
        let t = self.wall_thickness;
        let m = self.floor_margin;

        vec![
            // Floor slab, below the visible floor
            Aabb::new(
                Vec3::new(-hw - m, -self.floor_thickness, -hl - m),
                Vec3::new(hw + m, 0.0, hl + m),
            ),
            // Left wall
            Aabb::new(Vec3::new(-hw - t, 0.0, -hl - t), Vec3::new(-hw, h, hl + t)),
            // Right wall
            Aabb::new(Vec3::new(hw, 0.0, -hl - t), Vec3::new(hw + t, h, hl + t)),
            // Front wall
            Aabb::new(Vec3::new(-hw - t, 0.0, -hl - t), Vec3::new(hw + t, h, -hl)),
            // Back wall
            Aabb::new(Vec3::new(-hw - t, 0.0, hl), Vec3::new(hw + t, h, hl + t)),
            // Ceiling
            Aabb::new(Vec3::new(-hw - t, h, -hl - t), Vec3::new(hw + t, h + t, hl + t)),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_dimensions() {
        let room = RoomBounds::default();
        assert_eq!(room.width, 400.0);
        assert_eq!(room.length, 600.0);
        assert_eq!(room.height, 160.0);
    }

    #[test]
    fn test_six_boundary_volumes() {
        let room = RoomBounds::default();
        assert_eq!(room.boundary_volumes().len(), 6);
    }

    #[test]
    fn test_boundaries_enclose_interior() {
        let room = RoomBounds::default();
        let inside = Aabb::from_center_half_extents(Vec3::new(0.0, 50.0, 0.0), Vec3::splat(5.0));
        for volume in room.boundary_volumes() {
            assert!(!volume.intersects(&inside));
        }

        // A body pushed through the left wall overlaps it
        let through_left = inside.translated(Vec3::new(-room.half_width(), 0.0, 0.0));
        assert!(room.boundary_volumes().iter().any(|v| v.intersects(&through_left)));
    }

    #[test]
    fn test_floor_top_is_zero() {
        let room = RoomBounds::default();
        let floor = room.boundary_volumes()[0];
        assert_eq!(floor.max.y, 0.0);
        assert!(floor.min.y < 0.0);
    }

    #[test]
    fn test_clamp_to_interior() {
        let room = RoomBounds::default();
        let clamped = room.clamp_to_interior(Vec3::new(1000.0, -5.0, -1000.0), 5.0);
        assert_eq!(clamped, Vec3::new(195.0, 0.0, -295.0));
        assert!(room.contains(clamped));
    }
}
