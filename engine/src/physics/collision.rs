//! Collision detection module
//!
//! Static axis-aligned box colliders for the walkable gallery.
//! The registry is an indexable array of AABBs built once per scene load;
//! queries never walk the scene again.
//!
//! # Ray-AABB Intersection
//!
//! The slab method is used for ray-AABB intersection, which finds the
//! intersection points by computing entry and exit times for each axis.
//!
//! # Example
//!
//! ```ignore
//! use gallery_walk_engine::physics::collision::{Aabb, ColliderRegistry};
//! use glam::Vec3;
//!
//! let registry = ColliderRegistry::from_boxes(vec![
//!     Aabb::new(Vec3::new(-1.0, 0.0, -1.0), Vec3::new(1.0, 2.0, 1.0)),
//! ]);
//!
//! let player = Aabb::from_center_half_extents(Vec3::new(0.5, 1.0, 0.0), Vec3::splat(0.5));
//! assert!(registry.overlaps(&player));
//! ```

use glam::Vec3;

use crate::world::room::RoomBounds;
use crate::world::scene::Scene;

/// Penetration depth below which two boxes are considered touching, not overlapping.
///
/// Resting contact (feet exactly on a floor top) must not register as a collision,
/// otherwise every horizontal move would be rejected after a landing.
pub const COLLISION_SKIN: f32 = 1e-3;

/// An axis-aligned bounding box defined by its min and max corners.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    /// Creates a box from two corners, ordering them component-wise.
    pub fn new(a: Vec3, b: Vec3) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    /// Creates a box centered on `center` extending `half_extents` on each side.
    pub fn from_center_half_extents(center: Vec3, half_extents: Vec3) -> Self {
        let half = half_extents.abs();
        Self {
            min: center - half,
            max: center + half,
        }
    }

    /// Creates a box from a center and full size, the way box geometry is described.
    pub fn from_center_size(center: Vec3, size: Vec3) -> Self {
        Self::from_center_half_extents(center, size * 0.5)
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    /// Returns a copy grown by `margin` on every side.
    pub fn expanded(&self, margin: f32) -> Self {
        Self {
            min: self.min - Vec3::splat(margin),
            max: self.max + Vec3::splat(margin),
        }
    }

    /// Returns a copy moved by `offset`.
    pub fn translated(&self, offset: Vec3) -> Self {
        Self {
            min: self.min + offset,
            max: self.max + offset,
        }
    }

    /// Inclusive point containment test.
    pub fn contains_point(&self, point: Vec3) -> bool {
        point.cmpge(self.min).all() && point.cmple(self.max).all()
    }

    /// Strict overlap test: boxes must interpenetrate by more than
    /// [`COLLISION_SKIN`] on every axis.
    pub fn intersects(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x - COLLISION_SKIN
            && self.max.x > other.min.x + COLLISION_SKIN
            && self.min.y < other.max.y - COLLISION_SKIN
            && self.max.y > other.min.y + COLLISION_SKIN
            && self.min.z < other.max.z - COLLISION_SKIN
            && self.max.z > other.min.z + COLLISION_SKIN
    }

    /// Smallest box enclosing both boxes.
    pub fn union(&self, other: &Aabb) -> Self {
        Self {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }
}

/// Result of a ray query against static geometry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    /// World-space position where the ray entered the box
    pub point: Vec3,
    /// Outward surface normal at the hit point
    pub normal: Vec3,
    /// Distance from the ray origin to the hit point
    pub distance: f32,
    /// Index of the hit box within whatever was queried
    pub index: usize,
}

/// Anything that can answer "what does this ray hit first".
///
/// Implemented by the scene (all geometry) and by the collider registry
/// (collidable geometry only).
pub trait Raycast {
    /// Returns the nearest hit within `max_distance`, or `None`.
    ///
    /// `direction` must be normalized.
    fn raycast(&self, origin: Vec3, direction: Vec3, max_distance: f32) -> Option<RayHit>;
}

/// Performs ray-AABB (Axis-Aligned Bounding Box) intersection test using the slab method.
///
/// The slab method works by finding the intersection of the ray with each pair of
/// axis-aligned planes that make up the AABB. If the ray enters and exits the AABB
/// at valid times (t_enter < t_exit and t_exit > 0), there is an intersection.
///
/// # Arguments
///
/// * `ray_origin` - Starting point of the ray
/// * `ray_dir` - Direction of the ray (must be normalized)
/// * `aabb_min` - Minimum corner of the AABB
/// * `aabb_max` - Maximum corner of the AABB
///
/// # Returns
///
/// * `Some(t)` - Distance along the ray to the intersection point (t >= 0)
/// * `None` - No intersection or intersection is behind the ray origin
pub fn ray_aabb_intersect(
    ray_origin: Vec3,
    ray_dir: Vec3,
    aabb_min: Vec3,
    aabb_max: Vec3,
) -> Option<f32> {
    // Near-zero components get a huge inverse so the slab on that axis is
    // either "always inside" or "never inside".
    let inv_dir = Vec3::new(
        if ray_dir.x.abs() > 1e-10 { 1.0 / ray_dir.x } else { f32::MAX * ray_dir.x.signum() },
        if ray_dir.y.abs() > 1e-10 { 1.0 / ray_dir.y } else { f32::MAX * ray_dir.y.signum() },
        if ray_dir.z.abs() > 1e-10 { 1.0 / ray_dir.z } else { f32::MAX * ray_dir.z.signum() },
    );

    let t1 = (aabb_min.x - ray_origin.x) * inv_dir.x;
    let t2 = (aabb_max.x - ray_origin.x) * inv_dir.x;

    let mut t_min = t1.min(t2);
    let mut t_max = t1.max(t2);

    let t3 = (aabb_min.y - ray_origin.y) * inv_dir.y;
    let t4 = (aabb_max.y - ray_origin.y) * inv_dir.y;

    t_min = t_min.max(t3.min(t4));
    t_max = t_max.min(t3.max(t4));

    let t5 = (aabb_min.z - ray_origin.z) * inv_dir.z;
    let t6 = (aabb_max.z - ray_origin.z) * inv_dir.z;

    t_min = t_min.max(t5.min(t6));
    t_max = t_max.min(t5.max(t6));

    if t_max >= t_min && t_max >= 0.0 {
        if t_min >= 0.0 {
            Some(t_min)
        } else {
            // Ray starts inside the AABB
            Some(t_max)
        }
    } else {
        None
    }
}

/// Computes the surface normal for a point on an AABB surface.
///
/// Determines which face of the AABB the point is on and returns the outward normal.
pub fn aabb_surface_normal(point: Vec3, aabb_min: Vec3, aabb_max: Vec3) -> Vec3 {
    let center = (aabb_min + aabb_max) * 0.5;
    let half_extents = ((aabb_max - aabb_min) * 0.5).max(Vec3::splat(1e-6));
    let local = point - center;

    let normalized = local / half_extents;
    let abs_normalized = normalized.abs();

    if abs_normalized.x >= abs_normalized.y && abs_normalized.x >= abs_normalized.z {
        Vec3::new(normalized.x.signum(), 0.0, 0.0)
    } else if abs_normalized.y >= abs_normalized.x && abs_normalized.y >= abs_normalized.z {
        Vec3::new(0.0, normalized.y.signum(), 0.0)
    } else {
        Vec3::new(0.0, 0.0, normalized.z.signum())
    }
}

/// Casts a ray against a slice of boxes and returns the nearest entering hit.
///
/// Boxes that contain the ray origin are skipped: a ray fired from inside a
/// volume is not "hitting" it.
pub fn raycast_boxes<'a, I>(boxes: I, origin: Vec3, direction: Vec3, max_distance: f32) -> Option<RayHit>
where
    I: IntoIterator<Item = &'a Aabb>,
{
    let mut closest: Option<RayHit> = None;
    let mut closest_dist = max_distance;

    for (index, aabb) in boxes.into_iter().enumerate() {
        if aabb.contains_point(origin) {
            continue;
        }
        if let Some(t) = ray_aabb_intersect(origin, direction, aabb.min, aabb.max) {
            if t >= 0.0 && t < closest_dist {
                let point = origin + direction * t;
                closest = Some(RayHit {
                    point,
                    normal: aabb_surface_normal(point, aabb.min, aabb.max),
                    distance: t,
                    index,
                });
                closest_dist = t;
            }
        }
    }

    closest
}

// =============================================================================
// ColliderRegistry - static collision volumes for one scene load
// =============================================================================

/// The set of static colliders for the current scene.
///
/// Built once from the collidable scene nodes plus the synthesized room
/// boundary volumes. A new scene requires a full rebuild.
#[derive(Debug, Clone, Default)]
pub struct ColliderRegistry {
    colliders: Vec<Aabb>,
    /// Number of leading colliders that came from scene nodes
    scene_count: usize,
}

impl ColliderRegistry {
    /// Builds the registry from a scene and the room it lives in.
    pub fn build(scene: &Scene, room: &RoomBounds) -> Self {
        let mut colliders: Vec<Aabb> = scene.collidable_nodes().map(|node| node.bounds).collect();
        let scene_count = colliders.len();
        colliders.extend(room.boundary_volumes());

        log::debug!(
            "collider registry built: {} scene volumes, {} boundary volumes",
            scene_count,
            colliders.len() - scene_count
        );

        Self {
            colliders,
            scene_count,
        }
    }

    /// Builds a registry from an explicit list of boxes.
    pub fn from_boxes(colliders: Vec<Aabb>) -> Self {
        let scene_count = colliders.len();
        Self {
            colliders,
            scene_count,
        }
    }

    /// An empty registry: nothing blocks movement.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.colliders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colliders.is_empty()
    }

    /// Number of colliders taken from scene nodes (the rest are boundary volumes).
    pub fn scene_volume_count(&self) -> usize {
        self.scene_count
    }

    pub fn get(&self, index: usize) -> Option<&Aabb> {
        self.colliders.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Aabb> {
        self.colliders.iter()
    }

    /// Index of the first collider overlapping `volume`.
    pub fn first_overlap(&self, volume: &Aabb) -> Option<usize> {
        self.colliders.iter().position(|c| c.intersects(volume))
    }

    /// Whether `volume` overlaps any collider.
    pub fn overlaps(&self, volume: &Aabb) -> bool {
        self.first_overlap(volume).is_some()
    }
}

impl Raycast for ColliderRegistry {
    fn raycast(&self, origin: Vec3, direction: Vec3, max_distance: f32) -> Option<RayHit> {
        raycast_boxes(&self.colliders, origin, direction, max_distance)
    }
}
