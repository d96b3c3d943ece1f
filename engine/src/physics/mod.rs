//! Physics module
//!
//! Static collision for the walkable gallery. Built from scratch on top of
//! glam without an external physics library: the world is a fixed set of
//! axis-aligned boxes, and the player is resolved against them one axis
//! at a time.
//!
//! # Unit System
//!
//! Scene units throughout (the gallery room is 400 x 600 x 160 units).
//! Velocities are in units per second, accelerations in units per second².
//!
//! # Submodules
//!
//! - [`collision`] - AABBs, slab raycasts and the collider registry

pub mod collision;

pub use collision::{
    Aabb, COLLISION_SKIN, ColliderRegistry, RayHit, Raycast, aabb_surface_normal,
    ray_aabb_intersect, raycast_boxes,
};
