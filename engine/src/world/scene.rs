//! Scene Module
//!
//! A flat, typed list of static scene nodes. Each node carries a tag that
//! says what it is (wall, pillar, display case, ...) and its world-space
//! bounds. The list is built once when the gallery is constructed and is
//! what the collider registry and the ground sensor read.

use glam::Vec3;

use crate::physics::collision::{Aabb, RayHit, Raycast, raycast_boxes};

/// What a scene node represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeTag {
    Floor,
    Wall,
    Ceiling,
    /// Free-standing pillar shaft, base or capital
    Pillar,
    /// Half column set against a wall
    WallPillar,
    /// Slim central column
    Column,
    /// Pedestal base under a display case
    Pedestal,
    /// Glass display case
    DisplayCase,
    /// Walkable hard structure (stairs, platforms)
    Structure,
    /// Paintings, trims, rings: visible but not solid
    Decoration,
}

impl NodeTag {
    /// Whether nodes with this tag block player movement.
    pub fn is_collidable(self) -> bool {
        !matches!(self, NodeTag::Decoration)
    }
}

/// One static piece of scene geometry.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneNode {
    /// Human-readable identifier, e.g. `pillar-3/shaft`
    pub name: String,
    pub tag: NodeTag,
    pub bounds: Aabb,
}

impl SceneNode {
    pub fn new(name: impl Into<String>, tag: NodeTag, bounds: Aabb) -> Self {
        Self {
            name: name.into(),
            tag,
            bounds,
        }
    }
}

/// The static scene: an indexable array of nodes.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    nodes: Vec<SceneNode>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a node and returns its index.
    pub fn push(&mut self, node: SceneNode) -> usize {
        self.nodes.push(node);
        self.nodes.len() - 1
    }

    /// Convenience for `push(SceneNode::new(..))`.
    pub fn add(&mut self, name: impl Into<String>, tag: NodeTag, bounds: Aabb) -> usize {
        self.push(SceneNode::new(name, tag, bounds))
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn nodes(&self) -> &[SceneNode] {
        &self.nodes
    }

    pub fn get(&self, index: usize) -> Option<&SceneNode> {
        self.nodes.get(index)
    }

    /// Nodes whose tag blocks movement.
    pub fn collidable_nodes(&self) -> impl Iterator<Item = &SceneNode> {
        self.nodes.iter().filter(|node| node.tag.is_collidable())
    }

    /// Nodes carrying a specific tag.
    pub fn nodes_tagged(&self, tag: NodeTag) -> impl Iterator<Item = &SceneNode> {
        self.nodes.iter().filter(move |node| node.tag == tag)
    }

    /// Bounds enclosing every node, if there are any.
    pub fn bounds(&self) -> Option<Aabb> {
        let mut iter = self.nodes.iter();
        let first = iter.next()?.bounds;
        Some(iter.fold(first, |acc, node| acc.union(&node.bounds)))
    }
}

impl Raycast for Scene {
    /// Casts against every node, decorative ones included.
    fn raycast(&self, origin: Vec3, direction: Vec3, max_distance: f32) -> Option<RayHit> {
        raycast_boxes(self.nodes.iter().map(|node| &node.bounds), origin, direction, max_distance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn floor() -> Aabb {
        Aabb::new(Vec3::new(-50.0, -1.0, -50.0), Vec3::new(50.0, 0.0, 50.0))
    }

    #[test]
    fn test_decoration_is_not_collidable() {
        assert!(!NodeTag::Decoration.is_collidable());
        assert!(NodeTag::DisplayCase.is_collidable());
        assert!(NodeTag::Structure.is_collidable());
    }

    #[test]
    fn test_collidable_filter() {
        let mut scene = Scene::new();
        scene.add("floor", NodeTag::Floor, floor());
        scene.add(
            "painting",
            NodeTag::Decoration,
            Aabb::from_center_size(Vec3::new(0.0, 30.0, -49.0), Vec3::new(60.0, 70.0, 1.0)),
        );
        assert_eq!(scene.len(), 2);
        assert_eq!(scene.collidable_nodes().count(), 1);
        assert_eq!(scene.nodes_tagged(NodeTag::Decoration).count(), 1);
    }

    #[test]
    fn test_raycast_down_hits_floor() {
        let mut scene = Scene::new();
        let index = scene.add("floor", NodeTag::Floor, floor());
        let hit = scene
            .raycast(Vec3::new(3.0, 1.8, -4.0), Vec3::NEG_Y, 2.5)
            .expect("floor below");
        assert_eq!(hit.index, index);
        assert!((hit.distance - 1.8).abs() < 1e-5);
        assert!((hit.point.y).abs() < 1e-5);
    }

    #[test]
    fn test_raycast_over_hole_misses() {
        let mut scene = Scene::new();
        scene.add("floor", NodeTag::Floor, floor());
        assert!(scene.raycast(Vec3::new(80.0, 1.8, 0.0), Vec3::NEG_Y, 2.5).is_none());
    }

    #[test]
    fn test_bounds_union() {
        let mut scene = Scene::new();
        assert!(scene.bounds().is_none());
        scene.add("floor", NodeTag::Floor, floor());
        scene.add(
            "ceiling",
            NodeTag::Ceiling,
            Aabb::new(Vec3::new(-10.0, 100.0, -10.0), Vec3::new(10.0, 104.0, 10.0)),
        );
        let bounds = scene.bounds().expect("non-empty");
        assert_eq!(bounds.min.y, -1.0);
        assert_eq!(bounds.max.y, 104.0);
    }
}
