//! Gallery Layout
//!
//! Builds the static scene for the default gallery: visible walls and
//! ceiling, five pedestals with glass cases, a short staircase up to a
//! platform, six free-standing pillars, half columns along the front and
//! back walls and three slim central columns. Paintings, trims and pillar
//! rings are added as decoration so they render but never block.
//!
//! Every placement is derived from [`RoomBounds`], so a resized room keeps
//! its proportions.

use glam::Vec3;

use crate::physics::collision::Aabb;
use crate::world::{NodeTag, RoomBounds, Scene};

/// Number of pedestals (and display cases) in the exhibit grid
pub const PEDESTAL_COUNT: usize = 5;
/// Steps in the staircase leading to the platform
pub const STAIR_STEPS: usize = 8;
/// Free-standing pillars, three columns by two rows
pub const PILLAR_COUNT: usize = 6;
/// Half columns on each of the front and back walls
pub const WALL_PILLARS_PER_WALL: usize = 5;
/// Slim columns across the middle of the room
pub const CENTRAL_COLUMNS: usize = 3;

/// Pedestal grid spacing as a fraction of the room's width and length
const PEDESTAL_SPACING: f32 = 0.3;
/// Pillar inset from the walls
const PILLAR_WALL_OFFSET: f32 = 30.0;
/// Visible wall and ceiling slab thickness
const SHELL_THICKNESS: f32 = 4.0;
/// Bays per wall: paintings and wall pillars sit one bay apart
const END_WALL_BAYS: f32 = 5.0;
const SIDE_WALL_BAYS: f32 = 7.5;

/// Box with a square footprint of `radius` around `(x, z)` spanning `y0..y1`.
fn column_box(x: f32, z: f32, radius: f32, y0: f32, y1: f32) -> Aabb {
    Aabb::new(Vec3::new(x - radius, y0, z - radius), Vec3::new(x + radius, y1, z + radius))
}

/// Build the full gallery scene for a room.
pub fn build_gallery(room: &RoomBounds) -> Scene {
    let mut scene = Scene::new();

    add_shell(&mut scene, room);
    add_wall_decor(&mut scene, room);
    add_exhibits(&mut scene, room);
    add_stairs(&mut scene, room);
    add_pillars(&mut scene, room);
    add_wall_pillars(&mut scene, room);
    add_central_columns(&mut scene, room);

    log::debug!(
        "gallery built: {} nodes, {} collidable",
        scene.len(),
        scene.collidable_nodes().count()
    );
    scene
}

/// Floor, four walls and ceiling as they are drawn.
fn add_shell(scene: &mut Scene, room: &RoomBounds) {
    let (w, l, h) = (room.width, room.length, room.height);
    let (hw, hl) = (room.half_width(), room.half_length());
    let t = SHELL_THICKNESS;

    scene.add(
        "floor",
        NodeTag::Floor,
        Aabb::new(Vec3::new(-hw, -1.0, -hl), Vec3::new(hw, 0.0, hl)),
    );
    scene.add(
        "wall/front",
        NodeTag::Wall,
        Aabb::from_center_size(Vec3::new(0.0, h * 0.5, -hl), Vec3::new(w, h, t)),
    );
    scene.add(
        "wall/back",
        NodeTag::Wall,
        Aabb::from_center_size(Vec3::new(0.0, h * 0.5, hl), Vec3::new(w, h, t)),
    );
    scene.add(
        "wall/left",
        NodeTag::Wall,
        Aabb::from_center_size(Vec3::new(-hw, h * 0.5, 0.0), Vec3::new(t, h, l)),
    );
    scene.add(
        "wall/right",
        NodeTag::Wall,
        Aabb::from_center_size(Vec3::new(hw, h * 0.5, 0.0), Vec3::new(t, h, l)),
    );
    scene.add(
        "ceiling",
        NodeTag::Ceiling,
        Aabb::from_center_size(Vec3::new(0.0, h, 0.0), Vec3::new(w, t, l)),
    );
}

/// Trims, paintings and the ceiling panel.
fn add_wall_decor(scene: &mut Scene, room: &RoomBounds) {
    let (w, l, h) = (room.width, room.length, room.height);
    let (hw, hl) = (room.half_width(), room.half_length());
    let inset = 2.5;
    let end_bay = w / END_WALL_BAYS;
    let side_bay = l / SIDE_WALL_BAYS;

    for (side, z) in [("front", -(hl - inset)), ("back", hl - inset)] {
        for (level, y) in [("top", h - 15.0), ("bottom", 15.0)] {
            scene.add(
                format!("trim/{side}/{level}"),
                NodeTag::Decoration,
                Aabb::from_center_size(Vec3::new(0.0, y, z), Vec3::new(w - 10.0, 5.0, 1.0)),
            );
        }
        for i in 0..5 {
            let x = (i as f32 - 2.0) * end_bay;
            scene.add(
                format!("painting/{side}-{i}"),
                NodeTag::Decoration,
                Aabb::from_center_size(Vec3::new(x, h * 0.5, z), Vec3::new(60.0, 70.0, 1.0)),
            );
        }
    }

    for (side, x) in [("left", -(hw - inset)), ("right", hw - inset)] {
        for (level, y) in [("top", h - 15.0), ("bottom", 15.0)] {
            scene.add(
                format!("trim/{side}/{level}"),
                NodeTag::Decoration,
                Aabb::from_center_size(Vec3::new(x, y, 0.0), Vec3::new(1.0, 5.0, l - 10.0)),
            );
        }
        for i in 0..7 {
            let z = (i as f32 - 3.0) * side_bay;
            scene.add(
                format!("painting/{side}-{i}"),
                NodeTag::Decoration,
                Aabb::from_center_size(Vec3::new(x, h * 0.5, z), Vec3::new(1.0, 70.0, 60.0)),
            );
        }
    }

    scene.add(
        "ceiling/panel",
        NodeTag::Decoration,
        Aabb::from_center_size(Vec3::new(0.0, h - 3.0, 0.0), Vec3::new(w - 10.0, 2.0, l - 10.0)),
    );
}

/// Pedestal bases with glass display cases, on a 3-wide grid.
fn add_exhibits(scene: &mut Scene, room: &RoomBounds) {
    let spacing_x = room.width * PEDESTAL_SPACING;
    let spacing_z = room.length * PEDESTAL_SPACING;
    for i in 0..PEDESTAL_COUNT {
        let row = (i / 3) as f32;
        let col = (i % 3) as f32;
        let x = (col - 1.0) * spacing_x;
        let z = (row - 1.0) * spacing_z;

        scene.add(
            format!("pedestal-{i}"),
            NodeTag::Pedestal,
            Aabb::from_center_size(Vec3::new(x, 0.5, z), Vec3::new(30.0, 1.0, 30.0)),
        );
        scene.add(
            format!("case-{i}"),
            NodeTag::DisplayCase,
            Aabb::from_center_size(Vec3::new(x, 11.0, z), Vec3::splat(20.0)),
        );
    }
}

/// Rising steps along +X near the back right corner, ending at a platform.
fn add_stairs(scene: &mut Scene, room: &RoomBounds) {
    let (hw, hl) = (room.half_width(), room.half_length());
    let z = hl - 80.0;

    for i in 0..STAIR_STEPS {
        let step = i as f32;
        scene.add(
            format!("stairs/step-{i}"),
            NodeTag::Structure,
            Aabb::from_center_size(
                Vec3::new(hw - 100.0 + step * 8.0, 2.0 + step * 2.0, z),
                Vec3::new(8.0, 2.0, 30.0),
            ),
        );
    }
    scene.add(
        "stairs/platform",
        NodeTag::Structure,
        Aabb::from_center_size(Vec3::new(hw - 60.0, 22.0, z), Vec3::new(30.0, 2.0, 30.0)),
    );
}

/// Free-standing pillars: shaft, base and capital block, two rings each.
fn add_pillars(scene: &mut Scene, room: &RoomBounds) {
    let h = room.height;
    let total_width = room.width - PILLAR_WALL_OFFSET * 2.0;
    let total_length = room.length - PILLAR_WALL_OFFSET * 2.0;
    let col_spacing = total_width / 2.0;
    let row_spacing = total_length;

    for i in 0..PILLAR_COUNT {
        let col = (i % 3) as f32;
        let row = (i / 3) as f32;
        let x = col * col_spacing - total_width * 0.5;
        let z = row * row_spacing - total_length * 0.5;

        scene.add(format!("pillar-{i}/shaft"), NodeTag::Pillar, column_box(x, z, 10.0, 0.0, h));
        scene.add(format!("pillar-{i}/base"), NodeTag::Pillar, column_box(x, z, 14.0, 0.0, 10.0));
        scene.add(
            format!("pillar-{i}/capital"),
            NodeTag::Pillar,
            column_box(x, z, 12.0, h - 10.0, h),
        );
        for (ring, y) in [("low", h * 0.25), ("high", h * 0.75)] {
            scene.add(
                format!("pillar-{i}/ring-{ring}"),
                NodeTag::Decoration,
                column_box(x, z, 12.0, y - 2.0, y + 2.0),
            );
        }
    }
}

/// Half columns set against the front and back walls.
fn add_wall_pillars(scene: &mut Scene, room: &RoomBounds) {
    let (h, hl) = (room.height, room.half_length());
    let bay = room.width / END_WALL_BAYS;

    for i in 0..WALL_PILLARS_PER_WALL {
        let x = (i as f32 - 2.0) * bay;
        scene.add(
            format!("wall-pillar/front-{i}"),
            NodeTag::WallPillar,
            Aabb::new(Vec3::new(x - 10.0, 0.0, -hl), Vec3::new(x + 10.0, h, -hl + 20.0)),
        );
        scene.add(
            format!("wall-pillar/back-{i}"),
            NodeTag::WallPillar,
            Aabb::new(Vec3::new(x - 10.0, 0.0, hl - 20.0), Vec3::new(x + 10.0, h, hl)),
        );
    }
}

/// Slim columns across the room's middle line.
fn add_central_columns(scene: &mut Scene, room: &RoomBounds) {
    let spacing = room.width * 0.25;
    for i in 0..CENTRAL_COLUMNS {
        let x = spacing * (i as f32 - 1.0);
        scene.add(
            format!("column-{i}"),
            NodeTag::Column,
            column_box(x, 0.0, 8.0, 0.0, room.height),
        );
    }
}
