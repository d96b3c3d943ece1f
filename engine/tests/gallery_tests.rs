//! Gallery Tests - Layout, Colliders and Configuration
//!
//! Checks the built gallery against the collider registry and walks the
//! player through it.

use glam::Vec3;
use gallery_walk_engine::game::gallery::{
    CENTRAL_COLUMNS, PEDESTAL_COUNT, PILLAR_COUNT, STAIR_STEPS, WALL_PILLARS_PER_WALL,
};
use gallery_walk_engine::game::{GalleryConfig, build_gallery};
use gallery_walk_engine::input::{KeyCode, ScriptedCapture};
use gallery_walk_engine::physics::ColliderRegistry;
use gallery_walk_engine::player::{ControllerConfig, PlayerController, SpawnPoint, player_bounds};
use gallery_walk_engine::world::{NodeTag, RoomBounds};

const DT: f32 = 1.0 / 60.0;

fn gallery_controller(config: &GalleryConfig) -> PlayerController<ScriptedCapture> {
    let mut controller = PlayerController::new(
        ScriptedCapture::granting(),
        build_gallery(&config.room),
        config.room,
        config.spawn,
        config.controller.clone(),
    );
    controller.initialize_player_controls();
    controller.drain_events();
    controller
}

// ============================================================================
// Layout
// ============================================================================

#[test]
fn test_registry_holds_scene_solids_and_boundaries() {
    let room = RoomBounds::default();
    let scene = build_gallery(&room);
    let registry = ColliderRegistry::build(&scene, &room);

    let solids = 4 // walls
        + 1 // floor
        + 1 // ceiling
        + PEDESTAL_COUNT * 2
        + STAIR_STEPS + 1
        + PILLAR_COUNT * 3
        + WALL_PILLARS_PER_WALL * 2
        + CENTRAL_COLUMNS;
    assert_eq!(registry.scene_volume_count(), solids);
    assert_eq!(registry.len(), solids + room.boundary_volumes().len());
}

#[test]
fn test_every_node_inside_room_shell() {
    let room = RoomBounds::default();
    let scene = build_gallery(&room);
    let shell = room.interior().expanded(room.wall_thickness);
    for node in scene.nodes() {
        assert!(
            shell.contains_point(node.bounds.min) && shell.contains_point(node.bounds.max),
            "{} escapes the room: {:?}",
            node.name,
            node.bounds
        );
    }
}

#[test]
fn test_spawn_is_clear_of_colliders() {
    let config = GalleryConfig::default();
    let scene = build_gallery(&config.room);
    let registry = ColliderRegistry::build(&scene, &config.room);
    let body = player_bounds(
        config.spawn.position,
        config.controller.eye_height,
        config.controller.head_clearance,
        config.controller.player_radius,
    );
    assert!(!registry.overlaps(&body), "spawn overlaps {:?}", registry.first_overlap(&body));
}

#[test]
fn test_display_cases_sit_on_pedestals() {
    let scene = build_gallery(&RoomBounds::default());
    let pedestals: Vec<_> = scene.nodes_tagged(NodeTag::Pedestal).collect();
    let cases: Vec<_> = scene.nodes_tagged(NodeTag::DisplayCase).collect();
    for (pedestal, case) in pedestals.iter().zip(&cases) {
        assert_eq!(pedestal.bounds.max.y, case.bounds.min.y);
        let offset = pedestal.bounds.center() - case.bounds.center();
        assert!(offset.x.abs() < 1e-4 && offset.z.abs() < 1e-4);
    }
}

// ============================================================================
// Walking the gallery
// ============================================================================

#[test]
fn test_walk_from_entrance() {
    let config = GalleryConfig::default();
    let mut controller = gallery_controller(&config);
    controller.handle_key(KeyCode::W, true);
    for _ in 0..60 {
        controller.frame(DT);
    }
    let position = controller.state().position;
    assert!((position - Vec3::new(-150.0, 1.8, -235.0)).length() < 1e-3, "{position:?}");
    assert!(controller.state().grounded);
}

#[test]
fn test_backing_into_wall_pillar_stops_at_its_face() {
    let config = GalleryConfig::default();
    let mut controller = gallery_controller(&config);
    controller.handle_key(KeyCode::S, true);
    for _ in 0..180 {
        controller.frame(DT);
    }
    // Half column occupies z -300..-280; the body reaches 5 units behind the eye
    let z = controller.state().position.z;
    assert!(z > -275.01 && z < -274.7, "stopped at z = {z}");
}

#[test]
fn test_resized_room_keeps_player_inside() {
    let config = GalleryConfig::from_json(
        r#"{ "room": { "width": 200.0, "length": 200.0 }, "spawn": { "position": [-30.0, 1.8, -30.0] } }"#,
    )
    .expect("valid config");
    let mut controller = gallery_controller(&config);
    controller.handle_key(KeyCode::ShiftLeft, true);
    controller.handle_key(KeyCode::W, true);
    controller.handle_key(KeyCode::D, true);
    for _ in 0..600 {
        controller.frame(DT);
        assert!(config.room.contains(controller.state().position));
    }
}

#[test]
fn test_default_config_matches_spawn_point() {
    let config = GalleryConfig::default();
    assert_eq!(config.spawn, SpawnPoint::default());
    assert_eq!(config.controller, ControllerConfig::default());
}
