//! Player Tests - Locomotion Through the Controller
//!
//! Drives `PlayerController` frame by frame with an in-memory capture
//! backend and checks the movement guarantees: the floor invariant, the
//! per-frame displacement bound, jumping, sliding along walls and landing.

use glam::Vec3;
use gallery_walk_engine::input::{KeyCode, ScriptedCapture};
use gallery_walk_engine::physics::Aabb;
use gallery_walk_engine::player::{ControlMode, ControllerConfig, PlayerController, SpawnPoint};
use gallery_walk_engine::world::{NodeTag, RoomBounds, Scene};

const DT: f32 = 1.0 / 60.0;
const EPSILON: f32 = 1e-3;

fn spawn_at(position: Vec3, yaw: f32) -> SpawnPoint {
    SpawnPoint { position, yaw }
}

fn locked_controller(
    scene: Scene,
    spawn: SpawnPoint,
    config: ControllerConfig,
) -> PlayerController<ScriptedCapture> {
    let mut controller =
        PlayerController::new(ScriptedCapture::granting(), scene, RoomBounds::default(), spawn, config);
    assert!(controller.initialize_player_controls());
    assert_eq!(controller.mode(), ControlMode::Locked);
    controller.drain_events();
    controller
}

fn press(controller: &mut PlayerController<ScriptedCapture>, key: KeyCode) {
    controller.handle_key(key, true);
}

fn release(controller: &mut PlayerController<ScriptedCapture>, key: KeyCode) {
    controller.handle_key(key, false);
}

// ============================================================================
// Walking
// ============================================================================

#[test]
fn test_walk_one_second_from_spawn() {
    let mut controller = locked_controller(Scene::new(), SpawnPoint::default(), ControllerConfig::default());

    press(&mut controller, KeyCode::W);
    for _ in 0..60 {
        controller.frame(DT);
    }

    let position = controller.state().position;
    assert!((position.x + 150.0).abs() < EPSILON, "x drifted: {position:?}");
    assert!((position.y - 1.8).abs() < EPSILON, "y left eye height: {position:?}");
    assert!((position.z + 235.0).abs() < EPSILON, "z off: {position:?}");
    assert_eq!(controller.camera().position.x, position.x);
}

#[test]
fn test_frame_displacement_bounded_and_diagonal_not_faster() {
    let config = ControllerConfig::default();
    let sprint_step = config.sprint_speed * DT;

    let mut straight = locked_controller(Scene::new(), spawn_at(Vec3::new(0.0, 1.8, 0.0), 0.4), config.clone());
    let mut diagonal = locked_controller(Scene::new(), spawn_at(Vec3::new(0.0, 1.8, 0.0), 0.4), config);

    for controller in [&mut straight, &mut diagonal] {
        press(controller, KeyCode::W);
        press(controller, KeyCode::ShiftLeft);
    }
    press(&mut diagonal, KeyCode::A);

    for _ in 0..30 {
        let before_straight = straight.state().position;
        let before_diagonal = diagonal.state().position;
        straight.frame(DT);
        diagonal.frame(DT);

        let a = (straight.state().position - before_straight).length();
        let b = (diagonal.state().position - before_diagonal).length();
        assert!(a <= sprint_step + 1e-4, "straight step {a} exceeds {sprint_step}");
        assert!(b <= a + 1e-4, "diagonal step {b} faster than straight {a}");
    }
}

#[test]
fn test_sprint_bound_holds_at_max_wheel_multiplier() {
    let config = ControllerConfig::default();
    let bound = config.sprint_speed * DT;
    let mut controller = locked_controller(Scene::new(), spawn_at(Vec3::new(0.0, 1.8, 0.0), 0.0), config);

    for _ in 0..40 {
        controller.handle_wheel(1.0);
    }
    assert_eq!(controller.speed_multiplier(), gallery_walk_engine::player::MAX_SPEED_MULTIPLIER);

    press(&mut controller, KeyCode::W);
    press(&mut controller, KeyCode::ShiftLeft);
    for _ in 0..10 {
        let before = controller.state().position;
        controller.frame(DT);
        let step = (controller.state().position - before).length();
        assert!(step <= bound + 1e-4, "step {step} exceeds {bound}");
    }
}

#[test]
fn test_floor_invariant_holds_through_jumps_and_turns() {
    let scene = gallery_walk_engine::game::build_gallery(&RoomBounds::default());
    let mut controller = locked_controller(scene, SpawnPoint::default(), ControllerConfig::default());

    press(&mut controller, KeyCode::W);
    for frame in 0..600 {
        if frame % 45 == 0 {
            press(&mut controller, KeyCode::Space);
        }
        if frame % 45 == 5 {
            release(&mut controller, KeyCode::Space);
        }
        if frame % 120 == 60 {
            press(&mut controller, KeyCode::ShiftLeft);
        }
        if frame % 120 == 100 {
            release(&mut controller, KeyCode::ShiftLeft);
        }
        controller.handle_mouse_motion(7.0, 1.0);
        controller.frame(DT);

        let y = controller.state().position.y;
        assert!(y >= 1.8 - 1e-5, "frame {frame}: eye at {y}");
        assert!(controller.state().is_finite());
    }
}

// ============================================================================
// Jumping
// ============================================================================

#[test]
fn test_jump_leaves_ground_same_frame() {
    let mut controller = locked_controller(Scene::new(), SpawnPoint::default(), ControllerConfig::default());
    controller.frame(DT);
    assert!(controller.state().grounded);

    press(&mut controller, KeyCode::Space);
    controller.frame(DT);

    assert!(!controller.state().grounded);
    assert!(controller.state().vertical_velocity > 0.0);
    assert!(controller.state().position.y > 1.8);
    assert!(controller.is_jump_cooling_down());
}

#[test]
fn test_second_jump_waits_for_cooldown() {
    // Heavy gravity brings the player back down within the launch frame,
    // so only the cooldown can stop the second jump.
    let config = ControllerConfig {
        gravity: 600.0,
        jump_velocity: 5.0,
        ..Default::default()
    };
    let mut controller = locked_controller(Scene::new(), SpawnPoint::default(), config);

    press(&mut controller, KeyCode::Space);
    controller.frame(DT);
    release(&mut controller, KeyCode::Space);
    assert!(controller.state().grounded);
    assert!(controller.is_jump_cooling_down());
    assert!(!controller.state().can_jump);

    // Pressed again 1/60 s later: ignored
    press(&mut controller, KeyCode::Space);
    controller.frame(DT);
    release(&mut controller, KeyCode::Space);
    assert_eq!(controller.state().vertical_velocity, 0.0);
    assert!((controller.state().position.y - 1.8).abs() < 1e-5);

    for _ in 0..15 {
        controller.frame(DT);
    }
    assert!(!controller.is_jump_cooling_down());
    assert!(controller.state().can_jump);

    press(&mut controller, KeyCode::Space);
    controller.frame(DT);
    assert!(controller.is_jump_cooling_down());
    assert!(!controller.state().can_jump);
}

#[test]
fn test_held_space_jumps_once() {
    let mut controller = locked_controller(Scene::new(), SpawnPoint::default(), ControllerConfig::default());
    press(&mut controller, KeyCode::Space);
    for _ in 0..120 {
        // Auto-repeat delivers more presses without a release
        press(&mut controller, KeyCode::Space);
        controller.frame(DT);
    }
    // Landed again and never relaunched
    assert!(controller.state().grounded);
    assert!((controller.state().position.y - 1.8).abs() < 1e-5);
}

// ============================================================================
// Collision
// ============================================================================

#[test]
fn test_blocked_axis_slides_along_wall() {
    let mut scene = Scene::new();
    scene.add(
        "wall",
        NodeTag::Structure,
        Aabb::new(Vec3::new(5.1, 0.0, -100.0), Vec3::new(10.0, 160.0, 100.0)),
    );
    // Facing -Z, so right is +X, straight into the wall
    let mut controller = locked_controller(scene, spawn_at(Vec3::new(0.0, 1.8, 0.0), 0.0), ControllerConfig::default());
    press(&mut controller, KeyCode::W);
    press(&mut controller, KeyCode::D);

    for _ in 0..10 {
        controller.frame(DT);
    }

    let position = controller.state().position;
    assert!(position.x.abs() < 1e-5, "blocked axis moved: {position:?}");
    assert!(position.z < -1.0, "free axis did not slide: {position:?}");
}

#[test]
fn test_landing_on_platform_zeroes_vertical_velocity() {
    let mut scene = Scene::new();
    scene.add(
        "platform",
        NodeTag::Structure,
        Aabb::new(Vec3::new(-20.0, 0.0, -20.0), Vec3::new(20.0, 10.0, 20.0)),
    );
    let mut controller = locked_controller(scene, spawn_at(Vec3::new(0.0, 1.8, 50.0), 0.0), ControllerConfig::default());

    {
        let state = controller.state_mut();
        state.position = Vec3::new(0.0, 20.0, 0.0);
        state.grounded = false;
    }

    let mut landed_at = None;
    for frame in 0..120 {
        let was_grounded = controller.state().grounded;
        controller.frame(DT);
        if !was_grounded && controller.state().grounded {
            assert_eq!(controller.state().vertical_velocity, 0.0);
            landed_at = Some(frame);
            break;
        }
        assert!(controller.state().vertical_velocity < 0.0 || frame == 0);
    }

    assert!(landed_at.is_some(), "never landed");
    let y = controller.state().position.y;
    assert!((y - 11.8).abs() < 1e-3, "resting eye at {y}");
}

#[test]
fn test_spawn_below_eye_height_is_lifted() {
    let controller = PlayerController::new(
        ScriptedCapture::granting(),
        Scene::new(),
        RoomBounds::default(),
        spawn_at(Vec3::new(0.0, 0.5, 0.0), 0.0),
        ControllerConfig::default(),
    );
    assert_eq!(controller.state().position.y, 1.8);
    assert_eq!(controller.spawn().position.y, 1.8);
}

// ============================================================================
// Frame Step Hygiene
// ============================================================================

#[test]
fn test_bad_frame_steps_are_harmless() {
    let mut controller = locked_controller(Scene::new(), SpawnPoint::default(), ControllerConfig::default());
    press(&mut controller, KeyCode::W);

    let start = controller.state().position;
    controller.frame(f32::NAN);
    controller.frame(-1.0);
    assert_eq!(controller.state().position, start);

    // A long stall is clamped to the maximum step
    controller.frame(5.0);
    let moved = (controller.state().position - start).length();
    assert!(moved <= 15.0 * 0.1 + 1e-4, "moved {moved} in one clamped frame");
}

#[test]
fn test_footsteps_follow_walk_cadence() {
    let mut controller = locked_controller(Scene::new(), SpawnPoint::default(), ControllerConfig::default());
    press(&mut controller, KeyCode::W);

    let mut steps = 0;
    for _ in 0..120 {
        controller.frame(DT);
        steps += controller
            .drain_events()
            .into_iter()
            .filter(|event| *event == gallery_walk_engine::ControlEvent::Footstep)
            .count();
    }
    // 2 s at a 0.4 s interval (strictly exceeded, so slightly over 0.4 s each)
    assert!((4..=5).contains(&steps), "{steps} footsteps in 2 s");
}
