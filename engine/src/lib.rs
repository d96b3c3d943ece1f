//! Gallery Walk Engine Library
//!
//! First-person walking through a virtual gallery: a static box world,
//! a raycast-grounded player controller with axis-separated collision, and a
//! pointer-capture state machine that degrades to an orbit camera when
//! capture is unavailable.
//!
//! # Modules
//!
//! - [`physics`] - AABBs, slab raycasts and the collider registry
//! - [`world`] - Room bounds and the typed scene-node list
//! - [`input`] - Key flags, mouse deltas and pointer capture backends
//! - [`camera`] - First-person view and orbit fallback camera
//! - [`player`] - Locomotion integrator, ground sensor, modes and the controller
//! - [`game`] - Gallery layout, configuration, audio and UI collaborators
//!
//! # Example
//!
//! ```ignore
//! use gallery_walk_engine::game::{GalleryConfig, build_gallery};
//! use gallery_walk_engine::input::{KeyCode, ScriptedCapture};
//! use gallery_walk_engine::player::PlayerController;
//!
//! let config = GalleryConfig::default();
//! let scene = build_gallery(&config.room);
//! let mut controller = PlayerController::new(
//!     ScriptedCapture::granting(),
//!     scene,
//!     config.room,
//!     config.spawn,
//!     config.controller,
//! );
//!
//! controller.initialize_player_controls();
//! controller.handle_key(KeyCode::W, true);
//! controller.frame(1.0 / 60.0);
//! println!("eye at {:?}", controller.camera().position);
//! ```

pub mod camera;
pub mod input;
pub mod physics;
pub mod player;
pub mod world;

// Gallery-specific modules (located in src/game/ directory)
#[path = "../../src/game/mod.rs"]
pub mod game;

// Re-export commonly used types
pub use camera::{CameraView, OrbitCamera};
pub use input::{CaptureError, InputState, KeyCode, MouseButton, PointerCapture};
pub use physics::{Aabb, ColliderRegistry};
pub use player::{ControlEvent, ControlListener, ControlMode, ControllerConfig, PlayerController};
pub use world::{NodeTag, RoomBounds, Scene};
