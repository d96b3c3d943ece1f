//! Player Module
//!
//! The first-person player controller and its parts.
//!
//! # Components
//!
//! - [`PlayerController`] - Owns the walk: input handlers, frame loop, events
//! - [`LocomotionIntegrator`] - Per-frame drag, gravity, movement and collision
//! - [`GroundSensor`] - Downward ray probe for grounded/airborne state
//! - [`ModeMachine`] - Locked / Unlocked / Paused / OrbitFallback transitions
//! - [`OneShotTimer`] - Jump cooldown and start delay
//! - [`ControllerConfig`] - Tuning, loadable from JSON

pub mod config;
pub mod control_mode;
pub mod controller;
pub mod events;
pub mod ground_sensor;
pub mod locomotion;
pub mod state;
pub mod timer;

pub use config::{
    ConfigError, ControllerConfig, SpawnPoint, EYE_HEIGHT, GRAVITY, GROUND_CHECK_DISTANCE,
    JUMP_COOLDOWN, JUMP_VELOCITY, PLAYER_RADIUS, SPRINT_SPEED, WALK_SPEED,
};
pub use control_mode::{ControlMode, ModeMachine};
pub use controller::PlayerController;
pub use events::{ControlEvent, ControlListener, dispatch_all};
pub use ground_sensor::{GroundProbe, GroundSensor};
pub use locomotion::{
    LocomotionIntegrator, StepReport, MAX_SPEED_MULTIPLIER, MIN_SPEED_MULTIPLIER,
    SPEED_MULTIPLIER_STEP,
};
pub use state::{PlayerState, player_bounds};
pub use timer::OneShotTimer;
