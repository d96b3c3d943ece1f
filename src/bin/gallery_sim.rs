//! Gallery Sim - headless scripted walk
//!
//! Run with: `cargo run --bin gallery_sim [-- config.json [script.json]]`
//!
//! Drives the player controller through the default gallery at a fixed
//! 60 Hz step with an in-memory capture backend, then prints a JSON trace
//! of the walk to stdout. A script file replaces the built-in walk:
//!
//! ```json
//! {
//!   "duration": 3.0,
//!   "steps": [
//!     { "at": 0.0, "action": "start" },
//!     { "at": 1.0, "action": "key", "code": "KeyW", "pressed": true },
//!     { "at": 2.0, "action": "mouse", "dx": 40.0, "dy": 0.0 }
//!   ]
//! }
//! ```

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use gallery_walk_engine::game::{FootstepPlayer, GalleryConfig, GalleryOverlay, build_gallery};
use gallery_walk_engine::input::{CaptureBehavior, KeyCode, ScriptedCapture};
use gallery_walk_engine::player::{ControlEvent, ControlListener, PlayerController};

const STEP: f32 = 1.0 / 60.0;

/// One scripted input.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
enum Action {
    /// Click the overlay's start button
    Start,
    /// DOM key code, e.g. `KeyW` or `ShiftLeft`
    Key { code: String, pressed: bool },
    Mouse { dx: f32, dy: f32 },
    Wheel { delta: f32 },
    /// The platform takes capture away
    CaptureLost,
    /// The platform reports a capture failure
    CaptureError,
}

#[derive(Debug, Clone, Deserialize)]
struct ScriptStep {
    at: f32,
    #[serde(flatten)]
    action: Action,
}

#[derive(Debug, Clone, Deserialize)]
struct Script {
    duration: f32,
    steps: Vec<ScriptStep>,
}

impl Script {
    /// Walk forward, sprint, jump, look around, pause and resume.
    fn builtin() -> Self {
        let key = |at: f32, code: &str, pressed: bool| ScriptStep {
            at,
            action: Action::Key {
                code: code.to_string(),
                pressed,
            },
        };
        Self {
            duration: 5.0,
            steps: vec![
                ScriptStep { at: 1.0, action: Action::Start },
                key(1.2, "KeyW", true),
                key(2.2, "ShiftLeft", true),
                key(2.7, "Space", true),
                key(2.75, "Space", false),
                key(3.0, "ShiftLeft", false),
                ScriptStep {
                    at: 3.2,
                    action: Action::Mouse { dx: 40.0, dy: -10.0 },
                },
                key(3.5, "Escape", true),
                key(3.55, "Escape", false),
                key(4.0, "Escape", true),
                key(4.05, "Escape", false),
                key(4.8, "KeyW", false),
            ],
        }
    }
}

#[derive(Debug, Serialize)]
struct TraceFrame {
    t: f32,
    mode: String,
    position: [f32; 3],
    grounded: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    events: Vec<String>,
}

#[derive(Debug, Serialize)]
struct Trace {
    frames: Vec<TraceFrame>,
    footsteps_played: usize,
    footsteps_dropped: usize,
    final_position: [f32; 3],
}

/// Records which events fired on a frame and feeds the collaborators.
struct Recorder<'a> {
    overlay: &'a mut GalleryOverlay,
    footsteps: &'a mut FootstepPlayer,
    fired: Vec<String>,
}

impl ControlListener for Recorder<'_> {
    fn on_lock(&mut self) {
        self.overlay.on_lock();
    }

    fn on_unlock(&mut self) {
        self.overlay.on_unlock();
    }

    fn on_fallback(&mut self) {
        self.overlay.on_fallback();
    }

    fn on_pause(&mut self, paused: bool) {
        self.overlay.on_pause(paused);
        self.footsteps.on_pause(paused);
    }

    fn on_footstep(&mut self) {
        self.footsteps.on_footstep();
    }
}

fn event_name(event: ControlEvent) -> String {
    match event {
        ControlEvent::Lock => "lock".into(),
        ControlEvent::Unlock => "unlock".into(),
        ControlEvent::Fallback => "fallback".into(),
        ControlEvent::Pause(paused) => format!("pause:{paused}"),
        ControlEvent::Footstep => "footstep".into(),
    }
}

fn apply(
    action: &Action,
    controller: &mut PlayerController<ScriptedCapture>,
    overlay: &mut GalleryOverlay,
) {
    match action {
        Action::Start => {
            if !overlay.click_start(controller) {
                log::warn!("start ignored (overlay ready: {})", overlay.is_ready());
            }
        }
        Action::Key { code, pressed } => {
            let key = KeyCode::from_code(code);
            if key == KeyCode::Unknown {
                log::warn!("unknown key code {code:?}");
            }
            controller.handle_key(key, *pressed);
        }
        Action::Mouse { dx, dy } => controller.handle_mouse_motion(*dx, *dy),
        Action::Wheel { delta } => controller.handle_wheel(*delta),
        Action::CaptureLost => {
            controller.capture_mut().set_captured(false);
            controller.handle_capture_change(false);
        }
        Action::CaptureError => controller.handle_capture_error(),
    }
}

fn load_script(path: Option<PathBuf>) -> Result<Script, Box<dyn std::error::Error>> {
    match path {
        Some(path) => {
            let text = std::fs::read_to_string(&path)?;
            let script = serde_json::from_str(&text)?;
            log::info!("loaded script from {}", path.display());
            Ok(script)
        }
        None => Ok(Script::builtin()),
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let mut args = std::env::args().skip(1);
    let config_path = args.next().map(PathBuf::from);
    let script_path = args.next().map(PathBuf::from);

    let config = match config_path {
        Some(path) => GalleryConfig::load(path)?,
        None => GalleryConfig::default(),
    };
    let mut script = load_script(script_path)?;
    script.steps.sort_by(|a, b| a.at.total_cmp(&b.at));

    let mut controller = PlayerController::new(
        ScriptedCapture::new(CaptureBehavior::Grant),
        build_gallery(&config.room),
        config.room,
        config.spawn,
        config.controller.clone(),
    );
    let mut overlay = GalleryOverlay::new();
    let mut footsteps = FootstepPlayer::default();
    let mut played = 0;

    let frame_count = (script.duration.max(0.0) / STEP).ceil() as usize;
    let mut frames = Vec::with_capacity(frame_count);
    let mut pending = script.steps.iter().peekable();

    for frame in 0..frame_count {
        let t = frame as f32 * STEP;
        while let Some(step) = pending.next_if(|step| step.at <= t) {
            apply(&step.action, &mut controller, &mut overlay);
        }

        overlay.tick(STEP);
        footsteps.advance(STEP);
        controller.frame(STEP);
        overlay.sync_speed(&controller);

        let mut recorder = Recorder {
            overlay: &mut overlay,
            footsteps: &mut footsteps,
            fired: Vec::new(),
        };
        for event in controller.drain_events() {
            recorder.fired.push(event_name(event));
            event.dispatch_to(&mut recorder);
        }
        let fired = recorder.fired;
        played += footsteps.drain_cues().len();

        let state = controller.state();
        frames.push(TraceFrame {
            t,
            mode: controller.mode().to_string(),
            position: controller.camera().position.to_array(),
            grounded: state.grounded,
            events: fired,
        });
    }

    let trace = Trace {
        frames,
        footsteps_played: played,
        footsteps_dropped: footsteps.dropped(),
        final_position: controller.state().position.to_array(),
    };
    log::info!(
        "simulated {frame_count} frames, ended at {:?} in {}",
        trace.final_position,
        controller.mode()
    );

    serde_json::to_writer_pretty(std::io::stdout().lock(), &trace)?;
    println!();
    Ok(())
}
