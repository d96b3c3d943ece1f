//! Gallery Walk - native first-person walk through the gallery
//!
//! Run with: `cargo run --bin gallery_walk [-- path/to/gallery.json]`
//!
//! Controls:
//! - Click: start (after the entry overlay is ready), re-capture after focus loss
//! - WASD / arrow keys: Move
//! - Shift: Sprint
//! - Space: Jump
//! - Mouse wheel: Adjust sprint speed (orbit mode: zoom)
//! - ESC: Pause / resume
//!
//! The window has no renderer; the camera position, mode and sprint speed
//! are shown in the title bar and logged with `RUST_LOG=debug`.
//!
//! Browser: build with `cargo build --bin gallery_walk --target wasm32-unknown-unknown`,
//! then run `wasm-bindgen` and serve. The canvas takes browser pointer lock;
//! logs go to the console.

use std::sync::Arc;

#[cfg(not(target_arch = "wasm32"))]
use std::path::PathBuf;
#[cfg(not(target_arch = "wasm32"))]
use std::time::Instant;
#[cfg(target_arch = "wasm32")]
use web_time::Instant;

use glam::Vec3;
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{DeviceEvent, DeviceId, ElementState, MouseScrollDelta, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode as WinitKey, PhysicalKey};
use winit::window::{Window, WindowAttributes, WindowId};

use gallery_walk_engine::game::{FootstepPlayer, GalleryConfig, GalleryOverlay, build_gallery};
use gallery_walk_engine::input::{KeyCode, MouseButton, PointerCapture};
use gallery_walk_engine::player::{ControlListener, ControlMode, PlayerController};

#[cfg(not(target_arch = "wasm32"))]
use gallery_walk_engine::input::WinitCapture;
#[cfg(target_arch = "wasm32")]
use gallery_walk_engine::input::WebCapture;

/// Seconds between title bar refreshes
const TITLE_REFRESH: f32 = 0.25;

#[cfg(not(target_arch = "wasm32"))]
type Capture = WinitCapture;
#[cfg(target_arch = "wasm32")]
type Capture = WebCapture;

#[cfg(not(target_arch = "wasm32"))]
fn window_capture(window: &Arc<Window>) -> Capture {
    WinitCapture::new(Arc::clone(window))
}

/// Attach the canvas to the page and take pointer lock on it.
#[cfg(target_arch = "wasm32")]
fn window_capture(window: &Arc<Window>) -> Capture {
    use winit::platform::web::WindowExtWebSys;

    let Some(canvas) = window.canvas() else {
        log::warn!("window has no canvas; pointer lock unavailable");
        return WebCapture::new("gallery-walk");
    };
    if canvas.parent_element().is_none() {
        let body = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.body());
        if let Some(body) = body {
            if let Err(err) = body.append_child(&canvas) {
                log::warn!("failed to attach canvas: {err:?}");
            }
        }
    }
    WebCapture::for_element(web_sys::Element::from(canvas))
}

fn map_key(key: WinitKey) -> KeyCode {
    match key {
        WinitKey::KeyW => KeyCode::W,
        WinitKey::KeyA => KeyCode::A,
        WinitKey::KeyS => KeyCode::S,
        WinitKey::KeyD => KeyCode::D,
        WinitKey::ArrowUp => KeyCode::ArrowUp,
        WinitKey::ArrowDown => KeyCode::ArrowDown,
        WinitKey::ArrowLeft => KeyCode::ArrowLeft,
        WinitKey::ArrowRight => KeyCode::ArrowRight,
        WinitKey::Space => KeyCode::Space,
        WinitKey::ShiftLeft => KeyCode::ShiftLeft,
        WinitKey::ShiftRight => KeyCode::ShiftRight,
        WinitKey::Escape => KeyCode::Escape,
        _ => KeyCode::Unknown,
    }
}

fn map_button(button: winit::event::MouseButton) -> Option<MouseButton> {
    match button {
        winit::event::MouseButton::Left => Some(MouseButton::Left),
        winit::event::MouseButton::Right => Some(MouseButton::Right),
        winit::event::MouseButton::Middle => Some(MouseButton::Middle),
        _ => None,
    }
}

/// Forwards controller events to both collaborators.
struct Listeners<'a> {
    overlay: &'a mut GalleryOverlay,
    footsteps: &'a mut FootstepPlayer,
}

impl ControlListener for Listeners<'_> {
    fn on_lock(&mut self) {
        log::info!("controls locked");
        self.overlay.on_lock();
    }

    fn on_unlock(&mut self) {
        log::info!("controls unlocked; click to capture again");
        self.overlay.on_unlock();
    }

    fn on_fallback(&mut self) {
        log::info!("pointer capture unavailable; orbit controls active");
        self.overlay.on_fallback();
    }

    fn on_pause(&mut self, paused: bool) {
        log::info!("{}", if paused { "paused" } else { "resumed" });
        self.overlay.on_pause(paused);
        self.footsteps.on_pause(paused);
    }

    fn on_footstep(&mut self) {
        self.footsteps.on_footstep();
    }
}

struct GalleryWalkApp {
    config: GalleryConfig,
    window: Option<Arc<Window>>,
    controller: Option<PlayerController<Capture>>,
    overlay: GalleryOverlay,
    footsteps: FootstepPlayer,
    last_frame: Instant,
    title_timer: f32,
}

impl GalleryWalkApp {
    fn new(config: GalleryConfig) -> Self {
        Self {
            config,
            window: None,
            controller: None,
            overlay: GalleryOverlay::new(),
            footsteps: FootstepPlayer::default(),
            last_frame: Instant::now(),
            title_timer: 0.0,
        }
    }

    fn dispatch_events(&mut self) {
        let Some(controller) = self.controller.as_mut() else {
            return;
        };
        let events = controller.drain_events();
        let mut listeners = Listeners {
            overlay: &mut self.overlay,
            footsteps: &mut self.footsteps,
        };
        for event in events {
            event.dispatch_to(&mut listeners);
        }
    }

    fn tick(&mut self) {
        let now = Instant::now();
        let dt = (now - self.last_frame).as_secs_f32();
        self.last_frame = now;

        self.overlay.tick(dt);
        self.footsteps.advance(dt);
        if let Some(controller) = self.controller.as_mut() {
            controller.frame(dt);
            self.overlay.sync_speed(controller);
        }
        self.dispatch_events();

        for cue in self.footsteps.drain_cues() {
            log::trace!("footstep at {:.2}s (volume {:.2})", cue.at, cue.volume);
        }

        self.title_timer += dt;
        if self.title_timer >= TITLE_REFRESH {
            self.title_timer = 0.0;
            self.refresh_title();
        }
    }

    fn refresh_title(&self) {
        let (Some(window), Some(controller)) = (self.window.as_ref(), self.controller.as_ref())
        else {
            return;
        };
        let title = if self.overlay.shows_instructions() {
            format!("Gallery Walk - {} (click to start)", self.overlay.start_label())
        } else {
            let Vec3 { x, y, z } = controller.camera().position;
            format!(
                "Gallery Walk - {} - ({x:.1}, {y:.1}, {z:.1}) - {}",
                controller.mode(),
                self.overlay.speed_label()
            )
        };
        window.set_title(&title);
    }
}

impl ApplicationHandler for GalleryWalkApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        let attrs = WindowAttributes::default()
            .with_title("Gallery Walk")
            .with_inner_size(PhysicalSize::new(1280, 720));
        let window = match event_loop.create_window(attrs) {
            Ok(window) => Arc::new(window),
            Err(err) => {
                log::error!("failed to create window: {err}");
                event_loop.exit();
                return;
            }
        };

        let scene = build_gallery(&self.config.room);
        let controller = PlayerController::new(
            window_capture(&window),
            scene,
            self.config.room,
            self.config.spawn,
            self.config.controller.clone(),
        );
        log::info!(
            "gallery ready: {} scene nodes, {} colliders",
            controller.scene().len(),
            controller.colliders().len()
        );

        self.window = Some(window);
        self.controller = Some(controller);
        self.last_frame = Instant::now();
        self.dispatch_events();
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _: WindowId, event: WindowEvent) {
        let Some(controller) = self.controller.as_mut() else {
            return;
        };
        match event {
            WindowEvent::CloseRequested => {
                controller.unmount();
                event_loop.exit();
            }
            WindowEvent::KeyboardInput { event, .. } => {
                if let PhysicalKey::Code(code) = event.physical_key {
                    let pressed = event.state == ElementState::Pressed;
                    // A held Escape must not toggle pause on every repeat
                    let repeated_escape = event.repeat && code == WinitKey::Escape;
                    if !repeated_escape {
                        controller.handle_key(map_key(code), pressed);
                    }
                }
            }
            WindowEvent::MouseInput { state, button, .. } => {
                let pressed = state == ElementState::Pressed;
                if let Some(button) = map_button(button) {
                    if pressed
                        && button == MouseButton::Left
                        && self.overlay.shows_instructions()
                        && controller.mode() == ControlMode::Unlocked
                        && !controller.is_initialized()
                    {
                        self.overlay.click_start(controller);
                    } else {
                        controller.handle_mouse_button(button, pressed);
                    }
                }
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let notches = match delta {
                    MouseScrollDelta::LineDelta(_, y) => y,
                    MouseScrollDelta::PixelDelta(pos) => pos.y as f32 / 100.0,
                };
                controller.handle_wheel(notches);
            }
            WindowEvent::Focused(false) => {
                if controller.capture().is_captured() {
                    controller.capture_mut().release_capture();
                    controller.handle_capture_change(false);
                }
            }
            WindowEvent::RedrawRequested => {
                self.tick();
            }
            _ => {}
        }
        self.dispatch_events();
    }

    fn device_event(&mut self, _: &ActiveEventLoop, _: DeviceId, event: DeviceEvent) {
        if let DeviceEvent::MouseMotion { delta } = event {
            if let Some(controller) = self.controller.as_mut() {
                controller.handle_mouse_motion(delta.0 as f32, delta.1 as f32);
            }
        }
    }

    fn about_to_wait(&mut self, _: &ActiveEventLoop) {
        if let Some(window) = self.window.as_ref() {
            window.request_redraw();
        }
    }
}

fn run(config: GalleryConfig) -> Result<(), Box<dyn std::error::Error>> {
    log::info!("Gallery Walk");
    log::info!("Click to start. WASD move, Shift sprint, Space jump, wheel sprint speed, ESC pause");

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);
    let mut app = GalleryWalkApp::new(config);
    event_loop.run_app(&mut app)?;
    Ok(())
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config_path = std::env::args().nth(1).map(PathBuf::from);
    run(GalleryConfig::load_or_default(config_path.as_deref()))
}

#[cfg(target_arch = "wasm32")]
fn main() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    if let Err(err) = run(GalleryConfig::default()) {
        log::error!("gallery walk stopped: {err}");
    }
}
