//! Scene rig demo
//!
//! Opens a window and drives one of the bundled presets through the frame
//! scheduler. Drawing is stubbed by a renderer that logs what it would draw,
//! the rig description is printed whenever the active camera changes.
//!
//! Usage: cargo run -p scene_rig_demo -- [cube|orrery|space|tank]
//!
//! Keys: G toggles the axis/grid overlays, Escape quits.

use std::sync::Arc;
use scene_rig_engine::scene_rig::camera::CameraRig;
use scene_rig_engine::scene_rig::frame::{
    FrameRequester, FrameScheduler, OutputSurface, SceneRenderer, SchedulerState, Stage, SystemClock,
};
use scene_rig_engine::scene_rig::log::{LogEntry, LogSeverity, Logger};
use scene_rig_engine::scene_rig::presets::Preset;
use scene_rig_engine::scene_rig::scene::Scene;
use scene_rig_engine::scene_rig::{Engine, EngineConfig, Result as EngineResult};
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{ElementState, KeyEvent, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

// ============================================================================
// LOG BRIDGE
// ============================================================================

/// Forwards engine log entries to the `log` facade (filtered by RUST_LOG)
struct LogBridge;

impl Logger for LogBridge {
    fn log(&self, entry: &LogEntry) {
        let level = match entry.severity {
            LogSeverity::Trace => log::Level::Trace,
            LogSeverity::Debug => log::Level::Debug,
            LogSeverity::Info => log::Level::Info,
            LogSeverity::Warn => log::Level::Warn,
            LogSeverity::Error => log::Level::Error,
        };
        match (entry.file, entry.line) {
            (Some(file), Some(line)) => {
                log::log!(target: "scene_rig", level, "[{}] {} ({}:{})", entry.source, entry.message, file, line)
            }
            _ => log::log!(target: "scene_rig", level, "[{}] {}", entry.source, entry.message),
        }
    }
}

// ============================================================================
// HOST COLLABORATORS
// ============================================================================

struct WinitSurface {
    window: Arc<Window>,
}

impl OutputSurface for WinitSurface {
    fn pixel_size(&self) -> (u32, u32) {
        let size = self.window.inner_size();
        (size.width, size.height)
    }

    fn resize(&mut self, width: u32, height: u32) {
        let _ = self.window.request_inner_size(PhysicalSize::new(width, height));
    }
}

struct RedrawRequester {
    window: Arc<Window>,
}

impl FrameRequester for RedrawRequester {
    fn request_frame(&mut self) {
        self.window.request_redraw();
    }
}

/// Stand-in for a GPU renderer
struct LogRenderer {
    last_rig: Option<String>,
}

impl SceneRenderer for LogRenderer {
    fn render(&mut self, scene: &Scene, rig: &CameraRig) -> EngineResult<()> {
        if self.last_rig.as_deref() != Some(rig.name()) {
            log::info!("camera: {}", rig.description());
            self.last_rig = Some(rig.name().to_string());
        }
        let view_projection = rig.view_projection_matrix(scene)?;
        log::trace!("{} drawables through '{}' (vp[3] = {:?})",
            scene.render_list().len(), rig.name(), view_projection.w_axis);
        Ok(())
    }
}

// ============================================================================
// APPLICATION
// ============================================================================

struct DemoApp {
    preset: Preset,
    stage: Option<Stage>,
    window: Option<Arc<Window>>,
    scheduler: Option<FrameScheduler>,
    overlays_visible: bool,
}

impl DemoApp {
    fn new(preset: Preset, stage: Stage) -> Self {
        Self {
            preset,
            stage: Some(stage),
            window: None,
            scheduler: None,
            overlays_visible: false,
        }
    }

    fn toggle_overlays(&mut self) {
        let Some(scheduler) = self.scheduler.as_mut() else {
            return;
        };
        let visible = !self.overlays_visible;
        match scheduler.stage_mut().set_overlays_visible(visible) {
            Ok(()) => self.overlays_visible = visible,
            Err(err) => log::warn!("overlay toggle failed: {}", err),
        }
    }

    fn shutdown(&mut self, event_loop: &ActiveEventLoop) {
        if let Some(scheduler) = self.scheduler.as_mut() {
            scheduler.stop();
        }
        event_loop.exit();
    }
}

impl ApplicationHandler for DemoApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        let Some(stage) = self.stage.take() else {
            return;
        };

        let attributes = Window::default_attributes()
            .with_title(format!("Scene Rig - {}", self.preset.name()))
            .with_inner_size(PhysicalSize::new(1280, 640));
        let window = match event_loop.create_window(attributes) {
            Ok(window) => Arc::new(window),
            Err(err) => {
                log::error!("failed to create window: {}", err);
                event_loop.exit();
                return;
            }
        };

        let mut scheduler = FrameScheduler::new(
            stage,
            Box::new(WinitSurface { window: window.clone() }),
            Box::new(LogRenderer { last_rig: None }),
            Box::new(RedrawRequester { window: window.clone() }),
            Box::new(SystemClock::new()),
        );
        scheduler.start();

        self.window = Some(window);
        self.scheduler = Some(scheduler);
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => self.shutdown(event_loop),
            WindowEvent::KeyboardInput {
                event: KeyEvent {
                    physical_key: PhysicalKey::Code(code),
                    state: ElementState::Pressed,
                    repeat: false,
                    ..
                },
                ..
            } => match code {
                KeyCode::Escape => self.shutdown(event_loop),
                KeyCode::KeyG => self.toggle_overlays(),
                _ => {}
            },
            WindowEvent::CursorMoved { position, .. } => {
                if let (Some(window), Some(scheduler)) = (&self.window, &self.scheduler) {
                    // Pointer relative to the window center
                    let size = window.inner_size();
                    scheduler.handle().push_pointer(
                        position.x as f32 - size.width as f32 / 2.0,
                        position.y as f32 - size.height as f32 / 2.0,
                    );
                }
            }
            WindowEvent::RedrawRequested => {
                if let Some(scheduler) = self.scheduler.as_mut() {
                    scheduler.tick();
                    if scheduler.state() == SchedulerState::Stopped {
                        event_loop.exit();
                    }
                }
            }
            _ => {}
        }
    }
}

// ============================================================================
// MAIN
// ============================================================================

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    Engine::set_logger(LogBridge);

    let name = std::env::args().nth(1).unwrap_or_else(|| "tank".to_string());
    let preset = Preset::from_name(&name)
        .ok_or_else(|| format!("unknown preset '{}' (expected cube, orrery, space or tank)", name))?;

    let config = EngineConfig::default();
    Engine::set_min_severity(config.min_log_severity);
    let stage = preset.build(&config)?;

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Wait);
    let mut app = DemoApp::new(preset, stage);
    event_loop.run_app(&mut app)?;
    Ok(())
}
