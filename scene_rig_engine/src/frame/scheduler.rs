/// Frame scheduler: the per-frame tick.
///
/// State machine: Idle → Running → Stopped (terminal). While running, every
/// tick:
/// 1. applies queued input (resize request, pointer sample, stop request)
/// 2. queries the surface size and forwards changes to the rig registry
/// 3. runs the motion controllers with the elapsed time since `start`
/// 4. selects the active rig
/// 5. renders the scene through it
/// 6. re-arms itself through the frame requester, unless a stop was queued
///    while the tick ran (the scheduler then stops without re-arming)
///
/// Controller and renderer faults are logged and counted; they never stop the
/// loop.

use crate::camera::CameraRig;
use crate::{engine_debug, engine_error, engine_info, engine_trace, engine_warn};
use super::backend::{FrameRequester, OutputSurface, SceneRenderer};
use super::clock::Clock;
use super::input::{FrameInput, SchedulerHandle};
use super::stage::Stage;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerState {
    Idle,
    Running,
    Stopped,
}

/// Summary of one tick
#[derive(Debug, Clone, PartialEq)]
pub struct TickReport {
    /// 0-based index of the tick since `start`
    pub frame: u64,
    /// Seconds since `start`
    pub elapsed: f32,
    /// Surface size changed before this tick
    pub resized: bool,
    /// Name of the rig rendered through, if any rig is registered
    pub active_rig: Option<String>,
    /// Description of that rig
    pub description: Option<String>,
    /// Controllers that faulted during this tick
    pub faults: Vec<String>,
    /// The renderer was called and succeeded
    pub rendered: bool,
}

pub struct FrameScheduler {
    stage: Stage,
    surface: Box<dyn OutputSurface>,
    renderer: Box<dyn SceneRenderer>,
    requester: Box<dyn FrameRequester>,
    clock: Box<dyn Clock>,
    handle: SchedulerHandle,
    state: SchedulerState,
    epoch: f64,
    frame: u64,
    input: FrameInput,
    active: Option<usize>,
    render_faults: u32,
    warned_no_rig: bool,
}

impl FrameScheduler {
    pub fn new(
        stage: Stage,
        surface: Box<dyn OutputSurface>,
        renderer: Box<dyn SceneRenderer>,
        requester: Box<dyn FrameRequester>,
        clock: Box<dyn Clock>,
    ) -> Self {
        Self {
            stage,
            surface,
            renderer,
            requester,
            clock,
            handle: SchedulerHandle::new(),
            state: SchedulerState::Idle,
            epoch: 0.0,
            frame: 0,
            input: FrameInput::default(),
            active: None,
            render_faults: 0,
            warned_no_rig: false,
        }
    }

    // ===== CONTROL =====

    /// Record the start epoch and request the first frame.
    ///
    /// Does nothing unless the scheduler is Idle.
    pub fn start(&mut self) {
        match self.state {
            SchedulerState::Idle => {
                self.epoch = self.clock.seconds();
                self.state = SchedulerState::Running;
                engine_info!("scene_rig::FrameScheduler", "Scheduler started ({} rigs, {} controllers)",
                    self.stage.rigs.len(), self.stage.motion.controller_count());
                self.requester.request_frame();
            }
            SchedulerState::Running => {}
            SchedulerState::Stopped => {
                engine_warn!("scene_rig::FrameScheduler", "start() ignored: scheduler is stopped");
            }
        }
    }

    /// Stop for good. No frame is requested afterwards. Idempotent.
    pub fn stop(&mut self) {
        if self.state != SchedulerState::Stopped {
            self.state = SchedulerState::Stopped;
            engine_info!("scene_rig::FrameScheduler", "Scheduler stopped after {} frames", self.frame);
        }
    }

    pub fn state(&self) -> SchedulerState {
        self.state
    }

    /// Queue for resize, pointer and stop events
    pub fn handle(&self) -> SchedulerHandle {
        self.handle.clone()
    }

    // ===== TICK =====

    /// Run one frame.
    ///
    /// Returns None without doing anything unless the scheduler is Running,
    /// or when a queued stop request is consumed.
    pub fn tick(&mut self) -> Option<TickReport> {
        if self.state != SchedulerState::Running {
            return None;
        }

        let pending = self.handle.take();
        if pending.stop {
            self.stop();
            return None;
        }
        if let Some((width, height)) = pending.resize {
            self.surface.resize(width, height);
        }
        if pending.pointer.is_some() {
            self.input.pointer = pending.pointer;
        }

        let (width, height) = self.surface.pixel_size();
        let resized = self.stage.rigs.on_resize(width, height);
        self.stage.rigs.refresh_projections();

        let elapsed = (self.clock.seconds() - self.epoch) as f32;
        let faults = self.stage.motion.update(&mut self.stage.scene, elapsed, &self.input);

        let active_index = self.stage.rigs.active_index(elapsed);
        let mut report = TickReport {
            frame: self.frame,
            elapsed,
            resized,
            active_rig: None,
            description: None,
            faults,
            rendered: false,
        };

        match active_index.and_then(|index| self.stage.rigs.rig_at(index)) {
            Some(rig) => {
                if self.active != active_index {
                    engine_info!("scene_rig::FrameScheduler", "Active camera: {}", rig.description());
                }
                report.active_rig = Some(rig.name().to_string());
                report.description = Some(rig.description().to_string());
                report.rendered = Self::render(&mut *self.renderer, &self.stage, rig, &mut self.render_faults);
            }
            None => {
                if !self.warned_no_rig {
                    engine_warn!("scene_rig::FrameScheduler", "No camera rig registered, skipping render");
                    self.warned_no_rig = true;
                }
            }
        }
        self.active = active_index;

        engine_trace!("scene_rig::FrameScheduler", "Frame {} at {:.3}s", self.frame, elapsed);
        self.frame += 1;

        if self.handle.stop_requested() {
            self.stop();
        }
        if self.state == SchedulerState::Running {
            self.requester.request_frame();
        }
        Some(report)
    }

    fn render(renderer: &mut dyn SceneRenderer, stage: &Stage, rig: &CameraRig, faults: &mut u32) -> bool {
        match renderer.render(&stage.scene, rig) {
            Ok(()) => true,
            Err(err) => {
                *faults += 1;
                if *faults == 1 {
                    engine_error!("scene_rig::FrameScheduler", "Renderer failed: {}", err);
                } else {
                    engine_debug!("scene_rig::FrameScheduler", "Renderer failed again ({} frames): {}", faults, err);
                }
                false
            }
        }
    }

    // ===== ACCESS =====

    pub fn stage(&self) -> &Stage {
        &self.stage
    }

    pub fn stage_mut(&mut self) -> &mut Stage {
        &mut self.stage
    }

    /// Ticks run since `start`
    pub fn frame_count(&self) -> u64 {
        self.frame
    }

    /// Ticks in which the renderer returned an error
    pub fn render_faults(&self) -> u32 {
        self.render_faults
    }

    /// Input as seen by controllers on the last tick
    pub fn input(&self) -> FrameInput {
        self.input
    }
}

#[cfg(test)]
#[path = "scheduler_tests.rs"]
mod tests;
