//! Unit tests for FrameScheduler
//!
//! Uses in-memory fakes for the surface, renderer, frame requester and clock.

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use glam::Vec2;
use crate::camera::{CameraRig, CameraRigRegistry};
use crate::error::{Error, Result};
use crate::frame::{FrameRequester, ManualClock, OutputSurface, SceneRenderer, SchedulerHandle, Stage};
use crate::motion::{MotionContext, MotionController, MotionKind, MotionParams, MotionSystem, MotionTarget, OrbitController};
use crate::scene::{NodeKey, Scene};
use super::*;

// ============================================================================
// FAKES
// ============================================================================

struct FakeSurface {
    size: Rc<Cell<(u32, u32)>>,
}

impl OutputSurface for FakeSurface {
    fn pixel_size(&self) -> (u32, u32) {
        self.size.get()
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.size.set((width, height));
    }
}

struct FakeRenderer {
    frames: Rc<RefCell<Vec<String>>>,
    fail: Rc<Cell<bool>>,
}

impl SceneRenderer for FakeRenderer {
    fn render(&mut self, _scene: &Scene, rig: &CameraRig) -> Result<()> {
        if self.fail.get() {
            return Err(Error::BackendError("device lost".to_string()));
        }
        self.frames.borrow_mut().push(rig.name().to_string());
        Ok(())
    }
}

/// Queues a stop through the scheduler handle while rendering
struct StoppingRenderer {
    handle: Rc<RefCell<Option<SchedulerHandle>>>,
}

impl SceneRenderer for StoppingRenderer {
    fn render(&mut self, _scene: &Scene, _rig: &CameraRig) -> Result<()> {
        if let Some(handle) = self.handle.borrow().as_ref() {
            handle.request_stop();
        }
        Ok(())
    }
}

struct FakeRequester {
    requests: Rc<Cell<u32>>,
}

impl FrameRequester for FakeRequester {
    fn request_frame(&mut self) {
        self.requests.set(self.requests.get() + 1);
    }
}

/// Always fails, never touches anything
struct Broken;

impl MotionController for Broken {
    fn name(&self) -> &str {
        "broken"
    }

    fn kind(&self) -> MotionKind {
        MotionKind::Spin
    }

    fn targets(&self) -> Vec<MotionTarget> {
        Vec::new()
    }

    fn update(&mut self, _ctx: &mut MotionContext) -> Result<()> {
        Err(Error::ControllerFault("always".to_string()))
    }
}

struct Harness {
    scheduler: FrameScheduler,
    size: Rc<Cell<(u32, u32)>>,
    frames: Rc<RefCell<Vec<String>>>,
    fail: Rc<Cell<bool>>,
    requests: Rc<Cell<u32>>,
    clock: ManualClock,
    pivot: NodeKey,
}

fn harness(rig_names: &[&str], broken: bool) -> Harness {
    let mut scene = Scene::new();
    let root = scene.root();
    let pivot = scene.add_node(root, "pivot").unwrap();

    let mut rigs = CameraRigRegistry::new(0.25);
    for name in rig_names {
        let node = scene.add_node(root, name).unwrap();
        rigs.register(CameraRig::new(name, &format!("{} view", name), node, 40.0, 0.1, 1000.0)).unwrap();
    }

    let mut motion = MotionSystem::new();
    if broken {
        motion.add_controller(&scene, Box::new(Broken)).unwrap();
    }
    motion.add_state(MotionTarget::Node(pivot), MotionKind::Orbit, MotionParams::default());
    motion.add_controller(&scene, Box::new(OrbitController::new("orbit", vec![pivot]))).unwrap();

    let size = Rc::new(Cell::new((800, 400)));
    let frames = Rc::new(RefCell::new(Vec::new()));
    let fail = Rc::new(Cell::new(false));
    let requests = Rc::new(Cell::new(0));
    let clock = ManualClock::new();
    clock.set(100.0);

    let scheduler = FrameScheduler::new(
        Stage::new(scene, rigs, motion),
        Box::new(FakeSurface { size: size.clone() }),
        Box::new(FakeRenderer { frames: frames.clone(), fail: fail.clone() }),
        Box::new(FakeRequester { requests: requests.clone() }),
        Box::new(clock.clone()),
    );

    Harness { scheduler, size, frames, fail, requests, clock, pivot }
}

// ============================================================================
// STATE MACHINE
// ============================================================================

#[test]
fn test_idle_tick_does_nothing() {
    let mut h = harness(&["main"], false);
    assert_eq!(h.scheduler.state(), SchedulerState::Idle);
    assert!(h.scheduler.tick().is_none());
    assert!(h.frames.borrow().is_empty());
    assert_eq!(h.requests.get(), 0);
}

#[test]
fn test_start_is_idempotent() {
    let mut h = harness(&["main"], false);
    h.scheduler.start();
    h.scheduler.start();
    assert_eq!(h.scheduler.state(), SchedulerState::Running);
    assert_eq!(h.requests.get(), 1);
}

#[test]
fn test_stop_is_terminal_and_idempotent() {
    let mut h = harness(&["main"], false);
    h.scheduler.start();
    h.scheduler.stop();
    h.scheduler.stop();
    assert_eq!(h.scheduler.state(), SchedulerState::Stopped);

    h.scheduler.start();
    assert_eq!(h.scheduler.state(), SchedulerState::Stopped);
    assert!(h.scheduler.tick().is_none());
    assert_eq!(h.requests.get(), 1);
}

#[test]
fn test_tick_renders_and_rearms() {
    let mut h = harness(&["main"], false);
    h.scheduler.start();

    let report = h.scheduler.tick().unwrap();
    assert_eq!(report.frame, 0);
    assert!(report.rendered);
    assert_eq!(report.active_rig.as_deref(), Some("main"));
    assert_eq!(report.description.as_deref(), Some("main view"));
    assert_eq!(*h.frames.borrow(), vec!["main".to_string()]);
    assert_eq!(h.requests.get(), 2);
    assert_eq!(h.scheduler.frame_count(), 1);
}

#[test]
fn test_handle_stop_request() {
    let mut h = harness(&["main"], false);
    h.scheduler.start();
    h.scheduler.handle().request_stop();

    assert!(h.scheduler.tick().is_none());
    assert_eq!(h.scheduler.state(), SchedulerState::Stopped);
    assert!(h.frames.borrow().is_empty());
    assert_eq!(h.requests.get(), 1);
}

#[test]
fn test_stop_requested_during_render_skips_rearm() {
    let mut scene = Scene::new();
    let root = scene.root();
    let node = scene.add_node(root, "main").unwrap();
    let mut rigs = CameraRigRegistry::new(0.25);
    rigs.register(CameraRig::new("main", "main view", node, 40.0, 0.1, 1000.0)).unwrap();

    let handle = Rc::new(RefCell::new(None));
    let requests = Rc::new(Cell::new(0));
    let mut scheduler = FrameScheduler::new(
        Stage::new(scene, rigs, MotionSystem::new()),
        Box::new(FakeSurface { size: Rc::new(Cell::new((800, 400))) }),
        Box::new(StoppingRenderer { handle: handle.clone() }),
        Box::new(FakeRequester { requests: requests.clone() }),
        Box::new(ManualClock::new()),
    );
    *handle.borrow_mut() = Some(scheduler.handle());

    scheduler.start();
    let report = scheduler.tick().unwrap();
    assert!(report.rendered);
    assert_eq!(scheduler.state(), SchedulerState::Stopped);
    assert_eq!(requests.get(), 1);
    assert!(scheduler.tick().is_none());
}

// ============================================================================
// TIME
// ============================================================================

#[test]
fn test_elapsed_from_start_epoch() {
    let mut h = harness(&["main"], false);
    h.scheduler.start();
    h.clock.advance(2.5);

    let report = h.scheduler.tick().unwrap();
    assert_eq!(report.elapsed, 2.5);
    let yaw = h.scheduler.stage().scene.transform(h.pivot).unwrap().rotation.y;
    assert_eq!(yaw, 2.5);
}

#[test]
fn test_active_rig_rotates_with_time() {
    let mut h = harness(&["a", "b", "c", "d"], false);
    h.scheduler.start();

    let mut names = Vec::new();
    for _ in 0..5 {
        names.push(h.scheduler.tick().unwrap().active_rig.unwrap());
        h.clock.advance(4.0);
    }
    assert_eq!(names, vec!["a", "b", "c", "d", "a"]);
}

// ============================================================================
// RESIZE & INPUT
// ============================================================================

#[test]
fn test_resize_detected_once() {
    let mut h = harness(&["main"], false);
    h.scheduler.start();

    assert!(h.scheduler.tick().unwrap().resized);
    assert!(!h.scheduler.tick().unwrap().resized);
    let rig = h.scheduler.stage().rigs.rig("main").unwrap();
    assert_eq!(rig.aspect(), 2.0);
    assert!(!rig.is_projection_dirty());

    h.size.set((1000, 250));
    assert!(h.scheduler.tick().unwrap().resized);
    assert_eq!(h.scheduler.stage().rigs.rig("main").unwrap().aspect(), 4.0);
}

#[test]
fn test_queued_resize_applied_to_surface() {
    let mut h = harness(&["main"], false);
    h.scheduler.start();
    h.scheduler.tick();

    h.scheduler.handle().push_resize(300, 300);
    let report = h.scheduler.tick().unwrap();
    assert!(report.resized);
    assert_eq!(h.size.get(), (300, 300));
    assert_eq!(h.scheduler.stage().rigs.rig("main").unwrap().aspect(), 1.0);
}

#[test]
fn test_pointer_latches() {
    let mut h = harness(&["main"], false);
    h.scheduler.start();
    h.scheduler.tick();
    assert_eq!(h.scheduler.input().pointer, None);

    h.scheduler.handle().push_pointer(12.0, -3.0);
    h.scheduler.tick();
    h.scheduler.tick();
    assert_eq!(h.scheduler.input().pointer, Some(Vec2::new(12.0, -3.0)));
}

// ============================================================================
// FAULTS
// ============================================================================

#[test]
fn test_failing_controller_does_not_block_render() {
    let mut h = harness(&["main"], true);
    h.scheduler.start();
    h.clock.advance(1.0);

    let report = h.scheduler.tick().unwrap();
    assert_eq!(report.faults, vec!["broken".to_string()]);
    assert!(report.rendered);
    assert_eq!(h.requests.get(), 2);
    // The next controller still ran
    assert_eq!(h.scheduler.stage().scene.transform(h.pivot).unwrap().rotation.y, 1.0);
}

#[test]
fn test_renderer_failure_still_rearms() {
    let mut h = harness(&["main"], false);
    h.scheduler.start();
    h.fail.set(true);

    let report = h.scheduler.tick().unwrap();
    assert!(!report.rendered);
    h.scheduler.tick();
    assert_eq!(h.scheduler.render_faults(), 2);
    assert_eq!(h.requests.get(), 3);
}

#[test]
fn test_no_rig_skips_render() {
    let mut h = harness(&[], false);
    h.scheduler.start();

    let report = h.scheduler.tick().unwrap();
    assert!(report.active_rig.is_none());
    assert!(!report.rendered);
    assert_eq!(h.requests.get(), 2);
}
