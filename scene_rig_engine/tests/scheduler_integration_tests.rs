//! Integration tests for the frame scheduler driving the bundled presets
//!
//! Uses fake host collaborators from `test_utils`.
//!
//! Run with: cargo test --test scheduler_integration_tests


use glam::Vec3;
use scene_rig_engine::scene_rig::EngineConfig;
use scene_rig_engine::scene_rig::frame::{SchedulerState, Stage};
use scene_rig_engine::scene_rig::motion::{MotionKind, MotionTarget};
use scene_rig_engine::scene_rig::presets::Preset;
use test_utils::TestHost;

fn host(preset: Preset) -> TestHost {
    TestHost::new(preset.build(&EngineConfig::default()).unwrap())
}

fn run(host: &mut TestHost, seconds: &[f64]) {
    for &t in seconds {
        host.clock.set(t);
        host.scheduler.tick().unwrap();
    }
}

// ============================================================================
// TANK SCENE
// ============================================================================

#[test]
fn test_integration_tank_camera_rotation() {
    let mut host = host(Preset::Tank);
    host.scheduler.start();

    let mut descriptions = Vec::new();
    for t in [0.0, 3.9, 4.0, 8.5, 12.0, 16.0] {
        host.clock.set(t);
        let report = host.scheduler.tick().unwrap();
        descriptions.push(report.description.unwrap());
    }

    assert_eq!(descriptions, vec![
        "detached camera",
        "detached camera",
        "on turret looking at target",
        "near target looking at tank",
        "about back of tank",
        "detached camera",
    ]);
    assert_eq!(host.rendered_rigs().len(), 6);
    assert_eq!(host.requests.get(), 7);
}

#[test]
fn test_integration_tank_resize_updates_every_rig() {
    let mut host = host(Preset::Tank);
    host.scheduler.start();
    run(&mut host, &[0.0]);
    assert!(host.scheduler.stage().rigs.rigs().iter().all(|r| r.aspect() == 2.0));

    host.scheduler.handle().push_resize(1200, 400);
    host.clock.set(0.5);
    let report = host.scheduler.tick().unwrap();

    assert!(report.resized);
    assert_eq!(host.size.get(), (1200, 400));
    for rig in host.scheduler.stage().rigs.rigs() {
        assert_eq!(rig.aspect(), 3.0);
        assert!(!rig.is_projection_dirty());
    }
    assert_eq!(host.frames.borrow().last().unwrap().aspect, 3.0);
}

#[test]
fn test_integration_tank_loops_path() {
    let mut host = host(Preset::Tank);
    host.scheduler.start();
    run(&mut host, &[0.0, 5.0, 10.0, 20.0]);

    let stage = host.scheduler.stage();
    let tank = stage.scene.find_by_name("tank").unwrap();
    let position = stage.scene.world_position(tank).unwrap();
    assert!((position - Vec3::new(-10.0, 0.0, 0.0)).length() < 1e-3);
}

#[test]
fn test_integration_stop_from_handle() {
    let mut host = host(Preset::Tank);
    host.scheduler.start();
    run(&mut host, &[0.0, 0.016]);

    host.scheduler.handle().request_stop();
    assert!(host.scheduler.tick().is_none());
    assert_eq!(host.scheduler.state(), SchedulerState::Stopped);
    assert_eq!(host.rendered_rigs().len(), 2);
    assert_eq!(host.requests.get(), 3);
}

// ============================================================================
// FAULTS
// ============================================================================

#[test]
fn test_integration_renderer_fault_keeps_loop_alive() {
    let mut host = host(Preset::Cube);
    host.scheduler.start();
    host.fail.set(true);
    run(&mut host, &[0.0, 0.1]);
    host.fail.set(false);
    run(&mut host, &[0.2]);

    assert_eq!(host.scheduler.render_faults(), 2);
    assert_eq!(host.rendered_rigs(), vec!["camera".to_string()]);
    assert_eq!(host.scheduler.state(), SchedulerState::Running);
}

#[test]
fn test_integration_removed_state_faults_single_controller() {
    let mut stage: Stage = Preset::Orrery.build(&EngineConfig::default()).unwrap();
    let moon = stage.scene.find_by_name("moonMesh").unwrap();
    stage.motion.states_mut().remove(MotionTarget::Node(moon), MotionKind::Orbit);

    let mut host = TestHost::new(stage);
    host.scheduler.start();
    host.clock.set(1.0);
    let report = host.scheduler.tick().unwrap();

    assert_eq!(report.faults, vec!["orrery".to_string()]);
    assert!(report.rendered);
    // The whole controller is rolled back, including targets updated before the fault
    let sun = host.scheduler.stage().scene.find_by_name("sunMesh").unwrap();
    assert_eq!(host.scheduler.stage().scene.transform(sun).unwrap().rotation.y, 0.0);
}

// ============================================================================
// POINTER INPUT
// ============================================================================

#[test]
fn test_integration_space_pointer_parallax() {
    let mut host = host(Preset::Space);
    host.scheduler.start();
    host.scheduler.handle().push_pointer(200.0, 100.0);
    run(&mut host, &[5.0]);

    let stage = host.scheduler.stage();
    let stars = stage.scene.find_by_name("particles").unwrap();
    let rotation = stage.scene.transform(stars).unwrap().rotation;
    assert!((rotation.x - (-100.0 * 5.0 * 0.00008)).abs() < 1e-5);
    assert!((rotation.y - (-0.5 - 200.0 * 5.0 * 0.00008)).abs() < 1e-5);
}
