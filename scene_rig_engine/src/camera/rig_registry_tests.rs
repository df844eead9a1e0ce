//! Unit tests for CameraRigRegistry
//!
//! Registration, resize handling and the time-based rig rotation.

use crate::camera::{CameraRig, DEFAULT_ASPECT};
use crate::error::Error;
use crate::scene::Scene;
use super::*;

fn registry_with(scene: &mut Scene, names: &[&str], switch_rate: f32) -> CameraRigRegistry {
    let mut registry = CameraRigRegistry::new(switch_rate);
    let root = scene.root();
    for name in names {
        let node = scene.add_node(root, name).unwrap();
        registry.register(CameraRig::new(name, &format!("{} view", name), node, 40.0, 0.1, 1000.0)).unwrap();
    }
    registry
}

// ============================================================================
// REGISTRATION
// ============================================================================

#[test]
fn test_register_returns_indices_in_order() {
    let mut scene = Scene::new();
    let registry = registry_with(&mut scene, &["detached", "main", "tank"], DEFAULT_SWITCH_RATE);

    assert_eq!(registry.len(), 3);
    assert_eq!(registry.rig_at(1).unwrap().name(), "main");
    assert_eq!(registry.rig("tank").unwrap().description(), "tank view");
    assert!(registry.rig("turret").is_none());
}

#[test]
fn test_register_duplicate_name_fails() {
    let mut scene = Scene::new();
    let mut registry = registry_with(&mut scene, &["main"], DEFAULT_SWITCH_RATE);
    let root = scene.root();

    let result = registry.register(CameraRig::new("main", "again", root, 40.0, 0.1, 1000.0));
    assert!(matches!(result, Err(Error::DuplicateName(_))));
    assert_eq!(registry.len(), 1);
    assert_eq!(registry.rig("main").unwrap().description(), "main view");
}

#[test]
fn test_register_rejects_bad_clip_planes() {
    let scene = Scene::new();
    let mut registry = CameraRigRegistry::default();
    let result = registry.register(CameraRig::new("bad", "bad", scene.root(), 40.0, 10.0, 1.0));
    assert!(matches!(result, Err(Error::InvalidConfig(_))));
    assert!(registry.is_empty());
}

#[test]
fn test_register_after_resize_adopts_aspect() {
    let scene = Scene::new();
    let mut registry = CameraRigRegistry::default();
    registry.on_resize(800, 400);
    registry.on_resize(1200, 400);

    registry.register(CameraRig::new("late", "late", scene.root(), 40.0, 0.1, 1000.0)).unwrap();
    let rig = registry.rig("late").unwrap();
    assert_eq!(rig.aspect(), 3.0);
    assert!(!rig.is_projection_dirty());
}

// ============================================================================
// RESIZE
// ============================================================================

#[test]
fn test_on_resize_updates_every_rig() {
    let mut scene = Scene::new();
    let mut registry = registry_with(&mut scene, &["a", "b"], DEFAULT_SWITCH_RATE);

    assert!(registry.on_resize(1920, 1080));
    for rig in registry.rigs() {
        assert_eq!(rig.aspect(), 1920.0 / 1080.0);
        assert!(rig.is_projection_dirty());
    }
    assert_eq!(registry.refresh_projections(), 2);
    assert_eq!(registry.refresh_projections(), 0);
}

#[test]
fn test_on_resize_same_size_returns_false() {
    let mut scene = Scene::new();
    let mut registry = registry_with(&mut scene, &["a"], DEFAULT_SWITCH_RATE);

    assert!(registry.on_resize(640, 480));
    registry.refresh_projections();
    assert!(!registry.on_resize(640, 480));
    assert!(!registry.rig("a").unwrap().is_projection_dirty());
}

#[test]
fn test_on_resize_zero_height_keeps_aspect() {
    let mut scene = Scene::new();
    let mut registry = registry_with(&mut scene, &["a"], DEFAULT_SWITCH_RATE);

    assert!(registry.on_resize(640, 0));
    assert_eq!(registry.surface_size(), Some((640, 0)));
    assert_eq!(registry.rig("a").unwrap().aspect(), DEFAULT_ASPECT);
    assert!(registry.rig("a").unwrap().projection_matrix().is_finite());
}

#[test]
fn test_on_resize_zero_width_keeps_aspect() {
    let mut scene = Scene::new();
    let mut registry = registry_with(&mut scene, &["a"], DEFAULT_SWITCH_RATE);
    registry.on_resize(800, 400);
    registry.refresh_projections();

    assert!(registry.on_resize(0, 400));
    assert_eq!(registry.surface_size(), Some((0, 400)));
    registry.refresh_projections();
    let rig = registry.rig("a").unwrap();
    assert_eq!(rig.aspect(), 2.0);
    assert!(rig.projection_matrix().is_finite());
}

// ============================================================================
// ACTIVE RIG SELECTION
// ============================================================================

#[test]
fn test_select_active_empty_registry() {
    let registry = CameraRigRegistry::default();
    assert!(registry.select_active(3.0).is_none());
    assert_eq!(registry.active_index(0.0), None);
}

#[test]
fn test_rotation_with_four_rigs() {
    let mut scene = Scene::new();
    let registry = registry_with(&mut scene, &["detached", "main", "tank", "turret"], 0.25);

    assert_eq!(registry.select_active(0.0).unwrap().name(), "detached");
    assert_eq!(registry.select_active(3.99).unwrap().name(), "detached");
    assert_eq!(registry.select_active(4.0).unwrap().name(), "main");
    assert_eq!(registry.select_active(8.0).unwrap().name(), "tank");
    assert_eq!(registry.select_active(15.9).unwrap().name(), "turret");
    // Full cycle every count / rate seconds
    assert_eq!(registry.select_active(16.0).unwrap().name(), "detached");
}

#[test]
fn test_rotation_at_one_rig_per_second() {
    let mut scene = Scene::new();
    let registry = registry_with(&mut scene, &["a", "b", "c", "d"], 1.0);

    assert_eq!(registry.active_index(0.0), Some(0));
    assert_eq!(registry.active_index(1.0), Some(1));
    assert_eq!(registry.active_index(4.0), Some(0));
}

#[test]
fn test_select_active_is_pure() {
    let mut scene = Scene::new();
    let registry = registry_with(&mut scene, &["a", "b", "c"], 0.25);
    for t in [0.0, 1.5, 7.3, 100.25] {
        assert_eq!(registry.active_index(t), registry.active_index(t));
    }
}

#[test]
fn test_zero_switch_rate_pins_first_rig() {
    let mut scene = Scene::new();
    let mut registry = registry_with(&mut scene, &["a", "b"], 0.25);
    registry.set_switch_rate(0.0);
    assert_eq!(registry.active_index(1000.0), Some(0));
}

#[test]
fn test_negative_elapsed_wraps() {
    let mut scene = Scene::new();
    let registry = registry_with(&mut scene, &["a", "b", "c", "d"], 1.0);
    assert_eq!(registry.active_index(-1.0), Some(3));
}
