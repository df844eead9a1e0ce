use crate::error::Error;
use crate::scene::{NodeFlags, Scene};
use super::*;

#[test]
fn test_attach_creates_hidden_helpers() {
    let mut scene = Scene::new();
    let root = scene.root();
    let solar = scene.add_node(root, "solarSystem").unwrap();

    let overlay = AxisGridOverlay::attach(&mut scene, solar, "solarSystem", 26).unwrap();

    assert_eq!(overlay.label(), "solarSystem");
    assert_eq!(overlay.units(), 26);
    assert!(!overlay.visible());
    for key in overlay.helpers() {
        let helper = scene.node(key).unwrap();
        assert_eq!(helper.parent(), Some(solar));
        assert!(helper.flags.contains(NodeFlags::OVERLAY));
        assert!(!helper.is_visible());
    }
    // Grid is inserted before the axes
    assert_eq!(scene.node(solar).unwrap().children(), &overlay.helpers());
}

#[test]
fn test_toggle_updates_both_helpers() {
    let mut scene = Scene::new();
    let root = scene.root();
    let earth = scene.add_node(root, "earth").unwrap();
    let mut overlay = AxisGridOverlay::attach(&mut scene, earth, "earth", DEFAULT_GRID_UNITS).unwrap();

    overlay.set_visible(&mut scene, true).unwrap();
    assert!(overlay.visible());
    assert!(overlay.helpers().iter().all(|k| scene.node(*k).unwrap().is_visible()));
    assert_eq!(scene.render_list().len(), 2);

    overlay.set_visible(&mut scene, false).unwrap();
    assert!(overlay.helpers().iter().all(|k| !scene.node(*k).unwrap().is_visible()));
    assert!(scene.render_list().is_empty());
}

#[test]
fn test_toggle_with_foreign_scene_fails_without_writes() {
    let mut scene = Scene::new();
    let root = scene.root();
    let moon = scene.add_node(root, "moon").unwrap();
    let mut overlay = AxisGridOverlay::attach(&mut scene, moon, "moon", DEFAULT_GRID_UNITS).unwrap();

    let mut other = Scene::new();
    let result = overlay.set_visible(&mut other, true);
    assert!(matches!(result, Err(Error::InvalidNode(_))));
    assert!(!overlay.visible());
}

#[test]
fn test_attach_under_unknown_node_fails() {
    let mut other = Scene::new();
    let other_root = other.root();
    let foreign = other.add_node(other_root, "foreign").unwrap();

    let mut scene = Scene::new();
    assert!(AxisGridOverlay::attach(&mut scene, foreign, "x", DEFAULT_GRID_UNITS).is_err());
}
