/// Orrery preset: sun, earth and moon driven by nested rotating pivots.
///
/// Every animated node turns about its local Y at one radian per second; the
/// moon's orbit pivot only inherits the earth orbit. Each node of interest
/// carries a hidden axis/grid overlay.

use glam::Vec3;
use crate::camera::{CameraRig, CameraRigRegistry};
use crate::config::EngineConfig;
use crate::error::Result;
use crate::frame::Stage;
use crate::motion::{MotionKind, MotionParams, MotionSystem, MotionTarget, OrbitController};
use crate::scene::{AxisGridOverlay, Color, Material, Renderable, Scene, Transform, DEFAULT_GRID_UNITS};
use super::{add_camera_node, add_light};

/// Grid extent of the solar system overlay
const SOLAR_SYSTEM_GRID_UNITS: u32 = 26;

pub fn orrery(config: &EngineConfig) -> Result<Stage> {
    config.validate()?;

    let mut scene = Scene::new();
    let root = scene.root();

    let camera = add_camera_node(&mut scene, root, "camera", Transform::from_position(Vec3::new(0.0, 50.0, 0.0)))?;
    scene.look_at_with_up(camera, Vec3::ZERO, Vec3::Z)?;
    add_light(&mut scene, root, "light", "point", Transform::IDENTITY)?;

    let sun_material = scene.create_material(
        Material::new("sun", Color::WHITE).with_emissive(Color::from_hex(0xffff00)),
    );
    let earth_material = scene.create_material(
        Material::new("earth", Color::from_hex(0x2233ff)).with_emissive(Color::from_hex(0x112244)),
    );
    let moon_material = scene.create_material(
        Material::new("moon", Color::from_hex(0x888888)).with_emissive(Color::from_hex(0x222222)),
    );

    let solar_system = scene.add_node(root, "solarSystem")?;
    let sun = scene.add_mesh(
        solar_system,
        "sunMesh",
        Transform::IDENTITY.with_scale(Vec3::splat(5.0)),
        Renderable::new("sphere", Some(sun_material)),
    )?;
    let earth_orbit = scene.add_node_with(solar_system, "earthOrbit", Transform::from_position(Vec3::new(10.0, 0.0, 0.0)))?;
    let earth = scene.add_mesh(earth_orbit, "earthMesh", Transform::IDENTITY, Renderable::new("sphere", Some(earth_material)))?;
    let moon_orbit = scene.add_node_with(earth_orbit, "moonOrbit", Transform::from_position(Vec3::new(2.0, 0.0, 0.0)))?;
    let moon = scene.add_mesh(
        moon_orbit,
        "moonMesh",
        Transform::IDENTITY.with_scale(Vec3::splat(0.5)),
        Renderable::new("sphere", Some(moon_material)),
    )?;

    let mut overlays = Vec::new();
    overlays.push(AxisGridOverlay::attach(&mut scene, solar_system, "solarSystem", SOLAR_SYSTEM_GRID_UNITS)?);
    for (node, label) in [
        (sun, "sunMesh"),
        (earth_orbit, "earthOrbit"),
        (earth, "earthMesh"),
        (moon_orbit, "moonOrbit"),
        (moon, "moonMesh"),
    ] {
        overlays.push(AxisGridOverlay::attach(&mut scene, node, label, DEFAULT_GRID_UNITS)?);
    }

    let mut motion = MotionSystem::new();
    let orbiting = vec![solar_system, sun, earth_orbit, earth, moon];
    for &node in &orbiting {
        motion.add_state(MotionTarget::Node(node), MotionKind::Orbit, MotionParams::default());
    }
    motion.add_controller(&scene, Box::new(OrbitController::new("orrery", orbiting)))?;

    let mut rigs = CameraRigRegistry::new(config.switch_rate);
    rigs.register(CameraRig::new("camera", "top view", camera, config.default_fov, config.near, config.far))?;

    let mut stage = Stage::new(scene, rigs, motion);
    stage.overlays = overlays;
    Ok(stage)
}
