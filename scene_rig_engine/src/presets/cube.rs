/// Cube preset: three boxes spinning at staggered speeds.

use glam::Vec3;
use crate::camera::{CameraRig, CameraRigRegistry};
use crate::config::EngineConfig;
use crate::error::Result;
use crate::frame::Stage;
use crate::motion::{MotionSystem, SpinController};
use crate::scene::{Color, Material, Renderable, Scene, Transform};
use super::{add_camera_node, add_light};

/// Box colors and x offsets, in spin order
const CUBES: [(u32, f32); 3] = [
    (0x44aa88, 0.0),
    (0x8844aa, -2.0),
    (0xaa8844, 2.0),
];

/// Speed increment between consecutive cubes
const SPEED_STEP: f32 = 0.1;

pub fn cube(config: &EngineConfig) -> Result<Stage> {
    config.validate()?;

    let mut scene = Scene::new();
    let root = scene.root();

    let camera = add_camera_node(&mut scene, root, "camera", Transform::from_position(Vec3::new(0.0, 0.0, 2.0)))?;
    add_light(&mut scene, root, "light", "directional", Transform::from_position(Vec3::new(-1.0, 2.0, 4.0)))?;

    let mut cubes = Vec::with_capacity(CUBES.len());
    for (index, (hex, x)) in CUBES.iter().enumerate() {
        let material = scene.create_material(Material::new(&format!("cube{}", index), Color::from_hex(*hex)));
        let key = scene.add_mesh(
            root,
            &format!("cube{}", index),
            Transform::from_position(Vec3::new(*x, 0.0, 0.0)),
            Renderable::new("box:1x1x1", Some(material)),
        )?;
        cubes.push(key);
    }

    let mut motion = MotionSystem::new();
    let spin = SpinController::staggered("cubes", cubes, Vec3::new(1.0, 1.0, 0.0), SPEED_STEP, motion.states_mut());
    motion.add_controller(&scene, Box::new(spin))?;

    let mut rigs = CameraRigRegistry::new(config.switch_rate);
    rigs.register(CameraRig::new("camera", "spinning cubes", camera, 75.0, 0.1, 5.0))?;

    Ok(Stage::new(scene, rigs, motion))
}
