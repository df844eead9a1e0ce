/// Space preset: a point-cloud torus and a star field that drifts with the pointer.

use glam::Vec3;
use crate::camera::{CameraRig, CameraRigRegistry};
use crate::config::EngineConfig;
use crate::error::Result;
use crate::frame::Stage;
use crate::motion::{DriftController, MotionKind, MotionParams, MotionSystem, MotionTarget, SpinController};
use crate::scene::{Color, Material, Renderable, Scene, Transform};
use super::add_camera_node;

/// Number of stars in the particle field
pub const STAR_COUNT: u32 = 2000;

pub fn space(config: &EngineConfig) -> Result<Stage> {
    config.validate()?;

    let mut scene = Scene::new();
    let root = scene.root();

    let camera = add_camera_node(&mut scene, root, "camera", Transform::from_position(Vec3::new(0.0, 0.0, 2.0)))?;

    let torus_material = scene.create_material(Material::new("torus", Color::from_hex(0x87a7ca)));
    let torus = scene.add_mesh(root, "torus", Transform::IDENTITY, Renderable::new("torus", Some(torus_material)))?;
    let stars_material = scene.create_material(Material::new("stars", Color::WHITE));
    let stars = scene.add_mesh(
        root,
        "particles",
        Transform::IDENTITY,
        Renderable::new(&format!("points:{}", STAR_COUNT), Some(stars_material)),
    )?;

    let mut motion = MotionSystem::new();
    motion.add_state(MotionTarget::Node(torus), MotionKind::Spin, MotionParams::default());
    motion.add_controller(&scene, Box::new(SpinController::new("torus", vec![torus], Vec3::new(0.0, 0.5, 0.0))))?;
    motion.add_state(MotionTarget::Node(stars), MotionKind::Drift, MotionParams::default().with_rate(-0.1));
    motion.add_controller(&scene, Box::new(DriftController::new("particles", vec![stars])))?;

    let mut rigs = CameraRigRegistry::new(config.switch_rate);
    rigs.register(CameraRig::new("camera", "space", camera, 75.0, 0.1, 100.0))?;

    Ok(Stage::new(scene, rigs, motion))
}
