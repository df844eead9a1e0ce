/// Tank preset: a tank driving a closed path, a bobbing target and four rigs.
///
/// Hierarchy (children in render order):
///
/// ```text
/// scene
/// ├── camera                (detached, looks at the origin)
/// ├── sun, fill             (lights)
/// ├── ground
/// ├── tank                  (follows the path)
/// │   └── body
/// │       ├── tankCamera
/// │       ├── wheel0..5     (spin about X)
/// │       ├── dome
/// │       └── turretPivot   (aims at the target)
/// │           └── turret
/// │               └── turretCamera (aims at the target)
/// ├── targetOrbit           (orbits)
/// │   └── targetElevation
/// │       └── targetBob     (bobs)
/// │           ├── target    (spins, hue cycles)
/// │           └── targetCameraPivot (aims at the tank)
/// │               └── targetCamera
/// └── pathLine
/// ```
///
/// Controllers run target first, then the tank, then the aim constraints, so
/// every look-at sees this frame's positions.

use std::f32::consts::PI;
use std::sync::Arc;
use glam::{Vec2, Vec3};
use crate::camera::{CameraRig, CameraRigRegistry};
use crate::config::EngineConfig;
use crate::error::Result;
use crate::frame::Stage;
use crate::motion::{
    AimAtController, BobController, HueCycleController, MotionKind, MotionParams, MotionSystem,
    MotionTarget, OrbitController, SpinController, SplineFollowController,
};
use crate::path::SplinePath;
use crate::scene::{Color, Material, NodeFlags, NodeKey, Renderable, Scene, Transform};
use super::{add_camera_node, add_light};

const CAR_WIDTH: f32 = 4.0;
const CAR_HEIGHT: f32 = 1.0;
const CAR_LENGTH: f32 = 8.0;
const WHEEL_THICKNESS: f32 = 0.5;
const TURRET_LENGTH: f32 = CAR_LENGTH * 0.75 * 0.2;

/// Path loops per second
const TANK_RATE: f32 = 0.05;
const WHEEL_SPIN: f32 = 3.0;
const TARGET_ORBIT_RATE: f32 = 0.27;
const TARGET_BOB_RATE: f32 = 2.0;
const TARGET_BOB_AMPLITUDE: f32 = 4.0;
const TARGET_SPIN: Vec3 = Vec3::new(7.0, 13.0, 0.0);
const TARGET_HUE_RATE: f32 = 10.0;

/// Control points of the tank's loop (the last one closes it)
pub fn tank_path_points() -> Vec<Vec2> {
    vec![
        Vec2::new(-10.0, 0.0),
        Vec2::new(-5.0, 5.0),
        Vec2::new(0.0, 0.0),
        Vec2::new(5.0, -5.0),
        Vec2::new(10.0, 0.0),
        Vec2::new(5.0, 10.0),
        Vec2::new(-5.0, 10.0),
        Vec2::new(-10.0, -10.0),
        Vec2::new(-15.0, 8.0),
        Vec2::new(-10.0, 0.0),
    ]
}

fn set_flag(scene: &mut Scene, key: NodeKey, flag: NodeFlags) {
    if let Some(node) = scene.node_mut(key) {
        node.flags.insert(flag);
    }
}

pub fn tank(config: &EngineConfig) -> Result<Stage> {
    config.validate()?;

    let path = Arc::new(SplinePath::with_divisions(tank_path_points(), true, config.arc_length_divisions)?);

    let mut scene = Scene::new();
    let root = scene.root();
    let mut motion = MotionSystem::new();

    // ===== DETACHED CAMERA & LIGHTS =====

    let camera = add_camera_node(&mut scene, root, "camera", Transform::from_position(Vec3::new(8.0, 4.0, 10.0) * 3.0))?;
    scene.look_at(camera, Vec3::ZERO)?;

    let sun = add_light(&mut scene, root, "sun", "directional", Transform::from_position(Vec3::new(0.0, 20.0, 0.0)))?;
    set_flag(&mut scene, sun, NodeFlags::CAST_SHADOW);
    add_light(&mut scene, root, "fill", "directional", Transform::from_position(Vec3::new(1.0, 2.0, 4.0)))?;

    let ground_material = scene.create_material(Material::new("ground", Color::from_hex(0xcc8866)));
    let ground = scene.add_mesh(
        root,
        "ground",
        Transform::IDENTITY.with_rotation(Vec3::new(-PI * 0.5, 0.0, 0.0)),
        Renderable::new("plane:50x50", Some(ground_material)),
    )?;
    set_flag(&mut scene, ground, NodeFlags::RECEIVE_SHADOW);

    // ===== TANK =====

    let body_material = scene.create_material(Material::new("body", Color::from_hex(0x6688aa)));
    let wheel_material = scene.create_material(Material::new("wheel", Color::from_hex(0x888888)));

    let tank = scene.add_node(root, "tank")?;
    let body = scene.add_mesh(
        tank,
        "body",
        Transform::from_position(Vec3::new(0.0, 1.4, 0.0)),
        Renderable::new(&format!("box:{}x{}x{}", CAR_WIDTH, CAR_HEIGHT, CAR_LENGTH), Some(body_material)),
    )?;
    set_flag(&mut scene, body, NodeFlags::CAST_SHADOW);

    let tank_camera = add_camera_node(
        &mut scene,
        body,
        "tankCamera",
        Transform::from_position(Vec3::new(0.0, 3.0, -6.0)).with_rotation(Vec3::new(0.0, PI, 0.0)),
    )?;

    let wheel_x = CAR_WIDTH / 2.0 + WHEEL_THICKNESS / 2.0;
    let mut wheels = Vec::with_capacity(6);
    for z in [CAR_LENGTH / 3.0, 0.0, -CAR_LENGTH / 3.0] {
        for x in [-wheel_x, wheel_x] {
            let wheel = scene.add_mesh(
                body,
                &format!("wheel{}", wheels.len()),
                Transform::from_position(Vec3::new(x, -CAR_HEIGHT / 2.0, z))
                    .with_rotation(Vec3::new(0.0, 0.0, PI * 0.5)),
                Renderable::new("cylinder", Some(wheel_material)),
            )?;
            wheels.push(wheel);
        }
    }

    let dome = scene.add_mesh(
        body,
        "dome",
        Transform::from_position(Vec3::new(0.0, 0.5, 0.0)),
        Renderable::new("dome", Some(body_material)),
    )?;
    set_flag(&mut scene, dome, NodeFlags::CAST_SHADOW);

    let turret_pivot = scene.add_node_with(
        body,
        "turretPivot",
        Transform::from_position(Vec3::new(0.0, 0.5, 0.0)).with_scale(Vec3::splat(5.0)),
    )?;
    let turret = scene.add_mesh(
        turret_pivot,
        "turret",
        Transform::from_position(Vec3::new(0.0, 0.0, TURRET_LENGTH * 0.5)),
        Renderable::new(&format!("box:0.1x0.1x{}", TURRET_LENGTH), Some(body_material)),
    )?;
    set_flag(&mut scene, turret, NodeFlags::CAST_SHADOW);
    let turret_camera = add_camera_node(&mut scene, turret, "turretCamera", Transform::from_position(Vec3::new(0.0, 0.75 * 0.2, 0.0)))?;

    // ===== TARGET =====

    let target_material = scene.create_material(Material::new("target", Color::from_hex(0x00ff00)));
    let target_orbit = scene.add_node(root, "targetOrbit")?;
    let target_elevation = scene.add_node_with(
        target_orbit,
        "targetElevation",
        Transform::from_position(Vec3::new(0.0, 8.0, CAR_LENGTH * 2.0)),
    )?;
    let target_bob = scene.add_node(target_elevation, "targetBob")?;
    let target = scene.add_mesh(target_bob, "target", Transform::IDENTITY, Renderable::new("sphere", Some(target_material)))?;
    set_flag(&mut scene, target, NodeFlags::CAST_SHADOW);

    let target_camera_pivot = scene.add_node(target_bob, "targetCameraPivot")?;
    let target_camera = add_camera_node(
        &mut scene,
        target_camera_pivot,
        "targetCamera",
        Transform::from_position(Vec3::new(0.0, 1.0, -2.0)).with_rotation(Vec3::new(0.0, PI, 0.0)),
    )?;

    scene.add_mesh(
        root,
        "pathLine",
        Transform::from_position(Vec3::new(0.0, 0.05, 0.0)).with_rotation(Vec3::new(PI * 0.5, 0.0, 0.0)),
        Renderable::new("line:path", None),
    )?;

    // ===== MOTION =====

    motion.add_state(MotionTarget::Node(target_orbit), MotionKind::Orbit, MotionParams::default().with_rate(TARGET_ORBIT_RATE));
    motion.add_controller(&scene, Box::new(OrbitController::new("targetOrbit", vec![target_orbit])))?;

    motion.add_state(
        MotionTarget::Node(target_bob),
        MotionKind::Bob,
        MotionParams::default().with_rate(TARGET_BOB_RATE).with_amplitude(TARGET_BOB_AMPLITUDE),
    );
    motion.add_controller(&scene, Box::new(BobController::new("targetBob", vec![target_bob])))?;

    motion.add_state(MotionTarget::Node(target), MotionKind::Spin, MotionParams::default());
    motion.add_controller(&scene, Box::new(SpinController::new("targetSpin", vec![target], TARGET_SPIN)))?;

    motion.add_state(MotionTarget::Material(target_material), MotionKind::HueCycle, MotionParams::default().with_rate(TARGET_HUE_RATE));
    motion.add_controller(&scene, Box::new(HueCycleController::new("targetHue", vec![target_material])))?;

    motion.add_state(MotionTarget::Node(tank), MotionKind::SplineFollow, MotionParams::default().with_rate(TANK_RATE));
    motion.add_controller(
        &scene,
        Box::new(SplineFollowController::new("tank", tank, path).with_lead(config.spline_lead)),
    )?;

    for pivot in [turret_pivot, turret_camera, target_camera_pivot] {
        motion.add_state(MotionTarget::Node(pivot), MotionKind::AimAt, MotionParams::default());
    }
    let aim = AimAtController::new("aim")
        .with_pair(turret_pivot, target)
        .with_pair(turret_camera, target)
        .with_pair(target_camera_pivot, tank);
    motion.add_controller(&scene, Box::new(aim))?;

    for &wheel in &wheels {
        motion.add_state(MotionTarget::Node(wheel), MotionKind::Spin, MotionParams::default());
    }
    motion.add_controller(&scene, Box::new(SpinController::new("wheels", wheels, Vec3::new(WHEEL_SPIN, 0.0, 0.0))))?;

    // ===== RIGS =====

    let fov = config.default_fov;
    let mut rigs = CameraRigRegistry::new(config.switch_rate);
    rigs.register(CameraRig::new("camera", "detached camera", camera, fov, config.near, config.far))?;
    rigs.register(CameraRig::new("turretCamera", "on turret looking at target", turret_camera, fov, config.near, config.far))?;
    rigs.register(CameraRig::new("targetCamera", "near target looking at tank", target_camera, fov, config.near, config.far))?;
    rigs.register(CameraRig::new("tankCamera", "about back of tank", tank_camera, 75.0, config.near, config.far))?;

    Ok(Stage::new(scene, rigs, motion))
}
