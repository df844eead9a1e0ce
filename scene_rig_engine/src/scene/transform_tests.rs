use glam::{Quat, Vec3};
use std::f32::consts::{FRAC_PI_2, PI};
use super::*;

fn assert_vec3_near(a: Vec3, b: Vec3) {
    assert!(a.distance(b) < 1e-4, "{:?} != {:?}", a, b);
}

// ============================================================================
// Transform
// ============================================================================

#[test]
fn test_identity_matrix() {
    let t = Transform::IDENTITY;
    assert_eq!(t.matrix(), glam::Affine3A::IDENTITY);
    assert_eq!(Transform::default(), t);
}

#[test]
fn test_matrix_applies_scale_rotation_translation() {
    let t = Transform::from_position(Vec3::new(1.0, 2.0, 3.0))
        .with_rotation(Vec3::new(0.0, FRAC_PI_2, 0.0))
        .with_scale(Vec3::splat(2.0));
    // +X scaled to 2, yawed 90 degrees to -Z, then translated
    let p = t.matrix().transform_point3(Vec3::X);
    assert_vec3_near(p, Vec3::new(1.0, 2.0, 1.0));
}

#[test]
fn test_quaternion_round_trip() {
    let mut t = Transform::IDENTITY;
    let q = Quat::from_rotation_y(0.7) * Quat::from_rotation_x(0.3);
    t.set_quaternion(q);
    assert!(t.quaternion().angle_between(q) < 1e-4);
}

#[test]
fn test_single_axis_rotation_preserves_others() {
    let mut wheel = Transform::IDENTITY.with_rotation(Vec3::new(0.0, 0.0, PI * 0.5));
    wheel.rotation.x = 3.0;
    assert_eq!(wheel.rotation.z, PI * 0.5);
}

// ============================================================================
// look_rotation
// ============================================================================

#[test]
fn test_look_rotation_positive_z_faces_target() {
    let q = look_rotation(Vec3::ZERO, Vec3::new(10.0, 0.0, 0.0), Vec3::Y, Facing::PositiveZ).unwrap();
    assert_vec3_near(q * Vec3::Z, Vec3::X);
}

#[test]
fn test_look_rotation_negative_z_faces_target() {
    let q = look_rotation(Vec3::ZERO, Vec3::new(0.0, 0.0, 5.0), Vec3::Y, Facing::NegativeZ).unwrap();
    assert_vec3_near(q * Vec3::NEG_Z, Vec3::Z);
}

#[test]
fn test_look_rotation_same_point_is_none() {
    assert!(look_rotation(Vec3::ONE, Vec3::ONE, Vec3::Y, Facing::PositiveZ).is_none());
}

#[test]
fn test_look_rotation_straight_up_is_finite() {
    let q = look_rotation(Vec3::ZERO, Vec3::new(0.0, 10.0, 0.0), Vec3::Y, Facing::PositiveZ).unwrap();
    assert!(q.is_finite());
    assert!((q * Vec3::Z).y > 0.99);
}
