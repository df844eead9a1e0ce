/// Local TRS transform of a scene node.
///
/// Rotation is stored as XYZ Euler angles (radians) so controllers can drive a
/// single axis while preserving the others (e.g. a wheel laid on its side that
/// spins around X).

use glam::{Affine3A, EulerRot, Mat3, Quat, Vec3};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    /// Euler angles in radians, applied in X then Y then Z order
    pub rotation: Vec3,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    pub const IDENTITY: Self = Self {
        position: Vec3::ZERO,
        rotation: Vec3::ZERO,
        scale: Vec3::ONE,
    };

    pub fn from_position(position: Vec3) -> Self {
        Self { position, ..Self::IDENTITY }
    }

    pub fn with_rotation(mut self, rotation: Vec3) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    /// Rotation as a quaternion
    #[inline]
    pub fn quaternion(&self) -> Quat {
        Quat::from_euler(EulerRot::XYZ, self.rotation.x, self.rotation.y, self.rotation.z)
    }

    /// Replace the rotation from a quaternion
    pub fn set_quaternion(&mut self, rotation: Quat) {
        let (x, y, z) = rotation.to_euler(EulerRot::XYZ);
        self.rotation = Vec3::new(x, y, z);
    }

    /// Local matrix (scale, then rotation, then translation)
    #[inline]
    pub fn matrix(&self) -> Affine3A {
        Affine3A::from_scale_rotation_translation(self.scale, self.quaternion(), self.position)
    }
}

/// Which local axis a node points at its look-at target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Facing {
    /// Meshes and pivots face along +Z
    #[default]
    PositiveZ,
    /// Cameras look down -Z
    NegativeZ,
}

/// World-space orientation that points `facing` from `eye` toward `target`.
///
/// Returns `None` when `eye` and `target` coincide.
pub fn look_rotation(eye: Vec3, target: Vec3, up: Vec3, facing: Facing) -> Option<Quat> {
    let mut z = match facing {
        Facing::PositiveZ => target - eye,
        Facing::NegativeZ => eye - target,
    };
    if z.length_squared() < 1e-12 {
        return None;
    }
    z = z.normalize();

    let mut x = up.cross(z);
    if x.length_squared() < 1e-12 {
        // up and z are parallel: nudge z off the up axis
        if up.z.abs() == 1.0 {
            z.x += 1e-4;
        } else {
            z.z += 1e-4;
        }
        z = z.normalize();
        x = up.cross(z);
    }
    x = x.normalize();
    let y = z.cross(x);

    Some(Quat::from_mat3(&Mat3::from_cols(x, y, z)))
}

#[cfg(test)]
#[path = "transform_tests.rs"]
mod tests;
