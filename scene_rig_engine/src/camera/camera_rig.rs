/// CameraRig: a named viewpoint riding a scene node.
///
/// The rig owns its lens parameters (fov, clip planes, aspect) and a cached
/// projection matrix. Its placement comes from the node it is attached to, so
/// a rig mounted on a moving node moves with it.

use glam::Mat4;
use crate::error::Result;
use crate::scene::{NodeKey, Scene};

/// Aspect ratio used until the first surface size is known
pub const DEFAULT_ASPECT: f32 = 2.0;

#[derive(Debug, Clone)]
pub struct CameraRig {
    name: String,
    description: String,
    node: NodeKey,
    fov: f32,
    near: f32,
    far: f32,
    aspect: f32,
    projection: Mat4,
    projection_dirty: bool,
}

impl CameraRig {
    /// Create a rig looking through `node`.
    ///
    /// `fov` is the vertical field of view in degrees.
    pub fn new(name: &str, description: &str, node: NodeKey, fov: f32, near: f32, far: f32) -> Self {
        let mut rig = Self {
            name: name.to_string(),
            description: description.to_string(),
            node,
            fov,
            near,
            far,
            aspect: DEFAULT_ASPECT,
            projection: Mat4::IDENTITY,
            projection_dirty: true,
        };
        rig.update_projection();
        rig
    }

    // ===== GETTERS =====

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Human-readable label shown while the rig is active
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Node supplying the rig's world transform
    pub fn node(&self) -> NodeKey {
        self.node
    }

    /// Vertical field of view (degrees)
    pub fn fov(&self) -> f32 {
        self.fov
    }

    pub fn near(&self) -> f32 {
        self.near
    }

    pub fn far(&self) -> f32 {
        self.far
    }

    pub fn aspect(&self) -> f32 {
        self.aspect
    }

    /// Whether lens parameters changed since the last `update_projection`
    pub fn is_projection_dirty(&self) -> bool {
        self.projection_dirty
    }

    /// Cached projection matrix (valid once `update_projection` ran)
    pub fn projection_matrix(&self) -> &Mat4 {
        &self.projection
    }

    // ===== SETTERS =====

    pub fn set_aspect(&mut self, aspect: f32) {
        if self.aspect != aspect {
            self.aspect = aspect;
            self.projection_dirty = true;
        }
    }

    pub fn set_fov(&mut self, fov: f32) {
        if self.fov != fov {
            self.fov = fov;
            self.projection_dirty = true;
        }
    }

    /// Recompute the projection if lens parameters changed.
    ///
    /// Returns true if the matrix was rebuilt.
    pub fn update_projection(&mut self) -> bool {
        if !self.projection_dirty {
            return false;
        }
        self.projection = Mat4::perspective_rh(self.fov.to_radians(), self.aspect, self.near, self.far);
        self.projection_dirty = false;
        true
    }

    // ===== VIEW =====

    /// View matrix: inverse of the rig node's world transform
    pub fn view_matrix(&self, scene: &Scene) -> Result<Mat4> {
        Ok(Mat4::from(scene.world_matrix(self.node)?.inverse()))
    }

    /// Combined projection * view
    pub fn view_projection_matrix(&self, scene: &Scene) -> Result<Mat4> {
        Ok(self.projection * self.view_matrix(scene)?)
    }
}

#[cfg(test)]
#[path = "camera_rig_tests.rs"]
mod tests;
