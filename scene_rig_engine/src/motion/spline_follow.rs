/// Spline follow: move a node along a path and turn it toward its heading.
///
/// The path lies in the XZ plane: a control point `(x, y)` maps to the local
/// position `(x, height, y)`.

use std::sync::Arc;
use glam::{Vec2, Vec3};
use crate::error::Result;
use crate::path::SplinePath;
use crate::scene::NodeKey;
use super::controller::{MotionContext, MotionController};
use super::motion_state::{MotionKind, MotionTarget};

/// Default look-ahead along the path (fraction of the loop)
pub const DEFAULT_SPLINE_LEAD: f32 = 0.01;

pub struct SplineFollowController {
    name: String,
    node: NodeKey,
    path: Arc<SplinePath>,
    lead: f32,
    height: f32,
}

impl SplineFollowController {
    pub fn new(name: &str, node: NodeKey, path: Arc<SplinePath>) -> Self {
        Self {
            name: name.to_string(),
            node,
            path,
            lead: DEFAULT_SPLINE_LEAD,
            height: 0.0,
        }
    }

    pub fn with_lead(mut self, lead: f32) -> Self {
        self.lead = lead;
        self
    }

    pub fn with_height(mut self, height: f32) -> Self {
        self.height = height;
        self
    }

    pub fn path(&self) -> &SplinePath {
        &self.path
    }

    /// Path parameter at `elapsed`: `(elapsed * rate * speed + phase) mod 1`
    pub fn parameter_at(elapsed: f32, rate: f32, phase: f32) -> f32 {
        (elapsed * rate + phase).rem_euclid(1.0)
    }

    fn lift(&self, point: Vec2) -> Vec3 {
        Vec3::new(point.x, self.height, point.y)
    }
}

impl MotionController for SplineFollowController {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> MotionKind {
        MotionKind::SplineFollow
    }

    fn targets(&self) -> Vec<MotionTarget> {
        vec![MotionTarget::Node(self.node)]
    }

    fn update(&mut self, ctx: &mut MotionContext) -> Result<()> {
        let params = ctx.params(MotionTarget::Node(self.node), MotionKind::SplineFollow)?;
        let t = Self::parameter_at(ctx.elapsed, params.rate * params.speed, params.phase);

        let position = self.lift(self.path.point_at(t));
        let ahead = self.lift(self.path.point_at(t + self.lead));
        ctx.scene.transform_mut(self.node)?.position = position;

        // Heading point lives in the parent's space; look_at wants world space
        let ahead_world = match ctx.scene.node(self.node).and_then(|n| n.parent()) {
            Some(parent) => ctx.scene.world_matrix(parent)?.transform_point3(ahead),
            None => ahead,
        };
        ctx.scene.look_at(self.node, ahead_world)
    }
}

#[cfg(test)]
#[path = "spline_follow_tests.rs"]
mod tests;
