/// Orbit: yaw a pivot node so its whole subtree circles around it.

use crate::error::Result;
use crate::scene::NodeKey;
use super::controller::{MotionContext, MotionController};
use super::motion_state::{MotionKind, MotionTarget};

pub struct OrbitController {
    name: String,
    pivots: Vec<NodeKey>,
}

impl OrbitController {
    pub fn new(name: &str, pivots: Vec<NodeKey>) -> Self {
        Self {
            name: name.to_string(),
            pivots,
        }
    }
}

impl MotionController for OrbitController {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> MotionKind {
        MotionKind::Orbit
    }

    fn targets(&self) -> Vec<MotionTarget> {
        self.pivots.iter().map(|&n| MotionTarget::Node(n)).collect()
    }

    fn update(&mut self, ctx: &mut MotionContext) -> Result<()> {
        for &pivot in &self.pivots {
            let params = ctx.params(MotionTarget::Node(pivot), MotionKind::Orbit)?;
            ctx.scene.transform_mut(pivot)?.rotation.y = params.scaled_time(ctx.elapsed);
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "orbit_tests.rs"]
mod tests;
