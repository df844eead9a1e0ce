/// Aim-at: keep pivots facing the current world position of another node.

use crate::error::Result;
use crate::scene::NodeKey;
use super::controller::{MotionContext, MotionController};
use super::motion_state::{MotionKind, MotionTarget};

pub struct AimAtController {
    name: String,
    /// (pivot to rotate, node to face)
    pairs: Vec<(NodeKey, NodeKey)>,
}

impl AimAtController {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            pairs: Vec::new(),
        }
    }

    /// Add a pivot that tracks `target`. Pairs are aimed in insertion order.
    pub fn with_pair(mut self, pivot: NodeKey, target: NodeKey) -> Self {
        self.pairs.push((pivot, target));
        self
    }
}

impl MotionController for AimAtController {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> MotionKind {
        MotionKind::AimAt
    }

    fn targets(&self) -> Vec<MotionTarget> {
        self.pairs.iter().map(|&(pivot, _)| MotionTarget::Node(pivot)).collect()
    }

    fn update(&mut self, ctx: &mut MotionContext) -> Result<()> {
        for &(pivot, target) in &self.pairs {
            ctx.params(MotionTarget::Node(pivot), MotionKind::AimAt)?;
            let position = ctx.scene.world_position(target)?;
            ctx.scene.look_at(pivot, position)?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "aim_at_tests.rs"]
mod tests;
