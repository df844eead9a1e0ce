/// Bob: vertical sine oscillation around a baseline height.

use crate::error::Result;
use crate::scene::NodeKey;
use super::controller::{MotionContext, MotionController};
use super::motion_state::{MotionKind, MotionTarget};

pub struct BobController {
    name: String,
    nodes: Vec<NodeKey>,
}

impl BobController {
    pub fn new(name: &str, nodes: Vec<NodeKey>) -> Self {
        Self {
            name: name.to_string(),
            nodes,
        }
    }
}

impl MotionController for BobController {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> MotionKind {
        MotionKind::Bob
    }

    fn targets(&self) -> Vec<MotionTarget> {
        self.nodes.iter().map(|&n| MotionTarget::Node(n)).collect()
    }

    fn update(&mut self, ctx: &mut MotionContext) -> Result<()> {
        for &node in &self.nodes {
            let params = ctx.params(MotionTarget::Node(node), MotionKind::Bob)?;
            let y = params.offset + params.amplitude * params.scaled_time(ctx.elapsed).sin();
            ctx.scene.transform_mut(node)?.position.y = y;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "bob_tests.rs"]
mod tests;
