/// Drift: slow time-based yaw of a particle field, plus pointer parallax.
///
/// Without pointer input only the time term applies. Once a pointer sample has
/// been latched, the field also tilts against the pointer offset, scaled by
/// elapsed time.

use crate::error::Result;
use crate::scene::NodeKey;
use super::controller::{MotionContext, MotionController};
use super::motion_state::{MotionKind, MotionTarget};

/// Pointer offset (pixels from the surface centre) to radians per second
pub const DEFAULT_POINTER_GAIN: f32 = 0.00008;

pub struct DriftController {
    name: String,
    nodes: Vec<NodeKey>,
    pointer_gain: f32,
}

impl DriftController {
    pub fn new(name: &str, nodes: Vec<NodeKey>) -> Self {
        Self {
            name: name.to_string(),
            nodes,
            pointer_gain: DEFAULT_POINTER_GAIN,
        }
    }

    pub fn with_pointer_gain(mut self, gain: f32) -> Self {
        self.pointer_gain = gain;
        self
    }
}

impl MotionController for DriftController {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> MotionKind {
        MotionKind::Drift
    }

    fn targets(&self) -> Vec<MotionTarget> {
        self.nodes.iter().map(|&n| MotionTarget::Node(n)).collect()
    }

    fn update(&mut self, ctx: &mut MotionContext) -> Result<()> {
        let pointer = ctx.input.pointer;
        for &node in &self.nodes {
            let params = ctx.params(MotionTarget::Node(node), MotionKind::Drift)?;
            let rotation = &mut ctx.scene.transform_mut(node)?.rotation;
            rotation.y = params.scaled_time(ctx.elapsed);
            if let Some(pointer) = pointer {
                let scale = ctx.elapsed * self.pointer_gain;
                rotation.x = -pointer.y * scale;
                rotation.y -= pointer.x * scale;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "drift_tests.rs"]
mod tests;
