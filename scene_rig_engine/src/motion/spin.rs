/// Spin: rotation about local axes proportional to elapsed time.

use glam::Vec3;
use crate::error::Result;
use crate::scene::NodeKey;
use super::controller::{MotionContext, MotionController};
use super::motion_state::{MotionKind, MotionParams, MotionStates, MotionTarget};

pub struct SpinController {
    name: String,
    nodes: Vec<NodeKey>,
    /// Radians per second for each local axis (0 leaves the axis alone)
    axis_rates: Vec3,
}

impl SpinController {
    pub fn new(name: &str, nodes: Vec<NodeKey>, axis_rates: Vec3) -> Self {
        Self {
            name: name.to_string(),
            nodes,
            axis_rates,
        }
    }

    /// Spin `nodes` with entity *i* at `1 + i * step` times `axis_rates`.
    ///
    /// Inserts the matching Spin states.
    pub fn staggered(
        name: &str,
        nodes: Vec<NodeKey>,
        axis_rates: Vec3,
        step: f32,
        states: &mut MotionStates,
    ) -> Self {
        for (index, node) in nodes.iter().enumerate() {
            states.insert(
                MotionTarget::Node(*node),
                MotionKind::Spin,
                MotionParams::default().with_speed(1.0 + index as f32 * step),
            );
        }
        Self::new(name, nodes, axis_rates)
    }

    pub fn axis_rates(&self) -> Vec3 {
        self.axis_rates
    }
}

impl MotionController for SpinController {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> MotionKind {
        MotionKind::Spin
    }

    fn targets(&self) -> Vec<MotionTarget> {
        self.nodes.iter().map(|&n| MotionTarget::Node(n)).collect()
    }

    fn update(&mut self, ctx: &mut MotionContext) -> Result<()> {
        for &node in &self.nodes {
            let params = ctx.params(MotionTarget::Node(node), MotionKind::Spin)?;
            let base = ctx.elapsed * params.rate * params.speed;
            let rotation = &mut ctx.scene.transform_mut(node)?.rotation;
            for axis in 0..3 {
                if self.axis_rates[axis] != 0.0 {
                    rotation[axis] = base * self.axis_rates[axis] + params.phase;
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "spin_tests.rs"]
mod tests;
