/// MotionController trait - time-driven mutation of nodes and materials
///
/// Controllers are evaluated once per frame from the absolute elapsed time,
/// never from per-frame deltas, so a frame can be recomputed from scratch.

use crate::error::{Error, Result};
use crate::frame::FrameInput;
use crate::scene::Scene;
use super::motion_state::{MotionKind, MotionParams, MotionStates, MotionTarget};

/// Everything a controller may read or write during one update
pub struct MotionContext<'a> {
    /// Seconds since the scheduler started
    pub elapsed: f32,
    pub scene: &'a mut Scene,
    pub states: &'a MotionStates,
    pub input: &'a FrameInput,
}

impl<'a> MotionContext<'a> {
    /// Parameters of `target` for `kind`.
    ///
    /// A state removed after setup surfaces here as a controller fault.
    pub fn params(&self, target: MotionTarget, kind: MotionKind) -> Result<MotionParams> {
        self.states.get(target, kind).copied().ok_or_else(|| {
            Error::ControllerFault(format!("{:?} has no {:?} state", target, kind))
        })
    }
}

/// Procedural motion applied to a fixed set of entities
pub trait MotionController {
    /// Name used in fault reports
    fn name(&self) -> &str;

    /// Kind of motion state every target must carry
    fn kind(&self) -> MotionKind;

    /// Entities written by `update`
    fn targets(&self) -> Vec<MotionTarget>;

    /// Recompute the targets for `ctx.elapsed`
    fn update(&mut self, ctx: &mut MotionContext) -> Result<()>;
}
