//! Motion module: procedural animation of nodes and materials.
//!
//! `MotionState`s hold per-entity parameters, `MotionController`s turn elapsed
//! time into transforms and colors, and `MotionSystem` runs them in order with
//! fault isolation.

mod aim_at;
mod bob;
mod controller;
mod drift;
mod hue_cycle;
mod motion_state;
mod motion_system;
mod orbit;
mod spin;
mod spline_follow;

pub use aim_at::AimAtController;
pub use bob::BobController;
pub use controller::{MotionContext, MotionController};
pub use drift::{DriftController, DEFAULT_POINTER_GAIN};
pub use hue_cycle::{hue_at, HueChannels, HueCycleController};
pub use motion_state::{MotionKind, MotionParams, MotionState, MotionStates, MotionTarget};
pub use motion_system::MotionSystem;
pub use orbit::OrbitController;
pub use spin::SpinController;
pub use spline_follow::{SplineFollowController, DEFAULT_SPLINE_LEAD};
