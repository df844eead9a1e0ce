//! Camera module: camera rigs and the registry that rotates between them.
//!
//! Rigs are registered once at setup and never removed. The registry keeps
//! their aspect ratio in sync with the output surface.

mod camera_rig;
mod rig_registry;

pub use camera_rig::{CameraRig, DEFAULT_ASPECT};
pub use rig_registry::{CameraRigRegistry, DEFAULT_SWITCH_RATE};
