/*!
# Scene Rig Engine

Scene animation and camera-rig orchestration.

The crate keeps a hierarchy of transform nodes animated by procedural motion
controllers, a registry of camera rigs whose projections follow the output
surface, and a frame scheduler that ties them together once per frame. Drawing
is left to a host-supplied renderer.

## Architecture

- **SplinePath**: Catmull-Rom curve through 2D control points, sampled by arc length
- **Scene**: arena of transform nodes (attach/detach, world matrices, look-at) and materials
- **MotionController**: spin, orbit, bob, hue cycle, spline follow, aim-at, drift
- **CameraRigRegistry**: named rigs, resize handling, time-based rig rotation
- **FrameScheduler**: Idle/Running/Stopped tick loop driven by a host frame requester
- **presets**: the cube, orrery, space and tank scenes
*/

// Internal modules
mod config;
mod engine;
mod error;
pub mod camera;
pub mod frame;
pub mod log;
pub mod motion;
pub mod path;
pub mod presets;
pub mod scene;

// Main scene_rig namespace module
pub mod scene_rig {
    // Error types
    pub use crate::error::{Error, Result};

    // Logging services
    pub use crate::engine::Engine;

    // Tunables
    pub use crate::config::EngineConfig;

    // Logging sub-module (types only, macros live at the crate root)
    pub mod log {
        pub use crate::log::{Logger, LogEntry, LogSeverity, DefaultLogger};
    }

    pub mod path {
        pub use crate::path::*;
    }

    pub mod scene {
        pub use crate::scene::*;
    }

    pub mod camera {
        pub use crate::camera::*;
    }

    pub mod motion {
        pub use crate::motion::*;
    }

    pub mod frame {
        pub use crate::frame::*;
    }

    pub mod presets {
        pub use crate::presets::*;
    }
}

// Re-export math library at crate root
pub use glam;
