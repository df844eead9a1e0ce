//! Presets module: ready-made stages for the bundled demo scenes.
//!
//! Each preset builds a complete `Stage` (scene, camera rigs, motion
//! controllers) from an `EngineConfig`. Lights are plain tagged nodes: the
//! host renderer decides how to shade them.

mod cube;
mod orrery;
mod space;
mod tank;

pub use cube::cube;
pub use orrery::orrery;
pub use space::space;
pub use tank::{tank, tank_path_points};

use crate::config::EngineConfig;
use crate::error::Result;
use crate::frame::Stage;
use crate::scene::{Facing, NodeKey, Renderable, Scene, Transform};

/// Bundled demo scenes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preset {
    Cube,
    Orrery,
    Space,
    Tank,
}

impl Preset {
    pub const ALL: [Preset; 4] = [Preset::Cube, Preset::Orrery, Preset::Space, Preset::Tank];

    /// Parse a preset name (case-insensitive)
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "cube" => Some(Preset::Cube),
            "orrery" | "graph" => Some(Preset::Orrery),
            "space" => Some(Preset::Space),
            "tank" => Some(Preset::Tank),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Preset::Cube => "cube",
            Preset::Orrery => "orrery",
            Preset::Space => "space",
            Preset::Tank => "tank",
        }
    }

    /// Build the stage for this preset
    pub fn build(&self, config: &EngineConfig) -> Result<Stage> {
        match self {
            Preset::Cube => cube(config),
            Preset::Orrery => orrery(config),
            Preset::Space => space(config),
            Preset::Tank => tank(config),
        }
    }
}

/// Camera node under `parent`: cameras look down their local -Z
pub(crate) fn add_camera_node(
    scene: &mut Scene,
    parent: NodeKey,
    name: &str,
    transform: Transform,
) -> Result<NodeKey> {
    let key = scene.add_node_with(parent, name, transform)?;
    if let Some(node) = scene.node_mut(key) {
        node.facing = Facing::NegativeZ;
    }
    Ok(key)
}

/// Light marker node, `kind` is "directional" or "point"
pub(crate) fn add_light(
    scene: &mut Scene,
    parent: NodeKey,
    name: &str,
    kind: &str,
    transform: Transform,
) -> Result<NodeKey> {
    scene.add_mesh(parent, name, transform, Renderable::new(&format!("light:{}", kind), None))
}

#[cfg(test)]
#[path = "presets_tests.rs"]
mod tests;
