//! Scene module
//!
//! Provides the node hierarchy (arena-owned transform nodes), local
//! transforms with look-at support, animated materials and debug overlays.

mod material;
mod node;
mod overlay;
mod scene;
mod transform;

pub use material::{Color, Material, MaterialKey};
pub use node::{NodeFlags, NodeKey, Renderable, TransformNode};
pub use overlay::{AxisGridOverlay, DEFAULT_GRID_UNITS};
pub use scene::Scene;
pub use transform::{look_rotation, Facing, Transform};
