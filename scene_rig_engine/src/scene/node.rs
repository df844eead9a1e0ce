/// TransformNode: one entry of the scene hierarchy.
///
/// Nodes are owned by the `Scene` arena and referenced by `NodeKey`.
/// Parent/children links are keys, never references, so reparenting and
/// traversal never fight the borrow checker.

use bitflags::bitflags;
use slotmap::new_key_type;
use super::material::MaterialKey;
use super::transform::{Facing, Transform};

new_key_type! {
    /// Stable key of a node stored in a `Scene`
    pub struct NodeKey;
}

bitflags! {
    /// Per-node state flags read by the renderer
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct NodeFlags: u32 {
        const VISIBLE        = 1 << 0;
        const CAST_SHADOW    = 1 << 1;
        const RECEIVE_SHADOW = 1 << 2;
        /// Debug helper (axes, grid), drawn on top without depth test
        const OVERLAY        = 1 << 3;
    }
}

impl Default for NodeFlags {
    fn default() -> Self {
        NodeFlags::VISIBLE
    }
}

/// Opaque drawable attached to a node.
///
/// `mesh` is a tag the external renderer resolves to geometry; the engine
/// never looks inside it.
#[derive(Debug, Clone, PartialEq)]
pub struct Renderable {
    pub mesh: String,
    pub material: Option<MaterialKey>,
}

impl Renderable {
    pub fn new(mesh: &str, material: Option<MaterialKey>) -> Self {
        Self {
            mesh: mesh.to_string(),
            material,
        }
    }
}

/// A node in the spatial hierarchy.
#[derive(Debug, Clone)]
pub struct TransformNode {
    name: String,
    pub transform: Transform,
    pub flags: NodeFlags,
    pub facing: Facing,
    pub payload: Option<Renderable>,
    pub(crate) parent: Option<NodeKey>,
    pub(crate) children: Vec<NodeKey>,
}

impl TransformNode {
    pub(crate) fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            transform: Transform::IDENTITY,
            flags: NodeFlags::default(),
            facing: Facing::PositiveZ,
            payload: None,
            parent: None,
            children: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn parent(&self) -> Option<NodeKey> {
        self.parent
    }

    /// Children in insertion (= render) order
    pub fn children(&self) -> &[NodeKey] {
        &self.children
    }

    pub fn is_visible(&self) -> bool {
        self.flags.contains(NodeFlags::VISIBLE)
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.flags.set(NodeFlags::VISIBLE, visible);
    }

    /// A node without payload only moves its subtree
    pub fn is_pivot(&self) -> bool {
        self.payload.is_none()
    }
}
