/// Scene: arena of transform nodes and animated materials.
///
/// Uses SlotMaps for O(1) insert/lookup with stable keys. Nodes are never
/// removed during a session: `detach` unlinks a subtree, the node stays in the
/// arena and can be attached again.

use glam::{Affine3A, Quat, Vec3};
use slotmap::SlotMap;
use crate::error::Result;
use crate::{engine_bail, engine_err};
use super::material::{Material, MaterialKey};
use super::node::{NodeKey, Renderable, TransformNode};
use super::transform::{look_rotation, Transform};

/// Scene graph handed to the renderer together with the active camera rig.
pub struct Scene {
    nodes: SlotMap<NodeKey, TransformNode>,
    materials: SlotMap<MaterialKey, Material>,
    root: NodeKey,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene {
    /// Create a scene containing only its root node
    pub fn new() -> Self {
        let mut nodes = SlotMap::with_key();
        let root = nodes.insert(TransformNode::new("scene"));
        Self {
            nodes,
            materials: SlotMap::with_key(),
            root,
        }
    }

    /// Root of the drawable hierarchy
    pub fn root(&self) -> NodeKey {
        self.root
    }

    /// Number of nodes, detached ones included
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    // ===== NODE CREATION =====

    /// Create a detached node (no parent)
    pub fn create_node(&mut self, name: &str) -> NodeKey {
        self.nodes.insert(TransformNode::new(name))
    }

    /// Create a pivot node under `parent`
    pub fn add_node(&mut self, parent: NodeKey, name: &str) -> Result<NodeKey> {
        self.add_node_with(parent, name, Transform::IDENTITY)
    }

    /// Create a pivot node under `parent` with an initial local transform
    pub fn add_node_with(&mut self, parent: NodeKey, name: &str, transform: Transform) -> Result<NodeKey> {
        self.ensure_node(parent)?;
        let key = self.create_node(name);
        self.nodes[key].transform = transform;
        self.attach(parent, key)?;
        Ok(key)
    }

    /// Create a drawable node under `parent`
    pub fn add_mesh(
        &mut self,
        parent: NodeKey,
        name: &str,
        transform: Transform,
        renderable: Renderable,
    ) -> Result<NodeKey> {
        let key = self.add_node_with(parent, name, transform)?;
        self.nodes[key].payload = Some(renderable);
        Ok(key)
    }

    // ===== ACCESS =====

    pub fn node(&self, key: NodeKey) -> Option<&TransformNode> {
        self.nodes.get(key)
    }

    pub fn node_mut(&mut self, key: NodeKey) -> Option<&mut TransformNode> {
        self.nodes.get_mut(key)
    }

    pub fn contains_node(&self, key: NodeKey) -> bool {
        self.nodes.contains_key(key)
    }

    /// Local transform of a node
    pub fn transform(&self, key: NodeKey) -> Result<&Transform> {
        match self.nodes.get(key) {
            Some(node) => Ok(&node.transform),
            None => Err(engine_err!("scene_rig::Scene", InvalidNode, "Unknown node {:?}", key)),
        }
    }

    /// Mutable local transform of a node
    pub fn transform_mut(&mut self, key: NodeKey) -> Result<&mut Transform> {
        match self.nodes.get_mut(key) {
            Some(node) => Ok(&mut node.transform),
            None => Err(engine_err!("scene_rig::Scene", InvalidNode, "Unknown node {:?}", key)),
        }
    }

    /// First node (in arena order) with the given name
    pub fn find_by_name(&self, name: &str) -> Option<NodeKey> {
        self.nodes.iter()
            .find(|(_, node)| node.name() == name)
            .map(|(key, _)| key)
    }

    // ===== HIERARCHY =====

    /// Make `child` the last child of `parent`.
    ///
    /// The child is removed from its previous parent first.
    ///
    /// # Errors
    ///
    /// - `Error::InvalidNode` if either key is unknown or `child` is the root
    /// - `Error::Cycle` if `child` is `parent` or one of its ancestors; the
    ///   tree is left unchanged
    pub fn attach(&mut self, parent: NodeKey, child: NodeKey) -> Result<()> {
        self.ensure_node(parent)?;
        self.ensure_node(child)?;
        if child == self.root {
            engine_bail!("scene_rig::Scene", InvalidNode, "The scene root cannot be reparented");
        }
        if child == parent || self.is_ancestor(child, parent) {
            engine_bail!("scene_rig::Scene", Cycle,
                "Attaching '{}' under '{}' would make it its own ancestor",
                self.nodes[child].name(), self.nodes[parent].name());
        }

        if let Some(old_parent) = self.nodes[child].parent {
            self.nodes[old_parent].children.retain(|&k| k != child);
        }
        self.nodes[parent].children.push(child);
        self.nodes[child].parent = Some(parent);
        Ok(())
    }

    /// Unlink `child` from `parent` without destroying it.
    ///
    /// Returns false (and changes nothing) if `child` is not a child of `parent`.
    pub fn detach(&mut self, parent: NodeKey, child: NodeKey) -> bool {
        let is_child = self.nodes.get(child)
            .is_some_and(|node| node.parent == Some(parent));
        if !is_child {
            return false;
        }
        self.nodes[parent].children.retain(|&k| k != child);
        self.nodes[child].parent = None;
        true
    }

    /// Whether `ancestor` appears on the parent chain of `node`
    pub fn is_ancestor(&self, ancestor: NodeKey, node: NodeKey) -> bool {
        let mut current = self.nodes.get(node).and_then(|n| n.parent);
        while let Some(key) = current {
            if key == ancestor {
                return true;
            }
            current = self.nodes.get(key).and_then(|n| n.parent);
        }
        false
    }

    /// Depth-first pre-order traversal starting at `from` (children in insertion order)
    pub fn traverse(&self, from: NodeKey) -> Vec<NodeKey> {
        let mut order = Vec::new();
        if !self.nodes.contains_key(from) {
            return order;
        }
        let mut stack = vec![from];
        while let Some(key) = stack.pop() {
            order.push(key);
            stack.extend(self.nodes[key].children.iter().rev().copied());
        }
        order
    }

    /// Drawable nodes reachable from the root through visible ancestors, in render order
    pub fn render_list(&self) -> Vec<NodeKey> {
        let mut order = Vec::new();
        let mut stack = vec![self.root];
        while let Some(key) = stack.pop() {
            let node = &self.nodes[key];
            if !node.is_visible() {
                continue;
            }
            if node.payload.is_some() {
                order.push(key);
            }
            stack.extend(node.children.iter().rev().copied());
        }
        order
    }

    // ===== WORLD SPACE =====

    /// Compose local transforms up the ancestor chain (O(depth))
    pub fn world_matrix(&self, key: NodeKey) -> Result<Affine3A> {
        self.ensure_node(key)?;
        let mut matrix = self.nodes[key].transform.matrix();
        let mut current = self.nodes[key].parent;
        while let Some(parent) = current {
            let node = &self.nodes[parent];
            matrix = node.transform.matrix() * matrix;
            current = node.parent;
        }
        Ok(matrix)
    }

    /// Translation component of the world matrix
    pub fn world_position(&self, key: NodeKey) -> Result<Vec3> {
        Ok(self.world_matrix(key)?.translation.into())
    }

    /// Rotation component of the world matrix
    pub fn world_rotation(&self, key: NodeKey) -> Result<Quat> {
        let (_, rotation, _) = self.world_matrix(key)?.to_scale_rotation_translation();
        Ok(rotation)
    }

    /// Rotate `key` so its facing axis points at the world-space `target`.
    ///
    /// Uses +Y as up. Does nothing if the node already sits on the target.
    pub fn look_at(&mut self, key: NodeKey, target: Vec3) -> Result<()> {
        self.look_at_with_up(key, target, Vec3::Y)
    }

    /// `look_at` with an explicit world-space up vector
    pub fn look_at_with_up(&mut self, key: NodeKey, target: Vec3, up: Vec3) -> Result<()> {
        let eye = self.world_position(key)?;
        let facing = self.nodes[key].facing;
        let Some(world_rotation) = look_rotation(eye, target, up, facing) else {
            return Ok(());
        };

        let local = match self.nodes[key].parent {
            Some(parent) => self.world_rotation(parent)?.inverse() * world_rotation,
            None => world_rotation,
        };
        self.nodes[key].transform.set_quaternion(local.normalize());
        Ok(())
    }

    // ===== MATERIALS =====

    pub fn create_material(&mut self, material: Material) -> MaterialKey {
        self.materials.insert(material)
    }

    pub fn material(&self, key: MaterialKey) -> Option<&Material> {
        self.materials.get(key)
    }

    pub fn material_mut(&mut self, key: MaterialKey) -> Option<&mut Material> {
        self.materials.get_mut(key)
    }

    pub fn material_count(&self) -> usize {
        self.materials.len()
    }

    fn ensure_node(&self, key: NodeKey) -> Result<()> {
        if !self.nodes.contains_key(key) {
            engine_bail!("scene_rig::Scene", InvalidNode, "Unknown node {:?}", key);
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "scene_tests.rs"]
mod tests;
