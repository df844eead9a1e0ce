//! Axis/grid debug overlay.
//!
//! Adds an axes helper and a grid helper under a node. The two helpers share a
//! single `visible` property: toggling it updates both in one call.

use crate::error::Result;
use crate::engine_err;
use super::node::{NodeFlags, NodeKey, Renderable};
use super::scene::Scene;
use super::transform::Transform;

/// Default grid extent (units per side)
pub const DEFAULT_GRID_UNITS: u32 = 10;

#[derive(Debug, Clone)]
pub struct AxisGridOverlay {
    label: String,
    units: u32,
    axes: NodeKey,
    grid: NodeKey,
    visible: bool,
}

impl AxisGridOverlay {
    /// Attach helpers under `node`, hidden by default.
    ///
    /// The grid is drawn first, the axes on top of it.
    pub fn attach(scene: &mut Scene, node: NodeKey, label: &str, units: u32) -> Result<Self> {
        let grid = scene.add_mesh(
            node,
            &format!("{}.grid", label),
            Transform::IDENTITY,
            Renderable::new(&format!("grid:{}x{}", units, units), None),
        )?;
        let axes = scene.add_mesh(
            node,
            &format!("{}.axes", label),
            Transform::IDENTITY,
            Renderable::new("axes", None),
        )?;

        let mut overlay = Self {
            label: label.to_string(),
            units,
            axes,
            grid,
            visible: true,
        };
        for key in [grid, axes] {
            if let Some(helper) = scene.node_mut(key) {
                helper.flags.insert(NodeFlags::OVERLAY);
            }
        }
        overlay.set_visible(scene, false)?;
        Ok(overlay)
    }

    /// Label shown by the control panel
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn units(&self) -> u32 {
        self.units
    }

    pub fn visible(&self) -> bool {
        self.visible
    }

    pub fn helpers(&self) -> [NodeKey; 2] {
        [self.grid, self.axes]
    }

    /// Show or hide both helpers.
    ///
    /// Both helper keys are checked before anything is written, so the pair
    /// never ends up half toggled.
    pub fn set_visible(&mut self, scene: &mut Scene, visible: bool) -> Result<()> {
        for key in self.helpers() {
            if !scene.contains_node(key) {
                return Err(engine_err!("scene_rig::AxisGridOverlay", InvalidNode,
                    "Overlay '{}' lost its helper node {:?}", self.label, key));
            }
        }
        for key in self.helpers() {
            if let Some(helper) = scene.node_mut(key) {
                helper.set_visible(visible);
            }
        }
        self.visible = visible;
        Ok(())
    }
}

#[cfg(test)]
#[path = "overlay_tests.rs"]
mod tests;
