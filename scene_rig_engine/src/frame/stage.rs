/// Stage: everything one tick updates and renders.

use crate::camera::CameraRigRegistry;
use crate::error::Result;
use crate::motion::MotionSystem;
use crate::scene::{AxisGridOverlay, Scene};

pub struct Stage {
    pub scene: Scene,
    pub rigs: CameraRigRegistry,
    pub motion: MotionSystem,
    /// Debug helpers a host control panel may toggle
    pub overlays: Vec<AxisGridOverlay>,
}

impl Stage {
    pub fn new(scene: Scene, rigs: CameraRigRegistry, motion: MotionSystem) -> Self {
        Self {
            scene,
            rigs,
            motion,
            overlays: Vec::new(),
        }
    }

    /// Show or hide every overlay at once
    pub fn set_overlays_visible(&mut self, visible: bool) -> Result<()> {
        for overlay in &mut self.overlays {
            overlay.set_visible(&mut self.scene, visible)?;
        }
        Ok(())
    }

    /// Overlay by control-panel label
    pub fn overlay_mut(&mut self, label: &str) -> Option<&mut AxisGridOverlay> {
        self.overlays.iter_mut().find(|o| o.label() == label)
    }
}
