/// Camera rig registry.
///
/// Stores named rigs in registration order, keeps their aspect ratio in sync
/// with the output surface and picks the rig to render through at a given
/// elapsed time.

use rustc_hash::FxHashMap;
use crate::error::Result;
use crate::{engine_bail, engine_debug, engine_info, engine_warn};
use super::camera_rig::CameraRig;

/// Rigs per second the default rotation advances by
pub const DEFAULT_SWITCH_RATE: f32 = 0.25;

pub struct CameraRigRegistry {
    rigs: Vec<CameraRig>,
    by_name: FxHashMap<String, usize>,
    surface_size: Option<(u32, u32)>,
    switch_rate: f32,
}

impl Default for CameraRigRegistry {
    fn default() -> Self {
        Self::new(DEFAULT_SWITCH_RATE)
    }
}

impl CameraRigRegistry {
    /// Create an empty registry rotating at `switch_rate` rigs per second
    pub fn new(switch_rate: f32) -> Self {
        Self {
            rigs: Vec::new(),
            by_name: FxHashMap::default(),
            surface_size: None,
            switch_rate,
        }
    }

    /// Add a rig and return its index.
    ///
    /// If the surface size is already known the rig adopts its aspect.
    ///
    /// # Errors
    ///
    /// - `Error::DuplicateName` if a rig with the same name exists
    /// - `Error::InvalidConfig` if the rig's clip planes or fov are unusable
    pub fn register(&mut self, mut rig: CameraRig) -> Result<usize> {
        if self.by_name.contains_key(rig.name()) {
            engine_bail!("scene_rig::CameraRigRegistry", DuplicateName,
                "Camera rig '{}' already exists", rig.name());
        }
        if !(rig.near() > 0.0 && rig.far() > rig.near()) || !(rig.fov() > 0.0 && rig.fov() < 180.0) {
            engine_bail!("scene_rig::CameraRigRegistry", InvalidConfig,
                "Camera rig '{}' has fov {} and clip planes {} / {}",
                rig.name(), rig.fov(), rig.near(), rig.far());
        }

        if let Some(aspect) = self.surface_aspect() {
            rig.set_aspect(aspect);
            rig.update_projection();
        }

        let index = self.rigs.len();
        engine_info!("scene_rig::CameraRigRegistry", "Registered camera rig '{}' at index {}", rig.name(), index);
        self.by_name.insert(rig.name().to_string(), index);
        self.rigs.push(rig);
        Ok(index)
    }

    /// Apply a new surface size to every rig.
    ///
    /// Returns false, and touches nothing, if the size did not change. A zero
    /// width or height is recorded but leaves the aspect of every rig as it was.
    pub fn on_resize(&mut self, width: u32, height: u32) -> bool {
        if self.surface_size == Some((width, height)) {
            return false;
        }
        self.surface_size = Some((width, height));

        match self.surface_aspect() {
            Some(aspect) => {
                engine_debug!("scene_rig::CameraRigRegistry", "Surface resized to {}x{} (aspect {:.3})", width, height, aspect);
                for rig in &mut self.rigs {
                    rig.set_aspect(aspect);
                }
            }
            None => {
                engine_warn!("scene_rig::CameraRigRegistry",
                    "Surface resized to {}x{}, keeping previous aspect", width, height);
            }
        }
        true
    }

    /// Rebuild every dirty projection. Returns how many were rebuilt.
    pub fn refresh_projections(&mut self) -> usize {
        self.rigs.iter_mut()
            .map(|rig| rig.update_projection())
            .filter(|rebuilt| *rebuilt)
            .count()
    }

    /// Index of the rig active at `elapsed` seconds.
    ///
    /// `floor((elapsed * switch_rate) mod count)`; None when no rig is registered.
    pub fn active_index(&self, elapsed: f32) -> Option<usize> {
        if self.rigs.is_empty() {
            return None;
        }
        let count = self.rigs.len();
        let slot = (elapsed * self.switch_rate).rem_euclid(count as f32).floor();
        if !slot.is_finite() {
            return Some(0);
        }
        Some((slot as usize).min(count - 1))
    }

    /// Rig active at `elapsed` seconds
    pub fn select_active(&self, elapsed: f32) -> Option<&CameraRig> {
        self.active_index(elapsed).map(|index| &self.rigs[index])
    }

    // ===== ACCESS =====

    pub fn rig(&self, name: &str) -> Option<&CameraRig> {
        self.by_name.get(name).map(|&index| &self.rigs[index])
    }

    pub fn rig_mut(&mut self, name: &str) -> Option<&mut CameraRig> {
        match self.by_name.get(name) {
            Some(&index) => self.rigs.get_mut(index),
            None => None,
        }
    }

    pub fn rig_at(&self, index: usize) -> Option<&CameraRig> {
        self.rigs.get(index)
    }

    /// Rigs in registration order
    pub fn rigs(&self) -> &[CameraRig] {
        &self.rigs
    }

    pub fn len(&self) -> usize {
        self.rigs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rigs.is_empty()
    }

    pub fn switch_rate(&self) -> f32 {
        self.switch_rate
    }

    pub fn set_switch_rate(&mut self, switch_rate: f32) {
        self.switch_rate = switch_rate;
    }

    /// Last size passed to `on_resize`
    pub fn surface_size(&self) -> Option<(u32, u32)> {
        self.surface_size
    }

    fn surface_aspect(&self) -> Option<f32> {
        match self.surface_size {
            Some((width, height)) if width > 0 && height > 0 => Some(width as f32 / height as f32),
            _ => None,
        }
    }
}

#[cfg(test)]
#[path = "rig_registry_tests.rs"]
mod tests;
