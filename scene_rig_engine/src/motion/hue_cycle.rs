/// Hue cycle: material color driven around the HSL hue wheel.
///
/// The hue is a function of absolute elapsed time, so rounding errors never
/// build up across frames.

use bitflags::bitflags;
use crate::error::{Error, Result};
use crate::scene::{Color, MaterialKey};
use super::controller::{MotionContext, MotionController};
use super::motion_state::{MotionKind, MotionTarget};

bitflags! {
    /// Material channels written by the hue cycle
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct HueChannels: u8 {
        const COLOR    = 1 << 0;
        const EMISSIVE = 1 << 1;
    }
}

/// Hue in [0, 1) at `elapsed` seconds: `(elapsed * rate + phase) mod 1`
pub fn hue_at(elapsed: f32, rate: f32, phase: f32) -> f32 {
    let hue = (elapsed * rate + phase).rem_euclid(1.0);
    // rem_euclid may round up to exactly 1.0 for tiny negative inputs
    if hue >= 1.0 { 0.0 } else { hue }
}

pub struct HueCycleController {
    name: String,
    materials: Vec<MaterialKey>,
    channels: HueChannels,
    saturation: f32,
    lightness: f32,
}

impl HueCycleController {
    /// Full saturation, lightness 0.25, both channels
    pub fn new(name: &str, materials: Vec<MaterialKey>) -> Self {
        Self {
            name: name.to_string(),
            materials,
            channels: HueChannels::COLOR | HueChannels::EMISSIVE,
            saturation: 1.0,
            lightness: 0.25,
        }
    }

    pub fn with_channels(mut self, channels: HueChannels) -> Self {
        self.channels = channels;
        self
    }

    pub fn with_saturation_lightness(mut self, saturation: f32, lightness: f32) -> Self {
        self.saturation = saturation;
        self.lightness = lightness;
        self
    }
}

impl MotionController for HueCycleController {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> MotionKind {
        MotionKind::HueCycle
    }

    fn targets(&self) -> Vec<MotionTarget> {
        self.materials.iter().map(|&m| MotionTarget::Material(m)).collect()
    }

    fn update(&mut self, ctx: &mut MotionContext) -> Result<()> {
        for &key in &self.materials {
            let params = ctx.params(MotionTarget::Material(key), MotionKind::HueCycle)?;
            let hue = hue_at(ctx.elapsed, params.rate * params.speed, params.phase);
            let color = Color::from_hsl(hue, self.saturation, self.lightness);

            let material = ctx.scene.material_mut(key).ok_or_else(|| {
                Error::ControllerFault(format!("Material {:?} no longer exists", key))
            })?;
            if self.channels.contains(HueChannels::COLOR) {
                material.color = color;
            }
            if self.channels.contains(HueChannels::EMISSIVE) {
                material.emissive = color;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "hue_cycle_tests.rs"]
mod tests;
