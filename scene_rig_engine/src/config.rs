/// Engine configuration
///
/// Plain values with defaults taken from the demo scenes. Presets and the
/// frame scheduler read them at setup time.

use crate::error::Result;
use crate::engine_bail;
use crate::log::LogSeverity;

/// Tunables shared by scene setup and the frame loop
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Camera rig rotations per second (each rig stays active `1 / switch_rate` s)
    pub switch_rate: f32,
    /// Look-ahead along a path used to derive the follower heading (fraction of loop)
    pub spline_lead: f32,
    /// Samples used to build the arc-length table of spline paths
    pub arc_length_divisions: usize,
    /// Vertical field of view for rigs created by presets (degrees)
    pub default_fov: f32,
    /// Near clip plane
    pub near: f32,
    /// Far clip plane
    pub far: f32,
    /// Entries below this severity are dropped by the engine logger
    pub min_log_severity: LogSeverity,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            switch_rate: 0.25,
            spline_lead: 0.01,
            arc_length_divisions: 200,
            default_fov: 40.0,
            near: 0.1,
            far: 1000.0,
            min_log_severity: LogSeverity::Info,
        }
    }
}

impl EngineConfig {
    /// Check ranges before any scene is built
    pub fn validate(&self) -> Result<()> {
        if !self.switch_rate.is_finite() || self.switch_rate < 0.0 {
            engine_bail!("scene_rig::EngineConfig", InvalidConfig,
                "switch_rate must be finite and >= 0 (got {})", self.switch_rate);
        }
        if !self.spline_lead.is_finite() || self.spline_lead <= 0.0 || self.spline_lead >= 1.0 {
            engine_bail!("scene_rig::EngineConfig", InvalidConfig,
                "spline_lead must be in (0, 1) (got {})", self.spline_lead);
        }
        if self.arc_length_divisions == 0 {
            engine_bail!("scene_rig::EngineConfig", InvalidConfig,
                "arc_length_divisions must be > 0");
        }
        if !(self.default_fov > 0.0 && self.default_fov < 180.0) {
            engine_bail!("scene_rig::EngineConfig", InvalidConfig,
                "default_fov must be in (0, 180) degrees (got {})", self.default_fov);
        }
        if !(self.near > 0.0 && self.far > self.near && self.far.is_finite()) {
            engine_bail!("scene_rig::EngineConfig", InvalidConfig,
                "clip planes must satisfy 0 < near < far (got {} / {})", self.near, self.far);
        }
        Ok(())
    }

    /// Builder-style override of the rig switch rate
    pub fn with_switch_rate(mut self, switch_rate: f32) -> Self {
        self.switch_rate = switch_rate;
        self
    }

    /// Builder-style override of the spline look-ahead
    pub fn with_spline_lead(mut self, spline_lead: f32) -> Self {
        self.spline_lead = spline_lead;
        self
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
