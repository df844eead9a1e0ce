/// Per-entity motion parameters.
///
/// A `MotionState` binds one animated entity (node or material) to one motion
/// kind. `MotionStates` enforces at most one state per (entity, kind) pair;
/// kinds compose freely on the same entity.

use rustc_hash::FxHashMap;
use crate::scene::{MaterialKey, NodeKey};

/// Family of procedural motion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MotionKind {
    Spin,
    Orbit,
    Bob,
    SplineFollow,
    HueCycle,
    Drift,
    AimAt,
}

/// Entity animated by a controller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MotionTarget {
    Node(NodeKey),
    Material(MaterialKey),
}

/// Kind-specific parameters.
///
/// Time-driven kinds evaluate `elapsed * rate * speed + phase`; `amplitude`
/// and `offset` are used by kinds that oscillate around a baseline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionParams {
    /// Multiplier applied to the base rate
    pub speed: f32,
    /// Added after scaling by time (radians, or loop fraction for paths and hues)
    pub phase: f32,
    /// Oscillation amplitude
    pub amplitude: f32,
    /// Base rate (rad/s, loops/s or hue cycles/s depending on the kind)
    pub rate: f32,
    /// Baseline the oscillation is centred on
    pub offset: f32,
}

impl Default for MotionParams {
    fn default() -> Self {
        Self {
            speed: 1.0,
            phase: 0.0,
            amplitude: 0.0,
            rate: 1.0,
            offset: 0.0,
        }
    }
}

impl MotionParams {
    pub fn with_speed(mut self, speed: f32) -> Self {
        self.speed = speed;
        self
    }

    pub fn with_phase(mut self, phase: f32) -> Self {
        self.phase = phase;
        self
    }

    pub fn with_rate(mut self, rate: f32) -> Self {
        self.rate = rate;
        self
    }

    pub fn with_amplitude(mut self, amplitude: f32) -> Self {
        self.amplitude = amplitude;
        self
    }

    pub fn with_offset(mut self, offset: f32) -> Self {
        self.offset = offset;
        self
    }

    /// `elapsed * rate * speed + phase`
    pub fn scaled_time(&self, elapsed: f32) -> f32 {
        elapsed * self.rate * self.speed + self.phase
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionState {
    pub target: MotionTarget,
    pub kind: MotionKind,
    pub params: MotionParams,
}

/// Motion states keyed by (entity, kind)
#[derive(Debug, Default)]
pub struct MotionStates {
    states: FxHashMap<(MotionTarget, MotionKind), MotionParams>,
}

impl MotionStates {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the state of `target` for `kind`.
    ///
    /// Returns the parameters it replaced, if any.
    pub fn insert(&mut self, target: MotionTarget, kind: MotionKind, params: MotionParams) -> Option<MotionParams> {
        self.states.insert((target, kind), params)
    }

    pub fn remove(&mut self, target: MotionTarget, kind: MotionKind) -> Option<MotionParams> {
        self.states.remove(&(target, kind))
    }

    pub fn get(&self, target: MotionTarget, kind: MotionKind) -> Option<&MotionParams> {
        self.states.get(&(target, kind))
    }

    pub fn get_mut(&mut self, target: MotionTarget, kind: MotionKind) -> Option<&mut MotionParams> {
        self.states.get_mut(&(target, kind))
    }

    pub fn contains(&self, target: MotionTarget, kind: MotionKind) -> bool {
        self.states.contains_key(&(target, kind))
    }

    /// Every state attached to `target`, all kinds
    pub fn states_of(&self, target: MotionTarget) -> Vec<MotionState> {
        self.states.iter()
            .filter(|((t, _), _)| *t == target)
            .map(|(&(target, kind), &params)| MotionState { target, kind, params })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}

#[cfg(test)]
#[path = "motion_state_tests.rs"]
mod tests;
