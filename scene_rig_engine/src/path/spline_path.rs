/// Spline path: a Catmull-Rom curve through 2D control points.
///
/// Queries are arc-length parameterized: equal steps of `t` cover equal
/// distances along the curve, so a follower driven by `elapsed * speed`
/// moves at constant speed regardless of control point spacing.

use glam::Vec2;
use crate::error::Result;
use crate::engine_bail;

/// Arc-length table resolution used when none is given
pub const DEFAULT_ARC_LENGTH_DIVISIONS: usize = 200;

/// Step used to approximate tangents by finite difference
const TANGENT_EPSILON: f32 = 1e-4;

/// Immutable parametric curve through an ordered set of 2D points.
#[derive(Debug, Clone)]
pub struct SplinePath {
    points: Vec<Vec2>,
    closed: bool,
    /// Cumulative length at each of the `divisions + 1` raw-parameter samples
    arc_lengths: Vec<f32>,
}

impl SplinePath {
    /// Closed loop through `points`, last point logically preceding the first.
    ///
    /// A trailing point equal to the first one is treated as the loop closure
    /// and dropped.
    pub fn closed(points: Vec<Vec2>) -> Result<Self> {
        Self::with_divisions(points, true, DEFAULT_ARC_LENGTH_DIVISIONS)
    }

    /// Open curve from the first to the last point.
    pub fn open(points: Vec<Vec2>) -> Result<Self> {
        Self::with_divisions(points, false, DEFAULT_ARC_LENGTH_DIVISIONS)
    }

    /// Build a path with an explicit arc-length table resolution.
    ///
    /// # Errors
    ///
    /// `Error::InvalidCurve` if fewer than 2 distinct-position control points
    /// remain, a point is not finite, the curve has zero length, or
    /// `divisions` is 0.
    pub fn with_divisions(mut points: Vec<Vec2>, closed: bool, divisions: usize) -> Result<Self> {
        if let Some(bad) = points.iter().find(|p| !p.is_finite()) {
            engine_bail!("scene_rig::SplinePath", InvalidCurve,
                "Control point {:?} is not finite", bad);
        }
        if closed && points.len() > 2 && points.first() == points.last() {
            points.pop();
        }
        if points.len() < 2 {
            engine_bail!("scene_rig::SplinePath", InvalidCurve,
                "A spline path needs at least 2 control points (got {})", points.len());
        }
        if divisions == 0 {
            engine_bail!("scene_rig::SplinePath", InvalidCurve,
                "Arc-length divisions must be > 0");
        }

        let mut path = Self {
            points,
            closed,
            arc_lengths: Vec::with_capacity(divisions + 1),
        };
        path.build_arc_lengths(divisions);

        if path.length() <= f32::EPSILON {
            engine_bail!("scene_rig::SplinePath", InvalidCurve,
                "Spline path has zero length");
        }
        Ok(path)
    }

    fn build_arc_lengths(&mut self, divisions: usize) {
        let mut last = self.point(0.0);
        let mut sum = 0.0;
        self.arc_lengths.push(0.0);
        for d in 1..=divisions {
            let current = self.point(d as f32 / divisions as f32);
            sum += current.distance(last);
            self.arc_lengths.push(sum);
            last = current;
        }
    }

    // ===== GETTERS =====

    /// Control points (without the dropped closing duplicate)
    pub fn control_points(&self) -> &[Vec2] {
        &self.points
    }

    /// Whether `t` wraps around
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Approximate total curve length
    pub fn length(&self) -> f32 {
        self.arc_lengths.last().copied().unwrap_or(0.0)
    }

    // ===== QUERIES =====

    /// Position at normalized arc-length parameter `t`.
    ///
    /// Closed paths wrap `t` into [0, 1); open paths clamp it to [0, 1].
    pub fn point_at(&self, t: f32) -> Vec2 {
        let u = self.normalize(t);
        self.point(self.arc_to_raw(u))
    }

    /// Unit direction of travel at `t` (finite difference of `point_at`).
    pub fn tangent_at(&self, t: f32) -> Vec2 {
        let (a, b) = if self.closed {
            (t, t + TANGENT_EPSILON)
        } else {
            let u = self.normalize(t);
            let end = (u + TANGENT_EPSILON).min(1.0);
            (end - TANGENT_EPSILON, end)
        };
        (self.point_at(b) - self.point_at(a)).normalize_or_zero()
    }

    /// `divisions + 1` points sampled on the raw curve parameter, for drawing
    /// the path as a line strip.
    pub fn polyline(&self, divisions: usize) -> Vec<Vec2> {
        let divisions = divisions.max(1);
        (0..=divisions)
            .map(|d| self.point(d as f32 / divisions as f32))
            .collect()
    }

    fn normalize(&self, t: f32) -> f32 {
        if !t.is_finite() {
            return 0.0;
        }
        if self.closed {
            let u = t.rem_euclid(1.0);
            // rem_euclid may round tiny negatives up to exactly 1.0
            if u >= 1.0 { 0.0 } else { u }
        } else {
            t.clamp(0.0, 1.0)
        }
    }

    /// Map an arc-length fraction to the raw curve parameter.
    fn arc_to_raw(&self, u: f32) -> f32 {
        let lengths = &self.arc_lengths;
        let last = lengths.len() - 1;
        let target = u * self.length();

        let k = lengths.partition_point(|&l| l < target);
        if k > last {
            return 1.0;
        }
        if lengths[k] == target || k == 0 {
            return k as f32 / last as f32;
        }

        let before = lengths[k - 1];
        let segment = lengths[k] - before;
        let fraction = if segment > 0.0 { (target - before) / segment } else { 0.0 };
        ((k - 1) as f32 + fraction) / last as f32
    }

    /// Position at raw curve parameter `u` in [0, 1].
    fn point(&self, u: f32) -> Vec2 {
        let n = self.points.len();
        if self.closed {
            let p = n as f32 * u;
            let base = p.floor();
            let weight = p - base;
            let i = (base as usize) % n;
            catmull_rom(
                weight,
                self.points[(i + n - 1) % n],
                self.points[i],
                self.points[(i + 1) % n],
                self.points[(i + 2) % n],
            )
        } else {
            let p = (n - 1) as f32 * u;
            let base = p.floor();
            let weight = p - base;
            let i = (base as usize).min(n - 1);
            let p0 = self.points[i.saturating_sub(1)];
            let p1 = self.points[i];
            let p2 = self.points[(i + 1).min(n - 1)];
            let p3 = self.points[(i + 2).min(n - 1)];
            catmull_rom(weight, p0, p1, p2, p3)
        }
    }
}

/// Uniform Catmull-Rom segment between `p1` and `p2`.
fn catmull_rom(t: f32, p0: Vec2, p1: Vec2, p2: Vec2, p3: Vec2) -> Vec2 {
    let v0 = (p2 - p0) * 0.5;
    let v1 = (p3 - p1) * 0.5;
    let t2 = t * t;
    let t3 = t * t2;
    (2.0 * p1 - 2.0 * p2 + v0 + v1) * t3
        + (-3.0 * p1 + 3.0 * p2 - 2.0 * v0 - v1) * t2
        + v0 * t
        + p1
}

#[cfg(test)]
#[path = "spline_path_tests.rs"]
mod tests;
