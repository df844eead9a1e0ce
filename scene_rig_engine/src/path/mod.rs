//! Path module: parametric curves sampled by motion controllers.

mod spline_path;

pub use spline_path::{SplinePath, DEFAULT_ARC_LENGTH_DIVISIONS};
