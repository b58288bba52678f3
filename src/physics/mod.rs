//! Geometry primitives shared by all sub-models
//!
//! The simulation works on one-dimensional sampled curves: a fixed vector of
//! x positions and, per curve, a vector of heights. This module provides
//!
//! - **profile helpers**: grid construction, interpolation and element-wise
//!   updates on `DVector<f64>` heights,
//! - **collision boundaries**: the [`CollisionBoundary`] trait particles fall
//!   onto, implemented by borrowed sampled curves and flat lines.
//!
//! # Example
//!
//! ```rust
//! use enamel_rs::physics::{linspace, CollisionBoundary, SampledCurve};
//!
//! let xs = linspace(-2.5, 2.5, 200);
//! let ys = xs.map(|x| 1.5 - 0.5 * (2.0 * x).cos() - 0.2 * x * x);
//!
//! let surface = SampledCurve::new(&xs, &ys);
//! assert!((surface.height_at(0.0) - 1.0).abs() < 1e-3);
//! ```

pub mod profile;
pub mod traits;

pub use profile::{interpolate, is_finite, linspace, zip_apply};
pub use traits::{CollisionBoundary, FlatBoundary, SampledCurve};
