//! Sampled 1-D profiles
//!
//! Every curve in the simulation (enamel surface, dentin substrate, coating
//! boundary) is a `DVector<f64>` of heights aligned with one shared vector of
//! fixed x samples. This module holds the numerical helpers that operate on
//! those pairs: grid construction, linear interpolation and element-wise
//! updates.
//!
//! # Parallel Execution
//!
//! [`zip_apply`] switches to Rayon when the crate is compiled with the
//! `parallel` feature and the profile holds more elements than
//! [`parallel_threshold()`](crate::simulation::parallel_threshold). Closures
//! passed here are pure, so both paths produce identical results.

use nalgebra::DVector;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

// =================================================================================================
// Grid Construction
// =================================================================================================

/// Evenly spaced samples on `[start, end]`, both ends included
///
/// # Panics
///
/// Panics when `count < 2`.
///
/// # Example
///
/// ```rust
/// use enamel_rs::physics::linspace;
///
/// let xs = linspace(-2.5, 2.5, 11);
/// assert_eq!(xs.len(), 11);
/// assert!((xs[5] - 0.0).abs() < 1e-12);
/// assert!((xs[10] - 2.5).abs() < 1e-12);
/// ```
pub fn linspace(start: f64, end: f64, count: usize) -> DVector<f64> {
    assert!(count >= 2, "Need at least 2 samples, got {}", count);

    let step = (end - start) / (count - 1) as f64;

    // Index-based to keep the last sample exactly on `end`
    DVector::from_fn(count, |i, _| {
        if i == count - 1 {
            end
        } else {
            start + step * i as f64
        }
    })
}

// =================================================================================================
// Interpolation
// =================================================================================================

/// Piecewise-linear interpolation of `ys` over increasing `xs` at `x`
///
/// Outside the sampled range the end values are returned (the profile is
/// extended flat), which keeps particles scattered slightly beyond the
/// tooth edges on a well-defined height.
///
/// # Panics
///
/// Panics when the slices are empty or their lengths differ.
///
/// # Example
///
/// ```rust
/// use enamel_rs::physics::interpolate;
///
/// let xs = [0.0, 1.0, 2.0];
/// let ys = [0.0, 10.0, 0.0];
///
/// assert_eq!(interpolate(&xs, &ys, 0.5), 5.0);
/// assert_eq!(interpolate(&xs, &ys, -3.0), 0.0);
/// assert_eq!(interpolate(&xs, &ys, 1.5), 5.0);
/// ```
pub fn interpolate(xs: &[f64], ys: &[f64], x: f64) -> f64 {
    assert!(!xs.is_empty(), "Cannot interpolate an empty profile");
    assert_eq!(xs.len(), ys.len(), "Sample and height lengths must match");

    let last = xs.len() - 1;

    if x <= xs[0] {
        return ys[0];
    }
    if x >= xs[last] {
        return ys[last];
    }

    // First sample strictly greater than x; guaranteed in 1..=last here
    let upper = xs.partition_point(|&sample| sample <= x);
    let lower = upper - 1;

    let span = xs[upper] - xs[lower];
    if span <= 0.0 {
        return ys[lower];
    }

    let t = (x - xs[lower]) / span;
    ys[lower] + t * (ys[upper] - ys[lower])
}

// =================================================================================================
// Element-wise Updates
// =================================================================================================

/// Update every element of `target` with `f(target[i], other[i])`
///
/// # Panics
///
/// Panics when the two profiles have different lengths.
///
/// # Example
///
/// ```rust
/// use enamel_rs::physics::zip_apply;
/// use nalgebra::DVector;
///
/// let mut surface = DVector::from_vec(vec![1.0, 0.2, 0.5]);
/// let floor = DVector::from_vec(vec![0.3, 0.3, 0.3]);
///
/// zip_apply(&mut surface, &floor, f64::max);
/// assert_eq!(surface.as_slice(), &[1.0, 0.3, 0.5]);
/// ```
pub fn zip_apply<F>(target: &mut DVector<f64>, other: &DVector<f64>, f: F)
where
    F: Fn(f64, f64) -> f64 + Sync + Send,
{
    assert_eq!(target.len(), other.len(), "Profile lengths must match");

    if target.len() > crate::simulation::parallel_threshold() {
        #[cfg(feature = "parallel")]
        target
            .as_mut_slice()
            .par_iter_mut()
            .zip(other.as_slice().par_iter())
            .for_each(|(a, b)| *a = f(*a, *b));
        #[cfg(not(feature = "parallel"))]
        target.iter_mut().zip(other.iter()).for_each(|(a, b)| *a = f(*a, *b));
    } else {
        target.iter_mut().zip(other.iter()).for_each(|(a, b)| *a = f(*a, *b));
    }
}

/// Whether every value of the profile is finite
pub fn is_finite(profile: &DVector<f64>) -> bool {
    profile.iter().all(|v| v.is_finite())
}

// =================================================================================================
// Tests
// =================================================================================================
