//! Collision boundary abstraction
//!
//! The acid particle component is instantiated twice: once against the bare
//! enamel surface and once against the coating boundary. Both references are
//! expressed through [`CollisionBoundary`], so the particle code never knows
//! which curve it is falling onto.

use nalgebra::DVector;

use super::profile::interpolate;

/// A height field particles can land on
pub trait CollisionBoundary {
    /// Height of the boundary at horizontal position `x`
    fn height_at(&self, x: f64) -> f64;
}

/// A borrowed `(x, y)` sampled curve, interpolated linearly between samples
///
/// # Example
///
/// ```rust
/// use enamel_rs::physics::{CollisionBoundary, SampledCurve};
/// use nalgebra::DVector;
///
/// let xs = DVector::from_vec(vec![0.0, 1.0]);
/// let ys = DVector::from_vec(vec![1.0, 3.0]);
/// let curve = SampledCurve::new(&xs, &ys);
///
/// assert_eq!(curve.height_at(0.5), 2.0);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct SampledCurve<'a> {
    xs: &'a DVector<f64>,
    ys: &'a DVector<f64>,
}

impl<'a> SampledCurve<'a> {
    /// Pair fixed x samples with heights
    ///
    /// # Panics
    ///
    /// Panics when the two vectors differ in length or are empty.
    pub fn new(xs: &'a DVector<f64>, ys: &'a DVector<f64>) -> Self {
        assert!(!xs.is_empty(), "Sampled curve needs at least one sample");
        assert_eq!(
            xs.len(),
            ys.len(),
            "Curve samples {} vs heights {}",
            xs.len(),
            ys.len()
        );
        Self { xs, ys }
    }

    /// Number of samples
    pub fn len(&self) -> usize {
        self.xs.len()
    }

    /// Always false, a curve is never built empty
    pub fn is_empty(&self) -> bool {
        self.xs.is_empty()
    }

    pub fn heights(&self) -> &DVector<f64> {
        self.ys
    }
}

impl CollisionBoundary for SampledCurve<'_> {
    fn height_at(&self, x: f64) -> f64 {
        interpolate(self.xs.as_slice(), self.ys.as_slice(), x)
    }
}

/// Flat horizontal boundary, mostly useful in tests and benchmarks
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlatBoundary(pub f64);

impl CollisionBoundary for FlatBoundary {
    fn height_at(&self, _x: f64) -> f64 {
        self.0
    }
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sampled_curve_interpolates() {
        let xs = DVector::from_vec(vec![-1.0, 0.0, 1.0]);
        let ys = DVector::from_vec(vec![0.0, 1.0, 0.0]);
        let curve = SampledCurve::new(&xs, &ys);

        assert_eq!(curve.len(), 3);
        assert_eq!(curve.height_at(0.0), 1.0);
        assert_eq!(curve.height_at(-0.5), 0.5);
        assert_eq!(curve.height_at(5.0), 0.0);
    }

    #[test]
    #[should_panic(expected = "Curve samples")]
    fn test_sampled_curve_length_mismatch() {
        let xs = DVector::from_vec(vec![0.0, 1.0]);
        let ys = DVector::from_vec(vec![0.0]);
        SampledCurve::new(&xs, &ys);
    }

    #[test]
    fn test_flat_boundary() {
        let flat = FlatBoundary(1.25);
        assert_eq!(flat.height_at(-100.0), 1.25);
        assert_eq!(flat.height_at(3.0), 1.25);
    }

    #[test]
    fn test_trait_object_usage() {
        let xs = DVector::from_vec(vec![0.0, 2.0]);
        let ys = DVector::from_vec(vec![0.0, 2.0]);
        let boundaries: Vec<Box<dyn CollisionBoundary + '_>> = vec![
            Box::new(SampledCurve::new(&xs, &ys)),
            Box::new(FlatBoundary(0.5)),
        ];
        let heights: Vec<f64> = boundaries.iter().map(|b| b.height_at(1.0)).collect();
        assert_eq!(heights, vec![1.0, 0.5]);
    }
}
