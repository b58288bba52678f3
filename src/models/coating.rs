//! Protective coating layer
//!
//! The coating is a single scalar thickness laid uniformly on top of the
//! current enamel surface:
//!
//! $$t(f) = \min\left((f - f_0) \cdot r,\; t_{max}\right)$$
//!
//! with $f_0$ the first coating frame, $r$ the growth rate and $t_{max}$ the
//! cap. During the resistance test the thickness is frozen at the value of the
//! last coating frame.

use nalgebra::DVector;

use crate::simulation::CoatingParameters;

/// Thickness reached at `frame` for a coating started at `start_frame`
///
/// # Example
///
/// ```rust
/// use enamel_rs::models::coating_thickness;
///
/// assert!((coating_thickness(150, 120, 0.005, 0.3) - 0.15).abs() < 1e-12);
/// assert_eq!(coating_thickness(500, 120, 0.005, 0.3), 0.3);
/// ```
pub fn coating_thickness(frame: usize, start_frame: usize, rate: f64, cap: f64) -> f64 {
    (frame.saturating_sub(start_frame) as f64 * rate).min(cap)
}

/// Coating thickness state
///
/// Absent until the first call to [`grow`](Self::grow) or
/// [`freeze_at`](Self::freeze_at).
#[derive(Debug, Clone, PartialEq)]
pub struct CoatingModel {
    params: CoatingParameters,
    thickness: Option<f64>,
    frozen: bool,
}

impl CoatingModel {
    pub fn new(params: CoatingParameters) -> Self {
        Self {
            params,
            thickness: None,
            frozen: false,
        }
    }

    /// Set the thickness for a coating frame and return it
    ///
    /// A frozen coating must not grow again; debug builds panic if it does.
    pub fn grow(&mut self, frame: usize, start_frame: usize) -> f64 {
        debug_assert!(!self.frozen, "coating is frozen and cannot grow");
        let thickness = coating_thickness(frame, start_frame, self.params.rate, self.params.cap);
        self.thickness = Some(thickness);
        thickness
    }

    /// Fix the thickness to the value `grow` gives on `last_coating_frame`
    ///
    /// Only the first call has an effect.
    pub fn freeze_at(&mut self, last_coating_frame: usize, start_frame: usize) -> f64 {
        if !self.frozen {
            self.grow(last_coating_frame, start_frame);
            self.frozen = true;
        }
        self.thickness.unwrap_or(0.0)
    }

    /// Upper coating boundary over `surface`
    ///
    /// `min(surface + thickness, surface + cap)` per sample. Returns `None`
    /// while the coating is absent.
    pub fn upper_boundary(&self, surface: &DVector<f64>) -> Option<DVector<f64>> {
        let thickness = self.thickness?;
        let cap = self.params.cap;
        Some(surface.map(|y| (y + thickness).min(y + cap)))
    }

    pub fn thickness(&self) -> Option<f64> {
        self.thickness
    }

    /// Whether the coating exists yet
    pub fn is_active(&self) -> bool {
        self.thickness.is_some()
    }

    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    pub fn params(&self) -> &CoatingParameters {
        &self.params
    }
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_absent_before_growth() {
        let coating = CoatingModel::new(CoatingParameters::default());
        assert!(!coating.is_active());
        assert!(coating.upper_boundary(&DVector::from_element(3, 1.0)).is_none());
    }

    #[test]
    fn test_growth_is_monotonic_and_capped() {
        let mut coating = CoatingModel::new(CoatingParameters::default());
        let mut previous = 0.0;
        for frame in 120..300 {
            let t = coating.grow(frame, 120);
            assert!(t >= previous);
            assert!(t <= 0.3);
            previous = t;
        }
        assert_eq!(previous, 0.3);
    }

    #[test]
    fn test_thickness_at_frame_150() {
        let mut coating = CoatingModel::new(CoatingParameters { rate: 0.005, cap: 0.3 });
        assert_relative_eq!(coating.grow(150, 120), 0.15, epsilon = 1e-12);
    }

    #[test]
    fn test_freeze_keeps_last_coating_value() {
        let mut coating = CoatingModel::new(CoatingParameters::default());
        coating.grow(130, 120);

        let frozen = coating.freeze_at(179, 120);
        assert_relative_eq!(frozen, 0.295, epsilon = 1e-12);

        // Later freezes are ignored
        assert_relative_eq!(coating.freeze_at(250, 120), 0.295, epsilon = 1e-12);
        assert!(coating.is_frozen());
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "frozen")]
    fn test_grow_after_freeze_panics() {
        let mut coating = CoatingModel::new(CoatingParameters::default());
        coating.freeze_at(179, 120);
        coating.grow(150, 120);
    }

    #[test]
    fn test_upper_boundary_follows_surface() {
        let mut coating = CoatingModel::new(CoatingParameters::default());
        coating.grow(140, 120);

        let surface = DVector::from_vec(vec![1.0, 0.5, 2.0]);
        let boundary = coating.upper_boundary(&surface).unwrap();
        for (b, s) in boundary.iter().zip(surface.iter()) {
            assert_relative_eq!(b - s, 0.1, epsilon = 1e-12);
        }
    }
}
