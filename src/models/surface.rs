//! Enamel surface and dentin substrate
//!
//! # Geometry
//!
//! The cross-section is sampled at `N` fixed x positions on `[x_min, x_max]`.
//! Three curves share those samples:
//!
//! ```text
//!   y ▲      surface (mutable, eroded)
//!     │    ╭──╮      ╭──╮
//!     │ ──╯    ╰────╯    ╰──      ← enamel
//!     │    ╭──╮      ╭──╮
//!     │ ──╯    ╰────╯    ╰──      floor = substrate + floor_margin
//!     │    ╭──╮      ╭──╮
//!     │ ──╯    ╰────╯    ╰──      substrate (fixed)  ← dentin below
//!     └──────────────────────► x
//! ```
//!
//! # Erosion
//!
//! Each call to [`SurfaceModel::erode`] removes, per sample,
//!
//! $$d_i = \max\left(a \cdot \sin(f) + \eta \cdot U_i,\; 0\right), \quad U_i \sim \mathcal{U}[0, 1)$$
//!
//! where $f$ is the frame number, $a$ the erosion amplitude and $\eta$ the
//! noise amplitude. The result is clamped to the floor, so the enamel never
//! reaches the dentin no matter how many times erosion runs.

use std::sync::Arc;

use nalgebra::DVector;
use rand::Rng;

use crate::physics::{interpolate, linspace, zip_apply, CollisionBoundary};
use crate::simulation::SurfaceParameters;

/// Eroding enamel surface over a fixed dentin substrate
#[derive(Debug, Clone)]
pub struct SurfaceModel {
    xs: Arc<DVector<f64>>,
    substrate: Arc<DVector<f64>>,
    surface: DVector<f64>,
    floor: DVector<f64>,
    params: SurfaceParameters,
}

impl SurfaceModel {
    /// Sample the healthy crown and derive the substrate
    ///
    /// # Errors
    ///
    /// Returns an error when `sample_count < 2` or the parameters are invalid.
    ///
    /// # Example
    ///
    /// ```rust
    /// use enamel_rs::models::SurfaceModel;
    /// use enamel_rs::simulation::SurfaceParameters;
    ///
    /// let model = SurfaceModel::initialize(200, SurfaceParameters::default())?;
    ///
    /// assert_eq!(model.len(), 200);
    /// assert!((model.substrate()[0] - (model.surface()[0] - 0.8)).abs() < 1e-12);
    /// # Ok::<(), String>(())
    /// ```
    pub fn initialize(sample_count: usize, params: SurfaceParameters) -> Result<Self, String> {
        if sample_count < 2 {
            return Err(format!(
                "Need at least 2 surface samples, got {}",
                sample_count
            ));
        }
        params.validate()?;

        let xs = linspace(params.x_min, params.x_max, sample_count);
        let surface = xs.map(|x| params.crown_height(x));
        let substrate = surface.map(|y| y - params.substrate_offset);
        let floor = substrate.map(|y| y + params.floor_margin);

        Ok(Self {
            xs: Arc::new(xs),
            substrate: Arc::new(substrate),
            surface,
            floor,
            params,
        })
    }

    /// Dissolve the surface for one frame
    ///
    /// Random draws happen sequentially, one per sample in x order, before
    /// any profile update. Returns the number of samples that had to be
    /// clamped back onto the floor.
    pub fn erode<R: Rng + ?Sized>(&mut self, frame: usize, rng: &mut R) -> usize {
        let smooth = self.params.erosion_amplitude * (frame as f64).sin();
        let noise = self.params.erosion_noise;

        let draws = DVector::from_fn(self.surface.len(), |_, _| rng.random::<f64>());
        let depth = draws.map(|u| (smooth + noise * u).max(0.0));

        zip_apply(&mut self.surface, &depth, |y, d| y - d);

        let clamped = self
            .surface
            .iter()
            .zip(self.floor.iter())
            .filter(|(y, f)| y < f)
            .count();

        zip_apply(&mut self.surface, &self.floor, f64::max);

        if clamped > 0 {
            log::trace!("frame {}: {} surface samples clamped to the floor", frame, clamped);
        }

        clamped
    }

    /// Surface height at `x`, flat beyond the sampled range
    pub fn interpolate(&self, x: f64) -> f64 {
        interpolate(self.xs.as_slice(), self.surface.as_slice(), x)
    }

    pub fn xs(&self) -> &DVector<f64> {
        &self.xs
    }

    /// Shared handle on the x samples, cloned into every snapshot
    pub fn shared_xs(&self) -> Arc<DVector<f64>> {
        Arc::clone(&self.xs)
    }

    pub fn surface(&self) -> &DVector<f64> {
        &self.surface
    }

    pub fn substrate(&self) -> &DVector<f64> {
        &self.substrate
    }

    pub fn shared_substrate(&self) -> Arc<DVector<f64>> {
        Arc::clone(&self.substrate)
    }

    /// Lowest allowed surface, `substrate + floor_margin`
    pub fn floor(&self) -> &DVector<f64> {
        &self.floor
    }

    pub fn params(&self) -> &SurfaceParameters {
        &self.params
    }

    pub fn len(&self) -> usize {
        self.xs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.xs.is_empty()
    }
}

impl CollisionBoundary for SurfaceModel {
    fn height_at(&self, x: f64) -> f64 {
        self.interpolate(x)
    }
}

// =================================================================================================
// Tests
// =================================================================================================
