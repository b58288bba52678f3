//! Export module for simulation runs.
//!
//! # Architecture
//!
//! This module defines the [`Exporter`] trait that abstracts the export format.
//! Each format is an independent implementation in its own sub-module, so a
//! new format is a new file implementing the trait.
//!
//! | Format  | Module  |
//! |---------|---------|
//! | CSV     | [`csv`] |
//!
//! # Usage example
//!
//! ```rust,no_run
//! use enamel_rs::output::export::{CsvExporter, Exporter};
//! use enamel_rs::simulation::{Simulation, SimulationConfig};
//!
//! let result = Simulation::new(SimulationConfig::default(), Some(42))?.run()?;
//! let exporter = CsvExporter::default();
//!
//! // One row per frame
//! exporter.export_run(&result, None, "run.csv")?;
//!
//! // Downsampled to 50 rows
//! exporter.export_run(&result, Some(50), "run_light.csv")?;
//!
//! // Surface, substrate and coating of the last frame
//! if let Some(last) = result.final_snapshot() {
//!     exporter.export_profile(last, "profile.csv")?;
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod csv;

pub use csv::{CsvConfig, CsvError, CsvExporter, CsvMetadata};

use crate::simulation::{SimulationResult, Snapshot};

/// Abstraction trait for all export formats.
///
/// # Associated type `Error`
///
/// Each format manages its own errors via the associated type, so callers
/// can react to the concrete failure instead of a boxed error.
///
/// # Parameter `n_points`
///
/// - `None`: exports every frame
/// - `Some(n)`: uniformly downsamples to `n` rows, always keeping the
///   **first and last** frames
pub trait Exporter {
    /// Error type specific to this export format.
    type Error: std::error::Error;

    /// Exports one row of summary quantities per frame.
    ///
    /// # Errors
    ///
    /// Returns an error if `result` holds no snapshot, contains non-finite
    /// values, or the file cannot be written.
    fn export_run(
        &self,
        result: &SimulationResult,
        n_points: Option<usize>,
        path: &str,
    ) -> Result<(), Self::Error>;

    /// Exports the sampled curves of one snapshot: `x`, substrate, surface
    /// and, when present, the coating boundary.
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot contains non-finite values or the
    /// file cannot be written.
    fn export_profile(&self, snapshot: &Snapshot, path: &str) -> Result<(), Self::Error>;
}

/// Indices of `n_points` rows spread evenly over `len`, first and last included
///
/// Returns every index when `n_points` is `None` or not smaller than `len`.
pub(crate) fn downsample_indices(len: usize, n_points: Option<usize>) -> Vec<usize> {
    match n_points {
        Some(n) if n < len && len > 1 => {
            if n <= 1 {
                return vec![len - 1];
            }
            let step = (len - 1) as f64 / (n - 1) as f64;
            let mut indices: Vec<usize> = (0..n).map(|i| (i as f64 * step).round() as usize).collect();
            indices.dedup();
            indices
        }
        _ => (0..len).collect(),
    }
}
