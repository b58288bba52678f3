//! Frame-driven simulation core
//!
//! The simulation is a discrete-time state machine. One frame counter drives
//! four sub-models through a fixed sequence of phases:
//!
//! ```text
//! frame ──► PhaseSchedule ──► Phase ──► transition(state, frame) ──► Snapshot
//!                                          │
//!             ┌────────────────────────────┼──────────────────────────┐
//!             ▼                ▼           ▼             ▼            ▼
//!        SurfaceModel   AcidPopulation  CoatingModel  AcidPopulation  IonReservoir
//!         (erode)        #1 (attack)     (grow)       #2 (challenge)  (emit/drift)
//! ```
//!
//! # Module Organization
//!
//! - **`config`**: parameter blocks and their validation
//! - **`schedule`**: `Phase`, `PhaseWindow` and `PhaseSchedule`
//! - **`snapshot`**: the per-frame output record
//! - **`driver`**: `SimulationState`, the pure `transition` function and the
//!   `Simulation` convenience wrapper
//! - **`result`**: `SimulationResult`, all snapshots of a run plus metadata
//!
//! # Quick Start
//!
//! ```rust
//! use enamel_rs::simulation::{Simulation, SimulationConfig, Phase};
//!
//! let mut simulation = Simulation::new(SimulationConfig::default(), Some(7))?;
//!
//! let first = simulation.advance(0);
//! assert_eq!(first.phase, Phase::Attack);
//! assert!(first.coating.is_none());
//!
//! let result = simulation.run()?;
//! assert_eq!(result.len(), 260);
//! # Ok::<(), String>(())
//! ```
//!
//! # Error Handling
//!
//! Invalid configurations are rejected by `Simulation::new` with a `String`
//! message. Asking for a frame past the end of the schedule is a programmer
//! error and panics. `Simulation::run` additionally checks every snapshot for
//! NaN or infinite values.

mod config;
mod driver;
mod result;
mod schedule;
mod snapshot;

// =================================================================================================
// Parallel Execution Threshold
// =================================================================================================
//
// Stored in an AtomicUsize so benchmarks and tests can change it at runtime
// without a mutex on every profile update. Relaxed ordering is enough: the
// value is a performance hint.
// =================================================================================================

use std::sync::atomic::{AtomicUsize, Ordering};

/// Default number of profile samples above which [`zip_apply`](crate::physics::zip_apply)
/// switches to parallel iteration.
const DEFAULT_PARALLEL_THRESHOLD: usize = 4095;

static PARALLEL_THRESHOLD: AtomicUsize = AtomicUsize::new(DEFAULT_PARALLEL_THRESHOLD);

/// Return the current parallel-execution threshold.
///
/// Profiles with more samples than this value are updated with Rayon, but
/// only when the crate is compiled with the `parallel` feature.
///
/// # Example
///
/// ```rust
/// use enamel_rs::simulation::parallel_threshold;
///
/// assert!(parallel_threshold() > 0);
/// ```
pub fn parallel_threshold() -> usize {
    PARALLEL_THRESHOLD.load(Ordering::Relaxed)
}

/// Set the parallel-execution threshold to a new value.
///
/// # Panics
///
/// Panics when `threshold == 0`.
///
/// # Example
///
/// ```rust
/// use enamel_rs::simulation::{parallel_threshold, set_parallel_threshold};
///
/// let previous = parallel_threshold();
/// set_parallel_threshold(8192);
/// assert_eq!(parallel_threshold(), 8192);
///
/// set_parallel_threshold(previous);
/// ```
pub fn set_parallel_threshold(threshold: usize) {
    assert!(threshold > 0, "parallel threshold must be at least 1");
    PARALLEL_THRESHOLD.store(threshold, Ordering::Relaxed);
}

/// Serializes tests that touch the global threshold
#[cfg(test)]
static THRESHOLD_LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());

/// RAII guard that sets the threshold and restores the previous value on drop.
///
/// Test builds only. Holding the guard also holds a process-wide lock, so
/// concurrently running tests never observe each other's values.
#[cfg(test)]
pub(crate) struct ThresholdGuard {
    previous: usize,
    _lock: std::sync::MutexGuard<'static, ()>,
}

#[cfg(test)]
impl ThresholdGuard {
    pub(crate) fn save(new_value: usize) -> Self {
        let lock = THRESHOLD_LOCK
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let previous = parallel_threshold();
        set_parallel_threshold(new_value);
        Self { previous, _lock: lock }
    }
}

#[cfg(test)]
impl Drop for ThresholdGuard {
    fn drop(&mut self) {
        PARALLEL_THRESHOLD.store(self.previous, Ordering::Relaxed);
    }
}

// =================================================================================================
// Public Re-exports
// =================================================================================================

pub use config::{
    AcidParameters,
    CoatingParameters,
    IonParameters,
    SimulationConfig,
    SurfaceParameters,
};
pub use driver::{transition, Simulation, SimulationState};
pub use result::SimulationResult;
pub use schedule::{Phase, PhaseSchedule, PhaseWindow};
pub use snapshot::{ParticleLayer, Snapshot};

// =================================================================================================
// Helper Functions
// =================================================================================================

use crate::physics::is_finite;

/// Check a snapshot for NaN or infinite values
///
/// # Arguments
///
/// * `snapshot` - Snapshot to validate
/// * `frame` - Frame number, for error reporting
pub(crate) fn validate_snapshot(snapshot: &Snapshot, frame: usize) -> Result<(), String> {
    if !is_finite(&snapshot.surface) {
        return Err(format!(
            "Non-finite surface height at frame {}. Check the erosion parameters.",
            frame
        ));
    }

    if let Some(coating) = &snapshot.coating
        && !is_finite(coating)
    {
        return Err(format!("Non-finite coating boundary at frame {}", frame));
    }

    if !snapshot.coating_thickness.is_finite() {
        return Err(format!("Non-finite coating thickness at frame {}", frame));
    }

    let layers = [("acid", &snapshot.acid), ("reservoir acid", &snapshot.reservoir_acid)];
    for (label, layer) in layers {
        if layer.points.iter().flatten().any(|v| !v.is_finite()) {
            return Err(format!("Non-finite {} position at frame {}", label, frame));
        }
    }

    if snapshot.ions.iter().flatten().any(|v| !v.is_finite()) {
        return Err(format!("Non-finite ion position at frame {}", frame));
    }

    Ok(())
}

// =================================================================================================
// Tests
// =================================================================================================
