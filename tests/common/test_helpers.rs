//! Helper functions for integration tests

use enamel_rs::simulation::{Simulation, SimulationConfig, SimulationResult, Snapshot};
use nalgebra::DVector;
use rand::SeedableRng;
use rand_chacha::ChaChaRng;

/// Deterministic generator for tests
pub fn seeded_rng(seed: u64) -> ChaChaRng {
    ChaChaRng::seed_from_u64(seed)
}

/// Default configuration with fewer samples, for faster runs
pub fn small_config() -> SimulationConfig {
    SimulationConfig::default().with_sample_count(60)
}

/// Full default run with `seed`
pub fn run_default(seed: u64) -> SimulationResult {
    Simulation::new(SimulationConfig::default(), Some(seed))
        .expect("default configuration is valid")
        .run()
        .expect("default run succeeds")
}

/// Assert `profile[i] >= lower[i] - tolerance` for every sample
pub fn assert_profile_at_least(
    profile: &DVector<f64>,
    lower: &DVector<f64>,
    tolerance: f64,
    message: &str,
) {
    assert_eq!(profile.len(), lower.len(), "{}: Dimension mismatch", message);
    for (i, (&v, &l)) in profile.iter().zip(lower.iter()).enumerate() {
        assert!(
            v >= l - tolerance,
            "{}: sample {} is {} below its bound {}",
            message, i, v, l
        );
    }
}

/// Assert that no curve or particle of `snapshot` holds NaN or Inf
pub fn assert_snapshot_finite(snapshot: &Snapshot) {
    let curves = [Some(&snapshot.surface), snapshot.coating.as_ref()];
    for curve in curves.into_iter().flatten() {
        assert!(curve.iter().all(|v| v.is_finite()), "frame {}: non-finite curve", snapshot.frame);
    }
    let points = snapshot
        .acid
        .points
        .iter()
        .chain(&snapshot.reservoir_acid.points)
        .chain(&snapshot.ions);
    for p in points {
        assert!(p[0].is_finite() && p[1].is_finite(), "frame {}: non-finite point", snapshot.frame);
    }
}
