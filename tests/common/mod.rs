//! Common utilities for integration tests

pub mod mock_boundaries;
pub mod test_helpers;

// Re-export commonly used items
pub use mock_boundaries::{SlopedBoundary, StepBoundary};
pub use test_helpers::{
    assert_profile_at_least,
    assert_snapshot_finite,
    run_default,
    seeded_rng,
    small_config,
};
