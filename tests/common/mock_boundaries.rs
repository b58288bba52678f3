//! Mock collision boundaries for particle tests

use enamel_rs::physics::CollisionBoundary;

/// Straight line `y = slope · x + intercept`
pub struct SlopedBoundary {
    pub slope: f64,
    pub intercept: f64,
}

impl SlopedBoundary {
    pub fn new(slope: f64, intercept: f64) -> Self {
        Self { slope, intercept }
    }
}

impl CollisionBoundary for SlopedBoundary {
    fn height_at(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }
}

/// `low` left of `at`, `high` from `at` onward
pub struct StepBoundary {
    pub at: f64,
    pub low: f64,
    pub high: f64,
}

impl CollisionBoundary for StepBoundary {
    fn height_at(&self, x: f64) -> f64 {
        if x < self.at { self.low } else { self.high }
    }
}
