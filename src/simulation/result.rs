//! Snapshots of a complete run
//!
//! Holds the trajectory in frame order together with free-form metadata
//! (seed, sample count, schedule) for exported files.

use std::collections::HashMap;

use super::schedule::Phase;
use super::snapshot::Snapshot;

/// All snapshots of a run, in frame order
#[derive(Debug, Clone)]
pub struct SimulationResult {
    pub snapshots: Vec<Snapshot>,
    pub metadata: HashMap<String, String>,
}

impl SimulationResult {
    pub fn new(snapshots: Vec<Snapshot>) -> Self {
        Self {
            snapshots,
            metadata: HashMap::new(),
        }
    }

    pub fn add_metadata(&mut self, key: &str, value: &str) {
        self.metadata.insert(key.to_string(), value.to_string());
    }

    /// Number of frames
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn final_snapshot(&self) -> Option<&Snapshot> {
        self.snapshots.last()
    }

    /// Last snapshot of `phase`, if the run reached it
    pub fn last_of_phase(&self, phase: Phase) -> Option<&Snapshot> {
        self.snapshots.iter().rev().find(|s| s.phase == phase)
    }

    pub fn frames(&self) -> Vec<usize> {
        self.snapshots.iter().map(|s| s.frame).collect()
    }

    pub fn coating_thickness_series(&self) -> Vec<f64> {
        self.snapshots.iter().map(|s| s.coating_thickness).collect()
    }

    pub fn mean_surface_series(&self) -> Vec<f64> {
        self.snapshots.iter().map(Snapshot::mean_surface_height).collect()
    }

    pub fn ion_count_series(&self) -> Vec<usize> {
        self.snapshots.iter().map(Snapshot::ion_count).collect()
    }
}
