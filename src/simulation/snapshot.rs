//! Per-frame output record
//!
//! A [`Snapshot`] is everything a renderer or exporter needs to draw one
//! frame, and nothing more. The fixed x samples and the dentin substrate
//! never change during a run, so they are shared through `Arc` instead of
//! being copied into every frame.

use std::sync::Arc;

use nalgebra::DVector;

use super::schedule::Phase;

/// Display state of one acid population
#[derive(Debug, Clone, PartialEq)]
pub struct ParticleLayer {
    /// `[x, y]` per particle
    pub points: Vec<[f64; 2]>,
    pub alpha: f64,
    pub visible: bool,
}

impl ParticleLayer {
    /// Whether a renderer should draw anything for this layer
    pub fn is_drawn(&self) -> bool {
        self.visible && self.alpha > 0.0 && !self.points.is_empty()
    }
}

/// State of the scene at one frame
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub frame: usize,
    pub phase: Phase,
    /// Short caption, e.g. "acid attack"
    pub caption: &'static str,
    /// Long plot title
    pub title: String,
    /// Note drawn on the scene once the coating has built up
    pub annotation: Option<&'static str>,
    /// Fixed horizontal samples
    pub x: Arc<DVector<f64>>,
    /// Fixed dentin boundary
    pub substrate: Arc<DVector<f64>>,
    /// Enamel surface heights
    pub surface: DVector<f64>,
    /// Coating upper boundary, present in the coating and resistance phases
    pub coating: Option<DVector<f64>>,
    /// Coating thickness, zero while the coating is absent
    pub coating_thickness: f64,
    /// Attacking acid
    pub acid: ParticleLayer,
    /// Acid of the resistance test
    pub reservoir_acid: ParticleLayer,
    /// `[x, y]` per live ion
    pub ions: Vec<[f64; 2]>,
}

impl Snapshot {
    pub fn mean_surface_height(&self) -> f64 {
        self.surface.mean()
    }

    pub fn ion_count(&self) -> usize {
        self.ions.len()
    }

    /// Thinnest enamel left above the dentin
    pub fn min_enamel_thickness(&self) -> f64 {
        self.surface
            .iter()
            .zip(self.substrate.iter())
            .map(|(y, s)| y - s)
            .fold(f64::INFINITY, f64::min)
    }

    pub fn has_coating(&self) -> bool {
        self.coating.is_some()
    }

    /// Enamel region: surface left to right, then substrate right to left
    pub fn mineral_polygon(&self) -> Vec<(f64, f64)> {
        band(&self.x, &self.substrate, &self.surface)
    }

    /// Dentin region: substrate left to right, closed at `root_level`
    pub fn dentin_polygon(&self, root_level: f64) -> Vec<(f64, f64)> {
        let mut points: Vec<(f64, f64)> = self
            .x
            .iter()
            .zip(self.substrate.iter())
            .map(|(&x, &y)| (x, y))
            .collect();
        if let (Some(&first), Some(&last)) = (self.x.iter().next(), self.x.iter().last()) {
            points.push((last, root_level));
            points.push((first, root_level));
        }
        points
    }

    /// Coating region between the surface and the coating boundary
    pub fn coating_polygon(&self) -> Option<Vec<(f64, f64)>> {
        self.coating
            .as_ref()
            .map(|coating| band(&self.x, &self.surface, coating))
    }
}

/// Closed polygon between `lower` and `upper` over the same x samples
fn band(xs: &DVector<f64>, lower: &DVector<f64>, upper: &DVector<f64>) -> Vec<(f64, f64)> {
    let top = xs.iter().zip(upper.iter());
    let bottom = xs.iter().zip(lower.iter()).rev();
    top.chain(bottom).map(|(&x, &y)| (x, y)).collect()
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot() -> Snapshot {
        let layer = ParticleLayer {
            points: Vec::new(),
            alpha: 0.6,
            visible: true,
        };
        Snapshot {
            frame: 130,
            phase: Phase::Coating,
            caption: Phase::Coating.caption(),
            title: Phase::Coating.title(130),
            annotation: None,
            x: Arc::new(DVector::from_vec(vec![0.0, 1.0, 2.0])),
            substrate: Arc::new(DVector::from_vec(vec![0.0, 0.5, 0.0])),
            surface: DVector::from_vec(vec![1.0, 1.2, 1.0]),
            coating: Some(DVector::from_vec(vec![1.05, 1.25, 1.05])),
            coating_thickness: 0.05,
            acid: layer.clone(),
            reservoir_acid: ParticleLayer {
                visible: false,
                ..layer
            },
            ions: vec![[0.5, 2.0]],
        }
    }

    #[test]
    fn test_summary_values() {
        let snapshot = snapshot();
        assert!((snapshot.mean_surface_height() - 3.2 / 3.0).abs() < 1e-12);
        assert!((snapshot.min_enamel_thickness() - 0.7).abs() < 1e-12);
        assert_eq!(snapshot.ion_count(), 1);
    }

    #[test]
    fn test_mineral_polygon_is_closed_band() {
        let polygon = snapshot().mineral_polygon();
        assert_eq!(polygon.len(), 6);
        assert_eq!(polygon[0], (0.0, 1.0));
        assert_eq!(polygon[2], (2.0, 1.0));
        assert_eq!(polygon[3], (2.0, 0.0));
        assert_eq!(polygon[5], (0.0, 0.0));
    }

    #[test]
    fn test_dentin_polygon_reaches_root() {
        let polygon = snapshot().dentin_polygon(-2.0);
        assert_eq!(polygon.len(), 5);
        assert_eq!(polygon[3], (2.0, -2.0));
        assert_eq!(polygon[4], (0.0, -2.0));
    }

    #[test]
    fn test_coating_polygon_only_with_coating() {
        let mut snapshot = snapshot();
        assert_eq!(snapshot.coating_polygon().map(|p| p.len()), Some(6));
        snapshot.coating = None;
        assert!(snapshot.coating_polygon().is_none());
    }

    #[test]
    fn test_hidden_layer_not_drawn() {
        let snapshot = snapshot();
        assert!(!snapshot.reservoir_acid.is_drawn());
        // Visible but empty
        assert!(!snapshot.acid.is_drawn());
    }
}
