//! Animated GIF export and the static stage figure
//!
//! A full run is exported frame by frame to an animated GIF through the
//! plotters GIF backend. When that fails (no write access, encoder error),
//! [`export_animation_or_stages`] falls back to a single three-panel image
//! of the attack, erosion and coating stages.
//!
//! The fallback does not reuse the run. [`reference_stage_snapshots`] builds
//! its three scenes straight from the crown shape, so the figure still
//! renders when the frames it would have animated are unusable.
//!
//! # Usage
//!
//! ```rust,no_run
//! use enamel_rs::output::visualization::{export_animation_or_stages, AnimationOutput};
//! use enamel_rs::simulation::{Simulation, SimulationConfig};
//!
//! let result = Simulation::new(SimulationConfig::default(), Some(3))?.run()?;
//!
//! match export_animation_or_stages(&result, "erosion.gif", "stages.png", None)? {
//!     AnimationOutput::Animated(path) => println!("animation: {}", path.display()),
//!     AnimationOutput::Static(path) => println!("stages: {}", path.display()),
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use nalgebra::DVector;
use plotters::prelude::*;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaChaRng;
use std::error::Error;
use std::path::PathBuf;
use std::sync::Arc;

use super::config::PlotConfig;
use super::frame::draw_snapshot;
use crate::physics::linspace;
use crate::simulation::{
    ParticleLayer, Phase, PhaseSchedule, SimulationResult, Snapshot, SurfaceParameters,
};

/// Delay between GIF frames, 10 frames per second
pub const DEFAULT_FRAME_DELAY_MS: u32 = 100;

/// Panels of the stage figure: phase shown, panel title and title color
const STAGES: [(Phase, &str, RGBColor); 3] = [
    (Phase::Attack, "Stage 1: Acid Attack", RED),
    (Phase::Erosion, "Stage 2: Enamel Erosion", RGBColor(255, 165, 0)),
    (Phase::Coating, "Stage 3: Coating Protection", BLUE),
];

/// Seed of the scatter and roughness in the reference stage figure
const REFERENCE_SEED: u64 = 2024;

/// Acid drops shown in the first reference stage
const REFERENCE_ACID_COUNT: usize = 50;

/// Largest depth of the reference erosion
const REFERENCE_EROSION_DEPTH: f64 = 0.1;

/// Thickness of the reference coating
const REFERENCE_COATING: f64 = 0.2;

/// What [`export_animation_or_stages`] actually wrote
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnimationOutput {
    /// Animated GIF of every frame
    Animated(PathBuf),
    /// Static three-stage figure
    Static(PathBuf),
}

impl AnimationOutput {
    pub fn path(&self) -> &PathBuf {
        match self {
            AnimationOutput::Animated(path) | AnimationOutput::Static(path) => path,
        }
    }

    pub fn is_animated(&self) -> bool {
        matches!(self, AnimationOutput::Animated(_))
    }
}

/// Write `snapshots` as an animated GIF
///
/// # Arguments
///
/// * `snapshots`      - Frames in display order
/// * `output_path`    - Target `.gif` file
/// * `frame_delay_ms` - Delay between frames
/// * `config`         - Optional plot configuration; `None` uses [`PlotConfig::frame`]
///
/// # Errors
///
/// Returns `Err` when `snapshots` is empty or the encoder fails.
pub fn export_animation(
    snapshots: &[Snapshot],
    output_path: &str,
    frame_delay_ms: u32,
    config: Option<&PlotConfig>,
) -> Result<(), Box<dyn Error>> {
    if snapshots.is_empty() {
        return Err("No snapshots to animate".into());
    }

    let default_config = PlotConfig::frame();
    let config = config.unwrap_or(&default_config);

    let backend = BitMapBackend::gif(output_path, (config.width, config.height), frame_delay_ms)?;
    let root = backend.into_drawing_area();

    for snapshot in snapshots {
        root.fill(&config.background)?;
        draw_snapshot(&root, snapshot, config, None)?;
        root.present()?;
    }

    log::info!("wrote {} frames to {}", snapshots.len(), output_path);
    Ok(())
}

/// Pick the last snapshot of the attack, erosion and coating phases
///
/// # Errors
///
/// Returns `Err` when the run never reached one of those phases.
pub fn stage_snapshots(result: &SimulationResult) -> Result<[&Snapshot; 3], Box<dyn Error>> {
    let pick = |phase: Phase| {
        result
            .last_of_phase(phase)
            .ok_or_else(|| format!("Run has no {} frame for the stage figure", phase))
    };
    Ok([pick(STAGES[0].0)?, pick(STAGES[1].0)?, pick(STAGES[2].0)?])
}

/// Build the attack, erosion and coating scenes without running a simulation
///
/// The crown comes from `surface` sampled at `sample_count` points. The
/// eroded surface sinks by up to 0.1 per sample, never closer than
/// `floor_margin` to the dentin, and the coated scene lays 0.2 on top of it.
/// Scatter and roughness use a fixed seed, so the figure is reproducible.
///
/// # Errors
///
/// Returns `Err` for fewer than 2 samples or invalid surface parameters.
pub fn reference_stage_snapshots(
    surface: &SurfaceParameters,
    sample_count: usize,
) -> Result<[Snapshot; 3], Box<dyn Error>> {
    if sample_count < 2 {
        return Err(format!("Need at least 2 surface samples, got {}", sample_count).into());
    }
    surface.validate()?;

    let mut rng = ChaChaRng::seed_from_u64(REFERENCE_SEED);
    let x = Arc::new(linspace(surface.x_min, surface.x_max, sample_count));
    let crown = x.map(|xi| surface.crown_height(xi));
    let substrate = Arc::new(crown.map(|y| y - surface.substrate_offset));

    let eroded = DVector::from_iterator(
        sample_count,
        crown.iter().zip(substrate.iter()).map(|(&c, &d)| {
            let depth = rng.random_range(0.0..REFERENCE_EROSION_DEPTH);
            (c - depth).max(d + surface.floor_margin)
        }),
    );

    let drops: Vec<[f64; 2]> = (0..REFERENCE_ACID_COUNT)
        .map(|_| {
            [
                rng.random_range(surface.x_min..surface.x_max),
                rng.random_range(2.0..3.0),
            ]
        })
        .collect();

    let schedule = PhaseSchedule::four_phase();
    let scene = |phase: Phase, profile: DVector<f64>, acid: Vec<[f64; 2]>, coated: bool| {
        let frame = schedule.window(phase).map_or(0, |w| w.last_frame());
        let coating = coated.then(|| profile.map(|y| y + REFERENCE_COATING));
        Snapshot {
            frame,
            phase,
            caption: phase.caption(),
            title: phase.title(frame),
            annotation: None,
            x: Arc::clone(&x),
            substrate: Arc::clone(&substrate),
            surface: profile,
            coating,
            coating_thickness: if coated { REFERENCE_COATING } else { 0.0 },
            acid: ParticleLayer {
                visible: !acid.is_empty(),
                points: acid,
                alpha: 0.7,
            },
            reservoir_acid: ParticleLayer {
                points: Vec::new(),
                alpha: 0.0,
                visible: false,
            },
            ions: Vec::new(),
        }
    };

    Ok([
        scene(Phase::Attack, crown, drops, false),
        scene(Phase::Erosion, eroded.clone(), Vec::new(), false),
        scene(Phase::Coating, eroded, Vec::new(), true),
    ])
}

/// Render the three-stage figure of a finished run (`.png` or `.svg`)
///
/// # Errors
///
/// Returns `Err` if a stage is missing from `result` or the backend fails.
pub fn render_stages(
    result: &SimulationResult,
    output_path: &str,
    config: Option<&PlotConfig>,
) -> Result<(), Box<dyn Error>> {
    let stages = stage_snapshots(result)?;
    render_stage_panels(&stages, output_path, config)
}

/// Render the reference stage figure (`.png` or `.svg`)
///
/// Uses the default crown on 200 samples; see [`reference_stage_snapshots`].
pub fn render_reference_stages(
    output_path: &str,
    config: Option<&PlotConfig>,
) -> Result<(), Box<dyn Error>> {
    let [attack, erosion, coating] = reference_stage_snapshots(&SurfaceParameters::default(), 200)?;
    render_stage_panels(&[&attack, &erosion, &coating], output_path, config)
}

/// Export the run as a GIF, or as the reference stage figure if that fails
///
/// The GIF failure is logged as a warning; only a failure of the fallback
/// itself is returned as an error.
pub fn export_animation_or_stages(
    result: &SimulationResult,
    gif_path: &str,
    fallback_path: &str,
    config: Option<&PlotConfig>,
) -> Result<AnimationOutput, Box<dyn Error>> {
    match export_animation(&result.snapshots, gif_path, DEFAULT_FRAME_DELAY_MS, config) {
        Ok(()) => Ok(AnimationOutput::Animated(PathBuf::from(gif_path))),
        Err(e) => {
            log::warn!(
                "GIF export to {} failed ({}), rendering static stages to {}",
                gif_path,
                e,
                fallback_path
            );
            render_reference_stages(fallback_path, None)?;
            Ok(AnimationOutput::Static(PathBuf::from(fallback_path)))
        }
    }
}

fn render_stage_panels(
    stages: &[&Snapshot; 3],
    output_path: &str,
    config: Option<&PlotConfig>,
) -> Result<(), Box<dyn Error>> {
    let default_config = PlotConfig::stages();
    let config = config.unwrap_or(&default_config);

    let ext = std::path::Path::new(output_path)
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or("png");

    match ext {
        "svg" => {
            let backend = SVGBackend::new(output_path, (config.width, config.height));
            render_stages_impl(backend, stages, config)
        }
        _ => {
            let backend = BitMapBackend::new(output_path, (config.width, config.height));
            render_stages_impl(backend, stages, config)
        }
    }
}

fn render_stages_impl<DB: DrawingBackend>(
    backend: DB,
    stages: &[&Snapshot; 3],
    config: &PlotConfig,
) -> Result<(), Box<dyn Error>>
where
    DB::ErrorType: 'static,
{
    let root = backend.into_drawing_area();
    root.fill(&config.background)?;

    let panels = root.split_evenly((1, 3));
    for ((panel, snapshot), (_, title, color)) in panels.iter().zip(stages.iter()).zip(STAGES) {
        draw_snapshot(panel, snapshot, config, Some((title, color)))?;
    }

    root.present()?;
    Ok(())
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::{PhaseSchedule, PhaseWindow, Simulation, SimulationConfig};

    #[test]
    fn test_stage_snapshots_pick_phase_ends() {
        let result = Simulation::new(SimulationConfig::default(), Some(8))
            .unwrap()
            .run()
            .unwrap();
        let stages = stage_snapshots(&result).unwrap();

        assert_eq!(stages[0].frame, 59);
        assert_eq!(stages[1].frame, 119);
        assert_eq!(stages[2].frame, 179);
    }

    #[test]
    fn test_stage_snapshots_need_all_phases() {
        let schedule = PhaseSchedule::new(vec![
            PhaseWindow::new(Phase::Attack, 0, 5),
            PhaseWindow::new(Phase::Erosion, 5, 10),
            PhaseWindow::new(Phase::Coating, 10, 15),
        ]);
        let config = SimulationConfig::default().with_schedule(schedule);
        let mut result = Simulation::new(config, Some(1)).unwrap().run().unwrap();
        result.snapshots.retain(|s| s.phase != Phase::Erosion);

        let err = stage_snapshots(&result).unwrap_err();
        assert!(err.to_string().contains("Erosion"));
    }

    #[test]
    fn test_reference_stages_need_no_run() {
        let surface = SurfaceParameters::default();
        let [attack, erosion, coating] = reference_stage_snapshots(&surface, 120).unwrap();

        assert_eq!(attack.phase, Phase::Attack);
        assert_eq!(attack.acid.points.len(), 50);
        assert!(attack.acid.is_drawn());
        assert!(!erosion.acid.is_drawn());

        for (i, &xi) in attack.x.iter().enumerate() {
            assert_eq!(attack.surface[i], surface.crown_height(xi));
            assert!(erosion.surface[i] <= attack.surface[i]);
            assert!(attack.surface[i] - erosion.surface[i] < 0.1);
            assert!(erosion.surface[i] >= erosion.substrate[i] + surface.floor_margin);
        }

        let layer = coating.coating.as_ref().unwrap();
        for (c, s) in layer.iter().zip(coating.surface.iter()) {
            assert!((c - s - 0.2).abs() < 1e-12);
        }
        assert_eq!(coating.surface, erosion.surface);
    }

    #[test]
    fn test_reference_stages_are_reproducible() {
        let surface = SurfaceParameters::default();
        let a = reference_stage_snapshots(&surface, 80).unwrap();
        let b = reference_stage_snapshots(&surface, 80).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_reference_stages_reject_bad_input() {
        assert!(reference_stage_snapshots(&SurfaceParameters::default(), 1).is_err());

        let surface = SurfaceParameters {
            erosion_amplitude: f64::NAN,
            ..SurfaceParameters::default()
        };
        assert!(reference_stage_snapshots(&surface, 50).is_err());
    }

    #[test]
    fn test_render_reference_stages_svg() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reference.svg");
        render_reference_stages(path.to_str().unwrap(), None).unwrap();
        assert!(std::fs::read_to_string(&path).unwrap().contains("Stage 3"));
    }

    #[test]
    fn test_export_animation_rejects_empty_run() {
        let err = export_animation(&[], "unused.gif", DEFAULT_FRAME_DELAY_MS, None).unwrap_err();
        assert!(err.to_string().contains("No snapshots"));
    }

    #[test]
    fn test_animation_output_accessors() {
        let output = AnimationOutput::Static(PathBuf::from("stages.png"));
        assert!(!output.is_animated());
        assert_eq!(output.path(), &PathBuf::from("stages.png"));
    }
}
