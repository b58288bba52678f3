//! Output pipeline: run a simulation, then render and export it

use enamel_rs::output::export::{CsvConfig, CsvExporter, CsvMetadata, Exporter};
use enamel_rs::output::visualization::{
    coating_materials, compatibility_profiles, export_animation, export_animation_or_stages,
    plot_chemical_compatibility, plot_coating_comparison, plot_ph_solubility, render_snapshot,
    render_stages, PlotConfig, DEFAULT_FRAME_DELAY_MS,
};
use enamel_rs::simulation::{
    Phase, PhaseSchedule, PhaseWindow, Simulation, SimulationConfig, SimulationResult,
};
use std::fs;

mod common;
use common::small_config;

/// Short four-phase run so GIF encoding stays fast
fn short_run() -> SimulationResult {
    let schedule = PhaseSchedule::new(vec![
        PhaseWindow::new(Phase::Attack, 0, 3),
        PhaseWindow::new(Phase::Erosion, 3, 6),
        PhaseWindow::new(Phase::Coating, 6, 9),
        PhaseWindow::new(Phase::ResistanceTest, 9, 12),
    ]);
    Simulation::new(small_config().with_schedule(schedule), Some(21))
        .unwrap()
        .run()
        .unwrap()
}

fn small_frame() -> PlotConfig {
    PlotConfig {
        width: 320,
        height: 200,
        ..PlotConfig::frame()
    }
}

#[test]
fn test_render_snapshot_png_and_svg() {
    let dir = tempfile::tempdir().unwrap();
    let result = short_run();
    let config = small_frame();

    for (i, snapshot) in result.snapshots.iter().enumerate() {
        let path = dir.path().join(format!("frame_{:03}.png", i));
        render_snapshot(snapshot, path.to_str().unwrap(), Some(&config)).unwrap();
        assert!(path.exists());
    }

    let svg = dir.path().join("last.svg");
    render_snapshot(result.final_snapshot().unwrap(), svg.to_str().unwrap(), None).unwrap();
    let content = fs::read_to_string(&svg).unwrap();
    assert!(content.contains("<svg"));
}

#[test]
fn test_export_animation_writes_gif() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("run.gif");
    let result = short_run();

    export_animation(
        &result.snapshots,
        path.to_str().unwrap(),
        DEFAULT_FRAME_DELAY_MS,
        Some(&small_frame()),
    )
    .unwrap();

    let bytes = fs::read(&path).unwrap();
    assert!(bytes.starts_with(b"GIF"));
}

#[test]
fn test_animation_falls_back_to_stages() {
    let dir = tempfile::tempdir().unwrap();
    let gif = dir.path().join("missing").join("run.gif");
    let stages = dir.path().join("stages.png");
    let result = short_run();

    let output = export_animation_or_stages(
        &result,
        gif.to_str().unwrap(),
        stages.to_str().unwrap(),
        Some(&small_frame()),
    )
    .unwrap();

    assert!(!output.is_animated());
    assert_eq!(output.path(), &stages);
    assert!(stages.exists());
}

#[test]
fn test_fallback_does_not_need_the_run() {
    let dir = tempfile::tempdir().unwrap();
    let gif = dir.path().join("empty.gif");
    let stages = dir.path().join("stages.svg");

    // Nothing to animate, and no phase to pick stages from
    let empty = SimulationResult::new(Vec::new());
    let output =
        export_animation_or_stages(&empty, gif.to_str().unwrap(), stages.to_str().unwrap(), None)
            .unwrap();

    assert!(!output.is_animated());
    let content = fs::read_to_string(&stages).unwrap();
    assert!(content.contains("Stage 1: Acid Attack"));
    assert!(content.contains("Stage 3: Coating Protection"));
}

#[test]
fn test_render_stages_svg() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("stages.svg");
    render_stages(&short_run(), path.to_str().unwrap(), None).unwrap();
    assert!(path.exists());
}

#[test]
fn test_static_charts() {
    let dir = tempfile::tempdir().unwrap();

    let solubility = dir.path().join("solubility.png");
    plot_ph_solubility(solubility.to_str().unwrap(), None).unwrap();
    assert!(solubility.exists());

    let comparison = dir.path().join("comparison.svg");
    plot_coating_comparison(&coating_materials(), comparison.to_str().unwrap(), None).unwrap();
    assert!(fs::read_to_string(&comparison).unwrap().contains("<svg"));

    let radar = dir.path().join("compatibility.png");
    plot_chemical_compatibility(&compatibility_profiles(), radar.to_str().unwrap(), None)
        .unwrap();
    assert!(radar.exists());
}

#[test]
fn test_csv_export_of_full_run() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("run.csv");

    let simulation = Simulation::new(SimulationConfig::default().with_sample_count(50), Some(33))
        .unwrap();
    let result = simulation.run().unwrap();

    let metadata = CsvMetadata::new().label("pipeline").seed(33).sample_count(50);
    let exporter = CsvExporter::new(CsvConfig::european().with_metadata(metadata));
    exporter.export_run(&result, Some(27), path.to_str().unwrap()).unwrap();

    let content = fs::read_to_string(&path).unwrap();
    assert!(content.contains("# Sample Count: 50"));
    assert!(content.contains("# seed: 33"));

    let rows: Vec<&str> = content.lines().filter(|l| !l.starts_with('#')).collect();
    assert_eq!(rows[0], "frame;phase;coating_thickness;mean_surface;min_enamel_thickness;acid_alpha;ion_count");
    assert_eq!(rows.len(), 28);
    assert!(rows[1].starts_with("0;Attack;0,000000;"));
    assert!(rows[27].starts_with("259;ResistanceTest;0,295000;"));
}
