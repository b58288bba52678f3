//! Example: Enamel Erosion Animation
//!
//! Runs the default four-phase schedule and exports it as an animated GIF,
//! falling back to the static three-stage figure when the GIF cannot be
//! written. A few individual frames and a CSV summary are saved alongside.
//!
//! **Phases** (default schedule, 260 frames):
//! - Attack [0, 60): acid falls onto healthy enamel
//! - Erosion [60, 120): the surface dissolves, acid fades
//! - Coating [120, 180): a protective layer grows, up to 0.3
//! - Resistance test [180, 260): a second acid wave hits the coating,
//!   which releases ions

use enamel_rs::{
    output::{export_animation_or_stages, render_snapshot, CsvExporter, Exporter},
    simulation::{Phase, Simulation, SimulationConfig},
};

use std::time::Instant;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("═══════════════════════════════════════════════════════");
    println!("  Enamel Erosion - Full Animation");
    println!("═══════════════════════════════════════════════════════\n");

    // ====== Configuration ======

    let seed = 42;
    let config = SimulationConfig::default();

    println!("Simulation:");
    println!("  Samples      : {}", config.sample_count);
    println!("  Frames       : {}", config.schedule.total_frames());
    println!("  Coating rate : {} per frame (cap {})", config.coating.rate, config.coating.cap);
    println!("  Seed         : {}\n", seed);

    // ====== Run ======

    let start = Instant::now();
    let simulation = Simulation::new(config, Some(seed))?;
    let result = simulation.run()?;
    println!("✓ {} frames in {:.2}s\n", result.len(), start.elapsed().as_secs_f64());

    for phase in Phase::ALL {
        if let Some(last) = result.last_of_phase(phase) {
            println!(
                "  {:<16} frame {:>3}  mean surface {:.4}  coating {:.3}  ions {:>2}",
                phase.name(),
                last.frame,
                last.mean_surface_height(),
                last.coating_thickness,
                last.ion_count()
            );
        }
    }

    // ====== Output ======

    let tmp_dir = std::env::temp_dir();
    let gif = tmp_dir.join("enamel_erosion.gif");
    let stages = tmp_dir.join("enamel_erosion_stages.png");

    println!("\nExporting animation...");
    let output = export_animation_or_stages(
        &result,
        gif.to_str().ok_or("non UTF-8 temp path")?,
        stages.to_str().ok_or("non UTF-8 temp path")?,
        None,
    )?;
    if output.is_animated() {
        println!("  Animation : {}", output.path().display());
    } else {
        println!("  GIF unavailable, stages : {}", output.path().display());
    }

    for frame in [30, 90, 150, 220] {
        let path = tmp_dir.join(format!("enamel_frame_{:03}.png", frame));
        render_snapshot(&result.snapshots[frame], path.to_str().ok_or("non UTF-8 temp path")?, None)?;
        println!("  Frame {:>3}  : {}", frame, path.display());
    }

    let csv = tmp_dir.join("enamel_erosion.csv");
    CsvExporter::default().export_run(&result, None, csv.to_str().ok_or("non UTF-8 temp path")?)?;
    println!("  Summary   : {}", csv.display());

    Ok(())
}
