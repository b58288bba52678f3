//! Scene rendering for a single snapshot
//!
//! Draws the tooth cross-section the way the animation shows it:
//!
//! 1. dentin, from the bottom of the view up to the substrate
//! 2. enamel, from the substrate up to the surface, with a gray outline
//! 3. coating, from the surface up to the coating boundary (when present)
//! 4. acid particles of both populations (when visible) and ions
//! 5. the phase title and the coating annotation
//!
//! [`draw_snapshot`] works on any drawing area so the same code serves
//! single frames, GIF frames and the panels of the stage figure.

use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::error::Error;

use super::config::{
    PlotConfig, COATING_COLOR, DENTIN_COLOR, ENAMEL_COLOR, ERODED_ENAMEL_COLOR, ION_COLOR,
};
use crate::simulation::{Phase, Snapshot};

/// Title color per phase
pub(crate) fn phase_color(phase: Phase) -> RGBColor {
    match phase {
        Phase::Attack => BLACK,
        Phase::Erosion => RED,
        Phase::Coating => BLUE,
        Phase::ResistanceTest => RGBColor(128, 0, 128),
    }
}

/// Render one snapshot to an image file
///
/// # Arguments
///
/// * `snapshot`    - Frame to draw
/// * `output_path` - Output file path (`.png` → bitmap, `.svg` → vector)
/// * `config`      - Optional plot configuration; `None` uses [`PlotConfig::frame`]
///
/// # Errors
///
/// Returns `Err` if the backend cannot write to `output_path`.
///
/// # Example
///
/// ```rust,no_run
/// use enamel_rs::output::visualization::render_snapshot;
/// use enamel_rs::simulation::{Simulation, SimulationConfig};
///
/// let mut simulation = Simulation::new(SimulationConfig::default(), Some(1))?;
/// let snapshot = simulation.advance(0);
/// render_snapshot(&snapshot, "frame_000.png", None)?;
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn render_snapshot(
    snapshot: &Snapshot,
    output_path: &str,
    config: Option<&PlotConfig>,
) -> Result<(), Box<dyn Error>> {
    let default_config = PlotConfig::frame();
    let config = config.unwrap_or(&default_config);

    let ext = std::path::Path::new(output_path)
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or("png");

    match ext {
        "svg" => {
            let root = SVGBackend::new(output_path, (config.width, config.height))
                .into_drawing_area();
            root.fill(&config.background)?;
            draw_snapshot(&root, snapshot, config, None)?;
            root.present()?;
        }
        _ => {
            let root = BitMapBackend::new(output_path, (config.width, config.height))
                .into_drawing_area();
            root.fill(&config.background)?;
            draw_snapshot(&root, snapshot, config, None)?;
            root.present()?;
        }
    }

    Ok(())
}

/// Draw `snapshot` on `area`
///
/// `title` overrides both the configured title and the snapshot title; it is
/// given as `(text, color)`.
pub fn draw_snapshot<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    snapshot: &Snapshot,
    config: &PlotConfig,
    title: Option<(&str, RGBColor)>,
) -> Result<(), Box<dyn Error>>
where
    DB::ErrorType: 'static,
{
    let (title, title_color) = match title {
        Some((text, color)) => (text, color),
        None if !config.title.is_empty() => (config.title.as_str(), BLACK),
        None => (snapshot.title.as_str(), phase_color(snapshot.phase)),
    };

    let (x_min, x_max) = config.x_range;
    let (y_min, y_max) = config.y_range;

    let mut chart = ChartBuilder::on(area)
        .caption(title, ("sans-serif", 22).into_font().color(&title_color))
        .margin(10)
        .build_cartesian_2d(x_min..x_max, y_min..y_max)?;

    if config.show_grid {
        chart.configure_mesh().draw()?;
    }

    // ── Dentin, down to the bottom of the view ───────────────────────────────
    chart
        .draw_series(std::iter::once(Polygon::new(
            snapshot.dentin_polygon(y_min),
            DENTIN_COLOR.mix(0.9).filled(),
        )))?
        .label("Dentin")
        .legend(|(x, y)| Rectangle::new([(x, y - 5), (x + 15, y + 5)], DENTIN_COLOR.filled()));

    // ── Enamel ───────────────────────────────────────────────────────────────
    let enamel_color = match snapshot.phase {
        Phase::Attack => ENAMEL_COLOR,
        _ => ERODED_ENAMEL_COLOR,
    };
    chart
        .draw_series(std::iter::once(Polygon::new(
            snapshot.mineral_polygon(),
            enamel_color.mix(0.9).filled(),
        )))?
        .label("Enamel")
        .legend(move |(x, y)| {
            Rectangle::new([(x, y - 5), (x + 15, y + 5)], enamel_color.filled())
        });

    chart.draw_series(LineSeries::new(
        snapshot.x.iter().zip(snapshot.surface.iter()).map(|(x, y)| (*x, *y)),
        ShapeStyle::from(&RGBColor(128, 128, 128)).stroke_width(1),
    ))?;

    // ── Coating ──────────────────────────────────────────────────────────────
    if let Some(coating) = snapshot.coating_polygon() {
        chart
            .draw_series(std::iter::once(Polygon::new(
                coating,
                COATING_COLOR.mix(0.6).filled(),
            )))?
            .label("Protective Coating")
            .legend(|(x, y)| {
                Rectangle::new([(x, y - 5), (x + 15, y + 5)], COATING_COLOR.filled())
            });
    }

    // ── Particles ────────────────────────────────────────────────────────────
    let size = config.marker_size;
    let layers = [
        (&snapshot.acid, config.acid_color, "Acid (H+)"),
        (&snapshot.reservoir_acid, config.reservoir_acid_color, "Acid challenge (H+)"),
    ];
    for (layer, color, label) in layers {
        if !layer.is_drawn() {
            continue;
        }
        let style = color.mix(layer.alpha).filled();
        chart
            .draw_series(
                layer
                    .points
                    .iter()
                    .map(|p| Circle::new((p[0], p[1]), size, style)),
            )?
            .label(label)
            .legend(move |(x, y)| Circle::new((x, y), 3, color.filled()));
    }

    if !snapshot.ions.is_empty() {
        let ion_size = size.saturating_sub(1).max(1);
        chart
            .draw_series(
                snapshot
                    .ions
                    .iter()
                    .map(|p| Circle::new((p[0], p[1]), ion_size, ION_COLOR.filled())),
            )?
            .label("Released ions (Ca2+, PO4 3-, F-)")
            .legend(|(x, y)| Circle::new((x, y), 3, ION_COLOR.filled()));
    }

    // ── Annotation ───────────────────────────────────────────────────────────
    if let Some(note) = snapshot.annotation {
        let style = ("sans-serif", 18)
            .into_font()
            .color(&BLUE)
            .pos(Pos::new(HPos::Center, VPos::Center));
        chart.draw_series(std::iter::once(Text::new(note.to_string(), (0.0, 2.5), style)))?;
    }

    if config.show_legend {
        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::LowerRight)
            .background_style(&config.background.mix(0.8))
            .border_style(&BLACK)
            .draw()?;
    }

    Ok(())
}

// =================================================================================================
// Tests
// =================================================================================================
