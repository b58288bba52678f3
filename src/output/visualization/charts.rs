//! Static educational charts
//!
//! Three figures accompany the animation:
//!
//! - [`plot_ph_solubility`]: relative solubility of hydroxyapatite and
//!   fluorapatite against pH, with the critical pH 5.5 marked
//! - [`plot_coating_comparison`]: grouped bars of acid resistance,
//!   durability and remineralization per coating material
//! - [`plot_chemical_compatibility`]: radar chart of material properties
//!
//! # Solubility model
//!
//! Relative solubility grows tenfold per pH unit below a critical value:
//!
//! $$S(pH) = 10^{\,pH_c - pH}$$
//!
//! with $pH_c = 5.5$ for hydroxyapatite and $pH_c = 4.5$ for fluorapatite.
//! Values above the chart ceiling are clipped when drawn. The pH axis runs
//! from basic on the left to acidic on the right.

use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::error::Error;
use std::f64::consts::PI;

use super::config::{PlotConfig, NO_TITLE};
use crate::physics::linspace;

/// Critical pH of hydroxyapatite (healthy enamel)
pub const HYDROXYAPATITE_CRITICAL_PH: f64 = 5.5;

/// Critical pH of fluorapatite (fluoride-treated enamel)
pub const FLUORAPATITE_CRITICAL_PH: f64 = 4.5;

// =================================================================================================
// Data
// =================================================================================================

/// Sampled solubility curves
#[derive(Debug, Clone, PartialEq)]
pub struct SolubilityCurves {
    pub ph: Vec<f64>,
    pub hydroxyapatite: Vec<f64>,
    pub fluorapatite: Vec<f64>,
}

/// Relative solubility at `ph` for a mineral with critical pH `critical_ph`
pub fn relative_solubility(ph: f64, critical_ph: f64) -> f64 {
    10f64.powf(critical_ph - ph)
}

/// Sample both curves at `n_points` pH values on `[3, 8]`
///
/// # Example
///
/// ```rust
/// use enamel_rs::output::visualization::solubility_curves;
///
/// let curves = solubility_curves(100);
/// assert_eq!(curves.ph.len(), 100);
/// assert!(curves.hydroxyapatite[0] > curves.fluorapatite[0]);
/// ```
pub fn solubility_curves(n_points: usize) -> SolubilityCurves {
    let ph: Vec<f64> = linspace(3.0, 8.0, n_points).iter().copied().collect();
    let hydroxyapatite = ph
        .iter()
        .map(|&p| relative_solubility(p, HYDROXYAPATITE_CRITICAL_PH))
        .collect();
    let fluorapatite = ph
        .iter()
        .map(|&p| relative_solubility(p, FLUORAPATITE_CRITICAL_PH))
        .collect();

    SolubilityCurves {
        ph,
        hydroxyapatite,
        fluorapatite,
    }
}

/// Effectiveness indices of one coating material, in percent
#[derive(Debug, Clone, PartialEq)]
pub struct CoatingMaterial {
    pub name: &'static str,
    pub acid_resistance: f64,
    pub durability: f64,
    pub remineralization: f64,
}

/// Reference materials shown in the comparison chart
pub fn coating_materials() -> Vec<CoatingMaterial> {
    let rows = [
        ("Normal Enamel", 20.0, 30.0, 10.0),
        ("Resin Coating", 65.0, 75.0, 40.0),
        ("Glass Particle", 70.0, 80.0, 45.0),
        ("CPP-ACP", 80.0, 70.0, 90.0),
        ("Fluoride Treatment", 85.0, 90.0, 75.0),
    ];
    rows.into_iter()
        .map(|(name, acid_resistance, durability, remineralization)| CoatingMaterial {
            name,
            acid_resistance,
            durability,
            remineralization,
        })
        .collect()
}

/// Axes of the compatibility radar chart
pub const COMPATIBILITY_PROPERTIES: [&str; 5] = [
    "Biocompatibility",
    "Adhesion",
    "Wear Resistance",
    "Transparency",
    "Cost-Effectiveness",
];

/// Scores (1 to 10) of one material on [`COMPATIBILITY_PROPERTIES`]
#[derive(Debug, Clone, PartialEq)]
pub struct CompatibilityProfile {
    pub name: &'static str,
    pub color: RGBColor,
    pub scores: [f64; 5],
}

/// Reference profiles, the proposed coating last
pub fn compatibility_profiles() -> Vec<CompatibilityProfile> {
    vec![
        CompatibilityProfile {
            name: "Resin",
            color: RGBColor(0xff, 0x6b, 0x6b),
            scores: [8.0, 9.0, 7.0, 6.0, 7.0],
        },
        CompatibilityProfile {
            name: "Glass Particle",
            color: RGBColor(0x4e, 0xcd, 0xc4),
            scores: [7.0, 8.0, 9.0, 8.0, 6.0],
        },
        CompatibilityProfile {
            name: "CPP-ACP",
            color: RGBColor(0x45, 0xb7, 0xd1),
            scores: [9.0, 6.0, 6.0, 9.0, 5.0],
        },
        CompatibilityProfile {
            name: "Fluoride",
            color: RGBColor(0xf9, 0xca, 0x24),
            scores: [9.0, 7.0, 8.0, 10.0, 9.0],
        },
        CompatibilityProfile {
            name: "New Coating",
            color: RGBColor(0x6c, 0x5c, 0xe7),
            scores: [9.0, 8.0, 8.0, 8.0, 8.0],
        },
    ]
}

// =================================================================================================
// Public API
// =================================================================================================

/// Plot relative solubility against pH (`.png` or `.svg`)
pub fn plot_ph_solubility(output_path: &str, config: Option<&PlotConfig>) -> Result<(), Box<dyn Error>> {
    let curves = solubility_curves(100);

    let default_config = PlotConfig::solubility(NO_TITLE);
    let config = config.unwrap_or(&default_config);

    let ext = std::path::Path::new(output_path)
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or("png");

    match ext {
        "svg" => {
            let backend = SVGBackend::new(output_path, (config.width, config.height));
            plot_solubility_impl(backend, &curves, config)
        }
        _ => {
            let backend = BitMapBackend::new(output_path, (config.width, config.height));
            plot_solubility_impl(backend, &curves, config)
        }
    }
}

/// Plot the grouped coating-effectiveness bars (`.png` or `.svg`)
///
/// # Errors
///
/// Returns `Err` if `materials` is empty or the backend fails.
pub fn plot_coating_comparison(
    materials: &[CoatingMaterial],
    output_path: &str,
    config: Option<&PlotConfig>,
) -> Result<(), Box<dyn Error>> {
    if materials.is_empty() {
        return Err("No coating materials provided".into());
    }

    let default_config = PlotConfig::comparison(NO_TITLE);
    let config = config.unwrap_or(&default_config);

    let ext = std::path::Path::new(output_path)
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or("png");

    match ext {
        "svg" => {
            let backend = SVGBackend::new(output_path, (config.width, config.height));
            plot_comparison_impl(backend, materials, config)
        }
        _ => {
            let backend = BitMapBackend::new(output_path, (config.width, config.height));
            plot_comparison_impl(backend, materials, config)
        }
    }
}

/// Plot the compatibility radar chart (`.png` or `.svg`)
///
/// # Errors
///
/// Returns `Err` if `profiles` is empty or the backend fails.
pub fn plot_chemical_compatibility(
    profiles: &[CompatibilityProfile],
    output_path: &str,
    config: Option<&PlotConfig>,
) -> Result<(), Box<dyn Error>> {
    if profiles.is_empty() {
        return Err("No compatibility profiles provided".into());
    }

    let default_config = PlotConfig::compatibility(NO_TITLE);
    let config = config.unwrap_or(&default_config);

    let ext = std::path::Path::new(output_path)
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or("png");

    match ext {
        "svg" => {
            let backend = SVGBackend::new(output_path, (config.width, config.height));
            plot_radar_impl(backend, profiles, config)
        }
        _ => {
            let backend = BitMapBackend::new(output_path, (config.width, config.height));
            plot_radar_impl(backend, profiles, config)
        }
    }
}

// =================================================================================================
// Private Plot Implementations
// =================================================================================================

/// Horizontal chart coordinate of `ph`, descending so basic values sit left
///
/// Negation is its own inverse, so the same map turns axis ticks back into pH.
fn ph_to_axis(ph: f64) -> f64 {
    -ph
}

fn plot_solubility_impl<DB: DrawingBackend>(
    backend: DB,
    curves: &SolubilityCurves,
    config: &PlotConfig,
) -> Result<(), Box<dyn Error>>
where
    DB::ErrorType: 'static,
{
    let root = backend.into_drawing_area();
    root.fill(&config.background)?;

    let (x_min, x_max) = config.x_range;
    let (y_min, y_max) = config.y_range;

    let mut chart = ChartBuilder::on(&root)
        .caption(&config.title, ("sans-serif", 32).into_font())
        .margin(15)
        .x_label_area_size(45)
        .y_label_area_size(60)
        .build_cartesian_2d(ph_to_axis(x_max)..ph_to_axis(x_min), y_min..y_max)?;

    if config.show_grid {
        chart
            .configure_mesh()
            .x_desc(&config.xlabel)
            .y_desc(&config.ylabel)
            .light_line_style(RGBColor(230, 230, 230))
            .x_label_formatter(&|u| format!("{:.1}", ph_to_axis(*u)))
            .y_label_formatter(&|y| format!("{:.0}", y))
            .draw()?;
    }

    let clip = |v: f64| v.min(y_max);

    chart
        .draw_series(LineSeries::new(
            curves.ph.iter().zip(&curves.hydroxyapatite).map(|(p, s)| (ph_to_axis(*p), clip(*s))),
            ShapeStyle::from(&RED).stroke_width(config.line_width + 1),
        ))?
        .label("Normal Enamel (Hydroxyapatite)")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], RED));

    chart
        .draw_series(DashedLineSeries::new(
            curves.ph.iter().zip(&curves.fluorapatite).map(|(p, s)| (ph_to_axis(*p), clip(*s))),
            10,
            6,
            ShapeStyle::from(&BLUE).stroke_width(config.line_width),
        ))?
        .label("Fluoride-treated (Fluorapatite)")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], BLUE));

    let gray = RGBColor(128, 128, 128);
    let critical = ph_to_axis(HYDROXYAPATITE_CRITICAL_PH);
    chart
        .draw_series(DashedLineSeries::new(
            vec![(critical, y_min), (critical, y_max)],
            3,
            4,
            ShapeStyle::from(&gray.mix(0.7)),
        ))?
        .label("Critical pH (5.5)")
        .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], gray));

    // Highlighted note on the acidic side of the critical line
    let note_left = critical + 0.1;
    chart.draw_series(std::iter::once(Rectangle::new(
        [(note_left, 72.0), (note_left + 1.3, 86.0)],
        RGBColor(255, 255, 0).mix(0.7).filled(),
    )))?;
    let note_style = ("sans-serif", 18)
        .into_font()
        .color(&BLACK)
        .pos(Pos::new(HPos::Left, VPos::Center));
    chart.draw_series([
        Text::new("Demineralization starts", (note_left + 0.05, 82.0), note_style.clone()),
        Text::new("(pH 5.5)", (note_left + 0.05, 76.0), note_style),
    ])?;

    if config.show_legend {
        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperRight)
            .background_style(&config.background.mix(0.8))
            .border_style(&BLACK)
            .draw()?;
    }

    root.present()?;
    Ok(())
}

fn plot_comparison_impl<DB: DrawingBackend>(
    backend: DB,
    materials: &[CoatingMaterial],
    config: &PlotConfig,
) -> Result<(), Box<dyn Error>>
where
    DB::ErrorType: 'static,
{
    let root = backend.into_drawing_area();
    root.fill(&config.background)?;

    let n = materials.len();
    let (y_min, y_max) = config.y_range;

    let mut chart = ChartBuilder::on(&root)
        .caption(&config.title, ("sans-serif", 32).into_font())
        .margin(15)
        .x_label_area_size(50)
        .y_label_area_size(60)
        .build_cartesian_2d(-0.5..(n as f64 - 0.5), y_min..y_max)?;

    let names: Vec<&str> = materials.iter().map(|m| m.name).collect();
    let material_label = |x: &f64| {
        let index = x.round();
        if (x - index).abs() < 1e-6 && index >= 0.0 {
            names.get(index as usize).map_or(String::new(), |s| s.to_string())
        } else {
            String::new()
        }
    };

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(n)
        .x_desc(&config.xlabel)
        .y_desc(&config.ylabel)
        .light_line_style(RGBColor(230, 230, 230))
        .x_label_formatter(&material_label)
        .draw()?;

    let width = 0.25;
    let series: [(&str, RGBColor, fn(&CoatingMaterial) -> f64, f64); 3] = [
        ("Acid Resistance", RGBColor(0xff, 0x7f, 0x7f), |m| m.acid_resistance, -width),
        ("Durability", RGBColor(0x7f, 0xbf, 0xff), |m| m.durability, 0.0),
        ("Remineralization", RGBColor(0x7f, 0xff, 0x7f), |m| m.remineralization, width),
    ];

    let value_style = ("sans-serif", 14)
        .into_font()
        .color(&BLACK)
        .pos(Pos::new(HPos::Center, VPos::Bottom));

    for (label, color, value, offset) in series {
        let style = color.mix(0.8).filled();
        chart
            .draw_series(materials.iter().enumerate().map(|(i, m)| {
                let center = i as f64 + offset;
                Rectangle::new(
                    [(center - width / 2.0, 0.0), (center + width / 2.0, value(m))],
                    style,
                )
            }))?
            .label(label)
            .legend(move |(x, y)| Rectangle::new([(x, y - 5), (x + 15, y + 5)], color.filled()));

        chart.draw_series(materials.iter().enumerate().map(|(i, m)| {
            Text::new(
                format!("{}%", value(m)),
                (i as f64 + offset, value(m) + 1.0),
                value_style.clone(),
            )
        }))?;
    }

    if config.show_legend {
        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperLeft)
            .background_style(&config.background.mix(0.8))
            .border_style(&BLACK)
            .draw()?;
    }

    root.present()?;
    Ok(())
}

/// Point at `radius` along radar axis `index` of `axes`, axis 0 pointing right
fn radar_point(index: usize, axes: usize, radius: f64) -> (f64, f64) {
    let angle = 2.0 * PI * index as f64 / axes as f64;
    (radius * angle.cos(), radius * angle.sin())
}

fn plot_radar_impl<DB: DrawingBackend>(
    backend: DB,
    profiles: &[CompatibilityProfile],
    config: &PlotConfig,
) -> Result<(), Box<dyn Error>>
where
    DB::ErrorType: 'static,
{
    let root = backend.into_drawing_area();
    root.fill(&config.background)?;

    let (x_min, x_max) = config.x_range;
    let (y_min, y_max) = config.y_range;
    let axes = COMPATIBILITY_PROPERTIES.len();

    let mut chart = ChartBuilder::on(&root)
        .caption(&config.title, ("sans-serif", 30).into_font())
        .margin(20)
        .build_cartesian_2d(x_min..x_max, y_min..y_max)?;

    // ── Web: rings every 2 points and one spoke per property ─────────────────
    let web = RGBColor(200, 200, 200);
    for ring in 1..=5 {
        let radius = ring as f64 / 5.0;
        chart.draw_series(LineSeries::new(
            (0..=axes).map(|k| radar_point(k % axes, axes, radius)),
            web,
        ))?;
    }
    for k in 0..axes {
        chart.draw_series(LineSeries::new(vec![(0.0, 0.0), radar_point(k, axes, 1.0)], web))?;
    }

    let label_style = ("sans-serif", 18)
        .into_font()
        .color(&BLACK)
        .pos(Pos::new(HPos::Center, VPos::Center));
    chart.draw_series(COMPATIBILITY_PROPERTIES.iter().enumerate().map(|(k, name)| {
        Text::new(name.to_string(), radar_point(k, axes, 1.18), label_style.clone())
    }))?;

    // ── Profiles ─────────────────────────────────────────────────────────────
    for profile in profiles {
        let color = profile.color;
        let points: Vec<(f64, f64)> = profile
            .scores
            .iter()
            .enumerate()
            .map(|(k, score)| radar_point(k, axes, score / 10.0))
            .collect();

        chart.draw_series(std::iter::once(Polygon::new(
            points.clone(),
            color.mix(0.15).filled(),
        )))?;

        let mut outline = points.clone();
        outline.extend(points.first().copied());
        chart
            .draw_series(LineSeries::new(
                outline,
                ShapeStyle::from(&color).stroke_width(config.line_width),
            ))?
            .label(profile.name)
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color));

        chart.draw_series(points.iter().map(|p| Circle::new(*p, 4, color.filled())))?;
    }

    if config.show_legend {
        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperRight)
            .background_style(&config.background.mix(0.8))
            .border_style(&BLACK)
            .draw()?;
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
    use approx::assert_relative_eq;

    #[test]
    fn test_solubility_at_critical_ph() {
        assert_relative_eq!(relative_solubility(5.5, HYDROXYAPATITE_CRITICAL_PH), 1.0);
        assert_relative_eq!(relative_solubility(5.5, FLUORAPATITE_CRITICAL_PH), 0.1, epsilon = 1e-12);
        assert_relative_eq!(relative_solubility(3.5, HYDROXYAPATITE_CRITICAL_PH), 100.0, epsilon = 1e-9);
    }

    #[test]
    fn test_fluorapatite_always_less_soluble() {
        let curves = solubility_curves(100);
        for (hap, fap) in curves.hydroxyapatite.iter().zip(&curves.fluorapatite) {
            assert_relative_eq!(hap / fap, 10.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_solubility_decreases_with_ph() {
        let curves = solubility_curves(50);
        assert_eq!(curves.ph[0], 3.0);
        assert_eq!(curves.ph[49], 8.0);
        assert!(curves.hydroxyapatite.windows(2).all(|w| w[0] > w[1]));
    }

    #[test]
    fn test_ph_axis_runs_basic_to_acidic() {
        assert!(ph_to_axis(8.0) < ph_to_axis(5.5));
        assert!(ph_to_axis(5.5) < ph_to_axis(3.0));
        assert_relative_eq!(ph_to_axis(ph_to_axis(4.2)), 4.2);
    }

    #[test]
    fn test_solubility_chart_renders_svg() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("solubility.svg");
        plot_ph_solubility(path.to_str().unwrap(), None).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("Demineralization starts"));
        assert!(content.contains("Fluoride-treated (Fluorapatite)"));
    }

    #[test]
    fn test_reference_materials() {
        let materials = coating_materials();
        assert_eq!(materials.len(), 5);
        assert_eq!(materials[3].name, "CPP-ACP");
        assert_eq!(materials[3].remineralization, 90.0);
    }

    #[test]
    fn test_compatibility_scores_in_range() {
        for profile in compatibility_profiles() {
            assert!(profile.scores.iter().all(|s| (1.0..=10.0).contains(s)));
        }
    }

    #[test]
    fn test_radar_point_first_axis_points_right() {
        let (x, y) = radar_point(0, 5, 1.0);
        assert_relative_eq!(x, 1.0);
        assert_relative_eq!(y, 0.0);
    }

    #[test]
    fn test_empty_inputs_rejected() {
        assert!(plot_coating_comparison(&[], "unused.png", None).is_err());
        assert!(plot_chemical_compatibility(&[], "unused.png", None).is_err());
    }
}
