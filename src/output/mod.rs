//! Output module for simulation runs
//!
//! - **Visualization**: PNG/SVG frames, animated GIF and static charts using plotters
//! - **Export**: CSV data export for external analysis
//!
//! # Architecture
//!
//! ```text
//! output/
//! ├── mod.rs
//! ├── visualization/      ← Plots and graphics
//! │   ├── config.rs
//! │   ├── frame.rs
//! │   ├── animation.rs
//! │   └── charts.rs
//! └── export/             ← Data export
//!     ├── mod.rs          ← Exporter trait
//!     └── csv.rs
//! ```
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use enamel_rs::output::{export_animation_or_stages, CsvExporter, Exporter};
//! use enamel_rs::simulation::{Simulation, SimulationConfig};
//!
//! let result = Simulation::new(SimulationConfig::default(), None)?.run()?;
//!
//! export_animation_or_stages(&result, "erosion.gif", "stages.png", None)?;
//! CsvExporter::default().export_run(&result, None, "run.csv")?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! Both sub-modules consume `Snapshot` and `SimulationResult` read-only, so
//! rendering never influences the simulated state.

pub mod export;
pub mod visualization;

pub use visualization::{
    export_animation, export_animation_or_stages, plot_chemical_compatibility,
    plot_coating_comparison, plot_ph_solubility, render_reference_stages, render_snapshot,
    render_stages, AnimationOutput, PlotConfig,
};

pub use export::{CsvConfig, CsvError, CsvExporter, Exporter};
