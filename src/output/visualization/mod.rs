//! Visualization of simulation runs using the `plotters` library
//!
//! # Organization
//!
//! - **config**: Shared plot configuration (`PlotConfig`) and scene colors
//! - **frame**: One tooth cross-section per snapshot
//! - **animation**: Animated GIF of a run, with a static three-stage fallback
//! - **charts**: Solubility, coating comparison and compatibility charts
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use enamel_rs::output::visualization::{
//!     export_animation_or_stages, plot_ph_solubility, render_snapshot, PlotConfig,
//! };
//! use enamel_rs::simulation::{Simulation, SimulationConfig};
//!
//! let result = Simulation::new(SimulationConfig::default(), Some(42))?.run()?;
//!
//! // One frame
//! render_snapshot(&result.snapshots[150], "coating.png", None)?;
//!
//! // Whole run
//! export_animation_or_stages(&result, "erosion.gif", "stages.png", None)?;
//!
//! // Static chart with a custom title
//! let config = PlotConfig::solubility("Why pH matters");
//! plot_ph_solubility("solubility.svg", Some(&config))?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! | Use Case | Module | Function |
//! |----------|--------|----------|
//! | Single frame | `frame` | `render_snapshot` |
//! | Full run as GIF | `animation` | `export_animation` |
//! | Three-stage figure | `animation` | `render_stages` |
//! | Stage figure without a run | `animation` | `render_reference_stages` |
//! | Solubility vs pH | `charts` | `plot_ph_solubility` |
//! | Coating effectiveness | `charts` | `plot_coating_comparison` |
//! | Material properties | `charts` | `plot_chemical_compatibility` |

pub mod animation;
pub mod charts;
pub mod config;
pub mod frame;

pub use config::{PlotConfig, NO_TITLE};

pub use frame::{draw_snapshot, render_snapshot};

pub use animation::{
    export_animation, export_animation_or_stages, reference_stage_snapshots,
    render_reference_stages, render_stages, stage_snapshots, AnimationOutput,
    DEFAULT_FRAME_DELAY_MS,
};

pub use charts::{
    coating_materials, compatibility_profiles, plot_chemical_compatibility,
    plot_coating_comparison, plot_ph_solubility, solubility_curves, CoatingMaterial,
    CompatibilityProfile, SolubilityCurves,
};
