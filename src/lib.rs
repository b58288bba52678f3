//! enamel-rs: Enamel Erosion and Protective Coating Simulation
//!
//! An educational, frame-driven simulation of a tooth cross-section under
//! acid attack. Acid particles fall onto the enamel, the enamel dissolves,
//! a protective coating grows on the eroded surface, and a second acid wave
//! tests the coating, which answers by releasing mineral ions.
//!
//! # Architecture
//!
//! enamel-rs is built on two core principles:
//!
//! 1. **Separation of State and Schedule**
//!    - Sub-models own their state and update rules (what happens)
//!    - The phase schedule decides which update runs on which frame (when)
//!
//! 2. **Deterministic, Inspectable Runs**
//!    - All randomness flows from one seedable generator
//!    - Every frame yields an owned `Snapshot` for rendering or export
//!
//! # Quick Start
//!
//! ```rust
//! use enamel_rs::prelude::*;
//!
//! # fn main() -> Result<(), String> {
//! // 1. Configure the run
//! let config = SimulationConfig::default().with_sample_count(100);
//!
//! // 2. Run every frame of the schedule with a fixed seed
//! let simulation = Simulation::new(config, Some(42))?;
//! let result = simulation.run()?;
//!
//! // 3. Access results
//! let last = result.final_snapshot().ok_or("empty run")?;
//! assert_eq!(last.phase, Phase::ResistanceTest);
//! println!("Ions released: {}", last.ion_count());
//! # Ok(())
//! # }
//! ```
//!
//! # Modules
//!
//! - [`physics`]: Sampled-curve geometry and collision boundaries
//! - [`models`]: Surface, acid, coating and ion sub-models
//! - [`simulation`]: Configuration, phase schedule and frame driver
//! - [`output`]: Rendering, animation, charts and CSV export
//!
//! # Features
//!
//! - `parallel`: element-wise profile updates run on rayon above
//!   [`simulation::parallel_threshold`] samples

// Core modules
pub mod physics;

pub mod models;
pub mod simulation;

pub mod output;

pub mod prelude {
    //! Convenient imports for common usage
    //!
    //! ```rust
    //! use enamel_rs::prelude::*;
    //! ```
    pub use crate::physics::{CollisionBoundary, FlatBoundary, SampledCurve};
    pub use crate::models::{AcidPopulation, CoatingModel, IonReservoir, SurfaceModel};
    pub use crate::simulation::{
        transition, Phase, PhaseSchedule, PhaseWindow, Simulation, SimulationConfig,
        SimulationResult, SimulationState, Snapshot,
    };
}
