//! Sub-models of the enamel simulation
//!
//! Each model owns one piece of the scene and exposes the operations the
//! phase driver calls on it. None of them knows about phases or frames beyond
//! the numbers it is handed.
//!
//! # Available Models
//!
//! ## [`SurfaceModel`]: enamel surface over a fixed dentin substrate
//!
//! Sampled molar-crown profile, eroded by a smooth plus random term and
//! clamped above the dentin.
//!
//! ## [`AcidPopulation`]: falling acid particles
//!
//! One component instantiated twice. The attack population lands on the bare
//! enamel, the challenge population on the coating.
//!
//! ## [`CoatingModel`]: protective layer
//!
//! Scalar thickness growing linearly up to a cap, drawn on top of the current
//! surface.
//!
//! ## [`IonReservoir`]: ions released by the coating
//!
//! Bounded population emitted where acid strikes the coating, drifting up and
//! evicted above a ceiling.

// =================================================================================================
// Module Declarations
// =================================================================================================

pub mod acid;
pub mod coating;
pub mod ions;
pub mod surface;

// =================================================================================================
// Public Re-exports
// =================================================================================================

pub use acid::{AcidParticle, AcidPopulation};
pub use coating::{coating_thickness, CoatingModel};
pub use ions::{Ion, IonReservoir};
pub use surface::SurfaceModel;
