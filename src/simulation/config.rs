//! Simulation configuration
//!
//! # Design
//!
//! One parameter block per sub-model, all grouped in [`SimulationConfig`]:
//!
//! - [`SurfaceParameters`]: tooth shape, dentin offset, erosion strength
//! - [`AcidParameters`]: spawn region, fall speed, clearance, fade
//!   (instantiated twice, for the attack and for the resistance test)
//! - [`CoatingParameters`]: growth rate and maximum thickness
//! - [`IonParameters`]: emission budget, population cap, drift
//! - [`PhaseSchedule`]: frame ranges of each phase
//!
//! Every block has a `Default` reproducing the reference animation and a
//! `validate()` method. Invalid parameters are reported, never clamped.
//!
//! # Example
//!
//! ```rust
//! use enamel_rs::simulation::{SimulationConfig, PhaseSchedule};
//!
//! let config = SimulationConfig::default()
//!     .with_sample_count(400)
//!     .with_coating(0.004, 0.25)
//!     .with_schedule(PhaseSchedule::three_phase());
//!
//! assert!(config.validate().is_ok());
//! assert_eq!(config.schedule.total_frames(), 200);
//! ```

use super::schedule::PhaseSchedule;
use crate::physics::linspace;

// =================================================================================================
// Surface
// =================================================================================================

/// Tooth cross-section and erosion parameters
///
/// The enamel surface is the molar-crown bump
///
/// ```text
/// y(x) = base_height - ridge_amplitude · cos(ridge_frequency · x) - curvature · x²
/// ```
///
/// sampled on `[x_min, x_max]`. The dentin substrate sits `substrate_offset`
/// below it and never moves.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceParameters {
    /// Left end of the sampled cross-section (default: -2.5)
    pub x_min: f64,
    /// Right end of the sampled cross-section (default: 2.5)
    pub x_max: f64,
    /// Crown height at the cusp line (default: 1.5)
    pub base_height: f64,
    /// Depth of the central fissure (default: 0.5)
    pub ridge_amplitude: f64,
    /// Angular frequency of the cusp pattern (default: 2.0)
    pub ridge_frequency: f64,
    /// Overall crown rounding (default: 0.2)
    pub curvature: f64,
    /// Vertical distance from the initial surface to the dentin (default: 0.8)
    pub substrate_offset: f64,
    /// Minimum enamel left above the dentin (default: 0.1)
    pub floor_margin: f64,
    /// Amplitude of the smooth, frame-periodic erosion term (default: 0.005)
    pub erosion_amplitude: f64,
    /// Amplitude of the per-sample random erosion term (default: 0.002)
    pub erosion_noise: f64,
}

impl Default for SurfaceParameters {
    fn default() -> Self {
        Self {
            x_min: -2.5,
            x_max: 2.5,
            base_height: 1.5,
            ridge_amplitude: 0.5,
            ridge_frequency: 2.0,
            curvature: 0.2,
            substrate_offset: 0.8,
            floor_margin: 0.1,
            erosion_amplitude: 0.005,
            erosion_noise: 0.002,
        }
    }
}

impl SurfaceParameters {
    /// Height of the healthy (uneroded) enamel surface at `x`
    pub fn crown_height(&self, x: f64) -> f64 {
        self.base_height
            - self.ridge_amplitude * (self.ridge_frequency * x).cos()
            - self.curvature * x * x
    }

    /// Validate geometry and erosion parameters
    pub fn validate(&self) -> Result<(), String> {
        if !(self.x_min.is_finite() && self.x_max.is_finite()) || self.x_min >= self.x_max {
            return Err(format!(
                "Surface x range must be finite and increasing, got [{}, {}]",
                self.x_min, self.x_max
            ));
        }
        if !(self.floor_margin > 0.0 && self.floor_margin.is_finite()) {
            return Err(format!("Floor margin must be positive, got {}", self.floor_margin));
        }
        if !(self.substrate_offset > self.floor_margin && self.substrate_offset.is_finite()) {
            return Err(format!(
                "Substrate offset {} must exceed the floor margin {}",
                self.substrate_offset, self.floor_margin
            ));
        }
        check_non_negative("Erosion amplitude", self.erosion_amplitude)?;
        check_non_negative("Erosion noise", self.erosion_noise)?;
        if self.erosion_amplitude == 0.0 && self.erosion_noise == 0.0 {
            return Err("Erosion needs a positive smooth or random amplitude".to_string());
        }
        let parameters = [
            self.base_height,
            self.ridge_amplitude,
            self.ridge_frequency,
            self.curvature,
        ];
        if parameters.iter().any(|p| !p.is_finite()) {
            return Err("Surface shape parameters must be finite".to_string());
        }
        Ok(())
    }
}

// =================================================================================================
// Acid particles
// =================================================================================================

/// One acid particle population
///
/// The same structure parametrizes both populations: the attack on bare
/// enamel ([`AcidParameters::default`]) and the challenge on the coated
/// tooth ([`AcidParameters::reservoir_challenge`]).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AcidParameters {
    /// Number of particles (default: 100)
    pub count: usize,
    /// Horizontal spawn range `[lo, hi)` (default: [-2.5, 2.5))
    pub x_range: (f64, f64),
    /// Vertical spawn range `[lo, hi)` (default: [2.0, 3.5))
    pub y_range: (f64, f64),
    /// Distance fallen per tick (default: 0.05)
    pub fall_speed: f64,
    /// Resting height above the collision boundary (default: 0.1)
    pub clearance: f64,
    /// Opacity before any fade (default: 0.6)
    pub initial_alpha: f64,
    /// Opacity lost per frame while fading (default: 0.01)
    pub fade_rate: f64,
}

impl Default for AcidParameters {
    fn default() -> Self {
        Self {
            count: 100,
            x_range: (-2.5, 2.5),
            y_range: (2.0, 3.5),
            fall_speed: 0.05,
            clearance: 0.1,
            initial_alpha: 0.6,
            fade_rate: 0.01,
        }
    }
}

impl AcidParameters {
    /// Second population, dropped on the coated tooth
    ///
    /// Spawned over a taller band so landings, and therefore ion emissions,
    /// are spread across the whole resistance test.
    pub fn reservoir_challenge() -> Self {
        Self {
            count: 80,
            x_range: (-2.5, 2.5),
            y_range: (2.0, 4.5),
            fall_speed: 0.05,
            clearance: 0.05,
            initial_alpha: 0.8,
            fade_rate: 0.0,
        }
    }

    /// Builder pattern: set particle count
    pub fn count(mut self, count: usize) -> Self {
        self.count = count;
        self
    }

    /// Builder pattern: set spawn ranges
    pub fn spawn_region(mut self, x_range: (f64, f64), y_range: (f64, f64)) -> Self {
        self.x_range = x_range;
        self.y_range = y_range;
        self
    }

    /// Builder pattern: set fall speed
    pub fn fall_speed(mut self, fall_speed: f64) -> Self {
        self.fall_speed = fall_speed;
        self
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.count == 0 {
            return Err("Acid population must contain at least one particle".to_string());
        }
        check_range("Acid x range", self.x_range)?;
        check_range("Acid y range", self.y_range)?;
        if !(self.fall_speed > 0.0 && self.fall_speed.is_finite()) {
            return Err(format!("Fall speed must be positive, got {}", self.fall_speed));
        }
        check_non_negative("Clearance", self.clearance)?;
        if !(0.0..=1.0).contains(&self.initial_alpha) {
            return Err(format!("Initial alpha must be in [0, 1], got {}", self.initial_alpha));
        }
        check_non_negative("Fade rate", self.fade_rate)?;
        Ok(())
    }
}

// =================================================================================================
// Coating
// =================================================================================================

/// Protective coating growth
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoatingParameters {
    /// Thickness added per frame (default: 0.005)
    pub rate: f64,
    /// Maximum thickness (default: 0.3)
    pub cap: f64,
}

impl Default for CoatingParameters {
    fn default() -> Self {
        Self { rate: 0.005, cap: 0.3 }
    }
}

impl CoatingParameters {
    pub fn validate(&self) -> Result<(), String> {
        if !(self.rate > 0.0 && self.rate.is_finite()) {
            return Err(format!("Coating rate must be positive, got {}", self.rate));
        }
        if !(self.cap > 0.0 && self.cap.is_finite()) {
            return Err(format!("Coating cap must be positive, got {}", self.cap));
        }
        Ok(())
    }
}

// =================================================================================================
// Ions
// =================================================================================================

/// Ions released by the coating when struck by acid
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IonParameters {
    /// Maximum ions created in a single tick (default: 3)
    pub max_per_tick: usize,
    /// Maximum concurrently live ions (default: 50)
    pub max_live: usize,
    /// Upward distance per tick (default: 0.03)
    pub drift_speed: f64,
    /// Half-width of the per-tick horizontal jitter (default: 0.01)
    pub horizontal_jitter: f64,
    /// Half-width of the horizontal birth offset (default: 0.05)
    pub spawn_jitter: f64,
    /// Upper bound of the vertical birth offset above the coating (default: 0.05)
    pub spawn_offset: f64,
    /// Ions above this height are removed (default: 4.0)
    pub ceiling: f64,
}

impl Default for IonParameters {
    fn default() -> Self {
        Self {
            max_per_tick: 3,
            max_live: 50,
            drift_speed: 0.03,
            horizontal_jitter: 0.01,
            spawn_jitter: 0.05,
            spawn_offset: 0.05,
            ceiling: 4.0,
        }
    }
}

impl IonParameters {
    /// Builder pattern: set emission budget and population cap
    pub fn limits(mut self, max_per_tick: usize, max_live: usize) -> Self {
        self.max_per_tick = max_per_tick;
        self.max_live = max_live;
        self
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.max_per_tick == 0 {
            return Err("Ions per tick must be at least 1".to_string());
        }
        if self.max_live == 0 {
            return Err("Live ion cap must be at least 1".to_string());
        }
        if !(self.drift_speed > 0.0 && self.drift_speed.is_finite()) {
            return Err(format!("Ion drift speed must be positive, got {}", self.drift_speed));
        }
        check_non_negative("Ion horizontal jitter", self.horizontal_jitter)?;
        check_non_negative("Ion spawn jitter", self.spawn_jitter)?;
        check_non_negative("Ion spawn offset", self.spawn_offset)?;
        if !self.ceiling.is_finite() {
            return Err("Ion ceiling must be finite".to_string());
        }
        Ok(())
    }
}

// =================================================================================================
// Full configuration
// =================================================================================================

/// Complete simulation configuration
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationConfig {
    /// Number of surface samples (default: 200)
    pub sample_count: usize,
    pub surface: SurfaceParameters,
    /// Acid attacking the bare enamel
    pub acid: AcidParameters,
    /// Acid challenging the coated enamel
    pub reservoir_acid: AcidParameters,
    pub coating: CoatingParameters,
    pub ions: IonParameters,
    pub schedule: PhaseSchedule,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            sample_count: 200,
            surface: SurfaceParameters::default(),
            acid: AcidParameters::default(),
            reservoir_acid: AcidParameters::reservoir_challenge(),
            coating: CoatingParameters::default(),
            ions: IonParameters::default(),
            schedule: PhaseSchedule::default(),
        }
    }
}

impl SimulationConfig {
    /// Builder pattern: set surface sample count
    pub fn with_sample_count(mut self, sample_count: usize) -> Self {
        self.sample_count = sample_count;
        self
    }

    /// Builder pattern: set phase schedule
    pub fn with_schedule(mut self, schedule: PhaseSchedule) -> Self {
        self.schedule = schedule;
        self
    }

    /// Builder pattern: set coating rate and cap
    pub fn with_coating(mut self, rate: f64, cap: f64) -> Self {
        self.coating = CoatingParameters { rate, cap };
        self
    }

    /// Builder pattern: set ion parameters
    pub fn with_ions(mut self, ions: IonParameters) -> Self {
        self.ions = ions;
        self
    }

    /// Builder pattern: set the attacking acid population
    pub fn with_acid(mut self, acid: AcidParameters) -> Self {
        self.acid = acid;
        self
    }

    /// Builder pattern: set the resistance-test acid population
    pub fn with_reservoir_acid(mut self, acid: AcidParameters) -> Self {
        self.reservoir_acid = acid;
        self
    }

    /// Validate every parameter block and their cross-constraints
    pub fn validate(&self) -> Result<(), String> {
        if self.sample_count < 2 {
            return Err(format!(
                "Need at least 2 surface samples, got {}",
                self.sample_count
            ));
        }

        self.surface.validate()?;
        self.acid.validate()?;
        self.reservoir_acid.validate()?;
        self.coating.validate()?;
        self.ions.validate()?;
        self.schedule.validate()?;

        // A freshly emitted ion must start below the ceiling. Erosion only
        // lowers the surface, so the healthy crown bounds every later tick.
        let xs = linspace(self.surface.x_min, self.surface.x_max, self.sample_count);
        let highest_crown = xs
            .iter()
            .map(|&x| self.surface.crown_height(x))
            .fold(f64::NEG_INFINITY, f64::max);
        let highest_birth = highest_crown + self.coating.cap + self.ions.spawn_offset;

        if self.ions.ceiling <= highest_birth {
            return Err(format!(
                "Ion ceiling {} must lie above the highest possible birth height {:.3}",
                self.ions.ceiling, highest_birth
            ));
        }

        Ok(())
    }
}

/// Check a half-open sampling range `[lo, hi)`
fn check_range(label: &str, (lo, hi): (f64, f64)) -> Result<(), String> {
    if !(lo.is_finite() && hi.is_finite()) || lo >= hi {
        return Err(format!("{} must be finite and increasing, got [{}, {})", label, lo, hi));
    }
    Ok(())
}

/// Check a finite, non-negative magnitude (NaN fails)
fn check_non_negative(label: &str, value: f64) -> Result<(), String> {
    if !(value >= 0.0 && value.is_finite()) {
        return Err(format!("{} must be finite and non-negative, got {}", label, value));
    }
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
    fn test_default_config_is_valid() {
        assert!(SimulationConfig::default().validate().is_ok());
    }

    #[test]
    fn test_crown_height_at_center() {
        let surface = SurfaceParameters::default();
        // 1.5 - 0.5·cos(0) - 0
        assert_relative_eq!(surface.crown_height(0.0), 1.0);
    }

    #[test]
    fn test_crown_is_symmetric() {
        let surface = SurfaceParameters::default();
        assert_relative_eq!(surface.crown_height(-1.3), surface.crown_height(1.3));
    }

    #[test]
    fn test_too_few_samples_rejected() {
        let config = SimulationConfig::default().with_sample_count(1);
        let err = config.validate().unwrap_err();
        assert!(err.contains("at least 2 surface samples"));
    }

    #[test]
    fn test_non_positive_coating_rejected() {
        let config = SimulationConfig::default().with_coating(0.0, 0.3);
        assert!(config.validate().unwrap_err().contains("Coating rate"));

        let config = SimulationConfig::default().with_coating(0.005, -1.0);
        assert!(config.validate().unwrap_err().contains("Coating cap"));
    }

    #[test]
    fn test_inverted_acid_range_rejected() {
        let acid = AcidParameters::default().spawn_region((1.0, -1.0), (2.0, 3.5));
        let err = SimulationConfig::default().with_acid(acid).validate().unwrap_err();
        assert!(err.contains("Acid x range"));
    }

    #[test]
    fn test_zero_fall_speed_rejected() {
        let acid = AcidParameters::default().fall_speed(0.0);
        assert!(acid.validate().unwrap_err().contains("Fall speed"));
    }

    #[test]
    fn test_nan_surface_parameters_rejected() {
        let surface = SurfaceParameters {
            erosion_amplitude: f64::NAN,
            ..SurfaceParameters::default()
        };
        assert!(surface.validate().unwrap_err().contains("Erosion amplitude"));

        let surface = SurfaceParameters {
            erosion_noise: f64::NAN,
            ..SurfaceParameters::default()
        };
        assert!(surface.validate().unwrap_err().contains("Erosion noise"));

        let surface = SurfaceParameters {
            floor_margin: f64::NAN,
            ..SurfaceParameters::default()
        };
        assert!(surface.validate().unwrap_err().contains("Floor margin"));

        let surface = SurfaceParameters {
            substrate_offset: f64::NAN,
            ..SurfaceParameters::default()
        };
        assert!(surface.validate().unwrap_err().contains("Substrate offset"));
    }

    #[test]
    fn test_nan_acid_parameters_rejected() {
        let acid = AcidParameters {
            clearance: f64::NAN,
            ..AcidParameters::default()
        };
        assert!(acid.validate().unwrap_err().contains("Clearance"));

        let acid = AcidParameters {
            fade_rate: f64::NAN,
            ..AcidParameters::default()
        };
        assert!(acid.validate().unwrap_err().contains("Fade rate"));

        let acid = AcidParameters {
            initial_alpha: f64::NAN,
            ..AcidParameters::default()
        };
        assert!(acid.validate().is_err());
    }

    #[test]
    fn test_non_finite_ion_offsets_rejected() {
        for ions in [
            IonParameters { spawn_jitter: f64::NAN, ..IonParameters::default() },
            IonParameters { spawn_offset: f64::NAN, ..IonParameters::default() },
            IonParameters { horizontal_jitter: f64::INFINITY, ..IonParameters::default() },
        ] {
            let err = ions.validate().unwrap_err();
            assert!(err.contains("Ion"), "{}", err);
            assert!(SimulationConfig::default().with_ions(ions).validate().is_err());
        }
    }

    #[test]
    fn test_zero_ion_limits_rejected() {
        let ions = IonParameters::default().limits(0, 50);
        assert!(ions.validate().is_err());

        let ions = IonParameters::default().limits(3, 0);
        assert!(ions.validate().is_err());
    }

    #[test]
    fn test_ceiling_below_coating_rejected() {
        let ions = IonParameters { ceiling: 1.2, ..IonParameters::default() };
        let err = SimulationConfig::default().with_ions(ions).validate().unwrap_err();
        assert!(err.contains("ceiling"));
    }

    #[test]
    fn test_substrate_offset_must_exceed_margin() {
        let surface = SurfaceParameters {
            substrate_offset: 0.05,
            ..SurfaceParameters::default()
        };
        assert!(surface.validate().unwrap_err().contains("floor margin"));
    }

    #[test]
    fn test_reservoir_challenge_differs_from_attack() {
        let attack = AcidParameters::default();
        let challenge = AcidParameters::reservoir_challenge();
        assert_ne!(attack, challenge);
        assert!(challenge.validate().is_ok());
    }
}
