//! Phase driver
//!
//! # Transition
//!
//! [`transition`] is the whole simulation: it takes the current state and a
//! frame number, performs the work of the phase owning that frame and returns
//! the new state with the frame's [`Snapshot`].
//!
//! | Phase          | Surface | Acid #1   | Coating | Acid #2          | Ions           |
//! |----------------|---------|-----------|---------|------------------|----------------|
//! | Attack         | idle    | `step`    | absent  | hidden           | idle           |
//! | Erosion        | `erode` | fade-out  | absent  | hidden           | idle           |
//! | Coating        | idle    | hidden    | `grow`  | hidden           | idle           |
//! | ResistanceTest | idle    | hidden    | frozen  | `step` vs coating| emit + advance |
//!
//! Frame 0 is the initial condition: the attack acid is reported where it was
//! spawned and starts falling on frame 1.
//!
//! # Randomness
//!
//! All draws come from one `ChaChaRng` stored in the state, consumed in a
//! fixed order (spawn, erosion noise, ion births, ion jitter). The same seed
//! and the same frame sequence always give the same snapshots.

use std::sync::Arc;

use rand::SeedableRng;
use rand_chacha::ChaChaRng;

use super::config::SimulationConfig;
use super::result::SimulationResult;
use super::schedule::Phase;
use super::snapshot::{ParticleLayer, Snapshot};
use super::validate_snapshot;
use crate::models::{AcidPopulation, CoatingModel, IonReservoir, SurfaceModel};
use crate::physics::SampledCurve;

/// Frames into the coating phase after which the scene is annotated
const ANNOTATION_DELAY: usize = 30;

const COATING_ANNOTATION: &str = "Fluoride/CPP-ACP Protective Layer Formation";

// =================================================================================================
// Simulation State
// =================================================================================================

/// Everything that evolves during a run
#[derive(Debug, Clone)]
pub struct SimulationState {
    config: Arc<SimulationConfig>,
    surface: SurfaceModel,
    acid: AcidPopulation,
    coating: CoatingModel,
    reservoir_acid: AcidPopulation,
    ions: IonReservoir,
    rng: ChaChaRng,
    current_phase: Option<Phase>,
}

impl SimulationState {
    /// Validate `config` and build the initial scene
    ///
    /// Both acid populations are spawned here, attack acid first. The
    /// resistance-test acid stays hidden until its phase starts.
    pub fn new(config: SimulationConfig, mut rng: ChaChaRng) -> Result<Self, String> {
        config.validate()?;

        let surface = SurfaceModel::initialize(config.sample_count, config.surface)?;
        let acid = AcidPopulation::spawn(&config.acid, &mut rng);
        let mut reservoir_acid = AcidPopulation::spawn(&config.reservoir_acid, &mut rng);
        reservoir_acid.hide();

        Ok(Self {
            coating: CoatingModel::new(config.coating),
            ions: IonReservoir::new(config.ions),
            config: Arc::new(config),
            surface,
            acid,
            reservoir_acid,
            rng,
            current_phase: None,
        })
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn surface(&self) -> &SurfaceModel {
        &self.surface
    }

    pub fn acid(&self) -> &AcidPopulation {
        &self.acid
    }

    pub fn coating(&self) -> &CoatingModel {
        &self.coating
    }

    pub fn reservoir_acid(&self) -> &AcidPopulation {
        &self.reservoir_acid
    }

    pub fn ions(&self) -> &IonReservoir {
        &self.ions
    }

    /// Phase of the last processed frame
    pub fn current_phase(&self) -> Option<Phase> {
        self.current_phase
    }

    /// Perform the work of `frame` in place
    fn apply_frame(&mut self, frame: usize) -> Snapshot {
        let config = Arc::clone(&self.config);
        let window = config.schedule.window_at(frame);
        let phase = window.phase;

        if self.current_phase != Some(phase) {
            log::debug!("frame {}: entering {} phase ({})", frame, phase, phase.caption());
            self.current_phase = Some(phase);
        }

        let coating = match phase {
            Phase::Attack => {
                if frame > window.start {
                    self.acid.step(&self.surface);
                }
                None
            }
            Phase::Erosion => {
                self.surface.erode(frame, &mut self.rng);
                self.acid.fade(frame, window.start);
                None
            }
            Phase::Coating => {
                self.acid.hide();
                self.coating.grow(frame, window.start);
                self.coating.upper_boundary(self.surface.surface())
            }
            Phase::ResistanceTest => {
                self.acid.hide();
                if !self.coating.is_frozen() {
                    // Without a preceding coating window the layer freezes at zero
                    let (last, start) = config
                        .schedule
                        .window(Phase::Coating)
                        .map_or((frame, frame), |w| (w.last_frame(), w.start));
                    self.coating.freeze_at(last, start);
                }
                self.reservoir_acid.show();

                let boundary = self
                    .coating
                    .upper_boundary(self.surface.surface())
                    .unwrap_or_else(|| self.surface.surface().clone());

                let curve = SampledCurve::new(self.surface.xs(), &boundary);
                let landed = self.reservoir_acid.step(&curve);
                let emitted = self
                    .ions
                    .try_emit(&landed, &self.reservoir_acid, &curve, &mut self.rng);
                let evicted = self.ions.advance(&mut self.rng);

                if emitted > 0 || evicted > 0 {
                    log::trace!(
                        "frame {}: {} landed, {} ions emitted, {} evicted, {} live",
                        frame,
                        landed.len(),
                        emitted,
                        evicted,
                        self.ions.len()
                    );
                }

                Some(boundary)
            }
        };

        let annotation = match phase {
            Phase::Coating if frame >= window.start + ANNOTATION_DELAY => Some(COATING_ANNOTATION),
            Phase::ResistanceTest => Some(COATING_ANNOTATION),
            _ => None,
        };

        let coating_thickness = match &coating {
            Some(_) => self.coating.thickness().unwrap_or(0.0),
            None => 0.0,
        };

        Snapshot {
            frame,
            phase,
            caption: phase.caption(),
            title: phase.title(frame),
            annotation,
            x: self.surface.shared_xs(),
            substrate: self.surface.shared_substrate(),
            surface: self.surface.surface().clone(),
            coating,
            coating_thickness,
            acid: layer(&self.acid),
            reservoir_acid: layer(&self.reservoir_acid),
            ions: self.ions.positions(),
        }
    }
}

fn layer(population: &AcidPopulation) -> ParticleLayer {
    ParticleLayer {
        points: population.positions(),
        alpha: population.alpha(),
        visible: population.is_visible(),
    }
}

// =================================================================================================
// Transition
// =================================================================================================

/// Advance `state` through `frame`
///
/// Pure in the sense that the result depends only on the inputs: the state
/// carries its own random generator.
///
/// # Panics
///
/// Panics when `frame` lies past the final frame of the schedule.
///
/// # Example
///
/// ```rust
/// use enamel_rs::simulation::{transition, Phase, SimulationConfig, SimulationState};
/// use rand::SeedableRng;
/// use rand_chacha::ChaChaRng;
///
/// let state = SimulationState::new(SimulationConfig::default(), ChaChaRng::seed_from_u64(1))?;
/// let (state, snapshot) = transition(state, 0);
///
/// assert_eq!(snapshot.phase, Phase::Attack);
/// assert_eq!(state.current_phase(), Some(Phase::Attack));
/// # Ok::<(), String>(())
/// ```
pub fn transition(mut state: SimulationState, frame: usize) -> (SimulationState, Snapshot) {
    let snapshot = state.apply_frame(frame);
    (state, snapshot)
}

// =================================================================================================
// Simulation
// =================================================================================================

/// Convenience wrapper owning the evolving state
///
/// Keeps a copy of the initial state so [`run`](Self::run) always starts
/// from frame 0, whatever was advanced before.
#[derive(Debug, Clone)]
pub struct Simulation {
    initial: SimulationState,
    state: SimulationState,
    seed: Option<u64>,
}

impl Simulation {
    /// Build a simulation, seeded when `seed` is given, from OS entropy otherwise
    pub fn new(config: SimulationConfig, seed: Option<u64>) -> Result<Self, String> {
        let rng = match seed {
            Some(seed) => ChaChaRng::seed_from_u64(seed),
            None => ChaChaRng::from_rng(&mut rand::rng()),
        };
        let mut simulation = Self::with_rng(config, rng)?;
        simulation.seed = seed;
        Ok(simulation)
    }

    /// Build a simulation around an explicit generator
    pub fn with_rng(config: SimulationConfig, rng: ChaChaRng) -> Result<Self, String> {
        let state = SimulationState::new(config, rng)?;
        Ok(Self {
            initial: state.clone(),
            state,
            seed: None,
        })
    }

    /// Process `frame` and return its snapshot
    ///
    /// Frames are expected in schedule order. Replaying a coating frame
    /// after the resistance test has started needs a [`reset`](Self::reset)
    /// first.
    ///
    /// # Panics
    ///
    /// Panics when `frame` lies past the final frame of the schedule, and in
    /// debug builds when a coating frame follows a frozen coating.
    pub fn advance(&mut self, frame: usize) -> Snapshot {
        self.state.apply_frame(frame)
    }

    /// Run every frame of the schedule from the initial state
    ///
    /// Each snapshot is checked for NaN or infinite values; the first bad
    /// frame aborts the run.
    pub fn run(&self) -> Result<SimulationResult, String> {
        let total_frames = self.total_frames();
        let mut state = self.initial.clone();
        let mut snapshots = Vec::with_capacity(total_frames);

        log::info!(
            "running {} frames on {} surface samples",
            total_frames,
            self.initial.config.sample_count
        );

        for frame in 0..total_frames {
            let snapshot = state.apply_frame(frame);
            validate_snapshot(&snapshot, frame)?;
            snapshots.push(snapshot);
        }

        let mut result = SimulationResult::new(snapshots);
        result.add_metadata("frames", &total_frames.to_string());
        result.add_metadata("sample count", &state.config.sample_count.to_string());
        result.add_metadata(
            "phases",
            &state
                .config
                .schedule
                .windows()
                .iter()
                .map(|w| format!("{}[{},{})", w.phase, w.start, w.end))
                .collect::<Vec<_>>()
                .join(" "),
        );
        result.add_metadata("ions emitted", &state.ions.emitted_total().to_string());
        if let Some(seed) = self.seed {
            result.add_metadata("seed", &seed.to_string());
        }

        Ok(result)
    }

    /// Return to the initial state
    pub fn reset(&mut self) {
        self.state = self.initial.clone();
    }

    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.state.config
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    pub fn total_frames(&self) -> usize {
        self.state.config.schedule.total_frames()
    }
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::PhaseSchedule;
    use approx::assert_relative_eq;

    fn simulation() -> Simulation {
        Simulation::new(SimulationConfig::default(), Some(2024)).unwrap()
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = SimulationConfig::default().with_sample_count(0);
        assert!(Simulation::new(config, Some(1)).is_err());
    }

    #[test]
    fn test_frame_zero_is_initial_condition() {
        let mut sim = simulation();
        let spawned = sim.state().acid().positions();
        let snapshot = sim.advance(0);

        assert_eq!(snapshot.acid.points, spawned);
        assert!(snapshot.acid.visible);
        assert!(!snapshot.reservoir_acid.visible);
        assert!(snapshot.coating.is_none());
        assert!(snapshot.annotation.is_none());
        assert_eq!(snapshot.coating_thickness, 0.0);
    }

    #[test]
    fn test_attack_moves_acid_down() {
        let mut sim = simulation();
        let first = sim.advance(0);
        let second = sim.advance(1);

        for (a, b) in second.acid.points.iter().zip(first.acid.points.iter()) {
            assert!(a[1] < b[1]);
        }
    }

    #[test]
    fn test_erosion_fades_acid() {
        let mut sim = simulation();
        for frame in 0..60 {
            sim.advance(frame);
        }
        let start = sim.advance(60);
        assert_relative_eq!(start.acid.alpha, 0.6);

        let later = sim.advance(90);
        assert_relative_eq!(later.acid.alpha, 0.3, epsilon = 1e-12);
        assert_eq!(later.caption, "erosion");
    }

    #[test]
    fn test_coating_phase_hides_acid() {
        let mut sim = simulation();
        let mut last = None;
        for frame in 0..=150 {
            last = Some(sim.advance(frame));
        }
        let snapshot = last.unwrap();

        assert_eq!(snapshot.phase, Phase::Coating);
        assert!(!snapshot.acid.visible);
        assert_relative_eq!(snapshot.coating_thickness, 0.15, epsilon = 1e-12);
        assert!(snapshot.annotation.is_some());

        let coating = snapshot.coating.unwrap();
        for (c, s) in coating.iter().zip(snapshot.surface.iter()) {
            assert_relative_eq!(c - s, 0.15, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_resistance_freezes_coating_and_emits() {
        let sim = simulation();
        let result = sim.run().unwrap();

        let last_coating = result.last_of_phase(Phase::Coating).unwrap().coating_thickness;
        for snapshot in result.snapshots.iter().filter(|s| s.phase == Phase::ResistanceTest) {
            assert_eq!(snapshot.coating_thickness, last_coating);
            assert!(snapshot.reservoir_acid.visible);
            assert!(snapshot.ion_count() <= 50);
        }
        assert!(result.ion_count_series().iter().any(|&n| n > 0));
    }

    #[test]
    fn test_run_covers_schedule() {
        let sim = simulation();
        let result = sim.run().unwrap();
        assert_eq!(result.len(), 260);
        assert_eq!(result.frames(), (0..260).collect::<Vec<_>>());
        assert_eq!(result.metadata.get("seed").map(String::as_str), Some("2024"));
    }

    #[test]
    fn test_run_ignores_previous_advances() {
        let mut sim = simulation();
        for frame in 0..100 {
            sim.advance(frame);
        }
        let fresh = simulation().run().unwrap();
        let after = sim.run().unwrap();
        assert_eq!(fresh.snapshots, after.snapshots);
    }

    #[test]
    fn test_three_phase_run() {
        let config = SimulationConfig::default().with_schedule(PhaseSchedule::three_phase());
        let result = Simulation::new(config, Some(4)).unwrap().run().unwrap();

        assert_eq!(result.len(), 200);
        let last = result.final_snapshot().unwrap();
        assert_eq!(last.phase, Phase::Coating);
        assert_eq!(last.ion_count(), 0);
        assert_relative_eq!(last.coating_thickness, 0.3, epsilon = 1e-12);
    }

    #[test]
    #[should_panic(expected = "outside the schedule")]
    fn test_advance_past_end_panics() {
        let mut sim = simulation();
        sim.advance(260);
    }

    #[test]
    fn test_reset() {
        let mut sim = simulation();
        let first = sim.advance(0);
        sim.advance(1);
        sim.reset();
        assert_eq!(sim.advance(0), first);
    }
}
