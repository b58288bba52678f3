//! Phase schedule: which phase owns which frames
//!
//! # Design
//!
//! A schedule is an ordered list of half-open frame windows `[start, end)`.
//! Windows are contiguous, never overlap and start at frame 0, so every frame
//! below [`PhaseSchedule::total_frames`] belongs to exactly one phase.
//!
//! Two layouts ship with the crate:
//!
//! ```text
//! four_phase  (default): Attack [0,60) · Erosion [60,120) · Coating [120,180) · ResistanceTest [180,260)
//! three_phase          : Attack [0,60) · Erosion [60,120) · Coating [120,200)
//! ```

use std::fmt;

// =================================================================================================
// Phase
// =================================================================================================

/// Simulation phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Acid particles fall onto the bare enamel
    Attack,
    /// The enamel surface dissolves while the acid fades
    Erosion,
    /// A protective layer grows on the eroded surface
    Coating,
    /// A second acid wave hits the coating, which releases ions
    ResistanceTest,
}

impl Phase {
    /// All phases, in schedule order
    pub const ALL: [Phase; 4] = [
        Phase::Attack,
        Phase::Erosion,
        Phase::Coating,
        Phase::ResistanceTest,
    ];

    /// Short lowercase caption
    pub fn caption(&self) -> &'static str {
        match self {
            Phase::Attack => "acid attack",
            Phase::Erosion => "erosion",
            Phase::Coating => "coating application",
            Phase::ResistanceTest => "ion reservoir protection",
        }
    }

    /// Identifier used in exported files
    pub fn name(&self) -> &'static str {
        match self {
            Phase::Attack => "Attack",
            Phase::Erosion => "Erosion",
            Phase::Coating => "Coating",
            Phase::ResistanceTest => "ResistanceTest",
        }
    }

    /// 1-based phase number
    pub fn index(&self) -> usize {
        match self {
            Phase::Attack => 1,
            Phase::Erosion => 2,
            Phase::Coating => 3,
            Phase::ResistanceTest => 4,
        }
    }

    /// Long plot title for `frame`
    ///
    /// Only the attack title carries the frame number.
    pub fn title(&self, frame: usize) -> String {
        match self {
            Phase::Attack => format!("Phase 1: Acid Attack (pH < 5.5) - Frame: {}", frame),
            Phase::Erosion => {
                "Phase 2: Enamel Erosion (Ca10(PO4)6(OH)2 Dissolution)".to_string()
            }
            Phase::Coating => {
                "Phase 3: New Coating Application (Remineralization/Protection)".to_string()
            }
            Phase::ResistanceTest => {
                "Phase 4: Acid Challenge on Coated Enamel (Ion Reservoir Protection)".to_string()
            }
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

// =================================================================================================
// Phase Window
// =================================================================================================

/// Half-open frame range `[start, end)` owned by one phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhaseWindow {
    pub phase: Phase,
    pub start: usize,
    pub end: usize,
}

impl PhaseWindow {
    pub fn new(phase: Phase, start: usize, end: usize) -> Self {
        Self { phase, start, end }
    }

    pub fn contains(&self, frame: usize) -> bool {
        (self.start..self.end).contains(&frame)
    }

    /// Number of frames in the window
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Last frame of the window
    ///
    /// Only meaningful for a non-empty window.
    pub fn last_frame(&self) -> usize {
        self.end.saturating_sub(1)
    }
}

// =================================================================================================
// Phase Schedule
// =================================================================================================

/// Ordered, contiguous phase windows
///
/// # Example
///
/// ```rust
/// use enamel_rs::simulation::{Phase, PhaseSchedule};
///
/// let schedule = PhaseSchedule::four_phase();
///
/// assert_eq!(schedule.phase_at(0), Phase::Attack);
/// assert_eq!(schedule.phase_at(150), Phase::Coating);
/// assert_eq!(schedule.phase_at(259), Phase::ResistanceTest);
/// assert_eq!(schedule.total_frames(), 260);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhaseSchedule {
    windows: Vec<PhaseWindow>,
}

impl Default for PhaseSchedule {
    fn default() -> Self {
        Self::four_phase()
    }
}

impl PhaseSchedule {
    /// Build from explicit windows
    ///
    /// Call [`validate`](Self::validate) (or let `SimulationConfig::validate`
    /// do it) before driving a simulation with a hand-made schedule.
    pub fn new(windows: Vec<PhaseWindow>) -> Self {
        Self { windows }
    }

    /// Attack, erosion, coating and resistance test (260 frames)
    pub fn four_phase() -> Self {
        Self::new(vec![
            PhaseWindow::new(Phase::Attack, 0, 60),
            PhaseWindow::new(Phase::Erosion, 60, 120),
            PhaseWindow::new(Phase::Coating, 120, 180),
            PhaseWindow::new(Phase::ResistanceTest, 180, 260),
        ])
    }

    /// Attack, erosion and a longer coating phase (200 frames)
    pub fn three_phase() -> Self {
        Self::new(vec![
            PhaseWindow::new(Phase::Attack, 0, 60),
            PhaseWindow::new(Phase::Erosion, 60, 120),
            PhaseWindow::new(Phase::Coating, 120, 200),
        ])
    }

    /// Check ordering, contiguity and non-emptiness
    pub fn validate(&self) -> Result<(), String> {
        let phases: Vec<Phase> = self.windows.iter().map(|w| w.phase).collect();
        let expected_len = phases.len();

        if !(3..=4).contains(&expected_len) || phases[..] != Phase::ALL[..expected_len] {
            return Err(format!(
                "Schedule must list Attack, Erosion, Coating and optionally ResistanceTest in order, got {:?}",
                phases
            ));
        }

        if self.windows[0].start != 0 {
            return Err(format!(
                "Schedule must start at frame 0, starts at {}",
                self.windows[0].start
            ));
        }

        for window in &self.windows {
            if window.is_empty() {
                return Err(format!(
                    "Phase {} has an empty window [{}, {})",
                    window.phase, window.start, window.end
                ));
            }
        }

        for pair in self.windows.windows(2) {
            if pair[0].end != pair[1].start {
                return Err(format!(
                    "Phase {} ends at {} but {} starts at {}",
                    pair[0].phase, pair[0].end, pair[1].phase, pair[1].start
                ));
            }
        }

        Ok(())
    }

    pub fn windows(&self) -> &[PhaseWindow] {
        &self.windows
    }

    /// Number of frames covered by the schedule
    pub fn total_frames(&self) -> usize {
        self.windows.last().map_or(0, |w| w.end)
    }

    /// Window owning `frame`
    ///
    /// # Panics
    ///
    /// Panics when `frame` lies past the final frame.
    pub fn window_at(&self, frame: usize) -> PhaseWindow {
        match self.windows.iter().find(|w| w.contains(frame)) {
            Some(window) => *window,
            None => panic!(
                "Frame {} is outside the schedule (0..{})",
                frame,
                self.total_frames()
            ),
        }
    }

    /// Phase owning `frame`
    ///
    /// # Panics
    ///
    /// Panics when `frame` lies past the final frame.
    pub fn phase_at(&self, frame: usize) -> Phase {
        self.window_at(frame).phase
    }

    /// Window of `phase`, if the schedule contains it
    pub fn window(&self, phase: Phase) -> Option<PhaseWindow> {
        self.windows.iter().find(|w| w.phase == phase).copied()
    }

    pub fn has_resistance_test(&self) -> bool {
        self.window(Phase::ResistanceTest).is_some()
    }
}

// =================================================================================================
// Tests
// =================================================================================================
