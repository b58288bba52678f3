//! Falling acid particles
//!
//! One population type serves both acid waves of the animation. The first
//! falls onto the bare enamel, the second onto the coating; the boundary is
//! passed to [`AcidPopulation::step`] as a [`CollisionBoundary`], so the
//! population itself never knows which curve it lands on.
//!
//! A particle that reaches the boundary comes to rest at
//! `boundary(x) + clearance` and stays pinned there: later steps re-project
//! it onto the (possibly moving) boundary instead of letting it fall again.

use rand::Rng;

use crate::physics::CollisionBoundary;
use crate::simulation::AcidParameters;

/// One acid particle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AcidParticle {
    pub x: f64,
    pub y: f64,
    /// Set once the particle has reached the boundary
    pub resting: bool,
}

/// A population of acid particles with shared motion and display state
#[derive(Debug, Clone)]
pub struct AcidPopulation {
    particles: Vec<AcidParticle>,
    params: AcidParameters,
    alpha: f64,
    visible: bool,
}

impl AcidPopulation {
    /// Place `params.count` particles uniformly in the spawn region
    ///
    /// The population starts visible at `initial_alpha`. Draws are made
    /// particle by particle, x before y.
    ///
    /// # Example
    ///
    /// ```rust
    /// use enamel_rs::models::AcidPopulation;
    /// use enamel_rs::simulation::AcidParameters;
    /// use rand::SeedableRng;
    /// use rand_chacha::ChaChaRng;
    ///
    /// let mut rng = ChaChaRng::seed_from_u64(42);
    /// let acid = AcidPopulation::spawn(&AcidParameters::default(), &mut rng);
    ///
    /// assert_eq!(acid.len(), 100);
    /// assert!(acid.particles().iter().all(|p| (2.0..3.5).contains(&p.y)));
    /// ```
    pub fn spawn<R: Rng + ?Sized>(params: &AcidParameters, rng: &mut R) -> Self {
        let (x_lo, x_hi) = params.x_range;
        let (y_lo, y_hi) = params.y_range;

        let particles = (0..params.count)
            .map(|_| {
                let x = rng.random_range(x_lo..x_hi);
                let y = rng.random_range(y_lo..y_hi);
                AcidParticle { x, y, resting: false }
            })
            .collect();

        Self {
            particles,
            params: *params,
            alpha: params.initial_alpha,
            visible: true,
        }
    }

    /// Advance every particle by one tick against `boundary`
    ///
    /// Falling particles drop by `fall_speed`; a particle that ends below the
    /// boundary is lifted to `boundary(x) + clearance` and marked resting.
    /// Resting particles are re-pinned to the same height, which makes
    /// repeated steps idempotent for them.
    ///
    /// Returns the indices of particles that landed during this tick.
    pub fn step<B: CollisionBoundary + ?Sized>(&mut self, boundary: &B) -> Vec<usize> {
        let fall_speed = self.params.fall_speed;
        let clearance = self.params.clearance;
        let mut landed = Vec::new();

        for (index, particle) in self.particles.iter_mut().enumerate() {
            let height = boundary.height_at(particle.x);
            let rest_height = height + clearance;

            if particle.resting {
                particle.y = rest_height;
                continue;
            }

            particle.y -= fall_speed;
            if particle.y < height {
                particle.y = rest_height;
                particle.resting = true;
                landed.push(index);
            }
        }

        landed
    }

    /// Linear fade, `initial_alpha - (frame - start)·fade_rate`, floored at zero
    pub fn fade(&mut self, frame: usize, start_frame: usize) {
        let elapsed = frame.saturating_sub(start_frame) as f64;
        self.alpha = (self.params.initial_alpha - elapsed * self.params.fade_rate).max(0.0);
    }

    pub fn hide(&mut self) {
        self.visible = false;
    }

    pub fn show(&mut self) {
        self.visible = true;
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    pub fn particles(&self) -> &[AcidParticle] {
        &self.particles
    }

    pub fn positions(&self) -> Vec<[f64; 2]> {
        self.particles.iter().map(|p| [p.x, p.y]).collect()
    }

    pub fn resting_count(&self) -> usize {
        self.particles.iter().filter(|p| p.resting).count()
    }

    pub fn params(&self) -> &AcidParameters {
        &self.params
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }
}

// =================================================================================================
// Tests
// =================================================================================================
