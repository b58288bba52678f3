//! Ions released by the coating
//!
//! When acid lands on the coating the coating answers by releasing mineral
//! ions (the "ion reservoir"). Each tick runs in a fixed order:
//!
//! 1. collision detection, done by the acid population
//! 2. [`IonReservoir::try_emit`]: at most `max_per_tick` new ions, never more
//!    than `max_live` alive
//! 3. [`IonReservoir::advance`]: upward drift with horizontal jitter, then one
//!    eviction pass removing every ion above the ceiling
//!
//! The container is a `Vec` sized for `max_live` up front; eviction is a
//! single `retain`, which keeps survivors in birth order.

use rand::Rng;

use crate::models::AcidPopulation;
use crate::physics::CollisionBoundary;
use crate::simulation::IonParameters;

/// One emitted ion
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ion {
    pub x: f64,
    pub y: f64,
}

/// Bounded population of live ions
#[derive(Debug, Clone)]
pub struct IonReservoir {
    ions: Vec<Ion>,
    params: IonParameters,
    emitted_total: usize,
}

impl IonReservoir {
    pub fn new(params: IonParameters) -> Self {
        Self {
            ions: Vec::with_capacity(params.max_live),
            params,
            emitted_total: 0,
        }
    }

    /// Emit ions for the particles that collided this tick
    ///
    /// Walks `colliding` in order and creates one ion per index at
    /// `(x + jitter, boundary(x) + offset)`, with `jitter ∈ [-spawn_jitter, spawn_jitter)`
    /// and `offset ∈ [0, spawn_offset)`. Stops after `max_per_tick` ions or
    /// when the population is full. Indices with no matching particle are
    /// skipped.
    ///
    /// Returns the number of ions created.
    ///
    /// # Example
    ///
    /// ```rust
    /// use enamel_rs::models::{AcidPopulation, IonReservoir};
    /// use enamel_rs::physics::FlatBoundary;
    /// use enamel_rs::simulation::{AcidParameters, IonParameters};
    /// use rand::SeedableRng;
    /// use rand_chacha::ChaChaRng;
    ///
    /// let mut rng = ChaChaRng::seed_from_u64(0);
    /// let acid = AcidPopulation::spawn(&AcidParameters::reservoir_challenge(), &mut rng);
    /// let mut ions = IonReservoir::new(IonParameters::default());
    ///
    /// let colliding: Vec<usize> = (0..acid.len()).collect();
    /// let created = ions.try_emit(&colliding, &acid, &FlatBoundary(1.0), &mut rng);
    ///
    /// assert_eq!(created, 3);
    /// assert_eq!(ions.len(), 3);
    /// ```
    pub fn try_emit<B, R>(
        &mut self,
        colliding: &[usize],
        acid: &AcidPopulation,
        boundary: &B,
        rng: &mut R,
    ) -> usize
    where
        B: CollisionBoundary + ?Sized,
        R: Rng + ?Sized,
    {
        let particles = acid.particles();
        let spawn_jitter = self.params.spawn_jitter;
        let spawn_offset = self.params.spawn_offset;
        let mut created = 0;

        for &index in colliding {
            if created == self.params.max_per_tick || self.is_full() {
                break;
            }
            let Some(particle) = particles.get(index) else {
                continue;
            };

            let jitter = symmetric(rng, spawn_jitter);
            let offset = if spawn_offset > 0.0 {
                rng.random_range(0.0..spawn_offset)
            } else {
                0.0
            };

            self.ions.push(Ion {
                x: particle.x + jitter,
                y: boundary.height_at(particle.x) + offset,
            });
            created += 1;
        }

        self.emitted_total += created;
        created
    }

    /// Drift every ion upward, then evict those above the ceiling
    ///
    /// Returns the number of evicted ions.
    pub fn advance<R: Rng + ?Sized>(&mut self, rng: &mut R) -> usize {
        let drift = self.params.drift_speed;
        let jitter = self.params.horizontal_jitter;

        for ion in &mut self.ions {
            ion.x += symmetric(rng, jitter);
            ion.y += drift;
        }

        let ceiling = self.params.ceiling;
        let before = self.ions.len();
        self.ions.retain(|ion| ion.y <= ceiling);
        before - self.ions.len()
    }

    pub fn ions(&self) -> &[Ion] {
        &self.ions
    }

    pub fn positions(&self) -> Vec<[f64; 2]> {
        self.ions.iter().map(|ion| [ion.x, ion.y]).collect()
    }

    /// Number of live ions
    pub fn len(&self) -> usize {
        self.ions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ions.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.ions.len() >= self.params.max_live
    }

    /// Ions created since construction, evicted ones included
    pub fn emitted_total(&self) -> usize {
        self.emitted_total
    }

    pub fn params(&self) -> &IonParameters {
        &self.params
    }
}

/// Uniform draw in `[-half_width, half_width)`, zero for a zero width
fn symmetric<R: Rng + ?Sized>(rng: &mut R, half_width: f64) -> f64 {
    if half_width > 0.0 {
        rng.random_range(-half_width..half_width)
    } else {
        0.0
    }
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::FlatBoundary;
    use crate::simulation::AcidParameters;
    use rand::SeedableRng;
    use rand_chacha::ChaChaRng;

    fn setup() -> (AcidPopulation, ChaChaRng) {
        let mut rng = ChaChaRng::seed_from_u64(21);
        let acid = AcidPopulation::spawn(&AcidParameters::reservoir_challenge(), &mut rng);
        (acid, rng)
    }

    #[test]
    fn test_emission_respects_per_tick_budget() {
        let (acid, mut rng) = setup();
        let mut ions = IonReservoir::new(IonParameters::default());
        let colliding: Vec<usize> = (0..80).collect();

        assert_eq!(ions.try_emit(&colliding, &acid, &FlatBoundary(1.0), &mut rng), 3);
        assert_eq!(ions.try_emit(&colliding[..2], &acid, &FlatBoundary(1.0), &mut rng), 2);
        assert_eq!(ions.len(), 5);
    }

    #[test]
    fn test_emission_stops_at_live_cap() {
        let (acid, mut rng) = setup();
        let params = IonParameters::default().limits(10, 4);
        let mut ions = IonReservoir::new(params);
        let colliding: Vec<usize> = (0..80).collect();

        assert_eq!(ions.try_emit(&colliding, &acid, &FlatBoundary(1.0), &mut rng), 4);
        assert!(ions.is_full());
        assert_eq!(ions.try_emit(&colliding, &acid, &FlatBoundary(1.0), &mut rng), 0);
    }

    #[test]
    fn test_birth_position() {
        let (acid, mut rng) = setup();
        let mut ions = IonReservoir::new(IonParameters::default());
        ions.try_emit(&[5], &acid, &FlatBoundary(1.2), &mut rng);

        let ion = ions.ions()[0];
        let source = acid.particles()[5];
        assert!((ion.x - source.x).abs() <= 0.05);
        assert!((1.2..1.25).contains(&ion.y));
    }

    #[test]
    fn test_unknown_indices_skipped() {
        let (acid, mut rng) = setup();
        let mut ions = IonReservoir::new(IonParameters::default());
        let created = ions.try_emit(&[500, 1, 900], &acid, &FlatBoundary(1.0), &mut rng);
        assert_eq!(created, 1);
    }

    #[test]
    fn test_advance_drifts_upward() {
        let (acid, mut rng) = setup();
        let mut ions = IonReservoir::new(IonParameters::default());
        ions.try_emit(&[0, 1, 2], &acid, &FlatBoundary(1.0), &mut rng);
        let before = ions.positions();

        assert_eq!(ions.advance(&mut rng), 0);
        for (after, before) in ions.positions().iter().zip(before.iter()) {
            assert!((after[1] - before[1] - 0.03).abs() < 1e-12);
            assert!((after[0] - before[0]).abs() <= 0.01);
        }
    }

    #[test]
    fn test_eviction_above_ceiling_keeps_order() {
        let (acid, mut rng) = setup();
        let params = IonParameters {
            ceiling: 1.5,
            ..IonParameters::default()
        };
        let mut ions = IonReservoir::new(params);
        ions.try_emit(&[0], &acid, &FlatBoundary(1.48), &mut rng);
        ions.try_emit(&[1, 2], &acid, &FlatBoundary(0.0), &mut rng);

        let survivors: Vec<f64> = ions.ions()[1..].iter().map(|ion| ion.x).collect();

        assert_eq!(ions.advance(&mut rng), 1);
        assert_eq!(ions.len(), 2);
        assert!(ions.ions().iter().all(|ion| ion.y <= 1.5));
        // Horizontal jitter is at most 0.01, so order by x birth is recognizable
        for (ion, x) in ions.ions().iter().zip(survivors.iter()) {
            assert!((ion.x - x).abs() <= 0.01);
        }
        assert_eq!(ions.emitted_total(), 3);
    }
}
