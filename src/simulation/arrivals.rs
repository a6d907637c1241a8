//! Stochastic arrival of vehicles on the four approaches

use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};

use super::types::{Approach, CarColor, DENSITY_WINDOW};

/// A vehicle about to join a queue
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Arrival {
    pub approach: Approach,
    pub color: CarColor,
}

/// Draws arrivals from the injected random source
pub struct ArrivalGenerator {
    rng: StdRng,
}

impl ArrivalGenerator {
    pub fn new(rng: StdRng) -> Self {
        Self { rng }
    }

    /// Create a generator with a seeded RNG for reproducible runs
    pub fn with_seed(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    /// Arrivals for one tick
    ///
    /// One Bernoulli trial per axis with probability `density / 60`; a success
    /// lands on either approach of that axis with equal probability.
    pub fn draw(&mut self, ns_density: f64, ew_density: f64) -> Vec<Arrival> {
        let mut arrivals = Vec::with_capacity(2);
        let axes = [
            (ns_density, Approach::North, Approach::South),
            (ew_density, Approach::East, Approach::West),
        ];
        for (density, first, second) in axes {
            let p = (density / DENSITY_WINDOW).clamp(0.0, 1.0);
            if self.rng.random_bool(p) {
                let approach = if self.rng.random_bool(0.5) { first } else { second };
                arrivals.push(self.arrival(approach));
            }
        }
        arrivals
    }

    /// A vehicle on a fixed approach with a random colour
    pub fn arrival(&mut self, approach: Approach) -> Arrival {
        let color = CarColor::ALL
            .choose(&mut self.rng)
            .copied()
            .unwrap_or(CarColor::Blue);
        Arrival { approach, color }
    }
}
