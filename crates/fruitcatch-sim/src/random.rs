//! Randomness source for the spawn system.
//!
//! Spawning draws through this trait so hosts can seed it and tests can
//! script exact outcomes.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

pub trait RandomSource {
    /// Uniform real in `[low, high)`.
    fn range(&mut self, low: f64, high: f64) -> f64;
    /// Bernoulli trial succeeding with probability `p`.
    fn chance(&mut self, p: f64) -> bool;
    /// Uniform index in `0..len`. `len` is never zero.
    fn pick(&mut self, len: usize) -> usize;
    /// Uniform real in `[0, 1)`.
    fn unit(&mut self) -> f64;
}

/// Deterministic source backed by ChaCha8. Same seed = same draws.
pub struct SeededRandom {
    rng: ChaCha8Rng,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }
}

impl RandomSource for SeededRandom {
    fn range(&mut self, low: f64, high: f64) -> f64 {
        low + (high - low) * self.rng.gen::<f64>()
    }

    fn chance(&mut self, p: f64) -> bool {
        self.rng.gen_bool(p.clamp(0.0, 1.0))
    }

    fn pick(&mut self, len: usize) -> usize {
        self.rng.gen_range(0..len)
    }

    fn unit(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }
}
