//! Seedable uniform generator for gameplay spawners.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Deterministic for a given seed, so spawn patterns can be replayed in tests.
#[derive(Debug, Clone)]
pub struct Random {
    rng: ChaCha8Rng,
}

impl Random {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Seed from OS entropy.
    pub fn from_entropy() -> Self {
        Self {
            rng: ChaCha8Rng::from_entropy(),
        }
    }

    /// Reseed in place.
    pub fn seed(&mut self, seed: u64) {
        self.rng = ChaCha8Rng::seed_from_u64(seed);
    }

    /// Float in [0, 1).
    pub fn float(&mut self) -> f32 {
        self.rng.gen::<f32>()
    }

    /// Float in [min, max). Returns `min` when the range is empty.
    pub fn float_range(&mut self, min: f32, max: f32) -> f32 {
        if max <= min {
            return min;
        }
        self.rng.gen_range(min..max)
    }

    /// Integer in [min, max], both ends inclusive. Returns `min` when `max < min`.
    pub fn int_range(&mut self, min: i32, max: i32) -> i32 {
        if max < min {
            return min;
        }
        self.rng.gen_range(min..=max)
    }

    /// Vector with each component drawn from the matching range.
    pub fn vector(&mut self, min: Vec2, max: Vec2) -> Vec2 {
        Vec2::new(self.float_range(min.x, max.x), self.float_range(min.y, max.y))
    }
}

impl Default for Random {
    fn default() -> Self {
        Self::from_entropy()
    }
}
