//! Random sources for the behavior scheduler.
//!
//! Everything random in the cat's life goes through [`RandomSource`] so
//! tests can force the dice.

use std::time::Duration;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// A stream of uniform values in `[0, 1)`.
pub trait RandomSource {
    fn next_unit(&mut self) -> f64;

    /// Uniform value in `[lo, hi)`.
    fn next_range(&mut self, lo: f64, hi: f64) -> f64 {
        lo + self.next_unit() * (hi - lo)
    }

    /// Fair coin.
    fn coin(&mut self) -> bool {
        self.next_unit() > 0.5
    }

    /// Uniform delay in `[min_ms, max_ms)`.
    fn delay(&mut self, min_ms: u64, max_ms: u64) -> Duration {
        let ms = self.next_range(min_ms as f64, max_ms as f64);
        Duration::from_secs_f64(ms.max(0.0) / 1000.0)
    }
}

/// `SmallRng`-backed source, seeded or from entropy.
pub struct SeededRandom(SmallRng);

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        SeededRandom(SmallRng::seed_from_u64(seed))
    }

    pub fn from_entropy() -> Self {
        SeededRandom(SmallRng::from_entropy())
    }

    /// Seed from `seed` if given, otherwise from entropy.
    pub fn from_seed_opt(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::new(seed),
            None => Self::from_entropy(),
        }
    }
}

impl RandomSource for SeededRandom {
    #[inline]
    fn next_unit(&mut self) -> f64 {
        self.0.gen::<f64>()
    }
}

/// Always returns the same value.
#[derive(Debug, Clone, Copy)]
pub struct FixedRandom(pub f64);

impl RandomSource for FixedRandom {
    fn next_unit(&mut self) -> f64 {
        self.0
    }
}

/// Replays a fixed sequence, cycling when exhausted.
#[derive(Debug, Clone)]
pub struct ScriptedRandom {
    values: Vec<f64>,
    cursor: usize,
}

impl ScriptedRandom {
    pub fn new(values: impl Into<Vec<f64>>) -> Self {
        Self {
            values: values.into(),
            cursor: 0,
        }
    }
}

impl RandomSource for ScriptedRandom {
    fn next_unit(&mut self) -> f64 {
        if self.values.is_empty() {
            return 0.0;
        }
        let v = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        v
    }
}
