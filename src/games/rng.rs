//! Injectable randomness for the game engines
//!
//! Engines only see `RandomSource`, so a session can run on OS entropy while
//! tests replay a fixed seed and get the same grid, crash point and shuffle.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Source of uniform randomness
pub trait RandomSource {
    /// Uniform value in `[0, 1)`.
    fn next_unit(&mut self) -> f64;

    /// Uniform index in `[0, bound)`. `bound` must be non-zero.
    fn next_index(&mut self, bound: usize) -> usize;

    /// Fisher-Yates shuffle.
    fn shuffle<T>(&mut self, items: &mut [T])
    where
        Self: Sized,
    {
        for i in (1..items.len()).rev() {
            let j = self.next_index(i + 1);
            items.swap(i, j);
        }
    }
}

/// `RandomSource` over any `rand` generator
#[derive(Debug, Clone)]
pub struct RngSource<R> {
    rng: R,
}

impl RngSource<StdRng> {
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Seeded when `seed` is set, entropy otherwise.
    pub fn from_seed_option(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::seeded(seed),
            None => Self::from_entropy(),
        }
    }
}

impl<R: Rng> RandomSource for RngSource<R> {
    fn next_unit(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }

    fn next_index(&mut self, bound: usize) -> usize {
        self.rng.gen_range(0..bound)
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::RandomSource;
    use std::collections::VecDeque;

    /// Replays a scripted list of values; indices are derived from the
    /// same queue as `floor(value * bound)`.
    pub struct ScriptedSource {
        values: VecDeque<f64>,
    }

    impl ScriptedSource {
        pub fn new(values: &[f64]) -> Self {
            Self {
                values: values.iter().copied().collect(),
            }
        }
    }

    impl RandomSource for ScriptedSource {
        fn next_unit(&mut self) -> f64 {
            self.values.pop_front().unwrap_or(0.0)
        }

        fn next_index(&mut self, bound: usize) -> usize {
            let idx = (self.next_unit() * bound as f64) as usize;
            idx.min(bound - 1)
        }
    }
}
