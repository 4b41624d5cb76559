//! Injectable randomness
//!
//! Every random decision (shuffles, shuffled next/previous, prefetch guesses)
//! goes through [`RandomSource`], so tests can pin the sequence.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Source of uniform random indices
pub trait RandomSource: Send {
    /// Uniform index in `0..upper`. Callers never pass zero.
    fn index(&mut self, upper: usize) -> usize;
}

/// [`RandomSource`] over any `rand` generator
#[derive(Debug, Clone)]
pub struct RngSource<R> {
    rng: R,
}

impl<R: Rng + Send> RngSource<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RngSource<StdRng> {
    /// Seeded from the operating system
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }

    /// Reproducible sequence
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng + Send> RandomSource for RngSource<R> {
    fn index(&mut self, upper: usize) -> usize {
        self.rng.gen_range(0..upper)
    }
}

/// Replays fixed draws, each reduced modulo the requested bound; zero once exhausted.
#[cfg(test)]
pub(crate) struct ScriptedSource {
    draws: std::collections::VecDeque<usize>,
}

#[cfg(test)]
impl ScriptedSource {
    pub(crate) fn new(draws: &[usize]) -> Self {
        Self {
            draws: draws.iter().copied().collect(),
        }
    }
}

#[cfg(test)]
impl RandomSource for ScriptedSource {
    fn index(&mut self, upper: usize) -> usize {
        self.draws.pop_front().unwrap_or(0) % upper
    }
}
