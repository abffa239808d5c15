//! `rand`-backed random source.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::domain::ports::RandomSource;

/// Adapts any [`rand::Rng`] to the sampler's [`RandomSource`] port.
#[derive(Debug, Clone)]
pub struct RngSource<R> {
    rng: R,
}

impl<R: Rng> RngSource<R> {
    /// Wrap `rng`.
    pub const fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RngSource<StdRng> {
    /// Reproducible source for tests and replays.
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    /// Source seeded from the operating system.
    pub fn from_os() -> Self {
        Self::new(StdRng::from_os_rng())
    }
}

impl<R: Rng + Send> RandomSource for RngSource<R> {
    fn pick_index(&mut self, len: usize) -> usize {
        self.rng.random_range(0..len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_sources_agree() {
        let mut a = RngSource::seeded(7);
        let mut b = RngSource::seeded(7);
        let left: Vec<usize> = (0..20).map(|_| a.pick_index(10)).collect();
        let right: Vec<usize> = (0..20).map(|_| b.pick_index(10)).collect();
        assert_eq!(left, right);
    }

    #[test]
    fn test_pick_within_bounds() {
        let mut rng = RngSource::from_os();
        for len in 1..50 {
            assert!(rng.pick_index(len) < len);
        }
    }
}
