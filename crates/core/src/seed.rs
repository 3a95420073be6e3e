//! Seed source for pre-filling the next form submission.
//!
//! The random source is passed in explicitly so callers (and tests) decide
//! where entropy comes from.

use std::ops::Range;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Range the follow-up seed is drawn from after a successful generation.
pub const NEXT_SEED_RANGE: Range<u32> = 0..20;

/// Draws follow-up seeds from [`NEXT_SEED_RANGE`].
#[derive(Debug, Clone)]
pub struct SeedGenerator<R> {
    rng: R,
}

impl<R: Rng> SeedGenerator<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Next seed, uniformly in `[0, 20)`.
    pub fn next_seed(&mut self) -> u32 {
        self.rng.random_range(NEXT_SEED_RANGE)
    }
}

impl SeedGenerator<StdRng> {
    /// A generator seeded from the operating system. `Send`, so it can be
    /// held across `.await` points in request handlers.
    pub fn from_os_rng() -> Self {
        Self::new(StdRng::from_os_rng())
    }
}
