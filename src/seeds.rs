//! Pool of seeds already used in a generation session.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rustc_hash::FxHashSet;

/// Draws before [`SeedPool::request_unused`] settles for a repeat.
const MAX_SEED_DRAWS: usize = 1000;

/// Hands out random seeds that have not been used in this session.
///
/// The pool is owned by whoever drives a batch of generation; dropping it
/// ends the session.
#[derive(Clone, Debug)]
pub struct SeedPool {
    used: FxHashSet<i64>,
    rng: StdRng,
}

impl SeedPool {
    /// Creates an empty pool whose draws are reproducible from `rng_seed`.
    pub fn new(rng_seed: u64) -> Self {
        Self {
            used: FxHashSet::default(),
            rng: StdRng::seed_from_u64(rng_seed),
        }
    }

    /// Creates an empty pool seeded from the operating system.
    pub fn from_entropy() -> Self {
        Self {
            used: FxHashSet::default(),
            rng: StdRng::from_entropy(),
        }
    }

    /// Returns a seed not yet in the pool and marks it used.
    ///
    /// After `MAX_SEED_DRAWS` collisions the last draw is returned anyway.
    pub fn request_unused(&mut self) -> i64 {
        let mut seed = self.rng.gen();
        for _ in 1..MAX_SEED_DRAWS {
            if !self.used.contains(&seed) {
                break;
            }
            seed = self.rng.gen();
        }
        self.used.insert(seed);
        seed
    }

    /// Records a seed chosen outside the pool.
    pub fn mark_used(&mut self, seed: i64) {
        self.used.insert(seed);
    }

    pub fn contains(&self, seed: i64) -> bool {
        self.used.contains(&seed)
    }

    pub fn len(&self) -> usize {
        self.used.len()
    }

    pub fn is_empty(&self) -> bool {
        self.used.is_empty()
    }
}
