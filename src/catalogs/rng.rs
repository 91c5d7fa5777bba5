//! Deterministic random number generation for opening sealed products.
//!
//! Same seed, same boosters: tests and replays rely on it.
//!
//! ```
//! use ccg_card_db::catalogs::BoosterRng;
//!
//! let mut a = BoosterRng::new(42);
//! let mut b = BoosterRng::new(42);
//! let weights = [1, 2, 3, 4];
//! assert_eq!(a.choose_weighted(&weights), b.choose_weighted(&weights));
//! ```

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Seeded RNG used by the booster generator.
///
/// Uses ChaCha8 for speed while keeping sequences reproducible across
/// platforms.
#[derive(Clone, Debug)]
pub struct BoosterRng {
    inner: ChaCha8Rng,
}

impl BoosterRng {
    /// Create a generator from a seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Pick an index with probability proportional to its weight.
    ///
    /// Returns `None` if weights are empty or all zero.
    pub fn choose_weighted(&mut self, weights: &[u32]) -> Option<usize> {
        let total: u64 = weights.iter().map(|&w| u64::from(w)).sum();
        if total == 0 {
            return None;
        }

        let mut threshold = self.inner.gen_range(0..total);
        for (i, &weight) in weights.iter().enumerate() {
            let weight = u64::from(weight);
            if threshold < weight {
                return Some(i);
            }
            threshold -= weight;
        }
        None
    }
}
