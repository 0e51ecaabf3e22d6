//! Seeded randomness.
//!
//! One root seed fans out into named streams. Deck dealing and hazard
//! rolls draw from separate streams, so dealing another round never
//! changes which plots carry pests.
//!
//! ```
//! use garden_match::core::GameRng;
//!
//! let mut deck = GameRng::new(42).for_context("deck");
//! let mut again = GameRng::new(42).for_context("deck");
//! assert_eq!(deck.sample_indices(13, 6), again.sample_indices(13, 6));
//! ```

use rand::seq::{index, SliceRandom};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rustc_hash::FxHasher;
use std::hash::{Hash, Hasher};

/// ChaCha8 keyed by a `u64` seed; identical output on every platform.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
}

impl GameRng {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Seed from the thread-local entropy source.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self::new(rand::thread_rng().gen())
    }

    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Derive the stream named `context`.
    ///
    /// Depends only on the root seed and the name, never on how much of
    /// this stream has been consumed.
    #[must_use]
    pub fn for_context(&self, context: &str) -> Self {
        let mut hasher = FxHasher::default();
        self.seed.hash(&mut hasher);
        context.hash(&mut hasher);
        Self::new(hasher.finish())
    }

    /// True with probability `probability`, clamped to `[0, 1]`. NaN
    /// counts as zero.
    pub fn gen_bool(&mut self, probability: f64) -> bool {
        if probability.is_nan() {
            return false;
        }
        self.inner.gen_bool(probability.clamp(0.0, 1.0))
    }

    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        slice.shuffle(&mut self.inner);
    }

    /// `amount` distinct indices from `0..len`, uniformly, without
    /// replacement. Capped at `len`.
    pub fn sample_indices(&mut self, len: usize, amount: usize) -> Vec<usize> {
        index::sample(&mut self.inner, len, amount.min(len)).into_vec()
    }
}
