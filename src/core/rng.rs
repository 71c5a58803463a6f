//! Injectable random source for fill, feed and fall tie-breaks.
//!
//! ## Key Features
//!
//! - **Deterministic**: Same seed produces identical boards
//! - **Injectable**: The board is generic over `RandomSource`, so tests can
//!   script every draw
//!
//! ```
//! use match3_engine::core::{BoardRng, RandomSource};
//!
//! let mut rng1 = BoardRng::new(42);
//! let mut rng2 = BoardRng::new(42);
//!
//! assert_eq!(rng1.gen_index(6), rng2.gen_index(6));
//! ```

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Source of uniform random choices used by the board.
///
/// The board only ever asks for an index below a non-zero bound; every random
/// decision (fill type, fed type, diagonal fall direction) goes through here.
pub trait RandomSource {
    /// Uniform index in `0..len`. `len` is never zero.
    fn gen_index(&mut self, len: usize) -> usize;

    /// Choose a random element from a slice.
    fn choose<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T>
    where
        Self: Sized,
    {
        if items.is_empty() {
            return None;
        }
        let index = self.gen_index(items.len());
        items.get(index)
    }
}

/// Seeded ChaCha8 random source.
#[derive(Clone, Debug)]
pub struct BoardRng {
    inner: ChaCha8Rng,
    seed: u64,
}

impl BoardRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Create an RNG seeded from OS entropy.
    ///
    /// The drawn seed is kept so a surprising board can be reproduced.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self::new(rand::random())
    }

    /// Seed this RNG was created with.
    #[must_use]
    pub const fn seed(&self) -> u64 {
        self.seed
    }
}

impl RandomSource for BoardRng {
    fn gen_index(&mut self, len: usize) -> usize {
        self.inner.gen_range(0..len)
    }
}
