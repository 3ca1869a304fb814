//! Fair coin-flip level generator.

use rand::prelude::*;

use crate::level_generator::LevelGenerator;

/// A level generator that flips a fair coin until it lands on tails.
///
/// Each "heads" promotes the new node one level, so the height `h` is drawn
/// with probability `2^-(h + 1)`: half of all nodes stay on level 0, a quarter
/// reach level 1, and so on. There is no upper bound, but the expected height
/// is 1 and the tallest of `n` nodes is `O(log n)` with overwhelming
/// probability.
#[derive(Debug, Clone)]
pub struct CoinFlip {
    /// The random number generator.
    rng: SmallRng,
}

impl CoinFlip {
    /// Create a new coin-flip generator seeded from the thread-local RNG.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        CoinFlip {
            rng: SmallRng::from_rng(&mut rand::rng()),
        }
    }

    /// Create a coin-flip generator with a fixed seed.
    ///
    /// Two generators built from the same seed produce the same sequence of
    /// heights, which makes the shape of a list reproducible.
    #[inline]
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        CoinFlip {
            rng: SmallRng::seed_from_u64(seed),
        }
    }
}

impl Default for CoinFlip {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl LevelGenerator for CoinFlip {
    #[inline]
    #[expect(
        clippy::arithmetic_side_effects,
        reason = "Reaching usize::MAX heads in a row is not physically possible"
    )]
    fn level(&mut self) -> usize {
        let mut h = 0;
        while self.rng.random::<bool>() {
            h += 1;
        }
        h
    }
}
