//! Geometric level generator.

use rand::prelude::*;
use thiserror::Error;

use crate::level_generator::LevelGenerator;

#[derive(Error, Debug, PartialEq, Eq)]
/// Errors that can occur when creating a [`Geometric`] level generator.
#[expect(
    clippy::module_name_repetitions,
    reason = "Using 'Error' would clash with the crate-level error."
)]
#[non_exhaustive]
pub enum GeometricError {
    /// The maximum number of levels must be non-zero.
    #[error("max must be non-zero.")]
    ZeroMax,
    /// The maximum number of levels must be less than `i32::MAX`.
    #[error("max must be less than i32::MAX.")]
    MaxTooLarge,
    /// The probability `p` must be in the range `(0, 1)`.
    #[error("p must be in (0, 1).")]
    InvalidProbability,
}

/// A level generator using a truncated geometric distribution.
///
/// If a node is present at some level `n`, the probability that it is also
/// present at level `n + 1` is some constant `p` in `(0, 1)`. Unlike
/// [`CoinFlip`][crate::CoinFlip], heights are capped: the generator never
/// returns a level greater than or equal to [`total`][Geometric::total].
///
/// With `p = 0.5` and a large `total` this matches the coin-flip distribution.
/// Smaller values of `p` give flatter lists with fewer links per node.
#[derive(Debug, Clone)]
pub struct Geometric {
    /// The total number of levels that are assumed to exist.
    total: usize,
    /// The probability that a node is not present in the next level.
    ///
    /// While the geometric distribution is defined using the probability `p`,
    /// the computations needed rely on `q = 1 - p`.
    q: f64,
    /// `q^total`, cached since it only depends on the parameters.
    q_total: f64,
    /// The random number generator.
    rng: SmallRng,
}

impl Geometric {
    /// Create a new geometric level generator with `total` number of levels,
    /// and `p` as the probability that a given node is present in the next
    /// level.
    ///
    /// # Errors
    ///
    /// `p` must be strictly between 0 and 1, and `total` must be at least 1
    /// and fit in an `i32`.
    #[inline]
    pub fn new(total: usize, p: f64) -> Result<Self, GeometricError> {
        Self::with_rng(total, p, SmallRng::from_rng(&mut rand::rng()))
    }

    /// Create a new geometric level generator with a fixed seed.
    ///
    /// # Errors
    ///
    /// See [`Geometric::new`].
    #[inline]
    pub fn seeded(total: usize, p: f64, seed: u64) -> Result<Self, GeometricError> {
        Self::with_rng(total, p, SmallRng::seed_from_u64(seed))
    }

    fn with_rng(total: usize, p: f64, rng: SmallRng) -> Result<Self, GeometricError> {
        if total == 0 {
            return Err(GeometricError::ZeroMax);
        }
        let Ok(exponent) = i32::try_from(total) else {
            return Err(GeometricError::MaxTooLarge);
        };
        if !(0.0 < p && p < 1.0) {
            return Err(GeometricError::InvalidProbability);
        }
        #[expect(clippy::float_arithmetic, reason = "Computing q = 1 - p is fine")]
        let q = 1.0 - p;
        Ok(Geometric {
            total,
            q,
            q_total: q.powi(exponent),
            rng,
        })
    }

    /// The total number of levels that are assumed to exist.
    #[inline]
    #[must_use]
    pub fn total(&self) -> usize {
        self.total
    }
}

impl LevelGenerator for Geometric {
    /// Generate a level for a new node using a geometric distribution.
    ///
    /// This function generates a random level in the range `[0, total)` by
    /// sampling from a uniform distribution and inverting the cumulative
    /// distribution function (CDF) of the truncated geometric distribution:
    ///
    /// ```text
    /// n = floor(log_q(1 + (q^total - 1) * u))
    /// ```
    ///
    /// where `u` is uniformly distributed in `[0, 1)`.
    #[inline]
    #[expect(clippy::float_arithmetic, reason = "Computing inverse CDF")]
    #[expect(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "CDF domain is [0, total] so the cast is safe"
    )]
    #[expect(clippy::as_conversions, reason = "No other way to do this")]
    fn level(&mut self) -> usize {
        let u = self.rng.random::<f64>();
        let level = (1.0 + (self.q_total - 1.0) * u).log(self.q).floor() as usize;
        // Rounding near u = 1 can land exactly on `total`.
        level.min(self.total.saturating_sub(1))
    }
}

#[cfg(test)]
mod tests {
    use anyhow::{Result, bail};
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::{Geometric, GeometricError};
    use crate::level_generator::LevelGenerator;

    #[test]
    fn invalid_max() {
        assert_eq!(Geometric::new(0, 0.5).err(), Some(GeometricError::ZeroMax));
    }

    #[test]
    fn invalid_p() {
        assert_eq!(
            Geometric::new(1, 0.0).err(),
            Some(GeometricError::InvalidProbability)
        );
        assert_eq!(
            Geometric::new(1, 1.0).err(),
            Some(GeometricError::InvalidProbability)
        );
        assert_eq!(
            Geometric::new(1, f64::NAN).err(),
            Some(GeometricError::InvalidProbability)
        );
    }

    #[test]
    fn max_too_large() {
        assert_eq!(
            Geometric::new(usize::MAX, 0.5).err(),
            Some(GeometricError::MaxTooLarge)
        );
    }

    #[rstest]
    fn new(#[values(1, 2, 16, 128)] n: usize, #[values(0.1, 0.5, 0.9)] p: f64) -> Result<()> {
        let mut generator = Geometric::seeded(n, p, 0x1234_abcd)?;
        assert_eq!(generator.total(), n);
        for _ in 0..100_000 {
            let level = generator.level();
            assert!((0..n).contains(&level));
        }

        // Make sure that we can produce at least one level-0 node.
        if !(0..100_000).any(|_| generator.level() == 0) {
            bail!("Failed to generate a level-0 node.");
        }
        Ok(())
    }

    #[test]
    fn reaches_top_level() -> Result<()> {
        let mut generator = Geometric::seeded(4, 0.5, 7)?;
        if !(0..100_000).any(|_| generator.level() == 3) {
            bail!("Failed to generate a level-3 node.");
        }
        Ok(())
    }
}
