//! Skiplists use a probabilistic distribution of nodes over the internal
//! levels, whereby the lowest level (level 0) contains all the nodes, and each
//! level `n > 0` contains a random subset of the nodes on level `n - 1`.
//!
//! The default is a fair coin: a new node is promoted one level for every
//! "heads" and stops at the first "tails", so a node reaches height `h` with
//! probability `2^-(h + 1)` and every level holds about half the nodes of the
//! level beneath it.
//!
//! The generator is a capability handed to the list at construction time, so
//! it can be swapped for a [`Geometric`] distribution with a different
//! promotion probability, or for a [`Fixed`] height when a test needs a
//! reproducible layout.

mod coin_flip;
mod fixed;
mod geometric;

pub use coin_flip::CoinFlip;
pub use fixed::Fixed;
pub use geometric::{Geometric, GeometricError};

// ////////////////////////////////////////////////////////////////////////////
// Level Generator
// ////////////////////////////////////////////////////////////////////////////

/// Upon the insertion of a new node in the list, the node is replicated to
/// higher levels as determined by a [`LevelGenerator`].
pub trait LevelGenerator {
    /// Generate the height of a new node.
    ///
    /// A height of `h` means the node is linked at levels `0..=h`.
    #[must_use]
    fn level(&mut self) -> usize;
}

impl<G> LevelGenerator for &mut G
where
    G: LevelGenerator + ?Sized,
{
    #[inline]
    fn level(&mut self) -> usize {
        (**self).level()
    }
}

impl<G> LevelGenerator for Box<G>
where
    G: LevelGenerator + ?Sized,
{
    #[inline]
    fn level(&mut self) -> usize {
        (**self).level()
    }
}
