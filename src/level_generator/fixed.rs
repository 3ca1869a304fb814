//! Constant level generator.

use crate::level_generator::LevelGenerator;

/// A level generator that always returns the same height.
///
/// This is mostly useful in tests, where the exact shape of the list must be
/// known in advance. The height can be changed between insertions through
/// [`set`][Fixed::set], for example via
/// [`SkipList::level_generator_mut`][crate::SkipList::level_generator_mut].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Fixed {
    height: usize,
}

impl Fixed {
    /// Create a generator which always returns `height`.
    #[inline]
    #[must_use]
    pub const fn new(height: usize) -> Self {
        Fixed { height }
    }

    /// Change the height returned by subsequent calls.
    #[inline]
    pub fn set(&mut self, height: usize) {
        self.height = height;
    }

    /// The height this generator currently returns.
    #[inline]
    #[must_use]
    pub const fn height(&self) -> usize {
        self.height
    }
}

impl LevelGenerator for Fixed {
    #[inline]
    fn level(&mut self) -> usize {
        self.height
    }
}
