//! Errors returned by [`SkipList`][crate::SkipList] operations.

use thiserror::Error;

/// Errors that can occur when accessing or mutating a
/// [`SkipList`][crate::SkipList].
///
/// Neither variant leaves the list in a modified state: the operation that
/// returns them fails before any link is rewritten.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum Error {
    /// No node at level 0 holds the requested key.
    #[error("key not found")]
    KeyNotFound,
    /// The key is already present and the caller asked for a strict insert.
    #[error("key already present")]
    DuplicateKey,
}

/// Shorthand for results whose error is [`Error`].
pub type Result<T, E = Error> = core::result::Result<T, E>;
