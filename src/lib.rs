//! A skiplist is a way of storing key-value pairs in such a way that entries
//! can be efficiently looked up, inserted and removed, all in `O(log(n))` on
//! average, without any of the rebalancing a search tree needs.
//!
//! Conceptually, a skiplist resembles something like:
//!
//! ```text
//! <head> ----------> [2] --------------------------------------------------> [9] ---------->
//! <head> ----------> [2] ------------------------------------[7] ----------> [9] ---------->
//! <head> ----------> [2] ----------> [4] ------------------> [7] ----------> [9] --> [10] ->
//! <head> --> [1] --> [2] --> [3] --> [4] --> [5] --> [6] --> [7] --> [8] --> [9] --> [10] ->
//! ```
//!
//! where each node `[x]` has references to nodes further down the list,
//! allowing the algorithm to effectively skip ahead. Level 0 holds every node
//! in key order, and each node is copied onto the levels above with
//! decreasing probability, as decided by a [`LevelGenerator`].
//!
//! Every operation follows the same pattern: start at the top level of the
//! head, move right while the next key is smaller than the target, and drop
//! down a level otherwise, without going back to the head.
//!
//! ```
//! use coinflip_skiplist::{Error, SkipList};
//!
//! let mut list: SkipList<u32, String> = [1, 5, 7, 12, 15, 19, 24]
//!     .into_iter()
//!     .map(|key| (key, format!("{key}!")))
//!     .collect();
//!
//! assert_eq!(list.lookup(&7).map(String::as_str), Ok("7!"));
//! assert_eq!(list.lookup(&100), Err(Error::KeyNotFound));
//!
//! list.delete(&15);
//! assert_eq!(list.len(), 6);
//! list.insert(14, "14".to_owned());
//! assert_eq!(list.len(), 7);
//!
//! println!("{list}");
//! ```
//!
//! Keys must have a well-behaved [`Ord`] implementation. An inconsistent
//! ordering cannot corrupt memory, but lookups may then miss entries.

mod error;
mod level_generator;
mod node;
mod render;
mod skiplist;

pub use error::{Error, Result};
pub use level_generator::{CoinFlip, Fixed, Geometric, GeometricError, LevelGenerator};
pub use render::Grid;
pub use skiplist::{Iter, SkipList};
