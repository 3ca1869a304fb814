//! Grid rendering of a skiplist's levels, for debugging and demonstration.
//!
//! Each level gets one row, top level first, and each key gets one column,
//! placed according to its position on level 0. A level that skips a key
//! leaves that column blank, so the rendering shows the skips directly:
//!
//! ```text
//! 2:       ->  5                         -> 24
//! 1:       ->  5             -> 15       -> 24
//! 0: ->  1 ->  5 ->  7 -> 12 -> 15 -> 19 -> 24
//! ```

use std::{
    collections::HashMap,
    fmt::{self, Write as _},
};

use crate::{node::NodeId, skiplist::SkipList};

/// Displays the levels of a [`SkipList`] as a grid.
///
/// Created by [`SkipList::grid`]. The grid is computed from a read-only
/// traversal of the list; formatting it never changes the list.
#[derive(Debug)]
pub struct Grid<'a, K, V, G> {
    list: &'a SkipList<K, V, G>,
}

impl<K, V, G> SkipList<K, V, G> {
    /// Returns a [`Display`][fmt::Display] adapter drawing the list as a grid.
    ///
    /// # Examples
    ///
    /// ```
    /// use coinflip_skiplist::{Fixed, SkipList};
    ///
    /// let mut list = SkipList::with_level_generator(Fixed::new(1));
    /// list.insert(3, ());
    /// list.level_generator_mut().set(0);
    /// list.insert(10, ());
    ///
    /// assert_eq!(list.grid().to_string(), "1: ->  3\n0: ->  3 -> 10");
    /// ```
    #[inline]
    pub fn grid(&self) -> Grid<'_, K, V, G> {
        Grid { list: self }
    }
}

impl<K, V, G> fmt::Display for Grid<'_, K, V, G>
where
    K: fmt::Display,
{
    #[expect(
        clippy::arithmetic_side_effects,
        reason = "Label widths are bounded by the formatted key length"
    )]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let list = self.list;

        // Level 0 fixes the column of every node.
        let mut columns: HashMap<NodeId, usize> = HashMap::with_capacity(list.len());
        let mut labels = Vec::with_capacity(list.len());
        for (column, id) in list.ids_at_level(0).enumerate() {
            columns.insert(id, column);
            labels.push(list.node(id).key().map(ToString::to_string).unwrap_or_default());
        }
        let width = labels.iter().map(String::len).max().unwrap_or(0);
        let blank = " ".repeat(width + 3);

        let mut row = String::new();
        for level in (0..=list.level()).rev() {
            let mut present = vec![false; labels.len()];
            for id in list.ids_at_level(level) {
                if let Some(&column) = columns.get(&id) {
                    present[column] = true;
                }
            }

            row.clear();
            write!(row, "{level}:")?;
            for (label, &here) in labels.iter().zip(&present) {
                if here {
                    write!(row, " -> {label:>width$}")?;
                } else {
                    row.push(' ');
                    row.push_str(&blank);
                }
            }

            f.write_str(row.trim_end())?;
            if level > 0 {
                f.write_char('\n')?;
            }
        }
        Ok(())
    }
}

impl<K, V, G> fmt::Display for SkipList<K, V, G>
where
    K: fmt::Display,
{
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.grid(), f)
    }
}

#[cfg(test)]
mod tests {
    use insta::assert_snapshot;
    use pretty_assertions::assert_eq;

    use crate::{Fixed, SkipList};

    fn list_with_heights<K: Ord>(entries: Vec<(K, usize)>) -> SkipList<K, (), Fixed> {
        let mut list = SkipList::with_level_generator(Fixed::new(0));
        for (key, height) in entries {
            list.level_generator_mut().set(height);
            list.insert(key, ());
        }
        list
    }

    #[test]
    fn example() {
        let mut list = list_with_heights(vec![
            (1, 0),
            (5, 2),
            (7, 0),
            (12, 0),
            (15, 1),
            (19, 0),
            (24, 2),
        ]);
        assert_snapshot!(list.render(), @r"
        2:       ->  5                         -> 24
        1:       ->  5             -> 15       -> 24
        0: ->  1 ->  5 ->  7 -> 12 -> 15 -> 19 -> 24
        ");

        list.delete(&15);
        list.level_generator_mut().set(0);
        list.insert(14, ());
        assert_snapshot!(list.render(), @r"
        2:       ->  5                         -> 24
        1:       ->  5                         -> 24
        0: ->  1 ->  5 ->  7 -> 12 -> 14 -> 19 -> 24
        ");
    }

    #[test]
    fn uneven_widths() {
        let list = list_with_heights(vec![(7, 1), (100, 0), (3, 2)]);
        assert_snapshot!(list.to_string(), @r"
        2: ->   3
        1: ->   3 ->   7
        0: ->   3 ->   7 -> 100
        ");
    }

    #[test]
    fn empty() {
        let list: SkipList<u8, ()> = SkipList::new();
        assert_eq!(list.render(), "0:");
    }

    #[test]
    fn string_keys() {
        let list = list_with_heights(vec![("b", 0), ("a", 1)]);
        assert_eq!(list.render(), "1: -> a\n0: -> a -> b");
    }
}
