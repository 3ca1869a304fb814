//! A skiplist map: keys are unique and always sorted, and every lookup,
//! insertion and deletion walks the levels from the top down.

use std::{borrow::Borrow, cmp::Ordering, fmt, iter, iter::FusedIterator};

use log::{debug, trace};
use slab::Slab;

use crate::{
    error::{Error, Result},
    level_generator::{CoinFlip, LevelGenerator},
    node::{Node, NodeId},
};

// ////////////////////////////////////////////////////////////////////////////
// SkipList
// ////////////////////////////////////////////////////////////////////////////

/// An ordered map built from stacked, sorted linked lists.
///
/// Level 0 links every entry in key order, and each level above links a
/// random subset of the level beneath it, roughly half as many when using the
/// default [`CoinFlip`] generator. Searches start at the top level of a head
/// sentinel and drop down a level whenever the next key would overshoot, giving
/// expected `O(log n)` lookups, insertions and deletions without any
/// rebalancing.
///
/// Nodes are stored in an arena and linked by index. The list exclusively
/// owns them: deleting an entry frees its node immediately.
///
/// Inserting a key which is already present overwrites the value in place.
/// Use [`try_insert`][SkipList::try_insert] to reject duplicates instead.
///
/// The list is not thread-safe in any interesting way; concurrent mutation
/// must be serialised by the caller.
pub struct SkipList<K, V, G = CoinFlip> {
    // Arena holding the head sentinel and every entry.
    nodes: Slab<Node<K, V>>,
    head: NodeId,
    // Highest level index in use; the head spans `0..=level`.
    level: usize,
    len: usize,
    level_generator: G,
}

/// Where a key sits in the list.
enum Location {
    /// The node holding the key.
    Found(NodeId),
    /// The key is absent; for each level `0..=level`, the last node whose key
    /// is smaller than the key.
    Vacant(Vec<NodeId>),
}

// ///////////////////////////////////////////////
// Inherent methods
// ///////////////////////////////////////////////

impl<K, V> SkipList<K, V> {
    /// Create a new, empty skiplist using a fair coin to pick node heights.
    ///
    /// # Examples
    ///
    /// ```
    /// use coinflip_skiplist::SkipList;
    ///
    /// let list: SkipList<i64, String> = SkipList::new();
    /// assert!(list.is_empty());
    /// ```
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::with_level_generator(CoinFlip::new())
    }

    /// Create a new, empty skiplist whose coin flips are seeded with `seed`.
    ///
    /// Lists built from the same seed and the same sequence of operations end
    /// up with the same shape.
    #[inline]
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self::with_level_generator(CoinFlip::seeded(seed))
    }
}

impl<K, V, G> SkipList<K, V, G> {
    /// Create a new, empty skiplist using the given level generator.
    ///
    /// # Examples
    ///
    /// ```
    /// use coinflip_skiplist::{Fixed, SkipList};
    ///
    /// let mut list = SkipList::with_level_generator(Fixed::new(3));
    /// list.insert(1, "one");
    /// assert_eq!(list.level(), 3);
    /// assert_eq!(list.height(&1), Some(3));
    /// ```
    #[inline]
    pub fn with_level_generator(level_generator: G) -> Self {
        let mut nodes = Slab::new();
        let head = nodes.insert(Node::head());
        SkipList {
            nodes,
            head,
            level: 0,
            len: 0,
            level_generator,
        }
    }

    /// Returns the number of entries in the skiplist.
    ///
    /// # Examples
    ///
    /// ```
    /// use coinflip_skiplist::SkipList;
    ///
    /// let mut list = SkipList::new();
    /// list.extend((0..10).map(|x| (x, x)));
    /// assert_eq!(list.len(), 10);
    /// ```
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the skiplist contains no entries.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The highest level index currently in use, or 0 if the list is empty.
    ///
    /// This is always the height of the tallest node.
    #[inline]
    pub fn level(&self) -> usize {
        self.level
    }

    /// The level generator used for new nodes.
    #[inline]
    pub fn level_generator(&self) -> &G {
        &self.level_generator
    }

    /// Mutable access to the level generator, e.g. to change the height a
    /// [`Fixed`][crate::Fixed] generator hands out.
    #[inline]
    pub fn level_generator_mut(&mut self) -> &mut G {
        &mut self.level_generator
    }

    /// Clears the skiplist, removing all entries.
    ///
    /// # Examples
    ///
    /// ```
    /// use coinflip_skiplist::SkipList;
    ///
    /// let mut list = SkipList::new();
    /// list.extend((0..10).map(|x| (x, x)));
    /// list.clear();
    /// assert!(list.is_empty());
    /// assert_eq!(list.level(), 0);
    /// ```
    #[inline]
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.head = self.nodes.insert(Node::head());
        self.level = 0;
        self.len = 0;
    }

    /// Returns a reference to the value for `key`, or `None` if it is absent.
    ///
    /// # Examples
    ///
    /// ```
    /// use coinflip_skiplist::SkipList;
    ///
    /// let mut list = SkipList::new();
    /// list.insert("a".to_owned(), 1);
    /// assert_eq!(list.get("a"), Some(&1));
    /// assert_eq!(list.get("b"), None);
    /// ```
    #[inline]
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.find(key).and_then(|id| self.nodes[id].value())
    }

    /// Returns a mutable reference to the value for `key`, or `None` if it is
    /// absent.
    #[inline]
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let id = self.find(key)?;
        self.nodes[id].value_mut()
    }

    /// Returns a reference to the value for `key`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::KeyNotFound`] if no entry holds `key`.
    ///
    /// # Examples
    ///
    /// ```
    /// use coinflip_skiplist::{Error, SkipList};
    ///
    /// let mut list = SkipList::new();
    /// list.insert(7, "7!");
    /// assert_eq!(list.lookup(&7), Ok(&"7!"));
    /// assert_eq!(list.lookup(&100), Err(Error::KeyNotFound));
    /// ```
    #[inline]
    pub fn lookup<Q>(&self, key: &Q) -> Result<&V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.get(key).ok_or(Error::KeyNotFound)
    }

    /// Returns a mutable reference to the value for `key`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::KeyNotFound`] if no entry holds `key`.
    #[inline]
    pub fn lookup_mut<Q>(&mut self, key: &Q) -> Result<&mut V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.get_mut(key).ok_or(Error::KeyNotFound)
    }

    /// Returns `true` if an entry holds `key`.
    #[inline]
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.find(key).is_some()
    }

    /// The height of the node holding `key`, or `None` if it is absent.
    ///
    /// A node of height `h` is linked at levels `0..=h`.
    #[inline]
    pub fn height<Q>(&self, key: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.find(key).map(|id| self.nodes[id].height())
    }

    /// Removes `key` from the skiplist, returning its value if it was
    /// present.
    ///
    /// Deleting an absent key is a no-op.
    ///
    /// # Examples
    ///
    /// ```
    /// use coinflip_skiplist::SkipList;
    ///
    /// let mut list: SkipList<_, _> = (0..10).map(|x| (x, x * 10)).collect();
    /// assert_eq!(list.delete(&4), Some(40));
    /// assert_eq!(list.delete(&4), None);
    /// assert_eq!(list.len(), 9);
    /// ```
    #[expect(
        clippy::arithmetic_side_effects,
        reason = "A node was found, so len is at least 1"
    )]
    pub fn delete<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut current = self.head;
        let mut removed = None;

        for level in (0..=self.level).rev() {
            // The traversal pointer is not reset between levels: everything
            // before `current` is smaller than `key` at every level below too.
            loop {
                let (prev, found) = self.seek_at_level(current, level, key);
                current = prev;
                let Some(target) = found else {
                    break;
                };
                let after = self.nodes[target].next(level);
                self.nodes[current].set_next(level, after);
                removed = Some(target);
            }
        }

        let target = removed?;
        let node = self.nodes.remove(target);
        debug_assert!(!node.is_head(), "deleted the head sentinel");
        self.len -= 1;
        trace!("spliced out node {target} from levels 0..={}", node.height());
        self.shrink_level();
        node.into_entry().map(|(_, value)| value)
    }

    /// Returns an iterator over the entries in key order.
    ///
    /// # Examples
    ///
    /// ```
    /// use coinflip_skiplist::SkipList;
    ///
    /// let list: SkipList<_, _> = [(3, 'c'), (1, 'a'), (2, 'b')].into_iter().collect();
    /// let entries: Vec<_> = list.iter().collect();
    /// assert_eq!(entries, [(&1, &'a'), (&2, &'b'), (&3, &'c')]);
    /// ```
    #[inline]
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            nodes: &self.nodes,
            next: self.nodes[self.head].next(0),
            remaining: self.len,
        }
    }

    /// Returns an iterator over the keys in order.
    #[inline]
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.iter().map(|(key, _)| key)
    }

    /// Returns an iterator over the values in key order.
    #[inline]
    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.iter().map(|(_, value)| value)
    }

    /// Returns an iterator over the keys linked at `level`, in order.
    ///
    /// Level 0 yields every key; levels above [`level`][SkipList::level]
    /// yield nothing.
    ///
    /// # Examples
    ///
    /// ```
    /// use coinflip_skiplist::{Fixed, SkipList};
    ///
    /// let mut list = SkipList::with_level_generator(Fixed::new(0));
    /// list.insert(1, ());
    /// list.level_generator_mut().set(1);
    /// list.insert(2, ());
    /// assert_eq!(list.keys_at_level(0).collect::<Vec<_>>(), [&1, &2]);
    /// assert_eq!(list.keys_at_level(1).collect::<Vec<_>>(), [&2]);
    /// ```
    #[inline]
    pub fn keys_at_level(&self, level: usize) -> impl Iterator<Item = &K> {
        self.ids_at_level(level)
            .filter_map(move |id| self.nodes[id].key())
    }

    /// Render the levels of the list as a grid; see [`Grid`][crate::Grid].
    #[inline]
    #[must_use]
    pub fn render(&self) -> String
    where
        K: fmt::Display,
    {
        self.grid().to_string()
    }
}

impl<K, V, G> SkipList<K, V, G>
where
    K: Ord,
    G: LevelGenerator,
{
    /// Insert `value` under `key`, returning the previous value if the key
    /// was already present.
    ///
    /// An existing entry is updated in place and keeps its height. Otherwise
    /// a height is drawn from the level generator, the list grows to that
    /// height if needed, and a new node is spliced in at every level up to
    /// it.
    ///
    /// # Examples
    ///
    /// ```
    /// use coinflip_skiplist::SkipList;
    ///
    /// let mut list = SkipList::new();
    /// assert_eq!(list.insert(1, "Hello"), None);
    /// assert_eq!(list.insert(1, "World"), Some("Hello"));
    /// assert_eq!(list.len(), 1);
    /// ```
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        match self.locate(&key) {
            Location::Found(id) => self.nodes[id].replace_value(value),
            Location::Vacant(update) => {
                self.link(key, value, update);
                None
            }
        }
    }

    /// Insert `value` under `key` only if the key is absent.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DuplicateKey`] and leaves the list untouched if the
    /// key is already present.
    ///
    /// # Examples
    ///
    /// ```
    /// use coinflip_skiplist::{Error, SkipList};
    ///
    /// let mut list = SkipList::new();
    /// assert_eq!(list.try_insert(1, "Hello"), Ok(()));
    /// assert_eq!(list.try_insert(1, "World"), Err(Error::DuplicateKey));
    /// assert_eq!(list.get(&1), Some(&"Hello"));
    /// ```
    pub fn try_insert(&mut self, key: K, value: V) -> Result<()> {
        match self.locate(&key) {
            Location::Found(id) => {
                debug!("rejecting duplicate insert into node {id}");
                Err(Error::DuplicateKey)
            }
            Location::Vacant(update) => {
                self.link(key, value, update);
                Ok(())
            }
        }
    }

    /// Allocate a node for `(key, value)` and splice it in after the
    /// predecessors in `update`.
    #[expect(
        clippy::arithmetic_side_effects,
        reason = "The arena cannot hold usize::MAX nodes"
    )]
    fn link(&mut self, key: K, value: V, mut update: Vec<NodeId>) {
        let height = self.level_generator.level();

        if height > self.level {
            trace!("raising maximum level from {} to {height}", self.level);
            self.nodes[self.head].set_height(height);
            update.resize(height + 1, self.head);
            self.level = height;
        }

        let id = self.nodes.insert(Node::new(key, value, height));
        for (level, &prev) in update.iter().enumerate().take(height + 1) {
            let next = self.nodes[prev].next(level);
            self.nodes[id].set_next(level, next);
            self.nodes[prev].set_next(level, Some(id));
        }
        self.len += 1;
        trace!("spliced in node {id} at levels 0..={height}");
    }
}

// ///////////////////////////////////////////////
// Internal methods
// ///////////////////////////////////////////////

impl<K, V, G> SkipList<K, V, G> {
    /// Advance from `from` along `level` while the next key is strictly less
    /// than `key`.
    ///
    /// Returns the last node visited, along with the next node if its key
    /// equals `key`.
    fn seek_at_level<Q>(&self, from: NodeId, level: usize, key: &Q) -> (NodeId, Option<NodeId>)
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut current = from;
        while let Some(next) = self.nodes[current].next(level) {
            match self.nodes[next].key().map(|k| k.borrow().cmp(key)) {
                Some(Ordering::Less) => current = next,
                Some(Ordering::Equal) => return (current, Some(next)),
                Some(Ordering::Greater) | None => break,
            }
        }
        (current, None)
    }

    /// Find the node holding `key`, stopping at the first level it is seen
    /// on.
    fn find<Q>(&self, key: &Q) -> Option<NodeId>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut current = self.head;
        for level in (0..=self.level).rev() {
            let (prev, found) = self.seek_at_level(current, level, key);
            if found.is_some() {
                return found;
            }
            current = prev;
        }
        None
    }

    /// Like [`find`][Self::find], but remembers the predecessor at each level
    /// in case the key is absent.
    #[expect(
        clippy::arithmetic_side_effects,
        reason = "The level is bounded by the head's link vector"
    )]
    fn locate<Q>(&self, key: &Q) -> Location
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut update = vec![self.head; self.level + 1];
        let mut current = self.head;
        for level in (0..=self.level).rev() {
            let (prev, found) = self.seek_at_level(current, level, key);
            if let Some(id) = found {
                return Location::Found(id);
            }
            update[level] = prev;
            current = prev;
        }
        Location::Vacant(update)
    }

    /// Drop empty levels from the top of the head so that `level` is the
    /// height of the tallest node.
    #[expect(
        clippy::arithmetic_side_effects,
        reason = "The loop stops at level 0"
    )]
    fn shrink_level(&mut self) {
        let before = self.level;
        while self.level > 0 && self.nodes[self.head].next(self.level).is_none() {
            self.level -= 1;
        }
        if self.level != before {
            self.nodes[self.head].set_height(self.level);
            trace!("lowered maximum level from {before} to {}", self.level);
        }
    }

    /// The nodes linked at `level`, in order.
    pub(crate) fn ids_at_level(&self, level: usize) -> impl Iterator<Item = NodeId> {
        let first = self.nodes[self.head].next(level);
        iter::successors(first, move |&id| self.nodes[id].next(level))
    }

    pub(crate) fn node(&self, id: NodeId) -> &Node<K, V> {
        &self.nodes[id]
    }
}

#[cfg(test)]
impl<K: Ord, V, G> SkipList<K, V, G> {
    /// Checks the integrity of the skiplist.
    pub(crate) fn check(&self) {
        let head = &self.nodes[self.head];
        assert!(head.is_head());
        assert_eq!(head.height(), self.level, "head does not span every level");
        assert_eq!(self.nodes.len(), self.len + 1, "arena holds stray nodes");

        let bottom: Vec<NodeId> = self.ids_at_level(0).collect();
        assert_eq!(bottom.len(), self.len, "size does not match level 0");

        let tallest = bottom
            .iter()
            .map(|&id| self.nodes[id].height())
            .max()
            .unwrap_or(0);
        assert_eq!(tallest, self.level, "level is not the tallest height");

        for level in 0..=self.level {
            let ids: Vec<NodeId> = self.ids_at_level(level).collect();
            for pair in ids.windows(2) {
                assert!(
                    self.nodes[pair[0]].key() < self.nodes[pair[1]].key(),
                    "keys out of order at level {level}"
                );
            }
            // Every node tall enough is linked here, in level-0 order.
            let expected: Vec<NodeId> = bottom
                .iter()
                .copied()
                .filter(|&id| self.nodes[id].height() >= level)
                .collect();
            assert_eq!(ids, expected, "level {level} is not a subset of level 0");
        }
    }
}

// ///////////////////////////////////////////////
// Trait implementation
// ///////////////////////////////////////////////

impl<K, V, G> Default for SkipList<K, V, G>
where
    G: Default,
{
    #[inline]
    fn default() -> Self {
        Self::with_level_generator(G::default())
    }
}

impl<K, V, G> fmt::Debug for SkipList<K, V, G>
where
    K: fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K, V, G> Extend<(K, V)> for SkipList<K, V, G>
where
    K: Ord,
    G: LevelGenerator,
{
    #[inline]
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iterable: I) {
        for (key, value) in iterable {
            self.insert(key, value);
        }
    }
}

impl<K, V, G> FromIterator<(K, V)> for SkipList<K, V, G>
where
    K: Ord,
    G: LevelGenerator + Default,
{
    #[inline]
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iterable: I) -> Self {
        let mut list = Self::default();
        list.extend(iterable);
        list
    }
}

impl<'a, K, V, G> IntoIterator for &'a SkipList<K, V, G> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

// ///////////////////////////////////////////////
// Iterators
// ///////////////////////////////////////////////

/// Iterator over the entries of a [`SkipList`] in key order.
pub struct Iter<'a, K, V> {
    nodes: &'a Slab<Node<K, V>>,
    next: Option<NodeId>,
    remaining: usize,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.nodes.get(self.next?)?;
        self.next = node.next(0);
        self.remaining = self.remaining.saturating_sub(1);
        node.entry()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

impl<K, V> FusedIterator for Iter<'_, K, V> {}

// ////////////////////////////////////////////////////////////////////////////
// Tests
// ////////////////////////////////////////////////////////////////////////////
