use std::mem;

/// Stable index of a node inside the list's arena.
pub(crate) type NodeId = usize;

// ////////////////////////////////////////////////////////////////////////////
// Node
// ////////////////////////////////////////////////////////////////////////////

/// Nodes make up the skiplist. They live in an arena owned by the list and
/// refer to one another by [`NodeId`], so there are no backward links and no
/// cycles.
///
/// A node of height `h` has `h + 1` forward links, one for each level it
/// occupies, stored in a vector indexed by level. `None` marks the end of the
/// list at that level.
#[derive(Clone, Debug)]
pub(crate) struct Node<K, V> {
    // The entry should never be `None`, with the sole exception being the
    // head node.
    entry: Option<(K, V)>,
    // Links to the next node at the respective level. This vector *must* be
    // of length `self.height() + 1`.
    links: Vec<Option<NodeId>>,
}

impl<K, V> Node<K, V> {
    /// Create a new head node spanning level 0 only.
    pub(crate) fn head() -> Self {
        Node {
            entry: None,
            links: vec![None],
        }
    }

    /// Create a new node of the given height with all links unset.
    pub(crate) fn new(key: K, value: V, height: usize) -> Self {
        Node {
            entry: Some((key, value)),
            links: vec![None; height.saturating_add(1)],
        }
    }

    /// Returns `true` if the node is the head sentinel.
    pub(crate) fn is_head(&self) -> bool {
        self.entry.is_none()
    }

    /// The highest level this node is linked at.
    pub(crate) fn height(&self) -> usize {
        self.links.len().saturating_sub(1)
    }

    pub(crate) fn key(&self) -> Option<&K> {
        self.entry.as_ref().map(|(key, _)| key)
    }

    pub(crate) fn value(&self) -> Option<&V> {
        self.entry.as_ref().map(|(_, value)| value)
    }

    pub(crate) fn value_mut(&mut self) -> Option<&mut V> {
        self.entry.as_mut().map(|(_, value)| value)
    }

    pub(crate) fn entry(&self) -> Option<(&K, &V)> {
        self.entry.as_ref().map(|(key, value)| (key, value))
    }

    /// Swap in a new value, returning the old one.
    pub(crate) fn replace_value(&mut self, value: V) -> Option<V> {
        self.value_mut().map(|old| mem::replace(old, value))
    }

    /// Consumes the node returning the entry it contains.
    pub(crate) fn into_entry(self) -> Option<(K, V)> {
        self.entry
    }

    /// The next node at `level`, or `None` at the end of the level or if this
    /// node does not reach `level`.
    pub(crate) fn next(&self, level: usize) -> Option<NodeId> {
        self.links.get(level).copied().flatten()
    }

    /// Point the link at `level` to `next`.
    ///
    /// `level` must not exceed the node's height.
    pub(crate) fn set_next(&mut self, level: usize, next: Option<NodeId>) {
        debug_assert!(level < self.links.len(), "link above the node's height");
        if let Some(link) = self.links.get_mut(level) {
            *link = next;
        }
    }

    /// Resize the link vector so the node spans levels `0..=height`.
    ///
    /// New levels start past-the-end; removed levels are dropped. Only the
    /// head is resized after creation.
    pub(crate) fn set_height(&mut self, height: usize) {
        self.links.resize(height.saturating_add(1), None);
    }
}
