use super::AvlTreeMap;
use crate::raw::RawAvlTree;

impl<K, V> AvlTreeMap<K, V> {
    /// Creates an empty map with room for at least `capacity` entries before the node arena
    /// has to grow.
    ///
    /// This is an extension and is not part of the standard `BTreeMap` API.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_tree::AvlTreeMap;
    ///
    /// let map: AvlTreeMap<i32, i32> = AvlTreeMap::with_capacity(32);
    /// assert!(map.is_empty());
    /// assert!(map.capacity() >= 32);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(capacity) for memory allocation.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        AvlTreeMap {
            raw: RawAvlTree::with_capacity(capacity),
        }
    }

    /// Returns the number of node slots the map has allocated.
    ///
    /// This is an extension and is not part of the standard `BTreeMap` API.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_tree::AvlTreeMap;
    ///
    /// let mut map = AvlTreeMap::with_capacity(4);
    /// map.insert(1, "a");
    /// assert!(map.capacity() >= 4);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.raw.capacity()
    }

    /// Releases vacant node slots at the end of the arena and shrinks its allocation.
    ///
    /// Slots freed by removals in the middle of the arena stay reserved for reuse.
    ///
    /// This is an extension and is not part of the standard `BTreeMap` API.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_tree::AvlTreeMap;
    ///
    /// let mut map: AvlTreeMap<i32, i32> = (0..100).map(|i| (i, i)).collect();
    /// while map.len() > 10 {
    ///     map.pop_last();
    /// }
    /// map.shrink_to_fit();
    /// assert!(map.capacity() < 100);
    /// assert_eq!(map.len(), 10);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(n)
    pub fn shrink_to_fit(&mut self) {
        self.raw.shrink_to_fit();
    }
}
