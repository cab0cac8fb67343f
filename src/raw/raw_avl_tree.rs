use core::borrow::Borrow;
use core::cmp::Ordering;

use alloc::vec::Vec;
use smallvec::SmallVec;

use super::arena::Arena;
use super::handle::Handle;
use super::node::{AvlNode, Side};

/// The core AVL tree backing `AvlTreeMap`.
///
/// Every node lives in one arena and refers to its neighbours by handle, so
/// the parent/child cycle needs no reference counting or raw pointers. This
/// file holds the plain binary-search-tree behaviour; the rebalancing layer
/// is in `rebalance.rs`.
#[derive(Clone)]
pub(crate) struct RawAvlTree<K, V> {
    /// Arena storing all tree nodes.
    nodes: Arena<AvlNode<K, V>>,
    /// Handle to the root node, if the tree is non-empty.
    pub(super) root: Option<Handle>,
}

impl<K, V> RawAvlTree<K, V> {
    /// Creates a new, empty tree.
    pub(crate) const fn new() -> Self {
        Self {
            nodes: Arena::new(),
            root: None,
        }
    }

    /// Creates a new tree with room for `capacity` nodes.
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Arena::with_capacity(capacity),
            root: None,
        }
    }

    /// Returns the number of key-value pairs in the tree.
    pub(crate) const fn len(&self) -> usize {
        self.nodes.len()
    }

    pub(crate) const fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub(crate) fn capacity(&self) -> usize {
        self.nodes.capacity()
    }

    pub(crate) fn shrink_to_fit(&mut self) {
        self.nodes.shrink_to_fit();
    }

    /// Drops every node.
    pub(crate) fn clear(&mut self) {
        self.nodes.clear();
        self.root = None;
    }

    #[cfg(test)]
    pub(crate) fn root(&self) -> Option<Handle> {
        self.root
    }

    #[inline]
    pub(crate) fn node(&self, handle: Handle) -> &AvlNode<K, V> {
        self.nodes.get(handle)
    }

    #[inline]
    pub(crate) fn node_mut(&mut self, handle: Handle) -> &mut AvlNode<K, V> {
        self.nodes.get_mut(handle)
    }

    /// Allocates a node without linking it into the tree.
    pub(super) fn alloc(&mut self, node: AvlNode<K, V>) -> Handle {
        self.nodes.alloc(node)
    }

    /// Frees a node that has already been unlinked.
    pub(super) fn free(&mut self, handle: Handle) -> AvlNode<K, V> {
        self.nodes.take(handle)
    }

    /// Which side of `parent` the node `child` hangs from.
    pub(super) fn side_of(&self, parent: Handle, child: Handle) -> Side {
        if self.nodes.get(parent).left() == Some(child) {
            Side::Left
        } else {
            Side::Right
        }
    }

    /// Points whatever referenced `old` (its parent's child slot, or the root)
    /// at `new` instead. Does not touch `new`'s parent link.
    pub(super) fn replace_child(&mut self, parent: Option<Handle>, old: Handle, new: Option<Handle>) {
        match parent {
            None => self.root = new,
            Some(p) => {
                let side = self.side_of(p, old);
                self.nodes.get_mut(p).set_child(side, new);
            }
        }
    }

    /// Leftmost node of the subtree rooted at `handle`.
    pub(crate) fn min_of(&self, mut handle: Handle) -> Handle {
        while let Some(left) = self.nodes.get(handle).left() {
            handle = left;
        }
        handle
    }

    /// Rightmost node of the subtree rooted at `handle`.
    pub(crate) fn max_of(&self, mut handle: Handle) -> Handle {
        while let Some(right) = self.nodes.get(handle).right() {
            handle = right;
        }
        handle
    }

    /// Node holding the smallest key.
    pub(crate) fn first(&self) -> Option<Handle> {
        self.root.map(|root| self.min_of(root))
    }

    /// Node holding the largest key.
    pub(crate) fn last(&self) -> Option<Handle> {
        self.root.map(|root| self.max_of(root))
    }

    /// In-order predecessor of `handle`, or `None` if it holds the minimum.
    ///
    /// With a left subtree this is that subtree's maximum; otherwise it is the
    /// first ancestor reached by stepping up from a right child.
    pub(crate) fn predecessor(&self, handle: Handle) -> Option<Handle> {
        if let Some(left) = self.nodes.get(handle).left() {
            return Some(self.max_of(left));
        }

        let mut current = handle;
        while let Some(parent) = self.nodes.get(current).parent() {
            if self.nodes.get(parent).right() == Some(current) {
                return Some(parent);
            }
            current = parent;
        }
        None
    }

    /// In-order successor of `handle`, or `None` if it holds the maximum.
    pub(crate) fn successor(&self, handle: Handle) -> Option<Handle> {
        if let Some(right) = self.nodes.get(handle).right() {
            return Some(self.min_of(right));
        }

        let mut current = handle;
        while let Some(parent) = self.nodes.get(current).parent() {
            if self.nodes.get(parent).left() == Some(current) {
                return Some(parent);
            }
            current = parent;
        }
        None
    }

    /// Exchanges the entries stored at two tree positions.
    ///
    /// A handle names a position in the tree, so swapping the key/value
    /// payloads relocates each entry to the other position. Links and
    /// balance factors belong to the position and stay where they are.
    pub(super) fn node_swap(&mut self, a: Handle, b: Handle) {
        if a == b {
            return;
        }
        let (first, second) = self.nodes.get_pair_mut(a, b);
        first.swap_payload(second);
    }

    /// Height of the tree in nodes, 0 when empty.
    ///
    /// Follows the taller child at each level as recorded by the balance
    /// factors, so this is O(log n) and trusts the stored balances.
    pub(crate) fn height(&self) -> usize {
        let mut height = 0;
        let mut current = self.root;
        while let Some(handle) = current {
            height += 1;
            let node = self.nodes.get(handle);
            current = if node.balance() > 0 { node.right() } else { node.left() };
        }
        height
    }

    /// Recomputes every subtree height from scratch and reports whether each
    /// node's two subtrees differ in height by at most one.
    ///
    /// Unlike [`height`](Self::height) this ignores the stored balance
    /// factors entirely.
    pub(crate) fn is_balanced(&self) -> bool {
        let Some(root) = self.root else {
            return true;
        };

        // Iterative post-order: a node is revisited once both children have
        // pushed their heights.
        let mut pending: SmallVec<[(Handle, bool); 64]> = SmallVec::new();
        let mut heights: SmallVec<[usize; 64]> = SmallVec::new();
        pending.push((root, false));

        while let Some((handle, children_done)) = pending.pop() {
            let node = self.nodes.get(handle);
            if children_done {
                let right = if node.right().is_some() { heights.pop().unwrap_or(0) } else { 0 };
                let left = if node.left().is_some() { heights.pop().unwrap_or(0) } else { 0 };
                if left.abs_diff(right) > 1 {
                    return false;
                }
                heights.push(1 + left.max(right));
            } else {
                pending.push((handle, true));
                if let Some(right) = node.right() {
                    pending.push((right, false));
                }
                if let Some(left) = node.left() {
                    pending.push((left, false));
                }
            }
        }
        true
    }

    /// Handles of every node in key order.
    pub(crate) fn in_order(&self) -> Vec<Handle> {
        let mut order = Vec::with_capacity(self.len());
        let mut current = self.first();
        while let Some(handle) = current {
            order.push(handle);
            current = self.successor(handle);
        }
        order
    }

    /// Mutable access to every entry at once, in key order.
    pub(crate) fn entries_mut(&mut self) -> Vec<(&K, &mut V)> {
        let order = self.in_order();
        let mut slots: Vec<Option<&mut AvlNode<K, V>>> = self.nodes.slots_mut().collect();
        order
            .into_iter()
            .filter_map(|handle| slots[handle.to_index()].take())
            .map(AvlNode::entry_mut)
            .collect()
    }

    /// Moves every entry out in key order, leaving the tree empty.
    pub(crate) fn drain_to_vec(&mut self) -> Vec<(K, V)> {
        let order = self.in_order();
        let entries = order.into_iter().map(|handle| self.nodes.take(handle).into_entry()).collect();
        self.clear();
        entries
    }
}

impl<K: Ord, V> RawAvlTree<K, V> {
    /// Finds the node holding `key`.
    pub(crate) fn search<Q>(&self, key: &Q) -> Option<Handle>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let mut current = self.root;
        while let Some(handle) = current {
            let node = self.nodes.get(handle);
            current = match key.cmp(node.key().borrow()) {
                Ordering::Less => node.left(),
                Ordering::Greater => node.right(),
                Ordering::Equal => return Some(handle),
            };
        }
        None
    }

    pub(crate) fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.search(key).map(|handle| self.nodes.get(handle).value())
    }

    pub(crate) fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let handle = self.search(key)?;
        Some(self.nodes.get_mut(handle).value_mut())
    }

    pub(crate) fn get_key_value<Q>(&self, key: &Q) -> Option<(&K, &V)>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let node = self.nodes.get(self.search(key)?);
        Some((node.key(), node.value()))
    }
}

#[cfg(test)]
impl<K: Ord + core::fmt::Debug, V> RawAvlTree<K, V> {
    /// Panics unless every structural and AVL invariant holds: parent links
    /// agree with child links, keys are strictly ordered, every stored balance
    /// equals the true height difference and lies in {-1, 0, 1}, and the node
    /// count matches `len`.
    pub(crate) fn assert_invariants(&self) {
        fn walk<K: Ord + core::fmt::Debug, V>(
            tree: &RawAvlTree<K, V>,
            handle: Handle,
            count: &mut usize,
        ) -> usize {
            *count += 1;
            let node = tree.node(handle);
            let mut heights = [0usize; 2];
            for (slot, child) in [node.left(), node.right()].into_iter().enumerate() {
                if let Some(child) = child {
                    let child_node = tree.node(child);
                    assert_eq!(child_node.parent(), Some(handle), "broken parent link under {:?}", node.key());
                    if slot == 0 {
                        assert!(child_node.key() < node.key(), "left child out of order at {:?}", node.key());
                    } else {
                        assert!(child_node.key() > node.key(), "right child out of order at {:?}", node.key());
                    }
                    heights[slot] = walk(tree, child, count);
                }
            }
            #[allow(clippy::cast_possible_wrap, clippy::cast_possible_truncation)]
            let actual = heights[1] as i64 - heights[0] as i64;
            assert_eq!(i64::from(node.balance()), actual, "stale balance at {:?}", node.key());
            assert!(actual.abs() <= 1, "AVL property violated at {:?}", node.key());
            1 + heights[0].max(heights[1])
        }

        let mut count = 0;
        if let Some(root) = self.root {
            assert_eq!(self.node(root).parent(), None, "root has a parent");
            let height = walk(self, root, &mut count);
            assert_eq!(height, self.height(), "balance-guided height disagrees");
        }
        assert_eq!(count, self.len(), "reachable nodes != len");
        assert!(self.is_balanced());
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use alloc::vec;

    /// Builds the tree by hand so the base operations are tested without the
    /// rebalancing layer:
    ///
    /// ```text
    ///         40
    ///       /    \
    ///     20      60
    ///    /  \       \
    ///  10    30      70
    /// ```
    fn hand_built() -> (RawAvlTree<i32, &'static str>, [Handle; 6]) {
        let mut tree = RawAvlTree::new();
        let n40 = tree.alloc(AvlNode::new(40, "forty", None));
        let n20 = tree.alloc(AvlNode::new(20, "twenty", Some(n40)));
        let n60 = tree.alloc(AvlNode::new(60, "sixty", Some(n40)));
        let n10 = tree.alloc(AvlNode::new(10, "ten", Some(n20)));
        let n30 = tree.alloc(AvlNode::new(30, "thirty", Some(n20)));
        let n70 = tree.alloc(AvlNode::new(70, "seventy", Some(n60)));
        tree.root = Some(n40);
        tree.node_mut(n40).set_left(Some(n20));
        tree.node_mut(n40).set_right(Some(n60));
        tree.node_mut(n20).set_left(Some(n10));
        tree.node_mut(n20).set_right(Some(n30));
        tree.node_mut(n60).set_right(Some(n70));
        tree.node_mut(n60).set_balance(1);
        (tree, [n10, n20, n30, n40, n60, n70])
    }

    #[test]
    fn hand_built_tree_is_valid() {
        let (tree, _) = hand_built();
        tree.assert_invariants();
        assert_eq!(tree.len(), 6);
        assert_eq!(tree.height(), 3);
    }

    #[test]
    fn search_finds_every_key() {
        let (tree, [n10, n20, n30, n40, n60, n70]) = hand_built();
        assert_eq!(tree.search(&10), Some(n10));
        assert_eq!(tree.search(&20), Some(n20));
        assert_eq!(tree.search(&30), Some(n30));
        assert_eq!(tree.search(&40), Some(n40));
        assert_eq!(tree.search(&60), Some(n60));
        assert_eq!(tree.search(&70), Some(n70));
        assert_eq!(tree.search(&35), None);
        assert_eq!(tree.get(&30), Some(&"thirty"));
        assert_eq!(tree.get_key_value(&70), Some((&70, &"seventy")));
    }

    #[test]
    fn predecessor_descends_into_left_subtree() {
        let (tree, [_, _, n30, n40, _, _]) = hand_built();
        assert_eq!(tree.predecessor(n40), Some(n30));
    }

    #[test]
    fn predecessor_climbs_past_left_children() {
        let (tree, [n10, n20, n30, n40, n60, n70]) = hand_built();
        assert_eq!(tree.predecessor(n60), Some(n40));
        assert_eq!(tree.predecessor(n30), Some(n20));
        assert_eq!(tree.predecessor(n70), Some(n60));
        assert_eq!(tree.predecessor(n20), Some(n10));
        // The minimum has none.
        assert_eq!(tree.predecessor(n10), None);
    }

    #[test]
    fn successor_mirrors_predecessor() {
        let (tree, [n10, n20, n30, n40, n60, n70]) = hand_built();
        assert_eq!(tree.successor(n10), Some(n20));
        assert_eq!(tree.successor(n30), Some(n40));
        assert_eq!(tree.successor(n40), Some(n60));
        assert_eq!(tree.successor(n70), None);
    }

    #[test]
    fn first_last_and_in_order() {
        let (tree, [n10, n20, n30, n40, n60, n70]) = hand_built();
        assert_eq!(tree.first(), Some(n10));
        assert_eq!(tree.last(), Some(n70));
        assert_eq!(tree.in_order(), vec![n10, n20, n30, n40, n60, n70]);

        let empty: RawAvlTree<i32, ()> = RawAvlTree::new();
        assert_eq!(empty.first(), None);
        assert_eq!(empty.last(), None);
        assert!(empty.in_order().is_empty());
        assert_eq!(empty.height(), 0);
        assert!(empty.is_balanced());
    }

    #[test]
    fn node_swap_moves_entries_but_not_shape() {
        let (mut tree, [_, _, n30, n40, n60, _]) = hand_built();
        tree.node_swap(n40, n30);

        assert_eq!(tree.node(n40).key(), &30);
        assert_eq!(tree.node(n40).value(), &"thirty");
        assert_eq!(tree.node(n30).key(), &40);
        // Position-owned state is untouched.
        assert!(tree.node(n40).left().is_some());
        assert_eq!(tree.node(n60).balance(), 1);
        assert_eq!(tree.root(), Some(n40));
    }

    #[test]
    fn replace_child_updates_root_and_parents() {
        let (mut tree, [n10, n20, _, n40, n60, n70]) = hand_built();

        tree.replace_child(Some(n60), n70, None);
        assert_eq!(tree.node(n60).right(), None);

        tree.replace_child(Some(n20), n10, None);
        assert_eq!(tree.node(n20).left(), None);

        tree.replace_child(None, n40, Some(n20));
        assert_eq!(tree.root(), Some(n20));
    }

    #[test]
    fn is_balanced_detects_height_gap() {
        let (mut tree, [_, _, _, _, _, n70]) = hand_built();
        assert!(tree.is_balanced());

        // Hang 80 below 70: node 60 now has a 0-vs-2 height gap.
        let n80 = tree.alloc(AvlNode::new(80, "eighty", Some(n70)));
        tree.node_mut(n70).set_right(Some(n80));
        assert!(!tree.is_balanced());
    }

    #[test]
    fn drain_yields_sorted_entries_and_empties() {
        let (mut tree, _) = hand_built();
        let keys: Vec<i32> = tree.drain_to_vec().into_iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec![10, 20, 30, 40, 60, 70]);
        assert!(tree.is_empty());
        assert_eq!(tree.root(), None);
    }

    #[test]
    fn entries_mut_visits_in_key_order() {
        let (mut tree, _) = hand_built();
        for (i, (_, value)) in tree.entries_mut().into_iter().enumerate() {
            *value = ["a", "b", "c", "d", "e", "f"][i];
        }
        assert_eq!(tree.get(&10), Some(&"a"));
        assert_eq!(tree.get(&70), Some(&"f"));
    }
}
