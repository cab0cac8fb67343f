use core::borrow::Borrow;
use core::cmp::Ordering;

use tracing::trace;

use super::handle::Handle;
use super::node::{AvlNode, Side};
use super::raw_avl_tree::RawAvlTree;

impl<K, V> RawAvlTree<K, V> {
    /// Lifts the right child of `node` into its place.
    ///
    /// `node` becomes the left child of its former right child, which takes
    /// over `node`'s parent link (or the root). The right child's old left
    /// subtree moves across to become `node`'s right subtree. Balance factors
    /// are left for the caller to set.
    pub(crate) fn rotate_left(&mut self, node: Handle) {
        let pivot = self.node(node).right().expect("`RawAvlTree::rotate_left()` - `node` has no right child!");
        let parent = self.node(node).parent();
        let inner = self.node(pivot).left();

        self.replace_child(parent, node, Some(pivot));
        let lifted = self.node_mut(pivot);
        lifted.set_parent(parent);
        lifted.set_left(Some(node));

        let lowered = self.node_mut(node);
        lowered.set_parent(Some(pivot));
        lowered.set_right(inner);
        if let Some(inner) = inner {
            self.node_mut(inner).set_parent(Some(node));
        }

        trace!(node = %node, pivot = %pivot, "rotate left");
    }

    /// Mirror image of [`rotate_left`](Self::rotate_left): lifts the left
    /// child of `node` into its place.
    pub(crate) fn rotate_right(&mut self, node: Handle) {
        let pivot = self.node(node).left().expect("`RawAvlTree::rotate_right()` - `node` has no left child!");
        let parent = self.node(node).parent();
        let inner = self.node(pivot).right();

        self.replace_child(parent, node, Some(pivot));
        let lifted = self.node_mut(pivot);
        lifted.set_parent(parent);
        lifted.set_right(Some(node));

        let lowered = self.node_mut(node);
        lowered.set_parent(Some(pivot));
        lowered.set_left(inner);
        if let Some(inner) = inner {
            self.node_mut(inner).set_parent(Some(node));
        }

        trace!(node = %node, pivot = %pivot, "rotate right");
    }

    /// Rotates `node`'s child on the `heavy` side up into `node`'s place.
    fn rotate_up(&mut self, node: Handle, heavy: Side) {
        match heavy {
            Side::Left => self.rotate_right(node),
            Side::Right => self.rotate_left(node),
        }
    }

    /// Restores balance after `child` was attached below `parent` and
    /// `parent`'s balance already accounts for it.
    ///
    /// Walks upward while subtree heights keep growing; the first rotation
    /// restores the pre-insert height of that subtree, so nothing above it
    /// changes.
    fn insert_fix(&mut self, mut parent: Handle, mut child: Handle) {
        while let Some(grandparent) = self.node(parent).parent() {
            let side = self.side_of(grandparent, parent);
            let node = self.node_mut(grandparent);
            node.update_balance(side.growth());
            let balance = node.balance();

            if balance == 0 {
                return;
            }
            if balance == side.growth() {
                child = parent;
                parent = grandparent;
                continue;
            }

            // |balance| == 2, leaning toward `side`.
            if self.node(parent).child(side) == Some(child) {
                self.rotate_up(grandparent, side);
                self.node_mut(parent).set_balance(0);
                self.node_mut(grandparent).set_balance(0);
            } else {
                let pivot_balance = self.node(child).balance();
                self.rotate_up(parent, side.opposite());
                self.rotate_up(grandparent, side);

                let (parent_balance, grandparent_balance) = if pivot_balance == side.growth() {
                    (0, side.shrink())
                } else if pivot_balance == 0 {
                    (0, 0)
                } else {
                    (side.growth(), 0)
                };
                self.node_mut(parent).set_balance(parent_balance);
                self.node_mut(grandparent).set_balance(grandparent_balance);
                self.node_mut(child).set_balance(0);
            }
            return;
        }
    }

    /// Restores balance after the subtree hanging below `start` on one side
    /// lost a level. `diff` is the balance change that implies for `start`:
    /// `+1` when its left side shrank, `-1` when its right side shrank.
    ///
    /// Unlike insertion this may rotate at every level up to the root.
    fn remove_fix(&mut self, start: Option<Handle>, diff: i8) {
        let mut current = start;
        let mut diff = diff;

        while let Some(node) = current {
            let parent = self.node(node).parent();
            let next_diff = parent.map_or(0, |p| self.side_of(p, node).shrink());

            // The side that is now (possibly too) tall.
            let heavy = if diff < 0 { Side::Left } else { Side::Right };
            let balance = self.node(node).balance() + diff;

            if balance == 2 * heavy.growth() {
                let child = self.node(node).child(heavy).expect("`RawAvlTree::remove_fix()` - heavy side is empty!");
                let child_balance = self.node(child).balance();

                if child_balance == heavy.growth() {
                    self.rotate_up(node, heavy);
                    self.node_mut(node).set_balance(0);
                    self.node_mut(child).set_balance(0);
                } else if child_balance == 0 {
                    // The lifted child keeps the subtree at its old height.
                    self.rotate_up(node, heavy);
                    self.node_mut(node).set_balance(heavy.growth());
                    self.node_mut(child).set_balance(heavy.shrink());
                    trace!(node = %node, "remove fixup stopped after single rotation");
                    return;
                } else {
                    let grandchild = self
                        .node(child)
                        .child(heavy.opposite())
                        .expect("`RawAvlTree::remove_fix()` - zig-zag without inner grandchild!");
                    let grandchild_balance = self.node(grandchild).balance();
                    self.rotate_up(child, heavy.opposite());
                    self.rotate_up(node, heavy);

                    let (node_balance, child_balance) = if grandchild_balance == heavy.growth() {
                        (heavy.shrink(), 0)
                    } else if grandchild_balance == 0 {
                        (0, 0)
                    } else {
                        (0, heavy.growth())
                    };
                    self.node_mut(node).set_balance(node_balance);
                    self.node_mut(child).set_balance(child_balance);
                    self.node_mut(grandchild).set_balance(0);
                }
            } else if balance == heavy.growth() {
                // Was level, now leans: height unchanged from above.
                self.node_mut(node).set_balance(balance);
                return;
            } else {
                self.node_mut(node).set_balance(0);
            }

            current = parent;
            diff = next_diff;
        }
    }

    /// Unlinks and frees the node at `target`, returning the entry that was
    /// stored there before any swap.
    pub(crate) fn remove_handle(&mut self, target: Handle) -> (K, V) {
        let mut target = target;
        if self.node(target).has_two_children() {
            let predecessor =
                self.predecessor(target).expect("`RawAvlTree::remove_handle()` - two children but no predecessor!");
            trace!(target = %target, predecessor = %predecessor, "removing through predecessor");
            self.node_swap(target, predecessor);
            target = predecessor;
        }

        let node = self.node(target);
        let parent = node.parent();
        let child = node.left().or(node.right());
        let diff = parent.map_or(0, |p| self.side_of(p, target).shrink());

        if let Some(child) = child {
            self.node_mut(child).set_parent(parent);
        }
        self.replace_child(parent, target, child);
        let entry = self.free(target).into_entry();

        self.remove_fix(parent, diff);
        entry
    }

    /// Removes the smallest entry.
    pub(crate) fn pop_first(&mut self) -> Option<(K, V)> {
        let first = self.first()?;
        Some(self.remove_handle(first))
    }

    /// Removes the largest entry.
    pub(crate) fn pop_last(&mut self) -> Option<(K, V)> {
        let last = self.last()?;
        Some(self.remove_handle(last))
    }
}

impl<K: Ord, V> RawAvlTree<K, V> {
    /// Inserts a key-value pair, rebalancing as needed.
    ///
    /// If the key is already present its value is replaced in place and the
    /// old value returned; the tree shape does not change and the stored key
    /// is kept.
    pub(crate) fn insert(&mut self, key: K, value: V) -> Option<V> {
        let Some(root) = self.root else {
            self.root = Some(self.alloc(AvlNode::new(key, value, None)));
            return None;
        };

        let mut current = root;
        let side = loop {
            let node = self.node_mut(current);
            let side = match key.cmp(node.key()) {
                Ordering::Equal => return Some(core::mem::replace(node.value_mut(), value)),
                Ordering::Less => Side::Left,
                Ordering::Greater => Side::Right,
            };
            match node.child(side) {
                Some(next) => current = next,
                None => break side,
            }
        };

        let child = self.alloc(AvlNode::new(key, value, Some(current)));
        let parent = self.node_mut(current);
        parent.set_child(side, Some(child));

        if parent.balance() == 0 {
            parent.update_balance(side.growth());
            self.insert_fix(current, child);
        } else {
            // It had one child and now has two.
            parent.set_balance(0);
        }
        None
    }

    /// Removes `key`, returning the stored key and value if it was present.
    pub(crate) fn remove_entry<Q>(&mut self, key: &Q) -> Option<(K, V)>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let target = self.search(key)?;
        Some(self.remove_handle(target))
    }

    pub(crate) fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.remove_entry(key).map(|(_, value)| value)
    }
}
