use super::handle::Handle;

/// Which child slot of its parent a node occupies.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Side {
    Left,
    Right,
}

impl Side {
    #[inline]
    pub(crate) const fn opposite(self) -> Self {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }

    /// Balance adjustment when the subtree on this side grows by one level.
    ///
    /// Balance is `height(right) - height(left)`, so a taller left subtree
    /// pulls it down and a taller right subtree pushes it up.
    #[inline]
    pub(crate) const fn growth(self) -> i8 {
        match self {
            Side::Left => -1,
            Side::Right => 1,
        }
    }

    /// Balance adjustment when the subtree on this side shrinks by one level.
    #[inline]
    pub(crate) const fn shrink(self) -> i8 {
        -self.growth()
    }
}

/// A single key/value entry plus its links and AVL balance factor.
#[derive(Clone)]
pub(crate) struct AvlNode<K, V> {
    key: K,
    value: V,
    parent: Option<Handle>,
    left: Option<Handle>,
    right: Option<Handle>,
    // height(right) - height(left); in {-1, 0, 1} outside of a fixup.
    balance: i8,
}

impl<K, V> AvlNode<K, V> {
    /// Creates a detached leaf with balance 0.
    pub(crate) fn new(key: K, value: V, parent: Option<Handle>) -> Self {
        Self {
            key,
            value,
            parent,
            left: None,
            right: None,
            balance: 0,
        }
    }

    #[inline]
    pub(crate) fn key(&self) -> &K {
        &self.key
    }

    #[inline]
    pub(crate) fn value(&self) -> &V {
        &self.value
    }

    #[inline]
    pub(crate) fn value_mut(&mut self) -> &mut V {
        &mut self.value
    }

    /// Splits a borrowed node into its key and a mutable value reference.
    #[inline]
    pub(crate) fn entry_mut(&mut self) -> (&K, &mut V) {
        (&self.key, &mut self.value)
    }

    pub(crate) fn into_entry(self) -> (K, V) {
        (self.key, self.value)
    }

    /// Exchanges key and value with `other`; links and balance stay put.
    pub(crate) fn swap_payload(&mut self, other: &mut Self) {
        core::mem::swap(&mut self.key, &mut other.key);
        core::mem::swap(&mut self.value, &mut other.value);
    }

    #[inline]
    pub(crate) fn parent(&self) -> Option<Handle> {
        self.parent
    }

    #[inline]
    pub(crate) fn set_parent(&mut self, parent: Option<Handle>) {
        self.parent = parent;
    }

    #[inline]
    pub(crate) fn left(&self) -> Option<Handle> {
        self.left
    }

    #[inline]
    pub(crate) fn set_left(&mut self, left: Option<Handle>) {
        self.left = left;
    }

    #[inline]
    pub(crate) fn right(&self) -> Option<Handle> {
        self.right
    }

    #[inline]
    pub(crate) fn set_right(&mut self, right: Option<Handle>) {
        self.right = right;
    }

    #[inline]
    pub(crate) fn child(&self, side: Side) -> Option<Handle> {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    #[inline]
    pub(crate) fn set_child(&mut self, side: Side, child: Option<Handle>) {
        match side {
            Side::Left => self.left = child,
            Side::Right => self.right = child,
        }
    }

    pub(crate) fn has_two_children(&self) -> bool {
        self.left.is_some() && self.right.is_some()
    }

    #[inline]
    pub(crate) fn balance(&self) -> i8 {
        self.balance
    }

    #[inline]
    pub(crate) fn set_balance(&mut self, balance: i8) {
        self.balance = balance;
    }

    #[inline]
    pub(crate) fn update_balance(&mut self, diff: i8) {
        self.balance += diff;
    }
}
