//! A standalone predicate over plain binary trees: do all root-to-leaf paths
//! have the same length?
//!
//! This has nothing to do with [`AvlTreeMap`](crate::AvlTreeMap); it works on
//! its own owned node type.

use alloc::boxed::Box;
use alloc::collections::VecDeque;

/// A node of a plain, unbalanced binary tree.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TreeNode<T> {
    pub value: T,
    pub left: Option<Box<TreeNode<T>>>,
    pub right: Option<Box<TreeNode<T>>>,
}

impl<T> TreeNode<T> {
    /// A node with no children.
    #[must_use]
    pub const fn leaf(value: T) -> Self {
        Self {
            value,
            left: None,
            right: None,
        }
    }

    /// A node with only a left child.
    #[must_use]
    pub fn with_left(value: T, left: TreeNode<T>) -> Self {
        Self {
            value,
            left: Some(Box::new(left)),
            right: None,
        }
    }

    /// A node with only a right child.
    #[must_use]
    pub fn with_right(value: T, right: TreeNode<T>) -> Self {
        Self {
            value,
            left: None,
            right: Some(Box::new(right)),
        }
    }

    /// A node with both children.
    #[must_use]
    pub fn with_children(value: T, left: TreeNode<T>, right: TreeNode<T>) -> Self {
        Self {
            value,
            left: Some(Box::new(left)),
            right: Some(Box::new(right)),
        }
    }
}

/// Number of nodes on the longest root-to-leaf path; 0 for an empty tree.
///
/// # Examples
///
/// ```
/// use avl_tree::equal_paths::{TreeNode, height};
///
/// assert_eq!(height::<()>(None), 0);
/// let tree = TreeNode::with_left(1, TreeNode::leaf(2));
/// assert_eq!(height(Some(&tree)), 2);
/// ```
#[must_use]
pub fn height<T>(root: Option<&TreeNode<T>>) -> usize {
    let Some(root) = root else {
        return 0;
    };

    // Level-order sweep; the number of levels is the height.
    let mut height = 0;
    let mut level: VecDeque<&TreeNode<T>> = VecDeque::new();
    level.push_back(root);
    while !level.is_empty() {
        height += 1;
        for _ in 0..level.len() {
            if let Some(node) = level.pop_front() {
                level.extend(node.left.as_deref());
                level.extend(node.right.as_deref());
            }
        }
    }
    height
}

/// Reports whether every leaf of the tree sits at the same depth.
///
/// - An empty tree, or a single leaf, is trivially `true`.
/// - At a node with two children the answer is whether both subtrees have
///   the same height.
/// - At a node with one child only that child's paths exist, so the answer is
///   the answer for that child. A bare chain of single children therefore
///   always reports `true`.
///
/// # Examples
///
/// ```
/// use avl_tree::equal_paths::{TreeNode, equal_paths};
///
/// //     1
/// //    / \
/// //   2   3
/// //  /
/// // 4
/// let uneven = TreeNode::with_children(1, TreeNode::with_left(2, TreeNode::leaf(4)), TreeNode::leaf(3));
/// assert!(!equal_paths(Some(&uneven)));
///
/// let chain = TreeNode::with_left(1, TreeNode::with_left(2, TreeNode::leaf(3)));
/// assert!(equal_paths(Some(&chain)));
/// ```
#[must_use]
pub fn equal_paths<T>(root: Option<&TreeNode<T>>) -> bool {
    let mut current = root;
    while let Some(node) = current {
        match (node.left.as_deref(), node.right.as_deref()) {
            (Some(left), Some(right)) => return height(Some(left)) == height(Some(right)),
            (Some(only), None) | (None, Some(only)) => current = Some(only),
            (None, None) => return true,
        }
    }
    true
}
