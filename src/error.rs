//! Error types.

use thiserror::Error;

/// The error returned by strict lookups such as
/// [`AvlTreeMap::try_get`](crate::AvlTreeMap::try_get) when the requested key
/// is not in the map.
///
/// Insertion and removal never produce it: `insert` always succeeds and
/// `remove` of an absent key simply returns `None`.
///
/// # Examples
///
/// ```
/// use avl_tree::{AvlTreeMap, KeyNotFound};
///
/// let map: AvlTreeMap<i32, &str> = AvlTreeMap::new();
/// assert_eq!(map.try_get(&1), Err(KeyNotFound));
/// assert_eq!(KeyNotFound.to_string(), "key not found");
/// ```
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash, Error)]
#[error("key not found")]
pub struct KeyNotFound;
