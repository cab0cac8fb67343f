//! Arena-backed AVL ordered map for Rust.
//!
//! This crate provides [`AvlTreeMap`], an ordered map with an API modeled on the standard
//! library's `BTreeMap`, implemented as a height-balanced binary search tree. Every node
//! carries a balance factor in {-1, 0, 1}; insertions and removals restore it with single
//! and double rotations, so the height of a map with `n` entries stays O(log n).
//!
//! It also provides [`equal_paths`](equal_paths::equal_paths), a small predicate over plain
//! boxed binary trees.
//!
//! # Example
//!
//! ```
//! use avl_tree::AvlTreeMap;
//!
//! let mut scores = AvlTreeMap::new();
//! scores.insert("Alice", 100);
//! scores.insert("Bob", 85);
//! scores.insert("Carol", 92);
//!
//! assert_eq!(scores.get(&"Bob"), Some(&85));
//! assert_eq!(scores.len(), 3);
//!
//! // Inserting an existing key replaces the value and returns the old one.
//! assert_eq!(scores.insert("Bob", 90), Some(85));
//!
//! // Iteration is in key order.
//! let names: Vec<_> = scores.keys().copied().collect();
//! assert_eq!(names, ["Alice", "Bob", "Carol"]);
//!
//! assert!(scores.is_balanced());
//! ```
//!
//! # Features
//!
//! - **`no_std` compatible** - Only requires `alloc`, no standard library dependency
//! - **Familiar API** - Mirrors the `std::collections::BTreeMap` methods and traits
//! - **No unsafe code** - Nodes live in an arena and link to each other by index
//! - **Traceable** - Rotations and removal fixups emit [`tracing`] events at `TRACE` level
//!
//! # Implementation
//!
//! Nodes keep parent links, so rebalancing walks back up from the changed leaf without
//! recursion or an explicit path stack. Removing a node with two children moves its in-order
//! predecessor's entry into it and unlinks the predecessor's slot instead.

#![no_std]
// These forbid rules and lint groups are meant to be very restrictive.
#![forbid(unsafe_code)]
#![forbid(keyword_idents)]
#![forbid(non_ascii_idents)]
#![forbid(unreachable_pub)]
#![warn(clippy::all)]
#![warn(clippy::cargo)]
#![warn(clippy::pedantic)]
// Enable coverage attributes for nightly builds.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

extern crate alloc;

mod raw;

pub mod avl_tree_map;
pub mod equal_paths;
pub mod error;

pub use avl_tree_map::AvlTreeMap;
pub use error::KeyNotFound;
