//! Red-black tree collections for Rust.
//!
//! This crate provides a balanced binary search tree, [`RbTree`], and four
//! ordered containers built on it:
//!
//! - [`RbSet`] - unique elements
//! - [`RbMultiSet`] - elements that may repeat
//! - [`RbMap`] - unique keys mapped to values
//! - [`RbMultiMap`] - keys that may map to several values
//!
//! Equal elements in the multi containers keep their insertion order. Every
//! container sorts by a pluggable [`Compare`] (the natural [`Ord`] order by
//! default) and exposes its tree through `as_tree()` for position-based
//! navigation with [`Position`].
//!
//! # Example
//!
//! ```
//! use rb_tree::{RbMap, RbMultiSet};
//!
//! let mut scores = RbMap::new();
//! scores.insert("Alice", 100);
//! scores.insert("Bob", 85);
//! scores.insert("Carol", 92);
//!
//! assert_eq!(scores.get(&"Bob"), Some(&85));
//! assert_eq!(scores.first_key_value(), Some((&"Alice", &100)));
//!
//! let grades: RbMultiSet<u32> = scores.values().copied().chain([85]).collect();
//! assert_eq!(grades.count(&85), 2);
//! ```
//!
//! # Positions
//!
//! ```
//! use rb_tree::RbSet;
//!
//! let set = RbSet::from([10, 20, 30]);
//! let tree = set.as_tree();
//!
//! let pos = tree.lower_bound(&15);
//! assert_eq!(tree.get(pos), Some(&20));
//! assert_eq!(tree.get(tree.next(pos)), Some(&30));
//! assert!(tree.next(tree.next(pos)).is_end());
//! ```
//!
//! # Features
//!
//! - **`no_std` compatible** - Only requires `alloc`, no standard library dependency
//! - **Fallible insertion** - every insert has a `try_*` form returning [`Error`]
//!   instead of panicking when the tree is full or allocation fails
//! - **Stable positions** - inserting never invalidates a [`Position`]; erasing
//!   invalidates only the erased one
//!
//! # Implementation
//!
//! Nodes live in a slot arena and refer to each other by index, with parent
//! links for O(1) amortized stepping in either direction. A header records
//! the root and both extreme nodes, so `first`, `last` and the iterators start
//! in O(1). Insertion and deletion rebalance with the classic recoloring and
//! rotation cases, keeping the height within `2 log2(n + 1)`.

#![no_std]
// These forbid rules and lint groups are meant to be very restrictive.
// NOTE: Mutable iteration over the arena needs a small amount of unsafe code.
// #![forbid(unsafe_code)]
#![forbid(keyword_idents)]
#![forbid(non_ascii_idents)]
#![forbid(unreachable_pub)]
#![warn(clippy::all)]
#![warn(clippy::cargo)]
#![warn(clippy::pedantic)]
// Enable coverage attributes for nightly builds.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

extern crate alloc;

mod compare;
mod error;
mod key_of;
mod raw;

pub mod rb_map;
pub mod rb_set;
pub mod rb_tree;

pub use compare::{Compare, FnCompare, Natural, Reversed};
pub use error::Error;
pub use key_of::{First, Identity, KeyOf};
pub use rb_map::{RbMap, RbMultiMap};
pub use rb_set::{RbMultiSet, RbSet};
pub use rb_tree::{Position, RbTree};
