//! This crate provides an ordered set and map based on an array-packed B-Tree.
//!
//! Each node stores its keys in a sorted array, and the identifiers of its
//! children in another. Nodes are allocated in a slab, and hold no reference
//! to their parent: insertion and deletion are iterative, and record the path
//! they follow from the root in a reusable [`Stack`](stack::Stack).
//!
//! The branching factor of the tree is configurable with an [`Order`].
//!
//! # Example
//!
//! ```
//! use btree_stack::{BTreeSet, Order};
//!
//! let mut set = BTreeSet::with_order(Order::new(4).unwrap());
//! set.extend([10, 20, 5, 6, 12, 30, 7, 17]);
//! set.remove(&10);
//!
//! let keys: Vec<_> = set.iter().cloned().collect();
//! assert_eq!(keys, [5, 6, 7, 12, 17, 20, 30]);
//! ```
//!
//! # Fail-fast cursors
//!
//! Besides the usual iterators, which borrow the tree,
//! a [`Cursor`](generic::set::Cursor) walks the tree without borrowing it
//! and detects any modification made in the meantime.
//!
//! # Sharing
//!
//! [`ConcurrentMap`] wraps any [`AssociativeMap`] behind a read-write lock.
pub mod concurrent;
mod error;
pub mod generic;
mod order;
pub mod stack;
pub mod utils;

pub use concurrent::{AssociativeMap, ConcurrentMap};
pub use error::Error;
pub use order::{Order, DEFAULT_MAX_KEY};

/// B-Tree map based on `Slab`.
#[cfg(feature = "std-slab")]
pub type BTreeMap<K, V> = generic::BTreeMap<K, V, slab::Slab<generic::Node<generic::map::Item<K, V>>>>;

/// B-Tree set based on `Slab`.
#[cfg(feature = "std-slab")]
pub type BTreeSet<T> = generic::BTreeSet<T, slab::Slab<generic::Node<T>>>;
