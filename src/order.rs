use crate::Error;
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Default maximum number of keys per node.
pub const DEFAULT_MAX_KEY: usize = 8;

/// Branching configuration of a B-Tree.
///
/// Holds the maximum number of keys a node can store and derives every
/// threshold used by the split, join and borrow operations from it.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize))]
pub struct Order {
	max_key: usize,
}

impl Order {
	/// Creates a new order with at most `max_key` keys per node.
	///
	/// Fails if `max_key` is less than 2, or greater than `isize::MAX` since
	/// found locations are encoded as negative offsets.
	///
	/// # Example
	///
	/// ```
	/// use btree_stack::{Error, Order};
	///
	/// let order = Order::new(4).unwrap();
	/// assert_eq!(order.half_key(), 2);
	/// assert_eq!(Order::new(1), Err(Error::InvalidOrder(1)));
	/// ```
	#[inline]
	pub fn new(max_key: usize) -> Result<Order, Error> {
		if !(2..=isize::MAX as usize).contains(&max_key) {
			Err(Error::InvalidOrder(max_key))
		} else {
			Ok(Order { max_key })
		}
	}

	/// Maximum number of keys in a node.
	#[inline]
	pub fn max_key(&self) -> usize {
		self.max_key
	}

	/// Maximum number of children of an internal node.
	#[inline]
	pub fn max_children(&self) -> usize {
		self.max_key + 1
	}

	/// Minimum number of keys a non-root node holds once an operation completes.
	#[inline]
	pub fn half_key(&self) -> usize {
		self.max_key / 2
	}

	/// Position of the last key kept by the left node when splitting.
	///
	/// Always valid since [`Order::new`] guarantees at least 2 keys per node.
	#[inline]
	pub fn center_key(&self) -> usize {
		self.max_key / 2 - 1
	}

	/// Position of the pivot key when splitting.
	#[inline]
	pub fn center_children(&self) -> usize {
		self.center_key() + 1
	}

	#[inline]
	pub fn half_children(&self) -> usize {
		(self.max_children() + 1) / 2
	}

	/// Encodes the position of an exact match, as returned by
	/// [`Node::index_of_greatest_less_than`](crate::generic::Node::index_of_greatest_less_than).
	///
	/// The result is always negative.
	#[inline]
	pub fn encode_found(&self, index: usize) -> isize {
		index as isize - self.max_key as isize
	}

	/// Decodes an encoded location.
	///
	/// Returns `Ok(index)` for an exact match, or `Err(index)` with the number
	/// of keys strictly less than the searched key.
	#[inline]
	pub fn decode_location(&self, encoded: isize) -> Result<usize, usize> {
		if encoded < 0 {
			Ok((encoded + self.max_key as isize) as usize)
		} else {
			Err(encoded as usize)
		}
	}
}

impl Default for Order {
	#[inline]
	fn default() -> Self {
		Order {
			max_key: DEFAULT_MAX_KEY,
		}
	}
}

impl fmt::Display for Order {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		write!(
			f,
			"MAX_KEY={} HALF_KEY={} CENTER_KEY={} CENTER_CHILDREN={} MAX_CHILDREN={} HALF_CHILDREN={}",
			self.max_key,
			self.half_key(),
			self.center_key(),
			self.center_children(),
			self.max_children(),
			self.half_children()
		)
	}
}
