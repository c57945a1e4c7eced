use crate::{
	order::DEFAULT_MAX_KEY,
	utils::{binary_search_by, cut, insert_at, move_to},
	Order,
};
use smallvec::SmallVec;
use std::{borrow::Borrow, cmp::Ordering};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

mod addr;

pub use addr::Address;

/// Packed key array of a node.
pub type Keys<K> = SmallVec<[K; DEFAULT_MAX_KEY]>;

/// Packed child identifier array of a node.
pub type Children = SmallVec<[usize; DEFAULT_MAX_KEY + 1]>;

/// Type of the value returned by `Node::add` when the node splits.
///
/// It includes the promoted key and the new right sibling,
/// to be inserted in the parent node.
pub type Split<K> = (K, Node<K>);

/// B-tree node.
///
/// Keys are stored in ascending order, left-packed.
/// A leaf has no children,
/// an internal node has exactly one more child than keys.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize))]
pub struct Node<K> {
	keys: Keys<K>,
	children: Children,
}

impl<K> Node<K> {
	/// Creates an empty leaf.
	#[inline]
	pub fn leaf(order: &Order) -> Node<K> {
		Node {
			keys: SmallVec::with_capacity(order.max_key()),
			children: SmallVec::new(),
		}
	}

	/// Creates an internal node with a single key and two children.
	#[inline]
	pub fn binary(order: &Order, left_id: usize, median: K, right_id: usize) -> Node<K> {
		let mut node = Node {
			keys: SmallVec::with_capacity(order.max_key()),
			children: SmallVec::with_capacity(order.max_children()),
		};

		node.keys.push(median);
		node.children.push(left_id);
		node.children.push(right_id);
		node
	}

	#[inline]
	pub fn key_count(&self) -> usize {
		self.keys.len()
	}

	#[inline]
	pub fn child_count(&self) -> usize {
		self.children.len()
	}

	#[inline]
	pub fn is_leaf(&self) -> bool {
		self.children.is_empty()
	}

	#[inline]
	pub fn is_full(&self, order: &Order) -> bool {
		self.keys.len() >= order.max_key()
	}

	/// Checks if the node holds less keys than required for a non-root node.
	#[inline]
	pub fn is_underflowing(&self, order: &Order) -> bool {
		self.keys.len() < order.half_key()
	}

	#[inline]
	pub fn keys(&self) -> &[K] {
		self.keys.as_ref()
	}

	#[inline]
	pub fn key(&self, offset: usize) -> Option<&K> {
		self.keys.get(offset)
	}

	/// Modifying a key in such a way that its order with regard to other keys changes is a logical error.
	#[inline]
	pub fn key_mut(&mut self, offset: usize) -> Option<&mut K> {
		self.keys.get_mut(offset)
	}

	#[inline]
	pub fn children(&self) -> &[usize] {
		self.children.as_ref()
	}

	/// Panics if the node is a leaf or `index` is out of bounds.
	#[inline]
	pub fn child_id(&self, index: usize) -> usize {
		self.children[index]
	}

	#[inline]
	pub fn child_id_opt(&self, index: usize) -> Option<usize> {
		self.children.get(index).copied()
	}

	#[inline]
	pub fn first_child_id(&self) -> Option<usize> {
		self.children.first().copied()
	}

	#[inline]
	pub fn last_child_id(&self) -> Option<usize> {
		self.children.last().copied()
	}

	/// Find the offset of the key matching the given probe.
	///
	/// `probe` returns the ordering of a stored key relative to the searched one.
	/// If no key matches, returns `Err(i)` where `i` is the number of keys strictly less
	/// than the searched one: the index of the child that may contain it,
	/// or the insertion offset if this is a leaf.
	#[inline]
	pub fn offset_by<F>(&self, probe: F) -> Result<usize, usize>
	where
		F: FnMut(&K) -> Ordering,
	{
		binary_search_by(&self.keys, probe)
	}

	/// Find the offset of the key matching the given key.
	///
	/// See [`Node::offset_by`].
	#[inline]
	pub fn offset_of<Q: ?Sized>(&self, key: &Q) -> Result<usize, usize>
	where
		K: Borrow<Q>,
		Q: Ord,
	{
		self.offset_by(|k| Ord::cmp(k.borrow(), key))
	}

	/// Locate the given key in a single integer.
	///
	/// If the key is stored at offset `m`, returns `m - MAX_KEY`, which is always negative.
	/// Otherwise returns the number of keys strictly less than `key`.
	/// Use [`Order::decode_location`] to get back the offset.
	#[inline]
	pub fn index_of_greatest_less_than<Q: ?Sized>(&self, key: &Q, order: &Order) -> isize
	where
		K: Borrow<Q>,
		Q: Ord,
	{
		match self.offset_of(key) {
			Ok(m) => order.encode_found(m),
			Err(i) => i as isize,
		}
	}

	/// Add a key at the given insertion index.
	///
	/// If the key comes from a split child, `right_child` is the new sibling of the child,
	/// placed right after the key.
	///
	/// If the node is full, it is split and the promoted key is returned along with the
	/// new right node. Otherwise `None` is returned.
	#[inline]
	pub fn add(
		&mut self,
		index: usize,
		key: K,
		right_child: Option<usize>,
		order: &Order,
	) -> Option<Split<K>> {
		if self.is_full(order) {
			return Some(self.split(index, key, right_child, order));
		}

		if let Some(child_id) = right_child {
			insert_at(&mut self.children, index + 1, child_id)
		}

		insert_at(&mut self.keys, index, key);
		None
	}

	/// Split a full node while inserting `key` at `index`.
	///
	/// This node keeps `HALF_KEY` keys, the returned right node gets the others but one,
	/// which is promoted.
	fn split(&mut self, index: usize, key: K, right_child: Option<usize>, order: &Order) -> Split<K> {
		let pivot = order.center_children();
		let key_count = self.keys.len();
		let mut right = Node::leaf(order);

		let promoted = if index <= order.center_key() {
			// the key goes left, the last key of the left half goes up.
			move_to(&mut self.keys, &mut right.keys, pivot, key_count, 0);
			let promoted = cut(&mut self.keys, order.center_key());
			insert_at(&mut self.keys, index, key);
			promoted
		} else if index == pivot {
			// the key itself goes up.
			move_to(&mut self.keys, &mut right.keys, pivot, key_count, 0);
			key
		} else {
			// the key goes right, the pivot goes up.
			move_to(&mut self.keys, &mut right.keys, pivot + 1, key_count, 0);
			insert_at(&mut right.keys, index - pivot - 1, key);
			cut(&mut self.keys, pivot)
		};

		if let Some(child_id) = right_child {
			let child_count = self.children.len();
			right.children.reserve(order.max_children());

			if index <= order.center_key() {
				move_to(&mut self.children, &mut right.children, pivot, child_count, 0);
				insert_at(&mut self.children, index + 1, child_id);
			} else {
				move_to(&mut self.children, &mut right.children, pivot + 1, child_count, 0);
				insert_at(&mut right.children, index - pivot, child_id);
			}
		}

		(promoted, right)
	}

	/// Remove the key at the given offset.
	///
	/// Panics if `offset` is out of bounds.
	#[inline]
	pub fn remove_key(&mut self, offset: usize) -> K {
		cut(&mut self.keys, offset)
	}

	/// Replace the key at the given offset, returning the previous one.
	///
	/// Panics if `offset` is out of bounds.
	#[inline]
	pub fn replace_key(&mut self, offset: usize, key: K) -> K {
		std::mem::replace(&mut self.keys[offset], key)
	}

	/// Remove the first key, and the first child if this is an internal node.
	///
	/// Panics if the node is empty.
	#[inline]
	pub fn pop_first(&mut self) -> (K, Option<usize>) {
		let key = cut(&mut self.keys, 0);
		let child_id = if self.is_leaf() {
			None
		} else {
			Some(cut(&mut self.children, 0))
		};

		(key, child_id)
	}

	/// Remove the last key, and the last child if this is an internal node.
	///
	/// Panics if the node is empty.
	#[inline]
	pub fn pop_last(&mut self) -> (K, Option<usize>) {
		let last = self.keys.len() - 1;
		let key = cut(&mut self.keys, last);
		(key, self.children.pop())
	}

	/// Put a key (and child) before every other.
	///
	/// It is assumed that the node will not overflow.
	#[inline]
	pub fn push_first(&mut self, key: K, child_id: Option<usize>) {
		insert_at(&mut self.keys, 0, key);
		if let Some(child_id) = child_id {
			insert_at(&mut self.children, 0, child_id)
		}
	}

	/// Put a key (and child) after every other.
	///
	/// It is assumed that the node will not overflow.
	#[inline]
	pub fn push_last(&mut self, key: K, child_id: Option<usize>) {
		self.keys.push(key);
		if let Some(child_id) = child_id {
			self.children.push(child_id)
		}
	}

	/// Remove the key at `from - 1` and the child at `from`.
	///
	/// This is used after the child at `from` has been joined to its left sibling.
	/// Returns the removed key and child id.
	#[inline]
	pub fn shrink(&mut self, from: usize) -> (K, usize) {
		let key = cut(&mut self.keys, from - 1);
		let child_id = cut(&mut self.children, from);
		(key, child_id)
	}

	/// Append the separator and every key and child of `other` (its right sibling) to this node.
	#[inline]
	pub fn join(&mut self, separator: K, mut other: Node<K>) {
		self.keys.push(separator);
		self.keys.append(&mut other.keys);
		self.children.append(&mut other.children);
	}

	/// Write the label of the node in the DOT format.
	///
	/// Requires the `dot` feature.
	#[cfg(feature = "dot")]
	#[inline]
	pub fn dot_write_label<W: std::io::Write>(&self, f: &mut W) -> std::io::Result<()>
	where
		K: std::fmt::Display,
	{
		for (i, key) in self.keys.iter().enumerate() {
			if i > 0 {
				write!(f, "|")?;
			}

			write!(f, "{}", key)?;
		}

		Ok(())
	}

	#[cfg(debug_assertions)]
	pub fn validate(&self, order: &Order, is_root: bool, min: Option<&K>, max: Option<&K>)
	where
		K: Ord,
	{
		if self.keys.len() > order.max_key() {
			panic!("node is overflowing")
		}

		if !is_root && self.is_underflowing(order) {
			panic!("node is underflowing")
		}

		if !self.is_leaf() && self.children.len() != self.keys.len() + 1 {
			panic!("internal node has {} keys but {} children", self.keys.len(), self.children.len())
		}

		if !self.keys.windows(2).all(|w| w[0] < w[1]) {
			panic!("node keys are not sorted")
		}

		if let (Some(min), Some(key)) = (min, self.keys.first()) {
			if min >= key {
				panic!("node key is less than left separator")
			}
		}

		if let (Some(max), Some(key)) = (max, self.keys.last()) {
			if max <= key {
				panic!("node key is greater than right separator")
			}
		}
	}
}
