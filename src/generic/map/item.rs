use std::{cmp::Ordering, fmt};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Map entry stored in the tree.
///
/// Items are compared by key only: the value is carried along.
#[derive(Clone, Copy, Debug)]
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize))]
pub struct Item<K, V> {
	key: K,
	value: V,
}

impl<K, V> Item<K, V> {
	#[inline]
	pub fn new(key: K, value: V) -> Item<K, V> {
		Item { key, value }
	}

	#[inline]
	pub fn key(&self) -> &K {
		&self.key
	}

	#[inline]
	pub fn value(&self) -> &V {
		&self.value
	}

	#[inline]
	pub fn value_mut(&mut self) -> &mut V {
		&mut self.value
	}

	/// Replace the value, returning the previous one.
	#[inline]
	pub fn set_value(&mut self, value: V) -> V {
		std::mem::replace(&mut self.value, value)
	}

	#[inline]
	pub fn as_pair(&self) -> (&K, &V) {
		(&self.key, &self.value)
	}

	#[inline]
	pub fn into_value(self) -> V {
		self.value
	}

	#[inline]
	pub fn into_pair(self) -> (K, V) {
		(self.key, self.value)
	}
}

impl<K: PartialEq, V> PartialEq for Item<K, V> {
	#[inline]
	fn eq(&self, other: &Item<K, V>) -> bool {
		self.key.eq(&other.key)
	}
}

impl<K: Eq, V> Eq for Item<K, V> {}

impl<K: Ord, V> PartialOrd for Item<K, V> {
	#[inline]
	fn partial_cmp(&self, other: &Item<K, V>) -> Option<Ordering> {
		Some(self.cmp(other))
	}
}

impl<K: Ord, V> Ord for Item<K, V> {
	#[inline]
	fn cmp(&self, other: &Item<K, V>) -> Ordering {
		self.key.cmp(&other.key)
	}
}

impl<K: fmt::Display, V: fmt::Display> fmt::Display for Item<K, V> {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		write!(f, "{}: {}", self.key, self.value)
	}
}
