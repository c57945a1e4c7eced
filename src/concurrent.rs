//! Multi-reader, single-writer wrapper around an associative map.
use crate::generic::{self, map::Item, Node};
use cc_traits::{SimpleCollectionMut, SimpleCollectionRef, SlabMut};
use parking_lot::{MappedRwLockReadGuard, RwLock, RwLockReadGuard};
use std::{
	collections,
	hash::{BuildHasher, Hash},
};

/// Associative container operations shared by the maps a [`ConcurrentMap`] can wrap.
pub trait AssociativeMap {
	type Key;
	type Value;

	fn len(&self) -> usize;

	#[inline]
	fn is_empty(&self) -> bool {
		self.len() == 0
	}

	fn contains_key(&self, key: &Self::Key) -> bool;

	fn contains_value(&self, value: &Self::Value) -> bool
	where
		Self::Value: PartialEq;

	fn get(&self, key: &Self::Key) -> Option<&Self::Value>;

	/// Inserts a key-value pair, returning the previous value of the key if any.
	fn insert(&mut self, key: Self::Key, value: Self::Value) -> Option<Self::Value>;

	fn remove(&mut self, key: &Self::Key) -> Option<Self::Value>;

	fn clear(&mut self);
}

impl<K: Ord, V, C: SlabMut<Node<Item<K, V>>>> AssociativeMap for generic::BTreeMap<K, V, C>
where
	C: SimpleCollectionRef,
	C: SimpleCollectionMut,
	C: cc_traits::Clear,
{
	type Key = K;
	type Value = V;

	#[inline]
	fn len(&self) -> usize {
		generic::BTreeMap::len(self)
	}

	#[inline]
	fn contains_key(&self, key: &K) -> bool {
		generic::BTreeMap::contains_key(self, key)
	}

	#[inline]
	fn contains_value(&self, value: &V) -> bool
	where
		V: PartialEq,
	{
		generic::BTreeMap::contains_value(self, value)
	}

	#[inline]
	fn get(&self, key: &K) -> Option<&V> {
		generic::BTreeMap::get(self, key)
	}

	#[inline]
	fn insert(&mut self, key: K, value: V) -> Option<V> {
		generic::BTreeMap::insert(self, key, value)
	}

	#[inline]
	fn remove(&mut self, key: &K) -> Option<V> {
		generic::BTreeMap::remove(self, key)
	}

	#[inline]
	fn clear(&mut self) {
		generic::BTreeMap::clear(self)
	}
}

impl<K: Eq + Hash, V, S: BuildHasher> AssociativeMap for collections::HashMap<K, V, S> {
	type Key = K;
	type Value = V;

	#[inline]
	fn len(&self) -> usize {
		collections::HashMap::len(self)
	}

	#[inline]
	fn contains_key(&self, key: &K) -> bool {
		collections::HashMap::contains_key(self, key)
	}

	#[inline]
	fn contains_value(&self, value: &V) -> bool
	where
		V: PartialEq,
	{
		self.values().any(|v| v == value)
	}

	#[inline]
	fn get(&self, key: &K) -> Option<&V> {
		collections::HashMap::get(self, key)
	}

	#[inline]
	fn insert(&mut self, key: K, value: V) -> Option<V> {
		collections::HashMap::insert(self, key, value)
	}

	#[inline]
	fn remove(&mut self, key: &K) -> Option<V> {
		collections::HashMap::remove(self, key)
	}

	#[inline]
	fn clear(&mut self) {
		collections::HashMap::clear(self)
	}
}

impl<K: Ord, V> AssociativeMap for collections::BTreeMap<K, V> {
	type Key = K;
	type Value = V;

	#[inline]
	fn len(&self) -> usize {
		collections::BTreeMap::len(self)
	}

	#[inline]
	fn contains_key(&self, key: &K) -> bool {
		collections::BTreeMap::contains_key(self, key)
	}

	#[inline]
	fn contains_value(&self, value: &V) -> bool
	where
		V: PartialEq,
	{
		self.values().any(|v| v == value)
	}

	#[inline]
	fn get(&self, key: &K) -> Option<&V> {
		collections::BTreeMap::get(self, key)
	}

	#[inline]
	fn insert(&mut self, key: K, value: V) -> Option<V> {
		collections::BTreeMap::insert(self, key, value)
	}

	#[inline]
	fn remove(&mut self, key: &K) -> Option<V> {
		collections::BTreeMap::remove(self, key)
	}

	#[inline]
	fn clear(&mut self) {
		collections::BTreeMap::clear(self)
	}
}

/// Associative map shared between threads.
///
/// Accessors hold a shared lock, mutators an exclusive one,
/// each for the whole operation.
/// Any number of readers may proceed together, a writer excludes every other access.
///
/// # Example
///
/// ```
/// use btree_stack::{BTreeMap, ConcurrentMap};
///
/// let map = ConcurrentMap::new(BTreeMap::new());
///
/// std::thread::scope(|s| {
///     for t in 0..4 {
///         let map = &map;
///         s.spawn(move || {
///             for i in 0..100 {
///                 map.insert(t * 100 + i, i);
///             }
///         });
///     }
/// });
///
/// assert_eq!(map.len(), 400);
/// assert_eq!(map.get(&142).as_deref(), Some(&42));
/// ```
#[derive(Default, Debug)]
pub struct ConcurrentMap<M> {
	inner: RwLock<M>,
}

impl<M> ConcurrentMap<M> {
	#[inline]
	pub fn new(map: M) -> ConcurrentMap<M> {
		ConcurrentMap {
			inner: RwLock::new(map),
		}
	}

	/// Locks the map for reading, giving access to the whole wrapped map.
	///
	/// Writers are blocked until the returned guard is dropped.
	#[inline]
	pub fn read(&self) -> RwLockReadGuard<M> {
		self.inner.read()
	}

	/// Mutable access to the wrapped map, without locking.
	#[inline]
	pub fn get_mut(&mut self) -> &mut M {
		self.inner.get_mut()
	}

	#[inline]
	pub fn into_inner(self) -> M {
		self.inner.into_inner()
	}
}

impl<M: AssociativeMap> ConcurrentMap<M> {
	#[inline]
	pub fn len(&self) -> usize {
		self.inner.read().len()
	}

	#[inline]
	pub fn is_empty(&self) -> bool {
		self.inner.read().is_empty()
	}

	#[inline]
	pub fn contains_key(&self, key: &M::Key) -> bool {
		self.inner.read().contains_key(key)
	}

	#[inline]
	pub fn contains_value(&self, value: &M::Value) -> bool
	where
		M::Value: PartialEq,
	{
		self.inner.read().contains_value(value)
	}

	/// Returns the value of the given key.
	///
	/// The map stays locked for reading until the returned guard is dropped.
	#[inline]
	pub fn get(&self, key: &M::Key) -> Option<MappedRwLockReadGuard<M::Value>> {
		RwLockReadGuard::try_map(self.inner.read(), |map| map.get(key)).ok()
	}

	#[inline]
	pub fn insert(&self, key: M::Key, value: M::Value) -> Option<M::Value> {
		self.inner.write().insert(key, value)
	}

	#[inline]
	pub fn remove(&self, key: &M::Key) -> Option<M::Value> {
		self.inner.write().remove(key)
	}

	/// Inserts every given entry, under a single exclusive lock.
	#[inline]
	pub fn extend<I>(&self, entries: I)
	where
		I: IntoIterator<Item = (M::Key, M::Value)>,
	{
		let mut map = self.inner.write();
		for (key, value) in entries {
			map.insert(key, value);
		}
	}

	#[inline]
	pub fn clear(&self) {
		self.inner.write().clear()
	}
}

impl<M> From<M> for ConcurrentMap<M> {
	#[inline]
	fn from(map: M) -> Self {
		ConcurrentMap::new(map)
	}
}
