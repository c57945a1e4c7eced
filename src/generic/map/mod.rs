use crate::{
	generic::{
		node::Node,
		set::{self, BTreeSet},
	},
	Error, Order,
};
use cc_traits::{SimpleCollectionMut, SimpleCollectionRef, Slab, SlabMut};
use std::{
	borrow::Borrow,
	fmt,
	iter::{ExactSizeIterator, FromIterator, FusedIterator},
	ops::Index,
};

mod item;

pub use item::Item;

/// A map based on an array-packed B-Tree.
///
/// The map is a [`BTreeSet`] of [`Item`]s, ordered by key only.
///
/// # Example
///
/// ```
/// use btree_stack::BTreeMap;
///
/// // type inference lets us omit an explicit type signature (which
/// // would be `BTreeMap<&str, &str>` in this example).
/// let mut movie_reviews = BTreeMap::new();
///
/// // review some movies.
/// movie_reviews.insert("Office Space",       "Deals with real issues in the workplace.");
/// movie_reviews.insert("Pulp Fiction",       "Masterpiece.");
/// movie_reviews.insert("The Godfather",      "Very enjoyable.");
/// movie_reviews.insert("The Blues Brothers", "Eye lyked it a lot.");
///
/// // check for a specific one.
/// if !movie_reviews.contains_key("Les Misérables") {
///     println!("We've got {} reviews, but Les Misérables ain't one.",
///              movie_reviews.len());
/// }
///
/// // oops, this review has a lot of spelling mistakes, let's delete it.
/// movie_reviews.remove("The Blues Brothers");
///
/// // look up the values associated with some keys.
/// let to_find = ["Up!", "Office Space"];
/// for movie in &to_find {
///     match movie_reviews.get(movie) {
///        Some(review) => println!("{}: {}", movie, review),
///        None => println!("{} is unreviewed.", movie)
///     }
/// }
///
/// // Look up the value for a key (will panic if the key is not found).
/// println!("Movie review: {}", movie_reviews["Office Space"]);
///
/// // iterate over everything.
/// for (movie, review) in &movie_reviews {
///     println!("{}: \"{}\"", movie, review);
/// }
/// ```
///
/// Updating the value of an existing key, either with [`BTreeMap::insert`]
/// or [`BTreeMap::get_mut`], counts as a modification:
/// cursors created before the update fail.
#[derive(Clone)]
pub struct BTreeMap<K, V, C> {
	set: BTreeSet<Item<K, V>, C>,
}

impl<K, V, C: Slab<Node<Item<K, V>>>> BTreeMap<K, V, C>
where
	C: SimpleCollectionRef,
{
	/// Returns the number of elements in the map.
	///
	/// # Example
	///
	/// ```
	/// use btree_stack::BTreeMap;
	///
	/// let mut a = BTreeMap::new();
	/// assert_eq!(a.len(), 0);
	/// a.insert(1, "a");
	/// assert_eq!(a.len(), 1);
	/// ```
	#[inline]
	pub fn len(&self) -> usize {
		self.set.len()
	}

	/// Returns `true` if the map contains no elements.
	#[inline]
	pub fn is_empty(&self) -> bool {
		self.set.is_empty()
	}

	/// Number of levels of the underlying tree.
	#[inline]
	pub fn height(&self) -> usize {
		self.set.height()
	}

	#[inline]
	pub fn order(&self) -> &Order {
		self.set.order()
	}

	/// Underlying set of items.
	#[inline]
	pub fn as_set(&self) -> &BTreeSet<Item<K, V>, C> {
		&self.set
	}

	/// Returns a reference to the value corresponding to the key.
	///
	/// # Example
	///
	/// ```
	/// use btree_stack::BTreeMap;
	///
	/// let mut map = BTreeMap::new();
	/// map.insert(1, "a");
	/// assert_eq!(map.get(&1), Some(&"a"));
	/// assert_eq!(map.get(&2), None);
	/// ```
	#[inline]
	pub fn get<Q: ?Sized>(&self, key: &Q) -> Option<&V>
	where
		K: Borrow<Q>,
		Q: Ord,
	{
		self.get_key_value(key).map(|(_, v)| v)
	}

	/// Returns the key-value pair corresponding to the supplied key.
	///
	/// # Example
	///
	/// ```
	/// use btree_stack::BTreeMap;
	///
	/// let mut map = BTreeMap::new();
	/// map.insert(1, "a");
	/// assert_eq!(map.get_key_value(&1), Some((&1, &"a")));
	/// assert_eq!(map.get_key_value(&2), None);
	/// ```
	#[inline]
	pub fn get_key_value<Q: ?Sized>(&self, key: &Q) -> Option<(&K, &V)>
	where
		K: Borrow<Q>,
		Q: Ord,
	{
		self.set
			.address_by(|item| Ord::cmp(item.key().borrow(), key))
			.and_then(|addr| self.set.item(addr))
			.map(Item::as_pair)
	}

	/// Returns `true` if the map contains a value for the specified key.
	#[inline]
	pub fn contains_key<Q: ?Sized>(&self, key: &Q) -> bool
	where
		K: Borrow<Q>,
		Q: Ord,
	{
		self.get(key).is_some()
	}

	/// Returns `true` if at least one key maps to the given value.
	///
	/// This visits every entry.
	#[inline]
	pub fn contains_value(&self, value: &V) -> bool
	where
		V: PartialEq,
	{
		self.values().any(|v| v == value)
	}

	/// Gets an iterator over the entries of the map, sorted by key.
	///
	/// # Example
	///
	/// ```
	/// use btree_stack::BTreeMap;
	///
	/// let mut map = BTreeMap::new();
	/// map.insert(3, "c");
	/// map.insert(2, "b");
	/// map.insert(1, "a");
	///
	/// let (first_key, first_value) = map.iter().next().unwrap();
	/// assert_eq!((*first_key, *first_value), (1, "a"));
	/// ```
	#[inline]
	pub fn iter(&self) -> Iter<K, V, C> {
		Iter {
			inner: self.set.iter(),
		}
	}

	/// Gets an iterator over the keys of the map, in sorted order.
	///
	/// # Example
	///
	/// ```
	/// use btree_stack::BTreeMap;
	///
	/// let mut a = BTreeMap::new();
	/// a.insert(2, "b");
	/// a.insert(1, "a");
	///
	/// let keys: Vec<_> = a.keys().cloned().collect();
	/// assert_eq!(keys, [1, 2]);
	/// ```
	#[inline]
	pub fn keys(&self) -> Keys<K, V, C> {
		Keys { inner: self.iter() }
	}

	/// Gets an iterator over the values of the map, in order by key.
	///
	/// # Example
	///
	/// ```
	/// use btree_stack::BTreeMap;
	///
	/// let mut a = BTreeMap::new();
	/// a.insert(1, "hello");
	/// a.insert(2, "goodbye");
	///
	/// let values: Vec<&str> = a.values().cloned().collect();
	/// assert_eq!(values, ["hello", "goodbye"]);
	/// ```
	#[inline]
	pub fn values(&self) -> Values<K, V, C> {
		Values { inner: self.iter() }
	}

	/// Creates a fail-fast cursor positioned before the first entry.
	#[inline]
	pub fn cursor(&self) -> Cursor {
		Cursor {
			inner: self.set.cursor(),
		}
	}

	/// Write the tree in the DOT graph description language.
	///
	/// Requires the `dot` feature.
	#[cfg(feature = "dot")]
	#[inline]
	pub fn dot_write<W: std::io::Write>(&self, f: &mut W) -> std::io::Result<()>
	where
		K: std::fmt::Display,
		V: std::fmt::Display,
	{
		self.set.dot_write(f)
	}

	#[cfg(debug_assertions)]
	#[inline]
	pub fn validate(&self)
	where
		K: Ord,
	{
		self.set.validate()
	}
}

impl<K, V, C: SlabMut<Node<Item<K, V>>>> BTreeMap<K, V, C>
where
	C: SimpleCollectionRef,
	C: SimpleCollectionMut,
{
	/// Makes a new, empty map with the default order.
	#[inline]
	pub fn new() -> BTreeMap<K, V, C>
	where
		C: Default,
	{
		Self::with_order(Order::default())
	}

	/// Makes a new, empty map with the given order.
	#[inline]
	pub fn with_order(order: Order) -> BTreeMap<K, V, C>
	where
		C: Default,
	{
		BTreeMap {
			set: BTreeSet::with_order(order),
		}
	}

	/// Inserts a key-value pair into the map.
	///
	/// If the map did not have this key present, `None` is returned.
	/// Otherwise the value is updated in place and the old value is returned.
	/// The key is not updated.
	///
	/// # Example
	///
	/// ```
	/// use btree_stack::BTreeMap;
	///
	/// let mut map = BTreeMap::new();
	/// assert_eq!(map.insert(37, "a"), None);
	/// assert_eq!(map.is_empty(), false);
	///
	/// map.insert(37, "b");
	/// assert_eq!(map.insert(37, "c"), Some("b"));
	/// assert_eq!(map[&37], "c");
	/// ```
	#[inline]
	pub fn insert(&mut self, key: K, value: V) -> Option<V>
	where
		K: Ord,
	{
		match self.set.find_or_insert(Item::new(key, value)) {
			Ok(()) => None,
			Err((addr, item)) => {
				let old_value = self
					.set
					.item_mut(addr)
					.map(|stored| stored.set_value(item.into_value()));
				self.set.touch();
				old_value
			}
		}
	}

	/// Returns a mutable reference to the value corresponding to the key.
	///
	/// Taking the reference counts as a modification of the map.
	///
	/// # Example
	///
	/// ```
	/// use btree_stack::BTreeMap;
	///
	/// let mut map = BTreeMap::new();
	/// map.insert(1, "a");
	/// if let Some(x) = map.get_mut(&1) {
	///     *x = "b";
	/// }
	/// assert_eq!(map[&1], "b");
	/// ```
	#[inline]
	pub fn get_mut<Q: ?Sized>(&mut self, key: &Q) -> Option<&mut V>
	where
		K: Borrow<Q>,
		Q: Ord,
	{
		let addr = self.set.address_by(|item| Ord::cmp(item.key().borrow(), key))?;
		self.set.touch();
		self.set.item_mut(addr).map(Item::value_mut)
	}

	/// Removes a key from the map, returning the value at the key if the key
	/// was previously in the map.
	///
	/// # Example
	///
	/// ```
	/// use btree_stack::BTreeMap;
	///
	/// let mut map = BTreeMap::new();
	/// map.insert(1, "a");
	/// assert_eq!(map.remove(&1), Some("a"));
	/// assert_eq!(map.remove(&1), None);
	/// ```
	#[inline]
	pub fn remove<Q: ?Sized>(&mut self, key: &Q) -> Option<V>
	where
		K: Borrow<Q>,
		Q: Ord,
	{
		self.remove_entry(key).map(|(_, v)| v)
	}

	/// Removes a key from the map, returning the stored key and value if the key
	/// was previously in the map.
	#[inline]
	pub fn remove_entry<Q: ?Sized>(&mut self, key: &Q) -> Option<(K, V)>
	where
		K: Borrow<Q>,
		Q: Ord,
	{
		self.set
			.take_by(|item| Ord::cmp(item.key().borrow(), key))
			.map(Item::into_pair)
	}

	/// Clears the map, removing all elements.
	///
	/// # Example
	///
	/// ```
	/// use btree_stack::BTreeMap;
	///
	/// let mut a = BTreeMap::new();
	/// a.insert(1, "a");
	/// a.clear();
	/// assert!(a.is_empty());
	/// ```
	#[inline]
	pub fn clear(&mut self)
	where
		C: cc_traits::Clear,
	{
		self.set.clear()
	}
}

impl<K: Ord, Q: ?Sized, V, C: Slab<Node<Item<K, V>>>> Index<&Q> for BTreeMap<K, V, C>
where
	K: Borrow<Q>,
	Q: Ord,
	C: SimpleCollectionRef,
{
	type Output = V;

	/// Returns a reference to the value corresponding to the supplied key.
	///
	/// # Panics
	///
	/// Panics if the key is not present in the `BTreeMap`.
	#[inline]
	fn index(&self, key: &Q) -> &V {
		self.get(key).expect("no entry found for key")
	}
}

impl<K, V, C: SlabMut<Node<Item<K, V>>> + Default> Default for BTreeMap<K, V, C>
where
	C: SimpleCollectionRef,
	C: SimpleCollectionMut,
{
	#[inline]
	fn default() -> Self {
		BTreeMap::new()
	}
}

impl<K: Ord, V, C: SlabMut<Node<Item<K, V>>> + Default> FromIterator<(K, V)> for BTreeMap<K, V, C>
where
	C: SimpleCollectionRef,
	C: SimpleCollectionMut,
{
	#[inline]
	fn from_iter<T>(iter: T) -> BTreeMap<K, V, C>
	where
		T: IntoIterator<Item = (K, V)>,
	{
		let mut map = BTreeMap::new();

		for (key, value) in iter {
			map.insert(key, value);
		}

		map
	}
}

impl<K: Ord, V, C: SlabMut<Node<Item<K, V>>>> Extend<(K, V)> for BTreeMap<K, V, C>
where
	C: SimpleCollectionRef,
	C: SimpleCollectionMut,
{
	#[inline]
	fn extend<T>(&mut self, iter: T)
	where
		T: IntoIterator<Item = (K, V)>,
	{
		for (key, value) in iter {
			self.insert(key, value);
		}
	}
}

impl<'a, K, V, C: Slab<Node<Item<K, V>>>> IntoIterator for &'a BTreeMap<K, V, C>
where
	C: SimpleCollectionRef,
{
	type Item = (&'a K, &'a V);
	type IntoIter = Iter<'a, K, V, C>;

	#[inline]
	fn into_iter(self) -> Iter<'a, K, V, C> {
		self.iter()
	}
}

impl<K: fmt::Debug, V: fmt::Debug, C: Slab<Node<Item<K, V>>>> fmt::Debug for BTreeMap<K, V, C>
where
	C: SimpleCollectionRef,
{
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		f.debug_map().entries(self.iter()).finish()
	}
}

/// Fail-fast cursor over the entries of a [`BTreeMap`].
///
/// See [`set::Cursor`].
#[derive(Clone, Debug)]
pub struct Cursor {
	inner: set::Cursor,
}

impl Cursor {
	#[inline]
	pub fn has_next(&self) -> bool {
		self.inner.has_next()
	}

	/// Returns the next entry in key order.
	///
	/// Fails with [`Error::ConcurrentModification`] if the map has been modified
	/// since the cursor creation, including value updates.
	#[inline]
	#[allow(clippy::should_implement_trait)]
	pub fn next<'a, K, V, C: Slab<Node<Item<K, V>>>>(
		&mut self,
		map: &'a BTreeMap<K, V, C>,
	) -> Result<(&'a K, &'a V), Error>
	where
		C: SimpleCollectionRef,
	{
		self.inner.next(&map.set).map(Item::as_pair)
	}

	/// Always fails with [`Error::Unsupported`].
	#[inline]
	pub fn remove(&mut self) -> Result<(), Error> {
		self.inner.remove()
	}
}

pub struct Iter<'a, K, V, C> {
	inner: set::Iter<'a, Item<K, V>, C>,
}

impl<'a, K, V, C: Slab<Node<Item<K, V>>>> Iterator for Iter<'a, K, V, C>
where
	C: SimpleCollectionRef,
{
	type Item = (&'a K, &'a V);

	#[inline]
	fn size_hint(&self) -> (usize, Option<usize>) {
		self.inner.size_hint()
	}

	#[inline]
	fn next(&mut self) -> Option<(&'a K, &'a V)> {
		self.inner.next().map(Item::as_pair)
	}
}

impl<'a, K, V, C: Slab<Node<Item<K, V>>>> FusedIterator for Iter<'a, K, V, C> where C: SimpleCollectionRef {}
impl<'a, K, V, C: Slab<Node<Item<K, V>>>> ExactSizeIterator for Iter<'a, K, V, C> where
	C: SimpleCollectionRef
{
}

pub struct Keys<'a, K, V, C> {
	inner: Iter<'a, K, V, C>,
}

impl<'a, K, V, C: Slab<Node<Item<K, V>>>> Iterator for Keys<'a, K, V, C>
where
	C: SimpleCollectionRef,
{
	type Item = &'a K;

	#[inline]
	fn size_hint(&self) -> (usize, Option<usize>) {
		self.inner.size_hint()
	}

	#[inline]
	fn next(&mut self) -> Option<&'a K> {
		self.inner.next().map(|(k, _)| k)
	}
}

impl<'a, K, V, C: Slab<Node<Item<K, V>>>> FusedIterator for Keys<'a, K, V, C> where C: SimpleCollectionRef {}
impl<'a, K, V, C: Slab<Node<Item<K, V>>>> ExactSizeIterator for Keys<'a, K, V, C> where
	C: SimpleCollectionRef
{
}

pub struct Values<'a, K, V, C> {
	inner: Iter<'a, K, V, C>,
}

impl<'a, K, V, C: Slab<Node<Item<K, V>>>> Iterator for Values<'a, K, V, C>
where
	C: SimpleCollectionRef,
{
	type Item = &'a V;

	#[inline]
	fn size_hint(&self) -> (usize, Option<usize>) {
		self.inner.size_hint()
	}

	#[inline]
	fn next(&mut self) -> Option<&'a V> {
		self.inner.next().map(|(_, v)| v)
	}
}

impl<'a, K, V, C: Slab<Node<Item<K, V>>>> FusedIterator for Values<'a, K, V, C> where C: SimpleCollectionRef {}
impl<'a, K, V, C: Slab<Node<Item<K, V>>>> ExactSizeIterator for Values<'a, K, V, C> where
	C: SimpleCollectionRef
{
}
