use crate::{
	generic::node::{Address, Node},
	stack::Stack,
	Order,
};
use cc_traits::{SimpleCollectionMut, SimpleCollectionRef, Slab, SlabMut};
use std::{
	borrow::Borrow,
	cmp::Ordering,
	fmt,
	iter::FromIterator,
	marker::PhantomData,
};
use tracing::{debug, trace};

mod cursor;
mod frame;

pub use cursor::{Cursor, Iter};
pub use frame::{Frame, Side, Sibling};

/// A set based on an array-packed B-Tree.
///
/// Every node stores its keys in a sorted array of at most
/// [`Order::max_key`] keys, and the identifiers of its children in another.
/// Nodes are allocated in a slab-like container (`C`),
/// and never point to their parent:
/// insertion and deletion record the path they follow from the root in a
/// stack, and unwind it to split, join or rebalance the visited nodes.
///
/// # Example
///
/// ```
/// use btree_stack::BTreeSet;
///
/// let mut books = BTreeSet::new();
///
/// // Add some books.
/// books.insert("A Dance With Dragons");
/// books.insert("To Kill a Mockingbird");
/// books.insert("The Odyssey");
/// books.insert("The Great Gatsby");
///
/// // Check for a specific one.
/// if !books.contains("The Winds of Winter") {
///     println!("We have {} books, but The Winds of Winter ain't one.",
///              books.len());
/// }
///
/// // Remove a book.
/// books.remove("The Odyssey");
///
/// // Iterate over everything.
/// for book in &books {
///     println!("{}", book);
/// }
/// ```
///
/// # Modification counter
///
/// The set counts the modifications it goes through.
/// A [`Cursor`] created before a modification reports it as an
/// [`Error::ConcurrentModification`](crate::Error::ConcurrentModification).
///
/// # Correctness
///
/// It is a logic error for a key to be modified in such a way that the key's ordering relative
/// to any other key, as determined by the [`Ord`] trait, changes while it is in the set.
#[derive(Clone)]
pub struct BTreeSet<T, C> {
	/// Allocated nodes.
	nodes: C,

	/// Root node id.
	root: usize,

	/// Number of keys in the tree.
	len: usize,

	/// Number of levels, from the root to the leaves.
	height: usize,

	/// Modification counter.
	changed: u64,

	order: Order,

	add_path: Stack<Frame>,
	delete_path: Stack<Frame>,

	/// Path to the leaf holding the successor of a removed key.
	min_path: Stack<Frame>,

	/// Path to the leaf holding the predecessor of a removed key.
	max_path: Stack<Frame>,

	t: PhantomData<T>,
}

impl<T, C: Slab<Node<T>>> BTreeSet<T, C>
where
	C: SimpleCollectionRef,
{
	/// Returns the number of keys in the set.
	///
	/// # Example
	///
	/// ```
	/// use btree_stack::BTreeSet;
	///
	/// let mut v = BTreeSet::new();
	/// assert_eq!(v.len(), 0);
	/// v.insert(1);
	/// assert_eq!(v.len(), 1);
	/// ```
	#[inline]
	pub fn len(&self) -> usize {
		self.len
	}

	/// Returns `true` if the set contains no keys.
	#[inline]
	pub fn is_empty(&self) -> bool {
		self.len == 0
	}

	/// Number of levels of the tree.
	///
	/// An empty tree has a single (leaf) level.
	///
	/// # Example
	///
	/// ```
	/// use btree_stack::{BTreeSet, Order};
	///
	/// let mut set = BTreeSet::with_order(Order::new(2).unwrap());
	/// assert_eq!(set.height(), 1);
	/// set.extend([1, 2, 3]);
	/// assert_eq!(set.height(), 2);
	/// ```
	#[inline]
	pub fn height(&self) -> usize {
		self.height
	}

	#[inline]
	pub fn order(&self) -> &Order {
		&self.order
	}

	/// Identifier of the root node.
	#[inline]
	pub fn root_id(&self) -> usize {
		self.root
	}

	/// Returns the node with the given id.
	///
	/// Panics if no such node exists.
	#[inline]
	pub fn node(&self, id: usize) -> &Node<T> {
		C::into_ref(self.nodes.get(id).expect("unknown node id"))
	}

	/// Returns the key at the given address, if any.
	#[inline]
	pub fn item(&self, addr: Address) -> Option<&T> {
		self.nodes.get(addr.id).and_then(|node| C::into_ref(node).key(addr.offset))
	}

	/// Find the address of the key matching the given probe.
	///
	/// `probe` returns the ordering of a stored key relative to the searched one.
	#[inline]
	pub fn address_by<F>(&self, mut probe: F) -> Option<Address>
	where
		F: FnMut(&T) -> Ordering,
	{
		let mut id = self.root;

		loop {
			let node = self.node(id);
			match node.offset_by(&mut probe) {
				Ok(offset) => return Some(Address::new(id, offset)),
				Err(index) => id = node.child_id_opt(index)?,
			}
		}
	}

	/// Find the address of the given key.
	#[inline]
	pub fn address_of<Q: ?Sized>(&self, key: &Q) -> Option<Address>
	where
		T: Borrow<Q>,
		Q: Ord,
	{
		self.address_by(|k| Ord::cmp(k.borrow(), key))
	}

	/// Returns `true` if the set contains the given key.
	///
	/// # Example
	///
	/// ```
	/// use btree_stack::BTreeSet;
	///
	/// let set: BTreeSet<_> = [1, 2, 3].iter().cloned().collect();
	/// assert_eq!(set.contains(&1), true);
	/// assert_eq!(set.contains(&4), false);
	/// ```
	#[inline]
	pub fn contains<Q: ?Sized>(&self, key: &Q) -> bool
	where
		T: Borrow<Q>,
		Q: Ord,
	{
		self.address_of(key).is_some()
	}

	/// Returns a reference to the stored key equal to the given one, if any.
	///
	/// # Example
	///
	/// ```
	/// use btree_stack::BTreeSet;
	///
	/// let set: BTreeSet<_> = [1, 2, 3].iter().cloned().collect();
	/// assert_eq!(set.get(&2), Some(&2));
	/// assert_eq!(set.get(&4), None);
	/// ```
	#[inline]
	pub fn get<Q: ?Sized>(&self, key: &Q) -> Option<&T>
	where
		T: Borrow<Q>,
		Q: Ord,
	{
		self.address_of(key).and_then(|addr| self.item(addr))
	}

	/// Gets an iterator that visits the keys in ascending order.
	///
	/// # Example
	///
	/// ```
	/// use btree_stack::BTreeSet;
	///
	/// let set: BTreeSet<usize> = [3, 1, 2].iter().cloned().collect();
	/// let mut set_iter = set.iter();
	/// assert_eq!(set_iter.next(), Some(&1));
	/// assert_eq!(set_iter.next(), Some(&2));
	/// assert_eq!(set_iter.next(), Some(&3));
	/// assert_eq!(set_iter.next(), None);
	/// ```
	#[inline]
	pub fn iter(&self) -> Iter<T, C> {
		Iter::new(self)
	}

	/// Creates a fail-fast cursor positioned before the first key.
	///
	/// See [`Cursor`].
	#[inline]
	pub fn cursor(&self) -> Cursor {
		Cursor::new(self)
	}

	/// Write the tree in the DOT graph description language.
	///
	/// Requires the `dot` feature.
	#[cfg(feature = "dot")]
	#[inline]
	pub fn dot_write<W: std::io::Write>(&self, f: &mut W) -> std::io::Result<()>
	where
		T: std::fmt::Display,
	{
		write!(f, "digraph tree {{\n\tnode [shape=record];\n")?;
		self.dot_write_node(f, self.root)?;
		write!(f, "}}")
	}

	/// Write the given node in the DOT graph description language.
	///
	/// Requires the `dot` feature.
	#[cfg(feature = "dot")]
	#[inline]
	fn dot_write_node<W: std::io::Write>(&self, f: &mut W, id: usize) -> std::io::Result<()>
	where
		T: std::fmt::Display,
	{
		let name = format!("n{}", id);
		let node = self.node(id);

		write!(f, "\t{} [label=\"", name)?;
		node.dot_write_label(f)?;
		writeln!(f, "({})\"];", id)?;

		for &child_id in node.children() {
			self.dot_write_node(f, child_id)?;
			let child_name = format!("n{}", child_id);
			writeln!(f, "\t{} -> {}", name, child_name)?;
		}

		Ok(())
	}

	/// Check the tree invariants.
	///
	/// Panics if a node is overflowing or underflowing, if keys are out of order,
	/// if leaves are not all at depth `height`, or if `len` is not the number of keys.
	#[cfg(debug_assertions)]
	pub fn validate(&self)
	where
		T: Ord,
	{
		let (depth, count) = self.validate_node(self.root, true, None, None);

		if depth != self.height {
			panic!("leaves are at depth {} but the height is {}", depth, self.height)
		}

		if count != self.len {
			panic!("tree holds {} keys but its length is {}", count, self.len)
		}
	}

	/// Returns the depth of the leaves under the given node, and the number of keys.
	#[cfg(debug_assertions)]
	fn validate_node<'a>(
		&'a self,
		id: usize,
		is_root: bool,
		min: Option<&'a T>,
		max: Option<&'a T>,
	) -> (usize, usize)
	where
		T: Ord,
	{
		let node = self.node(id);
		node.validate(&self.order, is_root, min, max);

		let mut count = node.key_count();
		let mut depth = None;

		for (i, &child_id) in node.children().iter().enumerate() {
			let child_min = if i == 0 { min } else { node.key(i - 1) };
			let child_max = if i == node.key_count() { max } else { node.key(i) };
			let (child_depth, child_count) = self.validate_node(child_id, false, child_min, child_max);

			match depth {
				Some(d) if d != child_depth => panic!("unbalanced node {}", id),
				_ => depth = Some(child_depth),
			}

			count += child_count;
		}

		(depth.unwrap_or(0) + 1, count)
	}
}

impl<T, C: SlabMut<Node<T>>> BTreeSet<T, C>
where
	C: SimpleCollectionRef,
	C: SimpleCollectionMut,
{
	/// Makes a new, empty set with the default order.
	///
	/// # Example
	///
	/// ```
	/// use btree_stack::BTreeSet;
	///
	/// let mut set: BTreeSet<i32> = BTreeSet::new();
	/// ```
	#[inline]
	pub fn new() -> BTreeSet<T, C>
	where
		C: Default,
	{
		Self::with_order(Order::default())
	}

	/// Makes a new, empty set with the given order.
	#[inline]
	pub fn with_order(order: Order) -> BTreeSet<T, C>
	where
		C: Default,
	{
		let mut nodes = C::default();
		let root = nodes.insert(Node::leaf(&order));
		debug!(%order, "new tree");

		BTreeSet {
			nodes,
			root,
			len: 0,
			height: 1,
			changed: 0,
			order,
			add_path: Stack::new(),
			delete_path: Stack::new(),
			min_path: Stack::new(),
			max_path: Stack::new(),
			t: PhantomData,
		}
	}

	#[inline]
	fn node_mut(&mut self, id: usize) -> &mut Node<T> {
		C::into_mut(self.nodes.get_mut(id).expect("unknown node id"))
	}

	/// Returns a mutable reference to the key at the given address, if any.
	///
	/// Modifying the key in such a way that its ordering changes is a logic error.
	#[inline]
	pub(crate) fn item_mut(&mut self, addr: Address) -> Option<&mut T> {
		self.nodes
			.get_mut(addr.id)
			.and_then(|node| C::into_mut(node).key_mut(addr.offset))
	}

	/// Record an in-place update of a stored key.
	#[inline]
	pub(crate) fn touch(&mut self) {
		self.changed += 1
	}

	#[inline]
	fn allocate_node(&mut self, node: Node<T>) -> usize {
		self.nodes.insert(node)
	}

	#[inline]
	fn release_node(&mut self, id: usize) -> Node<T> {
		self.nodes.remove(id).expect("unknown node id")
	}

	/// Adds a key to the set.
	///
	/// Returns `true` if the key was not present,
	/// and `false` if an equal key is already stored, in which case nothing changes.
	///
	/// # Example
	///
	/// ```
	/// use btree_stack::BTreeSet;
	///
	/// let mut set = BTreeSet::new();
	///
	/// assert_eq!(set.insert(2), true);
	/// assert_eq!(set.insert(2), false);
	/// assert_eq!(set.len(), 1);
	/// ```
	#[inline]
	pub fn insert(&mut self, key: T) -> bool
	where
		T: Ord,
	{
		self.find_or_insert(key).is_ok()
	}

	/// Adds a key to the set, unless an equal key is already stored.
	///
	/// Returns the stored key if there is one (the given key is dropped),
	/// or `None` if the key has been added.
	///
	/// # Example
	///
	/// ```
	/// use btree_stack::BTreeSet;
	///
	/// let mut set = BTreeSet::new();
	///
	/// assert_eq!(set.insert_or_get(2), None);
	/// assert_eq!(set.insert_or_get(2), Some(&2));
	/// ```
	#[inline]
	pub fn insert_or_get(&mut self, key: T) -> Option<&T>
	where
		T: Ord,
	{
		match self.find_or_insert(key) {
			Ok(()) => None,
			Err((addr, _)) => self.item(addr),
		}
	}

	/// Adds the given key, unless an equal key is already stored.
	///
	/// On rejection, returns the address of the stored key along with the given key.
	pub(crate) fn find_or_insert(&mut self, key: T) -> Result<(), (Address, T)>
	where
		T: Ord,
	{
		self.add_path.reset();
		let mut id = self.root;

		loop {
			let node = self.node(id);
			let location = node.index_of_greatest_less_than(&key, &self.order);

			match self.order.decode_location(location) {
				Ok(offset) => return Err((Address::new(id, offset), key)),
				Err(index) => {
					let child_id = node.child_id_opt(index);
					self.add_path.push(Frame::new(id, index));

					match child_id {
						Some(child_id) => id = child_id,
						None => break,
					}
				}
			}
		}

		self.len += 1;
		self.changed += 1;
		self.add_from_the_bottom(key);
		Ok(())
	}

	/// Insert the key at the end of the add path, splitting nodes up the path as needed.
	fn add_from_the_bottom(&mut self, mut key: T) {
		let order = self.order;
		let mut right_child = None;

		while let Some(frame) = self.add_path.pop() {
			match self.node_mut(frame.id).add(frame.index, key, right_child, &order) {
				None => return,
				Some((median, right)) => {
					key = median;
					right_child = Some(self.allocate_node(right));
				}
			}
		}

		// the root has been split.
		if let Some(right_id) = right_child {
			let left_id = self.root;
			self.root = self.allocate_node(Node::binary(&order, left_id, key, right_id));
			self.height += 1;
			trace!(root = self.root, height = self.height, "root split");
		}
	}

	/// Removes a key from the set.
	///
	/// Returns `true` if the key was present.
	///
	/// # Example
	///
	/// ```
	/// use btree_stack::BTreeSet;
	///
	/// let mut set = BTreeSet::new();
	///
	/// set.insert(2);
	/// assert_eq!(set.remove(&2), true);
	/// assert_eq!(set.remove(&2), false);
	/// ```
	#[inline]
	pub fn remove<Q: ?Sized>(&mut self, key: &Q) -> bool
	where
		T: Borrow<Q>,
		Q: Ord,
	{
		self.take(key).is_some()
	}

	/// Removes and returns the stored key equal to the given one, if any.
	///
	/// # Example
	///
	/// ```
	/// use btree_stack::BTreeSet;
	///
	/// let mut set: BTreeSet<_> = [1, 2, 3].iter().cloned().collect();
	/// assert_eq!(set.take(&2), Some(2));
	/// assert_eq!(set.take(&2), None);
	/// ```
	#[inline]
	pub fn take<Q: ?Sized>(&mut self, key: &Q) -> Option<T>
	where
		T: Borrow<Q>,
		Q: Ord,
	{
		self.take_by(|k| Ord::cmp(k.borrow(), key))
	}

	/// Removes and returns the key matching the given probe, if any.
	pub(crate) fn take_by<F>(&mut self, mut probe: F) -> Option<T>
	where
		F: FnMut(&T) -> Ordering,
	{
		self.delete_path.reset();
		let mut id = self.root;

		let key = loop {
			let node = self.node(id);

			match node.offset_by(&mut probe) {
				Ok(offset) => {
					let is_leaf = node.is_leaf();
					self.delete_path.push(Frame::new(id, offset));

					if is_leaf {
						break self.node_mut(id).remove_key(offset);
					} else {
						break self.overwrite_with_leaf(id, offset);
					}
				}
				Err(index) => {
					let child_id = node.child_id_opt(index)?;
					self.delete_path.push(Frame::new(id, index));
					id = child_id
				}
			}
		};

		self.len -= 1;
		self.changed += 1;

		if self.delete_path.len() > 1 {
			self.merge()
		}

		Some(key)
	}

	/// Replace the key at `offset` in the internal node `id` with its predecessor
	/// or successor, removed from its leaf. Returns the replaced key.
	///
	/// The key is taken from the leaf holding the most keys, the predecessor on ties.
	/// The path to this leaf is appended to the delete path.
	fn overwrite_with_leaf(&mut self, id: usize, offset: usize) -> T {
		let (left_id, right_id) = {
			let node = self.node(id);
			(node.child_id(offset), node.child_id(offset + 1))
		};

		self.max_path.reset();
		self.min_path.reset();
		let max_id = self.find_max_leaf(left_id);
		let min_id = self.find_min_leaf(right_id);

		let replacement = if self.node(min_id).key_count() <= self.node(max_id).key_count() {
			self.delete_path.extend_from(&self.max_path);
			let leaf = self.node_mut(max_id);
			let last = leaf.key_count() - 1;
			leaf.remove_key(last)
		} else {
			// descend into the right child instead.
			if let Some(frame) = self.delete_path.top_mut() {
				frame.index = offset + 1
			}

			self.delete_path.extend_from(&self.min_path);
			self.node_mut(min_id).remove_key(0)
		};

		self.node_mut(id).replace_key(offset, replacement)
	}

	/// Follow the last children down to a leaf, recording the path in `max_path`.
	fn find_max_leaf(&mut self, mut id: usize) -> usize {
		loop {
			let node = self.node(id);
			match node.last_child_id() {
				Some(child_id) => {
					let index = node.child_count() - 1;
					self.max_path.push(Frame::new(id, index));
					id = child_id
				}
				None => {
					let index = node.key_count().saturating_sub(1);
					self.max_path.push(Frame::new(id, index));
					return id;
				}
			}
		}
	}

	/// Follow the first children down to a leaf, recording the path in `min_path`.
	fn find_min_leaf(&mut self, mut id: usize) -> usize {
		loop {
			self.min_path.push(Frame::new(id, 0));
			match self.node(id).first_child_id() {
				Some(child_id) => id = child_id,
				None => return id,
			}
		}
	}

	/// Rebalance the nodes of the delete path, from the bottom up.
	fn merge(&mut self) {
		let order = self.order;
		let mut current = match self.delete_path.pop() {
			Some(frame) => frame,
			None => return,
		};

		while let Some(parent) = self.delete_path.pop() {
			if !self.node(current.id).is_underflowing(&order) {
				break;
			}

			let sibling = match self.bigger_sibling(parent) {
				Some(sibling) => sibling,
				None => break,
			};

			let count = self.node(current.id).key_count() + self.node(sibling.id).key_count();

			if count < order.max_key() {
				match sibling.side {
					Side::Right => self.join(current.id, parent.id, parent.index + 1),
					Side::Left => self.join(sibling.id, parent.id, parent.index),
				}

				current = parent
			} else {
				self.borrow(current.id, parent, sibling);
				break;
			}
		}

		self.collapse_root()
	}

	/// Find the adjacent sibling of the child followed in the given parent frame
	/// holding the most keys, the left one on ties.
	fn bigger_sibling(&self, parent: Frame) -> Option<Sibling> {
		let node = self.node(parent.id);
		let left = match parent.index {
			0 => None,
			index => node.child_id_opt(index - 1),
		};
		let right = node.child_id_opt(parent.index + 1);

		match (left, right) {
			(Some(left), Some(right)) => {
				if self.node(right).key_count() > self.node(left).key_count() {
					Some(Sibling::right(right))
				} else {
					Some(Sibling::left(left))
				}
			}
			(Some(left), None) => Some(Sibling::left(left)),
			(None, Some(right)) => Some(Sibling::right(right)),
			(None, None) => None,
		}
	}

	/// Join the child of `parent_id` at `from` into its left sibling `left_id`.
	fn join(&mut self, left_id: usize, parent_id: usize, from: usize) {
		let (separator, right_id) = self.node_mut(parent_id).shrink(from);
		let right = self.release_node(right_id);
		self.node_mut(left_id).join(separator, right)
	}

	/// Rotate a key from `sibling` to `current_id` through the parent separator.
	fn borrow(&mut self, current_id: usize, parent: Frame, sibling: Sibling) {
		match sibling.side {
			Side::Right => {
				let (key, child_id) = self.node_mut(sibling.id).pop_first();
				let separator = self.node_mut(parent.id).replace_key(parent.index, key);
				self.node_mut(current_id).push_last(separator, child_id)
			}
			Side::Left => {
				let (key, child_id) = self.node_mut(sibling.id).pop_last();
				let separator = self.node_mut(parent.id).replace_key(parent.index - 1, key);
				self.node_mut(current_id).push_first(separator, child_id)
			}
		}
	}

	/// Replace an empty internal root with its only child.
	fn collapse_root(&mut self) {
		let root = self.node(self.root);
		if root.key_count() > 0 {
			return;
		}

		if let Some(child_id) = root.first_child_id() {
			self.release_node(self.root);
			self.root = child_id;
			self.height -= 1;
			trace!(root = self.root, height = self.height, "root collapse");
		}
	}

	/// Clears the set, removing all keys.
	///
	/// The tree goes back to a single empty leaf.
	///
	/// # Example
	///
	/// ```
	/// use btree_stack::BTreeSet;
	///
	/// let mut v = BTreeSet::new();
	/// v.insert(1);
	/// v.clear();
	/// assert!(v.is_empty());
	/// assert_eq!(v.height(), 1);
	/// ```
	#[inline]
	pub fn clear(&mut self)
	where
		C: cc_traits::Clear,
	{
		let order = self.order;
		self.nodes.clear();
		self.root = self.allocate_node(Node::leaf(&order));
		self.len = 0;
		self.height = 1;
		self.changed += 1;
		debug!("tree cleared");
	}
}

impl<T, C: SlabMut<Node<T>> + Default> Default for BTreeSet<T, C>
where
	C: SimpleCollectionRef,
	C: SimpleCollectionMut,
{
	#[inline]
	fn default() -> Self {
		BTreeSet::new()
	}
}

impl<T: Ord, C: SlabMut<Node<T>> + Default> FromIterator<T> for BTreeSet<T, C>
where
	C: SimpleCollectionRef,
	C: SimpleCollectionMut,
{
	#[inline]
	fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
		let mut set = BTreeSet::new();

		for t in iter {
			set.insert(t);
		}

		set
	}
}

impl<T: Ord, C: SlabMut<Node<T>>> Extend<T> for BTreeSet<T, C>
where
	C: SimpleCollectionRef,
	C: SimpleCollectionMut,
{
	#[inline]
	fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
		for t in iter {
			self.insert(t);
		}
	}
}

impl<'a, T: 'a + Ord + Copy, C: SlabMut<Node<T>>> Extend<&'a T> for BTreeSet<T, C>
where
	C: SimpleCollectionRef,
	C: SimpleCollectionMut,
{
	#[inline]
	fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
		self.extend(iter.into_iter().copied())
	}
}

impl<'a, T, C: Slab<Node<T>>> IntoIterator for &'a BTreeSet<T, C>
where
	C: SimpleCollectionRef,
{
	type Item = &'a T;
	type IntoIter = Iter<'a, T, C>;

	#[inline]
	fn into_iter(self) -> Iter<'a, T, C> {
		self.iter()
	}
}

impl<T: fmt::Debug, C: Slab<Node<T>>> fmt::Debug for BTreeSet<T, C>
where
	C: SimpleCollectionRef,
{
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		f.debug_set().entries(self.iter()).finish()
	}
}
