use super::{frame::Frame, BTreeSet};
use crate::{
	generic::node::{Address, Node},
	stack::Stack,
	Error,
};
use cc_traits::{SimpleCollectionRef, Slab};
use std::iter::{ExactSizeIterator, FusedIterator};

/// Fail-fast in-order cursor.
///
/// A cursor walks the tree in ascending order without borrowing it:
/// the tree is given back at each step.
/// It records the modification counter of the tree when it is created, and
/// any step taken after the tree has been modified fails with
/// [`Error::ConcurrentModification`].
///
/// A cursor must only be used with the tree it was created from.
///
/// # Example
///
/// ```
/// use btree_stack::{BTreeSet, Error};
///
/// let mut set: BTreeSet<i32> = [3, 1, 2].iter().cloned().collect();
/// let mut cursor = set.cursor();
/// assert_eq!(cursor.next(&set), Ok(&1));
///
/// set.insert(4);
/// assert_eq!(cursor.next(&set), Err(Error::ConcurrentModification));
/// ```
#[derive(Clone, Debug)]
pub struct Cursor {
	/// Emulated recursion stack.
	///
	/// For each node, `index` is the offset of the next key to visit.
	stack: Stack<Frame>,

	/// Address of the next key.
	pending: Option<Address>,

	/// Modification counter of the tree at creation time.
	changed: u64,
}

impl Cursor {
	#[inline]
	pub(crate) fn new<T, C: Slab<Node<T>>>(set: &BTreeSet<T, C>) -> Cursor
	where
		C: SimpleCollectionRef,
	{
		let mut cursor = Cursor {
			stack: Stack::new(),
			pending: None,
			changed: set.changed,
		};

		cursor.descend(set, set.root);
		cursor.advance(set);
		cursor
	}

	/// Checks if there is a next key to visit.
	#[inline]
	pub fn has_next(&self) -> bool {
		self.pending.is_some()
	}

	/// Returns the next key in ascending order.
	///
	/// Fails with [`Error::ConcurrentModification`] if the tree has been modified
	/// since the cursor creation, and with [`Error::Exhausted`] if every key has
	/// already been visited.
	#[inline]
	#[allow(clippy::should_implement_trait)]
	pub fn next<'a, T, C: Slab<Node<T>>>(&mut self, set: &'a BTreeSet<T, C>) -> Result<&'a T, Error>
	where
		C: SimpleCollectionRef,
	{
		if self.changed != set.changed {
			return Err(Error::ConcurrentModification);
		}

		let addr = self.pending.ok_or(Error::Exhausted)?;
		let key = set.item(addr).ok_or(Error::ConcurrentModification)?;
		self.advance(set);
		Ok(key)
	}

	/// Keys cannot be removed through a cursor.
	///
	/// This always fails with [`Error::Unsupported`].
	/// Use [`BTreeSet::remove`] instead, which invalidates every cursor.
	#[inline]
	pub fn remove(&mut self) -> Result<(), Error> {
		Err(Error::Unsupported)
	}

	/// Push the path to the left-most leaf of the given subtree.
	#[inline]
	fn descend<T, C: Slab<Node<T>>>(&mut self, set: &BTreeSet<T, C>, mut id: usize)
	where
		C: SimpleCollectionRef,
	{
		loop {
			self.stack.push(Frame::new(id, 0));
			match set.node(id).first_child_id() {
				Some(child_id) => id = child_id,
				None => break,
			}
		}
	}

	/// Find the next key to visit.
	#[inline]
	fn advance<T, C: Slab<Node<T>>>(&mut self, set: &BTreeSet<T, C>)
	where
		C: SimpleCollectionRef,
	{
		self.pending = None;

		while let Some(frame) = self.stack.top_mut() {
			let node = set.node(frame.id);

			if frame.index < node.key_count() {
				let addr = Address::new(frame.id, frame.index);
				frame.index += 1;

				// the subtree right of the key comes next.
				let next_child = node.child_id_opt(frame.index);
				self.pending = Some(addr);

				if let Some(child_id) = next_child {
					self.descend(set, child_id)
				}

				return;
			}

			self.stack.pop();
		}
	}
}

/// Iterator over the keys of a [`BTreeSet`], in ascending order.
///
/// The iterator borrows the tree, which cannot be modified while iterating.
pub struct Iter<'a, T, C> {
	set: &'a BTreeSet<T, C>,
	cursor: Cursor,
	len: usize,
}

impl<'a, T, C: Slab<Node<T>>> Iter<'a, T, C>
where
	C: SimpleCollectionRef,
{
	#[inline]
	pub(crate) fn new(set: &'a BTreeSet<T, C>) -> Self {
		Iter {
			set,
			cursor: Cursor::new(set),
			len: set.len(),
		}
	}
}

impl<'a, T, C: Slab<Node<T>>> Iterator for Iter<'a, T, C>
where
	C: SimpleCollectionRef,
{
	type Item = &'a T;

	#[inline]
	fn size_hint(&self) -> (usize, Option<usize>) {
		(self.len, Some(self.len))
	}

	#[inline]
	fn next(&mut self) -> Option<&'a T> {
		if self.len > 0 {
			self.len -= 1;
			self.cursor.next(self.set).ok()
		} else {
			None
		}
	}
}

impl<'a, T, C: Slab<Node<T>>> FusedIterator for Iter<'a, T, C> where C: SimpleCollectionRef {}
impl<'a, T, C: Slab<Node<T>>> ExactSizeIterator for Iter<'a, T, C> where C: SimpleCollectionRef {}
