//! Growable LIFO used to record descent paths.
use std::slice;

/// Default capacity of a new stack.
pub const DEFAULT_CAPACITY: usize = 10;

/// Growable stack of `Copy` frames.
///
/// The stack grows by 50% each time it becomes full.
/// Popping does not clear the popped slot: the value stays in place and is
/// overwritten by the next push, so a stack can be [`reset`](Stack::reset)
/// and reused across operations without reallocating.
#[derive(Clone, Debug)]
pub struct Stack<T> {
	items: Vec<T>,

	/// Number of live items.
	point: usize,
}

impl<T: Copy> Stack<T> {
	/// Creates a stack with the default capacity.
	#[inline]
	pub fn new() -> Stack<T> {
		Self::with_capacity(DEFAULT_CAPACITY)
	}

	/// Creates a stack able to hold `capacity` items before growing.
	///
	/// # Panics
	///
	/// Panics if `capacity` is less than 2.
	#[inline]
	pub fn with_capacity(capacity: usize) -> Stack<T> {
		assert!(capacity >= 2, "stack capacity must be at least 2, got {}", capacity);
		Stack {
			items: Vec::with_capacity(capacity),
			point: 0,
		}
	}

	#[inline]
	pub fn len(&self) -> usize {
		self.point
	}

	#[inline]
	pub fn is_empty(&self) -> bool {
		self.point == 0
	}

	/// Number of items the stack can hold before growing.
	#[inline]
	pub fn capacity(&self) -> usize {
		self.items.capacity()
	}

	#[inline]
	pub fn push(&mut self, item: T) {
		if self.point < self.items.len() {
			self.items[self.point] = item;
		} else {
			self.items.push(item);
		}

		self.point += 1;

		if self.point == self.items.capacity() {
			let capacity = self.items.capacity();
			self.items.reserve_exact(capacity / 2);
		}
	}

	/// Removes the top item and returns it.
	///
	/// The slot keeps its value until it is overwritten.
	#[inline]
	pub fn pop(&mut self) -> Option<T> {
		if self.point == 0 {
			None
		} else {
			self.point -= 1;
			Some(self.items[self.point])
		}
	}

	#[inline]
	pub fn top(&self) -> Option<&T> {
		self.as_slice().last()
	}

	#[inline]
	pub fn top_mut(&mut self) -> Option<&mut T> {
		let point = self.point;
		self.items[..point].last_mut()
	}

	/// Forgets every item, keeping the allocated slots.
	#[inline]
	pub fn reset(&mut self) {
		self.point = 0
	}

	/// Pushes every live item of `other`, bottom first.
	#[inline]
	pub fn extend_from(&mut self, other: &Stack<T>) {
		for item in other.iter() {
			self.push(*item)
		}
	}

	/// Live items, bottom first.
	#[inline]
	pub fn as_slice(&self) -> &[T] {
		&self.items[..self.point]
	}

	#[inline]
	pub fn iter(&self) -> slice::Iter<T> {
		self.as_slice().iter()
	}
}

impl<T: Copy> Default for Stack<T> {
	#[inline]
	fn default() -> Self {
		Self::new()
	}
}
