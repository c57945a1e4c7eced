use std::fmt;

/// Key location in a B-Tree.
///
/// ## Validity
///
/// An address `addr` is *valid* in a given tree if `addr.id` refers to an existing
/// node and if `addr.offset` is less than the number of keys in the node.
/// Addresses are only valid until the next structural modification of the tree.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Address {
	/// Identifier of the node.
	pub id: usize,

	/// Offset of the key in the node.
	pub offset: usize,
}

impl Address {
	#[inline]
	pub fn new(id: usize, offset: usize) -> Address {
		Address { id, offset }
	}
}

impl fmt::Display for Address {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		write!(f, "@{}:{}", self.id, self.offset)
	}
}

impl fmt::Debug for Address {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		write!(f, "@{}:{}", self.id, self.offset)
	}
}
