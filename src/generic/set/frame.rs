/// Path stack frame: a visited node and the index used in it.
///
/// On a descent path, `index` is the child index followed from the node,
/// or the offset of the key found in it.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Frame {
	pub id: usize,
	pub index: usize,
}

impl Frame {
	#[inline]
	pub fn new(id: usize, index: usize) -> Frame {
		Frame { id, index }
	}
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Side {
	Left,
	Right,
}

/// Adjacent sibling of an underflowing node, used to join or borrow.
#[derive(Clone, Copy, Debug)]
pub struct Sibling {
	pub id: usize,
	pub side: Side,
}

impl Sibling {
	#[inline]
	pub fn left(id: usize) -> Sibling {
		Sibling { id, side: Side::Left }
	}

	#[inline]
	pub fn right(id: usize) -> Sibling {
		Sibling {
			id,
			side: Side::Right,
		}
	}
}
