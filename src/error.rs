use thiserror::Error;

/// Errors reported by the tree and its cursors.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Error)]
pub enum Error {
	/// The tree was modified after the cursor was created.
	///
	/// The cursor cannot be used anymore, a new one must be created.
	#[error("the tree has been modified since the cursor was created")]
	ConcurrentModification,

	/// The cursor has no more keys.
	#[error("no more keys")]
	Exhausted,

	/// Keys cannot be removed through a cursor.
	#[error("removal through a cursor is not supported")]
	Unsupported,

	/// The maximum number of keys per node is out of bounds.
	#[error("a node must hold between 2 and isize::MAX keys, got {0}")]
	InvalidOrder(usize),
}
