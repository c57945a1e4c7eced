//! Array primitives used by every structural edit of a node.
use smallvec::{Array, SmallVec};
use std::cmp::Ordering;

/// Overwrites each cell in `start..end` into its left neighbour.
///
/// The cell at `start - 1` is moved to `end - 1`, so nothing is lost:
/// with `arr = [0, 1, 2, 3, 4]`, `shift_left(&mut arr, 1, 3)` gives
/// `[1, 2, 0, 3, 4]`. Popping the last cell after shifting removes `arr[start - 1]`.
///
/// Panics if `start == 0` or `end > arr.len()`.
#[inline]
pub fn shift_left<T>(arr: &mut [T], start: usize, end: usize) {
	if start < end {
		arr[start - 1..end].rotate_left(1)
	}
}

/// Overwrites each cell in `start..end` into its right neighbour.
///
/// The cell at `end` is moved to `start`:
/// with `arr = [0, 1, 2, 3, 4]`, `shift_right(&mut arr, 1, 3)` gives
/// `[0, 3, 1, 2, 4]`. Pushing a value then shifting `index..len` inserts it at `index`.
///
/// Panics if `end >= arr.len()`.
#[inline]
pub fn shift_right<T>(arr: &mut [T], start: usize, end: usize) {
	if start < end {
		arr[start..=end].rotate_right(1)
	}
}

/// Cuts the cells `start..end` out of `src` and inserts them in `target` at `new_start`.
///
/// ```
/// use btree_stack::utils::move_to;
/// use smallvec::SmallVec;
///
/// let mut src: SmallVec<[char; 8]> = "01234".chars().collect();
/// let mut target: SmallVec<[char; 8]> = "abe".chars().collect();
/// move_to(&mut src, &mut target, 1, 3, 2);
/// assert_eq!(src.as_slice(), &['0', '3', '4']);
/// assert_eq!(target.as_slice(), &['a', 'b', '1', '2', 'e']);
/// ```
#[inline]
pub fn move_to<A: Array>(
	src: &mut SmallVec<A>,
	target: &mut SmallVec<A>,
	start: usize,
	end: usize,
	new_start: usize,
) {
	target.insert_many(new_start, src.drain(start..end))
}

/// Search in `sorted_slice` for the item matching the given probe.
///
/// `probe` returns the ordering of an item relative to the searched key.
/// Returns `Ok(i)` if `sorted_slice[i]` matches,
/// or `Err(i)` where `i` is the number of items strictly less than the key.
///
/// `sorted_slice` is assumed to be sorted.
#[inline]
pub fn binary_search_by<T, F>(sorted_slice: &[T], mut probe: F) -> Result<usize, usize>
where
	F: FnMut(&T) -> Ordering,
{
	let mut left = 0;
	let mut right = sorted_slice.len();

	// invariants:
	// sorted_slice[..left] < key
	// sorted_slice[right..] > key
	while left < right {
		let middle = (left + right) / 2;

		match probe(&sorted_slice[middle]) {
			Ordering::Equal => return Ok(middle),
			Ordering::Less => left = middle + 1,
			Ordering::Greater => right = middle,
		}
	}

	Err(left)
}

/// Inserts `item` at `index` by pushing it and shifting the following cells right.
///
/// Panics if `index > arr.len()`.
#[inline]
pub fn insert_at<A: Array>(arr: &mut SmallVec<A>, index: usize, item: A::Item) {
	let len = arr.len();
	assert!(index <= len, "insertion index {} out of bounds ({})", index, len);
	arr.push(item);
	shift_right(arr, index, len)
}

/// Removes the cell at `index` by shifting the following cells left over it.
///
/// Panics if `index >= arr.len()`.
#[inline]
pub fn cut<A: Array>(arr: &mut SmallVec<A>, index: usize) -> A::Item {
	let len = arr.len();
	assert!(index < len, "removal index {} out of bounds ({})", index, len);
	shift_left(arr, index + 1, len);
	arr.remove(len - 1)
}
