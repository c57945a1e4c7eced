use btree_stack::utils::{binary_search_by, cut, insert_at, move_to, shift_left, shift_right};
use smallvec::SmallVec;

#[test]
pub fn shift() {
	let mut arr = [0, 1, 2, 3, 4];
	shift_left(&mut arr, 1, 3);
	assert_eq!(arr, [1, 2, 0, 3, 4]);

	let mut arr = [0, 1, 2, 3, 4];
	shift_right(&mut arr, 1, 3);
	assert_eq!(arr, [0, 3, 1, 2, 4]);

	// empty ranges are no-ops.
	let mut arr = [0, 1, 2];
	shift_left(&mut arr, 2, 2);
	shift_right(&mut arr, 1, 1);
	assert_eq!(arr, [0, 1, 2]);
}

#[test]
pub fn insert_and_cut() {
	let mut arr: SmallVec<[i32; 4]> = SmallVec::new();
	insert_at(&mut arr, 0, 2);
	insert_at(&mut arr, 0, 0);
	insert_at(&mut arr, 1, 1);
	insert_at(&mut arr, 3, 3);
	assert_eq!(arr.as_slice(), &[0, 1, 2, 3]);

	// spills to the heap.
	insert_at(&mut arr, 2, 10);
	assert_eq!(arr.as_slice(), &[0, 1, 10, 2, 3]);

	assert_eq!(cut(&mut arr, 2), 10);
	assert_eq!(cut(&mut arr, 0), 0);
	assert_eq!(cut(&mut arr, 2), 3);
	assert_eq!(arr.as_slice(), &[1, 2]);
}

#[test]
#[should_panic]
pub fn cut_out_of_bounds() {
	let mut arr: SmallVec<[i32; 4]> = SmallVec::new();
	arr.push(1);
	cut(&mut arr, 1);
}

#[test]
pub fn move_cells() {
	let mut src: SmallVec<[i32; 8]> = (0..6).collect();
	let mut target: SmallVec<[i32; 8]> = SmallVec::new();

	move_to(&mut src, &mut target, 3, 6, 0);
	assert_eq!(src.as_slice(), &[0, 1, 2]);
	assert_eq!(target.as_slice(), &[3, 4, 5]);

	move_to(&mut src, &mut target, 0, 1, 3);
	assert_eq!(src.as_slice(), &[1, 2]);
	assert_eq!(target.as_slice(), &[3, 4, 5, 0]);
}

#[test]
pub fn search() {
	let arr = [10, 20, 30, 40];

	assert_eq!(binary_search_by(&arr, |k| k.cmp(&10)), Ok(0));
	assert_eq!(binary_search_by(&arr, |k| k.cmp(&40)), Ok(3));
	assert_eq!(binary_search_by(&arr, |k| k.cmp(&5)), Err(0));
	assert_eq!(binary_search_by(&arr, |k| k.cmp(&25)), Err(2));
	assert_eq!(binary_search_by(&arr, |k| k.cmp(&50)), Err(4));
	assert_eq!(binary_search_by(&[] as &[i32], |k| k.cmp(&1)), Err(0));
}
