use btree_stack::{BTreeSet, Order};
use rand::{rngs::SmallRng, seq::SliceRandom, Rng, SeedableRng};
use std::collections;

const SEED: u64 = 0x7465_7374_7365_6564;

fn keys<T: Clone>(set: &BTreeSet<T>) -> Vec<T> {
	set.iter().cloned().collect()
}

/// Keys of every node, in depth-first order.
fn layout<T: Clone>(set: &BTreeSet<T>) -> Vec<Vec<T>> {
	fn visit<T: Clone>(set: &BTreeSet<T>, id: usize, nodes: &mut Vec<Vec<T>>) {
		let node = set.node(id);
		nodes.push(node.keys().to_vec());
		for &child_id in node.children() {
			visit(set, child_id, nodes)
		}
	}

	let mut nodes = Vec::new();
	visit(set, set.root_id(), &mut nodes);
	nodes
}

#[test]
pub fn small_tree() {
	let mut set = BTreeSet::with_order(Order::new(4).unwrap());

	for key in [10, 20, 5, 6, 12, 30, 7, 17] {
		assert!(set.insert(key));
		set.validate();
	}

	assert_eq!(keys(&set), [5, 6, 7, 10, 12, 17, 20, 30]);
	assert_eq!(set.len(), 8);
	assert_eq!(set.height(), 2);

	assert!(set.remove(&10));
	set.validate();

	assert_eq!(keys(&set), [5, 6, 7, 12, 17, 20, 30]);
	assert_eq!(set.len(), 7);

	// the successor leaf holds more keys, it gives the replacement.
	assert_eq!(layout(&set), [vec![12], vec![5, 6, 7], vec![17, 20, 30]]);
}

#[test]
pub fn predecessor_replacement() {
	let mut set = BTreeSet::with_order(Order::new(4).unwrap());
	set.extend([10, 20, 30, 40, 50, 11, 12]);
	assert_eq!(layout(&set), [vec![30], vec![10, 11, 12, 20], vec![40, 50]]);

	assert!(set.remove(&30));
	set.validate();
	assert_eq!(layout(&set), [vec![20], vec![10, 11, 12], vec![40, 50]]);

	// ties go to the predecessor.
	set.insert(45);
	assert!(set.remove(&20));
	set.validate();
	assert_eq!(layout(&set), [vec![12], vec![10, 11], vec![40, 45, 50]]);
}

#[test]
pub fn borrow_from_bigger_sibling() {
	let mut set = BTreeSet::with_order(Order::new(4).unwrap());
	set.extend([10, 20, 30, 40, 50, 60, 70, 80, 90, 100]);
	assert_eq!(
		layout(&set),
		[vec![30, 60], vec![10, 20], vec![40, 50], vec![70, 80, 90, 100]]
	);

	// the right sibling holds more keys: borrow from it, the parent keeps its keys.
	assert!(set.remove(&40));
	set.validate();
	assert_eq!(
		layout(&set),
		[vec![30, 70], vec![10, 20], vec![50, 60], vec![80, 90, 100]]
	);

	// both siblings hold 3 keys: borrow from the left one.
	set.insert(25);
	assert!(set.remove(&50));
	set.validate();
	assert_eq!(
		layout(&set),
		[vec![25, 70], vec![10, 20], vec![30, 60], vec![80, 90, 100]]
	);
}

#[test]
pub fn insert() {
	let mut set = BTreeSet::new();

	for (key, _) in &ITEMS {
		assert!(set.insert(*key));
		set.validate();
	}

	assert_eq!(set.len(), 100);

	for (key, _) in &ITEMS {
		assert!(set.contains(key));
		assert_eq!(set.get(key), Some(key));
	}
}

#[test]
pub fn remove() {
	let mut set = BTreeSet::new();

	let mut items = ITEMS;

	for (key, _) in &items {
		set.insert(*key);
	}

	let mut rng = SmallRng::seed_from_u64(SEED);
	items.shuffle(&mut rng);

	for (key, _) in &items {
		assert!(set.remove(key));
		assert!(!set.contains(key));
		set.validate();
	}

	assert!(set.is_empty());
	assert_eq!(set.height(), 1);
}

#[test]
pub fn take() {
	let mut set: BTreeSet<String> = ["a", "b", "c"].iter().map(|s| s.to_string()).collect();

	assert_eq!(set.take("b"), Some("b".to_string()));
	assert_eq!(set.take("b"), None);
	assert_eq!(keys(&set), ["a", "c"]);
}

#[test]
pub fn idempotence() {
	let mut set = BTreeSet::with_order(Order::new(3).unwrap());
	set.extend(0..50);

	let height = set.height();
	for key in 0..50 {
		assert!(!set.insert(key));
		assert_eq!(set.insert_or_get(key), Some(&key));
	}

	assert_eq!(set.len(), 50);
	assert_eq!(set.height(), height);
	set.validate();

	let before = layout(&set);
	assert!(!set.remove(&100));
	assert_eq!(set.len(), 50);
	assert_eq!(layout(&set), before);
	assert_eq!(keys(&set), (0..50).collect::<Vec<_>>());
	set.validate();

	assert_eq!(set.insert_or_get(100), None);
	assert!(set.contains(&100));
}

#[test]
pub fn height() {
	let mut set = BTreeSet::with_order(Order::new(2).unwrap());
	assert_eq!(set.height(), 1);

	set.insert(1);
	set.insert(2);
	assert_eq!(set.height(), 1);

	set.insert(3);
	assert_eq!(set.height(), 2);
	set.validate();

	set.extend(4..100);
	set.validate();
	assert!(set.height() > 2);

	for key in 1..100 {
		set.remove(&key);
		set.validate();
	}

	assert!(set.is_empty());
	assert_eq!(set.height(), 1);
}

#[test]
pub fn clear() {
	let mut set = BTreeSet::with_order(Order::new(4).unwrap());
	set.extend(0..100);
	assert!(set.height() > 1);

	set.clear();
	assert!(set.is_empty());
	assert_eq!(set.height(), 1);
	assert_eq!(set.iter().next(), None);
	set.validate();

	set.extend([3, 1, 2]);
	assert_eq!(keys(&set), [1, 2, 3]);
}

#[test]
pub fn stress() {
	for max_key in [2, 3, 4, 5, 8] {
		let mut rng = SmallRng::seed_from_u64(SEED);
		let mut set = BTreeSet::with_order(Order::new(max_key).unwrap());
		let mut reference = collections::BTreeSet::new();

		for i in 0..2000 {
			let key: u32 = rng.gen_range(0..5000);
			assert_eq!(set.insert(key), reference.insert(key));

			if i % 50 == 0 {
				set.validate();
			}
		}

		set.validate();
		assert_eq!(set.len(), reference.len());
		assert!(set.iter().eq(reference.iter()));

		let target = reference.len() / 2;
		let mut i = 0;
		while reference.len() > target {
			let key: u32 = rng.gen_range(0..5000);
			assert_eq!(set.remove(&key), reference.remove(&key));

			if i % 50 == 0 {
				set.validate();
			}

			i += 1;
		}

		set.validate();
		assert_eq!(set.len(), reference.len());
		assert!(set.iter().eq(reference.iter()));

		for key in 0..5000 {
			assert_eq!(set.contains(&key), reference.contains(&key))
		}
	}
}

#[test]
pub fn debug() {
	let set: BTreeSet<i32> = [2, 1].iter().cloned().collect();
	assert_eq!(format!("{:?}", set), "{1, 2}");
}

const ITEMS: [(usize, usize); 100] = [
	(4223, 5948),
	(8175, 4629),
	(1411, 7458),
	(9208, 4040),
	(1246, 2287),
	(6568, 7583),
	(5426, 491),
	(7850, 8789),
	(2034, 9388),
	(1408, 7331),
	(7346, 5820),
	(9712, 4253),
	(5430, 7253),
	(1662, 5278),
	(9322, 777),
	(9256, 8116),
	(7971, 8071),
	(648, 3082),
	(7510, 2207),
	(8394, 7839),
	(57, 8834),
	(7770, 5437),
	(6388, 6755),
	(9177, 9904),
	(6487, 5143),
	(2231, 688),
	(7389, 4472),
	(577, 1930),
	(9130, 3222),
	(2230, 8268),
	(1211, 2354),
	(9237, 3643),
	(2912, 8471),
	(8783, 4977),
	(4325, 9566),
	(9355, 528),
	(9814, 9342),
	(1641, 6027),
	(3009, 8304),
	(4199, 2688),
	(7011, 9579),
	(8391, 8562),
	(1097, 5448),
	(1224, 5844),
	(5309, 2846),
	(7493, 8845),
	(3682, 48),
	(9165, 2755),
	(9959, 7420),
	(8158, 2616),
	(3210, 7795),
	(4418, 7790),
	(5592, 4184),
	(4111, 885),
	(742, 952),
	(2486, 6088),
	(6797, 271),
	(8829, 3005),
	(6444, 5818),
	(6566, 8783),
	(913, 2886),
	(2325, 1260),
	(4382, 3045),
	(5451, 1473),
	(9376, 8133),
	(9036, 4924),
	(5202, 7364),
	(9190, 5619),
	(8190, 2892),
	(9493, 500),
	(3043, 8315),
	(9220, 6396),
	(6400, 5692),
	(2709, 8547),
	(1218, 7403),
	(581, 117),
	(2577, 9373),
	(9349, 3186),
	(9021, 4874),
	(4207, 1781),
	(5201, 5305),
	(7889, 1996),
	(6327, 6377),
	(8120, 2338),
	(8213, 9072),
	(865, 6524),
	(5858, 5331),
	(1904, 3594),
	(9950, 8859),
	(518, 6551),
	(2674, 7081),
	(9848, 618),
	(5120, 5595),
	(259, 9662),
	(3077, 863),
	(4519, 7217),
	(3931, 6743),
	(2575, 6810),
	(1553, 5964),
	(4493, 3677)
];
