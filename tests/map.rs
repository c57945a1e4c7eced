use btree_stack::{BTreeMap, Error, Order};
use rand::{rngs::SmallRng, Rng, SeedableRng};
use std::collections::HashMap;

const SEED: u64 = 0x6d61_7073_6565_6421;

#[test]
pub fn insert_get_remove() {
	let mut map = BTreeMap::with_order(Order::new(4).unwrap());

	for i in 0..100 {
		assert_eq!(map.insert(i, i * 10), None);
		map.validate();
	}

	assert_eq!(map.len(), 100);
	assert_eq!(map.get(&42), Some(&420));
	assert_eq!(map.get_key_value(&42), Some((&42, &420)));
	assert_eq!(map.get(&100), None);

	assert_eq!(map.insert(42, 0), Some(420));
	assert_eq!(map[&42], 0);
	assert_eq!(map.len(), 100);

	for i in (0..100).step_by(2) {
		assert!(map.remove(&i).is_some());
		map.validate();
	}

	assert_eq!(map.len(), 50);
	assert!(map.keys().cloned().eq((1..100).step_by(2)));
	assert!(map.values().cloned().eq((1..100).step_by(2).map(|i| i * 10)));
	assert_eq!(map.remove_entry(&1), Some((1, 10)));
}

#[test]
pub fn reference() {
	let mut rng = SmallRng::seed_from_u64(SEED);
	let mut map = BTreeMap::with_order(Order::new(5).unwrap());
	let mut reference = HashMap::new();

	for _ in 0..3000 {
		let key: u16 = rng.gen_range(0..1000);
		let value: u32 = rng.gen();

		if rng.gen_bool(0.3) {
			assert_eq!(map.remove(&key), reference.remove(&key));
		} else {
			assert_eq!(map.insert(key, value), reference.insert(key, value));
		}
	}

	map.validate();
	assert_eq!(map.len(), reference.len());

	for (key, value) in &reference {
		assert_eq!(map.get(key), Some(value));
		assert!(map.contains_value(value));
	}

	let mut keys: Vec<_> = reference.keys().cloned().collect();
	keys.sort_unstable();
	assert!(map.keys().cloned().eq(keys));
}

#[test]
pub fn string_keys() {
	let mut map = BTreeMap::new();
	map.insert("b".to_string(), 2);
	map.insert("a".to_string(), 1);

	assert!(map.contains_key("a"));
	assert_eq!(map.get("b"), Some(&2));
	assert_eq!(map.remove("a"), Some(1));
	assert!(!map.contains_key("a"));
}

#[test]
pub fn update_invalidates_cursor() {
	let mut map: BTreeMap<i32, i32> = (0..10).map(|i| (i, i)).collect();

	let mut cursor = map.cursor();
	assert_eq!(cursor.next(&map), Ok((&0, &0)));

	map.insert(5, 50);
	assert_eq!(map.len(), 10);
	assert_eq!(cursor.next(&map), Err(Error::ConcurrentModification));

	let mut cursor = map.cursor();
	*map.get_mut(&5).unwrap() = 500;
	assert_eq!(cursor.next(&map), Err(Error::ConcurrentModification));

	// looking up an absent key does not count.
	let mut cursor = map.cursor();
	assert!(map.get_mut(&100).is_none());
	assert_eq!(cursor.next(&map), Ok((&0, &0)));
	assert_eq!(cursor.remove(), Err(Error::Unsupported));
}

#[test]
pub fn iter() {
	let map: BTreeMap<i32, &str> = [(3, "c"), (1, "a"), (2, "b")].iter().cloned().collect();

	let entries: Vec<_> = map.iter().map(|(k, v)| (*k, *v)).collect();
	assert_eq!(entries, [(1, "a"), (2, "b"), (3, "c")]);
	assert_eq!(map.iter().len(), 3);
	assert_eq!(format!("{:?}", map), r#"{1: "a", 2: "b", 3: "c"}"#);
}

#[test]
pub fn clear() {
	let mut map: BTreeMap<i32, i32> = (0..100).map(|i| (i, i)).collect();
	map.clear();

	assert!(map.is_empty());
	assert_eq!(map.height(), 1);
	assert_eq!(map.get(&1), None);

	map.extend([(1, 1)]);
	assert_eq!(map.len(), 1);
}
