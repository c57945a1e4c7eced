use btree_stack::{generic::Node, Error, Order, DEFAULT_MAX_KEY};

#[test]
pub fn thresholds() {
	let order = Order::default();
	assert_eq!(order.max_key(), DEFAULT_MAX_KEY);

	let order = Order::new(4).unwrap();
	assert_eq!(order.max_children(), 5);
	assert_eq!(order.half_key(), 2);
	assert_eq!(order.center_key(), 1);
	assert_eq!(order.center_children(), 2);
	assert_eq!(order.half_children(), 3);

	let order = Order::new(5).unwrap();
	assert_eq!(order.half_key(), 2);
	assert_eq!(order.center_key(), 1);
	assert_eq!(order.half_children(), 3);
}

#[test]
pub fn invalid() {
	assert_eq!(Order::new(0), Err(Error::InvalidOrder(0)));
	assert_eq!(Order::new(1), Err(Error::InvalidOrder(1)));
	assert!(Order::new(2).is_ok());

	let max = isize::MAX as usize;
	assert_eq!(Order::new(max + 1), Err(Error::InvalidOrder(max + 1)));
	assert_eq!(Order::new(usize::MAX), Err(Error::InvalidOrder(usize::MAX)));

	let order = Order::new(max).unwrap();
	assert_eq!(order.encode_found(0), -isize::MAX);
	assert_eq!(order.decode_location(order.encode_found(max - 1)), Ok(max - 1));
}

#[test]
pub fn display() {
	let order = Order::new(4).unwrap();
	assert_eq!(
		order.to_string(),
		"MAX_KEY=4 HALF_KEY=2 CENTER_KEY=1 CENTER_CHILDREN=2 MAX_CHILDREN=5 HALF_CHILDREN=3"
	);
}

fn leaf(order: &Order, keys: &[i32]) -> Node<i32> {
	let mut node = Node::leaf(order);
	for (i, key) in keys.iter().enumerate() {
		assert!(node.add(i, *key, None, order).is_none());
	}

	node
}

#[test]
pub fn location() {
	let order = Order::new(2).unwrap();
	let node = leaf(&order, &[10, 20]);

	let cases = [(5, Err(0)), (10, Ok(0)), (15, Err(1)), (20, Ok(1)), (25, Err(2))];

	for (key, expected) in cases {
		let encoded = node.index_of_greatest_less_than(&key, &order);
		assert_eq!(order.decode_location(encoded), expected);
		assert_eq!(node.offset_of(&key), expected);

		// found keys are always negative.
		assert_eq!(encoded < 0, expected.is_ok());
	}

	assert_eq!(node.index_of_greatest_less_than(&10, &order), -2);
	assert_eq!(node.index_of_greatest_less_than(&20, &order), -1);
}

#[test]
pub fn location_default_order() {
	let order = Order::default();
	let node = leaf(&order, &[1, 3, 5, 7, 9, 11, 13, 15]);

	for key in 0..17 {
		let encoded = node.index_of_greatest_less_than(&key, &order);
		let expected = if key % 2 == 1 { Ok(key as usize / 2) } else { Err(key as usize / 2) };
		assert_eq!(order.decode_location(encoded), expected);
	}
}

#[test]
pub fn split() {
	let order = Order::new(3).unwrap();
	let mut node = leaf(&order, &[10, 20, 30]);
	assert!(node.is_full(&order));

	let (median, right) = node.add(3, 40, None, &order).unwrap();
	assert_eq!(median, 20);
	assert_eq!(node.keys(), &[10]);
	assert_eq!(right.keys(), &[30, 40]);

	let mut node = leaf(&order, &[10, 20, 30]);
	let (median, right) = node.add(1, 15, None, &order).unwrap();
	assert_eq!(median, 15);
	assert_eq!(node.keys(), &[10]);
	assert_eq!(right.keys(), &[20, 30]);

	let mut node = leaf(&order, &[10, 20, 30]);
	let (median, right) = node.add(0, 5, None, &order).unwrap();
	assert_eq!(median, 10);
	assert_eq!(node.keys(), &[5]);
	assert_eq!(right.keys(), &[20, 30]);
}
