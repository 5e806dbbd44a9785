extern crate rand;
extern crate treap_forest;

use rand::{Rng, SeedableRng, XorShiftRng};
use treap_forest::{Config, Error, Forest, Treap};

const NUM_OF_OPERATIONS: usize = 2_000;

fn rng() -> XorShiftRng {
    SeedableRng::from_seed([1, 1, 1, 1])
}

fn forest() -> Forest<i64> {
    Forest::with_config(Config::seeded(0x5eed))
}

fn keyed(forest: &mut Forest<i64>, keys: &[i64]) -> Treap {
    let mut tree = Treap::empty();
    for &key in keys {
        forest.insert(&mut tree, key);
    }
    tree
}

fn sorted(mut keys: Vec<i64>) -> Vec<i64> {
    keys.sort();
    keys
}

fn collect(forest: &Forest<i64>, tree: &Treap) -> Vec<i64> {
    forest.iter(tree).cloned().collect()
}

#[test]
fn test_scenario_merge_singletons() {
    let mut forest = forest();
    let mut root = forest.make_node(10);
    for &key in &[20, 5, 15] {
        let node = forest.make_node(key);
        root = forest.merge(root, node);
    }
    assert_eq!(forest.size(&root), 4);
    assert!(forest.validate_sequence(&root).is_ok());
    assert_eq!(sorted(collect(&forest, &root)), vec![5, 10, 15, 20]);
}

#[test]
fn test_scenario_insert_and_split() {
    let mut forest = forest();
    let root = keyed(&mut forest, &[10, 20, 5, 15]);
    assert_eq!(forest.size(&root), 4);
    assert_eq!(collect(&forest, &root), vec![5, 10, 15, 20]);

    let (left, right) = forest.split(root, &15);
    assert!(forest.validate(&left).is_ok());
    assert!(forest.validate(&right).is_ok());
    assert!(*forest.key(forest.last(&left)).unwrap() < 15);
    assert!(*forest.key(forest.begin(&right)).unwrap() >= 15);

    let mut union = collect(&forest, &left);
    union.extend(collect(&forest, &right));
    assert_eq!(sorted(union), vec![5, 10, 15, 20]);
}

#[test]
fn test_scenario_implicit_split() {
    let mut forest = forest();
    let mut list = Treap::empty();
    for value in 1..4 {
        forest.push_back(&mut list, value);
    }
    let (left, right) = forest.split_by_size(list, 1);
    assert_eq!(forest.size(&left), 1);
    assert_eq!(forest.size(&right), 2);
    assert_eq!(collect(&forest, &left), vec![1]);
    assert_eq!(collect(&forest, &right), vec![2, 3]);
}

#[test]
fn test_scenario_range_max() {
    let mut forest = forest();
    let tree = keyed(&mut forest, &[50, 30, 70]);
    assert_eq!(forest.range_max(&tree), Some(&70));
    assert_eq!(forest.range_max(&Treap::empty()), None);
    let single = forest.make_node(-4);
    assert_eq!(forest.range_max(&single), Some(&-4));
}

#[test]
fn test_invariants_under_random_merges_and_splits() {
    let mut rng = rng();
    let mut forest = forest();
    let mut expected = Vec::new();
    let mut tree = Treap::empty();
    for _ in 0..NUM_OF_OPERATIONS {
        let key = rng.gen_range(-500, 500);
        forest.insert(&mut tree, key);
        expected.push(key);
    }

    for _ in 0..100 {
        let pivot = rng.gen_range(-600, 600);
        let (left, right) = forest.split(tree, &pivot);
        assert!(forest.validate(&left).is_ok());
        assert!(forest.validate(&right).is_ok());
        assert!(forest.iter(&left).all(|key| *key < pivot));
        assert!(forest.iter(&right).all(|key| *key >= pivot));
        tree = forest.merge(left, right);
        assert!(forest.validate(&tree).is_ok());
    }

    assert_eq!(forest.size(&tree), NUM_OF_OPERATIONS);
    assert_eq!(collect(&forest, &tree), sorted(expected));
}

#[test]
fn test_split_then_merge_preserves_priorities() {
    let mut rng = rng();
    let mut forest = forest();
    let mut tree = Treap::empty();
    for _ in 0..200 {
        forest.insert(&mut tree, rng.gen_range(0, 50));
    }
    assert!(forest.validate(&tree).is_ok());
    let root_before = forest.root_priority(&tree);
    let before = collect(&forest, &tree);

    let (left, right) = forest.split(tree, &25);
    let tree = forest.merge(left, right);
    assert!(forest.validate(&tree).is_ok());
    assert_eq!(forest.root_priority(&tree), root_before);
    assert_eq!(collect(&forest, &tree), before);
}

#[test]
fn test_duplicate_keys_survive_mixed_operations() {
    let mut rng = rng();
    let mut forest = forest();
    let mut expected = Vec::new();
    let mut tree = Treap::empty();

    for _ in 0..NUM_OF_OPERATIONS {
        match rng.gen_range(0, 4) {
            0 | 1 => {
                let key = rng.gen_range(0, 50);
                forest.insert(&mut tree, key);
                expected.push(key);
            },
            2 => {
                let key = rng.gen_range(0, 50);
                let removed = forest.remove(&mut tree, &key);
                match expected.iter().position(|value| *value == key) {
                    Some(index) => {
                        expected.remove(index);
                        assert_eq!(removed, Some(key));
                    },
                    None => assert_eq!(removed, None),
                }
            },
            _ => {
                let index = rng.gen_range(0, expected.len() + 1);
                let (left, right) = forest.split_by_size(tree, index);
                assert!(forest.validate(&left).is_ok());
                assert!(forest.validate(&right).is_ok());
                tree = forest.merge_implicit(left, right);
            },
        }
        assert!(forest.validate(&tree).is_ok());
    }

    assert_eq!(collect(&forest, &tree), sorted(expected));
}

#[test]
fn test_positional_law() {
    let mut rng = rng();
    let mut forest = forest();
    let values: Vec<i64> = (0..300).map(|_| rng.gen_range(-1000, 1000)).collect();
    let mut tree = Treap::empty();
    for &value in &values {
        forest.push_back(&mut tree, value);
    }

    for n in vec![0, 1, 150, 299, 300, 400] {
        let (left, right) = forest.split_by_size(tree, n);
        let expected_left = n.min(values.len());
        assert_eq!(forest.size(&left), expected_left);
        assert_eq!(forest.size(&right), values.len() - expected_left);
        assert!(forest.validate_sequence(&left).is_ok());
        assert!(forest.validate_sequence(&right).is_ok());
        tree = forest.merge_implicit(left, right);
        assert_eq!(collect(&forest, &tree), values);
    }
}

#[test]
fn test_sequence_operations_match_vec() {
    let mut rng = rng();
    let mut forest = forest();
    let mut tree = Treap::empty();
    let mut expected: Vec<i64> = Vec::new();

    for _ in 0..NUM_OF_OPERATIONS {
        match rng.gen_range(0, 4) {
            0 | 1 => {
                let index = rng.gen_range(0, expected.len() + 1);
                let value = rng.gen::<i64>();
                forest.insert_at(&mut tree, index, value).unwrap();
                expected.insert(index, value);
            },
            2 if !expected.is_empty() => {
                let index = rng.gen_range(0, expected.len());
                assert_eq!(forest.remove_at(&mut tree, index), Ok(expected.remove(index)));
            },
            _ if !expected.is_empty() => {
                let shift = rng.gen_range(0, 2 * expected.len());
                forest.rotate_left(&mut tree, shift);
                let len = expected.len();
                expected.rotate_left(shift % len);
            },
            _ => {},
        }
    }

    assert!(forest.validate_sequence(&tree).is_ok());
    assert_eq!(collect(&forest, &tree), expected);
    for (index, value) in expected.iter().enumerate() {
        assert_eq!(forest.get(&tree, index), Some(value));
    }
    assert_eq!(forest.get(&tree, expected.len()), None);
    assert_eq!(
        forest.remove_at(&mut tree, expected.len()),
        Err(Error::IndexOutOfBounds {
            index: expected.len(),
            len: expected.len(),
        }),
    );
}

#[test]
fn test_range_max_between_matches_slices() {
    let mut rng = rng();
    let mut forest = forest();
    let values: Vec<i64> = (0..200).map(|_| rng.gen_range(0, 10_000)).collect();
    let mut tree = Treap::empty();
    for &value in &values {
        forest.push_back(&mut tree, value);
    }

    for _ in 0..200 {
        let start = rng.gen_range(0, values.len());
        let end = rng.gen_range(start, values.len() + 1);
        let expected = values[start..end].iter().max();
        assert_eq!(forest.range_max_between(&mut tree, start, end), expected);
    }
    assert_eq!(collect(&forest, &tree), values);
}

#[test]
fn test_remove_and_contains() {
    let mut rng = rng();
    let mut forest = forest();
    let mut expected = Vec::new();
    let mut tree = Treap::empty();
    for _ in 0..500 {
        let key = rng.gen_range(0, 100);
        forest.insert(&mut tree, key);
        expected.push(key);
    }
    expected.sort();

    for key in 0..100 {
        assert_eq!(forest.contains(&tree, &key), expected.binary_search(&key).is_ok());
    }
    for key in (0..100).step_by(3) {
        while let Ok(index) = expected.binary_search(&key) {
            expected.remove(index);
            assert_eq!(forest.remove(&mut tree, &key), Some(key));
        }
        assert_eq!(forest.remove(&mut tree, &key), None);
    }
    assert!(forest.validate(&tree).is_ok());
    assert_eq!(collect(&forest, &tree), expected);
}

#[test]
fn test_cursor_navigation() {
    let mut forest = forest();
    let tree = keyed(&mut forest, &[8, 3, 12, 1, 5]);

    let mut cursor = forest.begin(&tree);
    let mut ascending = Vec::new();
    while cursor != forest.end() {
        ascending.push(*forest.key(cursor).unwrap());
        forest.advance(&mut cursor).unwrap();
    }
    assert_eq!(ascending, vec![1, 3, 5, 8, 12]);
    assert_eq!(forest.key(cursor), Err(Error::TerminalCursor));
    assert_eq!(forest.advance(&mut cursor), Err(Error::TerminalCursor));
    assert_eq!(forest.successor(cursor), forest.end());

    let mut cursor = forest.last(&tree);
    let mut descending = Vec::new();
    while !cursor.is_end() {
        descending.push(*forest.key(cursor).unwrap());
        cursor = forest.predecessor(cursor);
    }
    assert_eq!(descending, vec![12, 8, 5, 3, 1]);

    assert_eq!(forest.begin(&Treap::empty()), forest.end());
}

#[test]
fn test_destroy_releases_nodes() {
    let mut forest = forest();
    let tree = keyed(&mut forest, &[1, 2, 3]);
    let other = keyed(&mut forest, &[4]);
    let cursor = forest.begin(&tree);
    assert_eq!(forest.node_count(), 4);

    assert_eq!(forest.destroy(tree), 3);
    assert_eq!(forest.node_count(), 1);
    assert_eq!(forest.key(cursor), Err(Error::InvalidCursor));

    let fresh = forest.make_node(9);
    assert_eq!(forest.key(cursor), Err(Error::InvalidCursor));
    assert_eq!(forest.successor(cursor), forest.end());
    assert_eq!(forest.key(forest.begin(&fresh)), Ok(&9));
    assert_eq!(forest.destroy(fresh), 1);
    assert_eq!(forest.drain(other), vec![4]);
    assert_eq!(forest.node_count(), 0);
}

#[test]
fn test_seeded_forests_build_identical_shapes() {
    let build = || {
        let mut forest = forest();
        let tree = keyed(&mut forest, &[9, 4, 7, 1, 8, 2]);
        (forest.root_key(&tree).cloned(), forest.root_priority(&tree))
    };
    assert_eq!(build(), build());
}

#[test]
fn test_zero_chunk_size_is_rejected() {
    let config = Config {
        chunk_size: 0,
        seed: Some(1),
    };
    assert!(config.validate().is_err());
    assert!(Forest::<i64>::try_with_config(config).is_err());
    assert!(Forest::<i64>::try_with_config(Config::seeded(1)).is_ok());
}
