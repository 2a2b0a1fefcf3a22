//! # Integration Tests for Redwood
//!
//! This module contains end-to-end integration tests that exercise the tree
//! through its public API with realistic workloads.

use std::collections::BTreeSet;

use rand::prelude::*;
use redwood::{GenericTree, Tree};

/// Routes the crate's `log` output through the test harness.
fn init_logging() {
	let _ = simplelog::TestLogger::init(simplelog::LevelFilter::Trace, simplelog::Config::default());
}

// ===========================================================================
// Ordering Scenarios
// ===========================================================================

#[test]
fn ascending_insertions() {
	init_logging();
	let mut tree = Tree::new();
	for key in [0, 1, 2, 3, 4, 5] {
		assert!(tree.insert(key).is_some());
	}
	assert_eq!(tree.to_vec(), vec![0, 1, 2, 3, 4, 5]);
	tree.assert_invariants();
}

#[test]
fn descending_insertions() {
	init_logging();
	let mut tree = Tree::new();
	for key in [5, 4, 3, 2, 1, 0] {
		assert!(tree.insert(key).is_some());
	}
	assert_eq!(tree.to_vec(), vec![0, 1, 2, 3, 4, 5]);
	tree.assert_invariants();
}

#[test]
fn repeated_key() {
	let mut tree = Tree::new();
	let inserted: Vec<bool> = [6, 6, 6, 6].into_iter().map(|k| tree.insert(k).is_some()).collect();
	assert_eq!(inserted, vec![true, false, false, false]);
	assert_eq!(tree.to_vec(), vec![6]);
}

#[test]
fn duplicate_leaves_tree_unchanged() {
	let mut tree: Tree = [10, 5, 15, 8, 3, 12, 20].into_iter().collect();
	let root = tree.root();
	let before = format!("{tree:?}");

	for key in [10, 5, 15, 8, 3, 12, 20] {
		assert_eq!(tree.insert(key), None, "duplicate {key} was inserted");
	}

	assert_eq!(tree.root(), root);
	assert_eq!(format!("{tree:?}"), before);
}

// ===========================================================================
// Large Scale Operation Tests
// ===========================================================================

#[test]
fn large_scale_insert_and_lookup() {
	let mut tree = Tree::new();

	for i in 0..10_000 {
		tree.insert(i * 3);
	}

	tree.assert_invariants();
	assert_eq!(tree.len(), 10_000);

	for i in 0..30_000 {
		assert_eq!(tree.contains(&i), i % 3 == 0, "membership of {} is wrong", i);
	}
}

#[test]
fn large_scale_random_insertions() {
	let mut tree = Tree::new();
	let mut expected = BTreeSet::new();
	let mut rng = rand::rng();

	for _ in 0..10_000 {
		let key: i64 = rng.random_range(-5_000..5_000);
		assert_eq!(tree.insert(key).is_some(), expected.insert(key));
	}

	tree.assert_invariants();
	assert_eq!(tree.len(), expected.len());
	assert_eq!(tree.to_vec(), expected.into_iter().collect::<Vec<_>>());
}

#[test]
fn interleaved_insert_and_lookup() {
	let mut tree = Tree::new();
	let mut rng = StdRng::seed_from_u64(7);

	for _ in 0..5_000 {
		let key: i64 = rng.random_range(0..1_000);
		let present = tree.contains(&key);
		assert_eq!(tree.insert(key).is_none(), present);
		assert!(tree.contains(&key));
	}
	tree.assert_invariants();
}

#[test]
fn extreme_keys() {
	let tree: Tree = [i64::MAX, i64::MIN, 0, -1, 1].into_iter().collect();
	assert_eq!(tree.to_vec(), vec![i64::MIN, -1, 0, 1, i64::MAX]);
	assert_eq!(tree.first(), Some(&i64::MIN));
	assert_eq!(tree.last(), Some(&i64::MAX));
	tree.assert_invariants();
}

// ===========================================================================
// Seeded Harness Workload
// ===========================================================================

/// Mirrors the intended driver: seed with one key, then perform N random
/// insertions, retrying whenever a duplicate is drawn.
#[test]
fn seeded_random_harness() {
	init_logging();
	let mut rng = StdRng::seed_from_u64(42);
	let mut tree = Tree::with_root(50);
	let mut retries = 0;

	for _ in 0..10 {
		while tree.insert(rng.random_range(0..100)).is_none() {
			retries += 1;
		}
	}

	assert_eq!(tree.len(), 11);
	assert!(tree.contains(&50));
	tree.assert_invariants();

	let rendered = tree.to_string();
	assert!(rendered.starts_with('[') && rendered.ends_with(']'));
	assert_eq!(rendered.split(' ').count(), 11, "rendered {rendered} after {retries} retries");
}

// ===========================================================================
// Generic Keys
// ===========================================================================

#[test]
fn string_keys() {
	let mut tree: GenericTree<String> = GenericTree::new();
	for word in ["pear", "apple", "fig", "apple", "kiwi"] {
		tree.insert(word.to_string());
	}
	assert_eq!(tree.to_vec(), vec!["apple", "fig", "kiwi", "pear"]);
	assert!(tree.contains("fig"));
	tree.assert_invariants();
}

#[test]
fn tuple_keys() {
	let tree: GenericTree<(u8, char)> = [(2, 'b'), (1, 'z'), (2, 'a')].into_iter().collect();
	let keys: Vec<_> = tree.iter().copied().collect();
	assert_eq!(keys, vec![(1, 'z'), (2, 'a'), (2, 'b')]);
}
