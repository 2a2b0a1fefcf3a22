//! # Concurrency Tests for Redwood
//!
//! The tree has no internal synchronization; sharing goes through
//! `SharedTree`, which serializes writers behind a reader-writer lock. These
//! tests verify that concurrent use through the wrapper loses no keys and
//! leaves a valid tree behind.
//!
//! ## Test Categories
//!
//! - Basic concurrent tests: Lower contention, always run
//! - Stress tests: Higher contention, marked with `#[ignore]` - run with `cargo test -- --ignored`

use rand::prelude::*;
use redwood::sync::SharedTree;
use redwood::Tree;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;

// ===========================================================================
// Basic Concurrent Insert Tests
// ===========================================================================

#[test]
fn concurrent_insert_disjoint_ranges() {
	let tree = Arc::new(SharedTree::<i64>::new());
	let num_threads = 4;
	let entries_per_thread = 250;

	let handles: Vec<_> = (0..num_threads)
		.map(|t| {
			let tree = Arc::clone(&tree);
			thread::spawn(move || {
				for i in 0..entries_per_thread {
					assert!(tree.insert(t * entries_per_thread + i));
				}
			})
		})
		.collect();

	for h in handles {
		h.join().unwrap();
	}

	assert_eq!(tree.len(), (num_threads * entries_per_thread) as usize);
	assert_eq!(tree.to_vec(), (0..num_threads * entries_per_thread).collect::<Vec<_>>());
	tree.read().assert_invariants();
}

#[test]
fn concurrent_insert_same_keys() {
	let tree = Arc::new(SharedTree::<i64>::new());
	let num_threads = 4;
	let successes = Arc::new(AtomicUsize::new(0));

	// All threads race to insert the same small set of keys
	let handles: Vec<_> = (0..num_threads)
		.map(|_| {
			let tree = Arc::clone(&tree);
			let successes = Arc::clone(&successes);
			thread::spawn(move || {
				for i in 0..100 {
					if tree.insert(i % 10) {
						successes.fetch_add(1, Ordering::Relaxed);
					}
				}
			})
		})
		.collect();

	for h in handles {
		h.join().unwrap();
	}

	// Exactly one insert per key won; the rest were rejected as duplicates
	assert_eq!(successes.load(Ordering::Relaxed), 10);
	assert_eq!(tree.to_vec(), (0..10).collect::<Vec<_>>());
}

// ===========================================================================
// Basic Concurrent Lookup Tests
// ===========================================================================

#[test]
fn many_concurrent_readers() {
	let tree: Tree = (0..1_000).collect();
	let tree = Arc::new(SharedTree::from(tree));

	let handles: Vec<_> = (0..4)
		.map(|_| {
			let tree = Arc::clone(&tree);
			thread::spawn(move || {
				let guard = tree.read();
				let keys: Vec<i64> = guard.iter().copied().collect();
				assert_eq!(keys.len(), 1_000);
				assert!(keys.windows(2).all(|w| w[0] < w[1]));
				(0..1_000).filter(|k| guard.contains(k)).count()
			})
		})
		.collect();

	for h in handles {
		assert_eq!(h.join().unwrap(), 1_000);
	}
}

#[test]
fn readers_see_consistent_snapshots_during_writes() {
	let tree = Arc::new(SharedTree::with_root(0i64));

	let writer = {
		let tree = Arc::clone(&tree);
		thread::spawn(move || {
			for i in 1..2_000 {
				tree.insert(i);
			}
		})
	};

	let readers: Vec<_> = (0..3)
		.map(|_| {
			let tree = Arc::clone(&tree);
			thread::spawn(move || {
				for _ in 0..200 {
					let guard = tree.read();
					// Keys arrive in ascending order, so any snapshot is a prefix
					let len = guard.len() as i64;
					assert_eq!(guard.first(), Some(&0));
					assert_eq!(guard.last(), Some(&(len - 1)));
					guard.assert_invariants();
				}
			})
		})
		.collect();

	writer.join().unwrap();
	for r in readers {
		r.join().unwrap();
	}
	assert_eq!(tree.len(), 2_000);
}

#[test]
fn handles_under_write_guard() {
	let tree = SharedTree::<i64>::new();
	{
		let mut guard = tree.write();
		guard.extend([20, 10, 30]);
		let id = guard.insert(25).unwrap();
		assert_eq!(*guard.key(id), 25);
		assert!(guard.parent(id).is_some());
	}
	assert!(tree.contains(&25));
	assert_eq!(tree.into_inner().to_vec(), vec![10, 20, 25, 30]);
}

// ===========================================================================
// Stress Tests
// ===========================================================================

#[test]
#[ignore]
fn stress_random_writers_and_readers() {
	let tree = Arc::new(SharedTree::<i64>::new());
	let inserted = Arc::new(AtomicUsize::new(0));

	let handles: Vec<_> = (0..8)
		.map(|t| {
			let tree = Arc::clone(&tree);
			let inserted = Arc::clone(&inserted);
			thread::spawn(move || {
				let mut rng = StdRng::seed_from_u64(t);
				for _ in 0..20_000 {
					let key = rng.random_range(0..50_000);
					if rng.random_bool(0.5) {
						if tree.insert(key) {
							inserted.fetch_add(1, Ordering::Relaxed);
						}
					} else {
						let _ = tree.contains(&key);
					}
				}
			})
		})
		.collect();

	for h in handles {
		h.join().unwrap();
	}

	assert_eq!(tree.len(), inserted.load(Ordering::Relaxed));
	tree.read().assert_invariants();
}

#[test]
fn borrowed_key_lookups() {
	let tree = SharedTree::<String>::new();
	for word in ["oak", "elm", "ash"] {
		assert!(tree.insert(word.to_string()));
	}

	assert!(tree.contains("elm"));
	assert!(!tree.contains("yew"));
	assert_eq!(tree.to_vec(), vec!["ash", "elm", "oak"]);
}
