//! Externally serialized sharing of a tree across threads.
//!
//! [`GenericTree`] has no internal synchronization: concurrent mutation of one
//! tree is not supported. [`SharedTree`] provides the coarse serialization the
//! tree needs when it is shared, a single `parking_lot::RwLock` around the
//! whole structure. Inserts (and the fix-up rotations they trigger) take the
//! write lock, so at most one writer runs at a time; lookups and traversals
//! take the read lock and may proceed in parallel.
//!
//! # Usage
//!
//! ```
//! use std::sync::Arc;
//! use std::thread;
//!
//! use redwood::sync::SharedTree;
//!
//! let tree = Arc::new(SharedTree::new());
//! let handles: Vec<_> = (0..4)
//! 	.map(|t| {
//! 		let tree = Arc::clone(&tree);
//! 		thread::spawn(move || {
//! 			for i in 0..10 {
//! 				tree.insert(t * 10 + i);
//! 			}
//! 		})
//! 	})
//! 	.collect();
//! for h in handles {
//! 	h.join().unwrap();
//! }
//! assert_eq!(tree.len(), 40);
//! ```

use std::borrow::Borrow;

use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::GenericTree;

/// A red-black tree behind a reader-writer lock.
///
/// Node handles are deliberately not returned: a [`crate::NodeId`] is only
/// meaningful while the caller can see the structure it points into. Use
/// [`SharedTree::read`] or [`SharedTree::write`] to work with handles under
/// a guard.
pub struct SharedTree<K = i64> {
	inner: RwLock<GenericTree<K>>,
}

impl<K> Default for SharedTree<K> {
	fn default() -> Self {
		Self::new()
	}
}

impl<K> From<GenericTree<K>> for SharedTree<K> {
	fn from(tree: GenericTree<K>) -> Self {
		SharedTree {
			inner: RwLock::new(tree),
		}
	}
}

impl<K> SharedTree<K> {
	/// Creates an empty shared tree.
	pub fn new() -> Self {
		GenericTree::new().into()
	}

	/// Creates a shared tree seeded with a single black root.
	pub fn with_root(key: K) -> Self {
		GenericTree::with_root(key).into()
	}

	/// Acquires shared access to the tree, blocking while a writer holds it.
	pub fn read(&self) -> RwLockReadGuard<'_, GenericTree<K>> {
		self.inner.read()
	}

	/// Acquires exclusive access to the tree.
	pub fn write(&self) -> RwLockWriteGuard<'_, GenericTree<K>> {
		self.inner.write()
	}

	/// Returns the number of keys.
	pub fn len(&self) -> usize {
		self.read().len()
	}

	/// Returns `true` if the tree holds no keys.
	pub fn is_empty(&self) -> bool {
		self.read().is_empty()
	}

	/// Consumes the wrapper and returns the tree.
	pub fn into_inner(self) -> GenericTree<K> {
		self.inner.into_inner()
	}
}

impl<K: Ord> SharedTree<K> {
	/// Inserts `key` under the write lock. Returns `false` for a duplicate.
	pub fn insert(&self, key: K) -> bool {
		self.write().insert(key).is_some()
	}

	/// Returns `true` if the tree contains `key`.
	///
	/// The key may be any borrowed form of the tree's key type.
	pub fn contains<Q>(&self, key: &Q) -> bool
	where
		K: Borrow<Q>,
		Q: Ord + ?Sized,
	{
		self.read().contains(key)
	}
}

impl<K: Clone> SharedTree<K> {
	/// Returns a snapshot of the keys in ascending order.
	pub fn to_vec(&self) -> Vec<K> {
		self.read().to_vec()
	}
}
