//! Iterators for the `GenericTree` data structure
//!
//! [`Iter`] walks the tree in order without recursion. Each end keeps a stack
//! of the ancestors it still has to visit: the front stack holds the left
//! spine below the next smallest key, the back stack the right spine below
//! the next largest. A count of remaining keys stops the two ends from
//! crossing.
use std::iter::FusedIterator;

use smallvec::SmallVec;

use crate::node::{Link, NodeId, Side};
use crate::GenericTree;

/// Red-black height is at most `2 * log2(n + 1)`, so 64 levels cover any
/// tree with fewer than 2^32 keys without spilling to the heap.
type Spine = SmallVec<[NodeId; 64]>;

/// Borrowing in-order iterator over the keys of a tree.
///
/// Created by [`GenericTree::iter`].
///
/// # Example
///
/// ```
/// use redwood::Tree;
///
/// let tree: Tree = [3, 1, 2].into_iter().collect();
/// let forward: Vec<_> = tree.iter().copied().collect();
/// let backward: Vec<_> = tree.iter().rev().copied().collect();
///
/// assert_eq!(forward, vec![1, 2, 3]);
/// assert_eq!(backward, vec![3, 2, 1]);
/// ```
pub struct Iter<'t, K> {
	tree: &'t GenericTree<K>,
	front: Spine,
	back: Spine,
	remaining: usize,
}

impl<'t, K> Iter<'t, K> {
	pub(crate) fn new(tree: &'t GenericTree<K>) -> Iter<'t, K> {
		let mut iter = Iter {
			tree,
			front: Spine::new(),
			back: Spine::new(),
			remaining: tree.len(),
		};
		if let Some(root) = tree.root() {
			iter.descend(Link::Node(root), Side::Left);
			iter.descend(Link::Node(root), Side::Right);
		}
		iter
	}

	/// Pushes `from` and every node along its `side` spine onto the stack
	/// for that end.
	fn descend(&mut self, from: Link, side: Side) {
		let stack = match side {
			Side::Left => &mut self.front,
			Side::Right => &mut self.back,
		};
		let mut cur = from;
		while let Link::Node(id) = cur {
			stack.push(id);
			cur = self.tree.child(id, side);
		}
	}

	/// Pops the next node for the end that walks toward `side`, then queues
	/// the subtree on the other side of it.
	fn step(&mut self, side: Side) -> Option<&'t K> {
		if self.remaining == 0 {
			return None;
		}
		let stack = match side {
			Side::Left => &mut self.front,
			Side::Right => &mut self.back,
		};
		let id = stack.pop()?;
		self.remaining -= 1;
		let tree = self.tree;
		self.descend(tree.child(id, side.opposite()), side);
		Some(tree.key(id))
	}
}

impl<'t, K> Iterator for Iter<'t, K> {
	type Item = &'t K;

	fn next(&mut self) -> Option<Self::Item> {
		self.step(Side::Left)
	}

	fn size_hint(&self) -> (usize, Option<usize>) {
		(self.remaining, Some(self.remaining))
	}
}

impl<K> DoubleEndedIterator for Iter<'_, K> {
	fn next_back(&mut self) -> Option<Self::Item> {
		self.step(Side::Right)
	}
}

impl<K> ExactSizeIterator for Iter<'_, K> {}

impl<K> FusedIterator for Iter<'_, K> {}

impl<K> Clone for Iter<'_, K> {
	fn clone(&self) -> Self {
		Iter {
			tree: self.tree,
			front: self.front.clone(),
			back: self.back.clone(),
			remaining: self.remaining,
		}
	}
}
