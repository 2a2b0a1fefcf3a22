//! Rotation and post-insertion rebalancing.
//!
//! ## Rotation
//!
//! ```text
//!        P                          P
//!        │                          │
//!        S      rotate(S, Left)     C
//!       / \     ─────────────►     / \
//!      a   C                      S   c
//!         / \                    / \
//!        b   c                  a   b
//! ```
//!
//! The child of `S` opposite the rotation side (`C`) is promoted into `S`'s
//! slot under `P`, `S` becomes `C`'s child on the rotation side, and `C`'s
//! inner subtree `b` moves across to `S`. Three parent back-references change
//! (`C`, `S` and the root of `b`), plus one child slot of `P` or the tree's
//! root handle.
//!
//! ## Fix-Up
//!
//! A freshly attached node is red. The only invariant that can break is
//! "no red node has a red child", and only between the new node and its
//! parent. The fix-up loop pushes that violation upward:
//!
//! | case                         | action                                       | next          |
//! |------------------------------|----------------------------------------------|---------------|
//! | node is the root             | paint it black                               | done          |
//! | parent is the root           | nothing, the root is black                   | done          |
//! | node or parent black         | nothing                                      | done          |
//! | aunt red                     | parent, aunt black; grandparent red          | grandparent   |
//! | aunt black, straight line    | rotate grandparent away; recolor             | done          |
//! | aunt black, zig-zag          | rotate parent, rotate grandparent; recolor   | done          |
//!
//! Only the red-aunt case loops, and it moves two levels up each time, so the
//! loop runs at most `height / 2` times and performs at most two rotations.

use log::trace;

use crate::error::{Error, Result};
use crate::node::{Color, Link, NodeId, Side};
use crate::GenericTree;

impl<K> GenericTree<K> {
	/// Rotates the subtree rooted at `subtree` toward `side`.
	///
	/// The child of `subtree` on the opposite side is promoted into
	/// `subtree`'s position and returned. When `subtree` was the root of the
	/// whole tree, the promoted node becomes the new root; callers can detect
	/// this with [`GenericTree::parent`] returning `None`.
	///
	/// Rotation only relinks nodes, so the in-order key sequence is unchanged.
	/// Colors are left alone.
	///
	/// # Errors
	///
	/// - [`Error::RotateSentinel`] if the child to be promoted is a sentinel.
	///   The tree is not modified.
	/// - [`Error::BrokenLink`] if `subtree`'s parent does not link back to it.
	///
	/// # Example
	///
	/// ```
	/// use redwood::{Side, Tree};
	///
	/// let mut tree: Tree = [20, 10, 30, 25, 35].into_iter().collect();
	/// let root = tree.root().unwrap();
	///
	/// let promoted = tree.rotate(root, Side::Left).unwrap();
	/// assert_eq!(*tree.key(promoted), 30);
	/// assert_eq!(tree.root(), Some(promoted));
	/// assert_eq!(tree.to_vec(), vec![10, 20, 25, 30, 35]);
	/// ```
	pub fn rotate(&mut self, subtree: NodeId, side: Side) -> Result<NodeId> {
		let promoted = match self.node(subtree).child(side.opposite()) {
			Link::Node(id) => id,
			Link::Nil => {
				return Err(Error::RotateSentinel {
					node: subtree,
					side,
				})
			}
		};
		// Resolve the slot under the old parent before any link changes.
		let parent = self.node(subtree).parent;
		let slot = self.direction(subtree)?.side();

		let inner = self.node(promoted).child(side);
		*self.node_mut(subtree).child_mut(side.opposite()) = inner;
		if let Link::Node(inner) = inner {
			self.node_mut(inner).parent = Some(subtree);
		}

		*self.node_mut(promoted).child_mut(side) = Link::Node(subtree);
		self.node_mut(subtree).parent = Some(promoted);

		self.node_mut(promoted).parent = parent;
		match (parent, slot) {
			(Some(parent), Some(slot)) => {
				*self.node_mut(parent).child_mut(slot) = Link::Node(promoted);
			}
			_ => self.root = Some(promoted),
		}

		trace!("rotated {side} around {subtree}, promoted {promoted}");
		Ok(promoted)
	}

	/// Restores the red-black invariants after `node` was attached as a red
	/// leaf.
	pub(crate) fn fix_up(&mut self, mut node: NodeId) -> Result<()> {
		loop {
			let Some(parent) = self.parent(node) else {
				trace!("fix-up reached the root at {node}");
				self.node_mut(node).color = Color::Black;
				return Ok(());
			};
			let Some(grandparent) = self.parent(parent) else {
				return Ok(());
			};
			if !(self.color(node).is_red() && self.color(parent).is_red()) {
				return Ok(());
			}

			let aunt = self.aunt(node)?.unwrap_or(Link::Nil);
			if let Link::Node(aunt) = aunt {
				if self.color(aunt).is_red() {
					trace!("red aunt {aunt}: recoloring and moving up to {grandparent}");
					self.node_mut(aunt).color = Color::Black;
					self.node_mut(parent).color = Color::Black;
					self.node_mut(grandparent).color = Color::Red;
					node = grandparent;
					continue;
				}
			}

			let (Some(parent_side), Some(node_side)) =
				(self.direction(parent)?.side(), self.direction(node)?.side())
			else {
				unreachable!("a node with a grandparent has a direction");
			};

			let promoted = if parent_side == node_side {
				trace!("black aunt, straight line at {node}: rotating {grandparent}");
				self.rotate(grandparent, parent_side.opposite())?
			} else {
				trace!("black aunt, zig-zag at {node}: rotating {parent} then {grandparent}");
				self.rotate(parent, parent_side)?;
				self.rotate(grandparent, node_side)?
			};
			self.node_mut(promoted).color = Color::Black;
			self.node_mut(grandparent).color = Color::Red;
			return Ok(());
		}
	}
}
