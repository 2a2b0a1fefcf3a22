//! Structural navigation queries.
//!
//! Every query here is read-only and works purely through the parent and
//! child links of the arena. Queries that do not apply to a node (the parent
//! of the root, the sibling of the root, a niece through a sentinel sibling)
//! return `None`.
//!
//! Queries that can land on an empty child slot return a [`Link`], so callers
//! can tell a sentinel leaf (`Some(Link::Nil)`, which is black) apart from a
//! relation that does not exist at all (`None`).

use crate::error::{Error, Result};
use crate::node::{Direction, Link, NodeId};
use crate::GenericTree;

impl<K> GenericTree<K> {
	/// Returns which child slot of its parent holds `node`.
	///
	/// # Errors
	///
	/// [`Error::BrokenLink`] if the recorded parent holds `node` in neither
	/// slot.
	pub fn direction(&self, node: NodeId) -> Result<Direction> {
		let Some(parent) = self.node(node).parent else {
			return Ok(Direction::Root);
		};
		let p = self.node(parent);
		if p.left == Link::Node(node) {
			Ok(Direction::Left)
		} else if p.right == Link::Node(node) {
			Ok(Direction::Right)
		} else {
			Err(Error::BrokenLink {
				node,
				parent,
			})
		}
	}

	/// Returns the parent of `node`, or `None` for the root.
	#[inline]
	pub fn parent(&self, node: NodeId) -> Option<NodeId> {
		self.node(node).parent
	}

	/// Returns the parent of the parent of `node`.
	#[inline]
	pub fn grandparent(&self, node: NodeId) -> Option<NodeId> {
		self.parent(node).and_then(|p| self.parent(p))
	}

	/// Returns the parent's other child, which may be a sentinel.
	///
	/// # Errors
	///
	/// [`Error::BrokenLink`] if the parent does not link back to `node`.
	pub fn sibling(&self, node: NodeId) -> Result<Option<Link>> {
		let side = match self.direction(node)?.side() {
			Some(side) => side,
			None => return Ok(None),
		};
		let Some(parent) = self.parent(node) else {
			return Ok(None);
		};
		Ok(Some(self.node(parent).child(side.opposite())))
	}

	/// Returns the sibling of the parent of `node`.
	pub fn aunt(&self, node: NodeId) -> Result<Option<Link>> {
		match self.parent(node) {
			Some(parent) => self.sibling(parent),
			None => Ok(None),
		}
	}

	/// Returns the sibling's child on the side away from `node`.
	///
	/// `None` when `node` has no sibling or the sibling is a sentinel.
	pub fn distant_niece(&self, node: NodeId) -> Result<Option<Link>> {
		let Some(sibling) = self.sibling(node)?.and_then(Link::node) else {
			return Ok(None);
		};
		// A node with a sibling is never the root, so the side is present.
		let side = self.direction(node)?.side();
		Ok(side.map(|side| self.node(sibling).child(side.opposite())))
	}

	/// Returns the sibling's child on the same side as `node`.
	///
	/// `None` when `node` has no sibling or the sibling is a sentinel.
	pub fn close_niece(&self, node: NodeId) -> Result<Option<Link>> {
		let Some(sibling) = self.sibling(node)?.and_then(Link::node) else {
			return Ok(None);
		};
		let side = self.direction(node)?.side();
		Ok(side.map(|side| self.node(sibling).child(side)))
	}

	/// Walks parent links upward and returns the topmost ancestor of `node`.
	pub fn root_of(&self, node: NodeId) -> NodeId {
		let mut cur = node;
		while let Some(parent) = self.parent(cur) {
			cur = parent;
		}
		cur
	}
}
