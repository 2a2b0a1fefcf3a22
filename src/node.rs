//! Node model: arena handles, colors, child sides and links.
//!
//! Real nodes live in the tree's arena and are addressed by [`NodeId`].
//! Sentinel leaves are never allocated; an empty child slot is the
//! [`Link::Nil`] tag, which always reports [`Color::Black`].

use std::fmt;

/// Handle to a real node in a tree's arena.
///
/// Handles are only issued by the tree that owns the node and stay valid for
/// the lifetime of that tree, since nodes are never removed.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
	#[inline]
	pub(crate) fn new(index: usize) -> Self {
		match u32::try_from(index) {
			Ok(index) => NodeId(index),
			Err(_) => panic!("arena index {index} overflows a node id"),
		}
	}

	#[inline]
	pub(crate) fn index(self) -> usize {
		self.0 as usize
	}
}

impl fmt::Display for NodeId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "node#{}", self.0)
	}
}

/// Node color.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Color {
	Red,
	Black,
}

impl Color {
	#[inline]
	pub fn is_red(self) -> bool {
		self == Color::Red
	}

	#[inline]
	pub fn is_black(self) -> bool {
		self == Color::Black
	}
}

/// One of the two child slots of a node.
///
/// Also used as the rotation direction: rotating toward `Side::Left` moves
/// the subtree root down to the left and promotes its right child.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Side {
	Left,
	Right,
}

impl Side {
	/// Returns the other side.
	#[inline]
	pub fn opposite(self) -> Side {
		match self {
			Side::Left => Side::Right,
			Side::Right => Side::Left,
		}
	}
}

impl fmt::Display for Side {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Side::Left => f.write_str("left"),
			Side::Right => f.write_str("right"),
		}
	}
}

/// Position of a node relative to its parent.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Direction {
	/// The node is its parent's left child.
	Left,
	/// The node is its parent's right child.
	Right,
	/// The node has no parent.
	Root,
}

impl Direction {
	/// The child slot this direction names, or `None` for the root.
	#[inline]
	pub fn side(self) -> Option<Side> {
		match self {
			Direction::Left => Some(Side::Left),
			Direction::Right => Some(Side::Right),
			Direction::Root => None,
		}
	}
}

impl From<Side> for Direction {
	fn from(side: Side) -> Self {
		match side {
			Side::Left => Direction::Left,
			Side::Right => Direction::Right,
		}
	}
}

/// Content of a child slot: either a sentinel leaf or a real node.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Link {
	/// A sentinel leaf. Always black, carries no key and has no children.
	Nil,
	/// A real, key-bearing node.
	Node(NodeId),
}

impl Link {
	/// Returns `true` for a sentinel leaf.
	#[inline]
	pub fn is_nil(self) -> bool {
		matches!(self, Link::Nil)
	}

	/// Returns the node handle, or `None` for a sentinel.
	#[inline]
	pub fn node(self) -> Option<NodeId> {
		match self {
			Link::Nil => None,
			Link::Node(id) => Some(id),
		}
	}
}

impl From<NodeId> for Link {
	fn from(id: NodeId) -> Self {
		Link::Node(id)
	}
}

/// A real node stored in the arena.
///
/// `parent` is a plain index and never owns anything: ownership of a node is
/// its single slot in the parent's `left` or `right` (or the tree's root).
#[derive(Debug, Clone)]
pub(crate) struct Node<K> {
	pub(crate) key: K,
	pub(crate) color: Color,
	pub(crate) parent: Option<NodeId>,
	pub(crate) left: Link,
	pub(crate) right: Link,
}

impl<K> Node<K> {
	/// Creates a node with two sentinel children.
	#[inline]
	pub(crate) fn new(key: K, color: Color, parent: Option<NodeId>) -> Self {
		Node {
			key,
			color,
			parent,
			left: Link::Nil,
			right: Link::Nil,
		}
	}

	#[inline]
	pub(crate) fn child(&self, side: Side) -> Link {
		match side {
			Side::Left => self.left,
			Side::Right => self.right,
		}
	}

	#[inline]
	pub(crate) fn child_mut(&mut self, side: Side) -> &mut Link {
		match side {
			Side::Left => &mut self.left,
			Side::Right => &mut self.right,
		}
	}
}
