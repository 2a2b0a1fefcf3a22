//! # Redwood: An Arena-Backed Red-Black Ordered Set
//!
//! This crate provides an ordered set backed by a red-black tree. Keys are
//! kept in a binary search tree whose height stays within `2 * log2(n + 1)`
//! by rotating and recoloring nodes after every insertion.
//!
//! ## Design Overview
//!
//! **Arena storage**: Nodes live in a single `Vec` owned by the tree and are
//! addressed by [`NodeId`] handles. Each node records its parent as a plain
//! index, which is used for upward navigation only and never owns anything.
//! This keeps parent back-references without reference cycles or `unsafe`.
//!
//! **Sentinels as tags**: An empty child slot is [`Link::Nil`], not an
//! allocated node. Sentinels are black, carry no key and cost nothing.
//!
//! **Insertion-side balancing**: Every insertion attaches a red leaf and runs
//! a fix-up loop that walks upward, recoloring and applying
//! [`rotate`](GenericTree::rotate) until the invariants hold. There is no
//! unbalanced insertion path.
//!
//! ### Invariants
//!
//! After every completed insertion:
//!
//! 1. Every sentinel leaf is black.
//! 2. The root is black.
//! 3. No red node has a red child.
//! 4. Every path from a node down to a sentinel crosses the same number of
//!    black nodes.
//! 5. Keys are strictly ordered, left subtree smaller, right subtree larger.
//! 6. Parent back-references agree with child links.
//!
//! ### Tree Structure
//!
//! ```text
//!                 ┌──────────────┐
//!                 │ 10 (black)   │  <- root, no parent
//!                 └──────┬───────┘
//!              ┌─────────┴─────────┐
//!              ▼                   ▼
//!        ┌───────────┐       ┌───────────┐
//!        │ 5 (black) │       │ 15 (black)│
//!        └─────┬─────┘       └─────┬─────┘
//!          ┌───┴───┐           ┌───┴───┐
//!          ▼       ▼           ▼       ▼
//!       3 (red) 8 (red)    12 (red) 20 (red)   <- children are Link::Nil
//! ```
//!
//! ## Basic Usage
//!
//! ```
//! use redwood::Tree;
//!
//! let mut tree = Tree::with_root(50);
//!
//! // Insert keys; duplicates are rejected
//! assert!(tree.insert(20).is_some());
//! assert!(tree.insert(70).is_some());
//! assert!(tree.insert(20).is_none());
//!
//! assert!(tree.contains(&70));
//! assert_eq!(tree.to_vec(), vec![20, 50, 70]);
//! assert_eq!(tree.to_string(), "[20 50 70]");
//! ```
//!
//! ## Thread Safety
//!
//! A tree is mutated through `&mut self` and is not designed for concurrent
//! mutation. [`sync::SharedTree`] wraps a tree in a reader-writer lock for
//! callers that need to share one across threads.

use std::borrow::Borrow;
use std::cmp::Ordering;
use std::fmt;

use log::debug;

#[cfg(feature = "test-utils")]
pub mod alloc;
mod balance;
pub mod error;
pub mod iter;
mod nav;
mod node;
pub mod sync;
#[cfg(feature = "test-utils")]
pub mod util;

pub use error::{Error, Result};
pub use iter::Iter;
pub use node::{Color, Direction, Link, NodeId, Side};

use node::Node;

// ---------------------------------------------------------------------------
// Configuration Constants
// ---------------------------------------------------------------------------

/// Number of node slots reserved by [`GenericTree::with_root`].
///
/// Inserting up to this many keys into a seeded tree does not reallocate the
/// arena. Use [`GenericTree::with_capacity`] to size it for larger workloads.
pub const DEFAULT_CAPACITY: usize = 16;

// ---------------------------------------------------------------------------
// Public Type Aliases
// ---------------------------------------------------------------------------

/// A red-black tree of `i64` keys.
///
/// This is the integer set most callers want. Use [`GenericTree`] directly
/// for other key types.
pub type Tree = GenericTree<i64>;

// ---------------------------------------------------------------------------
// Core Tree Structure
// ---------------------------------------------------------------------------

/// A red-black tree ordered set.
///
/// # Type Parameters
///
/// - `K`: The key type. Insertion and lookup require `K: Ord`.
///
/// # Internal Structure
///
/// - `nodes`: the arena. A node's [`NodeId`] is its index here; nodes are
///   never removed, so handles stay valid for the lifetime of the tree.
/// - `root`: handle of the topmost node, `None` while the tree is empty.
///   Rotations at the top of the tree replace it.
#[derive(Clone)]
pub struct GenericTree<K> {
	nodes: Vec<Node<K>>,
	root: Option<NodeId>,
}

impl<K> Default for GenericTree<K> {
	fn default() -> Self {
		Self::new()
	}
}

// ---------------------------------------------------------------------------
// GenericTree Implementation
// ---------------------------------------------------------------------------

impl<K> GenericTree<K> {
	// -----------------------------------------------------------------------
	// Construction
	// -----------------------------------------------------------------------

	/// Creates an empty tree. Does not allocate.
	///
	/// The first key inserted becomes a black root.
	pub fn new() -> Self {
		GenericTree {
			nodes: Vec::new(),
			root: None,
		}
	}

	/// Creates an empty tree with room for `capacity` nodes.
	pub fn with_capacity(capacity: usize) -> Self {
		GenericTree {
			nodes: Vec::with_capacity(capacity),
			root: None,
		}
	}

	/// Creates a tree holding a single black root with key `key`.
	///
	/// # Example
	///
	/// ```
	/// use redwood::{Color, Tree};
	///
	/// let tree = Tree::with_root(-1);
	/// let root = tree.root().unwrap();
	/// assert_eq!(*tree.key(root), -1);
	/// assert_eq!(tree.color(root), Color::Black);
	/// assert_eq!(tree.to_string(), "[-1]");
	/// ```
	pub fn with_root(key: K) -> Self {
		let mut tree = Self::with_capacity(DEFAULT_CAPACITY);
		let root = tree.alloc(Node::new(key, Color::Black, None));
		tree.root = Some(root);
		tree
	}

	// -----------------------------------------------------------------------
	// Tree Metadata
	// -----------------------------------------------------------------------

	/// Returns the number of keys in the tree.
	#[inline]
	pub fn len(&self) -> usize {
		self.nodes.len()
	}

	/// Returns `true` if the tree holds no keys.
	#[inline]
	pub fn is_empty(&self) -> bool {
		self.root.is_none()
	}

	/// Returns the root node, or `None` for an empty tree.
	#[inline]
	pub fn root(&self) -> Option<NodeId> {
		self.root
	}

	/// Returns the number of nodes on the longest root-to-leaf path.
	///
	/// Sentinels are not counted; an empty tree has height 0.
	pub fn height(&self) -> usize {
		let mut deepest = 0;
		let mut stack: Vec<(NodeId, usize)> = self.root.map(|r| (r, 1)).into_iter().collect();
		while let Some((id, depth)) = stack.pop() {
			deepest = deepest.max(depth);
			let node = self.node(id);
			for child in [node.left, node.right] {
				if let Link::Node(child) = child {
					stack.push((child, depth + 1));
				}
			}
		}
		deepest
	}

	/// Returns the number of black nodes on the path from the root to its
	/// leftmost sentinel, counting the root.
	///
	/// This is the black-height of the tree as a whole, not of the root node:
	/// the textbook black-height of a node excludes the node itself, so for a
	/// non-empty tree the root's black-height is one less than this value.
	/// Once the invariants hold, every root-to-sentinel path has this many
	/// black nodes.
	pub fn black_height(&self) -> usize {
		let mut count = 0;
		let mut cur = self.root.map(Link::Node).unwrap_or(Link::Nil);
		while let Link::Node(id) = cur {
			let node = self.node(id);
			if node.color.is_black() {
				count += 1;
			}
			cur = node.left;
		}
		count
	}

	// -----------------------------------------------------------------------
	// Node Accessors
	// -----------------------------------------------------------------------

	/// Returns the key stored in `node`.
	///
	/// # Panics
	///
	/// If `node` was not issued by this tree.
	#[inline]
	pub fn key(&self, node: NodeId) -> &K {
		&self.node(node).key
	}

	/// Returns the color of `node`.
	#[inline]
	pub fn color(&self, node: NodeId) -> Color {
		self.node(node).color
	}

	/// Returns the color of a child slot. Sentinels are black.
	#[inline]
	pub fn link_color(&self, link: Link) -> Color {
		match link {
			Link::Nil => Color::Black,
			Link::Node(id) => self.color(id),
		}
	}

	/// Returns the child of `node` on `side`.
	#[inline]
	pub fn child(&self, node: NodeId, side: Side) -> Link {
		self.node(node).child(side)
	}

	#[inline]
	pub(crate) fn node(&self, id: NodeId) -> &Node<K> {
		&self.nodes[id.index()]
	}

	#[inline]
	pub(crate) fn node_mut(&mut self, id: NodeId) -> &mut Node<K> {
		&mut self.nodes[id.index()]
	}

	fn alloc(&mut self, node: Node<K>) -> NodeId {
		let id = NodeId::new(self.nodes.len());
		self.nodes.push(node);
		id
	}

	// -----------------------------------------------------------------------
	// Traversal
	// -----------------------------------------------------------------------

	/// Returns an iterator over the keys in ascending order.
	pub fn iter(&self) -> Iter<'_, K> {
		Iter::new(self)
	}

	/// Returns the keys in ascending order.
	///
	/// # Example
	///
	/// ```
	/// use redwood::Tree;
	///
	/// let tree: Tree = [5, 4, 3, 2, 1, 0].into_iter().collect();
	/// assert_eq!(tree.to_vec(), vec![0, 1, 2, 3, 4, 5]);
	/// ```
	pub fn to_vec(&self) -> Vec<K>
	where
		K: Clone,
	{
		self.iter().cloned().collect()
	}

	/// Returns the smallest key.
	pub fn first(&self) -> Option<&K> {
		self.root.map(|root| &self.node(self.extreme(root, Side::Left)).key)
	}

	/// Returns the largest key.
	pub fn last(&self) -> Option<&K> {
		self.root.map(|root| &self.node(self.extreme(root, Side::Right)).key)
	}

	/// Follows `side` links from `from` until the next one is a sentinel.
	pub(crate) fn extreme(&self, from: NodeId, side: Side) -> NodeId {
		let mut cur = from;
		while let Link::Node(next) = self.node(cur).child(side) {
			cur = next;
		}
		cur
	}
}

impl<K: Ord> GenericTree<K> {
	// -----------------------------------------------------------------------
	// Lookup Operations
	// -----------------------------------------------------------------------

	/// Returns the node holding `key`.
	pub fn find<Q>(&self, key: &Q) -> Option<NodeId>
	where
		K: Borrow<Q>,
		Q: Ord + ?Sized,
	{
		let mut cur = self.root.map(Link::Node).unwrap_or(Link::Nil);
		while let Link::Node(id) = cur {
			let node = self.node(id);
			cur = match Borrow::<Q>::borrow(&node.key).cmp(key) {
				Ordering::Greater => node.left,
				Ordering::Less => node.right,
				Ordering::Equal => return Some(id),
			};
		}
		None
	}

	/// Returns `true` if the tree contains `key`.
	///
	/// # Example
	///
	/// ```
	/// use redwood::Tree;
	///
	/// let mut tree = Tree::with_root(1);
	/// tree.insert(2);
	///
	/// assert!(tree.contains(&1));
	/// assert!(tree.contains(&2));
	/// assert!(!tree.contains(&3));
	/// ```
	pub fn contains<Q>(&self, key: &Q) -> bool
	where
		K: Borrow<Q>,
		Q: Ord + ?Sized,
	{
		self.find(key).is_some()
	}

	// -----------------------------------------------------------------------
	// Insert Operations
	// -----------------------------------------------------------------------

	/// Inserts `key` and rebalances the tree.
	///
	/// Returns the new node, or `None` if `key` was already present, in which
	/// case the tree is left untouched.
	///
	/// # Panics
	///
	/// If rebalancing finds the tree structurally corrupt. Use
	/// [`try_insert`](Self::try_insert) to receive that as an error instead.
	///
	/// # Example
	///
	/// ```
	/// use redwood::Tree;
	///
	/// let mut tree = Tree::new();
	/// for key in [6, 6, 6, 6] {
	///     tree.insert(key);
	/// }
	/// assert_eq!(tree.to_vec(), vec![6]);
	/// ```
	pub fn insert(&mut self, key: K) -> Option<NodeId> {
		match self.try_insert(key) {
			Ok(inserted) => inserted,
			Err(err) => unreachable!("tree structure corruption during rebalancing: {err}"),
		}
	}

	/// Inserts `key` and rebalances the tree, reporting structural errors.
	///
	/// Returns `Ok(None)` for a duplicate key.
	///
	/// # Errors
	///
	/// Any [`Error`] raised by a rotation or direction lookup during fix-up.
	/// Both indicate an already-corrupt tree. Fix-up runs after the new node
	/// is linked in, so on error the key is already part of the tree and the
	/// rebalancing is left incomplete.
	pub fn try_insert(&mut self, key: K) -> Result<Option<NodeId>> {
		let Some(root) = self.root else {
			let id = self.alloc(Node::new(key, Color::Black, None));
			self.root = Some(id);
			return Ok(Some(id));
		};

		// Descend to the sentinel where the key belongs
		let mut cur = root;
		let side = loop {
			let node = self.node(cur);
			let side = match node.key.cmp(&key) {
				Ordering::Greater => Side::Left,
				Ordering::Less => Side::Right,
				Ordering::Equal => {
					debug!("rejected duplicate key at {cur}");
					return Ok(None);
				}
			};
			match node.child(side) {
				Link::Node(next) => cur = next,
				Link::Nil => break side,
			}
		};

		let id = self.alloc(Node::new(key, Color::Red, Some(cur)));
		*self.node_mut(cur).child_mut(side) = Link::Node(id);
		self.fix_up(id)?;
		Ok(Some(id))
	}
}

// ---------------------------------------------------------------------------
// Conversions
// ---------------------------------------------------------------------------

impl<K: Ord> FromIterator<K> for GenericTree<K> {
	fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
		let mut tree = GenericTree::new();
		tree.extend(iter);
		tree
	}
}

impl<K: Ord> Extend<K> for GenericTree<K> {
	fn extend<I: IntoIterator<Item = K>>(&mut self, iter: I) {
		for key in iter {
			self.insert(key);
		}
	}
}

impl<'t, K> IntoIterator for &'t GenericTree<K> {
	type Item = &'t K;
	type IntoIter = Iter<'t, K>;

	fn into_iter(self) -> Self::IntoIter {
		self.iter()
	}
}

// ---------------------------------------------------------------------------
// Formatting
// ---------------------------------------------------------------------------

/// Renders the keys in ascending order, space separated: `[1 2 3]`.
impl<K: fmt::Display> fmt::Display for GenericTree<K> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str("[")?;
		for (i, key) in self.iter().enumerate() {
			if i > 0 {
				f.write_str(" ")?;
			}
			fmt::Display::fmt(key, f)?;
		}
		f.write_str("]")
	}
}

/// Renders the tree structure, one nested entry per node.
impl<K: fmt::Debug> fmt::Debug for GenericTree<K> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		struct Subtree<'t, K>(&'t GenericTree<K>, Link);

		impl<K: fmt::Debug> fmt::Debug for Subtree<'_, K> {
			fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
				let Subtree(tree, link) = *self;
				match link {
					Link::Nil => f.write_str("Nil"),
					Link::Node(id) => {
						let node = tree.node(id);
						f.debug_struct("Node")
							.field("key", &node.key)
							.field("color", &node.color)
							.field("left", &Subtree(tree, node.left))
							.field("right", &Subtree(tree, node.right))
							.finish()
					}
				}
			}
		}

		f.debug_struct("GenericTree")
			.field("len", &self.len())
			.field("root", &Subtree(self, self.root.map(Link::Node).unwrap_or(Link::Nil)))
			.finish()
	}
}

// ===========================================================================
// Test-Only Validation Module
// ===========================================================================

/// Invariant validation for testing. Panics with diagnostic info as soon as a
/// red-black or linkage invariant is found broken.
#[cfg(any(test, feature = "test-utils"))]
impl<K: Ord + fmt::Debug> GenericTree<K> {
	/// Validates all tree invariants and returns the black height.
	///
	/// # Invariants Checked
	///
	/// 1. The root is black and has no parent
	/// 2. No red node has a red child
	/// 3. Every root-to-sentinel path has the same number of black nodes
	/// 4. Keys are strictly ordered
	/// 5. Every child's parent link points back at its parent
	/// 6. Every arena node is reachable from the root
	pub fn assert_invariants(&self) -> usize {
		let Some(root) = self.root else {
			assert!(self.nodes.is_empty(), "tree without root owns {} nodes", self.nodes.len());
			return 0;
		};

		assert!(self.color(root).is_black(), "root {root} is red");
		assert_eq!(self.parent(root), None, "root {root} has a parent");

		let mut visited = 0;
		let height = self.validate_node_recursive(root, None, None, &mut visited);
		assert_eq!(
			visited,
			self.nodes.len(),
			"{} nodes reachable from the root but the arena holds {}",
			visited,
			self.nodes.len()
		);
		assert_eq!(height, self.black_height(), "black_height disagrees with validation");
		height
	}

	/// Recursively validates the subtree rooted at `id` and returns its black
	/// height, counting `id` itself.
	///
	/// # Arguments
	/// * `lower` - Exclusive lower bound from the ancestors, None if leftmost
	/// * `upper` - Exclusive upper bound from the ancestors, None if rightmost
	fn validate_node_recursive(
		&self,
		id: NodeId,
		lower: Option<&K>,
		upper: Option<&K>,
		visited: &mut usize,
	) -> usize {
		*visited += 1;
		let node = self.node(id);

		if let Some(lower) = lower {
			assert!(node.key > *lower, "key {:?} at {id} not above bound {:?}", node.key, lower);
		}
		if let Some(upper) = upper {
			assert!(node.key < *upper, "key {:?} at {id} not below bound {:?}", node.key, upper);
		}

		let mut heights = [0usize; 2];
		for (slot, side) in [Side::Left, Side::Right].into_iter().enumerate() {
			let Link::Node(child) = node.child(side) else {
				continue;
			};
			let c = self.node(child);
			assert_eq!(
				c.parent,
				Some(id),
				"{side} child {child} of {id} records parent {:?}",
				c.parent
			);
			assert!(
				!(node.color.is_red() && c.color.is_red()),
				"red {id} ({:?}) has red {side} child {child} ({:?})",
				node.key,
				c.key
			);
			heights[slot] = match side {
				Side::Left => self.validate_node_recursive(child, lower, Some(&node.key), visited),
				Side::Right => self.validate_node_recursive(child, Some(&node.key), upper, visited),
			};
		}

		assert_eq!(
			heights[0], heights[1],
			"black height mismatch under {id} ({:?}): left {} right {}",
			node.key, heights[0], heights[1]
		);
		heights[0] + usize::from(node.color.is_black())
	}
}
