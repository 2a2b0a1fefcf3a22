//! # Error Types for the Red-Black Tree
//!
//! This module defines the error values surfaced by the structural
//! primitives of the tree.
//!
//! ## Error Handling Strategy
//!
//! Nothing in the tree performs I/O, so there are no transient failures and
//! nothing is ever retried. Every error here marks a broken structural
//! precondition: a rotation requested around a sentinel leaf, or a node whose
//! parent does not link back to it. Continuing after either one would corrupt
//! the tree, so the errors are reported as values and never swallowed.
//!
//! Rejecting a duplicate key is not an error. [`crate::GenericTree::insert`]
//! reports it by returning `None`.
//!
//! ## Error Flow
//!
//! ```text
//! insert(key)
//!      │
//!      ▼
//! Attach red leaf
//!      │
//!      ▼
//! Fix-up loop ── rotate() ──────► Err(RotateSentinel) ──┐
//!      │         direction() ───► Err(BrokenLink) ──────┤
//!      │                                                ▼
//!      ▼ (Ok)                          try_insert: returned to the caller
//! Return new node                      insert:     panics (tree corruption)
//! ```

use thiserror::Error;

use crate::node::{NodeId, Side};

/// Errors raised by the rotation and navigation primitives.
///
/// Both variants indicate a bug in the caller's case selection rather than a
/// condition that can be recovered from by trying again.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
	/// A rotation would have promoted a sentinel leaf.
	///
	/// Rotating `node` toward `side` promotes its child on the opposite side.
	/// When that child is a sentinel there is nothing to promote, and the
	/// rotation is refused before any link is touched.
	#[error("cannot rotate {side} around {node}: the promoted child is a sentinel")]
	RotateSentinel {
		/// The subtree root the rotation was requested for.
		node: NodeId,
		/// The requested rotation side.
		side: Side,
	},

	/// A node's parent holds it in neither child slot.
	///
	/// Parent back-references are kept in step with child links by every
	/// mutating operation, so this only appears when that bookkeeping has
	/// been broken.
	#[error("{node} is not a child of its recorded parent {parent}")]
	BrokenLink {
		/// The node whose direction was requested.
		node: NodeId,
		/// The parent recorded on `node`.
		parent: NodeId,
	},
}

/// A Result type alias using our custom Error type.
pub type Result<T> = std::result::Result<T, Error>;
