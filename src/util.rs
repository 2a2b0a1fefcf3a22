//! Test utilities for loading sample trees from JSON fixtures
//!
//! Fixtures describe an exact tree shape, colors included, and are loaded
//! without running any balancing. This allows tests to build shapes that
//! insertion would never produce, such as a right-leaning chain to rotate.
//!
//! ```json
//! {
//!   "root": {
//!     "key": 100, "color": "black",
//!     "right": { "key": 120, "color": "red" }
//!   }
//! }
//! ```
//!
//! Missing children are sentinels.
use crate::node::{Color, Link, Node, NodeId};
use crate::GenericTree;
use serde::de::DeserializeOwned;
use serde::Deserialize;

#[derive(Deserialize, Debug, Clone, Copy)]
#[serde(rename_all = "lowercase")]
enum FixtureColor {
	Red,
	Black,
}

impl From<FixtureColor> for Color {
	fn from(color: FixtureColor) -> Self {
		match color {
			FixtureColor::Red => Color::Red,
			FixtureColor::Black => Color::Black,
		}
	}
}

#[derive(Deserialize, Debug)]
struct FixtureNode<K> {
	key: K,
	color: FixtureColor,
	left: Option<Box<FixtureNode<K>>>,
	right: Option<Box<FixtureNode<K>>>,
}

#[derive(Deserialize, Debug)]
struct SampleTree<K> {
	root: Option<FixtureNode<K>>,
}

fn translate_node<K>(
	tree: &mut GenericTree<K>,
	fixture: FixtureNode<K>,
	parent: Option<NodeId>,
) -> NodeId {
	let id = NodeId::new(tree.nodes.len());
	tree.nodes.push(Node::new(fixture.key, fixture.color.into(), parent));

	if let Some(left) = fixture.left {
		let child = translate_node(tree, *left, Some(id));
		tree.node_mut(id).left = Link::Node(child);
	}
	if let Some(right) = fixture.right {
		let child = translate_node(tree, *right, Some(id));
		tree.node_mut(id).right = Link::Node(child);
	}
	id
}

/// Builds a tree from a JSON fixture string, exactly as described.
///
/// # Panics
///
/// If the JSON does not describe a tree.
pub fn tree_from_json<K: DeserializeOwned>(json: &str) -> GenericTree<K> {
	let sample: SampleTree<K> = serde_json::from_str(json).expect("invalid tree fixture");
	let mut tree = GenericTree::new();
	if let Some(root) = sample.root {
		let root = translate_node(&mut tree, root, None);
		tree.root = Some(root);
	}
	tree
}

/// Builds a tree from a JSON fixture file, exactly as described.
pub fn sample_tree<K: DeserializeOwned, P: AsRef<std::path::Path>>(path: P) -> GenericTree<K> {
	let json = std::fs::read_to_string(path).expect("failed to find file");
	tree_from_json(&json)
}
