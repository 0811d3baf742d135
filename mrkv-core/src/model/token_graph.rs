use std::collections::{HashMap, HashSet};

use super::token_node::{TokenId, TokenNode};
use crate::error::{MarkovError, Result};

/// Represents the word-adjacency graph built from a corpus.
///
/// The `TokenGraph` is an arena of `TokenNode`s indexed by their `TokenId`,
/// plus a text index kept alongside it for O(1) lookup-or-create.
///
/// # Responsibilities
/// - Resolve a token text to its id, creating the node when missing
/// - Insert edges idempotently
/// - Expose read access for generation and persistence
///
/// # Invariants
/// - Ids form the contiguous range `[0, len)`
/// - Every successor id is a valid index into `nodes`
/// - Texts are unique; `index` is the exact inverse of `nodes`
#[derive(Clone, Debug, Default)]
pub struct TokenGraph {
	/// Nodes indexed by id.
	nodes: Vec<TokenNode>,

	/// Text to id lookup, rebuilt whenever nodes are loaded wholesale.
	index: HashMap<String, TokenId>,
}

impl TokenGraph {
	/// Creates an empty graph.
	pub fn new() -> Self {
		Self::default()
	}

	/// Builds a graph from a complete node list, validating every invariant.
	///
	/// # Errors
	/// - `DuplicateToken` if two nodes share a text.
	/// - `DanglingEdge` if a successor is out of range.
	/// - `DuplicateEdge` if a node repeats a successor.
	pub fn from_nodes(nodes: Vec<TokenNode>) -> Result<Self> {
		let mut index = HashMap::with_capacity(nodes.len());
		for (id, node) in nodes.iter().enumerate() {
			if index.insert(node.text().to_owned(), id).is_some() {
				return Err(MarkovError::DuplicateToken(node.text().to_owned()));
			}
		}

		for (id, node) in nodes.iter().enumerate() {
			let mut seen = HashSet::with_capacity(node.successors().len());
			for &next in node.successors() {
				if next >= nodes.len() {
					return Err(MarkovError::DanglingEdge { id: id as i64, next: next as i64 });
				}
				if !seen.insert(next) {
					return Err(MarkovError::DuplicateEdge { id: id as i64, next: next as i64 });
				}
			}
		}

		Ok(Self { nodes, index })
	}

	/// Number of distinct tokens.
	pub fn len(&self) -> usize {
		self.nodes.len()
	}

	pub fn is_empty(&self) -> bool {
		self.nodes.is_empty()
	}

	/// Total number of distinct edges.
	pub fn edge_count(&self) -> usize {
		self.nodes.iter().map(|node| node.successors().len()).sum()
	}

	pub fn id_of(&self, text: &str) -> Option<TokenId> {
		self.index.get(text).copied()
	}

	pub fn node(&self, id: TokenId) -> Option<&TokenNode> {
		self.nodes.get(id)
	}

	/// Iterates over `(id, node)` pairs in id order.
	pub fn nodes(&self) -> impl Iterator<Item = (TokenId, &TokenNode)> {
		self.nodes.iter().enumerate()
	}

	/// Returns the texts following `text`, in insertion order.
	///
	/// Returns `None` if `text` is not part of the graph.
	pub fn successor_texts(&self, text: &str) -> Option<Vec<&str>> {
		let node = &self.nodes[self.id_of(text)?];
		Some(
			node.successors()
				.iter()
				.map(|&next| self.nodes[next].text())
				.collect(),
		)
	}

	/// Records that `current` was observed immediately after `previous`.
	///
	/// - `current` is resolved first, so a brand new pair assigns the lower
	///   id to `current`.
	/// - A freshly created `previous` starts with `current` as its only successor.
	/// - An existing `previous` gains the edge only if it is not already present.
	pub fn add_edge(&mut self, previous: &str, current: &str) {
		let next = self.intern(current);

		match self.id_of(previous) {
			Some(id) => {
				self.nodes[id].add_successor(next);
			}
			None => {
				let id = self.nodes.len();
				self.nodes.push(TokenNode::with_successor(previous, next));
				self.index.insert(previous.to_owned(), id);
			}
		}
	}

	/// Returns the id of `text`, creating a successor-less node if needed.
	pub fn intern(&mut self, text: &str) -> TokenId {
		if let Some(id) = self.id_of(text) {
			return id;
		}
		let id = self.nodes.len();
		self.nodes.push(TokenNode::new(text));
		self.index.insert(text.to_owned(), id);
		id
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn repeated_edge_is_stored_once() {
		let mut graph = TokenGraph::new();
		graph.add_edge("cat", "sat");
		graph.add_edge("cat", "sat");

		assert_eq!(graph.successor_texts("cat"), Some(vec!["sat"]));
		assert_eq!(graph.edge_count(), 1);
	}

	#[test]
	fn ids_follow_first_seen_order() {
		let mut graph = TokenGraph::new();
		graph.add_edge("Down", "the");
		graph.add_edge("the", "rabbit");

		assert_eq!(graph.id_of("the"), Some(0));
		assert_eq!(graph.id_of("Down"), Some(1));
		assert_eq!(graph.id_of("rabbit"), Some(2));
		assert_eq!(graph.node(0).map(TokenNode::successors), Some(&[2][..]));
	}

	#[test]
	fn self_loop_is_allowed() {
		let mut graph = TokenGraph::new();
		graph.add_edge("la", "la");
		graph.add_edge("la", "la");

		assert_eq!(graph.len(), 1);
		assert_eq!(graph.successor_texts("la"), Some(vec!["la"]));
	}

	#[test]
	fn successors_keep_insertion_order() {
		let mut graph = TokenGraph::new();
		graph.add_edge("a", "c");
		graph.add_edge("a", "b");
		graph.add_edge("a", "c");

		assert_eq!(graph.successor_texts("a"), Some(vec!["c", "b"]));
		assert_eq!(graph.successor_texts("missing"), None);
	}

	#[test]
	fn from_nodes_rejects_duplicates_and_dangling_edges() {
		let duplicate = vec![TokenNode::new("a"), TokenNode::new("a")];
		assert!(matches!(
			TokenGraph::from_nodes(duplicate),
			Err(MarkovError::DuplicateToken(text)) if text == "a"
		));

		let dangling = vec![TokenNode::with_successor("a", 4)];
		assert!(matches!(
			TokenGraph::from_nodes(dangling),
			Err(MarkovError::DanglingEdge { id: 0, next: 4 })
		));
	}

	#[test]
	fn from_nodes_rejects_repeated_successor() {
		// Deserialized nodes skip `add_successor`, so repeats can reach `from_nodes`.
		let bytes = postcard::to_stdvec(&("a", vec![1usize, 1])).unwrap();
		let repeated: TokenNode = postcard::from_bytes(&bytes).unwrap();
		assert_eq!(repeated.successors(), &[1, 1]);

		assert!(matches!(
			TokenGraph::from_nodes(vec![repeated, TokenNode::new("b")]),
			Err(MarkovError::DuplicateEdge { id: 0, next: 1 })
		));
	}

	#[test]
	fn from_nodes_rebuilds_index() {
		let graph = TokenGraph::from_nodes(vec![
			TokenNode::with_successor("a", 1),
			TokenNode::new("b"),
		])
		.unwrap();

		assert_eq!(graph.id_of("b"), Some(1));
		assert_eq!(graph.successor_texts("a"), Some(vec!["b"]));
	}
}
