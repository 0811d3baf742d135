use rand::Rng;

use serde::{Deserialize, Serialize};

/// Dense identifier of a token inside one `TokenGraph`.
///
/// Ids are assigned sequentially in first-seen order starting at 0 and
/// are never reused or renumbered.
pub type TokenId = usize;

/// Represents a node of the token graph.
///
/// A `TokenNode` holds one distinct token text and the ids of every token
/// that was observed immediately after it at least once.
///
/// Conceptually, this is a node in a first-order Markov chain where every
/// outgoing edge has the same weight.
///
/// ## Responsibilities:
/// - Keep the token text immutable once assigned
/// - Record successors without duplicates
/// - Pick the next token uniformly among the successors
///
/// ## Invariants
/// - `successors` contains each id at most once
/// - Insertion order of `successors` is preserved
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct TokenNode {
	/// Token text, unique across the graph.
	text: String,
	/// Outgoing edges, in the order they were first observed.
	successors: Vec<TokenId>,
}

impl TokenNode {
	/// Creates a node without successors.
	pub fn new(text: &str) -> Self {
		Self {
			text: text.to_owned(),
			successors: Vec::new(),
		}
	}

	/// Creates a node whose only successor is `next`.
	pub(crate) fn with_successor(text: &str, next: TokenId) -> Self {
		Self {
			text: text.to_owned(),
			successors: vec![next],
		}
	}

	pub fn text(&self) -> &str {
		&self.text
	}

	pub fn successors(&self) -> &[TokenId] {
		&self.successors
	}

	/// A terminal node ends any random walk that reaches it.
	pub fn is_terminal(&self) -> bool {
		self.successors.is_empty()
	}

	/// Records an edge toward `next`.
	///
	/// Returns `false` if the edge already existed. Edges are binary: a
	/// repeated observation changes nothing.
	pub fn add_successor(&mut self, next: TokenId) -> bool {
		if self.successors.contains(&next) {
			return false;
		}
		self.successors.push(next);
		true
	}

	/// Picks the next token uniformly among the successors.
	///
	/// - Returns `None` for a terminal node.
	/// - A single successor is returned without drawing from `rng`, so the
	///   random sequence only advances on real choices.
	pub fn pick_successor<R: Rng>(&self, rng: &mut R) -> Option<TokenId> {
		match self.successors.as_slice() {
			[] => None,
			[only] => Some(*only),
			successors => Some(successors[rng.random_range(0..successors.len())]),
		}
	}
}
