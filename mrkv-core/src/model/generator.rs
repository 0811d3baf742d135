use rand::Rng;

use super::generate_input::{GenerateInput, StartToken};
use super::token_graph::TokenGraph;
use crate::error::{MarkovError, Result};

/// Random walk over a `TokenGraph`.
///
/// The generator borrows the graph immutably and the random source mutably;
/// the caller owns both, so a seeded source gives repeatable chains.
pub struct Generator<'a, R> {
	graph: &'a TokenGraph,
	rng: &'a mut R,
}

impl<'a, R: Rng> Generator<'a, R> {
	pub fn new(graph: &'a TokenGraph, rng: &'a mut R) -> Self {
		Self { graph, rng }
	}

	/// Generates a chain of token texts.
	///
	/// # Behavior
	/// - Picks the start node according to `input.start`.
	/// - Moves to a uniformly chosen successor while the chain is shorter
	///   than `input.max_length`.
	/// - Stops early on the first terminal node.
	///
	/// # Errors
	/// - `EmptyGraph` if the graph has no node.
	/// - `UnknownToken` if a custom start token is not in the graph.
	pub fn generate(&mut self, input: &GenerateInput) -> Result<Vec<String>> {
		if self.graph.is_empty() {
			return Err(MarkovError::EmptyGraph);
		}

		let mut current = match &input.start {
			StartToken::Random => self.rng.random_range(0..self.graph.len()),
			StartToken::Custom(text) => self
				.graph
				.id_of(text)
				.ok_or_else(|| MarkovError::UnknownToken(text.clone()))?,
		};

		let max_length = input.max_length.max(1);
		let mut chain = Vec::with_capacity(max_length.min(self.graph.len()));

		// Successor ids are always in range, so the walk only ends on a
		// terminal node or the length bound.
		while let Some(node) = self.graph.node(current) {
			chain.push(node.text().to_owned());
			if chain.len() >= max_length {
				break;
			}
			match node.pick_successor(&mut *self.rng) {
				Some(next) => current = next,
				None => break,
			}
		}

		Ok(chain)
	}
}

#[cfg(test)]
mod tests {
	use rand::SeedableRng;
	use rand::rngs::StdRng;

	use super::*;

	fn rabbit_hole() -> TokenGraph {
		let mut graph = TokenGraph::new();
		for pair in ["Down", "the", "rabbit", "hole", "."].windows(2) {
			graph.add_edge(pair[0], pair[1]);
		}
		graph
	}

	#[test]
	fn empty_graph_fails() {
		let graph = TokenGraph::new();
		let mut rng = StdRng::seed_from_u64(0);
		let result = Generator::new(&graph, &mut rng).generate(&GenerateInput::new(5));
		assert!(matches!(result, Err(MarkovError::EmptyGraph)));
	}

	#[test]
	fn sole_successor_path_is_followed() {
		let graph = rabbit_hole();
		let mut rng = StdRng::seed_from_u64(11111);
		let chain = Generator::new(&graph, &mut rng)
			.generate(&GenerateInput::new(10).starting_at("Down"))
			.unwrap();
		assert_eq!(chain, vec!["Down", "the", "rabbit", "hole", "."]);
	}

	#[test]
	fn length_bound_is_respected() {
		let graph = rabbit_hole();
		let mut rng = StdRng::seed_from_u64(3);
		let chain = Generator::new(&graph, &mut rng)
			.generate(&GenerateInput::new(2).starting_at("the"))
			.unwrap();
		assert_eq!(chain, vec!["the", "rabbit"]);
	}

	#[test]
	fn zero_length_still_yields_start() {
		let graph = rabbit_hole();
		let mut rng = StdRng::seed_from_u64(3);
		let chain = Generator::new(&graph, &mut rng).generate(&GenerateInput::new(0)).unwrap();
		assert_eq!(chain.len(), 1);
	}

	#[test]
	fn single_node_graph_yields_one_token() {
		let mut graph = TokenGraph::new();
		graph.intern("alone");
		let mut rng = StdRng::seed_from_u64(9);
		let chain = Generator::new(&graph, &mut rng).generate(&GenerateInput::new(5)).unwrap();
		assert_eq!(chain, vec!["alone"]);
	}

	#[test]
	fn unknown_start_is_reported() {
		let graph = rabbit_hole();
		let mut rng = StdRng::seed_from_u64(3);
		let result = Generator::new(&graph, &mut rng).generate(&GenerateInput::new(3).starting_at("cat"));
		assert!(matches!(result, Err(MarkovError::UnknownToken(token)) if token == "cat"));
	}

	#[test]
	fn same_seed_same_chain() {
		let mut graph = TokenGraph::new();
		for pair in ["a", "b", "a", "c", "b", "c", "a", "a", "d"].windows(2) {
			graph.add_edge(pair[0], pair[1]);
		}

		let run = |seed| {
			let mut rng = StdRng::seed_from_u64(seed);
			let mut generator = Generator::new(&graph, &mut rng);
			(0..5).map(|_| generator.generate(&GenerateInput::new(8)).unwrap()).collect::<Vec<_>>()
		};
		assert_eq!(run(42), run(42));
	}

	#[test]
	fn walk_only_follows_recorded_edges() {
		let mut graph = TokenGraph::new();
		for pair in ["a", "b", "a", "c", "b", "c", "a", "a", "d"].windows(2) {
			graph.add_edge(pair[0], pair[1]);
		}
		let mut rng = StdRng::seed_from_u64(7);
		let mut generator = Generator::new(&graph, &mut rng);
		for _ in 0..50 {
			let chain = generator.generate(&GenerateInput::new(12)).unwrap();
			for pair in chain.windows(2) {
				let successors = graph.successor_texts(&pair[0]).unwrap();
				assert!(successors.contains(&pair[1].as_str()));
			}
		}
	}
}
