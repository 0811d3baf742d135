use super::token_graph::TokenGraph;

/// Feeds a token stream into a `TokenGraph`, one consecutive pair at a time.
///
/// The first token of a stream only becomes a node once something follows it,
/// unless the stream holds a single token, in which case `finish` creates it
/// in isolation.
pub struct Builder<'g> {
	graph: &'g mut TokenGraph,
	previous: Option<String>,
	fed: usize,
}

impl<'g> Builder<'g> {
	pub fn new(graph: &'g mut TokenGraph) -> Self {
		Self { graph, previous: None, fed: 0 }
	}

	/// Adds the edge `(previous, token)` and makes `token` the new previous.
	pub fn push(&mut self, token: String) {
		if let Some(previous) = &self.previous {
			self.graph.add_edge(previous, &token);
		}
		self.previous = Some(token);
		self.fed += 1;
	}

	/// Ends the stream and returns the number of tokens pushed.
	pub fn finish(self) -> usize {
		if self.fed == 1 {
			if let Some(only) = &self.previous {
				self.graph.intern(only);
			}
		}
		self.fed
	}
}

impl Extend<String> for Builder<'_> {
	fn extend<I: IntoIterator<Item = String>>(&mut self, tokens: I) {
		for token in tokens {
			self.push(token);
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn build(tokens: &[&str]) -> TokenGraph {
		let mut graph = TokenGraph::new();
		let mut builder = Builder::new(&mut graph);
		builder.extend(tokens.iter().map(|t| t.to_string()));
		builder.finish();
		graph
	}

	#[test]
	fn pairs_become_edges() {
		let graph = build(&["the", "cat", "sat", "the", "end"]);

		assert_eq!(graph.len(), 4);
		assert_eq!(graph.successor_texts("the"), Some(vec!["cat", "end"]));
		assert_eq!(graph.successor_texts("end"), Some(vec![]));
	}

	#[test]
	fn single_token_exists_in_isolation() {
		let graph = build(&["alone"]);

		assert_eq!(graph.len(), 1);
		assert_eq!(graph.edge_count(), 0);
		assert_eq!(graph.id_of("alone"), Some(0));
	}

	#[test]
	fn empty_stream_adds_nothing() {
		let mut graph = TokenGraph::new();
		let fed = Builder::new(&mut graph).finish();

		assert_eq!(fed, 0);
		assert!(graph.is_empty());
	}
}
