use std::io::BufRead;
use std::path::Path;

use rand::SeedableRng;
use rand::rngs::StdRng;

use super::builder::Builder;
use super::generate_input::GenerateInput;
use super::generator::Generator;
use super::token_graph::TokenGraph;
use crate::error::Result;
use crate::text::detokenizer::join;
use crate::text::tokenizer::tokenize;
use crate::{io, snapshot, store};

/// A generation session: one token graph plus the random source walking it.
///
/// This struct manages:
/// - `graph`: the word-adjacency graph, mutated only by the feed methods.
/// - `rng`: a seeded random source private to this session.
///
/// The session is not synchronized. Share it behind a `Mutex` if several
/// threads feed or generate.
#[derive(Debug)]
pub struct Markov {
	graph: TokenGraph,
	rng: StdRng,
}

impl Markov {
	/// Creates a session over an empty graph.
	pub fn new(seed: u64) -> Self {
		Self::with_graph(TokenGraph::new(), seed)
	}

	/// Creates a session over an existing graph.
	pub fn with_graph(graph: TokenGraph, seed: u64) -> Self {
		Self { graph, rng: StdRng::seed_from_u64(seed) }
	}

	/// Loads the graph stored in the SQLite database at `path`.
	///
	/// # Errors
	/// - `StoreOpen` if the file does not exist or is not a database.
	/// - `StoreRead`, `DanglingEdge` or `DuplicateToken` on bad content.
	pub fn from_store<P: AsRef<Path>>(path: P, seed: u64) -> Result<Self> {
		let connection = store::open_existing(path.as_ref())?;
		let graph = store::load(&connection)?;
		Ok(Self::with_graph(graph, seed))
	}

	/// Loads a graph from a binary snapshot written by `save_snapshot`.
	pub fn from_snapshot<P: AsRef<Path>>(path: P, seed: u64) -> Result<Self> {
		Ok(Self::with_graph(snapshot::read(path)?, seed))
	}

	/// Read access to the graph.
	pub fn graph(&self) -> &TokenGraph {
		&self.graph
	}

	/// Restarts the random sequence from `seed`.
	pub fn reseed(&mut self, seed: u64) {
		self.rng = StdRng::seed_from_u64(seed);
	}

	/// Tokenizes `reader` and adds every consecutive pair to the graph.
	///
	/// # Notes
	/// - Each call is an independent stream: the last token of one call is
	///   not linked to the first token of the next.
	/// - Read errors end the stream early; they are logged, not returned.
	///
	/// Returns the number of tokens read.
	pub fn feed<R: BufRead>(&mut self, reader: R) -> usize {
		let mut builder = Builder::new(&mut self.graph);
		builder.extend(tokenize(reader));
		let fed = builder.finish();
		tracing::debug!(tokens = fed, nodes = self.graph.len(), "Fed token stream");
		fed
	}

	/// Feeds an in-memory string.
	pub fn feed_str(&mut self, text: &str) -> usize {
		self.feed(text.as_bytes())
	}

	/// Feeds the content of a text file.
	///
	/// # Errors
	/// Returns an error if the file cannot be opened.
	pub fn feed_file<P: AsRef<Path>>(&mut self, path: P) -> Result<usize> {
		let reader = io::open_text(&path)?;
		Ok(self.feed(reader))
	}

	/// Replaces the content of the SQLite database at `path` with this graph.
	///
	/// The file and its parent directory are created if missing.
	pub fn save_to_store<P: AsRef<Path>>(&self, path: P) -> Result<()> {
		let mut connection = store::open_or_create(path.as_ref())?;
		store::save(&self.graph, &mut connection)
	}

	/// Writes a binary snapshot of the graph to `path`.
	pub fn save_snapshot<P: AsRef<Path>>(&self, path: P) -> Result<()> {
		snapshot::write(&self.graph, path)
	}

	/// Generates at most `max_length` tokens from a random start node.
	///
	/// # Errors
	/// Returns `EmptyGraph` if nothing was fed or loaded.
	pub fn generate(&mut self, max_length: usize) -> Result<Vec<String>> {
		self.generate_with(&GenerateInput::new(max_length))
	}

	/// Generates a chain according to `input`.
	pub fn generate_with(&mut self, input: &GenerateInput) -> Result<Vec<String>> {
		Generator::new(&self.graph, &mut self.rng).generate(input)
	}

	/// Generates a chain and joins it into readable text.
	pub fn generate_text(&mut self, max_length: usize) -> Result<String> {
		Ok(join(&self.generate(max_length)?))
	}
}
