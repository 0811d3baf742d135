/// Strategy used to select the first token of a generated chain.
///
/// # Variants
/// - `Random`: pick a start node uniformly among all nodes.
/// - `Custom(String)`: start from the given token text, which must exist.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum StartToken {
	#[default]
	Random,
	Custom(String),
}

/// Input parameters for one random walk.
///
/// # Notes
/// - A chain always holds at least its start token, so a `max_length`
///   of 0 behaves like 1.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GenerateInput {
	/// Upper bound on the number of tokens returned.
	pub max_length: usize,

	/// How the first token is chosen.
	pub start: StartToken,
}

impl GenerateInput {
	/// Creates an input with a random start.
	pub fn new(max_length: usize) -> Self {
		Self { max_length, start: StartToken::Random }
	}

	/// Starts the walk from `token` instead of a random node.
	pub fn starting_at(mut self, token: impl Into<String>) -> Self {
		self.start = StartToken::Custom(token.into());
		self
	}
}
