//! Word-adjacency text generation library.
//!
//! This crate provides a first-order token graph generator including:
//! - A Unicode-aware tokenizer splitting text into letter, digit and punctuation runs
//! - An incrementally built graph of token successors
//! - A seedable random walk producing new token chains
//! - A detokenizer restoring natural spacing
//! - SQLite and binary snapshot persistence
//!
//! Most callers only need `Markov`, re-exported at the crate root.

/// Token graph, builder, and random walk generation.
pub mod model;

/// Tokenizer and detokenizer.
pub mod text;

/// SQLite store adapter (`word` and `next` tables).
pub mod store;

/// Binary graph snapshots.
pub mod snapshot;

/// Error taxonomy shared by every module.
pub mod error;

/// I/O utilities (file opening, path helpers).
pub mod io;

pub use error::{MarkovError, Result};
pub use model::generate_input::{GenerateInput, StartToken};
pub use model::markov::Markov;
pub use text::detokenizer::join;
pub use text::tokenizer::{tokenize, tokenize_str};
