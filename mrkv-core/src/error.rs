use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced by the token graph, its stores and the generator.
///
/// Nothing is retried internally. Store failures leave the caller with
/// no usable graph; the previous in-memory graph (if any) is untouched.
#[derive(Debug, Error)]
pub enum MarkovError {
	/// The SQLite store could not be opened or created.
	#[error("failed to open store at {}: {source}", path.display())]
	StoreOpen {
		path: PathBuf,
		#[source]
		source: rusqlite::Error,
	},

	/// A query or row conversion failed while loading a graph.
	#[error("failed to read store: {0}")]
	StoreRead(#[source] rusqlite::Error),

	/// A statement or transaction failed while saving a graph.
	#[error("failed to write store: {0}")]
	StoreWrite(#[source] rusqlite::Error),

	/// An edge references an id with no matching token row.
	#[error("edge {id} -> {next} references an unknown token id")]
	DanglingEdge { id: i64, next: i64 },

	/// A node lists the same successor more than once.
	#[error("edge {id} -> {next} is stored more than once")]
	DuplicateEdge { id: i64, next: i64 },

	/// Two rows carry the same token text.
	#[error("token {0:?} is stored more than once")]
	DuplicateToken(String),

	/// Generation was requested on a graph without nodes.
	#[error("cannot generate from an empty graph")]
	EmptyGraph,

	/// A custom start token is not part of the graph.
	#[error("unknown start token {0:?}")]
	UnknownToken(String),

	#[error("snapshot encoding failed: {0}")]
	Snapshot(#[from] postcard::Error),

	#[error(transparent)]
	Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, MarkovError>;
