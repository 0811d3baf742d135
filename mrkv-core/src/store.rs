//! SQLite persistence for token graphs.
//!
//! The durable form is two tables: `word` maps ids to token texts and `next`
//! lists edges as `(id, next)` pairs. Saving is a full replace done in three
//! transactions: clear both tables, insert every word, insert every edge.
//! A crash between the last two leaves all words but no edges; the next full
//! save repairs it.

use std::collections::HashMap;
use std::path::Path;

use rusqlite::{Connection, OpenFlags, params};

use crate::error::{MarkovError, Result};
use crate::io::ensure_parent_dir;
use crate::model::token_graph::TokenGraph;
use crate::model::token_node::{TokenId, TokenNode};

const SCHEMA: &str = r"
	CREATE TABLE IF NOT EXISTS word (
		id   INTEGER PRIMARY KEY,
		word TEXT UNIQUE NOT NULL
	);

	CREATE TABLE IF NOT EXISTS next (
		id   INTEGER NOT NULL,
		next INTEGER NOT NULL,
		PRIMARY KEY (id, next),
		UNIQUE (id, next)
	);
";

/// Opens an existing store for reading.
///
/// A missing file or a file that is not a SQLite database is a `StoreOpen` error.
pub fn open_existing(path: &Path) -> Result<Connection> {
	let open_error = |source| MarkovError::StoreOpen { path: path.to_path_buf(), source };

	let connection = Connection::open_with_flags(
		path,
		OpenFlags::SQLITE_OPEN_READ_WRITE | OpenFlags::SQLITE_OPEN_NO_MUTEX,
	)
	.map_err(open_error)?;
	// SQLite opens lazily; touch the header so garbage files fail here.
	connection
		.query_row("PRAGMA schema_version", [], |row| row.get::<_, i64>(0))
		.map_err(open_error)?;

	tracing::info!(path = %path.display(), "Opened store");
	Ok(connection)
}

/// Opens a store for writing, creating the file and its directory if needed.
pub fn open_or_create(path: &Path) -> Result<Connection> {
	ensure_parent_dir(path)?;
	Connection::open(path).map_err(|source| MarkovError::StoreOpen { path: path.to_path_buf(), source })
}

/// Reads every word row, then every edge row, into a new graph.
///
/// # Notes
/// - Stored ids may be sparse; they are remapped densely in ascending order.
///   A store written by `save` has contiguous ids, which are kept as-is.
/// - Edges are appended in insertion order, so successor order survives a
///   save/load round trip.
/// - Duplicate edge rows are ignored.
///
/// # Errors
/// - `StoreRead` if a query fails or a row has the wrong shape.
/// - `DanglingEdge` if an edge references an id absent from `word`.
/// - `DuplicateToken` if two rows share a text.
pub fn load(connection: &Connection) -> Result<TokenGraph> {
	let mut dense: HashMap<i64, TokenId> = HashMap::new();
	let mut nodes = Vec::new();

	let mut words = connection
		.prepare("SELECT id, word FROM word ORDER BY id")
		.map_err(MarkovError::StoreRead)?;
	let rows = words
		.query_map([], |row| Ok((row.get::<_, i64>(0)?, row.get::<_, String>(1)?)))
		.map_err(MarkovError::StoreRead)?;
	for row in rows {
		let (id, text) = row.map_err(MarkovError::StoreRead)?;
		dense.insert(id, nodes.len());
		nodes.push(TokenNode::new(&text));
	}

	let mut edges = connection
		.prepare("SELECT id, next FROM next ORDER BY rowid")
		.map_err(MarkovError::StoreRead)?;
	let rows = edges
		.query_map([], |row| Ok((row.get::<_, i64>(0)?, row.get::<_, i64>(1)?)))
		.map_err(MarkovError::StoreRead)?;
	let mut edge_rows = 0usize;
	for row in rows {
		let (id, next) = row.map_err(MarkovError::StoreRead)?;
		let (Some(&from), Some(&to)) = (dense.get(&id), dense.get(&next)) else {
			return Err(MarkovError::DanglingEdge { id, next });
		};
		nodes[from].add_successor(to);
		edge_rows += 1;
	}

	let graph = TokenGraph::from_nodes(nodes)?;
	tracing::debug!(nodes = graph.len(), edges = edge_rows, "Loaded graph from store");
	Ok(graph)
}

/// Replaces the store content with `graph`.
///
/// # Errors
/// Returns `StoreWrite` if any statement or commit fails. Tables cleared or
/// filled by an already committed step stay that way.
pub fn save(graph: &TokenGraph, connection: &mut Connection) -> Result<()> {
	let tx = connection.transaction().map_err(MarkovError::StoreWrite)?;
	tx.execute_batch(SCHEMA).map_err(MarkovError::StoreWrite)?;
	tx.execute("DELETE FROM next", []).map_err(MarkovError::StoreWrite)?;
	tx.execute("DELETE FROM word", []).map_err(MarkovError::StoreWrite)?;
	tx.commit().map_err(MarkovError::StoreWrite)?;

	let tx = connection.transaction().map_err(MarkovError::StoreWrite)?;
	{
		let mut insert = tx
			.prepare("INSERT INTO word (id, word) VALUES (?1, ?2)")
			.map_err(MarkovError::StoreWrite)?;
		for (id, node) in graph.nodes() {
			insert
				.execute(params![id as i64, node.text()])
				.map_err(MarkovError::StoreWrite)?;
		}
	}
	tx.commit().map_err(MarkovError::StoreWrite)?;

	let tx = connection.transaction().map_err(MarkovError::StoreWrite)?;
	let mut edge_rows = 0usize;
	{
		let mut insert = tx
			.prepare("INSERT INTO next (id, next) VALUES (?1, ?2)")
			.map_err(MarkovError::StoreWrite)?;
		for (id, node) in graph.nodes() {
			for &next in node.successors() {
				insert
					.execute(params![id as i64, next as i64])
					.map_err(MarkovError::StoreWrite)?;
				edge_rows += 1;
			}
		}
	}
	tx.commit().map_err(MarkovError::StoreWrite)?;

	tracing::info!(nodes = graph.len(), edges = edge_rows, "Saved graph to store");
	Ok(())
}
