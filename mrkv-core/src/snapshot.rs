//! Compact binary snapshots of a token graph.
//!
//! The snapshot is the postcard encoding of the node list in id order, so ids
//! are preserved exactly. It is meant as a fast local cache next to a corpus,
//! not as an interchange format.

use std::fs;
use std::path::Path;

use crate::error::Result;
use crate::io::ensure_parent_dir;
use crate::model::token_graph::TokenGraph;
use crate::model::token_node::TokenNode;

/// Serializes `graph` to `path`, replacing any existing file.
pub fn write<P: AsRef<Path>>(graph: &TokenGraph, path: P) -> Result<()> {
	let path = path.as_ref();
	ensure_parent_dir(path)?;

	let nodes: Vec<&TokenNode> = graph.nodes().map(|(_, node)| node).collect();
	let bytes = postcard::to_stdvec(&nodes)?;
	fs::write(path, bytes)?;

	tracing::debug!(path = %path.display(), nodes = nodes.len(), "Wrote snapshot");
	Ok(())
}

/// Reads a snapshot written by `write`, validating graph invariants.
pub fn read<P: AsRef<Path>>(path: P) -> Result<TokenGraph> {
	let bytes = fs::read(path)?;
	let nodes: Vec<TokenNode> = postcard::from_bytes(&bytes)?;
	TokenGraph::from_nodes(nodes)
}
