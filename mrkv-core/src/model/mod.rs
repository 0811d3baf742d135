//! Top-level module for the token graph and its random walk.
//!
//! This module provides a first-order word-adjacency generator, including:
//! - Token nodes with unweighted successor sets (`TokenNode`)
//! - The arena-backed graph (`TokenGraph`)
//! - Pairwise graph construction from a token stream (`Builder`)
//! - Random walk configuration (`GenerateInput`)
//! - The seeded random walk itself (`Generator`)
//! - A session facade tying everything together (`Markov`)

/// Single node of the graph: a token text and its successor ids.
pub mod token_node;

/// Arena of nodes plus a text index for lookup-or-create.
///
/// Handles idempotent edge insertion and invariant-checked bulk loading.
pub mod token_graph;

/// Consumes a token stream pairwise and inserts edges.
pub mod builder;

/// Random walk configuration: length bound and start strategy.
pub mod generate_input;

/// Bounded random walk over a graph with a caller-owned random source.
pub mod generator;

/// High-level session owning a graph and a seeded random source.
///
/// Exposes feeding, generation, and persistence to SQLite or binary snapshots.
pub mod markov;
