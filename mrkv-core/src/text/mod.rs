//! Conversion between raw text and token sequences.

/// Lazy segmentation of a character stream into classified runs.
pub mod tokenizer;

/// Reassembly of a token sequence with natural spacing.
pub mod detokenizer;
