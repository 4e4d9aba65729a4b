//! DOT format writer and parser for decay graphs.
//!
//! This module turns a [`DecayGraph`] into Graphviz DOT text, the
//! graph-description format handed to external renderers, and parses such
//! text back. Serializing and re-parsing a graph yields the same title,
//! node identifiers, labels and edges, in the same order.
//!
//! # Quick API
//! * [`to_dot`] - serializes a graph with default style (circle nodes)
//! * [`parse_dot_str`] - parses a single DOT graph from a string
//! * [`parse_dot_file`] - parses a single DOT graph from a file
//!
//! # Full API
//! * [`to_dot_with_style`] / [`write_dot`] with a [`DotStyle`]
//! * [`DotParser`] for configured parsing from a [`ByteParser`]
//!
//! # Format
//! The writer emits:
//! ```text
//! digraph "Event 0" {
//!     0 [label="Z0", shape=circle];
//!     1 [label="mu-", shape=circle];
//!     0 -> 1;
//! }
//! ```

mod defs;
mod parser;
pub mod writer;

pub use self::parser::DotParser;
pub use self::writer::{DotStyle, NodeShape, to_dot, to_dot_with_style, write_dot};

use crate::model::DecayGraph;
use crate::parser::ByteParser;
use crate::parser::ParsingError;
use std::path::Path;

// ============================================================================
// QUICK PARSING API (pub)
// ============================================================================
/// Parses a single DOT graph from a string using default settings.
///
/// # Example
/// ```
/// use decaygraph::dot::parse_dot_str;
///
/// let graph = parse_dot_str("digraph \"Event 0\" { 0 [label=gamma]; }").unwrap();
/// assert_eq!(graph.label(0), Some("gamma"));
/// ```
pub fn parse_dot_str<S: AsRef<str>>(dot: S) -> Result<DecayGraph, ParsingError> {
    let mut byte_parser = ByteParser::for_str(dot.as_ref());
    DotParser::new().parse_str(&mut byte_parser)
}

/// Parses a single DOT graph from the file at `path` using default settings.
pub fn parse_dot_file<P: AsRef<Path>>(path: P) -> Result<DecayGraph, ParsingError> {
    let mut byte_parser = ByteParser::for_file(path)?;
    DotParser::new().parse_str(&mut byte_parser)
}
