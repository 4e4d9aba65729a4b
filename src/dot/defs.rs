//! Constants and definitions for DOT writing and parsing.

/// Keyword opening a directed graph
pub(crate) const DIGRAPH: &str = "digraph";

/// Keyword opening an undirected graph (accepted by the parser only)
pub(crate) const GRAPH: &str = "graph";

/// Optional keyword before the graph kind
pub(crate) const STRICT: &str = "strict";

/// Keywords of default-attribute statements
pub(crate) const NODE: &str = "node";
pub(crate) const EDGE: &str = "edge";

/// Directed and undirected edge operators
pub(crate) const DIRECTED_EDGE_OP: &[u8] = b"->";
pub(crate) const UNDIRECTED_EDGE_OP: &[u8] = b"--";

/// Attribute holding the node display name
pub(crate) const LABEL_ATTR: &str = "label";

/// Attribute holding the node shape
pub(crate) const SHAPE_ATTR: &str = "shape";

/// Indentation of statements inside the graph body
pub(crate) const INDENT: &str = "    ";

/// Estimated characters per node statement (without label)
pub(crate) const NODE_STMT_CHARS: usize = 32;

/// Estimated characters per edge statement
pub(crate) const EDGE_STMT_CHARS: usize = 16;
