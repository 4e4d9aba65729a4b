//! DOT format writing for decay graphs.

use crate::dot::defs::{
    DIGRAPH, EDGE_STMT_CHARS, INDENT, LABEL_ATTR, NODE_STMT_CHARS, SHAPE_ATTR,
};
use crate::model::DecayGraph;
use crate::parser::utils::{quote, quote_if_needed};
use std::fmt;
use std::io::{self, Write};

// =#========================================================================#=
// DOT STYLE
// =#========================================================================S=
/// Shape attribute applied uniformly to all nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum NodeShape {
    #[default]
    Circle,
    Ellipse,
    Box,
    Plaintext,
}

impl NodeShape {
    /// Returns the Graphviz name of this shape.
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeShape::Circle => "circle",
            NodeShape::Ellipse => "ellipse",
            NodeShape::Box => "box",
            NodeShape::Plaintext => "plaintext",
        }
    }
}

impl fmt::Display for NodeShape {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Style for serializing a graph to DOT.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DotStyle {
    pub node_shape: NodeShape,
}

impl DotStyle {
    pub fn with_node_shape(mut self, node_shape: NodeShape) -> Self {
        self.node_shape = node_shape;
        self
    }
}

// =#========================================================================#=
// WRITING
// =#========================================================================#=
/// Returns the DOT representation of `graph` in the default style.
///
/// # Example
/// ```
/// use decaygraph::dot::to_dot;
/// use decaygraph::model::{build_decay_graph, EventGroup, IdentityLookup, ParticleRecord, NO_PARENT};
///
/// let lookup: IdentityLookup = [("111", "pi0"), ("22", "gamma")].into_iter().collect();
/// let group = EventGroup::with_records(4, vec![
///     ParticleRecord::new(4, 0, 111, NO_PARENT, 0),
///     ParticleRecord::new(4, 1, 22, 0, 1),
/// ]);
/// let graph = build_decay_graph(&group, &lookup).unwrap();
///
/// assert_eq!(
///     to_dot(&graph),
///     "digraph \"Event 4\" {\n    0 [label=\"pi0\", shape=circle];\n    1 [label=\"gamma\", shape=circle];\n    0 -> 1;\n}\n"
/// );
/// ```
pub fn to_dot(graph: &DecayGraph) -> String {
    to_dot_with_style(graph, &DotStyle::default())
}

/// Returns the DOT representation of `graph` in the given style.
///
/// Layout: a `digraph` declaration carrying the quoted title, one node
/// statement per node, then one edge statement per edge, each in insertion
/// order. Labels are always quoted.
pub fn to_dot_with_style(graph: &DecayGraph, style: &DotStyle) -> String {
    let mut dot = String::with_capacity(estimate_dot_len(graph));
    let shape = quote_if_needed(style.node_shape.as_str());

    dot.push_str(DIGRAPH);
    dot.push(' ');
    dot.push_str(&quote(graph.title()));
    dot.push_str(" {\n");

    for node in graph.nodes() {
        dot.push_str(INDENT);
        dot.push_str(&node.id.to_string());
        dot.push_str(" [");
        dot.push_str(LABEL_ATTR);
        dot.push('=');
        dot.push_str(&quote(&node.label));
        dot.push_str(", ");
        dot.push_str(SHAPE_ATTR);
        dot.push('=');
        dot.push_str(&shape);
        dot.push_str("];\n");
    }

    for edge in graph.edges() {
        dot.push_str(INDENT);
        dot.push_str(&edge.parent.to_string());
        dot.push_str(" -> ");
        dot.push_str(&edge.child.to_string());
        dot.push_str(";\n");
    }

    dot.push_str("}\n");
    dot
}

/// Writes the DOT representation of `graph` to `writer`.
///
/// # Errors
/// Returns an I/O error if writing fails.
pub fn write_dot<W: Write>(mut writer: W, graph: &DecayGraph, style: &DotStyle) -> io::Result<()> {
    writer.write_all(to_dot_with_style(graph, style).as_bytes())?;
    writer.flush()
}

/// Estimates the length of the DOT text for `graph`, for pre-allocation.
fn estimate_dot_len(graph: &DecayGraph) -> usize {
    let label_chars: usize = graph.nodes().iter().map(|n| n.label.len() + 2).sum();
    graph.title().len()
        + 16
        + graph.num_nodes() * NODE_STMT_CHARS
        + label_chars
        + graph.num_edges() * EDGE_STMT_CHARS
}
