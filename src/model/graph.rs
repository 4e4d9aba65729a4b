//! Graph module for decay chain representation.
//!
//! This module provides the in-memory graph model of one event:
//! - `DecayGraph`: titled directed graph with nodes and edges in insertion order.
//! - `GraphNode`: node identified by its particle index, with a display label.
//! - `GraphEdge`: directed edge from parent to child.

use crate::model::particle::ParticleIndex;
use std::collections::HashMap;
use std::fmt;

// =#========================================================================#=
// DECAY GRAPH
// =#========================================================================#=
/// A directed decay graph of one event.
///
/// Nodes are stored in a contiguous vector in insertion order, with a side
/// table from particle index to position for constant-time lookup. Edges are
/// stored in insertion order as well, so that serialization is deterministic.
///
/// # Structure
/// - Node identifiers are unique
/// - Edge endpoints refer to existing nodes
/// - No acyclicity is enforced; a cyclic input yields a cyclic graph
///
/// Graphs are built by the [DecayGraphBuilder](crate::model::DecayGraphBuilder)
/// or parsed back from DOT text by [parse_dot_str](crate::dot::parse_dot_str),
/// and are read-only afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct DecayGraph {
    title: String,
    nodes: Vec<GraphNode>,
    edges: Vec<GraphEdge>,
    positions: HashMap<ParticleIndex, usize>,
}

/// Node of a [DecayGraph].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GraphNode {
    pub id: ParticleIndex,
    pub label: String,
}

/// Directed edge of a [DecayGraph], from parent to child.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GraphEdge {
    pub parent: ParticleIndex,
    pub child: ParticleIndex,
}

// ============================================================================
// New, Construction (crate)
// ============================================================================
impl DecayGraph {
    /// Creates an empty graph with the given title.
    pub fn new<S: Into<String>>(title: S) -> Self {
        Self::with_capacity(title, 0)
    }

    /// Creates an empty graph with room for `num_nodes` nodes and edges.
    pub fn with_capacity<S: Into<String>>(title: S, num_nodes: usize) -> Self {
        Self {
            title: title.into(),
            nodes: Vec::with_capacity(num_nodes),
            edges: Vec::with_capacity(num_nodes),
            positions: HashMap::with_capacity(num_nodes),
        }
    }

    /// Adds a node, returning `false` (and leaving the graph unchanged) if
    /// a node with the same identifier already exists.
    pub(crate) fn add_node(&mut self, id: ParticleIndex, label: String) -> bool {
        if self.positions.contains_key(&id) {
            return false;
        }
        self.positions.insert(id, self.nodes.len());
        self.nodes.push(GraphNode { id, label });
        true
    }

    /// Replaces the label of an existing node, or adds the node.
    pub(crate) fn set_label(&mut self, id: ParticleIndex, label: String) {
        match self.positions.get(&id) {
            Some(&pos) => self.nodes[pos].label = label,
            None => {
                self.add_node(id, label);
            }
        }
    }

    /// Adds an edge between two existing nodes.
    pub(crate) fn add_edge(&mut self, parent: ParticleIndex, child: ParticleIndex) {
        debug_assert!(self.contains_node(parent) && self.contains_node(child));
        self.edges.push(GraphEdge { parent, child });
    }
}

// ============================================================================
// Getters / Accessors (pub)
// ============================================================================
impl DecayGraph {
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns nodes in insertion order.
    pub fn nodes(&self) -> &[GraphNode] {
        &self.nodes
    }

    /// Returns edges in insertion order.
    pub fn edges(&self) -> &[GraphEdge] {
        &self.edges
    }

    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }

    pub fn num_edges(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains_node(&self, id: ParticleIndex) -> bool {
        self.positions.contains_key(&id)
    }

    /// Returns the node with identifier `id`, if present.
    pub fn node(&self, id: ParticleIndex) -> Option<&GraphNode> {
        self.positions.get(&id).map(|&pos| &self.nodes[pos])
    }

    /// Returns the label of node `id`, if present.
    pub fn label(&self, id: ParticleIndex) -> Option<&str> {
        self.node(id).map(|node| node.label.as_str())
    }

    /// Returns the identifiers of all nodes without incoming edge, in node order.
    pub fn roots(&self) -> Vec<ParticleIndex> {
        let mut has_parent = vec![false; self.nodes.len()];
        for edge in &self.edges {
            has_parent[self.positions[&edge.child]] = true;
        }
        self.nodes
            .iter()
            .zip(has_parent)
            .filter(|(_, has_parent)| !has_parent)
            .map(|(node, _)| node.id)
            .collect()
    }

    /// Returns the children of node `id` in edge order.
    pub fn children(&self, id: ParticleIndex) -> Vec<ParticleIndex> {
        self.edges
            .iter()
            .filter(|edge| edge.parent == id)
            .map(|edge| edge.child)
            .collect()
    }
}

impl fmt::Display for DecayGraph {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{} ({} particles, {} decays)",
            self.title,
            self.num_nodes(),
            self.num_edges()
        )
    }
}
