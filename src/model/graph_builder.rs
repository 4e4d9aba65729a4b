//! Construction of decay graphs from event groups.
//!
//! The [DecayGraphBuilder] turns one [EventGroup] into a [DecayGraph]:
//! one node per particle, labelled through the [IdentityLookup], and one
//! edge per particle with a recorded parent.
//!
//! # Checks
//! The builder fails loudly rather than emitting a misleading graph:
//! - unknown identity code → [DecayGraphError::LookupFailure]
//! - particle index used twice → [DecayGraphError::DuplicateParticle]
//! - parent index that is neither the sentinel nor a particle of the same
//!   event → [DecayGraphError::ReferentialIntegrityFailure]
//!
//! Cycles in the parent references are not detected; they simply show up as
//! cycles in the graph.

use crate::error::DecayGraphError;
use crate::model::event::EventGroup;
use crate::model::graph::DecayGraph;
use crate::model::identity_lookup::IdentityLookup;

/// Prefix of the graph title, followed by the event index.
pub const TITLE_PREFIX: &str = "Event";

// =#========================================================================#=
// DECAY GRAPH BUILDER
// =#========================================================================T=
/// Builds [DecayGraph]s against a shared, read-only [IdentityLookup].
///
/// The builder holds no state besides the lookup reference, so one builder
/// can be reused for every event of a run.
///
/// # Example
/// ```
/// use decaygraph::model::{DecayGraphBuilder, EventGroup, IdentityLookup, ParticleRecord, NO_PARENT};
///
/// let lookup: IdentityLookup = [("23", "Z0"), ("13", "mu-"), ("-13", "mu+")].into_iter().collect();
/// let group = EventGroup::with_records(0, vec![
///     ParticleRecord::new(0, 0, 23, NO_PARENT, 2),
///     ParticleRecord::new(0, 1, 13, 0, 1),
///     ParticleRecord::new(0, 2, -13, 0, 1),
/// ]);
///
/// let graph = DecayGraphBuilder::new(&lookup).build(&group).unwrap();
/// assert_eq!(graph.title(), "Event 0");
/// assert_eq!(graph.num_nodes(), 3);
/// assert_eq!(graph.children(0), vec![1, 2]);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct DecayGraphBuilder<'a> {
    lookup: &'a IdentityLookup,
}

impl<'a> DecayGraphBuilder<'a> {
    pub fn new(lookup: &'a IdentityLookup) -> Self {
        Self { lookup }
    }

    /// Builds the decay graph of `group`.
    ///
    /// Nodes and edges are inserted in record order. An empty group yields an
    /// empty graph titled after the group's event index.
    ///
    /// # Errors
    /// See the [module documentation](self); no partial graph is returned.
    pub fn build(&self, group: &EventGroup) -> Result<DecayGraph, DecayGraphError> {
        let event = group.event_index();
        let mut graph = DecayGraph::with_capacity(graph_title(event), group.len());

        // Nodes
        for record in group.records() {
            let particle = record.particle_index();
            let label = self.lookup.resolve(record.identity_code()).ok_or(
                DecayGraphError::LookupFailure {
                    code: record.identity_code(),
                    event,
                    particle,
                },
            )?;
            if !graph.add_node(particle, label.to_string()) {
                return Err(DecayGraphError::DuplicateParticle { event, particle });
            }
        }

        // Edges, only once all nodes are known (parents may come after children)
        for record in group.records() {
            let Some(parent) = record.parent() else {
                continue;
            };
            let parent_index = usize::try_from(parent)
                .ok()
                .filter(|&index| graph.contains_node(index))
                .ok_or(DecayGraphError::ReferentialIntegrityFailure {
                    event,
                    particle: record.particle_index(),
                    parent,
                })?;
            graph.add_edge(parent_index, record.particle_index());
        }

        Ok(graph)
    }
}

/// Builds the decay graph of `group` with labels from `lookup`.
///
/// Shorthand for [`DecayGraphBuilder::new(lookup).build(group)`](DecayGraphBuilder::build).
pub fn build_decay_graph(
    group: &EventGroup,
    lookup: &IdentityLookup,
) -> Result<DecayGraph, DecayGraphError> {
    DecayGraphBuilder::new(lookup).build(group)
}

/// Returns the title used for the graph of event `event_index`.
pub fn graph_title(event_index: usize) -> String {
    format!("{TITLE_PREFIX} {event_index}")
}
