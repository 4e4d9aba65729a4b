//! Data model for decay chains.
//!
//! # Records and events
//! Record sources deliver flat [ParticleRecord]s. [partition_events] groups
//! them by event index into [EventGroup]s, preserving input order.
//!
//! # Graphs
//! Each event becomes a [DecayGraph] built by the [DecayGraphBuilder]:
//!
//! | Record field     | Graph element                          |
//! |------------------|----------------------------------------|
//! | `particle_index` | node identifier                        |
//! | `identity_code`  | node label via [IdentityLookup]        |
//! | `parent_index`   | edge parent → particle (unless [NO_PARENT]) |
//!
//! # Label handling
//! The [IdentityLookup] is loaded once and passed by reference into every
//! build, so graph construction is a pure function of its inputs.

pub mod event;
pub mod graph;
pub mod graph_builder;
pub mod identity_lookup;
pub mod particle;

// Records and events
pub use event::{EventCountMismatch, EventGroup, PartitionedEvents, partition_events};
pub use particle::{IdentityCode, NO_PARENT, ParticleIndex, ParticleRecord};
// Graphs
pub use graph::{DecayGraph, GraphEdge, GraphNode};
pub use graph_builder::{DecayGraphBuilder, build_decay_graph, graph_title};
// Label handling
pub use identity_lookup::IdentityLookup;
