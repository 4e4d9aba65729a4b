//! Decaygraph is a library (and command-line tool) to draw the decay chains
//! of Monte-Carlo generated particle collision events.
//!
//! Every event consists of particles, each with an identity code (PDG id)
//! and the index of the particle it decayed from. This crate groups the flat
//! particle records of an input file by event, builds one directed graph per
//! event (parent → child) with human-readable particle names as node labels,
//! serializes it to Graphviz DOT and writes it as `dot`, `png`, `pdf` or
//! `svg` file. Core functionality provided:
//! - Record sources: structured event entries (JSON / JSON Lines, see
//!   [source::ntuple]), Les Houches Event files ([source::lhe]), and a
//!   placeholder for plain text ([source::stub]); chosen by file extension.
//! - Identity lookup: names for identity codes from a gzip-compressed JSON
//!   table ([IdentityLookup]).
//! - Graph model and builder: [DecayGraph] + [DecayGraphBuilder] with strict
//!   checks (unknown codes, duplicate particles, dangling parent references).
//! - DOT: writer with configurable node shape, and a parser for the DOT
//!   subset it emits plus common hand-written variants ([dot]).
//! - Output: atomic file output, images rendered through Graphviz ([output]).
//!
//! Limitations:
//! - Only the first parent of a particle is considered
//! - Node attributes besides label and shape are not written
//! - Events are processed sequentially
//!
//! # Usage patterns
//! 1. [run] executes a complete [RunConfig], the way the binary does.
//! 2. The building blocks can be used one by one:
//!    [source::read_records] → [partition_events] → [build_decay_graph] →
//!    [to_dot] → [OutputSink](output::OutputSink).
//!
//! ## Example Default Configuration
//! ```no_run
//! use decaygraph::{run, Interrupt, RunConfig};
//!
//! let config = RunConfig::new("events.lhe").with_max_events(5);
//! let summary = run(&config, &Interrupt::new())?;
//! println!("Wrote {} graph file(s)", summary.written.len());
//! # Ok::<(), decaygraph::DecayGraphError>(())
//! ```
//!
//! ## Example Building Blocks
//! ```
//! use decaygraph::{build_decay_graph, partition_events, to_dot, IdentityLookup};
//! use decaygraph::model::{ParticleRecord, NO_PARENT};
//!
//! let lookup: IdentityLookup = [("2212", "p+"), ("22", "gamma")].into_iter().collect();
//! let records = vec![
//!     ParticleRecord::new(0, 0, 2212, NO_PARENT, 4),
//!     ParticleRecord::new(0, 1, 22, 0, 1),
//! ];
//!
//! let events = partition_events(&records, 2);
//! let graph = build_decay_graph(&events.groups[0], &lookup)?;
//! assert!(to_dot(&graph).contains("0 -> 1;"));
//! # Ok::<(), decaygraph::DecayGraphError>(())
//! ```

pub mod config;
pub mod dot;
pub mod error;
pub mod model;
pub mod output;
pub mod parser;
pub mod pipeline;
pub mod source;

pub use config::RunConfig;
pub use dot::{parse_dot_str, to_dot};
pub use error::DecayGraphError;
pub use model::{DecayGraph, DecayGraphBuilder, IdentityLookup, build_decay_graph, partition_events};
pub use pipeline::{Interrupt, RunSummary, process_records, run};
