//! End-to-end processing: records in, one graph file per event out.
//!
//! [run] executes a whole [RunConfig]:
//! 1. select the record source from the input extension
//! 2. load the identity lookup
//! 3. read records and partition them into events
//! 4. report a mismatch between observed and requested event count
//! 5. per event: build the graph, serialize it to DOT, write it
//!
//! [process_records] is step 3 onwards over records already in memory, with
//! the lookup and the [OutputSink] supplied by the caller.
//!
//! # Interruption
//! An [Interrupt] is checked before each event and after each write. Once it
//! is triggered, the run stops and reports
//! [interrupted](RunSummary::interrupted); errors raised after the trigger
//! (e.g. a renderer killed by the same signal) are dropped.

use crate::config::RunConfig;
use crate::dot::{DotStyle, to_dot_with_style};
use crate::error::DecayGraphError;
use crate::model::{
    DecayGraphBuilder, EventCountMismatch, IdentityLookup, ParticleRecord, partition_events,
};
use crate::output::{GraphvizRenderer, OutputSink, Renderer};
use crate::source::RecordSource;
use log::{debug, info, warn};
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

// =#========================================================================#=
// INTERRUPT
// =#========================================================================#=
/// Shared cancellation flag, set from a signal handler or another thread.
#[derive(Debug, Clone, Default)]
pub struct Interrupt {
    flag: Arc<AtomicBool>,
}

impl Interrupt {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a flag that is triggered on Ctrl-C (SIGINT) and on SIGTERM.
    ///
    /// # Errors
    /// If a handler has already been installed for this process.
    pub fn install() -> Result<Self, ctrlc::Error> {
        let interrupt = Self::new();
        let flag = Arc::clone(&interrupt.flag);
        ctrlc::set_handler(move || flag.store(true, Ordering::SeqCst))?;
        Ok(interrupt)
    }

    pub fn trigger(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    pub fn is_triggered(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }
}

// =#========================================================================#=
// RUN SUMMARY
// =#========================================================================#=
/// Outcome of a completed (or interrupted) run.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RunSummary {
    /// Number of distinct events found in the input
    pub observed_events: usize,
    /// Maximum number of events asked for
    pub requested_events: usize,
    /// Output files in event order
    pub written: Vec<PathBuf>,
    /// Whether the run stopped early on an [Interrupt]
    pub interrupted: bool,
    /// Set if observed and requested event counts differ
    pub advisory: Option<EventCountMismatch>,
}

impl RunSummary {
    fn interrupted(requested_events: usize) -> Self {
        Self {
            requested_events,
            interrupted: true,
            ..Self::default()
        }
    }
}

// =#========================================================================#=
// PIPELINE
// =#========================================================================#=
/// Executes `config` end to end, rendering images with Graphviz.
///
/// # Errors
/// The first fatal [DecayGraphError]; files already written stay in place.
/// No error is returned once `interrupt` has been triggered.
pub fn run(config: &RunConfig, interrupt: &Interrupt) -> Result<RunSummary, DecayGraphError> {
    match run_unchecked(config, interrupt) {
        Err(err) if interrupt.is_triggered() => {
            debug!("Dropping error after interrupt: {err}");
            Ok(RunSummary::interrupted(config.max_events()))
        }
        result => result,
    }
}

fn run_unchecked(config: &RunConfig, interrupt: &Interrupt) -> Result<RunSummary, DecayGraphError> {
    let source = RecordSource::for_path(config.input())?;
    debug!("Reading {} as {:?}", config.input().display(), source.kind());

    let lookup = IdentityLookup::from_gzip_json_file(config.lookup_path())?;
    debug!(
        "Loaded {} identity names from {}",
        lookup.len(),
        config.lookup_path().display()
    );

    let records = source.read(config.max_events())?;
    let sink = OutputSink::new(
        config.format(),
        config.output_pattern(),
        GraphvizRenderer::new(config.renderer()),
    );
    let style = DotStyle::default().with_node_shape(config.node_shape());

    process_records(&records, &lookup, &sink, &style, config.max_events(), interrupt)
}

/// Partitions `records` into at most `max_events` events and writes one graph
/// file per event through `sink`.
///
/// # Arguments
/// * `records` - Flat records as delivered by a record source
/// * `lookup` - Identity names for node labels
/// * `sink` - Destination of the serialized graphs
/// * `style` - DOT style for all graphs
/// * `max_events` - Upper bound on the number of events
/// * `interrupt` - Checked before each event and after each write
///
/// # Errors
/// The first build or write error, unless `interrupt` was triggered by then.
pub fn process_records<R: Renderer>(
    records: &[ParticleRecord],
    lookup: &IdentityLookup,
    sink: &OutputSink<R>,
    style: &DotStyle,
    max_events: usize,
    interrupt: &Interrupt,
) -> Result<RunSummary, DecayGraphError> {
    let partitioned = partition_events(records, max_events);
    let mut summary = RunSummary {
        observed_events: partitioned.observed_events,
        requested_events: partitioned.requested_events,
        advisory: partitioned.event_count_mismatch(),
        ..RunSummary::default()
    };
    if let Some(advisory) = &summary.advisory {
        warn!("{advisory}");
    }

    let builder = DecayGraphBuilder::new(lookup);
    for group in &partitioned.groups {
        if interrupt.is_triggered() {
            summary.interrupted = true;
            break;
        }
        info!("Event {}", group.event_index());

        let written = builder
            .build(group)
            .and_then(|graph| sink.write(&to_dot_with_style(&graph, style), group.event_index()));
        match written {
            Ok(path) => summary.written.push(path),
            Err(err) if interrupt.is_triggered() => {
                debug!("Dropping error after interrupt: {err}");
                summary.interrupted = true;
                break;
            }
            Err(err) => return Err(err),
        }

        if interrupt.is_triggered() {
            summary.interrupted = true;
            break;
        }
    }

    Ok(summary)
}
