//! Event grouping of flat particle records.
//!
//! - `EventGroup`: all records of one event in input order.
//! - `partition_events`: splits a flat record list into consecutive events.
//! - `PartitionedEvents` / `EventCountMismatch`: result and advisory.

use crate::model::particle::ParticleRecord;
use std::fmt;

// =#========================================================================#=
// EVENT GROUP
// =#========================================================================#=
/// Ordered collection of all [ParticleRecord]s sharing one event index.
///
/// Groups are produced by [partition_events] and consumed by the
/// [DecayGraphBuilder](crate::model::DecayGraphBuilder). A group may be
/// empty when the source skipped an event index.
#[derive(Debug, Clone, PartialEq)]
pub struct EventGroup {
    event_index: usize,
    records: Vec<ParticleRecord>,
}

impl EventGroup {
    /// Creates an empty group for event `event_index`.
    pub fn new(event_index: usize) -> Self {
        Self {
            event_index,
            records: Vec::new(),
        }
    }

    /// Creates a group from records, which are expected to belong to `event_index`.
    pub fn with_records(event_index: usize, records: Vec<ParticleRecord>) -> Self {
        debug_assert!(records.iter().all(|r| r.event_index() == event_index));
        Self {
            event_index,
            records,
        }
    }

    pub fn event_index(&self) -> usize {
        self.event_index
    }

    pub fn records(&self) -> &[ParticleRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn push(&mut self, record: ParticleRecord) {
        self.records.push(record);
    }
}

// =#========================================================================#=
// PARTITIONED EVENTS
// =#========================================================================#=
/// Result of [partition_events].
#[derive(Debug, Clone, PartialEq)]
pub struct PartitionedEvents {
    /// Groups for event indices `0..K`, `K = min(observed, requested)`
    pub groups: Vec<EventGroup>,
    /// Highest event index present plus one (0 without records)
    pub observed_events: usize,
    /// Maximum number of events asked for
    pub requested_events: usize,
}

impl PartitionedEvents {
    /// Returns the advisory if the observed number of events differs from the request.
    pub fn event_count_mismatch(&self) -> Option<EventCountMismatch> {
        EventCountMismatch::check(self.observed_events, self.requested_events)
    }
}

/// Advisory: number of events found differs from the number requested.
///
/// Never fatal; graphs for all events that were found are still complete.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventCountMismatch {
    pub observed: usize,
    pub requested: usize,
}

impl EventCountMismatch {
    pub(crate) fn check(observed: usize, requested: usize) -> Option<Self> {
        (observed != requested).then_some(Self { observed, requested })
    }
}

impl fmt::Display for EventCountMismatch {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "found {} event(s) in input, but {} were requested",
            self.observed, self.requested
        )
    }
}

// =#========================================================================#=
// PARTITIONING
// =#========================================================================#=
/// Groups a flat record sequence by event index.
///
/// Produces one [EventGroup] for each index `0..K` where
/// `K = min(max event index + 1, max_events)`. Records keep their relative
/// input order within a group; records of events beyond `K` are dropped.
/// Indices without any record yield empty groups.
///
/// # Arguments
/// * `records` - All records read from a source, in input order
/// * `max_events` - Upper bound on the number of groups
///
/// # Example
/// ```
/// use decaygraph::model::{ParticleRecord, partition_events, NO_PARENT};
///
/// let records = vec![
///     ParticleRecord::new(1, 0, 11, NO_PARENT, 0),
///     ParticleRecord::new(0, 0, 22, NO_PARENT, 0),
///     ParticleRecord::new(1, 1, 22, 0, 0),
/// ];
/// let partitioned = partition_events(&records, 5);
/// assert_eq!(partitioned.observed_events, 2);
/// assert_eq!(partitioned.groups.len(), 2);
/// assert_eq!(partitioned.groups[1].len(), 2);
/// ```
pub fn partition_events(records: &[ParticleRecord], max_events: usize) -> PartitionedEvents {
    // Saturates for an index of usize::MAX
    let observed_events = records
        .iter()
        .map(|r| r.event_index())
        .max()
        .map_or(0, |max_index| max_index.saturating_add(1));
    let num_groups = observed_events.min(max_events);

    let mut groups: Vec<EventGroup> = (0..num_groups).map(EventGroup::new).collect();
    for record in records {
        if let Some(group) = groups.get_mut(record.event_index()) {
            group.push(*record);
        }
    }

    PartitionedEvents {
        groups,
        observed_events,
        requested_events: max_events,
    }
}
