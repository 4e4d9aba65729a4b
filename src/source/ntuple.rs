//! Structured (ntuple-style) event entries and their flattening into records.
//!
//! Each entry describes one event by a particle count and three per-particle
//! arrays indexed in lock-step, named after the generator-level branches of
//! the ntuple layout:
//!
//! ```text
//! {"nGenPart": 3,
//!  "GenPart_pdgId": [23, 13, -13],
//!  "GenPart_genPartIdxMother": [-1, 0, 0],
//!  "GenPart_statusFlags": [10497, 12545, 12545]}
//! ```
//!
//! Entries come from an [EventEntrySource]; the JSON Lines and JSON array
//! readers here are the two shipped implementations.

use crate::model::{IdentityCode, ParticleRecord};
use crate::parser::parsing_error::{ParsingError, ParsingErrorType};
use serde::{Deserialize, Serialize};
use std::io::{BufRead, Read};

// =#========================================================================#=
// EVENT ENTRY
// =#========================================================================#=
/// One event as stored in a structured source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventEntry {
    #[serde(rename = "nGenPart")]
    pub num_particles: usize,
    #[serde(rename = "GenPart_pdgId")]
    pub identity_codes: Vec<IdentityCode>,
    #[serde(rename = "GenPart_genPartIdxMother")]
    pub parent_indices: Vec<i64>,
    #[serde(rename = "GenPart_statusFlags")]
    pub status_flags: Vec<i32>,
}

impl EventEntry {
    /// Checks that all per-particle arrays have `num_particles` elements.
    ///
    /// # Arguments
    /// * `position` - Position of the entry in its source, reported in the error
    pub fn validate(&self, position: usize) -> Result<(), ParsingError> {
        let arrays = [
            ("GenPart_pdgId", self.identity_codes.len()),
            ("GenPart_genPartIdxMother", self.parent_indices.len()),
            ("GenPart_statusFlags", self.status_flags.len()),
        ];
        for (name, len) in arrays {
            if len != self.num_particles {
                return Err(ParsingError::at(
                    ParsingErrorType::InvalidEventEntry(format!(
                        "{name} has {len} values, but nGenPart is {}",
                        self.num_particles
                    )),
                    position,
                ));
            }
        }
        Ok(())
    }

    /// Flattens this entry into records of event `event_index`;
    /// the particle index is the array offset.
    pub fn to_records(&self, event_index: usize) -> impl Iterator<Item = ParticleRecord> + '_ {
        (0..self.num_particles).map(move |particle| {
            ParticleRecord::new(
                event_index,
                particle,
                self.identity_codes[particle],
                self.parent_indices[particle],
                self.status_flags[particle],
            )
        })
    }
}

// =#========================================================================#=
// EVENT ENTRY SOURCE (Trait)
// =#========================================================================T=
/// Sequential access to the event entries of a structured source.
///
/// Entry errors of one source report positions in a single unit (line number or
/// entry number), both for decoding and for [validation](EventEntry::validate).
pub trait EventEntrySource {
    /// Returns the next entry, or `None` once the source is exhausted.
    fn next_entry(&mut self) -> Result<Option<EventEntry>, ParsingError>;

    /// Position of the entry returned last, given its 0-based entry number.
    ///
    /// Defaults to the entry number itself.
    fn last_position(&self, entry_number: usize) -> usize {
        entry_number
    }
}

/// Reads up to `max_events` entries from `source` and flattens them into records.
///
/// Entry `n` (0-based) becomes event `n`. Every entry is validated before use.
///
/// # Example
/// ```
/// use decaygraph::source::ntuple::{flatten_entries, JsonLinesEntries};
///
/// let jsonl = r#"{"nGenPart": 2, "GenPart_pdgId": [111, 22], "GenPart_genPartIdxMother": [-1, 0], "GenPart_statusFlags": [0, 1]}"#;
/// let mut entries = JsonLinesEntries::new(jsonl.as_bytes());
/// let records = flatten_entries(&mut entries, 10).unwrap();
/// assert_eq!(records.len(), 2);
/// assert_eq!(records[1].parent(), Some(0));
/// ```
pub fn flatten_entries<E: EventEntrySource>(
    source: &mut E,
    max_events: usize,
) -> Result<Vec<ParticleRecord>, ParsingError> {
    let mut records = Vec::new();
    let mut event_index = 0;
    while event_index < max_events {
        let Some(entry) = source.next_entry()? else {
            break;
        };
        entry.validate(source.last_position(event_index))?;
        records.extend(entry.to_records(event_index));
        event_index += 1;
    }
    Ok(records)
}

// =#========================================================================#=
// JSON LINES ENTRIES
// =#========================================================================#=
/// [EventEntrySource] over one JSON object per line; blank lines are skipped.
///
/// Entries are parsed lazily, so only as many lines are read as events requested.
/// Error positions are 1-based line numbers.
pub struct JsonLinesEntries<R: BufRead> {
    reader: R,
    line_number: usize,
    line: String,
}

impl<R: BufRead> JsonLinesEntries<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line_number: 0,
            line: String::new(),
        }
    }
}

impl<R: BufRead> EventEntrySource for JsonLinesEntries<R> {
    fn last_position(&self, _entry_number: usize) -> usize {
        self.line_number
    }

    fn next_entry(&mut self) -> Result<Option<EventEntry>, ParsingError> {
        loop {
            self.line.clear();
            if self.reader.read_line(&mut self.line)? == 0 {
                return Ok(None);
            }
            self.line_number += 1;

            let trimmed = self.line.trim();
            if trimmed.is_empty() {
                continue;
            }
            return serde_json::from_str(trimmed).map(Some).map_err(|e| {
                ParsingError::at(
                    ParsingErrorType::InvalidEventEntry(e.to_string()),
                    self.line_number,
                )
            });
        }
    }
}

// =#========================================================================#=
// JSON ARRAY ENTRIES
// =#========================================================================#=
/// [EventEntrySource] over a single top-level JSON array of entries.
///
/// Entry errors are reported at the 0-based entry number. Only JSON text that
/// does not parse at all is reported at its line in the document.
pub struct JsonArrayEntries {
    entries: std::vec::IntoIter<serde_json::Value>,
    entry_number: usize,
}

impl JsonArrayEntries {
    /// Parses the whole array from `reader` upfront; entries are decoded on demand.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, ParsingError> {
        let entries: Vec<serde_json::Value> = serde_json::from_reader(reader).map_err(|e| {
            ParsingError::at(ParsingErrorType::InvalidEventEntry(e.to_string()), e.line())
        })?;
        Ok(Self {
            entries: entries.into_iter(),
            entry_number: 0,
        })
    }
}

impl EventEntrySource for JsonArrayEntries {
    fn next_entry(&mut self) -> Result<Option<EventEntry>, ParsingError> {
        let Some(value) = self.entries.next() else {
            return Ok(None);
        };
        let entry_number = self.entry_number;
        self.entry_number += 1;
        serde_json::from_value(value).map(Some).map_err(|e| {
            ParsingError::at(ParsingErrorType::InvalidEventEntry(e.to_string()), entry_number)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(n: usize) -> EventEntry {
        EventEntry {
            num_particles: n,
            identity_codes: vec![22; n],
            parent_indices: vec![-1; n],
            status_flags: vec![0; n],
        }
    }

    #[test]
    fn test_validate_names_mismatching_array() {
        let mut broken = entry(3);
        broken.status_flags.pop();
        let err = broken.validate(7).unwrap_err();
        assert_eq!(err.position(), 7);
        match err.kind() {
            ParsingErrorType::InvalidEventEntry(msg) => assert!(msg.contains("GenPart_statusFlags")),
            other => panic!("unexpected error kind {other:?}"),
        }
    }

    #[test]
    fn test_empty_entry_yields_no_records() {
        assert_eq!(entry(0).to_records(0).count(), 0);
    }
}
