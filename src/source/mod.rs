//! Record sources: turn an input file into flat [ParticleRecord]s.
//!
//! The kind of source is chosen once from the input file extension
//! (case-insensitive); everything downstream only sees the records.
//!
//! | Extension       | [SourceKind]           | Reader |
//! |-----------------|------------------------|--------|
//! | `txt`           | [SourceKind::Stub]     | [stub::read_stub_records] |
//! | `jsonl`         | [SourceKind::Ntuple]   | [ntuple::JsonLinesEntries] |
//! | `json`          | [SourceKind::Ntuple]   | [ntuple::JsonArrayEntries] |
//! | `lhe`           | [SourceKind::Lhe]      | [lhe::read_lhe_file] |
//!
//! Any other extension fails with
//! [SourceFormatUnrecognized](DecayGraphError::SourceFormatUnrecognized).

pub mod lhe;
pub mod ntuple;
pub mod stub;

use crate::error::DecayGraphError;
use crate::model::ParticleRecord;
use crate::source::ntuple::{JsonArrayEntries, JsonLinesEntries, flatten_entries};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

// =#========================================================================#=
// SOURCE KIND
// =#========================================================================€=
/// Closed set of record source variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    /// Placeholder yielding a single fixed record
    Stub,
    /// Structured event entries, JSON Lines (`lines = true`) or a JSON array
    Ntuple { lines: bool },
    /// Les Houches Event file
    Lhe,
}

impl SourceKind {
    /// Selects the source kind from the extension of `path`.
    ///
    /// # Example
    /// ```
    /// use decaygraph::source::SourceKind;
    ///
    /// assert_eq!(SourceKind::from_path("run/events.LHE").unwrap(), SourceKind::Lhe);
    /// assert_eq!(SourceKind::from_path("nano.jsonl").unwrap(), SourceKind::Ntuple { lines: true });
    /// assert!(SourceKind::from_path("nano.root").is_err());
    /// ```
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, DecayGraphError> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();

        match extension.as_str() {
            "txt" => Ok(SourceKind::Stub),
            "jsonl" => Ok(SourceKind::Ntuple { lines: true }),
            "json" => Ok(SourceKind::Ntuple { lines: false }),
            "lhe" => Ok(SourceKind::Lhe),
            _ => Err(DecayGraphError::SourceFormatUnrecognized {
                path: path.to_path_buf(),
                extension,
            }),
        }
    }
}

// =#========================================================================#=
// RECORD SOURCE
// =#========================================================================#=
/// An input file together with the [SourceKind] used to read it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordSource {
    kind: SourceKind,
    path: PathBuf,
}

impl RecordSource {
    /// Creates a source for `path`, selecting its kind from the extension.
    ///
    /// No file access happens here; an unknown extension fails right away.
    pub fn for_path<P: AsRef<Path>>(path: P) -> Result<Self, DecayGraphError> {
        let kind = SourceKind::from_path(&path)?;
        Ok(Self {
            kind,
            path: path.as_ref().to_path_buf(),
        })
    }

    pub fn kind(&self) -> SourceKind {
        self.kind
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the records of at most `max_events` events.
    pub fn read(&self, max_events: usize) -> Result<Vec<ParticleRecord>, DecayGraphError> {
        match self.kind {
            SourceKind::Stub => Ok(stub::read_stub_records()),
            SourceKind::Ntuple { lines } => {
                let file = File::open(&self.path)
                    .map_err(|e| DecayGraphError::io(&self.path, e))?;
                let reader = BufReader::new(file);
                let records = if lines {
                    flatten_entries(&mut JsonLinesEntries::new(reader), max_events)?
                } else {
                    flatten_entries(&mut JsonArrayEntries::from_reader(reader)?, max_events)?
                };
                Ok(records)
            }
            SourceKind::Lhe => {
                if !self.path.is_file() {
                    return Err(DecayGraphError::io(
                        &self.path,
                        std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
                    ));
                }
                Ok(lhe::read_lhe_file(&self.path, max_events)?)
            }
        }
    }
}

/// Reads the records of at most `max_events` events from `path`.
///
/// Shorthand for [`RecordSource::for_path(path)?.read(max_events)`](RecordSource::read).
pub fn read_records<P: AsRef<Path>>(
    path: P,
    max_events: usize,
) -> Result<Vec<ParticleRecord>, DecayGraphError> {
    RecordSource::for_path(path)?.read(max_events)
}
