//! Error type for building and emitting decay graphs.
//!
//! Every fatal condition of a run maps onto one [DecayGraphError] variant.
//! Text-level problems in input files are carried as a
//! [ParsingError](crate::parser::ParsingError) inside
//! [DecayGraphError::Parsing].

use crate::model::particle::{IdentityCode, ParticleIndex};
use crate::parser::ParsingError;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

// =#========================================================================#=
// DECAY GRAPH ERROR
// =#========================================================================€=
/// Fatal errors of the event-to-graph transformation and its collaborators.
#[derive(Debug, Error)]
pub enum DecayGraphError {
    /// Extension of the input file matches no known record source.
    #[error("unrecognized input format '{extension}' of file {}", .path.display())]
    SourceFormatUnrecognized { path: PathBuf, extension: String },

    /// Identity code has no display name in the identity lookup.
    #[error("no display name for identity code {code} (event {event}, particle {particle})")]
    LookupFailure {
        code: IdentityCode,
        event: usize,
        particle: ParticleIndex,
    },

    /// Parent index does not refer to any particle of the same event.
    #[error("particle {particle} in event {event} references missing parent {parent}")]
    ReferentialIntegrityFailure {
        event: usize,
        particle: ParticleIndex,
        parent: i64,
    },

    /// Particle index occurs twice within one event.
    #[error("particle index {particle} occurs more than once in event {event}")]
    DuplicateParticle { event: usize, particle: ParticleIndex },

    /// Identity table missing or malformed.
    #[error("cannot load identity table {}: {reason}", .path.display())]
    LookupTableLoad { path: PathBuf, reason: String },

    #[error(transparent)]
    Parsing(#[from] ParsingError),

    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// External renderer could not be run or reported failure.
    #[error("renderer '{program}' failed: {reason}")]
    Render { program: String, reason: String },
}

impl DecayGraphError {
    /// Wraps an I/O error together with the path it occurred on.
    pub(crate) fn io<P: Into<PathBuf>>(path: P, source: io::Error) -> Self {
        DecayGraphError::Io {
            path: path.into(),
            source,
        }
    }
}
