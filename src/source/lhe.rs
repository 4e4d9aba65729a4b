//! Reader for Les Houches Event (LHE) files.
//!
//! Only the `<event>` blocks are read; header and `<init>` content is
//! skipped. Each event block starts with a common line whose first field is
//! the number of particles `NUP`, followed by `NUP` particle lines:
//!
//! ```text
//! IDUP ISTUP MOTHUP1 MOTHUP2 ICOLUP1 ICOLUP2 PX PY PZ E M VTIMUP SPINUP
//! ```
//!
//! Mother indices are 1-based with `0` meaning "no mother". Only the first
//! mother is kept: particle line `p` (0-based) becomes a record with parent
//! `MOTHUP1 - 1`, or [NO_PARENT] for `MOTHUP1 = 0`. Anything after the
//! particle lines (weights, `#` comments, `<rwgt>` blocks) is skipped.

use crate::model::{IdentityCode, NO_PARENT, ParticleRecord};
use crate::parser::byte_parser::{ByteParser, ConsumeMode::*};
use crate::parser::byte_source::ByteSource;
use crate::parser::parsing_error::ParsingError;
use std::path::Path;

/// Opening of an event block, possibly followed by attributes
const EVENT_OPEN: &str = "<event";

/// Closing tag of an event block
const EVENT_CLOSE: &str = "</event>";

/// Number of whitespace-separated fields on a particle line
const PARTICLE_FIELDS: usize = 13;

/// Reads up to `max_events` events from the LHE file at `path`.
pub fn read_lhe_file<P: AsRef<Path>>(
    path: P,
    max_events: usize,
) -> Result<Vec<ParticleRecord>, ParsingError> {
    let mut parser = ByteParser::for_file(path)?;
    read_lhe_records(&mut parser, max_events)
}

/// Reads up to `max_events` events from `parser`, numbering them from 0.
///
/// # Errors
/// Returns a [ParsingError] for unterminated tags or blocks, a bad particle
/// count, too few particle lines, or a particle line with missing or
/// non-numeric fields.
///
/// # Example
/// ```
/// use decaygraph::parser::ByteParser;
/// use decaygraph::source::lhe::read_lhe_records;
///
/// let lhe = "<LesHouchesEvents version=\"3.0\">\n<event>\n 2 1 1.0 91.2 0.0078 0.118\n \
///            23 2 0 0 0 0 0 0 0 91.2 91.2 0 9\n \
///            13 1 1 1 0 0 0 0 45.6 45.6 0.1 0 9\n</event>\n</LesHouchesEvents>\n";
/// let records = read_lhe_records(&mut ByteParser::for_str(lhe), 5).unwrap();
/// assert_eq!(records.len(), 2);
/// assert!(records[0].is_root());
/// assert_eq!(records[1].parent(), Some(0));
/// ```
pub fn read_lhe_records<B: ByteSource>(
    parser: &mut ByteParser<B>,
    max_events: usize,
) -> Result<Vec<ParticleRecord>, ParsingError> {
    let mut records = Vec::new();
    let mut event_index = 0;

    while event_index < max_events && seek_event_body(parser)? {
        let num_particles = parse_particle_count(parser)?;
        for particle in 0..num_particles {
            records.push(parse_particle_line(parser, event_index, particle, num_particles)?);
        }

        if !parser.consume_until_word(EVENT_CLOSE, Inclusive) {
            return Err(ParsingError::invalid_event_block(
                parser,
                format!("event {event_index} is missing {EVENT_CLOSE}"),
            ));
        }
        event_index += 1;
    }

    Ok(records)
}

/// Moves past the next `<event ...>` opening tag.
///
/// # Returns
/// `Ok(false)` if no further event block exists
fn seek_event_body<B: ByteSource>(parser: &mut ByteParser<B>) -> Result<bool, ParsingError> {
    loop {
        if !parser.consume_until_word(EVENT_OPEN, Inclusive) {
            return Ok(false);
        }
        // Skip e.g. <eventgroup>
        if parser.peek().is_some_and(|b| b == b'>' || b.is_ascii_whitespace()) {
            break;
        }
    }

    if !parser.consume_until(b'>', Inclusive) {
        return Err(ParsingError::invalid_event_block(
            parser,
            format!("unterminated {EVENT_OPEN} tag"),
        ));
    }
    Ok(true)
}

fn parse_particle_count<B: ByteSource>(parser: &mut ByteParser<B>) -> Result<usize, ParsingError> {
    let header = loop {
        match parser.read_line() {
            None => return Err(ParsingError::unexpected_eof(parser)),
            Some(line) if line.trim().is_empty() => continue,
            Some(line) => break line,
        }
    };

    header
        .split_whitespace()
        .next()
        .and_then(|field| field.parse::<usize>().ok())
        .ok_or_else(|| {
            ParsingError::invalid_event_block(parser, format!("bad event header line '{header}'"))
        })
}

fn parse_particle_line<B: ByteSource>(
    parser: &mut ByteParser<B>,
    event_index: usize,
    particle: usize,
    num_particles: usize,
) -> Result<ParticleRecord, ParsingError> {
    let line = parser
        .read_line()
        .ok_or_else(|| ParsingError::unexpected_eof(parser))?;
    if line.trim_start().starts_with('<') {
        return Err(ParsingError::invalid_event_block(
            parser,
            format!("expected {num_particles} particle lines, found {particle}"),
        ));
    }

    let fields: Vec<&str> = line.split_whitespace().collect();
    if fields.len() < PARTICLE_FIELDS {
        return Err(ParsingError::invalid_particle_line(
            parser,
            format!("expected {PARTICLE_FIELDS} fields, found {} in '{line}'", fields.len()),
        ));
    }

    let bad_field = |name: &str, value: &str| {
        ParsingError::invalid_particle_line(parser, format!("bad {name} '{value}'"))
    };
    let identity_code: IdentityCode = fields[0].parse().map_err(|_| bad_field("IDUP", fields[0]))?;
    let status: i32 = fields[1].parse().map_err(|_| bad_field("ISTUP", fields[1]))?;
    let mother: i64 = fields[2].parse().map_err(|_| bad_field("MOTHUP1", fields[2]))?;

    let parent = match mother {
        0 => NO_PARENT,
        m if m > 0 => m - 1,
        _ => return Err(bad_field("MOTHUP1", fields[2])),
    };

    Ok(ParticleRecord::new(event_index, particle, identity_code, parent, status))
}
