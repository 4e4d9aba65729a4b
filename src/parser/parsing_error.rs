//! Error types for the DOT parser and the event record readers.
//!
//! This module provides [ParsingError] and [ParsingErrorType] for representing
//! and reporting errors that occur while parsing graph descriptions and
//! event files.

use crate::parser::byte_parser::ByteParser;
use crate::parser::byte_source::ByteSource;
use std::error::Error;
use std::fmt;

/// Default length of context provided by error from parser
const DEFAULT_CONTEXT_LENGTH: usize = 50;

// =#========================================================================#=
// PARSING ERROR TYPE
// =#========================================================================€=
/// Error types that can occur while parsing DOT text and event files.
#[derive(PartialEq, Debug, Clone)]
pub enum ParsingErrorType {
    IoError(String),
    UnexpectedEOF,
    UnclosedComment,
    UnclosedString,
    InvalidFormatting,
    InvalidGraphHeader(String),
    InvalidStatement(String),
    InvalidNodeId(String),
    InvalidEventBlock(String),
    InvalidParticleLine(String),
    InvalidEventEntry(String),
}

// =#========================================================================#=
// PARSING ERROR
// =#========================================================================$=
/// Parsing error with contextual information (position and surrounding bytes).
///
/// The position is a byte offset for text formats and a line/entry number
/// for record-oriented inputs (see [ParsingError::at]).
#[derive(Debug)]
pub struct ParsingError {
    kind: ParsingErrorType,
    position: usize,
    context: String,
}

impl ParsingError {
    /// Create a ParsingError from an error type and parser state
    pub fn from_parser<S: ByteSource>(kind: ParsingErrorType, parser: &ByteParser<S>) -> Self {
        Self {
            kind,
            position: parser.position(),
            context: parser.get_context_as_string(DEFAULT_CONTEXT_LENGTH),
        }
    }

    /// Create a ParsingError at a given position, without byte context
    pub fn at(kind: ParsingErrorType, position: usize) -> Self {
        Self {
            kind,
            position,
            context: String::new(),
        }
    }

    /// Convenience constructor for UnexpectedEOF
    pub fn unexpected_eof<S: ByteSource>(parser: &ByteParser<S>) -> Self {
        Self::from_parser(ParsingErrorType::UnexpectedEOF, parser)
    }

    /// Convenience constructor for UnclosedComment
    pub fn unclosed_comment<S: ByteSource>(parser: &ByteParser<S>) -> Self {
        Self::from_parser(ParsingErrorType::UnclosedComment, parser)
    }

    /// Convenience constructor for UnclosedString
    pub fn unclosed_string<S: ByteSource>(parser: &ByteParser<S>) -> Self {
        Self::from_parser(ParsingErrorType::UnclosedString, parser)
    }

    /// Convenience constructor for InvalidFormatting
    pub fn invalid_formatting<S: ByteSource>(parser: &ByteParser<S>) -> Self {
        Self::from_parser(ParsingErrorType::InvalidFormatting, parser)
    }

    /// Convenience constructor for InvalidGraphHeader
    pub fn invalid_graph_header<S: ByteSource>(parser: &ByteParser<S>, msg: String) -> Self {
        Self::from_parser(ParsingErrorType::InvalidGraphHeader(msg), parser)
    }

    /// Convenience constructor for InvalidStatement
    pub fn invalid_statement<S: ByteSource>(parser: &ByteParser<S>, msg: String) -> Self {
        Self::from_parser(ParsingErrorType::InvalidStatement(msg), parser)
    }

    /// Convenience constructor for InvalidNodeId
    pub fn invalid_node_id<S: ByteSource>(parser: &ByteParser<S>, id: String) -> Self {
        Self::from_parser(ParsingErrorType::InvalidNodeId(id), parser)
    }

    /// Convenience constructor for InvalidEventBlock
    pub fn invalid_event_block<S: ByteSource>(parser: &ByteParser<S>, msg: String) -> Self {
        Self::from_parser(ParsingErrorType::InvalidEventBlock(msg), parser)
    }

    /// Convenience constructor for InvalidParticleLine
    pub fn invalid_particle_line<S: ByteSource>(parser: &ByteParser<S>, msg: String) -> Self {
        Self::from_parser(ParsingErrorType::InvalidParticleLine(msg), parser)
    }

    /// Get the error kind
    pub fn kind(&self) -> &ParsingErrorType {
        &self.kind
    }

    /// Get the position where the error occurred
    pub fn position(&self) -> usize {
        self.position
    }
}

impl fmt::Display for ParsingError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.kind {
            ParsingErrorType::IoError(msg) => write!(f, "IO error - {msg}")?,
            ParsingErrorType::UnexpectedEOF => write!(f, "Unexpected end of file")?,
            ParsingErrorType::UnclosedComment => write!(f, "Unclosed comment")?,
            ParsingErrorType::UnclosedString => write!(f, "Unclosed quoted string")?,
            ParsingErrorType::InvalidFormatting => write!(f, "Invalid formatting")?,
            ParsingErrorType::InvalidGraphHeader(msg) => write!(f, "Invalid graph header - {msg}")?,
            ParsingErrorType::InvalidStatement(msg) => write!(f, "Invalid statement - {msg}")?,
            ParsingErrorType::InvalidNodeId(id) => {
                write!(f, "Invalid node id '{id}' - expected a particle index")?
            }
            ParsingErrorType::InvalidEventBlock(msg) => write!(f, "Invalid event block - {msg}")?,
            ParsingErrorType::InvalidParticleLine(msg) => write!(f, "Invalid particle line - {msg}")?,
            ParsingErrorType::InvalidEventEntry(msg) => write!(f, "Invalid event entry - {msg}")?,
        }

        write!(f, " at position {}", self.position)?;

        if !self.context.is_empty() {
            write!(f, "\n  Context (next {} bytes): {}", self.context.len(), self.context)?;
        }

        Ok(())
    }
}

impl Error for ParsingError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        None
    }
}

impl From<std::io::Error> for ParsingError {
    fn from(err: std::io::Error) -> Self {
        ParsingError::at(ParsingErrorType::IoError(err.to_string()), 0)
    }
}
