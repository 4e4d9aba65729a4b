//! Low-level byte-by-byte parser for ASCII text.
//!
//! This module provides [ByteParser] for parsing text-based file formats with support
//! for peeking, consuming, pattern matching, and quote-aware string parsing. Used as
//! the foundation for both the DOT parser and the LHE event reader.

use crate::parser::byte_source::ByteSource;
use crate::parser::in_memory_byte_source::InMemoryByteSource;
use crate::parser::parsing_error::ParsingError;
use std::path::Path;

// =#========================================================================#=
// BYTE PARSER
// =#========================================================================#=
/// A byte-by-byte parser for ASCII text with support for peeking, consuming, and pattern matching.
///
/// [ByteParser] provides parsing operations for text-based formats, specifically targeting
/// DOT graph descriptions and Les Houches event files. It operates on byte sources and
/// assumes ASCII structure (labels may still carry UTF-8), offering peek, consume,
/// and skip operations with case-insensitive matching.
///
/// # Features
/// - Works with any [ByteSource]
/// - Case-insensitive matching for ASCII characters
/// - Whitespace and comment skipping (`// ...`, `/* ... */`, `# ...`)
/// - Double-quoted string parsing with backslash escapes
/// - Line-wise reading for record-oriented formats
/// - Context extraction for error reporting
///
/// # Example
/// ```
/// use decaygraph::parser::ByteParser;
///
/// let mut parser = ByteParser::for_str("  /* event */ DIGRAPH \"Event 0\" {}");
/// parser.skip_comment_and_whitespace().unwrap();
/// assert!(parser.consume_if_word("digraph"));
/// parser.skip_whitespace();
/// assert_eq!(parser.parse_quoted_string().unwrap(), "Event 0");
/// ```
pub struct ByteParser<S: ByteSource> {
    source: S,
}

impl ByteParser<InMemoryByteSource> {
    /// Creates a new `ByteParser` from a byte slice by copying it into a Vec.
    ///
    /// # Arguments
    /// * `input` - The byte slice to parse
    pub fn for_bytes(input: &[u8]) -> Self {
        Self::new(InMemoryByteSource::from_vec(input.to_vec()))
    }

    /// Creates a new `ByteParser` from a string by copying it into a Vec.
    ///
    /// # Arguments
    /// * `input` - The string to parse
    pub fn for_str(input: &str) -> Self {
        Self::for_bytes(input.as_bytes())
    }

    /// Creates a new `ByteParser` over the full contents of the file at `path`.
    pub fn for_file<P: AsRef<Path>>(path: P) -> std::io::Result<Self> {
        Ok(Self::new(InMemoryByteSource::from_file(path)?))
    }
}

impl<S: ByteSource> ByteParser<S> {
    /// Creates a new `ByteParser` from a byte source.
    ///
    /// # Arguments
    /// * `source` - The byte source to parse
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// Peeks at the current byte without consuming it.
    #[inline(always)]
    pub fn peek(&self) -> Option<u8> {
        self.source.peek()
    }

    /// Gets the current byte and advances the position (consumes it).
    #[inline(always)]
    pub fn next_byte(&mut self) -> Option<u8> {
        self.source.next_byte()
    }

    /// Skips (consumes) all consecutive whitespace characters.
    ///
    /// Whitespace includes: space (' '), tab ('\t'), newline ('\n'), and carriage return ('\r').
    pub fn skip_whitespace(&mut self) {
        while let Some(b) = self.peek() {
            if b.is_ascii_whitespace() {
                self.next_byte();
            } else {
                break;
            }
        }
    }

    /// Skips (consumes) a single comment if present.
    ///
    /// Recognised forms are C++ line comments (`// ...`), C block comments
    /// (`/* ... */`) and preprocessor-style lines (`# ...`).
    ///
    /// # Returns
    /// * `Ok(true)` - A comment was found and consumed
    /// * `Ok(false)` - No comment at current position
    /// * `Err(ParsingError)` - A block comment was opened but never closed
    pub fn skip_comment(&mut self) -> Result<bool, ParsingError> {
        if self.consume_if_sequence(b"/*") {
            if !self.consume_until_sequence(b"*/", ConsumeMode::Inclusive) {
                return Err(ParsingError::unclosed_comment(self));
            }
            return Ok(true);
        }

        if self.consume_if_sequence(b"//") || self.consume_if(b'#') {
            self.consume_until(b'\n', ConsumeMode::Inclusive);
            return Ok(true);
        }

        Ok(false)
    }

    /// Skips (consumes) all consecutive whitespace and comments.
    ///
    /// # Errors
    /// Returns an error if an unclosed block comment is encountered.
    pub fn skip_comment_and_whitespace(&mut self) -> Result<(), ParsingError> {
        self.skip_whitespace();

        while self.skip_comment()? {
            self.skip_whitespace();
        }

        Ok(())
    }

    /// Checks if the current byte matches the target byte (case-insensitive for ASCII).
    pub fn peek_is(&self, ch: u8) -> bool {
        self.peek().is_some_and(|b| b.eq_ignore_ascii_case(&ch))
    }

    /// Checks if the following bytes match the given word/token (case-insensitive).
    ///
    /// This is a peek operation - the parser position is not changed.
    pub fn peek_is_word(&self, word: &str) -> bool {
        self.peek_is_sequence(word.as_bytes())
    }

    /// Checks if the following bytes match the given byte sequence (case-insensitive).
    #[inline]
    pub fn peek_is_sequence(&self, sequence: &[u8]) -> bool {
        let context = self.source.peek_slice(sequence.len());
        context.len() == sequence.len() && context.eq_ignore_ascii_case(sequence)
    }

    /// Consumes the current byte if it matches the target byte (case-insensitive).
    ///
    /// # Returns
    /// `true` if the byte was matched and consumed, `false` otherwise
    pub fn consume_if(&mut self, ch: u8) -> bool {
        if self.peek_is(ch) {
            self.next_byte();
            true
        } else {
            false
        }
    }

    /// Consumes the next bytes if they match the given word/token (case-insensitive).
    ///
    /// # Returns
    /// `true` if the word was matched and consumed, `false` otherwise
    pub fn consume_if_word(&mut self, word: &str) -> bool {
        self.consume_if_sequence(word.as_bytes())
    }

    /// Consumes the next bytes if they match the given byte sequence (case-insensitive).
    pub fn consume_if_sequence(&mut self, sequence: &[u8]) -> bool {
        if !self.peek_is_sequence(sequence) {
            return false;
        }

        self.advance(sequence.len());
        true
    }

    /// Consumes bytes until the target byte is found.
    ///
    /// # Arguments
    /// * `target` - The byte to search for
    /// * `mode` - Whether to consume the target byte (`Inclusive`) or stop before it (`Exclusive`)
    ///
    /// # Returns
    /// `true` if the target was found, `false` if EOF was reached first
    pub fn consume_until(&mut self, target: u8, mode: ConsumeMode) -> bool {
        while let Some(b) = self.peek() {
            if b == target {
                if mode == ConsumeMode::Inclusive {
                    self.next_byte();
                }
                return true;
            }
            self.next_byte();
        }
        false
    }

    /// Consumes bytes until the next bytes match the given byte sequence (case-insensitive).
    ///
    /// # Arguments
    /// * `sequence` - The byte sequence to search for
    /// * `mode` - Whether to consume the sequence (`Inclusive`) or stop before it (`Exclusive`)
    ///
    /// # Returns
    /// `true` if the sequence was found, `false` if EOF was reached first
    pub fn consume_until_sequence(&mut self, sequence: &[u8], mode: ConsumeMode) -> bool {
        while !self.is_eof() {
            if self.peek_is_sequence(sequence) {
                if mode == ConsumeMode::Inclusive {
                    self.advance(sequence.len());
                }
                return true;
            }
            self.next_byte();
        }
        false
    }

    /// Consumes bytes until the next bytes match the given word (case-insensitive).
    pub fn consume_until_word(&mut self, word: &str, mode: ConsumeMode) -> bool {
        self.consume_until_sequence(word.as_bytes(), mode)
    }

    /// Reads the remainder of the current line, consuming the line break.
    ///
    /// A trailing `\r` is stripped. Invalid UTF-8 is replaced lossily.
    ///
    /// # Returns
    /// `None` if already at EOF, the line content otherwise
    pub fn read_line(&mut self) -> Option<String> {
        if self.is_eof() {
            return None;
        }

        let mut line = Vec::new();
        while let Some(b) = self.next_byte() {
            if b == b'\n' {
                break;
            }
            line.push(b);
        }
        if line.last() == Some(&b'\r') {
            line.pop();
        }

        Some(String::from_utf8_lossy(&line).into_owned())
    }

    /// Returns whether the end of data (EOF) has been reached.
    pub fn is_eof(&self) -> bool {
        self.source.is_eof()
    }

    /// Returns the current parser position in the input.
    pub fn position(&self) -> usize {
        self.source.position()
    }

    /// Sets the position in the byte stream.
    pub fn set_position(&mut self, pos: usize) {
        self.source.set_position(pos);
    }

    /// Returns up to `k` bytes from the current position for error context.
    pub fn get_context(&self, k: usize) -> Vec<u8> {
        self.source.get_context(k)
    }

    /// Returns a string from up to `k` bytes from the current position for error context.
    ///
    /// Invalid UTF-8 sequences are replaced with the Unicode replacement character.
    pub fn get_context_as_string(&self, k: usize) -> String {
        String::from_utf8_lossy(&self.get_context(k)).into_owned()
    }

    /// Parses a double-quoted string with backslash escapes.
    ///
    /// Assumes the parser is positioned at the opening quote.
    /// `\"` yields a quote, `\\` a backslash, and a backslash followed by a
    /// line break is a line continuation. Any other escape is kept verbatim
    /// (e.g. `\l` stays `\l`), as renderers interpret those themselves.
    ///
    /// # Errors
    /// Returns an error if not positioned at a quote or the string is never closed.
    pub fn parse_quoted_string(&mut self) -> Result<String, ParsingError> {
        if !self.consume_if(b'"') {
            return Err(ParsingError::invalid_formatting(self));
        }

        let mut bytes = Vec::new();
        loop {
            match self.next_byte() {
                None => return Err(ParsingError::unclosed_string(self)),
                Some(b'"') => break,
                Some(b'\\') => match self.next_byte() {
                    None => return Err(ParsingError::unclosed_string(self)),
                    Some(b'"') => bytes.push(b'"'),
                    Some(b'\\') => bytes.push(b'\\'),
                    Some(b'\n') => {}
                    Some(b'\r') => {
                        self.consume_if(b'\n');
                    }
                    Some(other) => {
                        bytes.push(b'\\');
                        bytes.push(other);
                    }
                },
                Some(b) => bytes.push(b),
            }
        }

        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    /// Parses an unquoted identifier or numeral.
    ///
    /// Identifiers consist of ASCII letters, digits, underscores and non-ASCII bytes;
    /// numerals may additionally carry a leading `-` and a decimal point.
    ///
    /// # Returns
    /// The parsed word, which is empty if the current byte cannot start one
    pub fn parse_unquoted_word(&mut self) -> String {
        let mut word = Vec::new();

        if self.peek() == Some(b'-') {
            let next = self.source.peek_slice(2).get(1).copied();
            if next.is_some_and(|b| b.is_ascii_digit() || b == b'.') {
                word.push(b'-');
                self.next_byte();
            } else {
                return String::new();
            }
        }

        while let Some(b) = self.peek() {
            if b.is_ascii_alphanumeric() || b == b'_' || b == b'.' || !b.is_ascii() {
                word.push(b);
                self.next_byte();
            } else {
                break;
            }
        }

        String::from_utf8_lossy(&word).into_owned()
    }

    fn advance(&mut self, n: usize) {
        for _ in 0..n {
            self.next_byte();
        }
    }
}

/// Specifies whether to consume or leave the target when using `consume_until` methods.
///
/// # Examples
/// ```
/// use decaygraph::parser::byte_parser::{ByteParser, ConsumeMode};
///
/// let mut parser = ByteParser::for_str("<event>\n 3 1 1.0");
///
/// // Inclusive: consume up to and including '>', e.g. to the start of the event body
/// parser.consume_until(b'>', ConsumeMode::Inclusive);
/// assert_eq!(parser.peek(), Some(b'\n'));
///
/// let mut parser = ByteParser::for_str("0 -> 1 [color=red]");
///
/// // Exclusive: stop right before the attribute list
/// parser.consume_until(b'[', ConsumeMode::Exclusive);
/// assert_eq!(parser.peek(), Some(b'['));
/// ```
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum ConsumeMode {
    /// Consume the target byte/sequence along with everything before it.
    Inclusive,

    /// Stop before the target byte/sequence without consuming it.
    Exclusive,
}
