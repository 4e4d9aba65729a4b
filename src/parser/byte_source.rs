//! Byte source abstractions for parsing.
//!
//! This module provides the [ByteSource] trait, the interface the
//! [ByteParser](crate::parser::ByteParser) reads through. The in-memory
//! implementation lives in
//! [in_memory_byte_source](crate::parser::in_memory_byte_source).

// =#========================================================================#=
// BYTE SOURCE (Trait)
// =#========================================================================T=
/// Trait defining the interface for byte sources used by the ByteParser.
///
/// Both the DOT parser and the LHE event reader operate on a [ByteSource],
/// so they are independent of where the bytes come from
/// (a string in memory, a whole file read upfront, ...).
pub trait ByteSource {
    /// Peek at the current byte without consuming it.
    ///
    /// # Returns
    /// * `Some(u8)` - The current byte if available
    /// * `None` - If at end of data (EOF)
    fn peek(&self) -> Option<u8>;

    /// Get the current byte and advance the position (consume it).
    ///
    /// # Returns
    /// * `Some(u8)` - The current byte if available
    /// * `None` - If at end of data (EOF)
    fn next_byte(&mut self) -> Option<u8>;

    /// Returns a slice of up to `k` bytes from the current position without allocating.
    ///
    /// # Arguments
    /// * `k` - Maximum number of bytes to retrieve
    fn peek_slice(&self, k: usize) -> &[u8];

    /// Returns up to `k` bytes from the current position for error context.
    ///
    /// # Arguments
    /// * `k` - Maximum number of bytes to retrieve
    fn get_context(&self, k: usize) -> Vec<u8>;

    /// Returns the current position in the byte stream.
    fn position(&self) -> usize;

    /// Sets the position in the byte stream.
    ///
    /// # Arguments
    /// * `pos` - The byte offset to seek to
    fn set_position(&mut self, pos: usize);

    /// Check if at end of data.
    fn is_eof(&self) -> bool;
}
