//! Byte source abstraction for the decoding layer.
//!
//! This module provides the [ByteSource] trait, the only contract the
//! [ByteReader](crate::reader::ByteReader) needs from whatever produces bytes.
//! Implementations live in
//! [in_memory_byte_source](crate::reader::in_memory_byte_source) and
//! [buffered_byte_source](crate::reader::buffered_byte_source).

// =#========================================================================#=
// BYTE SOURCE (Trait)
// =#========================================================================#=
/// Trait defining a sequential, position-tracked source of bytes.
///
/// This trait abstracts over different ways of accessing byte data:
/// - In-memory buffers (`Vec<u8>`, `std::io::Cursor<&[u8]>`)
/// - Buffered reading from files or any other `Read + Seek` stream
///
/// The cursor always satisfies `0 <= position() <= length()`, and every read
/// advances it by exactly the number of bytes it returned.
pub trait ByteSource {
    /// Copies up to `buf.len()` bytes starting at the cursor into `buf`.
    ///
    /// Implementations must keep reading until `buf` is full or the source is
    /// exhausted, so a short count only ever means end of source.
    ///
    /// # Arguments
    /// * `buf` - Destination buffer; its length is the requested count
    ///
    /// # Returns
    /// The number of bytes actually copied (`0..=buf.len()`)
    fn read(&mut self, buf: &mut [u8]) -> usize;

    /// Get the current byte and advance the position (consume it).
    ///
    /// # Returns
    /// * `Some(u8)` - The current byte if available
    /// * `None` - If at end of data (EOF)
    fn read_byte(&mut self) -> Option<u8>;

    /// Peek at the current byte without consuming it.
    ///
    /// # Returns
    /// * `Some(u8)` - The current byte if available
    /// * `None` - If at end of data (EOF)
    fn peek_byte(&mut self) -> Option<u8>;

    /// Returns the current position in the byte stream.
    fn position(&self) -> u64;

    /// Sets the position in the byte stream.
    ///
    /// Positions past the end are clamped to [length()](Self::length).
    ///
    /// # Arguments
    /// * `pos` - The byte offset to seek to
    fn set_position(&mut self, pos: u64);

    /// Returns the total number of bytes in the source.
    fn length(&self) -> u64;

    /// Returns the number of bytes between the cursor and the end.
    fn remaining(&self) -> u64 {
        self.length().saturating_sub(self.position())
    }

    /// Check if at end of data.
    ///
    /// # Returns
    /// `true` if at or beyond the end of data, `false` otherwise
    fn is_eof(&self) -> bool {
        self.position() >= self.length()
    }
}
