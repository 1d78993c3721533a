//! In-memory implementations of byte source.
//!
//! Provides [InMemoryByteSource], which owns its bytes, and a [ByteSource]
//! implementation for [std::io::Cursor] so borrowed slices can be decoded
//! without copying.

use crate::reader::byte_source::ByteSource;
use std::fs::File;
use std::io::{Cursor, Read};
use std::path::Path;

// =#========================================================================#=
// IN MEMORY BYTE SOURCE
// =#========================================================================#=
/// An in-memory byte source that owns its data.
///
/// This is the most efficient byte source for files
/// that can fit entirely in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryByteSource {
    /// The owned bytes being decoded
    input: Vec<u8>,
    /// Current position in the bytes
    pos: usize,
}

impl InMemoryByteSource {
    /// Creates a new in-memory byte source from a Vec of bytes.
    ///
    /// # Arguments
    /// * `bytes` - The byte vector to decode
    pub fn from_vec(bytes: Vec<u8>) -> Self {
        Self {
            input: bytes,
            pos: 0,
        }
    }

    /// Reads an entire file into memory.
    ///
    /// # Arguments
    /// * `path` - Path to the file (accepting `&str`, `String`, `Path`, or `PathBuf`)
    ///
    /// # Errors
    /// Returns an I/O error if the file cannot be opened or read.
    pub fn from_file<P: AsRef<Path>>(path: P) -> std::io::Result<InMemoryByteSource> {
        let mut contents = Vec::new();
        let mut file = File::open(path)?;
        file.read_to_end(&mut contents)?;
        Ok(Self::from_vec(contents))
    }

    /// Returns the bytes not yet consumed.
    pub fn remaining_slice(&self) -> &[u8] {
        &self.input[self.pos..]
    }

    /// Consumes the source, handing back the underlying bytes.
    pub fn into_inner(self) -> Vec<u8> {
        self.input
    }
}

impl From<Vec<u8>> for InMemoryByteSource {
    fn from(bytes: Vec<u8>) -> Self {
        Self::from_vec(bytes)
    }
}

impl ByteSource for InMemoryByteSource {
    fn read(&mut self, buf: &mut [u8]) -> usize {
        let count = buf.len().min(self.input.len() - self.pos);
        buf[..count].copy_from_slice(&self.input[self.pos..self.pos + count]);
        self.pos += count;
        count
    }

    #[inline(always)]
    fn read_byte(&mut self) -> Option<u8> {
        let byte = self.peek_byte()?;
        self.pos += 1;
        Some(byte)
    }

    #[inline(always)]
    fn peek_byte(&mut self) -> Option<u8> {
        self.input.get(self.pos).copied()
    }

    #[inline]
    fn position(&self) -> u64 {
        self.pos as u64
    }

    #[inline]
    fn set_position(&mut self, pos: u64) {
        self.pos = usize::try_from(pos).map_or(self.input.len(), |p| p.min(self.input.len()));
    }

    #[inline]
    fn length(&self) -> u64 {
        self.input.len() as u64
    }
}

// =#========================================================================#=
// CURSOR
// =#========================================================================#=
impl<T: AsRef<[u8]>> ByteSource for Cursor<T> {
    fn read(&mut self, buf: &mut [u8]) -> usize {
        let data = self.get_ref().as_ref();
        let start = usize::try_from(Cursor::position(self)).map_or(data.len(), |p| p.min(data.len()));
        let count = buf.len().min(data.len() - start);
        buf[..count].copy_from_slice(&data[start..start + count]);
        Cursor::set_position(self, (start + count) as u64);
        count
    }

    fn read_byte(&mut self) -> Option<u8> {
        let byte = ByteSource::peek_byte(self)?;
        Cursor::set_position(self, Cursor::position(self) + 1);
        Some(byte)
    }

    fn peek_byte(&mut self) -> Option<u8> {
        let pos = usize::try_from(Cursor::position(self)).ok()?;
        self.get_ref().as_ref().get(pos).copied()
    }

    fn position(&self) -> u64 {
        Cursor::position(self).min(ByteSource::length(self))
    }

    fn set_position(&mut self, pos: u64) {
        let len = ByteSource::length(self);
        Cursor::set_position(self, pos.min(len));
    }

    fn length(&self) -> u64 {
        self.get_ref().as_ref().len() as u64
    }
}

// =#========================================================================#=
// TESTS - IN MEMORY BYTE SOURCE
// =#========================================================================#=
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_stops_at_end() {
        let mut source = InMemoryByteSource::from_vec(vec![1, 2, 3]);
        let mut buf = [0u8; 5];
        assert_eq!(source.read(&mut buf), 3);
        assert_eq!(&buf[..3], &[1, 2, 3]);
        assert_eq!(source.position(), 3);
        assert!(source.is_eof());
        assert_eq!(source.read(&mut buf), 0);
        assert_eq!(source.read_byte(), None);
    }

    #[test]
    fn test_set_position_clamps_to_length() {
        let mut source = InMemoryByteSource::from(vec![9, 8, 7]);
        source.set_position(10);
        assert_eq!(source.position(), 3);
        assert_eq!(source.remaining(), 0);

        source.set_position(1);
        assert_eq!(source.peek_byte(), Some(8));
        assert_eq!(source.remaining_slice(), &[8, 7]);
    }

    #[test]
    fn test_cursor_over_borrowed_slice() {
        let data = [0x10u8, 0x20, 0x30];
        let mut cursor = Cursor::new(&data[..]);
        assert_eq!(ByteSource::length(&cursor), 3);
        assert_eq!(ByteSource::read_byte(&mut cursor), Some(0x10));

        let mut buf = [0u8; 4];
        assert_eq!(ByteSource::read(&mut cursor, &mut buf), 2);
        assert_eq!(&buf[..2], &[0x20, 0x30]);
        assert_eq!(ByteSource::position(&cursor), 3);
        assert_eq!(ByteSource::peek_byte(&mut cursor), None);
    }

    #[test]
    fn test_cursor_position_clamped() {
        let mut cursor = Cursor::new(vec![1u8, 2]);
        ByteSource::set_position(&mut cursor, 42);
        assert_eq!(ByteSource::position(&cursor), 2);
        assert!(ByteSource::is_eof(&cursor));
    }

    #[test]
    fn test_cursor_positioned_past_end() {
        let mut cursor = Cursor::new(vec![1u8, 2, 3]);
        cursor.set_position(10);
        assert_eq!(ByteSource::position(&cursor), 3);
        assert_eq!(ByteSource::remaining(&cursor), 0);
        assert_eq!(ByteSource::read_byte(&mut cursor), None);
    }
}
