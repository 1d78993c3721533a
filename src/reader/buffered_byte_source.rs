//! Buffered reader implementation of byte source.
//!
//! This module provides [BufferedByteSource], which wraps any `Read + Seek`
//! stream (a file by default) in a [BufReader] for streaming decoding. Use
//! this for large archives where loading everything into memory would be
//! impractical.

use log::warn;
use std::fs::File;
use std::io::{BufRead, BufReader, ErrorKind, Read, Seek, SeekFrom};
use std::path::Path;

use crate::reader::byte_source::ByteSource;

// =#========================================================================#=
// BUFFERED BYTE SOURCE
// =#========================================================================#=
/// A buffered byte source for streaming large inputs.
///
/// The total length is measured once when the source is created, so the
/// underlying stream must not grow or shrink while it is being decoded.
///
/// The [ByteSource] contract has no error channel. I/O errors raised by the
/// underlying stream are logged and treated as end of source.
pub struct BufferedByteSource<R: Read + Seek = File> {
    /// Underlying reader, handles getting chunks from the stream
    reader: BufReader<R>,

    /// Current absolute position in the stream
    pos: u64,

    /// Total size of the stream in bytes
    len: u64,
}

impl BufferedByteSource<File> {
    /// Creates a new buffered byte source from a file path.
    ///
    /// # Arguments
    /// * `path` - Path to the file (accepting `&str`, `String`, `Path`, or `PathBuf`)
    ///
    /// # Errors
    /// Returns an error if the file cannot be opened or its size determined.
    pub fn from_file<P: AsRef<Path>>(path: P) -> std::io::Result<BufferedByteSource<File>> {
        let file = File::open(path)?;
        Self::new(file)
    }
}

impl<R: Read + Seek> BufferedByteSource<R> {
    /// Wraps a stream, starting at the stream's current position.
    ///
    /// # Errors
    /// Returns an error if seeking the stream to measure its length fails.
    pub fn new(inner: R) -> std::io::Result<Self> {
        Self::with_capacity(0, inner)
    }

    /// Wraps a stream with an explicit buffer capacity (`0` keeps the
    /// [BufReader] default).
    ///
    /// # Errors
    /// Returns an error if seeking the stream to measure its length fails.
    pub fn with_capacity(capacity: usize, mut inner: R) -> std::io::Result<Self> {
        let start = inner.stream_position()?;
        let len = inner.seek(SeekFrom::End(0))?;
        let pos = start.min(len);
        inner.seek(SeekFrom::Start(pos))?;

        let reader = if capacity == 0 {
            BufReader::new(inner)
        } else {
            BufReader::with_capacity(capacity, inner)
        };

        Ok(Self { reader, pos, len })
    }

    /// Consumes the source, returning the wrapped stream.
    ///
    /// Bytes already buffered but not yet decoded are lost.
    pub fn into_inner(self) -> R {
        self.reader.into_inner()
    }
}

impl<R: Read + Seek> ByteSource for BufferedByteSource<R> {
    fn read(&mut self, buf: &mut [u8]) -> usize {
        let mut filled = 0;
        while filled < buf.len() {
            match self.reader.read(&mut buf[filled..]) {
                Ok(0) => break, // EOF
                Ok(n) => filled += n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => {
                    warn!("read failed at offset {}: {e}", self.pos + filled as u64);
                    break;
                }
            }
        }

        self.pos += filled as u64;
        filled
    }

    fn read_byte(&mut self) -> Option<u8> {
        let byte = self.peek_byte()?;
        self.reader.consume(1);
        self.pos += 1;
        Some(byte)
    }

    fn peek_byte(&mut self) -> Option<u8> {
        match self.reader.fill_buf() {
            Ok(buf) => buf.first().copied(),
            Err(e) => {
                warn!("read failed at offset {}: {e}", self.pos);
                None
            }
        }
    }

    fn position(&self) -> u64 {
        self.pos
    }

    fn set_position(&mut self, pos: u64) {
        let pos = pos.min(self.len);
        match self.reader.seek(SeekFrom::Start(pos)) {
            Ok(_) => self.pos = pos,
            Err(e) => warn!("seek to offset {pos} failed: {e}"),
        }
    }

    fn length(&self) -> u64 {
        self.len
    }
}
