//! Bytefield is a library to decode typed fields from binary data.
//!
//! This crate offers the decoding layer that archive headers, resource
//! tables and event-stream parsers are built on. Core functionality provided:
//! - Byte sources: Read from an in-memory buffer ([InMemoryByteSource] or a
//!   [std::io::Cursor]) or stream any `Read + Seek` input through
//!   [BufferedByteSource]. Anything implementing [ByteSource] works.
//! - Fixed-width integers: 8, 16, 32 and 64 bits, signed and unsigned,
//!   little- and big-endian, plus 24-bit integers and `n`-byte big-endian
//!   integers.
//! - Floats: IEEE-754 single precision in host order (configurable).
//! - Strings: null-terminated single-byte strings and length-prefixed strings
//!   in a choice of [TextEncoding]s.
//! - Byte spans: never longer than what is left in the source.
//! - Variable-length integers: MIDI-style quantities and 7-bit encoded
//!   (LEB128-style) integers.
//! - Configurability via [ReaderOptions]:
//!   - Truncated reads return zero (default) or fail
//!     ([TruncationPolicy::Strict])
//!   - Byte order of floats
//!
//! Limitations:
//! - Decoding only, there is no writer
//! - Sources are not thread-safe; a [ByteReader] borrows its source mutably
//!
//! # Usage patterns
//! 1. Create a byte source, borrow it with [ByteReader::new] and call the
//!    `read_*` methods in the order fields appear.
//! 2. Use [ByteReader::with_options] for strict truncation handling or a
//!    fixed float byte order.
//!
//! ## Example
//! ```
//! use bytefield::reader::{ByteReader, InMemoryByteSource, ReaderOptions, TruncationPolicy};
//!
//! let bytes = vec![
//!     b'R', b'I', b'F', 0,        // magic
//!     0x00, 0x00, 0x01, 0x00,     // entry count, big-endian
//!     0x83, 0x60,                 // delta time
//! ];
//! let mut source = InMemoryByteSource::from_vec(bytes);
//! let options = ReaderOptions::default().with_truncation(TruncationPolicy::Strict);
//! let mut reader = ByteReader::with_options(&mut source, options);
//!
//! assert_eq!(reader.read_null_terminated_string(None), "RIF");
//! assert_eq!(reader.read_u32_be()?, 256);
//! assert_eq!(reader.read_var_int()?, 480);
//! assert!(reader.read_u16_le().is_err());
//! # Ok::<(), bytefield::reader::ReadingError>(())
//! ```

pub mod reader;

pub use crate::reader::{
    BufferedByteSource, ByteOrder, ByteReader, ByteSource, InMemoryByteSource, ReaderOptions,
    ReadingError, ReadingErrorType, TextEncoding, TruncationPolicy,
};
