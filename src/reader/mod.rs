//! Low-level binary field decoding.
//!
//! This module provides the [ByteSource] abstraction over sequential,
//! position-tracked bytes, two implementations of it, and [ByteReader],
//! which decodes typed values on top of any source.
pub mod buffered_byte_source;
pub mod byte_reader;
pub mod byte_source;
pub mod decode;
pub mod in_memory_byte_source;
pub mod options;
pub mod reading_error;
pub mod text_encoding;

pub use buffered_byte_source::BufferedByteSource;
pub use byte_reader::ByteReader;
pub use byte_source::ByteSource;
pub use decode::{ByteOrder, FixedWidth};
pub use in_memory_byte_source::InMemoryByteSource;
pub use options::{ReaderOptions, TruncationPolicy};
pub use reading_error::{ReadingError, ReadingErrorType};
pub use text_encoding::TextEncoding;
