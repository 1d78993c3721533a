//! Typed decoding on top of a [ByteSource].
//!
//! This module provides [ByteReader], which turns the raw bytes of a source
//! into integers, floats, strings, byte spans and variable-length integers.
//! It is the foundation every container format parser builds on.

use crate::reader::byte_source::ByteSource;
use crate::reader::decode::{ByteOrder, FixedWidth, MAX_FIXED_WIDTH, sign_extend_24, u24_from_bytes};
use crate::reader::options::{ReaderOptions, TruncationPolicy};
use crate::reader::reading_error::ReadingError;
use crate::reader::text_encoding::TextEncoding;
use log::{debug, trace};

/// Maximum number of bytes of a MIDI-style variable-length quantity.
const MAX_VAR_INT_BYTES: usize = 4;

/// Maximum number of bytes of a 7-bit encoded (LEB128-style) `u32`.
const MAX_7BIT_INT_BYTES: usize = 5;

// =#========================================================================#=
// BYTE READER
// =#========================================================================#=
/// A decoder for typed binary fields, borrowing a [ByteSource] for its lifetime.
///
/// [ByteReader] never owns the source: it holds `&mut S`, so the caller keeps
/// the cursor once the reader is dropped, and the borrow guarantees nothing
/// else touches the source while a read is in progress.
///
/// # Truncated reads
/// Fixed-width values that run past the end of the source consume whatever
/// bytes remain and then follow the configured [TruncationPolicy]: the default
/// ([Lenient](TruncationPolicy::Lenient)) returns the zero value, while
/// [Strict](TruncationPolicy::Strict) reports
/// [UnexpectedEof](crate::reader::ReadingErrorType::UnexpectedEof). The only
/// error reported regardless of policy is a malformed variable-length integer.
///
/// # Example
/// ```
/// use bytefield::reader::{ByteReader, InMemoryByteSource};
///
/// let mut source = InMemoryByteSource::from_vec(vec![0x34, 0x12, 0x81, 0x00, b'h', b'i', 0]);
/// let mut reader = ByteReader::new(&mut source);
///
/// assert_eq!(reader.read_u16_le()?, 0x1234);
/// assert_eq!(reader.read_var_int()?, 128);
/// assert_eq!(reader.read_null_terminated_string(None), "hi");
/// assert!(reader.is_eof());
/// # Ok::<(), bytefield::reader::ReadingError>(())
/// ```
pub struct ByteReader<'a, S: ByteSource + ?Sized> {
    source: &'a mut S,
    options: ReaderOptions,
}

impl<'a, S: ByteSource + ?Sized> ByteReader<'a, S> {
    /// Creates a new `ByteReader` with default [ReaderOptions].
    ///
    /// # Arguments
    /// * `source` - The byte source to decode from
    pub fn new(source: &'a mut S) -> Self {
        Self::with_options(source, ReaderOptions::default())
    }

    /// Creates a new `ByteReader` with explicit options.
    ///
    /// # Arguments
    /// * `source` - The byte source to decode from
    /// * `options` - Truncation policy and float byte order
    pub fn with_options(source: &'a mut S, options: ReaderOptions) -> Self {
        Self { source, options }
    }

    /// Returns the options this reader was created with.
    pub fn options(&self) -> ReaderOptions {
        self.options
    }

    // ------------------------------------------------------------------------
    // Cursor
    // ------------------------------------------------------------------------
    /// Returns the current position in the source.
    pub fn position(&self) -> u64 {
        self.source.position()
    }

    /// Sets the position in the source, clamped to its length.
    pub fn set_position(&mut self, pos: u64) {
        self.source.set_position(pos);
    }

    /// Returns the total length of the source.
    pub fn length(&self) -> u64 {
        self.source.length()
    }

    /// Returns the number of bytes left to read.
    pub fn remaining(&self) -> u64 {
        self.source.remaining()
    }

    /// Returns whether the end of the source has been reached.
    pub fn is_eof(&self) -> bool {
        self.source.is_eof()
    }

    /// Peeks at the current byte without consuming it.
    #[inline(always)]
    pub fn peek_byte(&mut self) -> Option<u8> {
        self.source.peek_byte()
    }

    /// Gets the current byte and advances the position.
    #[inline(always)]
    pub fn read_byte(&mut self) -> Option<u8> {
        self.source.read_byte()
    }

    /// Advances the position by up to `count` bytes.
    ///
    /// # Returns
    /// The number of bytes actually skipped
    pub fn skip(&mut self, count: u64) -> u64 {
        let skipped = count.min(self.remaining());
        self.set_position(self.position() + skipped);
        skipped
    }

    // ------------------------------------------------------------------------
    // Fixed-width values
    // ------------------------------------------------------------------------
    /// Reads a value of fixed width in the given byte order.
    ///
    /// # Errors
    /// Returns `UnexpectedEof` if the source ends early and the policy is strict.
    pub fn read_fixed<T: FixedWidth>(&mut self, order: ByteOrder) -> Result<T, ReadingError> {
        let mut raw = [0u8; MAX_FIXED_WIDTH];
        let buf = &mut raw[..T::WIDTH];
        if self.fill(buf)? {
            Ok(T::decode(buf, order))
        } else {
            Ok(T::default())
        }
    }

    /// Reads a signed byte; zero at end of source (lenient policy).
    pub fn read_i8(&mut self) -> Result<i8, ReadingError> {
        self.read_fixed(ByteOrder::Little)
    }

    /// Reads an unsigned byte as the reinterpreted [read_i8](Self::read_i8); zero at end
    /// of source (lenient policy).
    pub fn read_u8(&mut self) -> Result<u8, ReadingError> {
        Ok(self.read_i8()? as u8)
    }

    /// Reads a little-endian signed 16-bit integer; zero if truncated (lenient policy).
    pub fn read_i16_le(&mut self) -> Result<i16, ReadingError> {
        self.read_fixed(ByteOrder::Little)
    }

    /// Reads a big-endian signed 16-bit integer; zero if truncated (lenient policy).
    pub fn read_i16_be(&mut self) -> Result<i16, ReadingError> {
        self.read_fixed(ByteOrder::Big)
    }

    /// Reads a little-endian unsigned 16-bit integer, the bits of [read_i16_le](Self::read_i16_le)
    /// reinterpreted; zero if truncated (lenient policy).
    pub fn read_u16_le(&mut self) -> Result<u16, ReadingError> {
        Ok(self.read_i16_le()? as u16)
    }

    /// Reads a big-endian unsigned 16-bit integer, the bits of [read_i16_be](Self::read_i16_be)
    /// reinterpreted; zero if truncated (lenient policy).
    pub fn read_u16_be(&mut self) -> Result<u16, ReadingError> {
        Ok(self.read_i16_be()? as u16)
    }

    /// Reads a little-endian signed 32-bit integer; zero if truncated (lenient policy).
    pub fn read_i32_le(&mut self) -> Result<i32, ReadingError> {
        self.read_fixed(ByteOrder::Little)
    }

    /// Reads a big-endian signed 32-bit integer; zero if truncated (lenient policy).
    pub fn read_i32_be(&mut self) -> Result<i32, ReadingError> {
        self.read_fixed(ByteOrder::Big)
    }

    /// Reads a little-endian unsigned 32-bit integer, the bits of [read_i32_le](Self::read_i32_le)
    /// reinterpreted; zero if truncated (lenient policy).
    pub fn read_u32_le(&mut self) -> Result<u32, ReadingError> {
        Ok(self.read_i32_le()? as u32)
    }

    /// Reads a big-endian unsigned 32-bit integer, the bits of [read_i32_be](Self::read_i32_be)
    /// reinterpreted; zero if truncated (lenient policy).
    pub fn read_u32_be(&mut self) -> Result<u32, ReadingError> {
        Ok(self.read_i32_be()? as u32)
    }

    /// Reads a little-endian signed 64-bit integer; zero if truncated (lenient policy).
    pub fn read_i64_le(&mut self) -> Result<i64, ReadingError> {
        self.read_fixed(ByteOrder::Little)
    }

    /// Reads a big-endian signed 64-bit integer; zero if truncated (lenient policy).
    pub fn read_i64_be(&mut self) -> Result<i64, ReadingError> {
        self.read_fixed(ByteOrder::Big)
    }

    /// Reads a little-endian unsigned 64-bit integer, the bits of [read_i64_le](Self::read_i64_le)
    /// reinterpreted; zero if truncated (lenient policy).
    pub fn read_u64_le(&mut self) -> Result<u64, ReadingError> {
        Ok(self.read_i64_le()? as u64)
    }

    /// Reads a big-endian unsigned 64-bit integer, the bits of [read_i64_be](Self::read_i64_be)
    /// reinterpreted; zero if truncated (lenient policy).
    pub fn read_u64_be(&mut self) -> Result<u64, ReadingError> {
        Ok(self.read_i64_be()? as u64)
    }

    // ------------------------------------------------------------------------
    // 24-bit values
    // ------------------------------------------------------------------------
    /// Reads a 24-bit little-endian signed integer, sign-extended to 32 bits.
    pub fn read_i24_le(&mut self) -> Result<i32, ReadingError> {
        Ok(sign_extend_24(self.read_u24(ByteOrder::Little)?))
    }

    /// Reads a 24-bit big-endian signed integer, sign-extended to 32 bits.
    pub fn read_i24_be(&mut self) -> Result<i32, ReadingError> {
        Ok(sign_extend_24(self.read_u24(ByteOrder::Big)?))
    }

    /// Reads a 24-bit little-endian unsigned integer (`0..2^24`).
    pub fn read_u24_le(&mut self) -> Result<u32, ReadingError> {
        self.read_u24(ByteOrder::Little)
    }

    /// Reads a 24-bit big-endian unsigned integer (`0..2^24`).
    pub fn read_u24_be(&mut self) -> Result<u32, ReadingError> {
        self.read_u24(ByteOrder::Big)
    }

    fn read_u24(&mut self, order: ByteOrder) -> Result<u32, ReadingError> {
        let mut raw = [0u8; 3];
        if self.fill(&mut raw)? {
            Ok(u24_from_bytes(raw, order))
        } else {
            Ok(0)
        }
    }

    /// Reads an `n`-byte big-endian unsigned integer.
    ///
    /// # Arguments
    /// * `n` - Number of bytes, `0..=8`
    ///
    /// # Returns
    /// The accumulated value; `0` without consuming anything if `n > 8`
    ///
    /// # Errors
    /// Returns `UnexpectedEof` if the source ends early and the policy is strict.
    pub fn read_uint_be(&mut self, n: usize) -> Result<u64, ReadingError> {
        if n > MAX_FIXED_WIDTH {
            return Ok(0);
        }

        let mut raw = [0u8; MAX_FIXED_WIDTH];
        let buf = &mut raw[..n];
        if !self.fill(buf)? {
            return Ok(0);
        }

        Ok(buf.iter().fold(0u64, |acc, &b| (acc << 8) | u64::from(b)))
    }

    // ------------------------------------------------------------------------
    // Floating point
    // ------------------------------------------------------------------------
    /// Reads an IEEE-754 single-precision float in the configured float byte
    /// order ([Native](ByteOrder::Native) unless changed in [ReaderOptions]).
    pub fn read_f32(&mut self) -> Result<f32, ReadingError> {
        self.read_fixed(self.options.float_order())
    }

    /// Reads an IEEE-754 single-precision float in an explicit byte order.
    pub fn read_f32_with(&mut self, order: ByteOrder) -> Result<f32, ReadingError> {
        self.read_fixed(order)
    }

    // ------------------------------------------------------------------------
    // Strings and byte spans
    // ------------------------------------------------------------------------
    /// Reads a null-terminated single-byte string.
    ///
    /// Each byte becomes the `char` with the same code point. Reading stops at
    /// a `0` byte (which is consumed), after `limit` characters (nothing
    /// further is consumed), or at the end of the source.
    ///
    /// # Arguments
    /// * `limit` - Maximum number of characters, `None` for unlimited
    pub fn read_null_terminated_string(&mut self, limit: Option<usize>) -> String {
        let mut text = String::new();
        let mut count = 0;

        while limit.is_none_or(|max| count < max) {
            match self.source.read_byte() {
                None | Some(0) => break,
                Some(b) => {
                    text.push(b as char);
                    count += 1;
                }
            }
        }

        text
    }

    /// Reads a string prefixed by its byte length as a little-endian `i32`.
    ///
    /// # Arguments
    /// * `encoding` - Encoding of the bytes following the prefix
    ///
    /// # Errors
    /// * `NegativeLength` - if the prefix is negative
    /// * `UnexpectedEof` - if the source ends early and the policy is strict
    pub fn read_length_prefixed_string(&mut self, encoding: TextEncoding) -> Result<String, ReadingError> {
        let start = self.position();
        let length = self.read_i32_le()?;
        if length < 0 {
            return Err(ReadingError::negative_length(start, length));
        }

        let body_start = self.position();
        let bytes = self.read_bytes(length as usize);
        if bytes.len() < length as usize {
            self.on_truncated(body_start, length as usize, &bytes)?;
        }

        Ok(encoding.decode(&bytes))
    }

    /// Reads a length-prefixed UTF-8 string.
    ///
    /// See [read_length_prefixed_string](Self::read_length_prefixed_string).
    pub fn read_utf8_string(&mut self) -> Result<String, ReadingError> {
        self.read_length_prefixed_string(TextEncoding::Utf8)
    }

    /// Reads up to `count` bytes.
    ///
    /// # Returns
    /// Exactly `min(count, remaining())` bytes; never fails
    pub fn read_bytes(&mut self, count: usize) -> Vec<u8> {
        let available = usize::try_from(self.remaining()).map_or(count, |r| r.min(count));
        let mut bytes = vec![0u8; available];
        let read = self.source.read(&mut bytes);
        bytes.truncate(read);
        bytes
    }

    // ------------------------------------------------------------------------
    // Variable-length integers
    // ------------------------------------------------------------------------
    /// Reads a MIDI-style variable-length quantity.
    ///
    /// Each byte contributes its low 7 bits, most-significant group first; a
    /// set high bit means another byte follows. At most four bytes are read,
    /// so the largest value is `0x0FFF_FFFF`.
    ///
    /// # Errors
    /// * `MalformedVarInt` - if the fourth byte still has its high bit set
    /// * `UnexpectedEof` - if the source ends mid-value and the policy is strict
    ///   (the lenient policy returns the bits accumulated so far)
    pub fn read_var_int(&mut self) -> Result<u32, ReadingError> {
        let start = self.position();
        let mut consumed = [0u8; MAX_VAR_INT_BYTES];
        let mut value: u32 = 0;

        for i in 0..MAX_VAR_INT_BYTES {
            let Some(byte) = self.source.read_byte() else {
                self.on_truncated(start, i + 1, &consumed[..i])?;
                return Ok(value);
            };
            consumed[i] = byte;
            value = (value << 7) | u32::from(byte & 0x7F);
            if byte & 0x80 == 0 {
                return Ok(value);
            }
        }

        debug!("malformed variable-length integer at offset {start}: {consumed:02X?}");
        Err(ReadingError::malformed_var_int(start, &consumed))
    }

    /// Reads a 7-bit encoded integer as written by .NET-style binary writers
    /// (LEB128 group order: least-significant group first).
    ///
    /// # Errors
    /// * `MalformedVarInt` - if the fifth byte is above `0x0F` (the value would
    ///   not fit in 32 bits or another byte would follow)
    /// * `UnexpectedEof` - if the source ends mid-value and the policy is strict
    pub fn read_7bit_encoded_int(&mut self) -> Result<u32, ReadingError> {
        let start = self.position();
        let mut consumed = [0u8; MAX_7BIT_INT_BYTES];
        let mut value: u32 = 0;

        for i in 0..MAX_7BIT_INT_BYTES {
            let Some(byte) = self.source.read_byte() else {
                self.on_truncated(start, i + 1, &consumed[..i])?;
                return Ok(value);
            };
            consumed[i] = byte;
            if i == MAX_7BIT_INT_BYTES - 1 && byte > 0x0F {
                // only the low 4 bits of the fifth byte fit in a u32
                debug!("7-bit encoded integer overflows u32 at offset {start}: {consumed:02X?}");
                return Err(ReadingError::malformed_var_int(start, &consumed[..=i]));
            }
            value |= u32::from(byte & 0x7F) << (7 * i);
            if byte & 0x80 == 0 {
                return Ok(value);
            }
        }

        debug!("malformed 7-bit encoded integer at offset {start}: {consumed:02X?}");
        Err(ReadingError::malformed_var_int(start, &consumed))
    }

    // ------------------------------------------------------------------------
    // Helpers (private)
    // ------------------------------------------------------------------------
    /// Fills `buf` from the source.
    ///
    /// # Returns
    /// `Ok(true)` if `buf` was filled completely, `Ok(false)` if the source
    /// ended early under the lenient policy
    fn fill(&mut self, buf: &mut [u8]) -> Result<bool, ReadingError> {
        let start = self.position();
        let read = self.source.read(buf);
        if read == buf.len() {
            return Ok(true);
        }

        self.on_truncated(start, buf.len(), &buf[..read])?;
        Ok(false)
    }

    /// Applies the truncation policy to a read that started at `start`,
    /// wanted `needed` bytes and only got `consumed`.
    fn on_truncated(&self, start: u64, needed: usize, consumed: &[u8]) -> Result<(), ReadingError> {
        match self.options.truncation() {
            TruncationPolicy::Lenient => {
                trace!(
                    "truncated read at offset {start}: needed {needed} bytes, got {}",
                    consumed.len()
                );
                Ok(())
            }
            TruncationPolicy::Strict => Err(ReadingError::unexpected_eof(start, needed, consumed)),
        }
    }
}

// =#========================================================================#=
// TESTS - BYTE READER
// =#========================================================================#=
#[cfg(test)]
mod tests {
    use super::*;
    use crate::reader::in_memory_byte_source::InMemoryByteSource;
    use crate::reader::reading_error::ReadingErrorType;

    fn strict() -> ReaderOptions {
        ReaderOptions::default().with_truncation(TruncationPolicy::Strict)
    }

    #[test]
    fn test_fill_consumes_partial_bytes() {
        let mut source = InMemoryByteSource::from_vec(vec![0xAA, 0xBB]);
        let mut reader = ByteReader::new(&mut source);
        assert_eq!(reader.read_u32_le().unwrap(), 0);
        assert_eq!(reader.position(), 2);
        assert!(reader.is_eof());
    }

    #[test]
    fn test_strict_error_carries_consumed_bytes() {
        let mut source = InMemoryByteSource::from_vec(vec![0x01, 0x02, 0x03, 0x04, 0x05]);
        let mut reader = ByteReader::with_options(&mut source, strict());
        reader.skip(2);

        let err = reader.read_i32_be().unwrap_err();
        assert_eq!(
            err.kind(),
            &ReadingErrorType::UnexpectedEof {
                needed: 4,
                available: 3
            }
        );
        assert_eq!(err.position(), 2);
        assert_eq!(err.context(), &[0x03, 0x04, 0x05]);
    }

    #[test]
    fn test_var_int_truncated_policies() {
        let mut source = InMemoryByteSource::from_vec(vec![0x81, 0x82]);
        let mut reader = ByteReader::new(&mut source);
        assert_eq!(reader.read_var_int().unwrap(), (1 << 7) | 2);

        let mut source = InMemoryByteSource::from_vec(vec![0x81, 0x82]);
        let mut reader = ByteReader::with_options(&mut source, strict());
        let err = reader.read_var_int().unwrap_err();
        assert_eq!(
            err.kind(),
            &ReadingErrorType::UnexpectedEof {
                needed: 3,
                available: 2
            }
        );
    }

    #[test]
    fn test_dyn_source() {
        let mut source = InMemoryByteSource::from_vec(vec![0x00, 0x01]);
        let dyn_source: &mut dyn ByteSource = &mut source;
        let mut reader = ByteReader::new(dyn_source);
        assert_eq!(reader.read_u16_be().unwrap(), 1);
    }

    #[test]
    fn test_skip_clamped() {
        let mut source = InMemoryByteSource::from_vec(vec![1, 2, 3]);
        let mut reader = ByteReader::new(&mut source);
        assert_eq!(reader.skip(2), 2);
        assert_eq!(reader.skip(5), 1);
        assert_eq!(reader.position(), 3);
    }
}
