//! Configuration of a [ByteReader](crate::reader::ByteReader).

use crate::reader::decode::ByteOrder;

// =#========================================================================#=
// TRUNCATION POLICY
// =#========================================================================#=
/// What a fixed-width read does when the source ends before the value does.
///
/// Applies to fixed-width and 24-bit integers, [read_uint_be](crate::reader::ByteReader::read_uint_be),
/// floats, the body of length-prefixed strings, and variable-length integers
/// cut off by the end of the source. Raw byte spans and null-terminated
/// strings never report truncation under either policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TruncationPolicy {
    /// Return the zero value (or the partial data for strings and
    /// variable-length integers) without reporting anything.
    ///
    /// Callers that care must compare positions themselves. This is the default.
    #[default]
    Lenient,

    /// Report [UnexpectedEof](crate::reader::ReadingErrorType::UnexpectedEof).
    Strict,
}

// =#========================================================================#=
// READER OPTIONS
// =#========================================================================#=
/// Options controlling how a [ByteReader](crate::reader::ByteReader) decodes.
///
/// # Example
/// ```
/// use bytefield::reader::{ByteOrder, ReaderOptions, TruncationPolicy};
///
/// let options = ReaderOptions::default()
///     .with_truncation(TruncationPolicy::Strict)
///     .with_float_order(ByteOrder::Little);
/// assert_eq!(options.truncation(), TruncationPolicy::Strict);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReaderOptions {
    truncation: TruncationPolicy,
    float_order: ByteOrder,
}

impl ReaderOptions {
    /// Sets the [TruncationPolicy] (default: [Lenient](TruncationPolicy::Lenient)).
    pub fn with_truncation(mut self, truncation: TruncationPolicy) -> Self {
        self.truncation = truncation;
        self
    }

    /// Sets the byte order used by [read_f32](crate::reader::ByteReader::read_f32)
    /// (default: [Native](ByteOrder::Native), i.e. no swap).
    pub fn with_float_order(mut self, order: ByteOrder) -> Self {
        self.float_order = order;
        self
    }

    /// Returns the configured [TruncationPolicy].
    pub fn truncation(&self) -> TruncationPolicy {
        self.truncation
    }

    /// Returns the byte order used for floats.
    pub fn float_order(&self) -> ByteOrder {
        self.float_order
    }
}
