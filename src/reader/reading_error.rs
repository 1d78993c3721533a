//! Error types for binary field decoding.
//!
//! This module provides [ReadingError] and [ReadingErrorType] for representing
//! and reporting failures of [ByteReader](crate::reader::ByteReader) operations.

use std::fmt::Write;
use thiserror::Error;

// =#========================================================================#=
// READING ERROR TYPE
// =#========================================================================#=
/// Error types that can occur while decoding.
#[derive(Error, PartialEq, Eq, Debug, Clone)]
pub enum ReadingErrorType {
    /// A variable-length integer did not terminate within its maximum length.
    #[error("Malformed variable-length integer")]
    MalformedVarInt,

    /// The source ended before a value was complete
    /// (only under [TruncationPolicy::Strict](crate::reader::TruncationPolicy::Strict)).
    #[error("Unexpected end of source - needed {needed} bytes, only {available} available")]
    UnexpectedEof { needed: usize, available: usize },

    /// A length-prefixed string declared a negative length.
    #[error("Negative string length {0}")]
    NegativeLength(i32),
}

// =#========================================================================#=
// READING ERROR
// =#========================================================================#=
/// Reading error with contextual information (start position and the bytes
/// consumed by the failed read).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{kind} at position {position}{}", format_context(.context))]
pub struct ReadingError {
    kind: ReadingErrorType,
    position: u64,
    context: Vec<u8>,
}

impl ReadingError {
    /// Creates an error from its type, the position the failed read started
    /// at, and the bytes it consumed.
    pub fn new(kind: ReadingErrorType, position: u64, context: Vec<u8>) -> Self {
        Self {
            kind,
            position,
            context,
        }
    }

    /// Convenience constructor for MalformedVarInt
    pub fn malformed_var_int(position: u64, consumed: &[u8]) -> Self {
        Self::new(ReadingErrorType::MalformedVarInt, position, consumed.to_vec())
    }

    /// Convenience constructor for UnexpectedEof
    pub fn unexpected_eof(position: u64, needed: usize, consumed: &[u8]) -> Self {
        Self::new(
            ReadingErrorType::UnexpectedEof {
                needed,
                available: consumed.len(),
            },
            position,
            consumed.to_vec(),
        )
    }

    /// Convenience constructor for NegativeLength
    pub fn negative_length(position: u64, length: i32) -> Self {
        Self::new(
            ReadingErrorType::NegativeLength(length),
            position,
            length.to_le_bytes().to_vec(),
        )
    }

    /// Get the error kind
    pub fn kind(&self) -> &ReadingErrorType {
        &self.kind
    }

    /// Get the position where the failed read started
    pub fn position(&self) -> u64 {
        self.position
    }

    /// Get the bytes consumed by the failed read
    pub fn context(&self) -> &[u8] {
        &self.context
    }
}

fn format_context(context: &[u8]) -> String {
    if context.is_empty() {
        return String::new();
    }

    let mut out = format!("\n  Context ({} bytes):", context.len());
    for byte in context {
        let _ = write!(out, " {byte:02X}");
    }
    out
}
