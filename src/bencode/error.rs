use thiserror::Error;

use super::value::ValueKind;

/// Errors produced while reading or writing bencode.
///
/// Every error is terminal for the call that produced it; the codec never
/// repairs malformed input.
#[derive(Debug, Error)]
pub enum BencodeError {
    /// Input ended inside a value (truncated list/dict or short string payload).
    #[error("unexpected end of input")]
    UnexpectedEof,

    /// A decimal number was required but no digit was found.
    #[error("expected a decimal number")]
    ExpectedNumber,

    /// A string length prefix was not followed by `:`.
    #[error("expected ':' after string length")]
    ExpectedColon,

    /// An integer did not start with `i`.
    #[error("expected 'i' at start of integer")]
    ExpectedCharI,

    /// An integer was not terminated by `e`.
    #[error("expected 'e' at end of integer")]
    ExpectedCharE,

    /// A string length prefix was negative.
    #[error("invalid string length: {0}")]
    InvalidStringLength(i64),

    /// A decimal number does not fit in a signed 64-bit integer.
    #[error("integer overflow")]
    IntegerOverflow,

    /// A byte that cannot start any bencode value.
    #[error("unexpected character: {0:?}")]
    UnexpectedChar(char),

    /// A typed accessor was invoked on the wrong variant.
    #[error("wrong type: expected {expected}, found {found}")]
    WrongType {
        expected: ValueKind,
        found: ValueKind,
    },

    #[error("trailing data after value")]
    TrailingData,

    /// Lists and dictionaries are nested deeper than the parser allows.
    #[error("nesting exceeds depth limit of {limit}")]
    DepthExceeded { limit: usize },

    #[error("read failed: {0}")]
    ReadFailed(#[source] std::io::Error),

    #[error("write failed: {0}")]
    WriteFailed(#[source] std::io::Error),
}
