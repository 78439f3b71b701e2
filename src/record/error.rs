use thiserror::Error;

use crate::bencode::{BencodeError, ValueKind};

/// Errors that can occur when mapping between bencode values and Rust records.
#[derive(Debug, Error)]
pub enum RecordError {
    /// The document could not be parsed or written.
    #[error("bencode error: {0}")]
    Bencode(#[from] BencodeError),

    /// Only lists and dictionaries can be unmarshaled at the top level.
    #[error("unsupported document shape: {0}")]
    UnsupportedShape(ValueKind),

    /// The destination cannot hold a document of this shape.
    #[error("cannot unmarshal a {document} into a destination expecting a {destination}")]
    InvalidDestination {
        document: ValueKind,
        destination: ValueKind,
    },

    /// A field's value has the wrong type. Only raised under
    /// [`MergePolicy::Strict`](super::MergePolicy::Strict).
    #[error("field {key:?}: expected {expected}, found {found}")]
    FieldMismatch {
        key: String,
        expected: ValueKind,
        found: ValueKind,
    },

    /// A list element differs from the kind of the list's first element.
    #[error("list element {index}: expected {expected}, found {found}")]
    ElementMismatch {
        index: usize,
        expected: ValueKind,
        found: ValueKind,
    },

    /// An integer does not fit the target field, or a field does not fit in
    /// a bencode integer.
    #[error("integer {value} out of range for {target}")]
    IntegerOutOfRange { value: i128, target: &'static str },

    #[error("invalid utf-8: {0}")]
    InvalidUtf8(#[from] std::str::Utf8Error),

    /// An empty `Option` was marshaled on its own or as a list element.
    #[error("no value to marshal")]
    MissingValue,
}
