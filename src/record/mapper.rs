use std::io::{BufRead, Write};

use bytes::Bytes;
use tracing::debug;

use super::error::RecordError;
use super::traits::{Field, FieldMut, Marshal, MergePolicy, Record, Unmarshal};
use crate::bencode::{parse, Dict, Value, ValueKind};

/// Converts a record, sequence, or primitive into a bencode value.
///
/// Records become dictionaries with keys in field declaration order,
/// sequences become lists, strings become byte strings and integers stay
/// integers.
pub fn marshal<T: Marshal + ?Sized>(value: &T) -> Result<Value, RecordError> {
    value.marshal()
}

/// Marshals `value` straight into `writer`, returning the number of bytes written.
///
/// ```
/// use bencodec::record::marshal_to;
///
/// let mut out = Vec::new();
/// assert_eq!(marshal_to(&mut out, "abc").unwrap(), 5);
/// assert_eq!(out, b"3:abc");
///
/// out.clear();
/// assert_eq!(marshal_to(&mut out, &199).unwrap(), 5);
/// assert_eq!(out, b"i199e");
/// ```
pub fn marshal_to<W: Write, T: Marshal + ?Sized>(
    writer: &mut W,
    value: &T,
) -> Result<usize, RecordError> {
    Ok(value.marshal()?.encode(writer)?)
}

/// Fills `destination` from a list or dictionary document, skipping fields
/// whose value has the wrong type.
///
/// Equivalent to [`unmarshal_with`] using [`MergePolicy::Permissive`].
pub fn unmarshal<T: Unmarshal + ?Sized>(
    document: &Value,
    destination: &mut T,
) -> Result<(), RecordError> {
    unmarshal_with(document, destination, MergePolicy::default())
}

/// Fills `destination` from a list or dictionary document.
///
/// Keys missing from a dictionary leave the matching field untouched. What
/// happens to a present key with a mismatched value depends on `policy`.
///
/// # Errors
///
/// - [`RecordError::UnsupportedShape`] if the document is an integer or a byte string.
/// - [`RecordError::InvalidDestination`] if `destination` cannot hold the
///   document's shape, checked before anything is written.
pub fn unmarshal_with<T: Unmarshal + ?Sized>(
    document: &Value,
    destination: &mut T,
    policy: MergePolicy,
) -> Result<(), RecordError> {
    let kind = document.kind();
    if !matches!(kind, ValueKind::List | ValueKind::Dict) {
        return Err(RecordError::UnsupportedShape(kind));
    }

    match destination.shape() {
        Some(expected) if expected != kind => Err(RecordError::InvalidDestination {
            document: kind,
            destination: expected,
        }),
        _ => destination.unmarshal(document, policy),
    }
}

/// Parses one document from `reader` and unmarshals it into `destination`.
pub fn unmarshal_from_reader<R: BufRead, T: Unmarshal + ?Sized>(
    reader: R,
    destination: &mut T,
) -> Result<(), RecordError> {
    let document = parse(reader)?;
    unmarshal(&document, destination)
}

/// Builds the dictionary for a record, flattening embedded records in place.
pub fn marshal_record<R: Record + ?Sized>(record: &R) -> Result<Value, RecordError> {
    let mut dict = Dict::new();
    collect_fields(record, &mut dict)?;
    Ok(Value::Dict(dict))
}

/// Merges a dictionary into a record.
pub fn unmarshal_record<R: Record + ?Sized>(
    record: &mut R,
    value: &Value,
    policy: MergePolicy,
) -> Result<(), RecordError> {
    let dict = value.try_dict()?;
    merge_fields(record, dict, policy)
}

fn collect_fields<R: Record + ?Sized>(record: &R, dict: &mut Dict) -> Result<(), RecordError> {
    for field in record.fields() {
        match field {
            Field::Flatten(embedded) => collect_fields(embedded, dict)?,
            Field::Value { key, value } => {
                if value.is_absent() {
                    continue;
                }
                let key = Bytes::from(key.resolve().into_owned());
                dict.insert(key, value.marshal()?);
            }
        }
    }
    Ok(())
}

fn merge_fields<R: Record + ?Sized>(
    record: &mut R,
    dict: &Dict,
    policy: MergePolicy,
) -> Result<(), RecordError> {
    for field in record.fields_mut() {
        match field {
            FieldMut::Flatten(embedded) => merge_fields(embedded, dict, policy)?,
            FieldMut::Value { key, slot } => {
                let key = key.resolve();
                let Some(value) = dict.get(key.as_bytes()) else {
                    continue;
                };

                let found = value.kind();
                match slot.shape() {
                    Some(expected) if expected != found => match policy {
                        MergePolicy::Permissive => {
                            debug!(
                                key = %key,
                                %expected,
                                %found,
                                "skipping field with mismatched bencode type"
                            );
                        }
                        MergePolicy::Strict => {
                            return Err(RecordError::FieldMismatch {
                                key: key.into_owned(),
                                expected,
                                found,
                            });
                        }
                    },
                    _ => slot.unmarshal(value, policy)?,
                }
            }
        }
    }
    Ok(())
}
