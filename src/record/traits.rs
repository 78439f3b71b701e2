use std::borrow::Cow;

use super::error::RecordError;
use crate::bencode::{Value, ValueKind};

/// Conversion of a Rust value into a bencode [`Value`].
pub trait Marshal {
    fn marshal(&self) -> Result<Value, RecordError>;

    /// Returns true if the value should be left out of an enclosing record.
    /// Only an empty `Option` is absent.
    fn is_absent(&self) -> bool {
        false
    }
}

/// Merging of a bencode [`Value`] into an existing Rust value.
pub trait Unmarshal {
    /// The kind of value this destination accepts, or `None` for any kind.
    fn shape(&self) -> Option<ValueKind>;

    /// Overwrites `self` with the contents of `value`.
    ///
    /// Records overwrite only the fields present in the dictionary; other
    /// destinations are replaced outright.
    fn unmarshal(&mut self, value: &Value, policy: MergePolicy) -> Result<(), RecordError>;
}

/// How a record reacts to a present key whose value has the wrong type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MergePolicy {
    /// Skip the field and keep its current value.
    #[default]
    Permissive,
    /// Fail with [`RecordError::FieldMismatch`].
    Strict,
}

/// The dictionary key of a record field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKey {
    /// An explicit key, used verbatim.
    Tag(&'static str),
    /// The field's identifier, lowercased to form the key.
    Name(&'static str),
}

impl FieldKey {
    /// Resolves the key written to and looked up in the dictionary.
    ///
    /// ```
    /// use bencodec::record::FieldKey;
    ///
    /// assert_eq!(FieldKey::Tag("piece length").resolve(), "piece length");
    /// assert_eq!(FieldKey::Name("Age").resolve(), "age");
    /// assert_eq!(FieldKey::Name("r#type").resolve(), "type");
    /// ```
    pub fn resolve(&self) -> Cow<'static, str> {
        match *self {
            FieldKey::Tag(key) => Cow::Borrowed(key),
            FieldKey::Name(name) => {
                let name = name.strip_prefix("r#").unwrap_or(name);
                if name.chars().any(char::is_uppercase) {
                    Cow::Owned(name.to_lowercase())
                } else {
                    Cow::Borrowed(name)
                }
            }
        }
    }
}

/// A read-only view of one record field, in declaration order.
pub enum Field<'a> {
    Value {
        key: FieldKey,
        value: &'a dyn Marshal,
    },
    /// An embedded record whose fields are promoted into the parent dictionary.
    Flatten(&'a dyn Record),
}

impl<'a> Field<'a> {
    pub fn new<T: Marshal>(key: FieldKey, value: &'a T) -> Self {
        Field::Value { key, value }
    }

    pub fn flatten<T: Record>(record: &'a T) -> Self {
        Field::Flatten(record)
    }
}

/// A mutable view of one record field, in declaration order.
pub enum FieldMut<'a> {
    Value {
        key: FieldKey,
        slot: &'a mut dyn Unmarshal,
    },
    /// An embedded record filled from the parent dictionary.
    Flatten(&'a mut dyn Record),
}

impl<'a> FieldMut<'a> {
    pub fn new<T: Unmarshal>(key: FieldKey, slot: &'a mut T) -> Self {
        FieldMut::Value { key, slot }
    }

    pub fn flatten<T: Record>(record: &'a mut T) -> Self {
        FieldMut::Flatten(record)
    }
}

/// A Rust struct mapped to a bencode dictionary.
///
/// Implementations list their fields in declaration order; the
/// [`bencode_record!`](crate::bencode_record) macro writes them for you.
pub trait Record {
    fn fields(&self) -> Vec<Field<'_>>;

    fn fields_mut(&mut self) -> Vec<FieldMut<'_>>;
}
