//! Mapping between bencode documents and Rust records.
//!
//! A record is a struct whose fields map to the entries of a bencode
//! dictionary. Each record lists its fields, in declaration order, through
//! the [`Record`] trait; the [`bencode_record!`](crate::bencode_record) macro
//! generates that list together with the [`Marshal`] and [`Unmarshal`]
//! implementations.
//!
//! # Keys
//!
//! A field written as `name: "key"` uses `"key"` verbatim. A bare field uses
//! its identifier lowercased. A field written as `..field` is an embedded
//! record: its own fields are read from and written to the enclosing
//! dictionary instead of a nested one.
//!
//! # Examples
//!
//! ```
//! use bencodec::bencode_record;
//! use bencodec::bencode::decode;
//! use bencodec::record::{marshal_to, unmarshal};
//!
//! #[derive(Debug, Default, PartialEq)]
//! struct User {
//!     name: String,
//!     age: i64,
//! }
//!
//! bencode_record!(User { name: "name", age: "age" });
//!
//! #[derive(Debug, Default, PartialEq)]
//! struct Member {
//!     id: i64,
//!     user: User,
//! }
//!
//! bencode_record!(Member { id, ..user });
//!
//! let document = decode(b"d2:idi7e4:name6:archer3:agei29ee").unwrap();
//! let mut member = Member::default();
//! unmarshal(&document, &mut member).unwrap();
//! assert_eq!(member.id, 7);
//! assert_eq!(member.user.name, "archer");
//!
//! let mut out = Vec::new();
//! let written = marshal_to(&mut out, &member).unwrap();
//! assert_eq!(written, out.len());
//! assert_eq!(out, b"d2:idi7e4:name6:archer3:agei29ee");
//! ```
//!
//! # Type mismatches
//!
//! By default a present key whose value has the wrong bencode type is
//! skipped, leaving the field as it was. Pass [`MergePolicy::Strict`] to
//! [`unmarshal_with`] to turn this into [`RecordError::FieldMismatch`].
//!
//! Types with no bencode counterpart (floats, booleans, maps) implement
//! neither trait, so they cannot be used as record fields at all.

mod error;
mod impls;
mod mapper;
mod traits;

pub use error::RecordError;
pub use mapper::{
    marshal, marshal_record, marshal_to, unmarshal, unmarshal_from_reader, unmarshal_record,
    unmarshal_with,
};
pub use traits::{Field, FieldKey, FieldMut, Marshal, MergePolicy, Record, Unmarshal};

/// Implements [`Record`], [`Marshal`] and [`Unmarshal`] for a struct.
///
/// Fields are listed in the order they should appear in the dictionary:
///
/// - `field: "key"` maps `field` to the explicit key `"key"`;
/// - `field` maps it to its lowercased identifier;
/// - `..field` flattens an embedded record into this one.
///
/// Every field type must implement [`Marshal`] and [`Unmarshal`]; embedded
/// fields must implement [`Record`].
///
/// ```
/// use bencodec::bencode_record;
/// use bencodec::record::marshal;
/// use bencodec::bencode::encode;
///
/// #[derive(Default)]
/// struct Team {
///     name: String,
///     size: u32,
///     tags: Vec<String>,
/// }
///
/// bencode_record!(Team { name, size: "member count", tags });
///
/// let team = Team { name: "ace".into(), size: 2, tags: vec!["a".into()] };
/// let value = marshal(&team).unwrap();
/// assert_eq!(encode(&value).unwrap(), b"d4:name3:ace12:member counti2e4:tagsl1:aee");
/// ```
#[macro_export]
macro_rules! bencode_record {
    (@key $field:ident : $key:literal) => {
        $crate::record::FieldKey::Tag($key)
    };
    (@key $field:ident) => {
        $crate::record::FieldKey::Name(::core::stringify!($field))
    };
    ($ty:ty { $( $(.. $embedded:ident)? $($field:ident $(: $key:literal)?)? ),* }) => {
        impl $crate::record::Record for $ty {
            fn fields(&self) -> ::std::vec::Vec<$crate::record::Field<'_>> {
                ::std::vec![$(
                    $($crate::record::Field::flatten(&self.$embedded),)?
                    $($crate::record::Field::new(
                        $crate::bencode_record!(@key $field $(: $key)?),
                        &self.$field,
                    ),)?
                )*]
            }

            fn fields_mut(&mut self) -> ::std::vec::Vec<$crate::record::FieldMut<'_>> {
                ::std::vec![$(
                    $($crate::record::FieldMut::flatten(&mut self.$embedded),)?
                    $($crate::record::FieldMut::new(
                        $crate::bencode_record!(@key $field $(: $key)?),
                        &mut self.$field,
                    ),)?
                )*]
            }
        }

        impl $crate::record::Marshal for $ty {
            fn marshal(
                &self,
            ) -> ::core::result::Result<$crate::bencode::Value, $crate::record::RecordError> {
                $crate::record::marshal_record(self)
            }
        }

        impl $crate::record::Unmarshal for $ty {
            fn shape(&self) -> ::core::option::Option<$crate::bencode::ValueKind> {
                ::core::option::Option::Some($crate::bencode::ValueKind::Dict)
            }

            fn unmarshal(
                &mut self,
                value: &$crate::bencode::Value,
                policy: $crate::record::MergePolicy,
            ) -> ::core::result::Result<(), $crate::record::RecordError> {
                $crate::record::unmarshal_record(self, value, policy)
            }
        }
    };
}

#[cfg(test)]
mod tests;
