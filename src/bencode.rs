//! Bencode encoding and decoding ([BEP-3]).
//!
//! Bencode is the serialization format used throughout BitTorrent for storing
//! and transmitting structured data, including `.torrent` files and tracker
//! responses.
//!
//! # Data Types
//!
//! Bencode supports four data types:
//!
//! | Type | Format | Example |
//! |------|--------|---------|
//! | Integer | `i<number>e` | `i42e` → 42 |
//! | Byte String | `<length>:<data>` | `4:spam` → "spam" |
//! | List | `l<items>e` | `l4:spami42ee` → ["spam", 42] |
//! | Dictionary | `d<key><value>...e` | `d3:foo3:bare` → {"foo": "bar"} |
//!
//! # Layers
//!
//! - [`write_decimal`] / [`read_decimal`] handle the unpadded signed
//!   decimals used by length prefixes and integers.
//! - [`encode_string`], [`encode_int`], [`decode_string`] and [`decode_int`]
//!   handle the two primitive types directly on a stream.
//! - [`Parser`] / [`parse`] build a [`Value`] tree from any [`BufRead`]
//!   source, and [`Value::encode`] writes one back to any [`Write`] sink.
//!
//! # Examples
//!
//! ## Decoding bencode data
//!
//! ```
//! use bencodec::bencode::{decode, Value};
//!
//! // Decode an integer
//! let value = decode(b"i42e").unwrap();
//! assert_eq!(value.as_integer(), Some(42));
//!
//! // Decode a string
//! let value = decode(b"4:spam").unwrap();
//! assert_eq!(value.as_str(), Some("spam"));
//!
//! // Decode a dictionary
//! let value = decode(b"d4:name6:archer3:agei29ee").unwrap();
//! assert_eq!(value.get(b"name").and_then(|v| v.as_str()), Some("archer"));
//! assert_eq!(value.get(b"age").and_then(|v| v.as_integer()), Some(29));
//! ```
//!
//! ## Key order
//!
//! Dictionaries remember insertion order and [`encode`] honours it, so any
//! parsed document re-encodes byte for byte. Canonical bencode requires
//! sorted keys; use [`encode_canonical`] when the output is hashed or must
//! match other implementations.
//!
//! ```
//! use bencodec::bencode::{decode, encode, encode_canonical};
//!
//! let value = decode(b"d4:name6:archer3:agei29ee").unwrap();
//! assert_eq!(encode(&value).unwrap(), b"d4:name6:archer3:agei29ee");
//! assert_eq!(encode_canonical(&value).unwrap(), b"d3:agei29e4:name6:archere");
//! ```
//!
//! # Error Handling
//!
//! Decoding can fail for various reasons:
//!
//! - [`BencodeError::UnexpectedEof`] - Input ended unexpectedly
//! - [`BencodeError::ExpectedNumber`] - Missing digits in a length or integer
//! - [`BencodeError::UnexpectedChar`] - A byte that cannot start a value
//! - [`BencodeError::DepthExceeded`] - Recursion limit exceeded (64 levels by default)
//! - [`BencodeError::TrailingData`] - Extra data after the value
//!
//! Duplicate dictionary keys are accepted; the last value wins.
//!
//! [BEP-3]: http://bittorrent.org/beps/bep_0003.html
//! [`BufRead`]: std::io::BufRead
//! [`Write`]: std::io::Write

mod decimal;
mod decode;
mod encode;
mod error;
mod primitive;
mod stream;
mod value;

pub use decimal::{read_decimal, write_decimal};
pub use decode::{decode, parse, Parser};
pub use encode::{encode, encode_canonical};
pub use error::BencodeError;
pub use primitive::{decode_int, decode_string, encode_int, encode_string};
pub use value::{Dict, Value, ValueKind};
