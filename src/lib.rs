//! bencodec - A Bencode codec
//!
//! This library reads and writes the Bencode format used by BitTorrent
//! ([BEP-3](http://bittorrent.org/beps/bep_0003.html)) over any byte stream,
//! and maps Bencode documents to and from Rust structs.
//!
//! # Modules
//!
//! - [`bencode`] - Object model, streaming parser and encoder
//! - [`record`] - Struct and sequence mapping (marshal/unmarshal)
//! - [`constants`] - Codec limits
//!
//! # Example
//!
//! ```
//! use bencodec::{bencode_record, decode, encode, record};
//!
//! #[derive(Debug, Default)]
//! struct User {
//!     name: String,
//!     age: i64,
//! }
//!
//! bencode_record!(User { name, age });
//!
//! let document = decode(b"d4:name6:archer3:agei29ee").unwrap();
//! let mut user = User::default();
//! record::unmarshal(&document, &mut user).unwrap();
//! assert_eq!(user.name, "archer");
//! assert_eq!(user.age, 29);
//!
//! let value = record::marshal(&user).unwrap();
//! assert_eq!(encode(&value).unwrap(), b"d4:name6:archer3:agei29ee");
//! ```

pub mod bencode;
pub mod constants;
pub mod record;

pub use bencode::{decode, encode, parse, BencodeError, Parser, Value};
pub use record::{Marshal, MergePolicy, Record, RecordError, Unmarshal};
