use std::io::Write;

use super::error::BencodeError;
use super::primitive::{encode_int, encode_string};
use super::stream::write_all;
use super::value::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum KeyOrder {
    Insertion,
    Sorted,
}

impl Value {
    /// Writes this value to `writer` and returns the number of bytes written.
    ///
    /// Dictionaries are written in their insertion order, so a parsed document
    /// encodes back to the same bytes it was read from. The writer is flushed
    /// before returning.
    ///
    /// # Errors
    ///
    /// Returns [`BencodeError::WriteFailed`] if the writer rejects a write or
    /// the final flush. Bytes written before the failure stay in the writer.
    ///
    /// ```
    /// use bencodec::bencode::Value;
    ///
    /// let mut out = Vec::new();
    /// let written = Value::string("hello").encode(&mut out).unwrap();
    /// assert_eq!(written, 7);
    /// assert_eq!(out, b"5:hello");
    /// ```
    pub fn encode<W: Write>(&self, writer: &mut W) -> Result<usize, BencodeError> {
        encode_flushed(self, writer, KeyOrder::Insertion)
    }

    /// Like [`Value::encode`], but writes every dictionary with its keys in
    /// ascending byte order, the canonical form other bencode consumers
    /// expect for hashing.
    pub fn encode_canonical<W: Write>(&self, writer: &mut W) -> Result<usize, BencodeError> {
        encode_flushed(self, writer, KeyOrder::Sorted)
    }
}

/// Encodes a bencode value to a byte vector, keeping dictionary insertion order.
///
/// # Examples
///
/// ```
/// use bencodec::bencode::{encode, Dict, Value};
/// use bytes::Bytes;
///
/// // Encode an integer
/// let encoded = encode(&Value::Integer(42)).unwrap();
/// assert_eq!(encoded, b"i42e");
///
/// // Encode a list
/// let list = Value::List(vec![Value::Integer(1), Value::string("two")]);
/// assert_eq!(encode(&list).unwrap(), b"li1e3:twoe");
///
/// // Encode a dictionary
/// let mut dict = Dict::new();
/// dict.insert(Bytes::from_static(b"b"), Value::Integer(2));
/// dict.insert(Bytes::from_static(b"a"), Value::Integer(1));
/// assert_eq!(encode(&Value::Dict(dict)).unwrap(), b"d1:bi2e1:ai1ee");
/// ```
pub fn encode(value: &Value) -> Result<Vec<u8>, BencodeError> {
    let mut buf = Vec::new();
    encode_value(value, &mut buf, KeyOrder::Insertion)?;
    Ok(buf)
}

/// Encodes a bencode value to a byte vector with every dictionary's keys sorted.
///
/// ```
/// use bencodec::bencode::{decode, encode_canonical};
///
/// let value = decode(b"d1:bi2e1:ai1ee").unwrap();
/// assert_eq!(encode_canonical(&value).unwrap(), b"d1:ai1e1:bi2ee");
/// ```
pub fn encode_canonical(value: &Value) -> Result<Vec<u8>, BencodeError> {
    let mut buf = Vec::new();
    encode_value(value, &mut buf, KeyOrder::Sorted)?;
    Ok(buf)
}

fn encode_flushed<W: Write>(
    value: &Value,
    writer: &mut W,
    order: KeyOrder,
) -> Result<usize, BencodeError> {
    let written = encode_value(value, writer, order)?;
    writer.flush().map_err(BencodeError::WriteFailed)?;
    Ok(written)
}

fn encode_value<W: Write>(
    value: &Value,
    writer: &mut W,
    order: KeyOrder,
) -> Result<usize, BencodeError> {
    match value {
        Value::Integer(i) => encode_int(writer, *i),
        Value::Bytes(b) => encode_string(writer, b),
        Value::List(l) => {
            let mut written = write_all(writer, b"l")?;
            for item in l {
                written += encode_value(item, writer, order)?;
            }
            written += write_all(writer, b"e")?;
            Ok(written)
        }
        Value::Dict(d) => {
            let mut entries: Vec<_> = d.iter().collect();
            if order == KeyOrder::Sorted {
                entries.sort_by(|(a, _), (b, _)| a.cmp(b));
            }

            let mut written = write_all(writer, b"d")?;
            for (key, val) in entries {
                written += encode_string(writer, key)?;
                written += encode_value(val, writer, order)?;
            }
            written += write_all(writer, b"e")?;
            Ok(written)
        }
    }
}
