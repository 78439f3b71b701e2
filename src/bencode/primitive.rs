use std::io::{BufRead, Read, Write};

use bytes::Bytes;

use super::decimal::{read_decimal, write_decimal};
use super::error::BencodeError;
use super::stream::{next_byte, write_all};

/// Encodes a byte string as `<len>:<bytes>`, returning the bytes written.
///
/// ```
/// use bencodec::bencode::encode_string;
///
/// let mut out = Vec::new();
/// assert_eq!(encode_string(&mut out, b"hello").unwrap(), 7);
/// assert_eq!(out, b"5:hello");
/// ```
pub fn encode_string<W: Write>(writer: &mut W, value: &[u8]) -> Result<usize, BencodeError> {
    let len = i64::try_from(value.len()).map_err(|_| BencodeError::IntegerOverflow)?;
    let mut written = write_decimal(writer, len)?;
    written += write_all(writer, b":")?;
    written += write_all(writer, value)?;
    Ok(written)
}

/// Encodes an integer as `i<decimal>e`, returning the bytes written.
///
/// ```
/// use bencodec::bencode::encode_int;
///
/// let mut out = Vec::new();
/// assert_eq!(encode_int(&mut out, -123).unwrap(), 6);
/// assert_eq!(out, b"i-123e");
/// ```
pub fn encode_int<W: Write>(writer: &mut W, value: i64) -> Result<usize, BencodeError> {
    let mut written = write_all(writer, b"i")?;
    written += write_decimal(writer, value)?;
    written += write_all(writer, b"e")?;
    Ok(written)
}

/// Decodes a `<len>:<bytes>` string.
///
/// The payload is read through [`Read::take`], so a length prefix larger than
/// the remaining input fails with [`BencodeError::UnexpectedEof`] without
/// allocating the advertised size up front.
pub fn decode_string<R: BufRead>(reader: &mut R) -> Result<Bytes, BencodeError> {
    let (len, read) = read_decimal(reader)?;
    if read == 0 {
        return Err(BencodeError::ExpectedNumber);
    }
    if len < 0 {
        return Err(BencodeError::InvalidStringLength(len));
    }

    match next_byte(reader)? {
        Some(b':') => {}
        Some(_) => return Err(BencodeError::ExpectedColon),
        None => return Err(BencodeError::UnexpectedEof),
    }

    // len is non-negative, so the cast is lossless.
    let len = len as u64;
    let mut buf = Vec::new();
    reader
        .by_ref()
        .take(len)
        .read_to_end(&mut buf)
        .map_err(BencodeError::ReadFailed)?;

    if (buf.len() as u64) < len {
        return Err(BencodeError::UnexpectedEof);
    }

    Ok(Bytes::from(buf))
}

/// Decodes an `i<decimal>e` integer.
///
/// An integer with no digits (`ie`) is rejected with
/// [`BencodeError::ExpectedNumber`].
pub fn decode_int<R: BufRead>(reader: &mut R) -> Result<i64, BencodeError> {
    match next_byte(reader)? {
        Some(b'i') => {}
        Some(_) => return Err(BencodeError::ExpectedCharI),
        None => return Err(BencodeError::UnexpectedEof),
    }

    let (value, read) = read_decimal(reader)?;
    if read == 0 {
        return Err(BencodeError::ExpectedNumber);
    }

    match next_byte(reader)? {
        Some(b'e') => Ok(value),
        _ => Err(BencodeError::ExpectedCharE),
    }
}
