use std::io::{self, BufRead, ErrorKind};

use super::error::BencodeError;

/// Returns the next byte without consuming it, or `None` at end of input.
pub(super) fn peek_byte<R: BufRead>(reader: &mut R) -> Result<Option<u8>, BencodeError> {
    loop {
        match reader.fill_buf() {
            Ok(buf) => return Ok(buf.first().copied()),
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(BencodeError::ReadFailed(e)),
        }
    }
}

/// Consumes and returns the next byte, or `None` at end of input.
pub(super) fn next_byte<R: BufRead>(reader: &mut R) -> Result<Option<u8>, BencodeError> {
    let byte = peek_byte(reader)?;
    if byte.is_some() {
        reader.consume(1);
    }
    Ok(byte)
}

/// Consumes the next byte, treating end of input as truncation.
pub(super) fn expect_byte<R: BufRead>(reader: &mut R) -> Result<u8, BencodeError> {
    next_byte(reader)?.ok_or(BencodeError::UnexpectedEof)
}

pub(super) fn write_all<W: io::Write>(writer: &mut W, buf: &[u8]) -> Result<usize, BencodeError> {
    writer.write_all(buf).map_err(BencodeError::WriteFailed)?;
    Ok(buf.len())
}
