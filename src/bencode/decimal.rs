use std::io::{BufRead, Write};

use super::error::BencodeError;
use super::stream::{peek_byte, write_all};

// Enough room for "-9223372036854775808".
const MAX_DECIMAL_LEN: usize = 20;

/// Writes the ASCII decimal form of `value` and returns the number of bytes written.
///
/// Zero is written as a single `0`; negative values get a leading `-`. No
/// other padding or sign is ever produced.
///
/// # Examples
///
/// ```
/// use bencodec::bencode::write_decimal;
///
/// let mut out = Vec::new();
/// assert_eq!(write_decimal(&mut out, -120).unwrap(), 4);
/// assert_eq!(out, b"-120");
/// ```
pub fn write_decimal<W: Write>(writer: &mut W, value: i64) -> Result<usize, BencodeError> {
    let mut buf = [0u8; MAX_DECIMAL_LEN];
    let mut pos = buf.len();
    let mut rest = value.unsigned_abs();

    loop {
        pos -= 1;
        buf[pos] = b'0' + (rest % 10) as u8;
        rest /= 10;
        if rest == 0 {
            break;
        }
    }

    if value < 0 {
        pos -= 1;
        buf[pos] = b'-';
    }

    write_all(writer, &buf[pos..])
}

/// Reads an optionally negative decimal number.
///
/// Returns the value and the number of bytes consumed. Reading stops at the
/// first byte that is not a digit, which is left unconsumed in the reader.
///
/// A length of zero means no digit was found (or the reader failed before
/// the first digit); callers must treat it as a decode failure rather than as
/// the value `0`.
///
/// # Errors
///
/// - [`BencodeError::IntegerOverflow`] if the digits do not fit in an `i64`.
/// - [`BencodeError::ReadFailed`] if the reader fails after digits were read.
pub fn read_decimal<R: BufRead>(reader: &mut R) -> Result<(i64, usize), BencodeError> {
    let negative = match peek_byte(reader) {
        Ok(Some(b'-')) => {
            reader.consume(1);
            true
        }
        Ok(_) => false,
        Err(_) => return Ok((0, 0)),
    };

    let mut value: i64 = 0;
    let mut digits = 0usize;

    loop {
        let byte = match peek_byte(reader) {
            Ok(byte) => byte,
            Err(_) if digits == 0 => return Ok((0, 0)),
            Err(e) => return Err(e),
        };

        let digit = match byte {
            Some(b @ b'0'..=b'9') => i64::from(b - b'0'),
            _ => break,
        };
        reader.consume(1);

        // Accumulate towards the sign so that i64::MIN is representable.
        value = value
            .checked_mul(10)
            .and_then(|v| {
                if negative {
                    v.checked_sub(digit)
                } else {
                    v.checked_add(digit)
                }
            })
            .ok_or(BencodeError::IntegerOverflow)?;
        digits += 1;
    }

    if digits == 0 {
        return Ok((0, 0));
    }

    Ok((value, digits + usize::from(negative)))
}
