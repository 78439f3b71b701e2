use std::io::BufRead;

use tracing::{debug, trace};

use super::error::BencodeError;
use super::primitive::{decode_int, decode_string};
use super::stream::{expect_byte, peek_byte};
use super::value::{Dict, Value};
use crate::constants::DEFAULT_MAX_DEPTH;

/// A recursive-descent bencode reader over any [`BufRead`] source.
///
/// The parser dispatches on one byte of lookahead and never consumes more
/// input than the value it returns, so several values can be read back to
/// back from one stream.
///
/// # Examples
///
/// ```
/// use bencodec::bencode::{Parser, Value};
///
/// let mut parser = Parser::new(&b"i1ei2e"[..]).max_depth(8);
/// assert_eq!(parser.parse().unwrap(), Value::Integer(1));
/// assert_eq!(parser.parse().unwrap(), Value::Integer(2));
/// ```
#[derive(Debug)]
pub struct Parser<R> {
    reader: R,
    max_depth: usize,
}

impl<R: BufRead> Parser<R> {
    /// Creates a parser with the default nesting limit of
    /// [`DEFAULT_MAX_DEPTH`](crate::constants::DEFAULT_MAX_DEPTH).
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Sets how many lists/dictionaries may be nested inside the top-level value.
    pub fn max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }

    /// Parses the next value from the source.
    ///
    /// # Errors
    ///
    /// Any grammar violation, truncation, read failure, or nesting beyond the
    /// configured limit.
    pub fn parse(&mut self) -> Result<Value, BencodeError> {
        self.parse_value(0)
    }

    /// Returns a mutable reference to the underlying reader.
    pub fn get_mut(&mut self) -> &mut R {
        &mut self.reader
    }

    /// Consumes the parser, returning the underlying reader.
    pub fn into_inner(self) -> R {
        self.reader
    }

    fn parse_value(&mut self, depth: usize) -> Result<Value, BencodeError> {
        match peek_byte(&mut self.reader)? {
            Some(b'0'..=b'9') => decode_string(&mut self.reader).map(Value::Bytes),
            Some(b'i') => decode_int(&mut self.reader).map(Value::Integer),
            Some(b'l') => self.parse_list(depth),
            Some(b'd') => self.parse_dict(depth),
            Some(c) => Err(BencodeError::UnexpectedChar(c as char)),
            None => Err(BencodeError::UnexpectedEof),
        }
    }

    fn parse_list(&mut self, depth: usize) -> Result<Value, BencodeError> {
        self.check_depth(depth)?;
        self.reader.consume(1);
        let mut list = Vec::new();

        while !self.at_end_marker()? {
            list.push(self.parse_value(depth + 1)?);
        }

        Ok(Value::List(list))
    }

    fn parse_dict(&mut self, depth: usize) -> Result<Value, BencodeError> {
        self.check_depth(depth)?;
        self.reader.consume(1);
        let mut dict = Dict::new();

        while !self.at_end_marker()? {
            let key = decode_string(&mut self.reader)?;
            let value = self.parse_value(depth + 1)?;
            if let Some(previous) = dict.insert(key, value) {
                trace!(?previous, "duplicate dictionary key, keeping the last value");
            }
        }

        Ok(Value::Dict(dict))
    }

    /// `depth` is the number of containers enclosing the one being opened.
    fn check_depth(&self, depth: usize) -> Result<(), BencodeError> {
        if depth > self.max_depth {
            debug!(limit = self.max_depth, "bencode nesting limit exceeded");
            return Err(BencodeError::DepthExceeded {
                limit: self.max_depth,
            });
        }
        Ok(())
    }

    /// Consumes a container's closing `e` if it is next.
    fn at_end_marker(&mut self) -> Result<bool, BencodeError> {
        match peek_byte(&mut self.reader)? {
            Some(b'e') => {
                expect_byte(&mut self.reader)?;
                Ok(true)
            }
            Some(_) => Ok(false),
            None => Err(BencodeError::UnexpectedEof),
        }
    }
}

/// Parses one value from a buffered reader.
///
/// Bytes after the value are left in the reader.
///
/// ```
/// use std::io::BufReader;
/// use bencodec::bencode::{parse, Value};
///
/// let value = parse(BufReader::new(&b"li123e6:archeri789ee"[..])).unwrap();
/// assert_eq!(value.as_list().map(|l| l.len()), Some(3));
/// ```
pub fn parse<R: BufRead>(reader: R) -> Result<Value, BencodeError> {
    Parser::new(reader).parse()
}

/// Decodes a complete bencode document held in memory.
///
/// Unlike [`parse`], the value must span the whole slice.
///
/// # Errors
///
/// Returns [`BencodeError::TrailingData`] if bytes remain after the value.
pub fn decode(data: &[u8]) -> Result<Value, BencodeError> {
    let mut rest = data;
    let value = Parser::new(&mut rest).parse()?;

    if !rest.is_empty() {
        return Err(BencodeError::TrailingData);
    }

    Ok(value)
}
