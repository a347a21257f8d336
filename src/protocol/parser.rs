//! RESP Protocol Decoder
//!
//! This module implements a recursive-descent decoder for the RESP protocol.
//! It turns one complete, in-memory buffer into a [`RespValue`] tree.
//!
//! ## How the Decoder Works
//!
//! A fresh cursor is created for every call. The decoder reads one type
//! prefix byte and dispatches on it:
//!
//! ```text
//! parse ──> parse_value ──┬── '$' ──> parse_bulk_string ──┐
//!              ▲          ├── ':' ──> parse_integer ──────┼──> read_line
//!              │          ├── '*' ──> parse_array ────────┘
//!              │          │               │
//!              └──────────┼───────────────┘ (once per element)
//!                         └── other ──> Unrecognized(tag)
//! ```
//!
//! Every length, count and integer token is framed by `read_line`, which
//! accepts tokens of any digit width.
//!
//! ## Results
//!
//! - `Ok(value)` - A complete top-level value was decoded
//! - `Err(ParseError::EndOfInput)` - The buffer ended early; retry from
//!   scratch once more bytes have arrived
//! - `Err(e)` - The input violates the protocol
//!
//! Bytes after the top-level value are left alone. [`RespParser::decode`]
//! reports how many bytes were consumed so callers can frame several
//! values in one buffer.

use crate::protocol::types::{prefix, RespValue, CR, CRLF, LF};
use bytes::{Buf, Bytes};
use std::io::Cursor;
use thiserror::Error;
use tracing::{debug, trace};

/// Errors that can occur during RESP decoding.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The buffer ended before a required byte was available
    #[error("unexpected end of input")]
    EndOfInput,

    /// A length, count or integer token is not a valid decimal integer
    #[error("invalid integer: {0:?}")]
    InvalidInteger(String),

    /// Bulk string length is negative
    #[error("invalid bulk string length: {0}")]
    InvalidBulkLength(i64),

    /// Array length is negative
    #[error("invalid array length: {0}")]
    InvalidArrayLength(i64),

    /// The payload framed by the peer does not match the declared length
    #[error("bulk string length mismatch: declared {declared}, found {actual}")]
    LengthMismatch { declared: usize, actual: usize },

    /// Protocol violation (CR not followed by LF, etc.)
    #[error("protocol error: {0}")]
    ProtocolError(String),

    /// The bulk string exceeds maximum allowed size
    #[error("message too large: {size} bytes (max: {max})")]
    MessageTooLarge { size: usize, max: usize },

    /// The array declares more elements than allowed
    #[error("array too long: {len} elements (max: {max})")]
    ArrayTooLong { len: usize, max: usize },

    /// Arrays are nested deeper than allowed
    #[error("maximum nesting depth exceeded: {0}")]
    NestingTooDeep(usize),
}

impl ParseError {
    /// Returns true if decoding failed only because the buffer is incomplete.
    ///
    /// Every other error is a protocol violation that more bytes cannot fix.
    pub fn is_incomplete(&self) -> bool {
        matches!(self, ParseError::EndOfInput)
    }
}

/// Result type for parsing operations.
pub type ParseResult<T> = Result<T, ParseError>;

/// Maximum size for a single bulk string (512 MB, same as Redis)
pub const MAX_BULK_SIZE: usize = 512 * 1024 * 1024;

/// Maximum number of elements in one array
pub const MAX_ARRAY_LEN: usize = 1_048_576;

/// Maximum array nesting depth (prevent stack overflow)
pub const MAX_NESTING_DEPTH: usize = 32;

/// Limits enforced while decoding.
///
/// Every limit is checked as soon as the offending length, count or prefix
/// has been read, before anything is allocated for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParserConfig {
    /// Largest accepted bulk string payload, in bytes (default: 512 MB)
    pub max_bulk_size: usize,

    /// Largest accepted array element count (default: 1,048,576)
    pub max_array_len: usize,

    /// Number of arrays that may be nested inside each other (default: 32)
    pub max_depth: usize,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            max_bulk_size: MAX_BULK_SIZE,
            max_array_len: MAX_ARRAY_LEN,
            max_depth: MAX_NESTING_DEPTH,
        }
    }
}

impl ParserConfig {
    /// Sets the largest accepted bulk string payload, in bytes.
    pub fn with_max_bulk_size(mut self, max_bulk_size: usize) -> Self {
        self.max_bulk_size = max_bulk_size;
        self
    }

    /// Sets the largest accepted array element count.
    pub fn with_max_array_len(mut self, max_array_len: usize) -> Self {
        self.max_array_len = max_array_len;
        self
    }

    /// Sets how many arrays may be nested inside each other.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

/// A RESP decoder.
///
/// The parser only carries its limits. It keeps no state between calls, so
/// one instance can be shared freely across threads.
///
/// # Example
///
/// ```
/// use flashresp::protocol::parser::RespParser;
/// use flashresp::protocol::types::RespValue;
///
/// let parser = RespParser::new();
/// let value = parser.parse(b"*2\r\n$4\r\nECHO\r\n$3\r\nhey\r\n").unwrap();
///
/// assert_eq!(
///     value,
///     RespValue::array(vec![
///         RespValue::bulk_string("ECHO"),
///         RespValue::bulk_string("hey"),
///     ])
/// );
/// ```
#[derive(Debug, Clone, Default)]
pub struct RespParser {
    config: ParserConfig,
}

impl RespParser {
    /// Creates a new parser with the default limits.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a parser enforcing the given limits.
    pub fn with_config(config: ParserConfig) -> Self {
        Self { config }
    }

    /// Returns the limits this parser enforces.
    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Decodes exactly one top-level value from the start of `buf`.
    ///
    /// Trailing bytes after the value are ignored.
    pub fn parse(&self, buf: &[u8]) -> ParseResult<RespValue> {
        self.decode(buf).map(|(value, _)| value)
    }

    /// Decodes one top-level value and reports how many bytes it occupied.
    ///
    /// # Returns
    ///
    /// - `Ok((value, consumed))` - `buf[..consumed]` held the value
    /// - `Err(e)` - The first error encountered
    pub fn decode(&self, buf: &[u8]) -> ParseResult<(RespValue, usize)> {
        let mut cursor = Cursor::new(buf);
        let value = self.parse_value(&mut cursor, 0)?;
        let consumed = cursor.position() as usize;

        trace!(
            consumed = consumed,
            remaining = buf.len() - consumed,
            "Parsed value"
        );

        Ok((value, consumed))
    }

    /// Iterates over consecutive top-level values in `buf`.
    ///
    /// # Example
    ///
    /// ```
    /// use flashresp::protocol::parser::{ParseError, RespParser};
    /// use flashresp::protocol::types::RespValue;
    ///
    /// let parser = RespParser::new();
    /// let mut frames = parser.frames(b":1\r\n:2\r\n$5\r\nhel");
    ///
    /// assert_eq!(frames.next(), Some(Ok(RespValue::integer(1))));
    /// assert_eq!(frames.next(), Some(Ok(RespValue::integer(2))));
    /// assert_eq!(frames.offset(), 8);
    /// assert_eq!(frames.next(), Some(Err(ParseError::EndOfInput)));
    /// assert_eq!(frames.next(), None);
    /// ```
    pub fn frames<'p, 'a>(&'p self, buf: &'a [u8]) -> Frames<'p, 'a> {
        Frames {
            parser: self,
            buf,
            offset: 0,
            failed: false,
        }
    }

    /// Reads one type prefix and dispatches to the matching decoder.
    fn parse_value(&self, cursor: &mut Cursor<&[u8]>, depth: usize) -> ParseResult<RespValue> {
        match read_tag(cursor)? {
            prefix::BULK_STRING => self.parse_bulk_string(cursor),
            prefix::INTEGER => parse_integer(cursor).map(RespValue::Integer),
            prefix::ARRAY => self.parse_array(cursor, depth),
            tag => {
                debug!(
                    tag = %char::from(tag).escape_default(),
                    "Unrecognized type prefix, passing through"
                );
                Ok(RespValue::Unrecognized(tag))
            }
        }
    }

    /// Parses a bulk string: `$<length>\r\n<data>\r\n`
    fn parse_bulk_string(&self, cursor: &mut Cursor<&[u8]>) -> ParseResult<RespValue> {
        let length = read_length(cursor, ParseError::InvalidBulkLength)?;

        if length > self.config.max_bulk_size {
            debug!(size = length, max = self.config.max_bulk_size, "Bulk string too large");
            return Err(ParseError::MessageTooLarge {
                size: length,
                max: self.config.max_bulk_size,
            });
        }

        let data = read_payload(cursor, length)?;
        Ok(RespValue::BulkString(Bytes::copy_from_slice(data)))
    }

    /// Parses an array: `*<count>\r\n<elements...>`
    fn parse_array(&self, cursor: &mut Cursor<&[u8]>, depth: usize) -> ParseResult<RespValue> {
        if depth >= self.config.max_depth {
            debug!(max = self.config.max_depth, "Array nesting too deep");
            return Err(ParseError::NestingTooDeep(self.config.max_depth));
        }

        let count = read_length(cursor, ParseError::InvalidArrayLength)?;

        if count > self.config.max_array_len {
            debug!(len = count, max = self.config.max_array_len, "Array too long");
            return Err(ParseError::ArrayTooLong {
                len: count,
                max: self.config.max_array_len,
            });
        }

        // Every element takes at least one byte.
        let mut elements = Vec::with_capacity(count.min(cursor.remaining()));

        for _ in 0..count {
            elements.push(self.parse_value(cursor, depth + 1)?);
        }

        Ok(RespValue::Array(elements))
    }
}

/// Iterator over consecutive top-level values in one buffer.
///
/// Created by [`RespParser::frames`]. Iteration stops after the first error.
#[derive(Debug)]
pub struct Frames<'p, 'a> {
    parser: &'p RespParser,
    buf: &'a [u8],
    offset: usize,
    failed: bool,
}

impl Frames<'_, '_> {
    /// Byte offset of the first byte not yet decoded.
    ///
    /// After an error this is the start of the frame that failed.
    pub fn offset(&self) -> usize {
        self.offset
    }
}

impl Iterator for Frames<'_, '_> {
    type Item = ParseResult<RespValue>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.offset >= self.buf.len() {
            return None;
        }

        match self.parser.decode(&self.buf[self.offset..]) {
            Ok((value, consumed)) => {
                self.offset += consumed;
                Some(Ok(value))
            }
            Err(e) => {
                self.failed = true;
                Some(Err(e))
            }
        }
    }
}

/// Returns the unread part of the cursor's buffer.
#[inline]
fn unread<'a>(cursor: &Cursor<&'a [u8]>) -> &'a [u8] {
    let buf: &'a [u8] = *cursor.get_ref();
    let start = (cursor.position() as usize).min(buf.len());
    &buf[start..]
}

/// Reads the one-byte type prefix.
#[inline]
fn read_tag(cursor: &mut Cursor<&[u8]>) -> ParseResult<u8> {
    if !cursor.has_remaining() {
        return Err(ParseError::EndOfInput);
    }
    Ok(cursor.get_u8())
}

/// Reads a token up to CR, consumes the CRLF and returns the token.
fn read_line<'a>(cursor: &mut Cursor<&'a [u8]>) -> ParseResult<&'a [u8]> {
    let rest = unread(cursor);
    let cr = rest
        .iter()
        .position(|&b| b == CR)
        .ok_or(ParseError::EndOfInput)?;

    match rest.get(cr + 1) {
        Some(&LF) => {
            cursor.advance(cr + CRLF.len());
            Ok(&rest[..cr])
        }
        Some(&other) => Err(ParseError::ProtocolError(format!(
            "expected LF after CR, found {:#04x}",
            other
        ))),
        None => Err(ParseError::EndOfInput),
    }
}

/// Parses an integer token: `[+|-]<digits>\r\n`
fn parse_integer(cursor: &mut Cursor<&[u8]>) -> ParseResult<i64> {
    let token = read_line(cursor)?;
    std::str::from_utf8(token)
        .ok()
        .and_then(|s| s.parse::<i64>().ok())
        .ok_or_else(|| ParseError::InvalidInteger(String::from_utf8_lossy(token).into_owned()))
}

/// Parses a non-negative length or count token.
fn read_length(cursor: &mut Cursor<&[u8]>, negative: fn(i64) -> ParseError) -> ParseResult<usize> {
    let n = parse_integer(cursor)?;
    usize::try_from(n).map_err(|_| negative(n))
}

/// Reads exactly `length` payload bytes followed by CRLF.
///
/// A payload the peer visibly framed at some other length is a
/// [`ParseError::LengthMismatch`]; a payload that is merely cut short by
/// the end of the buffer is [`ParseError::EndOfInput`].
fn read_payload<'a>(cursor: &mut Cursor<&'a [u8]>, length: usize) -> ParseResult<&'a [u8]> {
    let rest = unread(cursor);
    let mismatch = || ParseError::LengthMismatch {
        declared: length,
        actual: find_crlf(rest).unwrap_or(rest.len()),
    };

    if rest.len() < length {
        return Err(if rest.ends_with(CRLF) {
            mismatch()
        } else {
            ParseError::EndOfInput
        });
    }

    let (payload, tail) = rest.split_at(length);
    match tail {
        [CR, LF, ..] => {
            cursor.advance(length + CRLF.len());
            Ok(payload)
        }
        [] | [CR] => Err(ParseError::EndOfInput),
        _ => Err(mismatch()),
    }
}

/// Finds the position of CRLF in the buffer.
///
/// Returns the position of `\r` if found, or None if CRLF is not present.
#[inline]
fn find_crlf(buf: &[u8]) -> Option<usize> {
    buf.windows(CRLF.len()).position(|w| w == CRLF)
}

/// Decodes one value from `buf` with the default limits.
///
/// This is the main entry point for simple use cases.
pub fn parse(buf: &[u8]) -> ParseResult<RespValue> {
    RespParser::new().parse(buf)
}

/// Decodes one value from `buf` with the default limits, reporting the
/// number of bytes consumed.
pub fn parse_message(buf: &[u8]) -> ParseResult<(RespValue, usize)> {
    RespParser::new().decode(buf)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bulk(s: &str) -> RespValue {
        RespValue::BulkString(Bytes::copy_from_slice(s.as_bytes()))
    }

    #[test]
    fn test_parse_bulk_string() {
        let (value, consumed) = parse_message(b"$4\r\nECHO\r\n").unwrap();
        assert_eq!(value, bulk("ECHO"));
        assert_eq!(consumed, 10);
    }

    #[test]
    fn test_parse_echo_command() {
        let value = parse(b"*2\r\n$4\r\nECHO\r\n$3\r\nhey\r\n").unwrap();
        assert_eq!(value, RespValue::Array(vec![bulk("ECHO"), bulk("hey")]));
    }

    #[test]
    fn test_parse_integer() {
        assert_eq!(parse(b":123\r\n").unwrap(), RespValue::Integer(123));
        assert_eq!(parse(b":-5\r\n").unwrap(), RespValue::Integer(-5));
        assert_eq!(parse(b":+42\r\n").unwrap(), RespValue::Integer(42));
        assert_eq!(parse(b":0\r\n").unwrap(), RespValue::Integer(0));
        assert_eq!(
            parse(b":-9223372036854775808\r\n").unwrap(),
            RespValue::Integer(i64::MIN)
        );
    }

    #[test]
    fn test_parse_integer_overflow() {
        let result = parse(b":9223372036854775808\r\n");
        assert_eq!(
            result,
            Err(ParseError::InvalidInteger("9223372036854775808".to_string()))
        );
    }

    #[test]
    fn test_parse_invalid_integer() {
        for input in [
            &b":not_a_number\r\n"[..],
            b":\r\n",
            b":-\r\n",
            b":1.5\r\n",
            b": 1\r\n",
            b":\xff\r\n",
        ] {
            assert!(
                matches!(parse(input), Err(ParseError::InvalidInteger(_))),
                "input {:?}",
                input
            );
        }
    }

    #[test]
    fn test_parse_length_mismatch_short_payload() {
        let result = parse(b"$5\r\nhi\r\n");
        assert_eq!(
            result,
            Err(ParseError::LengthMismatch {
                declared: 5,
                actual: 2
            })
        );
    }

    #[test]
    fn test_parse_length_mismatch_long_payload() {
        let result = parse(b"$2\r\nhello\r\n");
        assert_eq!(
            result,
            Err(ParseError::LengthMismatch {
                declared: 2,
                actual: 5
            })
        );
    }

    #[test]
    fn test_parse_length_mismatch_inside_array() {
        let result = parse(b"*2\r\n$5\r\nhi\r\n:1\r\n");
        assert_eq!(
            result,
            Err(ParseError::LengthMismatch {
                declared: 5,
                actual: 2
            })
        );
    }

    #[test]
    fn test_parse_nested_array() {
        let value = parse(b"*1\r\n*1\r\n:7\r\n").unwrap();
        assert_eq!(
            value,
            RespValue::Array(vec![RespValue::Array(vec![RespValue::Integer(7)])])
        );
    }

    #[test]
    fn test_parse_mixed_nested_array_preserves_order() {
        let input = b"*3\r\n:1\r\n*2\r\n$1\r\na\r\n:-2\r\n$3\r\nend\r\n";
        let value = parse(input).unwrap();
        assert_eq!(
            value,
            RespValue::Array(vec![
                RespValue::Integer(1),
                RespValue::Array(vec![bulk("a"), RespValue::Integer(-2)]),
                bulk("end"),
            ])
        );
    }

    #[test]
    fn test_array_elements_match_standalone_parse() {
        let parts: [&[u8]; 3] = [b"$3\r\nSET\r\n", b":10\r\n", b"*1\r\n$1\r\nk\r\n"];
        let mut input = b"*3\r\n".to_vec();
        for part in parts {
            input.extend_from_slice(part);
        }

        let elements = parse(&input).unwrap().into_array().unwrap();
        assert_eq!(elements.len(), parts.len());
        for (element, part) in elements.iter().zip(parts) {
            assert_eq!(element, &parse(part).unwrap());
        }
    }

    #[test]
    fn test_multi_digit_lengths() {
        let value = parse(b"$12\r\nhello world!\r\n").unwrap();
        assert_eq!(value, bulk("hello world!"));

        let mut input = b"*12\r\n".to_vec();
        for i in 0..12 {
            input.extend_from_slice(format!(":{}\r\n", i).as_bytes());
        }
        let elements = parse(&input).unwrap().into_array().unwrap();
        assert_eq!(elements.len(), 12);
        assert_eq!(elements[11], RespValue::Integer(11));
    }

    #[test]
    fn test_parse_empty_bulk_string() {
        let (value, consumed) = parse_message(b"$0\r\n\r\n").unwrap();
        assert_eq!(value, bulk(""));
        assert_eq!(consumed, 6);
    }

    #[test]
    fn test_parse_empty_array_reads_nothing_more() {
        let (value, consumed) = parse_message(b"*0\r\n:1\r\n").unwrap();
        assert_eq!(value, RespValue::Array(vec![]));
        assert_eq!(consumed, 4);
    }

    #[test]
    fn test_binary_safe_bulk_string() {
        let value = parse(b"$6\r\nhe\r\n\x00o\r\n").unwrap();
        assert_eq!(
            value,
            RespValue::BulkString(Bytes::from_static(b"he\r\n\x00o"))
        );
    }

    #[test]
    fn test_trailing_bytes_are_not_consumed() {
        let (value, consumed) = parse_message(b":1\r\ngarbage").unwrap();
        assert_eq!(value, RespValue::Integer(1));
        assert_eq!(consumed, 4);
    }

    #[test]
    fn test_end_of_input() {
        for input in [
            &b""[..],
            b"$",
            b"$5",
            b"$5\r",
            b"$5\r\nhel",
            b"$5\r\nhello",
            b"$5\r\nhello\r",
            b"$0\r\n",
            b":12",
            b"*2\r\n:1\r\n",
            b"*1\r\n*1\r\n",
        ] {
            assert_eq!(parse(input), Err(ParseError::EndOfInput), "input {:?}", input);
        }
    }

    #[test]
    fn test_end_of_input_is_distinct_from_mismatch() {
        let incomplete = parse(b"$5\r\nhel").unwrap_err();
        let mismatch = parse(b"$5\r\nhi\r\n").unwrap_err();

        assert!(incomplete.is_incomplete());
        assert!(!mismatch.is_incomplete());
        assert_ne!(incomplete, mismatch);
    }

    #[test]
    fn test_cr_without_lf() {
        let result = parse(b":1\rx\n");
        assert!(matches!(result, Err(ParseError::ProtocolError(_))));
        assert!(!result.unwrap_err().is_incomplete());
    }

    #[test]
    fn test_negative_lengths_are_rejected() {
        assert_eq!(parse(b"$-1\r\n"), Err(ParseError::InvalidBulkLength(-1)));
        assert_eq!(parse(b"*-1\r\n"), Err(ParseError::InvalidArrayLength(-1)));
        assert!(matches!(
            parse(b"$x\r\nabc\r\n"),
            Err(ParseError::InvalidInteger(_))
        ));
        assert!(matches!(
            parse(b"*two\r\n"),
            Err(ParseError::InvalidInteger(_))
        ));
    }

    #[test]
    fn test_failed_element_discards_array() {
        let result = parse(b"*3\r\n:1\r\n:oops\r\n:3\r\n");
        assert_eq!(result, Err(ParseError::InvalidInteger("oops".to_string())));
    }

    #[test]
    fn test_unrecognized_tag_passes_through() {
        // Only the prefix byte is consumed; the payload is left undecoded.
        let (value, consumed) = parse_message(b"+OK\r\n").unwrap();
        assert_eq!(value, RespValue::Unrecognized(b'+'));
        assert_eq!(consumed, 1);
        assert!(value.is_unrecognized());
        assert_eq!(value.as_str(), None);
    }

    #[test]
    fn test_unrecognized_tag_inside_array() {
        let value = parse(b"*2\r\n%:1\r\n").unwrap();
        assert_eq!(
            value,
            RespValue::Array(vec![RespValue::Unrecognized(b'%'), RespValue::Integer(1)])
        );
    }

    #[test]
    fn test_nesting_depth_limit() {
        let parser = RespParser::with_config(ParserConfig::default().with_max_depth(2));
        assert!(parser.parse(b"*1\r\n*1\r\n:7\r\n").is_ok());
        assert_eq!(
            parser.parse(b"*1\r\n*1\r\n*0\r\n"),
            Err(ParseError::NestingTooDeep(2))
        );
    }

    #[test]
    fn test_default_nesting_depth() {
        let nested = |levels: usize| {
            let mut input = b"*1\r\n".repeat(levels);
            input.extend_from_slice(b":1\r\n");
            input
        };

        assert!(parse(&nested(MAX_NESTING_DEPTH)).is_ok());
        assert_eq!(
            parse(&nested(MAX_NESTING_DEPTH + 1)),
            Err(ParseError::NestingTooDeep(MAX_NESTING_DEPTH))
        );
    }

    #[test]
    fn test_bulk_size_limit() {
        let parser = RespParser::with_config(ParserConfig::default().with_max_bulk_size(4));
        assert_eq!(parser.parse(b"$4\r\nECHO\r\n").unwrap(), bulk("ECHO"));
        assert_eq!(
            parser.parse(b"$5\r\nhello\r\n"),
            Err(ParseError::MessageTooLarge { size: 5, max: 4 })
        );
    }

    #[test]
    fn test_array_len_limit() {
        let parser = RespParser::with_config(ParserConfig::default().with_max_array_len(2));
        assert_eq!(
            parser.parse(b"*3\r\n:1\r\n:2\r\n:3\r\n"),
            Err(ParseError::ArrayTooLong { len: 3, max: 2 })
        );
    }

    #[test]
    fn test_huge_declared_count_does_not_preallocate() {
        assert_eq!(parse(b"*1000000\r\n:1\r\n"), Err(ParseError::EndOfInput));
    }

    #[test]
    fn test_frames() {
        let parser = RespParser::new();
        let input = b"*2\r\n$4\r\nECHO\r\n$3\r\nhey\r\n:5\r\n";
        let values: Vec<_> = parser.frames(input).collect::<ParseResult<_>>().unwrap();

        assert_eq!(
            values,
            vec![
                RespValue::Array(vec![bulk("ECHO"), bulk("hey")]),
                RespValue::Integer(5),
            ]
        );
    }

    #[test]
    fn test_frames_stop_after_error() {
        let parser = RespParser::new();
        let mut frames = parser.frames(b":1\r\n$5\r\nhi\r\n:2\r\n");

        assert_eq!(frames.next(), Some(Ok(RespValue::Integer(1))));
        assert!(matches!(
            frames.next(),
            Some(Err(ParseError::LengthMismatch { .. }))
        ));
        assert_eq!(frames.offset(), 4);
        assert_eq!(frames.next(), None);
    }

    #[test]
    fn test_frames_usable_from_crate_root() {
        let parser = crate::RespParser::new();
        let frames: crate::Frames<'_, '_> = parser.frames(b":1\r\n:2\r\n");
        assert_eq!(frames.filter(Result::is_ok).count(), 2);
    }

    #[test]
    fn test_concurrent_decodes_are_independent() {
        let parser = &RespParser::new();
        let inputs: Vec<Vec<u8>> = (0..8)
            .map(|i| format!("*2\r\n:{}\r\n$3\r\nkey\r\n", i).into_bytes())
            .collect();

        std::thread::scope(|s| {
            let handles: Vec<_> = inputs
                .iter()
                .map(|input| s.spawn(move || parser.parse(input)))
                .collect();

            for (i, handle) in handles.into_iter().enumerate() {
                let value = handle.join().unwrap().unwrap();
                assert_eq!(
                    value,
                    RespValue::Array(vec![RespValue::Integer(i as i64), bulk("key")])
                );
            }
        });
    }
}
