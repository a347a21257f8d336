//! RESP (Redis Serialization Protocol) Data Types
//!
//! This module defines the values the decoder produces.
//!
//! ## Protocol Format
//!
//! Each RESP value starts with a type prefix byte. The decoder interprets three
//! of them:
//! - `:` Integer
//! - `$` Bulk String
//! - `*` Array
//!
//! Any other prefix is kept as [`RespValue::Unrecognized`] without touching
//! the bytes that follow it.
//!
//! All length, count and integer tokens are terminated with CRLF (`\r\n`).
//!
//! ## Examples
//!
//! Integer: `:1000\r\n`
//! Bulk String: `$4\r\nECHO\r\n`
//! Array: `*2\r\n$4\r\nECHO\r\n$3\r\nhey\r\n`

use bytes::Bytes;
use std::fmt;

/// Carriage return, the first byte of every token terminator
pub const CR: u8 = b'\r';

/// Line feed, the second byte of every token terminator
pub const LF: u8 = b'\n';

/// The CRLF terminator used in RESP protocol
pub const CRLF: &[u8] = b"\r\n";

/// RESP protocol type prefixes
pub mod prefix {
    pub const INTEGER: u8 = b':';
    pub const BULK_STRING: u8 = b'$';
    pub const ARRAY: u8 = b'*';
}

/// A decoded RESP value.
///
/// A value tree is built by a single decode call and owns all of its
/// elements; nothing in it refers back into the input buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RespValue {
    /// Binary-safe, length-prefixed string.
    /// Format: `$<length>\r\n<data>\r\n`
    BulkString(Bytes),

    /// 64-bit signed integer.
    /// Format: `:[+|-]<digits>\r\n`
    Integer(i64),

    /// Ordered sequence of values, possibly nested.
    /// Format: `*<count>\r\n<element1><element2>...`
    Array(Vec<RespValue>),

    /// A type prefix the decoder has no rule for. Only the prefix byte
    /// itself was consumed; no payload was decoded.
    Unrecognized(u8),
}

impl RespValue {
    /// Creates a new bulk string value.
    ///
    /// # Example
    /// ```
    /// use flashresp::protocol::types::RespValue;
    /// let bulk = RespValue::bulk_string("ECHO");
    /// assert_eq!(bulk.as_str(), Some("ECHO"));
    /// ```
    pub fn bulk_string(data: impl Into<Bytes>) -> Self {
        RespValue::BulkString(data.into())
    }

    /// Creates a new integer value.
    pub fn integer(n: i64) -> Self {
        RespValue::Integer(n)
    }

    /// Creates an array value.
    pub fn array(values: Vec<RespValue>) -> Self {
        RespValue::Array(values)
    }

    /// Returns the type prefix byte this value was decoded from.
    ///
    /// # Example
    /// ```
    /// use flashresp::protocol::types::{prefix, RespValue};
    /// assert_eq!(RespValue::integer(7).tag(), prefix::INTEGER);
    /// assert_eq!(RespValue::Unrecognized(b'+').tag(), b'+');
    /// ```
    pub fn tag(&self) -> u8 {
        match self {
            RespValue::BulkString(_) => prefix::BULK_STRING,
            RespValue::Integer(_) => prefix::INTEGER,
            RespValue::Array(_) => prefix::ARRAY,
            RespValue::Unrecognized(tag) => *tag,
        }
    }

    /// Returns true if the decoder had no rule for this value's prefix.
    pub fn is_unrecognized(&self) -> bool {
        matches!(self, RespValue::Unrecognized(_))
    }

    /// Attempts to interpret a bulk string payload as UTF-8 text.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            RespValue::BulkString(b) => std::str::from_utf8(b).ok(),
            _ => None,
        }
    }

    /// Attempts to extract the inner bytes from BulkString.
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            RespValue::BulkString(b) => Some(b),
            _ => None,
        }
    }

    /// Attempts to extract the inner integer.
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            RespValue::Integer(n) => Some(*n),
            _ => None,
        }
    }

    /// Attempts to extract the inner array.
    pub fn as_array(&self) -> Option<&[RespValue]> {
        match self {
            RespValue::Array(arr) => Some(arr),
            _ => None,
        }
    }

    /// Consumes self and returns the inner array if this is an Array variant.
    pub fn into_array(self) -> Option<Vec<RespValue>> {
        match self {
            RespValue::Array(arr) => Some(arr),
            _ => None,
        }
    }
}

impl fmt::Display for RespValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RespValue::BulkString(data) => {
                if let Ok(s) = std::str::from_utf8(data) {
                    write!(f, "\"{}\"", s.escape_debug())
                } else {
                    write!(f, "(binary data, {} bytes)", data.len())
                }
            }
            RespValue::Integer(n) => write!(f, "(integer) {}", n),
            RespValue::Array(values) => {
                if values.is_empty() {
                    write!(f, "(empty array)")
                } else {
                    for (i, v) in values.iter().enumerate() {
                        if i > 0 {
                            writeln!(f)?;
                        }
                        let label = format!("{}) ", i + 1);
                        let indent = " ".repeat(label.len());
                        let rendered = v.to_string();

                        // Nested arrays span several lines; line them up
                        // under the first one.
                        for (n, line) in rendered.lines().enumerate() {
                            if n == 0 {
                                write!(f, "{}{}", label, line)?;
                            } else {
                                write!(f, "\n{}{}", indent, line)?;
                            }
                        }
                    }
                    Ok(())
                }
            }
            RespValue::Unrecognized(tag) => {
                write!(f, "(unrecognized '{}')", char::from(*tag).escape_default())
            }
        }
    }
}
