//! RESP Protocol Implementation
//!
//! This module decodes the Redis Serialization Protocol (RESP) into typed values.
//!
//! ## Overview
//!
//! RESP is a simple, binary-safe protocol used by Redis for client-server communication.
//! Every value starts with a one-byte type prefix and every length, count and
//! integer token ends with CRLF.
//!
//! ## Modules
//!
//! - `types`: Defines the `RespValue` enum
//! - `parser`: Recursive-descent decoder for complete buffers
//!
//! ## Example
//!
//! ```
//! use flashresp::protocol::{parse_message, RespValue};
//!
//! let data = b"*2\r\n$4\r\nECHO\r\n$3\r\nhey\r\n";
//! let (value, consumed) = parse_message(data).unwrap();
//!
//! assert_eq!(consumed, data.len());
//! assert_eq!(value.as_array().map(|a| a.len()), Some(2));
//! assert_eq!(value.as_array().unwrap()[0], RespValue::bulk_string("ECHO"));
//! ```

pub mod parser;
pub mod types;

// Re-export commonly used types for convenience
pub use parser::{parse, parse_message, Frames, ParseError, ParseResult, ParserConfig, RespParser};
pub use types::RespValue;
