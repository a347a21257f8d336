//! # FlashRESP - A RESP Decoder
//!
//! FlashRESP turns the raw bytes a Redis-compatible server receives from a
//! client into a typed value tree. It decodes bulk strings, integers and
//! arrays (nested to any configured depth) from a complete in-memory buffer.
//!
//! ## Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────────┐
//! │                        RespParser::parse                      │
//! │                               │                               │
//! │                               ▼                               │
//! │                    ┌─────────────────────┐                    │
//! │            ┌──────>│  Type dispatcher    │──────┐             │
//! │            │       └──┬───────┬───────┬──┘      │             │
//! │            │          │       │       │         ▼             │
//! │            │        '$'     ':'     '*'   Unrecognized(tag)   │
//! │            │          ▼       ▼       ▼                       │
//! │            │       ┌──────┐┌──────┐┌──────┐                   │
//! │            │       │ Bulk ││ Int  ││Array │                   │
//! │            │       └──┬───┘└──┬───┘└──┬───┘                   │
//! │            │          └───────┼───────┤                       │
//! │            │                  ▼       │                       │
//! │            │           ┌────────────┐ │                       │
//! │            │           │ Line reader│ │                       │
//! │            │           └────────────┘ │                       │
//! │            └──────────────────────────┘  (once per element)   │
//! └───────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```
//! use flashresp::{parse, ParseError, RespValue};
//!
//! let value = parse(b"*1\r\n*1\r\n:7\r\n").unwrap();
//! assert_eq!(
//!     value,
//!     RespValue::array(vec![RespValue::array(vec![RespValue::integer(7)])])
//! );
//!
//! // An incomplete buffer and a malformed one are told apart.
//! assert!(parse(b"$5\r\nhel").unwrap_err().is_incomplete());
//! assert!(matches!(
//!     parse(b"$5\r\nhi\r\n"),
//!     Err(ParseError::LengthMismatch { declared: 5, actual: 2 })
//! ));
//! ```
//!
//! ## Design Highlights
//!
//! ### No Shared State
//!
//! Each call builds its own cursor over the caller's buffer. A `RespParser`
//! only carries its limits, so any number of threads can decode
//! independent buffers at once.
//!
//! ### Bounded Input
//!
//! Bulk string size, array length and nesting depth are all capped by
//! [`ParserConfig`], since the structure being decoded is peer controlled.
//!
//! ### Unknown Prefixes
//!
//! A type prefix without a decoding rule is returned as
//! [`RespValue::Unrecognized`] instead of an error. Callers must check for
//! it before interpreting a value.

pub mod protocol;

// Re-export commonly used types for convenience
pub use protocol::{
    parse, parse_message, Frames, ParseError, ParseResult, ParserConfig, RespParser, RespValue,
};

/// Version of FlashRESP
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
