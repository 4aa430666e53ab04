//! Error types for MIME decoding
//!
//! None of these escape the top-level parse and extraction functions; they
//! are absorbed at the smallest scope and logged.

use thiserror::Error;

/// Errors raised by the fallible decoding building blocks
#[derive(Error, Debug)]
pub enum ParseError {
    /// Body declared as base64 but not decodable
    #[error("Invalid base64 payload: {0}")]
    Base64(#[from] base64::DecodeError),

    /// Charset label not known to the decoder
    #[error("Unknown charset: {0}")]
    UnknownCharset(String),

    /// Nested multipart or message parts deeper than allowed
    #[error("MIME nesting depth {depth} exceeds limit {max}")]
    DepthExceeded { depth: usize, max: usize },

    /// Header block could not be parsed
    #[error("Failed to parse headers: {0}")]
    Headers(String),
}

/// Result type for decoding operations
pub type Result<T> = std::result::Result<T, ParseError>;
