// Enforce at crate level
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::missing_errors_doc, clippy::missing_panics_doc)]

//! Tolerant email body reconstruction and signal extraction
//!
//! Rebuilds the plain text and HTML bodies of raw RFC 822 / MIME messages,
//! however inconsistent their structure, and pulls out the two things an
//! automated inbox cares about: a one-time verification code and a login
//! link.
//!
//! # Features
//!
//! - Recursive multipart walk, including forwarded `message/rfc822` parts
//! - base64 / quoted-printable decoding with legacy charsets such as GBK
//! - HTML sniffing for messages that never declare a content type
//! - Multilingual, keyword-anchored verification code detection
//! - Login / magic link detection that skips unsubscribe and social links
//!
//! The parse and extraction entry points never fail: malformed input
//! degrades to empty strings.
//!
//! # Example
//!
//! ```rust
//! use email_signal::{extract_login_link, extract_verification_code, parse_email_body};
//!
//! let raw = "Subject: Your code\r\nContent-Type: text/plain\r\n\r\nYour code is 493 118";
//! let body = parse_email_body(raw);
//!
//! assert_eq!(extract_verification_code("Your code", &body.text, &body.html), "493118");
//! assert_eq!(extract_login_link(&body.text, &body.html), "");
//! ```

mod code;
mod config;
mod decode;
mod error;
mod extracted;
mod headers;
mod html;
mod link;
mod multipart;
mod parser;
mod types;

pub use code::{extract_verification_code, extract_verification_code_with};
pub use config::{CodeWindows, DEFAULT_MAX_DEPTH, DEFAULT_PREVIEW_CHARS, Options};
pub use decode::{Charset, TransferEncoding, decode_body, decode_transfer, utf8_or_latin1};
pub use error::{ParseError, Result};
pub use extracted::*;
pub use headers::{HeaderMap, boundary, parse_headers, split_headers_and_body};
pub use html::{escape_html, looks_like_markup, sniff_html, strip_html, text_to_html};
pub use link::{extract_login_link, is_public_link};
pub use multipart::split_multipart;
pub use parser::{
    parse_email, parse_email_body, parse_email_body_bytes, parse_email_body_with,
    parse_email_bytes, parse_email_with,
};
pub use types::*;
