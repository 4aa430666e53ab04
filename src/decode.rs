//! Transfer-encoding and charset decoding of entity bodies

use crate::error::{ParseError, Result};
use base64::Engine;
use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use encoding_rs::Encoding;
use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

/// Standard alphabet, padding optional, trailing bits tolerated
const LENIENT_BASE64: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new()
        .with_decode_padding_mode(DecodePaddingMode::Indifferent)
        .with_decode_allow_trailing_bits(true),
);

static CHARSET_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)charset\s*=\s*"?([^";]+)"#).unwrap());

/// Content-Transfer-Encoding of an entity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferEncoding {
    Base64,
    QuotedPrintable,
    /// 7bit, 8bit, binary, absent or unrecognised
    Identity,
}

impl TransferEncoding {
    #[must_use]
    pub fn from_header(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "base64" => Self::Base64,
            "quoted-printable" => Self::QuotedPrintable,
            _ => Self::Identity,
        }
    }
}

/// Character set declared on an entity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Charset {
    /// UTF-8 or US-ASCII
    Utf8,
    /// Any other charset known to `encoding_rs`
    Legacy(&'static Encoding),
}

impl Charset {
    /// Resolve a charset label. Unknown and undecodable labels are an error.
    pub fn resolve(label: &str) -> Result<Self> {
        let label = label.trim().to_ascii_lowercase();
        if matches!(label.as_str(), "" | "utf-8" | "utf8" | "us-ascii" | "ascii") {
            return Ok(Self::Utf8);
        }
        match Encoding::for_label(label.as_bytes()) {
            Some(encoding) if encoding == encoding_rs::UTF_8 => Ok(Self::Utf8),
            // ISO-2022-KR, HZ and friends map to a decoder that only emits U+FFFD
            Some(encoding) if encoding == encoding_rs::REPLACEMENT => {
                Err(ParseError::UnknownCharset(label))
            }
            Some(encoding) => Ok(Self::Legacy(encoding)),
            None => Err(ParseError::UnknownCharset(label)),
        }
    }

    /// Charset label of a Content-Type value, `utf-8` when absent
    #[must_use]
    pub fn label(content_type: &str) -> &str {
        CHARSET_REGEX
            .captures(content_type)
            .and_then(|cap| cap.get(1))
            .map_or("utf-8", |m| m.as_str().trim())
    }
}

/// Reverse a transfer encoding, returning raw bytes.
///
/// Base64 ignores whitespace. Quoted-printable drops soft line breaks and
/// expands `=XX` escapes; malformed escapes are kept literally.
pub fn decode_transfer(body: &str, encoding: TransferEncoding) -> Result<Vec<u8>> {
    match encoding {
        TransferEncoding::Base64 => {
            let cleaned: String = body.chars().filter(|c| !c.is_whitespace()).collect();
            Ok(LENIENT_BASE64.decode(cleaned)?)
        }
        TransferEncoding::QuotedPrintable => Ok(decode_quoted_printable(body)),
        TransferEncoding::Identity => Ok(body.as_bytes().to_vec()),
    }
}

/// Decode an entity body to text.
///
/// Runs the transfer stage, then interprets the bytes under the charset of
/// `content_type`. Never fails: undecodable base64 and unknown charsets leave
/// the previous stage's text in place.
#[must_use]
pub fn decode_body(body: &str, transfer_encoding: &str, content_type: &str) -> String {
    let encoding = TransferEncoding::from_header(transfer_encoding);
    let label = Charset::label(content_type);
    let charset = match Charset::resolve(label) {
        Ok(charset) => Some(charset),
        Err(e) => {
            debug!("{e}, keeping transfer-decoded text");
            None
        }
    };

    let bytes = match encoding {
        TransferEncoding::Identity => match charset {
            // Already text; only a single-byte view can be re-read in another charset
            Some(Charset::Legacy(_)) => match code_units_as_bytes(body) {
                Some(bytes) => bytes,
                None => return body.to_string(),
            },
            _ => return body.to_string(),
        },
        _ => match decode_transfer(body, encoding) {
            Ok(bytes) => bytes,
            Err(e) => {
                debug!("{e}, keeping body as is");
                return body.to_string();
            }
        },
    };

    match charset {
        Some(Charset::Legacy(encoding)) => {
            let (text, had_errors) = encoding.decode_without_bom_handling(&bytes);
            if had_errors {
                debug!(charset = encoding.name(), "lossy charset decode");
            }
            text.into_owned()
        }
        _ => utf8_or_latin1(&bytes),
    }
}

/// Bytes as UTF-8, or one character per byte when they are not valid UTF-8
#[must_use]
pub fn utf8_or_latin1(bytes: &[u8]) -> String {
    match std::str::from_utf8(bytes) {
        Ok(s) => s.to_string(),
        Err(_) => bytes.iter().copied().map(char::from).collect(),
    }
}

fn code_units_as_bytes(text: &str) -> Option<Vec<u8>> {
    text.chars().map(|c| u8::try_from(u32::from(c)).ok()).collect()
}

fn decode_quoted_printable(input: &str) -> Vec<u8> {
    let unfolded = input.replace("=\r\n", "").replace("=\n", "");
    let bytes = unfolded.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());

    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'='
            && let Some(byte) = bytes
                .get(i + 1..i + 3)
                .and_then(|pair| hex_pair(pair[0], pair[1]))
        {
            out.push(byte);
            i += 3;
            continue;
        }
        out.push(bytes[i]);
        i += 1;
    }

    out
}

fn hex_pair(high: u8, low: u8) -> Option<u8> {
    let high = char::from(high).to_digit(16)?;
    let low = char::from(low).to_digit(16)?;
    u8::try_from(high * 16 + low).ok()
}
