//! Message parsing: recursive MIME walk, body fallback and message summary

use crate::config::Options;
use crate::decode::{decode_body, utf8_or_latin1};
use crate::error::{ParseError, Result};
use crate::extracted::{extract_signal_with, preview};
use crate::headers::{HeaderMap, boundary, split_headers_and_body};
use crate::html::{looks_like_markup, sniff_html, text_to_html};
use crate::multipart::split_multipart;
use crate::types::{EmailAddress, InboundMessage, ParsedContent};
use chrono::{DateTime, Utc};
use mailparse::MailHeaderMap;
use tracing::{debug, trace};

/// Reconstruct the text and HTML bodies of a raw message.
///
/// Never fails; a message without readable content yields two empty strings.
#[must_use]
pub fn parse_email_body(raw: &str) -> ParsedContent {
    parse_email_body_with(raw, &Options::default())
}

/// [`parse_email_body`] with explicit options
#[must_use]
pub fn parse_email_body_with(raw: &str, options: &Options) -> ParsedContent {
    let (headers, body) = split_headers_and_body(raw);
    let walker = EntityWalker {
        max_depth: options.max_depth,
    };
    let content = walker.parse_entity(&headers, body, 0);
    fill_missing_html(content, body)
}

/// [`parse_email_body`] for raw bytes.
///
/// Non UTF-8 input is read one character per byte so that declared legacy
/// charsets can still be applied to 8bit bodies.
#[must_use]
pub fn parse_email_body_bytes(raw: &[u8]) -> ParsedContent {
    parse_email_body(&utf8_or_latin1(raw))
}

/// Parse a raw message into headers, body, preview and actionable signal
#[must_use]
pub fn parse_email(raw: &str) -> InboundMessage {
    parse_email_with(raw, &Options::default())
}

/// [`parse_email`] for raw bytes
#[must_use]
pub fn parse_email_bytes(raw: &[u8]) -> InboundMessage {
    parse_email(&utf8_or_latin1(raw))
}

/// [`parse_email`] with explicit options
#[must_use]
pub fn parse_email_with(raw: &str, options: &Options) -> InboundMessage {
    let (headers, _) = split_headers_and_body(raw);
    let decoded = if headers.is_empty() {
        Vec::new()
    } else {
        decoded_headers(raw).unwrap_or_else(|e| {
            debug!("{e}, using raw header values");
            Vec::new()
        })
    };
    let header = |name: &str| -> Option<String> {
        decoded
            .get_first_value(name)
            .or_else(|| headers.get(name).map(str::to_string))
    };

    let raw_subject = header("subject").unwrap_or_default();
    let body = parse_email_body_with(raw, options);
    let signal = extract_signal_with(&options.code_windows, &raw_subject, &body.text, &body.html);
    let preview = preview(&body.text, &body.html, options.preview_chars);

    let date = header("date").and_then(|d| {
        DateTime::parse_from_rfc2822(d.trim())
            .ok()
            .map(|dt| dt.with_timezone(&Utc))
    });

    debug!(
        subject = %raw_subject,
        signal = signal.kind(),
        "Parsed inbound message"
    );

    InboundMessage {
        from: header("from").and_then(|f| EmailAddress::parse(&f)),
        to: header("to")
            .map(|t| EmailAddress::parse_list(&t))
            .unwrap_or_default(),
        subject: if raw_subject.trim().is_empty() {
            "(no subject)".to_string()
        } else {
            raw_subject
        },
        message_id: header("message-id").map(|id| id.trim().to_string()),
        date,
        body,
        preview,
        signal,
    }
}

/// Header values with RFC 2047 encoded words decoded
fn decoded_headers(raw: &str) -> Result<Vec<mailparse::MailHeader<'_>>> {
    let (headers, _) =
        mailparse::parse_headers(raw.as_bytes()).map_err(|e| ParseError::Headers(e.to_string()))?;
    Ok(headers)
}

/// Fill an empty `html` from the top-level body, or synthesize it from text
fn fill_missing_html(mut content: ParsedContent, body: &str) -> ParsedContent {
    if !content.html.is_empty() {
        return content;
    }

    if let Some(html) = sniff_html(body) {
        trace!("html span found in raw body");
        content.html = html.to_string();
    } else if looks_like_markup(body) {
        trace!("raw body looks like markup");
        content.html = body.to_string();
    } else if !content.text.is_empty() {
        content.html = text_to_html(&content.text);
    }

    content
}

struct EntityWalker {
    max_depth: usize,
}

impl EntityWalker {
    fn check_depth(&self, depth: usize) -> Result<()> {
        if depth > self.max_depth {
            return Err(ParseError::DepthExceeded {
                depth,
                max: self.max_depth,
            });
        }
        Ok(())
    }

    /// A complete message nested inside another one
    fn parse_message(&self, raw: &str, depth: usize) -> ParsedContent {
        let (headers, body) = split_headers_and_body(raw);
        self.parse_entity(&headers, body, depth)
    }

    fn parse_entity(&self, headers: &HeaderMap, body: &str, depth: usize) -> ParsedContent {
        if let Err(e) = self.check_depth(depth) {
            debug!("{e}, not descending further");
            return ParsedContent::default();
        }

        let content_type = headers.content_type();
        let ct = content_type.trim().to_lowercase();

        if !ct.starts_with("multipart/") {
            return Self::parse_leaf(headers, body, &ct);
        }

        let mut content = ParsedContent::default();
        let boundary = boundary(content_type);
        if boundary.is_empty() {
            debug!(content_type = %ct, "multipart entity without boundary");
            return content;
        }

        for part in split_multipart(body, &boundary) {
            let (part_headers, part_body) = split_headers_and_body(&part);
            let part_ct = part_headers.content_type().trim().to_lowercase();

            let found = if part_ct.starts_with("message/rfc822") {
                trace!(depth, "descending into embedded message");
                self.parse_message(part_body, depth + 1)
            } else if part_ct.contains("rfc822-headers") {
                trace!(depth, "skipping headers-only part");
                continue;
            } else {
                trace!(depth, content_type = %part_ct, "descending into part");
                self.parse_entity(&part_headers, part_body, depth + 1)
            };

            content.merge_missing(found);
            if content.is_complete() {
                break;
            }
        }

        content
    }

    fn parse_leaf(headers: &HeaderMap, body: &str, ct: &str) -> ParsedContent {
        let decoded = decode_body(body, headers.transfer_encoding(), ct);

        if ct.is_empty() {
            let source = if decoded.is_empty() { body } else { decoded.as_str() };
            if let Some(html) = sniff_html(source) {
                return ParsedContent::new("", html);
            }
        }

        if ct.contains("text/html") {
            ParsedContent::new("", decoded)
        } else {
            ParsedContent::new(decoded, "")
        }
    }
}
