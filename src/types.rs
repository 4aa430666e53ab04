//! Core types produced by parsing

use crate::extracted::Signal;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Reconstructed body content of a message.
///
/// Either field may be empty; both are empty only for a message without any
/// textual content.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedContent {
    /// Plain text body
    pub text: String,

    /// HTML body
    pub html: String,
}

impl ParsedContent {
    #[must_use]
    pub fn new(text: impl Into<String>, html: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            html: html.into(),
        }
    }

    /// Both fields found
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        !self.text.is_empty() && !self.html.is_empty()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.text.is_empty() && self.html.is_empty()
    }

    /// Fill whichever fields are still empty from `other`
    pub fn merge_missing(&mut self, other: Self) {
        if self.text.is_empty() && !other.text.is_empty() {
            self.text = other.text;
        }
        if self.html.is_empty() && !other.html.is_empty() {
            self.html = other.html;
        }
    }
}

/// Everything a consumer needs from one inbound message
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InboundMessage {
    /// Sender address, if the From header parsed
    pub from: Option<EmailAddress>,

    /// Primary recipients
    pub to: Vec<EmailAddress>,

    /// Decoded subject, `(no subject)` when absent
    pub subject: String,

    /// Message-ID header value
    pub message_id: Option<String>,

    /// Date header, when present and valid RFC 2822
    pub date: Option<DateTime<Utc>>,

    /// Reconstructed body
    pub body: ParsedContent,

    /// Short single-line preview of the body
    pub preview: String,

    /// Verification code or login link found in the message
    pub signal: Signal,
}

/// Email address with optional display name
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EmailAddress {
    /// Display name (e.g., "John Doe")
    pub name: Option<String>,

    /// Email address (e.g., "john@example.com")
    pub address: String,
}

impl EmailAddress {
    /// Parse `Name <local@domain>` or a bare `local@domain`
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();

        if let Some(start) = s.find('<')
            && let Some(end) = s[start..].find('>')
        {
            let address = s[start + 1..start + end].trim();
            if !address.contains('@') {
                return None;
            }
            let name = s[..start].trim().trim_matches('"').trim();
            return Some(Self {
                name: (!name.is_empty()).then(|| name.to_string()),
                address: address.to_string(),
            });
        }

        s.contains('@').then(|| Self {
            name: None,
            address: s.to_string(),
        })
    }

    /// Parse a comma-separated address list, skipping unparseable entries
    #[must_use]
    pub fn parse_list(s: &str) -> Vec<Self> {
        s.split(',').filter_map(Self::parse).collect()
    }

    /// Domain part, after the last `@`
    #[must_use]
    pub fn domain(&self) -> &str {
        self.address
            .rsplit_once('@')
            .map_or("", |(_, domain)| domain)
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => write!(f, "{} <{}>", name, self.address),
            None => write!(f, "{}", self.address),
        }
    }
}
