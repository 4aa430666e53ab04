//! Actionable signal and preview derived from parsed content

use crate::code::extract_verification_code_with;
use crate::config::CodeWindows;
use crate::link::extract_login_link;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;

static TAG_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]+>").unwrap());

static WHITESPACE_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// The one thing a reader is likely to act on: a code to copy or a link to
/// open
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Signal {
    Code(String),
    Link(String),
    #[default]
    None,
}

impl Signal {
    /// The stored form: the code or URL, empty for [`Signal::None`]
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Code(s) | Self::Link(s) => s,
            Self::None => "",
        }
    }

    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Code(_) => "code",
            Self::Link(_) => "link",
            Self::None => "none",
        }
    }

    #[must_use]
    pub const fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Verification code if there is one, otherwise a login link
#[must_use]
pub fn extract_signal(subject: &str, text: &str, html: &str) -> Signal {
    extract_signal_with(&CodeWindows::default(), subject, text, html)
}

/// [`extract_signal`] with explicit code proximity windows
#[must_use]
pub fn extract_signal_with(windows: &CodeWindows, subject: &str, text: &str, html: &str) -> Signal {
    let code = extract_verification_code_with(windows, subject, text, html);
    if !code.is_empty() {
        return Signal::Code(code);
    }

    let link = extract_login_link(text, html);
    if link.is_empty() {
        Signal::None
    } else {
        Signal::Link(link)
    }
}

/// Single-line preview of at most `max_chars` characters.
///
/// Uses the plain text when present, otherwise the HTML with tags blanked out.
#[must_use]
pub fn preview(text: &str, html: &str, max_chars: usize) -> String {
    let source = if text.is_empty() {
        TAG_REGEX.replace_all(html, " ")
    } else {
        text.into()
    };
    WHITESPACE_REGEX
        .replace_all(&source, " ")
        .trim()
        .chars()
        .take(max_chars)
        .collect()
}
