//! Verification code detection.
//!
//! A code is a run of 4 to 8 digits, optionally split by single separator
//! characters (`123 456`, `12-34-56`), that sits within a short distance of a
//! keyword such as "code", "OTP" or "验证码". The search runs three passes of
//! decreasing strictness and stops at the first hit:
//!
//! 1. the subject line, 20 non-digit characters either side of a keyword;
//! 2. the body, 30 characters;
//! 3. the body, 80 characters, with years, postal codes and street numbers
//!    filtered out.
//!
//! There is no keyword-less fallback: a bare number is never reported.

use crate::config::CodeWindows;
use crate::html::strip_html;
use regex::Regex;
use std::sync::LazyLock;
use tracing::trace;

const MIN_DIGITS: usize = 4;
const MAX_DIGITS: usize = 8;

/// Characters allowed between two digits of one code (besides whitespace)
const SEPARATORS: &[char] = &[
    '\u{00A0}', '-', '\u{2013}', '\u{2014}', '_', '.', '\u{00B7}', '\u{2022}', '\u{2219}',
    '\u{2027}', '\'', '\u{2019}',
];

/// Terms that mark a nearby number as a code
const KEYWORDS: &[&str] = &[
    "verification",
    r"one[-\s]?time",
    r"two[-\s]?factor",
    "2fa",
    "security",
    "auth",
    "login",
    "confirm",
    "code",
    "otp",
    "验证码",
    "校验码",
    "驗證碼",
    "確認碼",
    "認證碼",
    "認証コード",
    "인증코드",
    "코드",
];

/// Vocabulary that makes a 5-digit number read as a postal code
const ADDRESS_TERMS: &[&str] = &["address", "street", "zip", "postal"];

static KEYWORD_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&format!("(?i)(?:{})", KEYWORDS.join("|"))).unwrap());

static KEYWORD_AT_START_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&format!("(?i)^(?:{})", KEYWORDS.join("|"))).unwrap());

static STATE_ZIP_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b[a-z]{2,}\s+[0-9]{5}\b").unwrap());

/// Find a verification code in a message.
///
/// Returns the digits with separators removed, or an empty string.
#[must_use]
pub fn extract_verification_code(subject: &str, text: &str, html: &str) -> String {
    extract_verification_code_with(&CodeWindows::default(), subject, text, html)
}

/// [`extract_verification_code`] with explicit proximity windows
#[must_use]
pub fn extract_verification_code_with(
    windows: &CodeWindows,
    subject: &str,
    text: &str,
    html: &str,
) -> String {
    let body = format!("{} {}", text, strip_html(html));
    let body = body.trim();

    if let Some(code) = find_near_keyword(subject, windows.subject, |_| true) {
        trace!(%code, "code found in subject");
        return code;
    }
    if let Some(code) = find_near_keyword(body, windows.body, |_| true) {
        trace!(%code, "code found in body");
        return code;
    }
    if let Some(code) = find_near_keyword(body, windows.loose, |code| {
        !is_likely_not_a_code(code, body)
    }) {
        trace!(%code, "code found in body, loose pass");
        return code;
    }

    String::new()
}

/// Try keyword-then-code, then code-then-keyword.
///
/// Each ordering yields only its first match; `accept` decides whether that
/// match is taken or the next ordering is tried.
fn find_near_keyword(
    haystack: &str,
    window: usize,
    accept: impl Fn(&str) -> bool,
) -> Option<String> {
    [
        keyword_then_code(haystack, window),
        code_then_keyword(haystack, window),
    ]
    .into_iter()
    .flatten()
    .map(|chunk| normalize(&chunk))
    .find(|code| !code.is_empty() && accept(code))
}

fn keyword_then_code(haystack: &str, window: usize) -> Option<String> {
    let mut from = 0;
    while let Some(keyword) = KEYWORD_REGEX.find_at(haystack, from) {
        if let Some(chunk) = code_after(haystack, keyword.end(), window) {
            return Some(chunk);
        }
        from = next_boundary(haystack, keyword.start());
    }
    None
}

fn code_then_keyword(haystack: &str, window: usize) -> Option<String> {
    let mut prev: Option<char> = None;
    for (start, c) in haystack.char_indices() {
        let preceded_by_digit = prev.is_some_and(|p| p.is_ascii_digit());
        prev = Some(c);
        if !c.is_ascii_digit() || preceded_by_digit {
            continue;
        }
        for end in chunk_ends(haystack, start).into_iter().rev() {
            if !starts_with_digit(&haystack[end..]) && keyword_within(haystack, end, window) {
                return Some(haystack[start..end].to_string());
            }
        }
    }
    None
}

/// The first digit group reachable from `from` across at most `window`
/// non-digit characters on the same line.
fn code_after(haystack: &str, from: usize, window: usize) -> Option<String> {
    for (skipped, (offset, c)) in haystack[from..].char_indices().enumerate() {
        if c.is_ascii_digit() {
            let start = from + offset;
            if preceded_by_digit(haystack, start) {
                return None;
            }
            return chunk_ends(haystack, start)
                .into_iter()
                .rev()
                .find(|&end| !starts_with_digit(&haystack[end..]))
                .map(|end| haystack[start..end].to_string());
        }
        if c == '\n' || c == '\r' || skipped == window {
            return None;
        }
    }
    None
}

/// Is there a keyword starting within `window` non-digit characters of `from`?
fn keyword_within(haystack: &str, from: usize, window: usize) -> bool {
    let mut pos = from;
    for skipped in 0..=window {
        if KEYWORD_AT_START_REGEX.is_match(&haystack[pos..]) {
            return true;
        }
        match haystack[pos..].chars().next() {
            Some(c) if !c.is_ascii_digit() && c != '\n' && c != '\r' && skipped < window => {
                pos += c.len_utf8();
            }
            _ => return false,
        }
    }
    false
}

/// Byte offsets at which a digit group starting at `start` may end, shortest
/// first. Each step takes a digit, or one separator followed by a digit.
fn chunk_ends(haystack: &str, start: usize) -> Vec<usize> {
    let mut ends = Vec::new();
    let mut chars = haystack[start..].char_indices().peekable();
    let mut digits = 0;

    while let Some((offset, c)) = chars.next() {
        if c.is_ascii_digit() {
            digits += 1;
            if digits >= MIN_DIGITS {
                ends.push(start + offset + 1);
            }
            if digits == MAX_DIGITS {
                break;
            }
        } else if is_separator(c) && digits > 0 {
            match chars.peek() {
                Some((_, next)) if next.is_ascii_digit() => {}
                _ => break,
            }
        } else {
            break;
        }
    }

    ends
}

fn is_separator(c: char) -> bool {
    c.is_whitespace() || SEPARATORS.contains(&c)
}

fn preceded_by_digit(haystack: &str, pos: usize) -> bool {
    haystack[..pos]
        .chars()
        .next_back()
        .is_some_and(|c| c.is_ascii_digit())
}

fn starts_with_digit(s: &str) -> bool {
    s.chars().next().is_some_and(|c| c.is_ascii_digit())
}

fn next_boundary(s: &str, pos: usize) -> usize {
    s[pos..].chars().next().map_or(s.len(), |c| pos + c.len_utf8())
}

/// Digits only, empty unless 4 to 8 of them remain
fn normalize(chunk: &str) -> String {
    let digits: String = chunk.chars().filter(char::is_ascii_digit).collect();
    if (MIN_DIGITS..=MAX_DIGITS).contains(&digits.len()) {
        digits
    } else {
        String::new()
    }
}

/// Loose-pass filter for numbers that are probably not codes
fn is_likely_not_a_code(code: &str, context: &str) -> bool {
    if code.len() == 4
        && let Ok(year) = code.parse::<u32>()
        && (2000..=2099).contains(&year)
    {
        return true;
    }

    if code.len() == 5 {
        let lower = context.to_lowercase();
        if ADDRESS_TERMS.iter().any(|term| lower.contains(term))
            || STATE_ZIP_REGEX.is_match(context)
        {
            return true;
        }
    }

    // Street numbers such as "1000 Sofia"
    Regex::new(&format!(r"\b{}\s+[A-Z][a-z]+(?:,|\b)", regex::escape(code)))
        .is_ok_and(|street| street.is_match(context))
}
