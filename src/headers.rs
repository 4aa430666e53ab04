//! Header block splitting and parsing

use regex::Regex;
use std::collections::HashMap;
use std::sync::LazyLock;

static BOUNDARY_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)boundary\s*=\s*"?([^";\r\n]+)"?"#).unwrap());

/// Header fields keyed by lower-cased name, continuation lines folded in
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderMap(HashMap<String, String>);

impl HeaderMap {
    /// Look up a field by name, case-insensitively
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(&name.to_lowercase()).map(String::as_str)
    }

    /// Content-Type value with original casing, empty when absent
    #[must_use]
    pub fn content_type(&self) -> &str {
        self.get("content-type").unwrap_or_default()
    }

    /// Content-Transfer-Encoding value, empty when absent
    #[must_use]
    pub fn transfer_encoding(&self) -> &str {
        self.get("content-transfer-encoding").unwrap_or_default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Split a raw message at its first blank line.
///
/// `\r\n\r\n` is preferred over `\n\n` wherever it occurs. Input without a
/// blank line is all body, with no headers.
#[must_use]
pub fn split_headers_and_body(raw: &str) -> (HeaderMap, &str) {
    let (block, body) = match raw.find("\r\n\r\n") {
        Some(idx) => (&raw[..idx], &raw[idx + 4..]),
        None => match raw.find("\n\n") {
            Some(idx) => (&raw[..idx], &raw[idx + 2..]),
            None => return (HeaderMap::default(), raw),
        },
    };
    (parse_headers(block), body)
}

/// Parse a header block into a [`HeaderMap`].
///
/// Lines starting with whitespace continue the previous field. Lines without
/// a colon are skipped. A repeated name keeps the last value.
#[must_use]
pub fn parse_headers(block: &str) -> HeaderMap {
    let mut headers: HashMap<String, String> = HashMap::new();
    let mut last_key: Option<String> = None;

    for line in block.lines() {
        if line.starts_with(char::is_whitespace) {
            if let Some(key) = &last_key
                && let Some(value) = headers.get_mut(key)
            {
                value.push(' ');
                value.push_str(line.trim());
            }
            continue;
        }

        if let Some((name, value)) = line.split_once(':') {
            let name = name.trim();
            if name.is_empty() {
                continue;
            }
            let key = name.to_lowercase();
            headers.insert(key.clone(), value.trim().to_string());
            last_key = Some(key);
        }
    }

    HeaderMap(headers)
}

/// Extract the `boundary` parameter of a Content-Type value.
///
/// The parameter name matches case-insensitively; the value keeps its case.
/// Returns an empty string when there is none.
#[must_use]
pub fn boundary(content_type: &str) -> String {
    BOUNDARY_REGEX
        .captures(content_type)
        .and_then(|cap| cap.get(1))
        .map(|m| m.as_str().trim().to_string())
        .unwrap_or_default()
}
