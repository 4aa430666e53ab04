//! HTML helpers: sniffing, stripping and escaping

use regex::Regex;
use std::collections::HashMap;
use std::sync::LazyLock;

static OPEN_TAG_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<(\w+)[^>]*>").unwrap());

static CLOSE_TAG_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"</(\w+)>").unwrap());

static WHITESPACE_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Find an `<html ...>...</html>` span in raw content.
///
/// Starts at the earlier of `<html` and `<!doctype html`, ends at the last
/// `</html>`. Matching is case-insensitive. Returns `None` unless both ends
/// are present in order.
#[must_use]
pub fn sniff_html(raw: &str) -> Option<&str> {
    let lower = raw.to_ascii_lowercase();
    let start = [lower.find("<html"), lower.find("<!doctype html")]
        .into_iter()
        .flatten()
        .min()?;
    let end = lower.rfind("</html>")? + "</html>".len();
    (end > start).then(|| &raw[start..end])
}

/// Does the content contain an element that is opened and later closed?
#[must_use]
pub fn looks_like_markup(raw: &str) -> bool {
    let mut first_open: HashMap<String, usize> = HashMap::new();
    for cap in OPEN_TAG_REGEX.captures_iter(raw) {
        if let (Some(whole), Some(name)) = (cap.get(0), cap.get(1)) {
            let opened = whole.end();
            first_open
                .entry(name.as_str().to_ascii_lowercase())
                .or_insert(opened);
        }
    }
    if first_open.is_empty() {
        return false;
    }

    CLOSE_TAG_REGEX.captures_iter(raw).any(|cap| {
        match (cap.get(0), cap.get(1)) {
            (Some(whole), Some(name)) => first_open
                .get(&name.as_str().to_ascii_lowercase())
                .is_some_and(|&opened| opened <= whole.start()),
            _ => false,
        }
    })
}

/// Escape `& < > " '` for use in HTML text. The apostrophe is written as
/// `&#39;`.
#[must_use]
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Wrap escaped plain text in a whitespace-preserving container
#[must_use]
pub fn text_to_html(text: &str) -> String {
    format!(
        "<div style=\"white-space:pre-wrap\">{}</div>",
        escape_html(text)
    )
}

/// Reduce HTML to a single line of readable text.
///
/// Drops `<script>` and `<style>` contents, turns every tag into a space,
/// decodes entities and collapses runs of whitespace.
#[must_use]
pub fn strip_html(html: &str) -> String {
    let mut result = String::with_capacity(html.len());
    let mut in_tag = false;
    let mut in_script = false;
    let mut in_style = false;

    let chars: Vec<char> = html.chars().collect();

    for (i, &c) in chars.iter().enumerate() {
        if !in_tag && c == '<' {
            let remaining: String = chars[i..].iter().take(9).collect();
            let remaining = remaining.to_ascii_lowercase();
            if remaining.starts_with("<script") {
                in_script = true;
            } else if remaining.starts_with("<style") {
                in_style = true;
            } else if remaining.starts_with("</script") {
                in_script = false;
            } else if remaining.starts_with("</style") {
                in_style = false;
            }
            in_tag = true;
        } else if in_tag && c == '>' {
            in_tag = false;
            result.push(' ');
        } else if !in_tag && !in_script && !in_style {
            result.push(c);
        }
    }

    let decoded = html_escape::decode_html_entities(&result);
    WHITESPACE_REGEX.replace_all(&decoded, " ").trim().to_string()
}
