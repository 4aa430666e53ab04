//! Login / verification link detection

use regex::Regex;
use std::sync::LazyLock;
use tracing::trace;

static ANCHOR_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?is)<a\s+(?:[^>]*?\s+)?href\s*=\s*(?:"([^"]*)"|'([^']*)')[^>]*>(.*?)</a>"#,
    )
    .unwrap()
});

static BUTTON_TEXT_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)登录|登入|验证|驗證|确认|確認|log\s?in|verify|confirm|sign\s?in").unwrap()
});

static TAG_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]+>").unwrap());

static ABSOLUTE_URL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^https?://").unwrap());

static URL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)https?://[^\s<>"'()]+"#).unwrap());

static AUTH_PARAM_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)[?&](?:token|code|key|auth|magic|secret|v|verify)=").unwrap()
});

static AUTH_PATH_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)/(?:verify|confirm|auth|login|magic)\b").unwrap());

/// URL fragments of links that are never the action link
const PUBLIC_LINK_TERMS: &[&str] = &[
    "unsubscribe",
    "privacy",
    "terms",
    "facebook.com",
    "twitter.com",
    "linkedin.com",
    "instagram.com",
    "youtube.com",
];

/// Static asset extensions
const ASSET_EXTENSIONS: &[&str] = &[
    ".png", ".jpg", ".jpeg", ".gif", ".svg", ".webp", ".ico", ".css", ".js",
];

/// Find a login or verification link in a message.
///
/// Prefers an anchor whose text reads like a sign-in or confirm button; falls
/// back to the first URL carrying an auth-looking parameter or path segment.
/// Returns an empty string when nothing qualifies.
#[must_use]
pub fn extract_login_link(text: &str, html: &str) -> String {
    if let Some(href) = find_button_link(html) {
        trace!(%href, "login link from anchor");
        return href;
    }

    let combined = format!("{text} {html}");
    URL_REGEX
        .find_iter(&combined)
        .map(|m| clean_url(m.as_str()))
        .find(|url| {
            (AUTH_PARAM_REGEX.is_match(url) || AUTH_PATH_REGEX.is_match(url))
                && !is_public_link(url)
        })
        .map(|url| {
            trace!(%url, "login link from bare url");
            url.to_string()
        })
        .unwrap_or_default()
}

fn find_button_link(html: &str) -> Option<String> {
    ANCHOR_REGEX.captures_iter(html).find_map(|cap| {
        let href = cap.get(1).or_else(|| cap.get(2))?.as_str().trim();
        let label = cap.get(3).map_or("", |m| m.as_str());
        let label = TAG_REGEX.replace_all(label, "");

        (BUTTON_TEXT_REGEX.is_match(label.trim())
            && ABSOLUTE_URL_REGEX.is_match(href)
            && !is_public_link(href))
        .then(|| html_escape::decode_html_entities(href).into_owned())
    })
}

/// Unsubscribe, legal, social media and static asset links
#[must_use]
pub fn is_public_link(url: &str) -> bool {
    let lower = url.to_lowercase();
    PUBLIC_LINK_TERMS.iter().any(|term| lower.contains(term))
        || ASSET_EXTENSIONS.iter().any(|ext| lower.ends_with(ext))
}

fn clean_url(url: &str) -> &str {
    url.trim_end_matches(['.', ',', ';', '>', ')'])
}
