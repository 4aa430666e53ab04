use email_signal::*;

#[test]
fn test_sign_in_button() {
    let html = r#"<a href="https://x.com/login?token=abc">Sign in</a>"#;
    assert_eq!(extract_login_link("", html), "https://x.com/login?token=abc");
}

#[test]
fn test_privacy_link_alone() {
    let html = r#"<a href="https://x.com/privacy">Privacy Policy</a>"#;
    assert_eq!(extract_login_link("", html), "");
}

#[test]
fn test_button_text_inside_nested_tags() {
    let html = r#"<p>Hi</p><a class="btn" href='https://app.test/session/abc'><span><b>Verify email</b></span></a>"#;
    assert_eq!(extract_login_link("", html), "https://app.test/session/abc");
}

#[test]
fn test_first_qualifying_anchor_wins() {
    let html = r#"
        <a href="https://app.test/home">Home</a>
        <a href="https://www.facebook.com/app">Confirm on Facebook</a>
        <a href="https://app.test/c/1?x=1&amp;y=2">Confirm</a>
        <a href="https://app.test/c/2">Confirm</a>
    "#;
    assert_eq!(extract_login_link("", html), "https://app.test/c/1?x=1&y=2");
}

#[test]
fn test_relative_href_skipped() {
    let html = r#"<a href="/login">Log in</a>"#;
    assert_eq!(extract_login_link("", html), "");
}

#[test]
fn test_chinese_button_text() {
    let html = r#"<a href="https://cn.example.com/go?id=9">点击登录</a>"#;
    assert_eq!(extract_login_link("", html), "https://cn.example.com/go?id=9");
}

#[test]
fn test_bare_url_with_token_param() {
    let text = "Open https://example.com/about then https://example.com/session?token=q1w2e3.";
    assert_eq!(
        extract_login_link(text, ""),
        "https://example.com/session?token=q1w2e3"
    );
}

#[test]
fn test_bare_url_with_auth_path() {
    let text = "Click (https://example.com/verify/abc123) to continue";
    assert_eq!(extract_login_link(text, ""), "https://example.com/verify/abc123");
}

#[test]
fn test_public_links_excluded_from_fallback() {
    let text = "https://example.com/unsubscribe?token=1 https://cdn.example.com/auth/logo.png";
    assert_eq!(extract_login_link(text, ""), "");
}

#[test]
fn test_text_scanned_before_html() {
    let text = "https://a.test/confirm/1";
    let html = r#"<p>https://b.test/confirm/2</p>"#;
    assert_eq!(extract_login_link(text, html), "https://a.test/confirm/1");
}

#[test]
fn test_is_public_link() {
    assert!(is_public_link("https://example.com/Terms-of-Service"));
    assert!(is_public_link("https://twitter.com/acme"));
    assert!(is_public_link("https://cdn.example.com/app.JS"));
    assert!(!is_public_link("https://example.com/login"));
}
