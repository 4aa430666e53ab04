use email_signal::*;

#[test]
fn test_split_prefers_crlf_blank_line() {
    let (headers, body) = split_headers_and_body("Subject: a\n\nX: y\r\n\r\nbody");
    // The CRLF blank line wins even though a LF one comes first
    assert_eq!(headers.get("subject"), Some("a"));
    assert_eq!(headers.get("x"), Some("y"));
    assert_eq!(body, "body");
}

#[test]
fn test_split_lf_only() {
    let (headers, body) = split_headers_and_body("Subject: hi\n\nline one\n\nline two");
    assert_eq!(headers.get("Subject"), Some("hi"));
    assert_eq!(body, "line one\n\nline two");
}

#[test]
fn test_split_without_blank_line() {
    let (headers, body) = split_headers_and_body("Subject: orphan");
    assert!(headers.is_empty());
    assert_eq!(body, "Subject: orphan");
}

#[test]
fn test_parse_headers_folding_and_case() {
    let headers = parse_headers(
        "Content-Type: multipart/mixed;\r\n\tboundary=\"ABC\"\r\nSUBJECT:  spaced  \r\nnot a header line\r\n",
    );

    assert_eq!(headers.len(), 2);
    assert_eq!(
        headers.content_type(),
        "multipart/mixed; boundary=\"ABC\""
    );
    assert_eq!(headers.get("subject"), Some("spaced"));
}

#[test]
fn test_parse_headers_last_value_wins() {
    let headers = parse_headers("X-Tag: one\nX-Tag: two");
    assert_eq!(headers.get("x-tag"), Some("two"));
}

#[test]
fn test_parse_headers_leading_continuation_ignored() {
    let headers = parse_headers("  stray continuation\nFrom: a@b.c");
    assert_eq!(headers.len(), 1);
    assert_eq!(headers.get("from"), Some("a@b.c"));
}

#[test]
fn test_transfer_encoding_accessor() {
    let headers = parse_headers("Content-Transfer-Encoding: base64");
    assert_eq!(headers.transfer_encoding(), "base64");
    assert_eq!(headers.content_type(), "");
}

#[test]
fn test_boundary_extraction() {
    assert_eq!(boundary("multipart/mixed; boundary=\"AbC\""), "AbC");
    assert_eq!(boundary("multipart/mixed; Boundary=XyZ; charset=utf-8"), "XyZ");
    assert_eq!(boundary("multipart/mixed; BOUNDARY = \"with space\""), "with space");
    assert_eq!(boundary("text/plain"), "");
}

#[test]
fn test_split_multipart_parts() {
    let body = "preamble\r\n--sep\r\nfirst\r\n--sep\r\nsecond a\r\nsecond b\r\n--sep--\r\nepilogue";
    let parts = split_multipart(body, "sep");
    assert_eq!(parts, vec!["first", "second a\nsecond b"]);
}

#[test]
fn test_split_multipart_trailing_whitespace_on_delimiter() {
    let body = "--sep  \nonly\n--sep--\t\n";
    assert_eq!(split_multipart(body, "sep"), vec!["only"]);
}

#[test]
fn test_split_multipart_no_delimiter() {
    assert!(split_multipart("no parts here", "sep").is_empty());
}

#[test]
fn test_split_multipart_keeps_unterminated_last_part() {
    let body = "--sep\nfirst\n--sep\nsecond, cut off";
    assert_eq!(split_multipart(body, "sep"), vec!["first", "second, cut off"]);
}
