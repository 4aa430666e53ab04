use email_signal::*;

// --- ParsedContent ---

#[test]
fn test_merge_missing_keeps_first_found() {
    let mut content = ParsedContent::new("first", "");
    content.merge_missing(ParsedContent::new("second", "<p>html</p>"));

    assert_eq!(content.text, "first");
    assert_eq!(content.html, "<p>html</p>");
    assert!(content.is_complete());
}

#[test]
fn test_parsed_content_empty() {
    let content = ParsedContent::default();
    assert!(content.is_empty());
    assert!(!content.is_complete());
}

// --- EmailAddress ---

#[test]
fn test_email_address_parse_with_name() {
    let addr = EmailAddress::parse("John Doe <john@example.com>").unwrap();
    assert_eq!(addr.address, "john@example.com");
    assert_eq!(addr.domain(), "example.com");
    assert_eq!(addr.name.as_deref(), Some("John Doe"));
}

#[test]
fn test_email_address_parse_quoted_name() {
    let addr = EmailAddress::parse("\"Jane Smith\" <jane@mail.com>").unwrap();
    assert_eq!(addr.name.as_deref(), Some("Jane Smith"));
    assert_eq!(addr.address, "jane@mail.com");
}

#[test]
fn test_email_address_parse_plain() {
    let addr = EmailAddress::parse("alice@company.org").unwrap();
    assert_eq!(addr.address, "alice@company.org");
    assert!(addr.name.is_none());
}

#[test]
fn test_email_address_parse_angle_no_name() {
    let addr = EmailAddress::parse("<bob@test.io>").unwrap();
    assert_eq!(addr.address, "bob@test.io");
    assert!(addr.name.is_none());
}

#[test]
fn test_email_address_parse_invalid() {
    assert!(EmailAddress::parse("not-an-email").is_none());
    assert!(EmailAddress::parse("Name <no-at-sign>").is_none());
    assert!(EmailAddress::parse("").is_none());
}

#[test]
fn test_email_address_parse_list() {
    let list = EmailAddress::parse_list("a@x.test, B <b@y.test>, garbage");
    assert_eq!(list.len(), 2);
    assert_eq!(list[1].to_string(), "B <b@y.test>");
}

#[test]
fn test_email_address_display_without_name() {
    let addr = EmailAddress::parse("bob@test.com").unwrap();
    assert_eq!(addr.to_string(), "bob@test.com");
}
