use oratio::infrastructure::observability::preview_text;

#[test]
fn given_empty_text_when_previewing_then_returns_empty_marker() {
    assert_eq!(preview_text(""), "[EMPTY]");
    assert_eq!(preview_text("  \n "), "[EMPTY]");
}

#[test]
fn given_short_text_when_previewing_then_returns_trimmed_text() {
    assert_eq!(preview_text("  I like football  "), "I like football");
}

#[test]
fn given_long_text_when_previewing_then_truncates_with_total_length() {
    let text = "a".repeat(150);

    let preview = preview_text(&text);

    assert!(preview.starts_with(&"a".repeat(80)));
    assert!(preview.ends_with("... (150 chars total)"));
}

#[test]
fn given_multibyte_text_when_previewing_then_truncates_on_char_boundary() {
    let text = "ệ".repeat(100);

    let preview = preview_text(&text);

    assert!(preview.starts_with(&"ệ".repeat(80)));
    assert!(preview.contains("(100 chars total)"));
}

#[test]
fn given_email_when_previewing_then_redacts_address() {
    let preview = preview_text("my email is learner.one@example.com thanks");
    assert_eq!(preview, "my email is [EMAIL] thanks");
}

#[test]
fn given_phone_number_when_previewing_then_redacts_digits() {
    let preview = preview_text("call me on 0912 345 678 tomorrow");
    assert!(preview.contains("[NUMBER]"));
    assert!(!preview.contains("345"));
}

#[test]
fn given_short_numbers_when_previewing_then_keeps_them() {
    assert_eq!(preview_text("I am 25 years old"), "I am 25 years old");
}
