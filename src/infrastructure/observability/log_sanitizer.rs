use std::sync::LazyLock;

use regex::Regex;

const MAX_PREVIEW_CHARS: usize = 80;

static EMAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\w.+-]+@[\w-]+\.[\w.-]+").unwrap());
static LONG_NUMBER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d[\d\s-]{5,}\d").unwrap());

/// Shortened, redacted view of learner text for log lines.
///
/// Transcripts are user speech and routinely contain names, e-mail addresses
/// and phone numbers; only a prefix ever reaches the logs.
pub fn preview_text(text: &str) -> String {
    let trimmed = text.trim();

    if trimmed.is_empty() {
        return String::from("[EMPTY]");
    }

    let total = trimmed.chars().count();
    let head: String = trimmed.chars().take(MAX_PREVIEW_CHARS).collect();
    let redacted = redact(&head);

    if total > MAX_PREVIEW_CHARS {
        format!("{}... ({} chars total)", redacted, total)
    } else {
        redacted
    }
}

fn redact(text: &str) -> String {
    let without_emails = EMAIL.replace_all(text, "[EMAIL]");
    LONG_NUMBER
        .replace_all(&without_emails, "[NUMBER]")
        .into_owned()
}
