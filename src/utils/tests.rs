use super::{sanitize_message, split_message, truncate_text};

#[test]
fn sanitize_collapses_whitespace() {
    assert_eq!(
        sanitize_message("  how   do\n\nI  write a\tfunction  "),
        "how do I write a function"
    );
}

#[test]
fn sanitize_strips_mentions() {
    assert_eq!(
        sanitize_message("@guildbot can you explain ownership?"),
        "can you explain ownership?"
    );
    assert_eq!(sanitize_message("hey @guildbot @someone hi"), "hey hi");
}

#[test]
fn sanitize_caps_length() {
    let long = "x".repeat(5000);
    let cleaned = sanitize_message(&long);
    assert_eq!(cleaned.chars().count(), 4000);
    assert!(cleaned.ends_with("..."));
}

#[test]
fn truncate_counts_chars_not_bytes() {
    let text = "é".repeat(10);
    assert_eq!(truncate_text(&text, 10, "..."), text);
    let cut = truncate_text(&text, 8, "...");
    assert_eq!(cut.chars().count(), 8);
    assert!(cut.ends_with("..."));
}

#[test]
fn short_message_is_not_split() {
    assert_eq!(split_message("hello", 4096), vec!["hello"]);
}

#[test]
fn split_prefers_paragraph_breaks() {
    let text = "first paragraph\n\nsecond paragraph";
    assert_eq!(
        split_message(text, 25),
        vec!["first paragraph", "second paragraph"]
    );
}

#[test]
fn split_falls_back_to_newline() {
    let chunks = split_message("one line\nanother line\nthird", 15);
    assert_eq!(chunks[0], "one line");
}

#[test]
fn split_hard_cuts_unbroken_text() {
    let text = "a".repeat(250);
    let chunks = split_message(&text, 100);
    assert_eq!(chunks.len(), 3);
    assert_eq!(chunks[0].len(), 100);
    assert_eq!(chunks[2].len(), 50);
}

#[test]
fn split_respects_utf8_boundaries() {
    let text = "\u{1F980}".repeat(30); // 4-byte crab, 120 bytes
    for chunk in split_message(&text, 10) {
        assert!(chunk.chars().all(|c| c == '\u{1F980}'));
        assert!(chunk.len() <= 10 || chunk.chars().count() == 1);
    }
}

#[test]
fn split_drops_blank_chunks() {
    let chunks = split_message("a\n\n\n\nb\n\n\n\nc", 3);
    assert!(chunks.iter().all(|c| !c.trim().is_empty()));
}
