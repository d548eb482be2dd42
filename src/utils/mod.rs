//! Text helpers shared by the bot handlers.

use std::sync::LazyLock;

use regex::Regex;

static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("whitespace pattern is valid"));
static MENTION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"@\w+\s*").expect("mention pattern is valid"));

/// Longest prompt text forwarded to the model, in characters.
const MAX_PROMPT_CHARS: usize = 4000;

/// Clean up an inbound message before it becomes prompt text: collapse
/// whitespace runs, strip `@mentions`, cap the length.
pub fn sanitize_message(text: &str) -> String {
    let collapsed = WHITESPACE.replace_all(text.trim(), " ");
    let cleaned = MENTION.replace_all(&collapsed, "");
    truncate_text(cleaned.trim(), MAX_PROMPT_CHARS, "...")
}

/// Truncate to at most `max_chars` characters (not bytes), replacing the
/// tail with `suffix` when something was cut.
pub fn truncate_text(text: &str, max_chars: usize, suffix: &str) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let keep = max_chars.saturating_sub(suffix.chars().count());
    let mut out: String = text.chars().take(keep).collect();
    out.push_str(suffix);
    out
}

/// Split a message into chunks of at most `limit` bytes, never inside a
/// UTF-8 character. Prefers paragraph breaks, then single newlines, and
/// hard-cuts only when a chunk has neither.
pub fn split_message(text: &str, limit: usize) -> Vec<String> {
    if text.len() <= limit {
        return vec![text.to_string()];
    }

    let mut chunks = Vec::new();
    let mut rest = text;
    while rest.len() > limit {
        let at = split_point(rest, limit);
        let (head, tail) = rest.split_at(at);
        let trimmed = head.trim();
        if !trimmed.is_empty() {
            chunks.push(trimmed.to_string());
        }
        rest = tail.trim_start_matches('\n');
    }
    let trimmed = rest.trim();
    if !trimmed.is_empty() {
        chunks.push(trimmed.to_string());
    }
    chunks
}

fn split_point(text: &str, limit: usize) -> usize {
    let mut boundary = limit;
    while boundary > 0 && !text.is_char_boundary(boundary) {
        boundary -= 1;
    }
    if boundary == 0 {
        // Single character wider than the limit; emit it whole.
        return text
            .char_indices()
            .nth(1)
            .map_or(text.len(), |(i, _)| i);
    }

    let window = &text[..boundary];
    if let Some(idx) = window.rfind("\n\n") {
        return idx;
    }
    if let Some(idx) = window.rfind('\n') {
        return idx;
    }
    boundary
}

#[cfg(test)]
mod tests;
