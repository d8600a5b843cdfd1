//! String helpers for log lines.

/// Shorten `text` to at most `max_chars` characters, appending `...` when cut.
///
/// Counts characters rather than bytes so multi-byte replies (CJK, emoji)
/// are never split mid-codepoint.
pub fn preview(text: &str, max_chars: usize) -> String {
    let mut chars = text.char_indices();
    match chars.nth(max_chars) {
        None => text.to_string(),
        Some((cut, _)) => format!("{}...", &text[..cut]),
    }
}
