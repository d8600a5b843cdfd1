//! Context windowing
//!
//! A participant never sees the whole transcript, only its trailing slice.
//! The window is recomputed on every step because history grows between
//! steps.

use crate::discussion::entities::HistoryEntry;

/// The last `min(size, history.len())` entries, in their original order.
pub fn context_window(history: &[HistoryEntry], size: usize) -> &[HistoryEntry] {
    let start = history.len().saturating_sub(size);
    &history[start..]
}

/// The window rendered as `speaker: text` lines joined by newlines.
pub fn render_context(history: &[HistoryEntry], size: usize) -> String {
    context_window(history, size)
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}
