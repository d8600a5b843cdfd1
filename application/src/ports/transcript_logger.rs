//! Port for structured transcript logging.
//!
//! Separate from `tracing` diagnostics: this captures what was said, in a
//! machine-readable form (one record per event).

use serde_json::Value;

/// A structured transcript event
pub struct TranscriptEvent {
    /// Event type identifier ("discussion_started", "contribution", ...)
    pub event_type: &'static str,
    /// Event-specific fields
    pub payload: Value,
}

impl TranscriptEvent {
    pub fn new(event_type: &'static str, payload: Value) -> Self {
        Self {
            event_type,
            payload,
        }
    }
}

/// Port for recording transcript events.
///
/// `log` is synchronous and non-fallible; write failures are swallowed by
/// the implementation so they never interrupt a discussion.
pub trait TranscriptLogger: Send + Sync {
    fn log(&self, event: TranscriptEvent);
}

/// No-op implementation for tests and when logging is disabled.
pub struct NoTranscriptLogger;

impl TranscriptLogger for NoTranscriptLogger {
    fn log(&self, _event: TranscriptEvent) {}
}
