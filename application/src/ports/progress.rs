//! Progress notification port
//!
//! Defines the interface for reporting progress while a discussion runs.

use roundtable_domain::Contribution;

/// Callback for progress updates during a discussion
///
/// Implementations live in the presentation layer (console, spinner, ...).
pub trait DiscussionProgress: Send + Sync {
    /// Called before the first turn of each round
    fn on_round_start(&self, _round: u32, _max_rounds: u32) {}

    /// Called right before a participant's adapter is invoked
    fn on_turn_start(&self, _participant: &str, _round: u32) {}

    /// Called once a participant's reply has been recorded
    fn on_contribution(&self, contribution: &Contribution);

    /// Called when the discussion reports done
    fn on_complete(&self, _rounds: u32) {}
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoProgress;

impl DiscussionProgress for NoProgress {
    fn on_contribution(&self, _contribution: &Contribution) {}
}
