//! Domain layer for roundtable
//!
//! This crate contains the conversation model shared by every other layer:
//! the topic, the append-only history, the round/turn cursor of a
//! [`Discussion`], and the pure context-window function that decides what a
//! participant gets to see. It has no knowledge of providers, HTTP or I/O.
//!
//! # Core Concepts
//!
//! - **Participant**: a named speaker bound (in the application layer) to one
//!   language model adapter, visited in fixed order every round
//! - **Round**: one full pass through all participants
//! - **Step**: one contribution by exactly one participant, or the
//!   round-boundary check that ends the discussion

pub mod core;
pub mod discussion;
pub mod prompt;

// Re-export commonly used types
pub use core::{error::DiscussionError, string::preview, topic::Topic};
pub use discussion::{
    context_window::{context_window, render_context},
    entities::{
        Discussion, DiscussionState, HistoryEntry, MAX_ROUNDS, MIN_ROUNDS, Speaker, Turn,
        USER_LABEL,
    },
    value_objects::{Contribution, StepOutcome, Transcript},
};
pub use prompt::PromptTemplate;
