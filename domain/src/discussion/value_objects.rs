//! Discussion value objects - what a step or a whole run produces.
//!
//! - [`Contribution`] - one participant's reply within a round
//! - [`StepOutcome`] - result of advancing the discussion by one step
//! - [`Transcript`] - the complete record of a finished discussion

use crate::discussion::entities::HistoryEntry;
use serde::{Deserialize, Serialize};

/// A single participant's turn
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contribution {
    /// Participant that spoke
    pub participant: String,
    /// Reply text, possibly a fallback if the provider failed
    pub reply: String,
    /// Round this turn belongs to (1-based)
    pub round: u32,
    /// Configured round budget
    pub max_rounds: u32,
}

/// Result of one orchestrator step
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    /// A participant spoke
    Contribution(Contribution),
    /// The round budget is spent; nothing was said on this step
    Done,
}

impl StepOutcome {
    pub fn is_done(&self) -> bool {
        matches!(self, StepOutcome::Done)
    }

    pub fn contribution(&self) -> Option<&Contribution> {
        match self {
            StepOutcome::Contribution(c) => Some(c),
            StepOutcome::Done => None,
        }
    }
}

/// Complete record of a discussion run to completion
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transcript {
    pub topic: String,
    /// Participant names in visiting order
    pub participants: Vec<String>,
    pub max_rounds: u32,
    /// Full history, starting with the topic entry
    pub entries: Vec<HistoryEntry>,
    /// Contributions in the order they were made
    pub contributions: Vec<Contribution>,
}

impl Transcript {
    /// Contributions made in `round`
    pub fn round(&self, round: u32) -> impl Iterator<Item = &Contribution> {
        self.contributions.iter().filter(move |c| c.round == round)
    }
}
