//! Discussion domain entities

use crate::core::error::DiscussionError;
use crate::core::topic::Topic;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Fewest rounds a discussion may be created with
pub const MIN_ROUNDS: u32 = 1;
/// Most rounds a discussion may be created with
pub const MAX_ROUNDS: u32 = 10;
/// Speaker label recorded for the user who posed the topic
pub const USER_LABEL: &str = "User";

/// Who authored a history entry
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Speaker {
    /// The human who supplied the topic
    User,
    /// A configured participant, by name
    Participant(String),
}

impl Speaker {
    pub fn label(&self) -> &str {
        match self {
            Speaker::User => USER_LABEL,
            Speaker::Participant(name) => name,
        }
    }

    pub fn is_user(&self) -> bool {
        matches!(self, Speaker::User)
    }
}

impl std::fmt::Display for Speaker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for Speaker {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.label())
    }
}

impl<'de> Deserialize<'de> for Speaker {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let label = String::deserialize(deserializer)?;
        Ok(if label == USER_LABEL {
            Speaker::User
        } else {
            Speaker::Participant(label)
        })
    }
}

/// One line of the conversation (Entity)
///
/// History is append-only and its order is the conversation itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub speaker: Speaker,
    pub text: String,
}

impl HistoryEntry {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            speaker: Speaker::User,
            text: text.into(),
        }
    }

    pub fn participant(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            speaker: Speaker::Participant(name.into()),
            text: text.into(),
        }
    }
}

impl std::fmt::Display for HistoryEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.speaker, self.text)
    }
}

/// Lifecycle of a discussion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiscussionState {
    /// Participants are taking turns
    InRound,
    /// Every round has been played; no further steps are accepted
    Complete,
}

/// What the cursor says should happen next
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Turn {
    /// The participant at `index` speaks in `round`
    Speak { index: usize, round: u32 },
    /// The last round just ended; the discussion is now complete
    Finished,
}

/// A multi-participant discussion (Entity)
///
/// Holds the topic, the full history and the round/turn cursor. The cursor
/// only moves through [`Discussion::next_turn`] and [`Discussion::record`],
/// which callers must not invoke concurrently.
#[derive(Debug, Clone)]
pub struct Discussion {
    topic: Topic,
    history: Vec<HistoryEntry>,
    round: u32,
    max_rounds: u32,
    cursor: usize,
    participant_count: usize,
    context_window: usize,
    state: DiscussionState,
}

impl Discussion {
    /// Open a discussion in round 1 with the topic as its first entry.
    pub fn new(
        topic: Topic,
        max_rounds: u32,
        participant_count: usize,
        context_window: usize,
    ) -> Result<Self, DiscussionError> {
        if !(MIN_ROUNDS..=MAX_ROUNDS).contains(&max_rounds) {
            return Err(DiscussionError::validation(
                "max_rounds",
                format!("must be between {MIN_ROUNDS} and {MAX_ROUNDS}, got {max_rounds}"),
            ));
        }
        if participant_count == 0 {
            return Err(DiscussionError::validation(
                "participants",
                "at least one participant is required",
            ));
        }

        let history = vec![HistoryEntry::user(topic.content())];
        Ok(Self {
            topic,
            history,
            round: 1,
            max_rounds,
            cursor: 0,
            participant_count,
            context_window,
            state: DiscussionState::InRound,
        })
    }

    pub fn topic(&self) -> &Topic {
        &self.topic
    }

    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn max_rounds(&self) -> u32 {
        self.max_rounds
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn participant_count(&self) -> usize {
        self.participant_count
    }

    pub fn context_window(&self) -> usize {
        self.context_window
    }

    pub fn state(&self) -> DiscussionState {
        self.state
    }

    pub fn is_complete(&self) -> bool {
        self.state == DiscussionState::Complete
    }

    /// Resolve whose turn it is, wrapping into the next round when the
    /// cursor has passed the last participant.
    ///
    /// Returns [`Turn::Finished`] exactly once, on the call that pushes the
    /// round past `max_rounds`; every later call is an `IllegalState` error.
    pub fn next_turn(&mut self) -> Result<Turn, DiscussionError> {
        if self.is_complete() {
            return Err(DiscussionError::IllegalState(
                "discussion is already complete".to_string(),
            ));
        }

        if self.cursor == self.participant_count {
            self.round += 1;
            self.cursor = 0;
            if self.round > self.max_rounds {
                self.state = DiscussionState::Complete;
                return Ok(Turn::Finished);
            }
        }

        Ok(Turn::Speak {
            index: self.cursor,
            round: self.round,
        })
    }

    /// Append the current participant's reply and move the cursor on.
    ///
    /// Only valid once per resolved turn: recording on a complete discussion,
    /// or twice before the next `next_turn`, is an `IllegalState` error and
    /// leaves the history untouched.
    pub fn record(
        &mut self,
        participant: impl Into<String>,
        text: impl Into<String>,
    ) -> Result<(), DiscussionError> {
        if self.is_complete() {
            return Err(DiscussionError::IllegalState(
                "cannot record on a complete discussion".to_string(),
            ));
        }
        if self.cursor >= self.participant_count {
            return Err(DiscussionError::IllegalState(
                "every participant has already spoken this round".to_string(),
            ));
        }
        self.history.push(HistoryEntry::participant(participant, text));
        self.cursor += 1;
        Ok(())
    }
}
