//! Turn-rotation orchestrator
//!
//! Drives a [`Discussion`] one step at a time: pick the participant under the
//! cursor, build its prompt from the context window, call its adapter, and
//! record the reply. Bulk mode is just "step until done".

use crate::ports::llm_adapter::Participant;
use crate::ports::progress::{DiscussionProgress, NoProgress};
use crate::ports::transcript_logger::{NoTranscriptLogger, TranscriptEvent, TranscriptLogger};
use roundtable_domain::{
    Contribution, Discussion, DiscussionError, PromptTemplate, StepOutcome, Topic, Transcript,
    Turn, USER_LABEL, preview, render_context,
};
use serde_json::json;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, info};

/// Input for creating a discussion
#[derive(Debug, Clone)]
pub struct CreateDiscussionInput {
    pub topic: String,
    pub max_rounds: u32,
    pub context_window: usize,
}

impl CreateDiscussionInput {
    pub fn new(topic: impl Into<String>, max_rounds: u32) -> Self {
        Self {
            topic: topic.into(),
            max_rounds,
            context_window: crate::config::DiscussionSettings::default().context_window,
        }
    }

    pub fn with_context_window(mut self, size: usize) -> Self {
        self.context_window = size;
        self
    }
}

/// Owns one discussion and the participants taking part in it.
///
/// Not internally synchronized: callers must not run two `step` calls on the
/// same orchestrator at once. The session registry wraps each orchestrator
/// in an async mutex for exactly that reason.
pub struct TurnOrchestrator {
    discussion: Discussion,
    participants: Vec<Participant>,
    logger: Arc<dyn TranscriptLogger>,
}

impl std::fmt::Debug for TurnOrchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TurnOrchestrator")
            .field("discussion", &self.discussion)
            .field("participants", &self.participants)
            .finish_non_exhaustive()
    }
}

impl TurnOrchestrator {
    /// Validate the input and open the discussion in round 1.
    pub fn create(
        input: CreateDiscussionInput,
        participants: Vec<Participant>,
    ) -> Result<Self, DiscussionError> {
        Self::create_with_logger(input, participants, Arc::new(NoTranscriptLogger))
    }

    pub fn create_with_logger(
        input: CreateDiscussionInput,
        participants: Vec<Participant>,
        logger: Arc<dyn TranscriptLogger>,
    ) -> Result<Self, DiscussionError> {
        let topic = Topic::try_new(input.topic)?;
        validate_participants(&participants)?;
        let discussion = Discussion::new(
            topic,
            input.max_rounds,
            participants.len(),
            input.context_window,
        )?;

        let names: Vec<&str> = participants.iter().map(|p| p.name()).collect();
        info!(
            "Discussion created: topic={:?}, participants=[{}], max_rounds={}, context_window={}",
            discussion.topic().content(),
            names.join(", "),
            discussion.max_rounds(),
            discussion.context_window()
        );
        logger.log(TranscriptEvent::new(
            "discussion_started",
            json!({
                "topic": discussion.topic().content(),
                "participants": names,
                "max_rounds": discussion.max_rounds(),
                "context_window": discussion.context_window(),
            }),
        ));

        Ok(Self {
            discussion,
            participants,
            logger,
        })
    }

    pub fn discussion(&self) -> &Discussion {
        &self.discussion
    }

    pub fn participant_names(&self) -> Vec<String> {
        self.participants
            .iter()
            .map(|p| p.name().to_string())
            .collect()
    }

    pub fn is_complete(&self) -> bool {
        self.discussion.is_complete()
    }

    /// Advance the discussion by one step.
    pub async fn step(&mut self) -> Result<StepOutcome, DiscussionError> {
        self.step_with_progress(&NoProgress).await
    }

    /// Advance by one step, reporting to `progress`.
    ///
    /// Either exactly one participant speaks and its reply is appended to
    /// history, or the round budget is exhausted and `Done` is returned with
    /// nothing appended. Calling this after `Done` is an `IllegalState` error.
    pub async fn step_with_progress(
        &mut self,
        progress: &dyn DiscussionProgress,
    ) -> Result<StepOutcome, DiscussionError> {
        let (index, round) = match self.discussion.next_turn()? {
            Turn::Finished => {
                let rounds = self.discussion.max_rounds();
                info!("Discussion complete after {} rounds", rounds);
                self.logger.log(TranscriptEvent::new(
                    "discussion_completed",
                    json!({
                        "rounds": rounds,
                        "entries": self.discussion.history().len(),
                    }),
                ));
                progress.on_complete(rounds);
                return Ok(StepOutcome::Done);
            }
            Turn::Speak { index, round } => (index, round),
        };

        let max_rounds = self.discussion.max_rounds();
        if index == 0 {
            info!("Round {}/{} started", round, max_rounds);
            progress.on_round_start(round, max_rounds);
        }

        let participant = &self.participants[index];
        let context = render_context(self.discussion.history(), self.discussion.context_window());
        let prompt = PromptTemplate::turn_prompt(&context);

        debug!(
            "Requesting {} (round {}/{}, turn {})",
            participant.name(),
            round,
            max_rounds,
            index + 1
        );
        progress.on_turn_start(participant.name(), round);

        let reply = participant
            .adapter()
            .generate(&prompt, self.discussion.history())
            .await;

        debug!("{} replied: {}", participant.name(), preview(&reply, 100));

        let contribution = Contribution {
            participant: participant.name().to_string(),
            reply,
            round,
            max_rounds,
        };
        self.discussion
            .record(&contribution.participant, &contribution.reply)?;

        self.logger.log(TranscriptEvent::new(
            "contribution",
            json!({
                "participant": contribution.participant,
                "provider": participant.adapter().provider(),
                "round": round,
                "text": contribution.reply,
            }),
        ));
        progress.on_contribution(&contribution);

        Ok(StepOutcome::Contribution(contribution))
    }

    /// Step until done and return the whole transcript.
    pub async fn run_to_completion(&mut self) -> Result<Transcript, DiscussionError> {
        self.run_to_completion_with_progress(&NoProgress).await
    }

    pub async fn run_to_completion_with_progress(
        &mut self,
        progress: &dyn DiscussionProgress,
    ) -> Result<Transcript, DiscussionError> {
        let mut contributions = Vec::new();
        loop {
            match self.step_with_progress(progress).await? {
                StepOutcome::Contribution(c) => contributions.push(c),
                StepOutcome::Done => break,
            }
        }

        Ok(Transcript {
            topic: self.discussion.topic().content().to_string(),
            participants: self.participant_names(),
            max_rounds: self.discussion.max_rounds(),
            entries: self.discussion.history().to_vec(),
            contributions,
        })
    }
}

fn validate_participants(participants: &[Participant]) -> Result<(), DiscussionError> {
    let mut seen = HashSet::new();
    for participant in participants {
        let name = participant.name();
        if name.trim().is_empty() {
            return Err(DiscussionError::validation(
                "participants",
                "participant name cannot be empty",
            ));
        }
        if name == USER_LABEL {
            return Err(DiscussionError::validation(
                "participants",
                format!("'{USER_LABEL}' is reserved for the topic author"),
            ));
        }
        if !seen.insert(name) {
            return Err(DiscussionError::validation(
                "participants",
                format!("duplicate participant name '{name}'"),
            ));
        }
    }
    Ok(())
}
