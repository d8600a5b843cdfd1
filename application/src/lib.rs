//! Application layer for roundtable
//!
//! This crate contains the turn-rotation use case, the session registry,
//! and the port definitions that infrastructure adapters implement.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod registry;
pub mod use_cases;

// Re-export commonly used types
pub use config::{DiscussionSettings, SessionPolicy};
pub use ports::{
    clock::{Clock, ManualClock, SystemClock},
    llm_adapter::{LanguageModelAdapter, Participant, ParticipantFactory},
    progress::{DiscussionProgress, NoProgress},
    transcript_logger::{NoTranscriptLogger, TranscriptEvent, TranscriptLogger},
};
pub use registry::{RegistryError, SessionHandle, SessionRegistry};
pub use use_cases::orchestrator::{CreateDiscussionInput, TurnOrchestrator};
