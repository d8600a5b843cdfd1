//! Infrastructure layer for roundtable
//!
//! This crate contains adapters that implement the ports defined in the
//! application layer: the HTTP chat-completion adapter and its provider
//! profiles, configuration file loading, and the JSONL transcript logger.

pub mod config;
pub mod logging;
pub mod providers;

// Re-export commonly used types
pub use config::{
    ConfigError, ConfigLoader, FileConfig, FileDiscussionConfig, FileLoggingConfig,
    FileOutputConfig, FileParticipantConfig, FileServerConfig,
};
pub use logging::JsonlTranscriptLogger;
pub use providers::{
    AdapterError, ChatCompletionAdapter, FallbackMode, ProfileParticipantFactory, ProviderPreset,
    ProviderProfile, RateLimiter,
};
