//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and converted into application settings
//! and provider profiles after validation.

mod discussion;
mod output;
mod participants;
mod server;

pub use discussion::FileDiscussionConfig;
pub use output::{FileLoggingConfig, FileOutputConfig};
pub use participants::FileParticipantConfig;
pub use server::FileServerConfig;

use super::ConfigError;
use crate::providers::{ProviderPreset, ProviderProfile};
use roundtable_domain::{MAX_ROUNDS, MIN_ROUNDS, USER_LABEL};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Round and context defaults
    pub discussion: FileDiscussionConfig,
    /// Web server and session lifetime
    pub server: FileServerConfig,
    /// Terminal output settings
    pub output: FileOutputConfig,
    /// Structured transcript logging
    pub logging: FileLoggingConfig,
    /// Speakers in visiting order; empty means the built-in demo roster
    pub participants: Vec<FileParticipantConfig>,
}

impl FileConfig {
    /// Participant entries, falling back to DeepSeek, Doubao and Wenxin.
    pub fn participant_entries(&self) -> Vec<FileParticipantConfig> {
        if self.participants.is_empty() {
            ProviderPreset::demo_roster()
                .into_iter()
                .map(FileParticipantConfig::from_preset)
                .collect()
        } else {
            self.participants.clone()
        }
    }

    /// Resolve every participant into a provider profile.
    pub fn profiles(&self) -> Result<Vec<ProviderProfile>, ConfigError> {
        self.participant_entries()
            .iter()
            .map(FileParticipantConfig::to_profile)
            .collect()
    }

    /// Validate the entire configuration, stopping at the first problem.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let rounds = self.discussion.max_rounds;
        if !(MIN_ROUNDS..=MAX_ROUNDS).contains(&rounds) {
            return Err(ConfigError::invalid(
                "discussion.max_rounds",
                format!("must be between {MIN_ROUNDS} and {MAX_ROUNDS}, got {rounds}"),
            ));
        }
        if self.server.idle_timeout_secs == 0 {
            return Err(ConfigError::invalid("server.idle_timeout_secs", "must be > 0"));
        }
        if self.server.reap_interval_secs == 0 {
            return Err(ConfigError::invalid("server.reap_interval_secs", "must be > 0"));
        }

        let mut seen = HashSet::new();
        for entry in self.participant_entries() {
            let name = entry.resolved_name();
            if name.trim().is_empty() {
                return Err(ConfigError::invalid("participants.name", "must not be empty"));
            }
            if name == USER_LABEL {
                return Err(ConfigError::invalid(
                    "participants.name",
                    format!("'{USER_LABEL}' is reserved for the topic author"),
                ));
            }
            if !seen.insert(name.clone()) {
                return Err(ConfigError::invalid(
                    "participants.name",
                    format!("duplicate participant '{name}'"),
                ));
            }
            entry.to_profile()?;
        }
        Ok(())
    }
}
