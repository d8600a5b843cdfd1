//! Discussion configuration from TOML (`[discussion]` section)

use roundtable_application::DiscussionSettings;
use serde::{Deserialize, Serialize};

/// Raw discussion defaults from TOML
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileDiscussionConfig {
    /// Rounds used when a caller does not pick a number
    pub max_rounds: u32,
    /// Trailing history entries shown to a participant
    pub context_window: usize,
}

impl Default for FileDiscussionConfig {
    fn default() -> Self {
        let settings = DiscussionSettings::default();
        Self {
            max_rounds: settings.default_max_rounds,
            context_window: settings.context_window,
        }
    }
}

impl FileDiscussionConfig {
    pub fn to_settings(&self) -> DiscussionSettings {
        DiscussionSettings::default()
            .with_default_max_rounds(self.max_rounds)
            .with_context_window(self.context_window)
    }
}
