//! Discussion and session defaults.

use std::time::Duration;

/// System-wide discussion defaults
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscussionSettings {
    /// Round budget used when a caller does not specify one
    pub default_max_rounds: u32,
    /// Trailing history entries shown to a participant
    pub context_window: usize,
}

impl Default for DiscussionSettings {
    fn default() -> Self {
        Self {
            default_max_rounds: 5,
            context_window: 6,
        }
    }
}

impl DiscussionSettings {
    pub fn with_default_max_rounds(mut self, rounds: u32) -> Self {
        self.default_max_rounds = rounds;
        self
    }

    pub fn with_context_window(mut self, size: usize) -> Self {
        self.context_window = size;
        self
    }
}

/// Resource-lifetime policy for registry sessions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionPolicy {
    /// Sessions untouched for longer than this are reaped
    pub idle_timeout: Duration,
    /// How often the reaper runs
    pub reap_interval: Duration,
}

impl Default for SessionPolicy {
    fn default() -> Self {
        Self {
            idle_timeout: Duration::from_secs(2 * 60 * 60),
            reap_interval: Duration::from_secs(10 * 60),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = DiscussionSettings::default();
        assert_eq!(settings.default_max_rounds, 5);
        assert_eq!(settings.context_window, 6);

        let policy = SessionPolicy::default();
        assert_eq!(policy.idle_timeout.as_secs(), 7200);
        assert_eq!(policy.reap_interval.as_secs(), 600);
    }

    #[test]
    fn test_builders() {
        let settings = DiscussionSettings::default()
            .with_default_max_rounds(3)
            .with_context_window(0);
        assert_eq!(settings.default_max_rounds, 3);
        assert_eq!(settings.context_window, 0);
    }
}
