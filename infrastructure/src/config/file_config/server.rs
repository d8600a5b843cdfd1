//! Web server configuration from TOML (`[server]` section)

use roundtable_application::SessionPolicy;
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileServerConfig {
    pub host: String,
    pub port: u16,
    /// Seconds a session may sit untouched before it is reaped
    pub idle_timeout_secs: u64,
    /// Seconds between reaper sweeps
    pub reap_interval_secs: u64,
}

impl Default for FileServerConfig {
    fn default() -> Self {
        let policy = SessionPolicy::default();
        Self {
            host: "127.0.0.1".to_string(),
            port: 5000,
            idle_timeout_secs: policy.idle_timeout.as_secs(),
            reap_interval_secs: policy.reap_interval.as_secs(),
        }
    }
}

impl FileServerConfig {
    pub fn to_session_policy(&self) -> SessionPolicy {
        SessionPolicy {
            idle_timeout: Duration::from_secs(self.idle_timeout_secs),
            reap_interval: Duration::from_secs(self.reap_interval_secs),
        }
    }
}
