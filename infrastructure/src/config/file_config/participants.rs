//! Participant configuration from TOML (`[[participants]]` tables)

use super::super::ConfigError;
use crate::providers::{FallbackMode, ProviderPreset, ProviderProfile};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// One `[[participants]]` entry
///
/// Every field except `preset` is optional; missing values come from the
/// preset, then from the shared profile defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileParticipantConfig {
    /// Speaker name; defaults to the preset's display name
    pub name: Option<String>,
    pub preset: ProviderPreset,
    pub base_url: Option<String>,
    /// Inline key. Prefer `api_key_env` for anything checked in.
    pub api_key: Option<String>,
    /// Environment variable holding the key
    pub api_key_env: Option<String>,
    pub model: Option<String>,
    pub temperature: Option<f32>,
    pub max_tokens: Option<u32>,
    pub min_interval_ms: Option<u64>,
    pub timeout_secs: Option<u64>,
    pub history_window: Option<usize>,
    pub fallback: Option<FallbackMode>,
}

impl FileParticipantConfig {
    pub fn from_preset(preset: ProviderPreset) -> Self {
        Self {
            preset,
            ..Default::default()
        }
    }

    /// Name this entry will speak under.
    pub fn resolved_name(&self) -> String {
        self.name
            .clone()
            .unwrap_or_else(|| self.preset.display_name().to_string())
    }

    fn resolve_api_key(&self) -> Option<String> {
        if let Some(key) = &self.api_key {
            return Some(key.clone());
        }
        let var = self
            .api_key_env
            .as_deref()
            .or_else(|| self.preset.default_api_key_env())?;
        std::env::var(var).ok()
    }

    /// Merge this entry over its preset into a complete profile.
    pub fn to_profile(&self) -> Result<ProviderProfile, ConfigError> {
        let name = self.resolved_name();
        let field = |f: &str| format!("participants.{name}.{f}");

        let base_url = self
            .base_url
            .clone()
            .or_else(|| self.preset.default_base_url().map(String::from))
            .ok_or_else(|| ConfigError::invalid(field("base_url"), "required for custom preset"))?;
        let model = self
            .model
            .clone()
            .or_else(|| self.preset.default_model().map(String::from))
            .ok_or_else(|| ConfigError::invalid(field("model"), "required for custom preset"))?;

        if self.min_interval_ms == Some(0) {
            return Err(ConfigError::invalid(field("min_interval_ms"), "must be > 0"));
        }
        if self.timeout_secs == Some(0) {
            return Err(ConfigError::invalid(field("timeout_secs"), "must be > 0"));
        }

        let mut profile = ProviderProfile::from_preset(self.preset);
        profile.name = name;
        profile.base_url = base_url;
        profile.model = model;
        profile.api_key = self.resolve_api_key();
        if let Some(t) = self.temperature {
            profile.temperature = t;
        }
        if let Some(n) = self.max_tokens {
            profile.max_tokens = n;
        }
        if let Some(ms) = self.min_interval_ms {
            profile.min_interval = Duration::from_millis(ms);
        }
        if let Some(secs) = self.timeout_secs {
            profile.timeout = Duration::from_secs(secs);
        }
        if let Some(n) = self.history_window {
            profile.history_window = n;
        }
        if let Some(mode) = self.fallback {
            profile.fallback = mode;
        }
        Ok(profile)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preset_defaults_fill_profile() {
        let entry = FileParticipantConfig {
            api_key: Some("sk-1".to_string()),
            ..FileParticipantConfig::from_preset(ProviderPreset::DeepSeek)
        };
        let profile = entry.to_profile().unwrap();
        assert_eq!(profile.name, "DeepSeek");
        assert_eq!(profile.base_url, "https://api.deepseek.com/v1");
        assert_eq!(profile.model, "deepseek-chat");
        assert_eq!(profile.credential(), Some("sk-1"));
        assert_eq!(profile.max_tokens, 200);
    }

    #[test]
    fn test_overrides_win() {
        let entry = FileParticipantConfig {
            name: Some("Skeptic".to_string()),
            model: Some("deepseek-reasoner".to_string()),
            temperature: Some(0.2),
            min_interval_ms: Some(1500),
            timeout_secs: Some(10),
            history_window: Some(3),
            fallback: Some(FallbackMode::ErrorLabel),
            ..FileParticipantConfig::from_preset(ProviderPreset::DeepSeek)
        };
        let profile = entry.to_profile().unwrap();
        assert_eq!(profile.name, "Skeptic");
        assert_eq!(profile.model, "deepseek-reasoner");
        assert_eq!(profile.temperature, 0.2);
        assert_eq!(profile.min_interval, Duration::from_millis(1500));
        assert_eq!(profile.timeout, Duration::from_secs(10));
        assert_eq!(profile.history_window, 3);
        assert_eq!(profile.fallback, FallbackMode::ErrorLabel);
    }

    #[test]
    fn test_custom_requires_endpoint_and_model() {
        let entry = FileParticipantConfig {
            name: Some("Local".to_string()),
            model: Some("llama3".to_string()),
            ..Default::default()
        };
        let err = entry.to_profile().unwrap_err();
        assert!(err.to_string().contains("participants.Local.base_url"));

        let entry = FileParticipantConfig {
            base_url: Some("http://localhost:11434/v1".to_string()),
            ..entry
        };
        assert!(entry.to_profile().is_ok());
    }

    #[test]
    fn test_zero_pacing_rejected() {
        let entry = FileParticipantConfig {
            min_interval_ms: Some(0),
            ..FileParticipantConfig::from_preset(ProviderPreset::Doubao)
        };
        assert!(entry.to_profile().is_err());
    }

    #[test]
    fn test_unset_key_env_means_no_credential() {
        let entry = FileParticipantConfig {
            api_key_env: Some("ROUNDTABLE_TEST_KEY_THAT_IS_NEVER_SET".to_string()),
            ..FileParticipantConfig::from_preset(ProviderPreset::Wenxin)
        };
        assert!(entry.to_profile().unwrap().credential().is_none());
    }
}
