//! Provider profiles
//!
//! A [`ProviderProfile`] carries everything that differs between the chat
//! services a participant can be bound to: endpoint, credential, model,
//! sampling parameters, pacing and the fallback set used when the service
//! cannot be reached. The three built-in presets mirror the services the
//! demo roster ships with.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// How an adapter degrades when a call cannot be completed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FallbackMode {
    /// Reply with one of the profile's canned responses
    #[default]
    Canned,
    /// Reply with `"[<Provider> Error] <detail>"`
    ErrorLabel,
}

/// Built-in provider presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderPreset {
    #[serde(alias = "deep_seek")]
    DeepSeek,
    Doubao,
    Wenxin,
    /// No defaults beyond the shared ones; endpoint and model are required
    #[default]
    Custom,
}

const DEEPSEEK_CANNED: &[&str] = &[
    "From a technical angle this topic deserves a closer look. Several factors interact here.",
    "Given current trends, a more systematic way of framing the problem would help.",
    "Interesting point. Let me add a few thoughts from a different angle.",
    "I agree with the analysis so far, and want to stress the challenges we would meet in practice.",
    "Weighing everything, the direction looks workable, provided we keep the key risks in view.",
];

const DOUBAO_CANNED: &[&str] = &[
    "This is a really interesting topic! I'd think about it from the user's point of view.",
    "I'm with the previous speaker, and I'd like to add something about novelty.",
    "Practically speaking, we have to balance the ideal against what is achievable.",
    "This reminds me of a related case that might be instructive.",
    "All in all the idea has real potential and is worth exploring further.",
];

const WENXIN_CANNED: &[&str] = &[
    "Seen through accumulated experience, this question has real depth.",
    "We should combine historical lessons with modern thinking to analyse it.",
    "It is a genuinely complex problem and calls for looking at both sides.",
    "I'd like to share a few observations about its cultural and social impact.",
    "On reflection, this direction brings opportunities as well as challenges.",
];

impl ProviderPreset {
    /// Display name, used as the default participant name
    pub fn display_name(&self) -> &'static str {
        match self {
            ProviderPreset::DeepSeek => "DeepSeek",
            ProviderPreset::Doubao => "Doubao",
            ProviderPreset::Wenxin => "Wenxin",
            ProviderPreset::Custom => "Custom",
        }
    }

    pub fn default_base_url(&self) -> Option<&'static str> {
        match self {
            ProviderPreset::DeepSeek => Some("https://api.deepseek.com/v1"),
            ProviderPreset::Doubao => Some("https://ark.cn-beijing.volces.com/api/v3"),
            ProviderPreset::Wenxin => Some("https://qianfan.baidubce.com/v2"),
            ProviderPreset::Custom => None,
        }
    }

    pub fn default_model(&self) -> Option<&'static str> {
        match self {
            ProviderPreset::DeepSeek => Some("deepseek-chat"),
            ProviderPreset::Doubao => Some("doubao-pro-32k"),
            ProviderPreset::Wenxin => Some("ernie-4.0-8k"),
            ProviderPreset::Custom => None,
        }
    }

    /// Environment variable consulted when no key is configured
    pub fn default_api_key_env(&self) -> Option<&'static str> {
        match self {
            ProviderPreset::DeepSeek => Some("DEEPSEEK_API_KEY"),
            ProviderPreset::Doubao => Some("DOUBAO_API_KEY"),
            ProviderPreset::Wenxin => Some("WENXIN_API_KEY"),
            ProviderPreset::Custom => None,
        }
    }

    pub fn canned_replies(&self) -> &'static [&'static str] {
        match self {
            ProviderPreset::DeepSeek | ProviderPreset::Custom => DEEPSEEK_CANNED,
            ProviderPreset::Doubao => DOUBAO_CANNED,
            ProviderPreset::Wenxin => WENXIN_CANNED,
        }
    }

    /// The three presets of the demo roster, in speaking order
    pub fn demo_roster() -> [ProviderPreset; 3] {
        [
            ProviderPreset::DeepSeek,
            ProviderPreset::Doubao,
            ProviderPreset::Wenxin,
        ]
    }
}

/// Everything one adapter needs to talk to one chat service
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderProfile {
    /// Participant name; also the provider label in fallbacks
    pub name: String,
    pub base_url: String,
    pub api_key: Option<String>,
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    /// Minimum spacing between two calls through the same adapter
    pub min_interval: Duration,
    /// Upper bound on one network round trip
    pub timeout: Duration,
    /// Trailing history entries forwarded as chat messages
    pub history_window: usize,
    pub fallback: FallbackMode,
    pub canned_replies: Vec<String>,
}

impl ProviderProfile {
    pub const DEFAULT_TEMPERATURE: f32 = 0.7;
    pub const DEFAULT_MAX_TOKENS: u32 = 200;
    pub const DEFAULT_MIN_INTERVAL: Duration = Duration::from_millis(1000);
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
    pub const DEFAULT_HISTORY_WINDOW: usize = 5;

    /// Profile for a custom OpenAI-compatible endpoint.
    pub fn new(
        name: impl Into<String>,
        base_url: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            base_url: base_url.into(),
            api_key: None,
            model: model.into(),
            temperature: Self::DEFAULT_TEMPERATURE,
            max_tokens: Self::DEFAULT_MAX_TOKENS,
            min_interval: Self::DEFAULT_MIN_INTERVAL,
            timeout: Self::DEFAULT_TIMEOUT,
            history_window: Self::DEFAULT_HISTORY_WINDOW,
            fallback: FallbackMode::default(),
            canned_replies: ProviderPreset::Custom
                .canned_replies()
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }

    /// Profile with a preset's defaults, in demo mode (no credential).
    pub fn from_preset(preset: ProviderPreset) -> Self {
        let mut profile = Self::new(
            preset.display_name(),
            preset.default_base_url().unwrap_or_default(),
            preset.default_model().unwrap_or_default(),
        );
        profile.canned_replies = preset
            .canned_replies()
            .iter()
            .map(|s| s.to_string())
            .collect();
        profile
    }

    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    pub fn with_fallback(mut self, mode: FallbackMode) -> Self {
        self.fallback = mode;
        self
    }

    pub fn with_min_interval(mut self, interval: Duration) -> Self {
        self.min_interval = interval;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_history_window(mut self, size: usize) -> Self {
        self.history_window = size;
        self
    }

    /// The credential to send, or `None` when it is absent or a placeholder.
    pub fn credential(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !is_placeholder_key(key))
    }

    /// `<base_url>/chat/completions`, tolerating a trailing slash
    pub fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }
}

/// Empty keys and template values like `your_deepseek_api_key_here`.
pub fn is_placeholder_key(key: &str) -> bool {
    let key = key.trim();
    key.is_empty() || (key.starts_with("your_") && key.ends_with("_here"))
}
