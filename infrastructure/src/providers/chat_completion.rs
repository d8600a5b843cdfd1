//! OpenAI-compatible chat-completion adapter
//!
//! One parametrized adapter serves every provider: the differences between
//! services live in the [`ProviderProfile`] it is built from.

use super::error::AdapterError;
use super::profile::{FallbackMode, ProviderProfile};
use super::rate_limit::RateLimiter;
use async_trait::async_trait;
use rand::seq::SliceRandom;
use roundtable_application::LanguageModelAdapter;
use roundtable_domain::{HistoryEntry, Speaker, preview};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::{debug, info, warn};

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatMessage {
    pub role: &'static str,
    pub content: String,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: MessageContent,
}

#[derive(Deserialize)]
struct MessageContent {
    content: Option<String>,
}

/// Translate the trailing `window` history entries into chat messages.
///
/// Topic entries become `user` messages and replies by any participant in
/// `roster` become `assistant` messages. Entries by speakers outside the
/// roster are skipped.
pub fn to_chat_messages(
    history: &[HistoryEntry],
    roster: &HashSet<String>,
    window: usize,
) -> Vec<ChatMessage> {
    let start = history.len().saturating_sub(window);
    history[start..]
        .iter()
        .filter_map(|entry| {
            let role = match &entry.speaker {
                Speaker::User => "user",
                Speaker::Participant(name) if roster.contains(name) => "assistant",
                Speaker::Participant(_) => return None,
            };
            Some(ChatMessage {
                role,
                content: entry.text.clone(),
            })
        })
        .collect()
}

/// Adapter for any service exposing `POST <base>/chat/completions`
pub struct ChatCompletionAdapter {
    profile: ProviderProfile,
    roster: HashSet<String>,
    client: reqwest::Client,
    limiter: RateLimiter,
}

impl ChatCompletionAdapter {
    /// Build an adapter; `roster` names every participant of the discussion
    /// so their replies can be mapped to the assistant role.
    pub fn new<I, S>(profile: ProviderProfile, roster: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let limiter = RateLimiter::new(profile.min_interval);
        let mut roster: HashSet<String> = roster.into_iter().map(Into::into).collect();
        roster.insert(profile.name.clone());
        Self {
            profile,
            roster,
            client: reqwest::Client::new(),
            limiter,
        }
    }

    /// Adapter that only knows its own name.
    pub fn from_profile(profile: ProviderProfile) -> Self {
        Self::new(profile, std::iter::empty::<String>())
    }

    pub fn profile(&self) -> &ProviderProfile {
        &self.profile
    }

    async fn request(&self, prompt: &str, history: &[HistoryEntry]) -> Result<String, AdapterError> {
        let api_key = self
            .profile
            .credential()
            .ok_or(AdapterError::MissingCredential)?;

        let mut messages = to_chat_messages(history, &self.roster, self.profile.history_window);
        messages.push(ChatMessage {
            role: "user",
            content: prompt.to_string(),
        });

        let payload = ChatCompletionRequest {
            model: &self.profile.model,
            messages,
            temperature: self.profile.temperature,
            max_tokens: self.profile.max_tokens,
        };

        let url = self.profile.completions_url();
        debug!("POST {} ({} messages)", url, payload.messages.len());

        let call = async {
            let response = self
                .client
                .post(&url)
                .bearer_auth(api_key)
                .json(&payload)
                .send()
                .await?;

            let status = response.status();
            let body = response.text().await?;
            Ok::<_, AdapterError>((status, body))
        };

        let (status, body) = tokio::time::timeout(self.profile.timeout, call)
            .await
            .map_err(|_| AdapterError::Timeout(self.profile.timeout))??;

        if !status.is_success() {
            return Err(AdapterError::Status {
                code: status.as_u16(),
                body: preview(&body, 200),
            });
        }

        let parsed: ChatCompletionResponse = serde_json::from_str(&body)
            .map_err(|e| AdapterError::MalformedResponse(e.to_string()))?;

        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .map(|content| content.trim().to_string())
            .filter(|content| !content.is_empty())
            .ok_or_else(|| AdapterError::MalformedResponse("no reply content".to_string()))
    }

    fn fallback(&self, error: &AdapterError) -> String {
        if self.profile.fallback == FallbackMode::Canned {
            if let Some(reply) = self.profile.canned_replies.choose(&mut rand::thread_rng()) {
                return reply.clone();
            }
        }
        format!("[{} Error] {}", self.profile.name, error)
    }
}

#[async_trait]
impl LanguageModelAdapter for ChatCompletionAdapter {
    fn provider(&self) -> &str {
        &self.profile.name
    }

    async fn generate(&self, prompt: &str, history: &[HistoryEntry]) -> String {
        self.limiter.wait().await;

        match self.request(prompt, history).await {
            Ok(reply) => reply,
            Err(e) if e.is_missing_credential() => {
                info!("{}: no API key configured, using fallback reply", self.profile.name);
                self.fallback(&e)
            }
            Err(e) => {
                warn!("{} call failed: {}", self.profile.name, e);
                self.fallback(&e)
            }
        }
    }
}

impl std::fmt::Debug for ChatCompletionAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatCompletionAdapter")
            .field("name", &self.profile.name)
            .field("base_url", &self.profile.base_url)
            .field("model", &self.profile.model)
            .field("has_credential", &self.profile.credential().is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::profile::ProviderPreset;
    use mockito::Matcher;
    use serde_json::json;
    use std::time::Duration;

    fn profile(base_url: &str) -> ProviderProfile {
        ProviderProfile::new("DeepSeek", base_url, "deepseek-chat")
            .with_api_key("sk-test")
            .with_fallback(FallbackMode::ErrorLabel)
            .with_min_interval(Duration::from_millis(1))
    }

    fn roster() -> Vec<&'static str> {
        vec!["DeepSeek", "Doubao", "Wenxin"]
    }

    #[test]
    fn test_role_mapping() {
        let history = vec![
            HistoryEntry::user("AI ethics"),
            HistoryEntry::participant("DeepSeek", "d1"),
            HistoryEntry::participant("Stranger", "??"),
            HistoryEntry::participant("Doubao", "b1"),
        ];
        let roster: HashSet<String> = roster().into_iter().map(String::from).collect();

        let messages = to_chat_messages(&history, &roster, 5);
        let roles: Vec<_> = messages.iter().map(|m| m.role).collect();
        assert_eq!(roles, vec!["user", "assistant", "assistant"]);
        assert_eq!(messages[2].content, "b1");
    }

    #[test]
    fn test_history_window_keeps_trailing_entries() {
        let history: Vec<_> = (0..8)
            .map(|i| HistoryEntry::participant("DeepSeek", format!("m{i}")))
            .collect();
        let roster: HashSet<String> = ["DeepSeek".to_string()].into();

        let messages = to_chat_messages(&history, &roster, 5);
        assert_eq!(messages.len(), 5);
        assert_eq!(messages[0].content, "m3");
        assert!(to_chat_messages(&history, &roster, 0).is_empty());
    }

    #[tokio::test]
    async fn test_generate_success() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/chat/completions")
            .match_header("authorization", "Bearer sk-test")
            .match_body(Matcher::PartialJson(json!({
                "model": "deepseek-chat",
                "max_tokens": 200,
                "messages": [
                    {"role": "user", "content": "AI ethics"},
                    {"role": "assistant", "content": "previous"},
                    {"role": "user", "content": "continue"}
                ]
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"choices":[{"message":{"role":"assistant","content":"  A thoughtful reply.  "}}]}"#)
            .create_async()
            .await;

        let adapter = ChatCompletionAdapter::new(profile(&server.url()), roster());
        let history = vec![
            HistoryEntry::user("AI ethics"),
            HistoryEntry::participant("Wenxin", "previous"),
        ];

        let reply = adapter.generate("continue", &history).await;
        assert_eq!(reply, "A thoughtful reply.");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_non_success_status_becomes_error_label() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/chat/completions")
            .with_status(503)
            .with_body("overloaded")
            .create_async()
            .await;

        let adapter = ChatCompletionAdapter::from_profile(profile(&server.url()));
        let reply = adapter.generate("p", &[]).await;
        assert!(reply.starts_with("[DeepSeek Error]"), "got: {reply}");
        assert!(reply.contains("503"));
    }

    #[tokio::test]
    async fn test_malformed_body_becomes_fallback() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/chat/completions")
            .with_status(200)
            .with_body(r#"{"unexpected": true}"#)
            .create_async()
            .await;

        let adapter = ChatCompletionAdapter::from_profile(profile(&server.url()));
        let reply = adapter.generate("p", &[]).await;
        assert!(reply.starts_with("[DeepSeek Error] malformed response"), "got: {reply}");
    }

    #[tokio::test]
    async fn test_empty_choices_becomes_fallback() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/chat/completions")
            .with_status(200)
            .with_body(r#"{"choices": []}"#)
            .create_async()
            .await;

        let adapter = ChatCompletionAdapter::from_profile(profile(&server.url()));
        let reply = adapter.generate("p", &[]).await;
        assert_eq!(reply, "[DeepSeek Error] malformed response: no reply content");
    }

    #[tokio::test]
    async fn test_missing_credential_uses_canned_reply_without_network() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/chat/completions")
            .expect(0)
            .create_async()
            .await;

        let mut profile = ProviderProfile::from_preset(ProviderPreset::Doubao)
            .with_api_key("your_doubao_api_key_here")
            .with_min_interval(Duration::from_millis(1));
        profile.base_url = server.url();
        let canned = profile.canned_replies.clone();

        let adapter = ChatCompletionAdapter::from_profile(profile);
        for _ in 0..3 {
            let reply = adapter.generate("p", &[]).await;
            assert!(canned.contains(&reply), "unexpected reply: {reply}");
        }
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_missing_credential_with_error_label() {
        let mut p = profile("http://127.0.0.1:1");
        p.api_key = None;
        let adapter = ChatCompletionAdapter::from_profile(p);
        assert_eq!(
            adapter.generate("p", &[]).await,
            "[DeepSeek Error] missing API credential"
        );
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_becomes_fallback() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let adapter = ChatCompletionAdapter::from_profile(profile(&format!("http://{addr}")));
        let reply = adapter.generate("p", &[]).await;
        assert!(reply.starts_with("[DeepSeek Error] request failed"), "got: {reply}");
    }

    #[tokio::test]
    async fn test_timeout_becomes_fallback() {
        // Accepts connections but never answers
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let _server = tokio::spawn(async move {
            let mut open = Vec::new();
            while let Ok((socket, _)) = listener.accept().await {
                open.push(socket);
            }
        });

        let adapter = ChatCompletionAdapter::from_profile(
            profile(&format!("http://{addr}")).with_timeout(Duration::from_millis(200)),
        );
        let reply = adapter.generate("p", &[]).await;
        assert_eq!(reply, "[DeepSeek Error] request timed out after 200ms");
    }

    #[test]
    fn test_roster_includes_own_name() {
        let adapter = ChatCompletionAdapter::from_profile(profile("http://localhost"));
        assert!(adapter.roster.contains("DeepSeek"));
        assert_eq!(adapter.provider(), "DeepSeek");
    }
}
