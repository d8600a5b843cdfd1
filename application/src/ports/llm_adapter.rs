//! Language model adapter port
//!
//! Defines the uniform capability every participant is bound to.

use async_trait::async_trait;
use roundtable_domain::HistoryEntry;
use std::sync::Arc;

/// Uniform wrapper around one external chat service.
///
/// `generate` is infallible by contract: transport errors, bad statuses,
/// malformed bodies, timeouts and missing credentials are all turned into a
/// fallback reply inside the adapter. Implementations may suspend for rate
/// limiting and network I/O.
#[async_trait]
pub trait LanguageModelAdapter: Send + Sync {
    /// Provider label used in logs and error-labelled fallbacks
    fn provider(&self) -> &str;

    /// Produce a reply to `prompt`, given the full discussion history.
    async fn generate(&self, prompt: &str, history: &[HistoryEntry]) -> String;
}

/// A named speaker bound to its adapter
#[derive(Clone)]
pub struct Participant {
    name: String,
    adapter: Arc<dyn LanguageModelAdapter>,
}

impl Participant {
    pub fn new(name: impl Into<String>, adapter: Arc<dyn LanguageModelAdapter>) -> Self {
        Self {
            name: name.into(),
            adapter,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn adapter(&self) -> &dyn LanguageModelAdapter {
        self.adapter.as_ref()
    }
}

impl std::fmt::Debug for Participant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Participant")
            .field("name", &self.name)
            .field("provider", &self.adapter.provider())
            .finish()
    }
}

/// Builds a fresh, ordered participant set.
///
/// Each call must return new adapter instances so that rate-limit state is
/// owned by a single discussion and never shared across sessions.
pub trait ParticipantFactory: Send + Sync {
    fn participants(&self) -> Vec<Participant>;

    /// Participant names in visiting order
    fn names(&self) -> Vec<String> {
        self.participants()
            .iter()
            .map(|p| p.name().to_string())
            .collect()
    }
}
