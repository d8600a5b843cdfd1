//! Chat-service adapters
//!
//! [`ChatCompletionAdapter`] implements the
//! [`LanguageModelAdapter`](roundtable_application::LanguageModelAdapter)
//! port for any OpenAI-compatible endpoint. Per-service differences are
//! data, carried by a [`ProviderProfile`].

pub mod chat_completion;
pub mod error;
pub mod factory;
pub mod profile;
pub mod rate_limit;

pub use chat_completion::{ChatCompletionAdapter, ChatMessage, to_chat_messages};
pub use error::AdapterError;
pub use factory::ProfileParticipantFactory;
pub use profile::{FallbackMode, ProviderPreset, ProviderProfile, is_placeholder_key};
pub use rate_limit::RateLimiter;
