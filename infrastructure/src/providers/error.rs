//! Adapter failure kinds
//!
//! These never cross the [`LanguageModelAdapter`] boundary; the adapter
//! turns every one of them into a fallback reply.
//!
//! [`LanguageModelAdapter`]: roundtable_application::LanguageModelAdapter

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AdapterError {
    #[error("missing API credential")]
    MissingCredential,

    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("request timed out after {0:?}")]
    Timeout(std::time::Duration),

    #[error("API returned status {code}: {body}")]
    Status { code: u16, body: String },

    #[error("malformed response: {0}")]
    MalformedResponse(String),
}

impl AdapterError {
    /// Whether this is the expected demo-mode condition rather than a fault
    pub fn is_missing_credential(&self) -> bool {
        matches!(self, AdapterError::MissingCredential)
    }
}
