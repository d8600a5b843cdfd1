//! Domain error types

use thiserror::Error;

/// Errors raised while creating or advancing a discussion.
///
/// Provider failures are deliberately absent: adapters turn them into
/// fallback replies that are recorded in history like any other turn.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DiscussionError {
    #[error("invalid {field}: {reason}")]
    Validation { field: &'static str, reason: String },

    #[error("illegal state: {0}")]
    IllegalState(String),
}

impl DiscussionError {
    pub fn validation(field: &'static str, reason: impl Into<String>) -> Self {
        DiscussionError::Validation {
            field,
            reason: reason.into(),
        }
    }

    /// Name of the offending input field, if this is a validation error
    pub fn field(&self) -> Option<&'static str> {
        match self {
            DiscussionError::Validation { field, .. } => Some(field),
            DiscussionError::IllegalState(_) => None,
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, DiscussionError::Validation { .. })
    }

    pub fn is_illegal_state(&self) -> bool {
        matches!(self, DiscussionError::IllegalState(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_names_field() {
        let error = DiscussionError::validation("max_rounds", "must be between 1 and 10");
        assert_eq!(error.field(), Some("max_rounds"));
        assert_eq!(
            error.to_string(),
            "invalid max_rounds: must be between 1 and 10"
        );
    }

    #[test]
    fn test_error_kind_checks() {
        let state = DiscussionError::IllegalState("discussion is complete".into());
        assert!(state.is_illegal_state());
        assert!(!state.is_validation());
        assert_eq!(state.field(), None);
        assert!(DiscussionError::validation("topic", "empty").is_validation());
    }
}
