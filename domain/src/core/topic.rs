//! Topic value object

use crate::core::error::DiscussionError;
use serde::{Deserialize, Serialize};

/// The subject a discussion is about (Value Object)
///
/// Set once when the discussion is created and never changed afterwards.
/// Surrounding whitespace is trimmed; an empty topic is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Topic {
    content: String,
}

impl Topic {
    pub fn try_new(content: impl Into<String>) -> Result<Self, DiscussionError> {
        let content = content.into();
        let trimmed = content.trim();
        if trimmed.is_empty() {
            return Err(DiscussionError::validation("topic", "topic cannot be empty"));
        }
        Ok(Self {
            content: trimmed.to_string(),
        })
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn into_content(self) -> String {
        self.content
    }
}

impl std::fmt::Display for Topic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.content)
    }
}

impl TryFrom<String> for Topic {
    type Error = DiscussionError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Topic::try_new(value)
    }
}

impl TryFrom<&str> for Topic {
    type Error = DiscussionError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Topic::try_new(value)
    }
}

impl From<Topic> for String {
    fn from(topic: Topic) -> Self {
        topic.content
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_topic_is_trimmed() {
        let topic = Topic::try_new("  AI ethics \n").unwrap();
        assert_eq!(topic.content(), "AI ethics");
        assert_eq!(topic.to_string(), "AI ethics");
    }

    #[test]
    fn test_empty_topic_rejected() {
        for input in ["", "   ", "\t\n"] {
            let err = Topic::try_new(input).unwrap_err();
            assert_eq!(err.field(), Some("topic"));
        }
    }

    #[test]
    fn test_topic_deserialize_validates() {
        let ok: Topic = serde_json::from_str("\"Rust vs Go\"").unwrap();
        assert_eq!(ok.content(), "Rust vs Go");
        assert!(serde_json::from_str::<Topic>("\"  \"").is_err());
    }
}
