//! Prompt templates for discussion turns

pub mod template;

pub use template::PromptTemplate;
