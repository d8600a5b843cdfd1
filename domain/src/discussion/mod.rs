//! Discussion domain
//!
//! The discussion entity and its round/turn cursor, the value objects
//! produced by stepping it, and the context window shown to participants.

pub mod context_window;
pub mod entities;
pub mod value_objects;
