//! Application-level configuration.
//!
//! - [`DiscussionSettings`] - defaults applied when a discussion is created
//! - [`SessionPolicy`] - how long idle sessions live and how often they are reaped

pub mod discussion_settings;

pub use discussion_settings::{DiscussionSettings, SessionPolicy};
