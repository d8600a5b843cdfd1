//! Core domain concepts shared across all subdomains.
//!
//! - [`topic::Topic`] - a validated discussion topic
//! - [`error::DiscussionError`] - validation and state-machine errors
//! - [`string::preview`] - log-friendly text shortening

pub mod error;
pub mod string;
pub mod topic;
