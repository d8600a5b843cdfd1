//! Live progress reporting while a discussion runs

pub mod reporter;
