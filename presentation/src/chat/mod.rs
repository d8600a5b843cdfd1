//! Interactive topic loop
//!
//! Provides a readline-based loop that runs one discussion per topic.

mod repl;

pub use repl::{ChatRepl, ReplInput};
