//! Presentation layer for roundtable
//!
//! This crate contains the CLI definition, console output formatting,
//! progress reporters, the interactive topic loop and the HTTP server that
//! exposes discussions one step at a time.

pub mod chat;
pub mod cli;
pub mod output;
pub mod progress;
pub mod runner;
pub mod server;

// Re-export commonly used types
pub use chat::ChatRepl;
pub use cli::commands::{Cli, OutputFormat};
pub use output::console::ConsoleFormatter;
pub use progress::reporter::{ProgressReporter, SimpleProgress};
pub use runner::{DiscussionRunner, RunOptions};
pub use server::{AppState, ServerConfig, build_router, spawn_reaper, start_server};
