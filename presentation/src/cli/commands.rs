//! CLI command definitions

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Output format for a finished discussion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Numbered transcript grouped by round
    #[default]
    Full,
    /// JSON transcript
    Json,
}

/// CLI arguments for roundtable
#[derive(Parser, Debug)]
#[command(name = "roundtable")]
#[command(author, version, about = "Round-robin discussion between several language models")]
#[command(long_about = r#"
Roundtable seats several language models at one table and lets them discuss
a topic in turns. Every round each participant sees the most recent part of
the conversation and adds one reply.

Without a topic, an interactive loop asks for topics until you type q.
With --serve, an HTTP server exposes discussions one step at a time.

Configuration files are loaded from (in priority order):
1. ROUNDTABLE_* environment variables
2. --config <path>          Explicit config file
3. ./roundtable.toml        Project-level config
4. ~/.config/roundtable/config.toml   Global config

Example:
  roundtable "Should cities ban cars from the centre?"
  roundtable --rounds 3 --output json "Is remote work here to stay?"
  roundtable --serve --port 5000
"#)]
pub struct Cli {
    /// Topic to discuss (omit for the interactive loop)
    pub topic: Option<String>,

    /// Number of rounds (1-10); defaults to the configured value
    #[arg(short, long, value_name = "N")]
    pub rounds: Option<u32>,

    /// Run the HTTP server instead of a terminal discussion
    #[arg(long)]
    pub serve: bool,

    /// Address to bind in server mode
    #[arg(long, value_name = "HOST")]
    pub host: Option<String>,

    /// Port to bind in server mode
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "full")]
    pub output: OutputFormat,

    /// Append a JSONL transcript of every event to this file
    #[arg(long, value_name = "PATH")]
    pub transcript: Option<PathBuf>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}
