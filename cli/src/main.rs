//! CLI entrypoint for roundtable
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result};
use clap::Parser;
use roundtable_application::{
    NoTranscriptLogger, ParticipantFactory, SessionRegistry, SystemClock, TranscriptLogger,
};
use roundtable_infrastructure::{
    ConfigLoader, FileConfig, JsonlTranscriptLogger, ProfileParticipantFactory,
};
use roundtable_presentation::{
    AppState, ChatRepl, Cli, DiscussionRunner, RunOptions, ServerConfig, start_server,
};
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity level; RUST_LOG wins when set
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_deref());
        return Ok(());
    }

    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_deref()).context("Failed to load configuration")?
    };

    if !config.output.color {
        colored::control::set_override(false);
    }

    info!("Starting roundtable");

    // === Dependency Injection ===
    let factory: Arc<dyn ParticipantFactory> =
        Arc::new(ProfileParticipantFactory::new(config.profiles()?));
    let logger = transcript_logger(&cli, &config);
    let settings = config.discussion.to_settings();

    if cli.serve {
        let policy = config.server.to_session_policy();
        let registry = SessionRegistry::new(Arc::new(SystemClock), policy.idle_timeout);
        let state = AppState::new(registry, factory, settings).with_logger(logger);

        let server_config = ServerConfig {
            host: cli.host.clone().unwrap_or(config.server.host.clone()),
            port: cli.port.unwrap_or(config.server.port),
            reap_interval: policy.reap_interval,
        };
        return start_server(Arc::new(state), server_config).await;
    }

    let runner = DiscussionRunner::new(factory, settings)
        .with_logger(logger)
        .with_options(RunOptions {
            output: cli.output,
            quiet: cli.quiet,
        });

    match cli.topic {
        Some(topic) => {
            runner.run_and_print(&topic, cli.rounds).await?;
        }
        None => {
            ChatRepl::new(runner).with_rounds(cli.rounds).run().await?;
        }
    }

    Ok(())
}

/// JSONL transcript from `--transcript`, else `[logging] transcript`.
fn transcript_logger(cli: &Cli, config: &FileConfig) -> Arc<dyn TranscriptLogger> {
    let path: Option<&Path> = cli
        .transcript
        .as_deref()
        .or(config.logging.transcript.as_deref());

    match path.map(JsonlTranscriptLogger::new) {
        Some(Some(logger)) => {
            info!("Writing transcript to {}", logger.path().display());
            Arc::new(logger)
        }
        Some(None) => {
            warn!("Transcript logging disabled");
            Arc::new(NoTranscriptLogger)
        }
        None => Arc::new(NoTranscriptLogger),
    }
}
