//! Bulk discussion runner shared by one-shot mode and the interactive loop

use crate::cli::commands::OutputFormat;
use crate::output::console::ConsoleFormatter;
use crate::progress::reporter::{ProgressReporter, SimpleProgress};
use roundtable_application::{
    CreateDiscussionInput, DiscussionProgress, DiscussionSettings, NoProgress, NoTranscriptLogger,
    ParticipantFactory, TranscriptLogger, TurnOrchestrator,
};
use roundtable_domain::{DiscussionError, Transcript};
use std::io::IsTerminal;
use std::sync::Arc;

/// How a finished discussion is shown
#[derive(Debug, Clone, Copy, Default)]
pub struct RunOptions {
    pub output: OutputFormat,
    /// No progress output while the discussion runs
    pub quiet: bool,
}

/// Creates a discussion per topic and runs it to completion.
pub struct DiscussionRunner {
    factory: Arc<dyn ParticipantFactory>,
    settings: DiscussionSettings,
    logger: Arc<dyn TranscriptLogger>,
    options: RunOptions,
}

impl DiscussionRunner {
    pub fn new(factory: Arc<dyn ParticipantFactory>, settings: DiscussionSettings) -> Self {
        Self {
            factory,
            settings,
            logger: Arc::new(NoTranscriptLogger),
            options: RunOptions::default(),
        }
    }

    pub fn with_logger(mut self, logger: Arc<dyn TranscriptLogger>) -> Self {
        self.logger = logger;
        self
    }

    pub fn with_options(mut self, options: RunOptions) -> Self {
        self.options = options;
        self
    }

    pub fn participant_names(&self) -> Vec<String> {
        self.factory.names()
    }

    fn progress(&self, participants: Vec<String>) -> Box<dyn DiscussionProgress> {
        if self.options.quiet || self.options.output == OutputFormat::Json {
            Box::new(NoProgress)
        } else if std::io::stderr().is_terminal() {
            Box::new(ProgressReporter::new(participants))
        } else {
            Box::new(SimpleProgress)
        }
    }

    /// Run `topic` for `rounds` (or the configured default) rounds.
    pub async fn run(&self, topic: &str, rounds: Option<u32>) -> Result<Transcript, DiscussionError> {
        let input = CreateDiscussionInput::new(
            topic,
            rounds.unwrap_or(self.settings.default_max_rounds),
        )
        .with_context_window(self.settings.context_window);

        let mut orchestrator = TurnOrchestrator::create_with_logger(
            input,
            self.factory.participants(),
            Arc::clone(&self.logger),
        )?;
        let progress = self.progress(orchestrator.participant_names());
        orchestrator
            .run_to_completion_with_progress(progress.as_ref())
            .await
    }

    pub fn render(&self, transcript: &Transcript) -> String {
        match self.options.output {
            OutputFormat::Full => ConsoleFormatter::format(transcript),
            OutputFormat::Json => ConsoleFormatter::format_json(transcript),
        }
    }

    /// Run and print the transcript to stdout.
    pub async fn run_and_print(
        &self,
        topic: &str,
        rounds: Option<u32>,
    ) -> Result<Transcript, DiscussionError> {
        let transcript = self.run(topic, rounds).await?;
        println!("{}", self.render(&transcript));
        Ok(transcript)
    }
}
