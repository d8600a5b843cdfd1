//! Progress reporting for discussion runs

use crate::output::console::ConsoleFormatter;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use roundtable_application::DiscussionProgress;
use roundtable_domain::{Contribution, preview};
use std::sync::Mutex;

/// Reports progress with a per-round progress bar
///
/// Each reply is echoed above the bar as a short colored preview; the full
/// text is printed with the transcript once the discussion ends.
pub struct ProgressReporter {
    participants: Vec<String>,
    round_bar: Mutex<Option<ProgressBar>>,
}

impl ProgressReporter {
    pub fn new(participants: Vec<String>) -> Self {
        Self {
            participants,
            round_bar: Mutex::new(None),
        }
    }

    fn round_style() -> ProgressStyle {
        ProgressStyle::default_bar()
            .template("{spinner:.green} {prefix:.bold.cyan} [{bar:30.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=>-")
    }

    fn bar(&self) -> std::sync::MutexGuard<'_, Option<ProgressBar>> {
        self.round_bar.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl DiscussionProgress for ProgressReporter {
    fn on_round_start(&self, round: u32, max_rounds: u32) {
        let pb = ProgressBar::new(self.participants.len() as u64);
        pb.set_style(Self::round_style());
        pb.set_prefix(format!("Round {round}/{max_rounds}"));
        pb.enable_steady_tick(std::time::Duration::from_millis(120));

        if let Some(previous) = self.bar().replace(pb) {
            previous.finish_and_clear();
        }
    }

    fn on_turn_start(&self, participant: &str, _round: u32) {
        if let Some(pb) = self.bar().as_ref() {
            pb.set_message(format!("{participant} is thinking..."));
        }
    }

    fn on_contribution(&self, contribution: &Contribution) {
        let short = Contribution {
            reply: preview(&contribution.reply, 60),
            ..contribution.clone()
        };
        let line = ConsoleFormatter::format_contribution(&short, &self.participants);
        match self.bar().as_ref() {
            Some(pb) => {
                pb.println(line);
                pb.inc(1);
            }
            None => eprintln!("{line}"),
        }
    }

    fn on_complete(&self, rounds: u32) {
        if let Some(pb) = self.bar().take() {
            pb.finish_with_message(format!("{} after {} rounds", "done".green(), rounds));
        }
    }
}

/// Simple text-based progress on stderr (no fancy UI)
pub struct SimpleProgress;

impl DiscussionProgress for SimpleProgress {
    fn on_round_start(&self, round: u32, max_rounds: u32) {
        eprintln!("{}", ConsoleFormatter::round_banner(round, max_rounds));
    }

    fn on_contribution(&self, contribution: &Contribution) {
        eprintln!("  {} {}", "v".green(), contribution.participant);
    }

    fn on_complete(&self, rounds: u32) {
        eprintln!("{} {} rounds complete", "->".cyan(), rounds);
    }
}
