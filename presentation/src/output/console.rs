//! Console output formatter for discussion transcripts

use colored::{Color, Colorize};
use roundtable_domain::{Contribution, Transcript};

/// Rotating palette; participant `i` gets `PALETTE[i % len]`
const PALETTE: [Color; 6] = [
    Color::Green,
    Color::Magenta,
    Color::Cyan,
    Color::Yellow,
    Color::Blue,
    Color::Red,
];

/// Formats transcripts for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Color assigned to the participant at `index` in visiting order
    pub fn participant_color(index: usize) -> Color {
        PALETTE[index % PALETTE.len()]
    }

    fn color_for(participants: &[String], name: &str) -> Color {
        participants
            .iter()
            .position(|p| p == name)
            .map(Self::participant_color)
            .unwrap_or(Color::White)
    }

    /// Format the complete transcript, numbered and grouped by round
    pub fn format(transcript: &Transcript) -> String {
        let mut output = String::new();

        output.push_str(&Self::header("Roundtable Transcript"));
        output.push('\n');

        output.push_str(&format!(
            "{} {}\n",
            "Topic:".cyan().bold(),
            transcript.topic
        ));
        output.push_str(&format!(
            "{} {}\n",
            "Participants:".cyan().bold(),
            transcript.participants.join(", ")
        ));

        let mut number = 0;
        for round in 1..=transcript.max_rounds {
            output.push_str(&Self::section_header(&format!(
                "Round {}/{}",
                round, transcript.max_rounds
            )));
            for contribution in transcript.round(round) {
                number += 1;
                output.push_str(&format!(
                    "\n{}\n",
                    Self::numbered(number, contribution, &transcript.participants)
                ));
            }
        }

        output.push_str(&Self::footer());
        output
    }

    /// Format as JSON
    pub fn format_json(transcript: &Transcript) -> String {
        serde_json::to_string_pretty(transcript).unwrap_or_else(|_| "{}".to_string())
    }

    /// One contribution as it arrives, colored by speaker
    pub fn format_contribution(contribution: &Contribution, participants: &[String]) -> String {
        let color = Self::color_for(participants, &contribution.participant);
        format!(
            "{} {}",
            format!("{}:", contribution.participant).color(color).bold(),
            contribution.reply
        )
    }

    fn numbered(number: usize, contribution: &Contribution, participants: &[String]) -> String {
        format!(
            "{} {}",
            format!("{number}.").dimmed(),
            Self::format_contribution(contribution, participants)
        )
    }

    pub fn round_banner(round: u32, max_rounds: u32) -> String {
        format!("{}", format!("── Round {round}/{max_rounds} ──").cyan().bold())
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}", title.cyan().bold(), "-".repeat(40))
    }

    fn footer() -> String {
        format!("\n{}\n", "=".repeat(60).cyan())
    }
}
