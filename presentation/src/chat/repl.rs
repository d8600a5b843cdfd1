//! REPL (Read-Eval-Print Loop) asking for discussion topics

use crate::runner::DiscussionRunner;
use colored::Colorize;
use rustyline::error::ReadlineError;
use rustyline::{DefaultEditor, Result as RlResult};

/// What a line typed at the prompt means
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplInput {
    Quit,
    Empty,
    Topic(String),
}

impl ReplInput {
    pub fn parse(line: &str) -> Self {
        let line = line.trim();
        match line.to_lowercase().as_str() {
            "q" | "quit" | "exit" => ReplInput::Quit,
            "" => ReplInput::Empty,
            _ => ReplInput::Topic(line.to_string()),
        }
    }
}

/// Interactive topic loop
pub struct ChatRepl {
    runner: DiscussionRunner,
    rounds: Option<u32>,
}

impl ChatRepl {
    pub fn new(runner: DiscussionRunner) -> Self {
        Self {
            runner,
            rounds: None,
        }
    }

    /// Rounds per discussion; the configured default when unset
    pub fn with_rounds(mut self, rounds: Option<u32>) -> Self {
        self.rounds = rounds;
        self
    }

    /// Run the interactive REPL
    pub async fn run(&self) -> RlResult<()> {
        let mut rl = DefaultEditor::new()?;

        let history_path = dirs::data_dir().map(|p| p.join("roundtable").join("history.txt"));

        if let Some(ref path) = history_path {
            if let Some(parent) = path.parent() {
                let _ = std::fs::create_dir_all(parent);
            }
            let _ = rl.load_history(path);
        }

        self.print_welcome();

        loop {
            match rl.readline("Topic> ") {
                Ok(line) => match ReplInput::parse(&line) {
                    ReplInput::Quit => {
                        println!("Bye!");
                        break;
                    }
                    ReplInput::Empty => {
                        eprintln!("{} topic must not be empty", "Error:".red().bold());
                    }
                    ReplInput::Topic(topic) => {
                        let _ = rl.add_history_entry(topic.as_str());
                        if let Err(e) = self.runner.run_and_print(&topic, self.rounds).await {
                            eprintln!("{} {}", "Error:".red().bold(), e);
                        }
                    }
                },
                Err(ReadlineError::Interrupted) => {
                    println!("^C");
                    continue;
                }
                Err(ReadlineError::Eof) => {
                    println!("Bye!");
                    break;
                }
                Err(err) => {
                    eprintln!("Error: {:?}", err);
                    break;
                }
            }
        }

        if let Some(ref path) = history_path {
            let _ = rl.save_history(path);
        }

        Ok(())
    }

    fn print_welcome(&self) {
        println!();
        println!("╭─────────────────────────────────────────────╮");
        println!("│                 Roundtable                  │");
        println!("╰─────────────────────────────────────────────╯");
        println!();
        println!("Participants: {}", self.runner.participant_names().join(", "));
        println!();
        println!("Type a topic to start a discussion, or q to quit.");
        println!();
    }
}
