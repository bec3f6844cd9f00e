use tracing::info;

use super::MoodAnalyst;
use crate::client::CatalogApi;

pub const MOOD_COMMAND: &str = "mood_analyzer";

/// A parsed inbound task
#[derive(Debug, PartialEq)]
pub enum Command {
    Empty,
    /// Mood command without a description
    MissingMood,
    Mood(String),
    Unknown(String),
}

impl Command {
    /// Parse a raw task: trimmed, optional leading `/`, case-insensitive
    pub fn parse(task: &str) -> Self {
        let task = task.trim();
        let task = task.strip_prefix('/').unwrap_or(task).to_lowercase();

        let mut words = task.split_whitespace();
        match words.next() {
            None => Command::Empty,
            Some(MOOD_COMMAND) => {
                let description = words.collect::<Vec<_>>().join(" ");
                if description.is_empty() {
                    Command::MissingMood
                } else {
                    Command::Mood(description)
                }
            }
            Some(other) => Command::Unknown(other.to_string()),
        }
    }
}

impl<C: CatalogApi> MoodAnalyst<C> {
    /// Route a task to its handler and return the reply text
    pub fn process_task(&self, task: &str) -> String {
        info!("Processing task: {task}");

        match Command::parse(task) {
            Command::Empty => format!("No command provided. Available commands: {MOOD_COMMAND}"),
            Command::MissingMood => format!(
                "Please describe your mood. Example: '{MOOD_COMMAND} I feel happy and energetic'"
            ),
            Command::Mood(description) => self.recommend(&description),
            Command::Unknown(command) => {
                format!("Unknown command '{command}'. Available commands: {MOOD_COMMAND}")
            }
        }
    }
}
