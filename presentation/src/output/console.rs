//! Console output formatter for debate results

use crate::output::formatter::OutputFormatter;
use colored::Colorize;
use council_domain::{DebateRecord, ResponseUnit};

/// Formats debate results for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Format the complete debate
    pub fn format(record: &DebateRecord) -> String {
        let mut output = String::new();

        output.push_str(&Self::header("LLM Council Debate"));
        output.push('\n');

        output.push_str(&format!(
            "{} {}\n\n",
            "Topic:".cyan().bold(),
            record.topic()
        ));
        output.push_str(&format!(
            "{} {}\n",
            "Participants:".cyan().bold(),
            record.participating_agents().join(", ")
        ));

        for (index, round) in record.rounds().iter().enumerate() {
            output.push_str(&Self::section_header(&format!(
                "Round {}/{}",
                index + 1,
                record.rounds().len()
            )));
            for response in round.iter() {
                output.push_str(&Self::response(response));
            }
        }

        output.push_str(&Self::section_header("Final Synthesis"));
        if let Some(author) = record.participating_agents().first() {
            output.push_str(&format!("\n{}\n", format!("Written by {}", author).yellow().bold()));
        }
        output.push_str(&format!("\n{}\n", record.synthesis()));

        let failed = record.failed_responses().count();
        output.push_str(&format!(
            "\n{} {}\n",
            "Total tokens:".dimmed(),
            record.total_tokens()
        ));
        if failed > 0 {
            output.push_str(&format!(
                "{}\n",
                format!("{} response(s) failed and were recorded as errors", failed).red()
            ));
        }

        output.push_str(&Self::footer());

        output
    }

    /// Format as JSON (the persisted transcript)
    pub fn format_json(record: &DebateRecord) -> String {
        record
            .to_json_pretty()
            .unwrap_or_else(|_| "{}".to_string())
    }

    /// Format synthesis only (concise output)
    pub fn format_synthesis_only(record: &DebateRecord) -> String {
        let mut output = String::new();

        output.push_str(&format!(
            "{}\n\n",
            "=== LLM Council Synthesis ===".cyan().bold()
        ));

        output.push_str(&format!("{} {}\n\n", "Topic:".bold(), record.topic()));

        output.push_str(&format!(
            "{} {}\n\n",
            "Council:".dimmed(),
            record.participating_agents().join(", ")
        ));

        output.push_str(record.synthesis());
        output.push('\n');

        output
    }

    fn response(response: &ResponseUnit) -> String {
        let tokens = response
            .tokens_used
            .map(|t| format!(" [{} tokens]", t))
            .unwrap_or_default();
        let title = format!("── {} ({}){} ──", response.agent_name, response.model, tokens);

        match response.error_detail() {
            Some(detail) => format!("\n{}\nError: {}\n", title.red().bold(), detail),
            None => format!("\n{}\n{}\n", title.yellow().bold(), response.content),
        }
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn footer() -> String {
        format!("\n{}\n", "=".repeat(60).cyan())
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format(&self, record: &DebateRecord) -> String {
        Self::format(record)
    }

    fn format_json(&self, record: &DebateRecord) -> String {
        Self::format_json(record)
    }

    fn format_synthesis_only(&self, record: &DebateRecord) -> String {
        Self::format_synthesis_only(record)
    }
}
