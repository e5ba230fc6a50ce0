//! Markdown report rendering.
//!
//! The report reads as an article: a metadata table up front, two Mermaid
//! diagrams (debate flow and token distribution), every round in full and
//! the synthesis at the end.

use super::{file_stem, write_file};
use chrono::DateTime;
use council_application::{ResultStore, StoreError};
use council_domain::{DebateRecord, ResponseUnit};
use std::path::{Path, PathBuf};
use tracing::info;

/// Renders a [`DebateRecord`] as a Markdown document.
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkdownRenderer;

impl MarkdownRenderer {
    pub fn render(&self, record: &DebateRecord) -> String {
        let mut lines: Vec<String> = Vec::new();

        lines.push(format!("# {}", record.topic()));
        lines.push(String::new());
        lines.push("*LLM Council debate report*".to_string());
        lines.push(String::new());
        lines.extend(Self::metadata_table(record));
        lines.push(String::new());

        lines.push("## Debate Flow".to_string());
        lines.push(String::new());
        lines.extend(Self::flow_diagram(record));
        lines.push(String::new());

        lines.push("## Token Usage".to_string());
        lines.push(String::new());
        lines.extend(Self::token_chart(record));
        lines.push(String::new());

        lines.push("## Round-by-Round".to_string());
        for (index, round) in record.rounds().iter().enumerate() {
            lines.push(String::new());
            lines.push(format!("### Round {}", index + 1));
            for response in round.iter() {
                lines.push(String::new());
                lines.extend(Self::response_section(response));
            }
        }
        lines.push(String::new());

        lines.push("## Synthesis".to_string());
        lines.push(String::new());
        if let Some(author) = record.participating_agents().first() {
            lines.push(format!("*Written by {}*", author));
            lines.push(String::new());
        }
        lines.push(record.synthesis().trim_end().to_string());
        lines.push(String::new());

        lines.join("\n")
    }

    fn metadata_table(record: &DebateRecord) -> Vec<String> {
        let date = DateTime::parse_from_rfc3339(record.timestamp())
            .map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
            .unwrap_or_else(|_| record.timestamp().to_string());
        let failed = record.failed_responses().count();

        let mut rows = vec![
            "| | |".to_string(),
            "|---|---|".to_string(),
            format!("| **Date** | {} |", date),
            format!(
                "| **Participants** | {} |",
                record.participating_agents().join(", ")
            ),
            format!("| **Rounds** | {} |", record.rounds().len()),
            format!("| **Total tokens** | {} |", record.total_tokens()),
        ];
        if failed > 0 {
            rows.push(format!("| **Failed responses** | {} |", failed));
        }
        rows
    }

    fn flow_diagram(record: &DebateRecord) -> Vec<String> {
        let mut lines = vec![
            "```mermaid".to_string(),
            "flowchart TD".to_string(),
            format!("    topic([\"{}\"])", mermaid_label(record.topic())),
        ];

        let mut previous = "topic".to_string();
        for (index, round) in record.rounds().iter().enumerate() {
            let id = format!("r{}", index + 1);
            lines.push(format!("    subgraph {}[\"Round {}\"]", id, index + 1));
            for (seat, response) in round.iter().enumerate() {
                let marker = if response.is_error() { " (failed)" } else { "" };
                lines.push(format!(
                    "        {}a{}[\"{}{}\"]",
                    id,
                    seat + 1,
                    mermaid_label(&response.agent_name),
                    marker
                ));
            }
            lines.push("    end".to_string());
            lines.push(format!("    {} --> {}", previous, id));
            previous = id;
        }

        let author = record
            .participating_agents()
            .first()
            .map(|name| format!("Synthesis by {}", mermaid_label(name)))
            .unwrap_or_else(|| "Synthesis".to_string());
        lines.push(format!("    {} --> synthesis([\"{}\"])", previous, author));
        lines.push("```".to_string());
        lines
    }

    fn token_chart(record: &DebateRecord) -> Vec<String> {
        let usage = record.tokens_by_agent();
        if usage.iter().all(|(_, tokens)| *tokens == 0) {
            return vec!["_No token usage was reported._".to_string()];
        }

        let mut lines = vec![
            "```mermaid".to_string(),
            "pie title Tokens by agent".to_string(),
        ];
        for (agent, tokens) in usage {
            lines.push(format!("    \"{}\" : {}", mermaid_label(&agent), tokens));
        }
        lines.push("```".to_string());
        lines
    }

    fn response_section(response: &ResponseUnit) -> Vec<String> {
        let tokens = response
            .tokens_used
            .map(|t| format!(" · {} tokens", t))
            .unwrap_or_default();
        let mut lines = vec![
            format!(
                "#### {} (`{}`){}",
                response.agent_name, response.model, tokens
            ),
            String::new(),
        ];
        match response.error_detail() {
            Some(detail) => lines.push(format!("> **Failed:** {}", detail)),
            None => lines.push(response.content.trim_end().to_string()),
        }
        lines
    }
}

/// Mermaid labels are quoted; embedded quotes and line breaks would end them.
fn mermaid_label(text: &str) -> String {
    text.replace('"', "#quot;").replace(['\n', '\r'], " ")
}

/// Writes `debate_<stamp>.md` into a directory.
#[derive(Debug, Clone)]
pub struct MarkdownResultStore {
    directory: PathBuf,
    renderer: MarkdownRenderer,
}

impl MarkdownResultStore {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
            renderer: MarkdownRenderer,
        }
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }
}

impl ResultStore for MarkdownResultStore {
    fn save(&self, record: &DebateRecord) -> Result<Vec<PathBuf>, StoreError> {
        let document = self.renderer.render(record);
        let path = write_file(
            &self.directory,
            &format!("{}.md", file_stem(record)),
            &document,
        )?;
        info!("Saved debate report to {}", path.display());
        Ok(vec![path])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::test_support::sample_record;

    #[test]
    fn test_render_header_and_metadata() {
        let doc = MarkdownRenderer.render(&sample_record());

        assert!(doc.starts_with("# Is Rust a good fit for CLIs?\n"));
        assert!(doc.contains("| **Date** | 2024-05-17 14:03:09 |"));
        assert!(doc.contains("| **Participants** | Claude, Gemini |"));
        assert!(doc.contains("| **Rounds** | 2 |"));
        assert!(doc.contains("| **Total tokens** | 260 |"));
        assert!(doc.contains("| **Failed responses** | 1 |"));
    }

    #[test]
    fn test_render_flow_diagram() {
        let doc = MarkdownRenderer.render(&sample_record());

        assert!(doc.contains("flowchart TD"));
        assert!(doc.contains("subgraph r1[\"Round 1\"]"));
        assert!(doc.contains("r2a2[\"Gemini (failed)\"]"));
        assert!(doc.contains("topic --> r1"));
        assert!(doc.contains("r1 --> r2"));
        assert!(doc.contains("r2 --> synthesis([\"Synthesis by Claude\"])"));
    }

    #[test]
    fn test_render_token_pie() {
        let doc = MarkdownRenderer.render(&sample_record());

        assert!(doc.contains("pie title Tokens by agent"));
        assert!(doc.contains("\"Claude\" : 180"));
        assert!(doc.contains("\"Gemini\" : 80"));
    }

    #[test]
    fn test_render_rounds_and_synthesis_in_order() {
        let doc = MarkdownRenderer.render(&sample_record());

        let opening = doc.find("Opening from Claude").unwrap();
        let review = doc.find("Review from Claude").unwrap();
        let synthesis = doc.find("## Synthesis").unwrap();
        assert!(opening < review && review < synthesis);
        assert!(doc.contains("#### Claude (`claude-3-sonnet`) · 120 tokens"));
        assert!(doc.contains("> **Failed:** HTTP 429: quota exceeded"));
        assert!(doc.contains("*Written by Claude*"));
        assert!(doc.trim_end().ends_with("A long-form answer."));
    }

    #[test]
    fn test_render_without_tokens_skips_pie() {
        let record = DebateRecord::new(
            "Quoted \"topic\"",
            "2024-01-01T00:00:00Z",
            vec!["A".to_string(), "B".to_string()],
            vec![],
            "done",
        );
        let doc = MarkdownRenderer.render(&record);

        assert!(!doc.contains("pie title"));
        assert!(doc.contains("_No token usage was reported._"));
        assert!(doc.contains("topic([\"Quoted #quot;topic#quot;\"])"));
        assert!(doc.contains("topic --> synthesis"));
    }

    #[test]
    fn test_store_writes_markdown_file() {
        let dir = tempfile::tempdir().unwrap();
        let paths = MarkdownResultStore::new(dir.path())
            .save(&sample_record())
            .unwrap();

        assert!(paths[0].ends_with("debate_20240517_140309.md"));
        let doc = std::fs::read_to_string(&paths[0]).unwrap();
        assert!(doc.contains("## Round-by-Round"));
    }
}
