//! Write-once result of a complete debate.

use crate::debate::response::ResponseUnit;
use crate::debate::round::Round;
use serde::{Deserialize, Serialize};

/// Complete result of a council debate
///
/// Built once after synthesis and never mutated afterwards; persistence
/// only reads it. Field order matches the persisted JSON transcript:
///
/// ```json
/// { "topic", "timestamp", "total_tokens", "participating_agents", "rounds", "synthesis" }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DebateRecord {
    topic: String,
    timestamp: String,
    total_tokens: u64,
    participating_agents: Vec<String>,
    rounds: Vec<Round>,
    synthesis: String,
}

impl DebateRecord {
    /// Assembles the record, deriving `total_tokens` from the rounds.
    ///
    /// The synthesis turn's own usage is not part of the total.
    pub fn new(
        topic: impl Into<String>,
        timestamp: impl Into<String>,
        participating_agents: Vec<String>,
        rounds: Vec<Round>,
        synthesis: impl Into<String>,
    ) -> Self {
        let total_tokens = Self::sum_tokens(&rounds);
        Self {
            topic: topic.into(),
            timestamp: timestamp.into(),
            total_tokens,
            participating_agents,
            rounds,
            synthesis: synthesis.into(),
        }
    }

    /// Sum of every `tokens_used` across every round, absent counting as zero.
    pub fn sum_tokens(rounds: &[Round]) -> u64 {
        rounds.iter().map(Round::tokens_used).sum()
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }

    /// ISO-8601 creation time
    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }

    pub fn total_tokens(&self) -> u64 {
        self.total_tokens
    }

    pub fn participating_agents(&self) -> &[String] {
        &self.participating_agents
    }

    pub fn rounds(&self) -> &[Round] {
        &self.rounds
    }

    pub fn synthesis(&self) -> &str {
        &self.synthesis
    }

    /// Every response of every round, chronologically and in council order.
    pub fn responses(&self) -> impl Iterator<Item = &ResponseUnit> {
        self.rounds.iter().flat_map(Round::iter)
    }

    /// Responses that stand in for failed backend calls.
    pub fn failed_responses(&self) -> impl Iterator<Item = &ResponseUnit> {
        self.responses().filter(|r| r.is_error())
    }

    /// Token usage per seat, in participant order.
    ///
    /// Every round holds one response per seat in council order, so the
    /// response at index `i` belongs to `participating_agents[i]`. Seats that
    /// share a display name are reported separately.
    pub fn tokens_by_agent(&self) -> Vec<(String, u64)> {
        let mut totals = vec![0u64; self.participating_agents.len()];
        for round in &self.rounds {
            for (seat, response) in round.iter().enumerate() {
                if let Some(total) = totals.get_mut(seat) {
                    *total += response.tokens_or_zero();
                }
            }
        }
        self.participating_agents
            .iter()
            .cloned()
            .zip(totals)
            .collect()
    }

    /// Serialize to the persisted transcript format.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Parse a persisted transcript.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> DebateRecord {
        DebateRecord::new(
            "Async Rust runtimes",
            "2026-10-18T09:30:00.000000",
            vec!["Claude".to_string(), "ChatGPT".to_string()],
            vec![
                Round::from(vec![
                    ResponseUnit::new("Claude", "claude-3-5-sonnet", "Tokio dominates.")
                        .with_tokens(300)
                        .with_metadata("input_tokens", json!(200)),
                    ResponseUnit::new("ChatGPT", "gpt-4-turbo-preview", "Consider smol.")
                        .with_tokens(250),
                ]),
                Round::from(vec![
                    ResponseUnit::new("Claude", "claude-3-5-sonnet", "smol is lighter.")
                        .with_tokens(100),
                    ResponseUnit::failure("ChatGPT", "gpt-4-turbo-preview", "rate limited"),
                ]),
            ],
            "## Executive Summary\nTokio for servers.",
        )
    }

    #[test]
    fn test_total_tokens_sums_rounds() {
        let record = sample();
        assert_eq!(record.total_tokens(), 650);
        assert_eq!(record.failed_responses().count(), 1);
    }

    #[test]
    fn test_tokens_by_agent() {
        let record = sample();
        assert_eq!(
            record.tokens_by_agent(),
            vec![("Claude".to_string(), 400), ("ChatGPT".to_string(), 250)]
        );
    }

    #[test]
    fn test_tokens_by_agent_keeps_duplicate_names_apart() {
        let record = DebateRecord::new(
            "Model sizes",
            "2026-10-18T09:30:00.000000",
            vec!["Llama3.1".to_string(), "Llama3.1".to_string()],
            vec![Round::from(vec![
                ResponseUnit::new("Llama3.1", "llama3.1:8b", "small").with_tokens(100),
                ResponseUnit::new("Llama3.1", "llama3.1:70b", "large").with_tokens(50),
            ])],
            "",
        );

        let usage = record.tokens_by_agent();
        assert_eq!(
            usage,
            vec![("Llama3.1".to_string(), 100), ("Llama3.1".to_string(), 50)]
        );
        let sum: u64 = usage.iter().map(|(_, t)| t).sum();
        assert_eq!(sum, record.total_tokens());
    }

    #[test]
    fn test_json_round_trip() {
        let record = sample();
        let json = record.to_json_pretty().unwrap();
        let parsed = DebateRecord::from_json(&json).unwrap();
        assert_eq!(parsed, record);
    }

    #[test]
    fn test_persisted_key_order_and_shape() {
        let json = sample().to_json_pretty().unwrap();
        let topic = json.find("\"topic\"").unwrap();
        let timestamp = json.find("\"timestamp\"").unwrap();
        let total = json.find("\"total_tokens\"").unwrap();
        let agents = json.find("\"participating_agents\"").unwrap();
        let rounds = json.find("\"rounds\"").unwrap();
        let synthesis = json.find("\"synthesis\"").unwrap();
        assert!(topic < timestamp && timestamp < total && total < agents);
        assert!(agents < rounds && rounds < synthesis);

        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["rounds"][1][1]["tokens_used"], serde_json::Value::Null);
        assert_eq!(value["rounds"][1][1]["metadata"]["error"], "rate limited");
    }
}
