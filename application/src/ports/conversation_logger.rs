//! Port for structured debate transcript logging.
//!
//! Defines the [`ConversationLogger`] trait for recording debate events
//! (debate start, each agent turn, round boundaries, synthesis) to a
//! structured log.
//!
//! This is separate from `tracing`-based operation logs: tracing handles
//! human-readable diagnostic messages, while this port captures the full
//! transcript in a machine-readable format (JSONL).

use council_domain::{ResponseUnit, Stage};
use serde_json::{Value, json};

/// A structured debate event for logging.
///
/// Each event has a type string and a JSON payload containing
/// event-specific fields. Timestamps are added by the writer.
pub struct ConversationEvent {
    /// Event type identifier (e.g., "debate_started", "agent_response").
    pub event_type: &'static str,
    /// JSON payload with event-specific data.
    pub payload: Value,
}

impl ConversationEvent {
    pub fn new(event_type: &'static str, payload: Value) -> Self {
        Self {
            event_type,
            payload,
        }
    }

    pub fn debate_started(topic: &str, rounds: u32, participants: &[String]) -> Self {
        Self::new(
            "debate_started",
            json!({
                "topic": topic,
                "rounds": rounds,
                "participants": participants,
            }),
        )
    }

    pub fn agent_response(stage: Stage, response: &ResponseUnit) -> Self {
        Self::new(
            "agent_response",
            json!({
                "round": stage.number(),
                "agent": response.agent_name,
                "model": response.model,
                "content": response.content,
                "tokens_used": response.tokens_used,
                "error": response.error_detail(),
            }),
        )
    }

    pub fn round_completed(round: u32, responses: usize, tokens: u64) -> Self {
        Self::new(
            "round_completed",
            json!({
                "round": round,
                "responses": responses,
                "tokens": tokens,
            }),
        )
    }

    pub fn synthesis_completed(synthesis: &ResponseUnit, total_tokens: u64) -> Self {
        Self::new(
            "synthesis_completed",
            json!({
                "agent": synthesis.agent_name,
                "model": synthesis.model,
                "bytes": synthesis.content.len(),
                "tokens_used": synthesis.tokens_used,
                "debate_total_tokens": total_tokens,
            }),
        )
    }
}

/// Port for logging debate events to a structured log.
///
/// Implementations write each event as a single record (e.g., one JSONL line).
/// The `log` method is synchronous and non-fallible; write failures are
/// ignored so they never interrupt a debate.
pub trait ConversationLogger: Send + Sync {
    /// Record a debate event.
    fn log(&self, event: ConversationEvent);
}

/// No-op implementation for tests and when logging is disabled.
pub struct NoConversationLogger;

impl ConversationLogger for NoConversationLogger {
    fn log(&self, _event: ConversationEvent) {}
}
