//! Single-turn agent output.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Prefix carried by the `content` of every degraded turn.
///
/// Error text is kept in the transcript as ordinary agent output so that a
/// council with one broken provider still yields a complete record.
pub const ERROR_MARKER: &str = "Error generating response: ";

/// Metadata key holding the error detail of a degraded turn.
pub const ERROR_METADATA_KEY: &str = "error";

/// Provider-defined extras attached to a response (token split, safety
/// ratings, error detail, ...). No cross-provider schema is enforced.
pub type Metadata = serde_json::Map<String, Value>;

/// One agent's output for a single turn (Value Object)
///
/// Immutable once produced. Field order matches the persisted transcript.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseUnit {
    /// Display name of the responding agent
    pub agent_name: String,
    /// Backend model identifier that produced the content
    pub model: String,
    /// Full response body, or an error message prefixed with [`ERROR_MARKER`]
    pub content: String,
    /// Provider-reported token usage, absent when the provider omits it
    pub tokens_used: Option<u64>,
    /// Provider-specific extras
    pub metadata: Option<Metadata>,
}

impl ResponseUnit {
    /// Creates a successful response without usage or metadata.
    pub fn new(
        agent_name: impl Into<String>,
        model: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            agent_name: agent_name.into(),
            model: model.into(),
            content: content.into(),
            tokens_used: None,
            metadata: None,
        }
    }

    /// Creates a degraded response standing in for a failed backend call.
    ///
    /// `content` reads as `"Error generating response: <detail>"` and
    /// `metadata["error"]` carries the bare detail.
    pub fn failure(
        agent_name: impl Into<String>,
        model: impl Into<String>,
        error: impl std::fmt::Display,
    ) -> Self {
        let detail = error.to_string();
        Self::new(agent_name, model, format!("{ERROR_MARKER}{detail}"))
            .with_metadata(ERROR_METADATA_KEY, Value::String(detail))
    }

    /// Attaches provider-reported token usage.
    pub fn with_tokens(mut self, tokens: u64) -> Self {
        self.tokens_used = Some(tokens);
        self
    }

    /// Adds a single metadata entry, creating the map if needed.
    pub fn with_metadata(mut self, key: impl Into<String>, value: Value) -> Self {
        self.metadata
            .get_or_insert_with(Metadata::new)
            .insert(key.into(), value);
        self
    }

    /// Merges a whole metadata map. An empty map leaves `metadata` untouched.
    pub fn with_metadata_map(mut self, extra: Metadata) -> Self {
        if !extra.is_empty() {
            self.metadata.get_or_insert_with(Metadata::new).extend(extra);
        }
        self
    }

    /// Token usage, counting an absent value as zero.
    pub fn tokens_or_zero(&self) -> u64 {
        self.tokens_used.unwrap_or(0)
    }

    /// Looks up a metadata entry.
    pub fn metadata_value(&self, key: &str) -> Option<&Value> {
        self.metadata.as_ref().and_then(|m| m.get(key))
    }

    /// Error detail recorded for a degraded turn.
    pub fn error_detail(&self) -> Option<&str> {
        self.metadata_value(ERROR_METADATA_KEY)
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
    }

    /// Returns `true` if this unit stands in for a failed backend call.
    ///
    /// Decided by the `error` metadata key alone; a reply whose text merely
    /// starts with [`ERROR_MARKER`] is still a successful turn.
    pub fn is_error(&self) -> bool {
        self.metadata_value(ERROR_METADATA_KEY).is_some()
    }
}
