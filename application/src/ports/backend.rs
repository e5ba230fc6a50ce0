//! Text generation backend port
//!
//! Defines the interface every LLM provider adapter implements. A backend
//! performs exactly one request/response exchange per call; prompt
//! construction and error containment live above it in [`CouncilAgent`].
//!
//! [`CouncilAgent`]: crate::council::CouncilAgent

use async_trait::async_trait;
use council_domain::{Metadata, ProviderKind};
use thiserror::Error;

/// Errors that can occur while talking to a provider
#[derive(Error, Debug)]
pub enum BackendError {
    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Timeout")]
    Timeout,

    #[error("Missing credential: {0}")]
    MissingCredential(String),

    #[error("Other error: {0}")]
    Other(String),
}

/// One provider call: system instruction, user prompt and sampling knobs.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub system_instruction: String,
    pub user_prompt: String,
    pub temperature: f64,
    pub max_output_tokens: u32,
}

/// What a provider returned for one request.
///
/// `tokens_used` follows the provider's own accounting rule (total,
/// input+output, or absent); `metadata` carries whatever extras the
/// adapter wants preserved in the transcript.
#[derive(Debug, Clone, Default)]
pub struct Completion {
    pub text: String,
    pub tokens_used: Option<u64>,
    pub metadata: Metadata,
}

impl Completion {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }

    pub fn with_tokens(mut self, tokens: Option<u64>) -> Self {
        self.tokens_used = tokens;
        self
    }

    pub fn with_metadata(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.metadata.insert(key.into(), value);
        self
    }
}

/// Gateway to a single provider/model pair
///
/// Implementations (adapters) live in the infrastructure layer.
#[async_trait]
pub trait TextGenerationBackend: Send + Sync {
    /// Which provider this backend talks to
    fn provider(&self) -> ProviderKind;

    /// Model identifier sent with every request
    fn model(&self) -> &str;

    /// Perform one completion request
    async fn complete(&self, request: &CompletionRequest) -> Result<Completion, BackendError>;
}
