//! Provider backends
//!
//! One [`TextGenerationBackend`] adapter per wire format. Every adapter is
//! built from a [`ProviderSettings`] resolved by the
//! [`CouncilAssembler`](factory::CouncilAssembler).
//!
//! [`TextGenerationBackend`]: council_application::TextGenerationBackend

pub mod anthropic;
pub mod factory;
pub mod gemini;
pub mod http_client;
pub mod huggingface;
pub mod ollama;
pub mod openai_compat;

pub use anthropic::AnthropicBackend;
pub use factory::{AssemblyError, CouncilAssembler, ProviderAvailability};
pub use gemini::GeminiBackend;
pub use huggingface::HuggingFaceBackend;
pub use ollama::OllamaBackend;
pub use openai_compat::OpenAiCompatibleBackend;

use council_application::BackendError;
use council_domain::ProviderKind;
use std::time::Duration;

/// Connection settings for one provider/model pair.
#[derive(Debug, Clone)]
pub struct ProviderSettings {
    pub kind: ProviderKind,
    pub model: String,
    pub base_url: String,
    pub api_key: Option<String>,
    pub timeout: Duration,
}

impl ProviderSettings {
    /// Settings using the provider's defaults and no credential.
    pub fn for_kind(kind: ProviderKind) -> Self {
        Self {
            kind,
            model: kind.default_model().to_string(),
            base_url: kind.default_base_url().to_string(),
            api_key: None,
            timeout: http_client::default_timeout(kind),
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Base URL without a trailing slash.
    pub(crate) fn endpoint_base(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }

    /// The API key, or `MissingCredential` naming the variable to set.
    pub(crate) fn require_api_key(&self) -> Result<&str, BackendError> {
        self.api_key
            .as_deref()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| BackendError::MissingCredential(self.kind.api_key_var()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_for_kind_uses_provider_defaults() {
        let settings = ProviderSettings::for_kind(ProviderKind::Groq);
        assert_eq!(settings.model, "llama3-70b-8192");
        assert_eq!(settings.base_url, "https://api.groq.com/openai/v1");
        assert!(settings.api_key.is_none());
    }

    #[test]
    fn test_require_api_key() {
        let settings = ProviderSettings::for_kind(ProviderKind::ChatGpt);
        let err = settings.require_api_key().unwrap_err();
        assert_eq!(err.to_string(), "Missing credential: OPENAI_API_KEY");

        let settings = settings.with_api_key("   ");
        assert!(settings.require_api_key().is_err());

        let settings = ProviderSettings::for_kind(ProviderKind::ChatGpt).with_api_key("sk-test");
        assert_eq!(settings.require_api_key().unwrap(), "sk-test");
    }

    #[test]
    fn test_endpoint_base_trims_slash() {
        let settings = ProviderSettings::for_kind(ProviderKind::Ollama)
            .with_base_url("http://192.168.1.100:11434/");
        assert_eq!(settings.endpoint_base(), "http://192.168.1.100:11434");
    }
}
