//! Hugging Face Inference API text-generation backend.
//!
//! The endpoint takes one flat prompt, so the system instruction and user
//! prompt are folded into a chat-style transcript.

use super::ProviderSettings;
use super::http_client::{build_provider_client, post_json};
use async_trait::async_trait;
use council_application::{BackendError, Completion, CompletionRequest, TextGenerationBackend};
use council_domain::ProviderKind;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::json;

pub struct HuggingFaceBackend {
    model: String,
    base_url: String,
    api_key: Option<String>,
    client: Client,
}

#[derive(Debug, Serialize)]
struct GenerationRequest {
    inputs: String,
    parameters: Parameters,
}

#[derive(Debug, Serialize)]
struct Parameters {
    max_new_tokens: u32,
    temperature: f64,
    return_full_text: bool,
}

#[derive(Debug, Deserialize)]
struct Generation {
    generated_text: String,
}

impl HuggingFaceBackend {
    /// The token is optional; public models accept anonymous requests.
    pub fn new(settings: &ProviderSettings) -> Self {
        Self {
            model: settings.model.clone(),
            base_url: settings.endpoint_base().to_string(),
            api_key: settings
                .api_key
                .clone()
                .filter(|key| !key.trim().is_empty()),
            client: build_provider_client(settings.timeout),
        }
    }

    fn flatten_prompt(request: &CompletionRequest) -> String {
        format!(
            "{}\n\nUser: {}\n\nAssistant:",
            request.system_instruction, request.user_prompt
        )
    }

    fn build_request(request: &CompletionRequest) -> GenerationRequest {
        GenerationRequest {
            inputs: Self::flatten_prompt(request),
            parameters: Parameters {
                max_new_tokens: request.max_output_tokens,
                temperature: request.temperature,
                return_full_text: false,
            },
        }
    }

    fn into_completion(generations: Vec<Generation>) -> Result<Completion, BackendError> {
        let generation = generations
            .into_iter()
            .next()
            .ok_or_else(|| BackendError::MalformedResponse("empty generation list".into()))?;

        Ok(Completion::new(generation.generated_text.trim())
            .with_metadata("inference_api", json!("huggingface"))
            .with_metadata("free_tier", json!(true)))
    }
}

#[async_trait]
impl TextGenerationBackend for HuggingFaceBackend {
    fn provider(&self) -> ProviderKind {
        ProviderKind::HuggingFace
    }

    fn model(&self) -> &str {
        &self.model
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<Completion, BackendError> {
        let url = format!("{}/{}", self.base_url, self.model);
        let mut builder = self.client.post(&url);
        if let Some(key) = &self.api_key {
            builder = builder.bearer_auth(key);
        }

        let body = Self::build_request(request);
        let generations: Vec<Generation> = post_json(builder, &body).await?;
        Self::into_completion(generations)
    }
}
