//! Local Ollama `/api/chat` backend.

use super::ProviderSettings;
use super::http_client::{build_provider_client, post_json};
use async_trait::async_trait;
use council_application::{BackendError, Completion, CompletionRequest, TextGenerationBackend};
use council_domain::ProviderKind;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::json;

pub struct OllamaBackend {
    model: String,
    base_url: String,
    client: Client,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<Message<'a>>,
    stream: bool,
    options: Options,
}

#[derive(Debug, Serialize)]
struct Message<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct Options {
    temperature: f64,
    num_predict: u32,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    message: ResponseMessage,
    prompt_eval_count: Option<u64>,
    eval_count: Option<u64>,
    total_duration: Option<u64>,
    load_duration: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: String,
}

impl OllamaBackend {
    /// Ollama needs no credential; the base URL points at the local daemon.
    pub fn new(settings: &ProviderSettings) -> Self {
        Self {
            model: settings.model.clone(),
            base_url: settings.endpoint_base().to_string(),
            client: build_provider_client(settings.timeout),
        }
    }

    fn build_request<'a>(model: &'a str, request: &'a CompletionRequest) -> ChatRequest<'a> {
        ChatRequest {
            model,
            messages: vec![
                Message {
                    role: "system",
                    content: &request.system_instruction,
                },
                Message {
                    role: "user",
                    content: &request.user_prompt,
                },
            ],
            stream: false,
            options: Options {
                temperature: request.temperature,
                num_predict: request.max_output_tokens,
            },
        }
    }

    fn into_completion(response: ChatResponse) -> Completion {
        // Usage is only meaningful once generation actually ran.
        let tokens = response
            .eval_count
            .map(|eval| eval + response.prompt_eval_count.unwrap_or(0));

        Completion::new(response.message.content)
            .with_tokens(tokens)
            .with_metadata("total_duration", json!(response.total_duration))
            .with_metadata("load_duration", json!(response.load_duration))
            .with_metadata("eval_count", json!(response.eval_count))
            .with_metadata("local", json!(true))
    }
}

#[async_trait]
impl TextGenerationBackend for OllamaBackend {
    fn provider(&self) -> ProviderKind {
        ProviderKind::Ollama
    }

    fn model(&self) -> &str {
        &self.model
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<Completion, BackendError> {
        let url = format!("{}/api/chat", self.base_url);
        let body = Self::build_request(&self.model, request);

        let response: ChatResponse = post_json(self.client.post(&url), &body)
            .await
            .map_err(|e| match e {
                BackendError::ConnectionError(detail) => BackendError::ConnectionError(format!(
                    "{detail}. Is Ollama running? (ollama serve)"
                )),
                other => other,
            })?;

        Ok(Self::into_completion(response))
    }
}
