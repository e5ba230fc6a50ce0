//! OpenAI-compatible chat completions backend.
//!
//! Serves every provider speaking the `/chat/completions` dialect:
//! chatgpt, mistral, groq, deepseek, openrouter and comet.

use super::ProviderSettings;
use super::http_client::{build_provider_client, post_json};
use async_trait::async_trait;
use council_application::{BackendError, Completion, CompletionRequest, TextGenerationBackend};
use council_domain::ProviderKind;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::json;

const OPENROUTER_REFERER: &str = "https://github.com/llm-council/llm-council";
const OPENROUTER_TITLE: &str = "LLM Council";

pub struct OpenAiCompatibleBackend {
    kind: ProviderKind,
    model: String,
    base_url: String,
    api_key: String,
    client: Client,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<Message<'a>>,
    temperature: f64,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct Message<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
    usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Usage {
    prompt_tokens: Option<u64>,
    completion_tokens: Option<u64>,
    total_tokens: Option<u64>,
}

impl OpenAiCompatibleBackend {
    pub fn new(settings: &ProviderSettings) -> Result<Self, BackendError> {
        let api_key = settings.require_api_key()?.to_string();
        Ok(Self {
            kind: settings.kind,
            model: settings.model.clone(),
            base_url: settings.endpoint_base().to_string(),
            api_key,
            client: build_provider_client(settings.timeout),
        })
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
            temperature: request.temperature,
            max_tokens: request.max_output_tokens,
        }
    }

    fn into_completion(kind: ProviderKind, response: ChatResponse) -> Result<Completion, BackendError> {
        let choice = response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| BackendError::MalformedResponse("no choices in response".into()))?;

        let mut completion = Completion::new(choice.message.content.unwrap_or_default());

        if let Some(usage) = response.usage {
            completion = completion
                .with_tokens(usage.total_tokens)
                .with_metadata("prompt_tokens", json!(usage.prompt_tokens))
                .with_metadata("completion_tokens", json!(usage.completion_tokens));
        }
        if let Some(reason) = choice.finish_reason {
            completion = completion.with_metadata("finish_reason", json!(reason));
        }

        match kind {
            ProviderKind::Groq => completion = completion.with_metadata("free_tier", json!(true)),
            ProviderKind::DeepSeek | ProviderKind::OpenRouter | ProviderKind::Comet => {
                completion = completion.with_metadata("provider", json!(kind.as_str()))
            }
            _ => {}
        }

        Ok(completion)
    }
}

#[async_trait]
impl TextGenerationBackend for OpenAiCompatibleBackend {
    fn provider(&self) -> ProviderKind {
        self.kind
    }

    fn model(&self) -> &str {
        &self.model
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<Completion, BackendError> {
        let url = format!("{}/chat/completions", self.base_url);
        let mut builder = self.client.post(&url).bearer_auth(&self.api_key);
        if self.kind == ProviderKind::OpenRouter {
            builder = builder
                .header("HTTP-Referer", OPENROUTER_REFERER)
                .header("X-Title", OPENROUTER_TITLE);
        }

        let body = Self::build_request(&self.model, request);
        let response: ChatResponse = post_json(builder, &body).await?;
        Self::into_completion(self.kind, response)
    }
}
