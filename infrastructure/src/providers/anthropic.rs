//! Anthropic Messages API backend.

use super::ProviderSettings;
use super::http_client::{build_provider_client, post_json};
use async_trait::async_trait;
use council_application::{BackendError, Completion, CompletionRequest, TextGenerationBackend};
use council_domain::ProviderKind;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::json;

const ANTHROPIC_VERSION: &str = "2023-06-01";

pub struct AnthropicBackend {
    model: String,
    base_url: String,
    api_key: String,
    client: Client,
}

#[derive(Debug, Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    system: &'a str,
    messages: Vec<Message<'a>>,
    temperature: f64,
}

#[derive(Debug, Serialize)]
struct Message<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
    stop_reason: Option<String>,
    usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Usage {
    input_tokens: u64,
    output_tokens: u64,
}

impl AnthropicBackend {
    pub fn new(settings: &ProviderSettings) -> Result<Self, BackendError> {
        let api_key = settings.require_api_key()?.to_string();
        Ok(Self {
            model: settings.model.clone(),
            base_url: settings.endpoint_base().to_string(),
            api_key,
            client: build_provider_client(settings.timeout),
        })
    }

    fn build_request<'a>(model: &'a str, request: &'a CompletionRequest) -> MessagesRequest<'a> {
        MessagesRequest {
            model,
            max_tokens: request.max_output_tokens,
            system: &request.system_instruction,
            messages: vec![Message {
                role: "user",
                content: &request.user_prompt,
            }],
            temperature: request.temperature,
        }
    }

    fn into_completion(response: MessagesResponse) -> Result<Completion, BackendError> {
        let text: String = response
            .content
            .into_iter()
            .filter(|block| block.kind == "text")
            .filter_map(|block| block.text)
            .collect::<Vec<_>>()
            .join("");

        if text.is_empty() && response.stop_reason.as_deref() != Some("max_tokens") {
            return Err(BackendError::MalformedResponse(
                "no text content in response".into(),
            ));
        }

        let mut completion = Completion::new(text);
        if let Some(usage) = response.usage {
            completion = completion
                .with_tokens(Some(usage.input_tokens + usage.output_tokens))
                .with_metadata("input_tokens", json!(usage.input_tokens))
                .with_metadata("output_tokens", json!(usage.output_tokens));
        }
        Ok(completion)
    }
}

#[async_trait]
impl TextGenerationBackend for AnthropicBackend {
    fn provider(&self) -> ProviderKind {
        ProviderKind::Claude
    }

    fn model(&self) -> &str {
        &self.model
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<Completion, BackendError> {
        let url = format!("{}/messages", self.base_url);
        let builder = self
            .client
            .post(&url)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION);

        let body = Self::build_request(&self.model, request);
        let response: MessagesResponse = post_json(builder, &body).await?;
        Self::into_completion(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_goes_to_top_level_field() {
        let req = CompletionRequest {
            system_instruction: "You are Claude".to_string(),
            user_prompt: "Discuss".to_string(),
            temperature: 0.5,
            max_output_tokens: 1024,
        };
        let json = serde_json::to_value(AnthropicBackend::build_request("claude-3", &req)).unwrap();

        assert_eq!(json["system"], "You are Claude");
        assert_eq!(json["max_tokens"], 1024);
        assert_eq!(json["messages"].as_array().unwrap().len(), 1);
        assert_eq!(json["messages"][0]["role"], "user");
    }

    #[test]
    fn test_tokens_are_input_plus_output() {
        let response: MessagesResponse = serde_json::from_str(
            r#"{
                "content": [{"type": "text", "text": "Hello "}, {"type": "text", "text": "world"}],
                "stop_reason": "end_turn",
                "usage": {"input_tokens": 100, "output_tokens": 25}
            }"#,
        )
        .unwrap();

        let completion = AnthropicBackend::into_completion(response).unwrap();
        assert_eq!(completion.text, "Hello world");
        assert_eq!(completion.tokens_used, Some(125));
        assert_eq!(completion.metadata["input_tokens"], 100);
        assert_eq!(completion.metadata["output_tokens"], 25);
    }

    #[test]
    fn test_empty_content_is_malformed() {
        let response: MessagesResponse =
            serde_json::from_str(r#"{"content": [], "stop_reason": "end_turn"}"#).unwrap();
        assert!(AnthropicBackend::into_completion(response).is_err());
    }

    #[test]
    fn test_new_requires_api_key() {
        let settings = ProviderSettings::for_kind(ProviderKind::Claude);
        assert!(AnthropicBackend::new(&settings).is_err());
        let settings = settings.with_api_key("sk-ant-test");
        assert_eq!(AnthropicBackend::new(&settings).unwrap().model(), "claude-3-5-sonnet-20241022");
    }
}
