//! Google Gemini `generateContent` backend.

use super::ProviderSettings;
use super::http_client::{build_provider_client, post_json};
use async_trait::async_trait;
use council_application::{BackendError, Completion, CompletionRequest, TextGenerationBackend};
use council_domain::ProviderKind;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

pub struct GeminiBackend {
    model: String,
    base_url: String,
    api_key: String,
    client: Client,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    system_instruction: Content<'a>,
    contents: Vec<Content<'a>>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'static str>,
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f64,
    max_output_tokens: u32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    usage_metadata: Option<UsageMetadata>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<CandidateContent>,
    #[serde(default)]
    safety_ratings: Vec<SafetyRating>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SafetyRating {
    category: String,
    probability: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UsageMetadata {
    prompt_token_count: Option<u64>,
    candidates_token_count: Option<u64>,
}

impl GeminiBackend {
    pub fn new(settings: &ProviderSettings) -> Result<Self, BackendError> {
        let api_key = settings.require_api_key()?.to_string();
        Ok(Self {
            model: settings.model.clone(),
            base_url: settings.endpoint_base().to_string(),
            api_key,
            client: build_provider_client(settings.timeout),
        })
    }

    fn build_request(request: &CompletionRequest) -> GenerateContentRequest<'_> {
        GenerateContentRequest {
            system_instruction: Content {
                role: None,
                parts: vec![Part {
                    text: &request.system_instruction,
                }],
            },
            contents: vec![Content {
                role: Some("user"),
                parts: vec![Part {
                    text: &request.user_prompt,
                }],
            }],
            generation_config: GenerationConfig {
                temperature: request.temperature,
                max_output_tokens: request.max_output_tokens,
            },
        }
    }

    fn into_completion(response: GenerateContentResponse) -> Result<Completion, BackendError> {
        let candidate = response
            .candidates
            .into_iter()
            .next()
            .ok_or_else(|| BackendError::MalformedResponse("no candidates in response".into()))?;

        let text: String = candidate
            .content
            .map(|content| {
                content
                    .parts
                    .into_iter()
                    .filter_map(|part| part.text)
                    .collect::<Vec<_>>()
                    .join("")
            })
            .unwrap_or_default();

        let ratings: Vec<Value> = candidate
            .safety_ratings
            .into_iter()
            .map(|rating| json!({"category": rating.category, "probability": rating.probability}))
            .collect();

        // Both counts are needed for a meaningful total.
        let tokens = response.usage_metadata.and_then(|usage| {
            Some(usage.prompt_token_count? + usage.candidates_token_count?)
        });

        Ok(Completion::new(text)
            .with_tokens(tokens)
            .with_metadata("safety_ratings", Value::Array(ratings)))
    }
}

#[async_trait]
impl TextGenerationBackend for GeminiBackend {
    fn provider(&self) -> ProviderKind {
        ProviderKind::Gemini
    }

    fn model(&self) -> &str {
        &self.model
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<Completion, BackendError> {
        let url = format!("{}/models/{}:generateContent", self.base_url, self.model);
        // Header auth keeps the key out of the URL, which reqwest errors echo
        let builder = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key);

        let body = Self::build_request(request);
        let response: GenerateContentResponse = post_json(builder, &body).await?;
        Self::into_completion(response)
    }
}
