//! A council member bound to a backend.

use crate::ports::backend::{CompletionRequest, TextGenerationBackend};
use council_domain::{AgentProfile, PromptTemplate, ProviderKind, ResponseUnit, Stage};
use std::sync::Arc;
use tracing::{debug, warn};

/// Output token ceiling used when none is configured.
pub const DEFAULT_MAX_OUTPUT_TOKENS: u32 = 2000;

/// One seat at the council.
///
/// Pairs an [`AgentProfile`] with the backend that speaks for it. Every
/// provider variant shares this type; only the backend differs.
#[derive(Clone)]
pub struct CouncilAgent {
    profile: AgentProfile,
    backend: Arc<dyn TextGenerationBackend>,
    max_output_tokens: u32,
}

impl CouncilAgent {
    pub fn new(profile: AgentProfile, backend: Arc<dyn TextGenerationBackend>) -> Self {
        Self {
            profile,
            backend,
            max_output_tokens: DEFAULT_MAX_OUTPUT_TOKENS,
        }
    }

    pub fn with_max_output_tokens(mut self, max_output_tokens: u32) -> Self {
        self.max_output_tokens = max_output_tokens;
        self
    }

    pub fn name(&self) -> &str {
        &self.profile.name
    }

    pub fn profile(&self) -> &AgentProfile {
        &self.profile
    }

    pub fn model(&self) -> &str {
        self.backend.model()
    }

    pub fn provider(&self) -> ProviderKind {
        self.backend.provider()
    }

    pub fn max_output_tokens(&self) -> u32 {
        self.max_output_tokens
    }

    /// Take one turn.
    ///
    /// Never fails: a backend error becomes a [`ResponseUnit`] whose content
    /// starts with the error marker, so the debate can carry on.
    pub async fn generate_response(
        &self,
        prompt: &str,
        context: &[ResponseUnit],
        stage: Stage,
    ) -> ResponseUnit {
        let request = CompletionRequest {
            system_instruction: PromptTemplate::system_instruction(&self.profile, stage, context),
            user_prompt: prompt.to_string(),
            temperature: self.profile.temperature,
            max_output_tokens: self.max_output_tokens,
        };

        debug!(
            agent = %self.profile.name,
            model = self.model(),
            %stage,
            context_len = context.len(),
            "Sending request"
        );

        match self.backend.complete(&request).await {
            Ok(completion) => {
                let mut unit = ResponseUnit::new(&self.profile.name, self.model(), completion.text);
                if let Some(tokens) = completion.tokens_used {
                    unit = unit.with_tokens(tokens);
                }
                if !completion.metadata.is_empty() {
                    unit = unit.with_metadata_map(completion.metadata);
                }
                unit
            }
            Err(e) => {
                warn!(agent = %self.profile.name, %stage, "Backend call failed: {}", e);
                ResponseUnit::failure(&self.profile.name, self.model(), e)
            }
        }
    }
}

impl std::fmt::Debug for CouncilAgent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CouncilAgent")
            .field("profile", &self.profile)
            .field("provider", &self.provider())
            .field("model", &self.model())
            .field("max_output_tokens", &self.max_output_tokens)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::backend::{BackendError, Completion};
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::Mutex;

    struct FixedBackend {
        result: Mutex<Option<Result<Completion, BackendError>>>,
        seen: Mutex<Vec<CompletionRequest>>,
    }

    impl FixedBackend {
        fn new(result: Result<Completion, BackendError>) -> Self {
            Self {
                result: Mutex::new(Some(result)),
                seen: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl TextGenerationBackend for FixedBackend {
        fn provider(&self) -> ProviderKind {
            ProviderKind::Claude
        }

        fn model(&self) -> &str {
            "claude-test"
        }

        async fn complete(&self, request: &CompletionRequest) -> Result<Completion, BackendError> {
            self.seen.lock().unwrap().push(request.clone());
            self.result
                .lock()
                .unwrap()
                .take()
                .unwrap_or_else(|| Err(BackendError::Other("exhausted".into())))
        }
    }

    fn agent(backend: Arc<FixedBackend>) -> CouncilAgent {
        CouncilAgent::new(
            AgentProfile::new("Claude", "Analyst").with_temperature(0.3),
            backend,
        )
        .with_max_output_tokens(512)
    }

    #[tokio::test]
    async fn test_success_maps_tokens_and_metadata() {
        let backend = Arc::new(FixedBackend::new(Ok(Completion::new("insight")
            .with_tokens(Some(42))
            .with_metadata("input_tokens", json!(30)))));
        let unit = agent(Arc::clone(&backend))
            .generate_response("task", &[], Stage::Round(1))
            .await;

        assert_eq!(unit.agent_name, "Claude");
        assert_eq!(unit.model, "claude-test");
        assert_eq!(unit.content, "insight");
        assert_eq!(unit.tokens_used, Some(42));
        assert_eq!(unit.metadata_value("input_tokens"), Some(&json!(30)));
        assert!(!unit.is_error());

        let seen = backend.seen.lock().unwrap();
        assert_eq!(seen[0].user_prompt, "task");
        assert_eq!(seen[0].temperature, 0.3);
        assert_eq!(seen[0].max_output_tokens, 512);
        assert!(seen[0].system_instruction.contains("You are Claude"));
        assert!(!seen[0].system_instruction.contains("Previous Responses"));
    }

    #[tokio::test]
    async fn test_failure_is_contained() {
        let backend = Arc::new(FixedBackend::new(Err(BackendError::Timeout)));
        let unit = agent(backend)
            .generate_response("task", &[], Stage::Round(1))
            .await;

        assert!(unit.is_error());
        assert_eq!(unit.content, "Error generating response: Timeout");
        assert_eq!(unit.error_detail(), Some("Timeout"));
        assert_eq!(unit.tokens_used, None);
    }

    #[tokio::test]
    async fn test_context_is_rendered_into_system_instruction() {
        let backend = Arc::new(FixedBackend::new(Ok(Completion::new("ok"))));
        let context = vec![ResponseUnit::new("GPT-4", "gpt-4", "earlier point")];
        agent(Arc::clone(&backend))
            .generate_response("task", &context, Stage::Round(2))
            .await;

        let seen = backend.seen.lock().unwrap();
        assert!(seen[0].system_instruction.contains("GPT-4 (gpt-4):"));
        assert!(seen[0].system_instruction.contains("earlier point"));
    }
}
