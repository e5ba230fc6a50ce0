//! Scripted backends shared by use case tests.

use crate::council::CouncilAgent;
use crate::ports::backend::{BackendError, Completion, CompletionRequest, TextGenerationBackend};
use async_trait::async_trait;
use council_domain::{AgentProfile, ProviderKind};
use std::collections::HashSet;
use std::sync::{Arc, Mutex};

/// Replies `"<label>#<call index>"` and records every request.
pub(crate) struct ScriptedBackend {
    label: String,
    tokens: Option<u64>,
    failing_calls: HashSet<usize>,
    always_fail: bool,
    requests: Mutex<Vec<CompletionRequest>>,
}

impl ScriptedBackend {
    pub(crate) fn new(label: &str) -> Self {
        Self {
            label: label.to_string(),
            tokens: None,
            failing_calls: HashSet::new(),
            always_fail: false,
            requests: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn with_tokens(mut self, tokens: u64) -> Self {
        self.tokens = Some(tokens);
        self
    }

    pub(crate) fn failing_on(mut self, call: usize) -> Self {
        self.failing_calls.insert(call);
        self
    }

    pub(crate) fn always_failing(mut self) -> Self {
        self.always_fail = true;
        self
    }

    pub(crate) fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl TextGenerationBackend for ScriptedBackend {
    fn provider(&self) -> ProviderKind {
        ProviderKind::Ollama
    }

    fn model(&self) -> &str {
        "stub-model"
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<Completion, BackendError> {
        let call = {
            let mut requests = self.requests.lock().unwrap();
            requests.push(request.clone());
            requests.len() - 1
        };

        if self.always_fail || self.failing_calls.contains(&call) {
            return Err(BackendError::ConnectionError(format!(
                "{} unreachable",
                self.label
            )));
        }

        Ok(Completion::new(format!("{}#{}", self.label, call)).with_tokens(self.tokens))
    }
}

pub(crate) fn scripted_agent(name: &str, backend: &Arc<ScriptedBackend>) -> CouncilAgent {
    let backend: Arc<dyn TextGenerationBackend> = backend.clone();
    CouncilAgent::new(AgentProfile::new(name, format!("{} role", name)), backend)
}
