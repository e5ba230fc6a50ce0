//! Agent spec parsing (`provider` or `provider:model`).

use crate::core::error::DomainError;
use crate::providers::kind::ProviderKind;

/// A request to seat one agent, as written on the command line or in config
///
/// The provider is split off at the first colon, so model names that
/// contain colons survive intact: `ollama:llama3.1:8b` selects model
/// `llama3.1:8b` on Ollama.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AgentSpec {
    pub provider: ProviderKind,
    pub model: Option<String>,
}

impl AgentSpec {
    pub fn new(provider: ProviderKind) -> Self {
        Self {
            provider,
            model: None,
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// The explicit model, or the provider's default.
    pub fn model_or_default(&self) -> &str {
        self.model
            .as_deref()
            .unwrap_or_else(|| self.provider.default_model())
    }

    /// Display name of the agent this spec seats.
    ///
    /// Default-model specs use the provider's name; explicit models get a
    /// name derived from the model so several agents of one provider stay
    /// distinguishable in the transcript.
    pub fn display_name(&self) -> String {
        let Some(model) = self.model.as_deref() else {
            return self.provider.default_agent_name().to_string();
        };
        match self.provider {
            ProviderKind::Ollama => {
                let family = model.split(':').next().unwrap_or(model);
                title_case(family)
            }
            ProviderKind::OpenRouter => {
                let short = model.rsplit('/').next().unwrap_or(model);
                format!("OpenRouter-{}", short)
            }
            other => format!("{}-{}", other.default_agent_name(), model),
        }
    }

    pub fn role(&self) -> String {
        match (self.provider, self.model.as_deref()) {
            (ProviderKind::Ollama, Some(model)) => format!("Local Expert ({})", model),
            (ProviderKind::OpenRouter, Some(model)) => format!("OpenRouter Expert ({})", model),
            (ProviderKind::Comet, Some(model)) => format!("Comet Analysis ({})", model),
            (provider, _) => provider.default_role().to_string(),
        }
    }
}

impl std::str::FromStr for AgentSpec {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(DomainError::InvalidAgentSpec(
                "agent spec cannot be empty".to_string(),
            ));
        }
        match s.split_once(':') {
            Some((provider, model)) => {
                let model = model.trim();
                if model.is_empty() {
                    return Err(DomainError::InvalidAgentSpec(format!(
                        "missing model after ':' in '{}'",
                        s
                    )));
                }
                Ok(AgentSpec::new(provider.parse()?).with_model(model))
            }
            None => Ok(AgentSpec::new(s.parse()?)),
        }
    }
}

impl std::fmt::Display for AgentSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.model {
            Some(model) => write!(f, "{}:{}", self.provider, model),
            None => write!(f, "{}", self.provider),
        }
    }
}

/// Uppercase letters that follow a non-letter, lowercase the rest.
fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_is_letter = false;
    for c in s.chars() {
        if c.is_alphabetic() {
            if prev_is_letter {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_is_letter = true;
        } else {
            out.push(c);
            prev_is_letter = false;
        }
    }
    out
}
