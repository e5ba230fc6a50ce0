//! Council assembly from configuration.
//!
//! Resolves agent specs against the `[providers]` config, builds one backend
//! per agent and checks the council is big enough to debate.

use super::{
    AnthropicBackend, GeminiBackend, HuggingFaceBackend, OllamaBackend, OpenAiCompatibleBackend,
    ProviderSettings,
};
use crate::config::{FileConfig, FileProviderConfig};
use council_application::{BackendError, Council, CouncilAgent, TextGenerationBackend};
use council_domain::{
    AgentProfile, AgentSpec, CredentialRequirement, DomainError, ProviderKind, WireFormat,
};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info, warn};

#[derive(Error, Debug)]
pub enum AssemblyError {
    #[error("{agent} requires {variable} to be set")]
    MissingCredential { agent: String, variable: String },

    #[error("Could not initialize {agent}: {source}")]
    Backend {
        agent: String,
        #[source]
        source: BackendError,
    },

    #[error("Invalid agent spec: {0}")]
    InvalidSpec(#[from] DomainError),

    #[error(
        "At least 2 agents are needed for a debate (got {found}). Available providers: {available}. \
         Set provider API keys (e.g. ANTHROPIC_API_KEY, OPENAI_API_KEY, GROQ_API_KEY) or request \
         local models explicitly with --models ollama:<model>"
    )]
    InsufficientAgents { found: usize, available: String },
}

/// Whether a provider can be used with the current configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderAvailability {
    pub kind: ProviderKind,
    pub model: String,
    pub available: bool,
    /// Why the provider is unavailable, or how it will be reached
    pub note: String,
}

/// Builds a [`Council`] from a [`FileConfig`].
pub struct CouncilAssembler<'a> {
    config: &'a FileConfig,
}

impl<'a> CouncilAssembler<'a> {
    pub fn new(config: &'a FileConfig) -> Self {
        Self { config }
    }

    /// Assemble the council.
    ///
    /// With explicit specs every one of them must build; a missing credential
    /// is an error. With no specs every available provider joins in canonical
    /// order and providers that fail to build are skipped with a warning.
    pub fn assemble(&self, requested: &[AgentSpec]) -> Result<Council, AssemblyError> {
        let agents = if requested.is_empty() {
            self.auto_agents()
        } else {
            requested
                .iter()
                .map(|spec| self.build_agent(spec))
                .collect::<Result<Vec<_>, _>>()?
        };

        info!(
            "Assembled council: {}",
            agents
                .iter()
                .map(|a| format!("{} ({})", a.name(), a.model()))
                .collect::<Vec<_>>()
                .join(", ")
        );

        let found = agents.len();
        Council::new(agents).map_err(|_| AssemblyError::InsufficientAgents {
            found,
            available: self.available_names(),
        })
    }

    /// Build a single agent for `spec`.
    pub fn build_agent(&self, spec: &AgentSpec) -> Result<CouncilAgent, AssemblyError> {
        let name = spec.display_name();
        let settings = self.settings_for(spec);

        let backend = build_backend(&settings).map_err(|e| match e {
            BackendError::MissingCredential(variable) => AssemblyError::MissingCredential {
                agent: name.clone(),
                variable,
            },
            source => AssemblyError::Backend {
                agent: name.clone(),
                source,
            },
        })?;

        debug!(agent = %name, provider = %spec.provider, model = %settings.model, "Built agent");

        let profile =
            AgentProfile::new(name, spec.role()).with_temperature(self.config.council.temperature);
        Ok(CouncilAgent::new(profile, backend).with_max_output_tokens(self.config.council.max_tokens))
    }

    /// Connection settings for `spec`: spec model, then configured model,
    /// then the provider default.
    pub fn settings_for(&self, spec: &AgentSpec) -> ProviderSettings {
        let file = self.config.providers.get(spec.provider);
        let mut settings = ProviderSettings::for_kind(spec.provider);

        if let Some(model) = spec.model.as_deref().or(file.model.as_deref()) {
            settings = settings.with_model(model);
        }
        if let Some(base_url) = file.base_url {
            settings = settings.with_base_url(base_url);
        }
        if let Some(api_key) = file.api_key {
            settings = settings.with_api_key(api_key);
        }
        if let Some(seconds) = file.timeout_seconds {
            settings = settings.with_timeout(Duration::from_secs(seconds));
        }
        settings
    }

    /// Availability of every provider, in canonical order.
    pub fn available_providers(&self) -> Vec<ProviderAvailability> {
        ProviderKind::ALL
            .into_iter()
            .map(|kind| {
                let file = self.config.providers.get(kind);
                let model = file
                    .model
                    .clone()
                    .unwrap_or_else(|| kind.default_model().to_string());
                let configured = file != FileProviderConfig::default();
                let (available, note) = match kind.credential_requirement() {
                    CredentialRequirement::Required if file.has_api_key() => {
                        (true, format!("{} set", kind.api_key_var()))
                    }
                    CredentialRequirement::Required => {
                        (false, format!("{} not set", kind.api_key_var()))
                    }
                    CredentialRequirement::Optional if file.has_api_key() || configured => {
                        (true, "configured".to_string())
                    }
                    CredentialRequirement::None if configured => (
                        true,
                        format!(
                            "local at {}",
                            file.base_url.as_deref().unwrap_or(kind.default_base_url())
                        ),
                    ),
                    _ => (
                        false,
                        format!("not configured; request with --models {}", kind.as_str()),
                    ),
                };
                ProviderAvailability {
                    kind,
                    model,
                    available,
                    note,
                }
            })
            .collect()
    }

    fn auto_agents(&self) -> Vec<CouncilAgent> {
        let mut agents = Vec::new();
        for provider in self.available_providers() {
            if !provider.available {
                debug!(provider = %provider.kind, "Skipping provider: {}", provider.note);
                continue;
            }
            match self.build_agent(&AgentSpec::new(provider.kind)) {
                Ok(agent) => agents.push(agent),
                Err(e) => warn!("Skipping {}: {}", provider.kind, e),
            }
        }
        agents
    }

    fn available_names(&self) -> String {
        let names: Vec<_> = self
            .available_providers()
            .into_iter()
            .filter(|p| p.available)
            .map(|p| p.kind.as_str())
            .collect();
        if names.is_empty() {
            "none".to_string()
        } else {
            names.join(", ")
        }
    }
}

/// Build the backend matching the provider's wire format.
pub fn build_backend(
    settings: &ProviderSettings,
) -> Result<Arc<dyn TextGenerationBackend>, BackendError> {
    let backend: Arc<dyn TextGenerationBackend> = match settings.kind.wire_format() {
        WireFormat::OpenAiCompatible => Arc::new(OpenAiCompatibleBackend::new(settings)?),
        WireFormat::Anthropic => Arc::new(AnthropicBackend::new(settings)?),
        WireFormat::Gemini => Arc::new(GeminiBackend::new(settings)?),
        WireFormat::Ollama => Arc::new(OllamaBackend::new(settings)),
        WireFormat::HuggingFace => Arc::new(HuggingFaceBackend::new(settings)),
    };
    Ok(backend)
}
