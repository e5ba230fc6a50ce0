//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and use domain types where appropriate.

mod council;
mod output;
mod providers;

pub use council::FileCouncilConfig;
pub use output::{FileOutputConfig, FileOutputFormat};
pub use providers::{FileProviderConfig, FileProvidersConfig};

use council_domain::AgentSpec;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration validation errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigValidationError {
    #[error("council.rounds must be at least 1")]
    ZeroRounds,

    #[error("council.max_tokens cannot be 0")]
    ZeroMaxTokens,

    #[error("council.agents contains an empty agent spec")]
    EmptyAgentSpec,

    #[error("council.agents: {0}")]
    InvalidAgentSpec(String),

    #[error("providers.{0}: unknown provider")]
    UnknownProvider(String),

    #[error("providers.{0}.timeout_seconds cannot be 0")]
    InvalidTimeout(String),
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Debate settings
    pub council: FileCouncilConfig,
    /// Per-provider credentials, models and endpoints
    pub providers: FileProvidersConfig,
    /// Output settings
    pub output: FileOutputConfig,
}

impl FileConfig {
    /// Validate the configuration, stopping at the first problem.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.council.rounds == 0 {
            return Err(ConfigValidationError::ZeroRounds);
        }

        if self.council.max_tokens == 0 {
            return Err(ConfigValidationError::ZeroMaxTokens);
        }

        for spec in &self.council.agents {
            if spec.trim().is_empty() {
                return Err(ConfigValidationError::EmptyAgentSpec);
            }
            spec.parse::<AgentSpec>()
                .map_err(|e| ConfigValidationError::InvalidAgentSpec(e.to_string()))?;
        }

        if let Some(name) = self.providers.unknown_names().first() {
            return Err(ConfigValidationError::UnknownProvider(name.to_string()));
        }

        for (name, entry) in &self.providers.entries {
            if entry.timeout_seconds == Some(0) {
                return Err(ConfigValidationError::InvalidTimeout(name.clone()));
            }
        }

        Ok(())
    }

    /// Parsed agent specs, in configured order.
    ///
    /// Call [`validate`](Self::validate) first; unparseable entries are skipped.
    pub fn agent_specs(&self) -> Vec<AgentSpec> {
        self.council
            .agents
            .iter()
            .filter_map(|spec| spec.parse().ok())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use council_domain::{OutputFormat, ProviderKind};

    #[test]
    fn test_deserialize_full_config() {
        let toml_str = r#"
[council]
rounds = 2
max_tokens = 1500
temperature = 0.4
agents = ["claude", "ollama:llama3.1:8b"]

[providers.claude]
model = "claude-3-opus-20240229"

[providers.ollama]
base_url = "http://gpu-box:11434"
timeout_seconds = 600

[output]
format = "json"
color = false
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.council.rounds, 2);
        assert_eq!(config.council.max_tokens, 1500);
        assert_eq!(config.council.temperature, 0.4);
        assert_eq!(
            config.providers.get(ProviderKind::Claude).model.as_deref(),
            Some("claude-3-opus-20240229")
        );
        assert_eq!(
            config.providers.get(ProviderKind::Ollama).timeout_seconds,
            Some(600)
        );
        assert_eq!(config.output.format, Some(OutputFormat::Json));
        assert!(!config.output.color);

        let specs = config.agent_specs();
        assert_eq!(specs.len(), 2);
        assert_eq!(specs[1].model.as_deref(), Some("llama3.1:8b"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_deserialize_partial_config() {
        let toml_str = r#"
[council]
rounds = 5
"#;
        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.council.rounds, 5);
        assert_eq!(config.council.max_tokens, 2000);
        assert_eq!(config.council.temperature, 0.7);
        assert!(config.council.agents.is_empty());
        assert!(config.output.save_json);
    }

    #[test]
    fn test_default_config() {
        let config = FileConfig::default();
        assert_eq!(config.council.rounds, 3);
        assert!(!config.council.exclude_failed_from_synthesis);
        assert!(config.providers.entries.is_empty());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_zero_rounds() {
        let config: FileConfig = toml::from_str("[council]\nrounds = 0\n").unwrap();
        assert_eq!(config.validate(), Err(ConfigValidationError::ZeroRounds));
    }

    #[test]
    fn test_validate_zero_max_tokens() {
        let config: FileConfig = toml::from_str("[council]\nmax_tokens = 0\n").unwrap();
        assert_eq!(config.validate(), Err(ConfigValidationError::ZeroMaxTokens));
    }

    #[test]
    fn test_validate_empty_agent_spec() {
        let toml_str = r#"
[council]
agents = ["gemini", ""]
"#;
        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.validate(), Err(ConfigValidationError::EmptyAgentSpec));
    }

    #[test]
    fn test_validate_unknown_agent_provider() {
        let config: FileConfig = toml::from_str("[council]\nagents = [\"bard\"]\n").unwrap();
        assert!(matches!(
            config.validate(),
            Err(ConfigValidationError::InvalidAgentSpec(_))
        ));
    }

    #[test]
    fn test_validate_unknown_provider_table() {
        let config: FileConfig = toml::from_str("[providers.bard]\nmodel = \"x\"\n").unwrap();
        assert_eq!(
            config.validate(),
            Err(ConfigValidationError::UnknownProvider("bard".to_string()))
        );
    }

    #[test]
    fn test_validate_zero_timeout() {
        let config: FileConfig =
            toml::from_str("[providers.groq]\ntimeout_seconds = 0\n").unwrap();
        assert_eq!(
            config.validate(),
            Err(ConfigValidationError::InvalidTimeout("groq".to_string()))
        );
    }
}
