//! Council configuration from TOML (`[council]` section)

use council_application::config::DEFAULT_ROUNDS;
use council_application::council::DEFAULT_MAX_OUTPUT_TOKENS;
use council_domain::agent::profile::DEFAULT_TEMPERATURE;
use serde::{Deserialize, Serialize};

/// Raw council configuration from TOML
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileCouncilConfig {
    /// Debate rounds before synthesis
    pub rounds: u32,
    /// Output token budget shared by every agent
    pub max_tokens: u32,
    /// Sampling temperature applied to every agent
    pub temperature: f64,
    /// Agent specs (`"claude"`, `"ollama:llama3.1:8b"`); empty means every
    /// available provider
    pub agents: Vec<String>,
    /// Hide failed turns from the synthesizer
    pub exclude_failed_from_synthesis: bool,
}

impl Default for FileCouncilConfig {
    fn default() -> Self {
        Self {
            rounds: DEFAULT_ROUNDS,
            max_tokens: DEFAULT_MAX_OUTPUT_TOKENS,
            temperature: DEFAULT_TEMPERATURE,
            agents: Vec::new(),
            exclude_failed_from_synthesis: false,
        }
    }
}
