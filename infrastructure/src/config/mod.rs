//! Configuration file loading for llm-council
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. Environment variables (`ANTHROPIC_API_KEY`, `OLLAMA_MODEL`, `MAX_ROUNDS`, ...)
//! 2. `--config <path>` specified file
//! 3. Project root: `./council.toml` or `./.council.toml`
//! 4. XDG config: `$XDG_CONFIG_HOME/llm-council/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigValidationError, FileConfig, FileCouncilConfig, FileOutputConfig, FileOutputFormat,
    FileProviderConfig, FileProvidersConfig,
};
pub use loader::{APP_CONFIG_DIR, ConfigLoader, ConfigSources, PROJECT_CONFIG_FILES, map_env_key};
