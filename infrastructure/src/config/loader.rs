//! Configuration file loader with multi-source merging

use super::file_config::FileConfig;
use council_domain::ProviderKind;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use std::path::{Path, PathBuf};

/// Directory name under the platform config dir
pub const APP_CONFIG_DIR: &str = "llm-council";

/// Project-level config file names, checked in order
pub const PROJECT_CONFIG_FILES: [&str; 2] = ["council.toml", ".council.toml"];

/// Config files taking part in a load, lowest priority first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigSources {
    pub global: Option<PathBuf>,
    pub project: Option<PathBuf>,
    pub explicit: Option<PathBuf>,
}

impl ConfigSources {
    /// Find the global and project files that exist, plus the explicit path.
    pub fn discover(explicit: Option<&Path>) -> Self {
        Self {
            global: ConfigLoader::global_config_path().filter(|p| p.exists()),
            project: ConfigLoader::project_config_path(),
            explicit: explicit.map(Path::to_path_buf),
        }
    }
}

/// Configuration loader that handles file discovery and merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from all sources with proper priority
    ///
    /// Priority (highest to lowest):
    /// 1. Environment (`<PROVIDER>_API_KEY`, `MAX_ROUNDS`, ...)
    /// 2. Explicit config path (if provided)
    /// 3. Project root: `./council.toml` or `./.council.toml`
    /// 4. Global: `$XDG_CONFIG_HOME/llm-council/config.toml`
    /// 5. Default values
    pub fn load(config_path: Option<&Path>) -> Result<FileConfig, Box<figment::Error>> {
        Self::load_from(&ConfigSources::discover(config_path), true)
    }

    /// Load from an explicit set of files, optionally layering the environment on top.
    pub fn load_from(
        sources: &ConfigSources,
        with_env: bool,
    ) -> Result<FileConfig, Box<figment::Error>> {
        let mut figment = Figment::new().merge(Serialized::defaults(FileConfig::default()));

        if let Some(global) = &sources.global {
            figment = figment.merge(Toml::file(global));
        }

        if let Some(project) = &sources.project {
            figment = figment.merge(Toml::file(project));
        }

        if let Some(explicit) = &sources.explicit {
            if !explicit.exists() {
                return Err(Box::new(figment::Error::from(format!(
                    "config file not found: {}",
                    explicit.display()
                ))));
            }
            figment = figment.merge(Toml::file(explicit));
        }

        if with_env {
            figment = figment.merge(Self::env_provider());
        }

        figment.extract().map_err(Box::new)
    }

    /// Defaults plus environment (for `--no-config`).
    ///
    /// Credentials still come from the environment so `--no-config` can run a
    /// real debate.
    pub fn load_defaults() -> Result<FileConfig, Box<figment::Error>> {
        Self::load_from(&ConfigSources::default(), true)
    }

    /// Environment variables mapped onto config keys by [`map_env_key`].
    fn env_provider() -> Env {
        Env::raw()
            .filter_map(|key| map_env_key(key.as_str()).map(Into::into))
            .split(".")
    }

    /// Get the global config file path
    ///
    /// Returns XDG_CONFIG_HOME/llm-council/config.toml if set,
    /// otherwise the platform config dir equivalent.
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join(APP_CONFIG_DIR).join("config.toml"))
    }

    /// Get the project-level config file path (if it exists)
    pub fn project_config_path() -> Option<PathBuf> {
        PROJECT_CONFIG_FILES
            .iter()
            .map(PathBuf::from)
            .find(|path| path.exists())
    }

    /// Print the config file locations being used (for `--show-config`)
    pub fn print_config_sources(explicit: Option<&Path>) {
        println!("Configuration sources (in priority order):");

        println!("  [ENV  ] Environment: <PROVIDER>_API_KEY, <PROVIDER>_MODEL, <PROVIDER>_BASE_URL, MAX_ROUNDS, MAX_TOKENS, TEMPERATURE");

        if let Some(path) = explicit {
            let status = if path.exists() { "FOUND" } else { "MISSING" };
            println!("  [{:<5}] Explicit: {}", status, path.display());
        }

        if let Some(path) = Self::project_config_path() {
            println!("  [FOUND] Project: {}", path.display());
        } else {
            println!("  [     ] Project: ./council.toml or ./.council.toml");
        }

        if let Some(path) = Self::global_config_path() {
            if path.exists() {
                println!("  [FOUND] Global:  {}", path.display());
            } else {
                println!("  [     ] Global:  {}", path.display());
            }
        }

        println!("  [     ] Default: built-in defaults");
    }
}

/// Map an environment variable name to a dotted config key.
///
/// Provider variables use the historical prefixes (`ANTHROPIC_API_KEY`,
/// `GOOGLE_MODEL`, `OLLAMA_BASE_URL`, ...). Anything unrecognized maps to
/// `None` and is ignored.
pub fn map_env_key(key: &str) -> Option<String> {
    let key = key.to_ascii_uppercase();

    match key.as_str() {
        "MAX_ROUNDS" => return Some("council.rounds".to_string()),
        "MAX_TOKENS" => return Some("council.max_tokens".to_string()),
        "TEMPERATURE" => return Some("council.temperature".to_string()),
        _ => {}
    }

    for (suffix, field) in [
        ("_API_KEY", "api_key"),
        ("_BASE_URL", "base_url"),
        ("_MODEL", "model"),
    ] {
        if let Some(prefix) = key.strip_suffix(suffix)
            && let Some(kind) = ProviderKind::from_env_prefix(prefix)
        {
            return Some(format!("providers.{}.{}", kind.as_str(), field));
        }
    }

    None
}
