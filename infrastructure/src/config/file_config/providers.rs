//! Provider configuration from TOML (`[providers.<name>]` sections)

use council_domain::ProviderKind;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Settings for one provider. Every field falls back to the provider's
/// built-in default when absent.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileProviderConfig {
    /// API key (usually supplied via `<PREFIX>_API_KEY` rather than the file)
    pub api_key: Option<String>,
    /// Model identifier
    pub model: Option<String>,
    /// API base URL (e.g. a remote Ollama host)
    pub base_url: Option<String>,
    /// Request timeout in seconds
    pub timeout_seconds: Option<u64>,
}

impl std::fmt::Debug for FileProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileProviderConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("timeout_seconds", &self.timeout_seconds)
            .finish()
    }
}

impl FileProviderConfig {
    /// True when a non-blank API key is present.
    pub fn has_api_key(&self) -> bool {
        self.api_key
            .as_deref()
            .is_some_and(|key| !key.trim().is_empty())
    }

    /// Field-wise overlay: values set in `other` win.
    fn overlay(&mut self, other: &FileProviderConfig) {
        if other.api_key.is_some() {
            self.api_key = other.api_key.clone();
        }
        if other.model.is_some() {
            self.model = other.model.clone();
        }
        if other.base_url.is_some() {
            self.base_url = other.base_url.clone();
        }
        if other.timeout_seconds.is_some() {
            self.timeout_seconds = other.timeout_seconds;
        }
    }
}

/// All `[providers.*]` tables keyed by the name used in the file.
///
/// Names may be any alias `ProviderKind` accepts (`anthropic` and `claude`
/// address the same provider).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FileProvidersConfig {
    pub entries: BTreeMap<String, FileProviderConfig>,
}

impl FileProvidersConfig {
    /// Effective settings for `kind`, merging every table that names it.
    ///
    /// The canonical name (`claude`) is applied last so it wins over aliases.
    pub fn get(&self, kind: ProviderKind) -> FileProviderConfig {
        let mut merged = FileProviderConfig::default();
        let mut canonical = None;
        for (name, entry) in &self.entries {
            if name == kind.as_str() {
                canonical = Some(entry);
            } else if name.parse::<ProviderKind>().ok() == Some(kind) {
                merged.overlay(entry);
            }
        }
        if let Some(entry) = canonical {
            merged.overlay(entry);
        }
        merged
    }

    /// Table names that do not resolve to any provider.
    pub fn unknown_names(&self) -> Vec<&str> {
        self.entries
            .keys()
            .filter(|name| name.parse::<ProviderKind>().is_err())
            .map(String::as_str)
            .collect()
    }
}
