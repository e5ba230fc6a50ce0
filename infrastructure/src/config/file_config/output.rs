//! Output configuration from TOML (`[output]` section)

use council_domain::OutputFormat;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

// Re-export OutputFormat from domain for convenience
pub use council_domain::OutputFormat as FileOutputFormat;

/// Raw output configuration from TOML
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileOutputConfig {
    /// Output format (uses domain type)
    pub format: Option<OutputFormat>,
    /// Directory debate transcripts are written to
    pub directory: PathBuf,
    /// Write the JSON transcript
    pub save_json: bool,
    /// Write the Markdown article next to the JSON transcript
    pub save_markdown: bool,
    /// Enable colored terminal output
    pub color: bool,
}

impl Default for FileOutputConfig {
    fn default() -> Self {
        Self {
            format: None,
            directory: PathBuf::from("."),
            save_json: true,
            save_markdown: true,
            color: true,
        }
    }
}
