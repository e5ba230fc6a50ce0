//! Output format value object

use serde::{Deserialize, Serialize};

/// How a finished debate is printed to the console
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Every round followed by the synthesis (default)
    #[default]
    Full,
    /// Only the synthesized article
    Synthesis,
    /// The persisted JSON transcript
    Json,
}
