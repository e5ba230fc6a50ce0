//! Output formatter trait

use council_domain::{DebateRecord, OutputFormat};

/// Trait for formatting debate results
pub trait OutputFormatter {
    /// Every round followed by the synthesis
    fn format(&self, record: &DebateRecord) -> String;

    /// The JSON transcript
    fn format_json(&self, record: &DebateRecord) -> String;

    /// Synthesis only (concise output)
    fn format_synthesis_only(&self, record: &DebateRecord) -> String;

    /// Dispatch on the requested [`OutputFormat`].
    fn render(&self, record: &DebateRecord, format: OutputFormat) -> String {
        match format {
            OutputFormat::Full => self.format(record),
            OutputFormat::Synthesis => self.format_synthesis_only(record),
            OutputFormat::Json => self.format_json(record),
        }
    }
}
