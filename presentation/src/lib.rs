//! Presentation layer for llm-council
//!
//! This crate contains the CLI definition, console output formatting and the
//! progress reporters shown while a debate runs.

pub mod cli;
pub mod output;
pub mod progress;

// Re-export commonly used types
pub use cli::commands::{Cli, CliOutputFormat};
pub use output::console::ConsoleFormatter;
pub use output::formatter::OutputFormatter;
pub use progress::reporter::{ProgressReporter, SimpleProgress};
