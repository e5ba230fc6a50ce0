//! Infrastructure layer for llm-council
//!
//! This crate contains adapters that implement the ports defined in the
//! application layer: provider backends, configuration file loading, the
//! JSONL debate log and the result stores.

pub mod config;
pub mod logging;
pub mod providers;
pub mod storage;

// Re-export commonly used types
pub use config::{
    ConfigLoader, ConfigSources, ConfigValidationError, FileConfig, FileCouncilConfig,
    FileOutputConfig, FileOutputFormat, FileProviderConfig, FileProvidersConfig,
};
pub use logging::JsonlConversationLogger;
pub use providers::{
    AssemblyError, CouncilAssembler, ProviderAvailability, ProviderSettings,
    factory::build_backend,
};
pub use storage::{
    CompositeResultStore, JsonResultStore, MarkdownRenderer, MarkdownResultStore, file_stem,
};
