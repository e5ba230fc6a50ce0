//! Application layer for llm-council
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod council;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::DebateParams;
pub use council::{Council, CouncilAgent, CouncilError};
pub use ports::{
    backend::{BackendError, Completion, CompletionRequest, TextGenerationBackend},
    conversation_logger::{ConversationEvent, ConversationLogger, NoConversationLogger},
    progress::{DebateProgressNotifier, NoProgress},
    result_store::{ResultStore, StoreError},
};
pub use use_cases::run_debate::{RunDebateError, RunDebateInput, RunDebateUseCase};
pub use use_cases::run_round::{RoundOutcome, RoundRunner};
