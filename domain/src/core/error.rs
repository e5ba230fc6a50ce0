//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Invalid topic: {0}")]
    InvalidTopic(String),

    #[error("A debate needs at least one round (got {0})")]
    InvalidRounds(u32),

    #[error("Unknown provider: {0}")]
    UnknownProvider(String),

    #[error("Invalid agent spec: {0}")]
    InvalidAgentSpec(String),
}
