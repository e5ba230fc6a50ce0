//! Domain layer for llm-council
//!
//! This crate contains the core data model, the debate state machine and
//! prompt construction. It has no dependencies on infrastructure or
//! presentation concerns.
//!
//! # Core Concepts
//!
//! ## Council
//!
//! A council is an ordered list of agents, each backed by a different LLM
//! provider. A debate runs the council through several rounds:
//!
//! - **Round 1**: every agent gives an initial, well-sourced analysis
//! - **Round 2+**: every agent critically reviews everything said so far
//! - **Synthesis**: the first agent writes a long-form article from the
//!   whole transcript
//!
//! Within a round each agent sees the responses of every agent seated
//! before it, so context grows monotonically through the debate.

pub mod agent;
pub mod config;
pub mod core;
pub mod debate;
pub mod prompt;
pub mod providers;

// Re-export commonly used types
pub use agent::AgentProfile;
pub use config::OutputFormat;
pub use core::{error::DomainError, topic::Topic};
pub use debate::{
    phase::DebatePhase,
    record::DebateRecord,
    response::{ERROR_MARKER, Metadata, ResponseUnit},
    round::Round,
    stage::{SYNTHESIS_ROUND_NUMBER, Stage},
};
pub use prompt::PromptTemplate;
pub use providers::{AgentSpec, CredentialRequirement, ProviderKind, WireFormat};
