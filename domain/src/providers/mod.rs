//! Provider catalog (provider-neutral, transport-free).
//!
//! - [`kind::ProviderKind`] - every backend the council can seat, with its
//!   defaults (display name, role, model, endpoint, credential variable)
//! - [`spec::AgentSpec`] - `provider` or `provider:model` as typed on the CLI

pub mod kind;
pub mod spec;

pub use kind::{CredentialRequirement, ProviderKind, WireFormat};
pub use spec::AgentSpec;
