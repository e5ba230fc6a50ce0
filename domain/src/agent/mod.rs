//! Agent domain module
//!
//! Identity of a council member: who it is, what role it plays, and how
//! it samples. Backend wiring lives in the application layer.

pub mod profile;

pub use profile::AgentProfile;
