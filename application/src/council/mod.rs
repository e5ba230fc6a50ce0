//! Council membership
//!
//! [`CouncilAgent`] wraps a backend with an identity and turns every call
//! into a [`ResponseUnit`](council_domain::ResponseUnit), failures included.
//! [`Council`] is the ordered, non-trivial set of agents a debate runs with.

pub mod agent;
pub mod roster;

pub use agent::{CouncilAgent, DEFAULT_MAX_OUTPUT_TOKENS};
pub use roster::{Council, CouncilError};
