//! Application-level configuration.
//!
//! - [`DebateParams`] - round loop control (rounds, synthesis context filter)

pub mod debate_params;

pub use debate_params::{DEFAULT_ROUNDS, DebateParams};
