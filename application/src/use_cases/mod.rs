//! Use cases
//!
//! Application-level operations that orchestrate domain logic.

pub mod run_debate;
pub mod run_round;

#[cfg(test)]
pub(crate) mod test_support;
