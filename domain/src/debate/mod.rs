//! Debate domain
//!
//! The transcript types produced by a council debate and the state machine
//! that drives one:
//!
//! - [`response::ResponseUnit`] - one agent's output for one turn
//! - [`round::Round`] - every agent's output for one pass, in council order
//! - [`record::DebateRecord`] - the write-once result of a complete debate
//! - [`stage::Stage`] - which instruction variant an agent is answering
//! - [`phase::DebatePhase`] - `NotStarted -> RunningRound(k) -> Synthesizing -> Complete`

pub mod phase;
pub mod record;
pub mod response;
pub mod round;
pub mod stage;
