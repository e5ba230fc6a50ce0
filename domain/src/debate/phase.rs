//! Debate lifecycle state machine.

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// Where a debate currently stands.
///
/// Transitions only move forward:
/// `NotStarted -> RunningRound(1..=total) -> Synthesizing -> Complete`.
/// There is no cancellation path; failed turns degrade to error content
/// instead of stopping the machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum DebatePhase {
    NotStarted { total: u32 },
    RunningRound { round: u32, total: u32 },
    Synthesizing,
    Complete,
}

impl DebatePhase {
    /// Create the initial phase for a debate of `total` rounds.
    pub fn new(total: u32) -> Result<Self, DomainError> {
        if total == 0 {
            return Err(DomainError::InvalidRounds(total));
        }
        Ok(DebatePhase::NotStarted { total })
    }

    /// The single forward transition from this phase.
    ///
    /// `Complete` is terminal and maps to itself.
    pub fn advance(self) -> Self {
        match self {
            DebatePhase::NotStarted { total } => DebatePhase::RunningRound { round: 1, total },
            DebatePhase::RunningRound { round, total } if round < total => {
                DebatePhase::RunningRound {
                    round: round + 1,
                    total,
                }
            }
            DebatePhase::RunningRound { .. } => DebatePhase::Synthesizing,
            DebatePhase::Synthesizing | DebatePhase::Complete => DebatePhase::Complete,
        }
    }

    /// The round being run, if any.
    pub fn current_round(&self) -> Option<u32> {
        match self {
            DebatePhase::RunningRound { round, .. } => Some(*round),
            _ => None,
        }
    }

    pub fn is_complete(&self) -> bool {
        matches!(self, DebatePhase::Complete)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DebatePhase::NotStarted { .. } => "not_started",
            DebatePhase::RunningRound { .. } => "running_round",
            DebatePhase::Synthesizing => "synthesizing",
            DebatePhase::Complete => "complete",
        }
    }
}

impl std::fmt::Display for DebatePhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DebatePhase::RunningRound { round, total } => {
                write!(f, "Round {}/{}", round, total)
            }
            other => write!(f, "{}", other.as_str()),
        }
    }
}
