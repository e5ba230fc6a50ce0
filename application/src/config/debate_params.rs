//! Debate parameters - use case loop control.
//!
//! [`DebateParams`] groups the static parameters that control the round
//! loop in [`RunDebateUseCase`](crate::use_cases::run_debate::RunDebateUseCase).
//! The per-agent token budget is not here; it is fixed on each
//! [`CouncilAgent`](crate::council::CouncilAgent) when the council is assembled.

use serde::{Deserialize, Serialize};

/// Rounds run when nothing else is configured.
pub const DEFAULT_ROUNDS: u32 = 3;

/// Round loop control parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DebateParams {
    /// Number of discussion rounds before synthesis (must be at least 1).
    pub rounds: u32,
    /// Drop error responses from the context handed to the synthesizer.
    ///
    /// Off by default: failed turns stay visible to every later agent.
    pub exclude_failed_from_synthesis: bool,
}

impl Default for DebateParams {
    fn default() -> Self {
        Self {
            rounds: DEFAULT_ROUNDS,
            exclude_failed_from_synthesis: false,
        }
    }
}

impl DebateParams {
    // ==================== Builder Methods ====================

    pub fn with_rounds(mut self, rounds: u32) -> Self {
        self.rounds = rounds;
        self
    }

    pub fn with_exclude_failed_from_synthesis(mut self, exclude: bool) -> Self {
        self.exclude_failed_from_synthesis = exclude;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default() {
        let params = DebateParams::default();
        assert_eq!(params.rounds, 3);
        assert!(!params.exclude_failed_from_synthesis);
    }

    #[test]
    fn test_builder() {
        let params = DebateParams::default()
            .with_rounds(5)
            .with_exclude_failed_from_synthesis(true);
        assert_eq!(params.rounds, 5);
        assert!(params.exclude_failed_from_synthesis);
    }
}
