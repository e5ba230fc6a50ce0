//! The ordered council.

use super::agent::CouncilAgent;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CouncilError {
    #[error("A council needs at least {required} agents (got {found})")]
    InsufficientAgents { required: usize, found: usize },
}

/// Ordered list of agents taking part in a debate.
///
/// Order is speaking order in every round, and the first agent is the
/// synthesizer. The list is fixed for the lifetime of the council.
#[derive(Debug, Clone)]
pub struct Council {
    agents: Vec<CouncilAgent>,
}

impl Council {
    /// Smallest council that can hold a debate.
    pub const MIN_AGENTS: usize = 2;

    pub fn new(agents: Vec<CouncilAgent>) -> Result<Self, CouncilError> {
        if agents.len() < Self::MIN_AGENTS {
            return Err(CouncilError::InsufficientAgents {
                required: Self::MIN_AGENTS,
                found: agents.len(),
            });
        }
        Ok(Self { agents })
    }

    pub fn agents(&self) -> &[CouncilAgent] {
        &self.agents
    }

    pub fn len(&self) -> usize {
        self.agents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    /// Agent names in speaking order
    pub fn participant_names(&self) -> Vec<String> {
        self.agents.iter().map(|a| a.name().to_string()).collect()
    }

    /// The agent that writes the final synthesis
    pub fn synthesizer(&self) -> &CouncilAgent {
        &self.agents[0]
    }
}
