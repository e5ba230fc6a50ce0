//! Which instruction variant an agent is asked to follow.

use serde::{Deserialize, Serialize};

/// Round number reserved for the synthesis pass.
pub const SYNTHESIS_ROUND_NUMBER: u32 = 999;

/// The debate stage an agent turn belongs to.
///
/// Round 1 asks for an initial, well-sourced analysis; every later round asks
/// for critical review and cross-checking; the synthesis stage asks for the
/// final long-form article.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u32", from = "u32")]
pub enum Stage {
    Round(u32),
    Synthesis,
}

impl Stage {
    /// The integer round number handed to agents (`999` for synthesis).
    pub fn number(&self) -> u32 {
        match self {
            Stage::Round(n) => *n,
            Stage::Synthesis => SYNTHESIS_ROUND_NUMBER,
        }
    }

    pub fn from_number(number: u32) -> Self {
        if number == SYNTHESIS_ROUND_NUMBER {
            Stage::Synthesis
        } else {
            Stage::Round(number)
        }
    }

    /// Round 1 (or anything below it) gets the opening-analysis guidance.
    pub fn is_opening(&self) -> bool {
        matches!(self, Stage::Round(n) if *n <= 1)
    }

    pub fn is_synthesis(&self) -> bool {
        matches!(self, Stage::Synthesis)
    }

    pub fn display_name(&self) -> String {
        match self {
            Stage::Round(n) => format!("Round {}", n),
            Stage::Synthesis => "Synthesis".to_string(),
        }
    }
}

impl From<Stage> for u32 {
    fn from(stage: Stage) -> Self {
        stage.number()
    }
}

impl From<u32> for Stage {
    fn from(number: u32) -> Self {
        Stage::from_number(number)
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sentinel_maps_to_synthesis() {
        assert_eq!(Stage::from_number(999), Stage::Synthesis);
        assert_eq!(Stage::Synthesis.number(), 999);
        assert_eq!(Stage::from_number(2), Stage::Round(2));
    }

    #[test]
    fn test_opening_round() {
        assert!(Stage::Round(1).is_opening());
        assert!(!Stage::Round(2).is_opening());
        assert!(!Stage::Synthesis.is_opening());
    }

    #[test]
    fn test_serializes_as_number() {
        assert_eq!(serde_json::to_string(&Stage::Round(3)).unwrap(), "3");
        assert_eq!(serde_json::to_string(&Stage::Synthesis).unwrap(), "999");
    }
}
