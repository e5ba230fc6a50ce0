//! Progress notification port
//!
//! Defines the interface for reporting progress while a debate runs.

use council_domain::{ResponseUnit, Stage};

/// Callback for progress updates during a debate
///
/// Implementations live in the presentation layer and can display
/// progress in various ways (spinner, plain lines, nothing at all).
pub trait DebateProgressNotifier: Send + Sync {
    /// Called once before round 1
    fn on_debate_start(&self, topic: &str, total_rounds: u32, participants: &[String]);

    /// Called when a round starts
    fn on_round_start(&self, round: u32, total_rounds: u32);

    /// Called right before an agent's turn
    fn on_agent_start(&self, _agent: &str, _stage: Stage) {}

    /// Called when an agent's turn produced a response (successful or not)
    fn on_agent_complete(&self, _response: &ResponseUnit, _stage: Stage) {}

    /// Called when every agent has spoken in a round
    fn on_round_complete(&self, round: u32);

    /// Called before the synthesizer runs
    fn on_synthesis_start(&self, _synthesizer: &str) {}

    /// Called when the synthesis response is available
    fn on_synthesis_complete(&self, _synthesis: &ResponseUnit) {}
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoProgress;

impl DebateProgressNotifier for NoProgress {
    fn on_debate_start(&self, _topic: &str, _total_rounds: u32, _participants: &[String]) {}
    fn on_round_start(&self, _round: u32, _total_rounds: u32) {}
    fn on_round_complete(&self, _round: u32) {}
}
