//! Run Round use case
//!
//! Drives every council member through one round, in seat order.

use crate::council::Council;
use crate::ports::progress::{DebateProgressNotifier, NoProgress};
use council_domain::{PromptTemplate, ResponseUnit, Round, Stage};
use tracing::debug;

/// What one round produced.
#[derive(Debug, Clone)]
pub struct RoundOutcome {
    /// This round's responses, in speaking order
    pub round: Round,
    /// The working context extended with this round's responses
    pub context: Vec<ResponseUnit>,
}

/// Runs a single round against a council.
///
/// Agents speak strictly one after another. Each agent sees the carried
/// context plus every response already given in this round, and its own
/// response is appended before the next agent speaks.
pub struct RoundRunner<'a> {
    council: &'a Council,
    progress: &'a dyn DebateProgressNotifier,
}

impl<'a> RoundRunner<'a> {
    pub fn new(council: &'a Council) -> Self {
        Self {
            council,
            progress: &NoProgress,
        }
    }

    pub fn with_progress(mut self, progress: &'a dyn DebateProgressNotifier) -> Self {
        self.progress = progress;
        self
    }

    pub async fn run(
        &self,
        topic: &str,
        round_number: u32,
        carried_context: Vec<ResponseUnit>,
    ) -> RoundOutcome {
        let stage = Stage::Round(round_number);
        let prompt = PromptTemplate::round_task(topic, round_number);

        let mut context = carried_context;
        let mut round = Round::with_capacity(self.council.len());

        for agent in self.council.agents() {
            self.progress.on_agent_start(agent.name(), stage);
            debug!(agent = agent.name(), round = round_number, "Agent turn");

            let response = agent.generate_response(&prompt, &context, stage).await;

            self.progress.on_agent_complete(&response, stage);
            context.push(response.clone());
            round.push(response);
        }

        RoundOutcome { round, context }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::use_cases::test_support::{ScriptedBackend, scripted_agent};
    use std::sync::Arc;

    #[tokio::test]
    async fn test_later_agents_see_earlier_responses() {
        let a = Arc::new(ScriptedBackend::new("A"));
        let b = Arc::new(ScriptedBackend::new("B"));
        let c = Arc::new(ScriptedBackend::new("C"));
        let council = Council::new(vec![
            scripted_agent("A", &a),
            scripted_agent("B", &b),
            scripted_agent("C", &c),
        ])
        .unwrap();

        let outcome = RoundRunner::new(&council).run("Topic", 1, Vec::new()).await;

        let names: Vec<_> = outcome.round.iter().map(|r| r.agent_name.as_str()).collect();
        assert_eq!(names, vec!["A", "B", "C"]);
        assert_eq!(outcome.context.len(), 3);

        let first = &a.requests()[0].system_instruction;
        assert!(!first.contains("Previous Responses"));

        let third = &c.requests()[0].system_instruction;
        assert!(third.contains("A#0"));
        assert!(third.contains("B#0"));
        assert!(third.find("A#0") < third.find("B#0"));
    }

    #[tokio::test]
    async fn test_carried_context_is_extended() {
        let a = Arc::new(ScriptedBackend::new("A"));
        let b = Arc::new(ScriptedBackend::new("B"));
        let council = Council::new(vec![scripted_agent("A", &a), scripted_agent("B", &b)]).unwrap();
        let carried = vec![ResponseUnit::new("Old", "m", "earlier")];

        let outcome = RoundRunner::new(&council).run("Topic", 2, carried).await;

        assert_eq!(outcome.round.len(), 2);
        assert_eq!(outcome.context.len(), 3);
        assert_eq!(outcome.context[0].content, "earlier");
        assert!(a.requests()[0].system_instruction.contains("earlier"));
        assert!(a.requests()[0].user_prompt.contains("Round 2"));
    }
}
