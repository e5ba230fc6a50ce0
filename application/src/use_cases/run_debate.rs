//! Run Debate use case
//!
//! Orchestrates the full debate flow: N sequential rounds followed by a
//! synthesis pass on the first agent.

use crate::config::DebateParams;
use crate::council::Council;
use crate::ports::conversation_logger::{
    ConversationEvent, ConversationLogger, NoConversationLogger,
};
use crate::ports::progress::{DebateProgressNotifier, NoProgress};
use crate::use_cases::run_round::RoundRunner;
use chrono::{Local, SecondsFormat};
use council_domain::{
    DebatePhase, DebateRecord, DomainError, PromptTemplate, ResponseUnit, Round, Stage, Topic,
};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors that can occur before a debate gets going
///
/// Once the first round starts a debate always completes; agent failures
/// are recorded in the transcript instead of surfacing here.
#[derive(Error, Debug)]
pub enum RunDebateError {
    #[error(transparent)]
    InvalidInput(#[from] DomainError),
}

/// Input for the RunDebate use case
#[derive(Debug, Clone)]
pub struct RunDebateInput {
    pub topic: Topic,
    pub params: DebateParams,
}

impl RunDebateInput {
    pub fn new(topic: Topic) -> Self {
        Self {
            topic,
            params: DebateParams::default(),
        }
    }

    pub fn with_params(mut self, params: DebateParams) -> Self {
        self.params = params;
        self
    }

    pub fn with_rounds(mut self, rounds: u32) -> Self {
        self.params.rounds = rounds;
        self
    }
}

/// Use case for running a council debate
pub struct RunDebateUseCase {
    council: Arc<Council>,
    conversation_logger: Arc<dyn ConversationLogger>,
}

impl RunDebateUseCase {
    pub fn new(council: Arc<Council>) -> Self {
        Self {
            council,
            conversation_logger: Arc::new(NoConversationLogger),
        }
    }

    pub fn with_conversation_logger(mut self, logger: Arc<dyn ConversationLogger>) -> Self {
        self.conversation_logger = logger;
        self
    }

    pub fn council(&self) -> &Council {
        &self.council
    }

    /// Execute the use case with default (no-op) progress
    pub async fn execute(&self, input: RunDebateInput) -> Result<DebateRecord, RunDebateError> {
        self.execute_with_progress(input, &NoProgress).await
    }

    /// Execute the use case with progress callbacks
    pub async fn execute_with_progress(
        &self,
        input: RunDebateInput,
        progress: &dyn DebateProgressNotifier,
    ) -> Result<DebateRecord, RunDebateError> {
        let total_rounds = input.params.rounds;
        let mut phase = DebatePhase::new(total_rounds)?;

        let topic = input.topic.content();
        let participants = self.council.participant_names();

        info!(
            "Starting debate with {} agents over {} rounds",
            participants.len(),
            total_rounds
        );
        progress.on_debate_start(topic, total_rounds, &participants);
        self.conversation_logger.log(ConversationEvent::debate_started(
            topic,
            total_rounds,
            &participants,
        ));

        let runner = RoundRunner::new(&self.council).with_progress(progress);
        let mut rounds: Vec<Round> = Vec::with_capacity(total_rounds as usize);
        let mut context: Vec<ResponseUnit> = Vec::new();

        phase = phase.advance();
        while let Some(round_number) = phase.current_round() {
            info!("{}", phase);
            progress.on_round_start(round_number, total_rounds);

            let outcome = runner.run(topic, round_number, context).await;
            self.log_round(round_number, &outcome.round);
            progress.on_round_complete(round_number);

            context = outcome.context;
            rounds.push(outcome.round);
            phase = phase.advance();
        }

        debug!("{}", phase);
        let synthesis = self.synthesize(topic, &rounds, &input.params, progress).await;
        phase = phase.advance();
        debug_assert!(phase.is_complete());

        let record = DebateRecord::new(
            topic,
            Local::now().to_rfc3339_opts(SecondsFormat::Micros, false),
            participants,
            rounds,
            synthesis.content,
        );

        info!(
            "Debate complete: {} rounds, {} tokens",
            record.rounds().len(),
            record.total_tokens()
        );
        Ok(record)
    }

    /// Quick mode: a single round followed by synthesis, returning only the
    /// synthesis text.
    pub async fn quick_discuss(&self, topic: Topic) -> Result<String, RunDebateError> {
        self.quick_discuss_with_progress(topic, DebateParams::default(), &NoProgress)
            .await
    }

    /// Quick mode honoring `params`; the round count is always forced to 1.
    pub async fn quick_discuss_with_progress(
        &self,
        topic: Topic,
        params: DebateParams,
        progress: &dyn DebateProgressNotifier,
    ) -> Result<String, RunDebateError> {
        let input = RunDebateInput::new(topic).with_params(params.with_rounds(1));
        let record = self.execute_with_progress(input, progress).await?;
        Ok(record.synthesis().to_string())
    }

    fn log_round(&self, round_number: u32, round: &Round) {
        let stage = Stage::Round(round_number);
        for response in round {
            self.conversation_logger
                .log(ConversationEvent::agent_response(stage, response));
        }
        self.conversation_logger.log(ConversationEvent::round_completed(
            round_number,
            round.len(),
            round.tokens_used(),
        ));
    }

    /// The synthesizer sees the whole transcript flattened in round order.
    async fn synthesize(
        &self,
        topic: &str,
        rounds: &[Round],
        params: &DebateParams,
        progress: &dyn DebateProgressNotifier,
    ) -> ResponseUnit {
        let transcript = synthesis_context(rounds, params.exclude_failed_from_synthesis);
        let synthesizer = self.council.synthesizer();

        info!(
            "Synthesizing with {} over {} responses",
            synthesizer.name(),
            transcript.len()
        );
        progress.on_synthesis_start(synthesizer.name());

        let synthesis = synthesizer
            .generate_response(
                &PromptTemplate::synthesis_prompt(topic),
                &transcript,
                Stage::Synthesis,
            )
            .await;

        if synthesis.is_error() {
            warn!("Synthesis failed; the article will carry the error text");
        }

        progress.on_synthesis_complete(&synthesis);
        self.conversation_logger
            .log(ConversationEvent::agent_response(Stage::Synthesis, &synthesis));
        self.conversation_logger.log(ConversationEvent::synthesis_completed(
            &synthesis,
            DebateRecord::sum_tokens(rounds),
        ));

        synthesis
    }
}

fn synthesis_context(rounds: &[Round], exclude_failed: bool) -> Vec<ResponseUnit> {
    rounds
        .iter()
        .flat_map(Round::iter)
        .filter(|response| !(exclude_failed && response.is_error()))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::use_cases::test_support::{ScriptedBackend, scripted_agent};
    use std::sync::Mutex;

    fn two_agent_council(a: &Arc<ScriptedBackend>, b: &Arc<ScriptedBackend>) -> Arc<Council> {
        Arc::new(Council::new(vec![scripted_agent("A", a), scripted_agent("B", b)]).unwrap())
    }

    fn topic() -> Topic {
        Topic::new("Is Rust memory safe?").unwrap()
    }

    // ==================== Test Recorders ====================

    #[derive(Default)]
    struct RecordingProgress {
        events: Mutex<Vec<String>>,
    }

    impl RecordingProgress {
        fn push(&self, event: String) {
            self.events.lock().unwrap().push(event);
        }
    }

    impl DebateProgressNotifier for RecordingProgress {
        fn on_debate_start(&self, _topic: &str, total_rounds: u32, participants: &[String]) {
            self.push(format!("start:{}:{}", total_rounds, participants.join(",")));
        }

        fn on_round_start(&self, round: u32, _total_rounds: u32) {
            self.push(format!("round_start:{}", round));
        }

        fn on_agent_start(&self, agent: &str, stage: Stage) {
            self.push(format!("agent_start:{}:{}", agent, stage.number()));
        }

        fn on_agent_complete(&self, response: &ResponseUnit, _stage: Stage) {
            self.push(format!("agent_complete:{}", response.content));
        }

        fn on_round_complete(&self, round: u32) {
            self.push(format!("round_complete:{}", round));
        }

        fn on_synthesis_start(&self, synthesizer: &str) {
            self.push(format!("synthesis_start:{}", synthesizer));
        }

        fn on_synthesis_complete(&self, synthesis: &ResponseUnit) {
            self.push(format!("synthesis_complete:{}", synthesis.content));
        }
    }

    #[derive(Default)]
    struct RecordingLogger {
        event_types: Mutex<Vec<&'static str>>,
    }

    impl ConversationLogger for RecordingLogger {
        fn log(&self, event: ConversationEvent) {
            self.event_types.lock().unwrap().push(event.event_type);
        }
    }

    // ==================== Flow ====================

    #[tokio::test]
    async fn test_two_agents_two_rounds_context_flow() {
        let a = Arc::new(ScriptedBackend::new("A"));
        let b = Arc::new(ScriptedBackend::new("B"));
        let use_case = RunDebateUseCase::new(two_agent_council(&a, &b));

        let record = use_case
            .execute(RunDebateInput::new(topic()).with_rounds(2))
            .await
            .unwrap();

        // Round 1, A: no context at all
        let a_requests = a.requests();
        let b_requests = b.requests();
        assert_eq!(a_requests.len(), 3);
        assert_eq!(b_requests.len(), 2);
        assert!(!a_requests[0].system_instruction.contains("Previous Responses"));

        // Round 1, B: sees R1A
        assert!(b_requests[0].system_instruction.contains("A#0"));

        // Round 2, A: sees R1A, R1B
        let r2a = &a_requests[1].system_instruction;
        assert!(r2a.contains("A#0") && r2a.contains("B#0"));
        assert!(r2a.contains("CRITICAL REVIEW"));

        // Round 2, B: sees R1A, R1B, R2A in that order, not itself
        let r2b = &b_requests[1].system_instruction;
        let positions: Vec<_> = ["A#0", "B#0", "A#1"]
            .iter()
            .map(|needle| r2b.find(needle).unwrap())
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
        assert!(!r2b.contains("B#1"));

        // Synthesis on A with the full transcript
        let synth = &a_requests[2];
        assert_eq!(synth.user_prompt, PromptTemplate::synthesis_prompt(topic().content()));
        assert!(synth.system_instruction.contains("FINAL SYNTHESIS"));
        for needle in ["A#0", "B#0", "A#1", "B#1"] {
            assert!(synth.system_instruction.contains(needle));
        }

        assert_eq!(record.topic(), "Is Rust memory safe?");
        assert_eq!(record.participating_agents(), &["A", "B"]);
        assert_eq!(record.rounds().len(), 2);
        let round_two: Vec<_> = record.rounds()[1].iter().map(|r| r.content.as_str()).collect();
        assert_eq!(round_two, vec!["A#1", "B#1"]);
        assert_eq!(record.synthesis(), "A#2");
    }

    #[tokio::test]
    async fn test_failing_agent_does_not_abort_debate() {
        let a = Arc::new(ScriptedBackend::new("A").with_tokens(10));
        let b = Arc::new(ScriptedBackend::new("B").always_failing());
        let use_case = RunDebateUseCase::new(two_agent_council(&a, &b));

        let record = use_case
            .execute(RunDebateInput::new(topic()).with_rounds(2))
            .await
            .unwrap();

        assert_eq!(record.rounds().len(), 2);
        for round in record.rounds() {
            let failed = &round.responses()[1];
            assert!(failed.content.starts_with("Error generating response: "));
            assert_eq!(failed.error_detail(), Some("Connection error: B unreachable"));
        }
        assert_eq!(record.failed_responses().count(), 2);

        // The error text is part of the next agent's context
        assert!(
            a.requests()[1]
                .system_instruction
                .contains("Error generating response: ")
        );
        assert_eq!(record.synthesis(), "A#2");
    }

    #[tokio::test]
    async fn test_total_tokens_excludes_synthesis() {
        let a = Arc::new(ScriptedBackend::new("A").with_tokens(10));
        let b = Arc::new(ScriptedBackend::new("B"));
        let use_case = RunDebateUseCase::new(two_agent_council(&a, &b));

        let record = use_case
            .execute(RunDebateInput::new(topic()).with_rounds(2))
            .await
            .unwrap();

        // A answers twice with 10 tokens; B reports nothing; synthesis is not counted
        assert_eq!(record.total_tokens(), 20);
        assert_eq!(
            record.tokens_by_agent(),
            vec![("A".to_string(), 20), ("B".to_string(), 0)]
        );
    }

    #[tokio::test]
    async fn test_exclude_failed_from_synthesis() {
        let a = Arc::new(ScriptedBackend::new("A"));
        let b = Arc::new(ScriptedBackend::new("B").failing_on(0));
        let use_case = RunDebateUseCase::new(two_agent_council(&a, &b));
        let params = DebateParams::default()
            .with_rounds(1)
            .with_exclude_failed_from_synthesis(true);

        let record = use_case
            .execute(RunDebateInput::new(topic()).with_params(params))
            .await
            .unwrap();

        assert_eq!(record.failed_responses().count(), 1);
        let synth = &a.requests()[1].system_instruction;
        assert!(synth.contains("A#0"));
        assert!(!synth.contains("Error generating response"));
    }

    #[tokio::test]
    async fn test_failed_responses_reach_synthesis_by_default() {
        let a = Arc::new(ScriptedBackend::new("A"));
        let b = Arc::new(ScriptedBackend::new("B").failing_on(0));
        let use_case = RunDebateUseCase::new(two_agent_council(&a, &b));

        use_case
            .execute(RunDebateInput::new(topic()).with_rounds(1))
            .await
            .unwrap();

        assert!(
            a.requests()[1]
                .system_instruction
                .contains("Error generating response: Connection error: B unreachable")
        );
    }

    #[tokio::test]
    async fn test_zero_rounds_is_rejected_before_any_call() {
        let a = Arc::new(ScriptedBackend::new("A"));
        let b = Arc::new(ScriptedBackend::new("B"));
        let use_case = RunDebateUseCase::new(two_agent_council(&a, &b));

        let result = use_case
            .execute(RunDebateInput::new(topic()).with_rounds(0))
            .await;

        assert!(matches!(
            result,
            Err(RunDebateError::InvalidInput(DomainError::InvalidRounds(0)))
        ));
        assert!(a.requests().is_empty());
        assert!(b.requests().is_empty());
    }

    #[tokio::test]
    async fn test_quick_discuss_runs_one_round() {
        let a = Arc::new(ScriptedBackend::new("A"));
        let b = Arc::new(ScriptedBackend::new("B"));
        let use_case = RunDebateUseCase::new(two_agent_council(&a, &b));

        let synthesis = use_case.quick_discuss(topic()).await.unwrap();

        assert_eq!(synthesis, "A#1");
        assert_eq!(b.requests().len(), 1);
    }

    #[tokio::test]
    async fn test_quick_discuss_honors_exclude_failed() {
        let a = Arc::new(ScriptedBackend::new("A"));
        let b = Arc::new(ScriptedBackend::new("B").failing_on(0));
        let use_case = RunDebateUseCase::new(two_agent_council(&a, &b));
        let params = DebateParams::default()
            .with_rounds(5)
            .with_exclude_failed_from_synthesis(true);

        let synthesis = use_case
            .quick_discuss_with_progress(topic(), params, &NoProgress)
            .await
            .unwrap();

        assert_eq!(synthesis, "A#1");
        assert_eq!(b.requests().len(), 1);
        let synth = &a.requests()[1].system_instruction;
        assert!(!synth.contains("Error generating response"));
    }

    #[tokio::test]
    async fn test_identical_backends_give_identical_transcripts() {
        let mut transcripts = Vec::new();
        for _ in 0..2 {
            let a = Arc::new(ScriptedBackend::new("A").with_tokens(3));
            let b = Arc::new(ScriptedBackend::new("B"));
            let record = RunDebateUseCase::new(two_agent_council(&a, &b))
                .execute(RunDebateInput::new(topic()).with_rounds(3))
                .await
                .unwrap();
            transcripts.push((record.rounds().to_vec(), record.synthesis().to_string()));
        }
        assert_eq!(transcripts[0], transcripts[1]);
    }

    // ==================== Notifications ====================

    #[tokio::test]
    async fn test_progress_events_in_order() {
        let a = Arc::new(ScriptedBackend::new("A"));
        let b = Arc::new(ScriptedBackend::new("B"));
        let use_case = RunDebateUseCase::new(two_agent_council(&a, &b));
        let progress = RecordingProgress::default();

        use_case
            .execute_with_progress(RunDebateInput::new(topic()).with_rounds(1), &progress)
            .await
            .unwrap();

        let events = progress.events.lock().unwrap().clone();
        assert_eq!(
            events,
            vec![
                "start:1:A,B",
                "round_start:1",
                "agent_start:A:1",
                "agent_complete:A#0",
                "agent_start:B:1",
                "agent_complete:B#0",
                "round_complete:1",
                "synthesis_start:A",
                "synthesis_complete:A#1",
            ]
        );
    }

    #[tokio::test]
    async fn test_conversation_log_events() {
        let a = Arc::new(ScriptedBackend::new("A"));
        let b = Arc::new(ScriptedBackend::new("B"));
        let logger = Arc::new(RecordingLogger::default());
        let use_case = RunDebateUseCase::new(two_agent_council(&a, &b))
            .with_conversation_logger(logger.clone());

        use_case
            .execute(RunDebateInput::new(topic()).with_rounds(1))
            .await
            .unwrap();

        let types = logger.event_types.lock().unwrap().clone();
        assert_eq!(
            types,
            vec![
                "debate_started",
                "agent_response",
                "agent_response",
                "round_completed",
                "agent_response",
                "synthesis_completed",
            ]
        );
    }
}
