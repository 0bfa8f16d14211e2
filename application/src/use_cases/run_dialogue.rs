//! Run Dialogue use case
//!
//! The stage pipeline controller: drives one session through the fixed
//! stage sequence, invoking every participating agent once per agent stage
//! (concurrently, with a barrier before the next stage), running the
//! optional summary compaction passes, and handing the final stage's votes
//! to the facilitator.
//!
//! Ordering guarantee: stage N+1 never begins for any agent until stage N
//! has completed for all agents of the session. Agents never observe
//! another agent's output until the following stage.

use crate::agent::Agent;
use crate::config::DialogueParams;
use crate::ports::interaction_log::{InteractionEvent, InteractionLogger, NoInteractionLog};
use crate::ports::progress::{DialogueProgressNotifier, NoProgress};
use crate::ports::reasoner::Reasoner;
use crate::ports::session_store::{NoSessionStore, SessionStore, StoreError};
use crate::use_cases::resolve_consensus::FacilitateConsensusUseCase;
use colloquy_domain::{
    AgentId, ConsensusResult, DialogueOutcome, DialogueSession, DomainError, Message,
    PersonalityProfile, Query, Stage, StagePrompt, StageResponse, Vote,
};
use std::sync::Arc;
use std::time::Instant;
use thiserror::Error;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Errors that can occur during a dialogue run
#[derive(Error, Debug)]
pub enum RunDialogueError {
    #[error("No participants configured")]
    NoParticipants,

    #[error("Dialogue cancelled")]
    Cancelled,

    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

/// Input for the RunDialogue use case
pub struct RunDialogueInput {
    /// The question to put to the participants
    pub query: Query,
    /// Roster for a fresh session (ignored when `session` is supplied)
    pub participants: Vec<PersonalityProfile>,
    /// Run control parameters
    pub params: DialogueParams,
    /// An existing session to continue; terminal sessions are reset to
    /// stage zero for a new cycle, retaining the prior transcript.
    pub session: Option<DialogueSession>,
}

impl RunDialogueInput {
    pub fn new(query: impl Into<Query>, participants: Vec<PersonalityProfile>) -> Self {
        Self {
            query: query.into(),
            participants,
            params: DialogueParams::default(),
            session: None,
        }
    }

    pub fn with_params(mut self, params: DialogueParams) -> Self {
        self.params = params;
        self
    }

    pub fn with_session(mut self, session: DialogueSession) -> Self {
        self.session = Some(session);
        self
    }
}

/// Use case for running a staged dialogue
pub struct RunDialogueUseCase {
    reasoner: Arc<dyn Reasoner>,
    store: Arc<dyn SessionStore>,
    logger: Arc<dyn InteractionLogger>,
}

impl RunDialogueUseCase {
    pub fn new(reasoner: Arc<dyn Reasoner>) -> Self {
        Self {
            reasoner,
            store: Arc::new(NoSessionStore),
            logger: Arc::new(NoInteractionLog),
        }
    }

    pub fn with_store(mut self, store: Arc<dyn SessionStore>) -> Self {
        self.store = store;
        self
    }

    pub fn with_logger(mut self, logger: Arc<dyn InteractionLogger>) -> Self {
        self.logger = logger;
        self
    }

    /// Execute the use case with default (no-op) progress and no
    /// cancellation.
    pub async fn execute(
        &self,
        input: RunDialogueInput,
    ) -> Result<DialogueOutcome, RunDialogueError> {
        self.execute_with_progress(input, &NoProgress, &CancellationToken::new())
            .await
    }

    /// Execute the use case with progress callbacks and a cancellation
    /// token checked at every stage boundary.
    pub async fn execute_with_progress(
        &self,
        input: RunDialogueInput,
        progress: &dyn DialogueProgressNotifier,
        cancel: &CancellationToken,
    ) -> Result<DialogueOutcome, RunDialogueError> {
        let mut session = match input.session {
            Some(mut session) => {
                if session.is_terminal() {
                    session.reset_for_new_cycle()?;
                }
                session
            }
            None => {
                if input.participants.is_empty() {
                    return Err(RunDialogueError::NoParticipants);
                }
                DialogueSession::new(generate_session_id(), input.participants.clone())
            }
        };
        if session.participants().is_empty() {
            return Err(RunDialogueError::NoParticipants);
        }

        info!(
            session = session.id(),
            participants = session.participants().len(),
            cycle = session.cycle(),
            "starting dialogue"
        );

        session.append_message(Message::user(input.query.content()).with_cycle(session.cycle()));

        let agents: Vec<Arc<Agent>> = session
            .participants()
            .iter()
            .map(|p| {
                Arc::new(
                    Agent::new(p.clone(), Arc::clone(&self.reasoner))
                        .with_logger(Arc::clone(&self.logger))
                        .with_session_id(session.id()),
                )
            })
            .collect();

        match self
            .run_stages(&mut session, &input.query, &agents, &input.params, progress, cancel)
            .await
        {
            Ok((consensus, conclusion)) => {
                progress.on_session_complete(session.id());

                let participants: Vec<AgentId> =
                    session.participants().iter().map(|p| p.id.clone()).collect();
                Ok(DialogueOutcome {
                    query: input.query.into_content(),
                    participants,
                    winners: consensus.winners.clone(),
                    consensus,
                    conclusion,
                    session,
                })
            }
            Err(e) => {
                let reason = e.to_string();
                session.mark_errored(&reason);
                // Best-effort snapshot; the run is already failing.
                if let Err(save_err) = self.store.save(&session).await {
                    warn!("could not persist errored session: {save_err}");
                }
                progress.on_session_error(session.id(), &reason);
                Err(e)
            }
        }
    }

    /// Walk the fixed stage sequence to conclusion.
    async fn run_stages(
        &self,
        session: &mut DialogueSession,
        query: &Query,
        agents: &[Arc<Agent>],
        params: &DialogueParams,
        progress: &dyn DialogueProgressNotifier,
        cancel: &CancellationToken,
    ) -> Result<(ConsensusResult, String), RunDialogueError> {
        // Carry: what the next stage consumes from the previous one. A
        // summary pass replaces the full per-agent set with one condensed
        // record, bounding prompt growth across stages.
        let mut carry = String::new();
        let mut individual_thoughts: Vec<StageResponse> = Vec::new();
        let mut consensus: Option<(ConsensusResult, String)> = None;

        for stage in Stage::SEQUENCE {
            if cancel.is_cancelled() {
                return Err(RunDialogueError::Cancelled);
            }

            if stage.is_agent_stage() {
                let responses = self
                    .run_agent_stage(
                        session,
                        stage,
                        query,
                        agents,
                        &carry,
                        &individual_thoughts,
                        progress,
                    )
                    .await?;

                carry = StagePrompt::digest(&responses, session.participants());
                if stage == Stage::IndividualThought {
                    individual_thoughts = responses;
                }
            } else if stage.is_summary() {
                if params.enable_summaries {
                    carry = self.run_summary(session, stage, progress).await?;
                } else {
                    session.skip_stage(stage)?;
                }
            } else {
                consensus = Some(self.finalize(session, params, progress).await?);
            }

            if params.snapshot_each_stage {
                self.store.save(session).await?;
            }
        }

        // The sequence ends in Finalize, so consensus is always set here.
        consensus.ok_or(RunDialogueError::Domain(DomainError::StageOrder {
            expected: Stage::Finalize.as_str().to_string(),
            got: "end of sequence".to_string(),
        }))
    }

    /// Run one agent stage: all participants concurrently, barrier on
    /// completion of every response, then append to the session.
    #[allow(clippy::too_many_arguments)]
    async fn run_agent_stage(
        &self,
        session: &mut DialogueSession,
        stage: Stage,
        query: &Query,
        agents: &[Arc<Agent>],
        carry: &str,
        individual_thoughts: &[StageResponse],
        progress: &dyn DialogueProgressNotifier,
    ) -> Result<Vec<StageResponse>, RunDialogueError> {
        session.begin_stage(stage)?;
        progress.on_stage_start(session.id(), &stage, agents.len());
        debug!(session = session.id(), stage = stage.as_str(), "stage started");

        let transcript: Arc<Vec<Message>> = Arc::new(session.transcript().to_vec());
        let roster: Arc<Vec<PersonalityProfile>> = Arc::new(session.participants().to_vec());

        let mut join_set = JoinSet::new();
        for agent in agents {
            let agent = Arc::clone(agent);
            let query = query.clone();
            let transcript = Arc::clone(&transcript);
            let roster = Arc::clone(&roster);
            let carry = carry.to_string();
            let peer_thoughts = individual_thoughts.to_vec();

            join_set.spawn(async move {
                match stage {
                    Stage::IndividualThought => {
                        agent.individual_thought(&query, &transcript).await
                    }
                    Stage::MutualReflection => {
                        agent
                            .mutual_reflection(&query, &transcript, &roster, &peer_thoughts)
                            .await
                    }
                    Stage::ConflictResolution => {
                        agent.conflict_resolution(&query, &transcript, &carry).await
                    }
                    Stage::SynthesisAttempt => {
                        agent.synthesis_attempt(&query, &transcript, &carry).await
                    }
                    Stage::OutputGeneration => {
                        agent
                            .output_generation(&query, &transcript, &carry, &roster)
                            .await
                    }
                    _ => unreachable!("summary and finalize stages are not agent stages"),
                }
            });
        }

        let mut responses = Vec::new();
        while let Some(result) = join_set.join_next().await {
            match result {
                Ok(response) => {
                    progress.on_agent_response(session.id(), &stage, &response);
                    responses.push(response);
                }
                Err(e) => {
                    warn!("task join error: {e}");
                }
            }
        }

        // A participant whose task died still gets a structurally valid
        // failure response so the stage invariant holds.
        for profile in session.participants() {
            if !responses.iter().any(|r| r.agent == profile.id) {
                responses.push(
                    StageResponse::new(
                        profile.id.clone(),
                        stage,
                        format!("({} was unable to respond.)", profile.display_name),
                    )
                    .with_outcome(false, 0),
                );
            }
        }

        // Deterministic roster order regardless of completion order.
        let order: Vec<AgentId> = session.participants().iter().map(|p| p.id.clone()).collect();
        responses.sort_by_key(|r| order.iter().position(|id| id == &r.agent).unwrap_or(usize::MAX));

        session.complete_stage(stage, responses.clone())?;
        progress.on_stage_complete(session.id(), &stage);
        Ok(responses)
    }

    /// Run a summary compaction pass over the just-completed stage's
    /// responses. Reasoner failure degrades to a mechanical digest.
    async fn run_summary(
        &self,
        session: &mut DialogueSession,
        stage: Stage,
        progress: &dyn DialogueProgressNotifier,
    ) -> Result<String, RunDialogueError> {
        let prior: Vec<StageResponse> = session
            .history()
            .iter()
            .rev()
            .find(|r| !r.is_open())
            .map(|r| r.responses.clone())
            .unwrap_or_default();

        session.begin_stage(stage)?;
        progress.on_stage_start(session.id(), &stage, 1);

        let pairs: Vec<(String, String)> = prior
            .iter()
            .map(|r| {
                let name = session
                    .participants()
                    .iter()
                    .find(|p| p.id == r.agent)
                    .map(|p| p.display_name.clone())
                    .unwrap_or_else(|| r.agent.to_string());
                (name, r.content.clone())
            })
            .collect();
        let instruction = StagePrompt::summary(stage, &pairs);

        let started = Instant::now();
        let (content, success, duration_ms) = match self.reasoner.execute(&instruction).await {
            Ok(reply) => (
                reply.content.trim().to_string(),
                true,
                reply.duration.as_millis() as u64,
            ),
            Err(e) => {
                warn!(stage = stage.as_str(), "summary reasoner failed, using digest: {e}");
                (
                    StagePrompt::digest(&prior, session.participants()),
                    false,
                    started.elapsed().as_millis() as u64,
                )
            }
        };

        self.logger.log(InteractionEvent::reasoner_call(
            session.id(),
            &AgentId::facilitator(),
            stage,
            success,
            duration_ms,
        ));

        let record = StageResponse::new(AgentId::facilitator(), stage, content.clone())
            .with_outcome(success, duration_ms);
        progress.on_agent_response(session.id(), &stage, &record);

        session.complete_stage(stage, vec![record])?;
        progress.on_stage_complete(session.id(), &stage);
        Ok(content)
    }

    /// The finalize pass: tally the output-generation votes, resolve ties,
    /// and conclude the session.
    async fn finalize(
        &self,
        session: &mut DialogueSession,
        params: &DialogueParams,
        progress: &dyn DialogueProgressNotifier,
    ) -> Result<(ConsensusResult, String), RunDialogueError> {
        session.begin_stage(Stage::Finalize)?;
        progress.on_stage_start(session.id(), &Stage::Finalize, 0);

        let output_responses: Vec<StageResponse> = session
            .latest_record(Stage::OutputGeneration)
            .map(|r| r.responses.clone())
            .unwrap_or_default();

        let votes: Vec<Vote> = output_responses
            .iter()
            .filter_map(|r| r.vote.clone())
            .collect();

        let facilitator = if params.enable_tie_break {
            FacilitateConsensusUseCase::new(Arc::clone(&self.reasoner))
        } else {
            FacilitateConsensusUseCase::without_tie_break()
        };
        let consensus = facilitator.resolve(&votes, session.participants()).await;

        info!(
            session = session.id(),
            winners = ?consensus.winners,
            method = ?consensus.method,
            "consensus resolved"
        );

        let conclusion = consensus
            .winners
            .first()
            .and_then(|winner| {
                output_responses
                    .iter()
                    .find(|r| &r.agent == winner)
                    .map(|r| r.content.clone())
            })
            .unwrap_or_default();

        session.complete_stage(Stage::Finalize, Vec::new())?;
        session.conclude();
        progress.on_stage_complete(session.id(), &Stage::Finalize);
        Ok((consensus, conclusion))
    }
}

fn generate_session_id() -> String {
    format!("dlg-{}", chrono::Utc::now().format("%Y%m%d-%H%M%S%3f"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::reasoner::{ReasonerError, ReasonerReply};
    use async_trait::async_trait;
    use colloquy_domain::{SessionStatus, builtin_roster, select_personas};
    use std::sync::Mutex;
    use std::time::Duration;

    struct CannedReasoner(String);

    #[async_trait]
    impl Reasoner for CannedReasoner {
        async fn execute(&self, _instruction: &str) -> Result<ReasonerReply, ReasonerError> {
            Ok(ReasonerReply::new(self.0.clone(), Duration::from_millis(2)))
        }
    }

    struct FailingReasoner;

    #[async_trait]
    impl Reasoner for FailingReasoner {
        async fn execute(&self, _instruction: &str) -> Result<ReasonerReply, ReasonerError> {
            Err(ReasonerError::Unavailable("offline".to_string()))
        }
    }

    /// Records the order of lifecycle events for ordering assertions.
    #[derive(Default)]
    struct RecordingProgress {
        events: Mutex<Vec<(String, String)>>,
    }

    impl DialogueProgressNotifier for RecordingProgress {
        fn on_stage_start(&self, _session: &str, stage: &Stage, _participants: usize) {
            self.events
                .lock()
                .unwrap()
                .push(("start".to_string(), stage.as_str().to_string()));
        }
        fn on_agent_response(&self, _session: &str, stage: &Stage, _response: &StageResponse) {
            self.events
                .lock()
                .unwrap()
                .push(("response".to_string(), stage.as_str().to_string()));
        }
        fn on_stage_complete(&self, _session: &str, stage: &Stage) {
            self.events
                .lock()
                .unwrap()
                .push(("complete".to_string(), stage.as_str().to_string()));
        }
        fn on_session_complete(&self, _session: &str) {
            self.events
                .lock()
                .unwrap()
                .push(("session-complete".to_string(), String::new()));
        }
        fn on_session_error(&self, _session: &str, error: &str) {
            self.events
                .lock()
                .unwrap()
                .push(("session-error".to_string(), error.to_string()));
        }
    }

    fn three_personas() -> Vec<colloquy_domain::PersonalityProfile> {
        select_personas(&[
            "sage".to_string(),
            "critic".to_string(),
            "muse".to_string(),
        ])
    }

    #[tokio::test]
    async fn test_always_failing_reasoner_still_concludes() {
        let use_case = RunDialogueUseCase::new(Arc::new(FailingReasoner));
        let input = RunDialogueInput::new("Does it degrade gracefully?", three_personas());

        let outcome = use_case.execute(input).await.unwrap();

        // Every stage is populated, all agent responses carry fallback
        // content, and a winner set still exists.
        assert_eq!(*outcome.session.status(), SessionStatus::Concluded);
        assert_eq!(outcome.session.history().len(), Stage::SEQUENCE.len());
        for record in outcome.session.history() {
            if record.stage.is_agent_stage() {
                assert_eq!(record.responses.len(), 3);
                assert!(record.responses.iter().all(|r| !r.success));
                assert!(
                    record
                        .responses
                        .iter()
                        .all(|r| r.content.contains("could not reach the reasoner"))
                );
            }
        }
        assert_eq!(outcome.winners, vec![AgentId::new("sage")]);
        assert_eq!(
            outcome.consensus.method,
            colloquy_domain::DecisionMethod::Fallback
        );
    }

    #[tokio::test]
    async fn test_unanimous_vote_elects_winner() {
        let use_case = RunDialogueUseCase::new(Arc::new(CannedReasoner(
            "A reasonable contribution.\nVote: Muse".to_string(),
        )));
        let input = RunDialogueInput::new("Who should win?", three_personas());

        let outcome = use_case.execute(input).await.unwrap();

        // Sage and Critic vote for Muse; Muse's own declaration is a
        // self-reference and detects nothing.
        assert_eq!(outcome.winners, vec![AgentId::new("muse")]);
        assert_eq!(
            outcome.consensus.method,
            colloquy_domain::DecisionMethod::Tally
        );
        assert!(outcome.conclusion.contains("A reasonable contribution."));
    }

    #[tokio::test]
    async fn test_stage_ordering_barrier() {
        let use_case = RunDialogueUseCase::new(Arc::new(CannedReasoner("fine".to_string())));
        let progress = RecordingProgress::default();
        let input = RunDialogueInput::new("Ordering?", three_personas());

        use_case
            .execute_with_progress(input, &progress, &CancellationToken::new())
            .await
            .unwrap();

        let events = progress.events.lock().unwrap();
        let last_individual = events
            .iter()
            .rposition(|(kind, stage)| kind == "response" && stage == "individual-thought")
            .unwrap();
        let first_reflection = events
            .iter()
            .position(|(kind, stage)| kind == "response" && stage == "mutual-reflection")
            .unwrap();
        assert!(last_individual < first_reflection);

        // Stage completion always precedes the next stage start.
        let complete_individual = events
            .iter()
            .position(|(kind, stage)| kind == "complete" && stage == "individual-thought")
            .unwrap();
        let start_reflection = events
            .iter()
            .position(|(kind, stage)| kind == "start" && stage == "mutual-reflection")
            .unwrap();
        assert!(complete_individual < start_reflection);
    }

    #[tokio::test]
    async fn test_summary_records_facilitator_response() {
        let use_case = RunDialogueUseCase::new(Arc::new(CannedReasoner("condensed".to_string())));
        let input = RunDialogueInput::new("Summaries?", three_personas());

        let outcome = use_case.execute(input).await.unwrap();

        let summary = outcome
            .session
            .latest_record(Stage::ReflectionSummary)
            .unwrap();
        assert_eq!(summary.responses.len(), 1);
        assert_eq!(summary.responses[0].agent, AgentId::facilitator());
        assert_eq!(summary.responses[0].content, "condensed");
    }

    #[tokio::test]
    async fn test_disabled_summaries_skip_without_records() {
        let use_case = RunDialogueUseCase::new(Arc::new(CannedReasoner("fine".to_string())));
        let input = RunDialogueInput::new("No summaries?", three_personas())
            .with_params(DialogueParams::default().without_summaries());

        let outcome = use_case.execute(input).await.unwrap();

        assert!(outcome.session.latest_record(Stage::ReflectionSummary).is_none());
        assert_eq!(
            outcome.session.history().len(),
            Stage::SEQUENCE.len() - 3
        );
    }

    #[tokio::test]
    async fn test_cancellation_marks_session_errored() {
        let use_case = RunDialogueUseCase::new(Arc::new(CannedReasoner("fine".to_string())));
        let progress = RecordingProgress::default();
        let cancel = CancellationToken::new();
        cancel.cancel();

        let input = RunDialogueInput::new("Cancelled?", three_personas());
        let result = use_case
            .execute_with_progress(input, &progress, &cancel)
            .await;

        assert!(matches!(result, Err(RunDialogueError::Cancelled)));
        let events = progress.events.lock().unwrap();
        assert!(events.iter().any(|(kind, _)| kind == "session-error"));
    }

    #[tokio::test]
    async fn test_empty_roster_rejected() {
        let use_case = RunDialogueUseCase::new(Arc::new(CannedReasoner("fine".to_string())));
        let input = RunDialogueInput::new("Anyone there?", Vec::new());
        assert!(matches!(
            use_case.execute(input).await,
            Err(RunDialogueError::NoParticipants)
        ));
    }

    #[tokio::test]
    async fn test_concluded_session_can_run_a_new_cycle() {
        let use_case = RunDialogueUseCase::new(Arc::new(CannedReasoner("fine".to_string())));
        let first = use_case
            .execute(RunDialogueInput::new("First cycle?", three_personas()))
            .await
            .unwrap();
        let transcript_len = first.session.transcript().len();

        let second = use_case
            .execute(
                RunDialogueInput::new("Second cycle?", Vec::new()).with_session(first.session),
            )
            .await
            .unwrap();

        assert_eq!(second.session.cycle(), 2);
        assert!(second.session.transcript().len() > transcript_len);
        assert_eq!(*second.session.status(), SessionStatus::Concluded);
    }

    #[tokio::test]
    async fn test_full_roster_runs_all_stages() {
        let use_case = RunDialogueUseCase::new(Arc::new(CannedReasoner(
            "Thoughtful text mentioning Sage. Vote: Sage".to_string(),
        )));
        let input = RunDialogueInput::new("Full roster?", builtin_roster());
        let outcome = use_case.execute(input).await.unwrap();

        assert_eq!(outcome.participants.len(), 5);
        assert_eq!(outcome.winners, vec![AgentId::new("sage")]);

        let reflection = outcome
            .session
            .latest_record(Stage::MutualReflection)
            .unwrap();
        // Every reflection response carries one record per peer.
        for response in &reflection.responses {
            assert_eq!(response.reflections.len(), 4);
        }
    }
}
