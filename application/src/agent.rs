//! The dialogue agent.
//!
//! One generic [`Agent`] binds a [`PersonalityProfile`] to the injected
//! reasoner capability; behavioral differences between participants come
//! from profile data plus an optional set of override hooks, not from
//! separate types. Every stage operation follows the same template:
//! select context, compose the stage instruction, invoke the reasoner
//! (recovering locally from failure), then attach derivations and a
//! confidence score.

use crate::ports::interaction_log::{InteractionEvent, InteractionLogger, NoInteractionLog};
use crate::ports::reasoner::Reasoner;
use colloquy_domain::{
    AgentId, GenerationParams, Message, PerformanceHistory, PersonalityProfile, Query, Stage,
    StagePrompt, StageResponse, context_window, derive_generation_params, estimate_confidence,
    extract_vote, reflect_on_peers,
};
use std::sync::{Arc, Mutex};
use std::time::Instant;
use tracing::{debug, warn};

/// Optional override functions for the derived response fields.
///
/// Hooks receive the profile and the current stage; `None` falls back to
/// the style-derived default text.
#[derive(Default, Clone, Copy)]
pub struct DerivationHooks {
    pub reasoning: Option<fn(&PersonalityProfile, Stage) -> String>,
    pub assumptions: Option<fn(&PersonalityProfile, Stage) -> String>,
    pub approach: Option<fn(&PersonalityProfile, Stage) -> String>,
    /// Reference list attached to each response; defaults to none.
    pub references: Option<fn(&PersonalityProfile, Stage) -> Vec<String>>,
}

/// A personality-bound dialogue participant
pub struct Agent {
    profile: PersonalityProfile,
    params: GenerationParams,
    reasoner: Arc<dyn Reasoner>,
    logger: Arc<dyn InteractionLogger>,
    hooks: DerivationHooks,
    session_id: String,
    history: Mutex<PerformanceHistory>,
}

impl Agent {
    pub fn new(profile: PersonalityProfile, reasoner: Arc<dyn Reasoner>) -> Self {
        let params = derive_generation_params(&profile);
        Self {
            profile,
            params,
            reasoner,
            logger: Arc::new(NoInteractionLog),
            hooks: DerivationHooks::default(),
            session_id: String::new(),
            history: Mutex::new(PerformanceHistory::default()),
        }
    }

    pub fn with_logger(mut self, logger: Arc<dyn InteractionLogger>) -> Self {
        self.logger = logger;
        self
    }

    pub fn with_hooks(mut self, hooks: DerivationHooks) -> Self {
        self.hooks = hooks;
        self
    }

    pub fn with_session_id(mut self, session_id: impl Into<String>) -> Self {
        self.session_id = session_id.into();
        self
    }

    pub fn id(&self) -> &AgentId {
        &self.profile.id
    }

    pub fn profile(&self) -> &PersonalityProfile {
        &self.profile
    }

    /// The generation knobs derived once from the profile.
    pub fn generation_params(&self) -> &GenerationParams {
        &self.params
    }

    // ==================== Stage Operations ====================

    /// Individual-thought stage: an independent first take on the query.
    pub async fn individual_thought(&self, query: &Query, transcript: &[Message]) -> StageResponse {
        let instruction =
            StagePrompt::individual_thought(&self.profile, &self.params, query.content());
        self.respond(Stage::IndividualThought, &instruction, transcript)
            .await
    }

    /// Mutual-reflection stage: react to peers' individual thoughts, with
    /// structured reflection records extracted from the reaction text.
    pub async fn mutual_reflection(
        &self,
        query: &Query,
        transcript: &[Message],
        roster: &[PersonalityProfile],
        peer_thoughts: &[StageResponse],
    ) -> StageResponse {
        let peers: Vec<PersonalityProfile> = roster
            .iter()
            .filter(|p| p.id != self.profile.id)
            .cloned()
            .collect();

        let pairs: Vec<(String, String)> = peer_thoughts
            .iter()
            .filter(|r| r.agent != self.profile.id)
            .map(|r| (display_name(roster, &r.agent), r.content.clone()))
            .collect();

        let instruction =
            StagePrompt::mutual_reflection(&self.profile, &self.params, query.content(), &pairs);
        let response = self
            .respond(Stage::MutualReflection, &instruction, transcript)
            .await;

        let reflections = reflect_on_peers(&response.content, &peers);
        response.with_reflections(reflections)
    }

    /// Conflict-resolution stage: argue the open disagreements.
    pub async fn conflict_resolution(
        &self,
        query: &Query,
        transcript: &[Message],
        carry: &str,
    ) -> StageResponse {
        let instruction =
            StagePrompt::conflict_resolution(&self.profile, &self.params, query.content(), carry);
        self.respond(Stage::ConflictResolution, &instruction, transcript)
            .await
    }

    /// Synthesis-attempt stage: one complete proposed answer.
    pub async fn synthesis_attempt(
        &self,
        query: &Query,
        transcript: &[Message],
        carry: &str,
    ) -> StageResponse {
        let instruction =
            StagePrompt::synthesis_attempt(&self.profile, &self.params, query.content(), carry);
        self.respond(Stage::SynthesisAttempt, &instruction, transcript)
            .await
    }

    /// Output-generation stage: the final answer plus an extracted vote.
    pub async fn output_generation(
        &self,
        query: &Query,
        transcript: &[Message],
        carry: &str,
        roster: &[PersonalityProfile],
    ) -> StageResponse {
        let candidates: Vec<String> = roster
            .iter()
            .filter(|p| p.id != self.profile.id)
            .map(|p| p.display_name.clone())
            .collect();

        let instruction = StagePrompt::output_generation(
            &self.profile,
            &self.params,
            query.content(),
            carry,
            &candidates,
        );
        let response = self
            .respond(Stage::OutputGeneration, &instruction, transcript)
            .await;

        let vote = extract_vote(&response.content, &self.profile.id, roster);
        response.with_vote(vote)
    }

    // ==================== Shared Template ====================

    /// Invoke the reasoner for one stage and assemble the structured
    /// response. Reasoner failures are recovered here with persona-specific
    /// fallback prose; they never propagate.
    async fn respond(&self, stage: Stage, instruction: &str, transcript: &[Message]) -> StageResponse {
        let context = context_window(transcript, self.profile.memory_scope);
        let started = Instant::now();

        let (content, success, duration_ms) = match self.reasoner.execute(instruction).await {
            Ok(reply) => {
                let sanitized = sanitize_output(&reply.content);
                debug!(
                    agent = %self.profile.id,
                    stage = stage.as_str(),
                    bytes = sanitized.len(),
                    "reasoner completed"
                );
                (sanitized, true, reply.duration.as_millis() as u64)
            }
            Err(e) => {
                warn!(
                    agent = %self.profile.id,
                    stage = stage.as_str(),
                    "reasoner failed, substituting fallback: {e}"
                );
                (
                    self.fallback_content(stage),
                    false,
                    started.elapsed().as_millis() as u64,
                )
            }
        };

        let history = {
            let mut history = self.history.lock().unwrap();
            history.record(success);
            *history
        };

        self.logger.log(InteractionEvent::reasoner_call(
            &self.session_id,
            &self.profile.id,
            stage,
            success,
            duration_ms,
        ));

        let confidence = estimate_confidence(
            self.profile.style,
            self.profile.priority,
            stage,
            context,
            Some(&history),
        );

        let references = self
            .hooks
            .references
            .map(|hook| hook(&self.profile, stage))
            .unwrap_or_default();

        StageResponse::new(self.profile.id.clone(), stage, content)
            .with_derivations(
                self.derivation(self.hooks.reasoning, stage, default_reasoning),
                self.derivation(self.hooks.assumptions, stage, default_assumptions),
                self.derivation(self.hooks.approach, stage, default_approach),
            )
            .with_references(references)
            .with_confidence(confidence)
            .with_outcome(success, duration_ms)
    }

    fn derivation(
        &self,
        hook: Option<fn(&PersonalityProfile, Stage) -> String>,
        stage: Stage,
        default: fn(&PersonalityProfile, Stage) -> String,
    ) -> String {
        hook.unwrap_or(default)(&self.profile, stage)
    }

    /// Persona-specific prose substituted when the reasoner fails. The
    /// stage still produces a structurally valid response.
    fn fallback_content(&self, stage: Stage) -> String {
        format!(
            "({name} could not reach the reasoner during {stage}; the {style} \
             perspective goes unrecorded this round.)",
            name = self.profile.display_name,
            stage = stage.display_name().to_lowercase(),
            style = self.profile.style,
        )
    }
}

fn default_reasoning(profile: &PersonalityProfile, _stage: Stage) -> String {
    format!("Approached via {}.", profile.style.descriptor())
}

fn default_assumptions(profile: &PersonalityProfile, stage: Stage) -> String {
    format!(
        "Assumes the transcript visible under {} scope reflects the group \
         accurately as of {}.",
        profile.memory_scope.as_str(),
        stage.display_name().to_lowercase(),
    )
}

fn default_approach(profile: &PersonalityProfile, _stage: Stage) -> String {
    format!(
        "{} guided by {} as the working priority.",
        profile.style.descriptor(),
        profile.priority,
    )
}

fn display_name(roster: &[PersonalityProfile], id: &AgentId) -> String {
    roster
        .iter()
        .find(|p| &p.id == id)
        .map(|p| p.display_name.clone())
        .unwrap_or_else(|| id.to_string())
}

/// Strip control characters and meta-commentary delimiter blocks from a
/// raw completion.
fn sanitize_output(raw: &str) -> String {
    let mut text = raw.to_string();
    for (open, close) in [("<thinking>", "</thinking>"), ("<meta>", "</meta>")] {
        while let Some(start) = text.find(open) {
            match text[start..].find(close) {
                Some(rel) => text.replace_range(start..start + rel + close.len(), ""),
                None => break,
            }
        }
    }
    text.chars()
        .filter(|c| !c.is_control() || matches!(c, '\n' | '\t'))
        .collect::<String>()
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::reasoner::{ReasonerError, ReasonerReply};
    use async_trait::async_trait;
    use colloquy_domain::builtin_roster;
    use std::time::Duration;

    struct CannedReasoner(String);

    #[async_trait]
    impl Reasoner for CannedReasoner {
        async fn execute(&self, _instruction: &str) -> Result<ReasonerReply, ReasonerError> {
            Ok(ReasonerReply::new(self.0.clone(), Duration::from_millis(3)))
        }
    }

    struct FailingReasoner;

    #[async_trait]
    impl Reasoner for FailingReasoner {
        async fn execute(&self, _instruction: &str) -> Result<ReasonerReply, ReasonerError> {
            Err(ReasonerError::Unavailable("no backend".to_string()))
        }
    }

    fn sage_agent(reasoner: Arc<dyn Reasoner>) -> Agent {
        let profile = builtin_roster().remove(0);
        Agent::new(profile, reasoner)
    }

    #[tokio::test]
    async fn test_individual_thought_success() {
        let agent = sage_agent(Arc::new(CannedReasoner("A measured answer.".to_string())));
        let response = agent.individual_thought(&Query::new("Q?"), &[]).await;

        assert!(response.success);
        assert_eq!(response.content, "A measured answer.");
        assert_eq!(response.stage, Stage::IndividualThought);
        assert!((0.10..=0.95).contains(&response.confidence));
        assert!(!response.reasoning.is_empty());
    }

    #[tokio::test]
    async fn test_failure_substitutes_fallback() {
        let agent = sage_agent(Arc::new(FailingReasoner));
        let response = agent.individual_thought(&Query::new("Q?"), &[]).await;

        assert!(!response.success);
        assert!(response.content.contains("Sage"));
        assert!(response.content.contains("could not reach the reasoner"));
        assert!((0.10..=0.95).contains(&response.confidence));
    }

    #[tokio::test]
    async fn test_reflection_attaches_records_for_every_peer() {
        let roster = builtin_roster();
        let agent = sage_agent(Arc::new(CannedReasoner(
            "I agree with Muse, the analogy is insightful.".to_string(),
        )));

        let thoughts: Vec<StageResponse> = roster
            .iter()
            .map(|p| StageResponse::new(p.id.clone(), Stage::IndividualThought, "a thought"))
            .collect();

        let response = agent
            .mutual_reflection(&Query::new("Q?"), &[], &roster, &thoughts)
            .await;

        // One record per peer, self excluded.
        assert_eq!(response.reflections.len(), roster.len() - 1);
        let muse = response
            .reflections
            .iter()
            .find(|r| r.target.as_str() == "muse")
            .unwrap();
        assert!(muse.agreement);
        let critic = response
            .reflections
            .iter()
            .find(|r| r.target.as_str() == "critic")
            .unwrap();
        assert!(!critic.agreement);
    }

    #[tokio::test]
    async fn test_output_generation_extracts_vote() {
        let roster = builtin_roster();
        let agent = sage_agent(Arc::new(CannedReasoner(
            "Final answer.\nVote: Muse — the framing carried the group.".to_string(),
        )));

        let response = agent
            .output_generation(&Query::new("Q?"), &[], "carried", &roster)
            .await;

        let vote = response.vote.unwrap();
        assert_eq!(vote.voter, AgentId::new("sage"));
        assert_eq!(vote.voted_for, Some(AgentId::new("muse")));
    }

    #[tokio::test]
    async fn test_failed_output_generation_yields_undetected_vote() {
        let roster = builtin_roster();
        let agent = sage_agent(Arc::new(FailingReasoner));
        let response = agent
            .output_generation(&Query::new("Q?"), &[], "carried", &roster)
            .await;

        assert!(!response.success);
        assert_eq!(response.vote.unwrap().voted_for, None);
    }

    #[tokio::test]
    async fn test_hooks_override_derivations() {
        let hooks = DerivationHooks {
            reasoning: Some(|p, _| format!("custom reasoning for {}", p.id)),
            references: Some(|_, _| vec!["prior cycle transcript".to_string()]),
            ..Default::default()
        };
        let agent = sage_agent(Arc::new(CannedReasoner("ok".to_string()))).with_hooks(hooks);
        let response = agent.individual_thought(&Query::new("Q?"), &[]).await;

        assert_eq!(response.reasoning, "custom reasoning for sage");
        assert!(response.assumptions.contains("local"));
        assert_eq!(response.references, vec!["prior cycle transcript"]);
    }

    #[test]
    fn test_sanitize_strips_control_and_meta_blocks() {
        let raw = "Before <thinking>secret chain\u{0007}</thinking> after\u{0000}.";
        assert_eq!(sanitize_output(raw), "Before  after.");

        let raw = "Keep\nlines\tand text";
        assert_eq!(sanitize_output(raw), "Keep\nlines\tand text");
    }
}
