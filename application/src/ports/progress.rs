//! Stage-lifecycle notification port
//!
//! The transport boundary toward the presentation layer: a stream of
//! stage-lifecycle events identifying the session and, where applicable,
//! carrying the structured response payload. Implementations render the
//! events (console progress, UI stream); the pipeline only emits them.

use colloquy_domain::{Stage, StageResponse};

/// Callback for stage-lifecycle events during a dialogue run
pub trait DialogueProgressNotifier: Send + Sync {
    /// Called when a stage starts for a session
    fn on_stage_start(&self, session: &str, stage: &Stage, participants: usize);

    /// Called once per completed agent response within a stage
    fn on_agent_response(&self, session: &str, stage: &Stage, response: &StageResponse);

    /// Called when a stage completes (all participants responded)
    fn on_stage_complete(&self, session: &str, stage: &Stage);

    /// Called when the session reaches its concluded state
    fn on_session_complete(&self, session: &str);

    /// Called when the session is marked errored
    fn on_session_error(&self, session: &str, error: &str);
}

/// No-op notifier for when progress reporting is not needed
pub struct NoProgress;

impl DialogueProgressNotifier for NoProgress {
    fn on_stage_start(&self, _session: &str, _stage: &Stage, _participants: usize) {}
    fn on_agent_response(&self, _session: &str, _stage: &Stage, _response: &StageResponse) {}
    fn on_stage_complete(&self, _session: &str, _stage: &Stage) {}
    fn on_session_complete(&self, _session: &str) {}
    fn on_session_error(&self, _session: &str, _error: &str) {}
}
