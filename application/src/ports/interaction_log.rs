//! Port for structured interaction auditing.
//!
//! Every reasoner invocation, success or failure, is recorded with its
//! duration and status for later audit. This is separate from
//! `tracing`-based operation logs: tracing carries human-readable
//! diagnostics, while this port captures a machine-readable trail.

use colloquy_domain::{AgentId, Stage};
use serde_json::Value;

/// A structured audit event.
pub struct InteractionEvent {
    /// Event type identifier (e.g., "reasoner_call", "tie_break").
    pub event_type: &'static str,
    /// JSON payload with event-specific data.
    pub payload: Value,
}

impl InteractionEvent {
    pub fn new(event_type: &'static str, payload: Value) -> Self {
        Self {
            event_type,
            payload,
        }
    }

    /// Audit record for one agent-stage reasoner invocation.
    pub fn reasoner_call(
        session: &str,
        agent: &AgentId,
        stage: Stage,
        success: bool,
        duration_ms: u64,
    ) -> Self {
        Self::new(
            "reasoner_call",
            serde_json::json!({
                "session": session,
                "agent": agent.as_str(),
                "stage": stage.as_str(),
                "success": success,
                "duration_ms": duration_ms,
            }),
        )
    }
}

/// Port for recording audit events.
///
/// `log` is intentionally synchronous and non-fallible so auditing can
/// never disrupt the pipeline; adapter failures are silently ignored.
pub trait InteractionLogger: Send + Sync {
    fn log(&self, event: InteractionEvent);
}

/// No-op implementation for tests and when auditing is disabled.
pub struct NoInteractionLog;

impl InteractionLogger for NoInteractionLog {
    fn log(&self, _event: InteractionEvent) {}
}
