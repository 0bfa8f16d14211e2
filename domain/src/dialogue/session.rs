//! Dialogue session entity.
//!
//! A session owns the transcript and the stage pointer. Exactly one
//! pipeline run mutates a session at a time: `begin_stage` rejects any
//! attempt to open a stage other than the current one, which serializes
//! concurrent advancement attempts by construction. The stage pointer only
//! moves forward; a terminal session must be explicitly reset before a new
//! cycle may start.

use crate::core::error::DomainError;
use crate::dialogue::message::Message;
use crate::dialogue::response::StageResponse;
use crate::dialogue::stage::Stage;
use crate::persona::profile::PersonalityProfile;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle state of a session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    /// A pipeline run is advancing the stage pointer
    Active,
    /// All stages have completed; consensus not yet recorded
    Completed,
    /// Consensus recorded; the cycle is closed
    Concluded,
    /// An unrecoverable error stopped the run; prior history is intact
    Errored,
}

/// Record of one completed (or in-flight) stage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageRecord {
    pub stage: Stage,
    pub cycle: u32,
    pub started_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ended_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub responses: Vec<StageResponse>,
}

impl StageRecord {
    fn open(stage: Stage, cycle: u32) -> Self {
        Self {
            stage,
            cycle,
            started_at: Utc::now(),
            ended_at: None,
            responses: Vec::new(),
        }
    }

    pub fn is_open(&self) -> bool {
        self.ended_at.is_none()
    }
}

/// A staged dialogue session (Entity)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DialogueSession {
    id: String,
    participants: Vec<PersonalityProfile>,
    transcript: Vec<Message>,
    stage_index: usize,
    history: Vec<StageRecord>,
    status: SessionStatus,
    cycle: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl DialogueSession {
    pub fn new(id: impl Into<String>, participants: Vec<PersonalityProfile>) -> Self {
        Self {
            id: id.into(),
            participants,
            transcript: Vec::new(),
            stage_index: 0,
            history: Vec::new(),
            status: SessionStatus::Active,
            cycle: 1,
            error: None,
        }
    }

    // ==================== Accessors ====================

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn participants(&self) -> &[PersonalityProfile] {
        &self.participants
    }

    pub fn transcript(&self) -> &[Message] {
        &self.transcript
    }

    pub fn history(&self) -> &[StageRecord] {
        &self.history
    }

    pub fn status(&self) -> &SessionStatus {
        &self.status
    }

    pub fn cycle(&self) -> u32 {
        self.cycle
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// The stage the pointer currently rests on; `None` once the sequence
    /// has been walked to the end.
    pub fn current_stage(&self) -> Option<Stage> {
        Stage::SEQUENCE.get(self.stage_index).copied()
    }

    pub fn is_terminal(&self) -> bool {
        self.status != SessionStatus::Active
    }

    /// The most recent record for a stage, searching latest-first so
    /// multi-cycle sessions resolve to the current cycle.
    pub fn latest_record(&self, stage: Stage) -> Option<&StageRecord> {
        self.history.iter().rev().find(|r| r.stage == stage)
    }

    // ==================== Transcript ====================

    pub fn append_message(&mut self, message: Message) {
        self.transcript.push(message);
    }

    // ==================== Stage advancement ====================

    /// Open the given stage. Rejected unless the session is active and the
    /// stage is exactly the one the pointer rests on.
    pub fn begin_stage(&mut self, stage: Stage) -> Result<(), DomainError> {
        if self.status != SessionStatus::Active {
            return Err(DomainError::SessionNotActive(self.id.clone()));
        }
        let current = self.current_stage();
        if current != Some(stage) {
            return Err(DomainError::StageOrder {
                expected: current.map(|s| s.as_str().to_string()).unwrap_or_default(),
                got: stage.as_str().to_string(),
            });
        }
        if self.history.last().is_some_and(|r| r.is_open()) {
            return Err(DomainError::StageOrder {
                expected: "completion of the open stage".to_string(),
                got: stage.as_str().to_string(),
            });
        }
        self.history.push(StageRecord::open(stage, self.cycle));
        Ok(())
    }

    /// Close the open stage, append its responses to the transcript and
    /// advance the pointer. Agent stages must carry one response per
    /// participant.
    pub fn complete_stage(
        &mut self,
        stage: Stage,
        responses: Vec<StageResponse>,
    ) -> Result<(), DomainError> {
        let participants = self.participants.len();
        let cycle = self.cycle;

        let record = match self.history.last_mut() {
            Some(r) if r.stage == stage && r.is_open() => r,
            _ => {
                return Err(DomainError::StageOrder {
                    expected: "an open record for the completing stage".to_string(),
                    got: stage.as_str().to_string(),
                });
            }
        };

        if stage.is_agent_stage() && responses.len() != participants {
            return Err(DomainError::StageOrder {
                expected: format!("{participants} responses"),
                got: format!("{} responses", responses.len()),
            });
        }

        record.ended_at = Some(Utc::now());
        record.responses = responses.clone();

        for response in responses {
            let message = Message::agent(response.agent.clone(), response.content)
                .with_stage(stage)
                .with_cycle(cycle);
            self.transcript.push(message);
        }

        self.advance();
        Ok(())
    }

    /// Skip the current stage without recording anything (disabled summary
    /// passes).
    pub fn skip_stage(&mut self, stage: Stage) -> Result<(), DomainError> {
        if self.status != SessionStatus::Active {
            return Err(DomainError::SessionNotActive(self.id.clone()));
        }
        if self.current_stage() != Some(stage) || !stage.is_summary() {
            return Err(DomainError::StageOrder {
                expected: self
                    .current_stage()
                    .map(|s| s.as_str().to_string())
                    .unwrap_or_default(),
                got: stage.as_str().to_string(),
            });
        }
        self.advance();
        Ok(())
    }

    fn advance(&mut self) {
        self.stage_index += 1;
        if self.stage_index >= Stage::SEQUENCE.len() {
            self.status = SessionStatus::Completed;
        }
    }

    // ==================== Status transitions ====================

    /// Close the cycle after consensus has been recorded.
    pub fn conclude(&mut self) {
        if self.status == SessionStatus::Completed {
            self.status = SessionStatus::Concluded;
        }
    }

    /// Mark the session errored. Previously recorded history and transcript
    /// are left untouched.
    pub fn mark_errored(&mut self, reason: impl Into<String>) {
        self.status = SessionStatus::Errored;
        self.error = Some(reason.into());
    }

    /// Reset a terminal session to stage zero for a new cycle. The prior
    /// transcript and stage history are retained for later reference.
    pub fn reset_for_new_cycle(&mut self) -> Result<(), DomainError> {
        if !self.is_terminal() {
            return Err(DomainError::SessionNotTerminal(self.id.clone()));
        }
        self.stage_index = 0;
        self.status = SessionStatus::Active;
        self.cycle += 1;
        self.error = None;
        Ok(())
    }
}
