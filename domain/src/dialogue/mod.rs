//! Staged dialogue entities: stages, messages, sessions and responses

pub mod context;
pub mod message;
pub mod outcome;
pub mod response;
pub mod session;
pub mod stage;

pub use context::{context_window, context_window_default};
pub use message::{Author, Message};
pub use outcome::DialogueOutcome;
pub use response::{ReflectionRecord, StageResponse};
pub use session::{DialogueSession, SessionStatus, StageRecord};
pub use stage::Stage;
