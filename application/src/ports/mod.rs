//! Ports (interfaces) toward external collaborators

pub mod interaction_log;
pub mod progress;
pub mod reasoner;
pub mod session_store;

pub use interaction_log::{InteractionEvent, InteractionLogger, NoInteractionLog};
pub use progress::{DialogueProgressNotifier, NoProgress};
pub use reasoner::{Reasoner, ReasonerError, ReasonerReply};
pub use session_store::{NoSessionStore, SessionStore, StoreError};
