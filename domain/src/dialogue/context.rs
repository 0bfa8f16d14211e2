//! Context window selection.
//!
//! Pure slicing of the session transcript by an agent's memory scope.
//! Never reorders; always returns a suffix of the input.

use crate::dialogue::message::Message;
use crate::persona::profile::MemoryScope;

/// Number of messages kept for callers without a declared scope.
const DEFAULT_WINDOW: usize = 10;

/// Select the transcript subsequence visible to an agent.
pub fn context_window(messages: &[Message], scope: MemoryScope) -> &[Message] {
    match scope {
        MemoryScope::Local => tail(messages, 5),
        MemoryScope::Session => tail(messages, 20),
        MemoryScope::CrossSession => messages,
    }
}

/// Window for callers without a memory-scope policy.
pub fn context_window_default(messages: &[Message]) -> &[Message] {
    tail(messages, DEFAULT_WINDOW)
}

fn tail(messages: &[Message], keep: usize) -> &[Message] {
    &messages[messages.len().saturating_sub(keep)..]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persona::profile::AgentId;

    fn transcript(n: usize) -> Vec<Message> {
        (0..n)
            .map(|i| Message::agent(AgentId::new("a"), format!("m{i}")))
            .collect()
    }

    #[test]
    fn test_local_scope_keeps_last_five_in_order() {
        let messages = transcript(12);
        let window = context_window(&messages, MemoryScope::Local);
        assert_eq!(window.len(), 5);
        assert_eq!(window[0].content, "m7");
        assert_eq!(window[4].content, "m11");
    }

    #[test]
    fn test_session_scope_keeps_last_twenty() {
        let messages = transcript(30);
        let window = context_window(&messages, MemoryScope::Session);
        assert_eq!(window.len(), 20);
        assert_eq!(window[0].content, "m10");
    }

    #[test]
    fn test_cross_session_scope_returns_everything() {
        let messages = transcript(42);
        let window = context_window(&messages, MemoryScope::CrossSession);
        assert_eq!(window.len(), 42);
    }

    #[test]
    fn test_short_history_returned_whole() {
        let messages = transcript(3);
        assert_eq!(context_window(&messages, MemoryScope::Local).len(), 3);
        assert_eq!(context_window(&messages, MemoryScope::Session).len(), 3);
    }

    #[test]
    fn test_default_window_is_ten() {
        let messages = transcript(25);
        let window = context_window_default(&messages);
        assert_eq!(window.len(), 10);
        assert_eq!(window[0].content, "m15");
    }
}
