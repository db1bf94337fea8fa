//! Session-scoped conversation memory.
//!
//! `AppState` holds an `Arc<dyn ConversationStore>` so the in-memory backend
//! can be swapped for an external cache without touching handler code.

use std::collections::HashMap;
use std::sync::Mutex;

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// Hard cap on exchanges kept per session; oldest evicted first.
pub const MAX_STORED_EXCHANGES: usize = 10;
/// Only this many of the most recent exchanges are exposed for prompt context.
pub const CONTEXT_WINDOW: usize = 6;

/// One question/answer pair. Immutable once appended.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Exchange {
    pub question: String,
    pub answer: String,
    pub timestamp: String,
}

/// Per-session activity summary for the analytics endpoint.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSummary {
    pub session_id: String,
    pub message_count: usize,
    pub first_activity: Option<String>,
    pub last_activity: Option<String>,
}

/// The conversation store seam. Implementations must be safe to share across
/// handlers; mutations are atomic with respect to concurrent requests.
pub trait ConversationStore: Send + Sync {
    /// Returns the most recent exchanges, capped at [`CONTEXT_WINDOW`].
    /// Unknown sessions yield an empty list.
    fn get(&self, session_id: &str) -> Vec<Exchange>;

    /// Appends one exchange, creating the session if absent and evicting the
    /// oldest entries beyond [`MAX_STORED_EXCHANGES`].
    fn append(&self, session_id: &str, question: String, answer: String);

    /// Removes the session entirely. Clearing an unknown session is a no-op.
    fn clear(&self, session_id: &str);

    /// Whether any exchange has been stored under this session id.
    fn contains(&self, session_id: &str) -> bool;

    /// Activity summaries for every live session.
    fn summaries(&self) -> Vec<SessionSummary>;
}

/// Default process-local backend: a mutex-guarded map. The lock is never held
/// across an await, so append/clear stay atomic under the async runtime.
#[derive(Default)]
pub struct InMemoryStore {
    sessions: Mutex<HashMap<String, Vec<Exchange>>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ConversationStore for InMemoryStore {
    fn get(&self, session_id: &str) -> Vec<Exchange> {
        let sessions = self.sessions.lock().expect("session store mutex poisoned");
        match sessions.get(session_id) {
            Some(history) => {
                let start = history.len().saturating_sub(CONTEXT_WINDOW);
                history[start..].to_vec()
            }
            None => Vec::new(),
        }
    }

    fn append(&self, session_id: &str, question: String, answer: String) {
        let mut sessions = self.sessions.lock().expect("session store mutex poisoned");
        let history = sessions.entry(session_id.to_string()).or_default();
        history.push(Exchange {
            question,
            answer,
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        });
        if history.len() > MAX_STORED_EXCHANGES {
            let excess = history.len() - MAX_STORED_EXCHANGES;
            history.drain(..excess);
        }
    }

    fn clear(&self, session_id: &str) {
        let mut sessions = self.sessions.lock().expect("session store mutex poisoned");
        sessions.remove(session_id);
    }

    fn contains(&self, session_id: &str) -> bool {
        let sessions = self.sessions.lock().expect("session store mutex poisoned");
        sessions.contains_key(session_id)
    }

    fn summaries(&self) -> Vec<SessionSummary> {
        let sessions = self.sessions.lock().expect("session store mutex poisoned");
        sessions
            .iter()
            .map(|(session_id, history)| SessionSummary {
                session_id: session_id.clone(),
                message_count: history.len(),
                first_activity: history.first().map(|e| e.timestamp.clone()),
                last_activity: history.last().map(|e| e.timestamp.clone()),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled_store(session_id: &str, count: usize) -> InMemoryStore {
        let store = InMemoryStore::new();
        for i in 0..count {
            store.append(session_id, format!("q{i}"), format!("a{i}"));
        }
        store
    }

    #[test]
    fn test_unknown_session_is_empty() {
        let store = InMemoryStore::new();
        assert!(store.get("nobody").is_empty());
        assert!(!store.contains("nobody"));
    }

    #[test]
    fn test_append_creates_session() {
        let store = InMemoryStore::new();
        store.append("s1", "Hello".to_string(), "Hi!".to_string());
        assert!(store.contains("s1"));
        let history = store.get("s1");
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].question, "Hello");
        assert_eq!(history[0].answer, "Hi!");
        assert!(!history[0].timestamp.is_empty());
    }

    #[test]
    fn test_stored_history_caps_at_ten_most_recent() {
        let store = filled_store("s1", 25);
        let summaries = store.summaries();
        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0].message_count, MAX_STORED_EXCHANGES);

        // The window exposes the newest entries, in chronological order
        let history = store.get("s1");
        assert_eq!(history.first().unwrap().question, "q19");
        assert_eq!(history.last().unwrap().question, "q24");
    }

    #[test]
    fn test_get_never_exceeds_context_window() {
        let store = filled_store("s1", MAX_STORED_EXCHANGES);
        assert_eq!(store.get("s1").len(), CONTEXT_WINDOW);
    }

    #[test]
    fn test_get_preserves_chronological_order() {
        let store = filled_store("s1", 8);
        let questions: Vec<_> = store.get("s1").into_iter().map(|e| e.question).collect();
        assert_eq!(questions, vec!["q2", "q3", "q4", "q5", "q6", "q7"]);
    }

    #[test]
    fn test_clear_removes_session() {
        let store = filled_store("s1", 3);
        store.clear("s1");
        assert!(!store.contains("s1"));
        assert!(store.get("s1").is_empty());
        // Clearing again is not an error
        store.clear("s1");
    }

    #[test]
    fn test_sessions_are_independent() {
        let store = InMemoryStore::new();
        store.append("a", "qa".to_string(), "aa".to_string());
        store.append("b", "qb".to_string(), "ab".to_string());
        store.clear("a");
        assert!(store.get("a").is_empty());
        assert_eq!(store.get("b").len(), 1);
    }

    #[test]
    fn test_summaries_report_first_and_last_activity() {
        let store = filled_store("s1", 2);
        let summary = &store.summaries()[0];
        assert_eq!(summary.session_id, "s1");
        assert_eq!(summary.message_count, 2);
        assert!(summary.first_activity.is_some());
        assert!(summary.last_activity.is_some());
        assert!(summary.first_activity <= summary.last_activity);
    }
}
