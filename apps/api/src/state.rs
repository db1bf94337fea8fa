use std::sync::Arc;

use crate::chat::memory::ConversationStore;
use crate::config::Config;
use crate::llm_client::GeminiClient;
use crate::logs::recorder::LogRecorder;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub llm: GeminiClient,
    /// Plain HTTP client for pass-through calls (screenshot proxy).
    pub http: reqwest::Client,
    /// Pluggable conversation memory. Default: `InMemoryStore`.
    pub store: Arc<dyn ConversationStore>,
    /// Résumé text extracted once at startup; empty when the load failed.
    pub resume_text: Arc<str>,
    pub recorder: Arc<LogRecorder>,
}
