//! Axum route handlers for the chat API.

use std::time::Instant;

use axum::{
    extract::{Path, State},
    Json,
};
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::chat::intent;
use crate::chat::memory::{Exchange, SessionSummary};
use crate::chat::prompts::PromptBuilder;
use crate::chat::suggestions;
use crate::errors::AppError;
use crate::logs::recorder::Channel;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

fn default_session_id() -> String {
    "default".to_string()
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerRequest {
    pub question: Option<String>,
    #[serde(default = "default_session_id")]
    pub session_id: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerMetadata {
    pub intent: String,
    pub follow_up_suggestions: Vec<String>,
    pub timestamp: String,
    pub session_id: String,
}

#[derive(Debug, Serialize)]
pub struct AnswerResponse {
    pub answer: String,
    pub metadata: AnswerMetadata,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationResponse {
    pub session_id: String,
    pub conversation_history: Vec<Exchange>,
    pub message_count: usize,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClearResponse {
    pub message: &'static str,
    pub session_id: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsResponse {
    pub total_sessions: usize,
    pub active_sessions: Vec<String>,
    pub session_stats: Vec<SessionSummary>,
    pub timestamp: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/answer
///
/// The hot path: classify → recall context → assemble prompt → Gemini →
/// remember the exchange → respond with answer plus metadata.
pub async fn handle_answer(
    State(state): State<AppState>,
    Json(request): Json<AnswerRequest>,
) -> Result<Json<AnswerResponse>, AppError> {
    let started = Instant::now();
    let session_id = request.session_id;

    if !state.store.contains(&session_id) {
        state.recorder.record(
            Channel::Chat,
            "info",
            "Chat Conversation Started",
            json!({ "sessionId": session_id }),
        );
    }

    let question = request.question.as_deref().map(str::trim).unwrap_or("");
    if question.is_empty() {
        state.recorder.record(
            Channel::Chat,
            "warn",
            "Chat Request Failed - No question provided",
            json!({ "sessionId": session_id }),
        );
        return Err(AppError::Validation("No question provided".to_string()));
    }

    let matched = intent::classify(question);
    let primary = intent::primary_intent(&matched);
    let history = state.store.get(&session_id);

    state.recorder.record(
        Channel::Chat,
        "info",
        "User Message",
        json!({
            "sessionId": session_id,
            "message": truncate_chars(question, 500),
            "messageLength": question.len(),
            "intent": primary.as_str(),
            "hasContext": !history.is_empty(),
            "contextLength": history.len(),
        }),
    );
    state.recorder.record(
        Channel::Chat,
        "debug",
        "Intent Analysis",
        json!({
            "sessionId": session_id,
            "question": truncate_chars(question, 200),
            "detectedIntents": matched.iter().map(|i| i.as_str()).collect::<Vec<_>>(),
            "primaryIntent": primary.as_str(),
        }),
    );

    if !state.llm.is_configured() {
        state.recorder.record(
            Channel::Chat,
            "error",
            "Gemini API Key not configured",
            json!({ "sessionId": session_id }),
        );
        return Err(AppError::Configuration(
            "Server misconfiguration: missing API key".to_string(),
        ));
    }

    let prompt = PromptBuilder::new()
        .resume_text(&state.resume_text)
        .history(&history)
        .question(question)
        .build();

    let llm_started = Instant::now();
    let answer = match state.llm.generate(&prompt).await {
        Ok(answer) => {
            state.recorder.record(
                Channel::Chat,
                "info",
                "Gemini API Call Success",
                json!({
                    "sessionId": session_id,
                    "promptLength": prompt.len(),
                    "responseTime": format!("{}ms", llm_started.elapsed().as_millis()),
                }),
            );
            answer
        }
        Err(e) => {
            state.recorder.record(
                Channel::Chat,
                "error",
                "Gemini API Call Failed",
                json!({
                    "sessionId": session_id,
                    "promptLength": prompt.len(),
                    "responseTime": format!("{}ms", llm_started.elapsed().as_millis()),
                    "error": e.to_string(),
                }),
            );
            return Err(AppError::Upstream(e));
        }
    };

    state
        .store
        .append(&session_id, question.to_string(), answer.clone());

    let follow_ups = suggestions::follow_ups(primary);
    state.recorder.record(
        Channel::Chat,
        "debug",
        "Follow-up Suggestions Generated",
        json!({
            "sessionId": session_id,
            "suggestions": follow_ups,
            "primaryIntent": primary.as_str(),
        }),
    );
    state.recorder.record(
        Channel::Chat,
        "info",
        "AI Response",
        json!({
            "sessionId": session_id,
            "response": truncate_chars(&answer, 500),
            "responseLength": answer.len(),
            "responseTime": format!("{}ms", started.elapsed().as_millis()),
            "intent": primary.as_str(),
        }),
    );

    Ok(Json(AnswerResponse {
        answer,
        metadata: AnswerMetadata {
            intent: primary.as_str().to_string(),
            follow_up_suggestions: follow_ups.iter().map(|s| s.to_string()).collect(),
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            session_id,
        },
    }))
}

/// GET /api/conversation/:session_id
pub async fn handle_get_conversation(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Json<ConversationResponse> {
    let history = state.store.get(&session_id);
    tracing::info!(
        session_id = %session_id,
        message_count = history.len(),
        "Conversation history retrieved"
    );
    Json(ConversationResponse {
        message_count: history.len(),
        conversation_history: history,
        session_id,
    })
}

/// DELETE /api/conversation/:session_id
pub async fn handle_clear_conversation(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Json<ClearResponse> {
    let message_count = state.store.get(&session_id).len();
    state.recorder.record(
        Channel::Chat,
        "info",
        "Chat Conversation Ended",
        json!({
            "sessionId": session_id,
            "messageCount": message_count,
            "action": "manual_clear",
        }),
    );
    state.store.clear(&session_id);
    Json(ClearResponse {
        message: "Conversation cleared",
        session_id,
    })
}

/// GET /api/chat/analytics
pub async fn handle_chat_analytics(State(state): State<AppState>) -> Json<AnalyticsResponse> {
    let session_stats = state.store.summaries();
    tracing::info!(
        total_sessions = session_stats.len(),
        "Chat analytics retrieved"
    );
    Json(AnalyticsResponse {
        total_sessions: session_stats.len(),
        active_sessions: session_stats.iter().map(|s| s.session_id.clone()).collect(),
        session_stats,
        timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
    })
}

/// Truncates on a char boundary; log entries keep message bodies bounded.
fn truncate_chars(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}
