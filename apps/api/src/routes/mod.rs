pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::chat::handlers as chat_handlers;
use crate::logs::handlers as log_handlers;
use crate::screenshot;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Chat API
        .route("/api/answer", post(chat_handlers::handle_answer))
        .route(
            "/api/conversation/:session_id",
            get(chat_handlers::handle_get_conversation)
                .delete(chat_handlers::handle_clear_conversation),
        )
        .route("/api/chat/analytics", get(chat_handlers::handle_chat_analytics))
        // Screenshot proxy
        .route("/api/screenshot", get(screenshot::handle_screenshot))
        // Log query API
        .route("/api/logs/chat/:session_id", get(log_handlers::handle_chat_logs))
        .route("/api/logs/recent", get(log_handlers::handle_recent_activity))
        .route("/api/logs/stats", get(log_handlers::handle_stats))
        .route("/api/logs/search", get(log_handlers::handle_search))
        .with_state(state)
}
