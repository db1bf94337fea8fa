//! Axum route handlers for the log query endpoints.

use axum::{
    extract::{Path as AxumPath, Query, State},
    Json,
};
use serde::Deserialize;
use tracing::info;

use crate::errors::AppError;
use crate::logs::viewer::{self, LogPage, LogStatistics};
use crate::state::AppState;

fn default_lines() -> usize {
    50
}

fn default_hours() -> i64 {
    24
}

fn default_log_type() -> String {
    "all".to_string()
}

fn default_limit() -> usize {
    100
}

#[derive(Debug, Deserialize)]
pub struct ChatLogsQuery {
    #[serde(default = "default_lines")]
    pub lines: usize,
}

#[derive(Debug, Deserialize)]
pub struct RecentQuery {
    #[serde(default = "default_hours")]
    pub hours: i64,
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub q: Option<String>,
    #[serde(rename = "type", default = "default_log_type")]
    pub log_type: String,
    #[serde(default = "default_limit")]
    pub limit: usize,
}

/// GET /api/logs/chat/:session_id?lines=
pub async fn handle_chat_logs(
    State(state): State<AppState>,
    AxumPath(session_id): AxumPath<String>,
    Query(params): Query<ChatLogsQuery>,
) -> Result<Json<LogPage>, AppError> {
    let page = viewer::chat_logs_for_session(&state.config.logs_dir, &session_id, params.lines)?;
    info!(session_id = %session_id, lines = page.logs.len(), "Chat logs retrieved");
    Ok(Json(page))
}

/// GET /api/logs/recent?hours=
pub async fn handle_recent_activity(
    State(state): State<AppState>,
    Query(params): Query<RecentQuery>,
) -> Result<Json<LogPage>, AppError> {
    let page = viewer::recent_activity(&state.config.logs_dir, params.hours)?;
    info!(hours = params.hours, logs = page.logs.len(), "Recent chat activity retrieved");
    Ok(Json(page))
}

/// GET /api/logs/stats
pub async fn handle_stats(
    State(state): State<AppState>,
) -> Result<Json<LogStatistics>, AppError> {
    let stats = viewer::statistics(&state.config.logs_dir)?;
    info!(total_files = stats.total_files, "Log statistics retrieved");
    Ok(Json(stats))
}

/// GET /api/logs/search?q=&type=&limit=
pub async fn handle_search(
    State(state): State<AppState>,
    Query(params): Query<SearchQuery>,
) -> Result<Json<LogPage>, AppError> {
    let query = params
        .q
        .as_deref()
        .map(str::trim)
        .filter(|q| !q.is_empty())
        .ok_or_else(|| AppError::Validation("Query parameter is required".to_string()))?;

    let page = viewer::search(&state.config.logs_dir, query, &params.log_type, params.limit)?;
    info!(query = %query, log_type = %params.log_type, results = page.logs.len(), "Log search performed");
    Ok(Json(page))
}
