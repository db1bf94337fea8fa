use axum::Json;
use serde_json::{json, Value};

/// GET /health
/// Liveness probe: status plus the feature flags the frontend keys off.
pub async fn health_handler() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "features": {
            "conversationMemory": true,
            "intentAnalysis": true,
            "followUpSuggestions": true,
            "enhancedPrompting": true,
            "logging": true
        }
    }))
}
