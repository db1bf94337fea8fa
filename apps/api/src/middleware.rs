//! Request logging middleware — times every request, records it to the
//! `http` log channel, and flags suspicious request shapes before they reach
//! a handler.

use std::time::Instant;

use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::json;
use tracing::warn;

use crate::logs::recorder::Channel;
use crate::state::AppState;

/// Probe shapes worth flagging: traversal, XSS, SQLi, code injection.
static SUSPICIOUS_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"\.\.",
        r"(?i)<script",
        r"(?i)union.*select",
        r"(?i)eval\(",
        r"(?i)javascript:",
    ]
    .into_iter()
    .map(|pattern| Regex::new(pattern).expect("suspicious pattern must compile"))
    .collect()
});

pub async fn record_request(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let method = request.method().to_string();
    let url = request.uri().to_string();
    let user_agent = request
        .headers()
        .get(header::USER_AGENT)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("")
        .to_string();

    if let Some(pattern) = SUSPICIOUS_PATTERNS
        .iter()
        .find(|p| p.is_match(&url) || p.is_match(&user_agent))
    {
        warn!(method = %method, url = %url, pattern = pattern.as_str(), "Suspicious activity detected");
        state.recorder.record(
            Channel::Combined,
            "warn",
            "Suspicious Activity Detected",
            json!({
                "method": method,
                "url": url,
                "userAgent": user_agent,
                "pattern": pattern.as_str(),
            }),
        );
    }

    let started = Instant::now();
    let response = next.run(request).await;

    state.recorder.record(
        Channel::Http,
        "http",
        "API Request",
        json!({
            "method": method,
            "url": url,
            "statusCode": response.status().as_u16(),
            "responseTime": format!("{}ms", started.elapsed().as_millis()),
            "userAgent": user_agent,
        }),
    );

    response
}
