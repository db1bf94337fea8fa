//! Screenshot proxy — forwards a page URL to ScreenshotOne and streams the
//! captured PNG back to the client.

use std::time::Duration;

use axum::{
    body::Body,
    extract::{Query, State},
    http::header,
    response::IntoResponse,
};
use serde::Deserialize;
use serde_json::json;
use tracing::info;

use crate::errors::AppError;
use crate::logs::recorder::Channel;
use crate::state::AppState;

const SCREENSHOTONE_URL: &str = "https://api.screenshotone.com/take";
const SCREENSHOT_TIMEOUT: Duration = Duration::from_secs(15);

#[derive(Debug, Deserialize)]
pub struct ScreenshotQuery {
    pub url: Option<String>,
}

/// GET /api/screenshot?url=
pub async fn handle_screenshot(
    State(state): State<AppState>,
    Query(params): Query<ScreenshotQuery>,
) -> Result<impl IntoResponse, AppError> {
    let url = params
        .url
        .filter(|u| !u.trim().is_empty())
        .ok_or_else(|| AppError::Validation("URL parameter is required".to_string()))?;

    let Some(access_key) = state.config.screenshotone_api_key.clone() else {
        return Err(AppError::Configuration(
            "ScreenshotOne API key not configured".to_string(),
        ));
    };

    info!(url = %url, "Screenshot request received");

    let response = state
        .http
        .get(SCREENSHOTONE_URL)
        .query(&[
            ("url", url.as_str()),
            ("access_key", access_key.as_str()),
            ("viewport_width", "1200"),
            ("viewport_height", "800"),
            ("format", "png"),
            ("image_quality", "80"),
            ("block_ads", "true"),
            ("block_cookie_banners", "true"),
            ("block_banners_by_heuristics", "true"),
            ("block_trackers", "true"),
            ("delay", "2"),
            ("timeout", "20"),
            ("full_page", "true"),
            ("full_page_algorithm", "by_sections"),
            ("full_page_scroll_by", "800"),
            ("full_page_scroll_delay", "1000"),
            ("reduced_motion", "true"),
        ])
        .timeout(SCREENSHOT_TIMEOUT)
        .send()
        .await
        .map_err(|e| AppError::Screenshot(e.to_string()))?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(AppError::Screenshot(format!(
            "upstream status {status}: {body}"
        )));
    }

    state.recorder.record(
        Channel::Combined,
        "info",
        "Screenshot Generated",
        json!({ "url": url }),
    );

    let body = Body::from_stream(response.bytes_stream());
    Ok((
        [
            (header::CONTENT_TYPE, "image/png"),
            (header::CACHE_CONTROL, "public, max-age=3600"),
        ],
        body,
    ))
}
