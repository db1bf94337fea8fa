mod chat;
mod config;
mod document;
mod errors;
mod llm_client;
mod logs;
mod middleware;
mod routes;
mod screenshot;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::chat::memory::InMemoryStore;
use crate::config::Config;
use crate::llm_client::GeminiClient;
use crate::logs::recorder::LogRecorder;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!(
        "Starting portfolio chat API v{} ({})",
        env!("CARGO_PKG_VERSION"),
        config.app_env
    );

    // Event log channels (chat/http/error/combined) under the logs directory
    let recorder = Arc::new(LogRecorder::new(&config.logs_dir));

    // Load the résumé once, before any request is served. Failure degrades
    // answers but never blocks startup.
    let resume_text: Arc<str> = Arc::from(document::load_resume_text(&config.resume_path));

    // Gemini client + startup connectivity self-test (non-fatal)
    let llm = GeminiClient::new(config.gemini_api_key.clone());
    if llm.is_configured() {
        match llm.connectivity_check().await {
            Ok(()) => info!("Gemini API connected successfully"),
            Err(e) => warn!("Gemini API connectivity check failed: {e}"),
        }
    } else {
        warn!("GEMINI_API_KEY not set; /api/answer will report a misconfiguration");
    }

    // Build app state
    let state = AppState {
        llm,
        http: reqwest::Client::new(),
        store: Arc::new(InMemoryStore::new()),
        resume_text,
        recorder,
        config: config.clone(),
    };

    // Build router
    let app = build_router(state.clone())
        .layer(axum::middleware::from_fn_with_state(
            state,
            middleware::record_request,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict to the portfolio origins in production

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
