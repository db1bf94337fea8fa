use std::path::PathBuf;

use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
///
/// The Gemini key is intentionally optional: the server starts without it and
/// `/api/answer` reports a misconfiguration per request instead.
#[derive(Debug, Clone)]
pub struct Config {
    pub gemini_api_key: Option<String>,
    pub screenshotone_api_key: Option<String>,
    pub port: u16,
    pub rust_log: String,
    pub app_env: String,
    pub resume_path: PathBuf,
    pub logs_dir: PathBuf,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            gemini_api_key: optional_env("GEMINI_API_KEY"),
            screenshotone_api_key: optional_env("SCREENSHOTONE_API_KEY"),
            port: env_or("PORT", "3001")
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: env_or("RUST_LOG", "info"),
            app_env: env_or("APP_ENV", "development"),
            resume_path: env_or("RESUME_PATH", "resume.pdf").into(),
            logs_dir: env_or("LOGS_DIR", "logs").into(),
        })
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|value| !value.trim().is_empty())
}
