/// LLM Client — the single point of entry for all Gemini API calls.
///
/// ARCHITECTURAL RULE: No other module may call the Gemini API directly.
/// All completion requests MUST go through this module.
///
/// A failed call surfaces immediately: no retries, no fallback answer. The
/// main request path carries no client-side timeout and relies on the
/// transport default; only the startup connectivity check is bounded.
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

const GEMINI_API_URL: &str =
    "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.0-flash:generateContent";
const CONNECTIVITY_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(5);

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("API key not configured")]
    MissingKey,

    #[error("Gemini returned an empty completion")]
    EmptyCompletion,
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

impl<'a> GenerateRequest<'a> {
    fn from_prompt(prompt: &'a str) -> Self {
        Self {
            contents: vec![Content {
                parts: vec![RequestPart { text: prompt }],
            }],
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct GenerateResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
pub struct Candidate {
    pub content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
pub struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
pub struct ResponsePart {
    pub text: Option<String>,
}

impl GenerateResponse {
    /// Extracts the text of the first candidate part, if any.
    pub fn text(&self) -> Option<&str> {
        self.candidates
            .first()?
            .content
            .as_ref()?
            .parts
            .first()?
            .text
            .as_deref()
    }
}

#[derive(Debug, Deserialize)]
struct GeminiError {
    error: GeminiErrorBody,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorBody {
    message: String,
}

/// The single completion client shared by all handlers.
#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    api_key: Option<String>,
}

impl GeminiClient {
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            client: Client::new(),
            api_key,
        }
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    /// Sends one completion request and returns the reply text.
    ///
    /// A successful response whose candidate text is absent yields an empty
    /// string — only transport failures and non-200 statuses are errors.
    pub async fn generate(&self, prompt: &str) -> Result<String, LlmError> {
        let Some(key) = self.api_key.as_deref() else {
            return Err(LlmError::MissingKey);
        };

        let request_body = GenerateRequest::from_prompt(prompt);

        let response = self
            .client
            .post(GEMINI_API_URL)
            .query(&[("key", key)])
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            // Try to parse the structured error message
            let message = serde_json::from_str::<GeminiError>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(LlmError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: GenerateResponse = response.json().await?;

        let reply = parsed
            .text()
            .map(|t| t.trim().to_string())
            .unwrap_or_default();

        debug!(reply_length = reply.len(), "Gemini call succeeded");

        Ok(reply)
    }

    /// Startup self-test: one bounded "Hello" completion.
    /// Non-200, transport failure, or a structurally empty reply all fail.
    pub async fn connectivity_check(&self) -> Result<(), LlmError> {
        let Some(key) = self.api_key.as_deref() else {
            return Err(LlmError::MissingKey);
        };

        let request_body = GenerateRequest::from_prompt("Hello");

        let response = self
            .client
            .post(GEMINI_API_URL)
            .query(&[("key", key)])
            .json(&request_body)
            .timeout(CONNECTIVITY_TIMEOUT)
            .send()
            .await?;

        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<GeminiError>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(LlmError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: GenerateResponse = response.json().await?;

        match parsed.text() {
            Some(text) if !text.trim().is_empty() => Ok(()),
            _ => Err(LlmError::EmptyCompletion),
        }
    }
}
