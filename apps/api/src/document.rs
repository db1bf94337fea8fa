//! Résumé loader — extracts the plain text the prompt assembler embeds.
//!
//! Load failure is non-fatal: the server answers with an empty document
//! section and degraded quality rather than refusing to start.

use std::path::Path;

use tracing::{info, warn};

/// Extracts the résumé text from a PDF at `path`.
/// Returns an empty string if the file is missing or unparseable.
pub fn load_resume_text(path: &Path) -> String {
    info!(path = %path.display(), "Loading resume file");

    match pdf_extract::extract_text(path) {
        Ok(raw) => {
            let text = raw.replace("\r\n", "\n").trim().to_string();
            info!(length = text.len(), "Resume loaded successfully");
            text
        }
        Err(e) => {
            warn!(
                path = %path.display(),
                error = %e,
                "Failed to load/parse resume; continuing with empty document"
            );
            String::new()
        }
    }
}
