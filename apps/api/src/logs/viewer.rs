//! Read-only queries over the rotated JSON-line log files.
//!
//! Every operation degrades gracefully: I/O failures come back as a typed
//! error for the handler to serialize, and an empty result set is a success.

use std::fs;
use std::path::Path;

use chrono::{DateTime, FixedOffset, Utc};
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

/// How many trailing lines of each file a cross-file scan considers.
const SCAN_WINDOW_LINES: usize = 1000;

/// Message types that count as conversation activity for the recent feed.
const ACTIVITY_MESSAGES: &[&str] = &[
    "User Message",
    "AI Response",
    "Chat Conversation Started",
    "Chat Conversation Ended",
];

#[derive(Debug, Error)]
pub enum LogQueryError {
    #[error("Log file not found")]
    NotFound,

    #[error("Failed to read logs: {0}")]
    Io(#[from] std::io::Error),
}

/// A page of matching entries plus the total match count before paging.
#[derive(Debug, Serialize)]
pub struct LogPage {
    pub logs: Vec<Value>,
    pub total: usize,
}

#[derive(Debug, Serialize)]
pub struct LogFileStat {
    pub name: String,
    pub size: u64,
    pub modified: Option<String>,
    pub created: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LogStatistics {
    pub total_files: usize,
    pub chat_files: usize,
    pub error_files: usize,
    pub combined_files: usize,
    pub http_files: usize,
    pub total_size: u64,
    pub files: Vec<LogFileStat>,
}

/// Chat entries for one session across all rotated chat files, sorted by
/// timestamp ascending, trimmed to the last `lines`.
pub fn chat_logs_for_session(
    dir: &Path,
    session_id: &str,
    lines: usize,
) -> Result<LogPage, LogQueryError> {
    let mut matched = Vec::new();
    for file in log_files(dir, Some("chat-"))? {
        let entries = read_log_file(dir, &file, SCAN_WINDOW_LINES)?;
        matched.extend(entries.into_iter().filter(|entry| {
            entry.get("sessionId").and_then(Value::as_str) == Some(session_id)
                || entry
                    .get("message")
                    .and_then(Value::as_str)
                    .is_some_and(|m| m.contains(session_id))
        }));
    }

    matched.sort_by_cached_key(entry_timestamp);
    let total = matched.len();
    let start = total.saturating_sub(lines);
    Ok(LogPage {
        logs: matched.split_off(start),
        total,
    })
}

/// Conversation activity within the last `hours`, newest first.
pub fn recent_activity(dir: &Path, hours: i64) -> Result<LogPage, LogQueryError> {
    let cutoff = Utc::now() - chrono::Duration::hours(hours);

    let mut recent = Vec::new();
    for file in log_files(dir, Some("chat-"))? {
        let entries = read_log_file(dir, &file, SCAN_WINDOW_LINES)?;
        recent.extend(entries.into_iter().filter(|entry| {
            let is_activity = entry
                .get("message")
                .and_then(Value::as_str)
                .is_some_and(|m| ACTIVITY_MESSAGES.contains(&m));
            let in_window = entry_timestamp(entry)
                .is_some_and(|ts| ts.with_timezone(&Utc) > cutoff);
            is_activity && in_window
        }));
    }

    recent.sort_by_cached_key(entry_timestamp);
    recent.reverse();
    let total = recent.len();
    Ok(LogPage { logs: recent, total })
}

/// File counts and sizes for the whole logs directory.
pub fn statistics(dir: &Path) -> Result<LogStatistics, LogQueryError> {
    let mut files = Vec::new();
    let mut total_size = 0;

    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let Ok(name) = entry.file_name().into_string() else {
            continue;
        };
        let meta = entry.metadata()?;
        if !meta.is_file() {
            continue;
        }
        total_size += meta.len();
        files.push(LogFileStat {
            name,
            size: meta.len(),
            modified: meta.modified().ok().map(iso8601),
            created: meta.created().ok().map(iso8601),
        });
    }

    files.sort_by(|a, b| a.name.cmp(&b.name));

    Ok(LogStatistics {
        total_files: files.len(),
        chat_files: count_prefixed(&files, "chat-"),
        error_files: count_prefixed(&files, "error-"),
        combined_files: count_prefixed(&files, "combined-"),
        http_files: count_prefixed(&files, "http-"),
        total_size,
        files,
    })
}

/// Case-insensitive substring search over serialized entries. `log_type`
/// restricts the scan to one file prefix; `"all"` scans every log file.
pub fn search(
    dir: &Path,
    query: &str,
    log_type: &str,
    limit: usize,
) -> Result<LogPage, LogQueryError> {
    let prefix = (log_type != "all").then(|| format!("{log_type}-"));
    let needle = query.to_lowercase();

    let mut matched = Vec::new();
    for file in log_files(dir, prefix.as_deref())? {
        let entries = read_log_file(dir, &file, SCAN_WINDOW_LINES)?;
        matched.extend(
            entries
                .into_iter()
                .filter(|entry| entry.to_string().to_lowercase().contains(&needle)),
        );
    }

    matched.sort_by_cached_key(entry_timestamp);
    matched.reverse();
    let total = matched.len();
    matched.truncate(limit);
    Ok(LogPage {
        logs: matched,
        total,
    })
}

/// Last `lines` parseable JSON entries of one file; malformed lines are
/// silently skipped.
fn read_log_file(dir: &Path, filename: &str, lines: usize) -> Result<Vec<Value>, LogQueryError> {
    let path = dir.join(filename);
    if !path.exists() {
        return Err(LogQueryError::NotFound);
    }

    let content = fs::read_to_string(&path)?;
    let nonempty: Vec<&str> = content
        .lines()
        .filter(|line| !line.trim().is_empty())
        .collect();
    let start = nonempty.len().saturating_sub(lines);
    Ok(nonempty[start..]
        .iter()
        .filter_map(|line| serde_json::from_str(line).ok())
        .collect())
}

fn log_files(dir: &Path, prefix: Option<&str>) -> Result<Vec<String>, LogQueryError> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let Ok(name) = entry.file_name().into_string() else {
            continue;
        };
        if !name.ends_with(".log") {
            continue;
        }
        if prefix.is_some_and(|p| !name.starts_with(p)) {
            continue;
        }
        files.push(name);
    }
    files.sort();
    Ok(files)
}

fn count_prefixed(files: &[LogFileStat], prefix: &str) -> usize {
    files.iter().filter(|f| f.name.starts_with(prefix)).count()
}

fn entry_timestamp(entry: &Value) -> Option<DateTime<FixedOffset>> {
    entry
        .get("timestamp")
        .and_then(Value::as_str)
        .and_then(|ts| DateTime::parse_from_rfc3339(ts).ok())
}

fn iso8601(time: std::time::SystemTime) -> String {
    DateTime::<Utc>::from(time).to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;
    use tempfile::TempDir;

    fn write_lines(dir: &Path, name: &str, entries: &[Value]) {
        let mut file = fs::File::create(dir.join(name)).unwrap();
        for entry in entries {
            writeln!(file, "{entry}").unwrap();
        }
    }

    fn chat_entry(session: &str, message: &str, timestamp: &str) -> Value {
        json!({
            "timestamp": timestamp,
            "level": "info",
            "message": message,
            "sessionId": session,
        })
    }

    #[test]
    fn test_session_logs_filter_sort_and_tail() {
        let dir = TempDir::new().unwrap();
        write_lines(
            dir.path(),
            "chat-2025-06-02.log",
            &[chat_entry("s1", "AI Response", "2025-06-02T10:00:00.000Z")],
        );
        write_lines(
            dir.path(),
            "chat-2025-06-01.log",
            &[
                chat_entry("s1", "User Message", "2025-06-01T10:00:00.000Z"),
                chat_entry("other", "User Message", "2025-06-01T11:00:00.000Z"),
            ],
        );

        let page = chat_logs_for_session(dir.path(), "s1", 50).unwrap();
        assert_eq!(page.total, 2);
        assert_eq!(page.logs[0]["timestamp"], "2025-06-01T10:00:00.000Z");
        assert_eq!(page.logs[1]["timestamp"], "2025-06-02T10:00:00.000Z");

        let page = chat_logs_for_session(dir.path(), "s1", 1).unwrap();
        assert_eq!(page.total, 2);
        assert_eq!(page.logs.len(), 1);
        assert_eq!(page.logs[0]["timestamp"], "2025-06-02T10:00:00.000Z");
    }

    #[test]
    fn test_session_match_includes_message_mentions() {
        let dir = TempDir::new().unwrap();
        write_lines(
            dir.path(),
            "chat-2025-06-01.log",
            &[json!({
                "timestamp": "2025-06-01T09:00:00.000Z",
                "level": "info",
                "message": "Cleared history for s42",
            })],
        );

        let page = chat_logs_for_session(dir.path(), "s42", 50).unwrap();
        assert_eq!(page.total, 1);
    }

    #[test]
    fn test_recent_activity_applies_window_and_allow_list() {
        let dir = TempDir::new().unwrap();
        let now = Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true);
        write_lines(
            dir.path(),
            "chat-2025-06-01.log",
            &[
                chat_entry("s1", "User Message", &now),
                chat_entry("s1", "Intent Analysis", &now),
                chat_entry("s1", "User Message", "2000-01-01T00:00:00.000Z"),
            ],
        );

        let page = recent_activity(dir.path(), 24).unwrap();
        assert_eq!(page.total, 1, "only fresh allow-listed entries survive");
        assert_eq!(page.logs[0]["message"], "User Message");
    }

    #[test]
    fn test_statistics_count_by_prefix() {
        let dir = TempDir::new().unwrap();
        write_lines(dir.path(), "chat-2025-06-01.log", &[json!({})]);
        write_lines(dir.path(), "chat-2025-06-02.log", &[json!({})]);
        write_lines(dir.path(), "http-2025-06-01.log", &[json!({})]);
        write_lines(dir.path(), "combined-2025-06-01.log", &[json!({})]);

        let stats = statistics(dir.path()).unwrap();
        assert_eq!(stats.total_files, 4);
        assert_eq!(stats.chat_files, 2);
        assert_eq!(stats.http_files, 1);
        assert_eq!(stats.combined_files, 1);
        assert_eq!(stats.error_files, 0);
        assert!(stats.total_size > 0);
        assert_eq!(stats.files.len(), 4);
    }

    #[test]
    fn test_search_is_case_insensitive_and_limited() {
        let dir = TempDir::new().unwrap();
        write_lines(
            dir.path(),
            "chat-2025-06-01.log",
            &[
                chat_entry("s1", "User Message", "2025-06-01T10:00:00.000Z"),
                chat_entry("s1", "User Message", "2025-06-01T11:00:00.000Z"),
                chat_entry("s1", "AI Response", "2025-06-01T12:00:00.000Z"),
            ],
        );

        let page = search(dir.path(), "USER MESSAGE", "all", 1).unwrap();
        assert_eq!(page.total, 2);
        assert_eq!(page.logs.len(), 1);
        // Newest first
        assert_eq!(page.logs[0]["timestamp"], "2025-06-01T11:00:00.000Z");
    }

    #[test]
    fn test_search_with_no_matches_is_empty_success() {
        let dir = TempDir::new().unwrap();
        write_lines(
            dir.path(),
            "chat-2025-06-01.log",
            &[chat_entry("s1", "User Message", "2025-06-01T10:00:00.000Z")],
        );

        let page = search(dir.path(), "no such text anywhere", "all", 100).unwrap();
        assert!(page.logs.is_empty());
        assert_eq!(page.total, 0);
    }

    #[test]
    fn test_search_respects_type_prefix() {
        let dir = TempDir::new().unwrap();
        write_lines(
            dir.path(),
            "chat-2025-06-01.log",
            &[chat_entry("s1", "shared term", "2025-06-01T10:00:00.000Z")],
        );
        write_lines(
            dir.path(),
            "http-2025-06-01.log",
            &[json!({"timestamp": "2025-06-01T10:00:00.000Z", "message": "shared term"})],
        );

        let page = search(dir.path(), "shared term", "http", 100).unwrap();
        assert_eq!(page.total, 1);
    }

    #[test]
    fn test_malformed_lines_are_skipped() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("chat-2025-06-01.log");
        fs::write(
            &path,
            "not json at all\n{\"timestamp\":\"2025-06-01T10:00:00.000Z\",\"message\":\"User Message\",\"sessionId\":\"s1\"}\n",
        )
        .unwrap();

        let page = chat_logs_for_session(dir.path(), "s1", 50).unwrap();
        assert_eq!(page.total, 1);
    }

    #[test]
    fn test_missing_directory_is_an_error() {
        let result = statistics(Path::new("definitely/not/a/logs/dir"));
        assert!(matches!(result, Err(LogQueryError::Io(_))));
    }
}
