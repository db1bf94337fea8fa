//! Structured event log — append-only JSON lines, one file per channel per
//! day. Files roll to an indexed name when the size cap is hit and expire
//! after the channel's retention window. Write failures are logged through
//! `tracing` and never surface to callers.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use chrono::{NaiveDate, SecondsFormat, Utc};
use serde_json::{Map, Value};
use tracing::warn;

const MB: u64 = 1024 * 1024;

/// Log channels, each with its own file prefix, size cap, and retention.
/// Chat history is kept the longest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    Chat,
    Http,
    Error,
    Combined,
}

impl Channel {
    pub fn prefix(self) -> &'static str {
        match self {
            Channel::Chat => "chat",
            Channel::Http => "http",
            Channel::Error => "error",
            Channel::Combined => "combined",
        }
    }

    fn max_size_bytes(self) -> u64 {
        match self {
            Channel::Chat => 50 * MB,
            _ => 20 * MB,
        }
    }

    fn retention_days(self) -> i64 {
        match self {
            Channel::Chat => 30,
            Channel::Http => 7,
            Channel::Error | Channel::Combined => 14,
        }
    }
}

/// Appends JSON-line entries to the per-channel daily files.
///
/// Every entry lands in its channel file and in `combined-`; error-level
/// entries are mirrored to `error-` as well.
pub struct LogRecorder {
    dir: PathBuf,
    io_lock: Mutex<()>,
}

impl LogRecorder {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        if let Err(e) = fs::create_dir_all(&dir) {
            warn!(dir = %dir.display(), error = %e, "Failed to create logs directory");
        }
        Self {
            dir,
            io_lock: Mutex::new(()),
        }
    }

    /// Records one entry. `meta` must be a JSON object; its fields are merged
    /// after the standard `timestamp`/`level`/`message` trio.
    pub fn record(&self, channel: Channel, level: &str, message: &str, meta: Value) {
        let mut entry = Map::new();
        entry.insert(
            "timestamp".to_string(),
            Value::String(Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)),
        );
        entry.insert("level".to_string(), Value::String(level.to_string()));
        entry.insert("message".to_string(), Value::String(message.to_string()));
        if let Value::Object(fields) = meta {
            entry.extend(fields);
        }
        let line = Value::Object(entry).to_string();

        let _guard = self.io_lock.lock().expect("log recorder mutex poisoned");
        self.append_line(channel, &line);
        if channel != Channel::Combined {
            self.append_line(Channel::Combined, &line);
        }
        if level == "error" && channel != Channel::Error {
            self.append_line(Channel::Error, &line);
        }
    }

    fn append_line(&self, channel: Channel, line: &str) {
        if let Err(e) = self.try_append(channel, line) {
            warn!(channel = channel.prefix(), error = %e, "Failed to write log entry");
        }
    }

    fn try_append(&self, channel: Channel, line: &str) -> std::io::Result<()> {
        let date = Utc::now().date_naive();
        let path = self.dir.join(format!("{}-{}.log", channel.prefix(), date));

        match fs::metadata(&path) {
            Ok(meta) if meta.len() >= channel.max_size_bytes() => {
                self.roll(channel, &path, date)?;
            }
            Ok(_) => {}
            // First write of the day: a good moment to drop expired files
            Err(_) => self.prune(channel, date),
        }

        let mut file = OpenOptions::new().create(true).append(true).open(&path)?;
        writeln!(file, "{line}")
    }

    fn roll(&self, channel: Channel, path: &Path, date: NaiveDate) -> std::io::Result<()> {
        let mut index = 1;
        let mut rolled = self
            .dir
            .join(format!("{}-{}.{}.log", channel.prefix(), date, index));
        while rolled.exists() {
            index += 1;
            rolled = self
                .dir
                .join(format!("{}-{}.{}.log", channel.prefix(), date, index));
        }
        fs::rename(path, rolled)
    }

    fn prune(&self, channel: Channel, today: NaiveDate) {
        let cutoff = today - chrono::Duration::days(channel.retention_days());
        let prefix = format!("{}-", channel.prefix());
        let Ok(entries) = fs::read_dir(&self.dir) else {
            return;
        };
        for entry in entries.flatten() {
            let name = entry.file_name();
            let Some(name) = name.to_str() else { continue };
            if !name.ends_with(".log") {
                continue;
            }
            let Some(rest) = name.strip_prefix(&prefix) else {
                continue;
            };
            let Some(date) = rest
                .get(..10)
                .and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok())
            else {
                continue;
            };
            if date < cutoff {
                let _ = fs::remove_file(entry.path());
            }
        }
    }
}
