//! Append-only session log.
//!
//! Each line is `[<rfc3339>] <LEVEL> <json event>`. The log is optional; a
//! disabled logger accepts every call and writes nothing.

use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;
use std::sync::Mutex;

use serde::Serialize;

pub const EVENT_SESSION_STARTED: &str = "session_started";
pub const EVENT_DECISION_COMMITTED: &str = "decision_committed";
pub const EVENT_TABLE_WRITTEN: &str = "table_written";
pub const EVENT_UPLOAD_SAVED: &str = "upload_saved";
pub const EVENT_SESSION_CLOSED: &str = "session_closed";
pub const EVENT_SESSION_COMPLETED: &str = "session_completed";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "debug" => Some(Self::Debug),
            "info" => Some(Self::Info),
            "warn" => Some(Self::Warn),
            "error" => Some(Self::Error),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Debug => "DEBUG",
            Self::Info => "INFO",
            Self::Warn => "WARN",
            Self::Error => "ERROR",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SessionEvent {
    #[serde(rename = "type")]
    pub event_type: String,
    pub mode: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cursor: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl SessionEvent {
    pub fn new(event_type: &str, mode: &str) -> Self {
        Self {
            event_type: event_type.to_string(),
            mode: mode.to_string(),
            cursor: None,
            data: None,
        }
    }

    pub fn at(mut self, cursor: usize) -> Self {
        self.cursor = Some(cursor);
        self
    }

    pub fn with_data(mut self, data: serde_json::Value) -> Self {
        self.data = Some(data);
        self
    }
}

pub struct SessionLogger {
    writer: Option<Mutex<BufWriter<File>>>,
    min_level: LogLevel,
}

impl SessionLogger {
    pub fn disabled() -> Self {
        Self {
            writer: None,
            min_level: LogLevel::Error,
        }
    }

    /// Open `path` for appending, creating its parent directory.
    pub fn open(path: &Path, min_level: LogLevel) -> Result<Self, String> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|err| format!("create log dir: {err}"))?;
        }
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|err| format!("open log {}: {err}", path.display()))?;
        Ok(Self {
            writer: Some(Mutex::new(BufWriter::new(file))),
            min_level,
        })
    }

    pub fn log(&self, level: LogLevel, event: &SessionEvent) -> Result<(), String> {
        let Some(writer) = &self.writer else {
            return Ok(());
        };
        if level < self.min_level {
            return Ok(());
        }
        let payload = serde_json::to_string(event).map_err(|err| err.to_string())?;
        let stamp = chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Secs, true);
        let mut writer = writer.lock().map_err(|err| err.to_string())?;
        writer
            .write_all(format!("[{stamp}] {} {payload}\n", level.as_str()).as_bytes())
            .map_err(|err| err.to_string())?;
        writer.flush().map_err(|err| err.to_string())
    }
}
