//! In-app activity log backing the log pane.
//!
//! Bounded feed of timestamped, leveled entries. The cap mirrors the log
//! pane limit: once full, the oldest entry is dropped. Diagnostic output
//! additionally goes through `tracing`.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::{SystemTime, UNIX_EPOCH};

/// Maximum retained entries; the oldest is dropped beyond this.
pub const LOG_CAPACITY: usize = 1000;

/// Severity of a log entry, mapped to a style class in the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Info,
    Success,
    Warning,
    Error,
}

impl LogLevel {
    /// CSS class name used by the log pane.
    pub fn class(self) -> &'static str {
        match self {
            LogLevel::Info => "info",
            LogLevel::Success => "success",
            LogLevel::Warning => "warning",
            LogLevel::Error => "error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub timestamp: i64,
    pub level: LogLevel,
    pub message: String,
}

/// Bounded in-memory activity log.
#[derive(Debug, Default)]
pub struct ActivityLog {
    entries: VecDeque<LogEntry>,
}

impl ActivityLog {
    pub fn new() -> Self {
        Self::default()
    }

    fn now() -> i64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs() as i64
    }

    pub fn push(&mut self, level: LogLevel, message: impl Into<String>) {
        let message = message.into();
        match level {
            LogLevel::Error => tracing::error!("{}", message),
            LogLevel::Warning => tracing::warn!("{}", message),
            _ => tracing::info!("{}", message),
        }
        self.entries.push_back(LogEntry {
            timestamp: Self::now(),
            level,
            message,
        });
        if self.entries.len() > LOG_CAPACITY {
            self.entries.pop_front();
        }
    }

    pub fn entries(&self) -> impl Iterator<Item = &LogEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Cloneable handle shared across components; all of them append, the UI
/// drains for rendering.
#[derive(Debug, Clone, Default)]
pub struct SharedLog(Arc<Mutex<ActivityLog>>);

impl SharedLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn info(&self, message: impl Into<String>) {
        self.push(LogLevel::Info, message);
    }

    pub fn success(&self, message: impl Into<String>) {
        self.push(LogLevel::Success, message);
    }

    pub fn warning(&self, message: impl Into<String>) {
        self.push(LogLevel::Warning, message);
    }

    pub fn error(&self, message: impl Into<String>) {
        self.push(LogLevel::Error, message);
    }

    pub fn push(&self, level: LogLevel, message: impl Into<String>) {
        if let Ok(mut log) = self.0.lock() {
            log.push(level, message);
        }
    }

    /// Snapshot of all retained entries, oldest first.
    pub fn snapshot(&self) -> Vec<LogEntry> {
        self.0
            .lock()
            .map(|log| log.entries().cloned().collect())
            .unwrap_or_default()
    }
}
