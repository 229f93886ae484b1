use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;
use std::panic::Location;

/// Where a log call was issued from, rendered as `"<scope> line <n>"`.
///
/// `scope` is a source file when captured through [`CallSite::caller`] and a
/// module path when captured through the [`call_site!`](crate::call_site)
/// macro.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallSite {
    pub scope: String,
    pub line: u32,
}

impl CallSite {
    pub fn new(scope: impl Into<String>, line: u32) -> Self {
        CallSite { scope: scope.into(), line }
    }

    /// Capture the call site of the function calling this one.
    ///
    /// Propagates through any chain of `#[track_caller]` functions, so the
    /// reported position is the first frame outside that chain.
    #[track_caller]
    pub fn caller() -> Self {
        let loc = Location::caller();
        CallSite::new(loc.file(), loc.line())
    }
}

impl fmt::Display for CallSite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} line {}", self.scope, self.line)
    }
}

/// Build a [`CallSite`] naming the enclosing module and the current line.
#[macro_export]
macro_rules! call_site {
    () => {
        $crate::record::CallSite::new(module_path!(), line!())
    };
}

/// A plain log line written by [`LogClient::write_log`](crate::client::LogClient::write_log).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LogRecord {
    pub message: String,
    pub location: String,
    pub date: DateTime<Utc>,
    #[serde(rename = "metaData")]
    pub metadata: serde_json::Map<String, serde_json::Value>,
}

/// An error written by [`LogClient::write_error`](crate::client::LogClient::write_error).
///
/// Unlike [`LogRecord`], metadata may be any JSON value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorLogRecord {
    pub error: String,
    pub location: String,
    pub date: DateTime<Utc>,
    #[serde(rename = "metaData")]
    pub metadata: serde_json::Value,
}

/// One document handed to a [`LogSink`](crate::sink::LogSink).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum LogEntry {
    Log(LogRecord),
    Error(ErrorLogRecord),
}

impl LogEntry {
    /// Label used in console echo lines.
    pub fn kind(&self) -> &'static str {
        match self {
            LogEntry::Log(_) => "Log",
            LogEntry::Error(_) => "Error",
        }
    }

    pub fn date(&self) -> DateTime<Utc> {
        match self {
            LogEntry::Log(r) => r.date,
            LogEntry::Error(r) => r.date,
        }
    }

    pub fn location(&self) -> &str {
        match self {
            LogEntry::Log(r) => &r.location,
            LogEntry::Error(r) => &r.location,
        }
    }

    /// The message for plain logs, the error text for error logs.
    pub fn text(&self) -> &str {
        match self {
            LogEntry::Log(r) => &r.message,
            LogEntry::Error(r) => &r.error,
        }
    }

    /// Line mirrored to stdout after a successful insert:
    /// `<date> | <kind> | <location> | <text> | <metadata>`.
    pub fn console_line(&self) -> String {
        let metadata = match self {
            LogEntry::Log(r) => serde_json::Value::Object(r.metadata.clone()).to_string(),
            LogEntry::Error(r) => r.metadata.to_string(),
        };
        format!(
            "{} | {} | {} | {} | {}",
            self.date().format("%Y-%m-%d %H:%M:%S"),
            self.kind(),
            self.location(),
            self.text(),
            metadata
        )
    }
}
