//! Execution log trail.
//!
//! The log trail is domain data, not diagnostics: entries are collected
//! during a run and persisted inside the audit document, ordered and
//! append-only. Operational diagnostics go through `tracing` instead.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Kind of a log entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LogKind {
    Info,
    Error,
}

/// One entry on an audit's log trail.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionLog {
    /// Entry kind.
    pub kind: LogKind,

    /// Human-readable message.
    pub message: String,

    /// Optional structured payload attached to the entry.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payload: Option<serde_json::Value>,

    /// Entry timestamp.
    pub timestamp: DateTime<Utc>,
}

impl ExecutionLog {
    /// Create an INFO entry.
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            kind: LogKind::Info,
            message: message.into(),
            payload: None,
            timestamp: Utc::now(),
        }
    }

    /// Create an ERROR entry.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: LogKind::Error,
            message: message.into(),
            payload: None,
            timestamp: Utc::now(),
        }
    }

    /// Attach a structured payload to the entry.
    pub fn with_payload(mut self, payload: serde_json::Value) -> Self {
        self.payload = Some(payload);
        self
    }
}
