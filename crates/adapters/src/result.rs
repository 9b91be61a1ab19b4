//! Execution status and adapter outcome types.

use serde::{Deserialize, Serialize};

/// Status of a run.
///
/// `Pending` is the in-memory state before dispatch; runs terminate as
/// `Passed` or `Failed`. There is no retry or partial terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ExecutionStatus {
    Pending,
    Passed,
    Failed,
}

impl ExecutionStatus {
    /// Returns true if the status indicates a passed run.
    pub fn is_passed(&self) -> bool {
        matches!(self, ExecutionStatus::Passed)
    }

    /// Returns true if the status indicates a failed run.
    pub fn is_failed(&self) -> bool {
        matches!(self, ExecutionStatus::Failed)
    }
}

impl std::fmt::Display for ExecutionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExecutionStatus::Pending => write!(f, "PENDING"),
            ExecutionStatus::Passed => write!(f, "PASSED"),
            ExecutionStatus::Failed => write!(f, "FAILED"),
        }
    }
}

/// Outcome of one adapter execution.
///
/// Adapters never return errors past their boundary: every failure path is
/// converted into a `Failed` outcome plus an ERROR entry on the log trail,
/// so the calling executor can always persist a complete audit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdapterOutcome {
    /// Terminal status of the call.
    pub status: ExecutionStatus,

    /// Captured response payload, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response: Option<serde_json::Value>,
}

impl AdapterOutcome {
    /// Create a passed outcome with a captured response.
    pub fn passed(response: serde_json::Value) -> Self {
        Self {
            status: ExecutionStatus::Passed,
            response: Some(response),
        }
    }

    /// Create a failed outcome with no response.
    pub fn failed() -> Self {
        Self {
            status: ExecutionStatus::Failed,
            response: None,
        }
    }

    /// Create a failed outcome that still captured a response
    /// (e.g. a non-2xx HTTP reply).
    pub fn failed_with(response: serde_json::Value) -> Self {
        Self {
            status: ExecutionStatus::Failed,
            response: Some(response),
        }
    }

    /// Returns true if the outcome passed.
    pub fn is_passed(&self) -> bool {
        self.status.is_passed()
    }
}
