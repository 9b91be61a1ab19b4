//! Shared model types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use testdeck_adapters::ExecutionStatus;

/// Deployment-target tag threaded through a run.
///
/// The tag is recorded on every audit but never alters executor logic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Environment {
    Qa,
    Preprod,
    Prod,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Qa => write!(f, "QA"),
            Environment::Preprod => write!(f, "PREPROD"),
            Environment::Prod => write!(f, "PROD"),
        }
    }
}

/// Denormalized last-run summary on a definition.
///
/// Overwritten after every run, last write wins; concurrent runs of the
/// same definition race harmlessly since only the most recent summary
/// matters for display.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LastRun {
    /// Final status of the run.
    pub status: ExecutionStatus,

    /// Run id of the audit this summary points at.
    pub run_id: String,

    /// When the run finished.
    pub at: DateTime<Utc>,

    /// Actor who initiated the run.
    pub by: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_environment_serialization() {
        assert_eq!(serde_json::to_string(&Environment::Qa).unwrap(), "\"QA\"");
        assert_eq!(serde_json::to_string(&Environment::Preprod).unwrap(), "\"PREPROD\"");

        let env: Environment = serde_json::from_str("\"PROD\"").unwrap();
        assert_eq!(env, Environment::Prod);
    }

    #[test]
    fn test_environment_display() {
        assert_eq!(Environment::Preprod.to_string(), "PREPROD");
    }
}
