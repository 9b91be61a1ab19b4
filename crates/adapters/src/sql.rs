//! Relational adapter.
//!
//! Simulated executor: it reports success without opening a connection.
//! [`SqlConfig`] already carries the statement text, kind and database name
//! so a real query-execution path can replace the body of [`SqlAdapter::execute`]
//! without touching the dispatch or audit layers.

use crate::config::SqlConfig;
use crate::log::ExecutionLog;
use crate::result::AdapterOutcome;

/// Simulated relational query executor.
#[derive(Default)]
pub struct SqlAdapter;

impl SqlAdapter {
    /// Create the adapter.
    pub fn new() -> Self {
        Self
    }

    /// Simulate executing the configured statement.
    pub async fn execute(&self, config: &SqlConfig, logs: &mut Vec<ExecutionLog>) -> AdapterOutcome {
        tracing::debug!(
            statement = %config.statement,
            database = %config.database,
            "Simulating SQL execution"
        );

        logs.push(ExecutionLog::info(format!(
            "SQL {} against {} simulated (success)",
            config.statement, config.database
        )));

        AdapterOutcome::passed(serde_json::json!({
            "message": "SQL simulation success"
        }))
    }
}
