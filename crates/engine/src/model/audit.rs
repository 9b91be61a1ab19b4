//! Run audit models.
//!
//! Audits are append-only history: once created they are never updated in
//! place. Only the parent definition's denormalized last-run summary is
//! mutated after a run. Every audit carries the organization id of its
//! parent definition for tenant isolation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use testdeck_adapters::{ExecutionLog, ExecutionStatus};

use crate::model::common::Environment;

/// Immutable record of one workitem execution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunWorkitemAudit {
    pub run_id: String,
    pub organization_id: String,
    pub workitem_id: String,
    pub workitem_title: String,
    pub environment: Environment,
    pub status: ExecutionStatus,

    /// Versioned snapshot of the workitem configuration at execution time,
    /// so later definition edits cannot drift the audit.
    pub config_snapshot: Value,

    /// Ordered log trail of the run.
    pub logs: Vec<ExecutionLog>,

    /// Captured response payload, if the adapter produced one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response: Option<Value>,

    pub actor: String,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

/// Child workitem result embedded in a testcase audit.
///
/// A full result snapshot, not just an id reference: the composite audit
/// stays readable even if the child audit collection is pruned.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkitemRunResult {
    pub workitem_id: String,
    pub workitem_title: String,
    pub status: ExecutionStatus,
    pub logs: Vec<ExecutionLog>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response: Option<Value>,
}

impl RunWorkitemAudit {
    /// Snapshot this audit as a child result for a composite audit.
    pub fn to_result(&self) -> WorkitemRunResult {
        WorkitemRunResult {
            workitem_id: self.workitem_id.clone(),
            workitem_title: self.workitem_title.clone(),
            status: self.status,
            logs: self.logs.clone(),
            response: self.response.clone(),
        }
    }
}

/// Immutable record of one testcase execution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunTestcaseAudit {
    pub run_id: String,
    pub organization_id: String,
    pub testcase_id: String,
    pub testcase_title: String,
    pub environment: Environment,

    /// Aggregated status: FAILED if any child failed, PASSED otherwise.
    pub status: ExecutionStatus,

    /// Ordered child results, one per workitem id in the definition.
    pub workitem_results: Vec<WorkitemRunResult>,

    pub actor: String,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

/// Immutable record of one testsuite execution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunTestsuiteAudit {
    pub run_id: String,
    pub organization_id: String,
    pub testsuite_id: String,
    pub testsuite_title: String,
    pub environment: Environment,

    /// Aggregated status: FAILED if any child failed, PASSED otherwise.
    pub status: ExecutionStatus,

    /// Ordered child audits, one per testcase id in the definition.
    pub testcase_results: Vec<RunTestcaseAudit>,

    pub actor: String,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}
