//! Testsuite definition model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::common::LastRun;

/// An ordered composition of testcases.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Testsuite {
    pub testsuite_id: String,
    pub organization_id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Testcases to run, in order.
    #[serde(default)]
    pub testcase_ids: Vec<String>,

    #[serde(default)]
    pub is_deleted: bool,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_by: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_run: Option<LastRun>,
}

impl Testsuite {
    /// Create a bare definition with the given identity.
    pub fn new(
        testsuite_id: impl Into<String>,
        organization_id: impl Into<String>,
        title: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            testsuite_id: testsuite_id.into(),
            organization_id: organization_id.into(),
            title: title.into(),
            description: None,
            testcase_ids: Vec::new(),
            is_deleted: false,
            created_at: now,
            updated_at: now,
            created_by: None,
            updated_by: None,
            last_run: None,
        }
    }

    /// Set the ordered testcase id sequence.
    pub fn with_testcases(mut self, testcase_ids: Vec<String>) -> Self {
        self.testcase_ids = testcase_ids;
        self
    }
}
