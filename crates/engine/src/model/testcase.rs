//! Testcase definition model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::common::LastRun;

/// An ordered composition of workitems.
///
/// `workitem_ids` may contain duplicates, and referential integrity is not
/// enforced at write time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Testcase {
    pub testcase_id: String,
    pub organization_id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,

    /// Workitems to run, in order.
    #[serde(default)]
    pub workitem_ids: Vec<String>,

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

impl Testcase {
    /// Create a bare definition with the given identity.
    pub fn new(
        testcase_id: impl Into<String>,
        organization_id: impl Into<String>,
        title: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            testcase_id: testcase_id.into(),
            organization_id: organization_id.into(),
            title: title.into(),
            description: None,
            tag: None,
            workitem_ids: Vec::new(),
            is_deleted: false,
            created_at: now,
            updated_at: now,
            created_by: None,
            updated_by: None,
            last_run: None,
        }
    }

    /// Set the ordered workitem id sequence.
    pub fn with_workitems(mut self, workitem_ids: Vec<String>) -> Self {
        self.workitem_ids = workitem_ids;
        self
    }
}
