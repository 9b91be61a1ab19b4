//! Workitem definition model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use testdeck_adapters::{AdapterSpec, MongoConfig, RestConfig, SqlConfig, WorkitemKind};

use crate::model::common::LastRun;

/// Version tag written into every config snapshot, so audits written under
/// older definition schemas remain parseable after the schema evolves.
pub const SNAPSHOT_VERSION: u32 = 1;

/// The smallest executable unit: one external call definition.
///
/// Exactly one of the protocol configs is expected to be populated,
/// matching `kind`; the executor treats a mismatch as an unsupported-type
/// failure rather than rejecting the document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Workitem {
    pub workitem_id: String,
    pub organization_id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Type tag selecting the protocol adapter.
    pub kind: WorkitemKind,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rest_config: Option<RestConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sql_config: Option<SqlConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mongo_config: Option<MongoConfig>,

    /// Expected-response snapshot, captured but never asserted against.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected_response: Option<Value>,

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

impl Workitem {
    /// Create a bare definition with the given identity and type tag.
    pub fn new(
        workitem_id: impl Into<String>,
        organization_id: impl Into<String>,
        title: impl Into<String>,
        kind: WorkitemKind,
    ) -> Self {
        let now = Utc::now();
        Self {
            workitem_id: workitem_id.into(),
            organization_id: organization_id.into(),
            title: title.into(),
            description: None,
            kind,
            rest_config: None,
            sql_config: None,
            mongo_config: None,
            expected_response: None,
            is_deleted: false,
            created_at: now,
            updated_at: now,
            created_by: None,
            updated_by: None,
            last_run: None,
        }
    }

    /// Attach a REST configuration.
    pub fn with_rest_config(mut self, config: RestConfig) -> Self {
        self.rest_config = Some(config);
        self
    }

    /// Attach a SQL configuration.
    pub fn with_sql_config(mut self, config: SqlConfig) -> Self {
        self.sql_config = Some(config);
        self
    }

    /// Attach a document-store configuration.
    pub fn with_mongo_config(mut self, config: MongoConfig) -> Self {
        self.mongo_config = Some(config);
        self
    }

    /// Pair the type tag with its matching config, if present.
    pub fn adapter_spec(&self) -> Option<AdapterSpec<'_>> {
        match self.kind {
            WorkitemKind::Rest => self.rest_config.as_ref().map(AdapterSpec::Rest),
            WorkitemKind::Sql => self.sql_config.as_ref().map(AdapterSpec::Sql),
            WorkitemKind::Mongo => self.mongo_config.as_ref().map(AdapterSpec::Mongo),
        }
    }

    /// Deep, schema-stable copy of the definition for audit embedding.
    pub fn snapshot(&self) -> Value {
        serde_json::json!({
            "snapshot_version": SNAPSHOT_VERSION,
            "workitem": serde_json::to_value(self).unwrap_or(Value::Null),
        })
    }
}
