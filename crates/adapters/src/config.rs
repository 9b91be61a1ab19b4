//! Adapter configuration types.
//!
//! A workitem carries exactly one of these configurations, selected by its
//! [`WorkitemKind`] tag. The configs are stored documents, so field names and
//! enum spellings match the persisted wire format (UPPERCASE tags).

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Workitem type tag, selecting the adapter that executes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum WorkitemKind {
    Rest,
    Sql,
    Mongo,
}

impl std::fmt::Display for WorkitemKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WorkitemKind::Rest => write!(f, "REST"),
            WorkitemKind::Sql => write!(f, "SQL"),
            WorkitemKind::Mongo => write!(f, "MONGO"),
        }
    }
}

/// HTTP method.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
#[allow(clippy::upper_case_acronyms)] // HTTP methods are conventionally uppercase
pub enum HttpMethod {
    #[default]
    GET,
    POST,
    PUT,
    PATCH,
    DELETE,
}

impl From<HttpMethod> for reqwest::Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::GET => reqwest::Method::GET,
            HttpMethod::POST => reqwest::Method::POST,
            HttpMethod::PUT => reqwest::Method::PUT,
            HttpMethod::PATCH => reqwest::Method::PATCH,
            HttpMethod::DELETE => reqwest::Method::DELETE,
        }
    }
}

impl std::fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HttpMethod::GET => write!(f, "GET"),
            HttpMethod::POST => write!(f, "POST"),
            HttpMethod::PUT => write!(f, "PUT"),
            HttpMethod::PATCH => write!(f, "PATCH"),
            HttpMethod::DELETE => write!(f, "DELETE"),
        }
    }
}

/// REST adapter configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RestConfig {
    /// URL to request.
    pub url: String,

    /// HTTP method (default: GET).
    #[serde(default)]
    pub method: HttpMethod,

    /// Request headers.
    #[serde(default)]
    pub headers: HashMap<String, String>,

    /// Query parameters.
    #[serde(default)]
    pub query_params: HashMap<String, String>,

    /// Raw request body.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
}

/// SQL statement kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SqlStatementKind {
    Select,
    Insert,
    Update,
    Delete,
}

impl std::fmt::Display for SqlStatementKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SqlStatementKind::Select => write!(f, "SELECT"),
            SqlStatementKind::Insert => write!(f, "INSERT"),
            SqlStatementKind::Update => write!(f, "UPDATE"),
            SqlStatementKind::Delete => write!(f, "DELETE"),
        }
    }
}

/// Relational adapter configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SqlConfig {
    /// Statement text.
    pub query: String,

    /// Statement kind.
    pub statement: SqlStatementKind,

    /// Target database name.
    #[serde(default = "default_database")]
    pub database: String,
}

fn default_database() -> String {
    "default".to_string()
}

/// Document-store operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum MongoOperation {
    Find,
    Insert,
    Update,
    Delete,
    Aggregate,
}

impl std::fmt::Display for MongoOperation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MongoOperation::Find => write!(f, "FIND"),
            MongoOperation::Insert => write!(f, "INSERT"),
            MongoOperation::Update => write!(f, "UPDATE"),
            MongoOperation::Delete => write!(f, "DELETE"),
            MongoOperation::Aggregate => write!(f, "AGGREGATE"),
        }
    }
}

/// Document-store adapter configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MongoConfig {
    /// Target collection name.
    pub collection: String,

    /// Operation to execute.
    pub operation: MongoOperation,

    /// JSON-encoded query/filter string.
    #[serde(default = "default_query")]
    pub query: String,

    /// JSON-encoded document string (for INSERT).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub document: Option<String>,

    /// Target database name.
    #[serde(default = "default_database")]
    pub database: String,
}

fn default_query() -> String {
    "{}".to_string()
}
