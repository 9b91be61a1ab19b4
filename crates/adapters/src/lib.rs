//! Testdeck Adapter Library
//!
//! Protocol adapters for workitem execution.
//!
//! This crate provides:
//! - The shared execution vocabulary: status, outcome and log entries
//! - Built-in adapters: rest, sql (simulated), mongo
//! - Closed dispatch over the workitem type tag via [`AdapterSet`]
//! - The tenant document store seam with an in-memory implementation

pub mod config;
pub mod dispatch;
pub mod error;
pub mod log;
pub mod mongo;
pub mod rest;
pub mod result;
pub mod sql;
pub mod store;

pub use config::{HttpMethod, MongoConfig, MongoOperation, RestConfig, SqlConfig, SqlStatementKind, WorkitemKind};
pub use dispatch::{AdapterSet, AdapterSpec};
pub use error::AdapterError;
pub use log::{ExecutionLog, LogKind};
pub use result::{AdapterOutcome, ExecutionStatus};
pub use store::{DocumentStore, MemoryDocumentStore};
