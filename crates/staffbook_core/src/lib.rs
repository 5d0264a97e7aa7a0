//! Core domain logic for Staffbook.
//! This crate is the single source of truth for employee record invariants.

pub mod config;
pub mod db;
pub mod export;
pub mod logging;
pub mod model;
pub mod query;
pub mod service;
pub mod storage;

pub use config::StoreConfig;
pub use export::csv::{ExportError, EXPORT_HEADER};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::employee::{
    Department, Employee, EmployeeId, EmployeeInput, EmploymentStatus, ParseEnumError,
};
pub use model::validation::ValidationError;
pub use query::filter::{filter_employees, EmployeeFilter};
pub use service::record_store::{
    EditContext, RecordStore, StoreError, StoreResult, StoreStats,
};
pub use storage::{
    KeyValueStore, MemoryKeyValueStore, SqliteKeyValueStore, StorageError, StorageResult,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
