//! Employee domain model.
//!
//! # Responsibility
//! - Define the canonical employee record used by store, query and export.
//! - Own field-level validation rules.
//!
//! # Invariants
//! - Every record is identified by a store-assigned integer `EmployeeId`.
//! - Deletion is a hard removal from the collection.

pub mod employee;
pub mod validation;
