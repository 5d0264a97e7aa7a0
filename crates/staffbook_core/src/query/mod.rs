//! Read-only filtered views over the employee collection.
//!
//! # Responsibility
//! - Derive ordered subsequences from search text and exact-match filters.
//!
//! # Invariants
//! - Views never mutate or reorder the source collection.

pub mod filter;
