//! Delimited-text export of the employee collection.
//!
//! # See also
//! - `RecordStore::export_delimited`

pub mod csv;
