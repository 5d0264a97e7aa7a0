#![allow(dead_code)]

use chrono::NaiveDate;
use staffbook_core::{
    Department, EmployeeInput, EmploymentStatus, KeyValueStore, MemoryKeyValueStore, StorageError,
    StorageResult,
};
use std::cell::Cell;

/// In-memory backend whose writes can be switched to fail.
#[derive(Default)]
pub struct FlakyStore {
    inner: MemoryKeyValueStore,
    fail_writes: Cell<bool>,
}

impl FlakyStore {
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.set(fail);
    }
}

impl KeyValueStore for FlakyStore {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        self.inner.get(key)
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        if self.fail_writes.get() {
            return Err(StorageError::MissingRequiredTable("kv_entries"));
        }
        self.inner.set(key, value)
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        self.inner.remove(key)
    }
}

pub fn input(first_name: &str, last_name: &str, email: &str) -> EmployeeInput {
    EmployeeInput {
        first_name: first_name.to_string(),
        last_name: last_name.to_string(),
        email: email.to_string(),
        phone: "+1 (555) 123-4567".to_string(),
        position: "Software Engineer".to_string(),
        department: Department::Engineering,
        salary: 95000.0,
        hire_date: NaiveDate::from_ymd_opt(2022, 3, 14).unwrap(),
        status: EmploymentStatus::Active,
    }
}

pub fn input_in(
    first_name: &str,
    last_name: &str,
    email: &str,
    department: Department,
    status: EmploymentStatus,
) -> EmployeeInput {
    EmployeeInput {
        department,
        status,
        ..input(first_name, last_name, email)
    }
}
