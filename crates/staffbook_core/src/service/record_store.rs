//! Employee record store.
//!
//! # Responsibility
//! - Own the in-memory employee collection and its persistence round-trip.
//! - Assign identities, validate candidates and apply mutations.
//! - Track the edit context and the two-phase delete marker.
//!
//! # Invariants
//! - Every successful mutation is persisted before it becomes visible; a
//!   failed write leaves the in-memory collection untouched.
//! - `next_id()` is recomputed from the collection (max + 1, or 1 when
//!   empty). Deleting the highest id lets that id be issued again. Ids never
//!   wrap; a collection holding `u64::MAX` cannot grow.
//! - Loading keeps every record that decodes. When any part of the blob is
//!   unreadable the raw blob is copied to the backup key first.
//! - Collection order is insertion order.
//! - The store never performs user-facing I/O; callers surface errors.

use crate::config::StoreConfig;
use crate::export::csv::{export_delimited, ExportError};
use crate::model::employee::{Employee, EmployeeId, EmployeeInput};
use crate::model::validation::{validate_candidate, ValidationError};
use crate::query::filter::{filter_employees, EmployeeFilter};
use crate::storage::{KeyValueStore, StorageError};
use chrono::{DateTime, Utc};
use log::{debug, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type StoreResult<T> = Result<T, StoreError>;

/// Record store error.
#[derive(Debug)]
pub enum StoreError {
    /// Candidate data was rejected; nothing was changed.
    Validation(ValidationError),
    /// Target record does not exist.
    NotFound(EmployeeId),
    /// Export requested on an empty collection.
    EmptyCollection,
    /// The highest stored id leaves no room for another one.
    IdsExhausted,
    /// Key-value backend failure.
    Storage(StorageError),
    /// Collection could not be encoded for persistence.
    Encode(serde_json::Error),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "employee not found: {id}"),
            Self::EmptyCollection => write!(f, "no employees to export"),
            Self::IdsExhausted => write!(f, "no employee ids left to assign"),
            Self::Storage(err) => write!(f, "{err}"),
            Self::Encode(err) => write!(f, "failed to encode employees: {err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Storage(err) => Some(err),
            Self::Encode(err) => Some(err),
            Self::NotFound(_) | Self::EmptyCollection | Self::IdsExhausted => None,
        }
    }
}

impl From<ValidationError> for StoreError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<StorageError> for StoreError {
    fn from(value: StorageError) -> Self {
        Self::Storage(value)
    }
}

impl From<ExportError> for StoreError {
    fn from(value: ExportError) -> Self {
        match value {
            ExportError::EmptyCollection => Self::EmptyCollection,
        }
    }
}

/// Whether a form is currently editing an existing record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EditContext {
    #[default]
    Idle,
    Editing(EmployeeId),
}

/// Summary counters for a header banner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreStats {
    pub total_employees: usize,
}

/// Employee collection bound to one key-value backend.
pub struct RecordStore<S: KeyValueStore> {
    storage: S,
    config: StoreConfig,
    employees: Vec<Employee>,
    edit_context: EditContext,
    pending_delete: Option<EmployeeId>,
}

impl<S: KeyValueStore> RecordStore<S> {
    /// Opens a store with the default configuration.
    pub fn open(storage: S) -> StoreResult<Self> {
        Self::open_with_config(storage, StoreConfig::default())
    }

    /// Opens a store and loads the persisted collection.
    ///
    /// A missing or unreadable blob yields an empty collection.
    pub fn open_with_config(storage: S, config: StoreConfig) -> StoreResult<Self> {
        let mut store = Self {
            storage,
            config,
            employees: Vec::new(),
            edit_context: EditContext::Idle,
            pending_delete: None,
        };
        store.load()?;
        Ok(store)
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Returns the backend, e.g. to hand it to a fresh store.
    pub fn into_storage(self) -> S {
        self.storage
    }

    /// Next identity: 1 when empty, otherwise max id + 1.
    pub fn next_id(&self) -> StoreResult<EmployeeId> {
        match self.employees.iter().map(|employee| employee.id).max() {
            None => Ok(1),
            Some(max) => max.checked_add(1).ok_or(StoreError::IdsExhausted),
        }
    }

    /// Validates a candidate, skipping `exclude_id` for email uniqueness.
    ///
    /// Order: duplicate email, email pattern, phone pattern, salary,
    /// required fields. The first failure is returned.
    pub fn validate(
        &self,
        candidate: &EmployeeInput,
        exclude_id: Option<EmployeeId>,
    ) -> Result<(), ValidationError> {
        validate_candidate(candidate, &self.employees, exclude_id)
    }

    /// Adds a new record and persists the collection.
    pub fn add(&mut self, input: EmployeeInput) -> StoreResult<Employee> {
        let input = input.normalized();
        if let Err(err) = self.validate(&input, None) {
            debug!("event=employee_add module=store status=rejected reason={err:?}");
            return Err(err.into());
        }

        let employee = Employee::new(self.next_id()?, input, Utc::now());
        let mut next = self.employees.clone();
        next.push(employee.clone());
        self.commit(next)?;

        info!(
            "event=employee_add module=store status=ok id={} count={}",
            employee.id,
            self.employees.len()
        );
        Ok(employee)
    }

    /// Overwrites every editable field of record `id` and persists.
    ///
    /// Fields are replaced wholesale; only `id` and `created_at` survive.
    pub fn update(&mut self, id: EmployeeId, input: EmployeeInput) -> StoreResult<Employee> {
        let index = self.position_of(id).ok_or(StoreError::NotFound(id))?;

        let input = input.normalized();
        if let Err(err) = self.validate(&input, Some(id)) {
            debug!("event=employee_update module=store status=rejected id={id} reason={err:?}");
            return Err(err.into());
        }

        let mut next = self.employees.clone();
        let record = &mut next[index];
        let stamped_at = monotonic_stamp(record, Utc::now());
        record.apply(input, stamped_at);
        let updated = record.clone();
        self.commit(next)?;

        info!("event=employee_update module=store status=ok id={id}");
        Ok(updated)
    }

    /// Removes record `id` if present and persists.
    ///
    /// Returns whether a record was removed; an absent id is not an error.
    /// Clears the pending-delete marker, and the edit context when it points
    /// at the removed record.
    pub fn delete(&mut self, id: EmployeeId) -> StoreResult<bool> {
        let next: Vec<Employee> = self
            .employees
            .iter()
            .filter(|employee| employee.id != id)
            .cloned()
            .collect();
        let removed = next.len() != self.employees.len();
        self.commit(next)?;

        self.pending_delete = None;
        if self.edit_context == EditContext::Editing(id) {
            self.edit_context = EditContext::Idle;
        }

        info!(
            "event=employee_delete module=store status=ok id={} removed={} count={}",
            id,
            removed,
            self.employees.len()
        );
        Ok(removed)
    }

    /// Enters edit mode for `id` and returns the record to prefill a form.
    pub fn begin_edit(&mut self, id: EmployeeId) -> StoreResult<&Employee> {
        let index = self.position_of(id).ok_or(StoreError::NotFound(id))?;
        self.edit_context = EditContext::Editing(id);
        Ok(&self.employees[index])
    }

    /// Leaves edit mode without touching the collection.
    pub fn cancel_edit(&mut self) {
        self.edit_context = EditContext::Idle;
    }

    pub fn edit_context(&self) -> EditContext {
        self.edit_context
    }

    /// Saves form input: updates the edited record, or adds a new one.
    ///
    /// On success the edit context returns to `Idle`; on failure it is kept
    /// so the caller can correct and resubmit.
    pub fn submit(&mut self, input: EmployeeInput) -> StoreResult<Employee> {
        let saved = match self.edit_context {
            EditContext::Editing(id) => self.update(id, input)?,
            EditContext::Idle => self.add(input)?,
        };
        self.edit_context = EditContext::Idle;
        Ok(saved)
    }

    /// Marks `id` for deletion without changing the collection.
    pub fn request_delete(&mut self, id: EmployeeId) {
        self.pending_delete = Some(id);
    }

    /// Deletes the marked record, if any, and clears the marker.
    ///
    /// Returns whether a record was removed.
    pub fn confirm_delete(&mut self) -> StoreResult<bool> {
        match self.pending_delete {
            Some(id) => self.delete(id),
            None => Ok(false),
        }
    }

    /// Drops the deletion marker.
    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    pub fn pending_delete(&self) -> Option<EmployeeId> {
        self.pending_delete
    }

    /// Full collection in insertion order.
    pub fn list(&self) -> &[Employee] {
        &self.employees
    }

    pub fn get(&self, id: EmployeeId) -> Option<&Employee> {
        self.employees.iter().find(|employee| employee.id == id)
    }

    /// Filtered read-only view, in insertion order.
    pub fn query(&self, filter: &EmployeeFilter) -> Vec<&Employee> {
        filter_employees(&self.employees, filter)
    }

    pub fn len(&self) -> usize {
        self.employees.len()
    }

    pub fn is_empty(&self) -> bool {
        self.employees.is_empty()
    }

    pub fn stats(&self) -> StoreStats {
        StoreStats {
            total_employees: self.employees.len(),
        }
    }

    /// Writes the current collection under the configured key.
    pub fn persist(&self) -> StoreResult<()> {
        write_collection(&self.storage, &self.config.storage_key, &self.employees)
    }

    /// Replaces the in-memory collection with the persisted one.
    ///
    /// Missing key or malformed JSON yields an empty collection; records that
    /// do not decode are skipped. Edit and delete markers are reset.
    pub fn load(&mut self) -> StoreResult<()> {
        self.employees = read_collection(&self.storage, &self.config)?;
        self.edit_context = EditContext::Idle;
        self.pending_delete = None;
        Ok(())
    }

    /// Renders the collection as unescaped comma-separated text.
    pub fn export_delimited(&self) -> StoreResult<String> {
        let document = export_delimited(&self.employees)?;
        info!(
            "event=employee_export module=store status=ok rows={}",
            self.employees.len()
        );
        Ok(document)
    }

    fn position_of(&self, id: EmployeeId) -> Option<usize> {
        self.employees.iter().position(|employee| employee.id == id)
    }

    fn commit(&mut self, next: Vec<Employee>) -> StoreResult<()> {
        write_collection(&self.storage, &self.config.storage_key, &next)?;
        self.employees = next;
        Ok(())
    }
}

fn write_collection<S: KeyValueStore>(
    storage: &S,
    key: &str,
    employees: &[Employee],
) -> StoreResult<()> {
    let blob = serde_json::to_string(employees).map_err(StoreError::Encode)?;
    storage.set(key, &blob).map_err(|err| {
        warn!("event=store_persist module=store status=error key={key} error={err}");
        StoreError::Storage(err)
    })
}

fn read_collection<S: KeyValueStore>(
    storage: &S,
    config: &StoreConfig,
) -> StoreResult<Vec<Employee>> {
    let key = config.storage_key.as_str();
    let Some(blob) = storage.get(key)? else {
        info!("event=store_load module=store status=ok key={key} count=0 source=empty");
        return Ok(Vec::new());
    };

    let records = match serde_json::from_str::<Vec<serde_json::Value>>(&blob) {
        Ok(records) => records,
        Err(err) => {
            warn!(
                "event=store_load module=store status=degraded key={} error_code=corrupt_blob line={} column={}",
                key,
                err.line(),
                err.column()
            );
            preserve_unreadable(storage, config, &blob)?;
            return Ok(Vec::new());
        }
    };

    let total = records.len();
    let mut employees = Vec::with_capacity(total);
    for (index, record) in records.into_iter().enumerate() {
        match serde_json::from_value::<Employee>(record) {
            Ok(employee) => employees.push(employee),
            Err(err) => warn!(
                "event=store_load module=store status=degraded key={key} error_code=unreadable_record index={index} error={err}"
            ),
        }
    }

    let skipped = total - employees.len();
    if skipped > 0 {
        preserve_unreadable(storage, config, &blob)?;
    }
    info!(
        "event=store_load module=store status=ok key={} count={} skipped={}",
        key,
        employees.len(),
        skipped
    );
    Ok(employees)
}

fn preserve_unreadable<S: KeyValueStore>(
    storage: &S,
    config: &StoreConfig,
    blob: &str,
) -> StoreResult<()> {
    let backup_key = config.backup_key();
    storage.set(&backup_key, blob)?;
    info!("event=store_backup module=store status=ok key={backup_key}");
    Ok(())
}

// Keeps `updated_at` non-decreasing even if the wall clock steps back.
fn monotonic_stamp(record: &Employee, now: DateTime<Utc>) -> DateTime<Utc> {
    let floor = record.updated_at.unwrap_or(record.created_at);
    now.max(floor)
}

#[cfg(test)]
mod tests {
    use super::monotonic_stamp;
    use crate::model::employee::{Department, Employee, EmployeeInput, EmploymentStatus};
    use chrono::{Duration, NaiveDate, Utc};

    #[test]
    fn stamp_never_precedes_previous_update() {
        let input = EmployeeInput {
            first_name: "A".to_string(),
            last_name: "B".to_string(),
            email: "a@b.co".to_string(),
            phone: "1".to_string(),
            position: "C".to_string(),
            department: Department::Finance,
            salary: 0.0,
            hire_date: NaiveDate::from_ymd_opt(2024, 2, 29).expect("valid date"),
            status: EmploymentStatus::Active,
        };
        let now = Utc::now();
        let mut record = Employee::new(1, input, now);
        record.updated_at = Some(now + Duration::seconds(30));

        assert_eq!(
            monotonic_stamp(&record, now),
            now + Duration::seconds(30)
        );
        let later = now + Duration::seconds(60);
        assert_eq!(monotonic_stamp(&record, later), later);
    }
}
