//! Employee domain model.
//!
//! # Responsibility
//! - Define the canonical employee record and its editable input shape.
//! - Provide wire labels and parsing for department/status enumerations.
//!
//! # Invariants
//! - `id` and `created_at` never change after creation.
//! - `updated_at` is `None` until the first successful update.
//! - Wire field names are camelCase; dates are `YYYY-MM-DD`.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Store-assigned integer identity.
///
/// Derived from `max(existing ids) + 1`, so it is not a persisted counter.
pub type EmployeeId = u64;

/// Wire label for the engineering department.
pub const DEPARTMENT_ENGINEERING: &str = "Engineering";
/// Wire label for the marketing department.
pub const DEPARTMENT_MARKETING: &str = "Marketing";
/// Wire label for the sales department.
pub const DEPARTMENT_SALES: &str = "Sales";
/// Wire label for the human resources department.
pub const DEPARTMENT_HR: &str = "HR";
/// Wire label for the finance department.
pub const DEPARTMENT_FINANCE: &str = "Finance";
/// Wire label for the operations department.
pub const DEPARTMENT_OPERATIONS: &str = "Operations";

/// Fixed department categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Department {
    Engineering,
    Marketing,
    Sales,
    #[serde(rename = "HR")]
    Hr,
    Finance,
    Operations,
}

impl Department {
    /// Every department in display order.
    pub const ALL: [Department; 6] = [
        Self::Engineering,
        Self::Marketing,
        Self::Sales,
        Self::Hr,
        Self::Finance,
        Self::Operations,
    ];

    /// Stable wire label, identical to the serialized form.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Engineering => DEPARTMENT_ENGINEERING,
            Self::Marketing => DEPARTMENT_MARKETING,
            Self::Sales => DEPARTMENT_SALES,
            Self::Hr => DEPARTMENT_HR,
            Self::Finance => DEPARTMENT_FINANCE,
            Self::Operations => DEPARTMENT_OPERATIONS,
        }
    }

    /// Parses an exact wire label (surrounding whitespace ignored).
    pub fn parse(value: &str) -> Result<Self, ParseEnumError> {
        let normalized = value.trim();
        if normalized.is_empty() {
            return Err(ParseEnumError::Empty("department"));
        }
        Self::ALL
            .into_iter()
            .find(|department| department.as_str() == normalized)
            .ok_or_else(|| ParseEnumError::Unsupported {
                kind: "department",
                value: normalized.to_string(),
            })
    }
}

impl Display for Department {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

/// Employment lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum EmploymentStatus {
    Active,
    #[serde(rename = "On Leave")]
    OnLeave,
    Terminated,
}

impl EmploymentStatus {
    /// Every status in display order.
    pub const ALL: [EmploymentStatus; 3] = [Self::Active, Self::OnLeave, Self::Terminated];

    /// Stable wire label, identical to the serialized form.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::OnLeave => "On Leave",
            Self::Terminated => "Terminated",
        }
    }

    /// Parses an exact wire label (surrounding whitespace ignored).
    pub fn parse(value: &str) -> Result<Self, ParseEnumError> {
        let normalized = value.trim();
        if normalized.is_empty() {
            return Err(ParseEnumError::Empty("status"));
        }
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == normalized)
            .ok_or_else(|| ParseEnumError::Unsupported {
                kind: "status",
                value: normalized.to_string(),
            })
    }
}

impl Display for EmploymentStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

/// Parse errors for enumerated employee fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseEnumError {
    Empty(&'static str),
    Unsupported { kind: &'static str, value: String },
}

impl Display for ParseEnumError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty(kind) => write!(f, "{kind} value must not be empty"),
            Self::Unsupported { kind, value } => write!(f, "unsupported {kind}: `{value}`"),
        }
    }
}

impl Error for ParseEnumError {}

/// Editable employee fields as submitted by a caller.
///
/// Used for both add and update; update is a full overwrite of these fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeInput {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub position: String,
    pub department: Department,
    pub salary: f64,
    pub hire_date: NaiveDate,
    pub status: EmploymentStatus,
}

impl EmployeeInput {
    /// Returns a copy with free-text fields trimmed.
    pub fn normalized(&self) -> Self {
        Self {
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
            email: self.email.trim().to_string(),
            phone: self.phone.trim().to_string(),
            position: self.position.trim().to_string(),
            ..self.clone()
        }
    }
}

/// Canonical persisted employee record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub id: EmployeeId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub position: String,
    pub department: Department,
    pub salary: f64,
    pub hire_date: NaiveDate,
    pub status: EmploymentStatus,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Employee {
    /// Builds a new record from caller input.
    pub fn new(id: EmployeeId, input: EmployeeInput, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            first_name: input.first_name,
            last_name: input.last_name,
            email: input.email,
            phone: input.phone,
            position: input.position,
            department: input.department,
            salary: input.salary,
            hire_date: input.hire_date,
            status: input.status,
            created_at,
            updated_at: None,
        }
    }

    /// Overwrites every editable field and stamps `updated_at`.
    ///
    /// `id` and `created_at` are left untouched.
    pub fn apply(&mut self, input: EmployeeInput, updated_at: DateTime<Utc>) {
        self.first_name = input.first_name;
        self.last_name = input.last_name;
        self.email = input.email;
        self.phone = input.phone;
        self.position = input.position;
        self.department = input.department;
        self.salary = input.salary;
        self.hire_date = input.hire_date;
        self.status = input.status;
        self.updated_at = Some(updated_at);
    }

    /// Editable fields, e.g. to prefill an edit form.
    pub fn to_input(&self) -> EmployeeInput {
        EmployeeInput {
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
            position: self.position.clone(),
            department: self.department,
            salary: self.salary,
            hire_date: self.hire_date,
            status: self.status,
        }
    }

    /// `"First Last"` display name.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Case-insensitive email comparison used for uniqueness.
    pub fn has_email(&self, email: &str) -> bool {
        self.email.to_lowercase() == email.to_lowercase()
    }
}
