//! Comma-separated export rendering.
//!
//! # Invariants
//! - First line is always `EXPORT_HEADER`; one line per record follows in
//!   collection order; lines are joined with `\n` without a trailing newline.
//! - Field values are written verbatim. Embedded commas, quotes or newlines
//!   are NOT escaped, so such values shift or split columns on re-import.

use crate::model::employee::Employee;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Header columns of the export file.
pub const EXPORT_HEADER: [&str; 10] = [
    "ID",
    "First Name",
    "Last Name",
    "Email",
    "Phone",
    "Position",
    "Department",
    "Salary",
    "Hire Date",
    "Status",
];

const FIELD_SEPARATOR: &str = ",";
const LINE_SEPARATOR: &str = "\n";

/// Export-specific failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportError {
    /// Nothing to export; no output is produced.
    EmptyCollection,
}

impl Display for ExportError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyCollection => write!(f, "no employees to export"),
        }
    }
}

impl Error for ExportError {}

/// Renders the full export document.
pub fn export_delimited(employees: &[Employee]) -> Result<String, ExportError> {
    if employees.is_empty() {
        return Err(ExportError::EmptyCollection);
    }

    let mut lines = Vec::with_capacity(employees.len() + 1);
    lines.push(EXPORT_HEADER.join(FIELD_SEPARATOR));
    lines.extend(employees.iter().map(render_row));
    Ok(lines.join(LINE_SEPARATOR))
}

/// Renders one record as an unescaped row.
pub fn render_row(employee: &Employee) -> String {
    [
        employee.id.to_string(),
        employee.first_name.clone(),
        employee.last_name.clone(),
        employee.email.clone(),
        employee.phone.clone(),
        employee.position.clone(),
        employee.department.to_string(),
        employee.salary.to_string(),
        employee.hire_date.format("%Y-%m-%d").to_string(),
        employee.status.to_string(),
    ]
    .join(FIELD_SEPARATOR)
}
