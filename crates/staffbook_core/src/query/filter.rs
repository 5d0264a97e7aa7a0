//! Search and filter evaluation.
//!
//! # Invariants
//! - Search text matches first name, last name, email or position
//!   case-insensitively, or phone as a plain substring.
//! - Department and status filters are exact matches combined with AND.
//! - Empty search text and `None` filters impose no constraint.

use crate::model::employee::{Department, Employee, EmploymentStatus};

/// Filter inputs for one view derivation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmployeeFilter {
    /// Free-text search; empty matches everything.
    pub search_text: String,
    pub department: Option<Department>,
    pub status: Option<EmploymentStatus>,
}

impl EmployeeFilter {
    /// Creates a search-only filter.
    pub fn search(text: impl Into<String>) -> Self {
        Self {
            search_text: text.into(),
            ..Self::default()
        }
    }

    pub fn with_department(mut self, department: Department) -> Self {
        self.department = Some(department);
        self
    }

    pub fn with_status(mut self, status: EmploymentStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Returns whether this filter would keep every record.
    pub fn is_unconstrained(&self) -> bool {
        self.search_text.is_empty() && self.department.is_none() && self.status.is_none()
    }

    /// Evaluates this filter against one record.
    pub fn matches(&self, employee: &Employee) -> bool {
        self.matches_lowered(employee, &self.search_text.to_lowercase())
    }

    fn matches_lowered(&self, employee: &Employee, needle: &str) -> bool {
        matches_search(employee, needle)
            && self
                .department
                .map_or(true, |department| employee.department == department)
            && self.status.map_or(true, |status| employee.status == status)
    }
}

/// Returns records matching `filter`, in collection order.
pub fn filter_employees<'a>(employees: &'a [Employee], filter: &EmployeeFilter) -> Vec<&'a Employee> {
    let needle = filter.search_text.to_lowercase();
    employees
        .iter()
        .filter(|employee| filter.matches_lowered(employee, &needle))
        .collect()
}

// `needle` is already lowercased; phone has no letters so it is compared raw.
fn matches_search(employee: &Employee, needle: &str) -> bool {
    employee.first_name.to_lowercase().contains(needle)
        || employee.last_name.to_lowercase().contains(needle)
        || employee.email.to_lowercase().contains(needle)
        || employee.position.to_lowercase().contains(needle)
        || employee.phone.contains(needle)
}
