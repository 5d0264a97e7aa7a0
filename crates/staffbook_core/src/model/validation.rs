//! Candidate record validation rules.
//!
//! # Responsibility
//! - Own the email/phone patterns and the salary/required-field rules.
//! - Check candidates against the existing collection for email uniqueness.
//!
//! # Invariants
//! - Checks run in a fixed order and the first failure wins:
//!   duplicate email, email pattern, phone pattern, salary, required fields.
//! - Email uniqueness is case-insensitive and skips `exclude_id`.
//! - `\s` in both patterns is Unicode `White_Space`; U+FEFF is not part of
//!   it, so a byte-order mark inside a phone number is rejected.

use crate::model::employee::{Employee, EmployeeId, EmployeeInput};
use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter};

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"));
static PHONE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9\s\-+()]+$").expect("valid phone regex"));

/// Rejection reason for a candidate record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Another record already uses this email (case-insensitive).
    DuplicateEmail,
    /// Email does not look like `local@domain.tld`.
    InvalidEmail,
    /// Phone contains characters other than digits, spaces, `+`, `-`, `(`, `)`.
    InvalidPhone,
    /// Salary is negative or not a finite number.
    NegativeSalary,
    /// A required text field is blank after trimming.
    MissingField(&'static str),
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DuplicateEmail => write!(f, "an employee with this email already exists"),
            Self::InvalidEmail => write!(f, "please enter a valid email address"),
            Self::InvalidPhone => write!(f, "please enter a valid phone number"),
            Self::NegativeSalary => write!(f, "salary cannot be negative"),
            Self::MissingField(field) => write!(f, "required field `{field}` is empty"),
        }
    }
}

impl Error for ValidationError {}

/// Returns whether `email` matches the accepted address shape.
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

/// Returns whether `phone` only uses accepted phone characters.
pub fn is_valid_phone(phone: &str) -> bool {
    PHONE_RE.is_match(phone)
}

/// Validates `candidate` against `existing`, skipping `exclude_id` for the
/// uniqueness check.
pub fn validate_candidate(
    candidate: &EmployeeInput,
    existing: &[Employee],
    exclude_id: Option<EmployeeId>,
) -> Result<(), ValidationError> {
    let duplicate = existing
        .iter()
        .any(|employee| Some(employee.id) != exclude_id && employee.has_email(&candidate.email));
    if duplicate {
        return Err(ValidationError::DuplicateEmail);
    }

    if !is_valid_email(&candidate.email) {
        return Err(ValidationError::InvalidEmail);
    }

    if !is_valid_phone(&candidate.phone) {
        return Err(ValidationError::InvalidPhone);
    }

    if !candidate.salary.is_finite() || candidate.salary < 0.0 {
        return Err(ValidationError::NegativeSalary);
    }

    let required = [
        ("firstName", candidate.first_name.as_str()),
        ("lastName", candidate.last_name.as_str()),
        ("position", candidate.position.as_str()),
    ];
    for (field, value) in required {
        if value.trim().is_empty() {
            return Err(ValidationError::MissingField(field));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{is_valid_email, is_valid_phone, validate_candidate, ValidationError};
    use crate::model::employee::{Department, Employee, EmployeeInput, EmploymentStatus};
    use chrono::{NaiveDate, Utc};

    fn input(email: &str) -> EmployeeInput {
        EmployeeInput {
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            email: email.to_string(),
            phone: "555-0100".to_string(),
            position: "Analyst".to_string(),
            department: Department::Engineering,
            salary: 1000.0,
            hire_date: NaiveDate::from_ymd_opt(2020, 1, 2).expect("valid date"),
            status: EmploymentStatus::Active,
        }
    }

    #[test]
    fn email_pattern_matches_basic_addresses() {
        assert!(is_valid_email("a@b.co"));
        assert!(!is_valid_email("bad-email"));
        assert!(!is_valid_email("a b@c.de"));
        assert!(!is_valid_email("a@bco"));
    }

    #[test]
    fn phone_pattern_accepts_punctuation_only() {
        assert!(is_valid_phone("+1 (555) 123-4567"));
        assert!(!is_valid_phone("call me"));
        assert!(!is_valid_phone(""));
        assert!(is_valid_phone("555\u{00a0}0100"));
        assert!(!is_valid_phone("555\u{feff}0100"));
    }

    #[test]
    fn duplicate_check_runs_before_pattern_checks() {
        let existing = vec![Employee::new(1, input("Bad-Email"), Utc::now())];
        let err = validate_candidate(&input("bad-email"), &existing, None)
            .expect_err("duplicate should win");
        assert_eq!(err, ValidationError::DuplicateEmail);
    }

    #[test]
    fn excluded_id_does_not_conflict_with_itself() {
        let existing = vec![Employee::new(7, input("a@b.co"), Utc::now())];
        validate_candidate(&input("A@B.CO"), &existing, Some(7)).expect("self email allowed");
    }

    #[test]
    fn salary_rejects_negative_and_nan_but_accepts_zero() {
        let mut candidate = input("a@b.co");
        candidate.salary = -1.0;
        assert_eq!(
            validate_candidate(&candidate, &[], None),
            Err(ValidationError::NegativeSalary)
        );
        candidate.salary = f64::NAN;
        assert_eq!(
            validate_candidate(&candidate, &[], None),
            Err(ValidationError::NegativeSalary)
        );
        candidate.salary = 0.0;
        assert_eq!(validate_candidate(&candidate, &[], None), Ok(()));
    }

    #[test]
    fn blank_required_field_is_reported_after_pattern_checks() {
        let mut candidate = input("a@b.co");
        candidate.last_name = "   ".to_string();
        assert_eq!(
            validate_candidate(&candidate, &[], None),
            Err(ValidationError::MissingField("lastName"))
        );

        candidate.phone = "nope".to_string();
        assert_eq!(
            validate_candidate(&candidate, &[], None),
            Err(ValidationError::InvalidPhone)
        );
    }
}
