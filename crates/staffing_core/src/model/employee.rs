//! Employee domain model and input normalization.
//!
//! # Responsibility
//! - Define the persisted employee record and its process binding.
//! - Normalize and validate add/edit input before it reaches storage.
//!
//! # Invariants
//! - `email` is stored trimmed and lowercased.
//! - `assigned_process` is a soft reference by process name. It may outlive
//!   the process it names after a catalog replacement.

use crate::model::skill::{Communication, Potential};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable employee identifier.
pub type EmployeeId = Uuid;

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^@\s]+@[^@\s]+$").expect("valid email regex"));

/// Persisted employee record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    pub id: EmployeeId,
    pub name: String,
    pub email: String,
    pub potential: Potential,
    pub communication: Communication,
    /// `None` means the employee is unassigned and holds no vacancy slot.
    pub assigned_process: Option<String>,
    /// Unix epoch milliseconds of record creation.
    pub assigned_at: i64,
}

/// Input for creating or editing an employee.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmployeeDraft {
    pub name: String,
    pub email: String,
    pub potential: Potential,
    pub communication: Communication,
    /// Requested process binding. `None` requests the unassigned state.
    pub process_name: Option<String>,
}

/// Field-level input validation failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmployeeValidationError {
    BlankName,
    BlankEmail,
    MalformedEmail(String),
}

impl Display for EmployeeValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankName => write!(f, "employee name must not be blank"),
            Self::BlankEmail => write!(f, "employee email must not be blank"),
            Self::MalformedEmail(email) => write!(f, "employee email `{email}` is malformed"),
        }
    }
}

impl Error for EmployeeValidationError {}

impl EmployeeDraft {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        potential: Potential,
        communication: Communication,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            potential,
            communication,
            process_name: None,
        }
    }

    /// Requests a binding to `process_name`.
    pub fn with_process(mut self, process_name: impl Into<String>) -> Self {
        self.process_name = Some(process_name.into());
        self
    }

    /// Returns a canonical copy: trimmed name, normalized email, and a blank
    /// process name collapsed to `None`.
    pub fn normalized(&self) -> Result<Self, EmployeeValidationError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(EmployeeValidationError::BlankName);
        }

        let email = normalize_email(&self.email);
        if email.is_empty() {
            return Err(EmployeeValidationError::BlankEmail);
        }
        if !EMAIL_RE.is_match(&email) {
            return Err(EmployeeValidationError::MalformedEmail(email));
        }

        let process_name = self
            .process_name
            .as_deref()
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(str::to_string);

        Ok(Self {
            name: name.to_string(),
            email,
            potential: self.potential,
            communication: self.communication,
            process_name,
        })
    }
}

/// Canonical email form used for storage and uniqueness checks.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
