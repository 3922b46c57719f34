//! Assignment ledger use-case service.
//!
//! # Responsibility
//! - Validate and normalize employee input above the store.
//! - Run the add/edit/delete transitions and report them as tagged results.
//! - Emit metadata-only `ledger_*` logging events.
//!
//! # Invariants
//! - Every transition is all-or-nothing; an `Err` means nothing changed.
//! - Validation failures never reach storage.

use crate::model::employee::{Employee, EmployeeDraft, EmployeeId, EmployeeValidationError};
use crate::repo::assignment_repo::{
    AssignmentError, AssignmentStore, DeletedEmployee, UpdatedEmployee,
};
use log::{error, info, warn};
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Instant;

pub type LedgerResult<T> = Result<T, LedgerError>;

/// Errors from ledger operations. All are recoverable and user-facing.
#[derive(Debug)]
pub enum LedgerError {
    /// Malformed or missing input field.
    Validation(EmployeeValidationError),
    /// Normalized email already belongs to another employee.
    DuplicateEmail(String),
    /// Requested process is not in the catalog.
    ProcessNotFound(String),
    /// Requested process has no free slot.
    NoVacancy(String),
    /// Target employee does not exist.
    NotFound(EmployeeId),
    /// Store-level failure.
    Store(AssignmentError),
}

impl Display for LedgerError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::DuplicateEmail(_) => write!(f, "Email already exists in the database"),
            Self::ProcessNotFound(name) => write!(f, "Process {name} not found"),
            Self::NoVacancy(name) => write!(f, "No vacancy available in {name}"),
            Self::NotFound(_) => write!(f, "Employee not found"),
            Self::Store(err) => write!(f, "Database error: {err}"),
        }
    }
}

impl Error for LedgerError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Store(err) => Some(err),
            _ => None,
        }
    }
}

impl From<EmployeeValidationError> for LedgerError {
    fn from(value: EmployeeValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<AssignmentError> for LedgerError {
    fn from(value: AssignmentError) -> Self {
        match value {
            AssignmentError::DuplicateEmail(email) => Self::DuplicateEmail(email),
            AssignmentError::ProcessNotFound(name) => Self::ProcessNotFound(name),
            AssignmentError::NoVacancy(name) => Self::NoVacancy(name),
            AssignmentError::EmployeeNotFound(id) => Self::NotFound(id),
            other => Self::Store(other),
        }
    }
}

impl LedgerError {
    /// Stable machine-readable code for logs and presentation layers.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation_error",
            Self::DuplicateEmail(_) => "duplicate_email",
            Self::ProcessNotFound(_) => "process_not_found",
            Self::NoVacancy(_) => "no_vacancy",
            Self::NotFound(_) => "not_found",
            Self::Store(_) => "store_error",
        }
    }
}

/// Boolean-plus-reason envelope for presentation layers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActionOutcome {
    pub ok: bool,
    pub employee_id: Option<String>,
    pub message: String,
}

impl ActionOutcome {
    pub fn success(message: impl Into<String>, employee_id: EmployeeId) -> Self {
        Self {
            ok: true,
            employee_id: Some(employee_id.to_string()),
            message: message.into(),
        }
    }

    pub fn failure(err: &LedgerError) -> Self {
        Self {
            ok: false,
            employee_id: None,
            message: err.to_string(),
        }
    }
}

/// Use-case service for vacancy-coupled employee transitions.
pub struct AssignmentLedger<S: AssignmentStore> {
    store: S,
}

impl<S: AssignmentStore> AssignmentLedger<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Creates an employee, optionally bound to `draft.process_name`.
    ///
    /// # Errors
    /// `Validation`, `DuplicateEmail`, `ProcessNotFound`, `NoVacancy`.
    pub fn add_employee(&self, draft: &EmployeeDraft) -> LedgerResult<Employee> {
        let started_at = Instant::now();
        let result = draft
            .normalized()
            .map_err(LedgerError::from)
            .and_then(|draft| self.store.add_employee(&draft).map_err(LedgerError::from));
        log_transition("ledger_add", started_at, &result, |employee| {
            format!(
                "employee_id={} process={}",
                employee.id,
                employee.assigned_process.as_deref().unwrap_or("-")
            )
        });
        result
    }

    /// Creates an employee bound to the best match for its skills, or
    /// unassigned when no process with vacancy matches its potential.
    ///
    /// `draft.process_name` is ignored.
    pub fn add_employee_best_match(&self, draft: &EmployeeDraft) -> LedgerResult<Employee> {
        let started_at = Instant::now();
        let result = draft.normalized().map_err(LedgerError::from).and_then(|draft| {
            self.store
                .add_employee_best_match(&draft)
                .map_err(LedgerError::from)
        });
        log_transition("ledger_auto_assign", started_at, &result, |employee| {
            format!(
                "employee_id={} process={}",
                employee.id,
                employee.assigned_process.as_deref().unwrap_or("-")
            )
        });
        result
    }

    /// Replaces the employee fields and moves its binding when it changed.
    ///
    /// On `ProcessNotFound`/`NoVacancy` for the new process, the old binding
    /// and both vacancies are left exactly as they were.
    pub fn update_employee(
        &self,
        id: EmployeeId,
        draft: &EmployeeDraft,
    ) -> LedgerResult<UpdatedEmployee> {
        let started_at = Instant::now();
        let result = draft.normalized().map_err(LedgerError::from).and_then(|draft| {
            self.store
                .update_employee(id, &draft)
                .map_err(LedgerError::from)
        });
        log_transition("ledger_update", started_at, &result, |updated| {
            format!(
                "employee_id={} from={} to={}",
                updated.employee.id,
                updated.previous_process.as_deref().unwrap_or("-"),
                updated.employee.assigned_process.as_deref().unwrap_or("-")
            )
        });
        result
    }

    /// Removes the employee and returns its slot, if any.
    pub fn delete_employee(&self, id: EmployeeId) -> LedgerResult<DeletedEmployee> {
        let started_at = Instant::now();
        let result = self.store.delete_employee(id).map_err(LedgerError::from);
        log_transition("ledger_delete", started_at, &result, |deleted| {
            format!(
                "employee_id={} process={} slot_released={}",
                deleted.employee.id,
                deleted.employee.assigned_process.as_deref().unwrap_or("-"),
                deleted.slot_released
            )
        });
        result
    }
}

/// Presentation message for a committed add.
pub fn added_message(employee: &Employee) -> String {
    match employee.assigned_process.as_deref() {
        Some(process) => format!("Employee added and assigned to {process}"),
        None => "Employee added without process assignment".to_string(),
    }
}

/// Presentation message for a committed delete.
pub fn deleted_message(deleted: &DeletedEmployee) -> String {
    format!(
        "Employee deleted and process '{}' vacancy updated",
        deleted.employee.assigned_process.as_deref().unwrap_or("None")
    )
}

fn log_transition<T>(
    event: &str,
    started_at: Instant,
    result: &LedgerResult<T>,
    describe: impl FnOnce(&T) -> String,
) {
    let duration_ms = started_at.elapsed().as_millis();
    match result {
        Ok(value) => info!(
            "event={} module=ledger status=ok duration_ms={} {}",
            event,
            duration_ms,
            describe(value)
        ),
        Err(err @ LedgerError::Store(_)) => error!(
            "event={} module=ledger status=error duration_ms={} error_code={} error={}",
            event,
            duration_ms,
            err.code(),
            err
        ),
        Err(err) => warn!(
            "event={} module=ledger status=rejected duration_ms={} error_code={}",
            event,
            duration_ms,
            err.code()
        ),
    }
}
