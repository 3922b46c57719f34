//! Assignment store: employee mutations coupled to vacancy bookkeeping.
//!
//! # Responsibility
//! - Create, edit and delete employees together with the vacancy slot their
//!   process binding consumes.
//!
//! # Invariants
//! - Each operation runs in one `BEGIN IMMEDIATE` transaction. The write lock
//!   is held from the first check to the commit, so two writers can never
//!   both claim the last slot.
//! - Any failed precondition drops the transaction uncommitted: no vacancy
//!   change and no employee row become visible.
//! - Employees hold at most one slot. A binding to a process that no longer
//!   exists is released as a no-op.
//! - Input drafts are expected to be normalized by the caller
//!   (`EmployeeDraft::normalized`).

use crate::db::DbError;
use crate::matching::find_best_match;
use crate::model::employee::{Employee, EmployeeDraft, EmployeeId};
use crate::repo::employee_repo::load_employee;
use crate::repo::process_repo::load_all_processes;
use crate::repo::rows::{now_epoch_ms, RowDecodeError};
use log::debug;
use rusqlite::{params, Connection, OptionalExtension, Transaction, TransactionBehavior};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

pub type AssignmentResult<T> = Result<T, AssignmentError>;

/// Errors from assignment store operations.
#[derive(Debug)]
pub enum AssignmentError {
    /// Normalized email already belongs to another employee.
    DuplicateEmail(String),
    /// Requested process is not in the catalog.
    ProcessNotFound(String),
    /// Requested process has no free slot.
    NoVacancy(String),
    /// Target employee does not exist.
    EmployeeNotFound(EmployeeId),
    /// Underlying SQLite/bootstrap error.
    Db(DbError),
    /// Persisted data cannot be converted to a valid read model.
    InvalidData(String),
}

impl Display for AssignmentError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DuplicateEmail(email) => write!(f, "email already exists: {email}"),
            Self::ProcessNotFound(name) => write!(f, "process not found: {name}"),
            Self::NoVacancy(name) => write!(f, "no vacancy available in {name}"),
            Self::EmployeeNotFound(id) => write!(f, "employee not found: {id}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
        }
    }
}

impl Error for AssignmentError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DbError> for AssignmentError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for AssignmentError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

impl From<RowDecodeError> for AssignmentError {
    fn from(value: RowDecodeError) -> Self {
        match value {
            RowDecodeError::Sqlite(err) => Self::from(err),
            RowDecodeError::InvalidData(message) => Self::InvalidData(message),
        }
    }
}

/// Outcome of a committed delete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeletedEmployee {
    pub employee: Employee,
    /// `true` when the held slot was returned to an existing process.
    pub slot_released: bool,
}

/// Outcome of a committed edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdatedEmployee {
    pub employee: Employee,
    /// Binding held before the edit.
    pub previous_process: Option<String>,
}

/// Store interface for vacancy-coupled employee mutations.
pub trait AssignmentStore {
    fn add_employee(&self, draft: &EmployeeDraft) -> AssignmentResult<Employee>;
    fn add_employee_best_match(&self, draft: &EmployeeDraft) -> AssignmentResult<Employee>;
    fn update_employee(
        &self,
        id: EmployeeId,
        draft: &EmployeeDraft,
    ) -> AssignmentResult<UpdatedEmployee>;
    fn delete_employee(&self, id: EmployeeId) -> AssignmentResult<DeletedEmployee>;
}

/// SQLite-backed assignment store.
pub struct SqliteAssignmentStore<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteAssignmentStore<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    fn begin(&self) -> AssignmentResult<Transaction<'conn>> {
        Ok(Transaction::new_unchecked(
            self.conn,
            TransactionBehavior::Immediate,
        )?)
    }
}

impl AssignmentStore for SqliteAssignmentStore<'_> {
    fn add_employee(&self, draft: &EmployeeDraft) -> AssignmentResult<Employee> {
        let tx = self.begin()?;
        ensure_email_available(&tx, &draft.email, None)?;
        if let Some(process_name) = draft.process_name.as_deref() {
            reserve_slot(&tx, process_name)?;
        }
        let employee = insert_employee(&tx, draft, draft.process_name.clone())?;
        tx.commit()?;
        Ok(employee)
    }

    fn add_employee_best_match(&self, draft: &EmployeeDraft) -> AssignmentResult<Employee> {
        let tx = self.begin()?;
        ensure_email_available(&tx, &draft.email, None)?;

        let catalog = load_all_processes(&tx)?;
        let selected = find_best_match(&catalog, draft.potential, draft.communication)
            .map(|process| process.name.clone());
        if let Some(process_name) = selected.as_deref() {
            reserve_slot(&tx, process_name)?;
        }
        let employee = insert_employee(&tx, draft, selected)?;
        tx.commit()?;
        Ok(employee)
    }

    fn update_employee(
        &self,
        id: EmployeeId,
        draft: &EmployeeDraft,
    ) -> AssignmentResult<UpdatedEmployee> {
        let tx = self.begin()?;
        let current = load_employee(&tx, id)?.ok_or(AssignmentError::EmployeeNotFound(id))?;
        ensure_email_available(&tx, &draft.email, Some(id))?;

        let previous_process = current.assigned_process.clone();
        if previous_process != draft.process_name {
            if let Some(old) = previous_process.as_deref() {
                release_slot(&tx, old)?;
            }
            if let Some(new) = draft.process_name.as_deref() {
                reserve_slot(&tx, new)?;
            }
        }

        tx.execute(
            "UPDATE employees
             SET
                name = ?1,
                email = ?2,
                potential = ?3,
                communication = ?4,
                assigned_process = ?5
             WHERE id = ?6;",
            params![
                draft.name.as_str(),
                draft.email.as_str(),
                draft.potential.as_str(),
                draft.communication.as_str(),
                draft.process_name.as_deref(),
                id.to_string(),
            ],
        )?;
        tx.commit()?;

        Ok(UpdatedEmployee {
            employee: Employee {
                id,
                name: draft.name.clone(),
                email: draft.email.clone(),
                potential: draft.potential,
                communication: draft.communication,
                assigned_process: draft.process_name.clone(),
                assigned_at: current.assigned_at,
            },
            previous_process,
        })
    }

    fn delete_employee(&self, id: EmployeeId) -> AssignmentResult<DeletedEmployee> {
        let tx = self.begin()?;
        let employee = load_employee(&tx, id)?.ok_or(AssignmentError::EmployeeNotFound(id))?;

        tx.execute("DELETE FROM employees WHERE id = ?1;", [id.to_string()])?;
        let slot_released = match employee.assigned_process.as_deref() {
            Some(process_name) => release_slot(&tx, process_name)?,
            None => false,
        };
        tx.commit()?;

        Ok(DeletedEmployee {
            employee,
            slot_released,
        })
    }
}

fn ensure_email_available(
    conn: &Connection,
    email: &str,
    exclude: Option<EmployeeId>,
) -> AssignmentResult<()> {
    let holder: Option<String> = conn
        .query_row(
            "SELECT id
             FROM employees
             WHERE email = ?1
               AND (?2 IS NULL OR id != ?2)
             LIMIT 1;",
            params![email, exclude.map(|id| id.to_string())],
            |row| row.get(0),
        )
        .optional()?;

    match holder {
        Some(_) => Err(AssignmentError::DuplicateEmail(email.to_string())),
        None => Ok(()),
    }
}

/// Checks existence and vacancy, then takes one slot.
fn reserve_slot(conn: &Connection, process_name: &str) -> AssignmentResult<()> {
    let vacancy: Option<i64> = conn
        .query_row(
            "SELECT vacancy FROM processes WHERE name = ?1;",
            [process_name],
            |row| row.get(0),
        )
        .optional()?;

    match vacancy {
        None => return Err(AssignmentError::ProcessNotFound(process_name.to_string())),
        Some(value) if value <= 0 => {
            return Err(AssignmentError::NoVacancy(process_name.to_string()))
        }
        Some(_) => {}
    }

    let changed = conn.execute(
        "UPDATE processes
         SET vacancy = vacancy - 1
         WHERE name = ?1
           AND vacancy > 0;",
        [process_name],
    )?;
    if changed == 0 {
        return Err(AssignmentError::NoVacancy(process_name.to_string()));
    }
    Ok(())
}

/// Returns one slot. A missing process is tolerated and reported as `false`.
/// The vacancy saturates at `i64::MAX`.
fn release_slot(conn: &Connection, process_name: &str) -> AssignmentResult<bool> {
    let changed = conn.execute(
        "UPDATE processes
         SET vacancy = CASE WHEN vacancy < ?2 THEN vacancy + 1 ELSE vacancy END
         WHERE name = ?1;",
        params![process_name, i64::MAX],
    )?;
    if changed == 0 {
        debug!(
            "event=slot_release module=ledger status=skipped reason=process_missing process={}",
            process_name
        );
    }
    Ok(changed > 0)
}

fn insert_employee(
    conn: &Connection,
    draft: &EmployeeDraft,
    assigned_process: Option<String>,
) -> AssignmentResult<Employee> {
    let employee = Employee {
        id: Uuid::new_v4(),
        name: draft.name.clone(),
        email: draft.email.clone(),
        potential: draft.potential,
        communication: draft.communication,
        assigned_process,
        assigned_at: now_epoch_ms(),
    };

    conn.execute(
        "INSERT INTO employees (
            id,
            name,
            email,
            potential,
            communication,
            assigned_process,
            assigned_at
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7);",
        params![
            employee.id.to_string(),
            employee.name.as_str(),
            employee.email.as_str(),
            employee.potential.as_str(),
            employee.communication.as_str(),
            employee.assigned_process.as_deref(),
            employee.assigned_at,
        ],
    )?;
    Ok(employee)
}
