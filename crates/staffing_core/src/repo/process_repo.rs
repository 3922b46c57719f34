//! Process catalog contracts and SQLite implementation.
//!
//! # Responsibility
//! - Install whole catalogs atomically and adjust single vacancies.
//! - Serve skill-filtered catalog reads ordered for display.
//!
//! # Invariants
//! - `replace_all` validates the complete input before touching storage; a
//!   rejected catalog leaves the previous one intact.
//! - `adjust_vacancy` never drives a vacancy below zero and rejects deltas
//!   that would overflow it.
//! - Reads are single statements, so they never observe a half-applied
//!   ledger transaction.

use crate::db::DbError;
use crate::model::employee::EmployeeId;
use crate::model::process::{Process, ProcessValidationError};
use crate::model::skill::{Communication, Potential};
use crate::repo::rows::{
    parse_employee_id, parse_process_row, RowDecodeError, PROCESS_SELECT_SQL,
};
use log::info;
use rusqlite::{params, Connection, OptionalExtension, Transaction, TransactionBehavior};
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type CatalogResult<T> = Result<T, CatalogError>;

/// Errors from process catalog operations.
#[derive(Debug)]
pub enum CatalogError {
    /// Submitted catalog row failed validation. Nothing was written.
    Validation(ProcessValidationError),
    /// Underlying SQLite/bootstrap error.
    Db(DbError),
    /// No process with this name exists.
    NotFound(String),
    /// Adding `delta` would push the vacancy past `i64::MAX`. Nothing was
    /// written.
    VacancyOverflow {
        name: String,
        vacancy: i64,
        delta: i64,
    },
    /// Persisted data cannot be converted to a valid read model.
    InvalidData(String),
}

impl Display for CatalogError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(name) => write!(f, "process not found: {name}"),
            Self::VacancyOverflow {
                name,
                vacancy,
                delta,
            } => write!(
                f,
                "vacancy of process `{name}` ({vacancy}) cannot grow by {delta}"
            ),
            Self::InvalidData(message) => write!(f, "invalid persisted process data: {message}"),
        }
    }
}

impl Error for CatalogError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::NotFound(_) | Self::VacancyOverflow { .. } | Self::InvalidData(_) => None,
        }
    }
}

impl From<ProcessValidationError> for CatalogError {
    fn from(value: ProcessValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for CatalogError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for CatalogError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

impl From<RowDecodeError> for CatalogError {
    fn from(value: RowDecodeError) -> Self {
        match value {
            RowDecodeError::Sqlite(err) => Self::from(err),
            RowDecodeError::InvalidData(message) => Self::InvalidData(message),
        }
    }
}

/// Result of installing a new catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogReplaceReport {
    /// Number of processes now in the catalog.
    pub installed: usize,
    /// Employees whose `assigned_process` is absent from the new catalog.
    /// Their records are kept untouched.
    pub orphaned_assignments: Vec<EmployeeId>,
}

/// Repository interface for the process catalog.
pub trait ProcessCatalog {
    fn replace_all(&self, processes: &[Process]) -> CatalogResult<CatalogReplaceReport>;
    fn adjust_vacancy(&self, name: &str, delta: i64) -> CatalogResult<()>;
    fn query(
        &self,
        potential: Potential,
        communication: Communication,
    ) -> CatalogResult<Vec<Process>>;
    fn list_processes(&self) -> CatalogResult<Vec<Process>>;
    fn get_process(&self, name: &str) -> CatalogResult<Option<Process>>;
}

/// SQLite-backed process catalog.
pub struct SqliteProcessCatalog<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteProcessCatalog<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl ProcessCatalog for SqliteProcessCatalog<'_> {
    fn replace_all(&self, processes: &[Process]) -> CatalogResult<CatalogReplaceReport> {
        validate_catalog(processes)?;

        let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Immediate)?;
        tx.execute("DELETE FROM processes;", [])?;
        {
            let mut insert = tx.prepare(
                "INSERT INTO processes (name, potential, communication, vacancy)
                 VALUES (?1, ?2, ?3, ?4);",
            )?;
            for process in processes {
                insert.execute(params![
                    process.name.trim(),
                    process.required_potential.as_str(),
                    process.required_communication.as_str(),
                    process.vacancy,
                ])?;
            }
        }
        let orphaned_assignments = list_orphaned_employee_ids(&tx)?;
        tx.commit()?;

        info!(
            "event=catalog_replace module=catalog status=ok installed={} orphaned={}",
            processes.len(),
            orphaned_assignments.len()
        );
        Ok(CatalogReplaceReport {
            installed: processes.len(),
            orphaned_assignments,
        })
    }

    fn adjust_vacancy(&self, name: &str, delta: i64) -> CatalogResult<()> {
        let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Immediate)?;
        let current: Option<i64> = tx
            .query_row(
                "SELECT vacancy FROM processes WHERE name = ?1;",
                [name],
                |row| row.get(0),
            )
            .optional()?;
        let current = current.ok_or_else(|| CatalogError::NotFound(name.to_string()))?;

        let next = match current.checked_add(delta) {
            Some(value) => value.max(0),
            None if delta < 0 => 0,
            None => {
                return Err(CatalogError::VacancyOverflow {
                    name: name.to_string(),
                    vacancy: current,
                    delta,
                })
            }
        };

        tx.execute(
            "UPDATE processes
             SET vacancy = ?1
             WHERE name = ?2;",
            params![next, name],
        )?;
        tx.commit()?;
        Ok(())
    }

    fn query(
        &self,
        potential: Potential,
        communication: Communication,
    ) -> CatalogResult<Vec<Process>> {
        let mut stmt = self.conn.prepare(&format!(
            "{PROCESS_SELECT_SQL}
             WHERE potential = ?1
               AND communication = ?2
               AND vacancy > 0
             ORDER BY vacancy DESC, name ASC;"
        ))?;
        let mut rows = stmt.query(params![potential.as_str(), communication.as_str()])?;
        let mut processes = Vec::new();
        while let Some(row) = rows.next()? {
            processes.push(parse_process_row(row)?);
        }
        Ok(processes)
    }

    fn list_processes(&self) -> CatalogResult<Vec<Process>> {
        Ok(load_all_processes(self.conn)?)
    }

    fn get_process(&self, name: &str) -> CatalogResult<Option<Process>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{PROCESS_SELECT_SQL} WHERE name = ?1;"))?;
        let mut rows = stmt.query([name])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_process_row(row)?));
        }
        Ok(None)
    }
}

/// Loads the whole catalog ordered by name in one statement.
pub(crate) fn load_all_processes(conn: &Connection) -> Result<Vec<Process>, RowDecodeError> {
    let mut stmt = conn.prepare(&format!("{PROCESS_SELECT_SQL} ORDER BY name ASC;"))?;
    let mut rows = stmt.query([])?;
    let mut processes = Vec::new();
    while let Some(row) = rows.next()? {
        processes.push(parse_process_row(row)?);
    }
    Ok(processes)
}

/// Employees bound to a process name that is not in the catalog.
pub(crate) fn list_orphaned_employee_ids(
    conn: &Connection,
) -> Result<Vec<EmployeeId>, RowDecodeError> {
    let mut stmt = conn.prepare(
        "SELECT id
         FROM employees
         WHERE assigned_process IS NOT NULL
           AND assigned_process NOT IN (SELECT name FROM processes)
         ORDER BY id ASC;",
    )?;
    let mut rows = stmt.query([])?;
    let mut ids = Vec::new();
    while let Some(row) = rows.next()? {
        let id_text: String = row.get(0)?;
        ids.push(parse_employee_id(&id_text)?);
    }
    Ok(ids)
}

fn validate_catalog(processes: &[Process]) -> Result<(), ProcessValidationError> {
    let mut seen = HashSet::with_capacity(processes.len());
    for process in processes {
        process.validate()?;
        let name = process.name.trim();
        if !seen.insert(name) {
            return Err(ProcessValidationError::DuplicateName(name.to_string()));
        }
    }
    Ok(())
}
