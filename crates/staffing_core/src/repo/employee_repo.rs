//! Employee read repository and assignment history aggregation.
//!
//! # Responsibility
//! - Read employee records by id, email, or in display order.
//! - Aggregate assignment history per day.
//!
//! Writes live in `assignment_repo`, where they are coupled to vacancy.

use crate::db::DbError;
use crate::model::employee::{normalize_email, Employee, EmployeeId};
use crate::repo::process_repo::list_orphaned_employee_ids;
use crate::repo::rows::{parse_employee_row, RowDecodeError, EMPLOYEE_SELECT_SQL};
use rusqlite::{params, Connection};
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RepoResult<T> = Result<T, RepoError>;

/// Generic repository error for employee reads.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted employee data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::InvalidData(_) => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

impl From<RowDecodeError> for RepoError {
    fn from(value: RowDecodeError) -> Self {
        match value {
            RowDecodeError::Sqlite(err) => Self::from(err),
            RowDecodeError::InvalidData(message) => Self::InvalidData(message),
        }
    }
}

/// Assignment counts for one calendar day (UTC).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HistoryEntry {
    /// `YYYY-MM-DD`.
    pub date: String,
    pub assignments: u64,
    pub successful_matches: u64,
    pub no_matches: u64,
}

/// Repository interface for employee reads.
pub trait EmployeeRepository {
    fn get_employee(&self, id: EmployeeId) -> RepoResult<Option<Employee>>;
    fn find_by_email(&self, email: &str) -> RepoResult<Option<Employee>>;
    fn list_employees(&self) -> RepoResult<Vec<Employee>>;
    fn list_orphaned_assignments(&self) -> RepoResult<Vec<Employee>>;
    fn assignment_history(&self) -> RepoResult<Vec<HistoryEntry>>;
}

/// SQLite-backed employee repository.
pub struct SqliteEmployeeRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteEmployeeRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl EmployeeRepository for SqliteEmployeeRepository<'_> {
    fn get_employee(&self, id: EmployeeId) -> RepoResult<Option<Employee>> {
        Ok(load_employee(self.conn, id)?)
    }

    fn find_by_email(&self, email: &str) -> RepoResult<Option<Employee>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{EMPLOYEE_SELECT_SQL} WHERE email = ?1;"))?;
        let mut rows = stmt.query([normalize_email(email)])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_employee_row(row)?));
        }
        Ok(None)
    }

    fn list_employees(&self) -> RepoResult<Vec<Employee>> {
        let mut stmt = self.conn.prepare(&format!(
            "{EMPLOYEE_SELECT_SQL} ORDER BY assigned_at DESC, id ASC;"
        ))?;
        let mut rows = stmt.query([])?;
        let mut employees = Vec::new();
        while let Some(row) = rows.next()? {
            employees.push(parse_employee_row(row)?);
        }
        Ok(employees)
    }

    fn list_orphaned_assignments(&self) -> RepoResult<Vec<Employee>> {
        let mut employees = Vec::new();
        for id in list_orphaned_employee_ids(self.conn)? {
            if let Some(employee) = load_employee(self.conn, id)? {
                employees.push(employee);
            }
        }
        Ok(employees)
    }

    fn assignment_history(&self) -> RepoResult<Vec<HistoryEntry>> {
        let mut stmt = self.conn.prepare(
            "SELECT
                date(assigned_at / 1000, 'unixepoch') AS assignment_date,
                COUNT(*) AS assignments,
                SUM(CASE WHEN assigned_process IS NOT NULL THEN 1 ELSE 0 END) AS successful_matches,
                SUM(CASE WHEN assigned_process IS NULL THEN 1 ELSE 0 END) AS no_matches
             FROM employees
             GROUP BY assignment_date
             ORDER BY assignment_date DESC;",
        )?;
        let mut rows = stmt.query([])?;
        let mut history = Vec::new();
        while let Some(row) = rows.next()? {
            history.push(HistoryEntry {
                date: row.get("assignment_date")?,
                assignments: count_column(row.get("assignments")?, "assignments")?,
                successful_matches: count_column(
                    row.get("successful_matches")?,
                    "successful_matches",
                )?,
                no_matches: count_column(row.get("no_matches")?, "no_matches")?,
            });
        }
        Ok(history)
    }
}

pub(crate) fn load_employee(
    conn: &Connection,
    id: EmployeeId,
) -> Result<Option<Employee>, RowDecodeError> {
    let mut stmt = conn.prepare(&format!("{EMPLOYEE_SELECT_SQL} WHERE id = ?1;"))?;
    let mut rows = stmt.query(params![id.to_string()])?;
    if let Some(row) = rows.next()? {
        return Ok(Some(parse_employee_row(row)?));
    }
    Ok(None)
}

fn count_column(value: i64, column: &str) -> RepoResult<u64> {
    u64::try_from(value)
        .map_err(|_| RepoError::InvalidData(format!("negative count `{value}` in {column}")))
}
