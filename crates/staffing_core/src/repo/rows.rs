//! Shared SELECT lists and row decoders for `processes` and `employees`.
//!
//! Decoders reject invalid persisted values instead of masking them.

use crate::model::employee::{Employee, EmployeeId};
use crate::model::process::Process;
use crate::model::skill::{Communication, Potential};
use rusqlite::Row;
use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

pub(crate) const PROCESS_SELECT_SQL: &str = "SELECT
    name,
    potential,
    communication,
    vacancy
FROM processes";

pub(crate) const EMPLOYEE_SELECT_SQL: &str = "SELECT
    id,
    name,
    email,
    potential,
    communication,
    assigned_process,
    assigned_at
FROM employees";

/// Failure while decoding one persisted row.
#[derive(Debug)]
pub(crate) enum RowDecodeError {
    Sqlite(rusqlite::Error),
    InvalidData(String),
}

impl From<rusqlite::Error> for RowDecodeError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}

pub(crate) fn parse_process_row(row: &Row<'_>) -> Result<Process, RowDecodeError> {
    let potential_text: String = row.get("potential")?;
    let communication_text: String = row.get("communication")?;
    let vacancy: i64 = row.get("vacancy")?;
    if vacancy < 0 {
        return Err(RowDecodeError::InvalidData(format!(
            "negative vacancy `{vacancy}` in processes.vacancy"
        )));
    }

    Ok(Process {
        name: row.get("name")?,
        required_potential: parse_potential(&potential_text, "processes.potential")?,
        required_communication: parse_communication(
            &communication_text,
            "processes.communication",
        )?,
        vacancy,
    })
}

pub(crate) fn parse_employee_row(row: &Row<'_>) -> Result<Employee, RowDecodeError> {
    let id_text: String = row.get("id")?;
    let id = Uuid::parse_str(&id_text).map_err(|_| {
        RowDecodeError::InvalidData(format!("invalid uuid `{id_text}` in employees.id"))
    })?;
    let potential_text: String = row.get("potential")?;
    let communication_text: String = row.get("communication")?;

    Ok(Employee {
        id,
        name: row.get("name")?,
        email: row.get("email")?,
        potential: parse_potential(&potential_text, "employees.potential")?,
        communication: parse_communication(&communication_text, "employees.communication")?,
        assigned_process: row.get("assigned_process")?,
        assigned_at: row.get("assigned_at")?,
    })
}

pub(crate) fn parse_employee_id(value: &str) -> Result<EmployeeId, RowDecodeError> {
    Uuid::parse_str(value)
        .map_err(|_| RowDecodeError::InvalidData(format!("invalid uuid `{value}` in employees.id")))
}

pub(crate) fn now_epoch_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| i64::try_from(elapsed.as_millis()).unwrap_or(i64::MAX))
        .unwrap_or(0)
}

fn parse_potential(value: &str, column: &str) -> Result<Potential, RowDecodeError> {
    value
        .parse()
        .map_err(|_| RowDecodeError::InvalidData(format!("invalid potential `{value}` in {column}")))
}

fn parse_communication(value: &str, column: &str) -> Result<Communication, RowDecodeError> {
    value.parse().map_err(|_| {
        RowDecodeError::InvalidData(format!("invalid communication `{value}` in {column}"))
    })
}
