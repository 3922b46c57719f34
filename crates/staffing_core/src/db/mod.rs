//! SQLite storage bootstrap, schema migrations and operator maintenance.
//!
//! # Responsibility
//! - Open and configure SQLite connections for the staffing core.
//! - Apply schema migrations in deterministic order.
//! - Offer the explicit operator reset; nothing here deletes data on startup.
//!
//! # Invariants
//! - Migration version is tracked via `PRAGMA user_version`.
//! - Core code must not read/write process or employee rows before migrations
//!   succeed.

use log::info;
use rusqlite::{Connection, Transaction, TransactionBehavior};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod migrations;
mod open;

pub use open::{open_db, open_db_in_memory};

pub type DbResult<T> = Result<T, DbError>;

#[derive(Debug)]
pub enum DbError {
    Sqlite(rusqlite::Error),
    UnsupportedSchemaVersion {
        db_version: u32,
        latest_supported: u32,
    },
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "{err}"),
            Self::UnsupportedSchemaVersion {
                db_version,
                latest_supported,
            } => write!(
                f,
                "database schema version {db_version} is newer than supported {latest_supported}"
            ),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::UnsupportedSchemaVersion { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}

/// Row counts removed by [`clear_all_data`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClearedData {
    pub processes: usize,
    pub employees: usize,
}

/// Empties the process catalog and every employee record in one transaction.
///
/// Operator-only hard reset. Schema and migration version are kept, so the
/// connection stays usable afterwards.
pub fn clear_all_data(conn: &Connection) -> DbResult<ClearedData> {
    let tx = Transaction::new_unchecked(conn, TransactionBehavior::Immediate)?;
    let employees = tx.execute("DELETE FROM employees;", [])?;
    let processes = tx.execute("DELETE FROM processes;", [])?;
    tx.commit()?;

    info!(
        "event=db_reset module=db status=ok processes={} employees={}",
        processes, employees
    );
    Ok(ClearedData {
        processes,
        employees,
    })
}
