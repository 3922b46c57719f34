//! Vacancy-consistent staffing core.
//!
//! Matches employees to staffing processes by skill profile and keeps every
//! process vacancy consistent with the employees bound to it. This crate is
//! the single source of truth for those invariants; presentation layers only
//! call into the services re-exported here.

pub mod db;
pub mod logging;
pub mod matching;
pub mod model;
pub mod repo;
pub mod service;

pub use db::{clear_all_data, open_db, open_db_in_memory, ClearedData, DbError};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use matching::{find_best_match, rank_suggestions, Suggestion};
pub use model::employee::{
    normalize_email, Employee, EmployeeDraft, EmployeeId, EmployeeValidationError,
};
pub use model::process::{Process, ProcessValidationError};
pub use model::skill::{Communication, Potential, UnknownSkillValue};
pub use repo::assignment_repo::{
    AssignmentError, AssignmentResult, AssignmentStore, DeletedEmployee, SqliteAssignmentStore,
    UpdatedEmployee,
};
pub use repo::employee_repo::{
    EmployeeRepository, HistoryEntry, RepoError, RepoResult, SqliteEmployeeRepository,
};
pub use repo::process_repo::{
    CatalogError, CatalogReplaceReport, CatalogResult, ProcessCatalog, SqliteProcessCatalog,
};
pub use service::history_service::HistoryService;
pub use service::ledger::{
    added_message, deleted_message, ActionOutcome, AssignmentLedger, LedgerError, LedgerResult,
};
pub use service::match_service::MatchService;

/// Minimal health-check API for integration probes.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
