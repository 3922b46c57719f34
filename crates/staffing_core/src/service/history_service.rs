//! Read-only assignment history views.

use crate::model::employee::Employee;
use crate::repo::employee_repo::{EmployeeRepository, HistoryEntry, RepoResult};

/// Use-case service for assignment history and employee listings.
pub struct HistoryService<R: EmployeeRepository> {
    repo: R,
}

impl<R: EmployeeRepository> HistoryService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Per-day counts of created employees, split into matched/unmatched,
    /// newest day first.
    pub fn assignment_history(&self) -> RepoResult<Vec<HistoryEntry>> {
        self.repo.assignment_history()
    }

    /// All employees, most recent assignment first.
    pub fn assignments(&self) -> RepoResult<Vec<Employee>> {
        self.repo.list_employees()
    }

    /// Employees still bound to a process that left the catalog.
    pub fn orphaned_assignments(&self) -> RepoResult<Vec<Employee>> {
        self.repo.list_orphaned_assignments()
    }
}
