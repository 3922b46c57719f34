//! Domain model for the process catalog and employee assignments.
//!
//! # Responsibility
//! - Define canonical data structures used by matching and the ledger.
//! - Own input normalization (email casing, enum labels) so storage only
//!   ever sees canonical values.
//!
//! # Invariants
//! - A process is identified by its unique `name`.
//! - An employee is identified by a stable `EmployeeId`; its normalized
//!   email is unique across all employees.

pub mod employee;
pub mod process;
pub mod skill;
