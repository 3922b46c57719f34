//! Repository layer contracts and SQLite implementations.
//!
//! # Responsibility
//! - Define use-case oriented data access contracts.
//! - Isolate SQLite query and transaction details from services.
//!
//! # Invariants
//! - Every write that touches a vacancy runs inside one IMMEDIATE transaction
//!   spanning its full check-then-act sequence.
//! - Repository APIs return semantic errors (`NotFound`, `NoVacancy`, ...)
//!   in addition to DB transport errors.

pub mod assignment_repo;
pub mod employee_repo;
pub mod process_repo;
mod rows;
