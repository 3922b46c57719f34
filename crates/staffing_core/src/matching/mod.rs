//! Process selection for an employee skill profile.
//!
//! # Responsibility
//! - Pick the best process or rank partial matches over a catalog snapshot.
//!
//! # Invariants
//! - Pure functions: no I/O, input slice is never mutated.
//! - Processes without vacancy are never returned.

pub mod selector;

pub use selector::{find_best_match, rank_suggestions, Suggestion};
