//! Process domain model.
//!
//! # Responsibility
//! - Describe one staffing process: its required skill pair and remaining
//!   vacancy.
//! - Validate catalog rows before they are installed.
//!
//! # Invariants
//! - `name` is non-blank and unique inside one catalog.
//! - `vacancy` is never negative.

use crate::model::skill::{Communication, Potential};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// A staffing process with finite vacancy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Process {
    pub name: String,
    #[serde(rename = "potential")]
    pub required_potential: Potential,
    #[serde(rename = "communication")]
    pub required_communication: Communication,
    /// Remaining free slots. Mutated only through the assignment ledger or
    /// `ProcessCatalog::adjust_vacancy`.
    pub vacancy: i64,
}

/// Validation failures for process catalog rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProcessValidationError {
    BlankName,
    NegativeVacancy { name: String, vacancy: i64 },
    DuplicateName(String),
}

impl Display for ProcessValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankName => write!(f, "process name must not be blank"),
            Self::NegativeVacancy { name, vacancy } => {
                write!(f, "process `{name}` has negative vacancy {vacancy}")
            }
            Self::DuplicateName(name) => write!(f, "process `{name}` appears more than once"),
        }
    }
}

impl Error for ProcessValidationError {}

impl Process {
    pub fn new(
        name: impl Into<String>,
        required_potential: Potential,
        required_communication: Communication,
        vacancy: i64,
    ) -> Self {
        Self {
            name: name.into(),
            required_potential,
            required_communication,
            vacancy,
        }
    }

    /// Checks single-row invariants.
    pub fn validate(&self) -> Result<(), ProcessValidationError> {
        if self.name.trim().is_empty() {
            return Err(ProcessValidationError::BlankName);
        }
        if self.vacancy < 0 {
            return Err(ProcessValidationError::NegativeVacancy {
                name: self.name.clone(),
                vacancy: self.vacancy,
            });
        }
        Ok(())
    }

    pub fn has_vacancy(&self) -> bool {
        self.vacancy > 0
    }
}
