//! Match lookup service over the process catalog.
//!
//! # Responsibility
//! - Run the pure selectors against one consistent catalog snapshot.
//!
//! Selection is advisory: committing an assignment goes through the ledger,
//! which re-checks vacancy under its write lock.

use crate::matching::{find_best_match, rank_suggestions, Suggestion};
use crate::model::process::Process;
use crate::model::skill::{Communication, Potential};
use crate::repo::process_repo::{CatalogResult, ProcessCatalog};

/// Use-case service for process selection.
pub struct MatchService<C: ProcessCatalog> {
    catalog: C,
}

impl<C: ProcessCatalog> MatchService<C> {
    pub fn new(catalog: C) -> Self {
        Self { catalog }
    }

    /// Best process for the profile: exact skill pair first, then potential
    /// only. `None` when neither tier has vacancy.
    pub fn find_best_match(
        &self,
        potential: Potential,
        communication: Communication,
    ) -> CatalogResult<Option<Process>> {
        let snapshot = self.catalog.list_processes()?;
        Ok(find_best_match(&snapshot, potential, communication).cloned())
    }

    /// Partial matches ordered by `(relevance desc, vacancy desc)`.
    pub fn rank_suggestions(
        &self,
        potential: Potential,
        communication: Communication,
    ) -> CatalogResult<Vec<Suggestion>> {
        let snapshot = self.catalog.list_processes()?;
        Ok(rank_suggestions(&snapshot, potential, communication))
    }

    /// Exact skill matches with vacancy, largest vacancy first.
    pub fn exact_matches(
        &self,
        potential: Potential,
        communication: Communication,
    ) -> CatalogResult<Vec<Process>> {
        self.catalog.query(potential, communication)
    }
}
