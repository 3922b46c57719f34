//! Two-tier best match and relevance ranking.
//!
//! Best match tries the exact skill pair first and relaxes to potential-only
//! when nothing exact has vacancy. Communication is the droppable criterion.
//!
//! Ranking scores `2` for a potential match and `1` for a communication
//! match, then orders by `(relevance desc, vacancy desc)`. Both weights and
//! the order are fixed; callers rely on them.

use crate::model::process::Process;
use crate::model::skill::{Communication, Potential};
use serde::Serialize;

const POTENTIAL_WEIGHT: u8 = 2;
const COMMUNICATION_WEIGHT: u8 = 1;

/// A ranked partial match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Suggestion {
    pub process: Process,
    /// 3 = both match, 2 = potential only, 1 = communication only.
    pub relevance: u8,
}

/// Returns the max-vacancy process matching both skills, falling back to the
/// max-vacancy process matching potential alone.
///
/// Vacancy ties resolve to the earliest process in `catalog`.
pub fn find_best_match<'a>(
    catalog: &'a [Process],
    potential: Potential,
    communication: Communication,
) -> Option<&'a Process> {
    let exact = max_vacancy(catalog.iter().filter(|process| {
        process.has_vacancy()
            && process.required_potential == potential
            && process.required_communication == communication
    }));
    if exact.is_some() {
        return exact;
    }

    max_vacancy(
        catalog
            .iter()
            .filter(|process| process.has_vacancy() && process.required_potential == potential),
    )
}

/// Ranks every process with vacancy that matches potential or communication.
pub fn rank_suggestions(
    catalog: &[Process],
    potential: Potential,
    communication: Communication,
) -> Vec<Suggestion> {
    let mut suggestions: Vec<Suggestion> = catalog
        .iter()
        .filter(|process| process.has_vacancy())
        .filter_map(|process| {
            let relevance = relevance(process, potential, communication);
            (relevance > 0).then(|| Suggestion {
                process: process.clone(),
                relevance,
            })
        })
        .collect();

    suggestions.sort_by(|left, right| {
        right
            .relevance
            .cmp(&left.relevance)
            .then_with(|| right.process.vacancy.cmp(&left.process.vacancy))
    });
    suggestions
}

fn relevance(process: &Process, potential: Potential, communication: Communication) -> u8 {
    let mut score = 0;
    if process.required_potential == potential {
        score += POTENTIAL_WEIGHT;
    }
    if process.required_communication == communication {
        score += COMMUNICATION_WEIGHT;
    }
    score
}

/// First process with the largest vacancy. `Iterator::max_by_key` keeps the
/// last maximum instead, so it must not replace this fold.
fn max_vacancy<'a>(candidates: impl Iterator<Item = &'a Process>) -> Option<&'a Process> {
    candidates.fold(None, |best: Option<&'a Process>, process| match best {
        Some(current) if current.vacancy >= process.vacancy => Some(current),
        _ => Some(process),
    })
}
