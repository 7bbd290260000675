//! Compound filter application
//!
//! A record passes when it satisfies every active facet: date range, species,
//! strain presence and provenance. Filtering never mutates the input and keeps
//! input order.

use tracing::debug;

use super::state::{DateScope, FilterState};
use crate::app::models::Record;

/// Apply every facet (map view)
pub fn apply_filters(records: &[Record], state: &FilterState) -> Vec<Record> {
    apply_filters_scoped(records, state, DateScope::Bounded)
}

/// Apply the facets selected by `scope`
///
/// # Arguments
///
/// * `records` - Source records, left untouched
/// * `state` - Current filter selection
/// * `scope` - Whether the date range takes part
///
/// # Returns
///
/// Order-preserving subsequence of `records`
pub fn apply_filters_scoped(
    records: &[Record],
    state: &FilterState,
    scope: DateScope,
) -> Vec<Record> {
    let filtered: Vec<Record> = records
        .iter()
        .filter(|record| passes_filters(record, state, scope))
        .cloned()
        .collect();

    debug!(
        "Filtering complete ({:?}): {} -> {} records",
        scope,
        records.len(),
        filtered.len()
    );

    filtered
}

/// Check a single record against the filter state
pub fn passes_filters(record: &Record, state: &FilterState, scope: DateScope) -> bool {
    (scope == DateScope::FullHistory || matches_date(record, state))
        && matches_species(record, state)
        && matches_strains(record, state)
        && matches_provenance(record, state)
}

/// Date facet; a record without a parsable date fails any active range
pub fn matches_date(record: &Record, state: &FilterState) -> bool {
    match state.date_range {
        None => true,
        Some(range) => record.date().is_some_and(|date| range.contains(date)),
    }
}

pub fn matches_species(record: &Record, state: &FilterState) -> bool {
    state.species.is_empty() || state.species.contains(record.species())
}

/// At least one selected strain must have a positive count
pub fn matches_strains(record: &Record, state: &FilterState) -> bool {
    state.strains.is_empty() || state.strains.iter().any(|s| record.has_strain(s))
}

pub fn matches_provenance(record: &Record, state: &FilterState) -> bool {
    state.provenances.is_empty() || state.provenances.contains(record.provenance())
}

/// Per-facet rejection counts for a record set
///
/// A record is charged to the first facet it fails, in the order date,
/// species, strain, provenance.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterBreakdown {
    pub total: usize,
    pub passed: usize,
    pub date_rejected: usize,
    pub species_rejected: usize,
    pub strain_rejected: usize,
    pub provenance_rejected: usize,
}

impl FilterBreakdown {
    pub fn summary(&self) -> String {
        format!(
            "{}/{} pass | date: -{} | species: -{} | strain: -{} | provenance: -{}",
            self.passed,
            self.total,
            self.date_rejected,
            self.species_rejected,
            self.strain_rejected,
            self.provenance_rejected
        )
    }
}

/// Count how many records each facet removes
pub fn get_filter_breakdown(
    records: &[Record],
    state: &FilterState,
    scope: DateScope,
) -> FilterBreakdown {
    let mut breakdown = FilterBreakdown {
        total: records.len(),
        ..FilterBreakdown::default()
    };

    for record in records {
        if scope == DateScope::Bounded && !matches_date(record, state) {
            breakdown.date_rejected += 1;
        } else if !matches_species(record, state) {
            breakdown.species_rejected += 1;
        } else if !matches_strains(record, state) {
            breakdown.strain_rejected += 1;
        } else if !matches_provenance(record, state) {
            breakdown.provenance_rejected += 1;
        } else {
            breakdown.passed += 1;
        }
    }

    breakdown
}
