//! Filter facet extraction
//!
//! Derives the selectable species, strain and provenance choices from a record
//! set. Results are recomputed from the records every time; they carry no
//! state of their own.

use serde::Serialize;
use std::collections::HashSet;

use crate::app::models::Record;
use crate::constants::KNOWN_STRAINS;

/// The three facet choice lists shown by the filter panel
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FacetSet {
    pub species: Vec<String>,
    pub strains: Vec<String>,
    pub provenances: Vec<String>,
}

impl FacetSet {
    pub fn from_records(records: &[Record]) -> Self {
        Self {
            species: unique_species(records),
            strains: unique_strains(records),
            provenances: unique_provenances(records),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.species.is_empty() && self.strains.is_empty() && self.provenances.is_empty()
    }
}

/// Distinct species in order of first occurrence
pub fn unique_species(records: &[Record]) -> Vec<String> {
    unique_in_order(records.iter().map(Record::species))
}

/// Distinct provenances in order of first occurrence
pub fn unique_provenances(records: &[Record]) -> Vec<String> {
    unique_in_order(records.iter().map(Record::provenance))
}

/// Strains with at least one positive count, in canonical order
pub fn unique_strains(records: &[Record]) -> Vec<String> {
    strain_catalog(records)
        .into_iter()
        .filter(|strain| records.iter().any(|r| r.has_strain(strain)))
        .collect()
}

/// Every strain the records know about, positive or not
///
/// The known strains always come first in their fixed order, followed by any
/// extra strain columns sorted alphabetically.
pub fn strain_catalog(records: &[Record]) -> Vec<String> {
    let mut catalog: Vec<String> = KNOWN_STRAINS.iter().map(|s| s.to_string()).collect();

    let mut extras: Vec<&str> = records
        .iter()
        .flat_map(|r| r.strains().strains())
        .filter(|s| !KNOWN_STRAINS.contains(s))
        .collect::<HashSet<_>>()
        .into_iter()
        .collect();
    extras.sort_unstable();

    catalog.extend(extras.into_iter().map(str::to_string));
    catalog
}

fn unique_in_order<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen = HashSet::new();
    values
        .filter(|v| seen.insert(*v))
        .map(str::to_string)
        .collect()
}
