//! Summary panel figures
//!
//! Headline numbers for a record set plus the most recent reports.

use serde::Serialize;
use std::cmp::Reverse;

use crate::app::models::Record;
use crate::app::services::facets::{strain_catalog, unique_species};
use crate::app::services::filter_engine::DateRange;

/// One strain's case total and its share of all cases
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StrainShare {
    pub strain: String,
    pub cases: u64,
    /// Percent of all cases; `None` when the set has no cases at all
    pub share_percent: Option<f64>,
}

/// Wild vs. everything else
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct ProvenanceSplit {
    pub wild: usize,
    pub other: usize,
    pub wild_percent: Option<f64>,
    pub other_percent: Option<f64>,
}

impl ProvenanceSplit {
    fn from_records(records: &[Record]) -> Self {
        let wild = records.iter().filter(|r| r.is_wild()).count();
        let other = records.len() - wild;
        let percent =
            |n: usize| (!records.is_empty()).then(|| n as f64 / records.len() as f64 * 100.0);

        Self {
            wild,
            other,
            wild_percent: percent(wild),
            other_percent: percent(other),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DataSummary {
    pub record_count: usize,
    pub total_cases: u64,
    pub unique_species: usize,
    pub strains: Vec<StrainShare>,
    pub provenance: ProvenanceSplit,
    /// Earliest and latest parsable dates
    pub date_span: Option<DateRange>,
}

impl DataSummary {
    /// Get a one-line summary for logs
    pub fn summary(&self) -> String {
        let span = self
            .date_span
            .map(|r| format!("{} to {}", r.start(), r.end()))
            .unwrap_or_else(|| "no dated records".to_string());
        format!(
            "{} records, {} cases, {} species ({})",
            self.record_count, self.total_cases, self.unique_species, span
        )
    }

    /// The strain with the most cases, first in catalog order on ties
    pub fn leading_strain(&self) -> Option<&StrainShare> {
        self.strains
            .iter()
            .filter(|s| s.cases > 0)
            .fold(None, |best: Option<&StrainShare>, s| match best {
                Some(b) if b.cases >= s.cases => Some(b),
                _ => Some(s),
            })
    }
}

pub fn summarize(records: &[Record]) -> DataSummary {
    let total_cases: u64 = records.iter().map(Record::total_cases).sum();

    let strains = strain_catalog(records)
        .into_iter()
        .map(|strain| {
            let cases: u64 = records.iter().map(|r| u64::from(r.count(&strain))).sum();
            let share_percent =
                (total_cases > 0).then(|| cases as f64 / total_cases as f64 * 100.0);
            StrainShare {
                strain,
                cases,
                share_percent,
            }
        })
        .collect();

    DataSummary {
        record_count: records.len(),
        total_cases,
        unique_species: unique_species(records).len(),
        strains,
        provenance: ProvenanceSplit::from_records(records),
        date_span: DateRange::spanning(records),
    }
}

/// The `limit` most recent records, newest first
///
/// Records with unparsable dates sort after every dated record. Ties keep
/// their input order.
pub fn recent_reports(records: &[Record], limit: usize) -> Vec<&Record> {
    let mut sorted: Vec<&Record> = records.iter().collect();
    // `None < Some`, so reversing puts undated records last; sort_by_key is stable
    sorted.sort_by_key(|r| Reverse(r.date()));
    sorted.truncate(limit);
    sorted
}
