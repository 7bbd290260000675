//! Filter state value objects
//!
//! A [`FilterState`] is a date range plus three selection sets. An empty
//! selection set means "match all". The date range can only be built with
//! ordered bounds, so a state is never partially invalid.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::app::models::Record;
use crate::{Error, Result};

/// Inclusive calendar date range with ordered bounds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawDateRange")]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

#[derive(Deserialize)]
struct RawDateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl TryFrom<RawDateRange> for DateRange {
    type Error = Error;

    fn try_from(raw: RawDateRange) -> Result<Self> {
        DateRange::new(raw.start, raw.end)
    }
}

impl DateRange {
    /// Create a range; fails when `start` is after `end`
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        if start > end {
            return Err(Error::InvalidDateRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// Smallest range covering every parsable record date
    pub fn spanning(records: &[Record]) -> Option<Self> {
        let mut dates = records.iter().filter_map(Record::date);
        let first = dates.next()?;
        let (start, end) = dates.fold((first, first), |(lo, hi), d| (lo.min(d), hi.max(d)));
        Some(Self { start, end })
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Inclusive on both ends
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Copy with a new start bound
    pub fn with_start(&self, start: NaiveDate) -> Result<Self> {
        Self::new(start, self.end)
    }

    /// Copy with a new end bound
    pub fn with_end(&self, end: NaiveDate) -> Result<Self> {
        Self::new(self.start, end)
    }
}

/// Which facets apply for a given view
///
/// The map view honours every facet. The timeline shows full history, so it
/// drops the date range while keeping species, strain and provenance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DateScope {
    #[default]
    Bounded,
    FullHistory,
}

/// User-selected filter facets
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterState {
    /// `None` leaves dates unrestricted
    pub date_range: Option<DateRange>,
    pub species: BTreeSet<String>,
    pub strains: BTreeSet<String>,
    pub provenances: BTreeSet<String>,
}

impl FilterState {
    /// Unrestricted state
    pub fn new() -> Self {
        Self::default()
    }

    /// Default state for a freshly loaded record set: the date range spans
    /// the records, every selection set is empty
    pub fn for_records(records: &[Record]) -> Self {
        Self {
            date_range: DateRange::spanning(records),
            ..Self::default()
        }
    }

    pub fn with_date_range(mut self, range: DateRange) -> Self {
        self.date_range = Some(range);
        self
    }

    pub fn with_species<I, S>(mut self, species: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.species.extend(species.into_iter().map(Into::into));
        self
    }

    pub fn with_strains<I, S>(mut self, strains: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.strains.extend(strains.into_iter().map(Into::into));
        self
    }

    pub fn with_provenances<I, S>(mut self, provenances: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.provenances.extend(provenances.into_iter().map(Into::into));
        self
    }

    /// Add the species if absent, remove it if present
    pub fn toggle_species(&mut self, species: &str) {
        toggle(&mut self.species, species);
    }

    /// Add the strain if absent, remove it if present
    pub fn toggle_strain(&mut self, strain: &str) {
        toggle(&mut self.strains, strain);
    }

    /// Add the provenance if absent, remove it if present
    pub fn toggle_provenance(&mut self, provenance: &str) {
        toggle(&mut self.provenances, provenance);
    }

    pub fn set_date_range(&mut self, range: Option<DateRange>) {
        self.date_range = range;
    }

    /// Move the start bound; an unordered result is rejected and the state
    /// is left untouched
    pub fn set_range_start(&mut self, start: NaiveDate) -> Result<()> {
        let range = match self.date_range {
            Some(range) => range.with_start(start)?,
            None => DateRange::new(start, NaiveDate::MAX)?,
        };
        self.date_range = Some(range);
        Ok(())
    }

    /// Move the end bound; an unordered result is rejected and the state is
    /// left untouched
    pub fn set_range_end(&mut self, end: NaiveDate) -> Result<()> {
        let range = match self.date_range {
            Some(range) => range.with_end(end)?,
            None => DateRange::new(NaiveDate::MIN, end)?,
        };
        self.date_range = Some(range);
        Ok(())
    }

    /// Empty every selection set, keeping the date range
    pub fn clear_facets(&mut self) {
        self.species.clear();
        self.strains.clear();
        self.provenances.clear();
    }

    /// True when no species, strain or provenance restriction is active
    pub fn has_no_facets(&self) -> bool {
        self.species.is_empty() && self.strains.is_empty() && self.provenances.is_empty()
    }
}

fn toggle(set: &mut BTreeSet<String>, value: &str) {
    if !set.remove(value) {
        set.insert(value.to_string());
    }
}
