//! Data models for surveillance processing
//!
//! This module contains the core data structures for representing a single
//! geotagged avian influenza observation and its per-strain case counts.

use crate::app::services::date_codec::{format_date, parse_date};
use crate::constants::{KNOWN_STRAINS, WILD_PROVENANCE};
use crate::{Error, Result};
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// =============================================================================
// Strain Counts
// =============================================================================

/// Case counts keyed by strain identifier
///
/// Missing strains read as zero. Counts are unsigned so they can never be
/// negative.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StrainCounts(BTreeMap<String, u32>);

impl StrainCounts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the count for a strain, replacing any previous value
    pub fn set(&mut self, strain: impl Into<String>, count: u32) {
        self.0.insert(strain.into(), count);
    }

    /// Count for a strain (0 when absent)
    pub fn get(&self, strain: &str) -> u32 {
        self.0.get(strain).copied().unwrap_or(0)
    }

    /// True if the strain has at least one case
    pub fn is_positive(&self, strain: &str) -> bool {
        self.get(strain) > 0
    }

    /// Sum of all strain counts
    pub fn total(&self) -> u64 {
        self.0.values().map(|&c| u64::from(c)).sum()
    }

    /// Number of strains with a positive count
    pub fn detected(&self) -> usize {
        self.0.values().filter(|&&c| c > 0).count()
    }

    /// Strain identifiers present in this map
    pub fn strains(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// (strain, count) pairs in canonical order: known strains first, then
    /// any extra strains alphabetically
    pub fn ordered(&self) -> Vec<(&str, u32)> {
        let mut ordered: Vec<(&str, u32)> = KNOWN_STRAINS
            .iter()
            .filter_map(|&strain| self.0.get(strain).map(|&count| (strain, count)))
            .collect();
        ordered.extend(
            self.0
                .iter()
                .filter(|(strain, _)| !KNOWN_STRAINS.contains(&strain.as_str()))
                .map(|(strain, &count)| (strain.as_str(), count)),
        );
        ordered
    }
}

impl<S: Into<String>> FromIterator<(S, u32)> for StrainCounts {
    fn from_iter<I: IntoIterator<Item = (S, u32)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(s, c)| (s.into(), c)).collect())
    }
}

// =============================================================================
// Surveillance Record
// =============================================================================

/// One surveillance observation
///
/// Records are immutable once built. The timestamp keeps its original text for
/// display; the parsed date is computed once at construction and is `None`
/// when the text is not a valid DD.MM.YYYY date.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Record {
    latitude: f64,
    longitude: f64,
    species: String,
    strains: StrainCounts,
    timestamp: String,
    provenance: String,
    #[serde(skip)]
    date: Option<NaiveDate>,
}

impl Record {
    /// Create a new Record with validation
    ///
    /// Coordinates must be finite and the species label non-empty. An
    /// unparsable timestamp is accepted and only affects date-dependent
    /// operations.
    pub fn new(
        latitude: f64,
        longitude: f64,
        species: impl Into<String>,
        strains: StrainCounts,
        timestamp: impl Into<String>,
        provenance: impl Into<String>,
    ) -> Result<Self> {
        if !latitude.is_finite() || !longitude.is_finite() {
            return Err(Error::data_validation(format!(
                "Coordinates must be finite numbers, got ({latitude}, {longitude})"
            )));
        }

        let species = species.into();
        if species.trim().is_empty() {
            return Err(Error::data_validation("Species cannot be empty"));
        }

        let timestamp = timestamp.into();
        let date = parse_date(&timestamp).ok();

        Ok(Self {
            latitude,
            longitude,
            species,
            strains,
            timestamp,
            provenance: provenance.into(),
            date,
        })
    }

    /// Create a record from an already parsed date
    ///
    /// The year must fit the four-digit timestamp format.
    pub fn dated(
        latitude: f64,
        longitude: f64,
        species: impl Into<String>,
        strains: StrainCounts,
        date: NaiveDate,
        provenance: impl Into<String>,
    ) -> Result<Self> {
        if !(0..=9999).contains(&date.year()) {
            return Err(Error::data_validation(format!(
                "Year {} cannot be written as a DD.MM.YYYY timestamp",
                date.year()
            )));
        }

        Self::new(
            latitude,
            longitude,
            species,
            strains,
            format_date(date),
            provenance,
        )
    }

    /// Return a copy with one strain count replaced
    pub fn with_count(mut self, strain: impl Into<String>, count: u32) -> Self {
        self.strains.set(strain, count);
        self
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Location as (latitude, longitude)
    pub fn location(&self) -> (f64, f64) {
        (self.latitude, self.longitude)
    }

    pub fn species(&self) -> &str {
        &self.species
    }

    pub fn provenance(&self) -> &str {
        &self.provenance
    }

    pub fn strains(&self) -> &StrainCounts {
        &self.strains
    }

    /// Original timestamp text
    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }

    /// Parsed calendar date, `None` when the timestamp is malformed
    pub fn date(&self) -> Option<NaiveDate> {
        self.date
    }

    /// Case count for a strain
    pub fn count(&self, strain: &str) -> u32 {
        self.strains.get(strain)
    }

    pub fn has_strain(&self, strain: &str) -> bool {
        self.strains.is_positive(strain)
    }

    /// Total cases across all strains
    pub fn total_cases(&self) -> u64 {
        self.strains.total()
    }

    /// Number of strains detected on this record
    pub fn strains_detected(&self) -> usize {
        self.strains.detected()
    }

    /// Wild provenance, compared case-insensitively
    pub fn is_wild(&self) -> bool {
        self.provenance.trim().eq_ignore_ascii_case(WILD_PROVENANCE)
    }
}
