//! Ingestion statistics and result structures
//!
//! This module provides types for tracking how many CSV rows became records
//! and for carrying the ingested records to downstream consumers.

use crate::app::models::Record;
use crate::constants::INGEST_SUCCESS_THRESHOLD;

/// Ingestion result with records and basic statistics
#[derive(Debug, Clone)]
pub struct IngestResult {
    /// Records in file order
    pub records: Vec<Record>,

    /// Strain columns found in the header, canonical order
    pub strains: Vec<String>,

    /// Basic ingestion statistics
    pub stats: IngestStats,
}

/// Simple ingestion statistics
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct IngestStats {
    /// Total number of data rows encountered
    pub total_rows: usize,

    /// Number of records successfully built
    pub records_parsed: usize,

    /// Number of rows dropped
    pub rows_skipped: usize,

    /// Records kept despite a timestamp that is not DD.MM.YYYY
    pub unparsable_dates: usize,

    /// Row-level problems for debugging
    pub errors: Vec<String>,
}

impl IngestStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Calculate success rate as a percentage
    pub fn success_rate(&self) -> f64 {
        if self.total_rows == 0 {
            0.0
        } else {
            (self.records_parsed as f64 / self.total_rows as f64) * 100.0
        }
    }

    /// Check if ingestion was mostly successful (>90% success rate)
    pub fn is_successful(&self) -> bool {
        self.success_rate() > INGEST_SUCCESS_THRESHOLD
    }
}
