//! Core CSV ingestion implementation
//!
//! This module fetches the CSV resource, decodes the header and data rows, and
//! coordinates per-row record parsing.

use tracing::{debug, info, warn};

use super::column_mapping::ColumnMapping;
use super::record_parser::parse_record;
use super::source::DataSource;
use super::stats::{IngestResult, IngestStats};
use crate::constants::DEFAULT_DELIMITER;
use crate::{Error, Result};

/// CSV ingestor for surveillance records
///
/// Holds only decoding settings; every call re-fetches and re-parses.
#[derive(Debug, Clone)]
pub struct CsvIngestor {
    delimiter: u8,
}

impl Default for CsvIngestor {
    fn default() -> Self {
        Self::new()
    }
}

impl CsvIngestor {
    /// Create an ingestor using the default comma delimiter
    pub fn new() -> Self {
        Self {
            delimiter: DEFAULT_DELIMITER as u8,
        }
    }

    /// Use a different single-byte delimiter (e.g. ';')
    pub fn with_delimiter(mut self, delimiter: char) -> Result<Self> {
        if !delimiter.is_ascii() {
            return Err(Error::configuration(format!(
                "CSV delimiter must be a single ASCII character, got '{delimiter}'"
            )));
        }
        self.delimiter = delimiter as u8;
        Ok(self)
    }

    pub fn delimiter(&self) -> char {
        self.delimiter as char
    }

    /// Fetch and parse the CSV resource
    pub async fn ingest(&self, source: &DataSource) -> Result<IngestResult> {
        info!("Ingesting surveillance data from {}", source);
        let content = source.fetch_text().await?;
        self.parse_str(&content)
    }

    /// Parse CSV text that has already been retrieved
    pub fn parse_str(&self, content: &str) -> Result<IngestResult> {
        let mut stats = IngestStats::new();
        let mut records = Vec::new();

        let mut csv_reader = csv::ReaderBuilder::new()
            .delimiter(self.delimiter)
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(content.as_bytes());

        let headers = csv_reader
            .headers()
            .map_err(|e| Error::parse("Failed to read CSV header row", Some(e)))?
            .clone();
        if headers.iter().all(|h| h.trim().is_empty()) {
            return Err(Error::parse("CSV header row is missing", None));
        }

        let column_mapping = ColumnMapping::analyze(&headers)?;
        let (total_cols, strain_cols) = column_mapping.stats();
        debug!(
            "Column mapping: {} total, {} strain columns ({})",
            total_cols,
            strain_cols,
            column_mapping.strain_columns.join(", ")
        );

        for result in csv_reader.records() {
            match result {
                Ok(row) => {
                    if row.iter().all(|field| field.is_empty()) {
                        continue;
                    }
                    stats.total_rows += 1;

                    match parse_record(&row, &column_mapping) {
                        Ok(record) => {
                            if record.date().is_none() {
                                stats.unparsable_dates += 1;
                            }
                            records.push(record);
                            stats.records_parsed += 1;
                        }
                        Err(e) => {
                            stats.rows_skipped += 1;
                            stats.errors.push(format!("Row {}: {}", stats.total_rows, e));
                            debug!("Skipped row {}: {}", stats.total_rows, e);
                        }
                    }
                }
                Err(e) => {
                    stats.total_rows += 1;
                    stats.rows_skipped += 1;
                    stats
                        .errors
                        .push(format!("CSV decode error at row {}: {}", stats.total_rows, e));
                }
            }
        }

        info!(
            "Parsed {} records from {} rows ({} skipped)",
            stats.records_parsed, stats.total_rows, stats.rows_skipped
        );
        if stats.unparsable_dates > 0 {
            warn!(
                "{} records have unparsable dates and will be excluded from date-based views",
                stats.unparsable_dates
            );
        }
        if stats.total_rows > 0 && !stats.is_successful() {
            warn!(
                "Low ingestion success rate: {:.1}% of rows produced records",
                stats.success_rate()
            );
        }

        Ok(IngestResult {
            records,
            strains: column_mapping.strain_columns,
            stats,
        })
    }
}
