//! CSV ingestion for avian influenza surveillance records
//!
//! This module fetches the surveillance CSV once and decodes it into validated
//! [`Record`](crate::app::models::Record)s. Per-row problems are absorbed: rows
//! with missing or non-finite coordinates are dropped, unparsable strain counts
//! read as zero, and rows with malformed dates are kept (they are excluded
//! later by date-dependent operations).
//!
//! ## Architecture
//!
//! - [`source`] - Resolving and fetching the CSV resource (HTTP or local file)
//! - [`parser`] - Ingestion orchestration and CSV decoding
//! - [`column_mapping`] - Header analysis and strain column detection
//! - [`record_parser`] - Individual row processing
//! - [`field_parsers`] - Field coercion helpers
//! - [`stats`] - Ingestion statistics and result structures
//!
//! ## Usage
//!
//! ```rust,no_run
//! use avian_surveillance::app::services::csv_ingest::{CsvIngestor, DataSource};
//!
//! # async fn example() -> avian_surveillance::Result<()> {
//! let ingestor = CsvIngestor::new();
//! let source = DataSource::parse("https://example.org/fake_bird_data_switzerland_v2.csv");
//! let result = ingestor.ingest(&source).await?;
//!
//! println!("Loaded {} records from {} rows",
//!          result.stats.records_parsed,
//!          result.stats.total_rows);
//! # Ok(())
//! # }
//! ```

pub mod column_mapping;
pub mod field_parsers;
pub mod parser;
pub mod record_parser;
pub mod source;
pub mod stats;

#[cfg(test)]
pub mod tests;

pub use column_mapping::ColumnMapping;
pub use parser::CsvIngestor;
pub use source::DataSource;
pub use stats::{IngestResult, IngestStats};
