//! Application constants for the surveillance pipeline
//!
//! This module contains column names, strain identifiers, date formats and
//! default values used throughout the crate.

// =============================================================================
// Strain Identifiers
// =============================================================================

/// Strains tracked by the surveillance dataset, in canonical display order
pub const KNOWN_STRAINS: &[&str] = &["H5N1", "H5N2", "H7N2", "H7N8"];

/// Header pattern recognised as a strain count column (e.g. H5N1, H10N7)
pub const STRAIN_COLUMN_PATTERN: &str = r"^H\d+N\d+$";

// =============================================================================
// CSV Columns
// =============================================================================

/// Column names in the surveillance CSV
pub mod columns {
    pub const LATITUDE: &str = "latitude";
    pub const LONGITUDE: &str = "longitude";
    pub const SPECIES: &str = "species";
    pub const TIMESTAMP: &str = "timestamp";
    pub const PROVENANCE: &str = "provenance";

    /// Columns that must be present in the header row
    pub const REQUIRED: &[&str] = &[LATITUDE, LONGITUDE, SPECIES, TIMESTAMP, PROVENANCE];
}

/// Default CSV field delimiter
pub const DEFAULT_DELIMITER: char = ',';

// =============================================================================
// Dates
// =============================================================================

/// chrono format string for DD.MM.YYYY dates
pub const DATE_FORMAT: &str = "%d.%m.%Y";

/// Separator between date components
pub const DATE_SEPARATOR: char = '.';

// =============================================================================
// Provenance
// =============================================================================

/// Provenance label for wild birds (compared case-insensitively)
pub const WILD_PROVENANCE: &str = "wild";

/// Display label for every non-wild provenance
pub const LIVESTOCK_LABEL: &str = "Livestock";

// =============================================================================
// Defaults
// =============================================================================

/// Default CSV resource
pub const DEFAULT_DATA_SOURCE: &str = "fake_bird_data_switzerland_v2.csv";

/// Default timeline bucket width in years
pub const DEFAULT_BUCKET_SIZE_YEARS: u32 = 10;

/// Trend periods offered by the dashboard, in years
pub const TREND_PERIOD_CHOICES: &[u32] = &[10, 50, 100, 500];

/// Default trend period in years
pub const DEFAULT_TREND_PERIOD_YEARS: u32 = 50;

/// Number of reports in the recent reports panel
pub const DEFAULT_RECENT_REPORTS: usize = 10;

/// Ingestion success rate (percent) below which a warning is logged
pub const INGEST_SUCCESS_THRESHOLD: f64 = 90.0;

/// Environment variable overriding the data source
pub const ENV_DATA_SOURCE: &str = "AVIAN_DATA_SOURCE";

/// Environment variable overriding the log level
pub const ENV_LOG_LEVEL: &str = "AVIAN_LOG_LEVEL";

/// Application directory name under the user config directory
pub const APP_DIR_NAME: &str = "avian-surveillance";

/// Config file name
pub const CONFIG_FILE_NAME: &str = "config.toml";
