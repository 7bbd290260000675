//! Test utilities for CSV ingestion testing
//!
//! Shared CSV fixtures and helpers used across the ingestion test modules.

use std::io::Write;
use tempfile::NamedTempFile;

// Test modules
mod column_mapping_tests;
mod field_parser_tests;

/// Header used by the surveillance CSV
pub const STANDARD_HEADER: &str =
    "latitude,longitude,species,H5N1,H5N2,H7N2,H7N8,timestamp,provenance";

/// Helper to create a small but complete surveillance CSV
pub fn create_test_csv() -> String {
    format!(
        "{STANDARD_HEADER}
46.948,7.447,Mallard,2,0,0,0,01.03.2021,Wild
47.376,8.541,Chicken,0,5,0,0,15.06.2020,Farm
46.204,6.143,Mute Swan,1,0,0,3,20.06.2020,Wild
46.520,6.632,Turkey,0,0,0,0,11.11.2019,Farm
"
    )
}

/// Helper to create a CSV exercising every row-level coercion rule
pub fn create_messy_csv() -> String {
    format!(
        "{STANDARD_HEADER}
46.9,7.4,Duck,2,abc,,1.9,01.03.2021,Wild
,7.4,Duck,1,0,0,0,01.03.2021,Wild
46.9,,Duck,1,0,0,0,01.03.2021,Wild
46.9,7.4,Duck,1,0,0,0,,Wild
north,7.4,Duck,1,0,0,0,01.03.2021,Wild
46.9,inf,Duck,1,0,0,0,01.03.2021,Wild
46.9,7.4,Goose,-4,0,0,0,2021-03-01,Farm
46.9,7.4,,1,0,0,0,01.03.2021,Wild
46.9,7.4,Heron,0,0,0,1,32.01.2021,Wild
"
    )
}

/// Helper to create a temporary file with given content
pub fn create_temp_file(content: &str) -> NamedTempFile {
    let mut temp_file = NamedTempFile::new().unwrap();
    write!(temp_file, "{}", content).unwrap();
    temp_file
}
