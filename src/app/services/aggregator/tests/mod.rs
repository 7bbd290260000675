//! Test fixtures for aggregation testing

use chrono::NaiveDate;
use std::num::NonZeroU32;

pub use crate::app::models::{Record, StrainCounts};

mod trend_tests;

pub fn date(day: u32, month: u32, year: i32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

pub fn years(n: u32) -> NonZeroU32 {
    NonZeroU32::new(n).unwrap()
}

/// Helper to create a record from a raw timestamp and strain counts
pub fn create_record(
    species: &str,
    provenance: &str,
    timestamp: &str,
    strains: &[(&str, u32)],
) -> Record {
    let counts: StrainCounts = strains.iter().map(|&(s, c)| (s, c)).collect();
    Record::new(47.1, 8.3, species, counts, timestamp, provenance).unwrap()
}

/// Records spread over three decades with one malformed date
pub fn create_decade_records() -> Vec<Record> {
    vec![
        create_record("Mallard", "Wild", "03.02.1995", &[("H5N1", 1), ("H5N2", 0)]),
        create_record("Chicken", "Farm", "14.07.1998", &[("H5N1", 2), ("H5N2", 3)]),
        create_record("Mute Swan", "Wild", "09.09.2016", &[("H5N1", 0), ("H7N8", 4)]),
        create_record("Goose", "wild", "22.12.2019", &[("H5N1", 6), ("H7N2", 1)]),
        create_record("Turkey", "Farm", "31.02.2020", &[("H5N1", 9)]),
    ]
}
