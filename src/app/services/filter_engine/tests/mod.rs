//! Test fixtures for filter engine testing

use chrono::NaiveDate;

pub use crate::app::models::{Record, StrainCounts};


pub fn date(day: u32, month: u32, year: i32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

/// Helper to create a record with the given strain counts
pub fn create_record(
    species: &str,
    provenance: &str,
    timestamp: &str,
    strains: &[(&str, u32)],
) -> Record {
    let counts: StrainCounts = strains.iter().map(|&(s, c)| (s, c)).collect();
    Record::new(46.9, 7.4, species, counts, timestamp, provenance).unwrap()
}

/// Mixed record set spanning 2019-2021 with one malformed date
pub fn create_test_records() -> Vec<Record> {
    vec![
        create_record("Mallard", "Wild", "01.03.2021", &[("H5N1", 2), ("H5N2", 0)]),
        create_record("Chicken", "Farm", "15.06.2020", &[("H5N1", 0), ("H5N2", 5)]),
        create_record("Mute Swan", "Wild", "20.06.2020", &[("H5N1", 1), ("H7N8", 3)]),
        create_record("Turkey", "Farm", "11.11.2019", &[("H5N1", 0), ("H7N2", 0)]),
        create_record("Mallard", "Wild", "not a date", &[("H5N1", 4)]),
    ]
}
