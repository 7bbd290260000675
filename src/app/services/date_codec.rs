//! Codec for the DD.MM.YYYY dates used in surveillance records
//!
//! Dates are compared by calendar value once parsed. Parsing never panics:
//! malformed text yields a [`DateParseError`] that callers can absorb per row.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::constants::{DATE_FORMAT, DATE_SEPARATOR};

/// Reasons a date string is rejected
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DateParseError {
    #[error("'{input}' does not have three dot-separated components")]
    WrongComponentCount { input: String },

    #[error("'{input}' has a non-numeric or wrongly sized {component} component")]
    NonNumeric {
        input: String,
        component: &'static str,
    },

    #[error("'{input}' is not a calendar date")]
    OutOfRange { input: String },
}

/// Parse a DD.MM.YYYY string into a calendar date
///
/// Day and month accept one or two digits, the year exactly four. Overflowing
/// values (day 32, month 13, 29.02 in a common year) are rejected rather than
/// rolled into the next month.
pub fn parse_date(text: &str) -> Result<NaiveDate, DateParseError> {
    let input = text.trim();
    let parts: Vec<&str> = input.split(DATE_SEPARATOR).collect();
    if parts.len() != 3 {
        return Err(DateParseError::WrongComponentCount {
            input: input.to_string(),
        });
    }

    let day = parse_component(input, parts[0], "day", 1..=2)?;
    let month = parse_component(input, parts[1], "month", 1..=2)?;
    let year = parse_component(input, parts[2], "year", 4..=4)?;

    let date = NaiveDate::from_ymd_opt(year as i32, month, day).ok_or_else(|| {
        DateParseError::OutOfRange {
            input: input.to_string(),
        }
    })?;

    // from_ymd_opt never normalises, but keep the round-trip guarantee explicit
    if date.day() != day || date.month() != month || date.year() != year as i32 {
        return Err(DateParseError::OutOfRange {
            input: input.to_string(),
        });
    }

    Ok(date)
}

fn parse_component(
    input: &str,
    component: &str,
    name: &'static str,
    digits: std::ops::RangeInclusive<usize>,
) -> Result<u32, DateParseError> {
    if !digits.contains(&component.len()) || !component.bytes().all(|b| b.is_ascii_digit()) {
        return Err(DateParseError::NonNumeric {
            input: input.to_string(),
            component: name,
        });
    }
    component.parse::<u32>().map_err(|_| DateParseError::NonNumeric {
        input: input.to_string(),
        component: name,
    })
}

/// Format a calendar date as DD.MM.YYYY
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// A calendar date that reads and prints as DD.MM.YYYY
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ReportDate(pub NaiveDate);

impl ReportDate {
    pub fn date(&self) -> NaiveDate {
        self.0
    }
}

impl FromStr for ReportDate {
    type Err = DateParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_date(s).map(ReportDate)
    }
}

impl fmt::Display for ReportDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", format_date(self.0))
    }
}

impl From<NaiveDate> for ReportDate {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

impl Serialize for ReportDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format_date(self.0))
    }
}

impl<'de> Deserialize<'de> for ReportDate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}
