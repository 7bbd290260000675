//! Per-strain trend comparison between two adjacent periods
//!
//! The current period is `(as_of - P years, as_of]` and the previous period is
//! the equal-length window immediately before it, `(as_of - 2P years,
//! as_of - P years]`. Records without a parsable date never contribute.

use chrono::{Months, NaiveDate};
use serde::Serialize;
use std::fmt;
use tracing::debug;

use crate::app::models::Record;
use crate::app::services::facets::strain_catalog;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Increase,
    Decrease,
    Unchanged,
}

impl fmt::Display for TrendDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Increase => write!(f, "increase"),
            Self::Decrease => write!(f, "decrease"),
            Self::Unchanged => write!(f, "unchanged"),
        }
    }
}

/// Comparison of one strain's case totals across the two periods
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendDelta {
    pub strain: String,
    pub current: u64,
    pub previous: u64,
    /// Absolute difference between the periods
    pub change: u64,
    /// Absolute percentage change relative to the previous period; 0 when
    /// the previous period had no cases
    pub percent_change: f64,
    pub direction: TrendDirection,
}

impl TrendDelta {
    fn new(strain: impl Into<String>, current: u64, previous: u64) -> Self {
        let signed = current as i64 - previous as i64;
        let percent_change = if previous == 0 {
            0.0
        } else {
            (signed as f64 / previous as f64 * 100.0).abs()
        };
        let direction = match current.cmp(&previous) {
            std::cmp::Ordering::Greater => TrendDirection::Increase,
            std::cmp::Ordering::Less => TrendDirection::Decrease,
            std::cmp::Ordering::Equal => TrendDirection::Unchanged,
        };

        Self {
            strain: strain.into(),
            current,
            previous,
            change: current.abs_diff(previous),
            percent_change,
            direction,
        }
    }

    pub fn is_increase(&self) -> bool {
        self.direction == TrendDirection::Increase
    }

    /// Current minus previous
    pub fn signed_delta(&self) -> i64 {
        self.current as i64 - self.previous as i64
    }
}

/// The two half-open comparison windows for an as-of date
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrendWindow {
    pub as_of: NaiveDate,
    /// Exclusive lower bound of the current period
    pub current_start: NaiveDate,
    /// Exclusive lower bound of the previous period
    pub previous_start: NaiveDate,
}

impl TrendWindow {
    pub fn new(as_of: NaiveDate, period_years: u32) -> Self {
        let years_back = |years: u32| {
            as_of
                .checked_sub_months(Months::new(years.saturating_mul(12)))
                .unwrap_or(NaiveDate::MIN)
        };

        Self {
            as_of,
            current_start: years_back(period_years),
            previous_start: years_back(period_years.saturating_mul(2)),
        }
    }

    pub fn in_current(&self, date: NaiveDate) -> bool {
        date > self.current_start && date <= self.as_of
    }

    pub fn in_previous(&self, date: NaiveDate) -> bool {
        date > self.previous_start && date <= self.current_start
    }
}

/// Trend deltas for every strain in the records' catalog
pub fn trend_deltas(records: &[Record], as_of: NaiveDate, period_years: u32) -> Vec<TrendDelta> {
    let strains = strain_catalog(records);
    trend_deltas_for(records, &strains, as_of, period_years)
}

/// Trend deltas for an explicit strain list, in the list's order
pub fn trend_deltas_for(
    records: &[Record],
    strains: &[String],
    as_of: NaiveDate,
    period_years: u32,
) -> Vec<TrendDelta> {
    let window = TrendWindow::new(as_of, period_years);
    let mut current = vec![0u64; strains.len()];
    let mut previous = vec![0u64; strains.len()];

    for record in records {
        let Some(date) = record.date() else {
            continue;
        };
        let bucket = if window.in_current(date) {
            &mut current
        } else if window.in_previous(date) {
            &mut previous
        } else {
            continue;
        };
        for (total, strain) in bucket.iter_mut().zip(strains) {
            *total += u64::from(record.count(strain));
        }
    }

    debug!(
        "Computed {} trend deltas as of {} over {} year periods",
        strains.len(),
        as_of,
        period_years
    );

    strains
        .iter()
        .zip(current.into_iter().zip(previous))
        .map(|(strain, (cur, prev))| TrendDelta::new(strain.as_str(), cur, prev))
        .collect()
}
