//! Year-bucketed totals for timeline charting
//!
//! Records are grouped into fixed-width year buckets keyed by the bucket's
//! first year (`floor(year / size) * size`). The output is contiguous from
//! the first to the last observed bucket, so the chart axis always reaches the
//! latest observed year.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::num::NonZeroU32;
use std::str::FromStr;
use tracing::debug;

use chrono::Datelike;

use crate::app::models::Record;
use crate::constants::DEFAULT_BUCKET_SIZE_YEARS;
use crate::{Error, Result};

/// What a record contributes to its bucket
///
/// One metric is used for a whole aggregation call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BucketMetric {
    /// Each strain with a positive count adds 1
    #[default]
    StrainsDetected,
    /// The record's summed case counts
    CaseTotal,
}

impl BucketMetric {
    pub fn value(&self, record: &Record) -> u64 {
        match self {
            Self::StrainsDetected => record.strains_detected() as u64,
            Self::CaseTotal => record.total_cases(),
        }
    }
}

impl FromStr for BucketMetric {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "strains-detected" | "strains" | "presence" => Ok(Self::StrainsDetected),
            "case-total" | "cases" | "total" => Ok(Self::CaseTotal),
            other => Err(Error::configuration(format!(
                "Unknown bucket metric '{other}' (expected strains-detected or case-total)"
            ))),
        }
    }
}

impl fmt::Display for BucketMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::StrainsDetected => write!(f, "strains-detected"),
            Self::CaseTotal => write!(f, "case-total"),
        }
    }
}

/// One timeline bar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TimelineBucket {
    /// First year covered by the bucket
    pub start_year: i32,
    /// Last year covered by the bucket (inclusive)
    pub end_year: i32,
    /// Sum of the metric over the bucket's records
    pub total: u64,
    /// Number of dated records that fell in the bucket
    pub records: usize,
}

/// Bucketing parameters supplied by the timeline view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimelineRequest {
    pub bucket_size_years: NonZeroU32,
    pub metric: BucketMetric,
    /// Extend the axis so its last bucket covers this year
    pub extend_to_year: Option<i32>,
}

impl Default for TimelineRequest {
    fn default() -> Self {
        Self {
            bucket_size_years: NonZeroU32::new(DEFAULT_BUCKET_SIZE_YEARS)
                .unwrap_or(NonZeroU32::MIN),
            metric: BucketMetric::default(),
            extend_to_year: None,
        }
    }
}

impl TimelineRequest {
    pub fn new(bucket_size_years: NonZeroU32) -> Self {
        Self {
            bucket_size_years,
            ..Self::default()
        }
    }

    pub fn with_metric(mut self, metric: BucketMetric) -> Self {
        self.metric = metric;
        self
    }

    pub fn extending_to(mut self, year: i32) -> Self {
        self.extend_to_year = Some(year);
        self
    }
}

fn size_as_i32(size: NonZeroU32) -> i32 {
    i32::try_from(size.get()).unwrap_or(i32::MAX)
}

/// First year of the bucket containing `year`; floors toward negative infinity
pub fn bucket_start_year(year: i32, bucket_size_years: NonZeroU32) -> i32 {
    let size = size_as_i32(bucket_size_years);
    year.div_euclid(size) * size
}

/// Aggregate records into ascending, contiguous year buckets
///
/// Records without a parsable date are skipped. Buckets between observed
/// ones are present with zero totals. Empty when no record is dated.
pub fn bucket_totals(records: &[Record], request: &TimelineRequest) -> Vec<TimelineBucket> {
    let size = size_as_i32(request.bucket_size_years);
    let mut totals: BTreeMap<i32, (u64, usize)> = BTreeMap::new();
    let mut skipped = 0usize;

    for record in records {
        let Some(date) = record.date() else {
            skipped += 1;
            continue;
        };
        let key = bucket_start_year(date.year(), request.bucket_size_years);
        let entry = totals.entry(key).or_insert((0, 0));
        entry.0 += request.metric.value(record);
        entry.1 += 1;
    }

    let (Some(&first), Some(&last_observed)) = (totals.keys().next(), totals.keys().next_back())
    else {
        debug!("No dated records to bucket ({} skipped)", skipped);
        return Vec::new();
    };

    let last = request
        .extend_to_year
        .map(|year| bucket_start_year(year, request.bucket_size_years))
        .map_or(last_observed, |extended| extended.max(last_observed));

    let mut buckets = Vec::new();
    let mut start = first;
    loop {
        let (total, count) = totals.get(&start).copied().unwrap_or((0, 0));
        buckets.push(TimelineBucket {
            start_year: start,
            end_year: start.saturating_add(size - 1),
            total,
            records: count,
        });
        match start.checked_add(size) {
            Some(next) if next <= last => start = next,
            _ => break,
        }
    }

    debug!(
        "Bucketed {} records into {} buckets of {} years ({} skipped, metric {})",
        records.len() - skipped,
        buckets.len(),
        size,
        skipped,
        request.metric
    );

    buckets
}
