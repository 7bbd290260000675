//! Aggregation of filtered records for the chart and summary panels
//!
//! - [`timeline`] groups records into contiguous year buckets
//! - [`trend`] compares per-strain case totals across two adjacent periods
//! - [`summary`] computes the summary panel figures and recent reports
//!
//! Every function here is pure: it reads a record slice and returns new
//! values. Records without a parsable date are left out of timeline and
//! trend results.
//!
//! # Example Usage
//!
//! ```rust
//! use std::num::NonZeroU32;
//! use avian_surveillance::app::services::aggregator::{bucket_totals, TimelineRequest};
//!
//! # fn example(records: Vec<avian_surveillance::Record>) {
//! let decades = TimelineRequest::new(NonZeroU32::new(10).unwrap());
//! for bucket in bucket_totals(&records, &decades) {
//!     println!("{}-{}: {}", bucket.start_year, bucket.end_year, bucket.total);
//! }
//! # }
//! ```

pub mod summary;
pub mod timeline;
pub mod trend;

#[cfg(test)]
pub mod tests;

pub use summary::{DataSummary, ProvenanceSplit, StrainShare, recent_reports, summarize};
pub use timeline::{
    BucketMetric, TimelineBucket, TimelineRequest, bucket_start_year, bucket_totals,
};
pub use trend::{TrendDelta, TrendDirection, TrendWindow, trend_deltas, trend_deltas_for};
