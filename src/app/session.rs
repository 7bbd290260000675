//! Dashboard session state
//!
//! A [`DashboardSession`] owns the records loaded once at startup together
//! with the user's current [`FilterState`]. Every view is derived from those
//! two on demand; nothing is cached, so a filter change is reflected by the
//! next call.

use chrono::NaiveDate;
use tracing::{Level, debug, info};

use crate::app::models::Record;
use crate::app::services::aggregator::{
    DataSummary, TimelineBucket, TimelineRequest, TrendDelta, bucket_totals, recent_reports,
    summarize, trend_deltas_for,
};
use crate::app::services::csv_ingest::{CsvIngestor, DataSource, IngestStats};
use crate::app::services::facets::{FacetSet, strain_catalog};
use crate::app::services::filter_engine::{
    DateRange, DateScope, FilterBreakdown, FilterState, apply_filters_scoped,
    get_filter_breakdown,
};
use crate::config::Config;
use crate::Result;

#[derive(Debug, Clone)]
pub struct DashboardSession {
    records: Vec<Record>,
    strains: Vec<String>,
    filter: FilterState,
    stats: IngestStats,
}

impl DashboardSession {
    /// Fetch and parse the configured source once
    pub async fn load(source: &DataSource, config: &Config) -> Result<Self> {
        let ingestor = CsvIngestor::new().with_delimiter(config.data.delimiter)?;
        let result = ingestor.ingest(source).await?;

        info!(
            "Session loaded {} records from {} ({} strain columns)",
            result.records.len(),
            source,
            result.strains.len()
        );

        let mut session = Self::from_records(result.records);
        // Header strain columns count even when no row has a value for them
        let known = std::mem::take(&mut session.strains);
        session.strains = reorder_catalog(known.into_iter().chain(result.strains).collect());
        session.stats = result.stats;
        Ok(session)
    }

    /// Start a session over already parsed records with the default filter
    pub fn from_records(records: Vec<Record>) -> Self {
        let strains = strain_catalog(&records);
        let filter = FilterState::for_records(&records);
        let stats = IngestStats {
            total_rows: records.len(),
            records_parsed: records.len(),
            unparsable_dates: records.iter().filter(|r| r.date().is_none()).count(),
            ..IngestStats::default()
        };

        Self {
            records,
            strains,
            filter,
            stats,
        }
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Strain columns known to the session, in canonical order
    pub fn strains(&self) -> &[String] {
        &self.strains
    }

    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    pub fn filter_mut(&mut self) -> &mut FilterState {
        &mut self.filter
    }

    pub fn set_filter(&mut self, filter: FilterState) {
        self.filter = filter;
    }

    pub fn stats(&self) -> &IngestStats {
        &self.stats
    }

    /// Facet choices from the full record set, not the filtered one
    pub fn facets(&self) -> FacetSet {
        FacetSet::from_records(&self.records)
    }

    /// Records passing every facet, for the map and summary panels
    pub fn map_view(&self) -> Vec<Record> {
        let view = apply_filters_scoped(&self.records, &self.filter, DateScope::Bounded);
        if tracing::enabled!(Level::DEBUG) {
            debug!("Map view {}", self.filter_breakdown().summary());
        }
        view
    }

    /// How many records each facet removes from the map view
    pub fn filter_breakdown(&self) -> FilterBreakdown {
        get_filter_breakdown(&self.records, &self.filter, DateScope::Bounded)
    }

    /// Records passing every facet except the date range
    pub fn timeline_view(&self) -> Vec<Record> {
        apply_filters_scoped(&self.records, &self.filter, DateScope::FullHistory)
    }

    pub fn timeline(&self, request: &TimelineRequest) -> Vec<TimelineBucket> {
        bucket_totals(&self.timeline_view(), request)
    }

    /// Date the trend periods end on: the range end, else the latest record
    pub fn as_of_date(&self) -> Option<NaiveDate> {
        self.filter
            .date_range
            .map(|range| range.end())
            .filter(|end| *end != NaiveDate::MAX)
            .or_else(|| DateRange::spanning(&self.records).map(|span| span.end()))
    }

    /// Per-strain trend deltas; empty without any dated record
    pub fn trends(&self, period_years: u32) -> Vec<TrendDelta> {
        match self.as_of_date() {
            Some(as_of) => {
                // The trend windows reach before the selected range, so the
                // date facet is not applied here
                trend_deltas_for(&self.timeline_view(), &self.strains, as_of, period_years)
            }
            None => Vec::new(),
        }
    }

    pub fn summary(&self) -> DataSummary {
        summarize(&self.map_view())
    }

    /// Most recent reports within the map view
    pub fn recent_reports(&self, limit: usize) -> Vec<Record> {
        let view = self.map_view();
        recent_reports(&view, limit).into_iter().cloned().collect()
    }

    pub fn toggle_species(&mut self, species: &str) {
        self.filter.toggle_species(species);
    }

    pub fn toggle_strain(&mut self, strain: &str) {
        self.filter.toggle_strain(strain);
    }

    pub fn toggle_provenance(&mut self, provenance: &str) {
        self.filter.toggle_provenance(provenance);
    }

    pub fn set_date_range(&mut self, range: Option<DateRange>) {
        self.filter.set_date_range(range);
    }

    pub fn set_range_start(&mut self, start: NaiveDate) -> Result<()> {
        self.filter.set_range_start(start)
    }

    pub fn set_range_end(&mut self, end: NaiveDate) -> Result<()> {
        self.filter.set_range_end(end)
    }

    pub fn clear_facets(&mut self) {
        self.filter.clear_facets();
    }

    /// Restore the default filter for the loaded records
    pub fn reset_filter(&mut self) {
        self.filter = FilterState::for_records(&self.records);
    }
}

/// Known strains first in fixed order, then the rest alphabetically
fn reorder_catalog(strains: Vec<String>) -> Vec<String> {
    use crate::constants::KNOWN_STRAINS;

    let mut extras: Vec<String> = strains
        .into_iter()
        .filter(|s| !KNOWN_STRAINS.contains(&s.as_str()))
        .collect();
    extras.sort_unstable();
    extras.dedup();

    KNOWN_STRAINS
        .iter()
        .map(|s| s.to_string())
        .chain(extras)
        .collect()
}
