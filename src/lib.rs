//! Avian Surveillance Library
//!
//! A Rust library for exploring geotagged avian-influenza surveillance
//! records: loading them from a CSV resource, filtering them by date, species,
//! strain and provenance, and aggregating them for timeline, trend and summary
//! panels.
//!
//! This library provides tools for:
//! - Fetching the CSV from a URL or local path and parsing it into typed records
//! - Parsing and formatting DD.MM.YYYY report dates
//! - Deriving the selectable filter facets from a record set
//! - Applying compound filters independently for the map and timeline views
//! - Bucketing records by year spans and computing period-over-period trends
//! - Layered configuration and structured error handling

pub mod config;
pub mod constants;
pub mod error;

// Core application modules
pub mod app {
    pub mod models;
    pub mod session;
    pub mod services {
        pub mod aggregator;
        pub mod csv_ingest;
        pub mod date_codec;
        pub mod facets;
        pub mod filter_engine;
    }
}

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
}

// Re-export commonly used types
pub use app::models::{Record, StrainCounts};
pub use app::services::filter_engine::{DateRange, FilterState};
pub use app::session::DashboardSession;
pub use config::Config;
pub use error::{Error, Result};
