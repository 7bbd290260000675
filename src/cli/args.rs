//! Command-line argument definitions for the surveillance dashboard
//!
//! This module defines the CLI interface using the clap derive API. Every
//! subcommand shares the data source, logging, output and filter flags in
//! [`CommonArgs`].

use crate::app::services::aggregator::BucketMetric;
use crate::app::services::date_codec::ReportDate;
use crate::app::services::filter_engine::{DateRange, FilterState};
use crate::{Error, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::num::NonZeroU32;
use std::path::PathBuf;

/// CLI arguments for the avian-influenza surveillance dashboard
///
/// Loads geotagged surveillance records once and prints the dashboard panels
/// for the selected filters.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "avian-surveillance",
    version,
    about = "Explore avian-influenza surveillance records from a CSV resource",
    long_about = "Loads geotagged avian-influenza surveillance records from a local CSV file or \
                  an http(s) URL, applies species, strain, provenance and date filters, and prints \
                  the summary, timeline, facet and record panels as text, JSON or CSV."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available dashboard panels
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Summary figures, strain trends and the most recent reports
    Summary(SummaryArgs),
    /// Year-bucketed totals over the full history
    Timeline(TimelineArgs),
    /// Species, strain and provenance choices in the data
    Facets(FacetsArgs),
    /// The records passing every filter
    Records(RecordsArgs),
}

/// Flags shared by every subcommand
#[derive(Debug, Clone, Default, clap::Args)]
pub struct CommonArgs {
    /// CSV source (local path or http/https URL)
    ///
    /// Overrides the config file and the AVIAN_DATA_SOURCE variable.
    #[arg(
        short = 's',
        long = "source",
        value_name = "PATH|URL",
        help = "CSV source as a local path or http(s) URL"
    )]
    pub source: Option<String>,

    /// Path to configuration file
    ///
    /// TOML configuration file. If not specified, looks for
    /// <config dir>/avian-surveillance/config.toml
    #[arg(
        short = 'c',
        long = "config",
        value_name = "FILE",
        help = "Path to configuration file (TOML format)"
    )]
    pub config_file: Option<PathBuf>,

    /// CSV field delimiter
    #[arg(long = "delimiter", value_name = "CHAR", help = "CSV field delimiter")]
    pub delimiter: Option<char>,

    /// Species to keep (repeatable or comma separated)
    #[arg(long = "species", value_name = "NAME", value_delimiter = ',')]
    pub species: Vec<String>,

    /// Strains that must have a positive count (any of)
    #[arg(long = "strain", value_name = "STRAIN", value_delimiter = ',')]
    pub strains: Vec<String>,

    /// Provenances to keep
    #[arg(long = "provenance", value_name = "LABEL", value_delimiter = ',')]
    pub provenances: Vec<String>,

    /// First day of the date range (DD.MM.YYYY)
    #[arg(long = "from", value_name = "DD.MM.YYYY")]
    pub from: Option<ReportDate>,

    /// Last day of the date range (DD.MM.YYYY)
    #[arg(long = "to", value_name = "DD.MM.YYYY")]
    pub to: Option<ReportDate>,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    /// Suppress output (quiet mode)
    #[arg(
        short = 'q',
        long = "quiet",
        help = "Suppress output except errors",
        conflicts_with = "verbose"
    )]
    pub quiet: bool,

    /// Output format for results
    #[arg(
        long = "format",
        value_enum,
        default_value = "human",
        help = "Output format for results"
    )]
    pub output_format: OutputFormat,
}

/// Arguments for the summary command
#[derive(Debug, Clone, Parser)]
pub struct SummaryArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Trend comparison period in years (the dashboard offers 10, 50, 100, 500)
    #[arg(short = 'p', long = "period", value_name = "YEARS")]
    pub period: Option<u32>,

    /// Number of recent reports to list
    #[arg(short = 'n', long = "recent", value_name = "COUNT")]
    pub recent: Option<usize>,
}

/// Arguments for the timeline command
#[derive(Debug, Clone, Parser)]
pub struct TimelineArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Width of each timeline bucket in years
    #[arg(short = 'b', long = "bucket-years", value_name = "YEARS")]
    pub bucket_years: Option<NonZeroU32>,

    /// What each record contributes (strains-detected or case-total)
    #[arg(short = 'm', long = "metric", value_name = "METRIC")]
    pub metric: Option<BucketMetric>,

    /// Extend the axis to cover this year
    #[arg(long = "extend-to", value_name = "YEAR")]
    pub extend_to: Option<i32>,
}

/// Arguments for the facets command
#[derive(Debug, Clone, Parser)]
pub struct FacetsArgs {
    #[command(flatten)]
    pub common: CommonArgs,
}

/// Arguments for the records command
#[derive(Debug, Clone, Parser)]
pub struct RecordsArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Show at most this many records
    #[arg(short = 'l', long = "limit", value_name = "COUNT")]
    pub limit: Option<usize>,
}

/// Output format options for machine-readable results
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output
    #[default]
    Human,
    /// JSON format for scripting
    Json,
    /// CSV format for data analysis
    Csv,
}

impl CommonArgs {
    /// Validate the shared arguments for consistency
    pub fn validate(&self) -> Result<()> {
        if let (Some(from), Some(to)) = (self.from, self.to) {
            if from.date() > to.date() {
                return Err(Error::InvalidDateRange {
                    start: from.date(),
                    end: to.date(),
                });
            }
        }

        if let Some(config_file) = &self.config_file {
            if !config_file.exists() {
                return Err(Error::configuration(format!(
                    "Config file does not exist: {}",
                    config_file.display()
                )));
            }
        }

        if let Some(source) = &self.source {
            if source.trim().is_empty() {
                return Err(Error::configuration("Source cannot be empty"));
            }
        }

        Ok(())
    }

    /// Determine the log level from verbosity flags, if they set one
    pub fn get_log_level(&self) -> Option<&'static str> {
        if self.quiet {
            Some("error")
        } else {
            match self.verbose {
                0 => None,
                1 => Some("info"),
                2 => Some("debug"),
                _ => Some("trace"),
            }
        }
    }

    /// Check if we should show the loading spinner (not in quiet mode)
    pub fn show_progress(&self) -> bool {
        !self.quiet
    }

    /// Layer the facet and date flags over a default filter state
    ///
    /// A single `--from` or `--to` replaces that side of the default range.
    pub fn apply_filters(&self, mut state: FilterState) -> Result<FilterState> {
        state = state
            .with_species(self.species.iter().map(|s| s.trim()))
            .with_strains(self.strains.iter().map(|s| s.trim()))
            .with_provenances(self.provenances.iter().map(|s| s.trim()));

        match (self.from, self.to) {
            (Some(from), Some(to)) => {
                state.set_date_range(Some(DateRange::new(from.date(), to.date())?));
            }
            (Some(from), None) => state.set_range_start(from.date())?,
            (None, Some(to)) => state.set_range_end(to.date())?,
            (None, None) => {}
        }

        Ok(state)
    }
}
