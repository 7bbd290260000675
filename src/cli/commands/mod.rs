//! Command implementations for the surveillance dashboard CLI
//!
//! Each dashboard panel is implemented in its own module:
//! - `summary`: summary figures, strain trends and recent reports
//! - `timeline`: year-bucketed totals over the full history
//! - `facets`: the selectable species, strain and provenance values
//! - `records`: the filtered records shown on the map

pub mod facets;
pub mod records;
pub mod shared;
pub mod summary;
pub mod timeline;

pub use shared::CommandStats;

use crate::Result;
use crate::cli::args::Commands;

/// Dispatch to the handler for the chosen panel
pub async fn run(command: Commands) -> Result<CommandStats> {
    match command {
        Commands::Summary(args) => summary::run_summary(args).await,
        Commands::Timeline(args) => timeline::run_timeline(args).await,
        Commands::Facets(args) => facets::run_facets(args).await,
        Commands::Records(args) => records::run_records(args).await,
    }
}
