//! Filter engine for surveillance records
//!
//! Applies a compound predicate (date range ∩ species ∩ strain presence ∩
//! provenance) to a record set. Each facet's empty selection matches all
//! records.
//!
//! # Views
//!
//! The same source records are filtered independently for different views.
//! The map view applies every facet; the timeline view uses
//! [`DateScope::FullHistory`] so it keeps the whole history while still
//! honouring the species, strain and provenance selections.
//!
//! # Example Usage
//!
//! ```rust
//! use avian_surveillance::app::services::filter_engine::{apply_filters, FilterState};
//!
//! # fn example(records: Vec<avian_surveillance::Record>) {
//! let state = FilterState::for_records(&records).with_strains(["H5N1"]);
//! let h5n1_only = apply_filters(&records, &state);
//! println!("{} of {} records carry H5N1", h5n1_only.len(), records.len());
//! # }
//! ```

pub mod filter;
pub mod state;

#[cfg(test)]
pub mod tests;

pub use filter::{
    FilterBreakdown, apply_filters, apply_filters_scoped, get_filter_breakdown, passes_filters,
};
pub use state::{DateRange, DateScope, FilterState};
