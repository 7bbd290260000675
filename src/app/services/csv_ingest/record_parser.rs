//! Individual row parsing for the surveillance CSV

use csv::StringRecord;

use super::column_mapping::ColumnMapping;
use super::field_parsers::{
    get_optional_field, parse_optional_count, parse_required_coordinate, parse_required_string,
};
use crate::Result;
use crate::app::models::{Record, StrainCounts};
use crate::constants::columns;

/// Parse a single row into a Record
///
/// Fails when latitude, longitude, timestamp or species is missing, or a
/// coordinate is not a finite number. Strain counts never fail.
pub fn parse_record(record: &StringRecord, mapping: &ColumnMapping) -> Result<Record> {
    let latitude = parse_required_coordinate(record, mapping, columns::LATITUDE)?;
    let longitude = parse_required_coordinate(record, mapping, columns::LONGITUDE)?;
    let timestamp = parse_required_string(record, mapping, columns::TIMESTAMP)?;
    let species = parse_required_string(record, mapping, columns::SPECIES)?;
    let provenance = get_optional_field(record, mapping, columns::PROVENANCE).unwrap_or_default();

    let strains = parse_strain_counts(record, mapping);

    Record::new(latitude, longitude, species, strains, timestamp, provenance)
}

/// Read every strain column of the row
pub fn parse_strain_counts(record: &StringRecord, mapping: &ColumnMapping) -> StrainCounts {
    mapping
        .strain_columns
        .iter()
        .map(|strain| (strain.as_str(), parse_optional_count(record, mapping, strain)))
        .collect()
}
