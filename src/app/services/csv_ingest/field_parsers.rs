//! Field parsing utilities for surveillance CSV rows
//!
//! Numeric parsing is locale-agnostic: a dot is the only decimal separator.

use super::column_mapping::ColumnMapping;
use crate::{Error, Result};
use csv::StringRecord;
use tracing::debug;

/// Parse a required coordinate; the row is unusable if this fails
pub fn parse_required_coordinate(
    record: &StringRecord,
    mapping: &ColumnMapping,
    field_name: &str,
) -> Result<f64> {
    let value_str = get_required_field(record, mapping, field_name)?;

    match value_str.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(Error::data_validation(format!(
            "Invalid coordinate for {}: '{}'",
            field_name, value_str
        ))),
    }
}

/// Parse a strain case count, coercing anything unusable to 0
///
/// Integers are taken as-is, finite non-negative decimals are truncated, and
/// empty, negative or non-numeric text reads as 0.
pub fn parse_count(value: &str) -> u32 {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return 0;
    }

    if let Ok(count) = trimmed.parse::<u32>() {
        return count;
    }

    match trimmed.parse::<f64>() {
        Ok(v) if v.is_finite() && v >= 0.0 => v.trunc().min(u32::MAX as f64) as u32,
        _ => {
            debug!("Coercing unparsable count '{}' to 0", trimmed);
            0
        }
    }
}

/// Parse an optional count column (absent column or empty value reads as 0)
pub fn parse_optional_count(
    record: &StringRecord,
    mapping: &ColumnMapping,
    field_name: &str,
) -> u32 {
    get_optional_field(record, mapping, field_name)
        .map(parse_count)
        .unwrap_or(0)
}

/// Parse a required string field
pub fn parse_required_string(
    record: &StringRecord,
    mapping: &ColumnMapping,
    field_name: &str,
) -> Result<String> {
    let value_str = get_required_field(record, mapping, field_name)?;
    Ok(value_str.to_string())
}

/// Get a required field value from a CSV record
pub fn get_required_field<'a>(
    record: &'a StringRecord,
    mapping: &ColumnMapping,
    field_name: &str,
) -> Result<&'a str> {
    let index = mapping.get_index(field_name).ok_or_else(|| {
        Error::data_validation(format!("Required column '{}' not found", field_name))
    })?;

    let value = record.get(index).ok_or_else(|| {
        Error::data_validation(format!("No value for required column '{}'", field_name))
    })?;

    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(Error::data_validation(format!(
            "Empty value for required column '{}'",
            field_name
        )));
    }

    Ok(trimmed)
}

/// Get an optional field value from a CSV record
pub fn get_optional_field<'a>(
    record: &'a StringRecord,
    mapping: &ColumnMapping,
    field_name: &str,
) -> Option<&'a str> {
    mapping
        .get_index(field_name)
        .and_then(|index| record.get(index))
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
}
