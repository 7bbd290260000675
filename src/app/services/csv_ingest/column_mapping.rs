//! Column mapping for the surveillance CSV header
//!
//! This module maps header names to positions and identifies strain count
//! columns by name pattern.

use crate::constants::{KNOWN_STRAINS, STRAIN_COLUMN_PATTERN, columns};
use crate::{Error, Result};
use csv::StringRecord;
use regex::Regex;
use std::collections::HashMap;
use std::sync::LazyLock;

static STRAIN_COLUMN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(STRAIN_COLUMN_PATTERN).expect("strain column pattern is valid"));

/// Check whether a header name denotes a strain count column
pub fn is_strain_column(name: &str) -> bool {
    STRAIN_COLUMN.is_match(name)
}

/// Column mapping for the CSV header row
#[derive(Debug, Clone)]
pub struct ColumnMapping {
    /// Column name to index mapping
    pub name_to_index: HashMap<String, usize>,

    /// Strain count columns: known strains first, then extras in header order
    pub strain_columns: Vec<String>,
}

impl ColumnMapping {
    /// Analyze the header row
    ///
    /// Fails when a required column is absent, since no row could then produce
    /// a record.
    pub fn analyze(headers: &StringRecord) -> Result<Self> {
        let mut name_to_index = HashMap::new();
        let mut extra_strains = Vec::new();

        for (index, header) in headers.iter().enumerate() {
            let column_name = header.trim().to_string();
            if column_name.is_empty() {
                continue;
            }

            // First occurrence wins for duplicated headers
            if name_to_index.contains_key(&column_name) {
                continue;
            }

            if is_strain_column(&column_name) && !KNOWN_STRAINS.contains(&column_name.as_str()) {
                extra_strains.push(column_name.clone());
            }
            name_to_index.insert(column_name, index);
        }

        let missing: Vec<&str> = columns::REQUIRED
            .iter()
            .copied()
            .filter(|name| !name_to_index.contains_key(*name))
            .collect();
        if !missing.is_empty() {
            return Err(Error::parse(
                format!("Header row is missing required columns: {}", missing.join(", ")),
                None,
            ));
        }

        let mut strain_columns: Vec<String> = KNOWN_STRAINS
            .iter()
            .filter(|strain| name_to_index.contains_key(**strain))
            .map(|strain| strain.to_string())
            .collect();
        strain_columns.extend(extra_strains);

        Ok(ColumnMapping {
            name_to_index,
            strain_columns,
        })
    }

    /// Get the index for a given column name
    pub fn get_index(&self, column_name: &str) -> Option<usize> {
        self.name_to_index.get(column_name).copied()
    }

    /// Check if a column exists in the mapping
    pub fn has_column(&self, column_name: &str) -> bool {
        self.name_to_index.contains_key(column_name)
    }

    /// (total columns, strain columns)
    pub fn stats(&self) -> (usize, usize) {
        (self.name_to_index.len(), self.strain_columns.len())
    }
}
