//! Tests for header analysis

use crate::Error;
use crate::app::services::csv_ingest::column_mapping::{ColumnMapping, is_strain_column};
use csv::StringRecord;

#[test]
fn test_strain_column_pattern() {
    assert!(is_strain_column("H5N1"));
    assert!(is_strain_column("H10N7"));
    assert!(!is_strain_column("h5n1"));
    assert!(!is_strain_column("H5"));
    assert!(!is_strain_column("H5N1_count"));
    assert!(!is_strain_column("species"));
}

#[test]
fn test_analyze_standard_header() {
    let headers = StringRecord::from(vec![
        "latitude",
        "longitude",
        "species",
        "H7N8",
        "H5N1",
        "H5N2",
        "H7N2",
        "timestamp",
        "provenance",
    ]);
    let mapping = ColumnMapping::analyze(&headers).unwrap();

    // Canonical order regardless of header order
    assert_eq!(mapping.strain_columns, vec!["H5N1", "H5N2", "H7N2", "H7N8"]);
    assert_eq!(mapping.get_index("H7N8"), Some(3));
    assert_eq!(mapping.get_index("timestamp"), Some(7));
    assert!(mapping.has_column("provenance"));
    assert!(!mapping.has_column("country"));
    assert_eq!(mapping.stats(), (9, 4));
}

#[test]
fn test_analyze_trims_and_ignores_duplicates() {
    let headers = StringRecord::from(vec![
        " latitude ",
        "longitude",
        "species",
        "timestamp",
        "provenance",
        "latitude",
        "",
    ]);
    let mapping = ColumnMapping::analyze(&headers).unwrap();

    assert_eq!(mapping.get_index("latitude"), Some(0));
    assert!(mapping.strain_columns.is_empty());
    assert_eq!(mapping.stats(), (5, 0));
}

#[test]
fn test_analyze_reports_all_missing_columns() {
    let headers = StringRecord::from(vec!["latitude", "H5N1"]);
    let err = ColumnMapping::analyze(&headers).unwrap_err();

    assert!(matches!(err, Error::Parse { .. }));
    let message = err.to_string();
    for column in ["longitude", "species", "timestamp", "provenance"] {
        assert!(message.contains(column), "missing '{column}' in: {message}");
    }
}
