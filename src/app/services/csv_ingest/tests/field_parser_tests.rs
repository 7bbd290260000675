//! Tests for field coercion helpers

use crate::app::services::csv_ingest::column_mapping::ColumnMapping;
use crate::app::services::csv_ingest::field_parsers::{
    get_optional_field, get_required_field, parse_count, parse_optional_count,
    parse_required_coordinate,
};
use csv::StringRecord;

fn mapping() -> ColumnMapping {
    let headers = StringRecord::from(vec![
        "latitude",
        "longitude",
        "species",
        "H5N1",
        "timestamp",
        "provenance",
    ]);
    ColumnMapping::analyze(&headers).unwrap()
}

#[test]
fn test_parse_count_integers_and_decimals() {
    assert_eq!(parse_count("0"), 0);
    assert_eq!(parse_count("17"), 17);
    assert_eq!(parse_count(" 4 "), 4);
    assert_eq!(parse_count("2.9"), 2);
    assert_eq!(parse_count("1e2"), 100);
}

#[test]
fn test_parse_count_coerces_garbage_to_zero() {
    assert_eq!(parse_count(""), 0);
    assert_eq!(parse_count("n/a"), 0);
    assert_eq!(parse_count("-3"), 0);
    assert_eq!(parse_count("NaN"), 0);
    assert_eq!(parse_count("inf"), 0);
    // Comma decimal separators are not accepted
    assert_eq!(parse_count("2,5"), 0);
}

#[test]
fn test_parse_required_coordinate() {
    let mapping = mapping();
    let row = StringRecord::from(vec!["46.948", "-7.5", "Duck", "1", "01.03.2021", "Wild"]);

    assert_eq!(
        parse_required_coordinate(&row, &mapping, "latitude").unwrap(),
        46.948
    );
    assert_eq!(
        parse_required_coordinate(&row, &mapping, "longitude").unwrap(),
        -7.5
    );
}

#[test]
fn test_parse_required_coordinate_rejects_bad_values() {
    let mapping = mapping();
    for bad in ["", "abc", "NaN", "-inf", "46,9"] {
        let row = StringRecord::from(vec![bad, "7.4", "Duck", "1", "01.03.2021", "Wild"]);
        assert!(
            parse_required_coordinate(&row, &mapping, "latitude").is_err(),
            "'{bad}' should be rejected"
        );
    }
}

#[test]
fn test_required_and_optional_fields() {
    let mapping = mapping();
    let row = StringRecord::from(vec!["46.9", "7.4", "  ", "", "01.03.2021"]);

    assert!(get_required_field(&row, &mapping, "species").is_err());
    assert!(get_required_field(&row, &mapping, "provenance").is_err()); // short row
    assert!(get_required_field(&row, &mapping, "unknown").is_err());
    assert_eq!(
        get_required_field(&row, &mapping, "timestamp").unwrap(),
        "01.03.2021"
    );

    assert_eq!(get_optional_field(&row, &mapping, "H5N1"), None);
    assert_eq!(get_optional_field(&row, &mapping, "provenance"), None);
    assert_eq!(parse_optional_count(&row, &mapping, "H5N1"), 0);
    assert_eq!(parse_optional_count(&row, &mapping, "H7N8"), 0);
}
