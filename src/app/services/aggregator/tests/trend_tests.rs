//! Tests for period-over-period trend deltas

use super::*;
use crate::app::services::aggregator::{
    TrendDelta, TrendDirection, TrendWindow, trend_deltas, trend_deltas_for,
};

fn delta_for<'a>(deltas: &'a [TrendDelta], strain: &str) -> &'a TrendDelta {
    deltas.iter().find(|d| d.strain == strain).unwrap()
}

#[test]
fn test_decrease_scenario() {
    let records = vec![
        create_record("Mallard", "Wild", "15.03.2020", &[("H5N1", 2)]),
        create_record("Goose", "Wild", "30.11.2020", &[("H5N1", 3)]),
        create_record("Chicken", "Farm", "01.01.2019", &[("H5N1", 4)]),
        create_record("Turkey", "Farm", "31.12.2019", &[("H5N1", 6)]),
    ];

    let deltas = trend_deltas(&records, date(31, 12, 2020), 1);
    let h5n1 = delta_for(&deltas, "H5N1");

    assert_eq!(h5n1.current, 5);
    assert_eq!(h5n1.previous, 10);
    assert_eq!(h5n1.signed_delta(), -5);
    assert_eq!(h5n1.change, 5);
    assert!((h5n1.percent_change - 50.0).abs() < f64::EPSILON);
    assert_eq!(h5n1.direction, TrendDirection::Decrease);
    assert!(!h5n1.is_increase());
}

#[test]
fn test_increase_and_zero_previous() {
    let records = vec![
        create_record("Mallard", "Wild", "10.10.2020", &[("H5N2", 4), ("H7N8", 2)]),
        create_record("Goose", "Wild", "10.10.2019", &[("H5N2", 1)]),
    ];

    let deltas = trend_deltas(&records, date(31, 12, 2020), 1);

    let h5n2 = delta_for(&deltas, "H5N2");
    assert!(h5n2.is_increase());
    assert_eq!(h5n2.change, 3);
    assert!((h5n2.percent_change - 300.0).abs() < 1e-9);

    // No previous cases: percent change is reported as zero
    let h7n8 = delta_for(&deltas, "H7N8");
    assert!(h7n8.is_increase());
    assert_eq!(h7n8.percent_change, 0.0);

    let h7n2 = delta_for(&deltas, "H7N2");
    assert_eq!(h7n2.direction, TrendDirection::Unchanged);
    assert_eq!(h7n2.change, 0);
}

#[test]
fn test_window_boundaries_are_half_open() {
    let window = TrendWindow::new(date(31, 12, 2020), 1);

    assert!(window.in_current(date(31, 12, 2020)));
    assert!(!window.in_current(date(31, 12, 2019)));
    assert!(window.in_previous(date(31, 12, 2019)));
    assert!(!window.in_previous(date(31, 12, 2018)));
    assert!(!window.in_current(date(1, 1, 2021)));
}

#[test]
fn test_records_outside_windows_and_undated_are_ignored() {
    let records = vec![
        create_record("Mallard", "Wild", "01.06.2020", &[("H5N1", 1)]),
        create_record("Mallard", "Wild", "01.06.1990", &[("H5N1", 100)]),
        create_record("Mallard", "Wild", "01.06.2030", &[("H5N1", 100)]),
        create_record("Mallard", "Wild", "??.06.2020", &[("H5N1", 100)]),
    ];

    let deltas = trend_deltas(&records, date(31, 12, 2020), 10);
    let h5n1 = delta_for(&deltas, "H5N1");

    assert_eq!(h5n1.current, 1);
    assert_eq!(h5n1.previous, 0);
}

#[test]
fn test_catalog_order_and_extra_strains() {
    let records = vec![create_record(
        "Mallard",
        "Wild",
        "01.06.2020",
        &[("H9N2", 1), ("H3N8", 2), ("H5N1", 1)],
    )];

    let strains: Vec<String> = trend_deltas(&records, date(1, 1, 2021), 50)
        .into_iter()
        .map(|d| d.strain)
        .collect();

    assert_eq!(strains, vec!["H5N1", "H5N2", "H7N2", "H7N8", "H3N8", "H9N2"]);
}

#[test]
fn test_explicit_strain_list() {
    let records = vec![create_record("Mallard", "Wild", "01.06.2020", &[("H5N1", 7)])];
    let strains = vec!["H7N2".to_string(), "H5N1".to_string()];

    let deltas = trend_deltas_for(&records, &strains, date(1, 1, 2021), 10);

    assert_eq!(deltas.len(), 2);
    assert_eq!(deltas[0].strain, "H7N2");
    assert_eq!(deltas[1].current, 7);
}

#[test]
fn test_large_period_does_not_overflow() {
    let records = vec![create_record("Mallard", "Wild", "01.06.1700", &[("H5N1", 2)])];

    let deltas = trend_deltas(&records, date(1, 1, 2021), 500);

    assert_eq!(delta_for(&deltas, "H5N1").current, 2);
}
