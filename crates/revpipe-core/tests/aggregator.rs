use std::collections::HashMap;

use polars::prelude::*;
use revpipe_core::aggregator::revenue_summary;
use revpipe_core::error::PipelineError;

fn completed() -> DataFrame {
    df![
        "city" => &[Some("X"), Some("X"), Some("X"), Some("Y")],
        "category" => &[Some("A"), Some("A"), Some("A"), Some("B")],
        "sale_date" => &["2024-01-01", "2024-01-01", "2024-01-01", "2024-01-01"],
        "Price" => &[Some(10.0f64), Some(30.0), None, Some(5.0)],
    ]
    .expect("completed frame")
}

type GroupKey = (Option<String>, Option<String>, Option<String>);
type GroupStats = (Option<f64>, Option<f64>, Option<i64>);

fn group_map(summary: &DataFrame) -> HashMap<GroupKey, GroupStats> {
    let city = summary.column("city").expect("city").str().expect("str");
    let category = summary
        .column("category")
        .expect("category")
        .str()
        .expect("str");
    let sale_date = summary
        .column("sale_date")
        .expect("sale_date")
        .str()
        .expect("str");
    let revenue = summary
        .column("total_revenue")
        .expect("total_revenue")
        .f64()
        .expect("f64");
    let avg = summary
        .column("avg_order_value")
        .expect("avg_order_value")
        .f64()
        .expect("f64");
    let count = summary
        .column("total_sales")
        .expect("total_sales")
        .i64()
        .expect("i64");

    let mut map = HashMap::new();
    for idx in 0..summary.height() {
        map.insert(
            (
                city.get(idx).map(str::to_string),
                category.get(idx).map(str::to_string),
                sale_date.get(idx).map(str::to_string),
            ),
            (revenue.get(idx), avg.get(idx), count.get(idx)),
        );
    }
    map
}

#[test]
fn one_row_per_distinct_dimension_triple() {
    let summary = revenue_summary(&completed()).expect("aggregate");
    assert_eq!(summary.height(), 2);
}

#[test]
fn output_columns_are_ordered() {
    let summary = revenue_summary(&completed()).expect("aggregate");
    let names: Vec<String> = summary
        .get_column_names()
        .iter()
        .map(|name| name.to_string())
        .collect();
    assert_eq!(
        names,
        vec![
            "city",
            "category",
            "sale_date",
            "total_revenue",
            "avg_order_value",
            "total_sales",
        ]
    );
}

#[test]
fn count_keeps_null_prices_that_sum_and_mean_skip() {
    let summary = revenue_summary(&completed()).expect("aggregate");
    let groups = group_map(&summary);

    let key = (
        Some("X".to_string()),
        Some("A".to_string()),
        Some("2024-01-01".to_string()),
    );
    let (revenue, avg, count) = groups.get(&key).expect("group present");

    // three rows in the group, two with a price
    assert_eq!(*count, Some(3));
    assert_eq!(*revenue, Some(40.0));
    assert_eq!(*avg, Some(20.0));

    let other = (
        Some("Y".to_string()),
        Some("B".to_string()),
        Some("2024-01-01".to_string()),
    );
    assert_eq!(groups.get(&other), Some(&(Some(5.0), Some(5.0), Some(1))));
}

#[test]
fn null_dimension_values_group_together() {
    let frame = df![
        "city" => &[None::<&str>, None::<&str>],
        "category" => &[Some("A"), Some("A")],
        "sale_date" => &["2024-01-01", "2024-01-01"],
        "Price" => &[10.0f64, 20.0],
    ]
    .expect("frame");

    let summary = revenue_summary(&frame).expect("aggregate");
    assert_eq!(summary.height(), 1);

    let groups = group_map(&summary);
    let key = (None, Some("A".to_string()), Some("2024-01-01".to_string()));
    assert_eq!(groups.get(&key), Some(&(Some(30.0), Some(15.0), Some(2))));
}

#[test]
fn all_null_price_group_sums_to_zero_with_null_mean() {
    let frame = df![
        "city" => &["X"],
        "category" => &["A"],
        "sale_date" => &["2024-01-01"],
        "Price" => &[None::<f64>],
    ]
    .expect("frame");

    let summary = revenue_summary(&frame).expect("aggregate");
    let groups = group_map(&summary);
    let key = (
        Some("X".to_string()),
        Some("A".to_string()),
        Some("2024-01-01".to_string()),
    );
    assert_eq!(groups.get(&key), Some(&(Some(0.0), None, Some(1))));
}

#[test]
fn non_numeric_price_is_rejected() {
    let frame = df![
        "city" => &["X"],
        "category" => &["A"],
        "sale_date" => &["2024-01-01"],
        "Price" => &["ten"],
    ]
    .expect("frame");

    let err = revenue_summary(&frame).expect_err("non-numeric price");
    assert!(matches!(err, PipelineError::NonNumericColumn { .. }));
}

#[test]
fn missing_dimension_column_is_rejected() {
    let frame = df![
        "city" => &["X"],
        "sale_date" => &["2024-01-01"],
        "Price" => &[1.0f64],
    ]
    .expect("frame");

    let err = revenue_summary(&frame).expect_err("missing category");
    assert!(matches!(err, PipelineError::MissingColumn { .. }));
}
