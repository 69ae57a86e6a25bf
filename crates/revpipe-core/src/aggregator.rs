use polars::prelude::*;

use crate::error::{PipelineError, Result};
use crate::sources::ensure_columns;

/// Dimension triple the revenue metrics are grouped on.
pub const GROUP_COLUMNS: [&str; 3] = ["city", "category", "sale_date"];

/// Groups completed sales by (city, category, sale_date) and reduces each
/// group to revenue metrics. Null keys group together. `total_sales` counts
/// every row in the group; `total_revenue` and `avg_order_value` skip null
/// prices, so the two can disagree on the rows they cover.
///
/// Row order of the result is unspecified.
pub fn revenue_summary(completed: &DataFrame) -> Result<DataFrame> {
    let mut required: Vec<&str> = GROUP_COLUMNS.to_vec();
    required.push("Price");
    ensure_columns(completed, "completed sales", &required)?;

    let price_dtype = completed.column("Price")?.dtype().clone();
    if !is_numeric(&price_dtype) {
        return Err(PipelineError::NonNumericColumn {
            column: "Price".to_string(),
            dtype: price_dtype.to_string(),
        });
    }

    let summary = completed
        .clone()
        .lazy()
        .group_by(GROUP_COLUMNS.map(|name| col(name)))
        .agg([
            col("Price").sum().alias("total_revenue"),
            col("Price").mean().alias("avg_order_value"),
            len().cast(DataType::Int64).alias("total_sales"),
        ])
        .collect()?;

    Ok(summary)
}

fn is_numeric(dtype: &DataType) -> bool {
    matches!(
        dtype,
        DataType::UInt8
            | DataType::UInt16
            | DataType::UInt32
            | DataType::UInt64
            | DataType::Int8
            | DataType::Int16
            | DataType::Int32
            | DataType::Int64
            | DataType::Float32
            | DataType::Float64
    )
}
