use polars::prelude::*;

use crate::error::Result;
use crate::sources::ensure_columns;

/// Status value marking a sale as finalized. Matching is exact and
/// case-sensitive with no trimming; null statuses never match.
pub const COMPLETED_STATUS: &str = "Completed";

pub fn completed_sales(enriched: &DataFrame) -> Result<DataFrame> {
    ensure_columns(enriched, "enriched sales", &["status"])?;

    let completed = enriched
        .clone()
        .lazy()
        .filter(col("status").eq(lit(COMPLETED_STATUS)))
        .collect()?;

    Ok(completed)
}
