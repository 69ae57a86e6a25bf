use once_cell::sync::Lazy;
use polars::prelude::DataFrame;

use crate::error::{PipelineError, Result};

/// The four tables a pipeline run consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceKind {
    Sales,
    Product,
    Customer,
    Inventory,
}

#[derive(Debug, Clone)]
pub struct SourceDescriptor {
    pub kind: SourceKind,
    pub name: &'static str,
    pub default_path: &'static str,
    /// Columns the downstream join/filter/aggregate contract references.
    /// Anything else the file carries is kept as-is with inferred types.
    pub required_columns: &'static [&'static str],
}

static SOURCES: Lazy<Vec<SourceDescriptor>> = Lazy::new(|| {
    vec![
        SourceDescriptor {
            kind: SourceKind::Sales,
            name: "sales",
            default_path: "dataset/sales_data.csv",
            required_columns: &["product_id", "customer_id", "status", "Price", "sale_date"],
        },
        SourceDescriptor {
            kind: SourceKind::Product,
            name: "product",
            default_path: "dataset/product_data.csv",
            required_columns: &["product_id", "category"],
        },
        SourceDescriptor {
            kind: SourceKind::Customer,
            name: "customer",
            default_path: "dataset/customer_data.csv",
            required_columns: &["customer_id", "city"],
        },
        SourceDescriptor {
            kind: SourceKind::Inventory,
            name: "inventory",
            default_path: "dataset/inventory_data.csv",
            required_columns: &["product_id"],
        },
    ]
});

pub fn all_source_descriptors() -> &'static [SourceDescriptor] {
    SOURCES.as_slice()
}

impl SourceKind {
    pub fn descriptor(self) -> &'static SourceDescriptor {
        SOURCES
            .iter()
            .find(|descriptor| descriptor.kind == self)
            .expect("registry covers every source kind")
    }
}

/// Checks that `df` carries every column in `columns` before a stage
/// references them by name.
pub fn ensure_columns(df: &DataFrame, name: &'static str, columns: &[&str]) -> Result<()> {
    for column in columns {
        if !df
            .get_column_names()
            .iter()
            .any(|present| present.as_str() == *column)
        {
            return Err(PipelineError::MissingColumn {
                name,
                column: (*column).to_string(),
            });
        }
    }
    Ok(())
}
