use polars::prelude::*;

use crate::error::Result;
use crate::sources::ensure_columns;

/// Left-joins sales to the three reference tables: product and inventory on
/// `product_id`, customer on `customer_id`. Every sale row is preserved;
/// unmatched reference columns come back null. A key matching N reference
/// rows multiplies the sale row N times.
///
/// Reference columns whose names collide with an existing column are
/// suffixed by source table, so downstream name references stay unambiguous.
pub fn enrich_sales(
    sales: &DataFrame,
    product: &DataFrame,
    customer: &DataFrame,
    inventory: &DataFrame,
) -> Result<DataFrame> {
    ensure_columns(sales, "sales", &["product_id", "customer_id"])?;
    ensure_columns(product, "product", &["product_id"])?;
    ensure_columns(customer, "customer", &["customer_id"])?;
    ensure_columns(inventory, "inventory", &["product_id"])?;

    let enriched = sales
        .clone()
        .lazy()
        .join(
            product.clone().lazy(),
            [col("product_id")],
            [col("product_id")],
            JoinArgs::new(JoinType::Left).with_suffix(Some("_product".into())),
        )
        .join(
            customer.clone().lazy(),
            [col("customer_id")],
            [col("customer_id")],
            JoinArgs::new(JoinType::Left).with_suffix(Some("_customer".into())),
        )
        .join(
            inventory.clone().lazy(),
            [col("product_id")],
            [col("product_id")],
            JoinArgs::new(JoinType::Left).with_suffix(Some("_inventory".into())),
        )
        .collect()?;

    Ok(enriched)
}
