use std::path::PathBuf;

use chrono::{DateTime, Utc};
use polars::prelude::DataFrame;
use serde::Serialize;
use tracing::{info, warn};

use crate::aggregator::revenue_summary;
use crate::config::PipelineConfig;
use crate::enricher::enrich_sales;
use crate::error::Result;
use crate::filters::completed_sales;
use crate::loader::{load_source, LoadedSource};
use crate::sink::write_summary;
use crate::sources::SourceKind;

#[derive(Debug, Clone, Serialize)]
pub struct SourceSummary {
    pub name: &'static str,
    pub path: PathBuf,
    pub rows: usize,
    pub columns: usize,
    pub content_hash: String,
}

#[derive(Debug, Serialize)]
pub struct RunSummary {
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub sources: Vec<SourceSummary>,
    pub enriched_rows: usize,
    pub completed_rows: usize,
    pub aggregated_rows: usize,
    pub outputs: Vec<PathBuf>,
}

/// The four tables feeding one pipeline pass.
#[derive(Debug)]
pub struct PipelineInputs {
    pub sales: LoadedSource,
    pub product: LoadedSource,
    pub customer: LoadedSource,
    pub inventory: LoadedSource,
}

pub fn load_inputs(config: &PipelineConfig) -> Result<PipelineInputs> {
    Ok(PipelineInputs {
        sales: load_source(SourceKind::Sales, &config.sources.sales)?,
        product: load_source(SourceKind::Product, &config.sources.product)?,
        customer: load_source(SourceKind::Customer, &config.sources.customer)?,
        inventory: load_source(SourceKind::Inventory, &config.sources.inventory)?,
    })
}

/// The enrich -> filter -> aggregate composition over in-memory tables.
/// Embedders can feed frames from any origin; nothing here touches the
/// filesystem.
pub fn transform(
    sales: &DataFrame,
    product: &DataFrame,
    customer: &DataFrame,
    inventory: &DataFrame,
) -> Result<DataFrame> {
    let enriched = enrich_sales(sales, product, customer, inventory)?;
    let completed = completed_sales(&enriched)?;
    revenue_summary(&completed)
}

/// Runs the whole batch: load, enrich, filter, aggregate, then write the
/// aggregate to every configured target. Fail-fast; the first error aborts
/// the run with nothing committed beyond what the sink already flushed.
pub fn run(config: &PipelineConfig) -> Result<RunSummary> {
    let started_at = Utc::now();

    let inputs = load_inputs(config)?;
    let sources: Vec<SourceSummary> = [
        &inputs.sales,
        &inputs.product,
        &inputs.customer,
        &inputs.inventory,
    ]
    .into_iter()
    .map(|loaded| SourceSummary {
        name: loaded.kind.descriptor().name,
        path: loaded.path.clone(),
        rows: loaded.frame.height(),
        columns: loaded.frame.width(),
        content_hash: loaded.content_hash.clone(),
    })
    .collect();

    let enriched = enrich_sales(
        &inputs.sales.frame,
        &inputs.product.frame,
        &inputs.customer.frame,
        &inputs.inventory.frame,
    )?;
    if enriched.height() > inputs.sales.frame.height() {
        warn!(
            sales_rows = inputs.sales.frame.height(),
            enriched_rows = enriched.height(),
            "join fan-out multiplied sale rows; grouped totals will count each duplicate"
        );
    }
    info!(rows = enriched.height(), "enriched sales");

    let completed = completed_sales(&enriched)?;
    info!(rows = completed.height(), "filtered completed sales");

    let summary = revenue_summary(&completed)?;
    info!(groups = summary.height(), "aggregated revenue metrics");

    for target in &config.output.targets {
        write_summary(&summary, target)?;
        info!(path = %target.display(), "wrote revenue summary");
    }

    Ok(RunSummary {
        started_at,
        finished_at: Utc::now(),
        sources,
        enriched_rows: enriched.height(),
        completed_rows: completed.height(),
        aggregated_rows: summary.height(),
        outputs: config.output.targets.clone(),
    })
}
