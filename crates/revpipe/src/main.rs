use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use comfy_table::{presets::UTF8_FULL, Table};
use polars::prelude::*;
use revpipe_core::aggregator::GROUP_COLUMNS;
use revpipe_core::config::PipelineConfig;
use revpipe_core::pipeline;
use revpipe_core::sources::all_source_descriptors;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about = "Retail sales revenue analytics pipeline", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Execute the pipeline and write revenue summaries
    Run(RunArgs),
    /// Compute the revenue summary and print it without writing outputs
    Preview(PreviewArgs),
    /// List registered data sources and their required columns
    Sources,
}

#[derive(Args, Debug, Default)]
struct RunArgs {
    /// Path to a TOML configuration file
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Args, Debug, Default)]
struct PreviewArgs {
    /// Path to a TOML configuration file
    #[arg(long)]
    config: Option<PathBuf>,
    /// Maximum number of rows to display
    #[arg(long, default_value_t = 20)]
    limit: usize,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .init();

    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Command::Run(args) => handle_run(args),
        Command::Preview(args) => handle_preview(args),
        Command::Sources => handle_sources(),
    }
}

fn handle_run(args: RunArgs) -> Result<()> {
    let config = PipelineConfig::resolve(args.config.as_deref())
        .context("failed to load pipeline configuration")?;

    let summary = pipeline::run(&config)?;
    let rendered = serde_json::to_string(&summary)?;
    info!(summary = %rendered, "pipeline completed");

    Ok(())
}

fn handle_preview(args: PreviewArgs) -> Result<()> {
    let config = PipelineConfig::resolve(args.config.as_deref())
        .context("failed to load pipeline configuration")?;

    let inputs = pipeline::load_inputs(&config)?;
    let summary = pipeline::transform(
        &inputs.sales.frame,
        &inputs.product.frame,
        &inputs.customer.frame,
        &inputs.inventory.frame,
    )?;

    // Group order is unspecified; sort here for stable display only.
    let sorted = summary
        .lazy()
        .sort(GROUP_COLUMNS, SortMultipleOptions::default())
        .collect()?;
    let shown = sorted.head(Some(args.limit));

    println!("{}", render_frame(&shown)?);
    if sorted.height() > shown.height() {
        println!("({} of {} groups shown)", shown.height(), sorted.height());
    }

    Ok(())
}

fn handle_sources() -> Result<()> {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["source", "default path", "required columns"]);
    for descriptor in all_source_descriptors() {
        table.add_row(vec![
            descriptor.name.to_string(),
            descriptor.default_path.to_string(),
            descriptor.required_columns.join(", "),
        ]);
    }
    println!("{table}");
    Ok(())
}

fn render_frame(df: &DataFrame) -> Result<Table> {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(
        df.get_column_names()
            .iter()
            .map(|name| name.to_string())
            .collect::<Vec<_>>(),
    );

    for idx in 0..df.height() {
        let mut cells = Vec::with_capacity(df.width());
        for column in df.get_columns() {
            let value = column.get(idx)?;
            cells.push(cell_to_string(&value));
        }
        table.add_row(cells);
    }

    Ok(table)
}

fn cell_to_string(value: &AnyValue) -> String {
    match value {
        AnyValue::Null => String::new(),
        AnyValue::String(text) => (*text).to_string(),
        AnyValue::StringOwned(text) => text.to_string(),
        other => other.to_string(),
    }
}
