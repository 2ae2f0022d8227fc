mod export;
mod loader;
mod render;

use analytics::{CurrencyFormat, DashboardReport, DateRange, MetricsEngine};
use anyhow::{Result, bail};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use configuration::RangeSettings;
use serde::Serialize;
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// The main entry point for the business metrics reporter.
fn main() -> Result<()> {
    // A .env file is optional; it only supplies BIZMETRICS_* overrides.
    dotenvy::dotenv().ok();

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let cli = Cli::parse();
    run(cli)
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// Sales, expense, order, profit and stock reports over exported shop records.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct GlobalArgs {
    /// Path to the configuration file (defaults to ./config.toml when present).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// First day of the reporting window (format: YYYY-MM-DD).
    #[arg(long, global = true)]
    from: Option<NaiveDate>,

    /// Last day of the reporting window, inclusive (format: YYYY-MM-DD).
    #[arg(long, global = true)]
    to: Option<NaiveDate>,

    /// Print the report as JSON instead of tables.
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Headline figures across every report.
    Summary,
    /// Paid revenue, order volume and profit per sales channel.
    Sales,
    /// Spending by category and the largest expense lines.
    Expenses,
    /// Order status, value, dispatch time, districts and repeat customers.
    Orders,
    /// Net profit, margin, monthly results and channel profitability.
    Profit,
    /// Stock value and items at or below their reorder level.
    Inventory,
    /// The ten best-selling products by quantity.
    TopProducts,
    /// Write every report to an Excel workbook.
    Export(ExportArgs),
}

#[derive(Args)]
struct ExportArgs {
    /// The output file path for the workbook.
    #[arg(long, short)]
    out: PathBuf,
}

// ==============================================================================
// Command Logic
// ==============================================================================

fn run(cli: Cli) -> Result<()> {
    let config = configuration::load_config(cli.global.config.as_deref())?;
    let range = resolve_range(cli.global.from, cli.global.to, config.range)?;
    if let Some(range) = &range {
        tracing::info!(start = %range.start().date(), end = %range.end().date(), "Reporting window.");
    }

    let dataset = loader::load_dataset(&config.data)?;
    let engine = MetricsEngine::new(dataset.catalog);
    let report = engine.dashboard(
        &dataset.orders,
        &dataset.expenses,
        &dataset.inventory,
        range.as_ref(),
    );

    let money = CurrencyFormat::with_symbol(config.currency.symbol);
    let json = cli.global.json;

    match cli.command {
        Commands::Summary => show(json, &report, || render::summary(&report, &money)),
        Commands::Sales => show(json, &report.sales, || render::sales(&report.sales, &money)),
        Commands::Expenses => show(json, &report.expenses, || {
            render::expenses(&report.expenses, &money)
        }),
        Commands::Orders => show(json, &report.orders, || render::orders(&report.orders)),
        Commands::Profit => show(json, &report.profitability, || {
            render::profitability(&report.profitability, &money)
        }),
        Commands::Inventory => show(json, &report.inventory, || {
            render::inventory(&report.inventory, &money)
        }),
        Commands::TopProducts => show(json, &report.top_products, || {
            render::top_products(&report.top_products, &money)
        }),
        Commands::Export(args) => handle_export(&report, args),
    }
}

/// Combines the command-line window with the configured default. Flags win
/// side by side, so `--from` alone narrows only the start of a configured range.
fn resolve_range(
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
    configured: Option<RangeSettings>,
) -> Result<Option<DateRange>> {
    let start = from.or(configured.map(|range| range.start));
    let end = to.or(configured.map(|range| range.end));

    match (start, end) {
        (Some(start), Some(end)) => Ok(Some(DateRange::checked(start, end)?)),
        (None, None) => Ok(None),
        _ => bail!("A reporting window needs both --from and --to (or a [range] in the config)."),
    }
}

fn show<T, F>(json: bool, section: &T, tables: F) -> Result<()>
where
    T: Serialize,
    F: FnOnce() -> Vec<comfy_table::Table>,
{
    if json {
        return print_json(section);
    }
    print_tables(tables());
    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_tables(tables: Vec<comfy_table::Table>) {
    for table in tables {
        println!("{table}");
    }
}

fn handle_export(report: &DashboardReport, args: ExportArgs) -> Result<()> {
    export::write_workbook(report, &args.out)?;
    println!("Dashboard written to {}", args.out.display());
    Ok(())
}
