//! # reel CLI Application
//!
//! This module implements the command-line interface for reel, providing access
//! to the chart crawler, the extraction engine and the record store through a
//! set of subcommands.
//!
//! ## Key Components
//!
//! - CLI argument parsing with clap
//! - Subcommands:
//!   - `crawl`: Fetch charts, extract records and store them
//!   - `parse`: Offline extraction of a saved chart page
//!   - `list`: Inspect stored records
//!
//! ## Features
//!
//! - Configurable politeness (rate limit and retries)
//! - Progress tracking across charts
//! - Both JSON and text output formats
//! - Optional file logging

mod telemetry;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use reel::crawler::{Chart, CrawlerConfig, PageFetcher};
use reel::extract::NormalizedRecord;
use reel::store::{DEFAULT_DATABASE_PATH, Database, StoreConfig};
use reel::{crawl_charts, export_records, parse_chart_file};
use std::path::PathBuf;
use tracing::instrument;

#[derive(Parser)]
#[command(author, version, about = "Scrape ranked movie and TV charts into normalized records", long_about = None)]
struct Cli {
    /// Also write logs to this file
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Crawl charts and store their records
    Crawl(CrawlArgs),

    /// Extract records from a saved chart page
    Parse(ParseArgs),

    /// List stored records
    List(ListArgs),
}

#[derive(Args, Debug)]
struct CrawlArgs {
    /// Chart to crawl (repeatable; default: all charts)
    #[arg(short, long = "chart")]
    charts: Vec<String>,

    /// Database path
    #[arg(long, default_value = DEFAULT_DATABASE_PATH)]
    database: PathBuf,

    /// Keep the existing database instead of recreating it
    #[arg(short, long)]
    keep: bool,

    /// Save extracted records to a JSON file
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Rate limit in milliseconds
    #[arg(short, long, default_value = "5000")]
    rate: u64,

    /// Retries per page on transient failures
    #[arg(long, default_value = "5")]
    retries: u32,
}

#[derive(Args, Debug)]
struct ParseArgs {
    /// Saved chart page (HTML)
    #[arg(required = true)]
    file: PathBuf,

    /// Chart name, which decides how items are read
    #[arg(short, long)]
    chart: String,

    /// Output format (text|json)
    #[arg(short, long, default_value = "text", value_parser = ["text", "json"])]
    format: String,
}

#[derive(Args, Debug)]
struct ListArgs {
    /// Database path
    #[arg(long, default_value = DEFAULT_DATABASE_PATH)]
    database: PathBuf,

    /// Only records of this category
    #[arg(short, long)]
    category: Option<String>,

    /// Output format (text|json)
    #[arg(short, long, default_value = "text", value_parser = ["text", "json"])]
    format: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse command line arguments
    let cli = Cli::parse();

    let _logging = telemetry::init_tracing_subscriber(cli.log_file.as_deref())?;

    // Execute the appropriate command
    match cli.command {
        Some(Commands::Crawl(args)) => {
            crawl_command(args).await?;
        }
        Some(Commands::Parse(args)) => {
            parse_command(args).await?;
        }
        Some(Commands::List(args)) => {
            list_command(args).await?;
        }
        None => {
            // If no command is provided, show help
            let _ = Cli::parse_from(["reel", "--help"]);
        }
    }

    Ok(())
}

#[instrument]
async fn crawl_command(args: CrawlArgs) -> anyhow::Result<()> {
    let charts = if args.charts.is_empty() {
        Chart::defaults()
    } else {
        args.charts
            .iter()
            .map(|name| Chart::find(name))
            .collect::<Result<Vec<_>, _>>()?
    };

    // Create crawler configuration
    let config = CrawlerConfig::builder()
        .charts(charts)
        .rate_limit_ms(args.rate)
        .max_retries(args.retries)
        .build();
    let fetcher = PageFetcher::new(config)?;

    let store_config = StoreConfig::builder()
        .path(&args.database)
        .reset(!args.keep)
        .build();
    let db = Database::open(&store_config).await?;

    let progress_bar = ProgressBar::new(fetcher.config().charts.len() as u64);
    progress_bar.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} {msg}")?
            .progress_chars("##-"),
    );

    let start_time = std::time::Instant::now();
    let summary = crawl_charts(&fetcher, &db, |chart| {
        progress_bar.set_message(format!("Crawled {}", chart.name));
        progress_bar.inc(1);
    })
    .await?;
    progress_bar.finish_with_message("Crawl completed");

    println!(
        "Stored {} records from {} charts in {:.2?} ({} failed)",
        summary.records.len(),
        summary.stored.len(),
        start_time.elapsed(),
        summary.failed.len()
    );
    for (chart, reason) in &summary.failed {
        println!("  {}: {}", chart, reason);
    }

    // Save to file if output is specified
    if let Some(output_file) = args.output {
        export_records(&summary.records, &output_file).await?;
        println!("Saved records to {}", output_file.display());
    }

    Ok(())
}

#[instrument]
async fn parse_command(args: ParseArgs) -> anyhow::Result<()> {
    let parsed = parse_chart_file(&args.chart, &args.file)
        .await
        .with_context(|| format!("Failed to parse {}", args.file.display()))?;

    match args.format.as_str() {
        "json" => {
            println!("{}", serde_json::to_string_pretty(&parsed)?);
        }
        _ => {
            println!(
                "Extracted {} records from {} ({} dropped)",
                parsed.records.len(),
                parsed.chart,
                parsed.dropped
            );
            for record in &parsed.records {
                print_record(record);
            }
            for diagnostic in &parsed.diagnostics {
                println!("warning: {}", diagnostic);
            }
        }
    }

    Ok(())
}

#[instrument]
async fn list_command(args: ListArgs) -> anyhow::Result<()> {
    let store_config = StoreConfig::builder()
        .path(&args.database)
        .reset(false)
        .build();
    let db = Database::open(&store_config).await?;

    let records = db.list_records(args.category.as_deref()).await?;

    match args.format.as_str() {
        "json" => {
            println!("{}", serde_json::to_string_pretty(&records)?);
        }
        _ => {
            for (category, count) in db.count_by_category().await? {
                println!("{}: {} records", category, count);
            }
            println!();
            for record in &records {
                print_record(record);
            }
        }
    }

    Ok(())
}

fn print_record(record: &NormalizedRecord) {
    let rank = if record.rank.is_empty() {
        String::new()
    } else {
        format!("#{} ", record.rank)
    };
    println!(
        "{}{} ({}) [{}]",
        rank, record.original_title, record.release_year, record.category
    );

    let details: Vec<String> = [
        ("runtime", &record.runtime),
        ("rated", &record.age_rating),
        ("episodes", &record.episodes_count),
        ("type", &record.title_type),
        ("stars", &record.rating_stars),
        ("votes", &record.votecount),
    ]
    .iter()
    .filter(|(_, value)| !value.is_empty())
    .map(|(label, value)| format!("{}: {}", label, value))
    .collect();

    if !details.is_empty() {
        println!("   {}", details.join(", "));
    }
}
