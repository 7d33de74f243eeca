//! # Chart Crawler Module
//!
//! Fetches ranked chart pages, walks their listing items and runs every item
//! through the extraction engine. It is the first stage of the pipeline and
//! feeds the store module.
//!
//! ## Key Components
//!
//! - `CrawlerConfig`: Configuration for politeness, retries and headers
//! - `Chart`: A named ranking page; its name decides how items are read
//! - `PageFetcher`: Rate-limited HTTP client with retry and backoff
//! - `parse_chart_page`: Turns one page of HTML into normalized records
//! - `crawl_chart`: Fetch and parse in one step
//!
//! Items whose title cannot be resolved are dropped; every other item yields a
//! record, even when some of its metadata could not be read.

mod charts;
mod config;
mod content_extraction;
mod error;
mod fetch;

pub use charts::{Chart, DEFAULT_CHARTS, chart_context};
pub use config::{CrawlerConfig, CrawlerConfigBuilder, DEFAULT_RETRY_STATUS_CODES};
pub use content_extraction::extract_listing_items;
pub use error::CrawlError;
pub use fetch::PageFetcher;

use crate::extract::{Diagnostic, NormalizedRecord, build_record};
use serde::Serialize;
use tracing::{info, instrument, warn};

/// Records extracted from one chart page
#[derive(Debug, Clone, Default, Serialize)]
pub struct ChartRecords {
    /// Chart name
    pub chart: String,

    /// One record per listing item with a title, in page order
    pub records: Vec<NormalizedRecord>,

    /// Number of listing items dropped for lack of a title
    pub dropped: usize,

    /// Resolver failures met along the way
    #[serde(skip)]
    pub diagnostics: Vec<Diagnostic>,
}

/// Extract the records of one chart page.
///
/// Fails only when the chart name implies no extraction context or the page
/// cannot be traversed; per-item problems are contained.
pub fn parse_chart_page(chart_name: &str, html: &str) -> Result<ChartRecords, CrawlError> {
    let context = chart_context(chart_name)
        .ok_or_else(|| CrawlError::UnknownChart(chart_name.to_string()))?;
    let items = extract_listing_items(html)?;

    let mut parsed = ChartRecords {
        chart: context.category.clone(),
        ..ChartRecords::default()
    };

    for (position, item) in items.iter().enumerate() {
        let built = build_record(&context, item);
        parsed.diagnostics.extend(built.diagnostics);

        if built.record.original_title.is_empty() {
            warn!(
                "Dropping item {} of {}: no title could be resolved",
                position + 1,
                parsed.chart
            );
            parsed.dropped += 1;
            continue;
        }
        parsed.records.push(built.record);
    }

    info!(
        "Parsed {} records from {} ({} dropped, {} diagnostics)",
        parsed.records.len(),
        parsed.chart,
        parsed.dropped,
        parsed.diagnostics.len()
    );
    Ok(parsed)
}

/// Fetch a chart page and extract its records
#[instrument(skip(fetcher), fields(chart = %chart.name))]
pub async fn crawl_chart(fetcher: &PageFetcher, chart: &Chart) -> Result<ChartRecords, CrawlError> {
    info!("Fetching {} from {}", chart.name, chart.url);
    let html = fetcher.fetch(&chart.url).await?;
    parse_chart_page(&chart.name, &html)
}
