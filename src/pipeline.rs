//! # Crawl Pipeline
//!
//! Ties the crawler and the store together: every configured chart is fetched,
//! extracted and persisted in turn. A chart that cannot be fetched or parsed
//! is recorded as failed and the remaining charts still run; a store failure
//! aborts the whole crawl.

use crate::crawler::{Chart, ChartRecords, PageFetcher, crawl_chart, parse_chart_page};
use crate::error::Result;
use crate::extract::NormalizedRecord;
use crate::store::Database;
use serde::Serialize;
use std::path::Path;
use tracing::{info, instrument, warn};

/// Outcome of crawling a set of charts
#[derive(Debug, Clone, Default, Serialize)]
pub struct CrawlSummary {
    /// Every stored record, in chart then page order
    pub records: Vec<NormalizedRecord>,

    /// `(chart, records stored)` for each chart that succeeded
    pub stored: Vec<(String, usize)>,

    /// `(chart, reason)` for each chart that was skipped
    pub failed: Vec<(String, String)>,
}

/// Crawl every chart in the fetcher's configuration and store the records.
///
/// `on_chart` is called once per chart after it has been handled, whether it
/// succeeded or not.
#[instrument(skip_all)]
pub async fn crawl_charts<F>(
    fetcher: &PageFetcher,
    db: &Database,
    mut on_chart: F,
) -> Result<CrawlSummary>
where
    F: FnMut(&Chart),
{
    let mut summary = CrawlSummary::default();

    for chart in &fetcher.config().charts {
        match crawl_chart(fetcher, chart).await {
            Ok(parsed) => {
                let stored = db.insert_records(&parsed.records).await?;
                info!("Stored {} records for {}", stored, parsed.chart);
                summary.stored.push((parsed.chart, stored));
                summary.records.extend(parsed.records);
            }
            Err(e) => {
                warn!("Skipping chart {}: {}", chart.name, e);
                summary.failed.push((chart.name.clone(), e.to_string()));
            }
        }
        on_chart(chart);
    }

    Ok(summary)
}

/// Extract the records of a chart page saved on disk
pub async fn parse_chart_file(chart_name: &str, path: &Path) -> Result<ChartRecords> {
    let html = tokio::fs::read_to_string(path).await?;
    Ok(parse_chart_page(chart_name, &html)?)
}

/// Write records to `path` as pretty-printed JSON
pub async fn export_records(records: &[NormalizedRecord], path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(records)?;
    tokio::fs::write(path, json).await?;
    Ok(())
}
