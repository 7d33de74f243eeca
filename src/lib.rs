//! # reel - Ranked Chart Scraper for Rust
//!
//! This crate turns ranked movie and TV chart pages into clean, typed records.
//! Its core is a pure extraction engine that reads the loosely structured text
//! of each listing (years, runtimes, episode counts, age ratings from a dozen
//! national systems, release formats) and normalizes it into a fixed
//! ten-field record.
//!
//! ## Features
//!
//! - Locale-aware age rating recognition with deterministic tie-breaking
//! - Year and year-range resolution with plausibility checks
//! - Movie and TV aggregation rules over free-form metadata fragments
//! - Polite chart fetching with rate limiting and retries
//! - Persistence of records with LibSQL
//! - One-call crawl pipeline from chart pages to stored records
//! - Async API with Tokio
//! - Robust error handling and logging
//!
//! ## Example
//!
//! ```rust
//! use reel::extract::{ContentClass, ExtractionContext, ListingItem, build_record};
//!
//! let context = ExtractionContext {
//!     category: "top_250_movies".to_string(),
//!     class: ContentClass::Movie,
//!     with_rank: false,
//! };
//! let item = ListingItem {
//!     title: Some("1. The Shawshank Redemption".to_string()),
//!     metadata: vec!["1994".into(), "2h 22m".into(), "R".into()],
//!     rating: Some("9.3".to_string()),
//!     votes: Some(" (3M)".to_string()),
//!     ..ListingItem::default()
//! };
//!
//! let record = build_record(&context, &item).record;
//! assert_eq!(record.original_title, "The Shawshank Redemption");
//! assert_eq!(record.age_rating, "R");
//! ```

mod error;

pub mod crawler;
pub mod extract;
pub mod pipeline;
pub mod store;

pub use error::{Error, Result};
pub use pipeline::{CrawlSummary, crawl_charts, export_records, parse_chart_file};

/// Re-export of types module for public use
pub mod prelude {
    pub use crate::error::Error;
    pub use crate::error::Result;
    pub use crate::extract::{ContentClass, ExtractionContext, NormalizedRecord};
}
