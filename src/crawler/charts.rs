//! Chart catalog and per-chart extraction context

use crate::crawler::error::CrawlError;
use crate::extract::{ContentClass, ExtractionContext};
use serde::{Deserialize, Serialize};
use url::Url;

/// Charts crawled by default, as `(name, url)`
pub const DEFAULT_CHARTS: [(&str, &str); 4] = [
    ("top_250_movies", "https://www.imdb.com/chart/top/"),
    ("most_popular_movies", "https://www.imdb.com/chart/moviemeter/"),
    ("top_250_tv", "https://www.imdb.com/chart/toptv/"),
    ("most_popular_tv", "https://www.imdb.com/chart/tvmeter/"),
];

/// One ranking page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chart {
    /// Chart name, also used as the record category
    pub name: String,

    /// Page URL
    pub url: String,
}

impl Chart {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Result<Self, CrawlError> {
        let url = url.into();
        Url::parse(&url)?;
        Ok(Self {
            name: name.into(),
            url,
        })
    }

    /// The four default charts
    pub fn defaults() -> Vec<Chart> {
        DEFAULT_CHARTS
            .iter()
            .map(|(name, url)| Chart {
                name: name.to_string(),
                url: url.to_string(),
            })
            .collect()
    }

    /// Look up a default chart by name
    pub fn find(name: &str) -> Result<Chart, CrawlError> {
        Self::defaults()
            .into_iter()
            .find(|chart| chart.name.eq_ignore_ascii_case(name))
            .ok_or_else(|| CrawlError::UnknownChart(name.to_string()))
    }

    /// Extraction context implied by the chart name
    pub fn context(&self) -> Option<ExtractionContext> {
        chart_context(&self.name)
    }
}

/// Derive the extraction context from a chart name.
///
/// `movies` selects the movie resolvers and `tv` the series ones; `top`
/// charts carry no rank label worth keeping while `popular` charts do. Names
/// matching neither pair have no context.
pub fn chart_context(name: &str) -> Option<ExtractionContext> {
    let lowered = name.to_lowercase();

    let class = if lowered.contains("movies") {
        ContentClass::Movie
    } else if lowered.contains("tv") {
        ContentClass::Tv
    } else {
        return None;
    };

    let with_rank = if lowered.contains("top") {
        false
    } else if lowered.contains("popular") {
        true
    } else {
        return None;
    };

    Some(ExtractionContext {
        category: lowered,
        class,
        with_rank,
    })
}
