//! # Crawler Configuration Module
//!
//! Configuration for fetching chart pages: which charts, how politely, and
//! how persistently. It uses a builder pattern for flexible configuration.
//!
//! ## Key Components
//!
//! - `CrawlerConfig`: The main configuration struct with crawler parameters
//! - `CrawlerConfigBuilder`: Builder pattern implementation for easier configuration
//!
//! ## Features
//!
//! - Defaults suitable for polite crawling of a single domain (one request
//!   every five seconds)
//! - Retries with exponential backoff on transient HTTP statuses
//! - User-agent and language customization

use crate::crawler::charts::Chart;
use std::time::Duration;

/// HTTP statuses retried by default
pub const DEFAULT_RETRY_STATUS_CODES: [u16; 8] = [500, 502, 503, 504, 522, 524, 408, 429];

/// Configuration for the crawler
#[derive(Debug, Clone)]
pub struct CrawlerConfig {
    /// Charts to fetch, in order
    pub charts: Vec<Chart>,

    /// Minimum delay in milliseconds between two requests
    pub rate_limit_ms: u64,

    /// Number of retries after the first attempt
    pub max_retries: u32,

    /// HTTP statuses worth retrying
    pub retry_status_codes: Vec<u16>,

    /// Delay before the first retry; doubled for each further retry
    pub retry_backoff_ms: u64,

    /// Per-request timeout in seconds
    pub request_timeout_secs: u64,

    /// User agent to use for requests
    pub user_agent: String,

    /// Value of the `Accept-Language` header
    pub accept_language: String,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            charts: Chart::defaults(),
            rate_limit_ms: 5000,
            max_retries: 5,
            retry_status_codes: DEFAULT_RETRY_STATUS_CODES.to_vec(),
            retry_backoff_ms: 2000,
            request_timeout_secs: 120,
            user_agent: format!(
                "Mozilla/5.0 (X11; Linux x86_64) reel/{}",
                env!("CARGO_PKG_VERSION")
            ),
            accept_language: "en-US,en;q=0.9".to_string(),
        }
    }
}

/// Builder for CrawlerConfig
#[derive(Debug, Default)]
pub struct CrawlerConfigBuilder {
    config: CrawlerConfig,
}

impl CrawlerConfigBuilder {
    /// Create a new builder with default configuration
    pub fn new() -> Self {
        Self {
            config: CrawlerConfig::default(),
        }
    }

    /// Set the charts to fetch
    pub fn charts(mut self, charts: Vec<Chart>) -> Self {
        self.config.charts = charts;
        self
    }

    /// Set the minimum delay in milliseconds between requests
    pub fn rate_limit_ms(mut self, rate_limit_ms: u64) -> Self {
        self.config.rate_limit_ms = rate_limit_ms;
        self
    }

    /// Set the number of retries after the first attempt
    pub fn max_retries(mut self, max_retries: u32) -> Self {
        self.config.max_retries = max_retries;
        self
    }

    /// Set the HTTP statuses worth retrying
    pub fn retry_status_codes(mut self, retry_status_codes: Vec<u16>) -> Self {
        self.config.retry_status_codes = retry_status_codes;
        self
    }

    /// Set the delay before the first retry
    pub fn retry_backoff_ms(mut self, retry_backoff_ms: u64) -> Self {
        self.config.retry_backoff_ms = retry_backoff_ms;
        self
    }

    /// Set the per-request timeout in seconds
    pub fn request_timeout_secs(mut self, request_timeout_secs: u64) -> Self {
        self.config.request_timeout_secs = request_timeout_secs;
        self
    }

    /// Set the user agent to use for requests
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.config.user_agent = user_agent.into();
        self
    }

    /// Set the `Accept-Language` header
    pub fn accept_language(mut self, accept_language: impl Into<String>) -> Self {
        self.config.accept_language = accept_language.into();
        self
    }

    /// Build the configuration
    pub fn build(self) -> CrawlerConfig {
        self.config
    }
}

impl CrawlerConfig {
    /// Create a new builder
    pub fn builder() -> CrawlerConfigBuilder {
        CrawlerConfigBuilder::new()
    }

    /// Get the rate limit as a Duration
    pub fn rate_limit(&self) -> Duration {
        Duration::from_millis(self.rate_limit_ms)
    }

    /// Get the request timeout as a Duration
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Whether a response with `status` should be retried
    pub fn is_retryable(&self, status: u16) -> bool {
        self.retry_status_codes.contains(&status)
    }

    /// Backoff before retry number `attempt` (1-based), capped at one minute
    pub fn retry_delay(&self, attempt: u32) -> Duration {
        let factor = 2u64.saturating_pow(attempt.saturating_sub(1));
        let delay = self.retry_backoff_ms.saturating_mul(factor);
        Duration::from_millis(delay.min(60_000))
    }
}
