//! Polite page fetching with rate limiting and retries

use std::num::NonZeroU32;

use governor::{DefaultDirectRateLimiter, Quota, RateLimiter};
use reqwest::Client as ReqwestClient;
use reqwest::header::{ACCEPT_LANGUAGE, HeaderMap, HeaderValue};
use tracing::{Instrument, debug, debug_span, instrument, warn};

use crate::crawler::config::CrawlerConfig;
use crate::crawler::error::CrawlError;

/// Fetches chart pages one at a time, spaced by the configured rate limit
pub struct PageFetcher {
    client: ReqwestClient,
    limiter: Option<DefaultDirectRateLimiter>,
    config: CrawlerConfig,
}

impl std::fmt::Debug for PageFetcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PageFetcher")
            .field("rate_limit_ms", &self.config.rate_limit_ms)
            .field("max_retries", &self.config.max_retries)
            .finish()
    }
}

impl PageFetcher {
    /// Create a fetcher from the crawler configuration
    pub fn new(config: CrawlerConfig) -> Result<Self, CrawlError> {
        let mut headers = HeaderMap::new();
        let language = HeaderValue::from_str(&config.accept_language)
            .map_err(|e| CrawlError::Other(format!("Invalid Accept-Language header: {}", e)))?;
        headers.insert(ACCEPT_LANGUAGE, language);

        let client = ReqwestClient::builder()
            .timeout(config.request_timeout())
            .user_agent(config.user_agent.clone())
            .default_headers(headers)
            .build()?;

        // A zero period means no spacing at all
        let limiter = Quota::with_period(config.rate_limit())
            .map(|quota| RateLimiter::direct(quota.allow_burst(NonZeroU32::MIN)));

        Ok(Self {
            client,
            limiter,
            config,
        })
    }

    /// The configuration this fetcher was built with
    pub fn config(&self) -> &CrawlerConfig {
        &self.config
    }

    /// Fetch `url` and return the response body.
    ///
    /// Transport errors and retryable statuses are retried up to
    /// `max_retries` times with exponential backoff.
    #[instrument(skip(self))]
    pub async fn fetch(&self, url: &str) -> Result<String, CrawlError> {
        let mut attempt = 0;

        loop {
            if let Some(limiter) = &self.limiter {
                limiter.until_ready().instrument(debug_span!("limiter")).await;
            }

            debug!("GET {} (attempt {})", url, attempt + 1);
            let retry_reason = match self.client.get(url).send().await {
                Ok(response) => {
                    let status = response.status();
                    if status.is_success() {
                        return Ok(response.text().await?);
                    }
                    if !self.config.is_retryable(status.as_u16())
                        || attempt >= self.config.max_retries
                    {
                        return Err(CrawlError::Status {
                            status: status.as_u16(),
                            url: url.to_string(),
                        });
                    }
                    format!("status {}", status)
                }
                Err(e) if attempt < self.config.max_retries && (e.is_timeout() || e.is_connect()) => {
                    e.to_string()
                }
                Err(e) => return Err(e.into()),
            };

            attempt += 1;
            let delay = self.config.retry_delay(attempt);
            warn!(
                "Fetching {} failed ({}); retry {}/{} in {:?}",
                url, retry_reason, attempt, self.config.max_retries, delay
            );
            tokio::time::sleep(delay).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Server;

    fn test_config() -> CrawlerConfig {
        CrawlerConfig::builder()
            .rate_limit_ms(0)
            .retry_backoff_ms(1)
            .max_retries(2)
            .build()
    }

    #[tokio::test]
    async fn test_fetch_success() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/chart/top/")
            .match_header("accept-language", "en-US,en;q=0.9")
            .with_status(200)
            .with_body("<html>ok</html>")
            .expect(1)
            .create_async()
            .await;

        let fetcher = PageFetcher::new(test_config()).unwrap();
        let body = fetcher
            .fetch(&format!("{}/chart/top/", server.url()))
            .await
            .unwrap();

        assert_eq!(body, "<html>ok</html>");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_fetch_retries_transient_status() {
        let mut server = Server::new_async().await;
        let unavailable = server
            .mock("GET", "/chart/toptv/")
            .with_status(503)
            .expect(1)
            .create_async()
            .await;
        let success = server
            .mock("GET", "/chart/toptv/")
            .with_status(200)
            .with_body("<html>after retry</html>")
            .expect(1)
            .create_async()
            .await;

        let fetcher = PageFetcher::new(test_config()).unwrap();
        let body = fetcher
            .fetch(&format!("{}/chart/toptv/", server.url()))
            .await
            .unwrap();

        assert_eq!(body, "<html>after retry</html>");
        unavailable.assert_async().await;
        success.assert_async().await;
    }

    #[tokio::test]
    async fn test_fetch_gives_up_after_max_retries() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/chart/moviemeter/")
            .with_status(429)
            .expect(3)
            .create_async()
            .await;

        let fetcher = PageFetcher::new(test_config()).unwrap();
        let result = fetcher
            .fetch(&format!("{}/chart/moviemeter/", server.url()))
            .await;

        assert!(matches!(result, Err(CrawlError::Status { status: 429, .. })));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_fetch_does_not_retry_client_errors() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/chart/missing/")
            .with_status(404)
            .expect(1)
            .create_async()
            .await;

        let fetcher = PageFetcher::new(test_config()).unwrap();
        let result = fetcher
            .fetch(&format!("{}/chart/missing/", server.url()))
            .await;

        assert!(matches!(result, Err(CrawlError::Status { status: 404, .. })));
        mock.assert_async().await;
    }
}
