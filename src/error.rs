//! Error types for the reel crate

use thiserror::Error;

/// Result type for reel operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for reel operations
#[derive(Debug, Error)]
pub enum Error {
    /// HTTP client error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Filesystem error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Chart crawling error
    #[error("Crawl error: {0}")]
    Crawl(String),

    /// Database error
    #[error("Database error: {0}")]
    Database(String),

    /// Other errors
    #[error("{0}")]
    Other(String),
}
