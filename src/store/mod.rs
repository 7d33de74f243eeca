//! Record store module
//!
//! Persists normalized records into a local libsql database with a single
//! `media` table, one TEXT column per record field.

mod database;
pub mod error;
mod schema;

pub use database::Database;
pub use error::DbError;
pub use schema::MEDIA_COLUMNS;

use std::path::{Path, PathBuf};

/// Default database file name
pub const DEFAULT_DATABASE_PATH: &str = "imdb_new.db";

/// Where records are stored and whether previous contents survive
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Path of the database file
    pub path: PathBuf,

    /// Delete an existing database file before opening
    pub reset: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_DATABASE_PATH),
            reset: true,
        }
    }
}

/// Builder for StoreConfig
#[derive(Debug, Default)]
pub struct StoreConfigBuilder {
    config: StoreConfig,
}

impl StoreConfigBuilder {
    /// Set the database path
    pub fn path(mut self, path: impl AsRef<Path>) -> Self {
        self.config.path = path.as_ref().to_path_buf();
        self
    }

    /// Set whether to delete an existing database first
    pub fn reset(mut self, reset: bool) -> Self {
        self.config.reset = reset;
        self
    }

    /// Build the configuration
    pub fn build(self) -> StoreConfig {
        self.config
    }
}

impl StoreConfig {
    /// Create a new builder
    pub fn builder() -> StoreConfigBuilder {
        StoreConfigBuilder::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_config_defaults() {
        let config = StoreConfig::default();
        assert_eq!(config.path, PathBuf::from("imdb_new.db"));
        assert!(config.reset);

        let config = StoreConfig::builder().path("other.db").reset(false).build();
        assert_eq!(config.path, PathBuf::from("other.db"));
        assert!(!config.reset);
    }
}
