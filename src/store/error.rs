//! # Database Error Types Module
//!
//! Error types for the record store. They distinguish connection, schema and
//! query failures so callers can report which stage of persistence broke.

use crate::error::Error as CrateError;
use thiserror::Error;

/// Error type for database operations
#[derive(Debug, Error)]
pub enum DbError {
    /// Filesystem error while preparing the database file
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// SQL query error
    #[error("SQL query error: {0}")]
    Query(String),

    /// Schema error
    #[error("Schema error: {0}")]
    Schema(String),

    /// Data error
    #[error("Data error: {0}")]
    Data(String),

    /// Connection error
    #[error("Connection error: {0}")]
    Connection(String),

    /// Transaction error
    #[error("Transaction error: {0}")]
    Transaction(String),
}

impl From<DbError> for CrateError {
    fn from(err: DbError) -> Self {
        CrateError::Database(err.to_string())
    }
}
