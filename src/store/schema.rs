//! Schema for the `media` table: one TEXT column per record field.

use crate::store::error::DbError;
use libsql::{Connection, params};

/// Column order used by every statement touching `media`
pub const MEDIA_COLUMNS: [&str; 10] = [
    "original_title",
    "release_year",
    "category",
    "rank",
    "runtime",
    "age_rating",
    "episodes_count",
    "title_type",
    "rating_stars",
    "votecount",
];

/// Initialize the database schema
pub async fn initialize_schema(conn: &Connection) -> Result<(), DbError> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS media (
            original_title TEXT,
            release_year TEXT,
            category TEXT,
            rank TEXT,
            runtime TEXT,
            age_rating TEXT,
            episodes_count TEXT,
            title_type TEXT,
            rating_stars TEXT,
            votecount TEXT
        )",
        params![],
    )
    .await
    .map_err(|e| DbError::Schema(format!("Failed to create media table: {}", e)))?;

    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_media_category ON media(category)",
        params![],
    )
    .await
    .map_err(|e| DbError::Schema(format!("Failed to create index on media: {}", e)))?;

    Ok(())
}
