//! Database operations for the record store

use crate::extract::NormalizedRecord;
use crate::store::error::DbError;
use crate::store::schema::{self, MEDIA_COLUMNS};
use crate::store::StoreConfig;
use libsql::{Connection, Row, Rows, params};
use std::io::ErrorKind;
use tracing::{debug, info, instrument};

/// Database manager for normalized records
#[derive(Clone)]
pub struct Database {
    conn: Connection,
}

impl std::fmt::Debug for Database {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Database").finish_non_exhaustive()
    }
}

fn insert_sql() -> String {
    format!(
        "INSERT OR REPLACE INTO media ({}) VALUES ({})",
        MEDIA_COLUMNS.join(", "),
        vec!["?"; MEDIA_COLUMNS.len()].join(", ")
    )
}

fn record_params(record: &NormalizedRecord) -> impl libsql::params::IntoParams {
    params![
        record.original_title.clone(),
        record.release_year.clone(),
        record.category.clone(),
        record.rank.clone(),
        record.runtime.clone(),
        record.age_rating.clone(),
        record.episodes_count.clone(),
        record.title_type.clone(),
        record.rating_stars.clone(),
        record.votecount.clone(),
    ]
}

impl Database {
    /// Create a new database manager
    #[instrument(skip(conn))]
    pub async fn new(conn: Connection) -> Result<Self, DbError> {
        // Initialize schema
        schema::initialize_schema(&conn).await?;

        Ok(Self { conn })
    }

    /// Create a new database manager from a path
    pub async fn new_from_path(path: &str) -> Result<Self, DbError> {
        let db = libsql::Builder::new_local(path)
            .build()
            .await
            .map_err(|e| DbError::Connection(format!("Failed to open database: {}", e)))?;

        let conn = db
            .connect()
            .map_err(|e| DbError::Connection(format!("Failed to connect to database: {}", e)))?;

        Self::new(conn).await
    }

    /// Open the database described by `config`, deleting any previous file
    /// first when `config.reset` is set
    #[instrument]
    pub async fn open(config: &StoreConfig) -> Result<Self, DbError> {
        if config.reset {
            match tokio::fs::remove_file(&config.path).await {
                Ok(()) => info!("Removed previous database {}", config.path.display()),
                Err(e) if e.kind() == ErrorKind::NotFound => {}
                Err(e) => return Err(e.into()),
            }
        }

        Self::new_from_path(&config.path.to_string_lossy()).await
    }

    /// Execute a custom query with parameters
    pub async fn execute_query<P>(&self, sql: &str, params: P) -> Result<Rows, DbError>
    where
        P: libsql::params::IntoParams,
    {
        self.conn
            .query(sql, params)
            .await
            .map_err(|e| DbError::Query(format!("Failed to execute query: {}", e)))
    }

    /// Persist one record
    pub async fn insert_record(&self, record: &NormalizedRecord) -> Result<(), DbError> {
        self.conn
            .execute(&insert_sql(), record_params(record))
            .await
            .map_err(|e| DbError::Query(format!("Failed to insert record: {}", e)))?;
        Ok(())
    }

    /// Persist a batch of records in one transaction
    #[instrument(skip(self, records), fields(count = records.len()))]
    pub async fn insert_records(&self, records: &[NormalizedRecord]) -> Result<usize, DbError> {
        let tx = self
            .conn
            .transaction()
            .await
            .map_err(|e| DbError::Transaction(format!("Failed to start transaction: {}", e)))?;

        let sql = insert_sql();
        for record in records {
            tx.execute(&sql, record_params(record))
                .await
                .map_err(|e| DbError::Query(format!("Failed to insert record: {}", e)))?;
        }

        tx.commit()
            .await
            .map_err(|e| DbError::Transaction(format!("Failed to commit transaction: {}", e)))?;

        debug!("Inserted {} records", records.len());
        Ok(records.len())
    }

    /// List stored records in insertion order, optionally for one category
    #[instrument(skip(self))]
    pub async fn list_records(
        &self,
        category: Option<&str>,
    ) -> Result<Vec<NormalizedRecord>, DbError> {
        let columns = MEDIA_COLUMNS.join(", ");
        let mut rows = match category {
            Some(category) => {
                self.execute_query(
                    &format!("SELECT {columns} FROM media WHERE category = ? ORDER BY rowid"),
                    params![category.to_string()],
                )
                .await?
            }
            None => {
                self.execute_query(
                    &format!("SELECT {columns} FROM media ORDER BY rowid"),
                    params![],
                )
                .await?
            }
        };

        let mut records = Vec::new();
        while let Some(row) = rows
            .next()
            .await
            .map_err(|e| DbError::Data(format!("Failed to read record: {}", e)))?
        {
            records.push(self.row_to_record(&row)?);
        }

        Ok(records)
    }

    /// Number of stored records per category, sorted by category
    pub async fn count_by_category(&self) -> Result<Vec<(String, i64)>, DbError> {
        let mut rows = self
            .execute_query(
                "SELECT category, COUNT(*) FROM media GROUP BY category ORDER BY category",
                params![],
            )
            .await?;

        let mut counts = Vec::new();
        while let Some(row) = rows
            .next()
            .await
            .map_err(|e| DbError::Data(format!("Failed to read count: {}", e)))?
        {
            let category: String = row
                .get(0)
                .map_err(|e| DbError::Data(format!("Failed to get category: {}", e)))?;
            let count: i64 = row
                .get(1)
                .map_err(|e| DbError::Data(format!("Failed to get count: {}", e)))?;
            counts.push((category, count));
        }

        Ok(counts)
    }

    fn row_to_record(&self, row: &Row) -> Result<NormalizedRecord, DbError> {
        let column = |index: i32| -> Result<String, DbError> {
            row.get::<String>(index).map_err(|e| {
                DbError::Data(format!(
                    "Failed to get {}: {}",
                    MEDIA_COLUMNS[index as usize], e
                ))
            })
        };

        Ok(NormalizedRecord {
            original_title: column(0)?,
            release_year: column(1)?,
            category: column(2)?,
            rank: column(3)?,
            runtime: column(4)?,
            age_rating: column(5)?,
            episodes_count: column(6)?,
            title_type: column(7)?,
            rating_stars: column(8)?,
            votecount: column(9)?,
        })
    }
}
