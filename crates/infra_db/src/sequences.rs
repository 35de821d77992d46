//! Database-backed sequence store
//!
//! One row per (prefix, year). The upsert increments and returns in a single
//! statement, so concurrent callers are serialized by the database and can
//! never observe the same sequence value. Counting existing documents was
//! the old scheme and is exactly the race this replaces.

use async_trait::async_trait;
use sqlx::{Row, SqlitePool};

use domain_documents::{DocumentError, SequenceStore};

#[derive(Clone)]
pub struct SqliteSequenceStore {
    pool: SqlitePool,
}

impl SqliteSequenceStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SequenceStore for SqliteSequenceStore {
    async fn next_sequence(&self, prefix: &str, year: i32) -> Result<u32, DocumentError> {
        let row = sqlx::query(
            "INSERT INTO document_sequences (prefix, year, seq) VALUES (?1, ?2, 1) \
             ON CONFLICT(prefix, year) DO UPDATE SET seq = seq + 1 \
             RETURNING seq",
        )
        .bind(prefix)
        .bind(year)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| DocumentError::sequence(e.to_string()))?;

        let seq: i64 = row
            .try_get("seq")
            .map_err(|e| DocumentError::sequence(e.to_string()))?;
        Ok(seq as u32)
    }
}
