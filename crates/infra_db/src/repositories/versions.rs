//! Database-backed version log
//!
//! Append-only: rows are only ever inserted. The version number is computed
//! inside the INSERT from the current maximum, and the unique constraint on
//! (type, number, version) rejects the loser if two writers ever tie.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{Row, SqlitePool};

use domain_documents::{DocumentError, DocumentType, DocumentVersionRecord, VersionStore};

#[derive(Clone)]
pub struct SqliteVersionLog {
    pool: SqlitePool,
}

impl SqliteVersionLog {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl VersionStore for SqliteVersionLog {
    async fn record(
        &self,
        document_type: DocumentType,
        document_number: &str,
        files: Vec<String>,
    ) -> Result<DocumentVersionRecord, DocumentError> {
        let now = Utc::now();
        let files_json = serde_json::to_string(&files)
            .map_err(|e| DocumentError::versioning(e.to_string()))?;

        let row = sqlx::query(
            "INSERT INTO document_versions (document_type, document_number, version, created_at, files) \
             VALUES (?1, ?2, \
                     (SELECT COALESCE(MAX(version), 0) + 1 FROM document_versions \
                       WHERE document_type = ?1 AND document_number = ?2), \
                     ?3, ?4) \
             RETURNING version",
        )
        .bind(document_type.as_str())
        .bind(document_number)
        .bind(now)
        .bind(files_json)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| DocumentError::versioning(e.to_string()))?;

        let version: i64 = row
            .try_get("version")
            .map_err(|e| DocumentError::versioning(e.to_string()))?;

        Ok(DocumentVersionRecord {
            document_type,
            document_number: document_number.to_string(),
            version: version as u32,
            timestamp: now,
            files,
        })
    }

    async fn history(
        &self,
        document_type: DocumentType,
        document_number: &str,
    ) -> Result<Vec<DocumentVersionRecord>, DocumentError> {
        let rows = sqlx::query(
            "SELECT version, created_at, files FROM document_versions \
             WHERE document_type = ?1 AND document_number = ?2 ORDER BY version",
        )
        .bind(document_type.as_str())
        .bind(document_number)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DocumentError::versioning(e.to_string()))?;

        rows.into_iter()
            .map(|row| {
                let version: i64 = row
                    .try_get("version")
                    .map_err(|e| DocumentError::versioning(e.to_string()))?;
                let timestamp: DateTime<Utc> = row
                    .try_get("created_at")
                    .map_err(|e| DocumentError::versioning(e.to_string()))?;
                let files: String = row
                    .try_get("files")
                    .map_err(|e| DocumentError::versioning(e.to_string()))?;
                let files: Vec<String> = serde_json::from_str(&files)
                    .map_err(|e| DocumentError::versioning(e.to_string()))?;
                Ok(DocumentVersionRecord {
                    document_type,
                    document_number: document_number.to_string(),
                    version: version as u32,
                    timestamp,
                    files,
                })
            })
            .collect()
    }
}
