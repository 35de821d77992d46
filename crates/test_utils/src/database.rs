//! In-memory Database Helpers
//!
//! Each call produces a fresh, isolated SQLite database with the full schema
//! applied, so tests never see each other's rows.

use sqlx::SqlitePool;

use infra_db::{create_pool, init_schema, DatabaseConfig};

/// Creates a fresh in-memory database with the schema applied
pub async fn test_pool() -> SqlitePool {
    let pool = create_pool(&DatabaseConfig::in_memory())
        .await
        .expect("in-memory pool opens");
    init_schema(&pool).await.expect("schema applies cleanly");
    pool
}
