//! Regulatory filing repository

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

use core_kernel::{FilingId, OrderId};
use domain_documents::{FilingStatus, FilingType, RegulatoryFiling};

use crate::error::DatabaseError;

use super::{parse_enum, parse_uuid};

#[derive(Clone)]
pub struct FilingRepository {
    pool: SqlitePool,
}

impl FilingRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn insert(&self, filing: &RegulatoryFiling) -> Result<(), DatabaseError> {
        sqlx::query(
            "INSERT INTO filings \
             (id, filing_type, reference_number, order_id, filed_on, status, remarks, created_at, updated_at) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
        )
        .bind(filing.id.as_uuid().to_string())
        .bind(filing.filing_type.as_str())
        .bind(&filing.reference_number)
        .bind(filing.order_id.map(|id| id.as_uuid().to_string()))
        .bind(filing.filed_on)
        .bind(filing.status.as_str())
        .bind(&filing.remarks)
        .bind(filing.created_at)
        .bind(filing.updated_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    pub async fn update(&self, filing: &RegulatoryFiling) -> Result<(), DatabaseError> {
        let result = sqlx::query(
            "UPDATE filings SET reference_number = ?2, filed_on = ?3, status = ?4, \
             remarks = ?5, updated_at = ?6 WHERE id = ?1",
        )
        .bind(filing.id.as_uuid().to_string())
        .bind(&filing.reference_number)
        .bind(filing.filed_on)
        .bind(filing.status.as_str())
        .bind(&filing.remarks)
        .bind(filing.updated_at)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::not_found("Filing", filing.id));
        }
        Ok(())
    }

    pub async fn find(&self, id: FilingId) -> Result<Option<RegulatoryFiling>, DatabaseError> {
        let row = sqlx::query("SELECT * FROM filings WHERE id = ?1")
            .bind(id.as_uuid().to_string())
            .fetch_optional(&self.pool)
            .await?;
        row.map(|r| map_row(&r)).transpose()
    }

    pub async fn get(&self, id: FilingId) -> Result<RegulatoryFiling, DatabaseError> {
        self.find(id)
            .await?
            .ok_or_else(|| DatabaseError::not_found("Filing", id))
    }

    pub async fn list_by_order(&self, order_id: OrderId) -> Result<Vec<RegulatoryFiling>, DatabaseError> {
        let rows = sqlx::query("SELECT * FROM filings WHERE order_id = ?1 ORDER BY created_at")
            .bind(order_id.as_uuid().to_string())
            .fetch_all(&self.pool)
            .await?;
        rows.iter().map(map_row).collect()
    }

    pub async fn list(&self, limit: i64, offset: i64) -> Result<Vec<RegulatoryFiling>, DatabaseError> {
        let rows = sqlx::query("SELECT * FROM filings ORDER BY created_at DESC LIMIT ?1 OFFSET ?2")
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await?;
        rows.iter().map(map_row).collect()
    }

    pub async fn count(&self) -> Result<i64, DatabaseError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM filings")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}

fn map_row(row: &SqliteRow) -> Result<RegulatoryFiling, DatabaseError> {
    let id: String = row.try_get("id")?;
    let filing_type: String = row.try_get("filing_type")?;
    let order_id: Option<String> = row.try_get("order_id")?;
    let status: String = row.try_get("status")?;

    Ok(RegulatoryFiling {
        id: FilingId::from(parse_uuid("filings", &id)?),
        filing_type: parse_enum::<FilingType>("filings", &filing_type)?,
        reference_number: row.try_get("reference_number")?,
        order_id: order_id
            .map(|id| parse_uuid("filings", &id).map(OrderId::from))
            .transpose()?,
        filed_on: row.try_get::<Option<NaiveDate>, _>("filed_on")?,
        status: parse_enum::<FilingStatus>("filings", &status)?,
        remarks: row.try_get("remarks")?,
        created_at: row.try_get::<DateTime<Utc>, _>("created_at")?,
        updated_at: row.try_get::<DateTime<Utc>, _>("updated_at")?,
    })
}
