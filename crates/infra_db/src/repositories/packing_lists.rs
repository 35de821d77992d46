//! Packing list repository

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

use core_kernel::{InvoiceId, OrderId, PackingListId};
use domain_documents::{PackingList, PackingListItem};

use crate::error::DatabaseError;

use super::{parse_json, parse_uuid, to_json};

#[derive(Clone)]
pub struct PackingListRepository {
    pool: SqlitePool,
}

impl PackingListRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn insert(&self, packing_list: &PackingList) -> Result<(), DatabaseError> {
        sqlx::query(
            "INSERT INTO packing_lists \
             (id, packing_list_number, order_id, invoice_id, date, items, shipping_marks, notes, \
              created_at, updated_at) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
        )
        .bind(packing_list.id.as_uuid().to_string())
        .bind(&packing_list.packing_list_number)
        .bind(packing_list.order_id.as_uuid().to_string())
        .bind(packing_list.invoice_id.map(|id| id.as_uuid().to_string()))
        .bind(packing_list.date)
        .bind(to_json("packing_lists", &packing_list.items)?)
        .bind(&packing_list.shipping_marks)
        .bind(&packing_list.notes)
        .bind(packing_list.created_at)
        .bind(packing_list.updated_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    pub async fn update(&self, packing_list: &PackingList) -> Result<(), DatabaseError> {
        let result = sqlx::query(
            "UPDATE packing_lists SET invoice_id = ?2, date = ?3, items = ?4, \
             shipping_marks = ?5, notes = ?6, updated_at = ?7 WHERE id = ?1",
        )
        .bind(packing_list.id.as_uuid().to_string())
        .bind(packing_list.invoice_id.map(|id| id.as_uuid().to_string()))
        .bind(packing_list.date)
        .bind(to_json("packing_lists", &packing_list.items)?)
        .bind(&packing_list.shipping_marks)
        .bind(&packing_list.notes)
        .bind(packing_list.updated_at)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::not_found("Packing list", packing_list.id));
        }
        Ok(())
    }

    pub async fn find(&self, id: PackingListId) -> Result<Option<PackingList>, DatabaseError> {
        let row = sqlx::query("SELECT * FROM packing_lists WHERE id = ?1")
            .bind(id.as_uuid().to_string())
            .fetch_optional(&self.pool)
            .await?;
        row.map(|r| map_row(&r)).transpose()
    }

    pub async fn get(&self, id: PackingListId) -> Result<PackingList, DatabaseError> {
        self.find(id)
            .await?
            .ok_or_else(|| DatabaseError::not_found("Packing list", id))
    }

    pub async fn list_by_order(&self, order_id: OrderId) -> Result<Vec<PackingList>, DatabaseError> {
        let rows = sqlx::query("SELECT * FROM packing_lists WHERE order_id = ?1 ORDER BY created_at")
            .bind(order_id.as_uuid().to_string())
            .fetch_all(&self.pool)
            .await?;
        rows.iter().map(map_row).collect()
    }

    pub async fn list(&self, limit: i64, offset: i64) -> Result<Vec<PackingList>, DatabaseError> {
        let rows = sqlx::query(
            "SELECT * FROM packing_lists ORDER BY date DESC, packing_list_number DESC LIMIT ?1 OFFSET ?2",
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;
        rows.iter().map(map_row).collect()
    }

    pub async fn count(&self) -> Result<i64, DatabaseError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM packing_lists")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}

fn map_row(row: &SqliteRow) -> Result<PackingList, DatabaseError> {
    let id: String = row.try_get("id")?;
    let order_id: String = row.try_get("order_id")?;
    let invoice_id: Option<String> = row.try_get("invoice_id")?;
    let items: String = row.try_get("items")?;
    let items: Vec<PackingListItem> = parse_json("packing_lists", &items)?;

    Ok(PackingList {
        id: PackingListId::from(parse_uuid("packing_lists", &id)?),
        packing_list_number: row.try_get("packing_list_number")?,
        order_id: OrderId::from(parse_uuid("packing_lists", &order_id)?),
        invoice_id: invoice_id
            .map(|id| parse_uuid("packing_lists", &id).map(InvoiceId::from))
            .transpose()?,
        date: row.try_get::<NaiveDate, _>("date")?,
        items,
        shipping_marks: row.try_get("shipping_marks")?,
        notes: row.try_get("notes")?,
        created_at: row.try_get::<DateTime<Utc>, _>("created_at")?,
        updated_at: row.try_get::<DateTime<Utc>, _>("updated_at")?,
    })
}
