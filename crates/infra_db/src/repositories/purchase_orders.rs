//! Purchase order repository

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

use core_kernel::{Currency, PurchaseOrderId, Rate};
use domain_orders::{PurchaseOrder, PurchaseOrderItem, PurchaseOrderStatus, PurchaseTotals};

use crate::error::DatabaseError;

use super::{parse_decimal, parse_enum, parse_json, parse_money, parse_uuid, to_json};

#[derive(Clone)]
pub struct PurchaseOrderRepository {
    pool: SqlitePool,
}

impl PurchaseOrderRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn insert(&self, po: &PurchaseOrder) -> Result<(), DatabaseError> {
        sqlx::query(
            "INSERT INTO purchase_orders \
             (id, po_number, supplier_name, supplier_address, ordered_at, currency, items, \
              tax_rate, subtotal, tax, total, status, created_at, updated_at) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14)",
        )
        .bind(po.id.as_uuid().to_string())
        .bind(&po.po_number)
        .bind(&po.supplier_name)
        .bind(&po.supplier_address)
        .bind(po.ordered_at)
        .bind(po.currency.code())
        .bind(to_json("purchase_orders", &po.items)?)
        .bind(po.tax_rate.as_decimal().to_string())
        .bind(po.totals.subtotal.amount().to_string())
        .bind(po.totals.tax.amount().to_string())
        .bind(po.totals.total.amount().to_string())
        .bind(po.status.as_str())
        .bind(po.created_at)
        .bind(po.updated_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    pub async fn update(&self, po: &PurchaseOrder) -> Result<(), DatabaseError> {
        let result = sqlx::query(
            "UPDATE purchase_orders SET supplier_name = ?2, supplier_address = ?3, items = ?4, \
             tax_rate = ?5, subtotal = ?6, tax = ?7, total = ?8, status = ?9, updated_at = ?10 \
             WHERE id = ?1",
        )
        .bind(po.id.as_uuid().to_string())
        .bind(&po.supplier_name)
        .bind(&po.supplier_address)
        .bind(to_json("purchase_orders", &po.items)?)
        .bind(po.tax_rate.as_decimal().to_string())
        .bind(po.totals.subtotal.amount().to_string())
        .bind(po.totals.tax.amount().to_string())
        .bind(po.totals.total.amount().to_string())
        .bind(po.status.as_str())
        .bind(po.updated_at)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::not_found("Purchase order", po.id));
        }
        Ok(())
    }

    pub async fn find(&self, id: PurchaseOrderId) -> Result<Option<PurchaseOrder>, DatabaseError> {
        let row = sqlx::query("SELECT * FROM purchase_orders WHERE id = ?1")
            .bind(id.as_uuid().to_string())
            .fetch_optional(&self.pool)
            .await?;
        row.map(|r| map_row(&r)).transpose()
    }

    pub async fn get(&self, id: PurchaseOrderId) -> Result<PurchaseOrder, DatabaseError> {
        self.find(id)
            .await?
            .ok_or_else(|| DatabaseError::not_found("Purchase order", id))
    }

    pub async fn list(&self, limit: i64, offset: i64) -> Result<Vec<PurchaseOrder>, DatabaseError> {
        let rows = sqlx::query(
            "SELECT * FROM purchase_orders ORDER BY ordered_at DESC, po_number DESC LIMIT ?1 OFFSET ?2",
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;
        rows.iter().map(map_row).collect()
    }

    pub async fn count(&self) -> Result<i64, DatabaseError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM purchase_orders")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}

fn map_row(row: &SqliteRow) -> Result<PurchaseOrder, DatabaseError> {
    let id: String = row.try_get("id")?;
    let currency: String = row.try_get("currency")?;
    let currency: Currency = parse_enum("purchase_orders", &currency)?;
    let items: String = row.try_get("items")?;
    let items: Vec<PurchaseOrderItem> = parse_json("purchase_orders", &items)?;
    let tax_rate: String = row.try_get("tax_rate")?;
    let status: String = row.try_get("status")?;

    let subtotal: String = row.try_get("subtotal")?;
    let tax: String = row.try_get("tax")?;
    let total: String = row.try_get("total")?;

    Ok(PurchaseOrder {
        id: PurchaseOrderId::from(parse_uuid("purchase_orders", &id)?),
        po_number: row.try_get("po_number")?,
        supplier_name: row.try_get("supplier_name")?,
        supplier_address: row.try_get("supplier_address")?,
        ordered_at: row.try_get::<NaiveDate, _>("ordered_at")?,
        currency,
        items,
        tax_rate: Rate::new(parse_decimal("purchase_orders", &tax_rate)?),
        totals: PurchaseTotals {
            subtotal: parse_money("purchase_orders", &subtotal, currency)?,
            tax: parse_money("purchase_orders", &tax, currency)?,
            total: parse_money("purchase_orders", &total, currency)?,
        },
        status: parse_enum::<PurchaseOrderStatus>("purchase_orders", &status)?,
        created_at: row.try_get::<DateTime<Utc>, _>("created_at")?,
        updated_at: row.try_get::<DateTime<Utc>, _>("updated_at")?,
    })
}
