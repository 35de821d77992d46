//! Order repository
//!
//! Items are a JSON column on the order row; the figure block is flattened
//! into TEXT amount columns so figures stay greppable in the database.

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

use core_kernel::{Currency, CustomerId, OrderId};
use domain_orders::{Order, OrderItem, OrderStatus, OrderTotals};

use crate::error::DatabaseError;

use super::{parse_enum, parse_json, parse_money, parse_uuid, to_json};

#[derive(Clone)]
pub struct OrderRepository {
    pool: SqlitePool,
}

impl OrderRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn insert(&self, order: &Order) -> Result<(), DatabaseError> {
        sqlx::query(
            "INSERT INTO orders \
             (id, order_number, customer_id, ordered_at, currency, items, \
              subtotal, igst, drawback, rodtep, total_amount, status, notes, created_at, updated_at) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15)",
        )
        .bind(order.id.as_uuid().to_string())
        .bind(&order.order_number)
        .bind(order.customer_id.as_uuid().to_string())
        .bind(order.ordered_at)
        .bind(order.currency.code())
        .bind(to_json("orders", &order.items)?)
        .bind(order.totals.subtotal.amount().to_string())
        .bind(order.totals.igst.amount().to_string())
        .bind(order.totals.drawback.amount().to_string())
        .bind(order.totals.rodtep.amount().to_string())
        .bind(order.totals.total_amount.amount().to_string())
        .bind(order.status.as_str())
        .bind(&order.notes)
        .bind(order.created_at)
        .bind(order.updated_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    pub async fn update(&self, order: &Order) -> Result<(), DatabaseError> {
        let result = sqlx::query(
            "UPDATE orders SET items = ?2, subtotal = ?3, igst = ?4, drawback = ?5, \
             rodtep = ?6, total_amount = ?7, status = ?8, notes = ?9, updated_at = ?10 \
             WHERE id = ?1",
        )
        .bind(order.id.as_uuid().to_string())
        .bind(to_json("orders", &order.items)?)
        .bind(order.totals.subtotal.amount().to_string())
        .bind(order.totals.igst.amount().to_string())
        .bind(order.totals.drawback.amount().to_string())
        .bind(order.totals.rodtep.amount().to_string())
        .bind(order.totals.total_amount.amount().to_string())
        .bind(order.status.as_str())
        .bind(&order.notes)
        .bind(order.updated_at)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::not_found("Order", order.id));
        }
        Ok(())
    }

    pub async fn find(&self, id: OrderId) -> Result<Option<Order>, DatabaseError> {
        let row = sqlx::query("SELECT * FROM orders WHERE id = ?1")
            .bind(id.as_uuid().to_string())
            .fetch_optional(&self.pool)
            .await?;
        row.map(|r| map_row(&r)).transpose()
    }

    pub async fn get(&self, id: OrderId) -> Result<Order, DatabaseError> {
        self.find(id)
            .await?
            .ok_or_else(|| DatabaseError::not_found("Order", id))
    }

    pub async fn list(&self, limit: i64, offset: i64) -> Result<Vec<Order>, DatabaseError> {
        let rows =
            sqlx::query("SELECT * FROM orders ORDER BY ordered_at DESC, order_number DESC LIMIT ?1 OFFSET ?2")
                .bind(limit)
                .bind(offset)
                .fetch_all(&self.pool)
                .await?;
        rows.iter().map(map_row).collect()
    }

    pub async fn list_by_customer(&self, customer_id: CustomerId) -> Result<Vec<Order>, DatabaseError> {
        let rows = sqlx::query("SELECT * FROM orders WHERE customer_id = ?1 ORDER BY ordered_at DESC")
            .bind(customer_id.as_uuid().to_string())
            .fetch_all(&self.pool)
            .await?;
        rows.iter().map(map_row).collect()
    }

    pub async fn count(&self) -> Result<i64, DatabaseError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM orders")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}

fn map_row(row: &SqliteRow) -> Result<Order, DatabaseError> {
    let id: String = row.try_get("id")?;
    let customer_id: String = row.try_get("customer_id")?;
    let currency: String = row.try_get("currency")?;
    let currency: Currency = parse_enum("orders", &currency)?;
    let items: String = row.try_get("items")?;
    let items: Vec<OrderItem> = parse_json("orders", &items)?;
    let status: String = row.try_get("status")?;

    let subtotal: String = row.try_get("subtotal")?;
    let igst: String = row.try_get("igst")?;
    let drawback: String = row.try_get("drawback")?;
    let rodtep: String = row.try_get("rodtep")?;
    let total_amount: String = row.try_get("total_amount")?;

    Ok(Order {
        id: OrderId::from(parse_uuid("orders", &id)?),
        order_number: row.try_get("order_number")?,
        customer_id: CustomerId::from(parse_uuid("orders", &customer_id)?),
        ordered_at: row.try_get::<NaiveDate, _>("ordered_at")?,
        currency,
        items,
        totals: OrderTotals {
            subtotal: parse_money("orders", &subtotal, currency)?,
            igst: parse_money("orders", &igst, currency)?,
            drawback: parse_money("orders", &drawback, currency)?,
            rodtep: parse_money("orders", &rodtep, currency)?,
            total_amount: parse_money("orders", &total_amount, currency)?,
        },
        status: parse_enum::<OrderStatus>("orders", &status)?,
        notes: row.try_get("notes")?,
        created_at: row.try_get::<DateTime<Utc>, _>("created_at")?,
        updated_at: row.try_get::<DateTime<Utc>, _>("updated_at")?,
    })
}
