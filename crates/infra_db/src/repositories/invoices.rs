//! Invoice repository
//!
//! The `UNIQUE(order_id, invoice_type)` constraint backs the one-invoice-
//! per-(order, type) rule; a duplicate insert surfaces as a unique violation
//! the API layer turns into a conflict response.

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

use core_kernel::{Currency, CustomerId, InvoiceId, OrderId};
use domain_documents::{BankDetails, Invoice, InvoiceStatus, InvoiceType};
use domain_orders::{OrderItem, OrderTotals};

use crate::error::DatabaseError;

use super::{parse_enum, parse_json, parse_money, parse_uuid, to_json};

#[derive(Clone)]
pub struct InvoiceRepository {
    pool: SqlitePool,
}

impl InvoiceRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn insert(&self, invoice: &Invoice) -> Result<(), DatabaseError> {
        sqlx::query(
            "INSERT INTO invoices \
             (id, invoice_number, invoice_type, order_id, customer_id, invoice_date, due_date, \
              currency, items, subtotal, igst, drawback, rodtep, total_amount, bank_details, \
              terms, status, created_at, updated_at) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17, ?18, ?19)",
        )
        .bind(invoice.id.as_uuid().to_string())
        .bind(&invoice.invoice_number)
        .bind(invoice.invoice_type.as_str())
        .bind(invoice.order_id.as_uuid().to_string())
        .bind(invoice.customer_id.as_uuid().to_string())
        .bind(invoice.invoice_date)
        .bind(invoice.due_date)
        .bind(invoice.currency.code())
        .bind(to_json("invoices", &invoice.items)?)
        .bind(invoice.totals.subtotal.amount().to_string())
        .bind(invoice.totals.igst.amount().to_string())
        .bind(invoice.totals.drawback.amount().to_string())
        .bind(invoice.totals.rodtep.amount().to_string())
        .bind(invoice.totals.total_amount.amount().to_string())
        .bind(to_json("invoices", &invoice.bank_details)?)
        .bind(&invoice.terms)
        .bind(invoice.status.as_str())
        .bind(invoice.created_at)
        .bind(invoice.updated_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// Items and figures are frozen at creation; only status, due date and
    /// terms may move afterwards
    pub async fn update(&self, invoice: &Invoice) -> Result<(), DatabaseError> {
        let result = sqlx::query(
            "UPDATE invoices SET due_date = ?2, terms = ?3, status = ?4, updated_at = ?5 \
             WHERE id = ?1",
        )
        .bind(invoice.id.as_uuid().to_string())
        .bind(invoice.due_date)
        .bind(&invoice.terms)
        .bind(invoice.status.as_str())
        .bind(invoice.updated_at)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::not_found("Invoice", invoice.id));
        }
        Ok(())
    }

    pub async fn find(&self, id: InvoiceId) -> Result<Option<Invoice>, DatabaseError> {
        let row = sqlx::query("SELECT * FROM invoices WHERE id = ?1")
            .bind(id.as_uuid().to_string())
            .fetch_optional(&self.pool)
            .await?;
        row.map(|r| map_row(&r)).transpose()
    }

    pub async fn get(&self, id: InvoiceId) -> Result<Invoice, DatabaseError> {
        self.find(id)
            .await?
            .ok_or_else(|| DatabaseError::not_found("Invoice", id))
    }

    pub async fn find_by_number(&self, number: &str) -> Result<Option<Invoice>, DatabaseError> {
        let row = sqlx::query("SELECT * FROM invoices WHERE invoice_number = ?1")
            .bind(number)
            .fetch_optional(&self.pool)
            .await?;
        row.map(|r| map_row(&r)).transpose()
    }

    pub async fn find_by_order_and_type(
        &self,
        order_id: OrderId,
        invoice_type: InvoiceType,
    ) -> Result<Option<Invoice>, DatabaseError> {
        let row = sqlx::query("SELECT * FROM invoices WHERE order_id = ?1 AND invoice_type = ?2")
            .bind(order_id.as_uuid().to_string())
            .bind(invoice_type.as_str())
            .fetch_optional(&self.pool)
            .await?;
        row.map(|r| map_row(&r)).transpose()
    }

    pub async fn list_by_order(&self, order_id: OrderId) -> Result<Vec<Invoice>, DatabaseError> {
        let rows = sqlx::query("SELECT * FROM invoices WHERE order_id = ?1 ORDER BY created_at")
            .bind(order_id.as_uuid().to_string())
            .fetch_all(&self.pool)
            .await?;
        rows.iter().map(map_row).collect()
    }

    pub async fn list(&self, limit: i64, offset: i64) -> Result<Vec<Invoice>, DatabaseError> {
        let rows = sqlx::query(
            "SELECT * FROM invoices ORDER BY invoice_date DESC, invoice_number DESC LIMIT ?1 OFFSET ?2",
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;
        rows.iter().map(map_row).collect()
    }

    pub async fn count(&self) -> Result<i64, DatabaseError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM invoices")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}

fn map_row(row: &SqliteRow) -> Result<Invoice, DatabaseError> {
    let id: String = row.try_get("id")?;
    let order_id: String = row.try_get("order_id")?;
    let customer_id: String = row.try_get("customer_id")?;
    let invoice_type: String = row.try_get("invoice_type")?;
    let currency: String = row.try_get("currency")?;
    let currency: Currency = parse_enum("invoices", &currency)?;
    let items: String = row.try_get("items")?;
    let items: Vec<OrderItem> = parse_json("invoices", &items)?;
    let bank_details: String = row.try_get("bank_details")?;
    let bank_details: BankDetails = parse_json("invoices", &bank_details)?;
    let status: String = row.try_get("status")?;

    let subtotal: String = row.try_get("subtotal")?;
    let igst: String = row.try_get("igst")?;
    let drawback: String = row.try_get("drawback")?;
    let rodtep: String = row.try_get("rodtep")?;
    let total_amount: String = row.try_get("total_amount")?;

    Ok(Invoice {
        id: InvoiceId::from(parse_uuid("invoices", &id)?),
        invoice_number: row.try_get("invoice_number")?,
        invoice_type: parse_enum::<InvoiceType>("invoices", &invoice_type)?,
        order_id: OrderId::from(parse_uuid("invoices", &order_id)?),
        customer_id: CustomerId::from(parse_uuid("invoices", &customer_id)?),
        invoice_date: row.try_get::<NaiveDate, _>("invoice_date")?,
        due_date: row.try_get::<Option<NaiveDate>, _>("due_date")?,
        currency,
        items,
        totals: OrderTotals {
            subtotal: parse_money("invoices", &subtotal, currency)?,
            igst: parse_money("invoices", &igst, currency)?,
            drawback: parse_money("invoices", &drawback, currency)?,
            rodtep: parse_money("invoices", &rodtep, currency)?,
            total_amount: parse_money("invoices", &total_amount, currency)?,
        },
        bank_details,
        terms: row.try_get("terms")?,
        status: parse_enum::<InvoiceStatus>("invoices", &status)?,
        created_at: row.try_get::<DateTime<Utc>, _>("created_at")?,
        updated_at: row.try_get::<DateTime<Utc>, _>("updated_at")?,
    })
}
