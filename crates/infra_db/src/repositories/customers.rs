//! Customer repository

use chrono::{DateTime, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

use core_kernel::CustomerId;
use domain_orders::Customer;

use crate::error::DatabaseError;

use super::parse_uuid;

#[derive(Clone)]
pub struct CustomerRepository {
    pool: SqlitePool,
}

impl CustomerRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn insert(&self, customer: &Customer) -> Result<(), DatabaseError> {
        sqlx::query(
            "INSERT INTO customers \
             (id, name, address, city, country, email, phone, tax_id, created_at, updated_at) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
        )
        .bind(customer.id.as_uuid().to_string())
        .bind(&customer.name)
        .bind(&customer.address)
        .bind(&customer.city)
        .bind(&customer.country)
        .bind(&customer.email)
        .bind(&customer.phone)
        .bind(&customer.tax_id)
        .bind(customer.created_at)
        .bind(customer.updated_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    pub async fn update(&self, customer: &Customer) -> Result<(), DatabaseError> {
        let result = sqlx::query(
            "UPDATE customers SET name = ?2, address = ?3, city = ?4, country = ?5, \
             email = ?6, phone = ?7, tax_id = ?8, updated_at = ?9 WHERE id = ?1",
        )
        .bind(customer.id.as_uuid().to_string())
        .bind(&customer.name)
        .bind(&customer.address)
        .bind(&customer.city)
        .bind(&customer.country)
        .bind(&customer.email)
        .bind(&customer.phone)
        .bind(&customer.tax_id)
        .bind(customer.updated_at)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::not_found("Customer", customer.id));
        }
        Ok(())
    }

    pub async fn find(&self, id: CustomerId) -> Result<Option<Customer>, DatabaseError> {
        let row = sqlx::query("SELECT * FROM customers WHERE id = ?1")
            .bind(id.as_uuid().to_string())
            .fetch_optional(&self.pool)
            .await?;
        row.map(|r| map_row(&r)).transpose()
    }

    pub async fn get(&self, id: CustomerId) -> Result<Customer, DatabaseError> {
        self.find(id)
            .await?
            .ok_or_else(|| DatabaseError::not_found("Customer", id))
    }

    pub async fn list(&self, limit: i64, offset: i64) -> Result<Vec<Customer>, DatabaseError> {
        let rows = sqlx::query("SELECT * FROM customers ORDER BY name LIMIT ?1 OFFSET ?2")
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await?;
        rows.iter().map(map_row).collect()
    }

    pub async fn count(&self) -> Result<i64, DatabaseError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM customers")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    pub async fn delete(&self, id: CustomerId) -> Result<(), DatabaseError> {
        let result = sqlx::query("DELETE FROM customers WHERE id = ?1")
            .bind(id.as_uuid().to_string())
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(DatabaseError::not_found("Customer", id));
        }
        Ok(())
    }
}

fn map_row(row: &SqliteRow) -> Result<Customer, DatabaseError> {
    let id: String = row.try_get("id")?;
    Ok(Customer {
        id: CustomerId::from(parse_uuid("customers", &id)?),
        name: row.try_get("name")?,
        address: row.try_get("address")?,
        city: row.try_get("city")?,
        country: row.try_get("country")?,
        email: row.try_get("email")?,
        phone: row.try_get("phone")?,
        tax_id: row.try_get("tax_id")?,
        created_at: row.try_get::<DateTime<Utc>, _>("created_at")?,
        updated_at: row.try_get::<DateTime<Utc>, _>("updated_at")?,
    })
}
