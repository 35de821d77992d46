//! Product repository

use chrono::{DateTime, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

use core_kernel::ProductId;
use domain_orders::Product;

use crate::error::DatabaseError;

use super::{parse_decimal, parse_uuid};

#[derive(Clone)]
pub struct ProductRepository {
    pool: SqlitePool,
}

impl ProductRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn insert(&self, product: &Product) -> Result<(), DatabaseError> {
        sqlx::query(
            "INSERT INTO products \
             (id, name, hsn_code, dosage_form, strength, unit, default_unit_price, created_at, updated_at) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
        )
        .bind(product.id.as_uuid().to_string())
        .bind(&product.name)
        .bind(&product.hsn_code)
        .bind(&product.dosage_form)
        .bind(&product.strength)
        .bind(&product.unit)
        .bind(product.default_unit_price.map(|p| p.to_string()))
        .bind(product.created_at)
        .bind(product.updated_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    pub async fn update(&self, product: &Product) -> Result<(), DatabaseError> {
        let result = sqlx::query(
            "UPDATE products SET name = ?2, hsn_code = ?3, dosage_form = ?4, strength = ?5, \
             unit = ?6, default_unit_price = ?7, updated_at = ?8 WHERE id = ?1",
        )
        .bind(product.id.as_uuid().to_string())
        .bind(&product.name)
        .bind(&product.hsn_code)
        .bind(&product.dosage_form)
        .bind(&product.strength)
        .bind(&product.unit)
        .bind(product.default_unit_price.map(|p| p.to_string()))
        .bind(product.updated_at)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::not_found("Product", product.id));
        }
        Ok(())
    }

    pub async fn find(&self, id: ProductId) -> Result<Option<Product>, DatabaseError> {
        let row = sqlx::query("SELECT * FROM products WHERE id = ?1")
            .bind(id.as_uuid().to_string())
            .fetch_optional(&self.pool)
            .await?;
        row.map(|r| map_row(&r)).transpose()
    }

    pub async fn get(&self, id: ProductId) -> Result<Product, DatabaseError> {
        self.find(id)
            .await?
            .ok_or_else(|| DatabaseError::not_found("Product", id))
    }

    pub async fn list(&self, limit: i64, offset: i64) -> Result<Vec<Product>, DatabaseError> {
        let rows = sqlx::query("SELECT * FROM products ORDER BY name LIMIT ?1 OFFSET ?2")
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await?;
        rows.iter().map(map_row).collect()
    }

    /// Fetches every product; document hydration resolves item references
    /// from this map
    pub async fn all(&self) -> Result<Vec<Product>, DatabaseError> {
        let rows = sqlx::query("SELECT * FROM products")
            .fetch_all(&self.pool)
            .await?;
        rows.iter().map(map_row).collect()
    }

    pub async fn count(&self) -> Result<i64, DatabaseError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    pub async fn delete(&self, id: ProductId) -> Result<(), DatabaseError> {
        let result = sqlx::query("DELETE FROM products WHERE id = ?1")
            .bind(id.as_uuid().to_string())
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(DatabaseError::not_found("Product", id));
        }
        Ok(())
    }
}

fn map_row(row: &SqliteRow) -> Result<Product, DatabaseError> {
    let id: String = row.try_get("id")?;
    let default_unit_price: Option<String> = row.try_get("default_unit_price")?;
    Ok(Product {
        id: ProductId::from(parse_uuid("products", &id)?),
        name: row.try_get("name")?,
        hsn_code: row.try_get("hsn_code")?,
        dosage_form: row.try_get("dosage_form")?,
        strength: row.try_get("strength")?,
        unit: row.try_get("unit")?,
        default_unit_price: default_unit_price
            .map(|p| parse_decimal("products", &p))
            .transpose()?,
        created_at: row.try_get::<DateTime<Utc>, _>("created_at")?,
        updated_at: row.try_get::<DateTime<Utc>, _>("updated_at")?,
    })
}
