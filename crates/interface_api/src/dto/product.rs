//! Product DTOs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use domain_orders::Product;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateProductRequest {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[validate(length(min = 1))]
    pub unit: String,
    pub hsn_code: Option<String>,
    pub dosage_form: Option<String>,
    pub strength: Option<String>,
    pub default_unit_price: Option<Decimal>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateProductRequest {
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,
    pub unit: Option<String>,
    pub hsn_code: Option<String>,
    pub dosage_form: Option<String>,
    pub strength: Option<String>,
    pub default_unit_price: Option<Decimal>,
}

#[derive(Debug, Serialize)]
pub struct ProductResponse {
    pub id: Uuid,
    pub name: String,
    /// Name, strength and dosage form joined as printed on documents
    pub display_name: String,
    pub hsn_code: Option<String>,
    pub dosage_form: Option<String>,
    pub strength: Option<String>,
    pub unit: String,
    pub default_unit_price: Option<Decimal>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Product> for ProductResponse {
    fn from(product: &Product) -> Self {
        Self {
            id: *product.id.as_uuid(),
            name: product.name.clone(),
            display_name: product.display_name(),
            hsn_code: product.hsn_code.clone(),
            dosage_form: product.dosage_form.clone(),
            strength: product.strength.clone(),
            unit: product.unit.clone(),
            default_unit_price: product.default_unit_price,
            created_at: product.created_at,
            updated_at: product.updated_at,
        }
    }
}
