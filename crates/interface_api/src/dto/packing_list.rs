//! Packing list DTOs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use domain_documents::{PackingList, PackingListItem};

#[derive(Debug, Serialize, Deserialize)]
pub struct PackingItemRequest {
    pub product_id: Uuid,
    pub quantity: Decimal,
    pub packages: u32,
    pub net_weight_kg: Decimal,
    pub gross_weight_kg: Decimal,
    pub batch_number: Option<String>,
    pub expiry_date: Option<NaiveDate>,
    pub dimensions: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreatePackingListRequest {
    pub invoice_id: Option<Uuid>,
    /// Defaults to today when omitted
    pub date: Option<NaiveDate>,
    #[validate(length(min = 1))]
    pub items: Vec<PackingItemRequest>,
    pub shipping_marks: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdatePackingListRequest {
    pub items: Option<Vec<PackingItemRequest>>,
    pub shipping_marks: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct PackingItemResponse {
    pub id: Uuid,
    pub product_id: Uuid,
    pub quantity: Decimal,
    pub packages: u32,
    pub net_weight_kg: Decimal,
    pub gross_weight_kg: Decimal,
    pub batch_number: Option<String>,
    pub expiry_date: Option<NaiveDate>,
    pub dimensions: Option<String>,
}

impl From<&PackingListItem> for PackingItemResponse {
    fn from(item: &PackingListItem) -> Self {
        Self {
            id: item.id,
            product_id: *item.product_id.as_uuid(),
            quantity: item.quantity,
            packages: item.packages,
            net_weight_kg: item.net_weight_kg,
            gross_weight_kg: item.gross_weight_kg,
            batch_number: item.batch_number.clone(),
            expiry_date: item.expiry_date,
            dimensions: item.dimensions.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PackingListResponse {
    pub id: Uuid,
    pub packing_list_number: String,
    pub order_id: Uuid,
    pub invoice_id: Option<Uuid>,
    pub date: NaiveDate,
    pub items: Vec<PackingItemResponse>,
    pub total_packages: u32,
    pub total_net_weight_kg: Decimal,
    pub total_gross_weight_kg: Decimal,
    pub shipping_marks: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&PackingList> for PackingListResponse {
    fn from(pl: &PackingList) -> Self {
        Self {
            id: *pl.id.as_uuid(),
            packing_list_number: pl.packing_list_number.clone(),
            order_id: *pl.order_id.as_uuid(),
            invoice_id: pl.invoice_id.map(|id| *id.as_uuid()),
            date: pl.date,
            items: pl.items.iter().map(PackingItemResponse::from).collect(),
            total_packages: pl.total_packages(),
            total_net_weight_kg: pl.total_net_weight_kg(),
            total_gross_weight_kg: pl.total_gross_weight_kg(),
            shipping_marks: pl.shipping_marks.clone(),
            notes: pl.notes.clone(),
            created_at: pl.created_at,
            updated_at: pl.updated_at,
        }
    }
}
