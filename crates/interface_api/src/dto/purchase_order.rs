//! Purchase order DTOs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use core_kernel::Currency;
use domain_orders::{PurchaseOrder, PurchaseOrderItem};

#[derive(Debug, Serialize, Deserialize)]
pub struct PurchaseItemRequest {
    pub product_id: Uuid,
    pub quantity: Decimal,
    pub unit_price: Decimal,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreatePurchaseOrderRequest {
    #[validate(length(min = 1, max = 200))]
    pub supplier_name: String,
    pub supplier_address: Option<String>,
    pub ordered_at: NaiveDate,
    pub currency: Currency,
    /// GST rate on domestic procurement, as a decimal (0.12 for 12%)
    pub tax_rate: Decimal,
    #[validate(length(min = 1))]
    pub items: Vec<PurchaseItemRequest>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdatePurchaseItemsRequest {
    #[validate(length(min = 1))]
    pub items: Vec<PurchaseItemRequest>,
}

#[derive(Debug, Deserialize)]
pub struct PurchaseOrderStatusRequest {
    /// One of draft/sent/acknowledged/received/cancelled
    pub status: String,
}

#[derive(Debug, Serialize)]
pub struct PurchaseItemResponse {
    pub id: Uuid,
    pub product_id: Uuid,
    pub quantity: Decimal,
    pub unit_price: Decimal,
    pub line_total: Decimal,
}

impl From<&PurchaseOrderItem> for PurchaseItemResponse {
    fn from(item: &PurchaseOrderItem) -> Self {
        Self {
            id: item.id,
            product_id: *item.product_id.as_uuid(),
            quantity: item.quantity,
            unit_price: item.unit_price,
            line_total: item.line_total(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PurchaseOrderResponse {
    pub id: Uuid,
    pub po_number: String,
    pub supplier_name: String,
    pub supplier_address: Option<String>,
    pub ordered_at: NaiveDate,
    pub currency: &'static str,
    pub items: Vec<PurchaseItemResponse>,
    pub tax_rate: Decimal,
    pub subtotal: Decimal,
    pub tax: Decimal,
    pub total: Decimal,
    pub status: &'static str,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&PurchaseOrder> for PurchaseOrderResponse {
    fn from(po: &PurchaseOrder) -> Self {
        Self {
            id: *po.id.as_uuid(),
            po_number: po.po_number.clone(),
            supplier_name: po.supplier_name.clone(),
            supplier_address: po.supplier_address.clone(),
            ordered_at: po.ordered_at,
            currency: po.currency.code(),
            items: po.items.iter().map(PurchaseItemResponse::from).collect(),
            tax_rate: po.tax_rate.as_decimal(),
            subtotal: po.totals.subtotal.amount(),
            tax: po.totals.tax.amount(),
            total: po.totals.total.amount(),
            status: po.status.as_str(),
            created_at: po.created_at,
            updated_at: po.updated_at,
        }
    }
}
