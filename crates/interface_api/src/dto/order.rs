//! Order DTOs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use core_kernel::Currency;
use domain_orders::{Order, OrderItem, OrderTotals};

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct OrderItemRequest {
    pub product_id: Uuid,
    pub quantity: Decimal,
    /// Falls back to the product's catalogue price when omitted
    pub unit_price: Option<Decimal>,
    pub batch_number: Option<String>,
    pub expiry_date: Option<NaiveDate>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateOrderRequest {
    pub customer_id: Uuid,
    pub ordered_at: NaiveDate,
    pub currency: Currency,
    #[validate(length(min = 1))]
    pub items: Vec<OrderItemRequest>,
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateOrderItemsRequest {
    #[validate(length(min = 1))]
    pub items: Vec<OrderItemRequest>,
}

#[derive(Debug, Deserialize)]
pub struct OrderStatusRequest {
    /// One of draft/confirmed/processing/shipped/delivered/cancelled
    pub status: String,
}

#[derive(Debug, Serialize)]
pub struct OrderItemResponse {
    pub id: Uuid,
    pub product_id: Uuid,
    pub quantity: Decimal,
    pub unit_price: Decimal,
    pub line_total: Decimal,
    pub batch_number: Option<String>,
    pub expiry_date: Option<NaiveDate>,
}

impl From<&OrderItem> for OrderItemResponse {
    fn from(item: &OrderItem) -> Self {
        Self {
            id: item.id,
            product_id: *item.product_id.as_uuid(),
            quantity: item.quantity,
            unit_price: item.unit_price,
            line_total: item.line_total(),
            batch_number: item.batch_number.clone(),
            expiry_date: item.expiry_date,
        }
    }
}

/// The five-figure block as plain decimals
#[derive(Debug, Serialize)]
pub struct TotalsResponse {
    pub subtotal: Decimal,
    pub igst: Decimal,
    pub drawback: Decimal,
    pub rodtep: Decimal,
    pub total_amount: Decimal,
}

impl From<&OrderTotals> for TotalsResponse {
    fn from(totals: &OrderTotals) -> Self {
        Self {
            subtotal: totals.subtotal.amount(),
            igst: totals.igst.amount(),
            drawback: totals.drawback.amount(),
            rodtep: totals.rodtep.amount(),
            total_amount: totals.total_amount.amount(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct OrderResponse {
    pub id: Uuid,
    pub order_number: String,
    pub customer_id: Uuid,
    pub ordered_at: NaiveDate,
    pub currency: &'static str,
    pub items: Vec<OrderItemResponse>,
    pub totals: TotalsResponse,
    pub status: &'static str,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Order> for OrderResponse {
    fn from(order: &Order) -> Self {
        Self {
            id: *order.id.as_uuid(),
            order_number: order.order_number.clone(),
            customer_id: *order.customer_id.as_uuid(),
            ordered_at: order.ordered_at,
            currency: order.currency.code(),
            items: order.items.iter().map(OrderItemResponse::from).collect(),
            totals: TotalsResponse::from(&order.totals),
            status: order.status.as_str(),
            notes: order.notes.clone(),
            created_at: order.created_at,
            updated_at: order.updated_at,
        }
    }
}
