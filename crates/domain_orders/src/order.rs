//! Export order aggregate
//!
//! An order is created in `Draft`, may be edited until it reaches a terminal
//! status, and walks `draft → confirmed → processing → shipped → delivered`.
//! `Cancelled` is reachable from any non-terminal status. The order number,
//! once issued by the numbering registry, never changes.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use core_kernel::{Currency, CustomerId, OrderId, ProductId};

use crate::calculation::{calculate_order_totals, ExportRates, OrderTotals};
use crate::error::OrderError;

/// Order lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Draft,
    Confirmed,
    Processing,
    Shipped,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    /// Returns true if no further transitions are possible
    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Delivered | OrderStatus::Cancelled)
    }

    /// Checks whether a transition to `next` is allowed
    pub fn can_transition_to(&self, next: OrderStatus) -> bool {
        use OrderStatus::*;
        match (self, next) {
            (_, Cancelled) => !self.is_terminal(),
            (Draft, Confirmed) => true,
            (Confirmed, Processing) => true,
            (Processing, Shipped) => true,
            (Shipped, Delivered) => true,
            _ => false,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Draft => "draft",
            OrderStatus::Confirmed => "confirmed",
            OrderStatus::Processing => "processing",
            OrderStatus::Shipped => "shipped",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for OrderStatus {
    type Err = OrderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(OrderStatus::Draft),
            "confirmed" => Ok(OrderStatus::Confirmed),
            "processing" => Ok(OrderStatus::Processing),
            "shipped" => Ok(OrderStatus::Shipped),
            "delivered" => Ok(OrderStatus::Delivered),
            "cancelled" => Ok(OrderStatus::Cancelled),
            other => Err(OrderError::validation(format!("Unknown order status: {other}"))),
        }
    }
}

/// A line item on an export order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderItem {
    /// Item ID
    pub id: Uuid,
    /// Product reference
    pub product_id: ProductId,
    /// Quantity ordered
    pub quantity: Decimal,
    /// Unit price in the order currency
    pub unit_price: Decimal,
    /// Manufacturing batch, when already assigned
    pub batch_number: Option<String>,
    /// Batch expiry date
    pub expiry_date: Option<NaiveDate>,
}

impl OrderItem {
    pub fn new(product_id: ProductId, quantity: Decimal, unit_price: Decimal) -> Self {
        Self {
            id: Uuid::new_v4(),
            product_id,
            quantity,
            unit_price,
            batch_number: None,
            expiry_date: None,
        }
    }

    /// Assigns the batch this line will ship from
    pub fn with_batch(mut self, batch_number: impl Into<String>, expiry_date: NaiveDate) -> Self {
        self.batch_number = Some(batch_number.into());
        self.expiry_date = Some(expiry_date);
        self
    }

    /// Line total (quantity x unit price), unrounded
    pub fn line_total(&self) -> Decimal {
        self.quantity * self.unit_price
    }
}

/// An export order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    /// Unique identifier
    pub id: OrderId,
    /// Human-readable order number (e.g. ORD-2025-00001), never reissued
    pub order_number: String,
    /// Customer placing the order
    pub customer_id: CustomerId,
    /// Date the order was placed
    pub ordered_at: NaiveDate,
    /// Order currency
    pub currency: Currency,
    /// Line items
    pub items: Vec<OrderItem>,
    /// Derived figure block (subtotal, IGST, drawback, RODTEP, total)
    pub totals: OrderTotals,
    /// Lifecycle status
    pub status: OrderStatus,
    /// Free-text notes
    pub notes: Option<String>,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
    /// Updated timestamp
    pub updated_at: DateTime<Utc>,
}

impl Order {
    /// Creates a new draft order with no items
    pub fn new(
        order_number: impl Into<String>,
        customer_id: CustomerId,
        ordered_at: NaiveDate,
        currency: Currency,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: OrderId::new_v7(),
            order_number: order_number.into(),
            customer_id,
            ordered_at,
            currency,
            items: Vec::new(),
            totals: OrderTotals::zero(currency),
            status: OrderStatus::Draft,
            notes: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replaces the item list and recalculates totals
    ///
    /// Rejected once the order is in a terminal status.
    pub fn set_items(&mut self, items: Vec<OrderItem>, rates: &ExportRates) -> Result<(), OrderError> {
        if self.status.is_terminal() {
            return Err(OrderError::Terminal(self.status));
        }
        self.items = items;
        self.recalculate(rates);
        Ok(())
    }

    /// Appends a single item and recalculates totals
    pub fn add_item(&mut self, item: OrderItem, rates: &ExportRates) -> Result<(), OrderError> {
        if self.status.is_terminal() {
            return Err(OrderError::Terminal(self.status));
        }
        self.items.push(item);
        self.recalculate(rates);
        Ok(())
    }

    /// Recomputes the figure block from the current items
    pub fn recalculate(&mut self, rates: &ExportRates) {
        self.totals = calculate_order_totals(&self.items, self.currency, rates);
        self.updated_at = Utc::now();
    }

    /// Moves the order to a new status, enforcing the lifecycle
    pub fn transition_to(&mut self, next: OrderStatus) -> Result<(), OrderError> {
        if !self.status.can_transition_to(next) {
            return Err(OrderError::InvalidTransition {
                from: self.status,
                to: next,
            });
        }
        tracing::debug!(order = %self.order_number, from = %self.status, to = %next, "order status transition");
        self.status = next;
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Cancels the order (allowed from any non-terminal status)
    pub fn cancel(&mut self) -> Result<(), OrderError> {
        self.transition_to(OrderStatus::Cancelled)
    }

    /// Confirms the order, requiring at least one item
    pub fn confirm(&mut self) -> Result<(), OrderError> {
        if self.items.is_empty() {
            return Err(OrderError::EmptyOrder);
        }
        self.transition_to(OrderStatus::Confirmed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn draft_order() -> Order {
        Order::new(
            "ORD-2025-00001",
            CustomerId::new(),
            NaiveDate::from_ymd_opt(2025, 3, 14).unwrap(),
            Currency::USD,
        )
    }

    #[test]
    fn test_new_order_is_draft_with_zero_totals() {
        let order = draft_order();
        assert_eq!(order.status, OrderStatus::Draft);
        assert!(order.totals.subtotal.is_zero());
        assert_eq!(order.order_number, "ORD-2025-00001");
    }

    #[test]
    fn test_set_items_recalculates() {
        let mut order = draft_order();
        let item = OrderItem::new(ProductId::new(), dec!(1000), dec!(0.05));
        order.set_items(vec![item], &ExportRates::default()).unwrap();

        assert_eq!(order.totals.subtotal.amount(), dec!(50.00));
        assert_eq!(order.totals.total_amount.amount(), dec!(49.05));
    }

    #[test]
    fn test_happy_path_lifecycle() {
        let mut order = draft_order();
        order
            .add_item(
                OrderItem::new(ProductId::new(), dec!(10), dec!(2.50)),
                &ExportRates::default(),
            )
            .unwrap();

        order.confirm().unwrap();
        order.transition_to(OrderStatus::Processing).unwrap();
        order.transition_to(OrderStatus::Shipped).unwrap();
        order.transition_to(OrderStatus::Delivered).unwrap();

        assert!(order.status.is_terminal());
    }

    #[test]
    fn test_cannot_skip_statuses() {
        let mut order = draft_order();
        let err = order.transition_to(OrderStatus::Shipped).unwrap_err();
        assert!(matches!(err, OrderError::InvalidTransition { .. }));
    }

    #[test]
    fn test_cancel_from_any_non_terminal_status() {
        let mut order = draft_order();
        order
            .add_item(
                OrderItem::new(ProductId::new(), dec!(1), dec!(1)),
                &ExportRates::default(),
            )
            .unwrap();
        order.confirm().unwrap();
        order.cancel().unwrap();
        assert_eq!(order.status, OrderStatus::Cancelled);

        // and not from a terminal one
        assert!(order.cancel().is_err());
    }

    #[test]
    fn test_confirm_requires_items() {
        let mut order = draft_order();
        assert!(matches!(order.confirm(), Err(OrderError::EmptyOrder)));
    }

    #[test]
    fn test_terminal_order_rejects_edits() {
        let mut order = draft_order();
        order.cancel().unwrap();
        let err = order
            .add_item(
                OrderItem::new(ProductId::new(), dec!(1), dec!(1)),
                &ExportRates::default(),
            )
            .unwrap_err();
        assert!(matches!(err, OrderError::Terminal(OrderStatus::Cancelled)));
    }
}
