//! Supplier-facing purchase orders
//!
//! A purchase order mirrors an export order towards the supplier. It carries
//! its own numbering (PO scope) and a plain subtotal/tax/total figure block;
//! drawback and RODTEP never apply because those are export incentives.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use core_kernel::{Currency, Money, ProductId, PurchaseOrderId, Rate};

use crate::error::OrderError;

/// Purchase order lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PurchaseOrderStatus {
    Draft,
    Sent,
    Acknowledged,
    Received,
    Cancelled,
}

impl PurchaseOrderStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, PurchaseOrderStatus::Received | PurchaseOrderStatus::Cancelled)
    }

    pub fn can_transition_to(&self, next: PurchaseOrderStatus) -> bool {
        use PurchaseOrderStatus::*;
        match (self, next) {
            (_, Cancelled) => !self.is_terminal(),
            (Draft, Sent) => true,
            (Sent, Acknowledged) => true,
            (Acknowledged, Received) => true,
            // suppliers often skip the acknowledgement
            (Sent, Received) => true,
            _ => false,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PurchaseOrderStatus::Draft => "draft",
            PurchaseOrderStatus::Sent => "sent",
            PurchaseOrderStatus::Acknowledged => "acknowledged",
            PurchaseOrderStatus::Received => "received",
            PurchaseOrderStatus::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for PurchaseOrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for PurchaseOrderStatus {
    type Err = OrderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(PurchaseOrderStatus::Draft),
            "sent" => Ok(PurchaseOrderStatus::Sent),
            "acknowledged" => Ok(PurchaseOrderStatus::Acknowledged),
            "received" => Ok(PurchaseOrderStatus::Received),
            "cancelled" => Ok(PurchaseOrderStatus::Cancelled),
            other => Err(OrderError::validation(format!(
                "Unknown purchase order status: {other}"
            ))),
        }
    }
}

/// A line item on a purchase order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurchaseOrderItem {
    pub id: Uuid,
    pub product_id: ProductId,
    pub quantity: Decimal,
    pub unit_price: Decimal,
}

impl PurchaseOrderItem {
    pub fn new(product_id: ProductId, quantity: Decimal, unit_price: Decimal) -> Self {
        Self {
            id: Uuid::new_v4(),
            product_id,
            quantity,
            unit_price,
        }
    }

    pub fn line_total(&self) -> Decimal {
        self.quantity * self.unit_price
    }
}

/// Purchase order figure block: subtotal, tax, total - nothing else
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurchaseTotals {
    pub subtotal: Money,
    pub tax: Money,
    pub total: Money,
}

impl PurchaseTotals {
    pub fn zero(currency: Currency) -> Self {
        let zero = Money::zero(currency);
        Self {
            subtotal: zero,
            tax: zero,
            total: zero,
        }
    }
}

/// Calculates purchase order totals with the same independent 2-dp rounding
/// the export calculation uses
pub fn calculate_purchase_totals(
    items: &[PurchaseOrderItem],
    currency: Currency,
    tax_rate: Rate,
) -> PurchaseTotals {
    let raw_subtotal: Decimal = items.iter().map(|i| i.quantity * i.unit_price).sum();
    let subtotal = Money::new(raw_subtotal, currency).round_half_up();
    let tax = tax_rate.apply(&subtotal).round_half_up();
    let total = subtotal + tax;

    PurchaseTotals { subtotal, tax, total }
}

/// A purchase order placed with a supplier
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PurchaseOrder {
    pub id: PurchaseOrderId,
    /// Human-readable number (e.g. PO-2025-00001)
    pub po_number: String,
    /// Supplier name (free text; suppliers are not master data yet)
    pub supplier_name: String,
    pub supplier_address: Option<String>,
    pub ordered_at: NaiveDate,
    pub currency: Currency,
    pub items: Vec<PurchaseOrderItem>,
    /// Applied tax rate (GST on domestic procurement)
    pub tax_rate: Rate,
    pub totals: PurchaseTotals,
    pub status: PurchaseOrderStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl PurchaseOrder {
    pub fn new(
        po_number: impl Into<String>,
        supplier_name: impl Into<String>,
        ordered_at: NaiveDate,
        currency: Currency,
        tax_rate: Rate,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: PurchaseOrderId::new_v7(),
            po_number: po_number.into(),
            supplier_name: supplier_name.into(),
            supplier_address: None,
            ordered_at,
            currency,
            items: Vec::new(),
            tax_rate,
            totals: PurchaseTotals::zero(currency),
            status: PurchaseOrderStatus::Draft,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn set_items(&mut self, items: Vec<PurchaseOrderItem>) -> Result<(), OrderError> {
        if self.status.is_terminal() {
            return Err(OrderError::validation(format!(
                "Purchase order {} is {} and cannot be modified",
                self.po_number, self.status
            )));
        }
        self.items = items;
        self.totals = calculate_purchase_totals(&self.items, self.currency, self.tax_rate);
        self.updated_at = Utc::now();
        Ok(())
    }

    pub fn transition_to(&mut self, next: PurchaseOrderStatus) -> Result<(), OrderError> {
        if !self.status.can_transition_to(next) {
            return Err(OrderError::validation(format!(
                "Invalid purchase order transition from {} to {}",
                self.status, next
            )));
        }
        self.status = next;
        self.updated_at = Utc::now();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_purchase_totals_have_no_incentives() {
        let items = vec![PurchaseOrderItem::new(ProductId::new(), dec!(200), dec!(1.25))];
        let totals = calculate_purchase_totals(&items, Currency::INR, Rate::new(dec!(0.12)));

        assert_eq!(totals.subtotal.amount(), dec!(250.00));
        assert_eq!(totals.tax.amount(), dec!(30.00));
        assert_eq!(totals.total.amount(), dec!(280.00));
    }

    #[test]
    fn test_po_lifecycle() {
        let mut po = PurchaseOrder::new(
            "PO-2025-00001",
            "Sai Pharma Labs",
            NaiveDate::from_ymd_opt(2025, 2, 1).unwrap(),
            Currency::INR,
            Rate::new(dec!(0.12)),
        );
        po.set_items(vec![PurchaseOrderItem::new(ProductId::new(), dec!(10), dec!(5))])
            .unwrap();
        po.transition_to(PurchaseOrderStatus::Sent).unwrap();
        po.transition_to(PurchaseOrderStatus::Received).unwrap();

        assert!(po.status.is_terminal());
        assert!(po.set_items(vec![]).is_err());
    }
}
