//! Export invoices
//!
//! An invoice is created from an existing order and freezes that order's
//! items and figure block at creation time; later edits to the order do not
//! flow through. One invoice may exist per (order, invoice type) pair.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use core_kernel::{Currency, CustomerId, InvoiceId, OrderId};
use domain_orders::{Order, OrderItem, OrderTotals};

use crate::error::DocumentError;

/// The three export invoice flavours, issued in lifecycle order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InvoiceType {
    /// Quoted before order confirmation
    Proforma,
    /// Issued before shipment
    PreShipment,
    /// Commercial/final invoice after shipment
    PostShipment,
}

impl InvoiceType {
    /// Numbering prefix for this invoice type
    pub fn number_prefix(&self) -> &'static str {
        match self {
            InvoiceType::Proforma => "PI",
            InvoiceType::PreShipment => "PSI",
            InvoiceType::PostShipment => "INV",
        }
    }

    /// Default watermark label for rendered documents
    pub fn watermark_label(&self) -> &'static str {
        match self {
            InvoiceType::Proforma => "PROFORMA",
            InvoiceType::PreShipment => "PRE-SHIPMENT",
            InvoiceType::PostShipment => "COMMERCIAL",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            InvoiceType::Proforma => "proforma",
            InvoiceType::PreShipment => "pre-shipment",
            InvoiceType::PostShipment => "post-shipment",
        }
    }
}

impl fmt::Display for InvoiceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for InvoiceType {
    type Err = DocumentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "proforma" => Ok(InvoiceType::Proforma),
            "pre-shipment" => Ok(InvoiceType::PreShipment),
            "post-shipment" | "commercial" => Ok(InvoiceType::PostShipment),
            other => Err(DocumentError::validation(format!(
                "Unknown invoice type: {other}"
            ))),
        }
    }
}

/// Invoice status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvoiceStatus {
    Draft,
    Issued,
    Paid,
    Cancelled,
}

impl InvoiceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            InvoiceStatus::Draft => "draft",
            InvoiceStatus::Issued => "issued",
            InvoiceStatus::Paid => "paid",
            InvoiceStatus::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for InvoiceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for InvoiceStatus {
    type Err = DocumentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(InvoiceStatus::Draft),
            "issued" => Ok(InvoiceStatus::Issued),
            "paid" => Ok(InvoiceStatus::Paid),
            "cancelled" => Ok(InvoiceStatus::Cancelled),
            other => Err(DocumentError::validation(format!(
                "Unknown invoice status: {other}"
            ))),
        }
    }
}

/// Bank details snapshot carried on an invoice
///
/// Copied onto the invoice at creation so later changes to the company's
/// banking arrangements never rewrite issued paperwork.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BankDetails {
    pub bank_name: String,
    pub account_number: String,
    pub swift_code: String,
    pub ifsc_code: String,
    pub branch: Option<String>,
}

/// An export invoice
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Invoice {
    pub id: InvoiceId,
    /// Human-readable number (PI-/PSI-/INV- prefixed), never reissued
    pub invoice_number: String,
    pub invoice_type: InvoiceType,
    /// Source order
    pub order_id: OrderId,
    pub customer_id: CustomerId,
    pub invoice_date: NaiveDate,
    pub due_date: Option<NaiveDate>,
    pub currency: Currency,
    /// Item snapshot copied from the order at creation
    pub items: Vec<OrderItem>,
    /// Figure block copied from the order at creation (not live-linked)
    pub totals: OrderTotals,
    pub bank_details: BankDetails,
    /// Payment/delivery terms text
    pub terms: Option<String>,
    pub status: InvoiceStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Invoice {
    /// Creates an invoice from an order, snapshotting items and totals
    pub fn from_order(
        invoice_number: impl Into<String>,
        invoice_type: InvoiceType,
        order: &Order,
        bank_details: BankDetails,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: InvoiceId::new_v7(),
            invoice_number: invoice_number.into(),
            invoice_type,
            order_id: order.id,
            customer_id: order.customer_id,
            invoice_date: now.date_naive(),
            due_date: None,
            currency: order.currency,
            items: order.items.clone(),
            totals: order.totals,
            bank_details,
            terms: None,
            status: InvoiceStatus::Draft,
            created_at: now,
            updated_at: now,
        }
    }

    /// Sets the payment due date
    pub fn with_due_date(mut self, due_date: NaiveDate) -> Self {
        self.due_date = Some(due_date);
        self
    }

    /// Sets the terms text
    pub fn with_terms(mut self, terms: impl Into<String>) -> Self {
        self.terms = Some(terms.into());
        self
    }

    /// Issues the invoice
    pub fn issue(&mut self) -> Result<(), DocumentError> {
        match self.status {
            InvoiceStatus::Draft => {
                self.status = InvoiceStatus::Issued;
                self.updated_at = Utc::now();
                Ok(())
            }
            other => Err(DocumentError::InvalidTransition(format!(
                "Invoice {} is {other}, only draft invoices can be issued",
                self.invoice_number
            ))),
        }
    }

    /// Marks the invoice as paid
    pub fn mark_paid(&mut self) -> Result<(), DocumentError> {
        match self.status {
            InvoiceStatus::Issued => {
                self.status = InvoiceStatus::Paid;
                self.updated_at = Utc::now();
                Ok(())
            }
            other => Err(DocumentError::InvalidTransition(format!(
                "Invoice {} is {other}, only issued invoices can be paid",
                self.invoice_number
            ))),
        }
    }

    /// Cancels the invoice
    pub fn cancel(&mut self) -> Result<(), DocumentError> {
        match self.status {
            InvoiceStatus::Paid | InvoiceStatus::Cancelled => {
                Err(DocumentError::InvalidTransition(format!(
                    "Invoice {} is {} and cannot be cancelled",
                    self.invoice_number, self.status
                )))
            }
            _ => {
                self.status = InvoiceStatus::Cancelled;
                self.updated_at = Utc::now();
                Ok(())
            }
        }
    }

    /// Checks if the invoice is past its due date
    pub fn is_overdue(&self) -> bool {
        match self.due_date {
            Some(due) => {
                Utc::now().date_naive() > due
                    && matches!(self.status, InvoiceStatus::Issued)
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use core_kernel::{CustomerId, ProductId};
    use domain_orders::{ExportRates, OrderItem};
    use rust_decimal_macros::dec;

    fn bank() -> BankDetails {
        BankDetails {
            bank_name: "State Bank of India".to_string(),
            account_number: "00000012345678".to_string(),
            swift_code: "SBININBB104".to_string(),
            ifsc_code: "SBIN0000300".to_string(),
            branch: Some("Fort, Mumbai".to_string()),
        }
    }

    fn order_with_items() -> Order {
        let mut order = Order::new(
            "ORD-2025-00001",
            CustomerId::new(),
            NaiveDate::from_ymd_opt(2025, 1, 10).unwrap(),
            Currency::USD,
        );
        order
            .set_items(
                vec![OrderItem::new(ProductId::new(), dec!(1000), dec!(0.05))],
                &ExportRates::default(),
            )
            .unwrap();
        order
    }

    #[test]
    fn test_invoice_snapshots_order_figures() {
        let mut order = order_with_items();
        let invoice = Invoice::from_order("PI-2025-00001", InvoiceType::Proforma, &order, bank());

        assert_eq!(invoice.totals, order.totals);
        assert_eq!(invoice.items.len(), 1);

        // mutating the order afterwards must not affect the invoice
        order
            .set_items(
                vec![OrderItem::new(ProductId::new(), dec!(1), dec!(1))],
                &ExportRates::default(),
            )
            .unwrap();
        assert_ne!(invoice.totals, order.totals);
        assert_eq!(invoice.totals.total_amount.amount(), dec!(49.05));
    }

    #[test]
    fn test_invoice_type_prefixes() {
        assert_eq!(InvoiceType::Proforma.number_prefix(), "PI");
        assert_eq!(InvoiceType::PreShipment.number_prefix(), "PSI");
        assert_eq!(InvoiceType::PostShipment.number_prefix(), "INV");
    }

    #[test]
    fn test_commercial_alias_parses_as_post_shipment() {
        let parsed: InvoiceType = "commercial".parse().unwrap();
        assert_eq!(parsed, InvoiceType::PostShipment);
    }

    #[test]
    fn test_status_flow() {
        let order = order_with_items();
        let mut invoice =
            Invoice::from_order("INV-2025-00001", InvoiceType::PostShipment, &order, bank());

        invoice.issue().unwrap();
        assert!(invoice.mark_paid().is_ok());
        assert!(invoice.cancel().is_err());
    }

    #[test]
    fn test_overdue_needs_issue_and_past_due_date() {
        let order = order_with_items();
        let mut invoice =
            Invoice::from_order("INV-2025-00002", InvoiceType::PostShipment, &order, bank())
                .with_due_date(NaiveDate::from_ymd_opt(2020, 1, 1).unwrap());

        assert!(!invoice.is_overdue()); // still draft
        invoice.issue().unwrap();
        assert!(invoice.is_overdue());
    }
}
