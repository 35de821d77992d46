//! Packing lists
//!
//! A packing list describes how an order physically ships: packages, net and
//! gross weights, batch numbers. It carries no prices; the commercial figures
//! live on the invoice.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use core_kernel::{InvoiceId, OrderId, PackingListId, ProductId};

/// A physical line on a packing list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackingListItem {
    pub id: Uuid,
    pub product_id: ProductId,
    pub batch_number: Option<String>,
    pub expiry_date: Option<NaiveDate>,
    /// Units in this line
    pub quantity: Decimal,
    /// Number of shipping packages (cartons, drums)
    pub packages: u32,
    pub net_weight_kg: Decimal,
    pub gross_weight_kg: Decimal,
    /// Carton dimensions, free text (e.g. "40x30x25 cm")
    pub dimensions: Option<String>,
}

impl PackingListItem {
    pub fn new(
        product_id: ProductId,
        quantity: Decimal,
        packages: u32,
        net_weight_kg: Decimal,
        gross_weight_kg: Decimal,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            product_id,
            batch_number: None,
            expiry_date: None,
            quantity,
            packages,
            net_weight_kg,
            gross_weight_kg,
            dimensions: None,
        }
    }

    pub fn with_batch(mut self, batch_number: impl Into<String>, expiry_date: NaiveDate) -> Self {
        self.batch_number = Some(batch_number.into());
        self.expiry_date = Some(expiry_date);
        self
    }

    pub fn with_dimensions(mut self, dimensions: impl Into<String>) -> Self {
        self.dimensions = Some(dimensions.into());
        self
    }
}

/// A packing list for one order, optionally tied to an invoice
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PackingList {
    pub id: PackingListId,
    /// Human-readable number (e.g. PL-2025-00001)
    pub packing_list_number: String,
    pub order_id: OrderId,
    pub invoice_id: Option<InvoiceId>,
    pub date: NaiveDate,
    pub items: Vec<PackingListItem>,
    /// Shipping marks printed on the cartons
    pub shipping_marks: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl PackingList {
    pub fn new(packing_list_number: impl Into<String>, order_id: OrderId, date: NaiveDate) -> Self {
        let now = Utc::now();
        Self {
            id: PackingListId::new_v7(),
            packing_list_number: packing_list_number.into(),
            order_id,
            invoice_id: None,
            date,
            items: Vec::new(),
            shipping_marks: None,
            notes: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Links this packing list to an invoice
    pub fn with_invoice(mut self, invoice_id: InvoiceId) -> Self {
        self.invoice_id = Some(invoice_id);
        self
    }

    pub fn with_items(mut self, items: Vec<PackingListItem>) -> Self {
        self.items = items;
        self
    }

    pub fn total_packages(&self) -> u32 {
        self.items.iter().map(|i| i.packages).sum()
    }

    pub fn total_net_weight_kg(&self) -> Decimal {
        self.items.iter().map(|i| i.net_weight_kg).sum()
    }

    pub fn total_gross_weight_kg(&self) -> Decimal {
        self.items.iter().map(|i| i.gross_weight_kg).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_weight_and_package_totals() {
        let pl = PackingList::new(
            "PL-2025-00001",
            OrderId::new(),
            NaiveDate::from_ymd_opt(2025, 4, 1).unwrap(),
        )
        .with_items(vec![
            PackingListItem::new(ProductId::new(), dec!(1000), 4, dec!(12.5), dec!(14.0)),
            PackingListItem::new(ProductId::new(), dec!(500), 2, dec!(6.0), dec!(7.2)),
        ]);

        assert_eq!(pl.total_packages(), 6);
        assert_eq!(pl.total_net_weight_kg(), dec!(18.5));
        assert_eq!(pl.total_gross_weight_kg(), dec!(21.2));
    }

    #[test]
    fn test_invoice_link_is_optional() {
        let pl = PackingList::new(
            "PL-2025-00002",
            OrderId::new(),
            NaiveDate::from_ymd_opt(2025, 4, 2).unwrap(),
        );
        assert!(pl.invoice_id.is_none());

        let linked = pl.with_invoice(InvoiceId::new());
        assert!(linked.invoice_id.is_some());
    }
}
