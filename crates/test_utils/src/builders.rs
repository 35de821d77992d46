//! Test Data Builders
//!
//! Builder patterns for constructing test aggregates with sensible defaults.
//! Tests specify only the fields they care about.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use core_kernel::{Currency, CustomerId, ProductId};
use domain_documents::{Invoice, InvoiceType, PackingList, PackingListItem};
use domain_orders::{ExportRates, Order, OrderItem};

use crate::fixtures::{TemporalFixtures, STANDARD_BANK};

/// Builds an order with one 1000 x 0.05 USD line by default
pub struct OrderBuilder {
    order_number: String,
    customer_id: CustomerId,
    ordered_at: NaiveDate,
    currency: Currency,
    items: Vec<(ProductId, Decimal, Decimal)>,
    rates: ExportRates,
}

impl Default for OrderBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl OrderBuilder {
    pub fn new() -> Self {
        Self {
            order_number: "ORD-2025-00001".to_string(),
            customer_id: CustomerId::new(),
            ordered_at: TemporalFixtures::order_date(),
            currency: Currency::USD,
            items: vec![(ProductId::new(), dec!(1000), dec!(0.05))],
            rates: ExportRates::default(),
        }
    }

    pub fn with_order_number(mut self, number: impl Into<String>) -> Self {
        self.order_number = number.into();
        self
    }

    pub fn with_customer_id(mut self, customer_id: CustomerId) -> Self {
        self.customer_id = customer_id;
        self
    }

    pub fn with_currency(mut self, currency: Currency) -> Self {
        self.currency = currency;
        self
    }

    pub fn with_rates(mut self, rates: ExportRates) -> Self {
        self.rates = rates;
        self
    }

    /// Replaces the default line items
    pub fn with_items(mut self, items: Vec<(ProductId, Decimal, Decimal)>) -> Self {
        self.items = items;
        self
    }

    /// Appends a (product, quantity, unit price) line
    pub fn with_line(mut self, product_id: ProductId, quantity: Decimal, unit_price: Decimal) -> Self {
        self.items.push((product_id, quantity, unit_price));
        self
    }

    pub fn build(self) -> Order {
        let mut order = Order::new(
            self.order_number,
            self.customer_id,
            self.ordered_at,
            self.currency,
        );
        let items = self
            .items
            .into_iter()
            .map(|(product_id, quantity, unit_price)| {
                OrderItem::new(product_id, quantity, unit_price)
            })
            .collect();
        order
            .set_items(items, &self.rates)
            .expect("a fresh draft order accepts items");
        order
    }
}

/// Builds an invoice snapshotting a built order
pub struct InvoiceBuilder {
    invoice_number: String,
    invoice_type: InvoiceType,
}

impl Default for InvoiceBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl InvoiceBuilder {
    pub fn new() -> Self {
        Self {
            invoice_number: "PI-2025-00001".to_string(),
            invoice_type: InvoiceType::Proforma,
        }
    }

    pub fn with_invoice_number(mut self, number: impl Into<String>) -> Self {
        self.invoice_number = number.into();
        self
    }

    pub fn with_invoice_type(mut self, invoice_type: InvoiceType) -> Self {
        self.invoice_type = invoice_type;
        self
    }

    pub fn build_from(self, order: &Order) -> Invoice {
        Invoice::from_order(
            self.invoice_number,
            self.invoice_type,
            order,
            STANDARD_BANK.clone(),
        )
    }
}

/// Builds a packing list mirroring an order's lines, one carton block per line
pub struct PackingListBuilder {
    packing_list_number: String,
    packages_per_line: u32,
}

impl Default for PackingListBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl PackingListBuilder {
    pub fn new() -> Self {
        Self {
            packing_list_number: "PL-2025-00001".to_string(),
            packages_per_line: 4,
        }
    }

    pub fn with_packing_list_number(mut self, number: impl Into<String>) -> Self {
        self.packing_list_number = number.into();
        self
    }

    pub fn with_packages_per_line(mut self, packages: u32) -> Self {
        self.packages_per_line = packages;
        self
    }

    pub fn build_from(self, order: &Order) -> PackingList {
        let items = order
            .items
            .iter()
            .map(|item| {
                PackingListItem::new(
                    item.product_id,
                    item.quantity,
                    self.packages_per_line,
                    dec!(10.0),
                    dec!(11.5),
                )
                .with_batch("AMX24101", TemporalFixtures::batch_expiry())
            })
            .collect();
        PackingList::new(self.packing_list_number, order.id, order.ordered_at).with_items(items)
    }
}
