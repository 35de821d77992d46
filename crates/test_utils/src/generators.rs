//! Property-based Test Generators
//!
//! Proptest strategies for domain values. Quantities and prices stay inside
//! the ranges real orders use so shrunk counterexamples remain readable.

use proptest::prelude::*;
use rust_decimal::Decimal;

use core_kernel::{Currency, ProductId};
use domain_orders::OrderItem;

/// Unit quantities between 1 and 1,000,000 pieces
pub fn quantity_strategy() -> impl Strategy<Value = Decimal> {
    (1i64..=1_000_000).prop_map(Decimal::from)
}

/// Unit prices up to 4 decimal places, from a fraction of a cent to 10,000
pub fn unit_price_strategy() -> impl Strategy<Value = Decimal> {
    (1i64..=100_000_000).prop_map(|minor| Decimal::new(minor, 4))
}

/// Percentage-style rates up to 4 decimal places, 0% to 28%
pub fn rate_strategy() -> impl Strategy<Value = Decimal> {
    (0i64..=2_800).prop_map(|basis| Decimal::new(basis, 4))
}

pub fn currency_strategy() -> impl Strategy<Value = Currency> {
    prop_oneof![
        Just(Currency::USD),
        Just(Currency::INR),
        Just(Currency::EUR),
        Just(Currency::GBP),
        Just(Currency::AED),
    ]
}

/// A single order line with a random product
pub fn order_item_strategy() -> impl Strategy<Value = OrderItem> {
    (quantity_strategy(), unit_price_strategy())
        .prop_map(|(quantity, unit_price)| OrderItem::new(ProductId::new(), quantity, unit_price))
}

/// Between 1 and 20 order lines
pub fn order_items_strategy() -> impl Strategy<Value = Vec<OrderItem>> {
    prop::collection::vec(order_item_strategy(), 1..=20)
}
